//! Splits lowercased text into maximal alphanumeric runs.
//!
//! A token is a maximal run of `[A-Za-z0-9]`, lowercased; empty input yields
//! an empty sequence; there is no stopword filtering; source order is
//! preserved.

/// Tokenize `text` into an ordered sequence of lowercased alphanumeric runs.
pub fn tokenize(text: &str) -> Vec<String> {
    let mut tokens = Vec::new();
    let mut current = String::new();

    for ch in text.chars() {
        if ch.is_ascii_alphanumeric() {
            current.push(ch.to_ascii_lowercase());
        } else if !current.is_empty() {
            tokens.push(std::mem::take(&mut current));
        }
    }
    if !current.is_empty() {
        tokens.push(current);
    }

    tokens
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_input_yields_empty_sequence() {
        assert!(tokenize("").is_empty());
    }

    #[test]
    fn splits_on_non_alphanumeric_and_lowercases() {
        assert_eq!(
            tokenize("Hello, World! foo_bar123"),
            vec!["hello", "world", "foo", "bar123"]
        );
    }

    #[test]
    fn preserves_source_order() {
        assert_eq!(tokenize("cat dog cat"), vec!["cat", "dog", "cat"]);
    }

    #[test]
    fn no_stopword_filtering() {
        // "the" and "a" would be dropped by a stopword-aware tokenizer.
        assert_eq!(tokenize("the a of"), vec!["the", "a", "of"]);
    }

    #[test]
    fn runs_of_punctuation_collapse_to_nothing() {
        assert_eq!(tokenize("...!!!???"), Vec::<String>::new());
    }

    #[test]
    fn unicode_letters_are_not_ascii_alphanumeric() {
        // Contract is [A-Za-z0-9]; non-ASCII letters are treated as separators.
        assert_eq!(tokenize("café noir"), vec!["caf", "noir"]);
    }
}
