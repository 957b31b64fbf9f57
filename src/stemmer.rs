//! Porter/Snowball stemming, backed by `rust-stemmers`.

use rust_stemmers::{Algorithm, Stemmer};
use std::sync::OnceLock;

/// Returns the process-wide English stemmer instance.
pub fn get_stemmer() -> &'static Stemmer {
    static STEMMER: OnceLock<Stemmer> = OnceLock::new();
    STEMMER.get_or_init(|| Stemmer::create(Algorithm::English))
}

/// Stem a single token.
pub fn stem(token: &str) -> String {
    get_stemmer().stem(token).into_owned()
}

/// Stem a sequence of tokens, preserving order.
pub fn stem_all(tokens: &[String]) -> Vec<String> {
    tokens.iter().map(|t| stem(t)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stems_plural_forms() {
        assert_eq!(stem("running"), "run");
        assert_eq!(stem("cats"), "cat");
    }

    #[test]
    fn stem_all_preserves_order_and_length() {
        let tokens = vec!["running".to_string(), "dogs".to_string()];
        let stemmed = stem_all(&tokens);
        assert_eq!(stemmed, vec!["run".to_string(), "dog".to_string()]);
    }

    #[test]
    fn idempotent_on_own_output() {
        let once = stem("cats");
        let twice = stem(&once);
        assert_eq!(once, twice);
    }
}
