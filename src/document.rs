//! Per-record pipeline — read, extract, tokenize, stem — emitting two
//! independently stemmed token lists.

use crate::html;
use crate::stemmer;
use crate::tokenizer;

/// One input record as read from the corpus: a URL and raw HTML content.
#[derive(Debug, Clone, serde::Deserialize, serde::Serialize)]
pub struct Record {
    pub url: String,
    pub content: String,
}

/// Output of processing one document: its canonical URL and its two
/// independently stemmed token streams.
pub struct ProcessedDocument {
    pub canonical_url: String,
    pub body_tokens: Vec<String>,
    pub important_tokens: Vec<String>,
}

/// Truncate a URL at its first `#`, removing any fragment.
pub fn canonicalize_url(url: &str) -> String {
    match url.find('#') {
        Some(idx) => url[..idx].to_string(),
        None => url.to_string(),
    }
}

/// Process one record into stemmed token streams.
///
/// Returns `None` when `url` or `content` is empty — the record is skipped
/// and no doc-id is assigned. The caller is responsible for logging that
/// skip (this function has no I/O).
pub fn process_record(record: &Record) -> Option<ProcessedDocument> {
    if record.url.is_empty() || record.content.is_empty() {
        return None;
    }

    let canonical_url = canonicalize_url(&record.url);
    let extracted = html::extract(&record.content);

    let body_tokens = stemmer::stem_all(&tokenizer::tokenize(&extracted.body_text));
    let important_tokens = stemmer::stem_all(&tokenizer::tokenize(&extracted.important_text));

    Some(ProcessedDocument {
        canonical_url,
        body_tokens,
        important_tokens,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_url_is_skipped() {
        let record = Record {
            url: String::new(),
            content: "<p>hi</p>".to_string(),
        };
        assert!(process_record(&record).is_none());
    }

    #[test]
    fn empty_content_is_skipped() {
        let record = Record {
            url: "http://a/x".to_string(),
            content: String::new(),
        };
        assert!(process_record(&record).is_none());
    }

    #[test]
    fn canonicalizes_fragment() {
        assert_eq!(canonicalize_url("http://a/x#section2"), "http://a/x");
        assert_eq!(canonicalize_url("http://a/x"), "http://a/x");
    }

    #[test]
    fn term_frequency_is_summed_across_both_streams() {
        // body_text already contains "alpha" once from the <h1> (body_text is
        // never pruned of heading/bold text) plus once from the <p>, and
        // important_tokens adds its own "alpha" from the <h1> on top: tf 3.
        let record = Record {
            url: "http://x/".to_string(),
            content: "<h1>alpha</h1><p>alpha beta</p>".to_string(),
        };
        let processed = process_record(&record).unwrap();

        let alpha_total = processed.body_tokens.iter().filter(|t| *t == "alpha").count()
            + processed
                .important_tokens
                .iter()
                .filter(|t| *t == "alpha")
                .count();
        assert_eq!(alpha_total, 3);

        let beta_important = processed
            .important_tokens
            .iter()
            .any(|t| t == "beta");
        assert!(!beta_important);
    }
}
