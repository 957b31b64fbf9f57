//! Query normalization, posting fetch, strict boolean-AND intersection,
//! scoring, ranking and URL projection. Per-document scoring fans out over
//! `rayon` once the read-only candidate set is fixed.

use crate::index::{DocMapping, PostingList, PostingReader};
use crate::query::ranking;
use crate::stemmer;
use crate::tokenizer;
use rayon::prelude::*;
use std::cmp::Ordering;

/// One ranked query result.
#[derive(Debug, Clone, PartialEq)]
pub struct RankedResult {
    pub url: String,
    pub score: f64,
}

/// Tokenize and stem `query`, deduplicating while preserving first-appearance
/// order.
pub fn normalize_query(query: &str) -> Vec<String> {
    let stemmed = stemmer::stem_all(&tokenizer::tokenize(query));
    let mut seen = ahash::AHashSet::default();
    let mut ordered = Vec::new();
    for term in stemmed {
        if seen.insert(term.clone()) {
            ordered.push(term);
        }
    }
    ordered
}

/// Run the full query pipeline: normalize -> fetch -> strict AND intersect
/// -> score -> rank -> project to `(url, score)`, returning the top `top_k`.
pub fn search(
    reader: &dyn PostingReader,
    doc_mapping: &DocMapping,
    query: &str,
    top_k: usize,
) -> Vec<RankedResult> {
    let query_terms = normalize_query(query);
    if query_terms.is_empty() {
        return Vec::new();
    }

    let mut term_lists: Vec<(String, PostingList)> = Vec::with_capacity(query_terms.len());
    for term in &query_terms {
        let list = reader.postings(term);
        if list.is_empty() {
            // Strict AND: any query term absent from the index entirely
            // means no document can match every term.
            return Vec::new();
        }
        term_lists.push((term.clone(), list));
    }

    term_lists.sort_by_key(|(_, list)| list.len());

    let mut candidates: Vec<u32> = term_lists[0].1.keys().copied().collect();
    for (_, list) in &term_lists[1..] {
        candidates.retain(|doc_id| list.contains_key(doc_id));
        if candidates.is_empty() {
            return Vec::new();
        }
    }

    let total_docs = reader.total_documents();
    let q = query_terms.len();
    let idfs: Vec<f64> = term_lists
        .iter()
        .map(|(term, _)| ranking::idf(total_docs, reader.document_frequency(term)))
        .collect();

    let mut scored: Vec<(u32, f64)> = candidates
        .par_iter()
        .map(|&doc_id| {
            let summed: f64 = term_lists
                .iter()
                .zip(&idfs)
                .map(|((_, list), &idf)| {
                    let posting = list[&doc_id];
                    ranking::boost(posting.is_important) * ranking::tf_weight(posting.tf) * idf
                })
                .sum();
            (doc_id, ranking::combine(q, summed))
        })
        .collect();

    scored.sort_by(|a, b| match b.1.partial_cmp(&a.1).unwrap_or(Ordering::Equal) {
        Ordering::Equal => a.0.cmp(&b.0),
        other => other,
    });

    scored
        .into_iter()
        .take(top_k)
        .filter_map(|(doc_id, score)| {
            doc_mapping
                .url_for(doc_id)
                .map(|url| RankedResult {
                    url: url.to_string(),
                    score,
                })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::index::{builder::Builder, merger, open_on_demand, DocMapping};
    use tempfile::tempdir;

    fn build(dir: &std::path::Path, docs: &[(&str, &[&str])]) -> (usize, DocMapping) {
        let mut builder = Builder::new(dir, 1000);
        for (url, tokens) in docs {
            let tokens: Vec<String> = tokens.iter().map(|t| t.to_string()).collect();
            builder.add_document(url, &tokens, &[]).unwrap();
        }
        let output = builder.finalize().unwrap();
        merger::merge(dir, &output.segments).unwrap();
        let mapping = DocMapping::read(&dir.join("doc_mapping.json")).unwrap();
        (output.total_docs, mapping)
    }

    #[test]
    fn normalize_query_dedupes_preserving_order() {
        let terms = normalize_query("cats cats dogs");
        assert_eq!(terms, vec!["cat".to_string(), "dog".to_string()]);
    }

    #[test]
    fn strict_and_requires_every_term_in_same_document() {
        let dir = tempdir().unwrap();
        let (n, mapping) = build(
            &dir.path(),
            &[
                ("doc0", &["apple", "banana"]),
                ("doc1", &["apple", "cherry"]),
                ("doc2", &["banana", "cherry"]),
            ],
        );
        let reader = open_on_demand(dir.path(), n, 16).unwrap();

        let r1 = search(&reader, &mapping, "apple banana", 10);
        assert_eq!(r1.len(), 1);
        assert_eq!(r1[0].url, "doc0");

        let r2 = search(&reader, &mapping, "apple cherry", 10);
        assert_eq!(r2.len(), 1);
        assert_eq!(r2[0].url, "doc1");

        let r3 = search(&reader, &mapping, "apple banana cherry", 10);
        assert!(r3.is_empty());
    }

    #[test]
    fn ranking_ties_break_by_ascending_doc_id() {
        let dir = tempdir().unwrap();
        let (n, mapping) = build(
            &dir.path(),
            &[
                ("doc0", &["cat", "cat", "dog"]),
                ("doc1", &["cat", "dog", "dog"]),
            ],
        );
        let reader = open_on_demand(dir.path(), n, 16).unwrap();

        let results = search(&reader, &mapping, "cat dog", 10);
        assert_eq!(results.len(), 2);
        assert_eq!(results[0].url, "doc0");
        assert_eq!(results[1].url, "doc1");
        assert!((results[0].score - results[1].score).abs() < 1e-9);
    }

    #[test]
    fn unknown_term_returns_empty() {
        let dir = tempdir().unwrap();
        let (n, mapping) = build(&dir.path(), &[("doc0", &["apple"])]);
        let reader = open_on_demand(dir.path(), n, 16).unwrap();

        let results = search(&reader, &mapping, "zzzzzz", 10);
        assert!(results.is_empty());
    }

    #[test]
    fn top_k_monotonicity() {
        let dir = tempdir().unwrap();
        let (n, mapping) = build(
            &dir.path(),
            &[
                ("doc0", &["cat", "cat", "cat"]),
                ("doc1", &["cat", "cat"]),
                ("doc2", &["cat"]),
            ],
        );
        let reader = open_on_demand(dir.path(), n, 16).unwrap();

        let results = search(&reader, &mapping, "cat", 10);
        for window in results.windows(2) {
            assert!(window[0].score >= window[1].score);
        }
    }
}
