//! Shared data-model types: doc-ids, postings, posting lists, and the
//! in-memory accumulator shape used by both the builder and the merge step.

use ahash::AHashMap;
use serde::{Deserialize, Serialize};

/// A document identifier: monotonic, never reused, assigned in first-seen
/// order during ingestion.
pub type DocId = u32;

/// The per-(term, doc) record: total occurrence count across both text
/// streams, and whether any occurrence was in the important stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Posting {
    pub tf: u32,
    pub is_important: bool,
}

impl Posting {
    /// Coalesce two postings for the same `(term, doc-id)` found in
    /// different segments: sum tf, OR the important flags.
    pub fn combine(self, other: Posting) -> Posting {
        Posting {
            tf: self.tf + other.tf,
            is_important: self.is_important || other.is_important,
        }
    }
}

/// A posting list for one term: doc-id -> posting. Each doc-id appears at
/// most once.
pub type PostingList = AHashMap<DocId, Posting>;

/// The accumulator shape shared by the builder's in-memory segment and the
/// merge step's working set: term -> posting list.
pub type Accumulator = AHashMap<String, PostingList>;

/// Insert-or-coalesce a posting into an accumulator, using upsert
/// semantics: a (term, doc-id) key that already exists in *this*
/// accumulator is overwritten, not summed. This is the builder's rule
/// while ingesting a single spill window; merging across segments instead
/// sums via [`merge_posting_into`].
pub fn upsert_posting(acc: &mut Accumulator, term: String, doc_id: DocId, posting: Posting) {
    acc.entry(term).or_default().insert(doc_id, posting);
}

/// Coalesce a posting into an accumulator using the sum/OR rule, used when
/// combining postings that came from distinct segments.
pub fn merge_posting_into(acc: &mut Accumulator, term: &str, doc_id: DocId, posting: Posting) {
    let list = acc.entry(term.to_string()).or_default();
    list.entry(doc_id)
        .and_modify(|existing| *existing = existing.combine(posting))
        .or_insert(posting);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn combine_sums_tf_and_ors_importance() {
        let a = Posting {
            tf: 2,
            is_important: false,
        };
        let b = Posting {
            tf: 3,
            is_important: true,
        };
        let combined = a.combine(b);
        assert_eq!(combined.tf, 5);
        assert!(combined.is_important);
    }

    #[test]
    fn upsert_overwrites_within_one_accumulator() {
        let mut acc = Accumulator::default();
        upsert_posting(
            &mut acc,
            "cat".to_string(),
            0,
            Posting {
                tf: 1,
                is_important: false,
            },
        );
        upsert_posting(
            &mut acc,
            "cat".to_string(),
            0,
            Posting {
                tf: 9,
                is_important: true,
            },
        );
        let posting = acc["cat"][&0];
        assert_eq!(posting.tf, 9);
        assert!(posting.is_important);
    }

    #[test]
    fn merge_sums_across_segments() {
        let mut acc = Accumulator::default();
        merge_posting_into(
            &mut acc,
            "cat",
            0,
            Posting {
                tf: 1,
                is_important: false,
            },
        );
        merge_posting_into(
            &mut acc,
            "cat",
            0,
            Posting {
                tf: 4,
                is_important: true,
            },
        );
        let posting = acc["cat"][&0];
        assert_eq!(posting.tf, 5);
        assert!(posting.is_important);
    }
}
