//! In-memory partial index accumulation with a mandatory spill policy:
//! once enough documents have accumulated, the in-memory state is
//! flushed to a numbered segment pair on disk and cleared, bounding peak
//! memory use regardless of corpus size.

use crate::error::{IndexError, Result};
use crate::index::doc_mapping::DocMapping;
use crate::index::segment;
use crate::index::types::{upsert_posting, Accumulator, DocId, Posting};
use ahash::AHashMap;
use std::path::{Path, PathBuf};
use tracing::warn;

/// A spilled segment's file pair, plus a doc-mapping snapshot covering the
/// doc-ids seen up to that spill.
pub struct SpilledSegment {
    pub dict_path: PathBuf,
    pub postings_path: PathBuf,
    pub mapping_path: PathBuf,
}

/// Everything the merge step needs once ingestion is finished.
pub struct BuilderOutput {
    pub segments: Vec<SpilledSegment>,
    pub total_docs: usize,
}

pub struct Builder {
    index_dir: PathBuf,
    spill_threshold_docs: usize,
    accumulator: Accumulator,
    doc_mapping: DocMapping,
    docs_since_spill: usize,
    total_docs: usize,
    next_segment_ordinal: u32,
    segments: Vec<SpilledSegment>,
}

impl Builder {
    pub fn new(index_dir: impl Into<PathBuf>, spill_threshold_docs: usize) -> Self {
        assert!(spill_threshold_docs > 0, "spill_threshold_docs must be positive");
        Self {
            index_dir: index_dir.into(),
            spill_threshold_docs,
            accumulator: Accumulator::default(),
            doc_mapping: DocMapping::new(),
            docs_since_spill: 0,
            total_docs: 0,
            next_segment_ordinal: 0,
            segments: Vec::new(),
        }
    }

    /// Assign/retrieve a doc-id for `url`, fold its two token streams into
    /// the in-memory accumulator, and spill if the threshold is reached.
    pub fn add_document(&mut self, url: &str, body_tokens: &[String], important_tokens: &[String]) -> Result<DocId> {
        let doc_id = self.doc_mapping.get_or_assign(url);

        let mut body_counts: AHashMap<&str, u32> = AHashMap::default();
        for token in body_tokens {
            *body_counts.entry(token.as_str()).or_insert(0) += 1;
        }
        let mut important_counts: AHashMap<&str, u32> = AHashMap::default();
        for token in important_tokens {
            *important_counts.entry(token.as_str()).or_insert(0) += 1;
        }

        let mut all_terms: Vec<&str> = body_counts.keys().copied().collect();
        for term in important_counts.keys() {
            if !body_counts.contains_key(term) {
                all_terms.push(term);
            }
        }

        for term in all_terms {
            let body_count = *body_counts.get(term).unwrap_or(&0);
            let important_count = *important_counts.get(term).unwrap_or(&0);
            let posting = Posting {
                tf: body_count + important_count,
                is_important: important_count > 0,
            };
            // A (term, doc-id) pair seen twice within this accumulator
            // overwrites rather than sums — a duplicate URL within one
            // spill window replaces its prior posting.
            upsert_posting(&mut self.accumulator, term.to_string(), doc_id, posting);
        }

        self.docs_since_spill += 1;
        self.total_docs += 1;

        if self.docs_since_spill >= self.spill_threshold_docs {
            self.spill()?;
        }

        Ok(doc_id)
    }

    fn segment_paths(&self, ordinal: u32) -> (PathBuf, PathBuf, PathBuf) {
        let stem = format!("segment_{ordinal:05}");
        (
            self.index_dir.join(format!("{stem}.dict")),
            self.index_dir.join(format!("{stem}.postings")),
            self.index_dir.join(format!("{stem}.mapping.json")),
        )
    }

    /// Serialize the current accumulator to a new numbered segment, snapshot
    /// the doc-mapping so far, and clear the in-memory state. No-op if the
    /// accumulator is empty. Any failure is reported as `IndexError::Spill`,
    /// tagged with the segment ordinal that failed to write.
    pub fn spill(&mut self) -> Result<()> {
        if self.accumulator.is_empty() {
            return Ok(());
        }

        let ordinal = self.next_segment_ordinal;
        self.write_segment(ordinal).map_err(|source| IndexError::Spill {
            segment: ordinal,
            source: Box::new(source),
        })
    }

    fn write_segment(&mut self, ordinal: u32) -> Result<()> {
        std::fs::create_dir_all(&self.index_dir)?;
        let (dict_path, postings_path, mapping_path) = self.segment_paths(ordinal);

        segment::write_accumulator(&self.accumulator, &dict_path, &postings_path)?;
        self.doc_mapping.write(&mapping_path)?;

        self.segments.push(SpilledSegment {
            dict_path,
            postings_path,
            mapping_path,
        });

        self.accumulator.clear();
        self.docs_since_spill = 0;
        self.next_segment_ordinal += 1;

        Ok(())
    }

    /// Spill any remaining documents and return everything the merge step
    /// needs. Warns (does not fail) if the realized segment count fell
    /// below what the spill threshold should have guaranteed.
    pub fn finalize(mut self) -> Result<BuilderOutput> {
        if !self.accumulator.is_empty() {
            self.spill()?;
        }

        if self.total_docs > self.spill_threshold_docs {
            let target = div_ceil(self.total_docs, self.spill_threshold_docs);
            if self.segments.len() < target {
                warn!(
                    realized = self.segments.len(),
                    target, "segment count below spill-count guarantee target"
                );
            }
        }

        Ok(BuilderOutput {
            segments: self.segments,
            total_docs: self.total_docs,
        })
    }

    pub fn index_dir(&self) -> &Path {
        &self.index_dir
    }
}

fn div_ceil(a: usize, b: usize) -> usize {
    (a + b - 1) / b
}
