//! K-way union of partial segments into the final index, plus the final
//! doc-mapping artifact.
//!
//! Loads segments sequentially into one in-memory accumulator and
//! coalesces duplicate postings as it goes — simple, and fine for a
//! moderate number of segments; a true k-way disk merge would be the
//! next step for very large builds.

use crate::error::{IndexError, Result};
use crate::index::builder::SpilledSegment;
use crate::index::doc_mapping::DocMapping;
use crate::index::segment;
use crate::index::types::{merge_posting_into, Accumulator};
use std::path::{Path, PathBuf};
use tracing::info;

pub struct MergeOutput {
    pub index_dict_path: PathBuf,
    pub index_postings_path: PathBuf,
    pub doc_mapping_path: PathBuf,
    pub num_documents: usize,
    pub num_unique_tokens: usize,
}

/// Merge `segments` into one final index + doc-mapping under `index_dir`,
/// via write-temp-then-rename so a re-build replaces prior artifacts
/// atomically. On success, deletes every segment file. On failure, leaves
/// segments in place so a retry is possible.
pub fn merge(index_dir: &Path, segments: &[SpilledSegment]) -> Result<MergeOutput> {
    std::fs::create_dir_all(index_dir)?;

    let mut merged = Accumulator::default();
    let mut doc_mapping = DocMapping::new();

    for segment_ref in segments {
        let dict = segment::load_dict(&segment_ref.dict_path)?;
        let partial = segment::decode_full(&dict, &segment_ref.postings_path)?;
        for (term, postings) in partial {
            for (doc_id, posting) in postings {
                merge_posting_into(&mut merged, &term, doc_id, posting);
            }
        }

        let segment_mapping = DocMapping::read(&segment_ref.mapping_path)?;
        doc_mapping.merge(&segment_mapping);
    }

    let final_dict_path = index_dir.join("index.dict");
    let final_postings_path = index_dir.join("index.postings");
    let final_mapping_path = index_dir.join("doc_mapping.json");

    let tmp_dict = index_dir.join("index.dict.tmp");
    let tmp_postings = index_dir.join("index.postings.tmp");
    let tmp_mapping = index_dir.join("doc_mapping.json.tmp");

    segment::write_accumulator(&merged, &tmp_dict, &tmp_postings)
        .map_err(|_| IndexError::Merge {
            source: std::io::Error::new(std::io::ErrorKind::Other, "failed to write final index"),
        })?;
    doc_mapping.write(&tmp_mapping)?;

    std::fs::rename(&tmp_dict, &final_dict_path)?;
    std::fs::rename(&tmp_postings, &final_postings_path)?;
    std::fs::rename(&tmp_mapping, &final_mapping_path)?;

    let num_unique_tokens = merged.len();
    let num_documents = doc_mapping.len();

    for segment_ref in segments {
        let _ = std::fs::remove_file(&segment_ref.dict_path);
        let _ = std::fs::remove_file(&segment_ref.postings_path);
        let _ = std::fs::remove_file(&segment_ref.mapping_path);
    }

    info!(
        num_documents,
        num_unique_tokens,
        segments = segments.len(),
        "merge complete"
    );

    Ok(MergeOutput {
        index_dict_path: final_dict_path,
        index_postings_path: final_postings_path,
        doc_mapping_path: final_mapping_path,
        num_documents,
        num_unique_tokens,
    })
}
