//! Orchestrates the full build pipeline: corpus scan -> document processing
//! -> builder -> merger -> statistics sink. Progress counts and the final
//! summary are plain `println!`; diagnostics go through `tracing`.

use crate::config::ResolvedConfig;
use crate::corpus::{self, ScanOutcome};
use crate::document;
use crate::index::{merger, Builder};
use crate::stats::Statistics;
use anyhow::{Context, Result};
use std::path::Path;
use tracing::{info, warn};

pub fn run(corpus_dir: &Path, config: &ResolvedConfig) -> Result<()> {
    let outcomes = corpus::scan(corpus_dir);
    info!(corpus_dir = %corpus_dir.display(), files = outcomes.len(), "scanned corpus");

    let mut builder = Builder::new(&config.index_dir, config.spill_threshold_docs);
    let mut invalid_records = 0usize;
    let mut skipped_documents = 0usize;
    let mut processed = 0usize;

    for outcome in outcomes {
        let record = match outcome {
            ScanOutcome::Record(record) => record,
            ScanOutcome::Invalid { path, reason } => {
                warn!(path = %path.display(), reason, "skipping invalid input record");
                invalid_records += 1;
                continue;
            }
        };

        match document::process_record(&record) {
            Some(processed_doc) => {
                builder.add_document(
                    &processed_doc.canonical_url,
                    &processed_doc.body_tokens,
                    &processed_doc.important_tokens,
                )?;
                processed += 1;
                if processed % 1000 == 0 {
                    println!("processed {processed} documents...");
                }
            }
            None => {
                warn!(url = %record.url, "skipping document with empty url or content");
                skipped_documents += 1;
            }
        }
    }

    let builder_output = builder.finalize().context("failed to finalize index builder")?;
    let merge_output = merger::merge(&config.index_dir, &builder_output.segments)
        .context("failed to merge partial segments")?;

    let index_size_bytes = crate::index::segment::artifact_size_bytes(
        &merge_output.index_dict_path,
        &merge_output.index_postings_path,
    )
    .unwrap_or(0)
        + std::fs::metadata(&merge_output.doc_mapping_path)
            .map(|m| m.len())
            .unwrap_or(0);

    let stats = Statistics {
        num_documents: merge_output.num_documents,
        num_unique_tokens: merge_output.num_unique_tokens,
        index_size_bytes,
        partial_segment_count: builder_output.segments.len(),
    };
    stats
        .write(&config.index_dir.join("stats.json"))
        .context("failed to write stats.json")?;

    println!("Build complete.");
    println!("  documents indexed:     {}", stats.num_documents);
    println!("  unique tokens:         {}", stats.num_unique_tokens);
    println!("  partial segments used: {}", stats.partial_segment_count);
    println!("  index size (bytes):    {}", stats.index_size_bytes);
    if invalid_records > 0 {
        println!("  invalid input records skipped: {invalid_records}");
    }
    if skipped_documents > 0 {
        println!("  documents skipped (empty url/content): {skipped_documents}");
    }

    Ok(())
}
