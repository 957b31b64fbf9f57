//! Orchestrates the query pipeline: open the posting reader and doc-mapping,
//! run one query through the planner/ranker, and print results. Supports
//! both a single query and an interactive REPL that terminates on
//! `quit`/`exit`/`q`/EOF.

use crate::config::ResolvedConfig;
use crate::index::{self, DocMapping};
use crate::query;
use anyhow::{Context, Result};
use std::io::{self, BufRead, Write};
use std::time::Instant;

const REPL_EXIT_COMMANDS: [&str; 3] = ["quit", "exit", "q"];

pub fn run(query_str: Option<&str>, config: &ResolvedConfig) -> Result<()> {
    let reader = index::open_on_demand(
        &config.index_dir,
        doc_count(config)?,
        config.posting_cache_max_entries,
    )
    .context("failed to open index for search")?;
    let doc_mapping = DocMapping::read(&config.index_dir.join("doc_mapping.json"))
        .context("failed to read doc mapping")?;

    match query_str {
        Some(text) => run_one(&reader, &doc_mapping, text, config.top_k),
        None => run_repl(&reader, &doc_mapping, config.top_k),
    }
}

fn doc_count(config: &ResolvedConfig) -> Result<usize> {
    let stats_path = config.index_dir.join("stats.json");
    let stats = crate::stats::Statistics::read(&stats_path)
        .context("failed to read stats.json (run `build` first)")?;
    Ok(stats.num_documents)
}

fn run_one(reader: &dyn index::PostingReader, doc_mapping: &DocMapping, text: &str, top_k: usize) -> Result<()> {
    let started = Instant::now();
    let results = query::search(reader, doc_mapping, text, top_k);
    print_results(&results, started.elapsed());
    Ok(())
}

fn run_repl(reader: &dyn index::PostingReader, doc_mapping: &DocMapping, top_k: usize) -> Result<()> {
    let stdin = io::stdin();
    let mut stdout = io::stdout();

    loop {
        print!("query> ");
        stdout.flush()?;

        let mut line = String::new();
        let bytes_read = stdin.lock().read_line(&mut line)?;
        if bytes_read == 0 {
            break; // EOF
        }

        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }
        if REPL_EXIT_COMMANDS.contains(&trimmed) {
            break;
        }

        let started = Instant::now();
        let results = query::search(reader, doc_mapping, trimmed, top_k);
        print_results(&results, started.elapsed());
    }

    Ok(())
}

fn print_results(results: &[query::RankedResult], elapsed: std::time::Duration) {
    println!(
        "{} result(s) in {:.2}ms",
        results.len(),
        elapsed.as_secs_f64() * 1000.0
    );
    for (rank, result) in results.iter().enumerate() {
        println!("  {}. [{:.4}] {}", rank + 1, result.score, result.url);
    }
}
