//! CLI surface: `clap`-derived `build` and `search` subcommands.

use clap::{Parser as ClapParser, Subcommand};
use std::path::PathBuf;

#[derive(ClapParser, Debug)]
#[command(author, version, about = "External-memory inverted index builder and boolean-AND search engine", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Build an index from a directory of JSON corpus records.
    Build {
        /// Directory to scan for input records.
        corpus_dir: PathBuf,

        /// Documents accumulated in memory before a mandatory spill.
        #[arg(long = "spill-threshold")]
        spill_threshold: Option<usize>,

        /// Directory to write the final index artifacts into.
        #[arg(long = "out")]
        out: Option<PathBuf>,
    },

    /// Run a query against a previously built index.
    Search {
        /// The query string. If omitted, starts an interactive REPL.
        query: Option<String>,

        /// Directory containing a previously built index.
        #[arg(long = "index-dir")]
        index_dir: Option<PathBuf>,

        /// Maximum number of ranked results to return.
        #[arg(long = "top-k")]
        top_k: Option<usize>,
    },
}
