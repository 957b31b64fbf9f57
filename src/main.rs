use anyhow::Result;
use clap::Parser as ClapParser;
use corpusdex::cli::{Cli, Command};
use corpusdex::config::{self, CliOverrides};
use corpusdex::{build, search};
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    let cli = Cli::parse();

    match &cli.command {
        Command::Build {
            corpus_dir,
            spill_threshold,
            out,
        } => {
            let resolved = config::resolve(CliOverrides {
                spill_threshold_docs: *spill_threshold,
                index_dir: out.clone(),
                top_k: None,
            });
            init_logging(&resolved.log_level);
            build::run(corpus_dir, &resolved)
        }
        Command::Search {
            query,
            index_dir,
            top_k,
        } => {
            let resolved = config::resolve(CliOverrides {
                spill_threshold_docs: None,
                index_dir: index_dir.clone(),
                top_k: *top_k,
            });
            init_logging(&resolved.log_level);
            search::run(query.as_deref(), &resolved)
        }
    }
}

fn init_logging(log_level: &str) {
    let filter = EnvFilter::try_new(log_level).unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}
