//! Layered process configuration: defaults, an optional `corpusdex.toml`,
//! `CORPUSDEX_*` environment variables, then CLI flags, each level merging
//! over the one before it until every field has a concrete value.

use serde::{Deserialize, Serialize};
use std::env;
use std::path::{Path, PathBuf};

/// Raw, partially-specified configuration as read from `corpusdex.toml`.
/// Every field is optional so a file only needs to mention what it overrides.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FileConfig {
    pub spill_threshold_docs: Option<usize>,
    pub posting_cache_max_entries: Option<usize>,
    pub top_k: Option<usize>,
    pub index_dir: Option<PathBuf>,
    pub log_level: Option<String>,
    pub query_timeout_budget_ms: Option<u64>,
}

impl FileConfig {
    fn load_from(path: &Path) -> Option<FileConfig> {
        let text = std::fs::read_to_string(path).ok()?;
        match toml::from_str(&text) {
            Ok(config) => Some(config),
            Err(err) => {
                tracing::warn!(path = %path.display(), error = %err, "ignoring malformed config file");
                None
            }
        }
    }

    fn merge(mut self, other: FileConfig) -> FileConfig {
        if other.spill_threshold_docs.is_some() {
            self.spill_threshold_docs = other.spill_threshold_docs;
        }
        if other.posting_cache_max_entries.is_some() {
            self.posting_cache_max_entries = other.posting_cache_max_entries;
        }
        if other.top_k.is_some() {
            self.top_k = other.top_k;
        }
        if other.index_dir.is_some() {
            self.index_dir = other.index_dir;
        }
        if other.log_level.is_some() {
            self.log_level = other.log_level;
        }
        if other.query_timeout_budget_ms.is_some() {
            self.query_timeout_budget_ms = other.query_timeout_budget_ms;
        }
        self
    }

    fn apply_env(mut self) -> FileConfig {
        if let Ok(val) = env::var("CORPUSDEX_SPILL_THRESHOLD_DOCS") {
            if let Ok(parsed) = val.parse() {
                self.spill_threshold_docs = Some(parsed);
            }
        }
        if let Ok(val) = env::var("CORPUSDEX_POSTING_CACHE_MAX_ENTRIES") {
            if let Ok(parsed) = val.parse() {
                self.posting_cache_max_entries = Some(parsed);
            }
        }
        if let Ok(val) = env::var("CORPUSDEX_TOP_K") {
            if let Ok(parsed) = val.parse() {
                self.top_k = Some(parsed);
            }
        }
        if let Ok(val) = env::var("CORPUSDEX_INDEX_DIR") {
            self.index_dir = Some(PathBuf::from(val));
        }
        if let Ok(val) = env::var("CORPUSDEX_LOG_LEVEL") {
            self.log_level = Some(val);
        }
        if let Ok(val) = env::var("CORPUSDEX_QUERY_TIMEOUT_BUDGET_MS") {
            if let Ok(parsed) = val.parse() {
                self.query_timeout_budget_ms = Some(parsed);
            }
        }
        self
    }
}

/// CLI-supplied overrides, highest precedence.
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    pub spill_threshold_docs: Option<usize>,
    pub index_dir: Option<PathBuf>,
    pub top_k: Option<usize>,
}

/// Fully resolved configuration, no `Option`s left — every field has a
/// concrete value after defaults are applied.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedConfig {
    pub spill_threshold_docs: usize,
    pub posting_cache_max_entries: usize,
    pub top_k: usize,
    pub index_dir: PathBuf,
    pub log_level: String,
    pub query_timeout_budget_ms: u64,
}

impl Default for ResolvedConfig {
    fn default() -> Self {
        Self {
            spill_threshold_docs: 50_000,
            posting_cache_max_entries: 4096,
            top_k: 10,
            index_dir: PathBuf::from("./corpusdex-index"),
            log_level: "info".to_string(),
            query_timeout_budget_ms: 300,
        }
    }
}

/// Resolve configuration from, lowest to highest precedence: built-in
/// defaults, `./corpusdex.toml` if present, `CORPUSDEX_*` env vars, then
/// `overrides` from parsed CLI flags.
pub fn resolve(overrides: CliOverrides) -> ResolvedConfig {
    let mut file_config = FileConfig::default();
    if let Some(from_file) = FileConfig::load_from(Path::new("corpusdex.toml")) {
        file_config = file_config.merge(from_file);
    }
    file_config = file_config.apply_env();

    let defaults = ResolvedConfig::default();
    ResolvedConfig {
        spill_threshold_docs: overrides
            .spill_threshold_docs
            .or(file_config.spill_threshold_docs)
            .unwrap_or(defaults.spill_threshold_docs),
        posting_cache_max_entries: file_config
            .posting_cache_max_entries
            .unwrap_or(defaults.posting_cache_max_entries),
        top_k: overrides
            .top_k
            .or(file_config.top_k)
            .unwrap_or(defaults.top_k),
        index_dir: overrides
            .index_dir
            .or(file_config.index_dir)
            .unwrap_or(defaults.index_dir),
        log_level: file_config.log_level.unwrap_or(defaults.log_level),
        query_timeout_budget_ms: file_config
            .query_timeout_budget_ms
            .unwrap_or(defaults.query_timeout_budget_ms),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_apply_with_no_overrides() {
        let resolved = resolve(CliOverrides::default());
        assert_eq!(resolved.top_k, 10);
        assert_eq!(resolved.query_timeout_budget_ms, 300);
    }

    #[test]
    fn cli_overrides_win_over_defaults() {
        let resolved = resolve(CliOverrides {
            spill_threshold_docs: Some(123),
            index_dir: Some(PathBuf::from("/tmp/custom-index")),
            top_k: Some(5),
        });
        assert_eq!(resolved.spill_threshold_docs, 123);
        assert_eq!(resolved.index_dir, PathBuf::from("/tmp/custom-index"));
        assert_eq!(resolved.top_k, 5);
    }

    #[test]
    fn file_config_merge_lets_later_values_win() {
        let base = FileConfig {
            spill_threshold_docs: Some(1),
            top_k: Some(2),
            ..Default::default()
        };
        let overlay = FileConfig {
            top_k: Some(9),
            ..Default::default()
        };
        let merged = base.merge(overlay);
        assert_eq!(merged.spill_threshold_docs, Some(1));
        assert_eq!(merged.top_k, Some(9));
    }
}
