//! Walks a corpus directory and yields parsed input records to the document
//! processor. Uses the `ignore` crate's `WalkBuilder` for directory
//! traversal, with gitignore filtering disabled since a corpus directory of
//! JSON records is not a source tree.

use crate::document::Record;
use crate::error::IndexError;
use ignore::WalkBuilder;
use std::path::Path;
use tracing::warn;

/// One corpus file's outcome: either a parsed record, or a skip reason.
pub enum ScanOutcome {
    Record(Record),
    Invalid { path: std::path::PathBuf, reason: String },
}

/// Walk `corpus_dir` and parse every regular file as a `Record`. Parse
/// failures are reported as `ScanOutcome::Invalid` rather than aborting the
/// scan — an invalid input record is never fatal to the whole build.
pub fn scan(corpus_dir: &Path) -> Vec<ScanOutcome> {
    let mut outcomes = Vec::new();

    let walker = WalkBuilder::new(corpus_dir)
        .git_ignore(false)
        .git_global(false)
        .git_exclude(false)
        .hidden(false)
        .build();

    for entry in walker {
        let entry = match entry {
            Ok(entry) => entry,
            Err(err) => {
                warn!(error = %err, "failed to walk corpus directory entry");
                continue;
            }
        };

        if !entry.file_type().is_some_and(|ft| ft.is_file()) {
            continue;
        }

        let path = entry.path();
        match std::fs::read_to_string(path) {
            Ok(text) => match serde_json::from_str::<Record>(&text) {
                Ok(record) => outcomes.push(ScanOutcome::Record(record)),
                Err(err) => outcomes.push(invalid(path, err.to_string())),
            },
            Err(err) => outcomes.push(invalid(path, err.to_string())),
        }
    }

    outcomes
}

fn invalid(path: &Path, reason: String) -> ScanOutcome {
    let typed = IndexError::InputRecordInvalid {
        path: path.to_path_buf(),
        reason,
    };
    ScanOutcome::Invalid {
        path: path.to_path_buf(),
        reason: typed.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn scans_valid_and_invalid_records() {
        let dir = tempdir().unwrap();
        fs::write(
            dir.path().join("a.json"),
            r#"{"url": "http://a", "content": "<p>hi</p>"}"#,
        )
        .unwrap();
        fs::write(dir.path().join("b.json"), "not json").unwrap();

        let outcomes = scan(dir.path());
        assert_eq!(outcomes.len(), 2);

        let valid_count = outcomes
            .iter()
            .filter(|o| matches!(o, ScanOutcome::Record(_)))
            .count();
        let invalid_count = outcomes
            .iter()
            .filter(|o| matches!(o, ScanOutcome::Invalid { .. }))
            .count();
        assert_eq!(valid_count, 1);
        assert_eq!(invalid_count, 1);
    }

    #[test]
    fn empty_directory_yields_no_records() {
        let dir = tempdir().unwrap();
        assert!(scan(dir.path()).is_empty());
    }
}
