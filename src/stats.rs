//! A small structured record describing a completed build, persisted as a
//! JSON sidecar (`stats.json`) next to the index artifacts.

use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Statistics {
    pub num_documents: usize,
    pub num_unique_tokens: usize,
    pub index_size_bytes: u64,
    pub partial_segment_count: usize,
}

impl Statistics {
    pub fn write(&self, path: &Path) -> Result<()> {
        let file = std::fs::File::create(path)?;
        serde_json::to_writer_pretty(std::io::BufWriter::new(file), self)?;
        Ok(())
    }

    pub fn read(path: &Path) -> Result<Self> {
        let file = std::fs::File::open(path)?;
        let stats = serde_json::from_reader(std::io::BufReader::new(file))?;
        Ok(stats)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn round_trips_through_disk() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("stats.json");
        let stats = Statistics {
            num_documents: 42,
            num_unique_tokens: 1000,
            index_size_bytes: 123_456,
            partial_segment_count: 3,
        };
        stats.write(&path).unwrap();
        let loaded = Statistics::read(&path).unwrap();
        assert_eq!(loaded, stats);
    }
}
