//! Document mapping: the bijection between canonical URL and doc-id,
//! persisted as a single JSON artifact, collapsed from per-segment
//! snapshots into one final file written by the merge step.

use crate::document::canonicalize_url;
use crate::error::{IndexError, Result};
use crate::index::types::DocId;
use ahash::AHashMap;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DocMapping {
    url_to_id: AHashMap<String, DocId>,
    id_to_url: AHashMap<DocId, String>,
    next_id: DocId,
}

impl DocMapping {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the existing doc-id for `url`, or assign the next one in
    /// monotonic first-seen order. `url` is canonicalized first, so a
    /// fragment-only variant of an already-seen URL maps to the same id.
    pub fn get_or_assign(&mut self, url: &str) -> DocId {
        let url = canonicalize_url(url);
        if let Some(&id) = self.url_to_id.get(&url) {
            return id;
        }
        let id = self.next_id;
        self.next_id += 1;
        self.url_to_id.insert(url.clone(), id);
        self.id_to_url.insert(id, url);
        id
    }

    pub fn url_for(&self, doc_id: DocId) -> Option<&str> {
        self.id_to_url.get(&doc_id).map(|s| s.as_str())
    }

    pub fn len(&self) -> usize {
        self.url_to_id.len()
    }

    pub fn is_empty(&self) -> bool {
        self.url_to_id.is_empty()
    }

    /// Merge another mapping's entries into this one. A duplicate URL must
    /// map to the same doc-id in both — guaranteed by the builder's
    /// monotonic assignment across the whole build.
    pub fn merge(&mut self, other: &DocMapping) {
        for (url, &id) in &other.url_to_id {
            self.url_to_id.entry(url.clone()).or_insert(id);
            self.id_to_url.entry(id).or_insert_with(|| url.clone());
        }
        if other.next_id > self.next_id {
            self.next_id = other.next_id;
        }
    }

    pub fn write(&self, path: &Path) -> Result<()> {
        let file = std::fs::File::create(path)?;
        serde_json::to_writer(std::io::BufWriter::new(file), self)?;
        Ok(())
    }

    pub fn read(path: &Path) -> Result<Self> {
        let file = std::fs::File::open(path).map_err(|e| IndexError::MissingIndex {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
        let mapping = serde_json::from_reader(std::io::BufReader::new(file))?;
        Ok(mapping)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn fragment_collapses_to_one_doc_id() {
        let mut mapping = DocMapping::new();
        let a = mapping.get_or_assign("http://a/x");
        let b = mapping.get_or_assign("http://a/x#section2");
        assert_eq!(a, b);
        assert_eq!(mapping.len(), 1);
    }

    #[test]
    fn ids_are_monotonic_first_seen() {
        let mut mapping = DocMapping::new();
        assert_eq!(mapping.get_or_assign("u1"), 0);
        assert_eq!(mapping.get_or_assign("u2"), 1);
        assert_eq!(mapping.get_or_assign("u1"), 0);
    }

    #[test]
    fn round_trips_through_disk() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("doc_mapping.json");

        let mut mapping = DocMapping::new();
        mapping.get_or_assign("http://a");
        mapping.get_or_assign("http://b");
        mapping.write(&path).unwrap();

        let loaded = DocMapping::read(&path).unwrap();
        assert_eq!(loaded.len(), 2);
        assert_eq!(loaded.url_for(0), Some("http://a"));
    }

    #[test]
    fn merge_is_a_union() {
        let mut a = DocMapping::new();
        a.get_or_assign("http://x");
        let mut b = DocMapping::new();
        b.get_or_assign("http://y");

        a.merge(&b);
        assert_eq!(a.len(), 2);
    }
}
