//! Disk-resident posting access without loading the whole index. Fronts
//! the on-demand tier with an `lru::LruCache` bounding how many decoded
//! posting lists stay resident at once.

use crate::error::{IndexError, Result};
use crate::index::segment::{self, TermDict};
use crate::index::types::PostingList;
use lru::LruCache;
use std::num::NonZeroUsize;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing::warn;

/// Returns a term's posting list (empty mapping if absent) and exposes
/// document frequency for scoring.
pub trait PostingReader: Send + Sync {
    fn postings(&self, term: &str) -> PostingList;
    fn document_frequency(&self, term: &str) -> usize;
    fn total_documents(&self) -> usize;
}

/// On-demand tier: the term dictionary is loaded once at startup (it's
/// small — O(vocabulary), not O(postings)); individual posting lists are
/// seeked and decoded lazily, with an LRU cache in front bounded by
/// `cache_capacity` entries.
pub struct OnDemandPostingReader {
    postings_path: PathBuf,
    dict: TermDict,
    total_documents: usize,
    cache: Mutex<LruCache<String, PostingList>>,
}

impl OnDemandPostingReader {
    pub fn open(dict_path: &Path, postings_path: &Path, total_documents: usize, cache_capacity: usize) -> Result<Self> {
        let dict = segment::load_dict(dict_path)?;
        let capacity = NonZeroUsize::new(cache_capacity.max(1)).unwrap();
        Ok(Self {
            postings_path: postings_path.to_path_buf(),
            dict,
            total_documents,
            cache: Mutex::new(LruCache::new(capacity)),
        })
    }
}

impl PostingReader for OnDemandPostingReader {
    fn postings(&self, term: &str) -> PostingList {
        {
            let mut cache = self.cache.lock().unwrap();
            if let Some(cached) = cache.get(term) {
                return cached.clone();
            }
        }

        let Some(info) = self.dict.get(term) else {
            return PostingList::default();
        };

        match segment::read_posting_list(&self.postings_path, info) {
            Ok(list) => {
                let mut cache = self.cache.lock().unwrap();
                cache.put(term.to_string(), list.clone());
                list
            }
            Err(err) => {
                // Logged and treated as term-not-found for this query,
                // never fatal at query time.
                let wrapped = IndexError::QueryTermRead {
                    term: term.to_string(),
                    reason: err.to_string(),
                };
                warn!(term, error = %wrapped, "failed to read postings for term");
                PostingList::default()
            }
        }
    }

    fn document_frequency(&self, term: &str) -> usize {
        self.dict.get(term).map(|info| info.df as usize).unwrap_or(0)
    }

    fn total_documents(&self) -> usize {
        self.total_documents
    }
}

/// Resident tier: the whole index is decoded into memory at startup and
/// served from a plain map thereafter — acceptable when the index fits in
/// RAM.
pub struct ResidentPostingReader {
    index: ahash::AHashMap<String, PostingList>,
    total_documents: usize,
}

impl ResidentPostingReader {
    pub fn open(dict_path: &Path, postings_path: &Path, total_documents: usize) -> Result<Self> {
        let dict = segment::load_dict(dict_path)?;
        let index = segment::decode_full(&dict, postings_path)?;
        Ok(Self {
            index,
            total_documents,
        })
    }
}

impl PostingReader for ResidentPostingReader {
    fn postings(&self, term: &str) -> PostingList {
        self.index.get(term).cloned().unwrap_or_default()
    }

    fn document_frequency(&self, term: &str) -> usize {
        self.index.get(term).map(|list| list.len()).unwrap_or(0)
    }

    fn total_documents(&self) -> usize {
        self.total_documents
    }
}

/// Open a reader rooted at `index_dir`, failing fast if the on-disk
/// artifacts are missing — a missing index is a fatal initialization
/// error, not something to paper over at query time.
pub fn open_on_demand(index_dir: &Path, total_documents: usize, cache_capacity: usize) -> Result<OnDemandPostingReader> {
    let dict_path = index_dir.join("index.dict");
    let postings_path = index_dir.join("index.postings");
    if !dict_path.exists() || !postings_path.exists() {
        return Err(IndexError::MissingIndex {
            path: index_dir.to_path_buf(),
            reason: "index.dict/index.postings not found".to_string(),
        });
    }
    OnDemandPostingReader::open(&dict_path, &postings_path, total_documents, cache_capacity)
}
