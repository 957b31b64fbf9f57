//! The inverted index: build-time accumulation and merge, query-time
//! disk-resident access, plus the shared data model and doc-mapping
//! artifact they all read and write.

pub mod builder;
pub mod doc_mapping;
pub mod merger;
pub mod reader;
pub mod segment;
pub mod types;

pub use builder::{Builder, BuilderOutput, SpilledSegment};
pub use doc_mapping::DocMapping;
pub use merger::{merge, MergeOutput};
pub use reader::{open_on_demand, OnDemandPostingReader, PostingReader, ResidentPostingReader};
pub use types::{DocId, Posting, PostingList};
