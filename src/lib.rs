//! # corpusdex
//!
//! A single-node text search engine: an external-memory inverted index
//! builder with bounded memory and guaranteed periodic spills, and a
//! disk-backed boolean-AND retrieval engine with TF-IDF-with-importance-boost
//! ranking.
//!
//! ## Pipeline
//!
//! Build: corpus scan (`corpus`) -> per-document processing (`document`,
//! `html`, `tokenizer`, `stemmer`) -> in-memory accumulation with spills
//! (`index::builder`) -> segment merge (`index::merger`).
//!
//! Query: open a posting reader (`index::reader`) -> normalize, intersect,
//! score and rank (`query`).
//!
//! ```no_run
//! use corpusdex::config::{self, CliOverrides};
//! use std::path::Path;
//!
//! let config = config::resolve(CliOverrides::default());
//! corpusdex::build::run(Path::new("corpus/"), &config).unwrap();
//! corpusdex::search::run(Some("rust search engine"), &config).unwrap();
//! ```

pub mod build;
pub mod cli;
pub mod config;
pub mod corpus;
pub mod document;
pub mod error;
pub mod html;
pub mod index;
pub mod query;
pub mod search;
pub mod stats;
pub mod stemmer;
pub mod tokenizer;
pub mod version;

pub use error::{IndexError, Result};
