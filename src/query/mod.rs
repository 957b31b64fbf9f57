//! Turning a raw query string into ranked `(url, score)` results.

pub mod planner;
pub mod ranking;

pub use planner::{normalize_query, search, RankedResult};
