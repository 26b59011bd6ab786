//! Cross-cutting utilities for the courtside CLI
//!
//! - `cache`: in-memory LRU cache of per-game derived metric rows

pub mod cache;

pub use cache::{MetricsCache, GLOBAL_CACHE};
