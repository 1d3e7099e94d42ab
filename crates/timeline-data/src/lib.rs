//! Data layer for the music timeline.
//!
//! Loads playlist exports, aggregates them into per-period category counts
//! and summary statistics, and keeps the memoized view state.

pub mod aggregator;
pub mod reader;
pub mod session;

pub use timeline_core as core;
