//! The before/after ridership pipeline.
//!
//! Filters raw records down to one line, collapses them into daily
//! per-station totals, and computes comparative statistics across the
//! before/after windows. Every function here is pure: configuration in,
//! derived data out, no state between calls.

pub mod analyzer;
pub mod completeness;
pub mod daily;
pub mod filter;
pub mod line_stats;
pub mod station_stats;
pub mod utility;
