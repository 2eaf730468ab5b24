//! # Season Stats
//!
//! Series, streak and magic number engine for a round-robin season.
//!
//! ## Architecture
//!
//! - **models**: Core data structures (games, series, streaks, standings, magic numbers)
//! - **ingest**: Game record validation into a per-team game log
//! - **calculate**: Series grouping, streaks, head-to-head, standings and magic numbers
//! - **storage**: Filesystem data lake operations (JSONL inputs, derived outputs)
//! - **api**: REST API endpoints
//! - **config**: Configuration loading and validation

pub mod api;
pub mod calculate;
pub mod config;
pub mod ingest;
pub mod models;
pub mod storage;

pub use models::*;

use chrono::NaiveDate;

/// Parse a calendar date as used on the command line and in query strings
/// ("2025-04-01"). Surrounding whitespace is ignored.
pub fn parse_date(s: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d").ok()
}
