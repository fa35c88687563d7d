//! Song catalog service.
//!
//! Stores songs of music groups in SQLite, enriches new songs from an
//! external metadata API and serves them over HTTP with filtering,
//! pagination and per-couplet lyric lookup.

pub mod api;
pub mod db;
pub mod enrichment;
pub mod lyrics;
