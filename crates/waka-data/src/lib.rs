//! Data layer for the WakaTime dashboard.
//!
//! Loads and validates WakaTime exports, and hosts the stateless analytics
//! engine: month indexing and filtering, daily/language aggregation, monthly
//! statistics and top-day ranking.

pub mod aggregator;
pub mod analysis;
pub mod reader;

pub use waka_core as core;
