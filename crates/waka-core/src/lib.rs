//! Shared foundation for the WakaTime dashboard.
//!
//! Holds the daily-record data model and derived view types, the error type,
//! presentation-boundary number formatting, and CLI settings with persisted
//! last-used parameters.

pub mod error;
pub mod formatting;
pub mod models;
pub mod settings;

pub use error::{Result, WakaError};
