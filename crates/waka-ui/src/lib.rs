//! Terminal UI layer for the WakaTime dashboard.
//!
//! Provides themes and the language palette, header, stat card and share
//! bar components, the dashboard and daily table views, a plain-text report,
//! and the interactive event loop built on top of [`ratatui`].

pub mod app;
pub mod components;
pub mod dashboard_view;
pub mod report;
pub mod table_view;
pub mod themes;

pub use waka_core as core;
