//! fraudwatch - Terminal dashboard for a P2P anti-fraud backend
//!
//! A keyboard-driven dashboard client that renders transaction tables,
//! risk charts and a transfer form over the monitoring service's REST API.

pub mod api;
pub mod app;
pub mod config;
pub mod core;
pub mod form;
pub mod format;
pub mod notifications;
pub mod ui;

// Re-exports
pub use api::{ApiClient, ApiError};
pub use app::{App, Loadable, View};
pub use config::Config;
pub use core::{FetchData, FetchEvent, FetchTarget, Fetcher, RefreshScheduler};

/// Result type alias
pub type Result<T> = anyhow::Result<T>;
