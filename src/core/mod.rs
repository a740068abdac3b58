//! Core plumbing - fetch dispatch and refresh scheduling

mod fetcher;
mod refresh;

pub use fetcher::{FetchData, FetchEvent, FetchTarget, Fetcher};
pub use refresh::RefreshScheduler;
