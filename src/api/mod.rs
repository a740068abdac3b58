//! REST API layer - typed client and response models

mod client;
mod models;

pub use client::{ApiClient, ApiError};
pub use models::*;
