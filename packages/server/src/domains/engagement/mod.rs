//! Engagement domain: loading the dataset, batched ingestion, and the read-side services.

pub mod activities;
pub mod loader;
pub mod models;

pub use loader::{load_records, read_records, LoadError};
pub use models::*;
