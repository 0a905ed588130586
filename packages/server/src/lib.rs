// Social Media Performance Analysis - API Core
//
// Loads post engagement metrics from CSV into Postgres and serves per-post-type
// averages, the distinct post types, and (with an embedding provider) similarity
// search over post types.

pub mod common;
pub mod config;
pub mod domains;
pub mod kernel;
pub mod server;

pub use config::*;
