pub mod analyze;
pub mod ingest;
pub mod post_types;
pub mod schema;
pub mod similarity;

pub use analyze::average_metrics;
pub use ingest::{ingest, ingest_all, ingest_in_batches, BATCH_SIZE};
pub use post_types::list_post_types;
pub use schema::ensure_storage;
pub use similarity::{find_similar, DEFAULT_TOP_K};
