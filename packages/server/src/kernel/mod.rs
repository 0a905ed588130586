//! Kernel module - server infrastructure and dependencies.

pub mod deps;
pub mod stores;
pub mod test_dependencies;
pub mod traits;

pub use deps::ServerDeps;
pub use stores::{PgVectorIndex, PostgresEngagementStore};
pub use test_dependencies::TestDependencies;
pub use traits::*;
