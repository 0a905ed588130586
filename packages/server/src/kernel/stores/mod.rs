//! Storage backends for the engagement dataset.

pub mod postgres;
pub mod vector;

pub use postgres::{PostgresEngagementStore, ENGAGEMENT_TABLE};
pub use vector::{PgVectorIndex, VECTOR_COLLECTION};
