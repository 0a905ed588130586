//! Server dependencies (using traits for testability)
//!
//! This module provides the central dependency container shared by the ingestion path
//! and the HTTP handlers. All external services use trait abstractions to enable testing.

use std::sync::Arc;

use sqlx::PgPool;

use crate::common::utils::EmbeddingService;
use crate::config::Config;
use crate::kernel::stores::{PgVectorIndex, PostgresEngagementStore};
use crate::kernel::{BaseEngagementStore, BaseVectorIndex};

/// Server dependencies accessible to services and routes
#[derive(Clone)]
pub struct ServerDeps {
    pub store: Arc<dyn BaseEngagementStore>,
    /// Similarity search backend. `None` when no embedding provider is configured;
    /// decided once at startup.
    pub vector_index: Option<Arc<dyn BaseVectorIndex>>,
}

impl ServerDeps {
    pub fn new(
        store: Arc<dyn BaseEngagementStore>,
        vector_index: Option<Arc<dyn BaseVectorIndex>>,
    ) -> Self {
        Self {
            store,
            vector_index,
        }
    }

    /// Wire the Postgres-backed store, plus the vector index when an API key is set.
    pub fn from_pool(pool: PgPool, config: &Config) -> Self {
        let store: Arc<dyn BaseEngagementStore> =
            Arc::new(PostgresEngagementStore::new(pool.clone()));

        let vector_index = config.openai_api_key.clone().map(|key| {
            let embeddings = Arc::new(EmbeddingService::with_model(
                key,
                config.embedding_model.clone(),
            ));
            Arc::new(PgVectorIndex::new(pool, embeddings)) as Arc<dyn BaseVectorIndex>
        });

        Self::new(store, vector_index)
    }

    pub fn similarity_enabled(&self) -> bool {
        self.vector_index.is_some()
    }
}
