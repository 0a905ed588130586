// Trait definitions for dependency injection
//
// These are INFRASTRUCTURE traits only - no business logic.
// Averaging, deduplication and batching live in domain functions that use these traits.
//
// Naming convention: Base* for trait names (e.g., BaseEngagementStore, BaseEmbeddingService)

use anyhow::Result;
use async_trait::async_trait;

use crate::domains::engagement::models::{EngagementMetrics, EngagementRecord, SimilarPost};

// =============================================================================
// Batch Sink Trait (Infrastructure)
// =============================================================================

/// Destination that accepts one batch of records as a single request.
#[async_trait]
pub trait BatchSink: Send + Sync {
    /// Name used in ingestion logs (e.g. the table or collection name)
    fn target(&self) -> &str;

    /// Persist the whole batch in one request. Records arrive with ids assigned.
    async fn submit_batch(&self, batch: &[EngagementRecord]) -> Result<()>;
}

// =============================================================================
// Engagement Store Trait (Infrastructure)
// =============================================================================

#[async_trait]
pub trait BaseEngagementStore: BatchSink {
    /// Create the engagement table if it does not exist yet
    async fn ensure_schema(&self) -> Result<()>;

    /// All rows whose post_type equals `post_type` exactly
    async fn metrics_for_post_type(&self, post_type: &str) -> Result<Vec<EngagementMetrics>>;

    /// post_type of every row (may contain duplicates)
    async fn post_types(&self) -> Result<Vec<String>>;

    /// Round trip to the backend, used by the health check
    async fn ping(&self) -> Result<()>;
}

// =============================================================================
// Vector Index Trait (Infrastructure)
// =============================================================================

#[async_trait]
pub trait BaseVectorIndex: BatchSink {
    /// Create the vector collection (and extension) if missing
    async fn ensure_collection(&self) -> Result<()>;

    /// Nearest neighbours of `query`, most similar first
    async fn similarity_search(&self, query: &str, top_k: usize) -> Result<Vec<SimilarPost>>;
}

// =============================================================================
// Embedding Service Trait (Infrastructure)
// =============================================================================

#[async_trait]
pub trait BaseEmbeddingService: Send + Sync {
    /// Generate embedding for text (returns 1536-dimensional vector)
    async fn generate(&self, text: &str) -> Result<Vec<f32>>;

    /// Generate embeddings for several texts, in input order
    async fn generate_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>> {
        let mut out = Vec::with_capacity(texts.len());
        for text in texts {
            out.push(self.generate(text).await?);
        }
        Ok(out)
    }
}
