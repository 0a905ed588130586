//! pgvector-backed similarity index over post-type descriptions.
//!
//! Texts are embedded through [`BaseEmbeddingService`] and ranked by pgvector's cosine
//! distance operator. Only constructed when an embedding provider is configured.

use std::sync::Arc;

use anyhow::{Context, Result};
use async_trait::async_trait;
use pgvector::Vector;
use sqlx::{PgPool, Postgres, QueryBuilder};
use tracing::{debug, instrument, warn};
use uuid::Uuid;

use crate::common::utils::EMBEDDING_DIMENSIONS;
use crate::domains::engagement::models::{EngagementRecord, SimilarPost};
use crate::kernel::{BaseEmbeddingService, BaseVectorIndex, BatchSink};

pub const VECTOR_COLLECTION: &str = "engagement_store";

pub struct PgVectorIndex {
    pool: PgPool,
    embeddings: Arc<dyn BaseEmbeddingService>,
}

impl PgVectorIndex {
    pub fn new(pool: PgPool, embeddings: Arc<dyn BaseEmbeddingService>) -> Self {
        Self { pool, embeddings }
    }
}

#[async_trait]
impl BatchSink for PgVectorIndex {
    fn target(&self) -> &str {
        VECTOR_COLLECTION
    }

    #[instrument(skip(self, batch), fields(size = batch.len()))]
    async fn submit_batch(&self, batch: &[EngagementRecord]) -> Result<()> {
        if batch.is_empty() {
            return Ok(());
        }

        let texts: Vec<String> = batch.iter().map(|r| r.post_type.clone()).collect();
        let embeddings = self
            .embeddings
            .generate_batch(&texts)
            .await
            .context("Failed to embed batch")?;

        if embeddings.len() != batch.len() {
            anyhow::bail!(
                "Embedding count mismatch: {} records, {} embeddings",
                batch.len(),
                embeddings.len()
            );
        }

        let mut builder: QueryBuilder<Postgres> = QueryBuilder::new(
            "INSERT INTO engagement_store (id, content, likes, comments, shares, total_engagement, embedding) ",
        );
        builder.push_values(batch.iter().zip(embeddings), |mut row, (record, embedding)| {
            row.push_bind(record.id.unwrap_or_else(Uuid::new_v4))
                .push_bind(record.post_type.as_str())
                .push_bind(record.likes)
                .push_bind(record.comments)
                .push_bind(record.shares)
                .push_bind(record.total_engagement)
                .push_bind(Vector::from(embedding));
        });
        builder.push(" ON CONFLICT (id) DO NOTHING");

        builder
            .build()
            .execute(&self.pool)
            .await
            .context("Failed to insert vector batch")?;

        debug!("Vectorized {} records", batch.len());
        Ok(())
    }
}

#[async_trait]
impl BaseVectorIndex for PgVectorIndex {
    async fn ensure_collection(&self) -> Result<()> {
        sqlx::query("CREATE EXTENSION IF NOT EXISTS vector")
            .execute(&self.pool)
            .await
            .context("Failed to enable pgvector extension")?;

        let create = format!(
            r#"
            CREATE TABLE IF NOT EXISTS engagement_store (
                id UUID PRIMARY KEY,
                content TEXT NOT NULL,
                likes INT NOT NULL,
                comments INT NOT NULL,
                shares INT NOT NULL,
                total_engagement INT NOT NULL,
                embedding vector({}) NOT NULL
            )
            "#,
            EMBEDDING_DIMENSIONS
        );
        sqlx::query(&create)
            .execute(&self.pool)
            .await
            .with_context(|| format!("Failed to create collection '{}'", VECTOR_COLLECTION))?;

        if let Err(e) = sqlx::query(
            r#"
            CREATE INDEX IF NOT EXISTS idx_engagement_store_hnsw
            ON engagement_store USING hnsw (embedding vector_cosine_ops)
            "#,
        )
        .execute(&self.pool)
        .await
        {
            warn!(error = %e, "Failed to create HNSW index, searches will scan");
        }

        Ok(())
    }

    #[instrument(skip(self))]
    async fn similarity_search(&self, query: &str, top_k: usize) -> Result<Vec<SimilarPost>> {
        let embedding = self
            .embeddings
            .generate(query)
            .await
            .context("Failed to embed query")?;

        let limit = i64::try_from(top_k).unwrap_or(i64::MAX);
        let results = sqlx::query_as::<_, SimilarPost>(
            "SELECT
                id,
                content AS post_type,
                likes,
                comments,
                shares,
                total_engagement,
                1 - (embedding <=> $1) AS score
             FROM engagement_store
             ORDER BY embedding <=> $1
             LIMIT $2",
        )
        .bind(Vector::from(embedding))
        .bind(limit)
        .fetch_all(&self.pool)
        .await
        .context("Failed to run similarity search")?;

        debug!("Found {} similar posts", results.len());
        Ok(results)
    }
}
