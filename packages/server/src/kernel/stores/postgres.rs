//! PostgreSQL engagement store.
//!
//! Holds the `engagement` table. Rows are keyed by a synthetic UUID because reads are
//! filter scans by post type, and a natural key would collapse duplicate rows.

use anyhow::{Context, Result};
use async_trait::async_trait;
use sqlx::{PgPool, Postgres, QueryBuilder};
use tracing::{debug, instrument, warn};
use uuid::Uuid;

use crate::domains::engagement::models::{EngagementMetrics, EngagementRecord};
use crate::kernel::{BaseEngagementStore, BatchSink};

pub const ENGAGEMENT_TABLE: &str = "engagement";

pub struct PostgresEngagementStore {
    pool: PgPool,
}

impl PostgresEngagementStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl BatchSink for PostgresEngagementStore {
    fn target(&self) -> &str {
        ENGAGEMENT_TABLE
    }

    #[instrument(skip(self, batch), fields(size = batch.len()))]
    async fn submit_batch(&self, batch: &[EngagementRecord]) -> Result<()> {
        if batch.is_empty() {
            return Ok(());
        }

        // One multi-row INSERT, so the batch is applied as a unit.
        let mut builder: QueryBuilder<Postgres> = QueryBuilder::new(
            "INSERT INTO engagement (id, post_type, likes, comments, shares, total_engagement) ",
        );
        builder.push_values(batch, |mut row, record| {
            row.push_bind(record.id.unwrap_or_else(Uuid::new_v4))
                .push_bind(record.post_type.as_str())
                .push_bind(record.likes)
                .push_bind(record.comments)
                .push_bind(record.shares)
                .push_bind(record.total_engagement);
        });

        builder
            .build()
            .execute(&self.pool)
            .await
            .context("Failed to insert engagement batch")?;

        debug!("Inserted {} engagement rows", batch.len());
        Ok(())
    }
}

#[async_trait]
impl BaseEngagementStore for PostgresEngagementStore {
    async fn ensure_schema(&self) -> Result<()> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS engagement (
                id UUID PRIMARY KEY,
                post_type TEXT NOT NULL,
                likes INT NOT NULL,
                comments INT NOT NULL,
                shares INT NOT NULL,
                total_engagement INT NOT NULL
            )
            "#,
        )
        .execute(&self.pool)
        .await
        .with_context(|| format!("Failed to create table '{}'", ENGAGEMENT_TABLE))?;

        if let Err(e) = sqlx::query(
            "CREATE INDEX IF NOT EXISTS idx_engagement_post_type ON engagement(post_type)",
        )
        .execute(&self.pool)
        .await
        {
            warn!(error = %e, "Failed to create post_type index");
        }

        Ok(())
    }

    #[instrument(skip(self))]
    async fn metrics_for_post_type(&self, post_type: &str) -> Result<Vec<EngagementMetrics>> {
        let rows = sqlx::query_as::<_, EngagementMetrics>(
            "SELECT likes, comments, shares, total_engagement FROM engagement WHERE post_type = $1",
        )
        .bind(post_type)
        .fetch_all(&self.pool)
        .await
        .context("Failed to query engagement metrics")?;

        debug!("Found {} rows", rows.len());
        Ok(rows)
    }

    #[instrument(skip(self))]
    async fn post_types(&self) -> Result<Vec<String>> {
        sqlx::query_scalar::<_, String>("SELECT DISTINCT post_type FROM engagement")
            .fetch_all(&self.pool)
            .await
            .context("Failed to query post types")
    }

    async fn ping(&self) -> Result<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}
