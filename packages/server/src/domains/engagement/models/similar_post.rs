use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A vector-store hit: the stored post metadata plus its similarity to the query.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct SimilarPost {
    pub id: Uuid,
    pub post_type: String,
    pub likes: i32,
    pub comments: i32,
    pub shares: i32,
    pub total_engagement: i32,
    /// Cosine similarity in [-1, 1], 1 being identical.
    pub score: f64,
}
