use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A single row of post engagement metrics.
///
/// Created by the loader from the CSV source. `id` is left empty by the loader
/// and filled in by the ingestor right before the record is persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngagementRecord {
    pub id: Option<Uuid>,
    pub post_type: String,
    pub likes: i32,
    pub comments: i32,
    pub shares: i32,
    pub total_engagement: i32,
}

impl EngagementRecord {
    pub fn new(
        post_type: impl Into<String>,
        likes: i32,
        comments: i32,
        shares: i32,
        total_engagement: i32,
    ) -> Self {
        Self {
            id: None,
            post_type: post_type.into(),
            likes,
            comments,
            shares,
            total_engagement,
        }
    }

    /// Assign a fresh v4 id unless one is already set.
    pub fn ensure_id(&mut self) -> Uuid {
        *self.id.get_or_insert_with(Uuid::new_v4)
    }

    pub fn metrics(&self) -> EngagementMetrics {
        EngagementMetrics {
            likes: self.likes,
            comments: self.comments,
            shares: self.shares,
            total_engagement: self.total_engagement,
        }
    }
}

/// The numeric columns read back for aggregation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, sqlx::FromRow)]
pub struct EngagementMetrics {
    pub likes: i32,
    pub comments: i32,
    pub shares: i32,
    pub total_engagement: i32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ensure_id_assigns_once() {
        let mut record = EngagementRecord::new("carousel", 1, 2, 3, 6);
        assert!(record.id.is_none());

        let first = record.ensure_id();
        let second = record.ensure_id();

        assert_eq!(first, second);
        assert_eq!(record.id, Some(first));
    }

    #[test]
    fn ensure_id_keeps_existing_id() {
        let existing = Uuid::new_v4();
        let mut record = EngagementRecord::new("reel", 1, 1, 1, 3);
        record.id = Some(existing);

        assert_eq!(record.ensure_id(), existing);
    }
}
