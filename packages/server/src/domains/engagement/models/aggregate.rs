use serde::{Deserialize, Serialize};

use super::EngagementMetrics;

/// Per-post-type average engagement, recomputed on every request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AggregateResult {
    pub post_type: String,
    pub avg_likes: f64,
    pub avg_comments: f64,
    pub avg_shares: f64,
    pub avg_total_engagement: f64,
}

impl AggregateResult {
    /// Arithmetic mean of each metric over `rows`.
    ///
    /// An empty slice yields zero for every average, so an unknown post type
    /// and one whose posts got no engagement look the same.
    pub fn from_metrics(post_type: impl Into<String>, rows: &[EngagementMetrics]) -> Self {
        let post_type = post_type.into();
        if rows.is_empty() {
            return Self::zero(post_type);
        }

        let mut likes: i64 = 0;
        let mut comments: i64 = 0;
        let mut shares: i64 = 0;
        let mut total: i64 = 0;
        for row in rows {
            likes += i64::from(row.likes);
            comments += i64::from(row.comments);
            shares += i64::from(row.shares);
            total += i64::from(row.total_engagement);
        }

        let count = rows.len() as f64;
        Self {
            post_type,
            avg_likes: likes as f64 / count,
            avg_comments: comments as f64 / count,
            avg_shares: shares as f64 / count,
            avg_total_engagement: total as f64 / count,
        }
    }

    pub fn zero(post_type: impl Into<String>) -> Self {
        Self {
            post_type: post_type.into(),
            avg_likes: 0.0,
            avg_comments: 0.0,
            avg_shares: 0.0,
            avg_total_engagement: 0.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn metrics(likes: i32, comments: i32, shares: i32, total: i32) -> EngagementMetrics {
        EngagementMetrics {
            likes,
            comments,
            shares,
            total_engagement: total,
        }
    }

    #[test]
    fn empty_rows_average_to_zero() {
        let result = AggregateResult::from_metrics("carousel", &[]);
        assert_eq!(result, AggregateResult::zero("carousel"));
    }

    #[test]
    fn averages_are_real_valued() {
        let rows = [metrics(10, 1, 0, 11), metrics(20, 2, 1, 23)];
        let result = AggregateResult::from_metrics("video", &rows);

        assert_eq!(result.post_type, "video");
        assert_eq!(result.avg_likes, 15.0);
        assert_eq!(result.avg_comments, 1.5);
        assert_eq!(result.avg_shares, 0.5);
        assert_eq!(result.avg_total_engagement, 17.0);
    }

    #[test]
    fn sums_do_not_overflow_i32() {
        let rows = [metrics(i32::MAX, 0, 0, 0), metrics(i32::MAX, 0, 0, 0)];
        let result = AggregateResult::from_metrics("static", &rows);
        assert_eq!(result.avg_likes, f64::from(i32::MAX));
    }
}
