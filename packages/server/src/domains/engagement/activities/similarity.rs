use tracing::error;

use crate::common::{EngagementError, EngagementResult};
use crate::domains::engagement::models::SimilarPost;
use crate::kernel::ServerDeps;

pub const DEFAULT_TOP_K: usize = 5;

/// Top `top_k` stored posts most similar to `query`, most similar first.
///
/// Fails with `NotConfigured` when no vector backend was set up at startup.
pub async fn find_similar(
    deps: &ServerDeps,
    query: &str,
    top_k: usize,
) -> EngagementResult<Vec<SimilarPost>> {
    let index = deps
        .vector_index
        .as_ref()
        .ok_or(EngagementError::NotConfigured("Vector search"))?;

    if query.is_empty() {
        return Err(EngagementError::invalid_input(
            "Please provide a 'post_type' parameter.",
        ));
    }
    if top_k == 0 {
        return Err(EngagementError::invalid_input("'k' must be greater than 0."));
    }

    let mut results = index.similarity_search(query, top_k).await.map_err(|e| {
        error!(query, error = %e, "Error performing similarity search");
        EngagementError::Backend(e)
    })?;

    results.sort_by(|a, b| b.score.total_cmp(&a.score));
    results.truncate(top_k);
    Ok(results)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kernel::test_dependencies::{MockVectorIndex, TestDependencies};
    use uuid::Uuid;

    fn hit(post_type: &str, score: f64) -> SimilarPost {
        SimilarPost {
            id: Uuid::new_v4(),
            post_type: post_type.to_string(),
            likes: 1,
            comments: 1,
            shares: 1,
            total_engagement: 3,
            score,
        }
    }

    #[tokio::test]
    async fn not_configured_without_vector_index() {
        let deps = TestDependencies::new().server_deps();
        let err = find_similar(&deps, "carousel", 3).await.unwrap_err();
        assert!(matches!(err, EngagementError::NotConfigured(_)));
    }

    #[tokio::test]
    async fn results_are_ordered_by_descending_score() {
        let deps = TestDependencies::new().with_vector_index(MockVectorIndex::with_results(vec![
            hit("video", 0.4),
            hit("carousel", 0.9),
            hit("reel", 0.7),
        ]));

        let results = find_similar(&deps.server_deps(), "carousel", 3).await.unwrap();
        let scores: Vec<f64> = results.iter().map(|r| r.score).collect();

        assert_eq!(scores, vec![0.9, 0.7, 0.4]);
    }

    #[tokio::test]
    async fn top_k_is_passed_through() {
        let deps = TestDependencies::new().with_vector_index(MockVectorIndex::new());
        find_similar(&deps.server_deps(), "carousel", 2).await.unwrap();

        let queries = deps.vector_index.as_ref().unwrap().queries();
        assert_eq!(queries, vec![("carousel".to_string(), 2)]);
    }

    #[tokio::test]
    async fn zero_k_is_invalid_input() {
        let deps = TestDependencies::new().with_vector_index(MockVectorIndex::new());
        let err = find_similar(&deps.server_deps(), "carousel", 0).await.unwrap_err();
        assert!(matches!(err, EngagementError::InvalidInput(_)));
    }

    #[tokio::test]
    async fn search_failure_is_backend_error() {
        let deps = TestDependencies::new().with_vector_index(MockVectorIndex::failing());
        let err = find_similar(&deps.server_deps(), "carousel", 2).await.unwrap_err();
        assert!(matches!(err, EngagementError::Backend(_)));
    }
}
