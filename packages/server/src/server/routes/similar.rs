use axum::{
    extract::{Extension, Query},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::common::EngagementError;
use crate::domains::engagement::activities::{find_similar, DEFAULT_TOP_K};
use crate::domains::engagement::models::SimilarPost;
use crate::server::app::AppState;

#[derive(Debug, Deserialize)]
pub struct SimilarQuery {
    post_type: Option<String>,
    /// Kept as a string so a bad value gets the JSON error body, not axum's rejection text
    k: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct SimilarResponse {
    post_type: String,
    results: Vec<SimilarPost>,
}

/// GET /similar?post_type=X&k=N
///
/// Semantic neighbours of a post type description. 503 when vector search is off.
pub async fn similar_handler(
    Extension(state): Extension<AppState>,
    Query(query): Query<SimilarQuery>,
) -> Result<Json<SimilarResponse>, EngagementError> {
    let top_k = match query.k.as_deref().map(str::trim) {
        None | Some("") => DEFAULT_TOP_K,
        Some(raw) => raw
            .parse::<usize>()
            .map_err(|_| EngagementError::invalid_input("'k' must be a positive integer."))?,
    };
    let post_type = query.post_type.unwrap_or_default();

    let results = find_similar(&state.deps, &post_type, top_k).await?;
    Ok(Json(SimilarResponse { post_type, results }))
}
