use axum::{
    extract::{Extension, Query},
    Json,
};
use serde::Deserialize;

use crate::common::EngagementError;
use crate::domains::engagement::activities::average_metrics;
use crate::domains::engagement::models::AggregateResult;
use crate::server::app::AppState;

#[derive(Debug, Deserialize)]
pub struct AnalyzeQuery {
    post_type: Option<String>,
}

/// GET /analyze?post_type=X
///
/// Average likes, comments, shares and total engagement for one post type.
pub async fn analyze_handler(
    Extension(state): Extension<AppState>,
    Query(query): Query<AnalyzeQuery>,
) -> Result<Json<AggregateResult>, EngagementError> {
    let post_type = query.post_type.unwrap_or_default();
    let result = average_metrics(state.deps.store.as_ref(), &post_type).await?;
    Ok(Json(result))
}
