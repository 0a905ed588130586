use axum::{extract::Extension, Json};
use serde::Serialize;

use crate::common::EngagementError;
use crate::domains::engagement::activities::list_post_types;
use crate::server::app::AppState;

#[derive(Debug, Serialize)]
pub struct PostTypesResponse {
    post_types: Vec<String>,
}

/// GET /post_types
pub async fn post_types_handler(
    Extension(state): Extension<AppState>,
) -> Result<Json<PostTypesResponse>, EngagementError> {
    let post_types = list_post_types(state.deps.store.as_ref()).await?;
    Ok(Json(PostTypesResponse {
        post_types: post_types.into_iter().collect(),
    }))
}
