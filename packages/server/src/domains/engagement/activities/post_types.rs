use std::collections::BTreeSet;

use tracing::error;

use crate::common::{EngagementError, EngagementResult};
use crate::kernel::BaseEngagementStore;

/// Distinct post types across the whole table. Scans everything; no pagination.
pub async fn list_post_types(store: &dyn BaseEngagementStore) -> EngagementResult<BTreeSet<String>> {
    let post_types = store.post_types().await.map_err(|e| {
        error!(error = %e, "Error fetching post types");
        EngagementError::Backend(e)
    })?;

    Ok(post_types.into_iter().collect())
}
