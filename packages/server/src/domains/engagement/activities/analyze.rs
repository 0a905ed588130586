use tracing::error;

use crate::common::{EngagementError, EngagementResult};
use crate::domains::engagement::models::AggregateResult;
use crate::kernel::BaseEngagementStore;

/// Average engagement for every row whose post type matches exactly.
///
/// No matching rows is not an error: all averages come back as zero.
pub async fn average_metrics(
    store: &dyn BaseEngagementStore,
    post_type: &str,
) -> EngagementResult<AggregateResult> {
    if post_type.is_empty() {
        return Err(EngagementError::invalid_input(
            "Please provide a 'post_type' parameter.",
        ));
    }

    let rows = store
        .metrics_for_post_type(post_type)
        .await
        .map_err(|e| {
            error!(post_type, error = %e, "Error during analysis");
            EngagementError::Backend(e)
        })?;

    Ok(AggregateResult::from_metrics(post_type, &rows))
}
