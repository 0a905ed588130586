use anyhow::{Context, Result};
use tracing::{info, warn};

use crate::kernel::ServerDeps;

/// Make sure the engagement table (and vector collection, when enabled) exist.
///
/// Safe to call repeatedly. A table error is returned and is fatal on startup. A
/// collection error only disables similarity search for the rest of the run.
pub async fn ensure_storage(deps: &mut ServerDeps) -> Result<()> {
    deps.store
        .ensure_schema()
        .await
        .with_context(|| format!("Error creating table '{}'", deps.store.target()))?;
    info!("Table '{}' is ready", deps.store.target());

    let collection_ready = match &deps.vector_index {
        Some(index) => match index.ensure_collection().await {
            Ok(()) => {
                info!("Vector collection '{}' is ready", index.target());
                true
            }
            Err(e) => {
                warn!(
                    collection = index.target(),
                    error = ?e,
                    "Vector store not configured properly, similarity search disabled"
                );
                false
            }
        },
        None => true,
    };
    if !collection_ready {
        deps.vector_index = None;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kernel::test_dependencies::{
        MemoryEngagementStore, MockVectorIndex, TestDependencies,
    };

    #[tokio::test]
    async fn second_call_is_a_no_op() {
        let deps = TestDependencies::new();
        let mut server_deps = deps.server_deps();

        ensure_storage(&mut server_deps).await.unwrap();
        ensure_storage(&mut server_deps).await.unwrap();

        assert_eq!(deps.store.schema_calls(), 2);
    }

    #[tokio::test]
    async fn failure_names_the_table() {
        let deps = TestDependencies::new().with_store(MemoryEngagementStore::failing());

        let err = ensure_storage(&mut deps.server_deps()).await.unwrap_err();
        assert!(err.to_string().contains("engagement"));
    }

    #[tokio::test]
    async fn collection_failure_disables_similarity() {
        let deps = TestDependencies::new().with_vector_index(MockVectorIndex::failing());
        let mut server_deps = deps.server_deps();
        assert!(server_deps.similarity_enabled());

        ensure_storage(&mut server_deps).await.unwrap();

        assert!(!server_deps.similarity_enabled());
        assert_eq!(deps.store.schema_calls(), 1);
    }

    #[tokio::test]
    async fn ready_collection_keeps_similarity() {
        let deps = TestDependencies::new().with_vector_index(MockVectorIndex::new());
        let mut server_deps = deps.server_deps();

        ensure_storage(&mut server_deps).await.unwrap();

        assert!(server_deps.similarity_enabled());
    }
}
