// TestDependencies - mock implementations for testing
//
// Provides in-memory services that can be injected into ServerDeps for tests.

use anyhow::Result;
use async_trait::async_trait;
use std::collections::HashSet;
use std::sync::{Arc, Mutex};

use super::{BaseEmbeddingService, BaseEngagementStore, BaseVectorIndex, BatchSink, ServerDeps};
use crate::domains::engagement::models::{EngagementMetrics, EngagementRecord, SimilarPost};

// =============================================================================
// Recording Sink
// =============================================================================

/// Sink that remembers every submitted batch. Batches whose (0-based) submission
/// index is listed in `failing` are recorded but rejected.
#[derive(Default)]
pub struct RecordingSink {
    batches: Mutex<Vec<Vec<EngagementRecord>>>,
    failing: HashSet<usize>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reject the batch submitted at `index`
    pub fn failing_at(mut self, index: usize) -> Self {
        self.failing.insert(index);
        self
    }

    pub fn batches(&self) -> Vec<Vec<EngagementRecord>> {
        self.batches.lock().unwrap().clone()
    }

    pub fn batch_sizes(&self) -> Vec<usize> {
        self.batches.lock().unwrap().iter().map(Vec::len).collect()
    }
}

#[async_trait]
impl BatchSink for RecordingSink {
    fn target(&self) -> &str {
        "recording"
    }

    async fn submit_batch(&self, batch: &[EngagementRecord]) -> Result<()> {
        let mut batches = self.batches.lock().unwrap();
        let index = batches.len();
        batches.push(batch.to_vec());
        if self.failing.contains(&index) {
            anyhow::bail!("batch {} rejected", index);
        }
        Ok(())
    }
}

// =============================================================================
// Memory Engagement Store
// =============================================================================

/// In-memory engagement table. `failing()` makes every read and write return an error.
#[derive(Default)]
pub struct MemoryEngagementStore {
    rows: Mutex<Vec<EngagementRecord>>,
    schema_calls: Mutex<usize>,
    fail: bool,
}

impl MemoryEngagementStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_records(records: Vec<EngagementRecord>) -> Self {
        Self {
            rows: Mutex::new(records),
            ..Self::default()
        }
    }

    /// Store whose every operation fails, simulating an unreachable backend
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    pub fn rows(&self) -> Vec<EngagementRecord> {
        self.rows.lock().unwrap().clone()
    }

    pub fn schema_calls(&self) -> usize {
        *self.schema_calls.lock().unwrap()
    }

    fn check(&self) -> Result<()> {
        if self.fail {
            anyhow::bail!("connection refused");
        }
        Ok(())
    }
}

#[async_trait]
impl BatchSink for MemoryEngagementStore {
    fn target(&self) -> &str {
        "engagement"
    }

    async fn submit_batch(&self, batch: &[EngagementRecord]) -> Result<()> {
        self.check()?;
        self.rows.lock().unwrap().extend_from_slice(batch);
        Ok(())
    }
}

#[async_trait]
impl BaseEngagementStore for MemoryEngagementStore {
    async fn ensure_schema(&self) -> Result<()> {
        self.check()?;
        *self.schema_calls.lock().unwrap() += 1;
        Ok(())
    }

    async fn metrics_for_post_type(&self, post_type: &str) -> Result<Vec<EngagementMetrics>> {
        self.check()?;
        Ok(self
            .rows
            .lock()
            .unwrap()
            .iter()
            .filter(|r| r.post_type == post_type)
            .map(EngagementRecord::metrics)
            .collect())
    }

    async fn post_types(&self) -> Result<Vec<String>> {
        self.check()?;
        Ok(self
            .rows
            .lock()
            .unwrap()
            .iter()
            .map(|r| r.post_type.clone())
            .collect())
    }

    async fn ping(&self) -> Result<()> {
        self.check()
    }
}

// =============================================================================
// Mock Vector Index
// =============================================================================

/// Vector index returning canned results, truncated to `top_k`. `failing()` rejects
/// collection setup, writes and searches.
#[derive(Default)]
pub struct MockVectorIndex {
    results: Vec<SimilarPost>,
    queries: Mutex<Vec<(String, usize)>>,
    stored: Mutex<Vec<EngagementRecord>>,
    fail: bool,
}

impl MockVectorIndex {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_results(results: Vec<SimilarPost>) -> Self {
        Self {
            results,
            ..Self::default()
        }
    }

    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    /// Every (query, top_k) pair searched so far
    pub fn queries(&self) -> Vec<(String, usize)> {
        self.queries.lock().unwrap().clone()
    }

    pub fn stored(&self) -> Vec<EngagementRecord> {
        self.stored.lock().unwrap().clone()
    }
}

#[async_trait]
impl BatchSink for MockVectorIndex {
    fn target(&self) -> &str {
        "engagement_store"
    }

    async fn submit_batch(&self, batch: &[EngagementRecord]) -> Result<()> {
        if self.fail {
            anyhow::bail!("embedding provider unavailable");
        }
        self.stored.lock().unwrap().extend_from_slice(batch);
        Ok(())
    }
}

#[async_trait]
impl BaseVectorIndex for MockVectorIndex {
    async fn ensure_collection(&self) -> Result<()> {
        if self.fail {
            anyhow::bail!("extension \"vector\" is not available");
        }
        Ok(())
    }

    async fn similarity_search(&self, query: &str, top_k: usize) -> Result<Vec<SimilarPost>> {
        self.queries
            .lock()
            .unwrap()
            .push((query.to_string(), top_k));
        if self.fail {
            anyhow::bail!("embedding provider unavailable");
        }
        Ok(self.results.iter().take(top_k).cloned().collect())
    }
}

// =============================================================================
// Mock Embedding Service
// =============================================================================

/// Deterministic embeddings: a bag-of-bytes count vector of width `dimensions`.
pub struct MockEmbeddingService {
    dimensions: usize,
}

impl MockEmbeddingService {
    pub fn new(dimensions: usize) -> Self {
        Self {
            dimensions: dimensions.max(1),
        }
    }
}

#[async_trait]
impl BaseEmbeddingService for MockEmbeddingService {
    async fn generate(&self, text: &str) -> Result<Vec<f32>> {
        let mut embedding = vec![0.0; self.dimensions];
        for byte in text.bytes() {
            embedding[usize::from(byte) % self.dimensions] += 1.0;
        }
        // Cosine distance is undefined for the zero vector
        if text.is_empty() {
            embedding[0] = 1.0;
        }
        Ok(embedding)
    }
}

// =============================================================================
// TestDependencies
// =============================================================================

/// Builder for a ServerDeps backed entirely by in-memory services
pub struct TestDependencies {
    pub store: Arc<MemoryEngagementStore>,
    pub vector_index: Option<Arc<MockVectorIndex>>,
}

impl TestDependencies {
    pub fn new() -> Self {
        Self {
            store: Arc::new(MemoryEngagementStore::new()),
            vector_index: None,
        }
    }

    pub fn with_store(mut self, store: MemoryEngagementStore) -> Self {
        self.store = Arc::new(store);
        self
    }

    pub fn with_vector_index(mut self, index: MockVectorIndex) -> Self {
        self.vector_index = Some(Arc::new(index));
        self
    }

    pub fn server_deps(&self) -> ServerDeps {
        ServerDeps::new(
            self.store.clone(),
            self.vector_index
                .clone()
                .map(|index| index as Arc<dyn BaseVectorIndex>),
        )
    }
}

impl Default for TestDependencies {
    fn default() -> Self {
        Self::new()
    }
}
