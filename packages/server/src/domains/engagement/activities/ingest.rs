//! Batched ingestion of engagement records.
//!
//! Records are grouped into batches of [`BATCH_SIZE`] and each batch goes to the sink as
//! one request. A failed batch is logged with its starting offset and skipped; later
//! batches are still submitted. Nothing about failures is returned to the caller.

use tracing::{error, info};

use crate::domains::engagement::models::EngagementRecord;
use crate::kernel::{BatchSink, ServerDeps};

pub const BATCH_SIZE: usize = 100;

/// Ingest `records` into `sink` in batches of [`BATCH_SIZE`].
pub async fn ingest<S>(sink: &S, records: impl IntoIterator<Item = EngagementRecord>)
where
    S: BatchSink + ?Sized,
{
    ingest_in_batches(sink, records, BATCH_SIZE).await
}

/// Same as [`ingest`] with an explicit batch size (clamped to at least 1).
pub async fn ingest_in_batches<S>(
    sink: &S,
    records: impl IntoIterator<Item = EngagementRecord>,
    batch_size: usize,
) where
    S: BatchSink + ?Sized,
{
    let batch_size = batch_size.max(1);
    let mut batch: Vec<EngagementRecord> = Vec::with_capacity(batch_size);
    let mut batch_start = 0;
    let mut seen = 0;
    let mut submitted = 0;
    let mut failed = 0;

    for mut record in records {
        record.ensure_id();
        batch.push(record);
        seen += 1;

        if batch.len() == batch_size {
            if flush(sink, &batch, batch_start).await {
                submitted += batch.len();
                info!("Inserted {} records into '{}' so far", submitted, sink.target());
            } else {
                failed += batch.len();
            }
            batch.clear();
            batch_start = seen;
        }
    }

    if !batch.is_empty() {
        if flush(sink, &batch, batch_start).await {
            submitted += batch.len();
        } else {
            failed += batch.len();
        }
    }

    info!(
        target_name = sink.target(),
        submitted, failed, "Ingestion finished"
    );
}

/// Submit one batch; returns whether it was accepted.
async fn flush<S>(sink: &S, batch: &[EngagementRecord], offset: usize) -> bool
where
    S: BatchSink + ?Sized,
{
    match sink.submit_batch(batch).await {
        Ok(()) => true,
        Err(e) => {
            error!(
                target_name = sink.target(),
                offset,
                size = batch.len(),
                error = %e,
                "Failed to submit batch"
            );
            false
        }
    }
}

/// Load `records` into the engagement table, and into the vector collection when
/// similarity search is enabled.
pub async fn ingest_all(deps: &ServerDeps, records: Vec<EngagementRecord>) {
    // Ids are fixed up front so both stores describe a record with the same id.
    let records: Vec<EngagementRecord> = records
        .into_iter()
        .map(|mut r| {
            r.ensure_id();
            r
        })
        .collect();

    match &deps.vector_index {
        Some(index) => {
            ingest(deps.store.as_ref(), records.clone()).await;
            ingest(index.as_ref(), records).await;
        }
        None => ingest(deps.store.as_ref(), records).await,
    }
}
