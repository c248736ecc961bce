//! Chunked retrieval for id-list endpoints.
//!
//! The provider caps how many ids one request may carry, so id lists are cut
//! into fixed-size chunks and each chunk becomes one call. Results are merged
//! in chunk order.
//!
//! **Partial-loss semantics**: a failing chunk is logged and contributes no
//! items; the remaining chunks still run and nothing is retried. Callers
//! cannot tell a dropped chunk from ids that simply had no data.

use std::future::Future;

use futures::stream::{self, StreamExt};

/// Ids per provider call.
pub const DEFAULT_CHUNK_SIZE: usize = 10;

/// Items merged across chunk calls, in chunk order.
pub type BatchResult<T> = Vec<T>;

/// How an id list is split and how many chunk calls may be in flight.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BatchOptions {
    /// Maximum ids per call. `0` is treated as `1`.
    pub chunk_size: usize,
    /// Chunk calls allowed in flight at once. `1` means strictly sequential.
    /// Output order never depends on this value.
    pub max_concurrent_chunks: usize,
}

impl Default for BatchOptions {
    fn default() -> Self {
        Self {
            chunk_size: DEFAULT_CHUNK_SIZE,
            max_concurrent_chunks: 1,
        }
    }
}

/// Calls `call` once per chunk of `ids` and concatenates the successful
/// results in chunk order.
///
/// Returns an empty `Vec` without calling `call` when `ids` is empty.
pub async fn fetch_in_chunks<T, E, F, Fut>(
    ids: &[String],
    options: BatchOptions,
    call: F,
) -> BatchResult<T>
where
    F: Fn(Vec<String>) -> Fut,
    Fut: Future<Output = Result<Vec<T>, E>>,
    E: std::fmt::Display,
{
    if ids.is_empty() {
        return Vec::new();
    }

    let chunk_size = options.chunk_size.max(1);
    let max_concurrent = options.max_concurrent_chunks.max(1);
    let total_chunks = ids.len().div_ceil(chunk_size);

    // `buffered` yields in submission order regardless of completion order.
    let results: Vec<(usize, usize, Result<Vec<T>, E>)> =
        stream::iter(ids.chunks(chunk_size).enumerate())
            .map(|(index, chunk)| {
                let len = chunk.len();
                let fut = call(chunk.to_vec());
                async move { (index, len, fut.await) }
            })
            .buffered(max_concurrent)
            .collect()
            .await;

    let mut merged = Vec::new();
    let mut failed_chunks = 0usize;

    for (index, len, result) in results {
        match result {
            Ok(items) => merged.extend(items),
            Err(e) => {
                failed_chunks += 1;
                tracing::warn!(
                    chunk = index,
                    chunk_len = len,
                    error = %e,
                    "chunk request failed; dropping its items"
                );
            }
        }
    }

    if failed_chunks > 0 {
        tracing::warn!(
            failed_chunks,
            total_chunks,
            returned = merged.len(),
            "batch finished with partial results"
        );
    }

    merged
}
