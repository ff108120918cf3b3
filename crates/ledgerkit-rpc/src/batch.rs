//! Batched remote lookup.
//!
//! Nodes cap the number of items in one JSON-RPC batch, so large lookups
//! are split into chunks sent one after another. Results are concatenated
//! in request order; the first failing chunk fails the whole lookup.

use crate::client::Transport;
use crate::error::RpcError;
use serde_json::Value;

/// One call inside a JSON-RPC batch.
#[derive(Debug, Clone, PartialEq)]
pub struct BatchRequest {
    pub method: String,
    pub params: Value,
}

impl BatchRequest {
    pub fn new(method: &str, params: Value) -> Self {
        Self {
            method: method.to_string(),
            params,
        }
    }
}

/// Effective chunk size for a configured limit; non-positive limits mean one item per batch.
pub fn chunk_size(limit: i64) -> usize {
    usize::try_from(limit.max(1)).unwrap_or(usize::MAX)
}

/// Send `requests` in batches of at most `chunk_size(limit)` items.
pub async fn batch_call_with_limit<T: Transport + ?Sized>(
    transport: &T,
    requests: &[BatchRequest],
    limit: i64,
) -> Result<Vec<Value>, RpcError> {
    let size = chunk_size(limit);
    let mut results = Vec::with_capacity(requests.len());
    for (i, chunk) in requests.chunks(size).enumerate() {
        log::debug!(
            "batch chunk {} ({} items, limit {})",
            i,
            chunk.len(),
            size
        );
        let values = transport.batch_call(chunk).await?;
        if values.len() != chunk.len() {
            return Err(RpcError::NoResult {
                context: format!(
                    "batch chunk {}: {} results for {} requests",
                    i,
                    values.len(),
                    chunk.len()
                ),
            });
        }
        results.extend(values);
    }
    Ok(results)
}
