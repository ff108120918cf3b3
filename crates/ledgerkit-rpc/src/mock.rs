//! In-process transport for tests.

use crate::batch::BatchRequest;
use crate::client::Transport;
use crate::error::RpcError;
use async_trait::async_trait;
use serde_json::Value;
use std::sync::Mutex;

type Handler = dyn Fn(&str, &Value) -> Result<Value, RpcError> + Send + Sync;

/// Answers every call with `handler(method, params)` and records the traffic.
pub(crate) struct MockTransport {
    handler: Box<Handler>,
    calls: Mutex<Vec<String>>,
    batches: Mutex<Vec<usize>>,
}

impl MockTransport {
    pub(crate) fn new<F>(handler: F) -> Self
    where
        F: Fn(&str, &Value) -> Result<Value, RpcError> + Send + Sync + 'static,
    {
        Self {
            handler: Box::new(handler),
            calls: Mutex::new(Vec::new()),
            batches: Mutex::new(Vec::new()),
        }
    }

    /// Methods called, in order (batch items included).
    pub(crate) fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    pub(crate) fn count(&self, method: &str) -> usize {
        self.calls().iter().filter(|m| *m == method).count()
    }

    pub(crate) fn batch_sizes(&self) -> Vec<usize> {
        self.batches.lock().unwrap().clone()
    }
}

#[async_trait]
impl Transport for MockTransport {
    async fn call(&self, method: &str, params: Value) -> Result<Value, RpcError> {
        self.calls.lock().unwrap().push(method.to_string());
        (self.handler)(method, &params)
    }

    async fn batch_call(&self, requests: &[BatchRequest]) -> Result<Vec<Value>, RpcError> {
        self.batches.lock().unwrap().push(requests.len());
        requests
            .iter()
            .map(|r| {
                self.calls.lock().unwrap().push(r.method.clone());
                (self.handler)(&r.method, &r.params)
            })
            .collect()
    }
}
