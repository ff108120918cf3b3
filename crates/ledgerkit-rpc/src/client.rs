//! Base JSON-RPC 2.0 HTTP client.
//!
//! Provides `call()` for single requests and `batch_call()` for JSON-RPC
//! batches, both POSTed to `<url>/rpc`. Supports Basic auth and a
//! configurable request timeout.
//!
//! Everything above this layer talks to the node through the `Transport`
//! trait, so lookups and confirmation can run against an in-process
//! transport in tests.

use crate::batch::BatchRequest;
use crate::error::RpcError;
use async_trait::async_trait;
use base64::Engine;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

/// JSON-RPC 2.0 request envelope.
#[derive(Serialize)]
struct JsonRpcRequest<'a> {
    jsonrpc: &'static str,
    id: u64,
    method: &'a str,
    params: &'a Value,
}

/// JSON-RPC 2.0 response envelope.
#[derive(Deserialize)]
struct JsonRpcResponse {
    #[serde(default)]
    id: Option<u64>,
    /// `null` is a valid result ("not found"), so it is not an Option.
    #[serde(default)]
    result: Value,
    error: Option<JsonRpcError>,
}

/// JSON-RPC 2.0 error object.
#[derive(Deserialize)]
struct JsonRpcError {
    code: i64,
    message: String,
}

/// A JSON-RPC endpoint.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Call one method. A `null` result comes back as `Value::Null`.
    async fn call(&self, method: &str, params: Value) -> Result<Value, RpcError>;

    /// Send all `requests` as one batch; results are in request order.
    async fn batch_call(&self, requests: &[BatchRequest]) -> Result<Vec<Value>, RpcError>;
}

/// Configuration for an RPC client.
#[derive(Debug, Clone)]
pub struct RpcConfig {
    /// Base URL of the partition node (e.g., `http://localhost:26866`).
    pub url: String,
    /// Optional username for Basic auth.
    pub username: Option<String>,
    /// Optional password for Basic auth.
    pub password: Option<String>,
    /// Request timeout.
    pub timeout: Duration,
}

impl Default for RpcConfig {
    fn default() -> Self {
        Self {
            url: "http://localhost:26866".to_string(),
            username: None,
            password: None,
            timeout: Duration::from_secs(30),
        }
    }
}

impl RpcConfig {
    pub fn new(url: &str) -> Self {
        Self {
            url: url.trim_end_matches('/').to_string(),
            ..Default::default()
        }
    }

    pub fn set_basic_auth(mut self, username: &str, password: &str) -> Self {
        self.username = Some(username.to_string());
        self.password = Some(password.to_string());
        self
    }

    pub fn set_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

/// Async HTTP client for a partition node's JSON-RPC interface.
pub struct RpcClient {
    client: reqwest::Client,
    config: RpcConfig,
    request_id: AtomicU64,
}

impl RpcClient {
    /// Create a new client with the given URL.
    pub fn new(url: &str) -> Result<Self, RpcError> {
        Self::with_config(RpcConfig::new(url))
    }

    /// Create a new client with full configuration.
    pub fn with_config(mut config: RpcConfig) -> Result<Self, RpcError> {
        config.url = config.url.trim_end_matches('/').to_string();
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .pool_max_idle_per_host(4)
            .build()
            .map_err(|e| RpcError::Client(e.to_string()))?;

        Ok(Self {
            client,
            config,
            request_id: AtomicU64::new(0),
        })
    }

    /// Get the configured base URL.
    pub fn url(&self) -> &str {
        &self.config.url
    }

    fn endpoint(&self) -> String {
        format!("{}/rpc", self.config.url)
    }

    fn next_id(&self) -> u64 {
        self.request_id.fetch_add(1, Ordering::Relaxed)
    }

    fn auth_header(&self) -> Option<HeaderValue> {
        match (&self.config.username, &self.config.password) {
            (Some(user), Some(pass)) => {
                let creds = format!("{}:{}", user, pass);
                let encoded = base64::engine::general_purpose::STANDARD.encode(creds);
                HeaderValue::from_str(&format!("Basic {}", encoded)).ok()
            }
            _ => None,
        }
    }

    fn build_headers(&self) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        if let Some(auth) = self.auth_header() {
            headers.insert(AUTHORIZATION, auth);
        }
        headers
    }

    async fn post<B: Serialize + ?Sized, R: DeserializeOwned>(
        &self,
        body: &B,
        method: &str,
    ) -> Result<R, RpcError> {
        let url = self.endpoint();
        let resp = self
            .client
            .post(&url)
            .headers(self.build_headers())
            .json(body)
            .send()
            .await
            .map_err(|e| RpcError::Http {
                method: method.to_string(),
                url: url.clone(),
                source: e,
            })?;

        let status = resp.status().as_u16();

        if status == 401 {
            return Err(RpcError::AuthFailed { url });
        }

        if status >= 400 {
            let body = resp.text().await.unwrap_or_default();
            return Err(RpcError::HttpStatus {
                method: method.to_string(),
                url,
                status,
                body: body.chars().take(500).collect(),
            });
        }

        resp.json().await.map_err(|e| RpcError::Http {
            method: method.to_string(),
            url,
            source: e,
        })
    }
}

fn into_result(resp: JsonRpcResponse, method: &str) -> Result<Value, RpcError> {
    if let Some(err) = resp.error {
        return Err(RpcError::Rpc {
            code: err.code,
            message: err.message,
            method: method.to_string(),
        });
    }
    Ok(resp.result)
}

#[async_trait]
impl Transport for RpcClient {
    async fn call(&self, method: &str, params: Value) -> Result<Value, RpcError> {
        let req = JsonRpcRequest {
            jsonrpc: "2.0",
            id: self.next_id(),
            method,
            params: &params,
        };
        let resp: JsonRpcResponse = self.post(&req, method).await?;
        into_result(resp, method)
    }

    async fn batch_call(&self, requests: &[BatchRequest]) -> Result<Vec<Value>, RpcError> {
        if requests.is_empty() {
            return Ok(Vec::new());
        }
        let first_id = self
            .request_id
            .fetch_add(requests.len() as u64, Ordering::Relaxed);
        let reqs: Vec<JsonRpcRequest<'_>> = requests
            .iter()
            .enumerate()
            .map(|(i, r)| JsonRpcRequest {
                jsonrpc: "2.0",
                id: first_id + i as u64,
                method: &r.method,
                params: &r.params,
            })
            .collect();
        let context = format!("batch of {} {}", requests.len(), requests[0].method);
        let responses: Vec<JsonRpcResponse> = self.post(&reqs, &context).await?;

        // Servers may answer a batch in any order.
        let mut by_id: HashMap<u64, JsonRpcResponse> = responses
            .into_iter()
            .filter_map(|r| r.id.map(|id| (id, r)))
            .collect();
        requests
            .iter()
            .enumerate()
            .map(|(i, r)| {
                let resp = by_id
                    .remove(&(first_id + i as u64))
                    .ok_or_else(|| RpcError::NoResult {
                        context: format!("{} (batch item {})", r.method, i),
                    })?;
                into_result(resp, &r.method)
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_default() {
        let config = RpcConfig::default();
        assert_eq!(config.url, "http://localhost:26866");
        assert_eq!(config.timeout, Duration::from_secs(30));
        assert!(config.username.is_none());
    }

    #[test]
    fn test_client_url() {
        let client = RpcClient::new("http://example.com:26866/").unwrap();
        assert_eq!(client.url(), "http://example.com:26866");
        assert_eq!(client.endpoint(), "http://example.com:26866/rpc");
    }

    #[test]
    fn test_request_ids_increment() {
        let client = RpcClient::new("http://localhost:26866").unwrap();
        let id1 = client.next_id();
        let id2 = client.next_id();
        assert_eq!(id2, id1 + 1);
    }

    #[test]
    fn test_basic_auth_header() {
        let config = RpcConfig::new("http://localhost:1").set_basic_auth("user", "pass");
        let client = RpcClient::with_config(config).unwrap();
        let header = client.auth_header().unwrap();
        assert_eq!(header.to_str().unwrap(), "Basic dXNlcjpwYXNz");
        assert!(client.build_headers().contains_key(AUTHORIZATION));
    }

    #[test]
    fn test_null_result_is_not_an_error() {
        let resp: JsonRpcResponse =
            serde_json::from_value(serde_json::json!({"jsonrpc": "2.0", "id": 1, "result": null}))
                .unwrap();
        assert_eq!(into_result(resp, "state_getUnit").unwrap(), Value::Null);
    }

    #[test]
    fn test_error_response() {
        let resp: JsonRpcResponse = serde_json::from_value(serde_json::json!({
            "jsonrpc": "2.0",
            "id": 1,
            "error": {"code": crate::error::codes::INVALID_PARAMS, "message": "bad unit id"}
        }))
        .unwrap();
        match into_result(resp, "state_getUnit") {
            Err(RpcError::Rpc { code, method, .. }) => {
                assert_eq!(code, -32602);
                assert_eq!(method, "state_getUnit");
            }
            other => panic!("unexpected: {:?}", other),
        }
    }
}
