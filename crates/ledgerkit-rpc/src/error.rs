//! RPC error types.

use thiserror::Error;

/// JSON-RPC 2.0 standard error codes.
pub mod codes {
    pub const PARSE_ERROR: i64 = -32700;
    pub const INVALID_REQUEST: i64 = -32600;
    pub const METHOD_NOT_FOUND: i64 = -32601;
    pub const INVALID_PARAMS: i64 = -32602;
    pub const INTERNAL_ERROR: i64 = -32603;
}

#[derive(Debug, Error)]
pub enum RpcError {
    #[error("{method} to {url} failed: {source}")]
    Http {
        method: String,
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("{method} to {url} returned HTTP {status}: {body}")]
    HttpStatus {
        method: String,
        url: String,
        status: u16,
        body: String,
    },

    #[error("authentication failed for {url}")]
    AuthFailed { url: String },

    #[error("{method}: RPC error {code}: {message}")]
    Rpc {
        code: i64,
        message: String,
        method: String,
    },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("no result in response to {context}")]
    NoResult { context: String },

    #[error("cannot decode {context}: {message}")]
    Decode { context: String, message: String },

    #[error("cannot encode {context}: {message}")]
    Encode { context: String, message: String },

    #[error("HTTP client setup failed: {0}")]
    Client(String),
}

impl RpcError {
    pub(crate) fn decode(context: impl Into<String>, message: impl ToString) -> Self {
        RpcError::Decode {
            context: context.into(),
            message: message.to_string(),
        }
    }
}
