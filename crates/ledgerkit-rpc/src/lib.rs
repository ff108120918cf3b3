//! ledgerkit RPC client library.
//!
//! Provides an async JSON-RPC client for partition nodes, typed `state_*`
//! methods, batched unit lookup and the submit-and-confirm loop.
//!
//! # Example
//!
//! ```ignore
//! use ledgerkit_rpc::{confirm_transaction, PartitionRpc, DEFAULT_POLL_INTERVAL};
//!
//! #[tokio::main]
//! async fn main() {
//!     let rpc = PartitionRpc::connect("http://localhost:26866").unwrap();
//!     println!("Round: {}", rpc.get_round_number().await.unwrap());
//!     let (_cancel, watch) = tokio::sync::watch::channel(false);
//!     let proof = confirm_transaction(&rpc, &order, DEFAULT_POLL_INTERVAL, watch).await.unwrap();
//! }
//! ```

pub mod batch;
pub mod client;
pub mod confirm;
pub mod error;
pub mod state;

#[cfg(test)]
pub(crate) mod mock;

pub use batch::{batch_call_with_limit, BatchRequest};
pub use client::{RpcClient, RpcConfig, Transport};
pub use confirm::{confirm_transaction, ConfirmError, DEFAULT_POLL_INTERVAL};
pub use error::RpcError;
pub use state::PartitionRpc;

/// Default RPC ports.
pub mod ports {
    pub const MONEY: u16 = 26866;
    pub const TOKENS: u16 = 28866;
    pub const EVM: u16 = 29866;
}
