//! ledgerkit partition clients.
//!
//! Ties the transaction builders and the state RPC together: connect to a
//! partition node, look up bills, tokens, token types and fee credit records
//! as builder-ready values, and submit orders with confirmation.
//!
//! # Example
//!
//! ```ignore
//! use ledgerkit_client::{ClientConfig, MoneyPartitionClient};
//! use ledgerkit_tx::TxOptions;
//!
//! let money = MoneyPartitionClient::connect(ClientConfig::new("http://localhost:26866")).await?;
//! let bill = money.get_bills(&owner_id).await?.remove(0);
//! let order = bill.transfer(new_owner, &opts)?;
//! let (_cancel, watch) = tokio::sync::watch::channel(false);
//! let proof = money.send_and_confirm(&order, watch).await?;
//! ```

pub mod config;
pub mod error;
pub mod money;
pub mod partition;
pub mod tokens;

pub use config::{ClientConfig, DEFAULT_BATCH_ITEM_LIMIT};
pub use error::ClientError;
pub use money::MoneyPartitionClient;
pub use partition::PartitionClient;
pub use tokens::{TokensPartitionClient, TypeNode, MAX_TYPE_HIERARCHY_DEPTH};
