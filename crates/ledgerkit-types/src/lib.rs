//! Core types and constants for ledgerkit.
//!
//! This crate provides the wire-level data model shared by all ledgerkit
//! crates: unit identifiers, predicates, transaction orders and records,
//! per-partition transaction attributes, unit data as returned by the
//! state RPC, and the canonical CBOR codec used for signing and hashing.

pub mod bytes;
pub mod cbor;
pub mod constants;
pub mod error;
pub mod fc;
pub mod json;
pub mod money;
pub mod predicate;
pub mod tokens;
pub mod transaction;
pub mod unit;
pub mod unit_id;

pub use bytes::Bytes;
pub use error::TypesError;
pub use transaction::{
    ClientMetadata, GenericChainItem, Payload, Proof, ServerMetadata, StateLock,
    TransactionOrder, TransactionRecord, TxProof,
};
pub use unit::{Block, BlockHeader, NodeInfo, RoundInfo, Unit};
pub use unit_id::UnitId;
