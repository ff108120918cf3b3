//! State RPC envelopes: units, round info, node info and blocks.

use crate::bytes::Bytes;
use crate::cbor;
use crate::error::TypesError;
use crate::json::u64_string;
use crate::transaction::TransactionRecord;
use crate::unit_id::UnitId;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use serde_tuple::{Deserialize_tuple, Serialize_tuple};

/// A unit as returned by `state_getUnit`, with type-specific `data`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Unit<T> {
    pub network_id: u16,
    pub partition_id: u32,
    pub unit_id: UnitId,
    pub data: T,
    /// Encoded transaction holding a state lock on the unit, if any.
    #[serde(default)]
    pub state_lock_tx: Option<Bytes>,
    /// Encoded unit state proof, when requested.
    #[serde(default)]
    pub state_proof: Option<Bytes>,
}

impl<T> Unit<T> {
    pub fn is_state_locked(&self) -> bool {
        self.state_lock_tx.as_ref().map(|b| !b.is_empty()).unwrap_or(false)
    }
}

/// Response of `state_getRoundInfo`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoundInfo {
    #[serde(with = "u64_string")]
    pub round_number: u64,
    #[serde(default, with = "u64_string")]
    pub epoch: u64,
}

/// Response of `admin_getNodeInfo`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeInfo {
    pub network_id: u16,
    pub partition_id: u32,
    pub partition_type_id: u32,
    #[serde(default)]
    pub permissioned_mode: bool,
    #[serde(default)]
    pub feeless_mode: bool,
    /// Catch-all for peer info and validator lists.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize_tuple, Deserialize_tuple)]
pub struct BlockHeader {
    pub version: u32,
    pub network_id: u16,
    pub partition_id: u32,
    pub shard_id: Bytes,
    pub proposer_id: String,
    pub previous_block_hash: Bytes,
}

/// A certified block, as returned (CBOR-encoded) by `state_getBlock`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize_tuple, Deserialize_tuple)]
pub struct Block {
    pub header: BlockHeader,
    pub transactions: Vec<TransactionRecord>,
    pub unicity_certificate: Bytes,
}

impl Block {
    pub fn decode(bytes: &[u8]) -> Result<Self, TypesError> {
        cbor::decode(bytes)
    }
}
