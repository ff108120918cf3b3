//! Partition state RPC.
//!
//! Typed async methods for the `state_*` and `admin_*` endpoints of a
//! partition node. A `null` result (unit, proof or block not found) maps to
//! `Ok(None)`; only transport and protocol failures are errors.

use crate::batch::{batch_call_with_limit, BatchRequest};
use crate::client::{RpcClient, RpcConfig, Transport};
use crate::error::RpcError;
use ledgerkit_types::{Block, Bytes, NodeInfo, Proof, RoundInfo, TransactionOrder, Unit, UnitId};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::{json, Value};
use std::sync::Arc;

// =============================================================================
// Method Names
// =============================================================================

pub mod methods {
    pub const GET_UNIT: &str = "state_getUnit";
    pub const GET_UNITS_BY_OWNER_ID: &str = "state_getUnitsByOwnerID";
    pub const SEND_TRANSACTION: &str = "state_sendTransaction";
    pub const GET_TRANSACTION_PROOF: &str = "state_getTransactionProof";
    pub const GET_ROUND_INFO: &str = "state_getRoundInfo";
    pub const GET_BLOCK: &str = "state_getBlock";
    pub const GET_NODE_INFO: &str = "admin_getNodeInfo";
}

/// Wire shape of `state_getTransactionProof`: both parts CBOR, hex encoded.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TxProofResponse {
    tx_record: Bytes,
    tx_proof: Bytes,
}

fn from_value<T: DeserializeOwned>(value: Value, context: &str) -> Result<T, RpcError> {
    serde_json::from_value(value).map_err(|e| RpcError::decode(context, e))
}

fn from_nullable<T: DeserializeOwned>(value: Value, context: &str) -> Result<Option<T>, RpcError> {
    if value.is_null() {
        return Ok(None);
    }
    from_value(value, context).map(Some)
}

// =============================================================================
// Client
// =============================================================================

/// Typed access to one partition node.
#[derive(Clone)]
pub struct PartitionRpc {
    transport: Arc<dyn Transport>,
}

impl PartitionRpc {
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Self { transport }
    }

    /// HTTP client for the node at `url`.
    pub fn connect(url: &str) -> Result<Self, RpcError> {
        Self::with_config(RpcConfig::new(url))
    }

    pub fn with_config(config: RpcConfig) -> Result<Self, RpcError> {
        Ok(Self::new(Arc::new(RpcClient::with_config(config)?)))
    }

    pub fn transport(&self) -> &Arc<dyn Transport> {
        &self.transport
    }

    /// Fetch a unit, decoding its data as `D`.
    pub async fn get_unit<D: DeserializeOwned>(
        &self,
        unit_id: &UnitId,
        include_state_proof: bool,
    ) -> Result<Option<Unit<D>>, RpcError> {
        let result = self
            .transport
            .call(
                methods::GET_UNIT,
                json!([unit_id.to_hex(), include_state_proof]),
            )
            .await?;
        from_nullable(result, &format!("unit {}", unit_id))
    }

    /// Fetch many units in batches of at most `batch_limit`.
    ///
    /// The output is aligned with `unit_ids`; missing units are `None`.
    pub async fn get_units<D: DeserializeOwned>(
        &self,
        unit_ids: &[UnitId],
        batch_limit: i64,
    ) -> Result<Vec<Option<Unit<D>>>, RpcError> {
        let requests: Vec<BatchRequest> = unit_ids
            .iter()
            .map(|id| BatchRequest::new(methods::GET_UNIT, json!([id.to_hex(), false])))
            .collect();
        let values = batch_call_with_limit(self.transport.as_ref(), &requests, batch_limit).await?;
        values
            .into_iter()
            .zip(unit_ids)
            .map(|(v, id)| from_nullable(v, &format!("unit {}", id)))
            .collect()
    }

    /// Ids of the units owned by `owner_id` (see `predicate::owner_id`).
    pub async fn get_units_by_owner_id(&self, owner_id: &[u8]) -> Result<Vec<UnitId>, RpcError> {
        let result = self
            .transport
            .call(
                methods::GET_UNITS_BY_OWNER_ID,
                json!([format!("0x{}", hex::encode(owner_id))]),
            )
            .await?;
        Ok(from_nullable(result, "owner unit ids")?.unwrap_or_default())
    }

    /// Submit an order; returns the transaction hash reported by the node.
    pub async fn send_transaction(&self, order: &TransactionOrder) -> Result<Bytes, RpcError> {
        let encoded = order.encode().map_err(|e| RpcError::Encode {
            context: "transaction order".into(),
            message: e.to_string(),
        })?;
        let result = self
            .transport
            .call(
                methods::SEND_TRANSACTION,
                json!([format!("0x{}", hex::encode(encoded))]),
            )
            .await?;
        if result.is_null() {
            return Err(RpcError::NoResult {
                context: methods::SEND_TRANSACTION.into(),
            });
        }
        from_value(result, "transaction hash")
    }

    /// Execution proof for `tx_hash`, or `None` while it is not in a block.
    pub async fn get_transaction_proof(&self, tx_hash: &[u8]) -> Result<Option<Proof>, RpcError> {
        let context = format!("proof of tx 0x{}", hex::encode(tx_hash));
        let result = self
            .transport
            .call(
                methods::GET_TRANSACTION_PROOF,
                json!([format!("0x{}", hex::encode(tx_hash))]),
            )
            .await?;
        let Some(wire) = from_nullable::<TxProofResponse>(result, &context)? else {
            return Ok(None);
        };
        Proof::from_wire(&wire.tx_record, &wire.tx_proof)
            .map(Some)
            .map_err(|e| RpcError::decode(context, e))
    }

    pub async fn get_round_info(&self) -> Result<RoundInfo, RpcError> {
        let result = self.transport.call(methods::GET_ROUND_INFO, json!([])).await?;
        if result.is_null() {
            return Err(RpcError::NoResult {
                context: methods::GET_ROUND_INFO.into(),
            });
        }
        from_value(result, "round info")
    }

    /// Latest round number of the partition.
    pub async fn get_round_number(&self) -> Result<u64, RpcError> {
        Ok(self.get_round_info().await?.round_number)
    }

    /// Block certified in `round`, if there is one.
    pub async fn get_block(&self, round: u64) -> Result<Option<Block>, RpcError> {
        let context = format!("block of round {}", round);
        let result = self
            .transport
            .call(methods::GET_BLOCK, json!([round.to_string()]))
            .await?;
        let Some(raw) = from_nullable::<Bytes>(result, &context)? else {
            return Ok(None);
        };
        Block::decode(&raw)
            .map(Some)
            .map_err(|e| RpcError::decode(context, e))
    }

    pub async fn get_node_info(&self) -> Result<NodeInfo, RpcError> {
        let result = self.transport.call(methods::GET_NODE_INFO, json!([])).await?;
        if result.is_null() {
            return Err(RpcError::NoResult {
                context: methods::GET_NODE_INFO.into(),
            });
        }
        from_value(result, "node info")
    }
}
