//! Generic partition client.
//!
//! Wraps a `PartitionRpc` with the node's identity (fetched once at
//! construction), the lookup batch limit and the confirmation cadence.
//! Partition-specific clients build on this one.

use crate::config::ClientConfig;
use crate::error::ClientError;
use ledgerkit_rpc::{confirm_transaction, PartitionRpc};
use ledgerkit_tx::FeeCreditRecord;
use ledgerkit_types::constants::{partition_type, unit_type};
use ledgerkit_types::fc::FeeCreditRecordData;
use ledgerkit_types::{Block, Bytes, NodeInfo, Proof, TransactionOrder, Unit, UnitId};
use serde::de::DeserializeOwned;
use tokio::sync::watch;

pub struct PartitionClient {
    rpc: PartitionRpc,
    config: ClientConfig,
    node: NodeInfo,
}

impl PartitionClient {
    /// Connect over HTTP using `config.rpc`.
    pub async fn connect(config: ClientConfig) -> Result<Self, ClientError> {
        let rpc = PartitionRpc::with_config(config.rpc.clone())?;
        Self::with_rpc(rpc, config).await
    }

    /// Build on an existing RPC handle; verifies the node's partition type.
    pub async fn with_rpc(rpc: PartitionRpc, config: ClientConfig) -> Result<Self, ClientError> {
        let node = rpc.get_node_info().await?;
        if let Some(expected) = config.partition_type {
            if node.partition_type_id != expected {
                return Err(ClientError::PartitionTypeMismatch {
                    expected,
                    expected_name: partition_type::name(expected),
                    actual: node.partition_type_id,
                    actual_name: partition_type::name(node.partition_type_id),
                });
            }
        }
        log::info!(
            "connected to {} partition {} on network {}",
            partition_type::name(node.partition_type_id),
            node.partition_id,
            node.network_id
        );
        Ok(Self { rpc, config, node })
    }

    pub fn rpc(&self) -> &PartitionRpc {
        &self.rpc
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn node_info(&self) -> &NodeInfo {
        &self.node
    }

    pub fn network_id(&self) -> u16 {
        self.node.network_id
    }

    pub fn partition_id(&self) -> u32 {
        self.node.partition_id
    }

    pub fn partition_type(&self) -> u32 {
        self.node.partition_type_id
    }

    // ─── Submission ─────────────────────────────────────────────────────────

    /// Submit without waiting; returns the transaction hash.
    pub async fn send_transaction(&self, order: &TransactionOrder) -> Result<Bytes, ClientError> {
        Ok(self.rpc.send_transaction(order).await?)
    }

    /// Submit and poll until the order executes, times out or `cancel` turns true.
    pub async fn send_and_confirm(
        &self,
        order: &TransactionOrder,
        cancel: watch::Receiver<bool>,
    ) -> Result<Proof, ClientError> {
        Ok(confirm_transaction(&self.rpc, order, self.config.poll_interval, cancel).await?)
    }

    pub async fn get_transaction_proof(&self, tx_hash: &[u8]) -> Result<Option<Proof>, ClientError> {
        Ok(self.rpc.get_transaction_proof(tx_hash).await?)
    }

    pub async fn get_round_number(&self) -> Result<u64, ClientError> {
        Ok(self.rpc.get_round_number().await?)
    }

    pub async fn get_block(&self, round: u64) -> Result<Option<Block>, ClientError> {
        Ok(self.rpc.get_block(round).await?)
    }

    // ─── Unit Lookup ────────────────────────────────────────────────────────

    /// Fetch a unit that must carry `expected_type`.
    pub(crate) async fn get_typed_unit<D: DeserializeOwned>(
        &self,
        id: &UnitId,
        expected_type: u8,
        kind: &'static str,
    ) -> Result<Option<Unit<D>>, ClientError> {
        if !id.has_type(expected_type) {
            return Err(ClientError::UnexpectedUnitType {
                kind,
                id: id.to_string(),
            });
        }
        Ok(self.rpc.get_unit(id, false).await?)
    }

    /// All units of `unit_type` owned by `owner_id`, fetched in batches.
    ///
    /// Units that disappear between the id listing and the lookup are skipped.
    pub async fn get_units_by_owner<D: DeserializeOwned>(
        &self,
        owner_id: &[u8],
        unit_type: u8,
    ) -> Result<Vec<Unit<D>>, ClientError> {
        let ids: Vec<UnitId> = self
            .rpc
            .get_units_by_owner_id(owner_id)
            .await?
            .into_iter()
            .filter(|id| id.has_type(unit_type))
            .collect();
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        log::debug!(
            "fetching {} units of type {:#04x} in batches of {}",
            ids.len(),
            unit_type,
            self.config.batch_item_limit
        );
        let units = self
            .rpc
            .get_units::<D>(&ids, self.config.batch_item_limit)
            .await?;
        Ok(units.into_iter().flatten().collect())
    }

    // ─── Fee Credit ─────────────────────────────────────────────────────────

    fn fee_credit_type(&self) -> Result<u8, ClientError> {
        unit_type::fee_credit_record(self.node.partition_type_id)
            .ok_or(ClientError::NoFeeCredit(self.node.partition_type_id))
    }

    pub async fn get_fee_credit_record(
        &self,
        id: &UnitId,
    ) -> Result<Option<FeeCreditRecord>, ClientError> {
        let fcr_type = self.fee_credit_type()?;
        let unit = self
            .get_typed_unit::<FeeCreditRecordData>(id, fcr_type, "fee credit record")
            .await?;
        Ok(unit.map(FeeCreditRecord::from))
    }

    /// The owner's fee credit record on this partition, if any.
    pub async fn get_fee_credit_record_by_owner_id(
        &self,
        owner_id: &[u8],
    ) -> Result<Option<FeeCreditRecord>, ClientError> {
        let fcr_type = self.fee_credit_type()?;
        let units = self
            .get_units_by_owner::<FeeCreditRecordData>(owner_id, fcr_type)
            .await?;
        Ok(units.into_iter().next().map(FeeCreditRecord::from))
    }
}
