//! Money partition: bill data and transaction attributes.

use crate::bytes::Bytes;
use crate::json::u64_string;
use crate::transaction::{TransactionRecord, TxProof};
use crate::unit_id::UnitId;
use serde::{Deserialize, Serialize};
use serde_tuple::{Deserialize_tuple, Serialize_tuple};

/// Bill state as returned by `state_getUnit`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BillData {
    #[serde(with = "u64_string")]
    pub value: u64,
    pub owner_predicate: Bytes,
    #[serde(default, with = "u64_string")]
    pub locked: u64,
    #[serde(with = "u64_string")]
    pub counter: u64,
}

// ─── Attributes ─────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Serialize_tuple, Deserialize_tuple)]
pub struct TransferAttributes {
    pub new_owner_predicate: Bytes,
    pub target_value: u64,
    pub counter: u64,
}

/// A new bill created by a split.
#[derive(Debug, Clone, PartialEq, Eq, Serialize_tuple, Deserialize_tuple)]
pub struct TargetUnit {
    pub amount: u64,
    pub owner_predicate: Bytes,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize_tuple, Deserialize_tuple)]
pub struct SplitAttributes {
    pub target_units: Vec<TargetUnit>,
    pub remaining_value: u64,
    pub counter: u64,
}

/// Moves a bill's value into the dust collector, earmarked for `target_unit_id`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize_tuple, Deserialize_tuple)]
pub struct TransferDcAttributes {
    pub value: u64,
    pub target_unit_id: UnitId,
    pub target_unit_counter: u64,
    pub counter: u64,
}

/// Joins earlier dust transfers into the target bill.
#[derive(Debug, Clone, PartialEq, Eq, Serialize_tuple, Deserialize_tuple)]
pub struct SwapDcAttributes {
    pub dc_transfers: Vec<TransactionRecord>,
    pub dc_transfer_proofs: Vec<TxProof>,
    pub target_value: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize_tuple, Deserialize_tuple)]
pub struct LockAttributes {
    pub lock_status: u64,
    pub counter: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize_tuple, Deserialize_tuple)]
pub struct UnlockAttributes {
    pub counter: u64,
}

/// Moves bill value into a fee credit record on `target_partition_id`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize_tuple, Deserialize_tuple)]
pub struct TransferFeeCreditAttributes {
    pub amount: u64,
    pub target_partition_id: u32,
    pub target_record_id: UnitId,
    /// Last round in which the matching add-fee-credit may execute.
    pub latest_addition_time: u64,
    /// `None` when the target record does not exist yet.
    pub target_unit_counter: Option<u64>,
    pub counter: u64,
}

/// Returns closed fee credit back to a bill.
#[derive(Debug, Clone, PartialEq, Eq, Serialize_tuple, Deserialize_tuple)]
pub struct ReclaimFeeCreditAttributes {
    pub close_fee_credit_transfer: TransactionRecord,
    pub close_fee_credit_proof: TxProof,
    pub counter: u64,
}
