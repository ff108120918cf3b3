//! Fee credit module: fee credit record data, ids and attributes.
//!
//! Every partition carries the fee credit module. Fee credit is funded from
//! the money partition with a transfer-to-fee-credit whose proof is then
//! presented to the target partition in an add-fee-credit transaction.

use crate::bytes::Bytes;
use crate::cbor;
use crate::json::{opt_u64_string, u64_string};
use crate::transaction::{TransactionRecord, TxProof};
use crate::unit_id::UnitId;
use serde::{Deserialize, Serialize};
use serde_tuple::{Deserialize_tuple, Serialize_tuple};

/// Fee credit record state as returned by `state_getUnit`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeeCreditRecordData {
    #[serde(with = "u64_string")]
    pub balance: u64,
    pub owner_predicate: Bytes,
    /// Round until which the record may not be deleted.
    #[serde(default, with = "u64_string")]
    pub min_lifetime: u64,
    #[serde(default, with = "u64_string")]
    pub locked: u64,
    /// Absent when the record has not been created on-chain yet.
    #[serde(default, with = "opt_u64_string")]
    pub counter: Option<u64>,
}

/// Derive the fee credit record id for an owner.
///
/// The unit part is `SHA-256(owner_predicate ‖ be64(latest_addition_time))`,
/// so the same owner gets a fresh record id per funding window.
pub fn fee_credit_record_id(
    owner_predicate: &[u8],
    latest_addition_time: u64,
    unit_type: u8,
) -> UnitId {
    let unit_part = cbor::sha256(&[owner_predicate, &latest_addition_time.to_be_bytes()]);
    UnitId::new(&unit_part, unit_type)
}

// ─── Attributes ─────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Serialize_tuple, Deserialize_tuple)]
pub struct AddFeeCreditAttributes {
    pub fee_credit_owner_predicate: Bytes,
    pub fee_credit_transfer: TransactionRecord,
    pub fee_credit_transfer_proof: TxProof,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize_tuple, Deserialize_tuple)]
pub struct CloseFeeCreditAttributes {
    pub amount: u64,
    pub target_unit_id: UnitId,
    pub target_unit_counter: u64,
    pub counter: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize_tuple, Deserialize_tuple)]
pub struct LockFeeCreditAttributes {
    pub lock_status: u64,
    pub counter: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize_tuple, Deserialize_tuple)]
pub struct UnlockFeeCreditAttributes {
    pub counter: u64,
}
