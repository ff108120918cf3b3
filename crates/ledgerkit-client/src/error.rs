//! Client error types.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("RPC error: {0}")]
    Rpc(#[from] ledgerkit_rpc::RpcError),

    #[error("transaction error: {0}")]
    Tx(#[from] ledgerkit_tx::TxError),

    #[error(transparent)]
    Confirm(#[from] ledgerkit_rpc::ConfirmError),

    #[error("{kind} {id} not found")]
    NotFound { kind: &'static str, id: String },

    #[error("node runs partition type {actual} ({actual_name}), expected {expected} ({expected_name})")]
    PartitionTypeMismatch {
        expected: u32,
        expected_name: &'static str,
        actual: u32,
        actual_name: &'static str,
    },

    #[error("unit {id} has unexpected unit type for {kind}")]
    UnexpectedUnitType { kind: &'static str, id: String },

    #[error("token type hierarchy of {id} exceeds {max_depth} levels")]
    HierarchyTooDeep { id: String, max_depth: usize },

    #[error("partition type {0} has no fee credit records")]
    NoFeeCredit(u32),
}
