//! Capabilities shared by the unit models.

use crate::builder::TxOptions;
use crate::TxError;
use ledgerkit_types::{TransactionOrder, UnitId};

/// A ledger unit that transactions can be addressed to.
pub trait UnitTx {
    fn id(&self) -> &UnitId;
    fn network_id(&self) -> u16;
    fn partition_id(&self) -> u32;
}

/// Units with a replay counter and a lock status.
pub trait Lockable: UnitTx {
    fn counter(&self) -> u64;

    /// Non-zero lock status as last fetched.
    fn is_locked(&self) -> bool;

    /// Local bump after the caller assumes a transaction on this unit executed.
    fn increase_counter(&mut self);

    /// Lock the unit with a caller-chosen non-zero status code.
    fn lock(&self, lock_status: u64, opts: &TxOptions) -> Result<TransactionOrder, TxError>;

    /// Unlock the unit; the counter follows `opts.unlock_counter`.
    fn unlock(&self, opts: &TxOptions) -> Result<TransactionOrder, TxError>;
}

pub(crate) fn check_lock_status(lock_status: u64) -> Result<(), TxError> {
    if lock_status == 0 {
        return Err(TxError::Invalid("lock status must be non-zero".into()));
    }
    Ok(())
}

pub(crate) fn check_len(field: &'static str, len: usize, max: usize) -> Result<(), TxError> {
    if len > max {
        return Err(TxError::FieldTooLong { field, max, len });
    }
    Ok(())
}
