//! Money partition bills.

use crate::builder::{build_order, TxOptions};
use crate::fee_credit::FeeCreditRecord;
use crate::unit::{check_lock_status, Lockable, UnitTx};
use crate::TxError;
use ledgerkit_types::constants::{fee_tx, money_tx};
use ledgerkit_types::fc::CloseFeeCreditAttributes;
use ledgerkit_types::money::{
    BillData, LockAttributes, ReclaimFeeCreditAttributes, SplitAttributes, SwapDcAttributes,
    TargetUnit, TransferAttributes, TransferDcAttributes, TransferFeeCreditAttributes,
    UnlockAttributes,
};
use ledgerkit_types::{Bytes, Proof, TransactionOrder, Unit, UnitId};

/// A bill: an indivisible-by-default amount of the native currency.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bill {
    pub network_id: u16,
    pub partition_id: u32,
    pub id: UnitId,
    pub value: u64,
    pub owner_predicate: Bytes,
    pub counter: u64,
    pub locked: u64,
}

impl From<Unit<BillData>> for Bill {
    fn from(unit: Unit<BillData>) -> Self {
        Self {
            network_id: unit.network_id,
            partition_id: unit.partition_id,
            id: unit.unit_id,
            value: unit.data.value,
            owner_predicate: unit.data.owner_predicate,
            counter: unit.data.counter,
            locked: unit.data.locked,
        }
    }
}

impl Bill {
    fn order<A: crate::TxAttributes>(
        &self,
        tx_type: u16,
        attrs: &A,
        opts: &TxOptions,
    ) -> Result<TransactionOrder, TxError> {
        build_order(
            self.network_id,
            self.partition_id,
            self.id.clone(),
            tx_type,
            attrs,
            opts,
        )
    }

    /// Transfer the whole bill to a new owner.
    pub fn transfer(
        &self,
        new_owner_predicate: Bytes,
        opts: &TxOptions,
    ) -> Result<TransactionOrder, TxError> {
        let attrs = TransferAttributes {
            new_owner_predicate,
            target_value: self.value,
            counter: self.counter,
        };
        self.order(money_tx::TRANSFER, &attrs, opts)
    }

    /// Split off new bills; the remainder stays on this bill.
    pub fn split(
        &self,
        target_units: Vec<TargetUnit>,
        opts: &TxOptions,
    ) -> Result<TransactionOrder, TxError> {
        let remaining_value = split_remainder(self.value, &target_units)?;
        let attrs = SplitAttributes {
            target_units,
            remaining_value,
            counter: self.counter,
        };
        self.order(money_tx::SPLIT, &attrs, opts)
    }

    /// Move this bill's value to the dust collector, earmarked for `target`.
    pub fn transfer_to_dust_collector(
        &self,
        target: &Bill,
        opts: &TxOptions,
    ) -> Result<TransactionOrder, TxError> {
        if target.id == self.id {
            return Err(TxError::Invalid(
                "dust collector target must differ from the transferred bill".into(),
            ));
        }
        let attrs = TransferDcAttributes {
            value: self.value,
            target_unit_id: target.id.clone(),
            target_unit_counter: target.counter,
            counter: self.counter,
        };
        self.order(money_tx::TRANSFER_DC, &attrs, opts)
    }

    /// Join earlier dust transfers into this bill.
    ///
    /// Proofs are ordered by the transferred bill's id and their values
    /// summed into the swap's target value.
    pub fn swap(
        &self,
        mut dc_proofs: Vec<Proof>,
        opts: &TxOptions,
    ) -> Result<TransactionOrder, TxError> {
        if dc_proofs.is_empty() {
            return Err(TxError::NoProofs("dust collector swap".into()));
        }
        dc_proofs.sort_by(|a, b| a.unit_id().cmp(b.unit_id()));

        let mut target_value: u64 = 0;
        for proof in &dc_proofs {
            if proof.tx_type() != money_tx::TRANSFER_DC {
                return Err(TxError::Invalid(format!(
                    "proof for unit {} is tx type {}, expected dust transfer",
                    proof.unit_id(),
                    proof.tx_type()
                )));
            }
            let attrs: TransferDcAttributes = proof.attributes()?;
            if attrs.target_unit_id != self.id {
                return Err(TxError::Invalid(format!(
                    "dust transfer of {} targets {}, not {}",
                    proof.unit_id(),
                    attrs.target_unit_id,
                    self.id
                )));
            }
            target_value = target_value
                .checked_add(attrs.value)
                .ok_or_else(|| TxError::Overflow("dust transfer values".into()))?;
        }

        let (dc_transfers, dc_transfer_proofs) = dc_proofs
            .into_iter()
            .map(|p| (p.tx_record, p.tx_proof))
            .unzip();
        let attrs = SwapDcAttributes {
            dc_transfers,
            dc_transfer_proofs,
            target_value,
        };
        self.order(money_tx::SWAP_DC, &attrs, opts)
    }

    /// Fund a fee credit record on `fcr.partition_id` with `amount`.
    ///
    /// The matching add-fee-credit must execute on the target partition no
    /// later than `latest_addition_time`.
    pub fn transfer_to_fee_credit(
        &self,
        fcr: &FeeCreditRecord,
        amount: u64,
        latest_addition_time: u64,
        opts: &TxOptions,
    ) -> Result<TransactionOrder, TxError> {
        if amount == 0 {
            return Err(TxError::Invalid("fee credit amount must be positive".into()));
        }
        if amount > self.value {
            return Err(TxError::InsufficientValue {
                need: amount,
                have: self.value,
            });
        }
        let attrs = TransferFeeCreditAttributes {
            amount,
            target_partition_id: fcr.partition_id,
            target_record_id: fcr.id.clone(),
            latest_addition_time,
            target_unit_counter: fcr.counter,
            counter: self.counter,
        };
        self.order(money_tx::TRANSFER_FEE_CREDIT, &attrs, opts)
    }

    /// Return closed fee credit to this bill.
    pub fn reclaim_from_fee_credit(
        &self,
        close_proof: Proof,
        opts: &TxOptions,
    ) -> Result<TransactionOrder, TxError> {
        if close_proof.tx_type() != fee_tx::CLOSE_FEE_CREDIT {
            return Err(TxError::Invalid(format!(
                "reclaim needs a close fee credit proof, got tx type {}",
                close_proof.tx_type()
            )));
        }
        let closed: CloseFeeCreditAttributes = close_proof.attributes()?;
        if closed.target_unit_id != self.id {
            return Err(TxError::Invalid(format!(
                "closed fee credit targets {}, not {}",
                closed.target_unit_id, self.id
            )));
        }
        let attrs = ReclaimFeeCreditAttributes {
            close_fee_credit_transfer: close_proof.tx_record,
            close_fee_credit_proof: close_proof.tx_proof,
            counter: self.counter,
        };
        self.order(money_tx::RECLAIM_FEE_CREDIT, &attrs, opts)
    }
}

/// `value - Σ amounts`; the remainder may be zero but never negative.
fn split_remainder(value: u64, targets: &[TargetUnit]) -> Result<u64, TxError> {
    if targets.is_empty() {
        return Err(TxError::NoTargets);
    }
    let mut total: u64 = 0;
    for (i, t) in targets.iter().enumerate() {
        if t.amount == 0 {
            return Err(TxError::Invalid(format!("target unit {} has zero amount", i)));
        }
        total = total
            .checked_add(t.amount)
            .ok_or_else(|| TxError::Overflow("split target amounts".into()))?;
    }
    if total > value {
        return Err(TxError::InsufficientValue {
            need: total,
            have: value,
        });
    }
    Ok(value - total)
}

impl UnitTx for Bill {
    fn id(&self) -> &UnitId {
        &self.id
    }

    fn network_id(&self) -> u16 {
        self.network_id
    }

    fn partition_id(&self) -> u32 {
        self.partition_id
    }
}

impl Lockable for Bill {
    fn counter(&self) -> u64 {
        self.counter
    }

    fn is_locked(&self) -> bool {
        self.locked != 0
    }

    fn increase_counter(&mut self) {
        self.counter = self.counter.saturating_add(1);
    }

    fn lock(&self, lock_status: u64, opts: &TxOptions) -> Result<TransactionOrder, TxError> {
        check_lock_status(lock_status)?;
        let attrs = LockAttributes {
            lock_status,
            counter: self.counter,
        };
        self.order(money_tx::LOCK, &attrs, opts)
    }

    fn unlock(&self, opts: &TxOptions) -> Result<TransactionOrder, TxError> {
        let attrs = UnlockAttributes {
            counter: opts.unlock_counter.resolve(self.counter)?,
        };
        self.order(money_tx::UNLOCK, &attrs, opts)
    }
}
