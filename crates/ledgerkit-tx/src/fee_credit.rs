//! Fee credit records.
//!
//! Lifecycle: a bill on the money partition is transferred to fee credit
//! (`Bill::transfer_to_fee_credit`), the resulting proof is presented to the
//! target partition (`add_fee_credit`). Closing moves the full balance back
//! towards a bill (`close_fee_credit`), whose proof the bill then reclaims
//! (`Bill::reclaim_from_fee_credit`).

use crate::bill::Bill;
use crate::builder::{build_order, TxOptions};
use crate::unit::{check_lock_status, Lockable, UnitTx};
use crate::TxError;
use ledgerkit_types::constants::{fee_tx, money_tx, unit_type};
use ledgerkit_types::fc::{
    fee_credit_record_id, AddFeeCreditAttributes, CloseFeeCreditAttributes,
    FeeCreditRecordData, LockFeeCreditAttributes, UnlockFeeCreditAttributes,
};
use ledgerkit_types::money::TransferFeeCreditAttributes;
use ledgerkit_types::{Bytes, Proof, TransactionOrder, Unit, UnitId};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeeCreditRecord {
    pub network_id: u16,
    pub partition_id: u32,
    pub id: UnitId,
    pub balance: u64,
    pub owner_predicate: Bytes,
    pub min_lifetime: u64,
    pub locked: u64,
    /// `None` until the record exists on-chain.
    pub counter: Option<u64>,
}

impl From<Unit<FeeCreditRecordData>> for FeeCreditRecord {
    fn from(unit: Unit<FeeCreditRecordData>) -> Self {
        Self {
            network_id: unit.network_id,
            partition_id: unit.partition_id,
            id: unit.unit_id,
            balance: unit.data.balance,
            owner_predicate: unit.data.owner_predicate,
            min_lifetime: unit.data.min_lifetime,
            locked: unit.data.locked,
            counter: unit.data.counter,
        }
    }
}

impl FeeCreditRecord {
    /// A record that does not exist yet, with its id derived from the owner.
    pub fn new_for_owner(
        network_id: u16,
        partition_id: u32,
        partition_type: u32,
        owner_predicate: Bytes,
        latest_addition_time: u64,
    ) -> Result<Self, TxError> {
        let fcr_type = unit_type::fee_credit_record(partition_type).ok_or_else(|| {
            TxError::Invalid(format!(
                "partition type {} has no fee credit records",
                partition_type
            ))
        })?;
        Ok(Self {
            network_id,
            partition_id,
            id: fee_credit_record_id(&owner_predicate, latest_addition_time, fcr_type),
            balance: 0,
            owner_predicate,
            min_lifetime: 0,
            locked: 0,
            counter: None,
        })
    }

    pub fn exists(&self) -> bool {
        self.counter.is_some()
    }

    fn existing_counter(&self, action: &str) -> Result<u64, TxError> {
        self.counter.ok_or_else(|| {
            TxError::Invalid(format!(
                "cannot {} fee credit record {}: not created yet",
                action, self.id
            ))
        })
    }

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

    /// Credit this record with a proven transfer-to-fee-credit.
    pub fn add_fee_credit(
        &self,
        fee_credit_owner_predicate: Bytes,
        transfer_proof: Proof,
        opts: &TxOptions,
    ) -> Result<TransactionOrder, TxError> {
        if transfer_proof.tx_type() != money_tx::TRANSFER_FEE_CREDIT {
            return Err(TxError::Invalid(format!(
                "add fee credit needs a transfer fee credit proof, got tx type {}",
                transfer_proof.tx_type()
            )));
        }
        let transfer: TransferFeeCreditAttributes = transfer_proof.attributes()?;
        if transfer.target_record_id != self.id {
            return Err(TxError::Invalid(format!(
                "fee credit transfer targets record {}, not {}",
                transfer.target_record_id, self.id
            )));
        }
        if transfer.target_partition_id != self.partition_id {
            return Err(TxError::Invalid(format!(
                "fee credit transfer targets partition {}, not {}",
                transfer.target_partition_id, self.partition_id
            )));
        }
        let attrs = AddFeeCreditAttributes {
            fee_credit_owner_predicate,
            fee_credit_transfer: transfer_proof.tx_record,
            fee_credit_transfer_proof: transfer_proof.tx_proof,
        };
        self.order(fee_tx::ADD_FEE_CREDIT, &attrs, opts)
    }

    /// Close the record, sending its whole balance towards `target`.
    pub fn close_fee_credit(
        &self,
        target: &Bill,
        opts: &TxOptions,
    ) -> Result<TransactionOrder, TxError> {
        let counter = self.existing_counter("close")?;
        if self.balance == 0 {
            return Err(TxError::InsufficientValue { need: 1, have: 0 });
        }
        let attrs = CloseFeeCreditAttributes {
            amount: self.balance,
            target_unit_id: target.id.clone(),
            target_unit_counter: target.counter,
            counter,
        };
        self.order(fee_tx::CLOSE_FEE_CREDIT, &attrs, opts)
    }
}

impl UnitTx for FeeCreditRecord {
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

impl Lockable for FeeCreditRecord {
    fn counter(&self) -> u64 {
        self.counter.unwrap_or(0)
    }

    fn is_locked(&self) -> bool {
        self.locked != 0
    }

    fn increase_counter(&mut self) {
        self.counter = Some(self.counter.map_or(0, |c| c.saturating_add(1)));
    }

    fn lock(&self, lock_status: u64, opts: &TxOptions) -> Result<TransactionOrder, TxError> {
        check_lock_status(lock_status)?;
        let attrs = LockFeeCreditAttributes {
            lock_status,
            counter: self.existing_counter("lock")?,
        };
        self.order(fee_tx::LOCK_FEE_CREDIT, &attrs, opts)
    }

    fn unlock(&self, opts: &TxOptions) -> Result<TransactionOrder, TxError> {
        let counter = self.existing_counter("unlock")?;
        let attrs = UnlockFeeCreditAttributes {
            counter: opts.unlock_counter.resolve(counter)?,
        };
        self.order(fee_tx::UNLOCK_FEE_CREDIT, &attrs, opts)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ledgerkit_types::constants::partition_type;
    use ledgerkit_types::{ServerMetadata, TransactionRecord, TxProof};

    fn record(counter: Option<u64>, balance: u64) -> FeeCreditRecord {
        let mut fcr =
            FeeCreditRecord::new_for_owner(3, 2, partition_type::TOKENS, Bytes(vec![0x01]), 300)
                .unwrap();
        fcr.counter = counter;
        fcr.balance = balance;
        fcr
    }

    fn bill() -> Bill {
        Bill {
            network_id: 3,
            partition_id: 1,
            id: UnitId::new(&[1u8; 32], unit_type::BILL),
            value: 100,
            owner_predicate: Bytes(vec![0x01]),
            counter: 3,
            locked: 0,
        }
    }

    fn opts() -> TxOptions {
        TxOptions::new().set_timeout(50)
    }

    fn executed(order: TransactionOrder) -> Proof {
        Proof {
            tx_record: TransactionRecord {
                version: 1,
                transaction_order: order,
                server_metadata: Some(ServerMetadata {
                    actual_fee: 1,
                    target_units: vec![],
                    success_indicator: 1,
                    processing_details: None,
                }),
            },
            tx_proof: TxProof {
                version: 1,
                block_header_hash: Bytes(vec![1u8; 32]),
                chain: vec![],
                unicity_certificate: Bytes(vec![0x80]),
            },
        }
    }

    #[test]
    fn test_new_for_owner() {
        let fcr = record(None, 0);
        assert!(!fcr.exists());
        assert!(fcr.id.has_type(unit_type::TOKENS_FEE_CREDIT_RECORD));
        assert!(FeeCreditRecord::new_for_owner(3, 4, 99, Bytes::new(), 1).is_err());
    }

    #[test]
    fn test_add_fee_credit_from_transfer() {
        let fcr = record(None, 0);
        let transfer = bill().transfer_to_fee_credit(&fcr, 25, 300, &opts()).unwrap();
        let proof = executed(transfer);
        let order = fcr
            .add_fee_credit(Bytes(vec![0x01]), proof.clone(), &opts())
            .unwrap();
        assert_eq!(order.tx_type(), fee_tx::ADD_FEE_CREDIT);
        assert_eq!(order.unit_id(), &fcr.id);
        assert_eq!(order.partition_id(), 2);
        let attrs: AddFeeCreditAttributes = order.attributes().unwrap();
        assert_eq!(attrs.fee_credit_transfer, proof.tx_record);
        assert_eq!(attrs.fee_credit_transfer_proof, proof.tx_proof);
    }

    #[test]
    fn test_add_fee_credit_rejects_other_record() {
        let fcr = record(None, 0);
        let other =
            FeeCreditRecord::new_for_owner(3, 2, partition_type::TOKENS, Bytes(vec![0x02]), 300)
                .unwrap();
        let proof = executed(bill().transfer_to_fee_credit(&other, 25, 300, &opts()).unwrap());
        assert!(matches!(
            fcr.add_fee_credit(Bytes(vec![0x01]), proof, &opts()),
            Err(TxError::Invalid(_))
        ));

        let not_transfer = executed(bill().transfer(Bytes(vec![1]), &opts()).unwrap());
        assert!(fcr
            .add_fee_credit(Bytes(vec![0x01]), not_transfer, &opts())
            .is_err());
    }

    #[test]
    fn test_close_fee_credit() {
        let fcr = record(Some(4), 90);
        let target = bill();
        let order = fcr.close_fee_credit(&target, &opts()).unwrap();
        assert_eq!(order.tx_type(), fee_tx::CLOSE_FEE_CREDIT);
        let attrs: CloseFeeCreditAttributes = order.attributes().unwrap();
        assert_eq!(attrs.amount, 90);
        assert_eq!(attrs.target_unit_id, target.id);
        assert_eq!(attrs.target_unit_counter, 3);
        assert_eq!(attrs.counter, 4);

        // Proof of the close feeds the reclaim on the bill.
        let reclaim = target.reclaim_from_fee_credit(executed(order), &opts());
        assert!(reclaim.is_ok());
    }

    #[test]
    fn test_close_requires_existing_funded_record() {
        assert!(matches!(
            record(None, 10).close_fee_credit(&bill(), &opts()),
            Err(TxError::Invalid(_))
        ));
        assert!(matches!(
            record(Some(1), 0).close_fee_credit(&bill(), &opts()),
            Err(TxError::InsufficientValue { .. })
        ));
    }

    #[test]
    fn test_lock_unlock() {
        let mut fcr = record(Some(2), 10);
        let lock = fcr.lock(5, &opts()).unwrap();
        assert_eq!(lock.tx_type(), fee_tx::LOCK_FEE_CREDIT);
        let attrs: LockFeeCreditAttributes = lock.attributes().unwrap();
        assert_eq!(attrs.lock_status, 5);
        assert_eq!(attrs.counter, 2);

        fcr.increase_counter();
        let unlock = fcr.unlock(&opts()).unwrap();
        assert_eq!(unlock.tx_type(), fee_tx::UNLOCK_FEE_CREDIT);
        let attrs: UnlockFeeCreditAttributes = unlock.attributes().unwrap();
        assert_eq!(attrs.counter, 3);

        assert!(record(None, 0).lock(1, &opts()).is_err());
    }

    #[test]
    fn test_increase_counter_creates_record_locally() {
        let mut fcr = record(None, 0);
        fcr.increase_counter();
        assert_eq!(fcr.counter, Some(0));
        assert!(fcr.exists());
    }
}
