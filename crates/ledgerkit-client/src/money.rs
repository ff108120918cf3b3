//! Money partition client.

use crate::config::ClientConfig;
use crate::error::ClientError;
use crate::partition::PartitionClient;
use ledgerkit_rpc::PartitionRpc;
use ledgerkit_tx::{Bill, TxError};
use ledgerkit_types::constants::{partition_type, unit_type};
use ledgerkit_types::money::BillData;
use ledgerkit_types::UnitId;
use std::ops::Deref;

pub struct MoneyPartitionClient {
    inner: PartitionClient,
}

impl MoneyPartitionClient {
    pub async fn connect(config: ClientConfig) -> Result<Self, ClientError> {
        let inner = PartitionClient::connect(config.set_partition_type(partition_type::MONEY)).await?;
        Ok(Self { inner })
    }

    pub async fn with_rpc(rpc: PartitionRpc, config: ClientConfig) -> Result<Self, ClientError> {
        let inner =
            PartitionClient::with_rpc(rpc, config.set_partition_type(partition_type::MONEY)).await?;
        Ok(Self { inner })
    }

    pub async fn get_bill(&self, id: &UnitId) -> Result<Option<Bill>, ClientError> {
        let unit = self
            .inner
            .get_typed_unit::<BillData>(id, unit_type::BILL, "bill")
            .await?;
        Ok(unit.map(Bill::from))
    }

    /// Like `get_bill`, but a missing bill is an error.
    pub async fn require_bill(&self, id: &UnitId) -> Result<Bill, ClientError> {
        self.get_bill(id).await?.ok_or_else(|| ClientError::NotFound {
            kind: "bill",
            id: id.to_string(),
        })
    }

    /// Bills owned by `owner_id`, largest first.
    pub async fn get_bills(&self, owner_id: &[u8]) -> Result<Vec<Bill>, ClientError> {
        let mut bills: Vec<Bill> = self
            .inner
            .get_units_by_owner::<BillData>(owner_id, unit_type::BILL)
            .await?
            .into_iter()
            .map(Bill::from)
            .collect();
        bills.sort_by(|a, b| b.value.cmp(&a.value).then_with(|| a.id.cmp(&b.id)));
        Ok(bills)
    }

    /// Sum of the owner's bill values.
    pub async fn total_balance(&self, owner_id: &[u8]) -> Result<u64, ClientError> {
        let bills = self.get_bills(owner_id).await?;
        let total = bills.iter().try_fold(0u64, |acc, b| {
            acc.checked_add(b.value)
                .ok_or_else(|| TxError::Overflow("bill balance".into()))
        })?;
        Ok(total)
    }
}

impl Deref for MoneyPartitionClient {
    type Target = PartitionClient;

    fn deref(&self) -> &PartitionClient {
        &self.inner
    }
}
