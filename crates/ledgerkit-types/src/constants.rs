//! Network, partition, unit type and transaction type constants.

// =============================================================================
// Networks and Partitions
// =============================================================================

/// Network identifiers.
pub mod network {
    pub const MAINNET: u16 = 1;
    pub const TESTNET: u16 = 2;
    pub const LOCAL: u16 = 3;
}

/// Partition type identifiers, as reported by `admin_getNodeInfo`.
///
/// The default partition id of each partition type has the same value.
pub mod partition_type {
    pub const MONEY: u32 = 1;
    pub const TOKENS: u32 = 2;
    pub const EVM: u32 = 3;
    pub const ORCHESTRATION: u32 = 4;

    /// Human-readable name for a partition type.
    pub fn name(partition_type: u32) -> &'static str {
        match partition_type {
            MONEY => "money",
            TOKENS => "tokens",
            EVM => "evm",
            ORCHESTRATION => "orchestration",
            _ => "unknown",
        }
    }
}

// =============================================================================
// Unit Types
// =============================================================================

/// Unit type tags: the last byte of every unit id.
pub mod unit_type {
    // money
    pub const BILL: u8 = 0x01;
    pub const MONEY_FEE_CREDIT_RECORD: u8 = 0x0f;

    // tokens
    pub const FUNGIBLE_TOKEN_TYPE: u8 = 0x20;
    pub const FUNGIBLE_TOKEN: u8 = 0x21;
    pub const NON_FUNGIBLE_TOKEN_TYPE: u8 = 0x22;
    pub const NON_FUNGIBLE_TOKEN: u8 = 0x23;
    pub const TOKENS_FEE_CREDIT_RECORD: u8 = 0x2f;

    // evm
    pub const EVM_FEE_CREDIT_RECORD: u8 = 0x3f;

    // orchestration
    pub const ORCHESTRATION_VAR: u8 = 0x41;

    /// The fee credit record unit type used on a partition type.
    pub fn fee_credit_record(partition_type: u32) -> Option<u8> {
        match partition_type {
            super::partition_type::MONEY => Some(MONEY_FEE_CREDIT_RECORD),
            super::partition_type::TOKENS => Some(TOKENS_FEE_CREDIT_RECORD),
            super::partition_type::EVM => Some(EVM_FEE_CREDIT_RECORD),
            _ => None,
        }
    }
}

// =============================================================================
// Transaction Types
// =============================================================================

/// Money partition transaction types.
pub mod money_tx {
    pub const TRANSFER: u16 = 1;
    pub const SPLIT: u16 = 2;
    pub const TRANSFER_DC: u16 = 3;
    pub const SWAP_DC: u16 = 4;
    pub const LOCK: u16 = 5;
    pub const UNLOCK: u16 = 6;
    pub const TRANSFER_FEE_CREDIT: u16 = 14;
    pub const RECLAIM_FEE_CREDIT: u16 = 15;
}

/// Fee credit module transaction types, shared by every partition.
pub mod fee_tx {
    pub const ADD_FEE_CREDIT: u16 = 16;
    pub const CLOSE_FEE_CREDIT: u16 = 17;
    pub const LOCK_FEE_CREDIT: u16 = 18;
    pub const UNLOCK_FEE_CREDIT: u16 = 19;
}

/// Tokens partition transaction types.
pub mod tokens_tx {
    pub const DEFINE_FT: u16 = 1;
    pub const DEFINE_NFT: u16 = 2;
    pub const MINT_FT: u16 = 3;
    pub const MINT_NFT: u16 = 4;
    pub const TRANSFER_FT: u16 = 5;
    pub const TRANSFER_NFT: u16 = 6;
    pub const LOCK_TOKEN: u16 = 7;
    pub const SPLIT_FT: u16 = 8;
    pub const UPDATE_NFT: u16 = 9;
    pub const BURN_FT: u16 = 10;
    pub const JOIN_FT: u16 = 11;
    pub const UNLOCK_TOKEN: u16 = 12;
}

// =============================================================================
// Protocol Parameters
// =============================================================================

/// Transaction order / record format version.
pub const TX_VERSION: u32 = 1;

/// Default `max_transaction_fee` in client metadata (fee units).
pub const DEFAULT_MAX_FEE: u64 = 10;

/// `success_indicator` of a successfully executed transaction.
pub const TX_STATUS_SUCCESSFUL: u8 = 1;

/// Token attribute limits enforced locally before submission.
pub mod limits {
    pub const MAX_SYMBOL_LEN: usize = 16;
    pub const MAX_NAME_LEN: usize = 256;
    pub const MAX_ICON_TYPE_LEN: usize = 64;
    pub const MAX_ICON_DATA_LEN: usize = 64 * 1024;
    pub const MAX_URI_LEN: usize = 4 * 1024;
    pub const MAX_DATA_LEN: usize = 64 * 1024;
    pub const MAX_DECIMAL_PLACES: u32 = 8;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fee_credit_record_type_per_partition() {
        assert_eq!(
            unit_type::fee_credit_record(partition_type::MONEY),
            Some(unit_type::MONEY_FEE_CREDIT_RECORD)
        );
        assert_eq!(
            unit_type::fee_credit_record(partition_type::TOKENS),
            Some(unit_type::TOKENS_FEE_CREDIT_RECORD)
        );
        assert_eq!(unit_type::fee_credit_record(partition_type::ORCHESTRATION), None);
    }

    #[test]
    fn test_partition_names() {
        assert_eq!(partition_type::name(partition_type::MONEY), "money");
        assert_eq!(partition_type::name(99), "unknown");
    }
}
