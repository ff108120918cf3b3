//! Tokens partition: token and token type data, attributes and id derivation.
//!
//! Token types form a hierarchy: a type may name a parent type, and creating
//! a sub-type requires satisfying every ancestor's sub-type creation
//! predicate. The all-zero id (`UnitId::root`) marks a type without parent.

use crate::bytes::Bytes;
use crate::cbor;
use crate::error::TypesError;
use crate::json::u64_string;
use crate::transaction::{ClientMetadata, TransactionRecord, TxProof};
use crate::unit_id::UnitId;
use serde::{Deserialize, Serialize};
use serde_tuple::{Deserialize_tuple, Serialize_tuple};

/// Type icon (MIME type and image bytes).
#[derive(Debug, Clone, PartialEq, Eq, Serialize_tuple, Deserialize_tuple)]
pub struct Icon {
    pub icon_type: String,
    pub data: Bytes,
}

/// Derive the id of a token about to be minted.
///
/// `SHA-256(cbor(attributes) ‖ cbor(client_metadata))` becomes the unit
/// part, so the id is fixed by the mint request itself.
pub fn new_token_id<A: Serialize>(
    attributes: &A,
    client_metadata: &ClientMetadata,
    unit_type: u8,
) -> Result<UnitId, TypesError> {
    let attrs = cbor::encode(attributes)?;
    let meta = cbor::encode(client_metadata)?;
    Ok(UnitId::new(&cbor::sha256(&[&attrs, &meta]), unit_type))
}

// ─── Unit Data (state RPC) ──────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IconData {
    #[serde(rename = "type")]
    pub icon_type: String,
    pub data: Bytes,
}

impl From<IconData> for Icon {
    fn from(d: IconData) -> Self {
        Icon {
            icon_type: d.icon_type,
            data: d.data,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FungibleTokenTypeData {
    pub symbol: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub icon: Option<IconData>,
    #[serde(default)]
    pub parent_type_id: Option<UnitId>,
    pub decimal_places: u32,
    pub sub_type_creation_predicate: Bytes,
    pub token_minting_predicate: Bytes,
    pub token_type_owner_predicate: Bytes,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NonFungibleTokenTypeData {
    pub symbol: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub icon: Option<IconData>,
    #[serde(default)]
    pub parent_type_id: Option<UnitId>,
    pub sub_type_creation_predicate: Bytes,
    pub token_minting_predicate: Bytes,
    pub token_type_owner_predicate: Bytes,
    pub data_update_predicate: Bytes,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FungibleTokenData {
    pub token_type: UnitId,
    #[serde(with = "u64_string")]
    pub value: u64,
    pub owner_predicate: Bytes,
    #[serde(default, with = "u64_string")]
    pub locked: u64,
    #[serde(with = "u64_string")]
    pub counter: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NonFungibleTokenData {
    pub type_id: UnitId,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub uri: String,
    #[serde(default)]
    pub data: Bytes,
    pub owner_predicate: Bytes,
    pub data_update_predicate: Bytes,
    #[serde(default, with = "u64_string")]
    pub locked: u64,
    #[serde(with = "u64_string")]
    pub counter: u64,
}

// ─── Attributes ─────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Serialize_tuple, Deserialize_tuple)]
pub struct DefineFungibleTokenAttributes {
    pub symbol: String,
    pub name: String,
    pub icon: Option<Icon>,
    pub parent_type_id: UnitId,
    pub decimal_places: u32,
    pub sub_type_creation_predicate: Bytes,
    pub token_minting_predicate: Bytes,
    pub token_type_owner_predicate: Bytes,
    /// Proofs satisfying the ancestors' sub-type creation predicates.
    pub sub_type_creation_predicate_signatures: Vec<Bytes>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize_tuple, Deserialize_tuple)]
pub struct DefineNonFungibleTokenAttributes {
    pub symbol: String,
    pub name: String,
    pub icon: Option<Icon>,
    pub parent_type_id: UnitId,
    pub sub_type_creation_predicate: Bytes,
    pub token_minting_predicate: Bytes,
    pub token_type_owner_predicate: Bytes,
    pub data_update_predicate: Bytes,
    pub sub_type_creation_predicate_signatures: Vec<Bytes>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize_tuple, Deserialize_tuple)]
pub struct MintFungibleTokenAttributes {
    pub owner_predicate: Bytes,
    pub type_id: UnitId,
    pub value: u64,
    /// Proofs satisfying the type's token minting predicate.
    pub token_creation_predicate_signatures: Vec<Bytes>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize_tuple, Deserialize_tuple)]
pub struct MintNonFungibleTokenAttributes {
    pub owner_predicate: Bytes,
    pub type_id: UnitId,
    pub name: String,
    pub uri: String,
    pub data: Bytes,
    pub data_update_predicate: Bytes,
    pub token_creation_predicate_signatures: Vec<Bytes>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize_tuple, Deserialize_tuple)]
pub struct TransferFungibleTokenAttributes {
    pub new_owner_predicate: Bytes,
    pub value: u64,
    pub counter: u64,
    pub type_id: UnitId,
    /// Proofs satisfying the type hierarchy's invariant predicates.
    pub invariant_predicate_signatures: Vec<Bytes>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize_tuple, Deserialize_tuple)]
pub struct SplitFungibleTokenAttributes {
    pub new_owner_predicate: Bytes,
    pub target_value: u64,
    pub remaining_value: u64,
    pub counter: u64,
    pub type_id: UnitId,
    pub invariant_predicate_signatures: Vec<Bytes>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize_tuple, Deserialize_tuple)]
pub struct BurnFungibleTokenAttributes {
    pub type_id: UnitId,
    pub value: u64,
    pub target_token_id: UnitId,
    pub target_token_counter: u64,
    pub counter: u64,
    pub invariant_predicate_signatures: Vec<Bytes>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize_tuple, Deserialize_tuple)]
pub struct JoinFungibleTokenAttributes {
    pub burn_transactions: Vec<TransactionRecord>,
    pub proofs: Vec<TxProof>,
    pub counter: u64,
    pub invariant_predicate_signatures: Vec<Bytes>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize_tuple, Deserialize_tuple)]
pub struct TransferNonFungibleTokenAttributes {
    pub new_owner_predicate: Bytes,
    pub counter: u64,
    pub type_id: UnitId,
    pub invariant_predicate_signatures: Vec<Bytes>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize_tuple, Deserialize_tuple)]
pub struct UpdateNonFungibleTokenAttributes {
    pub data: Bytes,
    pub counter: u64,
    /// Proofs satisfying the token's and its types' data update predicates.
    pub data_update_signatures: Vec<Bytes>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize_tuple, Deserialize_tuple)]
pub struct LockTokenAttributes {
    pub lock_status: u64,
    pub counter: u64,
    pub invariant_predicate_signatures: Vec<Bytes>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize_tuple, Deserialize_tuple)]
pub struct UnlockTokenAttributes {
    pub counter: u64,
    pub invariant_predicate_signatures: Vec<Bytes>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::unit_type;

    fn meta(timeout: u64) -> ClientMetadata {
        ClientMetadata {
            timeout,
            max_transaction_fee: 10,
            fee_credit_record_id: None,
            reference_number: None,
        }
    }

    fn mint_attrs(value: u64) -> MintFungibleTokenAttributes {
        MintFungibleTokenAttributes {
            owner_predicate: Bytes(vec![1, 2]),
            type_id: UnitId::new(&[4u8; 32], unit_type::FUNGIBLE_TOKEN_TYPE),
            value,
            token_creation_predicate_signatures: vec![],
        }
    }

    #[test]
    fn test_new_token_id_depends_on_attrs_and_metadata() {
        let a = new_token_id(&mint_attrs(5), &meta(10), unit_type::FUNGIBLE_TOKEN).unwrap();
        let b = new_token_id(&mint_attrs(5), &meta(10), unit_type::FUNGIBLE_TOKEN).unwrap();
        let c = new_token_id(&mint_attrs(6), &meta(10), unit_type::FUNGIBLE_TOKEN).unwrap();
        let d = new_token_id(&mint_attrs(5), &meta(11), unit_type::FUNGIBLE_TOKEN).unwrap();
        assert_eq!(a, b);
        assert_ne!(a, c);
        assert_ne!(a, d);
        assert!(a.has_type(unit_type::FUNGIBLE_TOKEN));
    }

    #[test]
    fn test_fungible_token_data_from_json() {
        let type_id = UnitId::new(&[4u8; 32], unit_type::FUNGIBLE_TOKEN_TYPE);
        let json = serde_json::json!({
            "tokenType": type_id.to_hex(),
            "value": "250",
            "ownerPredicate": "0x01",
            "counter": "2"
        });
        let data: FungibleTokenData = serde_json::from_value(json).unwrap();
        assert_eq!(data.token_type, type_id);
        assert_eq!(data.value, 250);
        assert_eq!(data.locked, 0);
    }

    #[test]
    fn test_token_type_data_icon() {
        let json = serde_json::json!({
            "symbol": "NFT",
            "icon": { "type": "image/png", "data": "0x89504e47" },
            "subTypeCreationPredicate": "0x01",
            "tokenMintingPredicate": "0x01",
            "tokenTypeOwnerPredicate": "0x01",
            "dataUpdatePredicate": "0x01"
        });
        let data: NonFungibleTokenTypeData = serde_json::from_value(json).unwrap();
        let icon: Icon = data.icon.unwrap().into();
        assert_eq!(icon.icon_type, "image/png");
        assert_eq!(icon.data.len(), 4);
        assert!(data.parent_type_id.is_none());
    }
}
