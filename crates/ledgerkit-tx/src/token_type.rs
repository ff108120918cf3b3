//! Token type definitions.
//!
//! A type is only ever defined; afterwards it is referenced by id from mint,
//! transfer and update transactions. Defining a sub-type needs proofs for
//! the sub-type creation predicates of the parent chain, supplied through
//! `TxOptions::add_extra_proof`.

use crate::builder::{build_order, TxOptions};
use crate::unit::check_len;
use crate::TxError;
use ledgerkit_types::constants::{limits, tokens_tx, unit_type};
use ledgerkit_types::tokens::{
    DefineFungibleTokenAttributes, DefineNonFungibleTokenAttributes, FungibleTokenTypeData,
    Icon, NonFungibleTokenTypeData,
};
use ledgerkit_types::unit_id::UNIT_PART_LEN;
use ledgerkit_types::{Bytes, TransactionOrder, Unit, UnitId};
use rand::RngCore;

/// Random type id with the given unit type tag.
pub fn new_random_type_id(unit_type: u8) -> UnitId {
    let mut unit_part = [0u8; UNIT_PART_LEN];
    rand::thread_rng().fill_bytes(&mut unit_part);
    UnitId::new(&unit_part, unit_type)
}

fn check_common(symbol: &str, name: &str, icon: Option<&Icon>) -> Result<(), TxError> {
    if symbol.is_empty() {
        return Err(TxError::Invalid("token symbol is required".into()));
    }
    check_len("symbol", symbol.len(), limits::MAX_SYMBOL_LEN)?;
    check_len("name", name.len(), limits::MAX_NAME_LEN)?;
    if let Some(icon) = icon {
        check_len("icon type", icon.icon_type.len(), limits::MAX_ICON_TYPE_LEN)?;
        check_len("icon data", icon.data.len(), limits::MAX_ICON_DATA_LEN)?;
    }
    Ok(())
}

fn check_ids(id: &UnitId, parent_type_id: &UnitId, type_tag: u8) -> Result<(), TxError> {
    if !id.has_type(type_tag) {
        return Err(TxError::Invalid(format!(
            "type id {} does not carry unit type {:#04x}",
            id, type_tag
        )));
    }
    if !parent_type_id.is_root() && !parent_type_id.has_type(type_tag) {
        return Err(TxError::Invalid(format!(
            "parent type id {} does not carry unit type {:#04x}",
            parent_type_id, type_tag
        )));
    }
    if parent_type_id == id {
        return Err(TxError::Invalid("type cannot be its own parent".into()));
    }
    Ok(())
}

// ─── Fungible ───────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FungibleTokenType {
    pub network_id: u16,
    pub partition_id: u32,
    pub id: UnitId,
    pub symbol: String,
    pub name: String,
    pub icon: Option<Icon>,
    /// `UnitId::root()` when the type has no parent.
    pub parent_type_id: UnitId,
    pub decimal_places: u32,
    pub sub_type_creation_predicate: Bytes,
    pub token_minting_predicate: Bytes,
    pub token_type_owner_predicate: Bytes,
}

impl From<Unit<FungibleTokenTypeData>> for FungibleTokenType {
    fn from(unit: Unit<FungibleTokenTypeData>) -> Self {
        let d = unit.data;
        Self {
            network_id: unit.network_id,
            partition_id: unit.partition_id,
            id: unit.unit_id,
            symbol: d.symbol,
            name: d.name,
            icon: d.icon.map(Icon::from),
            parent_type_id: d.parent_type_id.unwrap_or_else(UnitId::root),
            decimal_places: d.decimal_places,
            sub_type_creation_predicate: d.sub_type_creation_predicate,
            token_minting_predicate: d.token_minting_predicate,
            token_type_owner_predicate: d.token_type_owner_predicate,
        }
    }
}

impl FungibleTokenType {
    pub fn define(&self, opts: &TxOptions) -> Result<TransactionOrder, TxError> {
        check_common(&self.symbol, &self.name, self.icon.as_ref())?;
        check_ids(&self.id, &self.parent_type_id, unit_type::FUNGIBLE_TOKEN_TYPE)?;
        if self.decimal_places > limits::MAX_DECIMAL_PLACES {
            return Err(TxError::Invalid(format!(
                "decimal places {} exceeds {}",
                self.decimal_places,
                limits::MAX_DECIMAL_PLACES
            )));
        }
        let attrs = DefineFungibleTokenAttributes {
            symbol: self.symbol.clone(),
            name: self.name.clone(),
            icon: self.icon.clone(),
            parent_type_id: self.parent_type_id.clone(),
            decimal_places: self.decimal_places,
            sub_type_creation_predicate: self.sub_type_creation_predicate.clone(),
            token_minting_predicate: self.token_minting_predicate.clone(),
            token_type_owner_predicate: self.token_type_owner_predicate.clone(),
            sub_type_creation_predicate_signatures: Vec::new(),
        };
        build_order(
            self.network_id,
            self.partition_id,
            self.id.clone(),
            tokens_tx::DEFINE_FT,
            &attrs,
            opts,
        )
    }
}

// ─── Non-fungible ───────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NonFungibleTokenType {
    pub network_id: u16,
    pub partition_id: u32,
    pub id: UnitId,
    pub symbol: String,
    pub name: String,
    pub icon: Option<Icon>,
    pub parent_type_id: UnitId,
    pub sub_type_creation_predicate: Bytes,
    pub token_minting_predicate: Bytes,
    pub token_type_owner_predicate: Bytes,
    pub data_update_predicate: Bytes,
}

impl From<Unit<NonFungibleTokenTypeData>> for NonFungibleTokenType {
    fn from(unit: Unit<NonFungibleTokenTypeData>) -> Self {
        let d = unit.data;
        Self {
            network_id: unit.network_id,
            partition_id: unit.partition_id,
            id: unit.unit_id,
            symbol: d.symbol,
            name: d.name,
            icon: d.icon.map(Icon::from),
            parent_type_id: d.parent_type_id.unwrap_or_else(UnitId::root),
            sub_type_creation_predicate: d.sub_type_creation_predicate,
            token_minting_predicate: d.token_minting_predicate,
            token_type_owner_predicate: d.token_type_owner_predicate,
            data_update_predicate: d.data_update_predicate,
        }
    }
}

impl NonFungibleTokenType {
    pub fn define(&self, opts: &TxOptions) -> Result<TransactionOrder, TxError> {
        check_common(&self.symbol, &self.name, self.icon.as_ref())?;
        check_ids(&self.id, &self.parent_type_id, unit_type::NON_FUNGIBLE_TOKEN_TYPE)?;
        let attrs = DefineNonFungibleTokenAttributes {
            symbol: self.symbol.clone(),
            name: self.name.clone(),
            icon: self.icon.clone(),
            parent_type_id: self.parent_type_id.clone(),
            sub_type_creation_predicate: self.sub_type_creation_predicate.clone(),
            token_minting_predicate: self.token_minting_predicate.clone(),
            token_type_owner_predicate: self.token_type_owner_predicate.clone(),
            data_update_predicate: self.data_update_predicate.clone(),
            sub_type_creation_predicate_signatures: Vec::new(),
        };
        build_order(
            self.network_id,
            self.partition_id,
            self.id.clone(),
            tokens_tx::DEFINE_NFT,
            &attrs,
            opts,
        )
    }
}
