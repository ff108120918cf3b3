//! Tokens partition client.
//!
//! Besides plain lookups this client walks token type hierarchies: callers
//! need every ancestor's predicates to build the extra proofs for sub-type
//! definitions, mints and transfers.

use crate::config::ClientConfig;
use crate::error::ClientError;
use crate::partition::PartitionClient;
use ledgerkit_rpc::PartitionRpc;
use ledgerkit_tx::{FungibleToken, FungibleTokenType, NonFungibleToken, NonFungibleTokenType, Token};
use ledgerkit_types::constants::{partition_type, unit_type};
use ledgerkit_types::tokens::{
    FungibleTokenData, FungibleTokenTypeData, NonFungibleTokenData, NonFungibleTokenTypeData,
};
use ledgerkit_types::{Unit, UnitId};
use serde::de::DeserializeOwned;
use std::ops::Deref;

/// Upper bound on hierarchy depth, guarding against parent cycles.
pub const MAX_TYPE_HIERARCHY_DEPTH: usize = 64;

/// A token type with a parent link.
pub trait TypeNode {
    fn type_id(&self) -> &UnitId;
    fn parent_type_id(&self) -> &UnitId;
}

impl TypeNode for FungibleTokenType {
    fn type_id(&self) -> &UnitId {
        &self.id
    }

    fn parent_type_id(&self) -> &UnitId {
        &self.parent_type_id
    }
}

impl TypeNode for NonFungibleTokenType {
    fn type_id(&self) -> &UnitId {
        &self.id
    }

    fn parent_type_id(&self) -> &UnitId {
        &self.parent_type_id
    }
}

pub struct TokensPartitionClient {
    inner: PartitionClient,
}

impl TokensPartitionClient {
    pub async fn connect(config: ClientConfig) -> Result<Self, ClientError> {
        let inner =
            PartitionClient::connect(config.set_partition_type(partition_type::TOKENS)).await?;
        Ok(Self { inner })
    }

    pub async fn with_rpc(rpc: PartitionRpc, config: ClientConfig) -> Result<Self, ClientError> {
        let inner =
            PartitionClient::with_rpc(rpc, config.set_partition_type(partition_type::TOKENS))
                .await?;
        Ok(Self { inner })
    }

    // ─── Tokens ─────────────────────────────────────────────────────────────

    pub async fn get_fungible_token(
        &self,
        id: &UnitId,
    ) -> Result<Option<FungibleToken>, ClientError> {
        let unit = self
            .inner
            .get_typed_unit::<FungibleTokenData>(id, unit_type::FUNGIBLE_TOKEN, "fungible token")
            .await?;
        Ok(unit.map(FungibleToken::from))
    }

    pub async fn get_non_fungible_token(
        &self,
        id: &UnitId,
    ) -> Result<Option<NonFungibleToken>, ClientError> {
        let unit = self
            .inner
            .get_typed_unit::<NonFungibleTokenData>(
                id,
                unit_type::NON_FUNGIBLE_TOKEN,
                "non-fungible token",
            )
            .await?;
        Ok(unit.map(NonFungibleToken::from))
    }

    /// Fetch a token of either kind, dispatching on the id's unit type.
    pub async fn get_token(&self, id: &UnitId) -> Result<Option<Token>, ClientError> {
        match id.unit_type() {
            Some(unit_type::FUNGIBLE_TOKEN) => {
                Ok(self.get_fungible_token(id).await?.map(Token::from))
            }
            Some(unit_type::NON_FUNGIBLE_TOKEN) => {
                Ok(self.get_non_fungible_token(id).await?.map(Token::from))
            }
            _ => Err(ClientError::UnexpectedUnitType {
                kind: "token",
                id: id.to_string(),
            }),
        }
    }

    pub async fn get_fungible_tokens(
        &self,
        owner_id: &[u8],
    ) -> Result<Vec<FungibleToken>, ClientError> {
        let units = self
            .inner
            .get_units_by_owner::<FungibleTokenData>(owner_id, unit_type::FUNGIBLE_TOKEN)
            .await?;
        Ok(units.into_iter().map(FungibleToken::from).collect())
    }

    pub async fn get_non_fungible_tokens(
        &self,
        owner_id: &[u8],
    ) -> Result<Vec<NonFungibleToken>, ClientError> {
        let units = self
            .inner
            .get_units_by_owner::<NonFungibleTokenData>(owner_id, unit_type::NON_FUNGIBLE_TOKEN)
            .await?;
        Ok(units.into_iter().map(NonFungibleToken::from).collect())
    }

    /// Every token owned by `owner_id`, fungible first.
    pub async fn get_tokens(&self, owner_id: &[u8]) -> Result<Vec<Token>, ClientError> {
        let mut tokens: Vec<Token> = self
            .get_fungible_tokens(owner_id)
            .await?
            .into_iter()
            .map(Token::from)
            .collect();
        tokens.extend(
            self.get_non_fungible_tokens(owner_id)
                .await?
                .into_iter()
                .map(Token::from),
        );
        Ok(tokens)
    }

    // ─── Token Types ────────────────────────────────────────────────────────

    pub async fn get_fungible_token_type(
        &self,
        id: &UnitId,
    ) -> Result<Option<FungibleTokenType>, ClientError> {
        let unit = self
            .inner
            .get_typed_unit::<FungibleTokenTypeData>(
                id,
                unit_type::FUNGIBLE_TOKEN_TYPE,
                "fungible token type",
            )
            .await?;
        Ok(unit.map(FungibleTokenType::from))
    }

    pub async fn get_non_fungible_token_type(
        &self,
        id: &UnitId,
    ) -> Result<Option<NonFungibleTokenType>, ClientError> {
        let unit = self
            .inner
            .get_typed_unit::<NonFungibleTokenTypeData>(
                id,
                unit_type::NON_FUNGIBLE_TOKEN_TYPE,
                "non-fungible token type",
            )
            .await?;
        Ok(unit.map(NonFungibleTokenType::from))
    }

    /// The type and its ancestors, starting with `id` and ending at a root type.
    pub async fn get_fungible_type_hierarchy(
        &self,
        id: &UnitId,
    ) -> Result<Vec<FungibleTokenType>, ClientError> {
        self.type_hierarchy::<FungibleTokenTypeData, FungibleTokenType>(
            id,
            unit_type::FUNGIBLE_TOKEN_TYPE,
            "fungible token type",
        )
        .await
    }

    pub async fn get_non_fungible_type_hierarchy(
        &self,
        id: &UnitId,
    ) -> Result<Vec<NonFungibleTokenType>, ClientError> {
        self.type_hierarchy::<NonFungibleTokenTypeData, NonFungibleTokenType>(
            id,
            unit_type::NON_FUNGIBLE_TOKEN_TYPE,
            "non-fungible token type",
        )
        .await
    }

    async fn type_hierarchy<D, T>(
        &self,
        id: &UnitId,
        type_tag: u8,
        kind: &'static str,
    ) -> Result<Vec<T>, ClientError>
    where
        D: DeserializeOwned,
        T: From<Unit<D>> + TypeNode,
    {
        let mut chain: Vec<T> = Vec::new();
        let mut next = id.clone();
        while !next.is_root() {
            if chain.len() >= MAX_TYPE_HIERARCHY_DEPTH {
                return Err(ClientError::HierarchyTooDeep {
                    id: id.to_string(),
                    max_depth: MAX_TYPE_HIERARCHY_DEPTH,
                });
            }
            let node: T = self
                .inner
                .get_typed_unit::<D>(&next, type_tag, kind)
                .await?
                .map(T::from)
                .ok_or_else(|| ClientError::NotFound {
                    kind,
                    id: next.to_string(),
                })?;
            next = node.parent_type_id().clone();
            chain.push(node);
        }
        log::debug!("{} {} has {} levels", kind, id, chain.len());
        Ok(chain)
    }
}

impl Deref for TokensPartitionClient {
    type Target = PartitionClient;

    fn deref(&self) -> &PartitionClient {
        &self.inner
    }
}
