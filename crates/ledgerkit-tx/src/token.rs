//! Fungible and non-fungible tokens.

use crate::builder::{build_order, TxOptions};
use crate::unit::{check_len, check_lock_status, Lockable, UnitTx};
use crate::TxError;
use ledgerkit_types::constants::{limits, tokens_tx, unit_type};
use ledgerkit_types::tokens::{
    new_token_id, BurnFungibleTokenAttributes, FungibleTokenData, JoinFungibleTokenAttributes,
    LockTokenAttributes, MintFungibleTokenAttributes, MintNonFungibleTokenAttributes,
    NonFungibleTokenData, SplitFungibleTokenAttributes, TransferFungibleTokenAttributes,
    TransferNonFungibleTokenAttributes, UnlockTokenAttributes, UpdateNonFungibleTokenAttributes,
};
use ledgerkit_types::{Bytes, Proof, TransactionOrder, Unit, UnitId};

fn check_type_id(type_id: &UnitId, tag: u8) -> Result<(), TxError> {
    if !type_id.has_type(tag) {
        return Err(TxError::Invalid(format!(
            "token type id {} does not carry unit type {:#04x}",
            type_id, tag
        )));
    }
    Ok(())
}

// ─── Fungible ───────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FungibleToken {
    pub network_id: u16,
    pub partition_id: u32,
    /// Empty until minted.
    pub id: UnitId,
    pub type_id: UnitId,
    pub value: u64,
    pub owner_predicate: Bytes,
    pub counter: u64,
    pub locked: u64,
}

impl From<Unit<FungibleTokenData>> for FungibleToken {
    fn from(unit: Unit<FungibleTokenData>) -> Self {
        Self {
            network_id: unit.network_id,
            partition_id: unit.partition_id,
            id: unit.unit_id,
            type_id: unit.data.token_type,
            value: unit.data.value,
            owner_predicate: unit.data.owner_predicate,
            counter: unit.data.counter,
            locked: unit.data.locked,
        }
    }
}

impl FungibleToken {
    /// A token that is yet to be minted.
    pub fn new(
        network_id: u16,
        partition_id: u32,
        type_id: UnitId,
        value: u64,
        owner_predicate: Bytes,
    ) -> Self {
        Self {
            network_id,
            partition_id,
            id: UnitId::empty(),
            type_id,
            value,
            owner_predicate,
            counter: 0,
            locked: 0,
        }
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

    /// Mint the token; `self.id` gets the derived id once the order is built.
    ///
    /// Minting proofs for the type go in via `TxOptions::add_extra_proof`.
    pub fn mint(&mut self, opts: &TxOptions) -> Result<TransactionOrder, TxError> {
        check_type_id(&self.type_id, unit_type::FUNGIBLE_TOKEN_TYPE)?;
        if self.value == 0 {
            return Err(TxError::Invalid("token value must be positive".into()));
        }
        let attrs = MintFungibleTokenAttributes {
            owner_predicate: self.owner_predicate.clone(),
            type_id: self.type_id.clone(),
            value: self.value,
            token_creation_predicate_signatures: Vec::new(),
        };
        let id = new_token_id(&attrs, &opts.client_metadata(), unit_type::FUNGIBLE_TOKEN)?;
        let order = build_order(
            self.network_id,
            self.partition_id,
            id.clone(),
            tokens_tx::MINT_FT,
            &attrs,
            opts,
        )?;
        self.id = id;
        Ok(order)
    }

    pub fn transfer(
        &self,
        new_owner_predicate: Bytes,
        opts: &TxOptions,
    ) -> Result<TransactionOrder, TxError> {
        let attrs = TransferFungibleTokenAttributes {
            new_owner_predicate,
            value: self.value,
            counter: self.counter,
            type_id: self.type_id.clone(),
            invariant_predicate_signatures: Vec::new(),
        };
        self.order(tokens_tx::TRANSFER_FT, &attrs, opts)
    }

    /// Split `target_value` off to a new owner.
    pub fn split(
        &self,
        target_value: u64,
        new_owner_predicate: Bytes,
        opts: &TxOptions,
    ) -> Result<TransactionOrder, TxError> {
        if target_value == 0 {
            return Err(TxError::Invalid("split amount must be positive".into()));
        }
        if target_value > self.value {
            return Err(TxError::InsufficientValue {
                need: target_value,
                have: self.value,
            });
        }
        let attrs = SplitFungibleTokenAttributes {
            new_owner_predicate,
            target_value,
            remaining_value: self.value - target_value,
            counter: self.counter,
            type_id: self.type_id.clone(),
            invariant_predicate_signatures: Vec::new(),
        };
        self.order(tokens_tx::SPLIT_FT, &attrs, opts)
    }

    /// Burn this token so its value can be joined into `target`.
    pub fn burn(
        &self,
        target: &FungibleToken,
        opts: &TxOptions,
    ) -> Result<TransactionOrder, TxError> {
        if target.id == self.id {
            return Err(TxError::Invalid("cannot burn a token into itself".into()));
        }
        if target.type_id != self.type_id {
            return Err(TxError::Invalid(format!(
                "join target {} has type {}, burnt token has {}",
                target.id, target.type_id, self.type_id
            )));
        }
        let attrs = BurnFungibleTokenAttributes {
            type_id: self.type_id.clone(),
            value: self.value,
            target_token_id: target.id.clone(),
            target_token_counter: target.counter,
            counter: self.counter,
            invariant_predicate_signatures: Vec::new(),
        };
        self.order(tokens_tx::BURN_FT, &attrs, opts)
    }

    /// Join burnt tokens into this one.
    pub fn join(
        &self,
        mut burn_proofs: Vec<Proof>,
        opts: &TxOptions,
    ) -> Result<TransactionOrder, TxError> {
        if burn_proofs.is_empty() {
            return Err(TxError::NoProofs("token join".into()));
        }
        burn_proofs.sort_by(|a, b| a.unit_id().cmp(b.unit_id()));

        let mut total = self.value;
        for proof in &burn_proofs {
            if proof.tx_type() != tokens_tx::BURN_FT {
                return Err(TxError::Invalid(format!(
                    "proof for unit {} is tx type {}, expected burn",
                    proof.unit_id(),
                    proof.tx_type()
                )));
            }
            let burn: BurnFungibleTokenAttributes = proof.attributes()?;
            if burn.type_id != self.type_id {
                return Err(TxError::Invalid(format!(
                    "burnt token {} has type {}, expected {}",
                    proof.unit_id(),
                    burn.type_id,
                    self.type_id
                )));
            }
            if burn.target_token_id != self.id {
                return Err(TxError::Invalid(format!(
                    "burn of {} targets {}, not {}",
                    proof.unit_id(),
                    burn.target_token_id,
                    self.id
                )));
            }
            total = total
                .checked_add(burn.value)
                .ok_or_else(|| TxError::Overflow("joined token values".into()))?;
        }
        log::debug!(
            "joining {} burnt tokens into {} (total {})",
            burn_proofs.len(),
            self.id,
            total
        );

        let (burn_transactions, proofs) = burn_proofs
            .into_iter()
            .map(|p| (p.tx_record, p.tx_proof))
            .unzip();
        let attrs = JoinFungibleTokenAttributes {
            burn_transactions,
            proofs,
            counter: self.counter,
            invariant_predicate_signatures: Vec::new(),
        };
        self.order(tokens_tx::JOIN_FT, &attrs, opts)
    }
}

// ─── Non-fungible ───────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NonFungibleToken {
    pub network_id: u16,
    pub partition_id: u32,
    pub id: UnitId,
    pub type_id: UnitId,
    pub name: String,
    pub uri: String,
    pub data: Bytes,
    pub owner_predicate: Bytes,
    pub data_update_predicate: Bytes,
    pub counter: u64,
    pub locked: u64,
}

impl From<Unit<NonFungibleTokenData>> for NonFungibleToken {
    fn from(unit: Unit<NonFungibleTokenData>) -> Self {
        let d = unit.data;
        Self {
            network_id: unit.network_id,
            partition_id: unit.partition_id,
            id: unit.unit_id,
            type_id: d.type_id,
            name: d.name,
            uri: d.uri,
            data: d.data,
            owner_predicate: d.owner_predicate,
            data_update_predicate: d.data_update_predicate,
            counter: d.counter,
            locked: d.locked,
        }
    }
}

impl NonFungibleToken {
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

    /// Mint the token; `self.id` gets the derived id once the order is built.
    pub fn mint(&mut self, opts: &TxOptions) -> Result<TransactionOrder, TxError> {
        check_type_id(&self.type_id, unit_type::NON_FUNGIBLE_TOKEN_TYPE)?;
        check_len("name", self.name.len(), limits::MAX_NAME_LEN)?;
        check_len("uri", self.uri.len(), limits::MAX_URI_LEN)?;
        check_len("data", self.data.len(), limits::MAX_DATA_LEN)?;
        let attrs = MintNonFungibleTokenAttributes {
            owner_predicate: self.owner_predicate.clone(),
            type_id: self.type_id.clone(),
            name: self.name.clone(),
            uri: self.uri.clone(),
            data: self.data.clone(),
            data_update_predicate: self.data_update_predicate.clone(),
            token_creation_predicate_signatures: Vec::new(),
        };
        let id = new_token_id(&attrs, &opts.client_metadata(), unit_type::NON_FUNGIBLE_TOKEN)?;
        let order = build_order(
            self.network_id,
            self.partition_id,
            id.clone(),
            tokens_tx::MINT_NFT,
            &attrs,
            opts,
        )?;
        self.id = id;
        Ok(order)
    }

    pub fn transfer(
        &self,
        new_owner_predicate: Bytes,
        opts: &TxOptions,
    ) -> Result<TransactionOrder, TxError> {
        let attrs = TransferNonFungibleTokenAttributes {
            new_owner_predicate,
            counter: self.counter,
            type_id: self.type_id.clone(),
            invariant_predicate_signatures: Vec::new(),
        };
        self.order(tokens_tx::TRANSFER_NFT, &attrs, opts)
    }

    /// Replace the token data; data update proofs go in as extra proofs.
    pub fn update(&self, data: Bytes, opts: &TxOptions) -> Result<TransactionOrder, TxError> {
        check_len("data", data.len(), limits::MAX_DATA_LEN)?;
        let attrs = UpdateNonFungibleTokenAttributes {
            data,
            counter: self.counter,
            data_update_signatures: Vec::new(),
        };
        self.order(tokens_tx::UPDATE_NFT, &attrs, opts)
    }
}

// ─── Shared ─────────────────────────────────────────────────────────────────

macro_rules! token_unit {
    ($ty:ty) => {
        impl UnitTx for $ty {
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

        impl Lockable for $ty {
            fn counter(&self) -> u64 {
                self.counter
            }

            fn is_locked(&self) -> bool {
                self.locked != 0
            }

            fn increase_counter(&mut self) {
                self.counter = self.counter.saturating_add(1);
            }

            fn lock(
                &self,
                lock_status: u64,
                opts: &TxOptions,
            ) -> Result<TransactionOrder, TxError> {
                check_lock_status(lock_status)?;
                let attrs = LockTokenAttributes {
                    lock_status,
                    counter: self.counter,
                    invariant_predicate_signatures: Vec::new(),
                };
                self.order(tokens_tx::LOCK_TOKEN, &attrs, opts)
            }

            fn unlock(&self, opts: &TxOptions) -> Result<TransactionOrder, TxError> {
                let attrs = UnlockTokenAttributes {
                    counter: opts.unlock_counter.resolve(self.counter)?,
                    invariant_predicate_signatures: Vec::new(),
                };
                self.order(tokens_tx::UNLOCK_TOKEN, &attrs, opts)
            }
        }
    };
}

token_unit!(FungibleToken);
token_unit!(NonFungibleToken);

/// A token of either kind, as found in owner listings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    Fungible(FungibleToken),
    NonFungible(NonFungibleToken),
}

impl Token {
    pub fn type_id(&self) -> &UnitId {
        match self {
            Token::Fungible(t) => &t.type_id,
            Token::NonFungible(t) => &t.type_id,
        }
    }

    pub fn as_fungible(&self) -> Option<&FungibleToken> {
        match self {
            Token::Fungible(t) => Some(t),
            Token::NonFungible(_) => None,
        }
    }

    pub fn as_non_fungible(&self) -> Option<&NonFungibleToken> {
        match self {
            Token::NonFungible(t) => Some(t),
            Token::Fungible(_) => None,
        }
    }

    pub fn transfer(
        &self,
        new_owner_predicate: Bytes,
        opts: &TxOptions,
    ) -> Result<TransactionOrder, TxError> {
        match self {
            Token::Fungible(t) => t.transfer(new_owner_predicate, opts),
            Token::NonFungible(t) => t.transfer(new_owner_predicate, opts),
        }
    }
}

impl From<FungibleToken> for Token {
    fn from(t: FungibleToken) -> Self {
        Token::Fungible(t)
    }
}

impl From<NonFungibleToken> for Token {
    fn from(t: NonFungibleToken) -> Self {
        Token::NonFungible(t)
    }
}

impl UnitTx for Token {
    fn id(&self) -> &UnitId {
        match self {
            Token::Fungible(t) => &t.id,
            Token::NonFungible(t) => &t.id,
        }
    }

    fn network_id(&self) -> u16 {
        match self {
            Token::Fungible(t) => t.network_id,
            Token::NonFungible(t) => t.network_id,
        }
    }

    fn partition_id(&self) -> u32 {
        match self {
            Token::Fungible(t) => t.partition_id,
            Token::NonFungible(t) => t.partition_id,
        }
    }
}

impl Lockable for Token {
    fn counter(&self) -> u64 {
        match self {
            Token::Fungible(t) => t.counter(),
            Token::NonFungible(t) => t.counter(),
        }
    }

    fn is_locked(&self) -> bool {
        match self {
            Token::Fungible(t) => t.is_locked(),
            Token::NonFungible(t) => t.is_locked(),
        }
    }

    fn increase_counter(&mut self) {
        match self {
            Token::Fungible(t) => t.increase_counter(),
            Token::NonFungible(t) => t.increase_counter(),
        }
    }

    fn lock(&self, lock_status: u64, opts: &TxOptions) -> Result<TransactionOrder, TxError> {
        match self {
            Token::Fungible(t) => t.lock(lock_status, opts),
            Token::NonFungible(t) => t.lock(lock_status, opts),
        }
    }

    fn unlock(&self, opts: &TxOptions) -> Result<TransactionOrder, TxError> {
        match self {
            Token::Fungible(t) => t.unlock(opts),
            Token::NonFungible(t) => t.unlock(opts),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::UnlockCounter;
    use crate::sign::KeySigner;
    use ledgerkit_types::tokens::new_token_id;
    use ledgerkit_types::{ServerMetadata, TransactionRecord, TxProof};

    fn ft_type_id() -> UnitId {
        UnitId::new(&[0x20; 32], unit_type::FUNGIBLE_TOKEN_TYPE)
    }

    fn nft_type_id() -> UnitId {
        UnitId::new(&[0x22; 32], unit_type::NON_FUNGIBLE_TOKEN_TYPE)
    }

    fn ft(seed: u8, value: u64) -> FungibleToken {
        FungibleToken {
            network_id: 3,
            partition_id: 2,
            id: UnitId::new(&[seed; 32], unit_type::FUNGIBLE_TOKEN),
            type_id: ft_type_id(),
            value,
            owner_predicate: Bytes(vec![0x01]),
            counter: 1,
            locked: 0,
        }
    }

    fn nft() -> NonFungibleToken {
        NonFungibleToken {
            network_id: 3,
            partition_id: 2,
            id: UnitId::empty(),
            type_id: nft_type_id(),
            name: "sunset".into(),
            uri: "https://example.org/sunset.png".into(),
            data: Bytes(vec![1, 2, 3]),
            owner_predicate: Bytes(vec![0x01]),
            data_update_predicate: Bytes(vec![0x01]),
            counter: 0,
            locked: 0,
        }
    }

    fn opts() -> TxOptions {
        TxOptions::new().set_timeout(40)
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
                block_header_hash: Bytes(vec![2u8; 32]),
                chain: vec![],
                unicity_certificate: Bytes(vec![0x80]),
            },
        }
    }

    #[test]
    fn test_mint_fungible_assigns_derived_id() {
        let signer = KeySigner::random();
        let opts = opts().add_extra_proof(signer.proof_generator());
        let mut token = FungibleToken::new(3, 2, ft_type_id(), 500, Bytes(vec![0x01]));
        let order = token.mint(&opts).unwrap();
        assert_eq!(order.tx_type(), tokens_tx::MINT_FT);
        assert!(token.id.has_type(unit_type::FUNGIBLE_TOKEN));
        assert_eq!(order.unit_id(), &token.id);

        let attrs: MintFungibleTokenAttributes = order.attributes().unwrap();
        assert_eq!(attrs.value, 500);
        assert_eq!(attrs.token_creation_predicate_signatures.len(), 1);

        // Id derives from the attributes without their proof slot filled.
        let bare = MintFungibleTokenAttributes {
            token_creation_predicate_signatures: vec![],
            ..attrs
        };
        let expected =
            new_token_id(&bare, &opts.client_metadata(), unit_type::FUNGIBLE_TOKEN).unwrap();
        assert_eq!(token.id, expected);
    }

    #[test]
    fn test_mint_fungible_rejections() {
        let mut zero = FungibleToken::new(3, 2, ft_type_id(), 0, Bytes(vec![1]));
        assert!(zero.mint(&opts()).is_err());
        let mut wrong_type = FungibleToken::new(3, 2, nft_type_id(), 5, Bytes(vec![1]));
        assert!(wrong_type.mint(&opts()).is_err());
    }

    #[test]
    fn test_transfer_fungible() {
        let t = ft(1, 70);
        let order = t.transfer(Bytes(vec![0xcc]), &opts()).unwrap();
        assert_eq!(order.tx_type(), tokens_tx::TRANSFER_FT);
        let attrs: TransferFungibleTokenAttributes = order.attributes().unwrap();
        assert_eq!(attrs.value, 70);
        assert_eq!(attrs.counter, 1);
        assert_eq!(attrs.type_id, ft_type_id());
    }

    #[test]
    fn test_split_fungible() {
        let t = ft(1, 70);
        let order = t.split(20, Bytes(vec![0xcc]), &opts()).unwrap();
        assert_eq!(order.tx_type(), tokens_tx::SPLIT_FT);
        let attrs: SplitFungibleTokenAttributes = order.attributes().unwrap();
        assert_eq!(attrs.target_value, 20);
        assert_eq!(attrs.remaining_value, 50);

        assert!(t.split(0, Bytes(vec![1]), &opts()).is_err());
        assert!(matches!(
            t.split(71, Bytes(vec![1]), &opts()),
            Err(TxError::InsufficientValue { need: 71, have: 70 })
        ));
    }

    #[test]
    fn test_split_fungible_whole_value() {
        let t = ft(1, 100);
        let order = t.split(100, Bytes(vec![0xcc]), &opts()).unwrap();
        let attrs: SplitFungibleTokenAttributes = order.attributes().unwrap();
        assert_eq!(attrs.target_value, 100);
        assert_eq!(attrs.remaining_value, 0);
    }

    #[test]
    fn test_failed_mint_leaves_id_unassigned() {
        let failing = |_: &[u8]| -> Result<Vec<u8>, TxError> {
            Err(TxError::Signing("key unavailable".into()))
        };
        let opts = opts().set_owner_proof(failing);

        let mut fungible = FungibleToken::new(3, 2, ft_type_id(), 500, Bytes(vec![0x01]));
        assert!(matches!(fungible.mint(&opts), Err(TxError::Signing(_))));
        assert!(fungible.id.is_empty());

        let mut non_fungible = nft();
        assert!(matches!(non_fungible.mint(&opts), Err(TxError::Signing(_))));
        assert!(non_fungible.id.is_empty());
    }

    #[test]
    fn test_burn_and_join() {
        let target = ft(9, 100);
        let b1 = ft(3, 30);
        let b2 = ft(2, 20);
        let p1 = executed(b1.burn(&target, &opts()).unwrap());
        let p2 = executed(b2.burn(&target, &opts()).unwrap());

        let burn: BurnFungibleTokenAttributes = p1.attributes().unwrap();
        assert_eq!(burn.target_token_id, target.id);
        assert_eq!(burn.target_token_counter, target.counter);

        let order = target.join(vec![p1, p2], &opts()).unwrap();
        assert_eq!(order.tx_type(), tokens_tx::JOIN_FT);
        let attrs: JoinFungibleTokenAttributes = order.attributes().unwrap();
        assert_eq!(attrs.burn_transactions.len(), 2);
        assert_eq!(attrs.burn_transactions[0].transaction_order.unit_id(), &b2.id);
        assert_eq!(attrs.burn_transactions[1].transaction_order.unit_id(), &b1.id);
    }

    #[test]
    fn test_join_rejections() {
        let target = ft(9, 100);
        assert!(matches!(target.join(vec![], &opts()), Err(TxError::NoProofs(_))));

        let elsewhere = ft(8, 1);
        let misdirected = executed(ft(3, 30).burn(&elsewhere, &opts()).unwrap());
        assert!(target.join(vec![misdirected], &opts()).is_err());

        let big = executed(ft(3, u64::MAX).burn(&target, &opts()).unwrap());
        assert!(matches!(target.join(vec![big], &opts()), Err(TxError::Overflow(_))));

        let mut other_type = ft(4, 1);
        other_type.type_id = UnitId::new(&[0x21; 32], unit_type::FUNGIBLE_TOKEN_TYPE);
        assert!(other_type.burn(&target, &opts()).is_err());
    }

    #[test]
    fn test_mint_non_fungible() {
        let mut t = nft();
        let order = t.mint(&opts()).unwrap();
        assert_eq!(order.tx_type(), tokens_tx::MINT_NFT);
        assert!(t.id.has_type(unit_type::NON_FUNGIBLE_TOKEN));
        let attrs: MintNonFungibleTokenAttributes = order.attributes().unwrap();
        assert_eq!(attrs.name, "sunset");
        assert_eq!(attrs.data, Bytes(vec![1, 2, 3]));

        let mut long_uri = nft();
        long_uri.uri = "u".repeat(limits::MAX_URI_LEN + 1);
        assert!(matches!(
            long_uri.mint(&opts()),
            Err(TxError::FieldTooLong { field: "uri", .. })
        ));
    }

    #[test]
    fn test_update_and_transfer_non_fungible() {
        let mut t = nft();
        t.mint(&opts()).unwrap();
        let order = t
            .update(Bytes(vec![9]), &opts().add_extra_proof(crate::always_true_proof()))
            .unwrap();
        assert_eq!(order.tx_type(), tokens_tx::UPDATE_NFT);
        let attrs: UpdateNonFungibleTokenAttributes = order.attributes().unwrap();
        assert_eq!(attrs.data, Bytes(vec![9]));
        assert_eq!(attrs.data_update_signatures, vec![Bytes::new()]);

        assert!(t
            .update(Bytes(vec![0; limits::MAX_DATA_LEN + 1]), &opts())
            .is_err());

        let tr = t.transfer(Bytes(vec![0xdd]), &opts()).unwrap();
        assert_eq!(tr.tx_type(), tokens_tx::TRANSFER_NFT);
    }

    #[test]
    fn test_token_lock_unlock() {
        let token = Token::from(ft(1, 5));
        let lock = token.lock(2, &opts()).unwrap();
        assert_eq!(lock.tx_type(), tokens_tx::LOCK_TOKEN);
        let attrs: LockTokenAttributes = lock.attributes().unwrap();
        assert_eq!(attrs.lock_status, 2);

        let unlock = token
            .unlock(&opts().set_unlock_counter(UnlockCounter::Incremented))
            .unwrap();
        assert_eq!(unlock.tx_type(), tokens_tx::UNLOCK_TOKEN);
        let attrs: UnlockTokenAttributes = unlock.attributes().unwrap();
        assert_eq!(attrs.counter, 2);
        assert!(token.as_fungible().is_some());
        assert!(token.as_non_fungible().is_none());
    }
}
