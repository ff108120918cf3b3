//! Attribute capability used by the proof pipeline.
//!
//! Some transaction types carry proofs inside their attributes: a sub-type
//! definition needs signatures for every ancestor's creation predicate, a
//! mint needs the type's minting proof, and so on. Those proofs sign the
//! payload *without* them, so the builder encodes the attributes once,
//! computes the proofs, writes them into a copy, and encodes again.

use crate::TxError;
use ledgerkit_types::fc::{
    AddFeeCreditAttributes, CloseFeeCreditAttributes, LockFeeCreditAttributes,
    UnlockFeeCreditAttributes,
};
use ledgerkit_types::money::{
    LockAttributes, ReclaimFeeCreditAttributes, SplitAttributes, SwapDcAttributes,
    TransferAttributes, TransferDcAttributes, TransferFeeCreditAttributes, UnlockAttributes,
};
use ledgerkit_types::tokens::{
    BurnFungibleTokenAttributes, DefineFungibleTokenAttributes, DefineNonFungibleTokenAttributes,
    JoinFungibleTokenAttributes, LockTokenAttributes, MintFungibleTokenAttributes,
    MintNonFungibleTokenAttributes, SplitFungibleTokenAttributes, TransferFungibleTokenAttributes,
    TransferNonFungibleTokenAttributes, UnlockTokenAttributes, UpdateNonFungibleTokenAttributes,
};
use ledgerkit_types::Bytes;
use serde::Serialize;

/// Transaction attributes the builder can encode and fill with extra proofs.
pub trait TxAttributes: Serialize + Clone {
    /// Store the outputs of the extra proof generators.
    ///
    /// Types without a proof slot reject any extra proofs.
    fn set_extra_proofs(&mut self, _proofs: Vec<Bytes>) -> Result<(), TxError> {
        Err(TxError::Invalid(format!(
            "{} takes no extra proofs",
            std::any::type_name::<Self>()
                .rsplit("::")
                .next()
                .unwrap_or("attributes")
        )))
    }
}

macro_rules! no_proof_slot {
    ($($ty:ty),* $(,)?) => {
        $(impl TxAttributes for $ty {})*
    };
}

macro_rules! proof_slot {
    ($($ty:ty => $field:ident),* $(,)?) => {
        $(
            impl TxAttributes for $ty {
                fn set_extra_proofs(&mut self, proofs: Vec<Bytes>) -> Result<(), TxError> {
                    self.$field = proofs;
                    Ok(())
                }
            }
        )*
    };
}

no_proof_slot!(
    TransferAttributes,
    SplitAttributes,
    TransferDcAttributes,
    SwapDcAttributes,
    LockAttributes,
    UnlockAttributes,
    TransferFeeCreditAttributes,
    ReclaimFeeCreditAttributes,
    AddFeeCreditAttributes,
    CloseFeeCreditAttributes,
    LockFeeCreditAttributes,
    UnlockFeeCreditAttributes,
);

proof_slot!(
    DefineFungibleTokenAttributes => sub_type_creation_predicate_signatures,
    DefineNonFungibleTokenAttributes => sub_type_creation_predicate_signatures,
    MintFungibleTokenAttributes => token_creation_predicate_signatures,
    MintNonFungibleTokenAttributes => token_creation_predicate_signatures,
    TransferFungibleTokenAttributes => invariant_predicate_signatures,
    SplitFungibleTokenAttributes => invariant_predicate_signatures,
    BurnFungibleTokenAttributes => invariant_predicate_signatures,
    JoinFungibleTokenAttributes => invariant_predicate_signatures,
    TransferNonFungibleTokenAttributes => invariant_predicate_signatures,
    UpdateNonFungibleTokenAttributes => data_update_signatures,
    LockTokenAttributes => invariant_predicate_signatures,
    UnlockTokenAttributes => invariant_predicate_signatures,
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slot_types_accept_proofs() {
        let mut attrs = UnlockTokenAttributes {
            counter: 1,
            invariant_predicate_signatures: vec![],
        };
        attrs
            .set_extra_proofs(vec![Bytes(vec![1]), Bytes(vec![2])])
            .unwrap();
        assert_eq!(attrs.invariant_predicate_signatures.len(), 2);
    }

    #[test]
    fn test_plain_types_reject_proofs() {
        let mut attrs = UnlockAttributes { counter: 1 };
        let err = attrs.set_extra_proofs(vec![Bytes(vec![1])]).unwrap_err();
        assert!(err.to_string().contains("UnlockAttributes"));
    }
}
