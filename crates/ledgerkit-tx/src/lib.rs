//! ledgerkit transaction construction and signing.
//!
//! Domain models for ledger units (bills, fee credit records, tokens and
//! token types) expose one constructor per transaction type. Each computes
//! the type-specific attributes, runs local value and size checks, and hands
//! the attributes to the payload builder, which encodes them canonically and
//! attaches the proofs configured in `TxOptions`.

pub mod attrs;
pub mod bill;
pub mod builder;
pub mod fee_credit;
pub mod sign;
pub mod token;
pub mod token_type;
pub mod unit;

pub use attrs::TxAttributes;
pub use bill::Bill;
pub use builder::{build_order, finalize_order, new_payload, TxOptions, UnlockCounter};
pub use fee_credit::FeeCreditRecord;
pub use sign::{always_true_proof, KeySigner, P2pkhProofGenerator, ProofGenerator};
pub use token::{FungibleToken, NonFungibleToken, Token};
pub use token_type::{FungibleTokenType, NonFungibleTokenType};
pub use unit::{Lockable, UnitTx};

use ledgerkit_types::TypesError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum TxError {
    #[error("encode error: {0}")]
    Encode(String),

    #[error("decode error: {0}")]
    Decode(String),

    #[error("invalid transaction: {0}")]
    Invalid(String),

    #[error("signing error: {0}")]
    Signing(String),

    #[error("insufficient value: need {need}, have {have}")]
    InsufficientValue { need: u64, have: u64 },

    #[error("value overflow while summing {0}")]
    Overflow(String),

    #[error("no proofs supplied for {0}")]
    NoProofs(String),

    #[error("no target units specified")]
    NoTargets,

    #[error("{field} too long: {len} bytes, max {max}")]
    FieldTooLong {
        field: &'static str,
        max: usize,
        len: usize,
    },
}

impl From<TypesError> for TxError {
    fn from(e: TypesError) -> Self {
        match e {
            TypesError::Encode(m) => TxError::Encode(m),
            TypesError::Decode(m) => TxError::Decode(m),
            other => TxError::Invalid(other.to_string()),
        }
    }
}
