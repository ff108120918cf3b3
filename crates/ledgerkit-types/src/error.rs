//! Type-level error types.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum TypesError {
    #[error("CBOR encode error: {0}")]
    Encode(String),

    #[error("CBOR decode error: {0}")]
    Decode(String),

    #[error("invalid hex: {0}")]
    Hex(#[from] hex::FromHexError),

    #[error("invalid unit id: {0}")]
    InvalidUnitId(String),

    #[error("invalid predicate: {0}")]
    InvalidPredicate(String),
}
