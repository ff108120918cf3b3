//! Canonical CBOR codec and hashing helpers.
//!
//! All signed and hashed structures go through `encode`, so the bytes a
//! validator recomputes match the bytes signed here. Structs are encoded as
//! CBOR arrays in field order (see the `serde_tuple` derives), integers use
//! the shortest form and byte strings are definite length.

use crate::error::TypesError;
use serde::de::DeserializeOwned;
use serde::Serialize;
use sha2::{Digest, Sha256};

/// Encode a value to canonical CBOR.
pub fn encode<T: Serialize + ?Sized>(value: &T) -> Result<Vec<u8>, TypesError> {
    let mut buf = Vec::new();
    ciborium::ser::into_writer(value, &mut buf)
        .map_err(|e| TypesError::Encode(format!("{:?}", e)))?;
    Ok(buf)
}

/// Decode a value from CBOR.
pub fn decode<T: DeserializeOwned>(bytes: &[u8]) -> Result<T, TypesError> {
    ciborium::de::from_reader(bytes).map_err(|e| TypesError::Decode(format!("{:?}", e)))
}

/// SHA-256 over the concatenation of `parts`.
pub fn sha256(parts: &[&[u8]]) -> [u8; 32] {
    let mut hasher = Sha256::new();
    for part in parts {
        hasher.update(part);
    }
    hasher.finalize().into()
}
