//! Unit identifiers.
//!
//! A unit id is a 32-byte unit part followed by a single unit type byte
//! (see `constants::unit_type`). Ids order lexicographically by their bytes,
//! which is the order validators use when a transaction carries several
//! records for different units.

use crate::bytes::Bytes;
use crate::error::TypesError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Length of the unit part of an id.
pub const UNIT_PART_LEN: usize = 32;

/// Length of a complete unit id.
pub const UNIT_ID_LEN: usize = UNIT_PART_LEN + 1;

#[derive(Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UnitId(Bytes);

impl UnitId {
    /// Build an id from a unit part and a unit type.
    pub fn new(unit_part: &[u8; UNIT_PART_LEN], unit_type: u8) -> Self {
        let mut id = Vec::with_capacity(UNIT_ID_LEN);
        id.extend_from_slice(unit_part);
        id.push(unit_type);
        Self(Bytes(id))
    }

    /// Wrap raw bytes, checking the length.
    pub fn from_bytes(bytes: impl Into<Vec<u8>>) -> Result<Self, TypesError> {
        let bytes = bytes.into();
        if bytes.len() != UNIT_ID_LEN {
            return Err(TypesError::InvalidUnitId(format!(
                "expected {} bytes, got {}",
                UNIT_ID_LEN,
                bytes.len()
            )));
        }
        Ok(Self(Bytes(bytes)))
    }

    /// Parse `0x`-prefixed (or bare) hex.
    pub fn from_hex(s: &str) -> Result<Self, TypesError> {
        Self::from_bytes(Bytes::from_hex(s)?)
    }

    /// The all-zero id used as the "no parent" sentinel for token types.
    pub fn root() -> Self {
        Self(Bytes(vec![0u8; UNIT_ID_LEN]))
    }

    /// True only for the full-length all-zero sentinel; an empty id is not root.
    pub fn is_root(&self) -> bool {
        self.0.len() == UNIT_ID_LEN && self.0.iter().all(|b| *b == 0)
    }

    /// An unassigned id, used for mint payloads before the id is derived.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// The unit type byte, if the id is non-empty.
    pub fn unit_type(&self) -> Option<u8> {
        self.0.last().copied()
    }

    pub fn has_type(&self, unit_type: u8) -> bool {
        self.0.len() == UNIT_ID_LEN && self.unit_type() == Some(unit_type)
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn to_hex(&self) -> String {
        self.0.to_hex()
    }
}

impl fmt::Debug for UnitId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "UnitId({})", self.0.to_hex())
    }
}

impl fmt::Display for UnitId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0.to_hex())
    }
}

impl AsRef<[u8]> for UnitId {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::unit_type;

    #[test]
    fn test_new_appends_type() {
        let id = UnitId::new(&[7u8; 32], unit_type::BILL);
        assert_eq!(id.as_bytes().len(), UNIT_ID_LEN);
        assert_eq!(id.unit_type(), Some(unit_type::BILL));
        assert!(id.has_type(unit_type::BILL));
        assert!(!id.has_type(unit_type::FUNGIBLE_TOKEN));
    }

    #[test]
    fn test_from_bytes_checks_length() {
        assert!(UnitId::from_bytes(vec![0u8; 32]).is_err());
        assert!(UnitId::from_bytes(vec![0u8; 33]).is_ok());
    }

    #[test]
    fn test_root_sentinel() {
        assert!(UnitId::root().is_root());
        assert!(!UnitId::empty().is_root());
        assert!(UnitId::empty().is_empty());
        assert!(!UnitId::root().is_empty());
        assert!(!UnitId::new(&[1u8; 32], 0).is_root());
    }

    #[test]
    fn test_ordering_is_bytewise() {
        let a = UnitId::new(&[1u8; 32], unit_type::BILL);
        let b = UnitId::new(&[2u8; 32], unit_type::BILL);
        assert!(a < b);
    }

    #[test]
    fn test_json_hex() {
        let id = UnitId::new(&[0xab; 32], unit_type::BILL);
        let json = serde_json::to_value(&id).unwrap();
        let s = json.as_str().unwrap();
        assert!(s.starts_with("0xabab"));
        assert!(s.ends_with("01"));
        let back: UnitId = serde_json::from_value(json).unwrap();
        assert_eq!(back, id);
    }
}
