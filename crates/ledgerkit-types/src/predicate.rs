//! Predicate templates and owner identifiers.
//!
//! Ownership of a unit is expressed by a predicate. The standard predicates
//! are templates: a CBOR array `[tag, code, params]` where `tag` is the
//! template tag, `code` a single byte selecting the template, and `params`
//! its argument (the public key hash for P2PKH).

use crate::bytes::Bytes;
use crate::cbor;
use crate::error::TypesError;
use serde_tuple::{Deserialize_tuple, Serialize_tuple};

/// Tag marking a built-in template predicate.
pub const TEMPLATE_TAG: u64 = 0;

/// Template codes.
pub mod template {
    pub const ALWAYS_FALSE: u8 = 0x00;
    pub const ALWAYS_TRUE: u8 = 0x01;
    pub const P2PKH256: u8 = 0x02;
}

/// A predicate in its structured form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize_tuple, Deserialize_tuple)]
pub struct Predicate {
    pub tag: u64,
    pub code: Bytes,
    pub params: Option<Bytes>,
}

impl Predicate {
    pub fn template(code: u8, params: Option<Bytes>) -> Self {
        Self {
            tag: TEMPLATE_TAG,
            code: Bytes(vec![code]),
            params,
        }
    }

    pub fn encode(&self) -> Result<Bytes, TypesError> {
        cbor::encode(self).map(Bytes)
    }

    pub fn decode(bytes: &[u8]) -> Result<Self, TypesError> {
        cbor::decode(bytes)
    }

    /// The template code, if this is a template predicate.
    pub fn template_code(&self) -> Option<u8> {
        if self.tag == TEMPLATE_TAG && self.code.len() == 1 {
            Some(self.code[0])
        } else {
            None
        }
    }
}

/// Encoded always-true predicate (anyone may spend).
pub fn always_true() -> Result<Bytes, TypesError> {
    Predicate::template(template::ALWAYS_TRUE, None).encode()
}

/// Encoded always-false predicate (no one may spend).
pub fn always_false() -> Result<Bytes, TypesError> {
    Predicate::template(template::ALWAYS_FALSE, None).encode()
}

/// Encoded P2PKH predicate over a 32-byte SHA-256 public key hash.
pub fn p2pkh256(pub_key_hash: &[u8]) -> Result<Bytes, TypesError> {
    if pub_key_hash.len() != 32 {
        return Err(TypesError::InvalidPredicate(format!(
            "public key hash must be 32 bytes, got {}",
            pub_key_hash.len()
        )));
    }
    Predicate::template(template::P2PKH256, Some(Bytes::from(pub_key_hash))).encode()
}

/// Encoded P2PKH predicate for a public key.
pub fn p2pkh256_from_pub_key(pub_key: &[u8]) -> Result<Bytes, TypesError> {
    p2pkh256(&cbor::sha256(&[pub_key]))
}

/// Extract the public key hash from an encoded P2PKH predicate.
pub fn extract_pub_key_hash(predicate: &[u8]) -> Option<Bytes> {
    let p = Predicate::decode(predicate).ok()?;
    if p.template_code() != Some(template::P2PKH256) {
        return None;
    }
    p.params
}

/// Owner id used by the node's owner index: SHA-256 of the predicate bytes.
pub fn owner_id(predicate: &[u8]) -> Bytes {
    Bytes(cbor::sha256(&[predicate]).to_vec())
}

/// Owner proof satisfying a P2PKH predicate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize_tuple, Deserialize_tuple)]
pub struct P2pkh256Signature {
    pub sig: Bytes,
    pub pub_key: Bytes,
}

impl P2pkh256Signature {
    pub fn encode(&self) -> Result<Vec<u8>, TypesError> {
        cbor::encode(self)
    }
}
