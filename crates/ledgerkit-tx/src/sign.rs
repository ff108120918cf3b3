//! Proof generators.
//!
//! A proof generator turns the signing bytes of a transaction into the
//! proof bytes that satisfy some predicate. The builder calls one for the
//! owner proof, one for the fee proof, and any number of "extra" generators
//! whose outputs land inside the attributes (sub-type creation, minting,
//! invariant and data-update predicates).

use crate::TxError;
use ledgerkit_types::predicate::{self, P2pkh256Signature};
use ledgerkit_types::Bytes;
use p256::ecdsa::signature::{Signer, Verifier};
use p256::ecdsa::{Signature, SigningKey, VerifyingKey};
use std::fmt;

/// Strategy for producing a proof over signing bytes.
pub trait ProofGenerator: Send + Sync {
    fn generate(&self, sig_bytes: &[u8]) -> Result<Vec<u8>, TxError>;
}

impl<F> ProofGenerator for F
where
    F: Fn(&[u8]) -> Result<Vec<u8>, TxError> + Send + Sync,
{
    fn generate(&self, sig_bytes: &[u8]) -> Result<Vec<u8>, TxError> {
        self(sig_bytes)
    }
}

/// Generator for always-true predicates: the proof is empty.
pub fn always_true_proof() -> impl ProofGenerator {
    |_: &[u8]| -> Result<Vec<u8>, TxError> { Ok(Vec::new()) }
}

// ─── Key Signer ─────────────────────────────────────────────────────────────

/// ECDSA P-256 signing key.
#[derive(Clone)]
pub struct KeySigner {
    key: SigningKey,
}

impl KeySigner {
    /// Generate a fresh random key.
    pub fn random() -> Self {
        Self {
            key: SigningKey::random(&mut rand::rngs::OsRng),
        }
    }

    /// Load a 32-byte secret scalar.
    pub fn from_bytes(secret: &[u8]) -> Result<Self, TxError> {
        let key = SigningKey::from_slice(secret)
            .map_err(|e| TxError::Signing(format!("invalid secret key: {}", e)))?;
        Ok(Self { key })
    }

    /// Compressed SEC1 public key (33 bytes).
    pub fn public_key(&self) -> Vec<u8> {
        self.key
            .verifying_key()
            .to_encoded_point(true)
            .as_bytes()
            .to_vec()
    }

    /// Fixed-size `r ‖ s` signature (64 bytes) over SHA-256 of `msg`.
    pub fn sign(&self, msg: &[u8]) -> Vec<u8> {
        let sig: Signature = self.key.sign(msg);
        sig.to_bytes().to_vec()
    }

    /// P2PKH predicate locking units to this key.
    pub fn owner_predicate(&self) -> Result<Bytes, TxError> {
        Ok(predicate::p2pkh256_from_pub_key(&self.public_key())?)
    }

    /// Proof generator satisfying `owner_predicate`.
    pub fn proof_generator(&self) -> P2pkhProofGenerator {
        P2pkhProofGenerator {
            signer: self.clone(),
        }
    }
}

impl fmt::Debug for KeySigner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KeySigner")
            .field("public_key", &hex::encode(self.public_key()))
            .finish()
    }
}

/// Verify a signature produced by `KeySigner::sign`.
pub fn verify(pub_key: &[u8], msg: &[u8], sig: &[u8]) -> Result<(), TxError> {
    let vk = VerifyingKey::from_sec1_bytes(pub_key)
        .map_err(|e| TxError::Signing(format!("invalid public key: {}", e)))?;
    let sig = Signature::from_slice(sig)
        .map_err(|e| TxError::Signing(format!("invalid signature: {}", e)))?;
    vk.verify(msg, &sig)
        .map_err(|_| TxError::Signing("signature verification failed".into()))
}

// ─── P2PKH ──────────────────────────────────────────────────────────────────

/// Produces CBOR `[signature, public_key]` proofs for P2PKH predicates.
#[derive(Debug, Clone)]
pub struct P2pkhProofGenerator {
    signer: KeySigner,
}

impl P2pkhProofGenerator {
    pub fn new(signer: KeySigner) -> Self {
        Self { signer }
    }
}

impl ProofGenerator for P2pkhProofGenerator {
    fn generate(&self, sig_bytes: &[u8]) -> Result<Vec<u8>, TxError> {
        let proof = P2pkh256Signature {
            sig: Bytes(self.signer.sign(sig_bytes)),
            pub_key: Bytes(self.signer.public_key()),
        };
        Ok(proof.encode()?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ledgerkit_types::cbor;

    #[test]
    fn test_sign_verify() {
        let signer = KeySigner::random();
        let sig = signer.sign(b"payload");
        assert_eq!(sig.len(), 64);
        assert_eq!(signer.public_key().len(), 33);
        verify(&signer.public_key(), b"payload", &sig).unwrap();
        assert!(verify(&signer.public_key(), b"other", &sig).is_err());
    }

    #[test]
    fn test_from_bytes() {
        let a = KeySigner::from_bytes(&[7u8; 32]).unwrap();
        let b = KeySigner::from_bytes(&[7u8; 32]).unwrap();
        assert_eq!(a.public_key(), b.public_key());
        assert!(KeySigner::from_bytes(&[0u8; 32]).is_err());
        assert!(KeySigner::from_bytes(&[1u8; 5]).is_err());
    }

    #[test]
    fn test_p2pkh_proof_matches_predicate() {
        let signer = KeySigner::random();
        let proof = signer.proof_generator().generate(b"msg").unwrap();
        let decoded: P2pkh256Signature = cbor::decode(&proof).unwrap();
        assert_eq!(decoded.pub_key.0, signer.public_key());
        verify(&decoded.pub_key, b"msg", &decoded.sig).unwrap();

        let pkh = predicate::extract_pub_key_hash(&signer.owner_predicate().unwrap()).unwrap();
        assert_eq!(pkh.0, cbor::sha256(&[&decoded.pub_key]).to_vec());
    }

    #[test]
    fn test_closure_generator() {
        let gen = |b: &[u8]| -> Result<Vec<u8>, TxError> { Ok(b.iter().rev().copied().collect()) };
        assert_eq!(gen.generate(&[1, 2, 3]).unwrap(), vec![3, 2, 1]);
        assert!(always_true_proof().generate(b"x").unwrap().is_empty());
    }

    #[test]
    fn test_debug_hides_secret() {
        let signer = KeySigner::from_bytes(&[9u8; 32]).unwrap();
        let dbg = format!("{:?}", signer);
        assert!(dbg.contains("public_key"));
        assert!(!dbg.contains(&hex::encode([9u8; 32])));
    }
}
