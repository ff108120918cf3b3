//! Transaction orders, records and proofs.
//!
//! A `TransactionOrder` is what the client signs and submits. Once executed,
//! the node returns a `Proof`: the `TransactionRecord` (the order plus server
//! metadata) and a `TxProof` linking it to a certified block. Proofs are
//! inputs to follow-up transactions (swap, add fee credit, reclaim, join).

use crate::bytes::Bytes;
use crate::cbor;
use crate::constants::{TX_STATUS_SUCCESSFUL, TX_VERSION};
use crate::error::TypesError;
use crate::unit_id::UnitId;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_tuple::{Deserialize_tuple, Serialize_tuple};

// ─── Payload ────────────────────────────────────────────────────────────────

/// Client-chosen execution limits and fee source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize_tuple, Deserialize_tuple)]
pub struct ClientMetadata {
    /// Last round (exclusive) in which the transaction may be executed.
    pub timeout: u64,
    pub max_transaction_fee: u64,
    pub fee_credit_record_id: Option<UnitId>,
    /// Opaque caller correlation bytes.
    pub reference_number: Option<Bytes>,
}

/// Conditional execution: the transaction is held until the unit's lock
/// predicate is satisfied or rolled back.
#[derive(Debug, Clone, PartialEq, Eq, Serialize_tuple, Deserialize_tuple)]
pub struct StateLock {
    pub execution_predicate: Bytes,
    pub rollback_predicate: Bytes,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize_tuple, Deserialize_tuple)]
pub struct Payload {
    pub network_id: u16,
    pub partition_id: u32,
    pub unit_id: UnitId,
    pub tx_type: u16,
    /// CBOR encoding of the type-specific attributes.
    pub attributes: Bytes,
    pub state_lock: Option<StateLock>,
    pub client_metadata: Option<ClientMetadata>,
}

impl Payload {
    /// Decode the attributes under the schema `T`.
    pub fn decode_attributes<T: DeserializeOwned>(&self) -> Result<T, TypesError> {
        cbor::decode(&self.attributes)
    }

    /// Replace the attributes with the encoding of `attrs`.
    pub fn set_attributes<T: Serialize>(&mut self, attrs: &T) -> Result<(), TypesError> {
        self.attributes = Bytes(cbor::encode(attrs)?);
        Ok(())
    }

    pub fn timeout(&self) -> u64 {
        self.client_metadata.as_ref().map(|m| m.timeout).unwrap_or(0)
    }
}

// ─── Transaction Order ──────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Serialize_tuple, Deserialize_tuple)]
pub struct TransactionOrder {
    pub version: u32,
    pub payload: Payload,
    pub state_unlock: Option<Bytes>,
    /// Owner/authorization proof over `auth_proof_sig_bytes`.
    pub auth_proof: Option<Bytes>,
    /// Fee proof over `fee_proof_sig_bytes`.
    pub fee_proof: Option<Bytes>,
}

impl TransactionOrder {
    pub fn new(payload: Payload) -> Self {
        Self {
            version: TX_VERSION,
            payload,
            state_unlock: None,
            auth_proof: None,
            fee_proof: None,
        }
    }

    pub fn encode(&self) -> Result<Vec<u8>, TypesError> {
        cbor::encode(self)
    }

    pub fn decode(bytes: &[u8]) -> Result<Self, TypesError> {
        cbor::decode(bytes)
    }

    /// Transaction hash: SHA-256 of the canonical encoding.
    pub fn hash(&self) -> Result<Bytes, TypesError> {
        Ok(Bytes(cbor::sha256(&[&self.encode()?]).to_vec()))
    }

    /// Bytes covered by the owner proof: the order without any proofs.
    pub fn auth_proof_sig_bytes(&self) -> Result<Vec<u8>, TypesError> {
        let view = Self {
            auth_proof: None,
            fee_proof: None,
            ..self.clone()
        };
        view.encode()
    }

    /// Bytes covered by the fee proof: the order including the owner proof.
    pub fn fee_proof_sig_bytes(&self) -> Result<Vec<u8>, TypesError> {
        let view = Self {
            fee_proof: None,
            ..self.clone()
        };
        view.encode()
    }

    pub fn attributes<T: DeserializeOwned>(&self) -> Result<T, TypesError> {
        self.payload.decode_attributes()
    }

    pub fn unit_id(&self) -> &UnitId {
        &self.payload.unit_id
    }

    pub fn tx_type(&self) -> u16 {
        self.payload.tx_type
    }

    pub fn partition_id(&self) -> u32 {
        self.payload.partition_id
    }

    pub fn timeout(&self) -> u64 {
        self.payload.timeout()
    }
}

// ─── Records and Proofs ─────────────────────────────────────────────────────

/// Metadata the node attaches to an executed transaction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize_tuple, Deserialize_tuple)]
pub struct ServerMetadata {
    pub actual_fee: u64,
    pub target_units: Vec<UnitId>,
    pub success_indicator: u8,
    pub processing_details: Option<Bytes>,
}

/// An executed transaction as included in a block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize_tuple, Deserialize_tuple)]
pub struct TransactionRecord {
    pub version: u32,
    pub transaction_order: TransactionOrder,
    pub server_metadata: Option<ServerMetadata>,
}

impl TransactionRecord {
    pub fn is_success(&self) -> bool {
        self.server_metadata
            .as_ref()
            .map(|m| m.success_indicator == TX_STATUS_SUCCESSFUL)
            .unwrap_or(false)
    }

    pub fn actual_fee(&self) -> u64 {
        self.server_metadata.as_ref().map(|m| m.actual_fee).unwrap_or(0)
    }
}

/// One step of the hash chain from a transaction to the block root.
#[derive(Debug, Clone, PartialEq, Eq, Serialize_tuple, Deserialize_tuple)]
pub struct GenericChainItem {
    pub hash: Bytes,
    pub left: bool,
}

/// Inclusion proof of a transaction record in a certified block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize_tuple, Deserialize_tuple)]
pub struct TxProof {
    pub version: u32,
    pub block_header_hash: Bytes,
    pub chain: Vec<GenericChainItem>,
    pub unicity_certificate: Bytes,
}

/// An executed transaction together with its inclusion proof.
#[derive(Debug, Clone, PartialEq, Eq, Serialize_tuple, Deserialize_tuple)]
pub struct Proof {
    pub tx_record: TransactionRecord,
    pub tx_proof: TxProof,
}

impl Proof {
    /// Build from the CBOR blobs returned by `state_getTransactionProof`.
    pub fn from_wire(tx_record: &[u8], tx_proof: &[u8]) -> Result<Self, TypesError> {
        Ok(Self {
            tx_record: cbor::decode(tx_record)?,
            tx_proof: cbor::decode(tx_proof)?,
        })
    }

    pub fn order(&self) -> &TransactionOrder {
        &self.tx_record.transaction_order
    }

    /// Unit the proven transaction was addressed to.
    pub fn unit_id(&self) -> &UnitId {
        self.order().unit_id()
    }

    pub fn tx_type(&self) -> u16 {
        self.order().tx_type()
    }

    pub fn attributes<T: DeserializeOwned>(&self) -> Result<T, TypesError> {
        self.order().attributes()
    }

    pub fn tx_hash(&self) -> Result<Bytes, TypesError> {
        self.order().hash()
    }
}
