//! Payload builder and proof pipeline.
//!
//! `TxOptions` carries everything a transaction needs besides its
//! attributes: timeout, fee source, proof generators. Unit models call
//! `build_order`, which encodes the payload and runs the proof pipeline:
//!
//! 1. encode the attributes with their proof slot empty;
//! 2. run the extra generators over the owner-proof signing bytes and
//!    re-encode a copy of the attributes holding their output;
//! 3. owner proof over the final owner-proof signing bytes;
//! 4. fee proof over the fee-proof signing bytes (which include the owner proof).

use crate::attrs::TxAttributes;
use crate::sign::ProofGenerator;
use crate::TxError;
use ledgerkit_types::constants::DEFAULT_MAX_FEE;
use ledgerkit_types::{Bytes, ClientMetadata, Payload, StateLock, TransactionOrder, UnitId};
use std::fmt;
use std::sync::Arc;

/// Counter value placed in unlock transactions.
///
/// Locking a unit bumps its counter on-chain; whether the node expects the
/// counter as fetched before the lock or after it depends on whether the
/// caller refreshed the unit in between.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UnlockCounter {
    /// Use the counter as currently held by the model.
    #[default]
    Current,
    /// Use the counter plus one.
    Incremented,
}

impl UnlockCounter {
    pub fn resolve(self, counter: u64) -> Result<u64, TxError> {
        match self {
            UnlockCounter::Current => Ok(counter),
            UnlockCounter::Incremented => counter
                .checked_add(1)
                .ok_or_else(|| TxError::Overflow("unlock counter".into())),
        }
    }
}

/// Options shared by every transaction constructor.
#[derive(Clone)]
pub struct TxOptions {
    /// Last round (exclusive) the transaction may execute in.
    pub timeout: u64,
    pub fee_credit_record_id: Option<UnitId>,
    pub max_fee: u64,
    pub reference_number: Option<Bytes>,
    pub state_lock: Option<StateLock>,
    pub owner_proof: Option<Arc<dyn ProofGenerator>>,
    pub fee_proof: Option<Arc<dyn ProofGenerator>>,
    /// Generators whose output goes into the attributes' proof slot.
    pub extra_proofs: Vec<Arc<dyn ProofGenerator>>,
    pub unlock_counter: UnlockCounter,
}

impl Default for TxOptions {
    fn default() -> Self {
        Self {
            timeout: 0,
            fee_credit_record_id: None,
            max_fee: DEFAULT_MAX_FEE,
            reference_number: None,
            state_lock: None,
            owner_proof: None,
            fee_proof: None,
            extra_proofs: Vec::new(),
            unlock_counter: UnlockCounter::Current,
        }
    }
}

impl TxOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_timeout(mut self, timeout: u64) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn set_fee_credit_record_id(mut self, id: UnitId) -> Self {
        self.fee_credit_record_id = Some(id);
        self
    }

    pub fn set_max_fee(mut self, max_fee: u64) -> Self {
        self.max_fee = max_fee;
        self
    }

    pub fn set_reference_number(mut self, reference: impl Into<Bytes>) -> Self {
        self.reference_number = Some(reference.into());
        self
    }

    pub fn set_state_lock(mut self, lock: StateLock) -> Self {
        self.state_lock = Some(lock);
        self
    }

    pub fn set_owner_proof(mut self, gen: impl ProofGenerator + 'static) -> Self {
        self.owner_proof = Some(Arc::new(gen));
        self
    }

    pub fn set_fee_proof(mut self, gen: impl ProofGenerator + 'static) -> Self {
        self.fee_proof = Some(Arc::new(gen));
        self
    }

    /// Append an extra proof generator; outputs keep insertion order.
    pub fn add_extra_proof(mut self, gen: impl ProofGenerator + 'static) -> Self {
        self.extra_proofs.push(Arc::new(gen));
        self
    }

    pub fn set_unlock_counter(mut self, mode: UnlockCounter) -> Self {
        self.unlock_counter = mode;
        self
    }

    pub fn client_metadata(&self) -> ClientMetadata {
        ClientMetadata {
            timeout: self.timeout,
            max_transaction_fee: self.max_fee,
            fee_credit_record_id: self.fee_credit_record_id.clone(),
            reference_number: self.reference_number.clone(),
        }
    }
}

impl fmt::Debug for TxOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TxOptions")
            .field("timeout", &self.timeout)
            .field("fee_credit_record_id", &self.fee_credit_record_id)
            .field("max_fee", &self.max_fee)
            .field("reference_number", &self.reference_number)
            .field("state_lock", &self.state_lock)
            .field("owner_proof", &self.owner_proof.is_some())
            .field("fee_proof", &self.fee_proof.is_some())
            .field("extra_proofs", &self.extra_proofs.len())
            .field("unlock_counter", &self.unlock_counter)
            .finish()
    }
}

/// Build an unsigned payload with `attrs` canonically encoded.
pub fn new_payload<A: TxAttributes>(
    network_id: u16,
    partition_id: u32,
    unit_id: UnitId,
    tx_type: u16,
    attrs: &A,
    opts: &TxOptions,
) -> Result<Payload, TxError> {
    let mut payload = Payload {
        network_id,
        partition_id,
        unit_id,
        tx_type,
        attributes: Bytes::new(),
        state_lock: opts.state_lock.clone(),
        client_metadata: Some(opts.client_metadata()),
    };
    payload.set_attributes(attrs)?;
    Ok(payload)
}

/// Run the proof pipeline over `payload` and return the finished order.
pub fn finalize_order<A: TxAttributes>(
    payload: Payload,
    attrs: &A,
    opts: &TxOptions,
) -> Result<TransactionOrder, TxError> {
    let mut order = TransactionOrder::new(payload);
    order.payload.set_attributes(attrs)?;

    if !opts.extra_proofs.is_empty() {
        let sig_bytes = order.auth_proof_sig_bytes()?;
        let proofs = opts
            .extra_proofs
            .iter()
            .map(|gen| gen.generate(&sig_bytes).map(Bytes))
            .collect::<Result<Vec<_>, _>>()?;
        let mut filled = attrs.clone();
        filled.set_extra_proofs(proofs)?;
        order.payload.set_attributes(&filled)?;
    }

    if let Some(gen) = &opts.owner_proof {
        let sig_bytes = order.auth_proof_sig_bytes()?;
        order.auth_proof = Some(Bytes(gen.generate(&sig_bytes)?));
    }
    if let Some(gen) = &opts.fee_proof {
        let sig_bytes = order.fee_proof_sig_bytes()?;
        order.fee_proof = Some(Bytes(gen.generate(&sig_bytes)?));
    }

    log::debug!(
        "built tx type {} for unit {} (partition {}, timeout {}, {} extra proofs)",
        order.tx_type(),
        order.unit_id(),
        order.partition_id(),
        order.timeout(),
        opts.extra_proofs.len()
    );
    Ok(order)
}

/// `new_payload` followed by `finalize_order`.
pub fn build_order<A: TxAttributes>(
    network_id: u16,
    partition_id: u32,
    unit_id: UnitId,
    tx_type: u16,
    attrs: &A,
    opts: &TxOptions,
) -> Result<TransactionOrder, TxError> {
    let payload = new_payload(network_id, partition_id, unit_id, tx_type, attrs, opts)?;
    finalize_order(payload, attrs, opts)
}
