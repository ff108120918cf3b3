//! Submit-and-confirm.
//!
//! A submitted transaction is either executed in some round before its
//! timeout or dropped. The confirmation loop polls the latest round and the
//! transaction proof at a fixed interval until one of those outcomes is
//! known, the caller cancels, or the transport fails.

use crate::error::RpcError;
use crate::state::PartitionRpc;
use ledgerkit_types::{Proof, TransactionOrder};
use std::time::Duration;
use thiserror::Error;
use tokio::sync::watch;

/// Default delay between confirmation polls.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(500);

#[derive(Debug, Error)]
pub enum ConfirmError {
    #[error("cannot encode transaction: {0}")]
    Encode(String),

    #[error("submission failed: {source}")]
    Submit {
        #[source]
        source: RpcError,
    },

    #[error("confirmation of tx {tx_hash} failed during {context}: {source}")]
    Transport {
        tx_hash: String,
        context: &'static str,
        #[source]
        source: RpcError,
    },

    #[error("tx {tx_hash} not executed before timeout round {timeout_round} (current round {current_round})")]
    Timeout {
        tx_hash: String,
        timeout_round: u64,
        current_round: u64,
    },

    #[error("confirmation of tx {tx_hash} cancelled")]
    Cancelled { tx_hash: String },
}

/// Submit `order` and wait for its execution proof.
///
/// The loop checks `cancel` before every poll and while sleeping; a `true`
/// value ends it with `ConfirmError::Cancelled`. The order's timeout round
/// bounds the wait: once the partition reaches it without a proof, the
/// transaction can no longer execute.
pub async fn confirm_transaction(
    rpc: &PartitionRpc,
    order: &TransactionOrder,
    poll_interval: Duration,
    mut cancel: watch::Receiver<bool>,
) -> Result<Proof, ConfirmError> {
    let local_hash = order
        .hash()
        .map_err(|e| ConfirmError::Encode(e.to_string()))?;
    let tx_hash = rpc
        .send_transaction(order)
        .await
        .map_err(|source| ConfirmError::Submit { source })?;
    let hash_hex = tx_hash.to_hex();
    if tx_hash != local_hash {
        log::warn!(
            "node reported tx hash {} but order hashes to {}",
            hash_hex,
            local_hash.to_hex()
        );
    }
    let timeout_round = order.timeout();
    log::info!(
        "submitted tx {} (type {}, unit {}, timeout round {})",
        hash_hex,
        order.tx_type(),
        order.unit_id(),
        timeout_round
    );

    let mut polls: u64 = 0;
    loop {
        if *cancel.borrow() {
            log::info!("confirmation of tx {} cancelled after {} polls", hash_hex, polls);
            return Err(ConfirmError::Cancelled { tx_hash: hash_hex });
        }
        polls += 1;

        let current_round = rpc
            .get_round_number()
            .await
            .map_err(|source| ConfirmError::Transport {
                tx_hash: hash_hex.clone(),
                context: "round lookup",
                source,
            })?;
        if current_round >= timeout_round {
            log::warn!(
                "tx {} timed out: round {} >= timeout {}",
                hash_hex,
                current_round,
                timeout_round
            );
            return Err(ConfirmError::Timeout {
                tx_hash: hash_hex,
                timeout_round,
                current_round,
            });
        }

        let proof = rpc
            .get_transaction_proof(&tx_hash)
            .await
            .map_err(|source| ConfirmError::Transport {
                tx_hash: hash_hex.clone(),
                context: "proof lookup",
                source,
            })?;
        if let Some(proof) = proof {
            log::info!(
                "tx {} confirmed in round <= {} (success: {}, fee {})",
                hash_hex,
                current_round,
                proof.tx_record.is_success(),
                proof.tx_record.actual_fee()
            );
            return Ok(proof);
        }
        log::debug!(
            "tx {} pending at round {} (poll {})",
            hash_hex,
            current_round,
            polls
        );

        tokio::select! {
            _ = tokio::time::sleep(poll_interval) => {}
            changed = cancel.changed() => {
                // Sender gone: nothing can cancel any more, keep the fixed cadence.
                if changed.is_err() {
                    tokio::time::sleep(poll_interval).await;
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::MockTransport;
    use crate::state::methods;
    use ledgerkit_types::cbor;
    use ledgerkit_types::constants::unit_type;
    use ledgerkit_types::{Bytes, ClientMetadata, Payload, TransactionRecord, TxProof, UnitId};
    use serde_json::{json, Value};
    use std::sync::atomic::{AtomicU64, Ordering};
    use std::sync::Arc;

    fn order(timeout: u64) -> TransactionOrder {
        TransactionOrder::new(Payload {
            network_id: 3,
            partition_id: 1,
            unit_id: UnitId::new(&[1u8; 32], unit_type::BILL),
            tx_type: 1,
            attributes: Bytes(vec![0x80]),
            state_lock: None,
            client_metadata: Some(ClientMetadata {
                timeout,
                max_transaction_fee: 1,
                fee_credit_record_id: None,
                reference_number: None,
            }),
        })
    }

    fn proof_json(order: &TransactionOrder) -> Value {
        let record = TransactionRecord {
            version: 1,
            transaction_order: order.clone(),
            server_metadata: None,
        };
        let proof = TxProof {
            version: 1,
            block_header_hash: Bytes(vec![5u8; 32]),
            chain: vec![],
            unicity_certificate: Bytes(vec![0x80]),
        };
        json!({
            "txRecord": Bytes(cbor::encode(&record).unwrap()).to_hex(),
            "txProof": Bytes(cbor::encode(&proof).unwrap()).to_hex(),
        })
    }

    /// Node at a fixed round that returns a proof from the `found_at`-th lookup on.
    fn node(order: &TransactionOrder, round: u64, found_at: u64) -> Arc<MockTransport> {
        let hash = order.hash().unwrap().to_hex();
        let proof = proof_json(order);
        let lookups = AtomicU64::new(0);
        Arc::new(MockTransport::new(move |method, _| match method {
            methods::SEND_TRANSACTION => Ok(json!(hash)),
            methods::GET_ROUND_INFO => Ok(json!({ "roundNumber": round.to_string() })),
            methods::GET_TRANSACTION_PROOF => {
                let n = lookups.fetch_add(1, Ordering::SeqCst) + 1;
                if n >= found_at {
                    Ok(proof.clone())
                } else {
                    Ok(Value::Null)
                }
            }
            other => panic!("unexpected method {}", other),
        }))
    }

    fn cancel_channel() -> (watch::Sender<bool>, watch::Receiver<bool>) {
        let _ = env_logger::builder().is_test(true).try_init();
        watch::channel(false)
    }

    #[tokio::test]
    async fn test_timeout_on_first_poll() {
        let o = order(100);
        let mock = node(&o, 100, 1);
        let rpc = PartitionRpc::new(mock.clone());
        let (_tx, rx) = cancel_channel();
        let err = confirm_transaction(&rpc, &o, Duration::from_millis(1), rx)
            .await
            .unwrap_err();
        match err {
            ConfirmError::Timeout {
                timeout_round,
                current_round,
                ..
            } => {
                assert_eq!(timeout_round, 100);
                assert_eq!(current_round, 100);
            }
            other => panic!("unexpected: {:?}", other),
        }
        assert_eq!(mock.count(methods::GET_TRANSACTION_PROOF), 0);
        assert_eq!(mock.count(methods::SEND_TRANSACTION), 1);
    }

    #[tokio::test]
    async fn test_success_on_second_poll() {
        let o = order(100);
        let mock = node(&o, 10, 2);
        let rpc = PartitionRpc::new(mock.clone());
        let (_tx, rx) = cancel_channel();
        let proof = confirm_transaction(&rpc, &o, Duration::from_millis(1), rx)
            .await
            .unwrap();
        assert_eq!(proof.order(), &o);
        assert_eq!(mock.count(methods::GET_ROUND_INFO), 2);
        assert_eq!(mock.count(methods::GET_TRANSACTION_PROOF), 2);
    }

    #[tokio::test]
    async fn test_cancelled_before_first_poll() {
        let o = order(100);
        let mock = node(&o, 10, 99);
        let rpc = PartitionRpc::new(mock.clone());
        let (tx, rx) = cancel_channel();
        tx.send(true).unwrap();
        let err = confirm_transaction(&rpc, &o, Duration::from_millis(1), rx)
            .await
            .unwrap_err();
        assert!(matches!(err, ConfirmError::Cancelled { .. }));
        assert_eq!(mock.count(methods::GET_ROUND_INFO), 0);
    }

    #[tokio::test]
    async fn test_cancel_interrupts_sleep() {
        let o = order(100);
        let mock = node(&o, 10, u64::MAX);
        let rpc = PartitionRpc::new(mock.clone());
        let (tx, rx) = cancel_channel();
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(20)).await;
            let _ = tx.send(true);
        });
        let started = std::time::Instant::now();
        let err = confirm_transaction(&rpc, &o, Duration::from_secs(60), rx)
            .await
            .unwrap_err();
        assert!(matches!(err, ConfirmError::Cancelled { .. }));
        assert!(started.elapsed() < Duration::from_secs(30));
        assert_eq!(mock.count(methods::GET_ROUND_INFO), 1);
    }

    #[tokio::test]
    async fn test_dropped_sender_keeps_polling() {
        let o = order(100);
        let mock = node(&o, 10, 3);
        let rpc = PartitionRpc::new(mock.clone());
        let (tx, rx) = cancel_channel();
        drop(tx);
        let proof = confirm_transaction(&rpc, &o, Duration::from_millis(1), rx).await;
        assert!(proof.is_ok());
        assert_eq!(mock.count(methods::GET_TRANSACTION_PROOF), 3);
    }

    #[tokio::test]
    async fn test_submit_failure() {
        let mock = Arc::new(MockTransport::new(|method, _| {
            Err(RpcError::Rpc {
                code: -32000,
                message: "invalid owner proof".into(),
                method: method.to_string(),
            })
        }));
        let rpc = PartitionRpc::new(mock);
        let (_tx, rx) = cancel_channel();
        let err = confirm_transaction(&rpc, &order(5), DEFAULT_POLL_INTERVAL, rx)
            .await
            .unwrap_err();
        assert!(matches!(err, ConfirmError::Submit { .. }));
    }

    #[tokio::test]
    async fn test_round_lookup_failure_is_transport_error() {
        let o = order(100);
        let hash = o.hash().unwrap().to_hex();
        let mock = Arc::new(MockTransport::new(move |method, _| match method {
            methods::SEND_TRANSACTION => Ok(json!(hash)),
            _ => Err(RpcError::NoResult {
                context: method.to_string(),
            }),
        }));
        let rpc = PartitionRpc::new(mock);
        let (_tx, rx) = cancel_channel();
        let err = confirm_transaction(&rpc, &o, Duration::from_millis(1), rx)
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            ConfirmError::Transport {
                context: "round lookup",
                ..
            }
        ));
    }
}
