//! Deterministic Epoch Replay.

// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.

use crate::error::Result;
use crate::hash::{batch_hash, ledger_state_hash};
use crate::proof::EpochReceipt;
use crate::settle::{SelectionPolicy, SettlementEngine};
use crate::signature::SignatureVerifier;
use crate::snapshot::decode::decode_ledger;
use crate::state::ledger::LedgerState;
use crate::types::tx::Transaction;
use crate::validate::TxValidator;

/// A field of a receipt that replay did not reproduce.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReceiptMismatch {
    PreState,
    Batch,
    Accepted,
    TotalFee,
    PostState,
}

/// Settles `batch` on top of a snapshot and returns the receipt.
///
/// An empty snapshot buffer means an empty starting ledger.
pub fn replay_epoch<V: SignatureVerifier>(
    snapshot_bytes: &[u8],
    batch: &[Transaction],
    policy: SelectionPolicy,
    validator: TxValidator<V>,
) -> Result<EpochReceipt> {
    let ledger = if snapshot_bytes.is_empty() {
        LedgerState::new()
    } else {
        decode_ledger(snapshot_bytes)?
    };
    let mut engine = SettlementEngine::with_validator(&ledger, validator);
    Ok(engine.settle(batch, policy)?.receipt)
}

/// Replays the epoch a receipt describes and lists every field that differs.
///
/// An empty list means the receipt is reproduced exactly. Structural errors
/// during replay are returned as errors, not mismatches.
pub fn verify_receipt<V: SignatureVerifier>(
    pre: &LedgerState,
    batch: &[Transaction],
    receipt: &EpochReceipt,
    validator: TxValidator<V>,
) -> Result<Vec<ReceiptMismatch>> {
    let mut mismatches = Vec::new();
    if ledger_state_hash(pre) != receipt.pre_state_hash {
        mismatches.push(ReceiptMismatch::PreState);
    }
    if batch_hash(batch) != receipt.batch_hash {
        mismatches.push(ReceiptMismatch::Batch);
    }

    let mut engine = SettlementEngine::with_validator(pre, validator);
    let replayed = engine.settle(batch, receipt.policy)?.receipt;

    if replayed.accepted != receipt.accepted {
        mismatches.push(ReceiptMismatch::Accepted);
    }
    if replayed.total_fee != receipt.total_fee {
        mismatches.push(ReceiptMismatch::TotalFee);
    }
    if replayed.post_state_hash != receipt.post_state_hash {
        mismatches.push(ReceiptMismatch::PostState);
    }
    Ok(mismatches)
}
