//! Deterministic Hashing and Signing Payloads.

// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
use crate::config::{BATCH_HASH_DOMAIN, SIGNING_DOMAIN, STATE_HASH_DOMAIN, TX_HASH_DOMAIN};
use crate::state::ledger::LedgerState;
use crate::types::id::{OutputRef, TxHash};
use crate::types::tx::{Input, Output, Transaction};

fn update_ref(hasher: &mut blake3::Hasher, r: &OutputRef) {
    hasher.update(r.tx_hash.as_bytes());
    hasher.update(&r.index.to_le_bytes());
}

fn update_output(hasher: &mut blake3::Hasher, output: &Output) {
    hasher.update(&output.value.units().to_le_bytes());
    hasher.update(output.key.as_bytes());
}

/// Computes the identity of a transaction.
///
/// # Hash Input Structure
/// ```text
/// "tally/tx/v1"
/// input count (u32 LE)
/// For each input:
///   prev tx_hash (32 bytes)
///   prev index (u32 LE)
///   signature length (u32 LE)
///   signature bytes
/// output count (u32 LE)
/// For each output:
///   value (i64 LE, base units)
///   key (32 bytes)
/// ```
///
/// Signatures are covered, so the hash is only meaningful once every input
/// has been signed.
pub fn tx_hash(inputs: &[Input], outputs: &[Output]) -> TxHash {
    let mut hasher = blake3::Hasher::new();
    hasher.update(TX_HASH_DOMAIN);

    hasher.update(&(inputs.len() as u32).to_le_bytes());
    for input in inputs {
        update_ref(&mut hasher, &input.prev);
        hasher.update(&(input.signature.len() as u32).to_le_bytes());
        hasher.update(&input.signature);
    }

    hasher.update(&(outputs.len() as u32).to_le_bytes());
    for output in outputs {
        update_output(&mut hasher, output);
    }

    TxHash(*hasher.finalize().as_bytes())
}

/// Builds the exact bytes the owner of input `index` signs.
///
/// Covers the position being signed, every input reference and every output.
/// No signature is included, so inputs can be signed in any order, yet
/// altering any other field invalidates every signature.
pub fn signing_payload<'a, I>(prevs: I, outputs: &[Output], index: usize) -> Vec<u8>
where
    I: IntoIterator<Item = &'a OutputRef>,
    I::IntoIter: ExactSizeIterator,
{
    let prevs = prevs.into_iter();
    let mut buf = Vec::with_capacity(
        SIGNING_DOMAIN.len() + 8 + prevs.len() * 36 + 4 + outputs.len() * 40,
    );

    buf.extend_from_slice(SIGNING_DOMAIN);
    buf.extend_from_slice(&(index as u32).to_le_bytes());

    buf.extend_from_slice(&(prevs.len() as u32).to_le_bytes());
    for prev in prevs {
        buf.extend_from_slice(prev.tx_hash.as_bytes());
        buf.extend_from_slice(&prev.index.to_le_bytes());
    }

    buf.extend_from_slice(&(outputs.len() as u32).to_le_bytes());
    for output in outputs {
        buf.extend_from_slice(&output.value.units().to_le_bytes());
        buf.extend_from_slice(output.key.as_bytes());
    }

    buf
}

/// Computes the canonical hash of a ledger state.
///
/// Entries are visited in reference order, so two ledgers holding the same
/// outputs hash identically regardless of how they were built.
pub fn ledger_state_hash(ledger: &LedgerState) -> [u8; 32] {
    let mut hasher = blake3::Hasher::new();
    hasher.update(STATE_HASH_DOMAIN);
    hasher.update(&(ledger.len() as u64).to_le_bytes());

    for (outpoint, output) in ledger.entries() {
        update_ref(&mut hasher, outpoint);
        update_output(&mut hasher, output);
    }

    *hasher.finalize().as_bytes()
}

/// Hash of a candidate batch, in submission order.
pub fn batch_hash(batch: &[Transaction]) -> [u8; 32] {
    let mut hasher = blake3::Hasher::new();
    hasher.update(BATCH_HASH_DOMAIN);
    hasher.update(&(batch.len() as u64).to_le_bytes());
    for tx in batch {
        hasher.update(tx.hash().as_bytes());
    }
    *hasher.finalize().as_bytes()
}
