// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
//! On-disk formats used by the CLI.
//!
//! Ledgers are JSON (`{"outputs": [...]}`) or binary snapshots, told apart by
//! the snapshot magic. Batches and receipts are always JSON.

use std::fs;
use std::path::Path;

use anyhow::Context;
use serde::{Deserialize, Serialize};
use tally_kernel::proof::EpochReceipt;
use tally_kernel::snapshot::encode::MAGIC;
use tally_kernel::snapshot::{decode_ledger, encode_ledger};
use tally_kernel::{LedgerEntry, LedgerState, Transaction};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LedgerFile {
    pub outputs: Vec<LedgerEntry>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BatchFile {
    pub transactions: Vec<Transaction>,
}

fn write_json<T: Serialize>(path: &Path, value: &T) -> anyhow::Result<()> {
    let json = serde_json::to_string_pretty(value)?;
    fs::write(path, json).with_context(|| format!("failed to write {}", path.display()))
}

pub fn load_ledger(path: &Path) -> anyhow::Result<LedgerState> {
    let bytes = fs::read(path).with_context(|| format!("failed to read ledger {}", path.display()))?;
    if bytes.starts_with(MAGIC) {
        return decode_ledger(&bytes)
            .with_context(|| format!("invalid snapshot {}", path.display()));
    }
    let file: LedgerFile = serde_json::from_slice(&bytes)
        .with_context(|| format!("invalid ledger JSON {}", path.display()))?;
    let ledger = LedgerState::from_entries(file.outputs)
        .with_context(|| format!("inconsistent ledger {}", path.display()))?;
    ledger
        .check_invariants()
        .with_context(|| format!("inconsistent ledger {}", path.display()))?;
    Ok(ledger)
}

pub fn save_ledger(path: &Path, ledger: &LedgerState) -> anyhow::Result<()> {
    write_json(path, &LedgerFile { outputs: ledger.to_entries() })
}

pub fn save_snapshot(path: &Path, ledger: &LedgerState) -> anyhow::Result<()> {
    let bytes = encode_ledger(ledger)?;
    fs::write(path, bytes).with_context(|| format!("failed to write {}", path.display()))
}

pub fn load_batch(path: &Path) -> anyhow::Result<Vec<Transaction>> {
    let bytes = fs::read(path).with_context(|| format!("failed to read batch {}", path.display()))?;
    let file: BatchFile = serde_json::from_slice(&bytes)
        .with_context(|| format!("invalid batch JSON {}", path.display()))?;
    Ok(file.transactions)
}

pub fn save_batch(path: &Path, transactions: &[Transaction]) -> anyhow::Result<()> {
    write_json(path, &BatchFile { transactions: transactions.to_vec() })
}

pub fn load_receipt(path: &Path) -> anyhow::Result<EpochReceipt> {
    let bytes = fs::read(path).with_context(|| format!("failed to read receipt {}", path.display()))?;
    serde_json::from_slice(&bytes).with_context(|| format!("invalid receipt JSON {}", path.display()))
}

pub fn save_receipt(path: &Path, receipt: &EpochReceipt) -> anyhow::Result<()> {
    write_json(path, receipt)
}
