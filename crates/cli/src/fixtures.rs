// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
use std::fs;
use std::path::{Path, PathBuf};

use ed25519_dalek::SigningKey;
use tally_kernel::{
    Amount, AuthKey, LedgerEntry, LedgerState, Output, OutputRef, Transaction, TransactionBuilder,
    TxHash,
};

use crate::files;

pub struct DemoPaths {
    pub ledger: PathBuf,
    pub snapshot: PathBuf,
    pub batch: PathBuf,
}

pub const ALICE: u8 = 1;
pub const BOB: u8 = 2;
pub const CAROL: u8 = 3;

/// Id of the pre-existing transaction that funds the demo ledger.
pub const GENESIS: TxHash = TxHash([0xA1; 32]);

pub fn demo_key(seed: u8) -> SigningKey {
    SigningKey::from_bytes(&[seed; 32])
}

fn owner(seed: u8) -> AuthKey {
    AuthKey::from(&demo_key(seed).verifying_key())
}

fn value(text: &str) -> anyhow::Result<Amount> {
    text.parse().map_err(anyhow::Error::from)
}

/// Alice holds 10 and Bob holds 5.
pub fn demo_ledger() -> anyhow::Result<LedgerState> {
    let entries = [
        (OutputRef::new(GENESIS, 0), value("10")?, ALICE),
        (OutputRef::new(GENESIS, 1), value("5")?, BOB),
    ];
    Ok(LedgerState::from_entries(entries.into_iter().map(|(outpoint, value, seed)| {
        LedgerEntry {
            outpoint,
            output: Output::new(value, owner(seed)),
        }
    }))?)
}

/// Six candidates: three settle, one double-spends, one mints from nothing
/// and one carries a signature from the wrong key.
pub fn demo_batch() -> anyhow::Result<Vec<Transaction>> {
    let alice_coin = OutputRef::new(GENESIS, 0);
    let bob_coin = OutputRef::new(GENESIS, 1);

    let pay_carol = TransactionBuilder::new()
        .input(alice_coin)
        .output(value("7")?, owner(CAROL))
        .sign_all(&demo_key(ALICE))
        .build();

    let respend = TransactionBuilder::new()
        .input(alice_coin)
        .output(value("9")?, owner(BOB))
        .sign_all(&demo_key(ALICE))
        .build();

    let pay_alice = TransactionBuilder::new()
        .input(bob_coin)
        .output(value("4")?, owner(ALICE))
        .sign_all(&demo_key(BOB))
        .build();

    let carol_forward = TransactionBuilder::new()
        .input(OutputRef::new(pay_carol.hash(), 0))
        .output(value("6.5")?, owner(BOB))
        .sign_all(&demo_key(CAROL))
        .build();

    let mint = TransactionBuilder::new().output(value("5")?, owner(CAROL)).build();

    let forged = TransactionBuilder::new()
        .input(bob_coin)
        .output(value("1")?, owner(ALICE))
        .sign_all(&demo_key(ALICE))
        .build();

    Ok(vec![pay_carol, respend, pay_alice, carol_forward, mint, forged])
}

/// Writes `ledger.json`, `ledger.snap` and `batch.json` into `dir`.
pub fn generate_demo_scenario(dir: &Path) -> anyhow::Result<DemoPaths> {
    if !dir.exists() {
        fs::create_dir_all(dir)?;
    }

    let ledger = demo_ledger()?;
    let paths = DemoPaths {
        ledger: dir.join("ledger.json"),
        snapshot: dir.join("ledger.snap"),
        batch: dir.join("batch.json"),
    };
    files::save_ledger(&paths.ledger, &ledger)?;
    files::save_snapshot(&paths.snapshot, &ledger)?;
    files::save_batch(&paths.batch, &demo_batch()?)?;
    Ok(paths)
}
