// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
//! Shared fixtures: deterministic keys, genesis outputs, signed spends.

use ed25519_dalek::SigningKey;

use crate::builder::TransactionBuilder;
use crate::state::ledger::{LedgerEntry, LedgerState};
use crate::types::amount::Amount;
use crate::types::id::{AuthKey, OutputRef, TxHash};
use crate::types::tx::{Output, Transaction};

pub fn key(seed: u8) -> SigningKey {
    SigningKey::from_bytes(&[seed; 32])
}

pub fn auth(seed: u8) -> AuthKey {
    AuthKey::from(&key(seed).verifying_key())
}

pub fn coins(n: i64) -> Amount {
    Amount::from_coins(n).unwrap()
}

/// A pre-existing output reference that no transaction in the tests hashes to.
pub fn genesis_ref(n: u8) -> OutputRef {
    let mut bytes = [0xA0; 32];
    bytes[0] = n;
    OutputRef::new(TxHash(bytes), 0)
}

/// Ledger holding `(reference, value in coins, owner seed)` entries.
pub fn ledger_with(entries: &[(OutputRef, i64, u8)]) -> LedgerState {
    LedgerState::from_entries(entries.iter().map(|&(outpoint, value, owner)| LedgerEntry {
        outpoint,
        output: Output::new(coins(value), auth(owner)),
    }))
    .unwrap()
}

/// Spends `inputs` (reference, signer seed) into `outputs` (value in coins,
/// recipient seed), signing each input with its signer.
pub fn spend(inputs: &[(OutputRef, u8)], outputs: &[(i64, u8)]) -> Transaction {
    spend_amounts(
        inputs,
        &outputs
            .iter()
            .map(|&(value, owner)| (coins(value), owner))
            .collect::<Vec<_>>(),
    )
}

pub fn spend_amounts(inputs: &[(OutputRef, u8)], outputs: &[(Amount, u8)]) -> Transaction {
    let mut builder = TransactionBuilder::new();
    for &(prev, _) in inputs {
        builder = builder.input(prev);
    }
    for &(value, owner) in outputs {
        builder = builder.output(value, auth(owner));
    }
    for (index, &(_, signer)) in inputs.iter().enumerate() {
        assert!(builder.sign_input(index, &key(signer)));
    }
    builder.build()
}
