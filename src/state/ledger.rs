// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
//! Ledger State definition.

use std::collections::BTreeMap;

use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{LedgerError, Result};
use crate::types::amount::Amount;
use crate::types::id::OutputRef;
use crate::types::tx::{Output, Transaction};

/// One spendable unit as it appears in snapshots and ledger files.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerEntry {
    pub outpoint: OutputRef,
    pub output: Output,
}

/// The set of currently spendable outputs.
///
/// Backed by an ordered map so iteration (and therefore hashing and
/// snapshotting) is deterministic. `Clone` is a deep copy: the clone shares
/// nothing with its source.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LedgerState {
    pub(crate) utxos: BTreeMap<OutputRef, Output>,
}

impl LedgerState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a ledger from an initial snapshot. Duplicate references are a
    /// `Conflict`.
    pub fn from_entries<I: IntoIterator<Item = LedgerEntry>>(entries: I) -> Result<Self> {
        let mut ledger = Self::new();
        for entry in entries {
            ledger.insert(entry.outpoint, entry.output)?;
        }
        Ok(ledger)
    }

    // --- Read APIs ---

    pub fn contains(&self, outpoint: &OutputRef) -> bool {
        self.utxos.contains_key(outpoint)
    }

    pub fn get(&self, outpoint: &OutputRef) -> Option<&Output> {
        self.utxos.get(outpoint)
    }

    pub fn len(&self) -> usize {
        self.utxos.len()
    }

    pub fn is_empty(&self) -> bool {
        self.utxos.is_empty()
    }

    /// Iterates over all entries in canonical (reference) order.
    pub fn entries(&self) -> impl Iterator<Item = (&OutputRef, &Output)> {
        self.utxos.iter()
    }

    /// Owned copy of the entries, in canonical order.
    pub fn to_entries(&self) -> Vec<LedgerEntry> {
        self.utxos
            .iter()
            .map(|(outpoint, output)| LedgerEntry {
                outpoint: *outpoint,
                output: *output,
            })
            .collect()
    }

    pub fn total_value(&self) -> Result<Amount> {
        Amount::checked_sum(self.utxos.values().map(|o| o.value)).ok_or(LedgerError::Overflow)
    }

    // --- Write Logic ---

    pub fn insert(&mut self, outpoint: OutputRef, output: Output) -> Result<()> {
        if self.utxos.contains_key(&outpoint) {
            return Err(LedgerError::Conflict(outpoint));
        }
        self.utxos.insert(outpoint, output);
        Ok(())
    }

    pub fn remove(&mut self, outpoint: &OutputRef) -> Result<Output> {
        self.utxos
            .remove(outpoint)
            .ok_or(LedgerError::NotFound(*outpoint))
    }

    /// Applies a transaction: consumes its inputs and adds its outputs under
    /// its own hash.
    ///
    /// All-or-nothing. Every precondition is checked before the first
    /// mutation, so on error the ledger is exactly as it was. A reference
    /// consumed twice by the same transaction reports `NotFound` for the
    /// second claim; a new reference that already exists (even one this
    /// transaction is consuming) reports `Conflict`.
    pub fn commit(&mut self, tx: &Transaction) -> Result<()> {
        let mut claimed: FxHashSet<OutputRef> =
            FxHashSet::with_capacity_and_hasher(tx.inputs().len(), Default::default());
        for input in tx.inputs() {
            if !self.utxos.contains_key(&input.prev) || !claimed.insert(input.prev) {
                return Err(LedgerError::NotFound(input.prev));
            }
        }
        for outpoint in tx.output_refs() {
            if self.utxos.contains_key(&outpoint) {
                return Err(LedgerError::Conflict(outpoint));
            }
        }

        for input in tx.inputs() {
            self.remove(&input.prev)?;
        }
        for (outpoint, output) in tx.output_refs().zip(tx.outputs()) {
            self.insert(outpoint, *output)?;
        }

        debug!(
            tx = %tx.hash().short(),
            consumed = tx.inputs().len(),
            created = tx.outputs().len(),
            "committed transaction"
        );
        Ok(())
    }

    // --- Invariant Checker ---

    /// Checks that no held output is negative and the total is representable.
    pub fn check_invariants(&self) -> Result<()> {
        if let Some((outpoint, _)) = self.utxos.iter().find(|(_, o)| o.value.is_negative()) {
            return Err(LedgerError::InvalidSnapshot(format!(
                "negative output value at {outpoint}"
            )));
        }
        self.total_value()?;
        Ok(())
    }
}
