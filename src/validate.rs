// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
//! Transaction validation against a ledger snapshot.
//!
//! # Rules
//!
//! A transaction is valid iff:
//! 1. every referenced output exists in the ledger,
//! 2. no output is claimed twice by the same transaction,
//! 3. every input signature verifies against the referenced output's key
//!    over that input's signing payload,
//! 4. no output value is negative,
//! 5. the inputs cover the outputs. The difference is the fee and is burned.
//!
//! A transaction whose outputs are already in the ledger is also refused, so
//! committing an accepted transaction cannot hit a `Conflict`.
//!
//! Validation is a pure query. Invalidity is an ordinary verdict
//! ([`Rejection`]), not a [`crate::error::LedgerError`].

use rustc_hash::FxHashSet;
use thiserror::Error;
use tracing::trace;

use crate::config::ValidationRules;
use crate::signature::{Ed25519Verifier, SignatureVerifier};
use crate::state::ledger::LedgerState;
use crate::types::amount::Amount;
use crate::types::id::OutputRef;
use crate::types::tx::Transaction;

/// Why a transaction was refused. Reports the first rule violated.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Rejection {
    #[error("transaction has no inputs")]
    EmptyInputs,

    #[error("transaction has no outputs")]
    EmptyOutputs,

    #[error("output {index} has negative value {value}")]
    NegativeOutput { index: usize, value: Amount },

    #[error("input {index} claims {outpoint} more than once")]
    DuplicateInput { index: usize, outpoint: OutputRef },

    #[error("input {index} references unknown output {outpoint}")]
    MissingInput { index: usize, outpoint: OutputRef },

    #[error("input {index} signature does not verify")]
    BadSignature { index: usize },

    #[error("output {outpoint} already exists")]
    OutputExists { outpoint: OutputRef },

    #[error("outputs {outputs} exceed inputs {inputs}")]
    Overspend { inputs: Amount, outputs: Amount },

    #[error("value arithmetic overflow")]
    Overflow,
}

/// Validates transactions with a pluggable signature verifier.
#[derive(Clone, Debug, Default)]
pub struct TxValidator<V = Ed25519Verifier> {
    verifier: V,
    rules: ValidationRules,
}

impl TxValidator {
    pub fn new() -> Self {
        Self::default()
    }
}

impl<V: SignatureVerifier> TxValidator<V> {
    pub fn with_verifier(verifier: V, rules: ValidationRules) -> Self {
        Self { verifier, rules }
    }

    pub fn rules(&self) -> &ValidationRules {
        &self.rules
    }

    /// Full verdict: the fee on success, the first violated rule otherwise.
    pub fn check(&self, tx: &Transaction, ledger: &LedgerState) -> Result<Amount, Rejection> {
        if tx.inputs().is_empty() && !self.rules.allow_empty_inputs {
            return Err(Rejection::EmptyInputs);
        }
        if tx.outputs().is_empty() && !self.rules.allow_empty_outputs {
            return Err(Rejection::EmptyOutputs);
        }

        // Rule 4, independent of balance.
        let mut output_sum = Amount::ZERO;
        for (index, output) in tx.outputs().iter().enumerate() {
            if output.value.is_negative() {
                return Err(Rejection::NegativeOutput {
                    index,
                    value: output.value,
                });
            }
            output_sum = output_sum
                .checked_add(output.value)
                .ok_or(Rejection::Overflow)?;
        }

        // Rules 1-3.
        let mut claimed: FxHashSet<OutputRef> =
            FxHashSet::with_capacity_and_hasher(tx.inputs().len(), Default::default());
        let mut input_sum = Amount::ZERO;
        for (index, input) in tx.inputs().iter().enumerate() {
            if !claimed.insert(input.prev) {
                return Err(Rejection::DuplicateInput {
                    index,
                    outpoint: input.prev,
                });
            }
            let spent = ledger.get(&input.prev).ok_or(Rejection::MissingInput {
                index,
                outpoint: input.prev,
            })?;
            let payload = tx.signing_payload(index);
            if !self.verifier.verify(&spent.key, &payload, &input.signature) {
                return Err(Rejection::BadSignature { index });
            }
            input_sum = input_sum
                .checked_add(spent.value)
                .ok_or(Rejection::Overflow)?;
        }

        // A repeat of a committed transaction would land on its outputs.
        if let Some(outpoint) = tx.output_refs().find(|r| ledger.contains(r)) {
            return Err(Rejection::OutputExists { outpoint });
        }

        // Rule 5.
        if output_sum > input_sum {
            return Err(Rejection::Overspend {
                inputs: input_sum,
                outputs: output_sum,
            });
        }
        input_sum.checked_sub(output_sum).ok_or(Rejection::Overflow)
    }

    pub fn is_valid(&self, tx: &Transaction, ledger: &LedgerState) -> bool {
        self.fee(tx, ledger).is_some()
    }

    /// Fee of a valid transaction, `None` if it is invalid against `ledger`.
    pub fn fee(&self, tx: &Transaction, ledger: &LedgerState) -> Option<Amount> {
        match self.check(tx, ledger) {
            Ok(fee) => Some(fee),
            Err(reason) => {
                trace!(tx = %tx.hash().short(), %reason, "rejected transaction");
                None
            }
        }
    }
}

/// Validates with the default ed25519 verifier and default rules.
pub fn is_valid(tx: &Transaction, ledger: &LedgerState) -> bool {
    TxValidator::new().is_valid(tx, ledger)
}
