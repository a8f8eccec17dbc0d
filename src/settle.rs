// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
//! Epoch settlement.
//!
//! The engine owns a private copy of the ledger. Each epoch runs against a
//! working copy of that ledger and is published only when it completes, so a
//! structural failure mid-epoch leaves the engine's ledger untouched.

use core::fmt;
use core::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::error::{LedgerError, Result};
use crate::hash::{batch_hash, ledger_state_hash};
use crate::proof::EpochReceipt;
use crate::signature::{Ed25519Verifier, SignatureVerifier};
use crate::state::ledger::LedgerState;
use crate::types::amount::Amount;
use crate::types::id::TxHash;
use crate::types::tx::Transaction;
use crate::validate::TxValidator;

/// How an epoch picks among currently valid candidates.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SelectionPolicy {
    /// Commit every valid candidate in batch order; rescan until a pass
    /// commits nothing.
    #[default]
    FirstFit,
    /// Commit the single highest-fee valid candidate per round (earliest
    /// batch index on ties); rescan until nothing is valid.
    ///
    /// Greedy per round. When candidates conflict through shared inputs, one
    /// high-fee transaction can shut out several whose combined fee is
    /// larger, so the epoch total is not guaranteed to be the maximum.
    MaxFee,
}

impl SelectionPolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            SelectionPolicy::FirstFit => "first-fit",
            SelectionPolicy::MaxFee => "max-fee",
        }
    }
}

impl fmt::Display for SelectionPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown selection policy {0:?} (expected first-fit or max-fee)")]
pub struct ParsePolicyError(pub String);

impl FromStr for SelectionPolicy {
    type Err = ParsePolicyError;

    fn from_str(s: &str) -> core::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('_', "-").as_str() {
            "first-fit" | "firstfit" => Ok(SelectionPolicy::FirstFit),
            "max-fee" | "maxfee" => Ok(SelectionPolicy::MaxFee),
            _ => Err(ParsePolicyError(s.to_string())),
        }
    }
}

/// A committed transaction with its position in the submitted batch.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Accepted {
    pub batch_index: usize,
    pub fee: Amount,
    pub tx: Transaction,
}

/// Result of one epoch.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Settlement {
    /// Accepted transactions in commit order.
    pub accepted: Vec<Accepted>,
    pub total_fee: Amount,
    pub receipt: EpochReceipt,
}

impl Settlement {
    pub fn transactions(&self) -> Vec<Transaction> {
        self.accepted.iter().map(|a| a.tx.clone()).collect()
    }

    pub fn hashes(&self) -> Vec<TxHash> {
        self.accepted.iter().map(|a| a.tx.hash()).collect()
    }
}

pub struct SettlementEngine<V = Ed25519Verifier> {
    ledger: LedgerState,
    validator: TxValidator<V>,
}

impl SettlementEngine {
    /// Starts from a deep copy of `ledger` with default validation.
    pub fn new(ledger: &LedgerState) -> Self {
        Self::with_validator(ledger, TxValidator::new())
    }
}

impl<V: SignatureVerifier> SettlementEngine<V> {
    pub fn with_validator(ledger: &LedgerState, validator: TxValidator<V>) -> Self {
        Self {
            ledger: ledger.clone(),
            validator,
        }
    }

    pub fn ledger(&self) -> &LedgerState {
        &self.ledger
    }

    pub fn into_ledger(self) -> LedgerState {
        self.ledger
    }

    /// Whether `tx` is valid against the current (last published) ledger.
    pub fn is_valid(&self, tx: &Transaction) -> bool {
        self.validator.is_valid(tx, &self.ledger)
    }

    /// Settles one epoch and publishes the resulting ledger.
    ///
    /// On error the published ledger is unchanged.
    pub fn settle(&mut self, batch: &[Transaction], policy: SelectionPolicy) -> Result<Settlement> {
        let pre_state_hash = ledger_state_hash(&self.ledger);
        let mut working = self.ledger.clone();

        let run = match policy {
            SelectionPolicy::FirstFit => first_fit(&self.validator, &mut working, batch),
            SelectionPolicy::MaxFee => max_fee(&self.validator, &mut working, batch),
        };
        let accepted = match run {
            Ok(accepted) => accepted,
            Err(err) => {
                warn!(%policy, batch = batch.len(), error = %err, "epoch aborted");
                return Err(err);
            }
        };

        let total_fee =
            Amount::checked_sum(accepted.iter().map(|a| a.fee)).ok_or(LedgerError::Overflow)?;
        let receipt = EpochReceipt {
            policy,
            pre_state_hash,
            batch_hash: batch_hash(batch),
            accepted: accepted.iter().map(|a| a.tx.hash()).collect(),
            total_fee,
            post_state_hash: ledger_state_hash(&working),
        };

        info!(
            %policy,
            candidates = batch.len(),
            accepted = accepted.len(),
            %total_fee,
            utxos = working.len(),
            "epoch settled"
        );

        self.ledger = working;
        Ok(Settlement {
            accepted,
            total_fee,
            receipt,
        })
    }

    pub fn handle_first_fit(&mut self, batch: &[Transaction]) -> Result<Vec<Transaction>> {
        Ok(self.settle(batch, SelectionPolicy::FirstFit)?.transactions())
    }

    pub fn handle_max_fee(&mut self, batch: &[Transaction]) -> Result<Vec<Transaction>> {
        Ok(self.settle(batch, SelectionPolicy::MaxFee)?.transactions())
    }
}

fn first_fit<V: SignatureVerifier>(
    validator: &TxValidator<V>,
    ledger: &mut LedgerState,
    batch: &[Transaction],
) -> Result<Vec<Accepted>> {
    let mut added = vec![false; batch.len()];
    let mut accepted = Vec::new();

    loop {
        let mut progressed = false;
        for (index, tx) in batch.iter().enumerate() {
            if added[index] {
                continue;
            }
            let Some(fee) = validator.fee(tx, ledger) else {
                continue;
            };
            ledger.commit(tx)?;
            added[index] = true;
            progressed = true;
            accepted.push(Accepted {
                batch_index: index,
                fee,
                tx: tx.clone(),
            });
        }
        if !progressed {
            break;
        }
    }

    Ok(accepted)
}

fn max_fee<V: SignatureVerifier>(
    validator: &TxValidator<V>,
    ledger: &mut LedgerState,
    batch: &[Transaction],
) -> Result<Vec<Accepted>> {
    // Batch indices still pending, kept in submission order.
    let mut remaining: Vec<usize> = (0..batch.len()).collect();
    let mut accepted = Vec::new();

    loop {
        let mut best: Option<(usize, Amount)> = None;
        for (pos, &index) in remaining.iter().enumerate() {
            let Some(fee) = validator.fee(&batch[index], ledger) else {
                continue;
            };
            // Strictly greater: the earliest candidate keeps a tie.
            if best.map_or(true, |(_, best_fee)| fee > best_fee) {
                best = Some((pos, fee));
            }
        }

        let Some((pos, fee)) = best else {
            break;
        };
        let index = remaining.remove(pos);
        let tx = &batch[index];
        ledger.commit(tx)?;
        accepted.push(Accepted {
            batch_index: index,
            fee,
            tx: tx.clone(),
        });
    }

    Ok(accepted)
}
