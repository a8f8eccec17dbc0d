// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.

//! tally-kernel: a deterministic, single-epoch UTXO settlement engine.
//!
//! Given the currently spendable outputs and a batch of candidate
//! transactions, the engine accepts a mutually compatible, authorized subset
//! (first-fit or greedy max-fee) and produces the next ledger state.

pub mod config;
pub mod error;
pub mod types;
pub mod hash;
pub mod signature;
pub mod state;
pub mod validate;
pub mod builder;
pub mod settle;
pub mod snapshot;
pub mod proof;
pub mod replay;

pub use builder::TransactionBuilder;
pub use error::{LedgerError, Result};
pub use settle::{Accepted, SelectionPolicy, Settlement, SettlementEngine};
pub use state::{LedgerEntry, LedgerState};
pub use types::{Amount, AuthKey, Input, Output, OutputRef, Transaction, TxHash};
pub use validate::{is_valid, Rejection, TxValidator};

#[cfg(test)]
pub mod tests;
