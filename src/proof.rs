//! Epoch receipts.

// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
use serde::{Deserialize, Serialize};

use crate::settle::SelectionPolicy;
use crate::types::amount::Amount;
use crate::types::id::TxHash;

/// A record of one settled epoch.
///
/// Binds the starting ledger, the submitted batch and the selection policy
/// to the transactions accepted and the resulting ledger. Anyone holding the
/// starting ledger and the batch can replay the epoch and compare
/// (see [`crate::replay::verify_receipt`]).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct EpochReceipt {
    pub policy: SelectionPolicy,

    /// Canonical hash of the ledger before the epoch.
    #[serde(with = "hex")]
    pub pre_state_hash: [u8; 32],

    /// Hash of the candidate batch in submission order.
    #[serde(with = "hex")]
    pub batch_hash: [u8; 32],

    /// Accepted transactions in commit order.
    pub accepted: Vec<TxHash>,

    pub total_fee: Amount,

    /// Canonical hash of the ledger after the epoch.
    #[serde(with = "hex")]
    pub post_state_hash: [u8; 32],
}
