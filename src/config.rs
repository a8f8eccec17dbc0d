// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
//! Configuration constants and validation knobs.

use serde::{Deserialize, Serialize};

/// Number of fractional decimal digits carried by [`crate::types::amount::Amount`].
pub const VALUE_DECIMALS: u32 = 8;

/// Base units per whole coin (10^VALUE_DECIMALS).
pub const VALUE_SCALE: i64 = 100_000_000;

/// Domain tag mixed into every transaction hash.
pub const TX_HASH_DOMAIN: &[u8] = b"tally/tx/v1";

/// Domain tag mixed into every per-input signing payload.
pub const SIGNING_DOMAIN: &[u8] = b"tally/sig/v1";

/// Domain tag mixed into the ledger state hash.
pub const STATE_HASH_DOMAIN: &[u8] = b"tally/state/v1";

/// Domain tag mixed into the batch hash recorded in epoch receipts.
pub const BATCH_HASH_DOMAIN: &[u8] = b"tally/batch/v1";

/// Which structurally degenerate transactions the validator admits.
///
/// A transaction without inputs creates value from nothing (only zero-valued
/// outputs can pass the balance rule) and two identical ones share a hash, so
/// they are refused unless explicitly enabled. A transaction without outputs
/// burns everything it spends and is admitted by default.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationRules {
    pub allow_empty_inputs: bool,
    pub allow_empty_outputs: bool,
}

impl Default for ValidationRules {
    fn default() -> Self {
        Self {
            allow_empty_inputs: false,
            allow_empty_outputs: true,
        }
    }
}
