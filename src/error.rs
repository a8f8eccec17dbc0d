// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
//! Error types.

use thiserror::Error;

use crate::types::id::OutputRef;

/// Structural failures of the ledger.
///
/// These are never validity verdicts: an unauthorized or unbalanced
/// transaction is reported through [`crate::validate::Rejection`]. A
/// `LedgerError` on the commit path means the state diverged from what the
/// validator saw and aborts the epoch.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LedgerError {
    #[error("output not found: {0}")]
    NotFound(OutputRef),

    #[error("output already present: {0}")]
    Conflict(OutputRef),

    #[error("value arithmetic overflow")]
    Overflow,

    #[error("invalid snapshot: {0}")]
    InvalidSnapshot(String),

    #[error("codec error: {0}")]
    Codec(String),
}

pub type Result<T> = core::result::Result<T, LedgerError>;
