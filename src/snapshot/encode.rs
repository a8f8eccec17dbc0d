// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
//! Snapshot encoding.
//!
//! ```text
//! MAGIC "TLLY" (4 bytes)
//! schema version (u32 LE)
//! body length (u64 LE)
//! CRC-64 of body (u64 LE)
//! body: bincode (standard config) of the entry list, canonical order
//! ```

use crate::error::{LedgerError, Result};
use crate::state::ledger::LedgerState;

pub const MAGIC: &[u8; 4] = b"TLLY";
pub const SCHEMA_VERSION: u32 = 1;
pub const HEADER_LEN: usize = 4 + 4 + 8 + 8;

pub(crate) fn checksum(body: &[u8]) -> u64 {
    let mut digest = crc64fast::Digest::new();
    digest.write(body);
    digest.sum64()
}

pub fn encode_ledger(ledger: &LedgerState) -> Result<Vec<u8>> {
    let entries = ledger.to_entries();
    let body = bincode::serde::encode_to_vec(&entries, bincode::config::standard())
        .map_err(|e| LedgerError::Codec(e.to_string()))?;

    let mut buf = Vec::with_capacity(HEADER_LEN + body.len());
    buf.extend_from_slice(MAGIC);
    buf.extend_from_slice(&SCHEMA_VERSION.to_le_bytes());
    buf.extend_from_slice(&(body.len() as u64).to_le_bytes());
    buf.extend_from_slice(&checksum(&body).to_le_bytes());
    buf.extend_from_slice(&body);
    Ok(buf)
}
