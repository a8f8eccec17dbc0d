// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
//! Snapshot decoding.

use crate::error::{LedgerError, Result};
use crate::snapshot::encode::{checksum, HEADER_LEN, MAGIC, SCHEMA_VERSION};
use crate::state::ledger::{LedgerEntry, LedgerState};

fn read_u32(buf: &[u8], offset: &mut usize) -> Result<u32> {
    let bytes = buf
        .get(*offset..*offset + 4)
        .and_then(|s| s.try_into().ok())
        .ok_or_else(|| LedgerError::InvalidSnapshot("truncated header".into()))?;
    *offset += 4;
    Ok(u32::from_le_bytes(bytes))
}

fn read_u64(buf: &[u8], offset: &mut usize) -> Result<u64> {
    let bytes = buf
        .get(*offset..*offset + 8)
        .and_then(|s| s.try_into().ok())
        .ok_or_else(|| LedgerError::InvalidSnapshot("truncated header".into()))?;
    *offset += 8;
    Ok(u64::from_le_bytes(bytes))
}

/// Restores a ledger, rejecting bad magic, unknown schema, checksum
/// mismatch, trailing bytes and duplicate entries.
pub fn decode_ledger(buf: &[u8]) -> Result<LedgerState> {
    if buf.len() < HEADER_LEN {
        return Err(LedgerError::InvalidSnapshot("truncated header".into()));
    }
    if &buf[..4] != MAGIC {
        return Err(LedgerError::InvalidSnapshot("bad magic".into()));
    }
    let mut offset = 4;

    let schema = read_u32(buf, &mut offset)?;
    if schema != SCHEMA_VERSION {
        return Err(LedgerError::InvalidSnapshot(format!(
            "unsupported schema version {schema}"
        )));
    }

    let body_len = read_u64(buf, &mut offset)?;
    let stored = read_u64(buf, &mut offset)?;
    let body = &buf[offset..];
    if body.len() as u64 != body_len {
        return Err(LedgerError::InvalidSnapshot(format!(
            "body length {} does not match header {body_len}",
            body.len()
        )));
    }

    let computed = checksum(body);
    if computed != stored {
        return Err(LedgerError::InvalidSnapshot(format!(
            "checksum mismatch: expected {stored:016x}, found {computed:016x}"
        )));
    }

    let (entries, read): (Vec<LedgerEntry>, usize) =
        bincode::serde::decode_from_slice(body, bincode::config::standard())
            .map_err(|e| LedgerError::Codec(e.to_string()))?;
    if read != body.len() {
        return Err(LedgerError::InvalidSnapshot("trailing bytes after entries".into()));
    }

    let ledger = LedgerState::from_entries(entries)?;
    ledger.check_invariants()?;
    Ok(ledger)
}
