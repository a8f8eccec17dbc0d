// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
use crate::error::LedgerError;
use crate::hash::ledger_state_hash;
use crate::settle::{SelectionPolicy, SettlementEngine};
use crate::snapshot::decode::decode_ledger;
use crate::snapshot::encode::{encode_ledger, HEADER_LEN, MAGIC};
use crate::state::ledger::LedgerState;
use crate::tests::helpers::{genesis_ref, ledger_with, spend};

fn sample_ledger() -> LedgerState {
    let ledger = ledger_with(&[(genesis_ref(1), 10, 1), (genesis_ref(2), 3, 2)]);
    let mut engine = SettlementEngine::new(&ledger);
    engine
        .settle(&[spend(&[(genesis_ref(1), 1)], &[(4, 3), (5, 4)])], SelectionPolicy::FirstFit)
        .unwrap();
    engine.into_ledger()
}

#[test]
fn test_snapshot_restore() {
    let ledger = sample_ledger();
    let hash_orig = ledger_state_hash(&ledger);

    let bytes = encode_ledger(&ledger).unwrap();
    assert_eq!(&bytes[..4], MAGIC);

    let restored = decode_ledger(&bytes).unwrap();
    assert_eq!(ledger_state_hash(&restored), hash_orig);
    assert_eq!(restored, ledger);
}

#[test]
fn test_empty_snapshot() {
    let bytes = encode_ledger(&LedgerState::new()).unwrap();
    assert!(decode_ledger(&bytes).unwrap().is_empty());
}

#[test]
fn test_encoding_is_deterministic() {
    let a = encode_ledger(&sample_ledger()).unwrap();
    let b = encode_ledger(&sample_ledger()).unwrap();
    assert_eq!(a, b);
}

#[test]
fn test_rejects_bad_magic() {
    let mut bytes = encode_ledger(&sample_ledger()).unwrap();
    bytes[0] = b'X';
    assert!(matches!(decode_ledger(&bytes), Err(LedgerError::InvalidSnapshot(_))));
}

#[test]
fn test_rejects_unknown_schema() {
    let mut bytes = encode_ledger(&sample_ledger()).unwrap();
    bytes[4..8].copy_from_slice(&99u32.to_le_bytes());
    assert!(matches!(decode_ledger(&bytes), Err(LedgerError::InvalidSnapshot(_))));
}

#[test]
fn test_rejects_corrupted_body() {
    let mut bytes = encode_ledger(&sample_ledger()).unwrap();
    let last = bytes.len() - 1;
    bytes[last] ^= 0x01;
    match decode_ledger(&bytes) {
        Err(LedgerError::InvalidSnapshot(msg)) => assert!(msg.contains("checksum")),
        other => panic!("expected checksum failure, got {other:?}"),
    }
}

#[test]
fn test_rejects_truncation() {
    let bytes = encode_ledger(&sample_ledger()).unwrap();
    assert!(decode_ledger(&bytes[..HEADER_LEN - 1]).is_err());
    assert!(decode_ledger(&bytes[..bytes.len() - 1]).is_err());
}
