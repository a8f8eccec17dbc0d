// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
use std::path::Path;

use anyhow::bail;
use tally_kernel::config::ValidationRules;
use tally_kernel::replay::verify_receipt;
use tally_kernel::signature::Ed25519Verifier;
use tally_kernel::TxValidator;

use crate::files;

/// Replays the epoch from the ledger and batch and compares it to the receipt.
pub fn run(
    ledger_path: &Path,
    batch_path: &Path,
    receipt_path: &Path,
    rules: ValidationRules,
) -> anyhow::Result<()> {
    let ledger = files::load_ledger(ledger_path)?;
    let batch = files::load_batch(batch_path)?;
    let receipt = files::load_receipt(receipt_path)?;

    let mismatches = verify_receipt(
        &ledger,
        &batch,
        &receipt,
        TxValidator::with_verifier(Ed25519Verifier, rules),
    )?;

    if mismatches.is_empty() {
        println!("\n✅ VERIFIED\n");
        println!("Policy:     {}", receipt.policy);
        println!("Accepted:   {}", receipt.accepted.len());
        println!("Total fee:  {}", receipt.total_fee);
        println!("Post state: {}\n", hex::encode(receipt.post_state_hash));
        Ok(())
    } else {
        println!("\n❌ MISMATCH\n");
        for mismatch in &mismatches {
            println!("Differs: {mismatch:?}");
        }
        bail!("receipt does not match replay: {mismatches:?}")
    }
}
