// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
use std::path::Path;

use comfy_table::presets::UTF8_FULL;
use comfy_table::{ContentArrangement, Table};
use tally_kernel::config::ValidationRules;
use tally_kernel::signature::Ed25519Verifier;
use tally_kernel::{Amount, Rejection, TxValidator};

use crate::files;

/// Judges every candidate against the ledger as given; nothing is committed,
/// so candidates that depend on each other show as missing inputs.
pub fn run(
    ledger_path: &Path,
    batch_path: &Path,
    rules: ValidationRules,
) -> anyhow::Result<Vec<Result<Amount, Rejection>>> {
    let ledger = files::load_ledger(ledger_path)?;
    let batch = files::load_batch(batch_path)?;
    let validator = TxValidator::with_verifier(Ed25519Verifier, rules);

    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec!["Batch #", "Tx", "Verdict", "Fee / Reason"]);

    let verdicts: Vec<_> = batch.iter().map(|tx| validator.check(tx, &ledger)).collect();
    for (index, (tx, verdict)) in batch.iter().zip(&verdicts).enumerate() {
        let (status, detail) = match verdict {
            Ok(fee) => ("VALID", fee.to_string()),
            Err(reason) => ("INVALID", reason.to_string()),
        };
        table.add_row(vec![index.to_string(), tx.hash().short(), status.to_string(), detail]);
    }

    println!("\nBatch Validation");
    println!("--------------------");
    println!("{table}\n");

    Ok(verdicts)
}
