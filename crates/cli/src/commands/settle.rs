// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
use std::path::{Path, PathBuf};

use comfy_table::presets::UTF8_FULL;
use comfy_table::{ContentArrangement, Table};
use tally_kernel::config::ValidationRules;
use tally_kernel::hash::ledger_state_hash;
use tally_kernel::signature::Ed25519Verifier;
use tally_kernel::{SelectionPolicy, Settlement, SettlementEngine, TxValidator};
use tracing::info;

use crate::files;

/// Where the results of an epoch are written. Unset paths are skipped.
#[derive(Debug, Clone, Default)]
pub struct SettleOutputs {
    pub ledger: Option<PathBuf>,
    pub snapshot: Option<PathBuf>,
    pub receipt: Option<PathBuf>,
}

pub fn run(
    ledger_path: &Path,
    batch_path: &Path,
    policy: SelectionPolicy,
    rules: ValidationRules,
    outputs: &SettleOutputs,
) -> anyhow::Result<Settlement> {
    let ledger = files::load_ledger(ledger_path)?;
    let batch = files::load_batch(batch_path)?;

    let validator = TxValidator::with_verifier(Ed25519Verifier, rules);
    let mut engine = SettlementEngine::with_validator(&ledger, validator);
    let settlement = engine.settle(&batch, policy)?;

    println!("\nEpoch Settlement ({policy})");
    println!("--------------------");

    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec!["Order", "Batch #", "Tx", "Inputs", "Outputs", "Fee"]);
    for (order, accepted) in settlement.accepted.iter().enumerate() {
        table.add_row(vec![
            order.to_string(),
            accepted.batch_index.to_string(),
            accepted.tx.hash().short(),
            accepted.tx.inputs().len().to_string(),
            accepted.tx.outputs().len().to_string(),
            accepted.fee.to_string(),
        ]);
    }
    println!("{table}");
    println!(
        "Accepted {}/{} | Total fee {} | State {}\n",
        settlement.accepted.len(),
        batch.len(),
        settlement.total_fee,
        hex::encode(ledger_state_hash(engine.ledger())),
    );

    if let Some(path) = &outputs.ledger {
        files::save_ledger(path, engine.ledger())?;
        info!(path = %path.display(), "wrote ledger");
    }
    if let Some(path) = &outputs.snapshot {
        files::save_snapshot(path, engine.ledger())?;
        info!(path = %path.display(), "wrote snapshot");
    }
    if let Some(path) = &outputs.receipt {
        files::save_receipt(path, &settlement.receipt)?;
        info!(path = %path.display(), "wrote receipt");
    }

    Ok(settlement)
}
