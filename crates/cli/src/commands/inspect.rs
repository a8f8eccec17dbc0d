// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
use comfy_table::presets::UTF8_FULL;
use comfy_table::{ContentArrangement, Table};

use std::path::Path;
use tally_kernel::hash::ledger_state_hash;

use crate::files;

pub fn run(ledger_path: &Path) -> anyhow::Result<()> {
    let ledger = files::load_ledger(ledger_path)?;
    ledger.check_invariants()?;

    println!("\nLedger Status Report");
    println!("--------------------");
    println!("Entries:     {}", ledger.len());
    println!("Total value: {}", ledger.total_value()?);
    println!("State hash:  {}", hex::encode(ledger_state_hash(&ledger)));

    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec!["Outpoint", "Value", "Owner"]);
    for (outpoint, output) in ledger.entries() {
        table.add_row(vec![
            outpoint.to_string(),
            output.value.to_string(),
            hex::encode(&output.key.as_bytes()[..4]),
        ]);
    }

    println!("{table}\n");

    Ok(())
}
