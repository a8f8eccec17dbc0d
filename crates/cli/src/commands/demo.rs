// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
use std::path::Path;

use crate::fixtures;

pub fn run(dir: &Path) -> anyhow::Result<()> {
    let paths = fixtures::generate_demo_scenario(dir)?;
    println!("Wrote demo ledger:   {}", paths.ledger.display());
    println!("Wrote demo snapshot: {}", paths.snapshot.display());
    println!("Wrote demo batch:    {}", paths.batch.display());
    Ok(())
}
