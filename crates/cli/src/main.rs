// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tally_cli::commands::{demo, inspect, settle, validate, verify};
use tally_cli::telemetry::init_telemetry;
use tally_kernel::config::ValidationRules;
use tally_kernel::SelectionPolicy;

#[derive(Parser)]
#[command(name = "tally")]
#[command(about = "Tally - single-epoch UTXO settlement", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Settle one epoch: select transactions from the batch and apply them.
    Settle {
        /// Ledger file (JSON or binary snapshot)
        #[arg(long, short)]
        ledger: PathBuf,

        /// Batch of candidate transactions (JSON)
        #[arg(long, short)]
        batch: PathBuf,

        /// Selection policy: first-fit or max-fee
        #[arg(long, short, env = "TALLY_POLICY", default_value = "first-fit")]
        policy: SelectionPolicy,

        /// Write the resulting ledger as JSON
        #[arg(long, short)]
        out: Option<PathBuf>,

        /// Write the resulting ledger as a binary snapshot
        #[arg(long)]
        snapshot: Option<PathBuf>,

        /// Write the epoch receipt (JSON)
        #[arg(long, short)]
        receipt: Option<PathBuf>,

        /// Admit transactions without inputs
        #[arg(long, env = "TALLY_ALLOW_EMPTY_INPUTS")]
        allow_empty_inputs: bool,
    },
    /// Show each candidate's verdict against the ledger, without committing.
    Validate {
        #[arg(long, short)]
        ledger: PathBuf,

        #[arg(long, short)]
        batch: PathBuf,

        /// Admit transactions without inputs
        #[arg(long, env = "TALLY_ALLOW_EMPTY_INPUTS")]
        allow_empty_inputs: bool,
    },
    /// Show ledger totals, state hash and entries
    Inspect {
        #[arg(long, short)]
        ledger: PathBuf,
    },
    /// Replay an epoch and check it against a receipt
    Verify {
        #[arg(long, short)]
        ledger: PathBuf,

        #[arg(long, short)]
        batch: PathBuf,

        #[arg(long, short)]
        receipt: PathBuf,

        /// Admit transactions without inputs
        #[arg(long, env = "TALLY_ALLOW_EMPTY_INPUTS")]
        allow_empty_inputs: bool,
    },
    /// Write a signed demo ledger and batch
    Demo {
        #[arg(long, short, default_value = ".")]
        dir: PathBuf,
    },
}

fn rules(allow_empty_inputs: bool) -> ValidationRules {
    ValidationRules {
        allow_empty_inputs,
        ..ValidationRules::default()
    }
}

fn main() -> anyhow::Result<()> {
    init_telemetry();

    let cli = Cli::parse();

    match cli.command {
        Commands::Settle {
            ledger,
            batch,
            policy,
            out,
            snapshot,
            receipt,
            allow_empty_inputs,
        } => {
            let outputs = settle::SettleOutputs {
                ledger: out,
                snapshot,
                receipt,
            };
            settle::run(&ledger, &batch, policy, rules(allow_empty_inputs), &outputs).map(|_| ())
        }
        Commands::Validate {
            ledger,
            batch,
            allow_empty_inputs,
        } => validate::run(&ledger, &batch, rules(allow_empty_inputs)).map(|_| ()),
        Commands::Inspect { ledger } => inspect::run(&ledger),
        Commands::Verify {
            ledger,
            batch,
            receipt,
            allow_empty_inputs,
        } => verify::run(&ledger, &batch, &receipt, rules(allow_empty_inputs)),
        Commands::Demo { dir } => demo::run(&dir),
    }
}
