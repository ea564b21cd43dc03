use std::fs::File;
use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;

use aluvet_core::harness::{self, HarnessError};

#[derive(Parser)]
#[command(about = "Verify an 8086 ALU model against golden test vectors")]
struct Args {
    /// Directory holding the vector files (add8.bin, daa.bin, ...)
    #[arg(default_value = ".")]
    vectors: PathBuf,

    /// Verify a single operation family (e.g. "adc", "shl1", "daa")
    #[arg(long)]
    op: Option<String>,

    /// List the configured operation labels and exit
    #[arg(long, default_value_t = false)]
    list: bool,

    /// Write the run summary to this file as JSON
    #[arg(long)]
    save: Option<PathBuf>,
}

fn main() -> Result<ExitCode> {
    env_logger::init();
    let args = Args::parse();

    if args.list {
        for label in harness::operation_labels() {
            println!("{}", label);
        }
        return Ok(ExitCode::SUCCESS);
    }

    log::debug!("verifying vectors in {}", args.vectors.display());
    match harness::run_all(&args.vectors, args.op.as_deref()) {
        Ok(summary) => {
            log::info!(
                "{} operations, {} blocks, {} points checked",
                summary.operations,
                summary.blocks,
                summary.points
            );
            if let Some(path) = args.save.as_ref() {
                let mut f = File::create(path)
                    .with_context(|| format!("cannot create '{}'", path.display()))?;
                write!(f, "{}", serde_json::to_string_pretty(&summary)?)?;
            }
            println!();
            println!("Everything OK");
            Ok(ExitCode::SUCCESS)
        }
        Err(HarnessError::Mismatch(mismatch)) => {
            // The whole run stops at the first failing operation; the
            // remaining families are intentionally not checked.
            println!("{}", mismatch);
            println!();
            Ok(ExitCode::FAILURE)
        }
        Err(err) => Err(err.into()),
    }
}
