//! delta-contacts command-line runner
//!
//! Runs the contact sync engine against a JSON snapshot of a contact store
//! and prints the result as the JSON a UI layer would receive.
//!
//! Usage:
//!   deltacontacts sync --snapshot contacts.json
//!   deltacontacts sync --snapshot contacts.json --token dG9rZW4=
//!   deltacontacts normalize "+1 (415) 555-0100"

use anyhow::Result;
use clap::{Parser, Subcommand};
use deltacontacts_cli::{parse_checkpoint, run_sync, Snapshot};
use deltacontacts_sync::{phone, SyncConfig};
use deltacontacts_types::FieldKind;
use std::path::PathBuf;
use tracing::{debug, Level};
use tracing_subscriber::FmtSubscriber;

#[derive(Parser, Debug)]
#[command(name = "deltacontacts")]
#[command(about = "Contact aggregation and incremental sync runner")]
struct Args {
    #[command(subcommand)]
    command: Command,

    /// Enable verbose debug logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Sync contacts from a snapshot file
    Sync {
        /// Path to the snapshot JSON file
        #[arg(short, long)]
        snapshot: PathBuf,

        /// Watermark checkpoint (ms since epoch)
        #[arg(long, conflicts_with = "token")]
        watermark: Option<i64>,

        /// History-token checkpoint (base64)
        #[arg(long)]
        token: Option<String>,

        /// Only request phone rows
        #[arg(long)]
        phones_only: bool,

        /// Do not push the watermark down to the row source
        #[arg(long)]
        no_prefilter: bool,

        /// Pretty-print the JSON output
        #[arg(long)]
        pretty: bool,
    },
    /// Print the canonical form of phone numbers
    Normalize {
        /// Raw phone numbers
        #[arg(required = true)]
        numbers: Vec<String>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    let log_level = if args.verbose { Level::DEBUG } else { Level::WARN };
    FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .compact()
        .init();

    match args.command {
        Command::Sync {
            snapshot,
            watermark,
            token,
            phones_only,
            no_prefilter,
            pretty,
        } => {
            let checkpoint = parse_checkpoint(watermark, token.as_deref())?;
            debug!("Checkpoint: {:?}", checkpoint);

            let mut config = SyncConfig {
                watermark_prefilter: !no_prefilter,
                ..Default::default()
            };
            if phones_only {
                config.field_kinds = [FieldKind::Phone].into_iter().collect();
            }

            let snapshot = Snapshot::load(&snapshot).await?;
            let response = run_sync(snapshot, checkpoint, config).await?;
            let json = if pretty {
                serde_json::to_string_pretty(&response)?
            } else {
                response.to_json()?
            };
            println!("{json}");
        }
        Command::Normalize { numbers } => {
            for raw in numbers {
                match phone::normalize(&raw) {
                    Some(normalized) => println!("{raw}\t{normalized}"),
                    None => println!("{raw}\t-"),
                }
            }
        }
    }

    Ok(())
}
