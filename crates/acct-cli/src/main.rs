use std::error::Error;
use std::path::PathBuf;

use acct_cli::commands::{
    batch::{self, BatchArgs},
    key::{self, KeyArgs},
    name::{self, NameArgs},
    verify::{self, VerifyArgs},
    version::{self, VersionArgs},
};
use acct_cli::{settings, telemetry};
use acct_key::AccountKeys;
use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "acct", about = "Ledger account key and name derivation")]
struct Cli {
    /// TOML file with key derivation settings.
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    /// Log at debug level unless RUST_LOG is set.
    #[arg(long, short, global = true)]
    verbose: bool,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the account key for a JSON account name.
    Key(KeyArgs),
    /// Print the canonical account name for NAME=VALUE attributes.
    Name(NameArgs),
    /// Check a stored key against a JSON account name.
    Verify(VerifyArgs),
    /// Derive keys for a file of JSON account names, one per line.
    Batch(BatchArgs),
    /// Print version information.
    Version(VersionArgs),
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();
    let settings = settings::load_config(cli.config.as_deref())?;
    telemetry::init(&settings.log_level, cli.verbose);
    let keys = AccountKeys::from_config(&settings.key)?;
    tracing::debug!(algorithm = %keys.algorithm(), duplicates = ?settings.key.duplicates, "configuration loaded");

    match &cli.command {
        Command::Key(args) => key::run(args, &keys),
        Command::Name(args) => name::run(args, &keys),
        Command::Verify(args) => verify::run(args, &keys),
        Command::Batch(args) => batch::run(args, &keys, settings.threads),
        Command::Version(args) => version::run(args, &keys),
    }
}
