use std::error::Error;

use acct_key::{AccountKeys, DigestAlgorithm};
use clap::Args;
use serde::Serialize;

#[derive(Args, Debug)]
pub struct VersionArgs {
    /// Emit extended metadata as JSON.
    #[arg(long)]
    pub long: bool,
}

#[derive(Debug, Serialize)]
struct VersionInfo {
    version: String,
    algorithm: String,
    algorithms: Vec<String>,
    functions: Vec<String>,
}

pub fn run(args: &VersionArgs, keys: &AccountKeys) -> Result<(), Box<dyn Error>> {
    if !args.long {
        println!("{}", env!("CARGO_PKG_VERSION"));
        return Ok(());
    }
    let info = VersionInfo {
        version: env!("CARGO_PKG_VERSION").into(),
        algorithm: keys.algorithm().name().into(),
        algorithms: DigestAlgorithm::ALL
            .iter()
            .map(|algorithm| algorithm.name().to_string())
            .collect(),
        functions: acct_key::FUNCTIONS
            .iter()
            .map(|f| format!("{}({}) -> {}", f.name, f.argument, f.returns))
            .collect(),
    };
    println!("{}", serde_json::to_string(&info)?);
    Ok(())
}
