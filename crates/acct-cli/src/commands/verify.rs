use std::error::Error;

use acct_key::{AccountKey, AccountKeys};
use clap::Args;

#[derive(Args, Debug)]
pub struct VerifyArgs {
    /// Account name as a JSON object of string attributes.
    pub name: String,
    /// Stored key expected for the name.
    pub key: String,
}

pub fn run(args: &VerifyArgs, keys: &AccountKeys) -> Result<(), Box<dyn Error>> {
    let expected = AccountKey::parse(&args.key)?;
    let actual = keys.derive_key(&args.name)?;
    if actual != expected {
        tracing::warn!(expected = %expected, actual = %actual, "account key mismatch");
        return Err(format!("key mismatch: expected {expected}, computed {actual}").into());
    }
    println!("ok");
    Ok(())
}
