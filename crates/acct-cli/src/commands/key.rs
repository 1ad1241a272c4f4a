use std::error::Error;

use acct_key::AccountKeys;
use clap::Args;

#[derive(Args, Debug)]
pub struct KeyArgs {
    /// Account name as a JSON object of string attributes.
    pub name: String,
    /// Print the canonical name next to the key.
    #[arg(long)]
    pub show_name: bool,
}

pub fn run(args: &KeyArgs, keys: &AccountKeys) -> Result<(), Box<dyn Error>> {
    let canonical = keys.normalize_name(&args.name)?;
    let key = keys.key_for_text(&canonical);
    if args.show_name {
        println!("{key}\t{canonical}");
    } else {
        println!("{key}");
    }
    Ok(())
}
