use std::error::Error;

use acct_key::{AccountKeys, CanonicalText};
use clap::Args;

#[derive(Args, Debug)]
pub struct NameArgs {
    /// Attributes as `NAME=VALUE`; the value starts after the first `=`.
    #[arg(value_name = "NAME=VALUE")]
    pub attributes: Vec<String>,
}

pub fn run(args: &NameArgs, keys: &AccountKeys) -> Result<(), Box<dyn Error>> {
    let canonical = canonical_name(&args.attributes, keys)?;
    println!("{canonical}");
    Ok(())
}

/// Canonical name for `NAME=VALUE` arguments in the order given.
pub fn canonical_name(
    attributes: &[String],
    keys: &AccountKeys,
) -> Result<CanonicalText, Box<dyn Error>> {
    let mut pairs = Vec::with_capacity(attributes.len());
    for attribute in attributes {
        let (name, value) = attribute
            .split_once('=')
            .ok_or_else(|| format!("attribute `{attribute}` is not NAME=VALUE"))?;
        pairs.push((name, value));
    }
    Ok(keys.canonicalize(pairs)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_at_first_equals() {
        let args = vec!["ledger=main".to_string(), "memo=a=b".to_string()];
        let text = canonical_name(&args, &AccountKeys::default()).expect("name");
        assert_eq!(text.as_str(), r#"{"ledger":"main","memo":"a=b"}"#);
    }

    #[test]
    fn missing_equals_is_an_error() {
        let args = vec!["ledger".to_string()];
        assert!(canonical_name(&args, &AccountKeys::default()).is_err());
    }
}
