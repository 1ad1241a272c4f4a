use acct_core::AcctError;
use thiserror::Error;

use crate::AccountKeys;

/// Failure reported back to the invoking host call.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HostError {
    /// The argument cannot be interpreted; retrying the same call fails again.
    #[error("invalid function argument: {0}")]
    InvalidArgument(String),
    /// The key routines cannot run in this environment.
    #[error("internal error: {0}")]
    Internal(String),
}

impl HostError {
    fn from_acct(function: &str, input: &str, err: AcctError) -> Self {
        match err {
            AcctError::MalformedInput(info) => {
                tracing::debug!(function, code = %info.code, "argument rejected");
                HostError::InvalidArgument(format!("Invalid argument to {function}(): {input}"))
            }
            AcctError::InternalUnavailable(info) => HostError::Internal(info.to_string()),
        }
    }
}

/// Registration metadata for a scalar function exposed to the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FunctionSignature {
    /// Name the function is invoked by.
    pub name: &'static str,
    /// One-line description shown by the host.
    pub description: &'static str,
    /// Host type of the single argument.
    pub argument: &'static str,
    /// Host type of the result.
    pub returns: &'static str,
}

/// Functions this crate provides to a host.
pub const FUNCTIONS: [FunctionSignature; 2] = [
    FunctionSignature {
        name: "account_key",
        description: "Returns the key for a Ledger account name",
        argument: "varchar",
        returns: "varchar",
    },
    FunctionSignature {
        name: "account_name",
        description: "Returns the name for a Ledger account",
        argument: "map(varchar,varchar)",
        returns: "varchar",
    },
];

/// Host map value laid out as alternating key and value positions.
#[derive(Debug, Clone, Copy)]
pub struct PairBlock<'a, S> {
    positions: &'a [S],
}

impl<'a, S> PairBlock<'a, S>
where
    S: AsRef<str> + 'a,
{
    /// Wraps host positions; position `2i` is a key and `2i + 1` its value.
    pub fn new(positions: &'a [S]) -> Result<Self, HostError> {
        if positions.len() % 2 != 0 {
            return Err(HostError::InvalidArgument(format!(
                "map block has an odd number of positions ({})",
                positions.len()
            )));
        }
        Ok(Self { positions })
    }

    /// Number of key/value pairs.
    pub fn len(&self) -> usize {
        self.positions.len() / 2
    }

    /// Returns whether the block holds no pairs.
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Host-style rendering of the block, e.g. `{ledger=main, currency=USD}`.
    pub fn render(&self) -> String {
        let rendered: Vec<String> = self
            .pairs()
            .map(|(name, value)| format!("{name}={value}"))
            .collect();
        format!("{{{}}}", rendered.join(", "))
    }

    /// Pairs in host order.
    pub fn pairs(&self) -> impl Iterator<Item = (&'a str, &'a str)> + 'a {
        let positions: &'a [S] = self.positions;
        positions
            .chunks_exact(2)
            .map(|pair| (pair[0].as_ref(), pair[1].as_ref()))
    }
}

/// `account_key(varchar) -> varchar`.
pub fn account_key(keys: &AccountKeys, input: &[u8]) -> Result<String, HostError> {
    let text = std::str::from_utf8(input).map_err(|_| {
        HostError::InvalidArgument(format!(
            "Invalid argument to account_key(): {}",
            String::from_utf8_lossy(input)
        ))
    })?;
    keys.derive_key(text)
        .map(|key| key.into_string())
        .map_err(|err| HostError::from_acct("account_key", text, err))
}

/// `account_name(map(varchar,varchar)) -> varchar`.
pub fn account_name<S: AsRef<str>>(
    keys: &AccountKeys,
    block: &PairBlock<'_, S>,
) -> Result<String, HostError> {
    keys.canonicalize(block.pairs())
        .map(|text| text.into_string())
        .map_err(|err| HostError::from_acct("account_name", &block.render(), err))
}
