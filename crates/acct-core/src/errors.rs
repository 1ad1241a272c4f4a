//! Structured error types shared across the account crates.

use std::collections::BTreeMap;
use std::fmt::{self, Display};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Structured payload attached to every [`AcctError`] variant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorInfo {
    /// Stable machine readable error code.
    pub code: String,
    /// Human readable diagnostic message.
    pub message: String,
    /// Contextual key value pairs. Emitted keys: `line` and `column` for
    /// JSON syntax or type errors (batch runs overwrite `line` with the input
    /// line number), `name` for a repeated attribute, `algorithm` for an
    /// unknown digest, `length` for a malformed key.
    #[serde(default)]
    pub context: BTreeMap<String, String>,
    /// Optional hint that may help the caller resolve the issue.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hint: Option<String>,
}

impl ErrorInfo {
    /// Creates a new error payload with the provided code and message.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            context: BTreeMap::new(),
            hint: None,
        }
    }

    /// Adds a context entry to the payload.
    pub fn with_context(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.context.insert(key.into(), value.into());
        self
    }

    /// Sets a human readable hint for remediation.
    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }
}

/// Canonical error type for account key derivation.
///
/// Only two families exist: the caller supplied something that is not an
/// account name, or the environment cannot provide the digest primitive.
/// Neither is transient.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Error)]
#[serde(tag = "family", content = "detail")]
pub enum AcctError {
    /// Textual input does not decode as a string-keyed, string-valued object.
    #[error("malformed input: {0}")]
    MalformedInput(ErrorInfo),
    /// The configured digest primitive cannot be initialised.
    #[error("internal unavailable: {0}")]
    InternalUnavailable(ErrorInfo),
}

impl Display for ErrorInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (code: {})", self.message, self.code)?;
        if !self.context.is_empty() {
            write!(f, " | context: [")?;
            for (idx, (key, value)) in self.context.iter().enumerate() {
                if idx > 0 {
                    write!(f, ", ")?;
                }
                write!(f, "{key}={value}")?;
            }
            write!(f, "]")?;
        }
        if let Some(hint) = &self.hint {
            write!(f, " | hint: {hint}")?;
        }
        Ok(())
    }
}

impl AcctError {
    /// Shorthand for a [`AcctError::MalformedInput`] with the given code.
    pub fn malformed(code: impl Into<String>, message: impl Into<String>) -> Self {
        AcctError::MalformedInput(ErrorInfo::new(code, message))
    }

    /// Shorthand for a [`AcctError::InternalUnavailable`] with the given code.
    pub fn unavailable(code: impl Into<String>, message: impl Into<String>) -> Self {
        AcctError::InternalUnavailable(ErrorInfo::new(code, message))
    }

    /// Returns a reference to the payload describing the error.
    pub fn info(&self) -> &ErrorInfo {
        match self {
            AcctError::MalformedInput(info) | AcctError::InternalUnavailable(info) => info,
        }
    }

    /// Adds a context entry to the payload, keeping the family.
    pub fn with_context(self, key: impl Into<String>, value: impl Into<String>) -> Self {
        match self {
            AcctError::MalformedInput(info) => {
                AcctError::MalformedInput(info.with_context(key, value))
            }
            AcctError::InternalUnavailable(info) => {
                AcctError::InternalUnavailable(info.with_context(key, value))
            }
        }
    }

    /// Whether repeating the same call could succeed. Always false: malformed
    /// input fails identically and an unavailable digest is an environment
    /// fault.
    pub fn is_retryable(&self) -> bool {
        false
    }
}
