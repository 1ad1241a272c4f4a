use serde::{Deserialize, Serialize};

/// How repeated attribute names inside one account name are handled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DuplicatePolicy {
    /// The later occurrence replaces the earlier one.
    #[default]
    LastWriteWins,
    /// Any repeated name rejects the input as malformed.
    Reject,
}

/// Parameters for key derivation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyConfig {
    /// Digest algorithm name, see [`crate::DigestAlgorithm`].
    #[serde(default = "default_algorithm")]
    pub algorithm: String,
    /// Duplicate attribute name policy.
    #[serde(default)]
    pub duplicates: DuplicatePolicy,
}

fn default_algorithm() -> String {
    "md5".to_string()
}

impl Default for KeyConfig {
    fn default() -> Self {
        Self {
            algorithm: default_algorithm(),
            duplicates: DuplicatePolicy::default(),
        }
    }
}
