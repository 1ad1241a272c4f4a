use std::fmt;
use std::hash::Hasher;
use std::str::FromStr;

use acct_core::{AccountKey, AcctError, CanonicalText, ErrorInfo, DIGEST_LEN};
use md5::Md5;
use sha2::{Digest, Sha256};
use siphasher::sip128::{Hasher128, SipHasher13};

/// 128-bit digests available for key derivation.
///
/// None of these is used for its security properties; `Md5` is the default
/// because previously issued keys were derived with it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum DigestAlgorithm {
    /// MD5 over the canonical text.
    #[default]
    Md5,
    /// First 16 bytes of SHA-256 over the canonical text.
    Sha256Truncated,
    /// SipHash-1-3 with 128-bit output and zero keys.
    SipHash128,
}

impl DigestAlgorithm {
    /// All supported algorithms.
    pub const ALL: [DigestAlgorithm; 3] = [
        DigestAlgorithm::Md5,
        DigestAlgorithm::Sha256Truncated,
        DigestAlgorithm::SipHash128,
    ];

    /// Resolves a configured algorithm name.
    pub fn from_name(name: &str) -> Result<Self, AcctError> {
        Self::ALL
            .into_iter()
            .find(|algorithm| algorithm.name().eq_ignore_ascii_case(name.trim()))
            .ok_or_else(|| {
                AcctError::InternalUnavailable(
                    ErrorInfo::new("acct.digest_unavailable", "digest algorithm is not available")
                        .with_context("algorithm", name)
                        .with_hint("supported algorithms: md5, sha256-128, siphash-128"),
                )
            })
    }

    /// Configuration name of the algorithm.
    pub fn name(self) -> &'static str {
        match self {
            DigestAlgorithm::Md5 => "md5",
            DigestAlgorithm::Sha256Truncated => "sha256-128",
            DigestAlgorithm::SipHash128 => "siphash-128",
        }
    }

    /// Digests `bytes` with a hashing context private to this call.
    pub fn digest(self, bytes: &[u8]) -> [u8; DIGEST_LEN] {
        let mut out = [0u8; DIGEST_LEN];
        match self {
            DigestAlgorithm::Md5 => {
                let mut hasher = Md5::new();
                hasher.update(bytes);
                out.copy_from_slice(&hasher.finalize());
            }
            DigestAlgorithm::Sha256Truncated => {
                let digest = Sha256::digest(bytes);
                out.copy_from_slice(&digest[..DIGEST_LEN]);
            }
            DigestAlgorithm::SipHash128 => {
                let mut hasher = SipHasher13::new_with_keys(0, 0);
                hasher.write(bytes);
                out = hasher.finish128().as_bytes();
            }
        }
        out
    }
}

impl fmt::Display for DigestAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for DigestAlgorithm {
    type Err = AcctError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_name(s)
    }
}

/// Derives account keys from canonical text.
///
/// Holds no hashing state between calls, so one deriver may be shared by any
/// number of threads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct KeyDeriver {
    algorithm: DigestAlgorithm,
}

impl KeyDeriver {
    /// Creates a deriver for `algorithm`.
    pub fn new(algorithm: DigestAlgorithm) -> Self {
        Self { algorithm }
    }

    /// Creates a deriver from a configured algorithm name.
    pub fn from_name(name: &str) -> Result<Self, AcctError> {
        let algorithm = DigestAlgorithm::from_name(name)?;
        tracing::debug!(algorithm = %algorithm, "key deriver ready");
        Ok(Self::new(algorithm))
    }

    /// Algorithm used for every key.
    pub fn algorithm(&self) -> DigestAlgorithm {
        self.algorithm
    }

    /// Hashes the UTF-8 bytes of `text` into an account key.
    pub fn derive(&self, text: &CanonicalText) -> AccountKey {
        AccountKey::from_digest(&self.algorithm.digest(text.as_bytes()))
    }
}
