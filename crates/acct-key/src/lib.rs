#![deny(missing_docs)]
#![doc = "Account key derivation: normalise an account name, encode it canonically, digest it."]

/// Host query engine adapter.
///
/// The host hands `account_key` raw UTF-8 bytes and `account_name` a flat
/// block of alternating key and value positions. Failures surface as a bad
/// argument or an internal fault.
pub mod boundary;
/// Derivation settings.
pub mod config;
/// Digest selection and key derivation.
pub mod hash;
/// Attribute normalisation for both input shapes.
pub mod normalize;

pub use acct_core::{encode, AccountKey, AcctError, AttributeSet, CanonicalText, ErrorInfo};
pub use boundary::{account_key, account_name, FunctionSignature, HostError, PairBlock, FUNCTIONS};
pub use config::{DuplicatePolicy, KeyConfig};
pub use hash::{DigestAlgorithm, KeyDeriver};
pub use normalize::Normalizer;

/// Validated derivation pipeline: normaliser, canonical encoder, key deriver.
///
/// Immutable after construction and safe to share across threads; every call
/// uses its own parser, buffer and hashing context.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AccountKeys {
    normalizer: Normalizer,
    deriver: KeyDeriver,
}

impl AccountKeys {
    /// Builds the pipeline, failing if the configured digest is unavailable.
    pub fn from_config(config: &KeyConfig) -> Result<Self, AcctError> {
        Ok(Self {
            normalizer: Normalizer::new(config.duplicates),
            deriver: KeyDeriver::from_name(&config.algorithm)?,
        })
    }

    /// Digest algorithm in use.
    pub fn algorithm(&self) -> DigestAlgorithm {
        self.deriver.algorithm()
    }

    /// Parses a textual account name into its attribute set.
    pub fn parse(&self, text: &str) -> Result<AttributeSet, AcctError> {
        self.normalizer.parse(text)
    }

    /// Canonical name for a textual account name.
    pub fn normalize_name(&self, text: &str) -> Result<CanonicalText, AcctError> {
        self.parse(text).map(|set| encode(&set))
    }

    /// Key for a textual account name.
    pub fn derive_key(&self, text: &str) -> Result<AccountKey, AcctError> {
        let canonical = self.normalize_name(text)?;
        Ok(self.deriver.derive(&canonical))
    }

    /// Canonical name for decoded key/value pairs.
    pub fn canonicalize<I, K, V>(&self, pairs: I) -> Result<CanonicalText, AcctError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.normalizer.collect(pairs).map(|set| encode(&set))
    }

    /// Key for an attribute set that is already built.
    pub fn key_for(&self, attributes: &AttributeSet) -> AccountKey {
        self.deriver.derive(&encode(attributes))
    }

    /// Key for canonical text produced by [`encode`].
    pub fn key_for_text(&self, canonical: &CanonicalText) -> AccountKey {
        self.deriver.derive(canonical)
    }

    /// Checks a stored key against a textual account name.
    pub fn verify(&self, text: &str, expected: &AccountKey) -> Result<bool, AcctError> {
        Ok(&self.derive_key(text)? == expected)
    }
}

/// Key for a textual account name using MD5 and last-write-wins duplicates.
pub fn derive_key(text: &str) -> Result<AccountKey, AcctError> {
    AccountKeys::default().derive_key(text)
}

/// Canonical name for decoded pairs; later duplicates replace earlier ones.
pub fn canonicalize<I, K, V>(pairs: I) -> CanonicalText
where
    I: IntoIterator<Item = (K, V)>,
    K: Into<String>,
    V: Into<String>,
{
    encode(&pairs.into_iter().collect())
}
