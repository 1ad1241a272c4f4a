use std::collections::btree_map::{self, BTreeMap};
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::errors::{AcctError, ErrorInfo};

/// Width in bytes of every account key digest.
pub const DIGEST_LEN: usize = 16;

/// Length of the hexadecimal rendering of an [`AccountKey`].
pub const ACCOUNT_KEY_LEN: usize = DIGEST_LEN * 2;

/// Identity of a ledger account: attribute names mapped to values.
///
/// Names are unique and iterate in ascending byte order. Inserting a name
/// that is already present replaces its value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct AttributeSet {
    attributes: BTreeMap<String, String>,
}

impl AttributeSet {
    /// Creates an empty attribute set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts an attribute, returning the value it replaced.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) -> Option<String> {
        self.attributes.insert(name.into(), value.into())
    }

    /// Returns whether the named attribute is present.
    pub fn contains(&self, name: &str) -> bool {
        self.attributes.contains_key(name)
    }

    /// Looks up the value of an attribute.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }

    /// Number of attributes in the set.
    pub fn len(&self) -> usize {
        self.attributes.len()
    }

    /// Returns whether the set holds no attributes.
    pub fn is_empty(&self) -> bool {
        self.attributes.is_empty()
    }

    /// Iterates attributes in ascending byte order of their names.
    pub fn iter(&self) -> Iter<'_> {
        Iter {
            inner: self.attributes.iter(),
        }
    }
}

/// Ordered iterator over the attributes of an [`AttributeSet`].
#[derive(Debug, Clone)]
pub struct Iter<'a> {
    inner: btree_map::Iter<'a, String, String>,
}

impl<'a> Iterator for Iter<'a> {
    type Item = (&'a str, &'a str);

    fn next(&mut self) -> Option<Self::Item> {
        self.inner
            .next()
            .map(|(name, value)| (name.as_str(), value.as_str()))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl ExactSizeIterator for Iter<'_> {}

impl<'a> IntoIterator for &'a AttributeSet {
    type Item = (&'a str, &'a str);
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<K, V> FromIterator<(K, V)> for AttributeSet
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut set = AttributeSet::new();
        set.extend(iter);
        set
    }
}

impl<K, V> Extend<(K, V)> for AttributeSet
where
    K: Into<String>,
    V: Into<String>,
{
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (name, value) in iter {
            self.insert(name, value);
        }
    }
}

/// Fixed-width lowercase hexadecimal account key.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct AccountKey(String);

impl AccountKey {
    /// Renders a digest most-significant byte first.
    pub fn from_digest(digest: &[u8; DIGEST_LEN]) -> Self {
        Self(hex::encode(digest))
    }

    /// Parses a stored key, accepting only 32 lowercase hexadecimal characters.
    pub fn parse(text: &str) -> Result<Self, AcctError> {
        let well_formed = text.len() == ACCOUNT_KEY_LEN
            && text
                .bytes()
                .all(|byte| matches!(byte, b'0'..=b'9' | b'a'..=b'f'));
        if !well_formed {
            return Err(AcctError::MalformedInput(
                ErrorInfo::new("acct.invalid_key", "account key is not 32 lowercase hex digits")
                    .with_context("length", text.len().to_string()),
            ));
        }
        Ok(Self(text.to_owned()))
    }

    /// Borrows the hexadecimal text.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes the key, returning its hexadecimal text.
    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for AccountKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for AccountKey {
    type Error = AcctError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        AccountKey::parse(&value)
    }
}

impl From<AccountKey> for String {
    fn from(key: AccountKey) -> Self {
        key.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn later_insert_replaces_value() {
        let mut set = AttributeSet::new();
        assert_eq!(set.insert("a", "1"), None);
        assert_eq!(set.insert("a", "2"), Some("1".to_string()));
        assert_eq!(set.get("a"), Some("2"));
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn iteration_is_byte_ordered() {
        let set: AttributeSet = [("b", "1"), ("B", "2"), ("a", "3"), ("é", "4"), ("", "5")]
            .into_iter()
            .collect();
        let names: Vec<&str> = set.iter().map(|(name, _)| name).collect();
        assert_eq!(names, vec!["", "B", "a", "b", "é"]);
    }

    #[test]
    fn key_parse_rejects_uppercase_and_wrong_length() {
        assert!(AccountKey::parse("1f32646e6b265766a13c55cdb7896922").is_ok());
        assert!(AccountKey::parse("1F32646E6B265766A13C55CDB7896922").is_err());
        match AccountKey::parse("1f32646e") {
            Err(AcctError::MalformedInput(info)) => {
                assert_eq!(info.context.get("length").map(String::as_str), Some("8"));
            }
            other => panic!("unexpected {other:?}"),
        }
        assert!(AccountKey::parse("zz32646e6b265766a13c55cdb7896922").is_err());
    }

    #[test]
    fn key_digest_is_most_significant_byte_first() {
        let mut digest = [0u8; DIGEST_LEN];
        digest[0] = 0xab;
        digest[15] = 0x01;
        let key = AccountKey::from_digest(&digest);
        assert_eq!(key.as_str(), "ab000000000000000000000000000001");
    }
}
