use std::fmt;

use acct_core::{AcctError, AttributeSet, ErrorInfo};
use serde::de::{self, DeserializeSeed, MapAccess, Visitor};

use crate::config::DuplicatePolicy;

/// Turns either input shape into an [`AttributeSet`] under one duplicate policy.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Normalizer {
    policy: DuplicatePolicy,
}

impl Normalizer {
    /// Creates a normaliser applying `policy` to repeated names.
    pub fn new(policy: DuplicatePolicy) -> Self {
        Self { policy }
    }

    /// Parses a JSON object whose values are all strings.
    pub fn parse(&self, text: &str) -> Result<AttributeSet, AcctError> {
        let mut duplicate = None;
        let mut deserializer = serde_json::Deserializer::from_str(text);
        let seed = AttributeSeed {
            policy: self.policy,
            duplicate: &mut duplicate,
        };
        let parsed = seed
            .deserialize(&mut deserializer)
            .and_then(|set| deserializer.end().map(|()| set));
        if let Some(name) = duplicate {
            tracing::debug!(name = %name, "rejected duplicate attribute name");
            return Err(duplicate_error(&name));
        }
        parsed.map_err(|err| {
            tracing::debug!(error = %err, "rejected malformed account name");
            AcctError::MalformedInput(
                ErrorInfo::new("acct.malformed_json", err.to_string())
                    .with_context("line", err.line().to_string())
                    .with_context("column", err.column().to_string())
                    .with_hint("expected a JSON object whose values are all strings"),
            )
        })
    }

    /// Collects already decoded pairs, in the order supplied.
    pub fn collect<I, K, V>(&self, pairs: I) -> Result<AttributeSet, AcctError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let mut set = AttributeSet::new();
        for (name, value) in pairs {
            let name = name.into();
            if self.policy == DuplicatePolicy::Reject && set.contains(&name) {
                return Err(duplicate_error(&name));
            }
            set.insert(name, value);
        }
        Ok(set)
    }
}

fn duplicate_error(name: &str) -> AcctError {
    AcctError::MalformedInput(
        ErrorInfo::new("acct.duplicate_name", "attribute name appears more than once")
            .with_context("name", name),
    )
}

struct AttributeSeed<'a> {
    policy: DuplicatePolicy,
    duplicate: &'a mut Option<String>,
}

impl<'de> DeserializeSeed<'de> for AttributeSeed<'_> {
    type Value = AttributeSet;

    fn deserialize<D>(self, deserializer: D) -> Result<Self::Value, D::Error>
    where
        D: de::Deserializer<'de>,
    {
        deserializer.deserialize_map(self)
    }
}

impl<'de> Visitor<'de> for AttributeSeed<'_> {
    type Value = AttributeSet;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("an object whose values are all strings")
    }

    fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
    where
        A: MapAccess<'de>,
    {
        let mut set = AttributeSet::new();
        while let Some(name) = map.next_key::<String>()? {
            if self.policy == DuplicatePolicy::Reject && set.contains(&name) {
                let message = format!("duplicate attribute name `{name}`");
                *self.duplicate = Some(name);
                return Err(de::Error::custom(message));
            }
            let value = map.next_value::<String>()?;
            set.insert(name, value);
        }
        Ok(set)
    }
}
