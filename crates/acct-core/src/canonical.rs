//! Canonical text encoding for attribute sets.
//!
//! The encoding is a compact JSON object. Attributes appear in ascending byte
//! order of their names, separated by `,` with `:` between name and value and
//! no whitespace anywhere. Strings are quoted with the following escapes and
//! nothing else:
//!
//! | input                        | output        |
//! |------------------------------|---------------|
//! | `"`                          | `\"`          |
//! | `\`                          | `\\`          |
//! | U+0008 U+0009 U+000A         | `\b` `\t` `\n`|
//! | U+000C U+000D                | `\f` `\r`     |
//! | any other code point < U+0020| `\u00XX`      |
//!
//! `XX` uses uppercase hexadecimal digits. `/`, U+007F and all non-ASCII text
//! are written raw. Keys already issued depend on this exact byte sequence.

use std::fmt;

use serde::Serialize;

use crate::types::AttributeSet;

const UU: u8 = b'u';

/// Escape selector for bytes below 0x20; `u` means a `\u00XX` escape.
static CONTROL_ESCAPES: [u8; 0x20] = [
    //  0    1    2    3    4    5    6    7     8      9      A      B    C      D      E    F
    UU, UU, UU, UU, UU, UU, UU, UU, b'b', b't', b'n', UU, b'f', b'r', UU, UU, // 0
    UU, UU, UU, UU, UU, UU, UU, UU, UU, UU, UU, UU, UU, UU, UU, UU, // 1
];

static HEX_DIGITS: &[u8; 16] = b"0123456789ABCDEF";

/// Deterministic textual form of an [`AttributeSet`].
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct CanonicalText(String);

impl CanonicalText {
    /// Borrows the canonical text.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// UTF-8 bytes fed to the key digest.
    pub fn as_bytes(&self) -> &[u8] {
        self.0.as_bytes()
    }

    /// Consumes the value, returning the owned text.
    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for CanonicalText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for CanonicalText {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Serialises an attribute set into its canonical text.
pub fn encode(attributes: &AttributeSet) -> CanonicalText {
    let payload: usize = attributes
        .iter()
        .map(|(name, value)| name.len() + value.len() + 6)
        .sum();
    let mut out = String::with_capacity(payload + 2);
    out.push('{');
    for (idx, (name, value)) in attributes.iter().enumerate() {
        if idx > 0 {
            out.push(',');
        }
        write_quoted(&mut out, name);
        out.push(':');
        write_quoted(&mut out, value);
    }
    out.push('}');
    CanonicalText(out)
}

fn escape_for(byte: u8) -> Option<u8> {
    match byte {
        b'"' => Some(b'"'),
        b'\\' => Some(b'\\'),
        0x00..=0x1f => Some(CONTROL_ESCAPES[byte as usize]),
        _ => None,
    }
}

fn write_quoted(out: &mut String, text: &str) {
    out.push('"');
    let bytes = text.as_bytes();
    let mut start = 0;
    for (idx, &byte) in bytes.iter().enumerate() {
        let Some(escape) = escape_for(byte) else {
            continue;
        };
        // Escaped bytes are ASCII, so `idx` is always a char boundary.
        if start < idx {
            out.push_str(&text[start..idx]);
        }
        out.push('\\');
        if escape == UU {
            out.push_str("u00");
            out.push(HEX_DIGITS[(byte >> 4) as usize] as char);
            out.push(HEX_DIGITS[(byte & 0x0f) as usize] as char);
        } else {
            out.push(escape as char);
        }
        start = idx + 1;
    }
    if start < bytes.len() {
        out.push_str(&text[start..]);
    }
    out.push('"');
}

#[cfg(test)]
mod tests {
    use super::*;

    fn single(value: &str) -> String {
        let set: AttributeSet = [("k", value)].into_iter().collect();
        encode(&set).into_string()
    }

    #[test]
    fn empty_set_encodes_as_empty_object() {
        assert_eq!(encode(&AttributeSet::new()).as_str(), "{}");
    }

    #[test]
    fn names_are_sorted_without_whitespace() {
        let set: AttributeSet = [("ledger", "main"), ("currency", "USD"), ("region", "")]
            .into_iter()
            .collect();
        assert_eq!(
            encode(&set).as_str(),
            r#"{"currency":"USD","ledger":"main","region":""}"#
        );
    }

    #[test]
    fn quote_and_backslash_are_escaped() {
        assert_eq!(single(r#"a"b\c"#), r#"{"k":"a\"b\\c"}"#);
    }

    #[test]
    fn short_control_escapes() {
        assert_eq!(single("\u{8}\t\n\u{c}\r"), r#"{"k":"\b\t\n\f\r"}"#);
    }

    #[test]
    fn other_controls_use_uppercase_hex() {
        assert_eq!(single("\u{0}\u{1b}\u{1f}"), r#"{"k":"\u0000\u001B\u001F"}"#);
    }

    #[test]
    fn slash_delete_and_unicode_pass_through() {
        assert_eq!(single("a/b\u{7f}é€😀"), "{\"k\":\"a/b\u{7f}é€😀\"}");
    }

    #[test]
    fn names_are_escaped_like_values() {
        let set: AttributeSet = [("na\"me", "v")].into_iter().collect();
        assert_eq!(encode(&set).as_str(), r#"{"na\"me":"v"}"#);
    }
}
