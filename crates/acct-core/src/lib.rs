#![deny(missing_docs)]
#![doc = "Data model for ledger account identities: attribute sets, their canonical text, and account keys."]

pub mod canonical;
pub mod errors;
mod types;

pub use canonical::{encode, CanonicalText};
pub use errors::{AcctError, ErrorInfo};
pub use types::{AccountKey, AttributeSet, Iter, ACCOUNT_KEY_LEN, DIGEST_LEN};
