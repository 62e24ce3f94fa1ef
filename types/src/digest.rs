//! Transaction digest type.

use serde::{Deserialize, Serialize};
use std::fmt;

/// An executed transaction's identifier, as reported by the ledger or by an
/// external wallet integration.
///
/// Kept as an opaque non-empty string: different integrations report digests
/// in different encodings, and the client only ever passes them back verbatim
/// (explorer links, history lookups).
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TxDigest(String);

impl TxDigest {
    /// Wrap a digest string. Returns `None` for an empty string: an empty
    /// digest is never a valid transaction identifier.
    pub fn new(raw: impl Into<String>) -> Option<Self> {
        let s = raw.into();
        if s.is_empty() {
            None
        } else {
            Some(Self(s))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TxDigest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
