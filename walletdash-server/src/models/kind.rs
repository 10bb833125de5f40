//! Wallet item kinds
//!
//! The `items.kind` column is a small integer code written by the agent.
//! Labels are a fixed total mapping; unrecognized codes render as `Type {code}`.

use std::fmt;

use serde::{Serialize, Serializer};

/// Classification of a wallet item
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ItemKind {
    Connection,
    Credential,
    Message,
    Key,
    Proof,
    /// Any code outside 1..=5
    Other(i64),
}

impl ItemKind {
    /// Map a stored kind code to its kind. Never fails.
    pub fn from_code(code: i64) -> Self {
        match code {
            1 => Self::Connection,
            2 => Self::Credential,
            3 => Self::Message,
            4 => Self::Key,
            5 => Self::Proof,
            other => Self::Other(other),
        }
    }

    /// Numeric code as stored in the database.
    pub fn code(self) -> i64 {
        match self {
            Self::Connection => 1,
            Self::Credential => 2,
            Self::Message => 3,
            Self::Key => 4,
            Self::Proof => 5,
            Self::Other(code) => code,
        }
    }

    /// Display label (`Connection`, ..., or `Type 42`).
    pub fn label(self) -> String {
        self.to_string()
    }
}

impl fmt::Display for ItemKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Connection => f.write_str("Connection"),
            Self::Credential => f.write_str("Credential"),
            Self::Message => f.write_str("Message"),
            Self::Key => f.write_str("Key"),
            Self::Proof => f.write_str("Proof"),
            Self::Other(code) => write!(f, "Type {}", code),
        }
    }
}

impl From<i64> for ItemKind {
    fn from(code: i64) -> Self {
        Self::from_code(code)
    }
}

impl Serialize for ItemKind {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}
