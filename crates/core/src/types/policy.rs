//! Cart policies.

use serde::{Deserialize, Serialize};

/// Error returned when parsing a [`ZeroQuantityPolicy`] fails.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("invalid zero quantity policy: {0} (expected `retain` or `remove`)")]
pub struct ParsePolicyError(String);

/// What a decrement does to a line whose quantity reaches zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ZeroQuantityPolicy {
    /// Quantity floors at zero and the line stays in the cart.
    #[default]
    Retain,
    /// The line is removed once its quantity reaches zero.
    Remove,
}

impl std::fmt::Display for ZeroQuantityPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Retain => write!(f, "retain"),
            Self::Remove => write!(f, "remove"),
        }
    }
}

impl std::str::FromStr for ZeroQuantityPolicy {
    type Err = ParsePolicyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "retain" => Ok(Self::Retain),
            "remove" => Ok(Self::Remove),
            _ => Err(ParsePolicyError(s.to_owned())),
        }
    }
}
