//! Strongly-typed identifiers.

use serde::{Deserialize, Serialize};

/// Numeric identifier assigned to a user by the directory service.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(i64);

impl UserId {
    pub fn new(value: i64) -> Self {
        Self(value)
    }
}

impl core::fmt::Display for UserId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        core::fmt::Display::fmt(&self.0, f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn displays_as_plain_number() {
        assert_eq!(UserId::new(42).to_string(), "42");
    }

    #[test]
    fn serializes_as_plain_number() {
        assert_eq!(serde_json::to_string(&UserId::new(7)).unwrap(), "7");
    }
}
