use serde::{Deserialize, Serialize};

/// Role name carried in a token, exactly as the directory assigned it.
///
/// Opaque here: no role hierarchy or permission mapping is applied.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Role(String);

impl Role {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl core::fmt::Display for Role {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Role {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for Role {
    fn from(value: String) -> Self {
        Self(value)
    }
}
