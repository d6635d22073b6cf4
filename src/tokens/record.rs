use serde::{Deserialize, Serialize};

/// The credential cached for one scope. Insertion time lives with the
/// underlying cache entry; the record itself is just the credential.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TokenRecord {
    pub value: String,
}

impl TokenRecord {
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
        }
    }

    /// Header form for bearer-style upstreams.
    pub fn bearer(&self) -> String {
        format!("Bearer {}", self.value)
    }
}
