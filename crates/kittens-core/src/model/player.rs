use core::fmt;
use serde::{Deserialize, Serialize};

/// Opaque identifier the engine assigns to each seat.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlayerId(String);

impl PlayerId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for PlayerId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for PlayerId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::PlayerId;

    #[test]
    fn serializes_as_plain_string() {
        let id = PlayerId::new("bot-2");
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"bot-2\"");
        assert_eq!(id.to_string(), "bot-2");
    }
}
