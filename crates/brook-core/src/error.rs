use thiserror::Error;

/// String-backed load failure, for producers that have no richer error type.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[error("{0}")]
pub struct LoadError(pub String);

impl LoadError {
    pub fn new(message: impl Into<String>) -> Self {
        Self(message.into())
    }
}

impl From<&str> for LoadError {
    fn from(message: &str) -> Self {
        Self(message.to_owned())
    }
}

impl From<String> for LoadError {
    fn from(message: String) -> Self {
        Self(message)
    }
}
