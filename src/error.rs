use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LoadError {
    /// A required request failed or came back with a non-success status.
    #[error("network error: {0}")]
    Network(String),

    /// A response body could not be decoded or lacks a required field.
    #[error("unexpected data shape: {0}")]
    DataShape(String),
}

impl LoadError {
    pub fn missing_field(record: &str, field: &str) -> Self {
        LoadError::DataShape(format!("{} is missing required field `{}`", record, field))
    }
}

impl From<reqwest::Error> for LoadError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            LoadError::DataShape(err.to_string())
        } else {
            LoadError::Network(err.to_string())
        }
    }
}

impl From<serde_json::Error> for LoadError {
    fn from(err: serde_json::Error) -> Self {
        LoadError::DataShape(err.to_string())
    }
}
