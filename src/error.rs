use thiserror::Error;

/// Reasons a mention encoding could not be decoded. These never leave the
/// resolver: they are logged and collapsed into "no mentions".
#[derive(Debug, Error)]
pub enum MentionDecodeError {
    #[error("metadata has no mention key '{0}'")]
    MissingKey(String),

    #[error("mention value under '{key}' is not an array or JSON string: {found}")]
    UnexpectedShape { key: String, found: &'static str },

    #[error("invalid mention JSON: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("configuration field '{field}' must not be empty")]
    Empty { field: &'static str },

    #[error("configuration field '{field}' has invalid value '{value}': {reason}")]
    Invalid {
        field: &'static str,
        value: String,
        reason: &'static str,
    },
}

pub type MentionResult<T> = Result<T, MentionDecodeError>;
