use thiserror::Error;

pub type EmbedResult<T> = Result<T, EmbedError>;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum EmbedError {
    #[error("Formula module requires the typesetting engine")]
    TypesetterUnavailable,

    #[error("Unknown embed format '{name}'")]
    UnknownFormat { name: String },

    #[error("Index {index} is out of bounds for document of length {length}")]
    IndexOutOfBounds { index: usize, length: usize },

    #[error("No embed found at index {index}")]
    NoEmbedAt { index: usize },

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("YAML error: {0}")]
    YamlError(String),

    #[error("I/O error: {0}")]
    Io(String),
}

/// Error reported by a typesetting engine for a single formula.
#[derive(Error, Debug, Clone, PartialEq)]
#[error("Typesetting failed: {message}")]
pub struct TypesetError {
    pub message: String,
}

impl TypesetError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl From<serde_yaml::Error> for EmbedError {
    fn from(err: serde_yaml::Error) -> Self {
        EmbedError::YamlError(err.to_string())
    }
}

impl From<std::io::Error> for EmbedError {
    fn from(err: std::io::Error) -> Self {
        EmbedError::Io(err.to_string())
    }
}
