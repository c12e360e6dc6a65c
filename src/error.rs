use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum IndexError {
    /// Merging requires at least one position.
    #[error("Cannot merge an empty sequence of positions")]
    EmptyInput,

    #[error("Unknown document: {0}")]
    UnknownDocument(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

pub type Result<T> = std::result::Result<T, IndexError>;
