use thiserror::Error;

#[derive(Error, Debug)]
pub enum FactsError {
    #[error("Git error: {0}")]
    Git(#[from] git2::Error),

    #[error("Backend error: {0}")]
    Backend(String),

    #[error("Unknown attribute: {0}")]
    UnknownAttribute(String),

    #[error("Config error: {0}")]
    Config(#[from] confique::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, FactsError>;
