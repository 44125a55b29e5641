use thiserror::Error;

#[derive(Error, Debug)]
pub enum CoreError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Deserialization error: {0}")]
    Deserialization(#[from] serde_json::Error),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Locale parse error: {0}")]
    LocaleParse(String),

    #[error("Unknown locale: {0}")]
    UnknownLocale(String),
}

pub type Result<T> = std::result::Result<T, CoreError>;
