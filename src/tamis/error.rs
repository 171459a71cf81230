use thiserror::Error;

#[derive(Error, Debug)]
pub enum TamisError {
    #[error("Invalid date token '{token}': {source}")]
    DateParse {
        token: String,
        source: chrono::format::ParseError,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, TamisError>;
