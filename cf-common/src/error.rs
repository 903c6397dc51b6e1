use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("config error: {0}")]
    ConfigError(String),

    #[error("connection error: {0}")]
    ConnectionError(String),

    #[error("query error: {0}")]
    QueryError(String),

    #[error("parse error: {0}")]
    ParseError(String),

    #[error("metadata error: {0}")]
    MetadataError(String),

    #[error("io error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("enum parse error: {0}")]
    EnumParseError(#[from] strum::ParseError),
}

impl Error {
    /// Lost connections end the whole run, every other failure only ends one statement.
    pub fn is_fatal(&self) -> bool {
        matches!(self, Error::ConnectionError(_))
    }

    pub fn from_sqlx(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::Io(_)
            | sqlx::Error::Tls(_)
            | sqlx::Error::Protocol(_)
            | sqlx::Error::Configuration(_)
            | sqlx::Error::PoolTimedOut
            | sqlx::Error::PoolClosed
            | sqlx::Error::WorkerCrashed => Error::ConnectionError(err.to_string()),
            _ => Error::QueryError(err.to_string()),
        }
    }
}
