use thiserror::Error;

use crate::domain::cart::EntryId;
use crate::domain::error::DomainError;

/// Configuration-related errors with structured variants.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("missing required field: {field}")]
    MissingField { field: &'static str },

    #[error("invalid value for {field}: {reason}")]
    InvalidValue { field: &'static str, reason: String },

    #[error("failed to read config file: {0}")]
    ReadFile(#[source] std::io::Error),

    #[error("failed to parse config: {0}")]
    Parse(#[source] toml::de::Error),
}

/// A non-success HTTP response from the backend.
///
/// Displays as `"<METHOD> <path> failed: <status text>"`.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{method} {path} failed: {status_text}")]
pub struct RequestError {
    pub method: &'static str,
    pub path: String,
    pub status: u16,
    pub status_text: String,
}

/// Local key-value storage failures.
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("failed to read storage at {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write storage at {path}: {source}")]
    Write {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("stored value for '{key}' is corrupt: {source}")]
    Corrupt {
        key: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Cart mutation errors. The cart is left unchanged when any of these is returned.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CartError {
    #[error("no cart entry with id {0}")]
    EntryNotFound(EntryId),

    #[error("cart position {index} is out of bounds (cart has {len} entries)")]
    IndexOutOfBounds { index: usize, len: usize },

    #[error("quantity would exceed {max}", max = u32::MAX)]
    QuantityOverflow,

    #[error("cart is empty")]
    Empty,

    #[error("cart total does not fit a decimal")]
    TotalOverflow,
}

/// Session errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SessionError {
    #[error("not logged in")]
    NotAuthenticated,
}

#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error(transparent)]
    Request(#[from] RequestError),

    #[error(transparent)]
    Storage(#[from] StorageError),

    #[error(transparent)]
    Cart(#[from] CartError),

    #[error(transparent)]
    Session(#[from] SessionError),

    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("URL parse error: {0}")]
    Url(#[from] url::ParseError),

    #[error("connection error: {0}")]
    Connection(String),
}

pub type Result<T> = std::result::Result<T, Error>;

impl From<dialoguer::Error> for Error {
    fn from(err: dialoguer::Error) -> Self {
        // dialoguer::Error wraps an IO error
        Error::Io(std::io::Error::other(err.to_string()))
    }
}
