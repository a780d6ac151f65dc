//! Error types.

use std::fmt;

/// Result type with crate Error.
pub type Result<T> = std::result::Result<T, Error>;

/// Server and build errors.
#[derive(Debug)]
pub enum Error {
    /// HTTP protocol error.
    Hyper(hyper::Error),
    /// IO error.
    Io(std::io::Error),
    /// Bundle configuration parse error.
    Config(toml::de::Error),
    /// Bundle step failure.
    Bundle(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Hyper(e) => write!(f, "HTTP error: {}", e),
            Error::Io(e) => write!(f, "IO error: {}", e),
            Error::Config(e) => write!(f, "bundle config error: {}", e),
            Error::Bundle(msg) => write!(f, "bundle error: {}", msg),
        }
    }
}

impl std::error::Error for Error {}

impl From<hyper::Error> for Error {
    fn from(err: hyper::Error) -> Self {
        Error::Hyper(err)
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io(err)
    }
}

impl From<toml::de::Error> for Error {
    fn from(err: toml::de::Error) -> Self {
        Error::Config(err)
    }
}
