//! Unified error type.

use thiserror::Error;

/// The error type returned by userbase's infrastructure operations.
///
/// Request-level failures (404, 422, etc.) are expressed as HTTP
/// [`Response`](crate::Response) values, not as `Error`s. This type surfaces
/// failures that happen outside a request: reading configuration, binding to a
/// port, or accepting a connection.
#[derive(Debug, Error)]
pub enum Error {
    #[error("io: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid config value for {key}: {message}")]
    Config { key: &'static str, message: String },
}

pub type Result<T> = std::result::Result<T, Error>;
