//! Server error types
//!
//! Only startup can fail; once the listener is bound, request-level problems
//! are answered with HTTP status codes instead of errors.

use std::io;
use std::net::SocketAddr;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ServerError {
    #[error("configuration error: {source}")]
    Config {
        #[from]
        source: config::ConfigError,
    },

    #[error("invalid address '{addr}': {reason}")]
    InvalidAddress { addr: String, reason: String },

    #[error("invalid route path '{path}': must start with '/'")]
    InvalidRoute { path: String },

    #[error("failed to bind {addr}: {source}")]
    Bind {
        addr: SocketAddr,
        #[source]
        source: io::Error,
    },

    #[error("io error: {source}")]
    Io {
        #[from]
        source: io::Error,
    },
}
