//! Startup error types
//!
//! Everything here is fatal: the process reports the error and exits.
//! Per-request failures never reach this type, they become HTTP statuses.

use std::io;
use std::net::SocketAddr;
use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    #[error("failed to load configuration: {0}")]
    Config(#[from] config::ConfigError),

    #[error("invalid listen address '{0}'")]
    InvalidAddress(String),

    #[error("served root '{}' is not accessible: {source}", path.display())]
    Root { path: PathBuf, source: io::Error },

    #[error("failed to bind {addr}: {source}")]
    Bind { addr: SocketAddr, source: io::Error },

    #[error("failed to initialize logging: {0}")]
    Logger(#[source] io::Error),

    #[error("failed to start runtime: {0}")]
    Runtime(#[source] io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bind_error_message() {
        let err = ServerError::Bind {
            addr: "0.0.0.0:8765".parse().unwrap(),
            source: io::Error::from(io::ErrorKind::AddrInUse),
        };
        let message = err.to_string();
        assert!(message.starts_with("failed to bind 0.0.0.0:8765: "));
    }

    #[test]
    fn test_root_error_message() {
        let err = ServerError::Root {
            path: PathBuf::from("/nowhere"),
            source: io::Error::from(io::ErrorKind::NotFound),
        };
        assert!(err.to_string().contains("'/nowhere'"));
    }
}
