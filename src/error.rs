//! Typed errors for the library layers.
//!
//! RPC failures are deliberately not wrapped: a failed call is a
//! `tonic::Status` and stays one all the way up.

use thiserror::Error;

/// Errors raised while loading configuration from the environment.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {key}: {message}")]
    InvalidValue { key: String, message: String },
}

/// Errors raised while opening the emulator channel.
#[derive(Debug, Error)]
pub enum ChannelError {
    #[error("invalid emulator address `{addr}`")]
    InvalidAddress {
        addr: String,
        #[source]
        source: tonic::transport::Error,
    },

    #[error("failed to connect to emulator at {addr}")]
    Connect {
        addr: String,
        #[source]
        source: tonic::transport::Error,
    },

    #[error("auth token is not valid header material")]
    InvalidToken,
}
