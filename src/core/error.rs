//! Fatal setup errors
//!
//! Everything that can go wrong before the first contract call ends the
//! process. Individual read calls report through `anyhow` instead and never
//! reach this type.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum SetupError {
    #[error("no RPC endpoint configured (pass --rpc, set RPC_URL, or add [endpoint] to the config file)")]
    MissingEndpoint,

    #[error("no token address configured (pass --token, set CPOP_TOKEN_ADDRESS, or add [token] to the config file)")]
    MissingAddress,

    #[error("invalid endpoint {endpoint}: {reason}")]
    InvalidEndpoint { endpoint: String, reason: String },

    #[error("invalid address {value:?}: {reason}")]
    InvalidAddress { value: String, reason: String },

    #[error("invalid block tag {value:?}: expected a number or latest/pending/earliest/safe/finalized")]
    InvalidBlock { value: String },

    #[error("failed to connect to {endpoint}: {source:#}")]
    Connect {
        endpoint: String,
        source: anyhow::Error,
    },

    #[error("failed to load config {path}: {reason}")]
    Config { path: String, reason: String },
}
