//! Read-only query client for the CPOP token contract.
//!
//! The crate is layered the same way as the binary uses it:
//! - `config`: config file loading and settings resolution
//! - `infrastructure`: Alloy provider construction and the token binding
//! - `core`: the query sequence, its outcomes and the fatal error taxonomy

pub mod config;
pub mod core;
pub mod infrastructure;

pub use crate::config::Settings;
pub use crate::core::{run_queries, CallOptions, QueryReport, SetupError, TokenQuery, TokenReader};
pub use crate::infrastructure::ethereum::{ProviderConfig, Session, TokenBinding};
