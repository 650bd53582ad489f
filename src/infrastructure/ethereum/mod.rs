//! Ethereum infrastructure - Alloy provider and contract binding

mod provider;
mod token;

pub use provider::{create_provider, ProviderConfig, Session};
pub use token::{ICPOPToken, TokenBinding};
