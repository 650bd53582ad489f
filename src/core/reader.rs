//! Capability seam over the generated token binding

use alloy::primitives::{Address, U256};
use alloy::rpc::types::BlockId;
use anyhow::Result;

/// Per-call options for read-only calls.
///
/// The default leaves both fields unset: no caller override, and the node
/// answers against its latest block.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CallOptions {
    /// Caller address reported to the contract (`msg.sender`)
    pub from: Option<Address>,
    /// Block to execute the call against
    pub block: Option<BlockId>,
}

impl CallOptions {
    pub fn is_default(&self) -> bool {
        self.from.is_none() && self.block.is_none()
    }
}

/// Read-only token accessors.
///
/// Implemented by `TokenBinding` over a live provider. Each call is
/// independent; implementations keep no state between them.
#[async_trait::async_trait]
pub trait TokenReader: Send + Sync {
    /// Read the token name
    async fn name(&self, opts: &CallOptions) -> Result<String>;

    /// Read the token symbol
    async fn symbol(&self, opts: &CallOptions) -> Result<String>;

    /// Read the total supply in base units
    async fn total_supply(&self, opts: &CallOptions) -> Result<U256>;
}
