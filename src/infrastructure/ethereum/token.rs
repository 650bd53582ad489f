//! CPOP token binding
//!
//! The interface is generated by `sol!`; this file only adapts it to the
//! `TokenReader` seam and applies per-call options.

use alloy::primitives::{Address, U256};
use alloy::providers::DynProvider;
use alloy::sol;
use anyhow::{Context, Result};

use super::provider::Session;
use crate::core::{CallOptions, TokenReader};

sol! {
    /// Read-only surface of the CPOP token
    #[sol(rpc)]
    interface ICPOPToken {
        function name() external view returns (string);
        function symbol() external view returns (string);
        function totalSupply() external view returns (uint256);
    }
}

// Apply caller override and block pinning to a generated call builder
macro_rules! with_call_options {
    ($call:expr, $opts:expr) => {{
        let mut call = $call;
        if let Some(from) = $opts.from {
            call = call.from(from);
        }
        if let Some(block) = $opts.block {
            call = call.block(block);
        }
        call
    }};
}

/// Typed binding of `{session provider, token address}`
#[derive(Clone)]
pub struct TokenBinding {
    contract: ICPOPToken::ICPOPTokenInstance<DynProvider>,
}

impl TokenBinding {
    pub fn new(session: &Session, address: Address) -> Self {
        Self {
            contract: ICPOPToken::new(address, session.provider().clone()),
        }
    }

    pub fn address(&self) -> Address {
        *self.contract.address()
    }
}

#[async_trait::async_trait]
impl TokenReader for TokenBinding {
    async fn name(&self, opts: &CallOptions) -> Result<String> {
        let call = with_call_options!(self.contract.name(), opts);
        call.call().await.context("name() call failed")
    }

    async fn symbol(&self, opts: &CallOptions) -> Result<String> {
        let call = with_call_options!(self.contract.symbol(), opts);
        call.call().await.context("symbol() call failed")
    }

    async fn total_supply(&self, opts: &CallOptions) -> Result<U256> {
        let call = with_call_options!(self.contract.totalSupply(), opts);
        call.call().await.context("totalSupply() call failed")
    }
}
