//! Startup settings resolution
//!
//! Precedence for every value: CLI flag, then environment, then config file.
//! Endpoint and token address are mandatory; there is no built-in default.

use std::str::FromStr;

use alloy::primitives::Address;
use alloy::rpc::types::{BlockId, BlockNumberOrTag};

use super::{Config, EndpointConfig, TokenSpec};
use crate::core::{CallOptions, SetupError};
use crate::infrastructure::ethereum::ProviderConfig;

/// Environment variable holding the RPC endpoint
pub const ENV_RPC_URL: &str = "RPC_URL";
/// Environment variable holding the token contract address
pub const ENV_TOKEN_ADDRESS: &str = "CPOP_TOKEN_ADDRESS";

/// Values given on the command line
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub rpc: Option<String>,
    pub token: Option<String>,
    pub block: Option<String>,
    pub from: Option<String>,
}

/// Everything the client needs, resolved once at startup
#[derive(Debug, Clone)]
pub struct Settings {
    pub endpoint: ProviderConfig,
    pub token: Address,
    pub call: CallOptions,
}

pub fn resolve<F>(overrides: &Overrides, env: F, config: &Config) -> Result<Settings, SetupError>
where
    F: Fn(&str) -> Option<String>,
{
    let endpoint = resolve_endpoint(
        overrides.rpc.as_deref(),
        env(ENV_RPC_URL),
        config.endpoint.as_ref(),
    )?;
    let token = resolve_token(
        overrides.token.as_deref(),
        env(ENV_TOKEN_ADDRESS),
        config.token.as_ref(),
    )?;

    let file_token = config.token.as_ref();
    let block = non_empty(overrides.block.as_deref())
        .or_else(|| file_token.and_then(|t| non_empty(t.block.as_deref())))
        .map(parse_block)
        .transpose()?;
    let from = non_empty(overrides.from.as_deref())
        .or_else(|| file_token.and_then(|t| non_empty(t.from.as_deref())))
        .map(parse_address)
        .transpose()?;

    Ok(Settings {
        endpoint,
        token,
        call: CallOptions { from, block },
    })
}

/// Resolve the RPC endpoint.
///
/// An environment value is not trimmed, so `RPC_URL=" http://x"` reaches the
/// transport with its leading space. CLI and file values are trimmed. Any HTTP
/// value without a scheme, such as a bare `host:port`, gets an `http://` prefix.
pub fn resolve_endpoint(
    cli: Option<&str>,
    env: Option<String>,
    file: Option<&EndpointConfig>,
) -> Result<ProviderConfig, SetupError> {
    if let Some(raw) = non_empty(cli) {
        return endpoint_from_str(raw);
    }
    if let Some(raw) = env {
        return match classify(&raw)? {
            ProviderConfig::Http(url) if !url.contains("://") => {
                Ok(ProviderConfig::Http(format!("http://{}", url)))
            }
            other => Ok(other),
        };
    }
    if let Some(file) = file {
        if let Some(ipc) = non_empty(file.ipc.as_deref()) {
            return ipc_endpoint(ipc);
        }
        if let Some(ws) = non_empty(file.ws.as_deref()) {
            return Ok(ProviderConfig::WebSocket(ws.to_string()));
        }
        if let Some(rpc) = non_empty(file.rpc.as_deref()) {
            return endpoint_from_str(rpc);
        }
    }
    Err(SetupError::MissingEndpoint)
}

pub fn resolve_token(
    cli: Option<&str>,
    env: Option<String>,
    file: Option<&TokenSpec>,
) -> Result<Address, SetupError> {
    if let Some(raw) = non_empty(cli) {
        return parse_address(raw);
    }
    if let Some(raw) = env {
        return parse_address(&raw);
    }
    match file.and_then(|t| non_empty(t.address.as_deref())) {
        Some(raw) => parse_address(raw),
        None => Err(SetupError::MissingAddress),
    }
}

/// Turn a user-typed endpoint into a provider config
pub fn endpoint_from_str(raw: &str) -> Result<ProviderConfig, SetupError> {
    match classify(raw.trim())? {
        ProviderConfig::Http(url) => Ok(ProviderConfig::Http(normalize_http_endpoint(&url))),
        other => Ok(other),
    }
}

/// Parse a block selector: a decimal or `0x` number, or a named tag
pub fn parse_block(raw: &str) -> Result<BlockId, SetupError> {
    let value = raw.trim().to_ascii_lowercase();
    let tag = match value.as_str() {
        "latest" => BlockNumberOrTag::Latest,
        "pending" => BlockNumberOrTag::Pending,
        "earliest" => BlockNumberOrTag::Earliest,
        "safe" => BlockNumberOrTag::Safe,
        "finalized" => BlockNumberOrTag::Finalized,
        other => {
            let number = match other.strip_prefix("0x") {
                Some(hex) => u64::from_str_radix(hex, 16).ok(),
                None => other.parse::<u64>().ok(),
            };
            match number {
                Some(n) => BlockNumberOrTag::Number(n),
                None => {
                    return Err(SetupError::InvalidBlock {
                        value: raw.to_string(),
                    })
                }
            }
        }
    };
    Ok(BlockId::Number(tag))
}

fn parse_address(raw: &str) -> Result<Address, SetupError> {
    Address::from_str(raw.trim()).map_err(|err| SetupError::InvalidAddress {
        value: raw.to_string(),
        reason: err.to_string(),
    })
}

fn classify(raw: &str) -> Result<ProviderConfig, SetupError> {
    if raw.starts_with("ws://") || raw.starts_with("wss://") {
        return Ok(ProviderConfig::WebSocket(raw.to_string()));
    }
    if raw.ends_with(".ipc") {
        return ipc_endpoint(raw);
    }
    Ok(ProviderConfig::Http(raw.to_string()))
}

#[cfg(unix)]
fn ipc_endpoint(path: &str) -> Result<ProviderConfig, SetupError> {
    Ok(ProviderConfig::Ipc(path.into()))
}

#[cfg(not(unix))]
fn ipc_endpoint(path: &str) -> Result<ProviderConfig, SetupError> {
    Err(SetupError::InvalidEndpoint {
        endpoint: path.to_string(),
        reason: "IPC is not supported on this platform".to_string(),
    })
}

fn normalize_http_endpoint(endpoint: &str) -> String {
    if endpoint.starts_with("http://") || endpoint.starts_with("https://") {
        endpoint.to_string()
    } else {
        format!("http://{}", endpoint)
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|s| !s.is_empty())
}
