//! Provider construction and the connected session
//!
//! A `Session` only exists once the node has answered a handshake, so
//! anything built from it (the token binding in particular) cannot run
//! against an endpoint that never came up.

#[cfg(unix)]
use std::path::PathBuf;

use alloy::providers::{DynProvider, Provider, ProviderBuilder};
use anyhow::{Context, Result};
use tracing::{debug, info};

use crate::core::SetupError;

/// Provider configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProviderConfig {
    /// HTTP JSON-RPC endpoint
    Http(String),
    /// WebSocket endpoint
    WebSocket(String),
    /// IPC socket path (Unix only)
    #[cfg(unix)]
    Ipc(PathBuf),
}

impl ProviderConfig {
    /// Get display name for this endpoint
    pub fn display(&self) -> String {
        match self {
            ProviderConfig::Http(url) => url.clone(),
            ProviderConfig::WebSocket(url) => url.clone(),
            #[cfg(unix)]
            ProviderConfig::Ipc(path) => path.display().to_string(),
        }
    }

    pub fn transport(&self) -> &'static str {
        match self {
            ProviderConfig::Http(_) => "http",
            ProviderConfig::WebSocket(_) => "ws",
            #[cfg(unix)]
            ProviderConfig::Ipc(_) => "ipc",
        }
    }
}

/// Create a provider from configuration.
///
/// HTTP providers are lazy; WebSocket and IPC dial immediately.
pub async fn create_provider(config: ProviderConfig) -> Result<DynProvider> {
    match config {
        ProviderConfig::Http(url) => {
            let rpc_url = url.parse().context("Invalid HTTP URL")?;
            Ok(ProviderBuilder::new().connect_http(rpc_url).erased())
        }
        ProviderConfig::WebSocket(url) => {
            let provider = ProviderBuilder::new()
                .connect(&url)
                .await
                .context("Failed to create WebSocket provider")?;
            Ok(provider.erased())
        }
        #[cfg(unix)]
        ProviderConfig::Ipc(path) => {
            use alloy::providers::IpcConnect;
            let ipc = IpcConnect::new(path.to_string_lossy().to_string());
            let provider = ProviderBuilder::new()
                .connect_ipc(ipc)
                .await
                .context("Failed to create IPC provider")?;
            Ok(provider.erased())
        }
    }
}

/// Connected client handle
#[derive(Clone)]
pub struct Session {
    provider: DynProvider,
    endpoint: String,
    chain_id: u64,
    node_kind: String,
}

impl Session {
    /// Build a provider for `config` and confirm the node answers.
    ///
    /// `eth_chainId` is the handshake; its failure is a connection failure.
    /// `web3_clientVersion` is best effort and only names the node.
    pub async fn open(config: ProviderConfig) -> Result<Self, SetupError> {
        let endpoint = config.display();
        debug!(%endpoint, transport = config.transport(), "Opening RPC connection");

        let provider = create_provider(config)
            .await
            .map_err(|source| connect_error(&endpoint, source))?;

        let chain_id = provider
            .get_chain_id()
            .await
            .context("eth_chainId handshake failed")
            .map_err(|source| connect_error(&endpoint, source))?;

        let node_kind = match provider.get_client_version().await {
            Ok(version) => detect_node_kind(&version),
            Err(err) => {
                debug!(error = %err, "web3_clientVersion unavailable");
                "unknown".to_string()
            }
        };

        info!(%endpoint, chain_id, node = %node_kind, "Connected to RPC endpoint");

        Ok(Self {
            provider,
            endpoint,
            chain_id,
            node_kind,
        })
    }

    pub fn provider(&self) -> &DynProvider {
        &self.provider
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    pub fn chain_id(&self) -> u64 {
        self.chain_id
    }

    pub fn node_kind(&self) -> &str {
        &self.node_kind
    }
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("endpoint", &self.endpoint)
            .field("chain_id", &self.chain_id)
            .field("node_kind", &self.node_kind)
            .finish_non_exhaustive()
    }
}

fn connect_error(endpoint: &str, source: anyhow::Error) -> SetupError {
    SetupError::Connect {
        endpoint: endpoint.to_string(),
        source,
    }
}

/// Detect node kind from client version string
fn detect_node_kind(version: &str) -> String {
    let lower = version.to_lowercase();
    if lower.contains("anvil") {
        "anvil".to_string()
    } else if lower.contains("reth") {
        "reth".to_string()
    } else if lower.contains("geth") || lower.contains("go-ethereum") {
        "geth".to_string()
    } else if lower.contains("erigon") {
        "erigon".to_string()
    } else {
        version.to_string()
    }
}
