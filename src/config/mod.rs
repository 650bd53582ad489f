use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::core::SetupError;

mod settings;

pub use settings::{
    endpoint_from_str, parse_block, resolve, resolve_endpoint, resolve_token, Overrides, Settings,
    ENV_RPC_URL, ENV_TOKEN_ADDRESS,
};

/// Environment variable pointing at an explicit config file
pub const ENV_CONFIG: &str = "CPOP_CONFIG";

#[derive(Debug, Clone, Default, Deserialize)]
pub struct EndpointConfig {
    pub rpc: Option<String>,
    pub ws: Option<String>,
    pub ipc: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct TokenSpec {
    pub address: Option<String>,
    pub block: Option<String>,
    pub from: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub endpoint: Option<EndpointConfig>,

    #[serde(default)]
    pub token: Option<TokenSpec>,
}

/// Load the config file.
///
/// An explicit path (`--config` or `CPOP_CONFIG`) must exist. The default
/// location may be absent, which yields an empty config. A file that exists
/// but does not parse is fatal.
pub fn load(path: Option<&Path>) -> Result<Config, SetupError> {
    let explicit = path
        .map(Path::to_path_buf)
        .or_else(|| std::env::var_os(ENV_CONFIG).map(PathBuf::from));
    load_with(explicit.as_deref(), default_config_path())
}

fn load_with(explicit: Option<&Path>, fallback: Option<PathBuf>) -> Result<Config, SetupError> {
    match (explicit, fallback) {
        (Some(path), _) => read(path, false),
        (None, Some(path)) => load_from(&path),
        (None, None) => Ok(Config::default()),
    }
}

pub fn load_from(path: &Path) -> Result<Config, SetupError> {
    read(path, true)
}

fn read(path: &Path, allow_missing: bool) -> Result<Config, SetupError> {
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(err) if allow_missing && err.kind() == io::ErrorKind::NotFound => {
            tracing::debug!(path = %path.display(), "No config file, using defaults");
            return Ok(Config::default());
        }
        Err(err) => {
            return Err(SetupError::Config {
                path: path.display().to_string(),
                reason: err.to_string(),
            })
        }
    };
    parse(&content).map_err(|reason| SetupError::Config {
        path: path.display().to_string(),
        reason,
    })
}

pub fn parse(content: &str) -> Result<Config, String> {
    toml::from_str::<Config>(content).map_err(|err| err.to_string())
}

/// Default config location, used when no explicit path is given
pub fn default_config_path() -> Option<PathBuf> {
    if let Some(xdg) = std::env::var_os("XDG_CONFIG_HOME").map(PathBuf::from) {
        return Some(xdg.join("cpop-query").join("config.toml"));
    }
    if let Some(home) = std::env::var_os("HOME").map(PathBuf::from) {
        return Some(home.join(".config").join("cpop-query").join("config.toml"));
    }

    directories::ProjectDirs::from("io", "cpop", "cpop-query")
        .map(|dirs| dirs.config_dir().join("config.toml"))
}
