//! Bridge server configuration: TOML loading, validation, and the
//! once-only cell shared by entry points that may race to load it.
//!
//! Submodules:
//! - `types` — config sections, `ServerConfig`, `ConfigError`
//! - `token` — `TokenConfig` and its per-role validation
//! - `cell` — `ConfigCell`, lazy race-safe initialization

mod cell;
mod token;
mod types;

use std::path::{Path, PathBuf};

pub use cell::ConfigCell;
pub use token::{TokenConfig, TokenRole};
pub use types::{
    ApiServerConfig, ConfigError, GatewayConfig, MongoDbConfig, RawServerConfig, ServerConfig,
    DEFAULT_API_PORT, DEFAULT_CONFIG_FILE,
};

use crate::json::{to_json_lossy, JsonStyle};

/// `server.toml` in the directory of the running executable.
pub fn default_config_path() -> Result<PathBuf, ConfigError> {
    let exe = std::env::current_exe().map_err(ConfigError::ExecutableDir)?;
    let dir = exe.parent().ok_or_else(|| {
        ConfigError::ExecutableDir(std::io::Error::other("executable path has no parent"))
    })?;
    Ok(dir.join(DEFAULT_CONFIG_FILE))
}

/// Load and validate the server configuration from `path`, or from
/// [`default_config_path`] when `path` is `None`.
pub fn load_config(path: Option<&Path>) -> Result<ServerConfig, ConfigError> {
    let path = match path {
        Some(path) => path.to_path_buf(),
        None => default_config_path()?,
    };
    tracing::info!(path = %path.display(), "loading server config");

    if !path.is_file() {
        return Err(ConfigError::NotFound(path));
    }
    let content = std::fs::read_to_string(&path).map_err(|source| ConfigError::Read {
        path: path.clone(),
        source,
    })?;

    // Logged before validation so a rejected file still shows up.
    let raw: RawServerConfig = toml::from_str(&content)?;
    tracing::info!(
        config = %to_json_lossy(&raw, JsonStyle::Compact),
        "server config parsed"
    );
    raw.validate()
}

/// Parse and validate TOML configuration text.
pub fn parse_config(content: &str) -> Result<ServerConfig, ConfigError> {
    let raw: RawServerConfig = toml::from_str(content)?;
    raw.validate()
}

impl RawServerConfig {
    /// Check required sections in file order, then the source and
    /// destination tokens.
    pub fn validate(self) -> Result<ServerConfig, ConfigError> {
        let mongodb = self.mongodb.ok_or(ConfigError::MissingSection("MongoDB"))?;
        let src_token = self
            .src_token
            .ok_or(ConfigError::MissingSection("SrcToken"))?;
        let src_gateway = self
            .src_gateway
            .ok_or(ConfigError::MissingSection("SrcGateway"))?;
        let dest_token = self
            .dest_token
            .ok_or(ConfigError::MissingSection("DestToken"))?;
        let dest_gateway = self
            .dest_gateway
            .ok_or(ConfigError::MissingSection("DestGateway"))?;

        src_token.check(TokenRole::Source)?;
        dest_token.check(TokenRole::Destination)?;

        Ok(ServerConfig {
            mongodb,
            src_token,
            src_gateway,
            dest_token,
            dest_gateway,
            api_server: self.api_server,
        })
    }
}
