//! Server configuration sections and the configuration error type.
//!
//! Field names follow the bridge's TOML layout (`MongoDB`, `SrcToken`,
//! `DbURL`, ...). Credentials are skipped when a config is serialized, so the
//! JSON form is safe to log.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use super::token::{TokenConfig, TokenRole};

pub const DEFAULT_API_PORT: u16 = 11556;
pub const DEFAULT_CONFIG_FILE: &str = "server.toml";

// ==============================================================================
// Sections
// ==============================================================================

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MongoDbConfig {
    #[serde(rename = "DbURL")]
    pub db_url: String,
    #[serde(rename = "DbName")]
    pub db_name: String,
    #[serde(rename = "UserName", skip_serializing)]
    pub user_name: String,
    #[serde(rename = "Password", skip_serializing)]
    pub password: String,
}

impl MongoDbConfig {
    /// Connection URL, with `user:password@` prepended when credentials are set.
    pub fn url(&self) -> String {
        if self.user_name.is_empty() && self.password.is_empty() {
            return self.db_url.clone();
        }
        format!("{}:{}@{}", self.user_name, self.password, self.db_url)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GatewayConfig {
    #[serde(rename = "ApiAddress")]
    pub api_address: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiServerConfig {
    /// Zero means "use [`DEFAULT_API_PORT`]".
    #[serde(rename = "Port")]
    pub port: u16,
}

// ==============================================================================
// Whole File
// ==============================================================================

/// The configuration file as parsed, before required sections are checked.
/// Serializes like [`ServerConfig`], leaving out absent sections.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawServerConfig {
    #[serde(rename = "MongoDB", skip_serializing_if = "Option::is_none")]
    pub mongodb: Option<MongoDbConfig>,
    #[serde(rename = "SrcToken", skip_serializing_if = "Option::is_none")]
    pub src_token: Option<TokenConfig>,
    #[serde(rename = "SrcGateway", skip_serializing_if = "Option::is_none")]
    pub src_gateway: Option<GatewayConfig>,
    #[serde(rename = "DestToken", skip_serializing_if = "Option::is_none")]
    pub dest_token: Option<TokenConfig>,
    #[serde(rename = "DestGateway", skip_serializing_if = "Option::is_none")]
    pub dest_gateway: Option<GatewayConfig>,
    #[serde(rename = "ApiServer", skip_serializing_if = "Option::is_none")]
    pub api_server: Option<ApiServerConfig>,
}

/// A validated bridge server configuration. Every required section is
/// present and both token configs passed their checks.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ServerConfig {
    #[serde(rename = "MongoDB")]
    pub mongodb: MongoDbConfig,
    #[serde(rename = "SrcToken")]
    pub src_token: TokenConfig,
    #[serde(rename = "SrcGateway")]
    pub src_gateway: GatewayConfig,
    #[serde(rename = "DestToken")]
    pub dest_token: TokenConfig,
    #[serde(rename = "DestGateway")]
    pub dest_gateway: GatewayConfig,
    #[serde(rename = "ApiServer", skip_serializing_if = "Option::is_none")]
    pub api_server: Option<ApiServerConfig>,
}

impl ServerConfig {
    /// The API server port, falling back to [`DEFAULT_API_PORT`] when the
    /// section is absent or the port is zero.
    pub fn api_port(&self) -> u16 {
        self.api_server
            .as_ref()
            .map(|api| api.port)
            .filter(|port| *port != 0)
            .unwrap_or(DEFAULT_API_PORT)
    }
}

// ==============================================================================
// Errors
// ==============================================================================

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("cannot determine executable directory: {0}")]
    ExecutableDir(#[source] std::io::Error),

    #[error("config file {} does not exist", .0.display())]
    NotFound(PathBuf),

    #[error("cannot read config file {}: {source}", path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("cannot parse config file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("server must config '{0}'")]
    MissingSection(&'static str),

    #[error("invalid {role} token config: {message}")]
    InvalidToken { role: TokenRole, message: String },
}
