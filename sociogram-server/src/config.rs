// Copyright 2025 Sociogram Contributors
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU Affero General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the
// GNU Affero General Public License for more details.
//
// You should have received a copy of the GNU Affero General Public License
// along with this program. If not, see <https://www.gnu.org/licenses/>.

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::path::{Path, PathBuf};

/// Sociogram Server Configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    #[serde(default)]
    pub server: HttpServerConfig,
    #[serde(default)]
    pub limits: LimitsConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct HttpServerConfig {
    /// HTTP API listen address (e.g., "127.0.0.1:5000")
    #[serde(default = "default_http_addr")]
    pub listen_addr: String,

    /// Request timeout in seconds
    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,

    /// Enable CORS
    #[serde(default = "default_enable_cors")]
    pub enable_cors: bool,

    /// Allowed CORS origins (empty = allow all, use specific origins in production)
    #[serde(default)]
    pub cors_origins: Vec<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LimitsConfig {
    /// Maximum accepted upload size in bytes
    #[serde(default = "default_max_upload_bytes")]
    pub max_upload_bytes: usize,
}

// Default values
fn default_http_addr() -> String {
    "127.0.0.1:5000".to_string()
}

fn default_request_timeout() -> u64 {
    30
}

fn default_enable_cors() -> bool {
    true
}

fn default_max_upload_bytes() -> usize {
    64 * 1024 * 1024
}

impl Default for HttpServerConfig {
    fn default() -> Self {
        Self {
            listen_addr: default_http_addr(),
            request_timeout_secs: default_request_timeout(),
            enable_cors: default_enable_cors(),
            cors_origins: vec![],
        }
    }
}

impl Default for LimitsConfig {
    fn default() -> Self {
        Self {
            max_upload_bytes: default_max_upload_bytes(),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            server: HttpServerConfig::default(),
            limits: LimitsConfig::default(),
        }
    }
}

impl ServerConfig {
    /// Load configuration from TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Self = toml::from_str(&content)?;
        Ok(config)
    }

    /// Load configuration from environment variables
    ///
    /// Supported environment variables:
    /// - SOCIOGRAM_HTTP_ADDR: HTTP listen address (default: 127.0.0.1:5000)
    /// - SOCIOGRAM_REQUEST_TIMEOUT: Request timeout in seconds (default: 30)
    /// - SOCIOGRAM_ENABLE_CORS: Enable CORS (default: true)
    /// - SOCIOGRAM_MAX_UPLOAD_BYTES: Maximum upload size in bytes (default: 64 MiB)
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(addr) = std::env::var("SOCIOGRAM_HTTP_ADDR") {
            config.server.listen_addr = addr;
        }

        if let Ok(timeout) = std::env::var("SOCIOGRAM_REQUEST_TIMEOUT") {
            if let Ok(val) = timeout.parse() {
                config.server.request_timeout_secs = val;
            }
        }

        if let Ok(cors) = std::env::var("SOCIOGRAM_ENABLE_CORS") {
            config.server.enable_cors = cors.parse().unwrap_or(true);
        }

        if let Ok(limit) = std::env::var("SOCIOGRAM_MAX_UPLOAD_BYTES") {
            if let Ok(val) = limit.parse() {
                config.limits.max_upload_bytes = val;
            }
        }

        config
    }

    /// Load configuration with priority: env > file > defaults
    pub fn load(config_file: Option<PathBuf>) -> Result<Self> {
        let mut config = if let Some(path) = config_file {
            if path.exists() {
                tracing::info!("Loading configuration from file: {:?}", path);
                Self::from_file(&path)?
            } else {
                tracing::warn!("Config file not found: {:?}, using defaults", path);
                Self::default()
            }
        } else {
            Self::default()
        };

        config = Self::merge_with_env(config);

        Ok(config)
    }

    /// Merge config with environment variables (env takes priority)
    fn merge_with_env(mut config: Self) -> Self {
        let env_config = Self::from_env();

        // Only override if env var was explicitly set
        if std::env::var("SOCIOGRAM_HTTP_ADDR").is_ok() {
            config.server.listen_addr = env_config.server.listen_addr;
        }
        if std::env::var("SOCIOGRAM_REQUEST_TIMEOUT").is_ok() {
            config.server.request_timeout_secs = env_config.server.request_timeout_secs;
        }
        if std::env::var("SOCIOGRAM_ENABLE_CORS").is_ok() {
            config.server.enable_cors = env_config.server.enable_cors;
        }
        if std::env::var("SOCIOGRAM_MAX_UPLOAD_BYTES").is_ok() {
            config.limits.max_upload_bytes = env_config.limits.max_upload_bytes;
        }

        config
    }

    /// Parse listen address as SocketAddr
    pub fn socket_addr(&self) -> Result<SocketAddr> {
        Ok(self.server.listen_addr.parse()?)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        self.socket_addr()?;

        if self.limits.max_upload_bytes == 0 {
            anyhow::bail!("max_upload_bytes must be greater than zero");
        }

        if self.server.request_timeout_secs == 0 {
            anyhow::bail!("request_timeout_secs must be greater than zero");
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_config() {
        let config = ServerConfig::default();
        assert_eq!(config.server.listen_addr, "127.0.0.1:5000");
        assert!(config.server.enable_cors);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            "[server]\nlisten_addr = \"0.0.0.0:8080\"\n\n[limits]\nmax_upload_bytes = 1024"
        )
        .unwrap();

        let config = ServerConfig::from_file(file.path()).unwrap();
        assert_eq!(config.server.listen_addr, "0.0.0.0:8080");
        assert_eq!(config.limits.max_upload_bytes, 1024);
        // Unset fields fall back to defaults.
        assert_eq!(config.server.request_timeout_secs, 30);
    }

    #[test]
    fn test_validate_rejects_bad_addr() {
        let config = ServerConfig {
            server: HttpServerConfig {
                listen_addr: "not-an-address".to_string(),
                ..Default::default()
            },
            limits: LimitsConfig::default(),
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_zero_limit() {
        let config = ServerConfig {
            server: HttpServerConfig::default(),
            limits: LimitsConfig {
                max_upload_bytes: 0,
            },
        };
        assert!(config.validate().is_err());
    }
}
