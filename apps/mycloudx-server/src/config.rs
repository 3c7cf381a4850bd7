//! Configuration management for MyCloudX Server

use serde::Deserialize;
use std::env;
use std::path::PathBuf;

pub const DEFAULT_TOKEN: &str = "secret123";
pub const DEFAULT_PORT: u16 = 8000;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub server: ServerConfig,
    pub storage: StorageConfig,
    pub auth: AuthConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Advertised base URL; detected from the LAN address when unset
    pub public_url: Option<String>,
    /// Upload body cap in megabytes; unlimited when unset
    pub max_upload_mb: Option<usize>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StorageConfig {
    pub upload_dir: PathBuf,
    pub static_dir: PathBuf,
}

#[derive(Clone, Deserialize)]
pub struct AuthConfig {
    pub token: String,
}

// Keep the secret out of debug logs.
impl std::fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthConfig").field("token", &"<redacted>").finish()
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            server: ServerConfig {
                host: "0.0.0.0".to_string(),
                port: DEFAULT_PORT,
                public_url: None,
                max_upload_mb: None,
            },
            storage: StorageConfig {
                upload_dir: PathBuf::from("uploads"),
                static_dir: PathBuf::from("static"),
            },
            auth: AuthConfig {
                token: DEFAULT_TOKEN.to_string(),
            },
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build a config from an arbitrary key lookup; unset keys use defaults.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Config::default();

        Config {
            server: ServerConfig {
                host: lookup("MYCLOUDX_HOST").unwrap_or(defaults.server.host),
                port: lookup("MYCLOUDX_PORT")
                    .and_then(|p| p.parse().ok())
                    .unwrap_or(defaults.server.port),
                public_url: lookup("MYCLOUDX_PUBLIC_URL")
                    .map(|url| url.trim_end_matches('/').to_string())
                    .filter(|url| !url.is_empty()),
                max_upload_mb: lookup("MYCLOUDX_MAX_UPLOAD_MB").and_then(|mb| mb.parse().ok()),
            },
            storage: StorageConfig {
                upload_dir: lookup("MYCLOUDX_UPLOAD_DIR")
                    .map(PathBuf::from)
                    .unwrap_or(defaults.storage.upload_dir),
                static_dir: lookup("MYCLOUDX_STATIC_DIR")
                    .map(PathBuf::from)
                    .unwrap_or(defaults.storage.static_dir),
            },
            auth: AuthConfig {
                token: lookup("MYCLOUDX_TOKEN").unwrap_or(defaults.auth.token),
            },
        }
    }

    /// Upload body limit in bytes, if one is configured
    pub fn upload_limit_bytes(&self) -> Option<usize> {
        self.server.max_upload_mb.map(|mb| mb.saturating_mul(1024 * 1024))
    }
}
