//! Server configuration.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::rewrite::BrandRules;

/// Server configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Listen address (e.g., "0.0.0.0:3001").
    #[serde(default = "default_listen_addr")]
    pub listen_addr: String,

    /// Directory served for paths that match no API route.
    #[serde(default)]
    pub static_dir: Option<PathBuf>,

    /// Upstream fetch settings.
    #[serde(default)]
    pub fetch: FetchConfig,

    /// Brand rewrite rules.
    #[serde(default)]
    pub rules: BrandRules,
}

/// Settings for fetching upstream pages.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FetchConfig {
    /// Whole-request timeout in seconds.
    #[serde(default = "default_fetch_timeout")]
    pub timeout_secs: u64,

    /// Largest accepted response body in bytes.
    #[serde(default = "default_max_body_bytes")]
    pub max_body_bytes: usize,

    /// User-Agent sent upstream.
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

fn default_listen_addr() -> String {
    "0.0.0.0:3001".to_string()
}

fn default_fetch_timeout() -> u64 {
    10
}

fn default_max_body_bytes() -> usize {
    10 * 1024 * 1024 // 10MB
}

fn default_user_agent() -> String {
    concat!("faleproxy/", env!("CARGO_PKG_VERSION")).to_string()
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            listen_addr: default_listen_addr(),
            static_dir: None,
            fetch: FetchConfig::default(),
            rules: BrandRules::default(),
        }
    }
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            timeout_secs: default_fetch_timeout(),
            max_body_bytes: default_max_body_bytes(),
            user_agent: default_user_agent(),
        }
    }
}

impl FetchConfig {
    /// Fetch timeout as a duration.
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl ServerConfig {
    /// Load from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;
        let config: Self = toml::from_str(&content)
            .map_err(|e| Error::Config(format!("{}: {e}", path.display())))?;
        config.rules.validate()?;
        Ok(config)
    }

    /// Load from environment variables.
    ///
    /// `PORT` binds all interfaces on that port; `FALEPROXY_LISTEN` sets the
    /// full address and wins over `PORT`.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(port) = lookup("PORT") {
            let port: u16 = port
                .trim()
                .parse()
                .map_err(|_| Error::Config(format!("PORT is not a port number: {port:?}")))?;
            config.listen_addr = format!("0.0.0.0:{port}");
        }

        if let Some(addr) = lookup("FALEPROXY_LISTEN") {
            config.listen_addr = addr;
        }

        if let Some(dir) = lookup("FALEPROXY_STATIC_DIR") {
            config.static_dir = Some(PathBuf::from(dir));
        }

        if let Some(timeout) = lookup("FALEPROXY_FETCH_TIMEOUT") {
            config.fetch.timeout_secs = timeout.trim().parse().map_err(|_| {
                Error::Config(format!("FALEPROXY_FETCH_TIMEOUT is not a number: {timeout:?}"))
            })?;
        }

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::io::Write;

    use super::*;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = ServerConfig::default();
        assert_eq!(config.listen_addr, "0.0.0.0:3001");
        assert_eq!(config.fetch.timeout(), Duration::from_secs(10));
        assert_eq!(config.rules, BrandRules::default());
    }

    #[test]
    fn test_port_from_env() {
        let config = ServerConfig::from_lookup(lookup(&[("PORT", "8080")])).unwrap();
        assert_eq!(config.listen_addr, "0.0.0.0:8080");
    }

    #[test]
    fn test_listen_overrides_port() {
        let config = ServerConfig::from_lookup(lookup(&[
            ("PORT", "8080"),
            ("FALEPROXY_LISTEN", "127.0.0.1:9000"),
            ("FALEPROXY_FETCH_TIMEOUT", "3"),
        ]))
        .unwrap();
        assert_eq!(config.listen_addr, "127.0.0.1:9000");
        assert_eq!(config.fetch.timeout_secs, 3);
    }

    #[test]
    fn test_bad_port_is_config_error() {
        let err = ServerConfig::from_lookup(lookup(&[("PORT", "http")])).unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn test_load_toml() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"
listen_addr = "127.0.0.1:4000"

[fetch]
timeout_secs = 5

[rules]
target = "Acme"
replacement = "Apex"
continuations = ["Corp"]
anchor_labels = []
"#
        )
        .unwrap();

        let config = ServerConfig::load(file.path()).unwrap();
        assert_eq!(config.listen_addr, "127.0.0.1:4000");
        assert_eq!(config.fetch.timeout_secs, 5);
        assert_eq!(config.fetch.max_body_bytes, default_max_body_bytes());
        assert_eq!(config.rules.target, "Acme");
        assert_eq!(config.rules.continuations, ["Corp"]);
        assert!(config.rules.anchor_labels.is_empty());
    }

    #[test]
    fn test_load_rejects_invalid_rules() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[rules]\ntarget = \"two words\"").unwrap();
        assert!(matches!(
            ServerConfig::load(file.path()),
            Err(Error::InvalidRules(_))
        ));
    }
}
