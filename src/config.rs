// src/config.rs

use std::env;
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

use crate::providers::dexscreener::DEXSCREENER_BASE_URL;
use crate::providers::gemini::DEFAULT_MODEL;
use crate::providers::solana_rpc::MAINNET_RPC_URL;

mod defaults {
    pub const OUTPUT_DIR: &str = "tokens";
    pub const TOP_N: usize = 3;
    pub const HTTP_TIMEOUT_SECS: u64 = 10;
    pub const CACHE_TTL_SECS: u64 = 600;
    pub const API_HOST: &str = "0.0.0.0";
    pub const API_PORT: u16 = 3000;
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {name}: {value}")]
    InvalidValue { name: String, value: String },
}

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub solana_rpc_url: String,
    pub dexscreener_base_url: String,
    pub gemini_api_key: Option<String>,
    pub gemini_model: String,
    pub output_dir: PathBuf,
    pub top_n: usize,
    pub http_timeout: Duration,
    pub cache_ttl_secs: u64,
    pub api_host: String,
    pub api_port: u16,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            solana_rpc_url: MAINNET_RPC_URL.to_string(),
            dexscreener_base_url: DEXSCREENER_BASE_URL.to_string(),
            gemini_api_key: None,
            gemini_model: DEFAULT_MODEL.to_string(),
            output_dir: PathBuf::from(defaults::OUTPUT_DIR),
            top_n: defaults::TOP_N,
            http_timeout: Duration::from_secs(defaults::HTTP_TIMEOUT_SECS),
            cache_ttl_secs: defaults::CACHE_TTL_SECS,
            api_host: defaults::API_HOST.to_string(),
            api_port: defaults::API_PORT,
        }
    }
}

impl AppConfig {
    /// Read settings from the process environment (and `.env` if present).
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|name| env::var(name).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(url) = lookup("SOLANA_RPC_URL") {
            config.solana_rpc_url = url;
        }
        if let Some(url) = lookup("DEXSCREENER_BASE_URL") {
            config.dexscreener_base_url = url;
        }
        config.gemini_api_key = lookup("GEMINI_API_KEY").filter(|key| !key.trim().is_empty());
        if let Some(model) = lookup("GEMINI_MODEL") {
            config.gemini_model = model;
        }
        if let Some(dir) = lookup("OUTPUT_DIR") {
            config.output_dir = PathBuf::from(dir);
        }
        if let Some(top_n) = parse_var(&lookup, "TOP_N")? {
            config.top_n = top_n;
        }
        if let Some(secs) = parse_var(&lookup, "HTTP_TIMEOUT_SECS")? {
            config.http_timeout = Duration::from_secs(secs);
        }
        if let Some(secs) = parse_var(&lookup, "CACHE_TTL_SECS")? {
            config.cache_ttl_secs = secs;
        }
        if let Some(host) = lookup("API_HOST") {
            config.api_host = host;
        }
        if let Some(port) = parse_var(&lookup, "API_PORT")? {
            config.api_port = port;
        }

        Ok(config)
    }
}

fn parse_var<F, T>(lookup: &F, name: &str) -> Result<Option<T>, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
{
    match lookup(name) {
        None => Ok(None),
        Some(value) => value
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| ConfigError::InvalidValue {
                name: name.to_string(),
                value,
            }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = AppConfig::from_lookup(lookup_from(&[])).unwrap();

        assert_eq!(config.solana_rpc_url, MAINNET_RPC_URL);
        assert_eq!(config.top_n, 3);
        assert_eq!(config.output_dir, PathBuf::from("tokens"));
        assert!(config.gemini_api_key.is_none());
        assert_eq!(config.api_port, 3000);
    }

    #[test]
    fn test_overrides() {
        let config = AppConfig::from_lookup(lookup_from(&[
            ("SOLANA_RPC_URL", "http://localhost:8899"),
            ("GEMINI_API_KEY", "secret"),
            ("TOP_N", "5"),
            ("HTTP_TIMEOUT_SECS", "30"),
        ]))
        .unwrap();

        assert_eq!(config.solana_rpc_url, "http://localhost:8899");
        assert_eq!(config.gemini_api_key.as_deref(), Some("secret"));
        assert_eq!(config.top_n, 5);
        assert_eq!(config.http_timeout, Duration::from_secs(30));
    }

    #[test]
    fn test_blank_api_key_is_absent() {
        let config = AppConfig::from_lookup(lookup_from(&[("GEMINI_API_KEY", "  ")])).unwrap();

        assert!(config.gemini_api_key.is_none());
    }

    #[test]
    fn test_invalid_number() {
        let err = AppConfig::from_lookup(lookup_from(&[("API_PORT", "eighty")])).unwrap_err();

        assert!(matches!(err, ConfigError::InvalidValue { ref name, .. } if name == "API_PORT"));
    }
}
