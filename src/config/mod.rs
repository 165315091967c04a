use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result, bail};
use config::{Config, ConfigError, Environment, File, FileFormat};
use serde::Deserialize;

pub const DEFAULT_NETWORK: &str = "base-mainnet";
pub const DEFAULT_NEYNAR_URL: &str = "https://api.neynar.com";
pub const DEFAULT_NAMES_RPC_URL: &str = "https://mainnet.base.org";
/// Basenames L2 resolver deployed on Base mainnet.
pub const DEFAULT_RESOLVER_ADDRESS: &str = "0xC6d566A56A1aFf6508b41f6c90ff131615583BCD";
pub const BASE_CHAIN_ID: u64 = 8453;

const MIN_TIMEOUT_MS: u64 = 100;
const MAX_TIMEOUT_MS: u64 = 60_000;

#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
    pub server: ServerConfig,
    #[serde(default)]
    pub alchemy: AlchemyConfig,
    #[serde(default)]
    pub neynar: NeynarConfig,
    #[serde(default)]
    pub names: NamesConfig,
    #[serde(default)]
    pub limits: LimitsConfig,
}

impl ApiConfig {
    pub fn load() -> Result<Self> {
        let configured_path = std::env::var("BASE_PROFILE_CONFIG")
            .unwrap_or_else(|_| "config/api.toml".to_string());
        assert!(
            !configured_path.is_empty(),
            "Configuration path must be non-empty"
        );
        assert!(
            configured_path.len() < 4096,
            "Configuration path length exceeds hard limit"
        );

        let mut builder = Config::builder()
            .add_source(File::new(&configured_path, FileFormat::Toml).required(true));

        if let Ok(env_override) = std::env::var("BASE_PROFILE_ENV") {
            if !env_override.is_empty() {
                let env_file = format!("config/api.{}.toml", env_override);
                if Path::new(&env_file).exists() {
                    builder = builder.add_source(File::new(&env_file, FileFormat::Toml));
                }
            }
        }

        builder = builder.add_source(
            Environment::with_prefix("BASE_PROFILE")
                .separator("__")
                .try_parsing(true),
        );

        let settings = builder
            .build()
            .map_err(|err| map_config_error(err, &configured_path))?;
        let mut config: Self = settings
            .try_deserialize()
            .context("Failed to deserialize API configuration")?;

        config.apply_legacy_keys(|name| std::env::var(name).ok());
        config.validate()?;
        Ok(config)
    }

    /// Fills unset provider keys from the bare `ALCHEMY_API_KEY` / `NEYNAR_API_KEY` variables.
    fn apply_legacy_keys(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if self.alchemy.api_key.is_none() {
            self.alchemy.api_key = lookup("ALCHEMY_API_KEY").filter(|key| !key.trim().is_empty());
        }
        if self.neynar.api_key.is_none() {
            self.neynar.api_key = lookup("NEYNAR_API_KEY").filter(|key| !key.trim().is_empty());
        }
    }

    fn validate(&self) -> Result<()> {
        if self.server.port == 0 {
            bail!("Server port must be greater than zero");
        }
        if self.alchemy.network.trim().is_empty() {
            bail!("Alchemy network must be specified");
        }
        check_timeout("alchemy.request_timeout_ms", self.alchemy.request_timeout_ms)?;
        check_timeout("neynar.request_timeout_ms", self.neynar.request_timeout_ms)?;
        check_timeout("names.request_timeout_ms", self.names.request_timeout_ms)?;
        self.limits.ensure_bounds()?;
        Ok(())
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub host: Option<IpAddr>,
    pub port: u16,
}

impl ServerConfig {
    pub fn address(&self) -> SocketAddr {
        let host = self.host.unwrap_or(IpAddr::V4(Ipv4Addr::LOCALHOST));
        assert!(self.port != 0, "HTTP port cannot be zero");
        SocketAddr::new(host, self.port)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct AlchemyConfig {
    #[serde(default = "AlchemyConfig::default_network")]
    pub network: String,
    pub base_url: Option<String>,
    pub api_key: Option<String>,
    #[serde(default = "default_timeout_ms")]
    pub request_timeout_ms: u64,
}

impl AlchemyConfig {
    fn default_network() -> String {
        DEFAULT_NETWORK.to_string()
    }

    /// Host root for the configured network, without the `/v2/{key}` suffix.
    pub fn endpoint(&self) -> String {
        match &self.base_url {
            Some(url) if !url.trim().is_empty() => url.trim_end_matches('/').to_string(),
            _ => format!("https://{}.g.alchemy.com", self.network),
        }
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms)
    }
}

impl Default for AlchemyConfig {
    fn default() -> Self {
        Self {
            network: Self::default_network(),
            base_url: None,
            api_key: None,
            request_timeout_ms: default_timeout_ms(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct NeynarConfig {
    #[serde(default = "NeynarConfig::default_base_url")]
    pub base_url: String,
    pub api_key: Option<String>,
    #[serde(default = "default_timeout_ms")]
    pub request_timeout_ms: u64,
}

impl NeynarConfig {
    fn default_base_url() -> String {
        DEFAULT_NEYNAR_URL.to_string()
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms)
    }
}

impl Default for NeynarConfig {
    fn default() -> Self {
        Self {
            base_url: Self::default_base_url(),
            api_key: None,
            request_timeout_ms: default_timeout_ms(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct NamesConfig {
    #[serde(default = "NamesConfig::default_rpc_url")]
    pub rpc_url: String,
    #[serde(default = "NamesConfig::default_resolver_address")]
    pub resolver_address: String,
    #[serde(default = "NamesConfig::default_chain_id")]
    pub chain_id: u64,
    #[serde(default = "default_timeout_ms")]
    pub request_timeout_ms: u64,
}

impl NamesConfig {
    fn default_rpc_url() -> String {
        DEFAULT_NAMES_RPC_URL.to_string()
    }

    fn default_resolver_address() -> String {
        DEFAULT_RESOLVER_ADDRESS.to_string()
    }

    const fn default_chain_id() -> u64 {
        BASE_CHAIN_ID
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms)
    }
}

impl Default for NamesConfig {
    fn default() -> Self {
        Self {
            rpc_url: Self::default_rpc_url(),
            resolver_address: Self::default_resolver_address(),
            chain_id: Self::default_chain_id(),
            request_timeout_ms: default_timeout_ms(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct LimitsConfig {
    #[serde(default = "LimitsConfig::default_nft")]
    pub nft_default: usize,
    #[serde(default = "LimitsConfig::default_compare")]
    pub compare_default: usize,
    #[serde(default = "LimitsConfig::default_top_tokens")]
    pub top_tokens: usize,
    #[serde(default = "LimitsConfig::default_gallery_page_size")]
    pub gallery_page_size: usize,
}

impl LimitsConfig {
    const fn default_nft() -> usize {
        10
    }

    const fn default_compare() -> usize {
        50
    }

    const fn default_top_tokens() -> usize {
        5
    }

    const fn default_gallery_page_size() -> usize {
        12
    }

    fn ensure_bounds(&self) -> Result<()> {
        if self.nft_default == 0 || self.compare_default == 0 {
            bail!("Default NFT limits must be positive");
        }
        if self.top_tokens == 0 {
            bail!("Top token count must be positive");
        }
        if self.gallery_page_size == 0 || self.gallery_page_size > 100 {
            bail!("Gallery page size must be between 1 and 100");
        }
        Ok(())
    }
}

impl Default for LimitsConfig {
    fn default() -> Self {
        Self {
            nft_default: Self::default_nft(),
            compare_default: Self::default_compare(),
            top_tokens: Self::default_top_tokens(),
            gallery_page_size: Self::default_gallery_page_size(),
        }
    }
}

const fn default_timeout_ms() -> u64 {
    10_000
}

fn check_timeout(label: &str, millis: u64) -> Result<()> {
    if !(MIN_TIMEOUT_MS..=MAX_TIMEOUT_MS).contains(&millis) {
        bail!("{label} must be between {MIN_TIMEOUT_MS} and {MAX_TIMEOUT_MS} ms, got {millis}");
    }
    Ok(())
}

fn map_config_error(err: ConfigError, path: &str) -> ConfigError {
    match err {
        ConfigError::NotFound(_) => ConfigError::NotFound(path.to_string()),
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(toml: &str) -> ApiConfig {
        Config::builder()
            .add_source(File::from_str(toml, FileFormat::Toml))
            .build()
            .and_then(|settings| settings.try_deserialize())
            .expect("config parses")
    }

    #[test]
    fn defaults_fill_optional_sections() {
        let config = parse("[server]\nport = 3000\n");
        assert_eq!(config.alchemy.network, DEFAULT_NETWORK);
        assert_eq!(config.alchemy.endpoint(), "https://base-mainnet.g.alchemy.com");
        assert_eq!(config.names.chain_id, BASE_CHAIN_ID);
        assert_eq!(config.limits.nft_default, 10);
        assert_eq!(config.limits.compare_default, 50);
        assert_eq!(config.limits.top_tokens, 5);
        assert!(config.alchemy.api_key.is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn base_url_override_drops_trailing_slash() {
        let config = parse(
            "[server]\nport = 3000\n[alchemy]\nbase_url = \"http://127.0.0.1:9000/\"\n",
        );
        assert_eq!(config.alchemy.endpoint(), "http://127.0.0.1:9000");
    }

    #[test]
    fn legacy_key_variables_fill_missing_keys_only() {
        let mut config = parse(
            "[server]\nport = 3000\n[neynar]\napi_key = \"from-file\"\n",
        );
        config.apply_legacy_keys(|name| match name {
            "ALCHEMY_API_KEY" => Some("alchemy-env".to_string()),
            "NEYNAR_API_KEY" => Some("neynar-env".to_string()),
            _ => None,
        });
        assert_eq!(config.alchemy.api_key.as_deref(), Some("alchemy-env"));
        assert_eq!(config.neynar.api_key.as_deref(), Some("from-file"));
    }

    #[test]
    fn blank_legacy_key_is_ignored() {
        let mut config = parse("[server]\nport = 3000\n");
        config.apply_legacy_keys(|_| Some("   ".to_string()));
        assert!(config.alchemy.api_key.is_none());
    }

    #[test]
    fn out_of_range_timeout_is_rejected() {
        let config = parse(
            "[server]\nport = 3000\n[neynar]\nrequest_timeout_ms = 5\n",
        );
        assert!(config.validate().is_err());
    }
}
