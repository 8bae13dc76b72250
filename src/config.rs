use crate::errors::{LauncherError, Result};
use crate::models::settings::AppSettings;
use dotenv::dotenv;
use ethers::types::Address;
use lazy_static::lazy_static;
use log::{debug, info};
use std::env;
use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;

pub const ENV_RPC_URL: &str = "LAUNCHER_RPC_URL";
pub const ENV_LAUNCHER_ADDRESS: &str = "LAUNCHER_ADDRESS";
pub const ENV_PRIVATE_KEY: &str = "LAUNCHER_PRIVATE_KEY";

lazy_static! {
    pub static ref CONFIG: Arc<Config> = Arc::new(Config::load().unwrap_or_else(|e| {
        eprintln!("Failed to load configuration: {}. Using default settings.", e);
        Config::default()
    }));
}

#[derive(Clone)]
pub struct Config {
    pub rpc_url: String,
    pub chain_id: u64,
    pub launcher_address: Address,
    pub explorer_url: String,
    pub dex_url: String,
    pub dex_chain: String,
    pub confirmation_poll_interval: Duration,
    pub request_timeout: Duration,
    // Hex-encoded signing key; absent means read-only mode
    pub private_key: Option<String>,
}

// Keep the signing key out of debug logs
impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("rpc_url", &self.rpc_url)
            .field("chain_id", &self.chain_id)
            .field("launcher_address", &self.launcher_address)
            .field("explorer_url", &self.explorer_url)
            .field("dex_url", &self.dex_url)
            .field("dex_chain", &self.dex_chain)
            .field("confirmation_poll_interval", &self.confirmation_poll_interval)
            .field("request_timeout", &self.request_timeout)
            .field("private_key", &self.private_key.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        dotenv().ok();
        info!("Loading configuration from settings file and environment variables.");

        let settings = AppSettings::load();
        let config = Self::from_settings(
            &settings,
            env::var(ENV_RPC_URL).ok(),
            env::var(ENV_LAUNCHER_ADDRESS).ok(),
            env::var(ENV_PRIVATE_KEY).ok(),
        )?;

        debug!("Configuration loaded: {:?}", config);
        Ok(config)
    }

    /// Applies environment overrides on top of the persisted settings.
    pub fn from_settings(
        settings: &AppSettings,
        rpc_url: Option<String>,
        launcher_address: Option<String>,
        private_key: Option<String>,
    ) -> Result<Self> {
        let address_str = launcher_address
            .filter(|s| !s.trim().is_empty())
            .unwrap_or_else(|| settings.launcher_address.clone());
        let launcher_address = Address::from_str(address_str.trim())
            .map_err(|e| LauncherError::Config(format!("Invalid launcher address '{}': {}", address_str, e)))?;

        Ok(Config {
            rpc_url: rpc_url
                .filter(|s| !s.trim().is_empty())
                .unwrap_or_else(|| settings.rpc_url.clone()),
            chain_id: settings.chain_id,
            launcher_address,
            explorer_url: settings.explorer_url.clone(),
            dex_url: settings.dex_url.clone(),
            dex_chain: settings.dex_chain.clone(),
            confirmation_poll_interval: Duration::from_millis(settings.confirmation_poll_ms.max(100)),
            request_timeout: Duration::from_secs(settings.request_timeout_secs.max(1)),
            private_key: private_key
                .map(|k| k.trim().to_string())
                .filter(|k| !k.is_empty()),
        })
    }

    pub fn has_signer(&self) -> bool {
        self.private_key.is_some()
    }
}

impl Default for Config {
    fn default() -> Self {
        let settings = AppSettings::default();
        Config {
            rpc_url: settings.rpc_url,
            chain_id: settings.chain_id,
            // Zero address only if the built-in constant is somehow unparseable
            launcher_address: Address::from_str(&settings.launcher_address).unwrap_or_default(),
            explorer_url: settings.explorer_url,
            dex_url: settings.dex_url,
            dex_chain: settings.dex_chain,
            confirmation_poll_interval: Duration::from_millis(settings.confirmation_poll_ms),
            request_timeout: Duration::from_secs(settings.request_timeout_secs),
            private_key: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn environment_overrides_settings() {
        let settings = AppSettings::default();
        let config = Config::from_settings(
            &settings,
            Some("http://localhost:8545".to_string()),
            Some("0x0000000000000000000000000000000000000001".to_string()),
            Some("  abc  ".to_string()),
        )
        .unwrap();
        assert_eq!(config.rpc_url, "http://localhost:8545");
        assert_eq!(config.launcher_address, Address::from_low_u64_be(1));
        assert_eq!(config.private_key.as_deref(), Some("abc"));
        assert!(config.has_signer());
    }

    #[test]
    fn blank_overrides_are_ignored() {
        let settings = AppSettings::default();
        let config = Config::from_settings(&settings, Some(" ".to_string()), None, Some("".to_string())).unwrap();
        assert_eq!(config.rpc_url, settings.rpc_url);
        assert!(!config.has_signer());
    }

    #[test]
    fn invalid_address_is_a_config_error() {
        let settings = AppSettings::default();
        let err = Config::from_settings(&settings, None, Some("0x12".to_string()), None).unwrap_err();
        assert!(matches!(err, LauncherError::Config(_)));
    }

    #[test]
    fn debug_output_redacts_key() {
        let config = Config {
            private_key: Some("deadbeef".to_string()),
            ..Default::default()
        };
        let rendered = format!("{:?}", config);
        assert!(!rendered.contains("deadbeef"));
        assert!(rendered.contains("<redacted>"));
    }
}
