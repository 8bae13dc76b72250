use anyhow::{anyhow, Context, Result};
use ethers::types::Address;
use log::{info, warn};
use serde::{Deserialize, Serialize};
use std::{
    fs::{self, File},
    io::{Read, Write},
    path::PathBuf,
    str::FromStr,
};

// Base Sepolia deployment of the launcher contract
pub const DEFAULT_LAUNCHER_ADDRESS: &str = "0xc1c77747448f7d86e9a911e70773fc9EE4504976";
pub const DEFAULT_CHAIN_ID: u64 = 84532;

const SETTINGS_FILENAME: &str = "launcher_settings.json";
const SETTINGS_DIR: &str = ".meme-launcher";

/// Settings file in the working directory wins; otherwise the per-user one.
fn get_settings_path() -> PathBuf {
    let local = PathBuf::from(SETTINGS_FILENAME);
    if local.exists() {
        return local;
    }
    match dirs::home_dir() {
        Some(home) => home.join(SETTINGS_DIR).join(SETTINGS_FILENAME),
        None => local,
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct AppSettings {
    // Chain configuration
    pub rpc_url: String,
    pub chain_id: u64,
    pub launcher_address: String,

    // Links shown after a launch
    pub explorer_url: String,
    pub dex_url: String,
    pub dex_chain: String,

    // Transport behaviour
    #[serde(default = "default_confirmation_poll_ms")]
    pub confirmation_poll_ms: u64,
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
}

fn default_confirmation_poll_ms() -> u64 {
    2_000
}

fn default_request_timeout_secs() -> u64 {
    30
}

impl Default for AppSettings {
    fn default() -> Self {
        AppSettings {
            rpc_url: "https://sepolia.base.org".to_string(),
            chain_id: DEFAULT_CHAIN_ID,
            launcher_address: DEFAULT_LAUNCHER_ADDRESS.to_string(),
            explorer_url: "https://sepolia.basescan.org".to_string(),
            dex_url: "https://app.uniswap.org".to_string(),
            dex_chain: "base_sepolia".to_string(),
            confirmation_poll_ms: default_confirmation_poll_ms(),
            request_timeout_secs: default_request_timeout_secs(),
        }
    }
}

impl AppSettings {
    /// Loads settings from the JSON file, or returns default if it doesn't exist or fails.
    pub fn load() -> Self {
        let path = get_settings_path();
        info!("Attempting to load settings from: {}", path.display());
        match File::open(&path) {
            Ok(mut file) => {
                let mut contents = String::new();
                if let Err(e) = file.read_to_string(&mut contents) {
                    warn!("Failed to read settings file '{}': {}. Using default settings.", path.display(), e);
                    return AppSettings::default();
                }
                Self::from_json(&contents).unwrap_or_else(|e| {
                    warn!("Failed to parse settings file '{}': {}. Using default settings.", path.display(), e);
                    AppSettings::default()
                })
            }
            Err(_) => {
                info!("Settings file '{}' not found. Using default settings.", path.display());
                AppSettings::default()
            }
        }
    }

    pub fn from_json(contents: &str) -> Result<Self> {
        serde_json::from_str(contents).context("Failed to parse settings JSON")
    }

    /// Saves the current settings to the JSON file.
    pub fn save(&self) -> Result<()> {
        let path = get_settings_path();
        info!("Attempting to save settings to: {}", path.display());
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)
                    .with_context(|| format!("Failed to create settings directory: {}", parent.display()))?;
            }
        }
        let json_string = serde_json::to_string_pretty(self)
            .context("Failed to serialize settings to JSON")?;

        let mut file = File::create(&path)
            .with_context(|| format!("Failed to create or open settings file for writing: {}", path.display()))?;

        file.write_all(json_string.as_bytes())
            .with_context(|| format!("Failed to write settings to file: {}", path.display()))?;

        info!("Successfully saved settings to {}", path.display());
        Ok(())
    }

    pub fn get_launcher_address(&self) -> Result<Address> {
        Address::from_str(&self.launcher_address)
            .map_err(|e| anyhow!("Invalid launcher address '{}': {}", self.launcher_address, e))
    }
}
