use std::fs;
use std::path::PathBuf;
use std::time::Duration;

use serde::Deserialize;

use crate::infrastructure::runtime::PollConfig;

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Base URL of the node's HTTP API.
    pub api_url: String,
    pub stats_interval_ms: u64,
    pub blocks_interval_ms: u64,
    pub wallet_interval_ms: u64,
    pub blocks_limit: usize,
    pub request_timeout_ms: u64,
    /// Fixed fee attached to every send.
    pub send_fee: f64,
    /// RNR/USD used for the wallet's fiat line. A constant, not a price feed.
    pub unit_price_usd: f64,
    /// Whether the node exposes `/api/transactions`. While off the
    /// transactions panel shows the static demo list.
    pub transactions_feed: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_url: "http://localhost:8080".to_string(),
            stats_interval_ms: 5_000,
            blocks_interval_ms: 5_000,
            wallet_interval_ms: 3_000,
            blocks_limit: 5,
            request_timeout_ms: 10_000,
            send_fee: 0.01,
            unit_price_usd: 12.45,
            transactions_feed: false,
        }
    }
}

impl Config {
    pub fn poll_config(&self) -> PollConfig {
        PollConfig {
            api_url: self.api_url.clone(),
            stats_interval: Duration::from_millis(self.stats_interval_ms),
            blocks_interval: Duration::from_millis(self.blocks_interval_ms),
            wallet_interval: Duration::from_millis(self.wallet_interval_ms),
            blocks_limit: self.blocks_limit,
            request_timeout: Duration::from_millis(self.request_timeout_ms),
            poll_transactions: self.transactions_feed,
        }
    }
}

pub fn load() -> Config {
    let Some(path) = config_path() else {
        return Config::default();
    };
    let content = match fs::read_to_string(&path) {
        Ok(content) => content,
        Err(_) => return Config::default(),
    };
    toml::from_str::<Config>(&content).unwrap_or_default()
}

pub fn config_path() -> Option<PathBuf> {
    if let Some(path) = std::env::var_os("RNRSCAN_CONFIG").map(PathBuf::from) {
        return Some(path);
    }
    if let Some(xdg) = std::env::var_os("XDG_CONFIG_HOME").map(PathBuf::from) {
        return Some(xdg.join("rnrscan").join("config.toml"));
    }
    if let Some(home) = std::env::var_os("HOME").map(PathBuf::from) {
        return Some(home.join(".config").join("rnrscan").join("config.toml"));
    }

    directories::ProjectDirs::from("io", "rnrscan", "rnrscan")
        .map(|dirs| dirs.config_dir().join("config.toml"))
}

pub fn data_dir() -> Option<PathBuf> {
    if let Some(xdg) = std::env::var_os("XDG_DATA_HOME").map(PathBuf::from) {
        return Some(xdg.join("rnrscan"));
    }
    if let Some(home) = std::env::var_os("HOME").map(PathBuf::from) {
        return Some(home.join(".local").join("share").join("rnrscan"));
    }
    directories::ProjectDirs::from("io", "rnrscan", "rnrscan")
        .map(|dirs| dirs.data_dir().to_path_buf())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_documented_cadence() {
        let config = Config::default();
        assert_eq!(config.stats_interval_ms, 5_000);
        assert_eq!(config.blocks_interval_ms, 5_000);
        assert_eq!(config.wallet_interval_ms, 3_000);
        assert_eq!(config.blocks_limit, 5);
        assert_eq!(config.send_fee, 0.01);
        assert_eq!(config.unit_price_usd, 12.45);
        assert!(!config.transactions_feed);
    }

    #[test]
    fn partial_toml_falls_back_per_field() {
        let config: Config = toml::from_str(
            r#"
            api_url = "http://10.0.0.5:8080"
            wallet_interval_ms = 1000
            "#,
        )
        .unwrap();
        assert_eq!(config.api_url, "http://10.0.0.5:8080");
        assert_eq!(config.wallet_interval_ms, 1_000);
        assert_eq!(config.blocks_limit, 5);
    }
}
