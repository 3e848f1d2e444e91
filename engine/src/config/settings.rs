// Scanner settings, loaded from environment variables or a JSON file.
use crate::data::market_data::{DEFAULT_BASE_URL, MAX_KLINE_LIMIT};
use crate::error::ScanError;
use crate::signals::SignalPolicy;
use anyhow::Context;
use serde::Deserialize;
use shared::models::Interval;
use std::path::Path;
use std::time::Duration;

pub const CONFIG_PATH_VAR: &str = "SIGNAL_BOT_CONFIG";
pub const WEBHOOK_URL_VAR: &str = "DISCORD_WEBHOOK_URL";

/// Where the scan loop gets its symbol list from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SymbolSource {
    Fixed(Vec<String>),
    /// Every symbol the exchange reports as `TRADING`, re-read each sweep.
    Exchange,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct ScanSettings {
    pub webhook_url: String,
    /// Empty, or a single "*", means exchange discovery.
    pub symbols: Vec<String>,
    pub interval: Interval,
    pub candle_limit: usize,
    pub sweep_delay_secs: u64,
    pub per_symbol_delay_secs: u64,
    pub policy: SignalPolicy,
    pub api_base_url: String,
    pub request_timeout_secs: u64,
}

impl Default for ScanSettings {
    fn default() -> Self {
        ScanSettings {
            webhook_url: String::new(),
            symbols: Vec::new(),
            interval: Interval::Minute15,
            candle_limit: 100,
            sweep_delay_secs: 900,
            per_symbol_delay_secs: 10,
            policy: SignalPolicy::RollingAverage,
            api_base_url: DEFAULT_BASE_URL.to_string(),
            request_timeout_secs: 10,
        }
    }
}

fn parse_var<T: std::str::FromStr>(key: &str, raw: &str) -> Result<T, ScanError>
where
    T::Err: std::fmt::Display,
{
    raw.trim()
        .parse()
        .map_err(|e| ScanError::Config(format!("{}='{}': {}", key, raw, e)))
}

fn split_symbols(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|s| s.trim().to_ascii_uppercase())
        .filter(|s| !s.is_empty())
        .collect()
}

impl ScanSettings {
    /// Reads the file named by `SIGNAL_BOT_CONFIG` if set, otherwise the `SCAN_*`
    /// variables. `DISCORD_WEBHOOK_URL` always wins over the file's value.
    pub fn load() -> anyhow::Result<Self> {
        let settings = match std::env::var(CONFIG_PATH_VAR) {
            Ok(path) => {
                let mut settings = Self::from_json_file(Path::new(&path))?;
                if let Ok(url) = std::env::var(WEBHOOK_URL_VAR) {
                    settings.webhook_url = url;
                }
                settings
            }
            Err(_) => Self::from_lookup(|key| std::env::var(key).ok())?,
        };
        settings.validate()?;
        Ok(settings)
    }

    pub fn from_json_file(path: &Path) -> anyhow::Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file '{}'", path.display()))?;
        let settings: ScanSettings = serde_json::from_str(&raw)
            .with_context(|| format!("Failed to parse config file '{}'", path.display()))?;
        Ok(settings)
    }

    /// Builds settings from a key lookup (the process environment in production).
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ScanError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut settings = ScanSettings::default();

        if let Some(url) = lookup(WEBHOOK_URL_VAR) {
            settings.webhook_url = url.trim().to_string();
        }
        if let Some(raw) = lookup("SCAN_SYMBOLS") {
            settings.symbols = split_symbols(&raw);
        }
        if let Some(raw) = lookup("SCAN_INTERVAL") {
            settings.interval = parse_var("SCAN_INTERVAL", &raw)?;
        }
        if let Some(raw) = lookup("SCAN_CANDLE_LIMIT") {
            settings.candle_limit = parse_var("SCAN_CANDLE_LIMIT", &raw)?;
        }
        if let Some(raw) = lookup("SCAN_SWEEP_DELAY_SECS") {
            settings.sweep_delay_secs = parse_var("SCAN_SWEEP_DELAY_SECS", &raw)?;
        }
        if let Some(raw) = lookup("SCAN_SYMBOL_DELAY_SECS") {
            settings.per_symbol_delay_secs = parse_var("SCAN_SYMBOL_DELAY_SECS", &raw)?;
        }
        if let Some(raw) = lookup("SCAN_POLICY") {
            settings.policy = raw.parse()?;
        }
        if let Some(url) = lookup("MEXC_API_URL") {
            settings.api_base_url = url.trim().to_string();
        }
        if let Some(raw) = lookup("SCAN_REQUEST_TIMEOUT_SECS") {
            settings.request_timeout_secs = parse_var("SCAN_REQUEST_TIMEOUT_SECS", &raw)?;
        }
        Ok(settings)
    }

    pub fn validate(&self) -> Result<(), ScanError> {
        if self.webhook_url.is_empty() {
            return Err(ScanError::Config(format!("{} is not set", WEBHOOK_URL_VAR)));
        }
        // The webhook url embeds its token, so it never goes into an error message.
        if !self.webhook_url.starts_with("http://") && !self.webhook_url.starts_with("https://") {
            return Err(ScanError::Config(format!("{} is not an http(s) url", WEBHOOK_URL_VAR)));
        }
        let min_limit = self.policy.required_history();
        if self.candle_limit < min_limit || self.candle_limit > MAX_KLINE_LIMIT {
            return Err(ScanError::Config(format!(
                "candle_limit must be between {} and {} for the {} policy, got {}",
                min_limit, MAX_KLINE_LIMIT, self.policy, self.candle_limit
            )));
        }
        if self.request_timeout_secs == 0 {
            return Err(ScanError::Config("request_timeout_secs must be positive".to_string()));
        }
        Ok(())
    }

    pub fn symbol_source(&self) -> SymbolSource {
        match self.symbols.as_slice() {
            [] => SymbolSource::Exchange,
            [only] if only == "*" => SymbolSource::Exchange,
            symbols => SymbolSource::Fixed(symbols.to_vec()),
        }
    }

    pub fn sweep_delay(&self) -> Duration {
        Duration::from_secs(self.sweep_delay_secs)
    }

    pub fn per_symbol_delay(&self) -> Duration {
        Duration::from_secs(self.per_symbol_delay_secs)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}
