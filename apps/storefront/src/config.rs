//! # Store Configuration
//!
//! Store-wide settings loaded once at startup.
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                               │
//! │                                                                         │
//! │  1. Environment Variables (highest priority)                           │
//! │     COMPOST_STORE_NAME="Valley Compost Co."                            │
//! │     COMPOST_PAYMENT_DELAY_MS=500                                       │
//! │                                                                         │
//! │  2. TOML Config File                                                   │
//! │     $COMPOST_CONFIG, or                                                │
//! │     ~/.config/compost-marketplace/store.toml (Linux)                   │
//! │                                                                         │
//! │  3. Default Values (lowest priority)                                   │
//! │     Free shipping from $50.00, otherwise $9.99, 3s payment             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration File Format
//! ```toml
//! # store.toml
//! store_name = "Compost Marketplace"
//! currency_symbol = "$"
//! currency_decimals = 2
//! free_shipping_threshold_cents = 5000
//! flat_shipping_fee_cents = 999
//! payment_delay_ms = 3000
//! estimated_delivery = "3-5 business days"
//! ```

use std::path::{Path, PathBuf};
use std::time::Duration;

use compost_core::{
    Money, ShippingPolicy, ESTIMATED_DELIVERY, FLAT_SHIPPING_FEE_CENTS,
    FREE_SHIPPING_THRESHOLD_CENTS,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info, warn};

/// Environment variable naming an explicit config file.
pub const CONFIG_PATH_ENV: &str = "COMPOST_CONFIG";

/// Longest simulated payment delay accepted (one minute).
const MAX_PAYMENT_DELAY_MS: u64 = 60_000;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

pub type ConfigResult<T> = Result<T, ConfigError>;

// =============================================================================
// Store Config
// =============================================================================

/// Store configuration. Read-only after startup, so no lock.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// Shown in the header and on confirmation emails.
    pub store_name: String,

    pub currency_symbol: String,

    /// Number of decimal places for currency
    pub currency_decimals: u8,

    /// Subtotal (inclusive) from which shipping is free.
    pub free_shipping_threshold_cents: i64,

    /// Charged below the threshold.
    pub flat_shipping_fee_cents: i64,

    /// How long the simulated gateway takes to approve a charge.
    pub payment_delay_ms: u64,

    pub estimated_delivery: String,
}

impl Default for StoreConfig {
    fn default() -> Self {
        StoreConfig {
            store_name: "Compost Marketplace".to_string(),
            currency_symbol: "$".to_string(),
            currency_decimals: 2,
            free_shipping_threshold_cents: FREE_SHIPPING_THRESHOLD_CENTS,
            flat_shipping_fee_cents: FLAT_SHIPPING_FEE_CENTS,
            payment_delay_ms: 3000,
            estimated_delivery: ESTIMATED_DELIVERY.to_string(),
        }
    }
}

impl StoreConfig {
    /// Loads configuration from file, environment, and defaults.
    ///
    /// ## Load Order (later overrides earlier)
    /// 1. Default values
    /// 2. Config file (`config_path`, then `$COMPOST_CONFIG`, then the platform default)
    /// 3. Environment variables
    pub fn load(config_path: Option<PathBuf>) -> ConfigResult<Self> {
        let mut config = Self::default();

        let path = config_path
            .or_else(|| std::env::var_os(CONFIG_PATH_ENV).map(PathBuf::from))
            .or_else(Self::default_config_path);

        if let Some(path) = path {
            if path.exists() {
                info!(?path, "Loading store config from file");
                config = Self::from_file(&path)?;
            } else {
                debug!(?path, "Config file not found, using defaults");
            }
        }

        config.apply_env_overrides();
        config.validate()?;

        Ok(config)
    }

    /// Loads config or returns default if load fails.
    pub fn load_or_default(config_path: Option<PathBuf>) -> Self {
        Self::load(config_path).unwrap_or_else(|e| {
            warn!("Failed to load store config: {}. Using defaults.", e);
            Self::default()
        })
    }

    fn from_file(path: &Path) -> ConfigResult<Self> {
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&contents)
    }

    /// Parses a TOML document. Missing keys keep their defaults.
    pub fn from_toml_str(contents: &str) -> ConfigResult<Self> {
        Ok(toml::from_str(contents)?)
    }

    pub fn validate(&self) -> ConfigResult<()> {
        if self.store_name.trim().is_empty() {
            return Err(ConfigError::Invalid("store_name must not be empty".into()));
        }

        if self.currency_decimals > 4 {
            return Err(ConfigError::Invalid(format!(
                "currency_decimals must be at most 4, got {}",
                self.currency_decimals
            )));
        }

        if self.free_shipping_threshold_cents < 0 || self.flat_shipping_fee_cents < 0 {
            return Err(ConfigError::Invalid(
                "shipping amounts must not be negative".into(),
            ));
        }

        if self.payment_delay_ms > MAX_PAYMENT_DELAY_MS {
            return Err(ConfigError::Invalid(format!(
                "payment_delay_ms must be at most {}",
                MAX_PAYMENT_DELAY_MS
            )));
        }

        Ok(())
    }

    fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    /// Applies `COMPOST_*` overrides from `lookup`. Unparseable numbers are
    /// ignored with a warning.
    fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(name) = lookup("COMPOST_STORE_NAME") {
            self.store_name = name;
        }

        if let Some(symbol) = lookup("COMPOST_CURRENCY_SYMBOL") {
            self.currency_symbol = symbol;
        }

        if let Some(value) = lookup("COMPOST_FREE_SHIPPING_THRESHOLD_CENTS") {
            match value.parse::<i64>() {
                Ok(cents) => {
                    debug!(cents, "Overriding free shipping threshold from environment");
                    self.free_shipping_threshold_cents = cents;
                }
                Err(_) => warn!(value = %value, "Ignoring invalid COMPOST_FREE_SHIPPING_THRESHOLD_CENTS"),
            }
        }

        if let Some(value) = lookup("COMPOST_FLAT_SHIPPING_FEE_CENTS") {
            match value.parse::<i64>() {
                Ok(cents) => self.flat_shipping_fee_cents = cents,
                Err(_) => warn!(value = %value, "Ignoring invalid COMPOST_FLAT_SHIPPING_FEE_CENTS"),
            }
        }

        if let Some(value) = lookup("COMPOST_PAYMENT_DELAY_MS") {
            match value.parse::<u64>() {
                Ok(ms) => {
                    debug!(ms, "Overriding payment delay from environment");
                    self.payment_delay_ms = ms;
                }
                Err(_) => warn!(value = %value, "Ignoring invalid COMPOST_PAYMENT_DELAY_MS"),
            }
        }
    }

    /// Returns the default config file path.
    fn default_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("com", "compost", "marketplace")
            .map(|dirs| dirs.config_dir().join("store.toml"))
    }

    // =========================================================================
    // Convenience Methods
    // =========================================================================

    pub fn shipping_policy(&self) -> ShippingPolicy {
        ShippingPolicy::new(
            Money::from_cents(self.free_shipping_threshold_cents),
            Money::from_cents(self.flat_shipping_fee_cents),
        )
    }

    pub fn payment_delay(&self) -> Duration {
        Duration::from_millis(self.payment_delay_ms)
    }

    /// Formats a cent amount as a currency string.
    ///
    /// ```rust
    /// use compost_storefront::config::StoreConfig;
    ///
    /// let config = StoreConfig::default();
    /// assert_eq!(config.format_currency(3499), "$34.99");
    /// ```
    pub fn format_currency(&self, cents: i64) -> String {
        let divisor = 10_i64.pow(u32::from(self.currency_decimals));
        let whole = (cents / divisor).abs();
        let frac = (cents % divisor).abs();
        let sign = if cents < 0 { "-" } else { "" };

        if self.currency_decimals > 0 {
            format!(
                "{}{}{}.{:0width$}",
                sign,
                self.currency_symbol,
                whole,
                frac,
                width = usize::from(self.currency_decimals)
            )
        } else {
            format!("{}{}{}", sign, self.currency_symbol, whole)
        }
    }
}
