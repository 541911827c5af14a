//! # Config Commands
//!
//! Store settings the UI needs for display.

use compost_core::Money;
use serde::Serialize;
use tracing::debug;

use crate::config::StoreConfig;

/// Display settings for the UI.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigResponse {
    pub store_name: String,
    pub currency_symbol: String,
    pub currency_decimals: u8,
    pub free_shipping_threshold: Money,
    pub flat_shipping_fee: Money,
    /// e.g. "Free shipping on orders over $50.00"
    pub free_shipping_banner: String,
    pub estimated_delivery: String,
}

/// Gets the current store configuration.
///
/// ## When Used
/// - App startup (header, currency formatting)
/// - Cart page free-shipping banner
pub fn get_config(config: &StoreConfig) -> ConfigResponse {
    debug!("get_config command");
    ConfigResponse {
        store_name: config.store_name.clone(),
        currency_symbol: config.currency_symbol.clone(),
        currency_decimals: config.currency_decimals,
        free_shipping_threshold: Money::from_cents(config.free_shipping_threshold_cents),
        flat_shipping_fee: Money::from_cents(config.flat_shipping_fee_cents),
        free_shipping_banner: format!(
            "Free shipping on orders over {}",
            config.format_currency(config.free_shipping_threshold_cents)
        ),
        estimated_delivery: config.estimated_delivery.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_config_defaults() {
        let response = get_config(&StoreConfig::default());
        assert_eq!(response.store_name, "Compost Marketplace");
        assert_eq!(response.free_shipping_threshold.cents(), 5000);
        assert_eq!(response.flat_shipping_fee.cents(), 999);
        assert_eq!(response.free_shipping_banner, "Free shipping on orders over $50.00");
    }
}
