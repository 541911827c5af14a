//! # Compost Storefront
//!
//! Session state, commands and payment for the compost marketplace.
//! All business rules live in `compost-core`; this crate wires them to
//! shared state, the payment gateway, config and logging.
//!
//! ## Module Organization
//! ```text
//! compost_storefront/
//! ├── lib.rs          ◄─── You are here (Storefront context, logging, demo run)
//! ├── config.rs       ◄─── StoreConfig loading (defaults → TOML → env)
//! ├── payment.rs      ◄─── PaymentGateway trait + SimulatedGateway
//! ├── state/
//! │   ├── cart.rs     ◄─── CartState
//! │   ├── checkout.rs ◄─── CheckoutState (submit around the payment await)
//! │   └── listings.rs ◄─── ListingState
//! ├── commands/       ◄─── Functions the UI calls
//! └── error.rs        ◄─── API error type for commands
//! ```

pub mod commands;
pub mod config;
pub mod error;
pub mod payment;
pub mod state;

use std::sync::Arc;

use compost_core::{Catalog, CheckoutForm};
use tracing::{info, Level};
use tracing_subscriber::EnvFilter;

use crate::config::StoreConfig;
use crate::error::ApiError;
use crate::payment::{PaymentGateway, SimulatedGateway};
use crate::state::{CartState, CheckoutState, ListingState};

/// Everything one shopping session needs, created once and passed to
/// commands explicitly.
#[derive(Debug, Clone)]
pub struct Storefront {
    pub catalog: Arc<Catalog>,
    pub cart: CartState,
    pub checkout: CheckoutState,
    pub listings: ListingState,
    pub config: StoreConfig,
}

impl Storefront {
    /// Demo catalog, simulated gateway, settings from `config`.
    pub fn new(config: StoreConfig) -> Self {
        let gateway = Arc::new(SimulatedGateway::new(config.payment_delay()));
        Self::with_gateway(config, Catalog::demo(), gateway)
    }

    pub fn with_gateway(
        config: StoreConfig,
        catalog: Catalog,
        gateway: Arc<dyn PaymentGateway>,
    ) -> Self {
        Storefront {
            catalog: Arc::new(catalog),
            cart: CartState::new(config.shipping_policy()),
            checkout: CheckoutState::with_estimated_delivery(
                gateway,
                config.estimated_delivery.clone(),
            ),
            listings: ListingState::new(),
            config,
        }
    }
}

/// Runs a scripted shopping session against the demo catalog.
///
/// ## Session
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │  1. Load config (defaults → TOML → env), init logging                   │
/// │  2. Add Premium Vermicompost ×1, Organic Kitchen Compost ×2             │
/// │  3. Submit the checkout form (payment takes payment_delay_ms)           │
/// │  4. Print the confirmed order as JSON, clear the cart                   │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
pub async fn run() -> Result<(), ApiError> {
    init_tracing();

    let config = StoreConfig::load_or_default(None);
    info!(store = %config.store_name, "Starting storefront session");
    let store = Storefront::new(config);

    commands::cart::add_to_cart(&store.catalog, &store.cart, 1, Some(1))?;
    let cart = commands::cart::add_to_cart(&store.catalog, &store.cart, 2, Some(2))?;
    info!(
        subtotal = %store.config.format_currency(cart.totals.subtotal.cents()),
        shipping = %store.config.format_currency(cart.totals.shipping.cents()),
        total = %store.config.format_currency(cart.totals.total.cents()),
        "Cart ready"
    );

    let order =
        commands::checkout::submit_order(&store.checkout, &store.cart, CheckoutForm::example())
            .await?;
    commands::cart::clear_cart(&store.cart);

    match serde_json::to_string_pretty(&order) {
        Ok(json) => println!("{json}"),
        Err(e) => tracing::error!("Failed to serialize order: {}", e),
    }

    Ok(())
}

/// Initializes the tracing subscriber for structured logging.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show debug messages
/// - `RUST_LOG=compost=trace` - Show trace for compost crates only
/// - Default: INFO, DEBUG for compost crates
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,compost=debug"));

    // A second init (e.g. from tests) keeps the first subscriber.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_max_level(Level::TRACE)
        .try_init();
}
