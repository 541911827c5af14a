//! # Compost Storefront Demo
//!
//! Runs one scripted shopping session and prints the confirmed order.
//!
//! ```text
//! $ RUST_LOG=compost=debug cargo run -p compost-storefront
//! ... add_to_cart command item_id=1 quantity=1
//! ... Checkout submitted, awaiting payment amount=$61.00
//! ... Order confirmed order_id=CF-482913 total=$61.00
//! { "id": "CF-482913", ... }
//! ```

use std::process::ExitCode;

#[tokio::main]
async fn main() -> ExitCode {
    match compost_storefront::run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("Storefront session failed: {}", e);
            ExitCode::FAILURE
        }
    }
}
