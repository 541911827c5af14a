//! # compost-core: Pure Marketplace Logic
//!
//! Catalog, cart pricing, the checkout state machine and vendor listing
//! validation for the compost marketplace. No I/O, no async, no logging.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Compost Marketplace Architecture                     │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    UI (marketplace screens)                     │   │
//! │  │   Browse ──► Product Detail ──► Cart ──► Checkout ──► Receipt   │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ commands                              │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │           compost-storefront (state + commands + payment)       │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ compost-core (THIS CRATE) ★                     │   │
//! │  │                                                                 │   │
//! │  │   ┌─────────┐ ┌────────┐ ┌──────────┐ ┌─────────┐ ┌─────────┐  │   │
//! │  │   │ catalog │ │  cart  │ │ checkout │ │  order  │ │ listing │  │   │
//! │  │   └─────────┘ └────────┘ └──────────┘ └─────────┘ └─────────┘  │   │
//! │  │   money • types • validation • error                           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`money`] - Integer-cent `Money`
//! - [`types`] - `CatalogItem`, `ItemId`, `Category`, `Badge`
//! - [`catalog`] - Immutable catalog store and search
//! - [`cart`] - Cart lines, shipping policy and totals
//! - [`checkout`] - Checkout form and the `Editing → Submitting → Confirmed` machine
//! - [`order`] - Confirmed order snapshot
//! - [`listing`] - Vendor listing drafts and the listing book
//! - [`validation`] - Field validators
//! - [`error`] - Domain error types
//!
//! ## Example Usage
//!
//! ```rust
//! use compost_core::{Cart, Catalog, ItemId};
//!
//! let catalog = Catalog::demo();
//! let mut cart = Cart::new();
//! cart.add_item(catalog.require(ItemId::new(1)).unwrap(), 1); // $25.00
//!
//! // Under $50.00, so the $9.99 flat fee applies
//! assert_eq!(cart.shipping_cost().cents(), 999);
//! assert_eq!(cart.total().to_string(), "$34.99");
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod error;
pub mod listing;
pub mod money;
pub mod order;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use cart::{Cart, CartLine, CartTotals, ShippingPolicy};
pub use catalog::{Catalog, CatalogQuery};
pub use checkout::{CheckoutForm, CheckoutSession, CheckoutStatus, PendingOrder};
pub use error::{CoreError, CoreResult, ValidationError};
pub use listing::{Listing, ListingBook, ListingDraft, ListingProduct, ListingStatus, Specifications};
pub use money::Money;
pub use order::{Order, OrderId, OrderLine, OrderSnapshot, ShippingAddress};
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Subtotal at which shipping becomes free ($50.00).
///
/// Inclusive: a subtotal of exactly $50.00 ships free.
pub const FREE_SHIPPING_THRESHOLD_CENTS: i64 = 5000;

/// Flat shipping fee below the threshold ($9.99).
pub const FLAT_SHIPPING_FEE_CENTS: i64 = 999;

/// Prefix of customer-facing order numbers.
pub const ORDER_NUMBER_PREFIX: &str = "CF-";

/// Default delivery estimate shown on the confirmation screen.
pub const ESTIMATED_DELIVERY: &str = "3-5 business days";

/// Most images a vendor listing can carry.
pub const MAX_LISTING_IMAGES: usize = 5;
