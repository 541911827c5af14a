//! # Commands Module
//!
//! Every operation the marketplace UI can invoke.
//!
//! ## Command Organization
//! ```text
//! commands/
//! ├── mod.rs       ◄─── You are here (exports)
//! ├── catalog.rs   ◄─── Browse, search, product detail
//! ├── cart.rs      ◄─── Cart manipulation
//! ├── checkout.rs  ◄─── Order submission and confirmation
//! ├── listing.rs   ◄─── Vendor product upload
//! └── config.rs    ◄─── Store configuration retrieval
//! ```
//!
//! ## State Injection
//! Each command declares only the state it needs:
//! ```rust,ignore
//! // Only needs the catalog
//! fn list_catalog(catalog: &Catalog) -> Vec<CatalogItem>
//!
//! // Only needs the cart
//! fn get_cart(cart: &CartState) -> CartResponse
//!
//! // Needs both
//! fn add_to_cart(catalog: &Catalog, cart: &CartState, item_id: u32, quantity: Option<u32>)
//! ```
//!
//! Fallible commands return `Result<T, ApiError>`; both sides serialize to
//! JSON for the UI.

pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod config;
pub mod listing;
