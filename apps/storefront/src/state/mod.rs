//! # State Module
//!
//! Injected session state for the storefront.
//!
//! Each state type owns one concern, and each command takes only the state
//! it needs.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    State Architecture                                   │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                      Storefront (lib.rs)                        │   │
//! │  │  catalog, cart, checkout, listings, config                      │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                              │                                          │
//! │          ┌──────────────────┼──────────────────┐                       │
//! │          ▼                  ▼                  ▼                        │
//! │  ┌──────────────┐  ┌──────────────────┐  ┌──────────────┐              │
//! │  │  CartState   │  │  CheckoutState   │  │ ListingState │              │
//! │  │              │  │                  │  │              │              │
//! │  │  Arc<Mutex<  │  │  Arc<Mutex<      │  │  Arc<Mutex<  │              │
//! │  │    Cart      │  │   CheckoutSession│  │  ListingBook │              │
//! │  │  >>          │  │  >> + gateway    │  │  >>          │              │
//! │  └──────────────┘  └──────────────────┘  └──────────────┘              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

mod cart;
mod checkout;
mod listings;

pub use cart::CartState;
pub use checkout::{CheckoutError, CheckoutState};
pub use listings::ListingState;
