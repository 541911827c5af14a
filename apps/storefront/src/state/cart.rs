//! # Cart State
//!
//! The session's shopping cart, shared by every screen that shows it.
//!
//! ## Thread Safety
//! The cart is wrapped in `Arc<Mutex<T>>` because several commands read
//! and modify it, and only one may modify it at a time.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Cart State Operations                                │
//! │                                                                         │
//! │  UI Action                Command                 Cart Change           │
//! │  ─────────                ───────                 ───────────           │
//! │  Add to Cart ────────────► add_to_cart() ───────► qty += n / new line   │
//! │  + / − ──────────────────► update_cart_item() ──► qty = n (0 removes)   │
//! │  Trash ──────────────────► remove_from_cart() ──► line deleted          │
//! │  Header badge, Cart page ► get_cart() ──────────► (read only)           │
//! │  Checkout submit ────────► CheckoutState ───────► (read only snapshot)  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::sync::{Arc, Mutex, PoisonError};

use compost_core::{Cart, ShippingPolicy};

/// Injected cart state.
///
/// Cloning shares the same cart.
#[derive(Debug, Clone)]
pub struct CartState {
    cart: Arc<Mutex<Cart>>,
}

impl CartState {
    /// Creates an empty cart priced with `policy`.
    pub fn new(policy: ShippingPolicy) -> Self {
        CartState {
            cart: Arc::new(Mutex::new(Cart::with_policy(policy))),
        }
    }

    /// Executes a function with read access to the cart.
    ///
    /// ## Usage
    /// ```rust
    /// use compost_core::CartTotals;
    /// use compost_storefront::state::CartState;
    ///
    /// let cart_state = CartState::default();
    /// let totals = cart_state.with_cart(|cart| CartTotals::from(cart));
    /// assert_eq!(totals.line_count, 0);
    /// ```
    pub fn with_cart<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&Cart) -> R,
    {
        // Every mutation leaves the cart consistent, so a poisoned lock is still usable.
        let cart = self.cart.lock().unwrap_or_else(PoisonError::into_inner);
        f(&cart)
    }

    /// Executes a function with write access to the cart.
    pub fn with_cart_mut<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&mut Cart) -> R,
    {
        let mut cart = self.cart.lock().unwrap_or_else(PoisonError::into_inner);
        f(&mut cart)
    }
}

impl Default for CartState {
    fn default() -> Self {
        Self::new(ShippingPolicy::default())
    }
}
