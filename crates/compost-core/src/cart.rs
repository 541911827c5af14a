//! # Cart Manager
//!
//! Holds the customer's cart and derives its pricing.
//!
//! ## Cart Operations
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Cart Operations                                      │
//! │                                                                         │
//! │  UI Action                 Operation              Effect                │
//! │  ─────────                 ─────────              ──────                │
//! │  "Add to Cart" ──────────► add_item(item, n) ──► qty += n / new line    │
//! │  "+" / "−" ──────────────► update_quantity() ──► qty = n (0 removes)    │
//! │  Trash icon ─────────────► remove_item() ──────► line deleted           │
//! │  Order summary ──────────► subtotal / shipping_cost / total             │
//! │                                                                         │
//! │  Unknown ids are silent no-ops. Nothing here can fail.                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Example
//! ```rust
//! use compost_core::{Cart, Catalog, ItemId};
//!
//! let catalog = Catalog::demo();
//! let vermicompost = catalog.get(ItemId::new(1)).unwrap(); // $25.00
//! let kitchen = catalog.get(ItemId::new(2)).unwrap();      // $18.00
//!
//! let mut cart = Cart::new();
//! cart.add_item(vermicompost, 1);
//! cart.add_item(kitchen, 2);
//!
//! assert_eq!(cart.subtotal().cents(), 6100);
//! assert!(cart.shipping_cost().is_zero());
//! assert_eq!(cart.total().cents(), 6100);
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::money::Money;
use crate::types::{CatalogItem, ItemId};
use crate::{FLAT_SHIPPING_FEE_CENTS, FREE_SHIPPING_THRESHOLD_CENTS};

// =============================================================================
// Shipping Policy
// =============================================================================

/// Flat-rate shipping waived at a subtotal threshold.
///
/// ```text
/// subtotal <  threshold  ──► flat_fee
/// subtotal >= threshold  ──► free
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct ShippingPolicy {
    pub free_threshold: Money,
    pub flat_fee: Money,
}

impl ShippingPolicy {
    pub const fn new(free_threshold: Money, flat_fee: Money) -> Self {
        ShippingPolicy {
            free_threshold,
            flat_fee,
        }
    }

    /// Shipping charged on a given subtotal.
    pub fn cost_for(&self, subtotal: Money) -> Money {
        if subtotal >= self.free_threshold {
            Money::zero()
        } else {
            self.flat_fee
        }
    }

    /// How much more the customer must add to qualify for free shipping.
    pub fn remaining_for_free(&self, subtotal: Money) -> Money {
        self.free_threshold.saturating_sub(subtotal)
    }
}

impl Default for ShippingPolicy {
    /// $50.00 threshold, $9.99 flat fee.
    fn default() -> Self {
        ShippingPolicy::new(
            Money::from_cents(FREE_SHIPPING_THRESHOLD_CENTS),
            Money::from_cents(FLAT_SHIPPING_FEE_CENTS),
        )
    }
}

// =============================================================================
// Cart Line
// =============================================================================

/// One catalog item plus the quantity requested.
///
/// The item is copied in when the line is created, so the line keeps the
/// price the customer saw.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct CartLine {
    pub item: CatalogItem,

    /// Always >= 1; a line that would drop to 0 is removed instead.
    pub quantity: u32,

    #[ts(as = "String")]
    pub added_at: DateTime<Utc>,
}

impl CartLine {
    fn new(item: &CatalogItem, quantity: u32) -> Self {
        CartLine {
            item: item.clone(),
            quantity,
            added_at: Utc::now(),
        }
    }

    pub fn id(&self) -> ItemId {
        self.item.id
    }

    /// Unit price × quantity.
    pub fn line_total(&self) -> Money {
        self.item.price * self.quantity
    }

    /// Savings against the list price for the whole line.
    pub fn line_savings(&self) -> Money {
        self.item.savings() * self.quantity
    }
}

// =============================================================================
// Cart
// =============================================================================

/// The shopping cart.
///
/// ## Invariants
/// - Lines are unique by item id (adding the same item increases quantity)
/// - Every stored quantity is >= 1
/// - Lines keep insertion order
#[derive(Debug, Clone)]
pub struct Cart {
    lines: Vec<CartLine>,
    policy: ShippingPolicy,
    created_at: DateTime<Utc>,
}

impl Cart {
    /// Creates an empty cart with the default shipping policy.
    pub fn new() -> Self {
        Cart::with_policy(ShippingPolicy::default())
    }

    /// Creates an empty cart priced with the given shipping policy.
    pub fn with_policy(policy: ShippingPolicy) -> Self {
        Cart {
            lines: Vec::new(),
            policy,
            created_at: Utc::now(),
        }
    }

    /// Adds `quantity` of an item, merging into an existing line.
    ///
    /// Quantities are not checked against stock. Adding zero does nothing.
    pub fn add_item(&mut self, item: &CatalogItem, quantity: u32) {
        if quantity == 0 {
            return;
        }

        if let Some(line) = self.lines.iter_mut().find(|l| l.id() == item.id) {
            line.quantity = line.quantity.saturating_add(quantity);
            return;
        }

        self.lines.push(CartLine::new(item, quantity));
    }

    /// Replaces a line's quantity. Zero removes the line.
    ///
    /// Returns whether a line for `id` was present; absent ids are a no-op.
    pub fn update_quantity(&mut self, id: ItemId, quantity: u32) -> bool {
        if quantity == 0 {
            return self.remove_item(id);
        }

        match self.lines.iter_mut().find(|l| l.id() == id) {
            Some(line) => {
                line.quantity = quantity;
                true
            }
            None => false,
        }
    }

    /// Deletes the line for `id`. Returns whether anything was removed.
    pub fn remove_item(&mut self, id: ItemId) -> bool {
        let initial_len = self.lines.len();
        self.lines.retain(|l| l.id() != id);
        self.lines.len() != initial_len
    }

    /// Empties the cart. Left to the caller after a completed order.
    pub fn clear(&mut self) {
        self.lines.clear();
        self.created_at = Utc::now();
    }

    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    pub fn get(&self, id: ItemId) -> Option<&CartLine> {
        self.lines.iter().find(|l| l.id() == id)
    }

    pub fn policy(&self) -> ShippingPolicy {
        self.policy
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Number of distinct items.
    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// Total units across all lines ("Shopping Cart (N items)").
    pub fn total_quantity(&self) -> u64 {
        self.lines.iter().map(|l| u64::from(l.quantity)).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Sum of line totals before shipping.
    pub fn subtotal(&self) -> Money {
        self.lines.iter().map(CartLine::line_total).sum()
    }

    /// Zero at or above the free-shipping threshold, flat fee below it.
    pub fn shipping_cost(&self) -> Money {
        self.policy.cost_for(self.subtotal())
    }

    /// Subtotal plus shipping.
    pub fn total(&self) -> Money {
        let subtotal = self.subtotal();
        subtotal + self.policy.cost_for(subtotal)
    }

    /// "Add $X more for free shipping". Zero once shipping is free.
    pub fn amount_until_free_shipping(&self) -> Money {
        self.policy.remaining_for_free(self.subtotal())
    }

    /// Total discount against list prices.
    pub fn savings(&self) -> Money {
        self.lines.iter().map(CartLine::line_savings).sum()
    }
}

impl Default for Cart {
    fn default() -> Self {
        Self::new()
    }
}

/// Cart totals summary for API responses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct CartTotals {
    pub line_count: usize,
    pub total_quantity: u64,
    pub subtotal: Money,
    pub shipping: Money,
    pub total: Money,
    pub savings: Money,
    pub amount_until_free_shipping: Money,
}

impl From<&Cart> for CartTotals {
    fn from(cart: &Cart) -> Self {
        let subtotal = cart.subtotal();
        let shipping = cart.policy.cost_for(subtotal);
        CartTotals {
            line_count: cart.line_count(),
            total_quantity: cart.total_quantity(),
            subtotal,
            shipping,
            total: subtotal + shipping,
            savings: cart.savings(),
            amount_until_free_shipping: cart.policy.remaining_for_free(subtotal),
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
