//! # Orders
//!
//! The immutable record produced by a confirmed checkout.
//!
//! Uses the snapshot pattern: every line freezes the name, unit and price
//! the customer saw, and the amounts are fixed at submission time. Later
//! cart edits never reach an existing order.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use ts_rs::TS;

use crate::cart::{Cart, CartLine};
use crate::money::Money;
use crate::types::ItemId;
use crate::ORDER_NUMBER_PREFIX;

// =============================================================================
// Order Id
// =============================================================================

/// Customer-facing order number, e.g. `CF-482913`.
///
/// Derived from the placement time: the prefix followed by the last six
/// digits of the millisecond timestamp.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct OrderId(String);

impl OrderId {
    /// ```rust
    /// use chrono::{TimeZone, Utc};
    /// use compost_core::OrderId;
    ///
    /// let at = Utc.timestamp_millis_opt(1_718_000_123_456).unwrap();
    /// assert_eq!(OrderId::from_timestamp(at).as_str(), "CF-123456");
    /// ```
    pub fn from_timestamp(at: DateTime<Utc>) -> Self {
        let suffix = at.timestamp_millis().rem_euclid(1_000_000);
        OrderId(format!("{}{:06}", ORDER_NUMBER_PREFIX, suffix))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for OrderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// =============================================================================
// Order Line
// =============================================================================

/// A cart line frozen into an order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct OrderLine {
    pub item_id: ItemId,
    /// Item name at time of order (frozen).
    pub name: String,
    pub unit: String,
    /// Unit price at time of order (frozen).
    pub unit_price: Money,
    pub quantity: u32,
    pub line_total: Money,
}

impl From<&CartLine> for OrderLine {
    fn from(line: &CartLine) -> Self {
        OrderLine {
            item_id: line.id(),
            name: line.item.name.clone(),
            unit: line.item.unit.clone(),
            unit_price: line.item.price,
            quantity: line.quantity,
            line_total: line.line_total(),
        }
    }
}

// =============================================================================
// Shipping Address
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct ShippingAddress {
    pub first_name: String,
    pub last_name: String,
    pub street: String,
    pub city: String,
    pub state: Option<String>,
    pub zip_code: String,
}

// =============================================================================
// Order Amounts
// =============================================================================

/// Lines and amounts captured from a cart at one instant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct OrderSnapshot {
    pub lines: Vec<OrderLine>,
    pub subtotal: Money,
    pub shipping: Money,
    pub total: Money,
}

impl From<&Cart> for OrderSnapshot {
    fn from(cart: &Cart) -> Self {
        let subtotal = cart.subtotal();
        let shipping = cart.policy().cost_for(subtotal);
        OrderSnapshot {
            lines: cart.lines().iter().map(OrderLine::from).collect(),
            subtotal,
            shipping,
            total: subtotal + shipping,
        }
    }
}

// =============================================================================
// Order
// =============================================================================

/// A confirmed order. Immutable once created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: OrderId,
    #[ts(as = "String")]
    pub placed_at: DateTime<Utc>,
    pub lines: Vec<OrderLine>,
    pub subtotal: Money,
    pub shipping: Money,
    pub total: Money,
    pub email: String,
    pub ship_to: ShippingAddress,
    /// Reference returned by the payment gateway.
    pub payment_reference: String,
    pub estimated_delivery: String,
}

impl Order {
    pub(crate) fn new(
        snapshot: OrderSnapshot,
        email: String,
        ship_to: ShippingAddress,
        payment_reference: String,
        estimated_delivery: String,
        placed_at: DateTime<Utc>,
    ) -> Self {
        Order {
            id: OrderId::from_timestamp(placed_at),
            placed_at,
            lines: snapshot.lines,
            subtotal: snapshot.subtotal,
            shipping: snapshot.shipping,
            total: snapshot.total,
            email,
            ship_to,
            payment_reference,
            estimated_delivery,
        }
    }

    /// Total units ordered.
    pub fn total_quantity(&self) -> u64 {
        self.lines.iter().map(|l| u64::from(l.quantity)).sum()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
