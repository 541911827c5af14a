//! # Cart Commands
//!
//! Commands for cart manipulation.
//!
//! ## Cart Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Cart Lifecycle                                       │
//! │                                                                         │
//! │  ┌──────────┐     ┌──────────┐     ┌──────────┐     ┌──────────┐       │
//! │  │  Empty   │────►│ In Cart  │────►│ Checkout │────►│ Confirmed│       │
//! │  │  Cart    │     │          │     │   Form   │     │  Order   │       │
//! │  └──────────┘     └──────────┘     └──────────┘     └──────────┘       │
//! │                        │                 │                              │
//! │                   add_to_cart       submit_order                       │
//! │                   update_item       (checkout.rs)                      │
//! │                   remove_item                                           │
//! │                        │                                                │
//! │                        ▼                                                │
//! │                   clear_cart ──────────────────────►                   │
//! │                                                      (back to empty)   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use compost_core::validation::validate_quantity;
use compost_core::{Cart, CartLine, CartTotals, Catalog, CoreError, ItemId};
use serde::Serialize;
use tracing::debug;

use crate::error::ApiError;
use crate::state::CartState;

/// Cart response including lines and totals.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CartResponse {
    pub lines: Vec<CartLine>,
    pub totals: CartTotals,
}

impl From<&Cart> for CartResponse {
    fn from(cart: &Cart) -> Self {
        CartResponse {
            lines: cart.lines().to_vec(),
            totals: CartTotals::from(cart),
        }
    }
}

/// Gets the current cart contents.
///
/// ## User Workflow
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │  Shopping Cart (3 items)                                               │
/// │                                                                         │
/// │  Premium Vermicompost    per 25kg bag     x1     $25.00               │
/// │  Organic Kitchen Compost per 20kg bag     x2     $36.00               │
/// │  ────────────────────────────────────────────────────────             │
/// │  Subtotal                                        $61.00               │
/// │  Shipping                                          Free               │
/// │  Total                                           $61.00               │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
pub fn get_cart(cart: &CartState) -> CartResponse {
    debug!("get_cart command");
    cart.with_cart(|c| CartResponse::from(c))
}

/// Adds an item to the cart.
///
/// ## Behavior
/// - Already in cart: quantity increases
/// - Not in cart: added as a new line with the item's current price
/// - Items flagged out of stock are refused (the UI disables the button)
///
/// ## Arguments
/// * `item_id` - Catalog item id
/// * `quantity` - Quantity to add (default: 1, must be at least 1)
pub fn add_to_cart(
    catalog: &Catalog,
    cart: &CartState,
    item_id: u32,
    quantity: Option<u32>,
) -> Result<CartResponse, ApiError> {
    let quantity = quantity.unwrap_or(1);
    debug!(item_id, quantity, "add_to_cart command");

    validate_quantity(quantity)?;
    let item = catalog.require(ItemId::new(item_id))?;
    if !item.in_stock {
        return Err(CoreError::OutOfStock {
            id: item.id,
            name: item.name.clone(),
        }
        .into());
    }

    Ok(cart.with_cart_mut(|c| {
        c.add_item(item, quantity);
        CartResponse::from(&*c)
    }))
}

/// Sets the quantity of a line.
///
/// ## Behavior
/// - Quantity 0: removes the line
/// - Item not in cart: nothing changes
pub fn update_cart_item(cart: &CartState, item_id: u32, quantity: u32) -> CartResponse {
    debug!(item_id, quantity, "update_cart_item command");

    cart.with_cart_mut(|c| {
        if !c.update_quantity(ItemId::new(item_id), quantity) {
            debug!(item_id, "Item not in cart, nothing to update");
        }
        CartResponse::from(&*c)
    })
}

/// Removes a line from the cart. Unknown ids leave the cart unchanged.
pub fn remove_from_cart(cart: &CartState, item_id: u32) -> CartResponse {
    debug!(item_id, "remove_from_cart command");

    cart.with_cart_mut(|c| {
        c.remove_item(ItemId::new(item_id));
        CartResponse::from(&*c)
    })
}

/// Clears all items from the cart.
///
/// ## When Used
/// - Customer empties the cart
/// - After an order is confirmed (new shopping session)
pub fn clear_cart(cart: &CartState) -> CartResponse {
    debug!("clear_cart command");

    cart.with_cart_mut(|c| {
        c.clear();
        CartResponse::from(&*c)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;

    #[test]
    fn test_add_to_cart_defaults_to_one() {
        let catalog = Catalog::demo();
        let cart = CartState::default();

        let response = add_to_cart(&catalog, &cart, 1, None).unwrap();
        assert_eq!(response.lines.len(), 1);
        assert_eq!(response.lines[0].quantity, 1);
        assert_eq!(response.totals.subtotal.cents(), 2500);
        assert_eq!(response.totals.shipping.cents(), 999);
        assert_eq!(response.totals.total.cents(), 3499);
    }

    #[test]
    fn test_add_to_cart_merges_lines() {
        let catalog = Catalog::demo();
        let cart = CartState::default();

        add_to_cart(&catalog, &cart, 1, Some(1)).unwrap();
        add_to_cart(&catalog, &cart, 2, Some(1)).unwrap();
        let response = add_to_cart(&catalog, &cart, 2, Some(1)).unwrap();

        assert_eq!(response.lines.len(), 2);
        assert_eq!(response.totals.total_quantity, 3);
        assert_eq!(response.totals.subtotal.cents(), 6100);
        assert!(response.totals.shipping.is_zero());
        assert_eq!(response.totals.total.cents(), 6100);
    }

    #[test]
    fn test_add_to_cart_rejections() {
        let catalog = Catalog::demo();
        let cart = CartState::default();

        let err = add_to_cart(&catalog, &cart, 3, None).unwrap_err();
        assert_eq!(err.code, ErrorCode::OutOfStock);
        assert_eq!(err.message, "Garden Mix Compost is out of stock");

        let err = add_to_cart(&catalog, &cart, 77, None).unwrap_err();
        assert_eq!(err.code, ErrorCode::NotFound);

        let err = add_to_cart(&catalog, &cart, 1, Some(0)).unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);

        assert!(get_cart(&cart).lines.is_empty());
    }

    #[test]
    fn test_update_and_remove() {
        let catalog = Catalog::demo();
        let cart = CartState::default();
        add_to_cart(&catalog, &cart, 4, Some(1)).unwrap();
        add_to_cart(&catalog, &cart, 6, Some(1)).unwrap();

        let response = update_cart_item(&cart, 4, 3);
        assert_eq!(response.totals.subtotal.cents(), 3 * 3500 + 2000);

        let response = update_cart_item(&cart, 6, 0);
        assert_eq!(response.lines.len(), 1);

        let response = remove_from_cart(&cart, 999);
        assert_eq!(response.lines.len(), 1);

        let response = remove_from_cart(&cart, 4);
        assert!(response.lines.is_empty());
    }

    #[test]
    fn test_clear_cart() {
        let catalog = Catalog::demo();
        let cart = CartState::default();
        add_to_cart(&catalog, &cart, 5, Some(4)).unwrap();

        let response = clear_cart(&cart);
        assert!(response.lines.is_empty());
        assert_eq!(response.totals.line_count, 0);
    }
}
