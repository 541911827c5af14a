//! # Checkout Commands
//!
//! Order submission and the confirmation screen.
//!
//! ## Checkout Workflow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Checkout Workflow                                    │
//! │                                                                         │
//! │  Checkout form                                                          │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  submit_order(form) ─── Processing... (button disabled) ───┐           │
//! │       │                                                    │           │
//! │       │ get_checkout_status() = "submitting"               │           │
//! │       ▼                                                    ▼           │
//! │  Order Confirmed!  ◄── get_confirmed_order()     PAYMENT_ERROR         │
//! │       │                                          (form stays editable) │
//! │       ▼                                                                 │
//! │  start_new_checkout() + clear_cart()                                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use compost_core::{CheckoutForm, CheckoutStatus, Order};
use serde::Serialize;
use tracing::debug;

use crate::error::ApiError;
use crate::state::{CartState, CheckoutState};

/// Where the checkout currently stands.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutStatusResponse {
    pub status: CheckoutStatus,
    pub order_id: Option<String>,
    /// Why the previous attempt failed, shown above the form.
    pub last_failure: Option<String>,
}

fn status_response(checkout: &CheckoutState) -> CheckoutStatusResponse {
    checkout.with_session(|s| CheckoutStatusResponse {
        status: s.status(),
        order_id: s.order().map(|o| o.id.to_string()),
        last_failure: s.last_failure().map(str::to_string),
    })
}

/// Places the order for the current cart.
///
/// Resolves after the payment gateway answers. A second call while the
/// first is still processing fails with `BUSINESS_LOGIC`.
pub async fn submit_order(
    checkout: &CheckoutState,
    cart: &CartState,
    form: CheckoutForm,
) -> Result<Order, ApiError> {
    debug!("submit_order command");
    Ok(checkout.submit(&form, cart).await?)
}

pub fn get_checkout_status(checkout: &CheckoutState) -> CheckoutStatusResponse {
    debug!("get_checkout_status command");
    status_response(checkout)
}

/// Gets the confirmed order for the confirmation screen.
pub fn get_confirmed_order(checkout: &CheckoutState) -> Result<Order, ApiError> {
    debug!("get_confirmed_order command");
    checkout
        .with_session(|s| s.order().cloned())
        .ok_or_else(|| ApiError::not_found("Order", "current checkout"))
}

/// Starts a fresh checkout after a confirmed order.
pub fn start_new_checkout(checkout: &CheckoutState) -> Result<CheckoutStatusResponse, ApiError> {
    debug!("start_new_checkout command");
    checkout.start_new()?;
    Ok(status_response(checkout))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::time::Duration;

    use compost_core::Catalog;

    use crate::commands::cart::{add_to_cart, clear_cart};
    use crate::error::ErrorCode;
    use crate::payment::SimulatedGateway;

    fn checkout() -> CheckoutState {
        CheckoutState::new(Arc::new(SimulatedGateway::new(Duration::from_secs(3))))
    }

    #[tokio::test(start_paused = true)]
    async fn test_full_checkout() {
        let catalog = Catalog::demo();
        let cart = CartState::default();
        let checkout = checkout();
        add_to_cart(&catalog, &cart, 1, None).unwrap();

        assert_eq!(get_checkout_status(&checkout).status, CheckoutStatus::Editing);
        assert_eq!(get_confirmed_order(&checkout).unwrap_err().code, ErrorCode::NotFound);

        let order = submit_order(&checkout, &cart, CheckoutForm::example())
            .await
            .unwrap();
        assert_eq!(order.subtotal.cents(), 2500);
        assert_eq!(order.shipping.cents(), 999);
        assert_eq!(order.total.cents(), 3499);

        let status = get_checkout_status(&checkout);
        assert_eq!(status.status, CheckoutStatus::Confirmed);
        assert_eq!(status.order_id.as_deref(), Some(order.id.as_str()));
        assert_eq!(get_confirmed_order(&checkout).unwrap(), order);

        clear_cart(&cart);
        let status = start_new_checkout(&checkout).unwrap();
        assert_eq!(status.status, CheckoutStatus::Editing);
        assert!(status.order_id.is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn test_submit_order_validation_error() {
        let catalog = Catalog::demo();
        let cart = CartState::default();
        let checkout = checkout();
        add_to_cart(&catalog, &cart, 1, None).unwrap();

        let form = CheckoutForm {
            email: "not-an-email".to_string(),
            ..CheckoutForm::example()
        };
        let err = submit_order(&checkout, &cart, form).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);
        assert_eq!(get_checkout_status(&checkout).status, CheckoutStatus::Editing);
    }

    #[tokio::test(start_paused = true)]
    async fn test_submit_order_empty_cart() {
        let err = submit_order(&checkout(), &CartState::default(), CheckoutForm::example())
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::CartError);
    }

    #[tokio::test(start_paused = true)]
    async fn test_duplicate_submit_is_business_error() {
        let catalog = Catalog::demo();
        let cart = CartState::default();
        let checkout = checkout();
        add_to_cart(&catalog, &cart, 2, Some(3)).unwrap();

        let (first, second) = tokio::join!(
            submit_order(&checkout, &cart, CheckoutForm::example()),
            submit_order(&checkout, &cart, CheckoutForm::example())
        );

        assert!(first.is_ok());
        assert_eq!(second.unwrap_err().code, ErrorCode::BusinessLogic);
    }
}
