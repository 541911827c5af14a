//! # Checkout Flow
//!
//! The order lifecycle state machine. Pure: it never waits or talks to a
//! gateway. The storefront drives it around the payment await.
//!
//! ## States
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Checkout Lifecycle                                   │
//! │                                                                         │
//! │  ┌──────────┐  begin_submit   ┌────────────┐  confirm   ┌───────────┐  │
//! │  │ Editing  │────────────────►│ Submitting │───────────►│ Confirmed │  │
//! │  └──────────┘                 └────────────┘            └───────────┘  │
//! │       ▲                             │                     (terminal)   │
//! │       └─────────── fail ────────────┘                                  │
//! │                                                                         │
//! │  begin_submit while Submitting ──► SubmissionInProgress                 │
//! │  begin_submit while Confirmed  ──► OrderAlreadyConfirmed                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Example
//! ```rust
//! use chrono::Utc;
//! use compost_core::{Cart, Catalog, CheckoutForm, CheckoutSession, CheckoutStatus, ItemId};
//!
//! let catalog = Catalog::demo();
//! let mut cart = Cart::new();
//! cart.add_item(catalog.get(ItemId::new(1)).unwrap(), 1);
//!
//! let mut session = CheckoutSession::new();
//! let pending = session.begin_submit(&CheckoutForm::example(), &cart).unwrap();
//! assert_eq!(session.status(), CheckoutStatus::Submitting);
//!
//! let order = session.confirm(pending, "SIM-1".to_string(), Utc::now()).unwrap();
//! assert_eq!(order.total.cents(), 3499);
//! assert_eq!(session.status(), CheckoutStatus::Confirmed);
//! ```

use std::sync::atomic::{AtomicU64, Ordering};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::cart::Cart;
use crate::error::{CoreError, CoreResult};
use crate::money::Money;
use crate::order::{Order, OrderSnapshot, ShippingAddress};
use crate::validation::{validate_email, validate_required, ValidationResult};
use crate::ESTIMATED_DELIVERY;

static NEXT_SESSION_ID: AtomicU64 = AtomicU64::new(1);

// =============================================================================
// Checkout Form
// =============================================================================

/// The fields collected on the checkout screen.
///
/// Field names match the UI's form keys so a `ValidationError` can point at
/// the input to highlight.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutForm {
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub address: String,
    pub city: String,
    /// Optional; the only address field without `required`.
    #[serde(default)]
    pub state: String,
    pub zip_code: String,
    pub name_on_card: String,
    pub card_number: String,
    pub expiry_date: String,
    pub cvv: String,
}

impl CheckoutForm {
    /// Checks required fields in form order and returns the first failure.
    ///
    /// Payment fields are presence-checked only.
    pub fn validate(&self) -> ValidationResult<()> {
        validate_email(&self.email)?;

        let required = [
            ("firstName", &self.first_name),
            ("lastName", &self.last_name),
            ("address", &self.address),
            ("city", &self.city),
            ("zipCode", &self.zip_code),
            ("nameOnCard", &self.name_on_card),
            ("cardNumber", &self.card_number),
            ("expiryDate", &self.expiry_date),
            ("cvv", &self.cvv),
        ];
        for (field, value) in required {
            validate_required(field, value)?;
        }

        Ok(())
    }

    /// The shipping address portion of the form, trimmed.
    pub fn shipping_address(&self) -> ShippingAddress {
        let state = self.state.trim();
        ShippingAddress {
            first_name: self.first_name.trim().to_string(),
            last_name: self.last_name.trim().to_string(),
            street: self.address.trim().to_string(),
            city: self.city.trim().to_string(),
            state: (!state.is_empty()).then(|| state.to_string()),
            zip_code: self.zip_code.trim().to_string(),
        }
    }

    /// Last four digits of the card number, for receipts and logs.
    pub fn card_last_four(&self) -> String {
        let digits: Vec<char> = self
            .card_number
            .chars()
            .filter(char::is_ascii_digit)
            .collect();
        let start = digits.len().saturating_sub(4);
        digits[start..].iter().collect()
    }

    /// A fully filled-in form, for demos and doc examples.
    pub fn example() -> Self {
        CheckoutForm {
            email: "grower@example.com".to_string(),
            first_name: "Sam".to_string(),
            last_name: "Rivera".to_string(),
            address: "12 Orchard Lane".to_string(),
            city: "Portland".to_string(),
            state: "OR".to_string(),
            zip_code: "97201".to_string(),
            name_on_card: "Sam Rivera".to_string(),
            card_number: "4242 4242 4242 4242".to_string(),
            expiry_date: "12/29".to_string(),
            cvv: "123".to_string(),
        }
    }
}

// =============================================================================
// Checkout Status
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum CheckoutStatus {
    /// Form is being filled in (initial).
    #[default]
    Editing,
    /// Payment is processing; further submits are rejected.
    Submitting,
    /// Order placed (terminal).
    Confirmed,
}

// =============================================================================
// Pending Order
// =============================================================================

/// Everything captured at submit time, held while payment runs.
///
/// Only `CheckoutSession::begin_submit` creates one, and it is consumed by
/// `confirm`, so each submission confirms at most once. It is bound to the
/// session that issued it; any other session rejects it.
#[derive(Debug)]
pub struct PendingOrder {
    session_id: u64,
    snapshot: OrderSnapshot,
    email: String,
    ship_to: ShippingAddress,
    cardholder: String,
    card_last_four: String,
}

impl PendingOrder {
    /// Amount to charge, fixed at submission.
    pub fn amount(&self) -> Money {
        self.snapshot.total
    }

    pub fn snapshot(&self) -> &OrderSnapshot {
        &self.snapshot
    }

    pub fn cardholder(&self) -> &str {
        &self.cardholder
    }

    pub fn card_last_four(&self) -> &str {
        &self.card_last_four
    }

    pub fn email(&self) -> &str {
        &self.email
    }
}

// =============================================================================
// Checkout Session
// =============================================================================

#[derive(Debug, Default)]
enum Phase {
    #[default]
    Editing,
    Submitting,
    Confirmed(Box<Order>),
}

/// One checkout attempt. A confirmed session stays confirmed; placing
/// another order needs a fresh session.
#[derive(Debug)]
pub struct CheckoutSession {
    id: u64,
    phase: Phase,
    last_failure: Option<String>,
    estimated_delivery: String,
}

impl Default for CheckoutSession {
    fn default() -> Self {
        Self::with_estimated_delivery(ESTIMATED_DELIVERY)
    }
}

impl CheckoutSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// A session whose orders promise `estimated_delivery`
    /// (e.g. "1-2 business days").
    pub fn with_estimated_delivery(estimated_delivery: impl Into<String>) -> Self {
        CheckoutSession {
            id: NEXT_SESSION_ID.fetch_add(1, Ordering::Relaxed),
            phase: Phase::Editing,
            last_failure: None,
            estimated_delivery: estimated_delivery.into(),
        }
    }

    pub fn estimated_delivery(&self) -> &str {
        &self.estimated_delivery
    }

    pub fn status(&self) -> CheckoutStatus {
        match self.phase {
            Phase::Editing => CheckoutStatus::Editing,
            Phase::Submitting => CheckoutStatus::Submitting,
            Phase::Confirmed(_) => CheckoutStatus::Confirmed,
        }
    }

    /// The confirmed order, once there is one.
    pub fn order(&self) -> Option<&Order> {
        match &self.phase {
            Phase::Confirmed(order) => Some(order),
            _ => None,
        }
    }

    /// Why the previous submission failed, if it did.
    pub fn last_failure(&self) -> Option<&str> {
        self.last_failure.as_deref()
    }

    /// Validates the form, snapshots the cart and moves to `Submitting`.
    ///
    /// ## Errors
    /// - `SubmissionInProgress` if a submission is already running
    /// - `OrderAlreadyConfirmed` if this session already placed its order
    /// - `Validation` for the first missing or malformed field
    /// - `EmptyCart` when there is nothing to order
    ///
    /// On error the state is unchanged.
    pub fn begin_submit(&mut self, form: &CheckoutForm, cart: &Cart) -> CoreResult<PendingOrder> {
        match &self.phase {
            Phase::Editing => {}
            Phase::Submitting => return Err(CoreError::SubmissionInProgress),
            Phase::Confirmed(order) => {
                return Err(CoreError::OrderAlreadyConfirmed {
                    order_id: order.id.to_string(),
                })
            }
        }

        form.validate()?;
        if cart.is_empty() {
            return Err(CoreError::EmptyCart);
        }

        let pending = PendingOrder {
            session_id: self.id,
            snapshot: OrderSnapshot::from(cart),
            email: form.email.trim().to_string(),
            ship_to: form.shipping_address(),
            cardholder: form.name_on_card.trim().to_string(),
            card_last_four: form.card_last_four(),
        };

        self.phase = Phase::Submitting;
        self.last_failure = None;
        Ok(pending)
    }

    /// Completes a submission: `Submitting → Confirmed`.
    ///
    /// Returns a copy of the stored order. A `pending` issued by another
    /// session is rejected with `NotSubmitting` and leaves this one as it was.
    pub fn confirm(
        &mut self,
        pending: PendingOrder,
        payment_reference: String,
        placed_at: DateTime<Utc>,
    ) -> CoreResult<Order> {
        self.check_pending(&pending)?;

        let order = Order::new(
            pending.snapshot,
            pending.email,
            pending.ship_to,
            payment_reference,
            self.estimated_delivery.clone(),
            placed_at,
        );
        self.phase = Phase::Confirmed(Box::new(order.clone()));
        Ok(order)
    }

    /// Abandons a submission after a payment failure: `Submitting → Editing`.
    pub fn fail(&mut self, pending: PendingOrder, reason: impl Into<String>) -> CoreResult<()> {
        self.check_pending(&pending)?;

        self.phase = Phase::Editing;
        self.last_failure = Some(reason.into());
        Ok(())
    }

    fn check_pending(&self, pending: &PendingOrder) -> CoreResult<()> {
        match &self.phase {
            Phase::Submitting if pending.session_id == self.id => Ok(()),
            Phase::Confirmed(order) => Err(CoreError::OrderAlreadyConfirmed {
                order_id: order.id.to_string(),
            }),
            _ => Err(CoreError::NotSubmitting),
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Catalog;
    use crate::error::ValidationError;
    use crate::types::ItemId;

    fn cart_with(ids: &[(u32, u32)]) -> Cart {
        let catalog = Catalog::demo();
        let mut cart = Cart::new();
        for &(id, qty) in ids {
            cart.add_item(catalog.get(ItemId::new(id)).unwrap(), qty);
        }
        cart
    }

    #[test]
    fn test_starts_editing() {
        let session = CheckoutSession::new();
        assert_eq!(session.status(), CheckoutStatus::Editing);
        assert!(session.order().is_none());
        assert!(session.last_failure().is_none());
    }

    #[test]
    fn test_happy_path() {
        let cart = cart_with(&[(1, 1), (2, 2)]);
        let mut session = CheckoutSession::new();

        let pending = session.begin_submit(&CheckoutForm::example(), &cart).unwrap();
        assert_eq!(pending.amount().cents(), 6100);
        assert_eq!(pending.card_last_four(), "4242");

        let order = session
            .confirm(pending, "SIM-abc".to_string(), Utc::now())
            .unwrap();
        assert_eq!(order.subtotal.cents(), 6100);
        assert!(order.shipping.is_zero());
        assert_eq!(order.total.cents(), 6100);
        assert_eq!(order.payment_reference, "SIM-abc");
        assert_eq!(order.estimated_delivery, "3-5 business days");
        assert!(order.id.as_str().starts_with("CF-"));
        assert_eq!(session.order(), Some(&order));
    }

    #[test]
    fn test_second_submit_while_submitting_is_rejected() {
        let cart = cart_with(&[(1, 1)]);
        let mut session = CheckoutSession::new();
        let form = CheckoutForm::example();

        let pending = session.begin_submit(&form, &cart).unwrap();
        let err = session.begin_submit(&form, &cart).unwrap_err();
        assert!(matches!(err, CoreError::SubmissionInProgress));

        session.confirm(pending, "SIM-1".to_string(), Utc::now()).unwrap();
        assert_eq!(session.status(), CheckoutStatus::Confirmed);
    }

    #[test]
    fn test_confirmed_is_terminal() {
        let cart = cart_with(&[(1, 1)]);
        let mut session = CheckoutSession::new();
        let form = CheckoutForm::example();

        let pending = session.begin_submit(&form, &cart).unwrap();
        let order = session.confirm(pending, "SIM-1".to_string(), Utc::now()).unwrap();

        let err = session.begin_submit(&form, &cart).unwrap_err();
        assert!(
            matches!(err, CoreError::OrderAlreadyConfirmed { ref order_id } if *order_id == order.id.to_string())
        );
        assert_eq!(session.order(), Some(&order));
    }

    #[test]
    fn test_validation_failure_keeps_editing() {
        let cart = cart_with(&[(1, 1)]);
        let mut session = CheckoutSession::new();
        let form = CheckoutForm {
            cvv: String::new(),
            ..CheckoutForm::example()
        };

        let err = session.begin_submit(&form, &cart).unwrap_err();
        assert!(matches!(
            err,
            CoreError::Validation(ValidationError::Required { ref field }) if field == "cvv"
        ));
        assert_eq!(session.status(), CheckoutStatus::Editing);
    }

    #[test]
    fn test_empty_cart_is_rejected() {
        let mut session = CheckoutSession::new();
        let err = session
            .begin_submit(&CheckoutForm::example(), &Cart::new())
            .unwrap_err();
        assert!(matches!(err, CoreError::EmptyCart));
        assert_eq!(session.status(), CheckoutStatus::Editing);
    }

    #[test]
    fn test_failure_returns_to_editing_and_allows_retry() {
        let cart = cart_with(&[(4, 1)]);
        let mut session = CheckoutSession::new();
        let form = CheckoutForm::example();

        let pending = session.begin_submit(&form, &cart).unwrap();
        session.fail(pending, "card declined").unwrap();
        assert_eq!(session.status(), CheckoutStatus::Editing);
        assert_eq!(session.last_failure(), Some("card declined"));

        let pending = session.begin_submit(&form, &cart).unwrap();
        assert!(session.last_failure().is_none());
        let order = session.confirm(pending, "SIM-2".to_string(), Utc::now()).unwrap();
        assert_eq!(order.total.cents(), 4499);
    }

    #[test]
    fn test_amounts_fixed_at_submission() {
        let mut cart = cart_with(&[(1, 1)]);
        let mut session = CheckoutSession::new();

        let pending = session.begin_submit(&CheckoutForm::example(), &cart).unwrap();
        cart.add_item(Catalog::demo().get(ItemId::new(4)).unwrap(), 5);

        let order = session.confirm(pending, "SIM-3".to_string(), Utc::now()).unwrap();
        assert_eq!(order.lines.len(), 1);
        assert_eq!(order.total.cents(), 3499);
    }

    #[test]
    fn test_form_validation_order() {
        let blank = CheckoutForm::default();
        assert!(matches!(
            blank.validate(),
            Err(ValidationError::Required { ref field }) if field == "email"
        ));

        let form = CheckoutForm {
            first_name: " ".to_string(),
            zip_code: String::new(),
            ..CheckoutForm::example()
        };
        assert!(matches!(
            form.validate(),
            Err(ValidationError::Required { ref field }) if field == "firstName"
        ));
    }

    #[test]
    fn test_state_is_optional() {
        let form = CheckoutForm {
            state: String::new(),
            ..CheckoutForm::example()
        };
        assert!(form.validate().is_ok());
        assert_eq!(form.shipping_address().state, None);
    }

    #[test]
    fn test_card_fields_presence_only() {
        let form = CheckoutForm {
            card_number: "1234".to_string(),
            expiry_date: "whenever".to_string(),
            cvv: "x".to_string(),
            ..CheckoutForm::example()
        };
        assert!(form.validate().is_ok());
    }

    #[test]
    fn test_card_last_four() {
        let short = CheckoutForm {
            card_number: "12".to_string(),
            ..CheckoutForm::example()
        };
        assert_eq!(short.card_last_four(), "12");
        assert_eq!(CheckoutForm::example().card_last_four(), "4242");
    }

    #[test]
    fn test_confirm_without_submit_is_rejected() {
        let cart = cart_with(&[(1, 1)]);
        let mut submitted = CheckoutSession::new();
        let pending = submitted.begin_submit(&CheckoutForm::example(), &cart).unwrap();

        let mut other = CheckoutSession::new();
        let err = other.confirm(pending, "SIM-x".to_string(), Utc::now()).unwrap_err();
        assert!(matches!(err, CoreError::NotSubmitting));
        assert_eq!(other.status(), CheckoutStatus::Editing);
    }

    #[test]
    fn test_pending_order_is_bound_to_its_session() {
        let mut first = CheckoutSession::new();
        let mut second = CheckoutSession::new();
        let first_pending = first
            .begin_submit(&CheckoutForm::example(), &cart_with(&[(1, 1)]))
            .unwrap();
        let second_pending = second
            .begin_submit(&CheckoutForm::example(), &cart_with(&[(4, 2)]))
            .unwrap();

        // Both are submitting, but neither accepts the other's submission
        let err = second
            .confirm(first_pending, "SIM-a".to_string(), Utc::now())
            .unwrap_err();
        assert!(matches!(err, CoreError::NotSubmitting));
        assert_eq!(second.status(), CheckoutStatus::Submitting);

        let err = first.fail(second_pending, "declined").unwrap_err();
        assert!(matches!(err, CoreError::NotSubmitting));
        assert_eq!(first.status(), CheckoutStatus::Submitting);
        assert!(first.last_failure().is_none());
    }

    #[test]
    fn test_order_carries_configured_delivery() {
        let mut session = CheckoutSession::with_estimated_delivery("1-2 business days");
        assert_eq!(session.estimated_delivery(), "1-2 business days");

        let pending = session
            .begin_submit(&CheckoutForm::example(), &cart_with(&[(1, 1)]))
            .unwrap();
        let order = session.confirm(pending, "SIM-d".to_string(), Utc::now()).unwrap();
        assert_eq!(order.estimated_delivery, "1-2 business days");
    }
}
