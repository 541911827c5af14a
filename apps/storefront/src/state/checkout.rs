//! # Checkout State
//!
//! Runs the checkout session around the payment await.
//!
//! ## Submission Sequence
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    submit(form)                                         │
//! │                                                                         │
//! │  1. lock session ─► begin_submit(form, cart) ─► Submitting ─► unlock    │
//! │        (a second submit arriving now sees Submitting and is rejected)   │
//! │                                                                         │
//! │  2. tokio::spawn ─────────────────────────────────────────────┐         │
//! │     │  gateway.charge(request).await     ◄── no lock held     │         │
//! │     │                                                         │         │
//! │     │  3. lock session ─► confirm(...) ─► Confirmed           │         │
//! │     │                 └─► fail(...)    ─► Editing (recorded)  │         │
//! │     └─────────────────────────────────────────────────────────┘         │
//! │                                                                         │
//! │  4. submit awaits the task's JoinHandle                                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Steps 2-3 run on their own task, so a caller that gives up waiting
//! (timeout, aborted UI task) does not strand the session in `Submitting`.
//!
//! Lock order is session, then cart. Nothing takes them the other way round.

use std::sync::{Arc, Mutex, PoisonError};

use chrono::Utc;
use compost_core::{
    CheckoutForm, CheckoutSession, CheckoutStatus, CoreError, Order, PendingOrder,
    ESTIMATED_DELIVERY,
};
use thiserror::Error;
use tokio::task::JoinError;
use tracing::{info, warn};

use crate::payment::{PaymentError, PaymentGateway, PaymentRequest};
use crate::state::CartState;

#[derive(Debug, Error)]
pub enum CheckoutError {
    #[error(transparent)]
    Core(#[from] CoreError),

    #[error(transparent)]
    Payment(#[from] PaymentError),

    /// The payment task panicked or the runtime shut down under it.
    #[error("Payment task did not complete: {0}")]
    Interrupted(#[from] JoinError),
}

/// Injected checkout state: the current session plus the gateway that
/// charges for it.
#[derive(Clone)]
pub struct CheckoutState {
    session: Arc<Mutex<CheckoutSession>>,
    gateway: Arc<dyn PaymentGateway>,
}

impl CheckoutState {
    pub fn new(gateway: Arc<dyn PaymentGateway>) -> Self {
        Self::with_estimated_delivery(gateway, ESTIMATED_DELIVERY)
    }

    /// Checkout whose orders promise `estimated_delivery`, normally taken
    /// from `StoreConfig`.
    pub fn with_estimated_delivery(
        gateway: Arc<dyn PaymentGateway>,
        estimated_delivery: impl Into<String>,
    ) -> Self {
        CheckoutState {
            session: Arc::new(Mutex::new(CheckoutSession::with_estimated_delivery(
                estimated_delivery,
            ))),
            gateway,
        }
    }

    /// Executes a function with read access to the session.
    pub fn with_session<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&CheckoutSession) -> R,
    {
        let session = self.session.lock().unwrap_or_else(PoisonError::into_inner);
        f(&session)
    }

    fn with_session_mut<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&mut CheckoutSession) -> R,
    {
        let mut session = self.session.lock().unwrap_or_else(PoisonError::into_inner);
        f(&mut session)
    }

    /// Validates the form, charges the cart total and confirms the order.
    ///
    /// The cart is not cleared; that is left to the caller. Dropping the
    /// returned future after the submission started does not cancel the
    /// payment: the session still ends up `Confirmed` or back in `Editing`.
    pub async fn submit(&self, form: &CheckoutForm, cart: &CartState) -> Result<Order, CheckoutError> {
        let pending = self.with_session_mut(|session| {
            cart.with_cart(|c| session.begin_submit(form, c))
        })?;

        info!(
            amount = %pending.amount(),
            lines = pending.snapshot().lines.len(),
            "Checkout submitted, awaiting payment"
        );

        let payment = tokio::spawn(self.clone().settle(pending));
        payment.await?
    }

    /// Charges for `pending` and records the outcome on the session.
    async fn settle(self, pending: PendingOrder) -> Result<Order, CheckoutError> {
        let request = PaymentRequest::from(&pending);

        match self.gateway.charge(&request).await {
            Ok(receipt) => {
                let order = self.with_session_mut(|session| {
                    session.confirm(pending, receipt.reference, Utc::now())
                })?;
                info!(order_id = %order.id, total = %order.total, "Order confirmed");
                Ok(order)
            }
            Err(err) => {
                warn!(error = %err, "Payment failed, checkout returned to editing");
                self.with_session_mut(|session| session.fail(pending, err.to_string()))?;
                Err(err.into())
            }
        }
    }

    /// Replaces the session with a fresh one.
    ///
    /// Refused while a payment is in flight.
    pub fn start_new(&self) -> Result<(), CoreError> {
        self.with_session_mut(|session| {
            if session.status() == CheckoutStatus::Submitting {
                return Err(CoreError::SubmissionInProgress);
            }
            let delivery = session.estimated_delivery().to_string();
            *session = CheckoutSession::with_estimated_delivery(delivery);
            Ok(())
        })
    }
}

impl std::fmt::Debug for CheckoutState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CheckoutState")
            .field("session", &self.session)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use compost_core::{Catalog, ItemId};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    use crate::payment::{PaymentReceipt, SimulatedGateway};

    /// Declines the first `failures` charges, then approves.
    struct FlakyGateway {
        failures: usize,
        calls: AtomicUsize,
    }

    #[async_trait]
    impl PaymentGateway for FlakyGateway {
        async fn charge(&self, request: &PaymentRequest) -> Result<PaymentReceipt, PaymentError> {
            let call = self.calls.fetch_add(1, Ordering::SeqCst);
            tokio::time::sleep(Duration::from_millis(100)).await;
            if call < self.failures {
                return Err(PaymentError::Declined {
                    reason: "insufficient funds".to_string(),
                });
            }
            Ok(PaymentReceipt {
                reference: format!("FLAKY-{call}"),
                amount: request.amount,
            })
        }
    }

    fn simulated() -> CheckoutState {
        CheckoutState::new(Arc::new(SimulatedGateway::new(Duration::from_millis(3000))))
    }

    fn cart_with(ids: &[(u32, u32)]) -> CartState {
        let catalog = Catalog::demo();
        let cart = CartState::default();
        cart.with_cart_mut(|c| {
            for &(id, qty) in ids {
                c.add_item(catalog.get(ItemId::new(id)).unwrap(), qty);
            }
        });
        cart
    }

    #[tokio::test(start_paused = true)]
    async fn test_submit_confirms_order() {
        let checkout = simulated();
        let cart = cart_with(&[(1, 1), (2, 2)]);

        let order = checkout.submit(&CheckoutForm::example(), &cart).await.unwrap();

        assert_eq!(order.total.cents(), 6100);
        assert!(order.payment_reference.starts_with("SIM-"));
        assert_eq!(checkout.with_session(|s| s.status()), CheckoutStatus::Confirmed);
        assert_eq!(checkout.with_session(|s| s.order().cloned()), Some(order));
        // Cart is left alone
        assert_eq!(cart.with_cart(|c| c.line_count()), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_double_submit_places_one_order() {
        let checkout = simulated();
        let cart = cart_with(&[(1, 1)]);
        let form = CheckoutForm::example();

        let (first, second) = tokio::join!(
            checkout.submit(&form, &cart),
            checkout.submit(&form, &cart)
        );

        let results = [first, second];
        let confirmed = results.iter().filter(|r| r.is_ok()).count();
        let rejected = results
            .iter()
            .filter(|r| matches!(r, Err(CheckoutError::Core(CoreError::SubmissionInProgress))))
            .count();
        assert_eq!((confirmed, rejected), (1, 1));
        assert_eq!(checkout.with_session(|s| s.status()), CheckoutStatus::Confirmed);
    }

    #[tokio::test(start_paused = true)]
    async fn test_status_is_submitting_during_payment() {
        let checkout = simulated();
        let cart = cart_with(&[(1, 1)]);
        let form = CheckoutForm::example();

        let observer = checkout.clone();
        let (result, seen) = tokio::join!(checkout.submit(&form, &cart), async move {
            tokio::time::sleep(Duration::from_millis(1500)).await;
            observer.with_session(|s| s.status())
        });

        assert_eq!(seen, CheckoutStatus::Submitting);
        assert!(result.is_ok());
    }

    #[tokio::test(start_paused = true)]
    async fn test_declined_payment_returns_to_editing() {
        let checkout = CheckoutState::new(Arc::new(FlakyGateway {
            failures: 1,
            calls: AtomicUsize::new(0),
        }));
        let cart = cart_with(&[(4, 1)]);
        let form = CheckoutForm::example();

        let err = checkout.submit(&form, &cart).await.unwrap_err();
        assert!(matches!(err, CheckoutError::Payment(PaymentError::Declined { .. })));
        assert_eq!(checkout.with_session(|s| s.status()), CheckoutStatus::Editing);
        assert_eq!(
            checkout.with_session(|s| s.last_failure().map(str::to_string)),
            Some("Payment declined: insufficient funds".to_string())
        );

        let order = checkout.submit(&form, &cart).await.unwrap();
        assert_eq!(order.payment_reference, "FLAKY-1");
        assert_eq!(order.total.cents(), 4499);
    }

    #[tokio::test(start_paused = true)]
    async fn test_submit_after_confirmed_is_rejected() {
        let checkout = simulated();
        let cart = cart_with(&[(1, 1)]);
        let form = CheckoutForm::example();

        checkout.submit(&form, &cart).await.unwrap();
        let err = checkout.submit(&form, &cart).await.unwrap_err();
        assert!(matches!(
            err,
            CheckoutError::Core(CoreError::OrderAlreadyConfirmed { .. })
        ));

        checkout.start_new().unwrap();
        assert_eq!(checkout.with_session(|s| s.status()), CheckoutStatus::Editing);
        assert!(checkout.submit(&form, &cart).await.is_ok());
    }

    #[tokio::test(start_paused = true)]
    async fn test_start_new_refused_while_submitting() {
        let checkout = simulated();
        let cart = cart_with(&[(1, 1)]);
        let form = CheckoutForm::example();

        let observer = checkout.clone();
        let (result, reset) = tokio::join!(checkout.submit(&form, &cart), async move {
            tokio::time::sleep(Duration::from_millis(10)).await;
            observer.start_new()
        });

        assert!(matches!(reset, Err(CoreError::SubmissionInProgress)));
        assert!(result.is_ok());
    }

    #[tokio::test(start_paused = true)]
    async fn test_empty_cart_never_charges() {
        let gateway = Arc::new(FlakyGateway {
            failures: 0,
            calls: AtomicUsize::new(0),
        });
        let checkout = CheckoutState::new(gateway.clone());

        let err = checkout
            .submit(&CheckoutForm::example(), &CartState::default())
            .await
            .unwrap_err();

        assert!(matches!(err, CheckoutError::Core(CoreError::EmptyCart)));
        assert_eq!(gateway.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_abandoned_submit_still_confirms() {
        let checkout = simulated();
        let cart = cart_with(&[(1, 1)]);
        let form = CheckoutForm::example();

        let gave_up =
            tokio::time::timeout(Duration::from_millis(100), checkout.submit(&form, &cart)).await;
        assert!(gave_up.is_err());
        assert_eq!(checkout.with_session(|s| s.status()), CheckoutStatus::Submitting);

        tokio::time::sleep(Duration::from_secs(60)).await;

        assert_eq!(checkout.with_session(|s| s.status()), CheckoutStatus::Confirmed);
        let order = checkout.with_session(|s| s.order().cloned()).unwrap();
        assert_eq!(order.total.cents(), 3499);

        checkout.start_new().unwrap();
        assert!(checkout.submit(&form, &cart).await.is_ok());
    }

    #[tokio::test(start_paused = true)]
    async fn test_abandoned_submit_still_records_decline() {
        let checkout = CheckoutState::new(Arc::new(FlakyGateway {
            failures: 1,
            calls: AtomicUsize::new(0),
        }));
        let cart = cart_with(&[(1, 1)]);
        let form = CheckoutForm::example();

        let gave_up =
            tokio::time::timeout(Duration::from_millis(10), checkout.submit(&form, &cart)).await;
        assert!(gave_up.is_err());

        tokio::time::sleep(Duration::from_secs(1)).await;

        assert_eq!(checkout.with_session(|s| s.status()), CheckoutStatus::Editing);
        assert_eq!(
            checkout.with_session(|s| s.last_failure().map(str::to_string)),
            Some("Payment declined: insufficient funds".to_string())
        );
        assert_eq!(
            checkout.submit(&form, &cart).await.unwrap().payment_reference,
            "FLAKY-1"
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_delivery_text_survives_start_new() {
        let checkout = CheckoutState::with_estimated_delivery(
            Arc::new(SimulatedGateway::new(Duration::from_millis(3000))),
            "Next day",
        );
        let cart = cart_with(&[(2, 1)]);
        let form = CheckoutForm::example();

        let first = checkout.submit(&form, &cart).await.unwrap();
        assert_eq!(first.estimated_delivery, "Next day");

        checkout.start_new().unwrap();
        let second = checkout.submit(&form, &cart).await.unwrap();
        assert_eq!(second.estimated_delivery, "Next day");
    }
}
