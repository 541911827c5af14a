//! # Payment Gateway
//!
//! The async seam between checkout and whoever takes the money.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     Payment During Checkout                             │
//! │                                                                         │
//! │  CheckoutState::submit                                                  │
//! │       │  (session lock released)                                        │
//! │       ▼                                                                 │
//! │  gateway.charge(&PaymentRequest) ──► Ok(PaymentReceipt)  ──► Confirmed  │
//! │                                  └─► Err(PaymentError)   ──► Editing    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! `SimulatedGateway` waits a fixed delay and always approves.

use std::time::Duration;

use async_trait::async_trait;
use compost_core::{Money, PendingOrder};
use serde::Serialize;
use thiserror::Error;
use tracing::debug;
use uuid::Uuid;

/// What the gateway is asked to charge.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentRequest {
    pub amount: Money,
    pub cardholder: String,
    pub card_last_four: String,
    pub email: String,
}

impl From<&PendingOrder> for PaymentRequest {
    fn from(pending: &PendingOrder) -> Self {
        PaymentRequest {
            amount: pending.amount(),
            cardholder: pending.cardholder().to_string(),
            card_last_four: pending.card_last_four().to_string(),
            email: pending.email().to_string(),
        }
    }
}

/// Proof of an approved charge.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentReceipt {
    pub reference: String,
    pub amount: Money,
}

#[derive(Debug, Error)]
pub enum PaymentError {
    /// The card issuer refused the charge.
    #[error("Payment declined: {reason}")]
    Declined { reason: String },

    /// The gateway could not be reached.
    #[error("Payment gateway unavailable: {0}")]
    GatewayUnavailable(String),
}

/// Charges a card for a pending order.
#[async_trait]
pub trait PaymentGateway: Send + Sync {
    async fn charge(&self, request: &PaymentRequest) -> Result<PaymentReceipt, PaymentError>;
}

/// Stand-in gateway: sleeps for `delay`, then approves every charge.
#[derive(Debug, Clone)]
pub struct SimulatedGateway {
    delay: Duration,
}

impl SimulatedGateway {
    pub fn new(delay: Duration) -> Self {
        SimulatedGateway { delay }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }
}

#[async_trait]
impl PaymentGateway for SimulatedGateway {
    async fn charge(&self, request: &PaymentRequest) -> Result<PaymentReceipt, PaymentError> {
        debug!(
            amount = %request.amount,
            card = %request.card_last_four,
            delay_ms = self.delay.as_millis() as u64,
            "Simulating payment"
        );
        tokio::time::sleep(self.delay).await;

        Ok(PaymentReceipt {
            reference: format!("SIM-{}", Uuid::new_v4()),
            amount: request.amount,
        })
    }
}
