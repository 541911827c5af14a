//! # Error Types
//!
//! Domain-specific error types for compost-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  compost-core errors (this file)                                       │
//! │  ├── CoreError        - Business rule violations                       │
//! │  └── ValidationError  - Form / input validation failures               │
//! │                                                                         │
//! │  storefront errors (app crate)                                         │
//! │  ├── PaymentError     - Gateway failures                               │
//! │  ├── ConfigError      - Config file / env problems                     │
//! │  └── ApiError         - What the UI sees (serialized)                  │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → ApiError → UI                     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use thiserror::Error;

use crate::types::ItemId;

// =============================================================================
// Core Error
// =============================================================================

/// Core business logic errors.
#[derive(Debug, Error)]
pub enum CoreError {
    /// No catalog item has this id.
    #[error("Catalog item not found: {0}")]
    ItemNotFound(ItemId),

    /// The item is flagged out of stock and cannot be added to the cart.
    #[error("{name} is out of stock")]
    OutOfStock { id: ItemId, name: String },

    /// Checkout was submitted with nothing in the cart.
    #[error("Cart is empty")]
    EmptyCart,

    /// A submit arrived while the previous one is still processing payment.
    ///
    /// ## User Workflow
    /// ```text
    /// Click "Place Order" ──► Submitting (payment pending, 3s)
    ///      │
    ///      ├── Click "Place Order" again
    ///      │        │
    ///      │        ▼
    ///      │   SubmissionInProgress  (rejected, no second order)
    ///      ▼
    /// Confirmed (exactly one order)
    /// ```
    #[error("An order submission is already in progress")]
    SubmissionInProgress,

    /// The checkout already produced an order; start a new checkout instead.
    #[error("Order {order_id} is already confirmed")]
    OrderAlreadyConfirmed { order_id: String },

    /// A payment outcome arrived that does not belong to this checkout's
    /// current submission.
    #[error("No matching order submission is in progress")]
    NotSubmitting,

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// Raised before any business logic runs; the field name is the UI field
/// that needs attention.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    /// A required field is missing or blank.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Value must be positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Malformed value (e.g. an email without `@`, a price like "12.345").
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },

    /// Value is not in the allowed set.
    #[error("{field} must be one of: {allowed:?}")]
    NotAllowed { field: String, allowed: Vec<String> },

    /// Collection holds more entries than allowed.
    #[error("{field} allows at most {max} entries")]
    TooMany { field: String, max: usize },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================
