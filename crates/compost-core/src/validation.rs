//! # Validation Module
//!
//! Input validation for checkout and vendor forms.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Browser form                                                 │
//! │  ├── `required` attributes, `type="email"`                             │
//! │  └── Immediate user feedback                                           │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: THIS MODULE                                                  │
//! │  ├── Same rules, enforced again so a scripted submit can't skip them   │
//! │  └── Returns the first failing field as a ValidationError              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Card number, expiry and CVV are presence-checked only. There are no
//! Luhn, date or length rules.
//!
//! ## Usage
//! ```rust
//! use compost_core::validation::{validate_email, validate_required};
//!
//! assert!(validate_required("city", "Portland").is_ok());
//! assert!(validate_required("city", "   ").is_err());
//! assert!(validate_email("grower@example.com").is_ok());
//! ```

use crate::error::ValidationError;
use crate::money::Money;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Longest accepted product name.
pub const MAX_NAME_LEN: usize = 200;

/// Longest accepted product description.
pub const MAX_DESCRIPTION_LEN: usize = 2000;

/// Longest accepted catalog search query.
pub const MAX_QUERY_LEN: usize = 100;

// =============================================================================
// String Validators
// =============================================================================

/// Fails with `Required` when the value is empty after trimming.
pub fn validate_required(field: &str, value: &str) -> ValidationResult<()> {
    if value.trim().is_empty() {
        return Err(ValidationError::Required {
            field: field.to_string(),
        });
    }

    Ok(())
}

/// Validates an email address the way an `<input type="email">` does.
///
/// ## Rules
/// - Must not be empty
/// - Must be `local@domain` with both parts non-empty and no whitespace
///
/// ```rust
/// use compost_core::validation::validate_email;
///
/// assert!(validate_email("a@b").is_ok());
/// assert!(validate_email("").is_err());
/// assert!(validate_email("no-at-sign").is_err());
/// assert!(validate_email("@example.com").is_err());
/// ```
pub fn validate_email(email: &str) -> ValidationResult<()> {
    validate_required("email", email)?;
    let email = email.trim();

    let well_formed = match email.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && !domain.is_empty()
                && !domain.contains('@')
                && !email.chars().any(char::is_whitespace)
        }
        None => false,
    };

    if !well_formed {
        return Err(ValidationError::InvalidFormat {
            field: "email".to_string(),
            reason: "must look like name@example.com".to_string(),
        });
    }

    Ok(())
}

/// Validates a product name.
///
/// ## Rules
/// - Must not be empty
/// - At most 200 characters
pub fn validate_product_name(name: &str) -> ValidationResult<()> {
    validate_required("name", name)?;

    if name.trim().chars().count() > MAX_NAME_LEN {
        return Err(ValidationError::TooLong {
            field: "name".to_string(),
            max: MAX_NAME_LEN,
        });
    }

    Ok(())
}

/// Validates a product description.
pub fn validate_description(description: &str) -> ValidationResult<()> {
    validate_required("description", description)?;

    if description.trim().chars().count() > MAX_DESCRIPTION_LEN {
        return Err(ValidationError::TooLong {
            field: "description".to_string(),
            max: MAX_DESCRIPTION_LEN,
        });
    }

    Ok(())
}

/// Validates a search query.
///
/// ## Rules
/// - Can be empty (matches the whole catalog)
/// - At most 100 characters
///
/// ## Returns
/// The trimmed query string.
pub fn validate_search_query(query: &str) -> ValidationResult<String> {
    let query = query.trim();

    if query.chars().count() > MAX_QUERY_LEN {
        return Err(ValidationError::TooLong {
            field: "query".to_string(),
            max: MAX_QUERY_LEN,
        });
    }

    Ok(query.to_string())
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Parses a required price field ("25", "25.00").
///
/// ```rust
/// use compost_core::validation::parse_price;
///
/// assert_eq!(parse_price("price", "30").unwrap().cents(), 3000);
/// assert!(parse_price("price", "").is_err());
/// assert!(parse_price("price", "-4").is_err());
/// ```
pub fn parse_price(field: &str, input: &str) -> ValidationResult<Money> {
    validate_required(field, input)?;

    Money::parse_decimal(input).ok_or_else(|| ValidationError::InvalidFormat {
        field: field.to_string(),
        reason: "must be a non-negative amount with at most two decimals".to_string(),
    })
}

/// Parses a required stock count (a non-negative whole number).
pub fn parse_stock(input: &str) -> ValidationResult<u32> {
    validate_required("stock", input)?;

    let input = input.trim();
    if !input.chars().all(|c| c.is_ascii_digit()) {
        return Err(ValidationError::InvalidFormat {
            field: "stock".to_string(),
            reason: "must be a whole number".to_string(),
        });
    }

    input.parse::<u32>().map_err(|_| ValidationError::OutOfRange {
        field: "stock".to_string(),
        min: 0,
        max: i64::from(u32::MAX),
    })
}

/// Validates a quantity requested from the storefront.
///
/// ## Rules
/// - Must be at least 1
pub fn validate_quantity(qty: u32) -> ValidationResult<()> {
    if qty == 0 {
        return Err(ValidationError::MustBePositive {
            field: "quantity".to_string(),
        });
    }

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_required() {
        assert!(validate_required("city", "Denver").is_ok());
        assert_eq!(
            validate_required("city", " \t"),
            Err(ValidationError::Required {
                field: "city".to_string()
            })
        );
    }

    #[test]
    fn test_validate_email() {
        assert!(validate_email("grower@example.com").is_ok());
        assert!(validate_email("  grower@example.com ").is_ok());

        assert!(matches!(
            validate_email(""),
            Err(ValidationError::Required { .. })
        ));
        assert!(matches!(
            validate_email("grower.example.com"),
            Err(ValidationError::InvalidFormat { .. })
        ));
        assert!(validate_email("grower@").is_err());
        assert!(validate_email("a@b@c").is_err());
        assert!(validate_email("gro wer@example.com").is_err());
    }

    #[test]
    fn test_validate_product_name() {
        assert!(validate_product_name("Premium Organic Compost").is_ok());
        assert!(validate_product_name("").is_err());
        assert!(validate_product_name(&"A".repeat(300)).is_err());
    }

    #[test]
    fn test_validate_description() {
        assert!(validate_description("Rich, dark, crumbly.").is_ok());
        assert!(validate_description("").is_err());
        assert!(validate_description(&"x".repeat(MAX_DESCRIPTION_LEN + 1)).is_err());
    }

    #[test]
    fn test_validate_search_query() {
        assert_eq!(validate_search_query("  bokashi ").unwrap(), "bokashi");
        assert_eq!(validate_search_query("").unwrap(), "");
        assert!(validate_search_query(&"q".repeat(101)).is_err());
    }

    #[test]
    fn test_parse_price() {
        assert_eq!(parse_price("price", "18.50").unwrap().cents(), 1850);
        assert!(matches!(
            parse_price("price", "  "),
            Err(ValidationError::Required { .. })
        ));
        assert!(matches!(
            parse_price("price", "abc"),
            Err(ValidationError::InvalidFormat { .. })
        ));
    }

    #[test]
    fn test_parse_stock() {
        assert_eq!(parse_stock("28").unwrap(), 28);
        assert_eq!(parse_stock("0").unwrap(), 0);
        assert!(matches!(parse_stock(""), Err(ValidationError::Required { .. })));
        assert!(matches!(
            parse_stock("-1"),
            Err(ValidationError::InvalidFormat { .. })
        ));
        assert!(matches!(
            parse_stock("2.5"),
            Err(ValidationError::InvalidFormat { .. })
        ));
        assert!(matches!(
            parse_stock("99999999999"),
            Err(ValidationError::OutOfRange { .. })
        ));
    }

    #[test]
    fn test_validate_quantity() {
        assert!(validate_quantity(1).is_ok());
        assert!(validate_quantity(250).is_ok());
        assert!(validate_quantity(0).is_err());
    }
}
