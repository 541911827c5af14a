//! # Vendor Listings
//!
//! Products a vendor uploads from the "Sell" screen.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Listing Upload                                     │
//! │                                                                         │
//! │  ListingDraft (raw form strings)                                        │
//! │       │                                                                 │
//! │       ▼  validate()                                                     │
//! │  ListingProduct (typed: Category, Money, u32 stock)                     │
//! │       │                                                                 │
//! │       ▼  ListingBook::publish()                                         │
//! │  Listing { id, status, views: 0, orders: 0 }                            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Listings are kept apart from the session catalog, which never changes.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::ValidationError;
use crate::money::Money;
use crate::types::Category;
use crate::validation::{
    parse_price, parse_stock, validate_description, validate_product_name, validate_required,
    ValidationResult,
};
use crate::MAX_LISTING_IMAGES;

/// Pack sizes a vendor can choose from.
pub const UNITS: [&str; 5] = [
    "per 10kg bag",
    "per 15kg bag",
    "per 20kg bag",
    "per 25kg bag",
    "per 30kg bag",
];

// =============================================================================
// Draft (form input)
// =============================================================================

/// Optional technical details. Free text, all fields may be blank.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase", default)]
pub struct Specifications {
    pub weight: String,
    pub ph_level: String,
    pub moisture_content: String,
    pub organic_matter: String,
    pub npk_ratio: String,
    pub shelf_life: String,
}

impl Specifications {
    fn trimmed(&self) -> Self {
        Specifications {
            weight: self.weight.trim().to_string(),
            ph_level: self.ph_level.trim().to_string(),
            moisture_content: self.moisture_content.trim().to_string(),
            organic_matter: self.organic_matter.trim().to_string(),
            npk_ratio: self.npk_ratio.trim().to_string(),
            shelf_life: self.shelf_life.trim().to_string(),
        }
    }
}

/// The upload form exactly as entered.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase", default)]
pub struct ListingDraft {
    pub name: String,
    /// Category label, e.g. "Worm Castings".
    pub category: String,
    pub price: String,
    /// Blank means no list price.
    pub original_price: String,
    pub unit: String,
    pub description: String,
    pub features: Vec<String>,
    pub specifications: Specifications,
    pub stock: String,
    pub location: String,
    /// Image references (upload handles or URLs).
    pub images: Vec<String>,
}

impl ListingDraft {
    /// Validates the draft in form order and returns the typed product.
    ///
    /// ```rust
    /// use compost_core::ListingDraft;
    ///
    /// let draft = ListingDraft {
    ///     name: "Aged Horse Manure Compost".to_string(),
    ///     category: "Mixed Compost".to_string(),
    ///     price: "19.50".to_string(),
    ///     unit: "per 20kg bag".to_string(),
    ///     description: "Two years aged.".to_string(),
    ///     stock: "40".to_string(),
    ///     ..Default::default()
    /// };
    /// let product = draft.validate().unwrap();
    /// assert_eq!(product.price.cents(), 1950);
    /// assert!(product.original_price.is_none());
    /// ```
    pub fn validate(&self) -> ValidationResult<ListingProduct> {
        validate_product_name(&self.name)?;

        validate_required("category", &self.category)?;
        let category =
            Category::from_label(&self.category).ok_or_else(|| ValidationError::NotAllowed {
                field: "category".to_string(),
                allowed: Category::ALL.iter().map(|c| c.label().to_string()).collect(),
            })?;

        let price = parse_price("price", &self.price)?;
        let original_price = if self.original_price.trim().is_empty() {
            None
        } else {
            Some(parse_price("originalPrice", &self.original_price)?)
        };

        validate_required("unit", &self.unit)?;
        let unit = self.unit.trim();
        if !UNITS.contains(&unit) {
            return Err(ValidationError::NotAllowed {
                field: "unit".to_string(),
                allowed: UNITS.iter().map(|u| u.to_string()).collect(),
            });
        }

        validate_description(&self.description)?;
        let stock = parse_stock(&self.stock)?;

        if self.images.len() > MAX_LISTING_IMAGES {
            return Err(ValidationError::TooMany {
                field: "images".to_string(),
                max: MAX_LISTING_IMAGES,
            });
        }

        let location = self.location.trim();

        Ok(ListingProduct {
            name: self.name.trim().to_string(),
            category,
            price,
            original_price,
            unit: unit.to_string(),
            description: self.description.trim().to_string(),
            features: self
                .features
                .iter()
                .map(|f| f.trim())
                .filter(|f| !f.is_empty())
                .map(str::to_string)
                .collect(),
            specifications: self.specifications.trimmed(),
            stock,
            location: (!location.is_empty()).then(|| location.to_string()),
            images: self.images.clone(),
        })
    }
}

// =============================================================================
// Validated listing
// =============================================================================

/// A draft that passed validation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct ListingProduct {
    pub name: String,
    pub category: Category,
    pub price: Money,
    pub original_price: Option<Money>,
    pub unit: String,
    pub description: String,
    pub features: Vec<String>,
    pub specifications: Specifications,
    pub stock: u32,
    pub location: Option<String>,
    pub images: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum ListingStatus {
    Active,
    /// Published with zero stock; shown greyed out.
    Inactive,
}

/// A published listing with its counters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Listing {
    pub id: u32,
    #[serde(flatten)]
    pub product: ListingProduct,
    pub status: ListingStatus,
    pub views: u32,
    pub orders: u32,
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
}

// =============================================================================
// Listing Book
// =============================================================================

/// One vendor's listings, numbered from 1 in publish order.
#[derive(Debug, Clone)]
pub struct ListingBook {
    listings: Vec<Listing>,
    next_id: u32,
}

impl ListingBook {
    pub fn new() -> Self {
        ListingBook {
            listings: Vec::new(),
            next_id: 1,
        }
    }

    /// Validates and stores a draft. Nothing is stored on error.
    pub fn publish(&mut self, draft: &ListingDraft, now: DateTime<Utc>) -> ValidationResult<&Listing> {
        let product = draft.validate()?;
        let status = if product.stock > 0 {
            ListingStatus::Active
        } else {
            ListingStatus::Inactive
        };

        let listing = Listing {
            id: self.next_id,
            product,
            status,
            views: 0,
            orders: 0,
            created_at: now,
        };
        self.next_id += 1;
        self.listings.push(listing);

        Ok(&self.listings[self.listings.len() - 1])
    }

    pub fn listings(&self) -> &[Listing] {
        &self.listings
    }

    pub fn get(&self, id: u32) -> Option<&Listing> {
        self.listings.iter().find(|l| l.id == id)
    }

    pub fn len(&self) -> usize {
        self.listings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.listings.is_empty()
    }
}

impl Default for ListingBook {
    fn default() -> Self {
        Self::new()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_draft() -> ListingDraft {
        ListingDraft {
            name: "Premium Organic Compost".to_string(),
            category: "Vermicompost".to_string(),
            price: "30".to_string(),
            original_price: "35.00".to_string(),
            unit: "per 25kg bag".to_string(),
            description: "Rich, screened and ready to use.".to_string(),
            features: vec![
                "100% organic".to_string(),
                "   ".to_string(),
                " Screened to 6mm ".to_string(),
            ],
            specifications: Specifications {
                npk_ratio: " 2-1-1 ".to_string(),
                ..Default::default()
            },
            stock: "28".to_string(),
            location: "Sacramento, CA".to_string(),
            images: vec!["img-1".to_string()],
        }
    }

    #[test]
    fn test_valid_draft() {
        let product = valid_draft().validate().unwrap();
        assert_eq!(product.category, Category::Vermicompost);
        assert_eq!(product.price.cents(), 3000);
        assert_eq!(product.original_price, Some(Money::from_cents(3500)));
        assert_eq!(product.stock, 28);
        assert_eq!(product.features, vec!["100% organic", "Screened to 6mm"]);
        assert_eq!(product.specifications.npk_ratio, "2-1-1");
        assert_eq!(product.location.as_deref(), Some("Sacramento, CA"));
    }

    #[test]
    fn test_missing_required_fields() {
        for field in ["name", "category", "price", "unit", "description", "stock"] {
            let mut draft = valid_draft();
            match field {
                "name" => draft.name.clear(),
                "category" => draft.category.clear(),
                "price" => draft.price.clear(),
                "unit" => draft.unit.clear(),
                "description" => draft.description.clear(),
                _ => draft.stock.clear(),
            }
            assert_eq!(
                draft.validate(),
                Err(ValidationError::Required {
                    field: field.to_string()
                }),
                "blank {field} should be rejected"
            );
        }
    }

    #[test]
    fn test_unknown_category_and_unit() {
        let draft = ListingDraft {
            category: "Peat Moss".to_string(),
            ..valid_draft()
        };
        assert!(matches!(
            draft.validate(),
            Err(ValidationError::NotAllowed { ref field, ref allowed }) if field == "category" && allowed.len() == 6
        ));

        let draft = ListingDraft {
            unit: "per 50kg bag".to_string(),
            ..valid_draft()
        };
        assert!(matches!(
            draft.validate(),
            Err(ValidationError::NotAllowed { ref field, .. }) if field == "unit"
        ));
    }

    #[test]
    fn test_image_limit() {
        let five = ListingDraft {
            images: (0..5).map(|i| format!("img-{i}")).collect(),
            ..valid_draft()
        };
        assert!(five.validate().is_ok());

        let six = ListingDraft {
            images: (0..6).map(|i| format!("img-{i}")).collect(),
            ..valid_draft()
        };
        assert_eq!(
            six.validate(),
            Err(ValidationError::TooMany {
                field: "images".to_string(),
                max: 5
            })
        );
    }

    #[test]
    fn test_optional_fields() {
        let draft = ListingDraft {
            original_price: "  ".to_string(),
            location: String::new(),
            features: Vec::new(),
            ..valid_draft()
        };
        let product = draft.validate().unwrap();
        assert!(product.original_price.is_none());
        assert!(product.location.is_none());
        assert!(product.features.is_empty());

        let bad = ListingDraft {
            original_price: "lots".to_string(),
            ..valid_draft()
        };
        assert!(matches!(
            bad.validate(),
            Err(ValidationError::InvalidFormat { ref field, .. }) if field == "originalPrice"
        ));
    }

    #[test]
    fn test_publish_assigns_sequential_ids() {
        let mut book = ListingBook::new();
        let now = Utc::now();

        let first = book.publish(&valid_draft(), now).unwrap();
        assert_eq!(first.id, 1);
        assert_eq!(first.status, ListingStatus::Active);
        assert_eq!((first.views, first.orders), (0, 0));

        let sold_out = ListingDraft {
            stock: "0".to_string(),
            ..valid_draft()
        };
        let second = book.publish(&sold_out, now).unwrap();
        assert_eq!(second.id, 2);
        assert_eq!(second.status, ListingStatus::Inactive);
        assert_eq!(book.len(), 2);
    }

    #[test]
    fn test_rejected_draft_is_not_stored() {
        let mut book = ListingBook::new();
        let draft = ListingDraft {
            name: String::new(),
            ..valid_draft()
        };
        assert!(book.publish(&draft, Utc::now()).is_err());
        assert!(book.is_empty());

        let listing = book.publish(&valid_draft(), Utc::now()).unwrap();
        assert_eq!(listing.id, 1);
    }
}
