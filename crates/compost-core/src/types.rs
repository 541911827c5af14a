//! # Domain Types
//!
//! Catalog-facing types used throughout the marketplace.
//!
//! ## Type Overview
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │  CatalogItem    │   │    Category     │   │     Badge       │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id (ItemId)    │   │  Vermicompost   │   │  Best Seller    │       │
//! │  │  name, seller   │   │  Kitchen ...    │   │  Eco-Friendly   │       │
//! │  │  price (Money)  │   │  Mixed ...      │   │  Premium        │       │
//! │  │  original_price │   │  Worm Castings  │   │  New            │       │
//! │  │  unit, stock    │   │  Bokashi        │   │  Organic        │       │
//! │  │  in_stock       │   │  Mushroom ...   │   └─────────────────┘       │
//! │  └─────────────────┘   └─────────────────┘                              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Catalog items are immutable for the session. The cart stores a frozen
//! copy of the item it was built from.

use serde::{Deserialize, Serialize};
use std::fmt;
use ts_rs::TS;

use crate::money::Money;

// =============================================================================
// Item Id
// =============================================================================

/// Catalog item identifier. Unique within a catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ItemId(u32);

impl ItemId {
    #[inline]
    pub const fn new(id: u32) -> Self {
        ItemId(id)
    }

    #[inline]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u32> for ItemId {
    fn from(id: u32) -> Self {
        ItemId(id)
    }
}

// =============================================================================
// Category
// =============================================================================

/// Product category. The same set drives catalog filtering and the
/// category picker on the vendor listing form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Vermicompost,
    KitchenCompost,
    MixedCompost,
    WormCastings,
    Bokashi,
    MushroomCompost,
}

impl Category {
    /// Every category, in picker order.
    pub const ALL: [Category; 6] = [
        Category::Vermicompost,
        Category::KitchenCompost,
        Category::MixedCompost,
        Category::WormCastings,
        Category::Bokashi,
        Category::MushroomCompost,
    ];

    /// Human-readable label, as shown in the UI.
    pub const fn label(&self) -> &'static str {
        match self {
            Category::Vermicompost => "Vermicompost",
            Category::KitchenCompost => "Kitchen Compost",
            Category::MixedCompost => "Mixed Compost",
            Category::WormCastings => "Worm Castings",
            Category::Bokashi => "Bokashi",
            Category::MushroomCompost => "Mushroom Compost",
        }
    }

    /// Looks a category up by its label, ignoring case and outer whitespace.
    pub fn from_label(label: &str) -> Option<Category> {
        let label = label.trim();
        Category::ALL
            .into_iter()
            .find(|c| c.label().eq_ignore_ascii_case(label))
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// =============================================================================
// Badge
// =============================================================================

/// Merchandising badge shown on a product card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum Badge {
    BestSeller,
    EcoFriendly,
    Premium,
    New,
    Organic,
}

impl Badge {
    pub const fn label(&self) -> &'static str {
        match self {
            Badge::BestSeller => "Best Seller",
            Badge::EcoFriendly => "Eco-Friendly",
            Badge::Premium => "Premium",
            Badge::New => "New",
            Badge::Organic => "Organic",
        }
    }
}

// =============================================================================
// Catalog Item
// =============================================================================

/// A sellable item in the catalog.
///
/// ## Stock
/// `stock` and `in_stock` are display data. Nothing decrements stock and the
/// cart never compares its quantities against it; only the `in_stock` flag
/// is consulted, when adding from the storefront.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct CatalogItem {
    pub id: ItemId,
    pub name: String,
    pub seller: String,

    /// Current selling price.
    pub price: Money,

    /// List price before discount; shown struck through when higher than `price`.
    pub original_price: Money,

    /// Pack size, e.g. "per 25kg bag".
    pub unit: String,

    /// Average review score out of 5.
    pub rating: f32,
    pub reviews: u32,
    pub location: String,
    pub description: String,
    pub in_stock: bool,
    pub stock: u32,
    pub badge: Option<Badge>,
    pub category: Category,
}

impl CatalogItem {
    /// Discount against the list price, never negative.
    ///
    /// ```rust
    /// use compost_core::Catalog;
    ///
    /// let catalog = Catalog::demo();
    /// let vermicompost = catalog.items().first().unwrap();
    /// assert_eq!(vermicompost.savings().cents(), 500); // $30 list, $25 price
    /// ```
    pub fn savings(&self) -> Money {
        self.original_price.saturating_sub(self.price)
    }

    /// Whether the list price should be shown struck through.
    pub fn is_discounted(&self) -> bool {
        self.original_price > self.price
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
