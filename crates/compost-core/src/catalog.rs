//! # Catalog Store
//!
//! The read-only list of sellable items for a session.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Catalog (immutable)                                                    │
//! │                                                                         │
//! │   Marketplace grid ──► search()  ──┐                                   │
//! │   Product detail   ──► get()     ──┼──► &CatalogItem ──► Cart (copy)   │
//! │   Add to cart      ──► require() ──┘                                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! There is no write interface. Vendor listings live in their own store.

use crate::error::{CoreError, CoreResult};
use crate::money::Money;
use crate::types::{Badge, CatalogItem, Category, ItemId};

/// Filters for catalog browsing. The default query matches everything.
#[derive(Debug, Clone, Default)]
pub struct CatalogQuery {
    /// Case-insensitive text matched against name, seller, category and description.
    pub text: String,
    pub category: Option<Category>,
    pub in_stock_only: bool,
}

impl CatalogQuery {
    fn matches(&self, item: &CatalogItem) -> bool {
        if self.in_stock_only && !item.in_stock {
            return false;
        }
        if self.category.is_some_and(|c| c != item.category) {
            return false;
        }

        let needle = self.text.trim().to_lowercase();
        if needle.is_empty() {
            return true;
        }

        [
            item.name.as_str(),
            item.seller.as_str(),
            item.category.label(),
            item.description.as_str(),
        ]
        .iter()
        .any(|field| field.to_lowercase().contains(&needle))
    }
}

/// Immutable catalog of items, keyed by unique id.
#[derive(Debug, Clone)]
pub struct Catalog {
    items: Vec<CatalogItem>,
}

impl Catalog {
    /// Builds a catalog from a list of items. Later duplicates of an id are dropped.
    pub fn new(items: Vec<CatalogItem>) -> Self {
        let mut unique: Vec<CatalogItem> = Vec::with_capacity(items.len());
        for item in items {
            if !unique.iter().any(|existing| existing.id == item.id) {
                unique.push(item);
            }
        }
        Catalog { items: unique }
    }

    /// All items in display order.
    pub fn items(&self) -> &[CatalogItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Looks up an item by id.
    pub fn get(&self, id: ItemId) -> Option<&CatalogItem> {
        self.items.iter().find(|item| item.id == id)
    }

    /// Like [`Catalog::get`] but fails with `CoreError::ItemNotFound`.
    pub fn require(&self, id: ItemId) -> CoreResult<&CatalogItem> {
        self.get(id).ok_or(CoreError::ItemNotFound(id))
    }

    /// Items matching the query, in catalog order.
    pub fn search(&self, query: &CatalogQuery) -> Vec<&CatalogItem> {
        self.items.iter().filter(|item| query.matches(item)).collect()
    }

    /// The marketplace's demo catalog.
    pub fn demo() -> Self {
        Catalog::new(vec![
            demo_item(DemoItem {
                id: 1,
                name: "Premium Vermicompost",
                seller: "Green Valley Farm",
                price: 25,
                original_price: 30,
                unit: "per 25kg bag",
                rating: 4.8,
                reviews: 124,
                location: "San Francisco, CA",
                description: "High-quality vermicompost rich in nutrients, perfect for organic gardening and sustainable farming.",
                stock: 45,
                badge: Badge::BestSeller,
                category: Category::Vermicompost,
            }),
            demo_item(DemoItem {
                id: 2,
                name: "Organic Kitchen Compost",
                seller: "Urban Composters",
                price: 18,
                original_price: 22,
                unit: "per 20kg bag",
                rating: 4.6,
                reviews: 89,
                location: "Portland, OR",
                description: "Made from kitchen waste, ideal for vegetable gardens and potted plants with rich organic matter.",
                stock: 32,
                badge: Badge::EcoFriendly,
                category: Category::KitchenCompost,
            }),
            demo_item(DemoItem {
                id: 3,
                name: "Garden Mix Compost",
                seller: "Eco Solutions",
                price: 22,
                original_price: 25,
                unit: "per 30kg bag",
                rating: 4.7,
                reviews: 156,
                location: "Denver, CO",
                description: "Perfect blend of garden and kitchen waste compost for all-purpose gardening and landscaping.",
                stock: 0,
                badge: Badge::Premium,
                category: Category::MixedCompost,
            }),
            demo_item(DemoItem {
                id: 4,
                name: "Worm Casting Fertilizer",
                seller: "Nature's Best",
                price: 35,
                original_price: 40,
                unit: "per 15kg bag",
                rating: 4.9,
                reviews: 203,
                location: "Austin, TX",
                description: "Pure worm castings with exceptional nutrient density for premium plant growth and soil health.",
                stock: 28,
                badge: Badge::Premium,
                category: Category::WormCastings,
            }),
            demo_item(DemoItem {
                id: 5,
                name: "Bokashi Compost Starter",
                seller: "Ferment Pro",
                price: 28,
                original_price: 32,
                unit: "per 10kg bag",
                rating: 4.5,
                reviews: 67,
                location: "Seattle, WA",
                description: "Fermented organic matter using traditional Japanese bokashi method for enhanced soil biology.",
                stock: 15,
                badge: Badge::New,
                category: Category::Bokashi,
            }),
            demo_item(DemoItem {
                id: 6,
                name: "Mushroom Compost Blend",
                seller: "Fungi Farm Co",
                price: 20,
                original_price: 24,
                unit: "per 25kg bag",
                rating: 4.4,
                reviews: 91,
                location: "Phoenix, AZ",
                description: "Nutrient-rich mushroom substrate compost perfect for improving soil structure and fertility.",
                stock: 38,
                badge: Badge::Organic,
                category: Category::MushroomCompost,
            }),
        ])
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Catalog::demo()
    }
}

struct DemoItem {
    id: u32,
    name: &'static str,
    seller: &'static str,
    price: i64,
    original_price: i64,
    unit: &'static str,
    rating: f32,
    reviews: u32,
    location: &'static str,
    description: &'static str,
    stock: u32,
    badge: Badge,
    category: Category,
}

fn demo_item(d: DemoItem) -> CatalogItem {
    CatalogItem {
        id: ItemId::new(d.id),
        name: d.name.to_string(),
        seller: d.seller.to_string(),
        price: Money::from_dollars(d.price),
        original_price: Money::from_dollars(d.original_price),
        unit: d.unit.to_string(),
        rating: d.rating,
        reviews: d.reviews,
        location: d.location.to_string(),
        description: d.description.to_string(),
        in_stock: d.stock > 0,
        stock: d.stock,
        badge: Some(d.badge),
        category: d.category,
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
