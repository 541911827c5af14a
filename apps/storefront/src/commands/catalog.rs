//! # Catalog Commands
//!
//! Marketplace browsing: the product grid, its search box and filters, and
//! the product detail page.

use compost_core::validation::validate_search_query;
use compost_core::{Catalog, CatalogItem, CatalogQuery, Category, ItemId, ValidationError};
use tracing::debug;

use crate::error::ApiError;

/// Lists every catalog item in display order.
pub fn list_catalog(catalog: &Catalog) -> Vec<CatalogItem> {
    debug!("list_catalog command");
    catalog.items().to_vec()
}

/// Searches the catalog.
///
/// ## Arguments
/// * `query` - Free text; empty matches everything
/// * `category` - Category label as shown in the filter dropdown
/// * `in_stock_only` - Hide items flagged out of stock (default: false)
pub fn search_catalog(
    catalog: &Catalog,
    query: String,
    category: Option<String>,
    in_stock_only: Option<bool>,
) -> Result<Vec<CatalogItem>, ApiError> {
    debug!(query = %query, category = ?category, "search_catalog command");

    let text = validate_search_query(&query)?;
    let category = category
        .filter(|label| !label.trim().is_empty())
        .map(|label| {
            Category::from_label(&label).ok_or_else(|| ValidationError::NotAllowed {
                field: "category".to_string(),
                allowed: Category::ALL.iter().map(|c| c.label().to_string()).collect(),
            })
        })
        .transpose()?;

    let query = CatalogQuery {
        text,
        category,
        in_stock_only: in_stock_only.unwrap_or(false),
    };

    Ok(catalog.search(&query).into_iter().cloned().collect())
}

/// Gets one item for the product detail page.
pub fn get_catalog_item(catalog: &Catalog, item_id: u32) -> Result<CatalogItem, ApiError> {
    debug!(item_id, "get_catalog_item command");
    Ok(catalog.require(ItemId::new(item_id))?.clone())
}
