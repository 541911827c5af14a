//! # Listing Commands
//!
//! The vendor "Upload New Product" form and the "My Listings" table.

use compost_core::{Listing, ListingDraft};
use tracing::{debug, info};

use crate::error::ApiError;
use crate::state::ListingState;

/// Publishes a product from the upload form.
///
/// ## Returns
/// The stored listing, with its assigned id and zeroed counters
pub fn submit_listing(listings: &ListingState, draft: ListingDraft) -> Result<Listing, ApiError> {
    debug!(name = %draft.name, images = draft.images.len(), "submit_listing command");

    let listing = listings.publish(&draft)?;
    info!(listing_id = listing.id, name = %listing.product.name, "Listing published");
    Ok(listing)
}

pub fn list_my_listings(listings: &ListingState) -> Vec<Listing> {
    debug!("list_my_listings command");
    listings.listings()
}

#[cfg(test)]
mod tests {
    use super::*;
    use compost_core::{Category, ListingStatus};

    use crate::error::ErrorCode;

    fn draft() -> ListingDraft {
        ListingDraft {
            name: "Vermi Fertilizer Blend".to_string(),
            category: "worm castings".to_string(),
            price: "35".to_string(),
            unit: "per 20kg bag".to_string(),
            description: "Castings blended with aged leaf mould.".to_string(),
            stock: "15".to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_submit_and_list() {
        let listings = ListingState::new();

        let first = submit_listing(&listings, draft()).unwrap();
        assert_eq!(first.id, 1);
        assert_eq!(first.product.category, Category::WormCastings);
        assert_eq!(first.status, ListingStatus::Active);

        submit_listing(&listings, draft()).unwrap();
        let all = list_my_listings(&listings);
        assert_eq!(all.iter().map(|l| l.id).collect::<Vec<_>>(), vec![1, 2]);
    }

    #[test]
    fn test_invalid_listing_is_rejected() {
        let listings = ListingState::new();
        let bad = ListingDraft {
            images: vec!["img".to_string(); 6],
            ..draft()
        };

        let err = submit_listing(&listings, bad).unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);
        assert_eq!(err.message, "images allows at most 5 entries");
        assert!(list_my_listings(&listings).is_empty());
    }

    #[test]
    fn test_listing_serializes_flat() {
        let listings = ListingState::new();
        let listing = submit_listing(&listings, draft()).unwrap();

        let json = serde_json::to_value(&listing).unwrap();
        assert_eq!(json["name"], "Vermi Fertilizer Blend");
        assert_eq!(json["price"], 3500);
        assert_eq!(json["status"], "Active");
        assert_eq!(json["views"], 0);
    }
}
