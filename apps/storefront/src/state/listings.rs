//! # Listing State
//!
//! The vendor's own listings, as published from the upload form.

use std::sync::{Arc, Mutex, PoisonError};

use chrono::Utc;
use compost_core::{Listing, ListingBook, ListingDraft, ValidationError};

#[derive(Debug, Clone, Default)]
pub struct ListingState {
    book: Arc<Mutex<ListingBook>>,
}

impl ListingState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Validates and stores a draft, returning the stored listing.
    pub fn publish(&self, draft: &ListingDraft) -> Result<Listing, ValidationError> {
        let mut book = self.book.lock().unwrap_or_else(PoisonError::into_inner);
        book.publish(draft, Utc::now()).cloned()
    }

    /// All listings, oldest first.
    pub fn listings(&self) -> Vec<Listing> {
        let book = self.book.lock().unwrap_or_else(PoisonError::into_inner);
        book.listings().to_vec()
    }
}
