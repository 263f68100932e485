//! Review entity and the review collection.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use unimart_core::{BuyerId, DomainError, DomainResult, Entity, ProductId, ReviewId};

/// A buyer's review of a product.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Review {
    pub id: ReviewId,
    pub product_id: ProductId,
    pub buyer_id: BuyerId,
    pub posted_at: DateTime<Utc>,
    /// Star rating, clamped to 0..=5 at construction.
    pub rating: f32,
    pub comment: String,
    likes: u64,
}

impl Review {
    pub fn new(
        product_id: ProductId,
        buyer_id: BuyerId,
        rating: f32,
        comment: impl Into<String>,
        posted_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: ReviewId::new(),
            product_id,
            buyer_id,
            posted_at,
            rating: rating.clamp(0.0, 5.0),
            comment: comment.into(),
            likes: 0,
        }
    }

    pub fn likes(&self) -> u64 {
        self.likes
    }

    pub fn like(&mut self) {
        self.likes += 1;
    }

    /// Overwrite the like count; negative counts are refused.
    pub fn set_likes(&mut self, likes: i64) -> DomainResult<()> {
        if likes < 0 {
            return Err(DomainError::validation(format!(
                "likes cannot be negative: {likes}"
            )));
        }
        self.likes = likes as u64;
        Ok(())
    }
}

impl Entity for Review {
    type Id = ReviewId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

/// All reviews, keyed by review id.
#[derive(Debug, Default)]
pub struct ReviewBoard {
    reviews: HashMap<ReviewId, Review>,
}

impl ReviewBoard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn post(&mut self, review: Review) -> ReviewId {
        let id = review.id;
        self.reviews.insert(id, review);
        id
    }

    pub fn get(&self, id: ReviewId) -> Option<&Review> {
        self.reviews.get(&id)
    }

    pub fn get_mut(&mut self, id: ReviewId) -> Option<&mut Review> {
        self.reviews.get_mut(&id)
    }

    pub fn list(&self) -> impl Iterator<Item = &Review> {
        self.reviews.values()
    }

    pub fn remove(&mut self, id: ReviewId) -> Option<Review> {
        self.reviews.remove(&id)
    }

    pub fn for_product(&self, product_id: ProductId) -> impl Iterator<Item = &Review> {
        self.reviews
            .values()
            .filter(move |r| r.product_id == product_id)
    }

    /// Mean rating over the product's reviews, or `None` when there are none.
    pub fn average_rating(&self, product_id: ProductId) -> Option<f32> {
        let mut sum = 0.0f32;
        let mut count = 0u32;
        for review in self.for_product(product_id) {
            sum += review.rating;
            count += 1;
        }
        (count > 0).then(|| sum / count as f32)
    }
}
