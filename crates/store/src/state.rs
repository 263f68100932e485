//! The assembled in-memory world.

use std::collections::HashMap;

use chrono::{DateTime, Utc};

use unimart_accounts::Directory;
use unimart_carts::{checkout, Cart, Order};
use unimart_catalog::Catalog;
use unimart_core::{BuyerId, DomainError, DomainResult, ProductId};
use unimart_reviews::{Review, ReviewBoard};

use crate::repository::Snapshot;

/// Every entity collection, assembled. Lifecycle is tied to the process:
/// built from a snapshot at startup, dumped back to one at shutdown.
#[derive(Debug, Default)]
pub struct MarketState {
    pub directory: Directory,
    pub catalog: Catalog,
    pub carts: HashMap<BuyerId, Cart>,
    pub orders: Vec<Order>,
    pub reviews: ReviewBoard,
}

impl MarketState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_snapshot(snapshot: Snapshot) -> Self {
        let mut state = MarketState {
            catalog: Catalog::with_policy(snapshot.fidelity_policy),
            ..Default::default()
        };
        for buyer in snapshot.buyers {
            state.directory.insert_buyer(buyer);
        }
        for seller in snapshot.sellers {
            state.directory.insert_seller(seller);
        }
        for product in snapshot.products {
            state.catalog.insert(product);
        }
        for cart in snapshot.carts {
            state.carts.insert(cart.buyer_id, cart);
        }
        state.orders = snapshot.orders;
        for review in snapshot.reviews {
            state.reviews.post(review);
        }
        state
    }

    pub fn to_snapshot(&self) -> Snapshot {
        Snapshot {
            buyers: self.directory.buyers().cloned().collect(),
            sellers: self.directory.sellers().cloned().collect(),
            products: self.catalog.list().cloned().collect(),
            carts: self.carts.values().cloned().collect(),
            orders: self.orders.clone(),
            reviews: self.reviews.list().cloned().collect(),
            fidelity_policy: self.catalog.policy(),
        }
    }

    /// The buyer's cart, created on first use.
    pub fn cart_mut(&mut self, buyer_id: BuyerId) -> &mut Cart {
        self.carts
            .entry(buyer_id)
            .or_insert_with(|| Cart::new(buyer_id))
    }

    /// Check out the buyer's cart: prices the lines, decrements stock,
    /// credits the earned fidelity points and records the order.
    pub fn place_order(&mut self, buyer_id: BuyerId, now: DateTime<Utc>) -> DomainResult<Order> {
        if self.directory.buyer(buyer_id).is_none() {
            return Err(DomainError::not_found());
        }
        let cart = self
            .carts
            .entry(buyer_id)
            .or_insert_with(|| Cart::new(buyer_id));
        let order = checkout(cart, &mut self.catalog, now)?;
        if let Some(buyer) = self.directory.buyer_mut(buyer_id) {
            buyer.credit_points(order.points_earned);
        }
        self.orders.push(order.clone());
        Ok(order)
    }

    /// Post a review and refresh the product's cached rating.
    pub fn post_review(&mut self, review: Review) {
        let product_id = review.product_id;
        self.reviews.post(review);
        self.refresh_rating(product_id);
    }

    fn refresh_rating(&mut self, product_id: ProductId) {
        let rating = self.reviews.average_rating(product_id).unwrap_or(0.0);
        self.catalog.update(product_id, |p| p.set_rating(rating));
    }
}
