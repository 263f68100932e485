//! Orders and the checkout flow.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use unimart_catalog::Catalog;
use unimart_core::{BuyerId, DomainError, DomainResult, Entity, OrderId};

use crate::cart::Cart;

/// One priced order line, captured at checkout time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderLine {
    pub product_id: unimart_core::ProductId,
    /// Product title at purchase time; later retitles do not rewrite history.
    pub title: String,
    pub unit_price_cents: i64,
    pub quantity: i64,
    pub line_total_cents: i64,
}

/// An immutable record of a completed checkout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    pub id: OrderId,
    pub buyer_id: BuyerId,
    pub placed_at: DateTime<Utc>,
    pub lines: Vec<OrderLine>,
    pub total_cents: i64,
    pub points_earned: i64,
}

impl Entity for Order {
    type Id = OrderId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

/// Turn a cart into an order.
///
/// Each line is priced with the promotion discount when one is active at
/// `now`; catalog quantities are decremented (and may go negative — there is
/// no stock floor). Fidelity points earned are one point per whole dollar of
/// the order total plus each unit's bonus points, where an active promotion's
/// points replace the product's own.
///
/// Fails with [`DomainError::NotFound`] when any line references an absent
/// product, or with a validation error on an empty cart; the cart and the
/// catalog are untouched on failure. On success the cart is cleared.
pub fn checkout(cart: &mut Cart, catalog: &mut Catalog, now: DateTime<Utc>) -> DomainResult<Order> {
    if cart.is_empty() {
        return Err(DomainError::validation("cart is empty"));
    }
    if cart
        .lines
        .iter()
        .any(|line| catalog.get(line.product_id).is_none())
    {
        return Err(DomainError::not_found());
    }

    let mut lines = Vec::with_capacity(cart.lines.len());
    let mut total_cents: i64 = 0;
    let mut bonus_points: i64 = 0;

    for line in &cart.lines {
        // Presence checked above.
        let product = match catalog.get(line.product_id) {
            Some(p) => p,
            None => return Err(DomainError::not_found()),
        };
        let unit_price = product.unit_price_at(now);
        let line_total = unit_price * line.quantity;
        total_cents += line_total;
        bonus_points += product.bonus_points_at(now) * line.quantity;
        lines.push(OrderLine {
            product_id: line.product_id,
            title: product.title().to_string(),
            unit_price_cents: unit_price,
            quantity: line.quantity,
            line_total_cents: line_total,
        });
        catalog.adjust_quantity(line.product_id, -line.quantity);
    }

    let points_earned = (total_cents / 100).max(0) + bonus_points;
    let order = Order {
        id: OrderId::new(),
        buyer_id: cart.buyer_id,
        placed_at: now,
        lines,
        total_cents,
        points_earned,
    };
    tracing::info!(order = %order.id, total_cents, points_earned, "checkout complete");
    cart.clear();
    Ok(order)
}
