//! Account entities.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use unimart_core::{BuyerId, Entity, SellerId};

// ─────────────────────────────────────────────────────────────────────────────
// Buyer
// ─────────────────────────────────────────────────────────────────────────────

/// A buyer account.
///
/// Fidelity points accrue on checkout and are spent through
/// [`debit_points`](Buyer::debit_points). Passwords are stored and compared
/// as plain strings — faithful to the source system, not an endorsement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Buyer {
    pub id: BuyerId,
    pub username: String,
    pub password: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub registered_at: DateTime<Utc>,
    pub fidelity_points: i64,
    pub followed_sellers: Vec<SellerId>,
}

impl Buyer {
    pub fn new(
        username: impl Into<String>,
        password: impl Into<String>,
        registered_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: BuyerId::new(),
            username: username.into(),
            password: password.into(),
            first_name: String::new(),
            last_name: String::new(),
            email: String::new(),
            phone: String::new(),
            registered_at,
            fidelity_points: 0,
            followed_sellers: Vec::new(),
        }
    }

    pub fn credit_points(&mut self, points: i64) {
        self.fidelity_points += points;
    }

    /// Spend points. Refuses to overdraw the balance.
    pub fn debit_points(&mut self, points: i64) -> unimart_core::DomainResult<()> {
        if points > self.fidelity_points {
            return Err(unimart_core::DomainError::invariant(format!(
                "insufficient fidelity points: have {}, need {points}",
                self.fidelity_points
            )));
        }
        self.fidelity_points -= points;
        Ok(())
    }

    pub fn follow(&mut self, seller: SellerId) {
        if !self.followed_sellers.contains(&seller) {
            self.followed_sellers.push(seller);
        }
    }

    pub fn unfollow(&mut self, seller: SellerId) {
        self.followed_sellers.retain(|s| *s != seller);
    }
}

impl Entity for Buyer {
    type Id = BuyerId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Seller
// ─────────────────────────────────────────────────────────────────────────────

/// A seller account. Products reference their seller by id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Seller {
    pub id: SellerId,
    pub username: String,
    pub password: String,
    pub business_name: String,
    pub email: String,
    pub phone: String,
    pub registered_at: DateTime<Utc>,
}

impl Seller {
    pub fn new(
        username: impl Into<String>,
        password: impl Into<String>,
        business_name: impl Into<String>,
        registered_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: SellerId::new(),
            username: username.into(),
            password: password.into(),
            business_name: business_name.into(),
            email: String::new(),
            phone: String::new(),
            registered_at,
        }
    }
}

impl Entity for Seller {
    type Id = SellerId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}
