//! Product model: one record type with a kind discriminator instead of an
//! inheritance tree.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use unimart_core::{DomainError, DomainResult, Entity, ProductId, SellerId};

use crate::category::{Category, Subcategory};

// ─────────────────────────────────────────────────────────────────────────────
// Kind-specific payloads
// ─────────────────────────────────────────────────────────────────────────────

/// Kind-specific product fields. The variant must agree with the product's
/// declared [`Category`]; [`Product::new`] checks this.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ProductDetails {
    BookOrManual {
        isbn: String,
        author: String,
        editor: String,
        release_date: Option<NaiveDate>,
        edition: u32,
        volume: u32,
    },
    LearningResource {
        isbn: String,
        organisation: String,
        release_date: Option<NaiveDate>,
        edition: u32,
    },
    ItEquipment {
        brand: String,
        model: String,
        release_date: Option<NaiveDate>,
    },
    OfficeEquipment {
        brand: String,
        model: String,
    },
    StationeryArticle {
        brand: String,
        model: String,
    },
}

impl ProductDetails {
    /// The category this payload belongs to.
    pub fn category(&self) -> Category {
        match self {
            ProductDetails::BookOrManual { .. } => Category::BookOrManual,
            ProductDetails::LearningResource { .. } => Category::LearningResource,
            ProductDetails::ItEquipment { .. } => Category::ItEquipment,
            ProductDetails::OfficeEquipment { .. } => Category::OfficeEquipment,
            ProductDetails::StationeryArticle { .. } => Category::StationeryArticle,
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Promotions and fidelity policy
// ─────────────────────────────────────────────────────────────────────────────

/// Time-bounded discount and/or bonus-points override.
///
/// Nothing sweeps expired promotions; callers compare `ends_at` against the
/// current time themselves (see [`Product::promotion_active`]).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Promotion {
    /// Discount per unit, in currency minor units.
    pub discount_cents: i64,
    /// Fidelity points granted per unit while the promotion runs, replacing
    /// the product's own bonus points.
    pub bonus_points: i64,
    pub ends_at: DateTime<Utc>,
}

/// Policy for the bonus-fidelity-points-per-dollar cap.
///
/// The original business rule is ambiguous (the check was first enforced,
/// then disabled), so the cap is configuration rather than a constant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum FidelityPolicy {
    /// Accept any bonus-point value (matches the latest known revision).
    #[default]
    Unchecked,
    /// At most this many bonus points per whole dollar of price.
    MaxPerDollar(i64),
}

impl FidelityPolicy {
    /// Maximum admissible bonus points for a product at `price_cents`, or
    /// `None` when unrestricted.
    pub fn max_for(self, price_cents: i64) -> Option<i64> {
        match self {
            FidelityPolicy::Unchecked => None,
            FidelityPolicy::MaxPerDollar(per_dollar) => {
                let dollars = (price_cents / 100).max(0);
                Some(per_dollar.saturating_mul(dollars))
            }
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Product
// ─────────────────────────────────────────────────────────────────────────────

/// Constructor arguments shared by every product kind.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductDraft {
    /// Price in currency minor units. Negative values are accepted: the
    /// catalog is permissive by design.
    pub price_cents: i64,
    pub quantity: i64,
    pub title: String,
    pub description: String,
    pub category: Category,
    pub subcategory: Subcategory,
    pub seller_id: SellerId,
    pub bonus_points: i64,
}

/// A catalog product.
///
/// Immutable after construction: `id`, `seller_id`, `listed_at`, `category`,
/// `subcategory`, `details`. Everything else changes through setters.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Product {
    id: ProductId,
    seller_id: SellerId,
    listed_at: DateTime<Utc>,
    category: Category,
    subcategory: Subcategory,
    price_cents: i64,
    quantity: i64,
    title: String,
    description: String,
    likes: u64,
    rating: f32,
    bonus_points: i64,
    promotion: Option<Promotion>,
    details: ProductDetails,
}

impl Product {
    /// Build a product, fixing all immutable fields.
    ///
    /// Fails with [`DomainError::InvalidSubcategory`] when the subcategory is
    /// not in the category's enumeration, and with a validation error when
    /// the `details` payload belongs to a different category. No other
    /// business rule is enforced here: negative price, negative quantity,
    /// negative bonus points and an empty title are all accepted.
    pub fn new(
        draft: ProductDraft,
        details: ProductDetails,
        now: DateTime<Utc>,
    ) -> DomainResult<Self> {
        if !draft.category.permits(draft.subcategory) {
            return Err(DomainError::InvalidSubcategory {
                category: draft.category.label().to_string(),
                subcategory: draft.subcategory.label().to_string(),
            });
        }
        if details.category() != draft.category {
            return Err(DomainError::validation(format!(
                "details payload is for {}, product is declared {}",
                details.category(),
                draft.category
            )));
        }

        Ok(Self {
            id: ProductId::new(),
            seller_id: draft.seller_id,
            listed_at: now,
            category: draft.category,
            subcategory: draft.subcategory,
            price_cents: draft.price_cents,
            quantity: draft.quantity,
            title: draft.title,
            description: draft.description,
            likes: 0,
            rating: 0.0,
            bonus_points: draft.bonus_points,
            promotion: None,
            details,
        })
    }

    pub fn id_typed(&self) -> ProductId {
        self.id
    }

    pub fn seller_id(&self) -> SellerId {
        self.seller_id
    }

    pub fn listed_at(&self) -> DateTime<Utc> {
        self.listed_at
    }

    pub fn category(&self) -> Category {
        self.category
    }

    pub fn subcategory(&self) -> Subcategory {
        self.subcategory
    }

    pub fn price_cents(&self) -> i64 {
        self.price_cents
    }

    pub fn quantity(&self) -> i64 {
        self.quantity
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn likes(&self) -> u64 {
        self.likes
    }

    pub fn rating(&self) -> f32 {
        self.rating
    }

    pub fn bonus_points(&self) -> i64 {
        self.bonus_points
    }

    pub fn promotion(&self) -> Option<&Promotion> {
        self.promotion.as_ref()
    }

    pub fn details(&self) -> &ProductDetails {
        &self.details
    }

    pub fn set_price_cents(&mut self, price_cents: i64) {
        self.price_cents = price_cents;
    }

    pub fn set_quantity(&mut self, quantity: i64) {
        self.quantity = quantity;
    }

    /// Retitle the product. Equality keys on the title, so a retitled
    /// product no longer compares equal to its former self.
    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = title.into();
    }

    pub fn set_description(&mut self, description: impl Into<String>) {
        self.description = description.into();
    }

    pub fn set_rating(&mut self, rating: f32) {
        self.rating = rating;
    }

    pub fn like(&mut self) {
        self.likes += 1;
    }

    /// Remove a like; the count never goes below zero.
    pub fn unlike(&mut self) {
        self.likes = self.likes.saturating_sub(1);
    }

    /// Set bonus fidelity points subject to `policy`.
    ///
    /// On a cap violation the stored value is clamped to the maximum **and**
    /// the violation is reported, matching the original clamp-and-raise
    /// behavior.
    pub fn set_bonus_points(
        &mut self,
        points: i64,
        policy: FidelityPolicy,
    ) -> DomainResult<()> {
        match policy.max_for(self.price_cents) {
            Some(max) if points > max => {
                self.bonus_points = max;
                Err(DomainError::FidelityCapExceeded { points, max })
            }
            _ => {
                self.bonus_points = points;
                Ok(())
            }
        }
    }

    pub fn set_promotion(&mut self, promotion: Promotion) {
        self.promotion = Some(promotion);
    }

    pub fn clear_promotion(&mut self) {
        self.promotion = None;
    }

    /// Whether a promotion is set and has not ended at `now`.
    pub fn promotion_active(&self, now: DateTime<Utc>) -> bool {
        self.promotion
            .as_ref()
            .is_some_and(|p| p.ends_at > now)
    }

    /// Effective unit price at `now`: the list price minus the promotion
    /// discount while one is active. Never goes below zero.
    pub fn unit_price_at(&self, now: DateTime<Utc>) -> i64 {
        match &self.promotion {
            Some(p) if p.ends_at > now => (self.price_cents - p.discount_cents).max(0),
            _ => self.price_cents,
        }
    }

    /// Bonus fidelity points per unit at `now`: the promotional points while
    /// a promotion is active, the product's own otherwise.
    pub fn bonus_points_at(&self, now: DateTime<Utc>) -> i64 {
        match &self.promotion {
            Some(p) if p.ends_at > now => p.bonus_points,
            _ => self.bonus_points,
        }
    }
}

/// Equality keys on identifier, seller and current title only.
///
/// This is intentional: the catalog de-duplicates by current title, so a
/// product with a changed title is no longer equal to its former self.
impl PartialEq for Product {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id && self.seller_id == other.seller_id && self.title == other.title
    }
}

impl Eq for Product {}

impl Entity for Product {
    type Id = ProductId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}
