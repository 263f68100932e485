//! In-memory catalog store.
//!
//! Process-local mutable state: single writer, single reader, mutations
//! applied directly with no optimistic concurrency control.

use std::collections::HashMap;

use chrono::{DateTime, Utc};

use unimart_core::{DomainResult, ProductId, SellerId};

use crate::category::Category;
use crate::product::{FidelityPolicy, Product, ProductDetails, ProductDraft, Promotion};

/// The product collection, keyed by identifier. Sole authority for lookup
/// by id; absence is a normal path (`Option`), never an error.
#[derive(Debug, Default)]
pub struct Catalog {
    products: HashMap<ProductId, Product>,
    policy: FidelityPolicy,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_policy(policy: FidelityPolicy) -> Self {
        Self {
            products: HashMap::new(),
            policy,
        }
    }

    pub fn policy(&self) -> FidelityPolicy {
        self.policy
    }

    /// List a new product and return its identifier.
    ///
    /// Rejects only on subcategory/kind validity. Price, quantity and bonus
    /// points may be negative and the title may be empty: permissive by
    /// design. Under a capping [`FidelityPolicy`] the bonus points are
    /// clamped (with a warning) rather than refused.
    pub fn create(
        &mut self,
        draft: ProductDraft,
        details: ProductDetails,
        now: DateTime<Utc>,
    ) -> DomainResult<ProductId> {
        let mut product = Product::new(draft, details, now)?;
        let points = product.bonus_points();
        if let Err(err) = product.set_bonus_points(points, self.policy) {
            tracing::warn!(product = %product.id_typed(), %err, "clamped bonus points at listing time");
        }
        let id = product.id_typed();
        self.products.insert(id, product);
        Ok(id)
    }

    /// Re-insert an already-built product (snapshot rehydration).
    pub fn insert(&mut self, product: Product) {
        self.products.insert(product.id_typed(), product);
    }

    pub fn get(&self, id: ProductId) -> Option<&Product> {
        self.products.get(&id)
    }

    pub fn get_mut(&mut self, id: ProductId) -> Option<&mut Product> {
        self.products.get_mut(&id)
    }

    /// All products, unordered.
    pub fn list(&self) -> impl Iterator<Item = &Product> {
        self.products.values()
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    pub fn by_seller(&self, seller_id: SellerId) -> impl Iterator<Item = &Product> {
        self.products
            .values()
            .filter(move |p| p.seller_id() == seller_id)
    }

    pub fn by_category(&self, category: Category) -> impl Iterator<Item = &Product> {
        self.products
            .values()
            .filter(move |p| p.category() == category)
    }

    /// Apply `mutate` to the product, if present. Returns whether it ran.
    pub fn update(&mut self, id: ProductId, mutate: impl FnOnce(&mut Product)) -> bool {
        match self.products.get_mut(&id) {
            Some(product) => {
                mutate(product);
                true
            }
            None => false,
        }
    }

    /// Add (`liked`) or withdraw a like. Returns whether the product exists.
    pub fn toggle_like(&mut self, id: ProductId, liked: bool) -> bool {
        self.update(id, |p| if liked { p.like() } else { p.unlike() })
    }

    /// Shift quantity by `delta` and return the new quantity. Quantities may
    /// go negative; no stock floor is enforced.
    pub fn adjust_quantity(&mut self, id: ProductId, delta: i64) -> Option<i64> {
        let product = self.products.get_mut(&id)?;
        product.set_quantity(product.quantity() + delta);
        Some(product.quantity())
    }

    /// Attach a promotion. Expiry is the caller's concern: nothing here
    /// sweeps promotions past their end date.
    pub fn apply_promotion(&mut self, id: ProductId, promotion: Promotion) -> bool {
        self.update(id, |p| p.set_promotion(promotion))
    }

    pub fn clear_promotion(&mut self, id: ProductId) -> bool {
        self.update(id, Product::clear_promotion)
    }

    pub fn remove(&mut self, id: ProductId) -> Option<Product> {
        self.products.remove(&id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::category::Subcategory;
    use unimart_core::DomainError;

    fn details_for(category: Category) -> ProductDetails {
        match category {
            Category::BookOrManual => ProductDetails::BookOrManual {
                isbn: "978-0-0000-0000-0".to_string(),
                author: "author".to_string(),
                editor: "editor".to_string(),
                release_date: None,
                edition: 1,
                volume: 1,
            },
            Category::LearningResource => ProductDetails::LearningResource {
                isbn: "978-0-0000-0000-0".to_string(),
                organisation: "org".to_string(),
                release_date: None,
                edition: 1,
            },
            Category::ItEquipment => ProductDetails::ItEquipment {
                brand: "brand".to_string(),
                model: "model".to_string(),
                release_date: None,
            },
            Category::OfficeEquipment => ProductDetails::OfficeEquipment {
                brand: "brand".to_string(),
                model: "model".to_string(),
            },
            Category::StationeryArticle => ProductDetails::StationeryArticle {
                brand: "brand".to_string(),
                model: "model".to_string(),
            },
        }
    }

    fn draft(category: Category, subcategory: Subcategory) -> ProductDraft {
        ProductDraft {
            price_cents: 1500,
            quantity: 3,
            title: "title".to_string(),
            description: String::new(),
            category,
            subcategory,
            seller_id: SellerId::new(),
            bonus_points: 10,
        }
    }

    #[test]
    fn created_book_is_retrievable_with_fields_intact() {
        let mut catalog = Catalog::new();
        let id = catalog
            .create(
                draft(Category::BookOrManual, Subcategory::Comic),
                details_for(Category::BookOrManual),
                Utc::now(),
            )
            .unwrap();

        let product = catalog.get(id).expect("product must be retrievable");
        assert_eq!(product.price_cents(), 1500);
        assert_eq!(product.quantity(), 3);
        assert_eq!(product.title(), "title");
        assert_eq!(product.bonus_points(), 10);
        assert_eq!(product.subcategory(), Subcategory::Comic);
        match product.details() {
            ProductDetails::BookOrManual { author, .. } => assert_eq!(author, "author"),
            other => panic!("expected book details, got {other:?}"),
        }
    }

    #[test]
    fn create_accepts_negative_and_empty_values() {
        let mut catalog = Catalog::new();
        let mut d = draft(Category::ItEquipment, Subcategory::Keyboard);
        d.price_cents = -100;
        d.quantity = -1;
        d.bonus_points = -42;
        d.title = String::new();
        let id = catalog
            .create(d, details_for(Category::ItEquipment), Utc::now())
            .unwrap();
        let product = catalog.get(id).unwrap();
        assert_eq!(product.price_cents(), -100);
        assert_eq!(product.quantity(), -1);
        assert_eq!(product.bonus_points(), -42);
        assert_eq!(product.title(), "");
    }

    #[test]
    fn create_rejects_only_subcategory_violations() {
        let mut catalog = Catalog::new();
        let err = catalog
            .create(
                draft(Category::OfficeEquipment, Subcategory::Pencil),
                details_for(Category::OfficeEquipment),
                Utc::now(),
            )
            .unwrap_err();
        assert!(matches!(err, DomainError::InvalidSubcategory { .. }));
        assert!(catalog.is_empty());
    }

    #[test]
    fn capping_policy_clamps_at_listing_without_rejecting() {
        let mut catalog = Catalog::with_policy(FidelityPolicy::MaxPerDollar(1));
        let mut d = draft(Category::BookOrManual, Subcategory::Novel);
        d.bonus_points = 10_000; // cap for 15 dollars at 1/dollar is 15
        let id = catalog
            .create(d, details_for(Category::BookOrManual), Utc::now())
            .unwrap();
        assert_eq!(catalog.get(id).unwrap().bonus_points(), 15);
    }

    #[test]
    fn get_on_absent_id_returns_none() {
        let catalog = Catalog::new();
        assert!(catalog.get(ProductId::new()).is_none());
    }

    #[test]
    fn update_and_like_report_absence_as_false() {
        let mut catalog = Catalog::new();
        let absent = ProductId::new();
        assert!(!catalog.update(absent, |p| p.set_rating(5.0)));
        assert!(!catalog.toggle_like(absent, true));
        assert!(catalog.adjust_quantity(absent, 1).is_none());
        assert!(catalog.remove(absent).is_none());
    }

    #[test]
    fn likes_accumulate_and_withdraw() {
        let mut catalog = Catalog::new();
        let id = catalog
            .create(
                draft(Category::StationeryArticle, Subcategory::Notebook),
                details_for(Category::StationeryArticle),
                Utc::now(),
            )
            .unwrap();
        assert!(catalog.toggle_like(id, true));
        assert!(catalog.toggle_like(id, true));
        assert!(catalog.toggle_like(id, false));
        assert_eq!(catalog.get(id).unwrap().likes(), 1);
    }

    #[test]
    fn adjust_quantity_may_go_negative() {
        let mut catalog = Catalog::new();
        let id = catalog
            .create(
                draft(Category::LearningResource, Subcategory::Printed),
                details_for(Category::LearningResource),
                Utc::now(),
            )
            .unwrap();
        assert_eq!(catalog.adjust_quantity(id, -5), Some(-2));
    }

    #[test]
    fn promotions_attach_and_clear() {
        let now = Utc::now();
        let mut catalog = Catalog::new();
        let id = catalog
            .create(
                draft(Category::ItEquipment, Subcategory::Mouse),
                details_for(Category::ItEquipment),
                now,
            )
            .unwrap();

        assert!(catalog.apply_promotion(
            id,
            Promotion {
                discount_cents: 200,
                bonus_points: 5,
                ends_at: now + chrono::Duration::days(3),
            },
        ));
        assert!(catalog.get(id).unwrap().promotion_active(now));

        assert!(catalog.clear_promotion(id));
        assert!(catalog.get(id).unwrap().promotion().is_none());
    }

    #[test]
    fn filters_select_by_seller_and_category() {
        let mut catalog = Catalog::new();
        let seller = SellerId::new();
        let mut d = draft(Category::BookOrManual, Subcategory::Novel);
        d.seller_id = seller;
        catalog
            .create(d, details_for(Category::BookOrManual), Utc::now())
            .unwrap();
        catalog
            .create(
                draft(Category::ItEquipment, Subcategory::Computer),
                details_for(Category::ItEquipment),
                Utc::now(),
            )
            .unwrap();

        assert_eq!(catalog.by_seller(seller).count(), 1);
        assert_eq!(catalog.by_category(Category::BookOrManual).count(), 1);
        assert_eq!(catalog.by_category(Category::ItEquipment).count(), 1);
        assert_eq!(catalog.by_category(Category::OfficeEquipment).count(), 0);
        assert_eq!(catalog.list().count(), 2);
    }

    #[cfg(test)]
    mod proptest_tests {
        use super::*;
        use proptest::prelude::*;

        fn any_category() -> impl Strategy<Value = Category> {
            prop::sample::select(Category::ALL.to_vec())
        }

        fn any_subcategory() -> impl Strategy<Value = Subcategory> {
            let all: Vec<Subcategory> = Category::ALL
                .iter()
                .flat_map(|c| c.subcategories().iter().copied())
                .collect();
            prop::sample::select(all)
        }

        proptest! {
            /// Creation succeeds exactly when the subcategory belongs to the
            /// category's declared enumeration.
            #[test]
            fn create_succeeds_iff_subcategory_is_permitted(
                category in any_category(),
                subcategory in any_subcategory(),
            ) {
                let mut catalog = Catalog::new();
                let result = catalog.create(
                    draft(category, subcategory),
                    details_for(category),
                    Utc::now(),
                );
                if category.permits(subcategory) {
                    let id = result.unwrap();
                    prop_assert!(catalog.get(id).is_some());
                } else {
                    let err = result.unwrap_err();
                    prop_assert!(
                        matches!(err, DomainError::InvalidSubcategory { .. }),
                        "unexpected error: {:?}",
                        err
                    );
                }
            }

            /// No business rule restricts price/quantity/points/title.
            #[test]
            fn create_is_permissive_over_commercial_fields(
                price in any::<i64>(),
                quantity in any::<i64>(),
                points in any::<i64>(),
                title in ".{0,40}",
            ) {
                let mut catalog = Catalog::new();
                let mut d = draft(Category::BookOrManual, Subcategory::Textbook);
                d.price_cents = price;
                d.quantity = quantity;
                d.bonus_points = points;
                d.title = title.clone();
                let id = catalog
                    .create(d, details_for(Category::BookOrManual), Utc::now())
                    .unwrap();
                let product = catalog.get(id).unwrap();
                prop_assert_eq!(product.price_cents(), price);
                prop_assert_eq!(product.quantity(), quantity);
                prop_assert_eq!(product.bonus_points(), points);
                prop_assert_eq!(product.title(), title.as_str());
            }
        }
    }
}
