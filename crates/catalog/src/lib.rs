//! Product catalog: category registry, product model, in-memory store.
//!
//! This crate contains the marketplace catalog rules as deterministic domain
//! logic (no IO, no persistence). The store is process-local mutable state:
//! single writer, single reader, no concurrency guarantees.

pub mod category;
pub mod product;
pub mod store;

pub use category::{subcategories_by_name, Category, Subcategory};
pub use product::{
    FidelityPolicy, Product, ProductDetails, ProductDraft, Promotion,
};
pub use store::Catalog;
