//! `unimart-core` — domain foundation building blocks.
//!
//! This crate contains **pure domain** primitives (no persistence, no IO).

pub mod entity;
pub mod error;
pub mod id;

pub use entity::Entity;
pub use error::{DomainError, DomainResult};
pub use id::{BuyerId, CartId, OrderId, ProductId, ReviewId, SellerId};
