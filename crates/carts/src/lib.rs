//! Carts and orders.
//!
//! Cart mutations are direct field changes with no transactional guarantees;
//! checkout prices each line against the catalog at the moment of purchase.

pub mod cart;
pub mod order;

pub use cart::{Cart, CartLine};
pub use order::{checkout, Order, OrderLine};
