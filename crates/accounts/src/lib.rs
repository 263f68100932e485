//! Buyer and seller accounts, and the login check.

pub mod directory;
pub mod user;

pub use directory::{Directory, Session};
pub use user::{Buyer, Seller};
