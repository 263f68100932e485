//! Product reviews.

pub mod review;

pub use review::{Review, ReviewBoard};
