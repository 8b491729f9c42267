//! Storefront Domain Concerns

pub mod carts;
pub mod categories;
pub mod products;
pub mod users;
