//! Carts

pub mod data;
pub mod errors;
pub mod models;
pub mod mutations;
pub mod records;
pub mod repositories;
pub mod service;

pub use errors::CartsServiceError;
pub use service::*;
