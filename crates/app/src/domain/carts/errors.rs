//! Carts service errors.

use thiserror::Error;

use crate::domain::{
    carts::{mutations::CartMutationError, repositories::CartsRepositoryError},
    products::ProductsServiceError,
};

#[derive(Debug, Error)]
pub enum CartsServiceError {
    #[error("product not found")]
    ProductNotFound,

    #[error("cart not found")]
    CartNotFound,

    #[error("product not found in cart")]
    ItemNotFound,

    #[error("quantity must be a positive integer")]
    InvalidQuantity,

    #[error("cart total exceeds the supported range")]
    TotalOverflow,

    #[error("cart was modified concurrently")]
    Conflict,

    #[error("product lookup failed")]
    Products(#[source] ProductsServiceError),

    #[error("cart storage error")]
    Store(#[source] CartsRepositoryError),
}

impl From<CartMutationError> for CartsServiceError {
    fn from(error: CartMutationError) -> Self {
        match error {
            CartMutationError::ItemNotFound => Self::ItemNotFound,
            CartMutationError::QuantityOverflow => Self::InvalidQuantity,
            CartMutationError::TotalOverflow => Self::TotalOverflow,
        }
    }
}

impl From<CartsRepositoryError> for CartsServiceError {
    fn from(error: CartsRepositoryError) -> Self {
        match error {
            CartsRepositoryError::VersionConflict => Self::Conflict,
            CartsRepositoryError::Sql(_) => Self::Store(error),
        }
    }
}

impl From<ProductsServiceError> for CartsServiceError {
    fn from(error: ProductsServiceError) -> Self {
        match error {
            ProductsServiceError::NotFound => Self::ProductNotFound,
            other => Self::Products(other),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quantity_overflow_is_an_invalid_quantity() {
        assert!(matches!(
            CartsServiceError::from(CartMutationError::QuantityOverflow),
            CartsServiceError::InvalidQuantity
        ));
    }

    #[test]
    fn missing_products_are_not_internal_errors() {
        assert!(matches!(
            CartsServiceError::from(ProductsServiceError::NotFound),
            CartsServiceError::ProductNotFound
        ));
        assert!(matches!(
            CartsServiceError::from(ProductsServiceError::Sql(sqlx::Error::PoolTimedOut)),
            CartsServiceError::Products(_)
        ));
    }

    #[test]
    fn store_failures_keep_their_source() {
        let error = CartsServiceError::from(CartsRepositoryError::Sql(sqlx::Error::PoolClosed));

        assert!(matches!(error, CartsServiceError::Store(_)));
        assert!(std::error::Error::source(&error).is_some());
    }
}
