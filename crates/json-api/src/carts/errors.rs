//! Cart Errors

use std::error::Error;

use salvo::http::StatusError;
use tracing::error;

use storefront_app::domain::carts::CartsServiceError;

use crate::observability::record_cart_mutation;

pub(crate) fn into_status_error(error: CartsServiceError) -> StatusError {
    match error {
        CartsServiceError::ProductNotFound => StatusError::not_found().brief("Product not found"),
        CartsServiceError::CartNotFound => StatusError::not_found().brief("Cart not found"),
        CartsServiceError::ItemNotFound => {
            StatusError::not_found().brief("Product not found in cart")
        }
        CartsServiceError::InvalidQuantity => {
            StatusError::bad_request().brief("Quantity must be a positive integer")
        }
        CartsServiceError::TotalOverflow => {
            StatusError::bad_request().brief("Cart total exceeds the supported range")
        }
        CartsServiceError::Conflict => {
            StatusError::conflict().brief("Cart was modified concurrently, please retry")
        }
        CartsServiceError::Products(_) | CartsServiceError::Store(_) => {
            error!(error = %source_chain(&error), "cart request failed");

            StatusError::internal_server_error().brief(error.to_string())
        }
    }
}

/// Count a finished cart mutation under its outcome label.
pub(crate) fn record_outcome<T>(operation: &str, result: &Result<T, CartsServiceError>) {
    let outcome = match result {
        Ok(_) => "ok",
        Err(CartsServiceError::ProductNotFound) => "product_not_found",
        Err(CartsServiceError::CartNotFound) => "cart_not_found",
        Err(CartsServiceError::ItemNotFound) => "item_not_found",
        Err(CartsServiceError::InvalidQuantity) => "invalid_quantity",
        Err(CartsServiceError::TotalOverflow) => "total_overflow",
        Err(CartsServiceError::Conflict) => "conflict",
        Err(CartsServiceError::Products(_) | CartsServiceError::Store(_)) => "error",
    };

    record_cart_mutation(operation, outcome);
}

fn source_chain(error: &dyn Error) -> String {
    let mut chain = error.to_string();
    let mut source = error.source();

    while let Some(cause) = source {
        chain.push_str(": ");
        chain.push_str(&cause.to_string());
        source = cause.source();
    }

    chain
}

#[cfg(test)]
mod tests {
    use salvo::http::StatusCode;
    use storefront_app::domain::products::ProductsServiceError;

    use super::*;

    #[test]
    fn conflict_asks_the_client_to_retry() {
        let error = into_status_error(CartsServiceError::Conflict);

        assert_eq!(error.code, StatusCode::CONFLICT);
        assert_eq!(error.brief, "Cart was modified concurrently, please retry");
    }

    #[test]
    fn internal_errors_keep_their_display_text() {
        let error = into_status_error(CartsServiceError::Products(
            ProductsServiceError::InvalidData,
        ));

        assert_eq!(error.code, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(error.brief, "product lookup failed");
    }

    #[test]
    fn source_chain_includes_causes() {
        let error = CartsServiceError::Products(ProductsServiceError::InvalidData);

        assert_eq!(source_chain(&error), "product lookup failed: invalid data");
    }
}
