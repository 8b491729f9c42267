//! Product Errors

use salvo::http::StatusError;
use tracing::error;

use storefront_app::domain::products::ProductsServiceError;

pub(crate) fn into_status_error(error: ProductsServiceError) -> StatusError {
    match error {
        ProductsServiceError::NotFound => StatusError::not_found().brief("Product not found"),
        ProductsServiceError::AlreadyExists => {
            StatusError::conflict().brief("Product already exists")
        }
        ProductsServiceError::InvalidReference => {
            StatusError::bad_request().brief("Category not found")
        }
        ProductsServiceError::InvalidPrice(_) => {
            StatusError::bad_request().brief("Price exceeds the supported range")
        }
        ProductsServiceError::MissingRequiredData | ProductsServiceError::InvalidData => {
            StatusError::bad_request().brief("Invalid product payload")
        }
        ProductsServiceError::Sql(ref source) => {
            error!("product request failed: {source}");

            StatusError::internal_server_error().brief(error.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use salvo::http::StatusCode;

    use super::*;

    #[test]
    fn missing_category_is_bad_request() {
        let error = into_status_error(ProductsServiceError::InvalidReference);

        assert_eq!(error.code, StatusCode::BAD_REQUEST);
        assert_eq!(error.brief, "Category not found");
    }

    #[test]
    fn oversized_price_is_bad_request() {
        let error = i64::try_from(u64::MAX)
            .map_err(ProductsServiceError::from)
            .map_err(into_status_error)
            .err();

        assert_eq!(error.map(|e| e.code), Some(StatusCode::BAD_REQUEST));
    }
}
