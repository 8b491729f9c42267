//! Update Cart Item Handler

use std::sync::Arc;

use salvo::{oapi::extract::JsonBody, prelude::*};

use crate::{
    carts::{
        errors::{into_status_error, record_outcome},
        models::{CartItemRequest, CartResponse},
    },
    extensions::*,
    state::State,
};

/// Update Cart Item Handler
///
/// Sets the quantity of a line already in the cart. A quantity of zero or less removes it.
#[endpoint(
    tags("cart"),
    summary = "Update Cart Item",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Updated cart"),
        (status_code = StatusCode::BAD_REQUEST, description = "Invalid quantity"),
        (status_code = StatusCode::NOT_FOUND, description = "Cart or cart item not found"),
        (status_code = StatusCode::CONFLICT, description = "Cart was modified concurrently"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
#[tracing::instrument(
    name = "cart.update",
    skip(json, depot),
    fields(
        user_uuid = tracing::field::Empty,
        product_uuid = tracing::field::Empty,
        quantity = tracing::field::Empty
    ),
    err
)]
pub(crate) async fn handler(
    json: JsonBody<CartItemRequest>,
    depot: &mut Depot,
) -> Result<Json<CartResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let principal = depot.principal_or_401()?;
    let request = json.into_inner();

    let span = tracing::Span::current();

    span.record("user_uuid", tracing::field::display(principal.user_uuid));
    span.record("product_uuid", tracing::field::display(request.product_id));
    span.record("quantity", request.quantity);

    let result = state
        .app
        .carts
        .update_item(principal.user_uuid, request.into())
        .await;

    record_outcome("update", &result);

    let cart = result.map_err(into_status_error)?;

    Ok(Json(cart.into()))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use serde_json::json;
    use testresult::TestResult;

    use storefront_app::domain::{
        carts::{CartsServiceError, MockCartsService, data::CartItemUpdate},
        products::records::ProductUuid,
    };

    use crate::{
        errors::ErrorResponse,
        test_helpers::{Mocks, TEST_USER_UUID, customer_service},
    };

    use super::{super::tests::make_cart, *};

    fn make_service(carts: MockCartsService) -> Service {
        customer_service(
            Mocks {
                carts,
                ..Mocks::default()
            },
            Router::with_path("cart").put(handler),
        )
    }

    #[tokio::test]
    async fn test_update_item_sets_quantity() -> TestResult {
        let product = ProductUuid::new();

        let mut carts = MockCartsService::new();

        carts
            .expect_update_item()
            .once()
            .withf(move |user, update| {
                *user == TEST_USER_UUID
                    && *update
                        == CartItemUpdate {
                            product_uuid: product,
                            quantity: 5,
                        }
            })
            .return_once(move |_, _| Ok(make_cart(&[(product, 5, 10)])));

        let mut res = TestClient::put("http://example.com/cart")
            .json(&json!({ "productId": product.into_uuid(), "quantity": 5 }))
            .send(&make_service(carts))
            .await;

        let body: CartResponse = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::OK));
        assert_eq!(body.total_amount, 50);
        assert_eq!(body.items[0].quantity, 5);

        Ok(())
    }

    #[tokio::test]
    async fn test_update_item_to_zero_passes_through_for_removal() -> TestResult {
        let product = ProductUuid::new();

        let mut carts = MockCartsService::new();

        carts
            .expect_update_item()
            .once()
            .withf(move |_, update| update.product_uuid == product && update.quantity == 0)
            .return_once(|_, _| Ok(make_cart(&[])));

        let mut res = TestClient::put("http://example.com/cart")
            .json(&json!({ "productId": product.into_uuid(), "quantity": 0 }))
            .send(&make_service(carts))
            .await;

        let body: CartResponse = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::OK));
        assert!(body.items.is_empty(), "line should be gone");
        assert_eq!(body.total_amount, 0);

        Ok(())
    }

    #[tokio::test]
    async fn test_update_with_oversized_quantity_returns_400() -> TestResult {
        let oversized = i64::from(u32::MAX) + 1;

        let mut carts = MockCartsService::new();

        carts
            .expect_update_item()
            .once()
            .withf(move |_, update| update.quantity == oversized)
            .return_once(|_, _| Err(CartsServiceError::InvalidQuantity));

        let mut res = TestClient::put("http://example.com/cart")
            .json(&json!({ "productId": ProductUuid::new().into_uuid(), "quantity": oversized }))
            .send(&make_service(carts))
            .await;

        let body: ErrorResponse = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));
        assert_eq!(body.message, "Quantity must be a positive integer");

        Ok(())
    }

    #[tokio::test]
    async fn test_update_without_cart_returns_404() -> TestResult {
        let mut carts = MockCartsService::new();

        carts
            .expect_update_item()
            .once()
            .return_once(|_, _| Err(CartsServiceError::CartNotFound));

        let mut res = TestClient::put("http://example.com/cart")
            .json(&json!({ "productId": ProductUuid::new().into_uuid(), "quantity": 2 }))
            .send(&make_service(carts))
            .await;

        let body: ErrorResponse = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::NOT_FOUND));
        assert_eq!(body.message, "Cart not found");

        Ok(())
    }

    #[tokio::test]
    async fn test_update_missing_item_returns_404() -> TestResult {
        let mut carts = MockCartsService::new();

        carts
            .expect_update_item()
            .once()
            .return_once(|_, _| Err(CartsServiceError::ItemNotFound));

        let mut res = TestClient::put("http://example.com/cart")
            .json(&json!({ "productId": ProductUuid::new().into_uuid(), "quantity": 2 }))
            .send(&make_service(carts))
            .await;

        let body: ErrorResponse = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::NOT_FOUND));
        assert_eq!(body.message, "Product not found in cart");

        Ok(())
    }
}
