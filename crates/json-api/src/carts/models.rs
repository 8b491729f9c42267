//! Cart request and response bodies.

use salvo::oapi::ToSchema;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use storefront_app::domain::carts::{
    data::{CartItemUpdate, NewCartItem},
    models::{ResolvedCart, ResolvedCartItem},
    records::{CartItemRecord, CartRecord},
};

use crate::products::get::ProductResponse;

/// Cart Item Request
///
/// Body of both the add and update operations.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct CartItemRequest {
    pub product_id: Uuid,
    pub quantity: i64,
}

impl From<CartItemRequest> for NewCartItem {
    fn from(request: CartItemRequest) -> Self {
        NewCartItem {
            product_uuid: request.product_id.into(),
            quantity: request.quantity,
        }
    }
}

impl From<CartItemRequest> for CartItemUpdate {
    fn from(request: CartItemRequest) -> Self {
        CartItemUpdate {
            product_uuid: request.product_id.into(),
            quantity: request.quantity,
        }
    }
}

/// Cart Response
///
/// A user without a cart receives only `items` and `totalAmount`.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct CartResponse {
    /// The unique identifier of the cart
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub uuid: Option<Uuid>,

    /// The user owning the cart
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub user: Option<Uuid>,

    /// Lines in insertion order
    pub items: Vec<CartItemResponse>,

    /// Sum of `price * quantity` over all lines, in pence/cents
    pub total_amount: u64,

    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub created_at: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub updated_at: Option<String>,
}

/// Cart Item Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct CartItemResponse {
    pub product_id: Uuid,

    /// Product details, present when reading the cart
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub product: Option<ProductResponse>,

    pub quantity: u32,

    /// Unit price captured when the product was first added
    pub price: u64,
}

impl From<ResolvedCart> for CartResponse {
    fn from(cart: ResolvedCart) -> Self {
        CartResponse {
            uuid: cart.uuid.map(Into::into),
            user: cart.user_uuid.map(Into::into),
            items: cart.items.into_iter().map(Into::into).collect(),
            total_amount: cart.total_amount,
            created_at: cart.created_at.map(|at| at.to_string()),
            updated_at: cart.updated_at.map(|at| at.to_string()),
        }
    }
}

impl From<ResolvedCartItem> for CartItemResponse {
    fn from(item: ResolvedCartItem) -> Self {
        Self {
            product_id: item.product_uuid.into(),
            product: item.product.map(Into::into),
            quantity: item.quantity.get(),
            price: item.price,
        }
    }
}

impl From<CartRecord> for CartResponse {
    fn from(cart: CartRecord) -> Self {
        CartResponse {
            uuid: Some(cart.uuid.into()),
            user: Some(cart.user_uuid.into()),
            items: cart.items.into_iter().map(Into::into).collect(),
            total_amount: cart.total_amount,
            created_at: Some(cart.created_at.to_string()),
            updated_at: Some(cart.updated_at.to_string()),
        }
    }
}

impl From<CartItemRecord> for CartItemResponse {
    fn from(item: CartItemRecord) -> Self {
        Self {
            product_id: item.product_uuid.into(),
            product: None,
            quantity: item.quantity.get(),
            price: item.price,
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use testresult::TestResult;

    use super::*;

    #[test]
    fn empty_placeholder_has_only_items_and_total() -> TestResult {
        let body = serde_json::to_value(CartResponse::from(ResolvedCart::empty()))?;

        assert_eq!(body, json!({ "items": [], "totalAmount": 0 }));

        Ok(())
    }
}
