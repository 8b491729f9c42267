//! Cart Models

use std::{collections::HashMap, num::NonZeroU32};

use jiff::Timestamp;

use crate::domain::{
    carts::records::{CartRecord, CartUuid},
    products::records::{ProductRecord, ProductUuid},
    users::UserUuid,
};

/// A cart whose lines carry the product they refer to.
///
/// Carts that were never persisted resolve with no `uuid`, `user_uuid` or timestamps.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedCart {
    pub uuid: Option<CartUuid>,
    pub user_uuid: Option<UserUuid>,
    pub items: Vec<ResolvedCartItem>,
    pub total_amount: u64,
    pub version: i64,
    pub created_at: Option<Timestamp>,
    pub updated_at: Option<Timestamp>,
}

/// Resolved cart line. `product` is `None` when the product has since been deleted.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedCartItem {
    pub product_uuid: ProductUuid,
    pub product: Option<ProductRecord>,
    pub quantity: NonZeroU32,
    pub price: u64,
}

impl ResolvedCart {
    /// Placeholder returned for users without a cart.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            uuid: None,
            user_uuid: None,
            items: Vec::new(),
            total_amount: 0,
            version: 0,
            created_at: None,
            updated_at: None,
        }
    }

    /// Attach product data to each line of `cart`.
    #[must_use]
    pub fn resolve(cart: CartRecord, products: Vec<ProductRecord>) -> Self {
        let mut products: HashMap<ProductUuid, ProductRecord> = products
            .into_iter()
            .map(|product| (product.uuid, product))
            .collect();

        let items = cart
            .items
            .into_iter()
            .map(|item| ResolvedCartItem {
                product_uuid: item.product_uuid,
                product: products.remove(&item.product_uuid),
                quantity: item.quantity,
                price: item.price,
            })
            .collect();

        Self {
            uuid: Some(cart.uuid),
            user_uuid: Some(cart.user_uuid),
            items,
            total_amount: cart.total_amount,
            version: cart.version,
            created_at: Some(cart.created_at),
            updated_at: Some(cart.updated_at),
        }
    }
}
