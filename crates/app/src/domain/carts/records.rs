//! Cart Records

use std::num::NonZeroU32;

use jiff::Timestamp;

use crate::{
    domain::{products::records::ProductUuid, users::UserUuid},
    uuids::TypedUuid,
};

/// Cart UUID
pub type CartUuid = TypedUuid<CartRecord>;

/// Cart Record
///
/// A user's cart together with its line items. `version` is `0` until the cart has been
/// persisted and increases by one with every successful save.
#[derive(Debug, Clone, PartialEq)]
pub struct CartRecord {
    pub uuid: CartUuid,
    pub user_uuid: UserUuid,
    pub items: Vec<CartItemRecord>,
    /// Sum of `price * quantity` across `items`, in minor currency units.
    pub total_amount: u64,
    pub version: i64,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Cart Item Record
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CartItemRecord {
    pub product_uuid: ProductUuid,
    pub quantity: NonZeroU32,
    /// Unit price captured when the product was first added.
    pub price: u64,
}

impl CartRecord {
    /// An empty cart for `user` that has not been persisted yet.
    #[must_use]
    pub fn empty(user_uuid: UserUuid) -> Self {
        let now = Timestamp::now();

        Self {
            uuid: CartUuid::new(),
            user_uuid,
            items: Vec::new(),
            total_amount: 0,
            version: 0,
            created_at: now,
            updated_at: now,
        }
    }

    /// Whether the cart has been saved at least once.
    #[must_use]
    pub fn is_persisted(&self) -> bool {
        self.version > 0
    }
}
