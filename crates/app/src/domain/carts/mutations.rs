//! Cart Mutations
//!
//! In-memory edits of a [`CartRecord`]. Every successful mutation leaves `total_amount`
//! equal to the sum of `price * quantity` over the remaining items. When a mutation
//! fails the record may be partially modified and should be discarded.

use std::num::NonZeroU32;

use thiserror::Error;

use crate::domain::{
    carts::records::{CartItemRecord, CartRecord},
    products::records::ProductUuid,
};

/// Largest total a cart may carry; totals are stored as `BIGINT`.
pub const MAX_TOTAL_AMOUNT: u64 = i64::MAX.unsigned_abs();

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum CartMutationError {
    #[error("product not found in cart")]
    ItemNotFound,

    #[error("item quantity exceeds the supported range")]
    QuantityOverflow,

    #[error("cart total exceeds the supported range")]
    TotalOverflow,
}

/// Sum `price * quantity` over `items`, or `None` if it exceeds [`MAX_TOTAL_AMOUNT`].
#[must_use]
pub fn calculate_total(items: &[CartItemRecord]) -> Option<u64> {
    items
        .iter()
        .try_fold(0_u64, |total, item| {
            item.price
                .checked_mul(u64::from(item.quantity.get()))
                .and_then(|line| total.checked_add(line))
        })
        .filter(|total| *total <= MAX_TOTAL_AMOUNT)
}

impl CartRecord {
    /// Add `quantity` of `product`. An existing line is incremented and keeps its original
    /// price; otherwise a new line is appended at `price`.
    ///
    /// # Errors
    ///
    /// Returns an error when the line quantity or the cart total overflows.
    pub fn add_item(
        &mut self,
        product: ProductUuid,
        price: u64,
        quantity: NonZeroU32,
    ) -> Result<(), CartMutationError> {
        match self
            .items
            .iter_mut()
            .find(|item| item.product_uuid == product)
        {
            Some(item) => {
                item.quantity = item
                    .quantity
                    .checked_add(quantity.get())
                    .ok_or(CartMutationError::QuantityOverflow)?;
            }
            None => self.items.push(CartItemRecord {
                product_uuid: product,
                quantity,
                price,
            }),
        }

        self.recompute_total()
    }

    /// Set the quantity of an existing line. `None` removes the line.
    ///
    /// # Errors
    ///
    /// Returns [`CartMutationError::ItemNotFound`] when the cart has no line for `product`.
    pub fn update_item(
        &mut self,
        product: ProductUuid,
        quantity: Option<NonZeroU32>,
    ) -> Result<(), CartMutationError> {
        let position = self
            .items
            .iter()
            .position(|item| item.product_uuid == product)
            .ok_or(CartMutationError::ItemNotFound)?;

        match quantity {
            Some(quantity) => {
                if let Some(item) = self.items.get_mut(position) {
                    item.quantity = quantity;
                }
            }
            None => {
                self.items.remove(position);
            }
        }

        self.recompute_total()
    }

    /// Remove every line for `product`. Returns `false` when nothing matched.
    ///
    /// # Errors
    ///
    /// Returns an error if the remaining total cannot be represented.
    pub fn remove_item(&mut self, product: ProductUuid) -> Result<bool, CartMutationError> {
        let before = self.items.len();

        self.items.retain(|item| item.product_uuid != product);

        if self.items.len() == before {
            return Ok(false);
        }

        self.recompute_total()?;

        Ok(true)
    }

    fn recompute_total(&mut self) -> Result<(), CartMutationError> {
        self.total_amount =
            calculate_total(&self.items).ok_or(CartMutationError::TotalOverflow)?;

        Ok(())
    }
}
