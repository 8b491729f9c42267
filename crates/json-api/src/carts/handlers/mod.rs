//! Cart Handlers

pub(crate) mod add;
pub(crate) mod get;
pub(crate) mod remove;
pub(crate) mod update;

#[cfg(test)]
mod tests {
    use std::num::NonZeroU32;

    use jiff::Timestamp;
    use storefront_app::domain::{
        carts::records::{CartItemRecord, CartRecord, CartUuid},
        products::records::ProductUuid,
    };

    use crate::test_helpers::TEST_USER_UUID;

    pub(super) fn make_cart(lines: &[(ProductUuid, u32, u64)]) -> CartRecord {
        let items: Vec<CartItemRecord> = lines
            .iter()
            .filter_map(|&(product_uuid, quantity, price)| {
                NonZeroU32::new(quantity).map(|quantity| CartItemRecord {
                    product_uuid,
                    quantity,
                    price,
                })
            })
            .collect();

        CartRecord {
            uuid: CartUuid::new(),
            user_uuid: TEST_USER_UUID,
            total_amount: items
                .iter()
                .map(|item| u64::from(item.quantity.get()) * item.price)
                .sum(),
            items,
            version: 1,
            created_at: Timestamp::UNIX_EPOCH,
            updated_at: Timestamp::UNIX_EPOCH,
        }
    }
}
