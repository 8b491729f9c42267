//! Cart Data

use crate::domain::products::records::ProductUuid;

/// Item to add to a cart. `quantity` is validated by the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NewCartItem {
    pub product_uuid: ProductUuid,
    pub quantity: i64,
}

/// New absolute quantity for a cart line. A quantity of zero or less removes the line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CartItemUpdate {
    pub product_uuid: ProductUuid,
    pub quantity: i64,
}
