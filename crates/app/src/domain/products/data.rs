//! Products Data

use crate::domain::{categories::records::CategoryUuid, products::records::ProductUuid};

/// New Product Data
#[derive(Debug, Clone, PartialEq)]
pub struct NewProduct {
    pub uuid: ProductUuid,
    pub category_uuid: Option<CategoryUuid>,
    pub name: String,
    pub description: Option<String>,
    pub price: u64,
}

/// Product Update Data
#[derive(Debug, Clone, PartialEq)]
pub struct ProductUpdate {
    pub category_uuid: Option<CategoryUuid>,
    pub name: String,
    pub description: Option<String>,
    pub price: u64,
}

/// Product listing filter
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ProductFilter {
    pub category: Option<CategoryUuid>,
}
