//! Test Helpers

use crate::{
    domain::{
        categories::{
            CategoriesService,
            data::NewCategory,
            records::{CategoryRecord, CategoryUuid},
        },
        products::{
            ProductsService,
            data::NewProduct,
            records::{ProductRecord, ProductUuid},
        },
    },
    test::TestContext,
};

pub(crate) async fn create_category(ctx: &TestContext, name: &str) -> CategoryRecord {
    ctx.categories
        .create_category(NewCategory {
            uuid: CategoryUuid::new(),
            name: name.to_string(),
            description: None,
        })
        .await
        .expect("Failed to create test category")
}

pub(crate) async fn create_product(
    ctx: &TestContext,
    category: Option<CategoryUuid>,
    price: u64,
) -> ProductRecord {
    ctx.products
        .create_product(NewProduct {
            uuid: ProductUuid::new(),
            category_uuid: category,
            name: "Test Product".to_string(),
            description: None,
            price,
        })
        .await
        .expect("Failed to create test product")
}
