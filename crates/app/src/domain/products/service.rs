//! Products service.

use async_trait::async_trait;
use mockall::automock;

use crate::{
    database::Db,
    domain::{
        categories::records::CategoryUuid,
        products::{
            data::{NewProduct, ProductFilter, ProductUpdate},
            errors::ProductsServiceError,
            records::{ProductRecord, ProductUuid},
            repository::PgProductsRepository,
        },
    },
};

#[derive(Debug, Clone)]
pub struct PgProductsService {
    db: Db,
    repository: PgProductsRepository,
}

impl PgProductsService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            repository: PgProductsRepository::new(),
        }
    }

    async fn ensure_live_category(
        &self,
        tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
        category: Option<CategoryUuid>,
    ) -> Result<(), ProductsServiceError> {
        let Some(category) = category else {
            return Ok(());
        };

        if self.repository.category_is_live(tx, category).await? {
            Ok(())
        } else {
            Err(ProductsServiceError::InvalidReference)
        }
    }
}

fn normalize_name(name: &str) -> Result<String, ProductsServiceError> {
    let name = name.trim();

    if name.is_empty() {
        return Err(ProductsServiceError::InvalidData);
    }

    Ok(name.to_string())
}

fn normalize_description(description: Option<String>) -> Option<String> {
    description
        .map(|text| text.trim().to_string())
        .filter(|text| !text.is_empty())
}

#[async_trait]
impl ProductsService for PgProductsService {
    async fn list_products(
        &self,
        filter: ProductFilter,
    ) -> Result<Vec<ProductRecord>, ProductsServiceError> {
        let mut tx = self.db.begin().await?;

        let products = self.repository.list_products(&mut tx, filter).await?;

        tx.commit().await?;

        Ok(products)
    }

    async fn get_product(&self, product: ProductUuid) -> Result<ProductRecord, ProductsServiceError> {
        let mut tx = self.db.begin().await?;

        let product = self.repository.get_product(&mut tx, product).await?;

        tx.commit().await?;

        Ok(product)
    }

    async fn find_products(
        &self,
        products: &[ProductUuid],
    ) -> Result<Vec<ProductRecord>, ProductsServiceError> {
        if products.is_empty() {
            return Ok(Vec::new());
        }

        let mut tx = self.db.begin().await?;

        let found = self.repository.find_products(&mut tx, products).await?;

        tx.commit().await?;

        Ok(found)
    }

    async fn create_product(
        &self,
        product: NewProduct,
    ) -> Result<ProductRecord, ProductsServiceError> {
        let price = i64::try_from(product.price)?;

        let product = NewProduct {
            name: normalize_name(&product.name)?,
            description: normalize_description(product.description),
            ..product
        };

        let mut tx = self.db.begin().await?;

        self.ensure_live_category(&mut tx, product.category_uuid)
            .await?;

        let created = self
            .repository
            .create_product(&mut tx, &product, price)
            .await?;

        tx.commit().await?;

        Ok(created)
    }

    async fn update_product(
        &self,
        product: ProductUuid,
        update: ProductUpdate,
    ) -> Result<ProductRecord, ProductsServiceError> {
        let price = i64::try_from(update.price)?;

        let update = ProductUpdate {
            name: normalize_name(&update.name)?,
            description: normalize_description(update.description),
            ..update
        };

        let mut tx = self.db.begin().await?;

        self.ensure_live_category(&mut tx, update.category_uuid)
            .await?;

        let updated = self
            .repository
            .update_product(&mut tx, product, &update, price)
            .await?;

        tx.commit().await?;

        Ok(updated)
    }

    async fn delete_product(&self, product: ProductUuid) -> Result<(), ProductsServiceError> {
        let mut tx = self.db.begin().await?;

        let rows_affected = self.repository.delete_product(&mut tx, product).await?;

        if rows_affected == 0 {
            return Err(ProductsServiceError::NotFound);
        }

        tx.commit().await?;

        Ok(())
    }
}

#[automock]
#[async_trait]
pub trait ProductsService: Send + Sync {
    /// Retrieves live products, oldest first.
    async fn list_products(
        &self,
        filter: ProductFilter,
    ) -> Result<Vec<ProductRecord>, ProductsServiceError>;

    /// Retrieve a single live product.
    async fn get_product(&self, product: ProductUuid) -> Result<ProductRecord, ProductsServiceError>;

    /// Retrieve every live product among the given UUIDs. Missing or deleted products are
    /// omitted rather than reported.
    async fn find_products(
        &self,
        products: &[ProductUuid],
    ) -> Result<Vec<ProductRecord>, ProductsServiceError>;

    /// Creates a new product.
    async fn create_product(
        &self,
        product: NewProduct,
    ) -> Result<ProductRecord, ProductsServiceError>;

    /// Replaces the mutable fields of a product.
    async fn update_product(
        &self,
        product: ProductUuid,
        update: ProductUpdate,
    ) -> Result<ProductRecord, ProductsServiceError>;

    /// Soft-deletes a product.
    async fn delete_product(&self, product: ProductUuid) -> Result<(), ProductsServiceError>;
}
