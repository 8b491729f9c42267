//! PostgreSQL carts repository.

use std::num::NonZeroU32;

use async_trait::async_trait;
use jiff_sqlx::Timestamp as SqlxTimestamp;
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, Postgres, Row, postgres::PgRow, query_as, types::Json};

use crate::{
    database::Db,
    domain::{
        carts::{
            records::{CartItemRecord, CartRecord, CartUuid},
            repositories::{CartsRepository, CartsRepositoryError},
        },
        products::records::ProductUuid,
        users::UserUuid,
    },
};

const FIND_CART_BY_USER_SQL: &str = include_str!("../sql/find_cart_by_user.sql");
const SAVE_CART_SQL: &str = include_str!("../sql/save_cart.sql");

/// Line item as stored in the `carts.items` JSONB array.
#[derive(Debug, Serialize, Deserialize)]
struct StoredCartItem {
    product_uuid: uuid::Uuid,
    quantity: NonZeroU32,
    price: u64,
}

impl From<&CartItemRecord> for StoredCartItem {
    fn from(item: &CartItemRecord) -> Self {
        Self {
            product_uuid: item.product_uuid.into_uuid(),
            quantity: item.quantity,
            price: item.price,
        }
    }
}

impl From<StoredCartItem> for CartItemRecord {
    fn from(item: StoredCartItem) -> Self {
        Self {
            product_uuid: ProductUuid::from_uuid(item.product_uuid),
            quantity: item.quantity,
            price: item.price,
        }
    }
}

#[derive(Debug, Clone)]
pub struct PgCartsRepository {
    db: Db,
}

impl PgCartsRepository {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self { db }
    }
}

#[async_trait]
impl CartsRepository for PgCartsRepository {
    async fn find_by_user(&self, user: UserUuid) -> Result<Option<CartRecord>, CartsRepositoryError> {
        let cart = query_as::<Postgres, CartRecord>(FIND_CART_BY_USER_SQL)
            .bind(user.into_uuid())
            .fetch_optional(self.db.pool())
            .await?;

        Ok(cart)
    }

    async fn save(&self, cart: &CartRecord) -> Result<CartRecord, CartsRepositoryError> {
        let items: Vec<StoredCartItem> = cart.items.iter().map(StoredCartItem::from).collect();

        let total_amount = i64::try_from(cart.total_amount)
            .map_err(|e| CartsRepositoryError::Sql(sqlx::Error::Encode(Box::new(e))))?;

        let saved = query_as::<Postgres, CartRecord>(SAVE_CART_SQL)
            .bind(cart.uuid.into_uuid())
            .bind(cart.user_uuid.into_uuid())
            .bind(Json(items))
            .bind(total_amount)
            .bind(cart.version)
            .fetch_optional(self.db.pool())
            .await?;

        saved.ok_or(CartsRepositoryError::VersionConflict)
    }
}

fn try_get_amount(row: &PgRow, col: &str) -> Result<u64, sqlx::Error> {
    let amount_i64: i64 = row.try_get(col)?;

    u64::try_from(amount_i64).map_err(|e| sqlx::Error::ColumnDecode {
        index: col.to_string(),
        source: Box::new(e),
    })
}

impl<'r> FromRow<'r, PgRow> for CartRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        let Json(items) = row.try_get::<Json<Vec<StoredCartItem>>, _>("items")?;

        Ok(Self {
            uuid: CartUuid::from_uuid(row.try_get("uuid")?),
            user_uuid: UserUuid::from_uuid(row.try_get("user_uuid")?),
            items: items.into_iter().map(CartItemRecord::from).collect(),
            total_amount: try_get_amount(row, "total_amount")?,
            version: row.try_get("version")?,
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
            updated_at: row.try_get::<SqlxTimestamp, _>("updated_at")?.to_jiff(),
        })
    }
}
