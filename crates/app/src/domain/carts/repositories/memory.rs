//! In-memory carts repository.

use std::collections::HashMap;

use async_trait::async_trait;
use jiff::Timestamp;
use tokio::sync::RwLock;

use crate::domain::{
    carts::{
        records::CartRecord,
        repositories::{CartsRepository, CartsRepositoryError},
    },
    users::UserUuid,
};

/// Process-local cart store with the same versioning rules as the PostgreSQL store.
#[derive(Debug, Default)]
pub struct InMemoryCartsRepository {
    carts: RwLock<HashMap<UserUuid, CartRecord>>,
}

impl InMemoryCartsRepository {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CartsRepository for InMemoryCartsRepository {
    async fn find_by_user(&self, user: UserUuid) -> Result<Option<CartRecord>, CartsRepositoryError> {
        Ok(self.carts.read().await.get(&user).cloned())
    }

    async fn save(&self, cart: &CartRecord) -> Result<CartRecord, CartsRepositoryError> {
        let mut carts = self.carts.write().await;
        let now = Timestamp::now();

        let saved = match carts.get(&cart.user_uuid) {
            Some(stored) if stored.version != cart.version => {
                return Err(CartsRepositoryError::VersionConflict);
            }
            Some(stored) => CartRecord {
                uuid: stored.uuid,
                user_uuid: stored.user_uuid,
                items: cart.items.clone(),
                total_amount: cart.total_amount,
                version: stored.version + 1,
                created_at: stored.created_at,
                updated_at: now,
            },
            None => CartRecord {
                items: cart.items.clone(),
                version: 1,
                created_at: now,
                updated_at: now,
                ..cart.clone()
            },
        };

        carts.insert(saved.user_uuid, saved.clone());

        Ok(saved)
    }
}
