//! Cart Repositories
//!
//! Carts are stored as whole documents keyed by their owner. Saving is a compare-and-swap
//! on the cart's `version`: a save succeeds only if the stored cart still carries the
//! version the caller loaded (or, for a cart with version `0`, if the user has no cart yet).

use async_trait::async_trait;
use mockall::automock;
use thiserror::Error;

use crate::domain::{carts::records::CartRecord, users::UserUuid};

mod memory;
mod postgres;

pub use memory::InMemoryCartsRepository;
pub use postgres::PgCartsRepository;

#[derive(Debug, Error)]
pub enum CartsRepositoryError {
    #[error("cart version is stale")]
    VersionConflict,

    #[error("storage error")]
    Sql(#[from] sqlx::Error),
}

#[automock]
#[async_trait]
pub trait CartsRepository: Send + Sync {
    /// Load the cart owned by `user`, if any.
    async fn find_by_user(&self, user: UserUuid) -> Result<Option<CartRecord>, CartsRepositoryError>;

    /// Persist `cart`, returning the stored copy with its new version and timestamps.
    async fn save(&self, cart: &CartRecord) -> Result<CartRecord, CartsRepositoryError>;
}
