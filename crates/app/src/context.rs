//! App Context

use std::sync::Arc;

use jiff::SignedDuration;
use thiserror::Error;
use tracing::info;

use crate::{
    auth::{AuthService, PgAuthService},
    database::{self, Db},
    domain::{
        carts::{CartsService, DefaultCartsService},
        categories::{CategoriesService, PgCategoriesService},
        products::{PgProductsService, ProductsService},
    },
};

#[derive(Debug, Error)]
pub enum AppInitError {
    #[error("failed to connect to database")]
    Database(#[source] sqlx::Error),

    #[error("failed to apply database migrations")]
    Migrations(#[source] sqlx::migrate::MigrateError),
}

/// Database settings used to build an [`AppContext`].
#[derive(Debug, Clone)]
pub struct DatabaseOptions {
    pub url: String,
    pub max_connections: u32,
    pub run_migrations: bool,
}

#[derive(Clone)]
pub struct AppContext {
    pub auth: Arc<dyn AuthService>,
    pub categories: Arc<dyn CategoriesService>,
    pub products: Arc<dyn ProductsService>,
    pub carts: Arc<dyn CartsService>,
}

impl AppContext {
    /// Build application context backed by PostgreSQL.
    ///
    /// `token_ttl` is the lifetime of session tokens; `None` issues tokens that never expire.
    ///
    /// # Errors
    ///
    /// Returns an error when establishing a database connection or migrating fails.
    pub async fn from_database(
        options: &DatabaseOptions,
        token_ttl: Option<SignedDuration>,
    ) -> Result<Self, AppInitError> {
        let pool = database::connect_with(&options.url, options.max_connections)
            .await
            .map_err(AppInitError::Database)?;

        if options.run_migrations {
            database::migrate(&pool)
                .await
                .map_err(AppInitError::Migrations)?;

            info!("database migrations applied");
        }

        Ok(Self::from_db(Db::new(pool), token_ttl))
    }

    /// Wire every service against an existing pool.
    #[must_use]
    pub fn from_db(db: Db, token_ttl: Option<SignedDuration>) -> Self {
        let products: Arc<dyn ProductsService> = Arc::new(PgProductsService::new(db.clone()));

        Self {
            auth: Arc::new(PgAuthService::new(db.clone()).with_token_ttl(token_ttl)),
            categories: Arc::new(PgCategoriesService::new(db.clone())),
            carts: Arc::new(DefaultCartsService::postgres(db, products.clone())),
            products,
        }
    }
}
