//! Carts service.

use std::{num::NonZeroU32, sync::Arc};

use async_trait::async_trait;
use mockall::automock;
use tracing::{debug, info, warn};

use crate::{
    database::Db,
    domain::{
        carts::{
            data::{CartItemUpdate, NewCartItem},
            errors::CartsServiceError,
            models::ResolvedCart,
            records::CartRecord,
            repositories::{CartsRepository, CartsRepositoryError, PgCartsRepository},
        },
        products::{ProductsService, records::ProductUuid},
        users::UserUuid,
    },
};

/// How many times a mutation is re-applied after losing a version race.
pub const MAX_SAVE_ATTEMPTS: usize = 3;

/// Parse a quantity that must be a positive `u32`.
fn positive_quantity(quantity: i64) -> Result<NonZeroU32, CartsServiceError> {
    u32::try_from(quantity)
        .ok()
        .and_then(NonZeroU32::new)
        .ok_or(CartsServiceError::InvalidQuantity)
}

/// Parse an update quantity: anything at or below zero means "remove".
fn update_quantity(quantity: i64) -> Result<Option<NonZeroU32>, CartsServiceError> {
    if quantity <= 0 {
        return Ok(None);
    }

    positive_quantity(quantity).map(Some)
}

#[derive(Clone)]
pub struct DefaultCartsService {
    carts: Arc<dyn CartsRepository>,
    products: Arc<dyn ProductsService>,
}

impl DefaultCartsService {
    #[must_use]
    pub fn new(carts: Arc<dyn CartsRepository>, products: Arc<dyn ProductsService>) -> Self {
        Self { carts, products }
    }

    /// Service backed by the PostgreSQL cart store.
    #[must_use]
    pub fn postgres(db: Db, products: Arc<dyn ProductsService>) -> Self {
        Self::new(Arc::new(PgCartsRepository::new(db)), products)
    }

    /// Load the user's cart, apply `mutation` and save it, retrying on version conflicts.
    ///
    /// `mutation` returns `false` when it left the cart untouched, in which case nothing is
    /// written. Without `create_missing`, a user with no cart gets
    /// [`CartsServiceError::CartNotFound`].
    async fn mutate<F>(
        &self,
        user: UserUuid,
        create_missing: bool,
        mutation: F,
    ) -> Result<CartRecord, CartsServiceError>
    where
        F: Fn(&mut CartRecord) -> Result<bool, CartsServiceError> + Send + Sync,
    {
        for attempt in 1..=MAX_SAVE_ATTEMPTS {
            let mut cart = match self.carts.find_by_user(user).await? {
                Some(cart) => cart,
                None if create_missing => CartRecord::empty(user),
                None => return Err(CartsServiceError::CartNotFound),
            };

            if !mutation(&mut cart)? {
                debug!(user_uuid = %user, "cart unchanged, skipping save");

                return Ok(cart);
            }

            match self.carts.save(&cart).await {
                Ok(saved) => {
                    if !cart.is_persisted() {
                        info!(user_uuid = %user, cart_uuid = %saved.uuid, "created cart");
                    }

                    debug!(
                        user_uuid = %user,
                        cart_uuid = %saved.uuid,
                        version = saved.version,
                        attempt,
                        "cart saved"
                    );

                    return Ok(saved);
                }
                Err(CartsRepositoryError::VersionConflict) => {
                    warn!(user_uuid = %user, attempt, "cart version conflict");
                }
                Err(error) => return Err(error.into()),
            }
        }

        info!(
            user_uuid = %user,
            attempts = MAX_SAVE_ATTEMPTS,
            "giving up on contended cart"
        );

        Err(CartsServiceError::Conflict)
    }
}

#[async_trait]
impl CartsService for DefaultCartsService {
    async fn get_cart(&self, user: UserUuid) -> Result<ResolvedCart, CartsServiceError> {
        let Some(cart) = self.carts.find_by_user(user).await? else {
            return Ok(ResolvedCart::empty());
        };

        let products: Vec<ProductUuid> = cart.items.iter().map(|item| item.product_uuid).collect();

        let products = self
            .products
            .find_products(&products)
            .await
            .map_err(CartsServiceError::Products)?;

        Ok(ResolvedCart::resolve(cart, products))
    }

    async fn add_item(
        &self,
        user: UserUuid,
        item: NewCartItem,
    ) -> Result<CartRecord, CartsServiceError> {
        let quantity = positive_quantity(item.quantity)?;

        let product = self.products.get_product(item.product_uuid).await?;

        self.mutate(user, true, |cart| {
            cart.add_item(product.uuid, product.price, quantity)?;

            Ok(true)
        })
        .await
    }

    async fn update_item(
        &self,
        user: UserUuid,
        update: CartItemUpdate,
    ) -> Result<CartRecord, CartsServiceError> {
        self.mutate(user, false, |cart| {
            cart.update_item(update.product_uuid, update_quantity(update.quantity)?)?;

            Ok(true)
        })
        .await
    }

    async fn remove_item(
        &self,
        user: UserUuid,
        product: ProductUuid,
    ) -> Result<CartRecord, CartsServiceError> {
        self.mutate(user, false, |cart| Ok(cart.remove_item(product)?))
            .await
    }
}

#[automock]
#[async_trait]
pub trait CartsService: Send + Sync {
    /// Retrieve the user's cart with product data attached to each line. Users without a
    /// cart get an empty placeholder; nothing is persisted.
    async fn get_cart(&self, user: UserUuid) -> Result<ResolvedCart, CartsServiceError>;

    /// Add a product to the user's cart, creating the cart on first use.
    async fn add_item(
        &self,
        user: UserUuid,
        item: NewCartItem,
    ) -> Result<CartRecord, CartsServiceError>;

    /// Set the quantity of a line already in the cart.
    async fn update_item(
        &self,
        user: UserUuid,
        update: CartItemUpdate,
    ) -> Result<CartRecord, CartsServiceError>;

    /// Remove a product from the cart. Removing a product that is not in the cart is a no-op.
    async fn remove_item(
        &self,
        user: UserUuid,
        product: ProductUuid,
    ) -> Result<CartRecord, CartsServiceError>;
}
