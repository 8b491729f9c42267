//! Test helpers.

use std::sync::Arc;

use jiff::Timestamp;
use salvo::{affix_state::inject, prelude::*};
use uuid::Uuid;

use storefront_app::{
    auth::{ApiTokenMetadata, ApiTokenVersion, IssuedApiToken, MockAuthService, Principal, Session},
    context::AppContext,
    domain::{
        carts::MockCartsService,
        categories::{
            MockCategoriesService,
            records::{CategoryRecord, CategoryUuid},
        },
        products::{
            MockProductsService,
            records::{ProductRecord, ProductUuid},
        },
        users::{UserRecord, UserRole, UserUuid},
    },
};

use crate::{errors::catcher, extensions::*, state::State};

pub(crate) const TEST_USER_UUID: UserUuid = UserUuid::from_uuid(Uuid::nil());

pub(crate) fn test_principal(role: UserRole) -> Principal {
    Principal {
        user_uuid: TEST_USER_UUID,
        role,
        token_uuid: Uuid::nil(),
    }
}

#[salvo::handler]
pub(crate) async fn inject_customer(
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
    ctrl: &mut FlowCtrl,
) {
    depot.insert_principal(test_principal(UserRole::Customer));
    ctrl.call_next(req, depot, res).await;
}

#[salvo::handler]
pub(crate) async fn inject_admin(
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
    ctrl: &mut FlowCtrl,
) {
    depot.insert_principal(test_principal(UserRole::Admin));
    ctrl.call_next(req, depot, res).await;
}

/// Mocks that fail the test on any unexpected call.
#[derive(Default)]
pub(crate) struct Mocks {
    pub(crate) auth: MockAuthService,
    pub(crate) categories: MockCategoriesService,
    pub(crate) products: MockProductsService,
    pub(crate) carts: MockCartsService,
}

impl Mocks {
    pub(crate) fn state(self) -> Arc<State> {
        State::from_app_context(AppContext {
            auth: Arc::new(self.auth),
            categories: Arc::new(self.categories),
            products: Arc::new(self.products),
            carts: Arc::new(self.carts),
        })
    }
}

pub(crate) fn public_service(mocks: Mocks, route: Router) -> Service {
    Service::new(Router::new().hoop(inject(mocks.state())).push(route)).catcher(catcher())
}

pub(crate) fn customer_service(mocks: Mocks, route: Router) -> Service {
    Service::new(
        Router::new()
            .hoop(inject(mocks.state()))
            .hoop(inject_customer)
            .push(route),
    )
    .catcher(catcher())
}

pub(crate) fn admin_service(mocks: Mocks, route: Router) -> Service {
    Service::new(
        Router::new()
            .hoop(inject(mocks.state()))
            .hoop(inject_admin)
            .push(route),
    )
    .catcher(catcher())
}

pub(crate) fn make_category(uuid: CategoryUuid) -> CategoryRecord {
    CategoryRecord {
        uuid,
        name: "Books".to_string(),
        description: None,
        created_at: Timestamp::UNIX_EPOCH,
        updated_at: Timestamp::UNIX_EPOCH,
        deleted_at: None,
    }
}

pub(crate) fn make_product(uuid: ProductUuid) -> ProductRecord {
    ProductRecord {
        uuid,
        category_uuid: None,
        name: "Notebook".to_string(),
        description: None,
        price: 1_000,
        created_at: Timestamp::UNIX_EPOCH,
        updated_at: Timestamp::UNIX_EPOCH,
        deleted_at: None,
    }
}

pub(crate) fn make_user(role: UserRole) -> UserRecord {
    UserRecord {
        uuid: TEST_USER_UUID,
        email: "shopper@example.com".to_string(),
        name: "Shopper".to_string(),
        role,
        created_at: Timestamp::UNIX_EPOCH,
        updated_at: Timestamp::UNIX_EPOCH,
    }
}

pub(crate) fn make_session(token: &str) -> Session {
    Session {
        user: make_user(UserRole::Customer),
        token: IssuedApiToken {
            token: token.to_string(),
            metadata: ApiTokenMetadata {
                uuid: Uuid::nil(),
                user_uuid: TEST_USER_UUID,
                version: ApiTokenVersion::V1,
                created_at: Timestamp::UNIX_EPOCH,
                last_used_at: None,
                expires_at: None,
                revoked_at: None,
            },
        },
    }
}
