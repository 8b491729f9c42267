//! Current User Handler

use std::sync::Arc;

use salvo::prelude::*;

use crate::{
    auth::{UserResponse, into_status_error},
    extensions::*,
    state::State,
};

/// Current User Handler
#[endpoint(
    tags("auth"),
    summary = "Current User",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Authenticated user"),
        (status_code = StatusCode::UNAUTHORIZED, description = "Unauthorized"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(depot: &mut Depot) -> Result<Json<UserResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let principal = depot.principal_or_401()?;

    let user = state
        .app
        .auth
        .get_user(principal.user_uuid)
        .await
        .map_err(into_status_error)?;

    Ok(Json(user.into()))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use storefront_app::{auth::MockAuthService, domain::users::UserRole};
    use testresult::TestResult;

    use crate::test_helpers::{Mocks, TEST_USER_UUID, customer_service, make_user};

    use super::*;

    #[tokio::test]
    async fn test_me_returns_authenticated_user() -> TestResult {
        let mut auth = MockAuthService::new();

        auth.expect_get_user()
            .once()
            .withf(|user| *user == TEST_USER_UUID)
            .return_once(|_| Ok(make_user(UserRole::Customer)));

        let service = customer_service(
            Mocks {
                auth,
                ..Mocks::default()
            },
            Router::with_path("auth/me").get(handler),
        );

        let mut res = TestClient::get("http://example.com/auth/me")
            .send(&service)
            .await;

        let body: UserResponse = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::OK));
        assert_eq!(body.email, "shopper@example.com");
        assert_eq!(body.created_at, "1970-01-01T00:00:00Z");

        Ok(())
    }
}
