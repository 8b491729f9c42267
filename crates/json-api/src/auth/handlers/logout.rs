//! Logout Handler

use std::sync::Arc;

use salvo::prelude::*;
use tracing::info;

use crate::{auth::into_status_error, extensions::*, state::State};

/// Logout Handler
///
/// Revokes the bearer token presented with this request.
#[endpoint(
    tags("auth"),
    summary = "Logout",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::NO_CONTENT, description = "Token revoked"),
        (status_code = StatusCode::UNAUTHORIZED, description = "Unauthorized"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(depot: &mut Depot, res: &mut Response) -> Result<(), StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let principal = depot.principal_or_401()?;

    let revoked = state
        .app
        .auth
        .revoke_api_token(principal.token_uuid)
        .await
        .map_err(into_status_error)?;

    info!(user_uuid = %principal.user_uuid, token_uuid = %principal.token_uuid, revoked, "logged out");

    res.status_code(StatusCode::NO_CONTENT);

    Ok(())
}
