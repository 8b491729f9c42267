//! Delete Category Handler

use std::sync::Arc;

use salvo::{oapi::extract::PathParam, prelude::*};
use tracing::info;
use uuid::Uuid;

use crate::{categories::errors::into_status_error, extensions::*, state::State};

/// Delete Category Handler
///
/// Soft-deletes a category. Categories still referenced by live products are kept.
#[endpoint(
    tags("categories"),
    summary = "Delete Category",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Category deleted"),
        (status_code = StatusCode::NOT_FOUND, description = "Category not found"),
        (status_code = StatusCode::CONFLICT, description = "Category still has products"),
        (status_code = StatusCode::FORBIDDEN, description = "Admin access required"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    category: PathParam<Uuid>,
    depot: &mut Depot,
) -> Result<StatusCode, StatusError> {
    let principal = depot.admin_or_403()?;
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let category = category.into_inner();

    state
        .app
        .categories
        .delete_category(category.into())
        .await
        .map_err(into_status_error)?;

    info!(category_uuid = %category, user_uuid = %principal.user_uuid, "deleted category");

    Ok(StatusCode::OK)
}
