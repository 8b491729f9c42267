//! Uniform JSON error bodies.

use salvo::{
    catcher::Catcher,
    http::{ResBody, StatusCode},
    oapi::ToSchema,
    prelude::*,
};
use serde::{Deserialize, Serialize};

/// Body of every error response.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct ErrorResponse {
    /// Human-readable description of the failure
    pub message: String,
}

/// Catcher hoop that rewrites error responses into [`ErrorResponse`] JSON.
///
/// The message is the `StatusError` brief when a handler supplied one, otherwise the
/// canonical reason phrase for the status code.
#[handler]
pub(crate) async fn json_errors(res: &mut Response, ctrl: &mut FlowCtrl) {
    let status = res.status_code.unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

    if !status.is_client_error() && !status.is_server_error() {
        return;
    }

    let message = match res.take_body() {
        ResBody::Error(error) if !error.brief.is_empty() => error.brief,
        _ => canonical_message(status),
    };

    res.status_code(status);
    res.render(Json(ErrorResponse { message }));

    ctrl.skip_rest();
}

/// The catcher installed on every [`Service`].
pub(crate) fn catcher() -> Catcher {
    Catcher::default().hoop(json_errors)
}

fn canonical_message(status: StatusCode) -> String {
    status
        .canonical_reason()
        .map_or_else(|| status.as_str().to_owned(), str::to_owned)
}
