//! Auth Errors

use salvo::http::StatusError;
use tracing::error;

use storefront_app::auth::AuthServiceError;

pub(crate) fn into_status_error(error: AuthServiceError) -> StatusError {
    match error {
        AuthServiceError::InvalidCredentials => {
            StatusError::unauthorized().brief("Invalid email or password")
        }
        AuthServiceError::NotFound => StatusError::unauthorized().brief("Invalid API token"),
        AuthServiceError::UserNotFound => StatusError::not_found().brief("User not found"),
        AuthServiceError::AlreadyExists => {
            StatusError::conflict().brief("An account with this email already exists")
        }
        AuthServiceError::InvalidEmail => {
            StatusError::bad_request().brief("Email address is invalid")
        }
        AuthServiceError::InvalidName => StatusError::bad_request().brief("Name must not be blank"),
        AuthServiceError::WeakPassword(reason) => {
            let mut message = reason.to_string();

            if let Some(first) = message.get_mut(..1) {
                first.make_ascii_uppercase();
            }

            StatusError::bad_request().brief(message)
        }
        error @ (AuthServiceError::InvalidExpiry
        | AuthServiceError::Password(_)
        | AuthServiceError::Sql(_)
        | AuthServiceError::Token(_)) => {
            error!("auth request failed: {error:?}");

            StatusError::internal_server_error().brief(error.to_string())
        }
    }
}
