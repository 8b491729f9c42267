//! Auth request and response bodies.

use salvo::oapi::ToSchema;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use storefront_app::{auth::Session, domain::users::UserRecord};

/// Public view of a user account.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct UserResponse {
    pub uuid: Uuid,
    pub email: String,
    pub name: String,
    /// `customer` or `admin`
    pub role: String,
    /// RFC 3339 timestamp
    pub created_at: String,
}

impl From<UserRecord> for UserResponse {
    fn from(user: UserRecord) -> Self {
        Self {
            uuid: user.uuid.into_uuid(),
            email: user.email,
            name: user.name,
            role: user.role.to_string(),
            created_at: user.created_at.to_string(),
        }
    }
}

/// A freshly issued bearer token and its owner.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct SessionResponse {
    /// Bearer token, shown only once
    pub token: String,
    /// RFC 3339 expiry, absent for tokens that never expire
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub expires_at: Option<String>,
    pub user: UserResponse,
}

impl From<Session> for SessionResponse {
    fn from(session: Session) -> Self {
        Self {
            token: session.token.token,
            expires_at: session
                .token
                .metadata
                .expires_at
                .map(|expires_at| expires_at.to_string()),
            user: session.user.into(),
        }
    }
}
