//! User Data

use crate::domain::users::records::{UserRecord, UserRole, UserUuid};

/// New User Data
#[derive(Debug, Clone)]
pub(crate) struct NewUser {
    pub uuid: UserUuid,
    pub email: String,
    pub name: String,
    pub password_hash: String,
    pub role: UserRole,
}

/// A user together with their stored password hash.
#[derive(Debug, Clone)]
pub(crate) struct UserCredentials {
    pub user: UserRecord,
    pub password_hash: String,
}
