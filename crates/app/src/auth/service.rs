//! Auth service.

use async_trait::async_trait;
use jiff::{SignedDuration, Timestamp};
use mockall::automock;
use tracing::{info, warn};
use uuid::Uuid;

use crate::{
    auth::{
        ApiTokenMetadata, ApiTokenVersion, AuthServiceError, Credentials, IssuedApiToken,
        NewApiToken, Principal, Registration, Session, build_verifier_input, format_api_token,
        generate_api_token_secret, hash_password, hash_verifier_input, is_plausible_email,
        normalize_email, parse_api_token, repository::PgAuthRepository, validate_password,
        verifier_hash_matches, verify_password, verify_password_without_account,
    },
    database::Db,
    domain::users::{
        UserRecord, UserUuid,
        data::NewUser,
        repository::PgUsersRepository,
    },
};

/// Default lifetime of tokens issued at registration and login.
pub const DEFAULT_TOKEN_TTL: SignedDuration = SignedDuration::from_hours(24 * 30);

#[derive(Debug, Clone)]
pub struct PgAuthService {
    db: Db,
    tokens: PgAuthRepository,
    users: PgUsersRepository,
    token_ttl: Option<SignedDuration>,
}

impl PgAuthService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            tokens: PgAuthRepository::new(),
            users: PgUsersRepository::new(),
            token_ttl: Some(DEFAULT_TOKEN_TTL),
        }
    }

    /// Override the lifetime of session tokens. `None` issues tokens that never expire.
    #[must_use]
    pub fn with_token_ttl(mut self, token_ttl: Option<SignedDuration>) -> Self {
        self.token_ttl = token_ttl;
        self
    }

    /// Issue a new API token for the given user.
    ///
    /// # Errors
    ///
    /// Returns an error if database insertion fails or the user does not exist.
    pub async fn issue_api_token(
        &self,
        user_uuid: UserUuid,
        expires_at: Option<Timestamp>,
    ) -> Result<IssuedApiToken, AuthServiceError> {
        let mut tx = self.db.begin().await?;

        self.users
            .get_user(&mut tx, user_uuid)
            .await
            .map_err(|error| match error {
                sqlx::Error::RowNotFound => AuthServiceError::UserNotFound,
                other => AuthServiceError::from(other),
            })?;

        let issued = self.insert_token(&mut tx, user_uuid, expires_at).await?;

        tx.commit().await?;

        Ok(issued)
    }

    /// List all tokens for the given user.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list_api_tokens(
        &self,
        user_uuid: UserUuid,
    ) -> Result<Vec<ApiTokenMetadata>, AuthServiceError> {
        let mut tx = self.db.begin().await?;

        let tokens = self.tokens.list_api_tokens_by_user(&mut tx, user_uuid).await?;

        tx.commit().await?;

        Ok(tokens)
    }

    fn session_expiry(&self) -> Result<Option<Timestamp>, AuthServiceError> {
        self.token_ttl
            .map(|ttl| {
                Timestamp::now()
                    .checked_add(ttl)
                    .map_err(|_ignored| AuthServiceError::InvalidExpiry)
            })
            .transpose()
    }

    async fn insert_token(
        &self,
        tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
        user_uuid: UserUuid,
        expires_at: Option<Timestamp>,
    ) -> Result<IssuedApiToken, AuthServiceError> {
        let token_uuid = Uuid::now_v7();
        let version = ApiTokenVersion::V1;
        let secret = generate_api_token_secret();
        let token = format_api_token(token_uuid, version, &secret);

        let token_hash =
            hash_verifier_input(&build_verifier_input(&token_uuid, version, &user_uuid, &secret));

        let metadata = self
            .tokens
            .create_api_token(
                tx,
                &NewApiToken {
                    uuid: token_uuid,
                    user_uuid,
                    version,
                    token_hash,
                    expires_at,
                },
            )
            .await?;

        Ok(IssuedApiToken { token, metadata })
    }
}

#[async_trait]
impl AuthService for PgAuthService {
    async fn authenticate_bearer(&self, bearer_token: &str) -> Result<Principal, AuthServiceError> {
        let parsed_token = parse_api_token(bearer_token).map_err(|_ignored| AuthServiceError::NotFound)?;

        let mut tx = self.db.begin().await?;

        let token = self
            .tokens
            .find_active_api_token_by_uuid(&mut tx, parsed_token.token_uuid, parsed_token.version)
            .await?
            .ok_or(AuthServiceError::NotFound)?;

        if token.version != parsed_token.version {
            return Err(AuthServiceError::NotFound);
        }

        let verifier_input = build_verifier_input(
            &parsed_token.token_uuid,
            parsed_token.version,
            &token.user_uuid,
            &parsed_token.secret,
        );

        if !verifier_hash_matches(&hash_verifier_input(&verifier_input), &token.token_hash) {
            return Err(AuthServiceError::NotFound);
        }

        // Best-effort metadata update; auth success should not depend on this write.
        if let Err(source) = self
            .tokens
            .touch_api_token_last_used(&mut tx, parsed_token.token_uuid)
            .await
        {
            warn!("failed to record api token use: {source}");
        }

        tx.commit().await?;

        Ok(Principal {
            user_uuid: token.user_uuid,
            role: token.role,
            token_uuid: parsed_token.token_uuid,
        })
    }

    async fn register(&self, registration: Registration) -> Result<Session, AuthServiceError> {
        let email = normalize_email(&registration.email);

        if !is_plausible_email(&email) {
            return Err(AuthServiceError::InvalidEmail);
        }

        let name = registration.name.trim();

        if name.is_empty() {
            return Err(AuthServiceError::InvalidName);
        }

        validate_password(&registration.password).map_err(AuthServiceError::WeakPassword)?;

        let password_hash =
            hash_password(&registration.password).map_err(AuthServiceError::Password)?;

        let expires_at = self.session_expiry()?;

        let mut tx = self.db.begin().await?;

        let user = self
            .users
            .create_user(
                &mut tx,
                &NewUser {
                    uuid: UserUuid::new(),
                    email,
                    name: name.to_string(),
                    password_hash,
                    role: registration.role,
                },
            )
            .await?;

        let token = self.insert_token(&mut tx, user.uuid, expires_at).await?;

        tx.commit().await?;

        info!(user_uuid = %user.uuid, role = %user.role, "registered user");

        Ok(Session { user, token })
    }

    async fn login(&self, credentials: Credentials) -> Result<Session, AuthServiceError> {
        let email = normalize_email(&credentials.email);
        let expires_at = self.session_expiry()?;

        let mut tx = self.db.begin().await?;

        let Some(stored) = self.users.find_credentials_by_email(&mut tx, &email).await? else {
            verify_password_without_account(&credentials.password);

            return Err(AuthServiceError::InvalidCredentials);
        };

        verify_password(&credentials.password, &stored.password_hash)
            .map_err(|_ignored| AuthServiceError::InvalidCredentials)?;

        let token = self.insert_token(&mut tx, stored.user.uuid, expires_at).await?;

        tx.commit().await?;

        Ok(Session {
            user: stored.user,
            token,
        })
    }

    async fn get_user(&self, user: UserUuid) -> Result<UserRecord, AuthServiceError> {
        let mut tx = self.db.begin().await?;

        let user = self
            .users
            .get_user(&mut tx, user)
            .await
            .map_err(|error| match error {
                sqlx::Error::RowNotFound => AuthServiceError::UserNotFound,
                other => AuthServiceError::from(other),
            })?;

        tx.commit().await?;

        Ok(user)
    }

    async fn revoke_api_token(&self, token_uuid: Uuid) -> Result<bool, AuthServiceError> {
        let mut tx = self.db.begin().await?;

        let revoked = self
            .tokens
            .revoke_api_token(&mut tx, token_uuid)
            .await?
            .is_some();

        tx.commit().await?;

        Ok(revoked)
    }
}

#[automock]
#[async_trait]
pub trait AuthService: Send + Sync {
    /// Resolve a raw bearer token into the identity it was issued to.
    async fn authenticate_bearer(&self, bearer_token: &str) -> Result<Principal, AuthServiceError>;

    /// Create an account and sign it in.
    async fn register(&self, registration: Registration) -> Result<Session, AuthServiceError>;

    /// Verify credentials and issue a fresh session token.
    async fn login(&self, credentials: Credentials) -> Result<Session, AuthServiceError>;

    /// Retrieve a single user.
    async fn get_user(&self, user: UserUuid) -> Result<UserRecord, AuthServiceError>;

    /// Revoke a token by UUID. Returns `true` if the token was active.
    async fn revoke_api_token(&self, token_uuid: Uuid) -> Result<bool, AuthServiceError>;
}
