use std::sync::Arc;

use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordVerifier},
};
use chrono::{Duration, Utc};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use thiserror::Error;
use tracing::{error, info, warn};

use crate::domain::repositories::users::UserRepository;
use crate::domain::value_objects::auth::{LoginModel, SessionClaims};

/// The two user-facing failure modes of sign-in. Anything that is not a
/// verified credential mismatch collapses into `Unexpected` so internals
/// stay opaque.
#[derive(Debug, Error, PartialEq)]
pub enum AuthError {
    #[error("Invalid credentials.")]
    InvalidCredentials,
    #[error("Something went wrong.")]
    Unexpected,
}

impl AuthError {
    pub fn status_code(&self) -> axum::http::StatusCode {
        use axum::http::StatusCode;
        match self {
            AuthError::InvalidCredentials => StatusCode::UNAUTHORIZED,
            AuthError::Unexpected => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

pub type UseCaseResult<T> = std::result::Result<T, AuthError>;

pub struct AuthUseCase<U>
where
    U: UserRepository + Send + Sync + 'static,
{
    user_repo: Arc<U>,
    jwt_secret: String,
    session_ttl_seconds: i64,
}

impl<U> AuthUseCase<U>
where
    U: UserRepository + Send + Sync + 'static,
{
    pub fn new(user_repo: Arc<U>, jwt_secret: String, session_ttl_seconds: i64) -> Self {
        Self {
            user_repo,
            jwt_secret,
            session_ttl_seconds,
        }
    }

    pub fn session_ttl_seconds(&self) -> i64 {
        self.session_ttl_seconds
    }

    /// Exchange credentials for a signed session token.
    pub async fn login(&self, login: LoginModel) -> UseCaseResult<String> {
        let user = self
            .user_repo
            .find_by_email(&login.email)
            .await
            .map_err(|err| {
                error!(db_error = ?err, "auth: failed to look up user");
                AuthError::Unexpected
            })?
            .ok_or_else(|| {
                warn!("auth: sign-in attempt for unknown email");
                AuthError::InvalidCredentials
            })?;

        let parsed_hash = PasswordHash::new(&user.password).map_err(|err| {
            error!(hash_error = ?err, "auth: stored password hash is malformed");
            AuthError::Unexpected
        })?;

        Argon2::default()
            .verify_password(login.password.as_bytes(), &parsed_hash)
            .map_err(|_| {
                warn!(%user.id, "auth: password mismatch");
                AuthError::InvalidCredentials
            })?;

        let expires_at = Utc::now() + Duration::seconds(self.session_ttl_seconds);
        let claims = SessionClaims {
            sub: user.id.to_string(),
            email: user.email,
            exp: expires_at.timestamp() as usize,
        };

        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.jwt_secret.as_bytes()),
        )
        .map_err(|err| {
            error!(jwt_error = ?err, "auth: failed to sign session token");
            AuthError::Unexpected
        })?;

        info!(%user.id, "auth: session issued");
        Ok(token)
    }
}

pub fn validate_session_token(token: &str, jwt_secret: &str) -> anyhow::Result<SessionClaims> {
    let decoding_key = DecodingKey::from_secret(jwt_secret.as_bytes());
    let validation = Validation::new(jsonwebtoken::Algorithm::HS256);

    let token_data = decode::<SessionClaims>(token, &decoding_key, &validation)
        .map_err(|e| anyhow::anyhow!("session token validation failed: {}", e))?;

    Ok(token_data.claims)
}
