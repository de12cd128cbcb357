use crate::db_helpers::get_user_by_username;
use crate::errors::RequestError;
use crate::models::User;
use anyhow::{Context, Result};
use argon2::PasswordVerifier;
use argon2::{password_hash::SaltString, Argon2, PasswordHash};
use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;
use time::OffsetDateTime;

pub const DEFAULT_TOKEN_TTL: time::Duration = time::Duration::minutes(30);

#[derive(Debug, Serialize, Deserialize)]
struct AuthClaim {
    sub: String,
    exp: i64,
}

/// Identity proven by a bearer token. Carries only what the token encodes;
/// the matching user row is loaded by [`resolve_user`].
pub struct AuthUser {
    pub username: String,
    pub token: String,
}

#[axum::async_trait]
impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync + 'static,
{
    type Rejection = RequestError;
    async fn from_request_parts(
        parts: &mut Parts,
        _: &S,
    ) -> std::result::Result<Self, Self::Rejection> {
        let header = match parts.headers.get("Authorization") {
            Some(header) => header,
            None => return Err(RequestError::Unauthorized),
        };
        let header = header.to_str().map_err(|_| RequestError::TokenInvalid)?;
        let token = header
            .strip_prefix("Bearer ")
            .ok_or(RequestError::TokenInvalid)?;

        let username = verify_token(token)?;

        Ok(AuthUser {
            username,
            token: token.to_string(),
        })
    }
}

/// Configured token lifetime, `TOKEN_TTL_MINUTES` overriding the default.
pub fn token_ttl() -> time::Duration {
    std::env::var("TOKEN_TTL_MINUTES")
        .ok()
        .and_then(|v| v.parse::<i64>().ok())
        .map(time::Duration::minutes)
        .unwrap_or(DEFAULT_TOKEN_TTL)
}

pub fn issue_token(subject: &str, ttl: time::Duration) -> Result<String> {
    let jwt_secret = std::env::var("JWT_SECRET").context("Failed to get JWT_SECRET")?;
    let expiry_date = OffsetDateTime::now_utc() + ttl;
    let claim = AuthClaim {
        sub: subject.to_string(),
        exp: expiry_date.unix_timestamp(),
    };

    jsonwebtoken::encode(
        &jsonwebtoken::Header::default(),
        &claim,
        &jsonwebtoken::EncodingKey::from_secret(jwt_secret.as_ref()),
    )
    .context("Failed to sign token")
}

/// Stateless verification: signature plus expiry, no server-side state, no
/// revocation. Wall-clock time of the verifying node, zero leeway.
pub fn verify_token(token: &str) -> Result<String, RequestError> {
    let jwt_secret = std::env::var("JWT_SECRET").map_err(|_| RequestError::ServerError)?;
    let mut validation = jsonwebtoken::Validation::default();
    validation.leeway = 0;
    let token_data = jsonwebtoken::decode::<AuthClaim>(
        token,
        &jsonwebtoken::DecodingKey::from_secret(jwt_secret.as_ref()),
        &validation,
    )
    .map_err(|e| match e.kind() {
        jsonwebtoken::errors::ErrorKind::ExpiredSignature => RequestError::TokenExpired,
        _ => RequestError::TokenInvalid,
    })?;
    Ok(token_data.claims.sub)
}

/// Resolves a verified token into a live user row. A token whose subject no
/// longer exists or has been deactivated is rejected even before its expiry.
pub async fn resolve_user(pool: &SqlitePool, auth: &AuthUser) -> Result<User, RequestError> {
    let user = get_user_by_username(pool, &auth.username).await?;
    match user {
        Some(user) if user.is_active => Ok(user),
        _ => Err(RequestError::Unauthorized),
    }
}

pub fn require_admin(user: &User) -> Result<(), RequestError> {
    if user.is_admin {
        Ok(())
    } else {
        Err(RequestError::Forbidden)
    }
}

pub async fn verify_password(password: String, hash: String) -> Result<bool, RequestError> {
    tokio::task::spawn_blocking(move || {
        let hash =
            PasswordHash::new(hash.as_str()).map_err(|_| RequestError::InvalidCredentialFormat)?;
        Ok(Argon2::default()
            .verify_password(password.as_bytes(), &hash)
            .is_ok())
    })
    .await
    .map_err(|_| RequestError::ServerError)?
}

pub async fn hash_password(password: String) -> Result<String, RequestError> {
    tokio::task::spawn_blocking(move || {
        let salt = SaltString::generate(rand::thread_rng());
        let hash = PasswordHash::generate(Argon2::default(), password, salt.as_salt())
            .map_err(|_| RequestError::ServerError)?;
        Ok(hash.to_string())
    })
    .await
    .map_err(|_| RequestError::ServerError)?
}
