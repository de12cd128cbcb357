use chrono::Utc;
use sqlx::{Sqlite, SqlitePool};

use crate::errors::RequestError;
use crate::models::User;

use super::USER_COLUMNS;

/// Creates a user, enforcing username/email uniqueness and the bootstrap
/// rule: the very first user row ever inserted gets `is_admin = true`. The
/// count and the insert run in one transaction so two racing first
/// registrations cannot both claim admin.
pub async fn insert_user(
    pool: &SqlitePool,
    username: &str,
    email: &str,
    password_hash: &str,
) -> Result<User, RequestError> {
    let mut tx = pool.begin().await?;

    let username_taken = sqlx::query_scalar::<Sqlite, i64>(
        "SELECT EXISTS (SELECT 1 FROM users WHERE username = $1)",
    )
    .bind(username)
    .fetch_one(&mut tx)
    .await?;
    if username_taken != 0 {
        return Err(RequestError::DuplicateUsername);
    }

    let email_taken =
        sqlx::query_scalar::<Sqlite, i64>("SELECT EXISTS (SELECT 1 FROM users WHERE email = $1)")
            .bind(email)
            .fetch_one(&mut tx)
            .await?;
    if email_taken != 0 {
        return Err(RequestError::DuplicateEmail);
    }

    let user_count = sqlx::query_scalar::<Sqlite, i64>("SELECT COUNT(*) FROM users")
        .fetch_one(&mut tx)
        .await?;
    let is_admin = user_count == 0;

    let now = Utc::now().naive_utc();
    let query = format!(
        "INSERT INTO users (username, email, password_hash, is_admin, is_active, created_at, updated_at)
         VALUES ($1, $2, $3, $4, TRUE, $5, $5)
         RETURNING {}",
        USER_COLUMNS
    );
    let user = sqlx::query_as::<Sqlite, User>(&query)
        .bind(username)
        .bind(email)
        .bind(password_hash)
        .bind(is_admin)
        .bind(now)
        .fetch_one(&mut tx)
        .await?;

    tx.commit().await?;
    Ok(user)
}

pub async fn list_users(pool: &SqlitePool) -> Result<Vec<User>, RequestError> {
    let query = format!("SELECT {} FROM users ORDER BY created_at DESC", USER_COLUMNS);
    let users = sqlx::query_as::<Sqlite, User>(&query)
        .fetch_all(pool)
        .await?;
    Ok(users)
}
