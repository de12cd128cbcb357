use sqlx::{Sqlite, SqlitePool};

use crate::models::User;

mod article_helpers;
mod stats_helpers;
mod user_helpers;

pub use article_helpers::*;
pub use stats_helpers::*;
pub use user_helpers::*;

const USER_COLUMNS: &str =
    "id, username, email, password_hash, is_admin, is_active, created_at, updated_at";

// ----------------- Shared Lookups -----------------

pub async fn get_user_by_username(
    pool: &SqlitePool,
    username: &str,
) -> Result<Option<User>, sqlx::Error> {
    let query = format!("SELECT {} FROM users WHERE username = $1", USER_COLUMNS);
    sqlx::query_as::<Sqlite, User>(&query)
        .bind(username)
        .fetch_optional(pool)
        .await
}
