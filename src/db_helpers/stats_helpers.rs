use sqlx::{Sqlite, SqlitePool};

use crate::data_formats::StatsResponse;
use crate::errors::RequestError;
use crate::models::ArticleStatus;

async fn count_articles_with_status(
    pool: &SqlitePool,
    status: ArticleStatus,
) -> Result<i64, sqlx::Error> {
    sqlx::query_scalar::<Sqlite, i64>("SELECT COUNT(*) FROM articles WHERE status = $1")
        .bind(status)
        .fetch_one(pool)
        .await
}

/// Read-only dashboard aggregation. No side effects, no counters touched.
pub async fn get_dashboard_stats(pool: &SqlitePool) -> Result<StatsResponse, RequestError> {
    let total_articles = sqlx::query_scalar::<Sqlite, i64>("SELECT COUNT(*) FROM articles")
        .fetch_one(pool)
        .await?;
    let published_articles = count_articles_with_status(pool, ArticleStatus::Published).await?;
    let draft_articles = count_articles_with_status(pool, ArticleStatus::Draft).await?;

    let total_views =
        sqlx::query_scalar::<Sqlite, i64>("SELECT COALESCE(SUM(views), 0) FROM articles")
            .fetch_one(pool)
            .await?;
    let total_likes =
        sqlx::query_scalar::<Sqlite, i64>("SELECT COALESCE(SUM(likes), 0) FROM articles")
            .fetch_one(pool)
            .await?;
    let total_comments = sqlx::query_scalar::<Sqlite, i64>("SELECT COUNT(*) FROM comments")
        .fetch_one(pool)
        .await?;

    Ok(StatsResponse {
        total_articles,
        published_articles,
        draft_articles,
        total_views,
        total_likes,
        total_comments,
    })
}
