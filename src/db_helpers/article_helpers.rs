use chrono::Utc;
use sqlx::{Sqlite, SqlitePool};

use crate::data_formats::{
    clamp_limit, AdminArticleQuery, CreateArticleRequest, PublicArticleQuery, UpdateArticleRequest,
};
use crate::errors::RequestError;
use crate::models::{Article, ArticleStatus};

const ARTICLE_COLUMNS: &str = "id, title, content, excerpt, category, status, image, views, \
                               likes, author_id, created_at, updated_at, published_at";

pub async fn insert_article(
    pool: &SqlitePool,
    request: &CreateArticleRequest,
    author_id: i64,
) -> Result<Article, RequestError> {
    let now = Utc::now().naive_utc();
    // Created directly as published -> stamped at creation time.
    let published_at = match request.status {
        ArticleStatus::Published => Some(now),
        _ => None,
    };
    let query = format!(
        "INSERT INTO articles
            (title, content, excerpt, category, status, image, views, likes,
             author_id, created_at, updated_at, published_at)
         VALUES ($1, $2, $3, $4, $5, $6, 0, 0, $7, $8, $8, $9)
         RETURNING {}",
        ARTICLE_COLUMNS
    );
    let article = sqlx::query_as::<Sqlite, Article>(&query)
        .bind(&request.title)
        .bind(&request.content)
        .bind(&request.excerpt)
        .bind(&request.category)
        .bind(request.status)
        .bind(&request.image)
        .bind(author_id)
        .bind(now)
        .bind(published_at)
        .fetch_one(pool)
        .await?;
    Ok(article)
}

/// Public fetch-by-id. The read is deliberately not pure: each successful
/// fetch of a published article bumps its view counter by one, in the same
/// statement that filters on status, so the increment is atomic and a
/// draft/offline/missing article is uniformly `NotFound`.
pub async fn fetch_published_article(
    pool: &SqlitePool,
    article_id: i64,
) -> Result<Article, RequestError> {
    let query = format!(
        "UPDATE articles SET views = views + 1
         WHERE id = $1 AND status = $2
         RETURNING {}",
        ARTICLE_COLUMNS
    );
    let article = sqlx::query_as::<Sqlite, Article>(&query)
        .bind(article_id)
        .bind(ArticleStatus::Published)
        .fetch_optional(pool)
        .await?;
    article.ok_or(RequestError::NotFound)
}

/// Partial update. Omitted fields keep their stored values, an explicit
/// `null` clears the nullable ones; `published_at` is stamped iff this
/// update moves a never-published article to published, and is never touched
/// again afterwards. The read-merge-write runs in one transaction.
pub async fn update_article_in_db(
    pool: &SqlitePool,
    article_id: i64,
    update: UpdateArticleRequest,
) -> Result<Article, RequestError> {
    let mut tx = pool.begin().await?;

    let select = format!("SELECT {} FROM articles WHERE id = $1", ARTICLE_COLUMNS);
    let current = sqlx::query_as::<Sqlite, Article>(&select)
        .bind(article_id)
        .fetch_optional(&mut tx)
        .await?
        .ok_or(RequestError::NotFound)?;

    let now = Utc::now().naive_utc();
    let status = update.status.unwrap_or(current.status);
    let published_at = match (update.status, current.status, current.published_at) {
        (Some(ArticleStatus::Published), prior, None) if prior != ArticleStatus::Published => {
            Some(now)
        }
        _ => current.published_at,
    };

    let query = format!(
        "UPDATE articles
         SET title = $1, content = $2, excerpt = $3, category = $4, status = $5,
             image = $6, updated_at = $7, published_at = $8
         WHERE id = $9
         RETURNING {}",
        ARTICLE_COLUMNS
    );
    let article = sqlx::query_as::<Sqlite, Article>(&query)
        .bind(update.title.unwrap_or(current.title))
        .bind(update.content.unwrap_or(current.content))
        .bind(update.excerpt.unwrap_or(current.excerpt))
        .bind(update.category.unwrap_or(current.category))
        .bind(status)
        .bind(update.image.unwrap_or(current.image))
        .bind(now)
        .bind(published_at)
        .bind(article_id)
        .fetch_one(&mut tx)
        .await?;

    tx.commit().await?;
    Ok(article)
}

/// Hard delete, dependent comments first.
pub async fn delete_article_in_db(
    pool: &SqlitePool,
    article_id: i64,
) -> Result<(), RequestError> {
    let mut tx = pool.begin().await?;

    sqlx::query("DELETE FROM comments WHERE article_id = $1")
        .bind(article_id)
        .execute(&mut tx)
        .await?;

    let result = sqlx::query("DELETE FROM articles WHERE id = $1")
        .bind(article_id)
        .execute(&mut tx)
        .await?;
    if result.rows_affected() == 0 {
        return Err(RequestError::NotFound);
    }

    tx.commit().await?;
    Ok(())
}

/// Increments the like counter and returns the new count. Intentionally no
/// per-caller deduplication.
pub async fn like_article_in_db(
    pool: &SqlitePool,
    article_id: i64,
) -> Result<i64, RequestError> {
    let likes = sqlx::query_scalar::<Sqlite, i64>(
        "UPDATE articles SET likes = likes + 1 WHERE id = $1 RETURNING likes",
    )
    .bind(article_id)
    .fetch_optional(pool)
    .await?;
    likes.ok_or(RequestError::NotFound)
}

pub async fn list_published_articles(
    pool: &SqlitePool,
    PublicArticleQuery {
        skip,
        limit,
        category,
        search,
    }: PublicArticleQuery,
) -> Result<Vec<Article>, RequestError> {
    let search = search.map(|s| format!("%{}%", s));
    let query = format!(
        "SELECT {} FROM articles
         WHERE status = $1
           AND ( category = $2 OR $2 IS NULL )
           AND ( title LIKE $3 OR $3 IS NULL )
         ORDER BY published_at DESC
         LIMIT $4 OFFSET $5",
        ARTICLE_COLUMNS
    );
    let articles = sqlx::query_as::<Sqlite, Article>(&query)
        .bind(ArticleStatus::Published)
        .bind(category)
        .bind(search)
        .bind(clamp_limit(limit) as i64)
        .bind(skip as i64)
        .fetch_all(pool)
        .await?;
    Ok(articles)
}

pub async fn list_articles_admin(
    pool: &SqlitePool,
    AdminArticleQuery {
        skip,
        limit,
        status,
        category,
    }: AdminArticleQuery,
) -> Result<Vec<Article>, RequestError> {
    let query = format!(
        "SELECT {} FROM articles
         WHERE ( status = $1 OR $1 IS NULL )
           AND ( category = $2 OR $2 IS NULL )
         ORDER BY created_at DESC
         LIMIT $3 OFFSET $4",
        ARTICLE_COLUMNS
    );
    let articles = sqlx::query_as::<Sqlite, Article>(&query)
        .bind(status)
        .bind(category)
        .bind(clamp_limit(limit) as i64)
        .bind(skip as i64)
        .fetch_all(pool)
        .await?;
    Ok(articles)
}
