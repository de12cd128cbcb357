use std::sync::Arc;

use axum::{
    extract::{Path, Query},
    http::Uri,
    Extension, Json,
};
use sqlx::SqlitePool;

use crate::{
    authentication::{
        hash_password, issue_token, require_admin, resolve_user, token_ttl, verify_password,
        AuthUser,
    },
    data_formats::{
        AdminArticleQuery, ArticleListItem, ArticleResponse, CreateArticleRequest, LikeResponse,
        LoginRequest, MessageResponse, PublicArticleQuery, RegisterRequest, StatsResponse,
        TokenResponse, UpdateArticleRequest, UserResponse,
    },
    db_helpers::{
        delete_article_in_db, fetch_published_article, get_dashboard_stats, get_user_by_username,
        insert_article, insert_user, like_article_in_db, list_articles_admin, list_published_articles,
        list_users, update_article_in_db,
    },
    errors::RequestError,
};

type JsonResult<T> = Result<Json<T>, RequestError>;

const MAX_USERNAME_LENGTH: usize = 50;

// ----------------- Helper Handlers -----------------
pub async fn alive() -> &'static str {
    "alive"
}

pub async fn not_found(uri: Uri) -> RequestError {
    tracing::debug!("no route for {}", uri);
    RequestError::NotFound
}

fn is_valid_email(email: &str) -> bool {
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    !local.is_empty()
        && !domain.is_empty()
        && !domain.contains('@')
        && domain.contains('.')
        && !domain.starts_with('.')
        && !domain.ends_with('.')
}

// ----------------- Auth Handlers -----------------
pub async fn register_user(
    Extension(pool): Extension<Arc<SqlitePool>>,
    Json(request): Json<RegisterRequest>,
) -> JsonResult<UserResponse> {
    if request.username.is_empty() || request.username.chars().count() > MAX_USERNAME_LENGTH {
        return Err(RequestError::Validation(
            "Username must be between 1 and 50 characters",
        ));
    }
    if !is_valid_email(&request.email) {
        return Err(RequestError::Validation("Invalid email address"));
    }
    if request.password.is_empty() {
        return Err(RequestError::Validation("Password must not be empty"));
    }

    let password_hash = hash_password(request.password).await?;
    let user = insert_user(&pool, &request.username, &request.email, &password_hash).await?;
    tracing::info!(username = %user.username, is_admin = user.is_admin, "user registered");
    Ok(Json(UserResponse::from(user)))
}

pub async fn login_user(
    Extension(pool): Extension<Arc<SqlitePool>>,
    Json(request): Json<LoginRequest>,
) -> JsonResult<TokenResponse> {
    // Unknown user, wrong password and deactivated account are deliberately
    // indistinguishable to the caller.
    let user = get_user_by_username(&pool, &request.username)
        .await?
        .ok_or(RequestError::InvalidCredentials)?;
    if !user.is_active {
        return Err(RequestError::InvalidCredentials);
    }
    let password_matches =
        verify_password(request.password, user.password_hash.clone()).await?;
    if !password_matches {
        return Err(RequestError::InvalidCredentials);
    }

    let access_token =
        issue_token(&user.username, token_ttl()).map_err(|_| RequestError::ServerError)?;
    tracing::debug!(username = %user.username, "login succeeded");
    Ok(Json(TokenResponse {
        access_token,
        token_type: "bearer".to_string(),
        user: UserResponse::from(user),
    }))
}

// ----------------- Public Article Handlers -----------------
pub async fn list_articles(
    Extension(pool): Extension<Arc<SqlitePool>>,
    Query(params): Query<PublicArticleQuery>,
) -> JsonResult<Vec<ArticleListItem>> {
    let articles = list_published_articles(&pool, params).await?;
    Ok(Json(articles.into_iter().map(ArticleListItem::from).collect()))
}

pub async fn get_article(
    Extension(pool): Extension<Arc<SqlitePool>>,
    Path(article_id): Path<i64>,
) -> JsonResult<ArticleResponse> {
    let article = fetch_published_article(&pool, article_id).await?;
    Ok(Json(ArticleResponse::from(article)))
}

pub async fn like_article(
    Extension(pool): Extension<Arc<SqlitePool>>,
    Path(article_id): Path<i64>,
) -> JsonResult<LikeResponse> {
    let likes = like_article_in_db(&pool, article_id).await?;
    Ok(Json(LikeResponse {
        message: "Article liked".to_string(),
        likes,
    }))
}

// ----------------- Admin Article Handlers -----------------
pub async fn admin_list_articles(
    Extension(pool): Extension<Arc<SqlitePool>>,
    auth: AuthUser,
    Query(params): Query<AdminArticleQuery>,
) -> JsonResult<Vec<ArticleResponse>> {
    let user = resolve_user(&pool, &auth).await?;
    require_admin(&user)?;

    let articles = list_articles_admin(&pool, params).await?;
    Ok(Json(articles.into_iter().map(ArticleResponse::from).collect()))
}

pub async fn create_article(
    Extension(pool): Extension<Arc<SqlitePool>>,
    auth: AuthUser,
    Json(request): Json<CreateArticleRequest>,
) -> JsonResult<ArticleResponse> {
    let user = resolve_user(&pool, &auth).await?;
    require_admin(&user)?;

    if request.title.is_empty() {
        return Err(RequestError::Validation("Title must not be empty"));
    }
    let article = insert_article(&pool, &request, user.id).await?;
    tracing::info!(article_id = article.id, status = article.status.as_str(), "article created");
    Ok(Json(ArticleResponse::from(article)))
}

pub async fn update_article(
    Extension(pool): Extension<Arc<SqlitePool>>,
    auth: AuthUser,
    Path(article_id): Path<i64>,
    Json(request): Json<UpdateArticleRequest>,
) -> JsonResult<ArticleResponse> {
    let user = resolve_user(&pool, &auth).await?;
    require_admin(&user)?;

    let article = update_article_in_db(&pool, article_id, request).await?;
    Ok(Json(ArticleResponse::from(article)))
}

pub async fn delete_article(
    Extension(pool): Extension<Arc<SqlitePool>>,
    auth: AuthUser,
    Path(article_id): Path<i64>,
) -> JsonResult<MessageResponse> {
    let user = resolve_user(&pool, &auth).await?;
    require_admin(&user)?;

    delete_article_in_db(&pool, article_id).await?;
    tracing::info!(article_id, "article deleted");
    Ok(Json(MessageResponse {
        message: "Article deleted".to_string(),
    }))
}

// ----------------- Admin Dashboard Handlers -----------------
pub async fn admin_stats(
    Extension(pool): Extension<Arc<SqlitePool>>,
    auth: AuthUser,
) -> JsonResult<StatsResponse> {
    let user = resolve_user(&pool, &auth).await?;
    require_admin(&user)?;

    let stats = get_dashboard_stats(&pool).await?;
    Ok(Json(stats))
}

pub async fn admin_users(
    Extension(pool): Extension<Arc<SqlitePool>>,
    auth: AuthUser,
) -> JsonResult<Vec<UserResponse>> {
    let user = resolve_user(&pool, &auth).await?;
    require_admin(&user)?;

    let users = list_users(&pool).await?;
    Ok(Json(users.into_iter().map(UserResponse::from).collect()))
}
