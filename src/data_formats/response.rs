use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::models::{Article, ArticleStatus, User};

/// Caller-visible view of a user. The password hash never leaves the storage
/// layer, so this struct simply has no field for it.
#[derive(Deserialize, Serialize, Debug)]
pub struct UserResponse {
    pub id: i64,
    pub username: String,
    pub email: String,
    pub is_admin: bool,
    pub is_active: bool,
    pub created_at: NaiveDateTime,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        UserResponse {
            id: user.id,
            username: user.username,
            email: user.email,
            is_admin: user.is_admin,
            is_active: user.is_active,
            created_at: user.created_at,
        }
    }
}

#[derive(Deserialize, Serialize, Debug)]
pub struct TokenResponse {
    pub access_token: String,
    pub token_type: String,
    pub user: UserResponse,
}

#[derive(Deserialize, Serialize, Debug)]
pub struct ArticleResponse {
    pub id: i64,
    pub title: String,
    pub content: String,
    pub excerpt: Option<String>,
    pub category: Option<String>,
    pub status: ArticleStatus,
    pub image: Option<String>,
    pub views: i64,
    pub likes: i64,
    pub author_id: i64,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
    pub published_at: Option<NaiveDateTime>,
}

impl From<Article> for ArticleResponse {
    fn from(article: Article) -> Self {
        ArticleResponse {
            id: article.id,
            title: article.title,
            content: article.content,
            excerpt: article.excerpt,
            category: article.category,
            status: article.status,
            image: article.image,
            views: article.views,
            likes: article.likes,
            author_id: article.author_id,
            created_at: article.created_at,
            updated_at: article.updated_at,
            published_at: article.published_at,
        }
    }
}

/// Listing rows skip the article body.
#[derive(Deserialize, Serialize, Debug)]
pub struct ArticleListItem {
    pub id: i64,
    pub title: String,
    pub excerpt: Option<String>,
    pub category: Option<String>,
    pub status: ArticleStatus,
    pub image: Option<String>,
    pub views: i64,
    pub likes: i64,
    pub author_id: i64,
    pub created_at: NaiveDateTime,
    pub published_at: Option<NaiveDateTime>,
}

impl From<Article> for ArticleListItem {
    fn from(article: Article) -> Self {
        ArticleListItem {
            id: article.id,
            title: article.title,
            excerpt: article.excerpt,
            category: article.category,
            status: article.status,
            image: article.image,
            views: article.views,
            likes: article.likes,
            author_id: article.author_id,
            created_at: article.created_at,
            published_at: article.published_at,
        }
    }
}

#[derive(Deserialize, Serialize, Debug)]
pub struct LikeResponse {
    pub message: String,
    pub likes: i64,
}

#[derive(Deserialize, Serialize, Debug)]
pub struct MessageResponse {
    pub message: String,
}

#[derive(Deserialize, Serialize, Debug)]
pub struct StatsResponse {
    pub total_articles: i64,
    pub published_articles: i64,
    pub draft_articles: i64,
    pub total_views: i64,
    pub total_likes: i64,
    pub total_comments: i64,
}
