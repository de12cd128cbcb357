use serde::{Deserialize, Deserializer, Serialize};

use crate::models::ArticleStatus;

/// Distinguishes an absent field from an explicit `null`: absent stays
/// `None`, anything present (including `null`) becomes `Some(..)`.
fn double_option<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Deserialize::deserialize(deserializer).map(Some)
}

// ----------------- Auth Requests -----------------
#[derive(Deserialize, Serialize, Debug)]
pub struct RegisterRequest {
    pub username: String,
    pub email: String,
    pub password: String,
}

#[derive(Deserialize, Serialize, Debug)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

// ----------------- Article Requests -----------------
#[derive(Deserialize, Serialize, Debug)]
pub struct CreateArticleRequest {
    pub title: String,
    pub content: String,
    #[serde(default)]
    pub excerpt: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub status: ArticleStatus,
}

/// Partial update: a field left out of the request body keeps its stored
/// value. For the nullable columns an explicit `null` clears the stored
/// value, so those use the double-option encoding: outer `None` = omitted,
/// `Some(None)` = clear, `Some(Some(v))` = replace.
#[derive(Deserialize, Serialize, Debug, Default)]
#[serde(default)]
pub struct UpdateArticleRequest {
    pub title: Option<String>,
    pub content: Option<String>,
    #[serde(deserialize_with = "double_option")]
    pub excerpt: Option<Option<String>>,
    #[serde(deserialize_with = "double_option")]
    pub category: Option<Option<String>>,
    pub status: Option<ArticleStatus>,
    #[serde(deserialize_with = "double_option")]
    pub image: Option<Option<String>>,
}
