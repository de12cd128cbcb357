mod request;
mod response;

pub use request::*;
pub use response::*;

use serde::{Deserialize, Serialize};

use crate::models::ArticleStatus;

pub const MAX_PAGE_SIZE: u32 = 100;

#[derive(Deserialize, Serialize, Debug)]
pub struct PublicArticleQuery {
    #[serde(default)]
    pub skip: u32,
    #[serde(default = "get_default_limit")]
    pub limit: u32,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub search: Option<String>,
}

#[derive(Deserialize, Serialize, Debug)]
pub struct AdminArticleQuery {
    #[serde(default)]
    pub skip: u32,
    #[serde(default = "get_default_limit")]
    pub limit: u32,
    #[serde(default)]
    pub status: Option<ArticleStatus>,
    #[serde(default)]
    pub category: Option<String>,
}

fn get_default_limit() -> u32 {
    10
}

pub fn clamp_limit(limit: u32) -> u32 {
    limit.clamp(1, MAX_PAGE_SIZE)
}
