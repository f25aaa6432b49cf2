use entity::prelude::*;
use serde::Serialize;
use utoipa::ToSchema;

#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PostResponse {
    pub id: i32,
    pub title: String,
    pub slug: String,
    pub content: String,
    pub excerpt: String,
    pub read_time: String,
    pub category: String,
    pub tags: Vec<String>,
    pub status: String,
    pub view_count: i32,
    pub created_at: String,
    pub updated_at: String,
}

impl From<PostEntity> for PostResponse {
    fn from(value: PostEntity) -> Self {
        Self {
            id: value.id,
            title: value.title,
            slug: value.slug,
            content: value.content,
            excerpt: value.excerpt,
            read_time: value.read_time,
            category: value.category,
            tags: value.tags,
            status: value.status.as_str().to_string(),
            view_count: value.view_count,
            created_at: value.created_at.to_rfc3339(),
            updated_at: value.updated_at.to_rfc3339(),
        }
    }
}

#[derive(Serialize, ToSchema)]
pub struct GetPostsResponse {
    pub posts: Vec<PostResponse>,
}
