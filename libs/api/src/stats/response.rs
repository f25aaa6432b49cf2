use serde::Serialize;
use utoipa::ToSchema;

#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StatsResponse {
    pub total_posts: usize,
    pub published_posts: usize,
    pub draft_posts: usize,
    pub total_views: i64,
    pub total_contacts: usize,
    pub unread_contacts: usize,
}
