use axum::{extract::State, Json};
use entity::prelude::*;
use repository::Storage as _;

pub mod response;

use crate::response::{ApiResponse, IntoApiResponse};
use crate::ApiState;

use self::response::StatsResponse;

/// Dashboard counters for the admin panel
pub async fn get_stats(
    State(state): State<ApiState>,
) -> ApiResponse<Json<StatsResponse>> {
    let posts = state
        .storage
        .get_posts()
        .await
        .into_response("failed to load posts")?;
    let contacts = state
        .storage
        .get_contacts()
        .await
        .into_response("failed to load messages")?;

    let published = posts
        .iter()
        .filter(|p| p.status == PostStatus::Published)
        .count();
    let unread = contacts
        .iter()
        .filter(|c| c.status == ContactStatus::Unread)
        .count();

    Ok(Json(StatsResponse {
        total_posts: posts.len(),
        published_posts: published,
        draft_posts: posts.len() - published,
        total_views: posts.iter().map(|p| p.view_count as i64).sum(),
        total_contacts: contacts.len(),
        unread_contacts: unread,
    }))
}
