use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use entity::prelude::*;
use repository::Storage as _;
use tracing::{error, info};
use util::{estimate_read_time, excerpt_from, slugify};

pub mod request;
pub mod response;

use crate::response::{ApiResponse, IntoApiResponse};
use crate::{ApiError, ApiState};

use self::request::{CreatePostRequest, UpdatePostRequest};
use self::response::{GetPostsResponse, PostResponse};

/// List published posts
#[utoipa::path(
    get,
    path = "/api/posts",
    responses(
        (status = 200, description = "List published posts", body = GetPostsResponse)
    )
)]
pub async fn get_posts(
    State(state): State<ApiState>,
) -> ApiResponse<Json<GetPostsResponse>> {
    let posts = state
        .storage
        .get_published_posts()
        .await
        .into_response("failed to load posts")?;

    Ok(Json(GetPostsResponse {
        posts: posts.into_iter().map(PostResponse::from).collect(),
    }))
}

/// Read one post by slug, counting the view
#[utoipa::path(
    get,
    path = "/api/posts/:slug",
    responses(
        (status = 200, description = "The post", body = PostResponse),
        (status = 404, description = "No published post under that slug")
    ),
    params(
        ("slug", description = "post slug"),
    )
)]
pub async fn get_post(
    State(state): State<ApiState>,
    Path(slug): Path<String>,
) -> ApiResponse<Json<PostResponse>> {
    let post = state
        .storage
        .get_post_by_slug(&slug)
        .await
        .into_response("failed to load post")?;

    let Some(mut post) = post else {
        return Err(ApiError::NotFound("post not found".to_string()));
    };
    if post.status != PostStatus::Published {
        return Err(ApiError::NotFound("post not found".to_string()));
    }

    state
        .storage
        .increment_views(post.id)
        .await
        .into_response("failed to update view count")?;
    post.view_count += 1;

    Ok(Json(post.into()))
}

pub async fn search_posts(
    State(state): State<ApiState>,
    Path(query): Path<String>,
) -> ApiResponse<Json<GetPostsResponse>> {
    let posts = state
        .storage
        .search_posts(&query)
        .await
        .into_response("failed to search posts")?;

    Ok(Json(GetPostsResponse {
        posts: posts.into_iter().map(PostResponse::from).collect(),
    }))
}

pub async fn get_posts_by_tag(
    State(state): State<ApiState>,
    Path(tag): Path<String>,
) -> ApiResponse<Json<GetPostsResponse>> {
    let posts = state
        .storage
        .get_posts_by_tag(&tag)
        .await
        .into_response("failed to load posts")?;

    Ok(Json(GetPostsResponse {
        posts: posts.into_iter().map(PostResponse::from).collect(),
    }))
}

/// Every post, drafts included, for the admin panel
pub async fn get_all_posts(
    State(state): State<ApiState>,
) -> ApiResponse<Json<GetPostsResponse>> {
    let posts = state
        .storage
        .get_posts()
        .await
        .into_response("failed to load posts")?;

    Ok(Json(GetPostsResponse {
        posts: posts.into_iter().map(PostResponse::from).collect(),
    }))
}

pub async fn create_post(
    State(state): State<ApiState>,
    Json(body): Json<CreatePostRequest>,
) -> ApiResponse<Json<PostResponse>> {
    let new_post = validate_create(body)?;

    let existing = state
        .storage
        .get_post_by_slug(&new_post.slug)
        .await
        .into_response("failed to check slug")?;
    if existing.is_some() {
        return Err(ApiError::ClientError(format!(
            "a post with slug \"{}\" already exists",
            new_post.slug
        )));
    }

    let post = state
        .storage
        .create_post(new_post)
        .await
        .into_response("failed to create post")?;

    if let Err(e) = state.content.write_post(&post).await {
        error!(task = "mirror post", slug = post.slug, error = e.to_string());
    }

    info!(task = "create post", id = post.id, slug = post.slug);

    Ok(Json(post.into()))
}

pub async fn update_post(
    State(state): State<ApiState>,
    Path(id): Path<i32>,
    Json(body): Json<UpdatePostRequest>,
) -> ApiResponse<Json<PostResponse>> {
    let update = validate_update(body)?;

    let previous = state
        .storage
        .get_post(id)
        .await
        .into_response("failed to load post")?;
    let Some(previous) = previous else {
        return Err(ApiError::NotFound("post not found".to_string()));
    };

    if let Some(slug) = &update.slug {
        if slug != &previous.slug {
            let taken = state
                .storage
                .get_post_by_slug(slug)
                .await
                .into_response("failed to check slug")?;
            if taken.is_some() {
                return Err(ApiError::ClientError(format!(
                    "a post with slug \"{}\" already exists",
                    slug
                )));
            }
        }
    }

    let post = state
        .storage
        .update_post(id, update)
        .await
        .into_response("failed to update post")?;
    let Some(post) = post else {
        return Err(ApiError::NotFound("post not found".to_string()));
    };

    if post.slug != previous.slug {
        if let Err(e) = state.content.remove(&previous.slug).await {
            error!(
                task = "remove mirrored file",
                slug = previous.slug,
                error = e.to_string(),
            );
        }
    }
    if let Err(e) = state.content.write_post(&post).await {
        error!(task = "mirror post", slug = post.slug, error = e.to_string());
    }

    info!(task = "update post", id = post.id, slug = post.slug);

    Ok(Json(post.into()))
}

pub async fn delete_post(
    State(state): State<ApiState>,
    Path(id): Path<i32>,
) -> ApiResponse<StatusCode> {
    let post = state
        .storage
        .get_post(id)
        .await
        .into_response("failed to load post")?;
    let Some(post) = post else {
        return Err(ApiError::NotFound("post not found".to_string()));
    };

    let deleted = state
        .storage
        .delete_post(id)
        .await
        .into_response("failed to delete post")?;
    if !deleted {
        return Err(ApiError::NotFound("post not found".to_string()));
    }

    if let Err(e) = state.content.remove(&post.slug).await {
        error!(
            task = "remove mirrored file",
            slug = post.slug,
            error = e.to_string(),
        );
    }

    info!(task = "delete post", id, slug = post.slug);

    Ok(StatusCode::NO_CONTENT)
}

fn validate_create(body: CreatePostRequest) -> Result<NewPost, ApiError> {
    if body.title.trim().is_empty() {
        return Err(ApiError::ClientError(
            "title must not be empty".to_string(),
        ));
    }
    if body.content.trim().is_empty() {
        return Err(ApiError::ClientError(
            "content must not be empty".to_string(),
        ));
    }

    let status = parse_status(body.status.as_deref())?;

    let slug = match body.slug {
        Some(slug) if !slug.trim().is_empty() => slug.trim().to_string(),
        _ => slugify(&body.title),
    };
    if slug.is_empty() {
        return Err(ApiError::ClientError(
            "a slug could not be derived from the title".to_string(),
        ));
    }

    let excerpt = body
        .excerpt
        .filter(|e| !e.trim().is_empty())
        .unwrap_or_else(|| excerpt_from(&body.content));
    let read_time = body
        .read_time
        .filter(|r| !r.trim().is_empty())
        .unwrap_or_else(|| estimate_read_time(&body.content));
    let category = body
        .category
        .filter(|c| !c.trim().is_empty())
        .unwrap_or_else(|| "general".to_string());

    Ok(NewPost {
        title: body.title.trim().to_string(),
        slug,
        content: body.content,
        excerpt,
        read_time,
        category,
        tags: body
            .tags
            .into_iter()
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty())
            .collect(),
        status: status.unwrap_or_default(),
    })
}

fn validate_update(body: UpdatePostRequest) -> Result<UpdatePost, ApiError> {
    if matches!(&body.title, Some(t) if t.trim().is_empty()) {
        return Err(ApiError::ClientError(
            "title must not be empty".to_string(),
        ));
    }
    if matches!(&body.content, Some(c) if c.trim().is_empty()) {
        return Err(ApiError::ClientError(
            "content must not be empty".to_string(),
        ));
    }
    if matches!(&body.slug, Some(s) if s.trim().is_empty()) {
        return Err(ApiError::ClientError(
            "slug must not be empty".to_string(),
        ));
    }

    let status = parse_status(body.status.as_deref())?;

    Ok(UpdatePost {
        title: body.title,
        slug: body.slug.map(|s| s.trim().to_string()),
        content: body.content,
        excerpt: body.excerpt,
        read_time: body.read_time,
        category: body.category,
        tags: body.tags,
        status,
    })
}

fn parse_status(value: Option<&str>) -> Result<Option<PostStatus>, ApiError> {
    let Some(value) = value else {
        return Ok(None);
    };

    PostStatus::from_str(value).map(Some).ok_or_else(|| {
        ApiError::ClientError(format!(
            "status must be published or draft, got \"{}\"",
            value
        ))
    })
}
