use std::path::Path;
use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt as _;
use repository::{DynStorage, MemStorage, Storage as _};
use serde_json::{json, Value};
use sync_markdown::ContentDir;
use tower::ServiceExt as _;

async fn app(dir: &Path) -> (Router, DynStorage) {
    let storage: DynStorage = Arc::new(MemStorage::new());
    let router = api::serve(
        storage.clone(),
        ContentDir::new(dir),
        "secret".to_string(),
    )
    .await
    .unwrap();

    (router, storage)
}

async fn send(
    router: &Router,
    method: Method,
    uri: &str,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(v) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(v.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = router.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };

    (status, value)
}

fn post_body(title: &str) -> Value {
    json!({
        "title": title,
        "content": "Some words to publish.",
        "tags": ["rust"],
    })
}

#[tokio::test]
async fn creating_without_slug_derives_it_from_the_title() {
    let dir = tempfile::tempdir().unwrap();
    let (router, _) = app(dir.path()).await;

    let (status, body) = send(
        &router,
        Method::POST,
        "/api/admin/posts",
        Some(post_body("Hello, World!")),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["slug"], "hello-world");
    assert_eq!(body["status"], "published");
    assert_eq!(body["viewCount"], 0);
    // the mirrored file appears next to the rest of the content
    assert!(dir.path().join("hello-world.md").exists());
}

#[tokio::test]
async fn duplicate_slugs_are_rejected_without_inserting() {
    let dir = tempfile::tempdir().unwrap();
    let (router, storage) = app(dir.path()).await;

    let (status, _) = send(
        &router,
        Method::POST,
        "/api/admin/posts",
        Some(post_body("Same Title")),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = send(
        &router,
        Method::POST,
        "/api/admin/posts",
        Some(post_body("Same Title")),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("same-title"));

    assert_eq!(storage.get_posts().await.unwrap().len(), 1);
}

#[tokio::test]
async fn fetching_a_post_counts_one_view_per_request() {
    let dir = tempfile::tempdir().unwrap();
    let (router, _) = app(dir.path()).await;

    send(
        &router,
        Method::POST,
        "/api/admin/posts",
        Some(post_body("Counted")),
    )
    .await;

    let (status, body) =
        send(&router, Method::GET, "/api/posts/counted", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["viewCount"], 1);

    let (_, body) =
        send(&router, Method::GET, "/api/posts/counted", None).await;
    assert_eq!(body["viewCount"], 2);
}

#[tokio::test]
async fn drafts_stay_out_of_the_public_listing() {
    let dir = tempfile::tempdir().unwrap();
    let (router, _) = app(dir.path()).await;

    let mut body = post_body("Hidden");
    body["status"] = json!("draft");
    send(&router, Method::POST, "/api/admin/posts", Some(body)).await;

    let (status, _) =
        send(&router, Method::GET, "/api/posts/hidden", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (_, body) = send(&router, Method::GET, "/api/posts", None).await;
    assert_eq!(body["posts"].as_array().unwrap().len(), 0);

    let (_, body) =
        send(&router, Method::GET, "/api/admin/posts", None).await;
    assert_eq!(body["posts"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn missing_posts_are_404() {
    let dir = tempfile::tempdir().unwrap();
    let (router, _) = app(dir.path()).await;

    let (status, body) =
        send(&router, Method::GET, "/api/posts/no-such-post", None).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn deleting_removes_the_row_and_the_mirrored_file() {
    let dir = tempfile::tempdir().unwrap();
    let (router, storage) = app(dir.path()).await;

    let (_, created) = send(
        &router,
        Method::POST,
        "/api/admin/posts",
        Some(post_body("Short Lived")),
    )
    .await;
    let id = created["id"].as_i64().unwrap();
    assert!(dir.path().join("short-lived.md").exists());

    let (status, _) = send(
        &router,
        Method::DELETE,
        &format!("/api/admin/posts/{}", id),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    assert!(storage.get_posts().await.unwrap().is_empty());
    assert!(!dir.path().join("short-lived.md").exists());

    let (status, _) = send(
        &router,
        Method::DELETE,
        &format!("/api/admin/posts/{}", id),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn updating_a_post_re_mirrors_under_the_new_slug() {
    let dir = tempfile::tempdir().unwrap();
    let (router, _) = app(dir.path()).await;

    let (_, created) = send(
        &router,
        Method::POST,
        "/api/admin/posts",
        Some(post_body("Before")),
    )
    .await;
    let id = created["id"].as_i64().unwrap();

    let (status, body) = send(
        &router,
        Method::PUT,
        &format!("/api/admin/posts/{}", id),
        Some(json!({ "title": "After", "slug": "after" })),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["title"], "After");
    assert!(!dir.path().join("before.md").exists());
    assert!(dir.path().join("after.md").exists());

    let (status, _) = send(
        &router,
        Method::PUT,
        "/api/admin/posts/999",
        Some(json!({ "title": "Ghost" })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn updating_to_a_taken_slug_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let (router, _) = app(dir.path()).await;

    send(
        &router,
        Method::POST,
        "/api/admin/posts",
        Some(post_body("First")),
    )
    .await;
    let (_, second) = send(
        &router,
        Method::POST,
        "/api/admin/posts",
        Some(post_body("Second")),
    )
    .await;

    let (status, _) = send(
        &router,
        Method::PUT,
        &format!("/api/admin/posts/{}", second["id"].as_i64().unwrap()),
        Some(json!({ "slug": "first" })),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn search_and_tag_lookups_cover_published_posts() {
    let dir = tempfile::tempdir().unwrap();
    let (router, _) = app(dir.path()).await;

    send(
        &router,
        Method::POST,
        "/api/admin/posts",
        Some(json!({
            "title": "Learning Rust",
            "content": "Ownership and borrowing.",
            "tags": ["rust", "learning"],
        })),
    )
    .await;
    send(
        &router,
        Method::POST,
        "/api/admin/posts",
        Some(json!({
            "title": "Sourdough Notes",
            "content": "Flour, water, salt.",
            "tags": ["baking"],
        })),
    )
    .await;

    let (_, body) =
        send(&router, Method::GET, "/api/posts/search/rust", None).await;
    let posts = body["posts"].as_array().unwrap();
    assert_eq!(posts.len(), 1);
    assert_eq!(posts[0]["slug"], "learning-rust");

    let (_, body) =
        send(&router, Method::GET, "/api/posts/tag/baking", None).await;
    let posts = body["posts"].as_array().unwrap();
    assert_eq!(posts.len(), 1);
    assert_eq!(posts[0]["slug"], "sourdough-notes");

    let (_, body) =
        send(&router, Method::GET, "/api/posts/tag/nope", None).await;
    assert_eq!(body["posts"].as_array().unwrap().len(), 0);
}

#[tokio::test]
async fn contact_with_malformed_email_is_rejected_and_not_stored() {
    let dir = tempfile::tempdir().unwrap();
    let (router, storage) = app(dir.path()).await;

    for email in ["ada.example.com", "ada@localhost", "@example.com"] {
        let (status, body) = send(
            &router,
            Method::POST,
            "/api/contact",
            Some(json!({
                "name": "Ada",
                "email": email,
                "subject": "Hello",
                "message": "A message.",
            })),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["error"].is_string());
    }

    assert!(storage.get_contacts().await.unwrap().is_empty());
}

#[tokio::test]
async fn contact_submission_and_admin_lifecycle() {
    let dir = tempfile::tempdir().unwrap();
    let (router, _) = app(dir.path()).await;

    let (status, created) = send(
        &router,
        Method::POST,
        "/api/contact",
        Some(json!({
            "name": "Ada",
            "email": "ada@example.com",
            "subject": "Hello",
            "message": "A message.",
        })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(created["status"], "unread");
    let id = created["id"].as_i64().unwrap();

    let (_, listed) =
        send(&router, Method::GET, "/api/admin/contacts", None).await;
    assert_eq!(listed["contacts"].as_array().unwrap().len(), 1);

    // marking read twice leaves it read
    for _ in 0..2 {
        let (status, body) = send(
            &router,
            Method::PATCH,
            &format!("/api/admin/contacts/{}/read", id),
            None,
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "read");
    }

    let (status, _) = send(
        &router,
        Method::PATCH,
        "/api/admin/contacts/999/read",
        None,
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send(
        &router,
        Method::DELETE,
        &format!("/api/admin/contacts/{}", id),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, _) = send(
        &router,
        Method::DELETE,
        &format!("/api/admin/contacts/{}", id),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn login_checks_the_shared_password() {
    let dir = tempfile::tempdir().unwrap();
    let (router, _) = app(dir.path()).await;

    let (status, body) = send(
        &router,
        Method::POST,
        "/api/admin/login",
        Some(json!({ "password": "secret" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);

    let (status, body) = send(
        &router,
        Method::POST,
        "/api/admin/login",
        Some(json!({ "password": "wrong" })),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn stats_reflect_posts_and_contacts() {
    let dir = tempfile::tempdir().unwrap();
    let (router, _) = app(dir.path()).await;

    send(
        &router,
        Method::POST,
        "/api/admin/posts",
        Some(post_body("Published One")),
    )
    .await;
    let mut draft = post_body("Draft One");
    draft["status"] = json!("draft");
    send(&router, Method::POST, "/api/admin/posts", Some(draft)).await;

    send(&router, Method::GET, "/api/posts/published-one", None).await;
    send(
        &router,
        Method::POST,
        "/api/contact",
        Some(json!({
            "name": "Ada",
            "email": "ada@example.com",
            "subject": "Hello",
            "message": "A message.",
        })),
    )
    .await;

    let (status, body) =
        send(&router, Method::GET, "/api/admin/stats", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["totalPosts"], 2);
    assert_eq!(body["publishedPosts"], 1);
    assert_eq!(body["draftPosts"], 1);
    assert_eq!(body["totalViews"], 1);
    assert_eq!(body["totalContacts"], 1);
    assert_eq!(body["unreadContacts"], 1);
}

#[tokio::test]
async fn unknown_routes_return_json_404() {
    let dir = tempfile::tempdir().unwrap();
    let (router, _) = app(dir.path()).await;

    let (status, body) =
        send(&router, Method::GET, "/api/nowhere", None).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "not found");
}
