use axum::{
    routing::delete, routing::get, routing::patch, routing::post,
    routing::put, Router,
};

use repository::DynStorage;
use sync_markdown::ContentDir;
use tokio::sync::OnceCell;
use tower_http::cors::CorsLayer;
use tracing::info;
use utoipa::OpenApi;
use utoipa_rapidoc::RapiDoc;
use utoipa_redoc::{Redoc, Servable};
use utoipa_swagger_ui::SwaggerUi;
use utoipauto::utoipauto;

mod auth;
pub mod contact;
pub mod healthz;
pub mod not_found;
pub mod post;
mod response;
pub mod stats;

#[derive(Debug)]
pub enum ApiError {
    AuthError(String),
    ClientError(String),
    NotFound(String),
    ServerError(String),
}

#[derive(Clone)]
pub struct ApiState {
    storage: DynStorage,
    content: ContentDir,
}

static ADMIN_PASSWORD: OnceCell<String> = OnceCell::const_new();

pub async fn serve(
    storage: DynStorage,
    content: ContentDir,
    admin_password: String,
) -> anyhow::Result<Router> {
    #[utoipauto(paths = "./libs/api/src")]
    #[derive(OpenApi)]
    #[openapi(
        tags(
            (name = "quill", description = "Personal blog API")
        )
    )]
    struct ApiDoc;

    info!(task = "start api serving");

    let _ = ADMIN_PASSWORD.set(admin_password);

    let state = ApiState { storage, content };

    let origins = ["http://localhost:3000".parse().unwrap()];

    // public posts
    let post_router = Router::new()
        .route("/", get(post::get_posts))
        .route("/:slug", get(post::get_post))
        .route("/search/:query", get(post::search_posts))
        .route("/tag/:tag", get(post::get_posts_by_tag))
        .fallback(not_found::get_404)
        .with_state(state.clone());

    // contact form
    let contact_router = Router::new()
        .route("/", post(contact::submit_contact))
        .fallback(not_found::get_404)
        .with_state(state.clone());

    // admin
    let admin_router = Router::new()
        .route("/login", post(auth::login))
        .route("/posts", get(post::get_all_posts).post(post::create_post))
        .route(
            "/posts/:id",
            put(post::update_post).delete(post::delete_post),
        )
        .route("/stats", get(stats::get_stats))
        .route("/contacts", get(contact::get_contacts))
        .route("/contacts/:id/read", patch(contact::mark_contact_read))
        .route("/contacts/:id", delete(contact::delete_contact))
        .fallback(not_found::get_404)
        .with_state(state);

    let router = Router::new()
        .merge(
            SwaggerUi::new("/swagger-ui")
                .url("/api-docs/openapi.json", ApiDoc::openapi()),
        )
        .merge(Redoc::with_url("/redoc", ApiDoc::openapi()))
        .merge(RapiDoc::new("/api-docs/openapi.json").path("/rapidoc"))
        .route("/healthz", get(healthz::get_health))
        .nest("/api/posts", post_router)
        .nest("/api/contact", contact_router)
        .nest("/api/admin", admin_router)
        .layer(CorsLayer::new().allow_origin(origins))
        .fallback(not_found::get_404);

    Ok(router)
}
