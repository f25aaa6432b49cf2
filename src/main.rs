use std::sync::Arc;

use repository::DynStorage;
use shuttle_runtime::{Error, SecretStore, Secrets};
use sync_markdown::ContentDir;

#[shuttle_runtime::main]
async fn main(
    #[Secrets] secret_store: SecretStore,
    #[shuttle_shared_db::Postgres(local_uri = "{secrets.LOCAL_DATABASE_URL}")]
    conn_string: String,
) -> shuttle_axum::ShuttleAxum {
    if let Some(env) = secret_store.get("ENV") {
        if env == "prod" {
            tracing_subscriber::fmt()
                .with_max_level(tracing::Level::INFO)
                .init();
        }
    } else {
        tracing_subscriber::fmt()
            .with_max_level(tracing::Level::INFO)
            .init();
    }

    let admin_password = secret_store
        .get("ADMIN_PASSWORD")
        .unwrap_or_else(|| "admin123".to_string());

    let repository = repository::init_repository(&conn_string)
        .await
        .map_err(|e| Error::BuildPanic(e.to_string()))?;
    let storage: DynStorage = Arc::new(repository);

    let content_dir = util::load_config("config.toml")
        .ok()
        .and_then(|config| {
            Some(config.get("content")?.get("dir")?.as_str()?.to_string())
        })
        .unwrap_or_else(|| "content".to_string());
    let content = ContentDir::new(content_dir);

    if let Err(e) = sync_markdown::serve(storage.clone(), &content).await {
        tracing::error!(task = "markdown sync", error = e.to_string());
    }

    let router = api::serve(storage, content, admin_password)
        .await
        .map_err(|e| Error::BuildPanic(e.to_string()))?;

    Ok(router.into())
}
