use std::path::Path;

use anyhow::Context as _;
use repository::{DynStorage, Storage as _};
use tokio::fs;
use tracing::{error, info};

pub mod frontmatter;
mod mirror;

pub use mirror::ContentDir;

/// Imports markdown files that have no matching row yet. Runs once at boot;
/// a file that fails to import is logged and skipped.
pub async fn serve(
    storage: DynStorage,
    content: &ContentDir,
) -> anyhow::Result<()> {
    info!(task = "start markdown sync", dir = %content.path().display());

    let mut imported = 0usize;
    for path in content.list().await? {
        match import_file(&storage, &path).await {
            Ok(true) => imported += 1,
            Ok(false) => {}
            Err(e) => {
                error!(
                    task = "import markdown file",
                    path = %path.display(),
                    error = e.to_string(),
                );
            }
        }
    }

    info!(task = "markdown sync done", imported);

    Ok(())
}

async fn import_file(
    storage: &DynStorage,
    path: &Path,
) -> anyhow::Result<bool> {
    let slug = path
        .file_stem()
        .and_then(|s| s.to_str())
        .context("file name is not valid utf-8")?;

    if storage.get_post_by_slug(slug).await?.is_some() {
        return Ok(false);
    }

    let raw = fs::read_to_string(path).await?;
    let post = frontmatter::parse(&raw).into_new_post(slug);
    let post = storage.create_post(post).await?;

    info!(task = "import markdown file", slug = post.slug, id = post.id);

    Ok(true)
}
