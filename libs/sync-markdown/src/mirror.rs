use std::path::{Path, PathBuf};

use entity::prelude::*;
use tokio::fs;

use crate::frontmatter;

/// Directory of mirrored `<slug>.md` files.
#[derive(Clone, Debug)]
pub struct ContentDir {
    dir: PathBuf,
}

impl ContentDir {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn path(&self) -> &Path {
        &self.dir
    }

    fn file_path(&self, slug: &str) -> PathBuf {
        self.dir.join(format!("{}.md", slug))
    }

    /// Overwrites the mirrored file for a post.
    pub async fn write_post(&self, post: &PostEntity) -> anyhow::Result<()> {
        fs::create_dir_all(&self.dir).await?;
        fs::write(self.file_path(&post.slug), frontmatter::render(post))
            .await?;

        Ok(())
    }

    pub async fn remove(&self, slug: &str) -> anyhow::Result<()> {
        let path = self.file_path(slug);
        if fs::try_exists(&path).await.unwrap_or(false) {
            fs::remove_file(path).await?;
        }

        Ok(())
    }

    pub async fn exists(&self, slug: &str) -> bool {
        fs::try_exists(self.file_path(slug)).await.unwrap_or(false)
    }

    /// All markdown files currently in the directory.
    pub async fn list(&self) -> anyhow::Result<Vec<PathBuf>> {
        if !fs::try_exists(&self.dir).await.unwrap_or(false) {
            return Ok(vec![]);
        }

        let mut files = vec![];
        let mut entries = fs::read_dir(&self.dir).await?;
        while let Some(entry) = entries.next_entry().await? {
            let path = entry.path();
            if path.extension().map(|e| e == "md").unwrap_or(false) {
                files.push(path);
            }
        }
        files.sort();

        Ok(files)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn post(slug: &str) -> PostEntity {
        PostEntity {
            title: "T".to_string(),
            slug: slug.to_string(),
            content: "Body".to_string(),
            excerpt: "Body".to_string(),
            read_time: "1 min read".to_string(),
            category: "general".to_string(),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn write_remove_and_list() {
        let dir = tempfile::tempdir().unwrap();
        let content = ContentDir::new(dir.path());

        content.write_post(&post("one")).await.unwrap();
        content.write_post(&post("two")).await.unwrap();
        assert!(content.exists("one").await);

        let files = content.list().await.unwrap();
        assert_eq!(files.len(), 2);
        assert!(files[0].ends_with("one.md"));

        content.remove("one").await.unwrap();
        assert!(!content.exists("one").await);

        // removing twice is fine
        content.remove("one").await.unwrap();
    }

    #[tokio::test]
    async fn listing_a_missing_directory_is_empty() {
        let content = ContentDir::new("/definitely/not/here");

        assert!(content.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn non_markdown_files_are_ignored() {
        let dir = tempfile::tempdir().unwrap();
        tokio::fs::write(dir.path().join("notes.txt"), "x")
            .await
            .unwrap();
        let content = ContentDir::new(dir.path());

        assert!(content.list().await.unwrap().is_empty());
    }
}
