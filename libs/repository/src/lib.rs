use std::sync::Arc;

use async_trait::async_trait;
use contact::ContactRepository;
use entity::prelude::*;
use migration::Migrator;
use migration::MigratorTrait;
use post::PostRepository;
use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use user::UserRepository;

mod active_models;
pub mod contact;
pub mod memory;
pub mod post;
pub mod user;

pub use memory::MemStorage;

/// Everything the route layer needs from a backing store. Implemented by the
/// database-backed [`Repository`] and the in-memory [`MemStorage`].
#[async_trait]
pub trait Storage: Send + Sync {
    async fn get_posts(&self) -> anyhow::Result<Vec<PostEntity>>;
    async fn get_published_posts(&self) -> anyhow::Result<Vec<PostEntity>>;
    async fn get_post(&self, id: i32) -> anyhow::Result<Option<PostEntity>>;
    async fn get_post_by_slug(
        &self,
        slug: &str,
    ) -> anyhow::Result<Option<PostEntity>>;
    async fn search_posts(
        &self,
        query: &str,
    ) -> anyhow::Result<Vec<PostEntity>>;
    async fn get_posts_by_tag(
        &self,
        tag: &str,
    ) -> anyhow::Result<Vec<PostEntity>>;
    async fn create_post(&self, post: NewPost) -> anyhow::Result<PostEntity>;
    async fn update_post(
        &self,
        id: i32,
        update: UpdatePost,
    ) -> anyhow::Result<Option<PostEntity>>;
    async fn delete_post(&self, id: i32) -> anyhow::Result<bool>;
    async fn increment_views(&self, id: i32) -> anyhow::Result<()>;

    async fn create_contact(
        &self,
        contact: NewContact,
    ) -> anyhow::Result<ContactEntity>;
    async fn get_contacts(&self) -> anyhow::Result<Vec<ContactEntity>>;
    async fn mark_contact_read(
        &self,
        id: i32,
    ) -> anyhow::Result<Option<ContactEntity>>;
    async fn delete_contact(&self, id: i32) -> anyhow::Result<bool>;

    async fn get_user_by_username(
        &self,
        username: &str,
    ) -> anyhow::Result<Option<UserEntity>>;
    async fn create_user(&self, user: NewUser) -> anyhow::Result<UserEntity>;
}

pub type DynStorage = Arc<dyn Storage>;

#[derive(Clone, Debug)]
pub struct Repository {
    pub post: PostRepository,
    pub contact: ContactRepository,
    pub user: UserRepository,
}

#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error(
        "in sea-orm crate from unsuccessful database operations: {}: {}",
        message,
        source
    )]
    InSeaOrmDbErr {
        message: String,
        source: sea_orm::DbErr,
    },
}

type Response<T> = Result<T, RepositoryError>;

pub trait IntoResponse<T> {
    fn into_response(self, message: &str) -> Response<T>;
}

impl<T> IntoResponse<T> for Result<T, sea_orm::DbErr> {
    fn into_response(self, message: &str) -> Response<T> {
        self.map_err(|e| RepositoryError::InSeaOrmDbErr {
            message: message.to_string(),
            source: e,
        })
    }
}

pub async fn init_repository(db_url: &str) -> Response<Repository> {
    let db = init_db(db_url).await?;

    let repository = Repository {
        post: PostRepository::new(db.clone()),
        contact: ContactRepository::new(db.clone()),
        user: UserRepository::new(db),
    };

    Ok(repository)
}

async fn init_db(db_url: &str) -> Response<DatabaseConnection> {
    let mut opt = ConnectOptions::new(db_url);
    opt.max_connections(5)
        .min_connections(1)
        .sqlx_logging(true)
        .sqlx_logging_level(log::LevelFilter::Debug);

    let db = Database::connect(opt)
        .await
        .into_response("in database connect")?;

    Migrator::up(&db, None)
        .await
        .into_response("in migrator up")?;

    Ok(db)
}

#[async_trait]
impl Storage for Repository {
    async fn get_posts(&self) -> anyhow::Result<Vec<PostEntity>> {
        self.post.find_all().await
    }

    async fn get_published_posts(&self) -> anyhow::Result<Vec<PostEntity>> {
        self.post.find_published().await
    }

    async fn get_post(&self, id: i32) -> anyhow::Result<Option<PostEntity>> {
        self.post.find_by_id(id).await
    }

    async fn get_post_by_slug(
        &self,
        slug: &str,
    ) -> anyhow::Result<Option<PostEntity>> {
        self.post.find_by_slug(slug).await
    }

    async fn search_posts(
        &self,
        query: &str,
    ) -> anyhow::Result<Vec<PostEntity>> {
        self.post.search(query).await
    }

    async fn get_posts_by_tag(
        &self,
        tag: &str,
    ) -> anyhow::Result<Vec<PostEntity>> {
        self.post.find_by_tag(tag).await
    }

    async fn create_post(&self, post: NewPost) -> anyhow::Result<PostEntity> {
        self.post.create(post).await
    }

    async fn update_post(
        &self,
        id: i32,
        update: UpdatePost,
    ) -> anyhow::Result<Option<PostEntity>> {
        self.post.update(id, update).await
    }

    async fn delete_post(&self, id: i32) -> anyhow::Result<bool> {
        self.post.delete(id).await
    }

    async fn increment_views(&self, id: i32) -> anyhow::Result<()> {
        self.post.increment_views(id).await
    }

    async fn create_contact(
        &self,
        contact: NewContact,
    ) -> anyhow::Result<ContactEntity> {
        self.contact.create(contact).await
    }

    async fn get_contacts(&self) -> anyhow::Result<Vec<ContactEntity>> {
        self.contact.find_all().await
    }

    async fn mark_contact_read(
        &self,
        id: i32,
    ) -> anyhow::Result<Option<ContactEntity>> {
        self.contact.mark_read(id).await
    }

    async fn delete_contact(&self, id: i32) -> anyhow::Result<bool> {
        self.contact.delete(id).await
    }

    async fn get_user_by_username(
        &self,
        username: &str,
    ) -> anyhow::Result<Option<UserEntity>> {
        self.user.find_by_username(username).await
    }

    async fn create_user(&self, user: NewUser) -> anyhow::Result<UserEntity> {
        self.user.create(user).await
    }
}
