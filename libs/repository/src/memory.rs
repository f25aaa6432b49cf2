use std::collections::HashMap;
use std::sync::atomic::{AtomicI32, Ordering};

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use entity::prelude::*;

use crate::Storage;

/// HashMap-backed storage. Holds the same data the database variant does,
/// minus persistence; rows live for the lifetime of the process.
#[derive(Debug, Default)]
pub struct MemStorage {
    posts: RwLock<HashMap<i32, PostEntity>>,
    contacts: RwLock<HashMap<i32, ContactEntity>>,
    users: RwLock<HashMap<i32, UserEntity>>,
    next_post_id: AtomicI32,
    next_contact_id: AtomicI32,
    next_user_id: AtomicI32,
}

impl MemStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

fn newest_first(posts: &mut [PostEntity]) {
    // id breaks ties between rows created within the same instant
    posts.sort_by(|a, b| {
        b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id))
    });
}

#[async_trait]
impl Storage for MemStorage {
    async fn get_posts(&self) -> anyhow::Result<Vec<PostEntity>> {
        let mut posts: Vec<_> =
            self.posts.read().await.values().cloned().collect();
        newest_first(&mut posts);

        Ok(posts)
    }

    async fn get_published_posts(&self) -> anyhow::Result<Vec<PostEntity>> {
        let mut posts: Vec<_> = self
            .posts
            .read()
            .await
            .values()
            .filter(|p| p.status == PostStatus::Published)
            .cloned()
            .collect();
        newest_first(&mut posts);

        Ok(posts)
    }

    async fn get_post(&self, id: i32) -> anyhow::Result<Option<PostEntity>> {
        Ok(self.posts.read().await.get(&id).cloned())
    }

    async fn get_post_by_slug(
        &self,
        slug: &str,
    ) -> anyhow::Result<Option<PostEntity>> {
        let posts = self.posts.read().await;

        Ok(posts.values().find(|p| p.slug == slug).cloned())
    }

    async fn search_posts(
        &self,
        query: &str,
    ) -> anyhow::Result<Vec<PostEntity>> {
        let query = query.to_lowercase();
        let mut posts: Vec<_> = self
            .posts
            .read()
            .await
            .values()
            .filter(|p| p.status == PostStatus::Published)
            .filter(|p| {
                p.title.to_lowercase().contains(&query)
                    || p.excerpt.to_lowercase().contains(&query)
                    || p.content.to_lowercase().contains(&query)
            })
            .cloned()
            .collect();
        newest_first(&mut posts);

        Ok(posts)
    }

    async fn get_posts_by_tag(
        &self,
        tag: &str,
    ) -> anyhow::Result<Vec<PostEntity>> {
        let mut posts: Vec<_> = self
            .posts
            .read()
            .await
            .values()
            .filter(|p| p.status == PostStatus::Published)
            .filter(|p| p.tags.iter().any(|t| t == tag))
            .cloned()
            .collect();
        newest_first(&mut posts);

        Ok(posts)
    }

    async fn create_post(&self, post: NewPost) -> anyhow::Result<PostEntity> {
        let id = self.next_post_id.fetch_add(1, Ordering::SeqCst) + 1;
        let now = Utc::now();
        let post = PostEntity {
            id,
            title: post.title,
            slug: post.slug,
            content: post.content,
            excerpt: post.excerpt,
            read_time: post.read_time,
            category: post.category,
            tags: post.tags,
            status: post.status,
            view_count: 0,
            created_at: now,
            updated_at: now,
        };
        self.posts.write().await.insert(id, post.clone());

        Ok(post)
    }

    async fn update_post(
        &self,
        id: i32,
        update: UpdatePost,
    ) -> anyhow::Result<Option<PostEntity>> {
        let mut posts = self.posts.write().await;
        let Some(post) = posts.get_mut(&id) else {
            return Ok(None);
        };

        if let Some(title) = update.title {
            post.title = title;
        }
        if let Some(slug) = update.slug {
            post.slug = slug;
        }
        if let Some(content) = update.content {
            post.content = content;
        }
        if let Some(excerpt) = update.excerpt {
            post.excerpt = excerpt;
        }
        if let Some(read_time) = update.read_time {
            post.read_time = read_time;
        }
        if let Some(category) = update.category {
            post.category = category;
        }
        if let Some(tags) = update.tags {
            post.tags = tags;
        }
        if let Some(status) = update.status {
            post.status = status;
        }
        post.updated_at = Utc::now();

        Ok(Some(post.clone()))
    }

    async fn delete_post(&self, id: i32) -> anyhow::Result<bool> {
        Ok(self.posts.write().await.remove(&id).is_some())
    }

    async fn increment_views(&self, id: i32) -> anyhow::Result<()> {
        if let Some(post) = self.posts.write().await.get_mut(&id) {
            post.view_count += 1;
        }

        Ok(())
    }

    async fn create_contact(
        &self,
        contact: NewContact,
    ) -> anyhow::Result<ContactEntity> {
        let id = self.next_contact_id.fetch_add(1, Ordering::SeqCst) + 1;
        let contact = ContactEntity {
            id,
            name: contact.name,
            email: contact.email,
            subject: contact.subject,
            message: contact.message,
            status: ContactStatus::Unread,
            created_at: Utc::now(),
        };
        self.contacts.write().await.insert(id, contact.clone());

        Ok(contact)
    }

    async fn get_contacts(&self) -> anyhow::Result<Vec<ContactEntity>> {
        let mut contacts: Vec<_> =
            self.contacts.read().await.values().cloned().collect();
        contacts.sort_by(|a, b| {
            b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id))
        });

        Ok(contacts)
    }

    async fn mark_contact_read(
        &self,
        id: i32,
    ) -> anyhow::Result<Option<ContactEntity>> {
        let mut contacts = self.contacts.write().await;
        let Some(contact) = contacts.get_mut(&id) else {
            return Ok(None);
        };
        contact.status = ContactStatus::Read;

        Ok(Some(contact.clone()))
    }

    async fn delete_contact(&self, id: i32) -> anyhow::Result<bool> {
        Ok(self.contacts.write().await.remove(&id).is_some())
    }

    async fn get_user_by_username(
        &self,
        username: &str,
    ) -> anyhow::Result<Option<UserEntity>> {
        let users = self.users.read().await;

        Ok(users.values().find(|u| u.username == username).cloned())
    }

    async fn create_user(&self, user: NewUser) -> anyhow::Result<UserEntity> {
        let id = self.next_user_id.fetch_add(1, Ordering::SeqCst) + 1;
        let user = UserEntity {
            id,
            username: user.username,
            password: user.password,
        };
        self.users.write().await.insert(id, user.clone());

        Ok(user)
    }
}
