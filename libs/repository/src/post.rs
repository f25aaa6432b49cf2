use chrono::Utc;
use sea_orm::sea_query::extension::postgres::PgExpr;
use sea_orm::sea_query::Expr;
use sea_orm::{
    strum::IntoEnumIterator as _, ActiveModelTrait, ActiveValue, ColumnTrait,
    Condition, DatabaseConnection, EntityTrait, IntoActiveModel, QueryFilter,
    QueryOrder,
};
use strum::IntoEnumIterator as _;

use crate::active_models::{prelude::*, *};
use entity::prelude::*;

use self::sea_orm_active_enums::PostStatus;

#[derive(Clone, Debug)]
pub struct PostRepository {
    db: DatabaseConnection,
}

impl PostRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

impl From<post::Model> for PostEntity {
    fn from(value: post::Model) -> Self {
        Self {
            id: value.id,
            title: value.title,
            slug: value.slug,
            content: value.content,
            excerpt: value.excerpt,
            read_time: value.read_time,
            category: value.category,
            tags: value.tags,
            status: value.status.into(),
            view_count: value.view_count,
            created_at: value.created_at.and_utc(),
            updated_at: value.updated_at.and_utc(),
        }
    }
}

impl From<NewPost> for post::ActiveModel {
    fn from(value: NewPost) -> Self {
        let now = Utc::now().naive_utc();
        let status: PostStatus = value.status.into();
        Self {
            id: ActiveValue::NotSet,
            title: ActiveValue::set(value.title),
            slug: ActiveValue::set(value.slug),
            content: ActiveValue::set(value.content),
            excerpt: ActiveValue::set(value.excerpt),
            read_time: ActiveValue::set(value.read_time),
            category: ActiveValue::set(value.category),
            tags: ActiveValue::set(value.tags),
            status: ActiveValue::set(status),
            view_count: ActiveValue::set(0),
            created_at: ActiveValue::set(now),
            updated_at: ActiveValue::set(now),
        }
    }
}

impl PostRepository {
    pub async fn find_all(&self) -> anyhow::Result<Vec<PostEntity>> {
        let posts = Post::find()
            .order_by_desc(post::Column::CreatedAt)
            .all(&self.db)
            .await?;

        Ok(posts.into_iter().map(PostEntity::from).collect())
    }

    pub async fn find_published(&self) -> anyhow::Result<Vec<PostEntity>> {
        let posts = Post::find()
            .filter(post::Column::Status.eq(PostStatus::Published))
            .order_by_desc(post::Column::CreatedAt)
            .all(&self.db)
            .await?;

        Ok(posts.into_iter().map(PostEntity::from).collect())
    }

    pub async fn find_by_id(
        &self,
        id: i32,
    ) -> anyhow::Result<Option<PostEntity>> {
        let post = Post::find_by_id(id).one(&self.db).await?;

        Ok(post.map(PostEntity::from))
    }

    pub async fn find_by_slug(
        &self,
        slug: &str,
    ) -> anyhow::Result<Option<PostEntity>> {
        let post = Post::find()
            .filter(post::Column::Slug.eq(slug))
            .one(&self.db)
            .await?;

        Ok(post.map(PostEntity::from))
    }

    pub async fn search(&self, query: &str) -> anyhow::Result<Vec<PostEntity>> {
        let pattern = format!("%{}%", query);
        let posts = Post::find()
            .filter(post::Column::Status.eq(PostStatus::Published))
            .filter(
                Condition::any()
                    .add(Expr::col(post::Column::Title).ilike(pattern.clone()))
                    .add(
                        Expr::col(post::Column::Excerpt).ilike(pattern.clone()),
                    )
                    .add(Expr::col(post::Column::Content).ilike(pattern)),
            )
            .order_by_desc(post::Column::CreatedAt)
            .all(&self.db)
            .await?;

        Ok(posts.into_iter().map(PostEntity::from).collect())
    }

    pub async fn find_by_tag(
        &self,
        tag: &str,
    ) -> anyhow::Result<Vec<PostEntity>> {
        let posts = Post::find()
            .filter(post::Column::Status.eq(PostStatus::Published))
            .filter(Expr::cust_with_values("? = ANY(tags)", [tag]))
            .order_by_desc(post::Column::CreatedAt)
            .all(&self.db)
            .await?;

        Ok(posts.into_iter().map(PostEntity::from).collect())
    }

    pub async fn create(&self, post: NewPost) -> anyhow::Result<PostEntity> {
        let model = post::ActiveModel::from(post).insert(&self.db).await?;

        Ok(model.into())
    }

    pub async fn update(
        &self,
        id: i32,
        update: UpdatePost,
    ) -> anyhow::Result<Option<PostEntity>> {
        let Some(model) = Post::find_by_id(id).one(&self.db).await? else {
            return Ok(None);
        };

        let mut model = model.into_active_model();
        if let Some(title) = update.title {
            model.title = ActiveValue::set(title);
        }
        if let Some(slug) = update.slug {
            model.slug = ActiveValue::set(slug);
        }
        if let Some(content) = update.content {
            model.content = ActiveValue::set(content);
        }
        if let Some(excerpt) = update.excerpt {
            model.excerpt = ActiveValue::set(excerpt);
        }
        if let Some(read_time) = update.read_time {
            model.read_time = ActiveValue::set(read_time);
        }
        if let Some(category) = update.category {
            model.category = ActiveValue::set(category);
        }
        if let Some(tags) = update.tags {
            model.tags = ActiveValue::set(tags);
        }
        if let Some(status) = update.status {
            model.status = ActiveValue::set(status.into());
        }
        model.updated_at = ActiveValue::set(Utc::now().naive_utc());

        let model = model.update(&self.db).await?;

        Ok(Some(model.into()))
    }

    pub async fn delete(&self, id: i32) -> anyhow::Result<bool> {
        let result = Post::delete_by_id(id).exec(&self.db).await?;

        Ok(result.rows_affected > 0)
    }

    pub async fn increment_views(&self, id: i32) -> anyhow::Result<()> {
        Post::update_many()
            .col_expr(
                post::Column::ViewCount,
                Expr::col(post::Column::ViewCount).add(1),
            )
            .filter(post::Column::Id.eq(id))
            .exec(&self.db)
            .await?;

        Ok(())
    }
}

macro_rules! impl_from {
    ($from:ty, $to:ty) => {
        impl From<$from> for $to {
            fn from(value: $from) -> Self {
                <$to>::iter()
                    .find(|x| (x.clone() as usize) == (value.clone() as usize))
                    .unwrap()
            }
        }

        impl From<$to> for $from {
            fn from(value: $to) -> Self {
                <$from>::iter()
                    .find(|x| (x.clone() as usize) == (value.clone() as usize))
                    .unwrap()
            }
        }
    };
}

pub(crate) use impl_from;

impl_from!(entity::post::PostStatus, sea_orm_active_enums::PostStatus);
