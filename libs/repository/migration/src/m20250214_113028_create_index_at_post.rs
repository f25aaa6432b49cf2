use sea_orm_migration::prelude::*;

use crate::m20250214_101500_create_post_table::Post;

#[derive(DeriveMigrationName)]
pub struct Migration;

// the public listing filters on status and sorts by created_at
#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_index(
                Index::create()
                    .table(Post::Table)
                    .name("idx_post_status_created_at")
                    .col(Post::Status)
                    .col(Post::CreatedAt)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(
                Index::drop()
                    .table(Post::Table)
                    .name("idx_post_status_created_at")
                    .to_owned(),
            )
            .await
    }
}
