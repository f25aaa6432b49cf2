use sea_orm_migration::{
    prelude::*,
    sea_orm::{EnumIter, Iterable},
    sea_query::extension::postgres::Type,
};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_type(
                Type::create()
                    .as_enum(Alias::new("post_status"))
                    .values(PostStatus::iter())
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Post::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Post::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Post::Title).string().not_null())
                    .col(
                        ColumnDef::new(Post::Slug)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Post::Content).text().not_null())
                    .col(ColumnDef::new(Post::Excerpt).string().not_null())
                    .col(ColumnDef::new(Post::ReadTime).string().not_null())
                    .col(ColumnDef::new(Post::Category).string().not_null())
                    .col(
                        ColumnDef::new(Post::Tags)
                            .array(ColumnType::Text)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Post::Status)
                            .enumeration(
                                Alias::new("post_status"),
                                PostStatus::iter(),
                            )
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Post::ViewCount)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(Post::CreatedAt).date_time().not_null(),
                    )
                    .col(
                        ColumnDef::new(Post::UpdatedAt).date_time().not_null(),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Post::Table).to_owned())
            .await?;

        manager
            .drop_type(Type::drop().name(Alias::new("post_status")).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum Post {
    Table,
    Id,
    Title,
    Slug,
    Content,
    Excerpt,
    ReadTime,
    Category,
    Tags,
    Status,
    ViewCount,
    CreatedAt,
    UpdatedAt,
}

#[derive(Iden, EnumIter)]
pub enum PostStatus {
    #[iden = "published"]
    Published,
    #[iden = "draft"]
    Draft,
}
