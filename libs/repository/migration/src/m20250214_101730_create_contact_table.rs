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
                    .as_enum(Alias::new("contact_status"))
                    .values(ContactStatus::iter())
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Contact::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Contact::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Contact::Name).string().not_null())
                    .col(ColumnDef::new(Contact::Email).string().not_null())
                    .col(ColumnDef::new(Contact::Subject).string().not_null())
                    .col(ColumnDef::new(Contact::Message).text().not_null())
                    .col(
                        ColumnDef::new(Contact::Status)
                            .enumeration(
                                Alias::new("contact_status"),
                                ContactStatus::iter(),
                            )
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Contact::CreatedAt)
                            .date_time()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Contact::Table).to_owned())
            .await?;

        manager
            .drop_type(
                Type::drop().name(Alias::new("contact_status")).to_owned(),
            )
            .await
    }
}

#[derive(DeriveIden)]
pub enum Contact {
    Table,
    Id,
    Name,
    Email,
    Subject,
    Message,
    Status,
    CreatedAt,
}

#[derive(Iden, EnumIter)]
pub enum ContactStatus {
    #[iden = "unread"]
    Unread,
    #[iden = "read"]
    Read,
}
