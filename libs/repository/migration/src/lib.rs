pub use sea_orm_migration::prelude::*;

mod m20250214_101500_create_post_table;
mod m20250214_101730_create_contact_table;
mod m20250214_101910_create_user_table;
mod m20250214_113028_create_index_at_post;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20250214_101500_create_post_table::Migration),
            Box::new(m20250214_101730_create_contact_table::Migration),
            Box::new(m20250214_101910_create_user_table::Migration),
            Box::new(m20250214_113028_create_index_at_post::Migration),
        ]
    }
}
