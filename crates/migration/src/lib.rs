//! Migrator registering entity-specific migrations in creation order.
pub use sea_orm_migration::prelude::*;

mod m20250101_000001_create_product;
mod m20250101_000002_create_user;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20250101_000001_create_product::Migration),
            Box::new(m20250101_000002_create_user::Migration),
        ]
    }
}
