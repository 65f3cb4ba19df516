pub use sea_orm_migration::prelude::*;

mod m20250301_000001_create_email_attempt_table;
mod m20250301_000002_create_verification_code_table;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20250301_000001_create_email_attempt_table::Migration),
            Box::new(m20250301_000002_create_verification_code_table::Migration),
        ]
    }
}
