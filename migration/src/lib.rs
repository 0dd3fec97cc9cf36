pub use sea_orm_migration::prelude::*;

mod m20260805_000001_create_departments;
mod m20260805_000002_create_workstation_types;
mod m20260805_000003_create_users;
mod m20260805_000004_create_workstations;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20260805_000001_create_departments::Migration),
            Box::new(m20260805_000002_create_workstation_types::Migration),
            Box::new(m20260805_000003_create_users::Migration),
            Box::new(m20260805_000004_create_workstations::Migration),
        ]
    }
}
