pub use sea_orm_migration::prelude::*;

mod m20260110_120000_bills;
mod m20260110_121000_finances;
mod m20260110_122000_attributes;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20260110_120000_bills::Migration),
            Box::new(m20260110_121000_finances::Migration),
            Box::new(m20260110_122000_attributes::Migration),
        ]
    }
}
