//! Schema migrations for the bridge database.

pub use sea_orm_migration::prelude::*;

mod m20230601_000001_create_l2_block_table;
mod m20230601_000002_create_chunk_table;
mod m20230601_000003_create_batch_table;

/// The hash length in bytes for all hash columns.
const HASH_LENGTH: u32 = 32;

/// The migrator for the bridge database schema.
#[derive(Debug)]
pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20230601_000001_create_l2_block_table::Migration),
            Box::new(m20230601_000002_create_chunk_table::Migration),
            Box::new(m20230601_000003_create_batch_table::Migration),
        ]
    }
}
