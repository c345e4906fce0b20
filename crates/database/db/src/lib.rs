//! A library responsible for interacting with the bridge database.
//!
//! The repository objects in this crate are the sole writers of their tables.
//! Chunk insertion runs its row insert and block claim in a nested
//! transaction, so a failed claim never leaves partial state. Batch insertion
//! paired with chunk stamping should run inside a [`DatabaseTransaction`]
//! obtained from [`Database::tx`] so the batch and its claim stamps become
//! visible together.

mod models;
pub use models::*;

mod connection;
pub use connection::DatabaseConnectionProvider;

mod db;
pub use db::Database;

mod transaction;
pub use transaction::DatabaseTransaction;

mod error;
pub use error::DatabaseError;

mod operations;
pub use operations::DatabaseOperations;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

pub use sea_orm::DbErr;
