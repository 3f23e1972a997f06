// Backup / restore / seed repositories
pub mod snapshot_repository;

pub use snapshot_repository::*;
