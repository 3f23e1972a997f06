// Entity repositories
pub mod entity_repository;

pub use entity_repository::*;
