// Entity models
pub mod entity;

pub use entity::*;
