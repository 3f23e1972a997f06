// Entities domain module (users, channels, jobs, read-only reference data)
pub mod models;

pub use models::*;
