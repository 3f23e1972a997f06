// Shared module
pub mod config;
pub mod database;
pub mod errors;
pub mod idempotency;
pub mod logging;
pub mod middleware;
pub mod services;
pub mod store;
pub mod utils;

pub use middleware::*;
pub use errors::*;
pub use services::*;
pub use utils::*;
