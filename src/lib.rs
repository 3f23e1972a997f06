pub mod domains;
pub mod routes;
pub mod shared;

pub use routes::{build_app, create_router};
pub use shared::config::Config;
pub use shared::services::AppState;
