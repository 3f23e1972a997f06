// Report domain services
pub mod report_service;
pub mod state;

pub use report_service::*;
pub use state::*;
