// Reservation domain services
pub mod reservation_service;
pub mod state;

pub use reservation_service::*;
pub use state::*;
