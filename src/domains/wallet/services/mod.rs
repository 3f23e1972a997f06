// Wallet domain services
pub mod state;
pub mod wallet_tx_service;

pub use state::*;
pub use wallet_tx_service::*;
