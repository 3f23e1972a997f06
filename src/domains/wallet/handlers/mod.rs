// Wallet domain handlers
pub mod wallet_tx_handler;

pub use wallet_tx_handler::*;
