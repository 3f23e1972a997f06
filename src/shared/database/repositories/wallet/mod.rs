// Wallet repositories
pub mod wallet_tx_repository;

pub use wallet_tx_repository::*;
