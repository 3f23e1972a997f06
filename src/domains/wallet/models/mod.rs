// Wallet domain models
pub mod reason;
pub mod wallet_tx;

pub use reason::*;
pub use wallet_tx::*;
