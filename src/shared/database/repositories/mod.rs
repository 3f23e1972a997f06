// All repositories module
pub mod entities;
pub mod maintenance;
pub mod reservation;
pub mod wallet;

// Re-export all repositories for convenience
pub use entities::*;
pub use maintenance::*;
pub use reservation::*;
pub use wallet::*;
