// Validation module (existence checks run before every mutation)
pub mod existence;

pub use existence::*;
