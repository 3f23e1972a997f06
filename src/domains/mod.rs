// Domain modules
pub mod entities;
pub mod validation;
pub mod reservation;
pub mod wallet;
pub mod report;
