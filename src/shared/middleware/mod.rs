// Shared middleware
pub mod http_layers;
pub mod json_body;

pub use http_layers::*;
pub use json_body::*;
