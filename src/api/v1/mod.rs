//! V1 JSON API handlers.

mod posts;


pub use super::ErrorResponse;
pub use posts::*;
