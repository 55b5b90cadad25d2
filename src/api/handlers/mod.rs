//! HTML page handlers and system endpoints.

mod pages;
mod system;


pub use pages::*;
pub use system::*;
