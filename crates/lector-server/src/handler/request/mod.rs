//! Request types for HTTP handlers.

mod paths;
mod translations;

pub use paths::*;
pub use translations::*;
