//! Response types for HTTP handlers.

mod documents;
mod error_response;
mod monitors;
mod translations;

pub use documents::*;
pub use error_response::ErrorResponse;
pub use monitors::*;
pub use translations::*;
