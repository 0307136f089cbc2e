/// Core Module for gitsheet
///
/// Shared infrastructure used by every other module: the error type and the
/// `Result` alias.

pub mod error;

// Re-export commonly used types for convenience
pub use error::{Result, SheetError};
