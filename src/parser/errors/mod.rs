//! Parser error handling module
//!
//! Syntax errors carry:
//! - Categorized error codes for filtering and documentation
//! - The offending source range
//! - An optional hint for common mistakes

mod codes;
mod error;

pub use codes::ErrorCode;
pub use error::SyntaxError;

#[cfg(test)]
mod tests;
