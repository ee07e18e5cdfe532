//! Foundation types for gostdsym.
//!
//! This module provides fundamental types used throughout the crate:
//! - [`Delimiter`] - Separator between an import path and a local name
//! - [`Position`] - 1-based line/column positions for diagnostics
//! - [`is_exported`], [`is_blank`] - Go identifier rules
//! - Domain constants (known GOOS/GOARCH values, predeclared types)
//!
//! This module has NO dependencies on other gostdsym modules.

pub mod constants;
mod delimiter;
mod ident;
mod position;

pub use delimiter::Delimiter;
pub use ident::{is_blank, is_exported};
pub use position::Position;

// Re-export text-size types for convenience
pub use text_size::{TextRange, TextSize};
