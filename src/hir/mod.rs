//! High-level IR (HIR) — the doc model of a package and its symbol names.
//!
//! ## Key Types
//!
//! - [`DeclarationSet`] — types, values, constants and functions grouped
//!   the way package documentation presents them
//! - [`DocExtractor`] — builds a `DeclarationSet` from parsed files;
//!   [`GoDocReader`] is the default
//! - [`SymbolExtractor`] — import path → qualified symbol names
//!
//! ## Pipeline
//!
//! ```text
//! PackageRef
//!     │  PackageLoader::import
//!     ▼
//! BuildPackage (inclusion filter)
//!     │  parse_package
//!     ▼
//! ParsedPackage
//!     │  DocExtractor::declarations
//!     ▼
//! DeclarationSet
//!     │  local_names + qualify
//!     ▼
//! ["container/list.Element", …, "container/list"]
//! ```

mod decls;
mod package;
mod reader;
mod symbols;

pub use decls::{DeclarationSet, DocFunc, DocType, DocValue};
pub use package::{ParsedFile, ParsedPackage, parse_files, parse_package};
pub use reader::{DocExtractor, GoDocReader};
pub use symbols::{SymbolExtractor, local_names, qualify};
