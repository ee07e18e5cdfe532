//! # gostdsym
//!
//! Lists the exported symbols of Go packages, the standard library by
//! default, as flat qualified names such as `container/list.List.Back`.
//!
//! ## Module Structure (dependency order)
//!
//! ```text
//! hir       → DeclarationSet, doc reader, symbol flattening
//!   ↓
//! project   → Build context, build constraints, package lookup and listing
//!   ↓
//! parser    → Logos lexer, declaration parser, AST
//!   ↓
//! base      → Primitives (Delimiter, Position, exportedness, constants)
//! ```

// ============================================================================
// MODULES (dependency order: base → parser → project → hir)
// ============================================================================

/// Foundation types: Delimiter, Position, Go identifier rules
pub mod base;

/// Parser: Logos lexer, recursive-descent declaration parser
pub mod parser;

/// Project layout: GOROOT/GOPATH search, build context, package listing
pub mod project;

/// High-level IR: doc model of a package and its symbols
pub mod hir;

mod config;
mod error;

pub use base::Delimiter;
pub use config::Config;
pub use error::{Error, Result};
pub use hir::{DeclarationSet, DocExtractor, GoDocReader, SymbolExtractor};
pub use project::{PackageLister, PackageLoader, PackageRef, is_skip_package};

use tracing::debug;

/// Extract the symbols of every package matching `pattern`, handing each
/// package's list to `emit` as soon as it is ready.
///
/// Stops at the first error; lists already emitted stay emitted.
pub fn for_each_package<F>(config: &Config, pattern: &str, mut emit: F) -> Result<usize>
where
    F: FnMut(&PackageRef, &[String]) -> Result<()>,
{
    let packages = PackageLister::new(&config.search_path, &config.context)
        .with_skip_internal(config.skip_internal)
        .list(pattern)?;
    debug!(pattern, packages = packages.len(), "extracting symbols");

    let extractor =
        SymbolExtractor::new(PackageLoader::new(&config.search_path, &config.context));
    let mut total = 0;
    for package in &packages {
        let symbols = extractor.extract(package, config.delimiter)?;
        total += symbols.len();
        emit(package, &symbols)?;
    }
    Ok(total)
}

/// Every symbol of the packages matching `pattern`, in listing order.
pub fn symbols(config: &Config, pattern: &str) -> Result<Vec<String>> {
    let mut out = Vec::new();
    for_each_package(config, pattern, |_, symbols| {
        out.extend_from_slice(symbols);
        Ok(())
    })?;
    Ok(out)
}
