//! Locating Go packages on disk
//!
//! ```text
//! SearchPath   → $GOROOT/src, $GOPATH/src
//!     ↓
//! PackageLister → pattern ("std", "cmd", "net/...") → Vec<PackageRef>
//!     ↓
//! PackageLoader → import path → BuildPackage (inclusion filter)
//!     ↑
//! BuildContext + constraint → which files belong to the build
//! ```

mod build_context;
pub mod constraint;
mod lister;
mod loader;
mod search_path;

pub use build_context::{BuildContext, host_goarch, host_goos};
pub use constraint::{Constraint, ConstraintError, should_build};
pub use lister::{PackageLister, PackageRef, is_skip_package, match_pattern};
pub use loader::{BuildPackage, MatchedFile, PackageLoader};
pub use search_path::SearchPath;

#[cfg(test)]
mod tests;
