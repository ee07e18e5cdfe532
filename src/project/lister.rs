//! Expand a package pattern into import paths.
//!
//! Patterns follow `go list`:
//!
//! | pattern   | packages                                              |
//! |-----------|-------------------------------------------------------|
//! | `std`     | the standard library: `$GOROOT/src` without `cmd`     |
//! | `cmd`     | the Go commands under `$GOROOT/src/cmd`               |
//! | `net/...` | `net` and everything below it; `...` matches anything |
//! | `net/url` | that package only                                     |

use std::fmt;
use std::path::Path;

use smol_str::SmolStr;
use tracing::{debug, warn};
use walkdir::{DirEntry, WalkDir};

use super::build_context::BuildContext;
use super::loader::PackageLoader;
use super::search_path::SearchPath;
use crate::base::constants::{CMD_PATTERN, DEFAULT_PATTERN, TESTDATA_DIR, WILDCARD};
use crate::error::{Error, Result};

/// Import path of a listed package
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PackageRef(SmolStr);

impl PackageRef {
    pub fn new(import_path: impl AsRef<str>) -> Self {
        Self(SmolStr::new(import_path))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PackageRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for PackageRef {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<&str> for PackageRef {
    fn from(path: &str) -> Self {
        Self::new(path)
    }
}

/// Reports whether a package is hidden from listings: an `internal`
/// element anywhere in the path, or a path under the top-level `vendor`
/// directory.
pub fn is_skip_package(import_path: &str) -> bool {
    import_path.split('/').any(|element| element == "internal")
        || import_path.starts_with("vendor/")
}

/// Resolves package patterns against a search path
pub struct PackageLister<'a> {
    loader: PackageLoader<'a>,
    skip_internal: bool,
}

impl<'a> PackageLister<'a> {
    pub fn new(search_path: &'a SearchPath, context: &'a BuildContext) -> Self {
        Self {
            loader: PackageLoader::new(search_path, context),
            skip_internal: false,
        }
    }

    /// Drop packages matched by [`is_skip_package`] from listings.
    pub fn with_skip_internal(mut self, skip: bool) -> Self {
        self.skip_internal = skip;
        self
    }

    /// Import paths matching `pattern`, sorted.
    pub fn list(&self, pattern: &str) -> Result<Vec<PackageRef>> {
        validate_pattern(pattern)?;
        let search_path = self.loader.search_path();
        let src = search_path.goroot_src();
        if !src.is_dir() {
            return Err(Error::load(
                pattern,
                format!("Go root source directory {} not found", src.display()),
            ));
        }

        let mut paths = match pattern {
            DEFAULT_PATTERN => self.walk(pattern, &src, &src, |path| is_standard_path(path))?,
            CMD_PATTERN => self.walk(pattern, &src, &src.join(CMD_PATTERN), |_| true)?,
            _ if pattern.contains(WILDCARD) => {
                let start = literal_prefix_dir(pattern);
                let mut paths = Vec::new();
                for root in search_path.src_roots() {
                    let dir = root.join(start);
                    if dir.is_dir() {
                        paths.extend(self.walk(pattern, &root, &dir, |path| {
                            match_pattern(pattern, path)
                        })?);
                    }
                }
                paths
            }
            _ => {
                if search_path.find(pattern).is_none() {
                    return Err(Error::load(
                        pattern,
                        format!(
                            "package {pattern} is not in GOROOT ({})",
                            src.join(pattern).display()
                        ),
                    ));
                }
                vec![PackageRef::new(pattern)]
            }
        };

        paths.sort();
        paths.dedup();
        if self.skip_internal {
            paths.retain(|p| !is_skip_package(p.as_str()));
        }
        if paths.is_empty() {
            warn!(pattern, "pattern matched no packages");
        }
        debug!(pattern, count = paths.len(), "listed packages");
        Ok(paths)
    }

    /// Walk `start` below the source root `src`, keeping directories whose
    /// import path satisfies `want` and that hold buildable Go files.
    fn walk(
        &self,
        pattern: &str,
        src: &Path,
        start: &Path,
        want: impl Fn(&str) -> bool,
    ) -> Result<Vec<PackageRef>> {
        let mut found = Vec::new();
        let walker = WalkDir::new(start)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|entry| keep_dir(entry, src));

        for entry in walker {
            let entry = entry.map_err(|e| Error::load(pattern, e.to_string()))?;
            let Some(import_path) = import_path_of(src, entry.path()) else {
                continue;
            };
            if !want(&import_path) {
                continue;
            }
            match self.loader.scan(&import_path, entry.path()) {
                Ok(Some(_)) => found.push(PackageRef::new(&import_path)),
                Ok(None) => {}
                Err(error) => {
                    // listed anyway; extraction reports the error
                    debug!(%import_path, %error, "package has errors");
                    found.push(PackageRef::new(&import_path));
                }
            }
        }
        Ok(found)
    }
}

/// Directories worth descending into
fn keep_dir(entry: &DirEntry, src: &Path) -> bool {
    if !entry.file_type().is_dir() {
        return false;
    }
    if entry.depth() == 0 {
        return true;
    }
    let name = entry.file_name().to_string_lossy();
    if name.starts_with('.') || name.starts_with('_') || name == TESTDATA_DIR {
        return false;
    }
    // nested modules such as $GOROOT/src/cmd are separate trees
    if entry.path() != src && entry.path().join("go.mod").is_file() {
        return false;
    }
    true
}

fn import_path_of(src: &Path, dir: &Path) -> Option<String> {
    let rel = dir.strip_prefix(src).ok()?;
    let parts: Vec<_> = rel
        .components()
        .map(|c| c.as_os_str().to_string_lossy().into_owned())
        .collect();
    if parts.is_empty() {
        return None;
    }
    Some(parts.join("/"))
}

/// Standard library paths have no dot in their first element and are not
/// part of the command tree.
fn is_standard_path(import_path: &str) -> bool {
    let first = import_path.split('/').next().unwrap_or(import_path);
    first != CMD_PATTERN && !first.contains('.')
}

fn validate_pattern(pattern: &str) -> Result<()> {
    if pattern.is_empty() {
        return Err(Error::load(pattern, "empty package pattern"));
    }
    if let Some(bad) = pattern
        .chars()
        .find(|&c| !(c.is_alphanumeric() || "-._~/+".contains(c)))
    {
        return Err(Error::load(
            pattern,
            format!("invalid character {bad:?} in package pattern"),
        ));
    }
    if pattern.starts_with('/') || pattern.split('/').any(|e| e == "." || e == "..") {
        return Err(Error::load(pattern, "local package patterns are not supported"));
    }
    Ok(())
}

/// Directory to start walking for a wildcard pattern: the part before the
/// first `...`, cut back to a whole path element.
fn literal_prefix_dir(pattern: &str) -> &str {
    let literal = pattern.split(WILDCARD).next().unwrap_or("");
    match literal.rfind('/') {
        Some(i) => &literal[..i],
        None => "",
    }
}

const VENDOR_MARK: char = '\u{0}';

/// Reports whether `name` matches a pattern in which `...` matches any
/// string. A trailing `/...` also matches the empty suffix, so `net/...`
/// matches `net`. `...` never matches into a `vendor` directory unless the
/// pattern spells `vendor` out.
pub fn match_pattern(pattern: &str, name: &str) -> bool {
    if name.contains(VENDOR_MARK) {
        return false;
    }
    let pattern = replace_vendor(pattern);
    let name = replace_vendor(name);
    let vendor_suffix = format!("/{VENDOR_MARK}/{WILDCARD}");

    if let Some(base) = pattern.strip_suffix(vendor_suffix.as_str()) {
        return name == format!("{base}/vendor") || wildcard_match(&pattern, &name);
    }
    if let Some(base) = pattern.strip_suffix("/...") {
        if name == base {
            return true;
        }
    }
    wildcard_match(&pattern, &name)
}

/// Replace every `vendor` element except the last with a marker that `...`
/// cannot match.
fn replace_vendor(path: &str) -> String {
    if !path.contains("vendor") {
        return path.to_string();
    }
    let elements: Vec<&str> = path.split('/').collect();
    let last = elements.len() - 1;
    let mark = VENDOR_MARK.to_string();
    elements
        .iter()
        .enumerate()
        .map(|(i, e)| if i < last && *e == "vendor" { mark.as_str() } else { e })
        .collect::<Vec<_>>()
        .join("/")
}

/// Glob match where `...` matches any run of characters but the vendor mark
fn wildcard_match(pattern: &str, name: &str) -> bool {
    let parts: Vec<&str> = pattern.split(WILDCARD).collect();
    let (first, rest) = match parts.split_first() {
        Some(split) => split,
        None => return pattern == name,
    };
    let Some(mut remaining) = name.strip_prefix(first) else {
        return false;
    };
    if rest.is_empty() {
        return remaining.is_empty();
    }

    let (last, middle) = match rest.split_last() {
        Some(split) => split,
        None => return false,
    };
    for part in middle {
        // leftmost occurrence leaves the most room for later parts
        let Some(i) = remaining.find(part) else {
            return false;
        };
        if remaining[..i].contains(VENDOR_MARK) {
            return false;
        }
        remaining = &remaining[i + part.len()..];
    }
    if remaining.len() < last.len() || !remaining.ends_with(last) {
        return false;
    }
    let skipped = &remaining[..remaining.len() - last.len()];
    !skipped.contains(VENDOR_MARK)
}
