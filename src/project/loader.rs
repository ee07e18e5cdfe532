//! Resolve an import path to a directory and its buildable Go files.

use std::fs;
use std::path::{Path, PathBuf};

use smol_str::SmolStr;
use tracing::{debug, trace};

use super::build_context::BuildContext;
use super::constraint::should_build;
use super::search_path::SearchPath;
use crate::base::constants::{CGO_IMPORT, DOCUMENTATION_PACKAGE, GO_EXTENSION};
use crate::error::{Error, Result};
use crate::parser::parse_header;

/// A package located on disk with its inclusion filter
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildPackage {
    pub import_path: String,
    pub dir: PathBuf,
    /// Package name declared by the included files
    pub name: SmolStr,
    /// Pure Go files, sorted; these are the files that get parsed
    pub go_files: Vec<String>,
    /// Files importing `"C"`; never parsed
    pub cgo_files: Vec<String>,
    /// `.go` files excluded by name, constraint or package name
    pub ignored_files: Vec<String>,
}

/// A file that passed the name and constraint checks
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchedFile {
    pub name: String,
    pub package: SmolStr,
    pub imports_cgo: bool,
}

/// Locates packages on a [`SearchPath`] and filters their files for a
/// [`BuildContext`].
#[derive(Debug, Clone, Copy)]
pub struct PackageLoader<'a> {
    search_path: &'a SearchPath,
    context: &'a BuildContext,
}

impl<'a> PackageLoader<'a> {
    pub fn new(search_path: &'a SearchPath, context: &'a BuildContext) -> Self {
        Self {
            search_path,
            context,
        }
    }

    pub fn search_path(&self) -> &'a SearchPath {
        self.search_path
    }

    pub fn context(&self) -> &'a BuildContext {
        self.context
    }

    /// Find the package for `import_path` and compute its inclusion filter.
    pub fn import(&self, import_path: &str) -> Result<BuildPackage> {
        if import_path.is_empty() {
            return Err(Error::import(import_path, "invalid import path"));
        }
        if import_path == "."
            || import_path.starts_with("./")
            || import_path.starts_with("../")
            || import_path.starts_with('/')
        {
            return Err(Error::import(
                import_path,
                "local import paths are not supported",
            ));
        }
        let dir = self.search_path.find(import_path).ok_or_else(|| {
            Error::import(
                import_path,
                format!(
                    "package {import_path} is not in GOROOT ({})",
                    self.search_path.goroot_src().join(import_path).display()
                ),
            )
        })?;
        self.import_dir(import_path, &dir)
    }

    /// Compute the inclusion filter of a known package directory.
    pub fn import_dir(&self, import_path: &str, dir: &Path) -> Result<BuildPackage> {
        self.scan(import_path, dir)?.ok_or_else(|| {
            Error::import(
                import_path,
                format!("no buildable Go source files in {}", dir.display()),
            )
        })
    }

    /// Like [`import_dir`](Self::import_dir), but a directory without
    /// buildable files yields `None` instead of an error.
    pub fn scan(&self, import_path: &str, dir: &Path) -> Result<Option<BuildPackage>> {
        let mut name: Option<(SmolStr, String)> = None;
        let mut go_files = Vec::new();
        let mut cgo_files = Vec::new();
        let mut ignored_files = Vec::new();

        for file_name in read_file_names(dir)? {
            let Some(file) = self.match_file(import_path, dir, &file_name)? else {
                if file_name.ends_with(GO_EXTENSION) {
                    ignored_files.push(file_name);
                }
                continue;
            };

            if file.package == DOCUMENTATION_PACKAGE {
                trace!(file = %file.name, "skipping documentation file");
                ignored_files.push(file.name);
                continue;
            }

            match &name {
                None => name = Some((file.package.clone(), file.name.clone())),
                Some((expected, first)) if *expected != file.package => {
                    return Err(Error::import(
                        import_path,
                        format!(
                            "found packages {expected} ({first}) and {} ({}) in {}",
                            file.package,
                            file.name,
                            dir.display()
                        ),
                    ));
                }
                Some(_) => {}
            }

            if file.imports_cgo {
                if self.context.cgo_enabled {
                    cgo_files.push(file.name);
                } else {
                    trace!(file = %file.name, "skipping cgo file, cgo disabled");
                    ignored_files.push(file.name);
                }
                continue;
            }
            go_files.push(file.name);
        }

        let Some((name, _)) = name else {
            return Ok(None);
        };
        if go_files.is_empty() && cgo_files.is_empty() {
            return Ok(None);
        }

        debug!(
            import_path,
            package = %name,
            go_files = go_files.len(),
            cgo_files = cgo_files.len(),
            "resolved package"
        );
        Ok(Some(BuildPackage {
            import_path: import_path.to_string(),
            dir: dir.to_path_buf(),
            name,
            go_files,
            cgo_files,
            ignored_files,
        }))
    }

    /// Check one directory entry against the build context.
    ///
    /// Returns `None` for files that are not Go sources of this build:
    /// hidden or test files, a non-matching `_GOOS_GOARCH` suffix, or an
    /// unsatisfied build constraint.
    pub fn match_file(
        &self,
        import_path: &str,
        dir: &Path,
        file_name: &str,
    ) -> Result<Option<MatchedFile>> {
        if !BuildContext::is_source_name(file_name) {
            return Ok(None);
        }
        if !self.context.good_os_arch_file(file_name) {
            trace!(file = file_name, "excluded by file name suffix");
            return Ok(None);
        }

        let path = dir.join(file_name);
        let content = fs::read_to_string(&path).map_err(|e| Error::io(&path, e))?;

        let build = should_build(&content, self.context)
            .map_err(|e| Error::import(import_path, format!("{file_name}: {e}")))?;
        if !build {
            trace!(file = file_name, "excluded by build constraint");
            return Ok(None);
        }

        let header = parse_header(&content).map_err(|e| Error::parse(&path, &content, &e))?;
        let imports_cgo = header.imports_path(CGO_IMPORT);
        Ok(Some(MatchedFile {
            name: file_name.to_string(),
            package: header.package,
            imports_cgo,
        }))
    }
}

/// Names of the regular files in `dir`, sorted
fn read_file_names(dir: &Path) -> Result<Vec<String>> {
    let entries = fs::read_dir(dir).map_err(|e| Error::io(dir, e))?;
    let mut names = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|e| Error::io(dir, e))?;
        let is_file = fs::metadata(entry.path())
            .map(|m| m.is_file())
            .unwrap_or(false);
        if !is_file {
            continue;
        }
        if let Some(name) = entry.file_name().to_str() {
            names.push(name.to_string());
        }
    }
    names.sort();
    Ok(names)
}
