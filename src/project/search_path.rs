//! Source roots that import paths are resolved against.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

use tracing::debug;

use crate::error::{Error, Result};

/// `$GOROOT/src` followed by `$GOPATH/src` for each GOPATH entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchPath {
    goroot: PathBuf,
    gopath: Vec<PathBuf>,
}

impl SearchPath {
    /// Search path with only a Go root; the root is not checked.
    pub fn new(goroot: impl Into<PathBuf>) -> Self {
        Self {
            goroot: goroot.into(),
            gopath: Vec::new(),
        }
    }

    pub fn with_gopath(mut self, roots: impl IntoIterator<Item = PathBuf>) -> Self {
        let goroot = self.goroot.clone();
        self.gopath = roots
            .into_iter()
            .filter(|root| !root.as_os_str().is_empty() && *root != goroot)
            .collect();
        self
    }

    /// Locate the Go installation.
    ///
    /// Uses `goroot` when given, then `$GOROOT`, then `go env GOROOT`.
    /// GOPATH roots come from `$GOPATH`.
    pub fn discover(goroot: Option<PathBuf>) -> Result<Self> {
        let goroot = goroot
            .or_else(|| env::var_os("GOROOT").filter(|v| !v.is_empty()).map(PathBuf::from))
            .or_else(goroot_from_toolchain)
            .ok_or_else(|| {
                Error::config("cannot find the Go root; set GOROOT or pass --goroot")
            })?;

        let src = goroot.join("src");
        if !src.is_dir() {
            return Err(Error::config(format!(
                "{} is not a Go root: missing src directory",
                goroot.display()
            )));
        }

        let gopath: Vec<PathBuf> = env::var_os("GOPATH")
            .map(|v| env::split_paths(&v).collect())
            .unwrap_or_default();

        debug!(goroot = %goroot.display(), gopath = gopath.len(), "discovered search path");
        Ok(Self::new(goroot).with_gopath(gopath))
    }

    pub fn goroot(&self) -> &Path {
        &self.goroot
    }

    /// `$GOROOT/src`, home of the standard library and the command tree
    pub fn goroot_src(&self) -> PathBuf {
        self.goroot.join("src")
    }

    /// Every source root, GOROOT first
    pub fn src_roots(&self) -> Vec<PathBuf> {
        std::iter::once(self.goroot_src())
            .chain(self.gopath.iter().map(|root| root.join("src")))
            .collect()
    }

    /// Directory of the package with this import path, if any root has one
    pub fn find(&self, import_path: &str) -> Option<PathBuf> {
        self.src_roots()
            .into_iter()
            .map(|root| root.join(import_path))
            .find(|dir| dir.is_dir())
    }

    /// Minor version `N` of the `go1.N` release installed at the Go root.
    ///
    /// Read from `$GOROOT/VERSION`, or from the `internal/goversion` package
    /// for development trees.
    pub fn go1_release(&self) -> Option<u32> {
        let from_version_file = fs::read_to_string(self.goroot.join("VERSION"))
            .ok()
            .and_then(|version| version.lines().next().and_then(parse_release));
        if from_version_file.is_some() {
            return from_version_file;
        }
        let source =
            fs::read_to_string(self.goroot_src().join("internal/goversion/goversion.go")).ok()?;
        source.lines().find_map(|line| {
            line.trim()
                .strip_prefix("const Version = ")
                .and_then(|n| n.trim().parse().ok())
        })
    }
}

/// Parse the minor version out of `go1.22.3` or `go1.23rc1`
fn parse_release(version: &str) -> Option<u32> {
    let rest = version.trim().strip_prefix("go1.")?;
    let digits: String = rest.chars().take_while(char::is_ascii_digit).collect();
    digits.parse().ok()
}

fn goroot_from_toolchain() -> Option<PathBuf> {
    let output = Command::new("go").args(["env", "GOROOT"]).output().ok()?;
    if !output.status.success() {
        return None;
    }
    let root = String::from_utf8(output.stdout).ok()?;
    let root = root.trim();
    (!root.is_empty()).then(|| PathBuf::from(root))
}
