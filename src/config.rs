//! Settings for a listing run.

use std::path::PathBuf;

use tracing::debug;

use crate::base::Delimiter;
use crate::base::constants::DEFAULT_GO1_RELEASE;
use crate::error::Result;
use crate::project::{BuildContext, SearchPath};

/// Where packages are found, which files belong to them and how symbols are
/// printed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub search_path: SearchPath,
    pub context: BuildContext,
    pub delimiter: Delimiter,
    /// Drop `internal` and `vendor/` packages from listings
    pub skip_internal: bool,
}

impl Config {
    pub fn new(search_path: SearchPath, context: BuildContext) -> Self {
        Self {
            search_path,
            context,
            delimiter: Delimiter::default(),
            skip_internal: true,
        }
    }

    /// Configuration from the environment: the discovered Go root, the
    /// `GOOS`/`GOARCH`/`CGO_ENABLED` platform and the release tags of the
    /// installed Go version.
    pub fn discover() -> Result<Self> {
        Self::discover_in(None)
    }

    /// Like [`discover`](Self::discover) with an explicit Go root.
    pub fn discover_in(goroot: Option<PathBuf>) -> Result<Self> {
        let search_path = SearchPath::discover(goroot)?;
        let release = search_path.go1_release().unwrap_or(DEFAULT_GO1_RELEASE);
        debug!(release, "release tags up to go1.{release}");
        let context = BuildContext::from_env().with_release(release);
        Ok(Self::new(search_path, context))
    }

    pub fn with_context(mut self, context: BuildContext) -> Self {
        self.context = context;
        self
    }

    pub fn with_delimiter(mut self, delimiter: Delimiter) -> Self {
        self.delimiter = delimiter;
        self
    }

    pub fn with_skip_internal(mut self, skip: bool) -> Self {
        self.skip_internal = skip;
        self
    }
}
