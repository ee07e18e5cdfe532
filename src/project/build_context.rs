//! Target platform and tags used to decide which files belong to a build.

use std::env;

use crate::base::constants::{
    COMPILER, DEFAULT_GO1_RELEASE, GO_EXTENSION, TEST_SUFFIX, is_known_arch, is_known_os, is_unix_os,
};

/// The platform and tag set that file names and build constraints are
/// evaluated against.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildContext {
    pub goos: String,
    pub goarch: String,
    pub cgo_enabled: bool,
    pub compiler: String,
    /// Tags given with `--tags`
    pub build_tags: Vec<String>,
    /// Architecture feature levels such as `amd64.v1`
    pub tool_tags: Vec<String>,
    /// `go1.1` through `go1.N`
    pub release_tags: Vec<String>,
}

impl BuildContext {
    /// Context for an explicit platform with default tags.
    ///
    /// cgo is enabled only when the target is the host platform.
    pub fn for_platform(goos: impl Into<String>, goarch: impl Into<String>) -> Self {
        let goos = goos.into();
        let goarch = goarch.into();
        let cgo_enabled = goos == host_goos() && goarch == host_goarch();
        Self {
            tool_tags: default_tool_tags(&goarch),
            goos,
            goarch,
            cgo_enabled,
            compiler: COMPILER.to_string(),
            build_tags: Vec::new(),
            release_tags: release_tags(DEFAULT_GO1_RELEASE),
        }
    }

    /// Context for the host platform.
    pub fn host() -> Self {
        Self::for_platform(host_goos(), host_goarch())
    }

    /// Context described by `GOOS`, `GOARCH` and `CGO_ENABLED`, falling back
    /// to the host platform.
    pub fn from_env() -> Self {
        let goos = non_empty_var("GOOS").unwrap_or_else(|| host_goos().to_string());
        let goarch = non_empty_var("GOARCH").unwrap_or_else(|| host_goarch().to_string());
        let mut context = Self::for_platform(goos, goarch);
        match non_empty_var("CGO_ENABLED").as_deref() {
            Some("1") => context.cgo_enabled = true,
            Some("0") => context.cgo_enabled = false,
            _ => {}
        }
        context
    }

    pub fn with_goos(mut self, goos: impl Into<String>) -> Self {
        self.goos = goos.into();
        self
    }

    /// Change the architecture; tool tags follow the new architecture.
    pub fn with_goarch(mut self, goarch: impl Into<String>) -> Self {
        self.goarch = goarch.into();
        self.tool_tags = default_tool_tags(&self.goarch);
        self
    }

    pub fn with_cgo(mut self, enabled: bool) -> Self {
        self.cgo_enabled = enabled;
        self
    }

    pub fn with_build_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.build_tags = tags.into_iter().map(Into::into).collect();
        self
    }

    /// Satisfy the release tags `go1.1` through `go1.<minor>`.
    pub fn with_release(mut self, minor: u32) -> Self {
        self.release_tags = release_tags(minor);
        self
    }

    /// Reports whether the build tag `name` is satisfied.
    pub fn match_tag(&self, name: &str) -> bool {
        if name.is_empty() {
            return false;
        }
        if name == "cgo" {
            return self.cgo_enabled;
        }
        if name == self.goos || name == self.goarch || name == self.compiler {
            return true;
        }
        let implied = match self.goos.as_str() {
            "android" => "linux",
            "illumos" => "solaris",
            "ios" => "darwin",
            _ => "",
        };
        if name == implied {
            return true;
        }
        if name == "unix" && is_unix_os(&self.goos) {
            return true;
        }
        let name = if name == "boringcrypto" {
            "goexperiment.boringcrypto"
        } else {
            name
        };
        [&self.build_tags, &self.tool_tags, &self.release_tags]
            .into_iter()
            .flatten()
            .any(|tag| tag == name)
    }

    /// Reports whether the `_GOOS`, `_GOARCH` or `_GOOS_GOARCH` suffix of a
    /// file name, if any, matches this context.
    ///
    /// Everything before the first `_` is ignored, so `linux.go` applies to
    /// every platform while `file_linux.go` does not.
    pub fn good_os_arch_file(&self, file_name: &str) -> bool {
        let stem = file_name
            .split_once('.')
            .map(|(stem, _)| stem)
            .unwrap_or(file_name);
        let Some(index) = stem.find('_') else {
            return true;
        };
        let mut parts: Vec<&str> = stem[index..].split('_').collect();
        if parts.last() == Some(&"test") {
            parts.pop();
        }
        let n = parts.len();
        if n >= 2 && is_known_os(parts[n - 2]) && is_known_arch(parts[n - 1]) {
            return self.match_tag(parts[n - 2]) && self.match_tag(parts[n - 1]);
        }
        if n >= 1 && (is_known_os(parts[n - 1]) || is_known_arch(parts[n - 1])) {
            return self.match_tag(parts[n - 1]);
        }
        true
    }

    /// Reports whether `file_name` looks like a Go source file of the package
    /// itself: a `.go` file that is not a test and not hidden.
    pub fn is_source_name(file_name: &str) -> bool {
        !file_name.starts_with('_')
            && !file_name.starts_with('.')
            && file_name.ends_with(GO_EXTENSION)
            && !file_name.ends_with(TEST_SUFFIX)
    }
}

impl Default for BuildContext {
    fn default() -> Self {
        Self::host()
    }
}

fn non_empty_var(key: &str) -> Option<String> {
    env::var(key).ok().filter(|v| !v.is_empty())
}

fn release_tags(minor: u32) -> Vec<String> {
    (1..=minor).map(|n| format!("go1.{n}")).collect()
}

fn default_tool_tags(goarch: &str) -> Vec<String> {
    let tags: &[&str] = match goarch {
        "amd64" => &["amd64.v1"],
        "arm64" => &["arm64.v8.0"],
        "arm" => &["arm.5", "arm.6", "arm.7"],
        "386" => &["386.sse2"],
        "ppc64" => &["ppc64.power8"],
        "ppc64le" => &["ppc64le.power8"],
        _ => &[],
    };
    tags.iter().map(|t| t.to_string()).collect()
}

/// GOOS name of the platform this binary runs on
pub fn host_goos() -> &'static str {
    match env::consts::OS {
        "macos" => "darwin",
        other => other,
    }
}

/// GOARCH name of the platform this binary runs on
pub fn host_goarch() -> &'static str {
    match env::consts::ARCH {
        "x86_64" => "amd64",
        "x86" => "386",
        "aarch64" => "arm64",
        "powerpc64" if cfg!(target_endian = "little") => "ppc64le",
        "powerpc64" => "ppc64",
        "loongarch64" => "loong64",
        "mips64" if cfg!(target_endian = "little") => "mips64le",
        "mips" if cfg!(target_endian = "little") => "mipsle",
        other => other,
    }
}
