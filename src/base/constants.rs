//! Domain constants shared across the crate.

/// Pattern listed when none is given on the command line.
pub const DEFAULT_PATTERN: &str = "std";

/// Meta-pattern for the command tree of the Go distribution.
pub const CMD_PATTERN: &str = "cmd";

/// Wildcard used in package patterns.
pub const WILDCARD: &str = "...";

/// Extension of Go source files.
pub const GO_EXTENSION: &str = ".go";

/// Suffix of Go test files, never part of a package's inclusion filter.
pub const TEST_SUFFIX: &str = "_test.go";

/// Import path of the cgo pseudo-package.
pub const CGO_IMPORT: &str = "C";

/// Package name reserved for documentation-only files.
pub const DOCUMENTATION_PACKAGE: &str = "documentation";

/// Compiler tag that is always satisfied.
pub const COMPILER: &str = "gc";

/// Highest `go1.N` release tag assumed when the Go distribution does not say.
pub const DEFAULT_GO1_RELEASE: u32 = 25;

/// Directory names never descended into while listing packages.
pub const TESTDATA_DIR: &str = "testdata";

/// Operating systems recognised in file name suffixes and build tags.
pub const KNOWN_OS: &[&str] = &[
    "aix", "android", "darwin", "dragonfly", "freebsd", "hurd", "illumos", "ios", "js", "linux",
    "nacl", "netbsd", "openbsd", "plan9", "solaris", "wasip1", "windows", "zos",
];

/// Operating systems satisfying the `unix` build tag.
pub const UNIX_OS: &[&str] = &[
    "aix", "android", "darwin", "dragonfly", "freebsd", "hurd", "illumos", "ios", "linux",
    "netbsd", "openbsd", "solaris",
];

/// Architectures recognised in file name suffixes and build tags.
pub const KNOWN_ARCH: &[&str] = &[
    "386", "amd64", "amd64p32", "arm", "armbe", "arm64", "arm64be", "loong64", "mips", "mipsle",
    "mips64", "mips64le", "mips64p32", "mips64p32le", "ppc", "ppc64", "ppc64le", "riscv",
    "riscv64", "s390", "s390x", "sparc", "sparc64", "wasm",
];

/// Predeclared Go types. Values, factories and methods bound to one of these
/// names belong to the package, not to a type.
pub const PREDECLARED_TYPES: &[&str] = &[
    "any", "bool", "byte", "comparable", "complex64", "complex128", "error", "float32",
    "float64", "int", "int8", "int16", "int32", "int64", "rune", "string", "uint", "uint8",
    "uint16", "uint32", "uint64", "uintptr",
];

pub fn is_known_os(name: &str) -> bool {
    KNOWN_OS.contains(&name)
}

pub fn is_known_arch(name: &str) -> bool {
    KNOWN_ARCH.contains(&name)
}

pub fn is_unix_os(name: &str) -> bool {
    UNIX_OS.contains(&name)
}

pub fn is_predeclared_type(name: &str) -> bool {
    PREDECLARED_TYPES.contains(&name)
}
