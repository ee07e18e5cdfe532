#![allow(clippy::unwrap_used)]

use std::fs;
use std::path::Path;

use rstest::rstest;
use tempfile::TempDir;

use super::*;
use crate::error::Error;

fn linux_amd64() -> BuildContext {
    BuildContext::for_platform("linux", "amd64").with_cgo(false)
}

fn write(root: &Path, rel: &str, content: &str) {
    let path = root.join(rel);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
}

/// A Go root with a handful of packages in `src`
fn fake_goroot() -> TempDir {
    let root = tempfile::tempdir().unwrap();
    let r = root.path();
    write(r, "src/go.mod", "module std\n");
    write(r, "src/cmp/cmp.go", "package cmp\n");
    write(r, "src/errors/errors.go", "package errors\n");
    write(r, "src/errors/errors_test.go", "package errors\n");
    write(r, "src/container/list/list.go", "package list\n");
    write(r, "src/internal/abi/abi.go", "package abi\n");
    write(r, "src/net/http/http.go", "package http\n");
    write(r, "src/net/http/testdata/bad.go", "package bad\n");
    write(r, "src/net/_obsolete/old.go", "package old\n");
    write(r, "src/vendor/golang.org/x/net/dns/dns.go", "package dns\n");
    write(r, "src/unicode/README", "no Go files here\n");
    write(r, "src/example.com/m/m.go", "package m\n");
    write(r, "src/cmd/go.mod", "module cmd\n");
    write(r, "src/cmd/go/main.go", "package main\n");
    write(r, "src/cmd/vet/main.go", "package main\n");
    root
}

fn paths(refs: &[PackageRef]) -> Vec<&str> {
    refs.iter().map(PackageRef::as_str).collect()
}

// =============================================================================
// BuildContext
// =============================================================================

#[rstest]
#[case("linux", true)]
#[case("amd64", true)]
#[case("gc", true)]
#[case("unix", true)]
#[case("amd64.v1", true)]
#[case("go1.1", true)]
#[case("go1.21", true)]
#[case("windows", false)]
#[case("arm64", false)]
#[case("cgo", false)]
#[case("gccgo", false)]
#[case("", false)]
fn test_match_tag(#[case] tag: &str, #[case] expected: bool) {
    assert_eq!(linux_amd64().match_tag(tag), expected, "tag {tag:?}");
}

#[test]
fn test_match_tag_implied_and_custom() {
    let android = BuildContext::for_platform("android", "arm64");
    assert!(android.match_tag("linux"));
    assert!(android.match_tag("arm64.v8.0"));
    assert!(!android.match_tag("amd64.v1"));

    let tagged = linux_amd64().with_build_tags(["purego", "netgo"]);
    assert!(tagged.match_tag("purego"));
    assert!(tagged.match_tag("netgo"));
    assert!(!linux_amd64().match_tag("purego"));

    let windows = linux_amd64().with_goos("windows");
    assert!(!windows.match_tag("unix"));
    assert!(windows.match_tag("windows"));
}

#[test]
fn test_release_tags_follow_minor_version() {
    let old = linux_amd64().with_release(20);
    assert!(old.match_tag("go1.20"));
    assert!(!old.match_tag("go1.21"));
}

#[test]
fn test_with_goarch_updates_tool_tags() {
    let arm = linux_amd64().with_goarch("arm");
    assert!(arm.match_tag("arm.7"));
    assert!(!arm.match_tag("amd64.v1"));
}

#[rstest]
#[case("file.go", true)]
#[case("linux.go", true)]
#[case("file_linux.go", true)]
#[case("file_windows.go", false)]
#[case("file_amd64.go", true)]
#[case("file_arm64.go", false)]
#[case("file_linux_amd64.go", true)]
#[case("file_linux_arm64.go", false)]
#[case("file_windows_amd64.go", false)]
#[case("file_amd64_test.go", true)]
#[case("file_windows_test.go", false)]
#[case("file_foo.go", true)]
fn test_good_os_arch_file(#[case] name: &str, #[case] expected: bool) {
    assert_eq!(linux_amd64().good_os_arch_file(name), expected, "{name}");
}

#[rstest]
#[case("list.go", true)]
#[case("list_test.go", false)]
#[case("_list.go", false)]
#[case(".list.go", false)]
#[case("list.s", false)]
#[case("README", false)]
fn test_is_source_name(#[case] name: &str, #[case] expected: bool) {
    assert_eq!(BuildContext::is_source_name(name), expected);
}

#[test]
fn test_host_platform_names() {
    assert!(!host_goos().is_empty());
    assert!(!host_goarch().is_empty());
    assert_ne!(host_goos(), "macos");
    assert_ne!(host_goarch(), "x86_64");
}

// =============================================================================
// Build constraints
// =============================================================================

#[test]
fn test_parse_go_build_expression() {
    let expr = Constraint::parse_go_build("//go:build linux && (amd64 || arm64)").unwrap();
    let context = linux_amd64();
    assert!(expr.eval(&|tag| context.match_tag(tag)));
    let windows = context.with_goos("windows");
    assert!(!expr.eval(&|tag| windows.match_tag(tag)));
}

#[test]
fn test_parse_go_build_precedence() {
    // && binds tighter than ||
    let expr = Constraint::parse_go_build("//go:build a || b && c").unwrap();
    assert!(expr.eval(&|tag| tag == "a"));
    assert!(!expr.eval(&|tag| tag == "b"));
    assert!(expr.eval(&|tag| tag == "b" || tag == "c"));
}

#[rstest]
#[case("//go:build !!linux", "double negation not allowed")]
#[case("//go:build (linux", "missing close paren")]
#[case("//go:build linux &", "invalid syntax at &")]
#[case("//go:build linux amd64", "unexpected token amd64")]
#[case("//go:build linux &&", "unexpected end of expression")]
#[case("//go:build linux $", "invalid syntax at $")]
fn test_parse_go_build_errors(#[case] line: &str, #[case] message: &str) {
    let err = Constraint::parse_go_build(line).unwrap_err();
    assert!(err.to_string().contains(message), "{line}: {err}");
}

#[test]
fn test_parse_plus_build() {
    let expr = Constraint::parse_plus_build("// +build linux,amd64 darwin").unwrap();
    assert!(expr.eval(&|tag| tag == "linux" || tag == "amd64"));
    assert!(expr.eval(&|tag| tag == "darwin"));
    assert!(!expr.eval(&|tag| tag == "linux"));

    let negated = Constraint::parse_plus_build("// +build !windows").unwrap();
    assert!(negated.eval(&|_| false));

    let malformed = Constraint::parse_plus_build("// +build !!linux").unwrap();
    assert!(!malformed.eval(&|tag| tag == "linux"));

    assert_eq!(Constraint::parse_plus_build("// a comment"), None);
    assert_eq!(Constraint::parse_plus_build("// +builder linux"), None);
}

#[rstest]
#[case::go_build_match("//go:build linux\n\npackage p\n", true)]
#[case::go_build_mismatch("//go:build windows\n\npackage p\n", false)]
#[case::plus_build_mismatch("// +build windows\n\npackage p\n", false)]
#[case::plus_build_match("// +build linux darwin\n\npackage p\n", true)]
#[case::plus_build_needs_blank_line("// +build windows\npackage p\n", true)]
#[case::go_build_wins("//go:build linux\n// +build windows\n\npackage p\n", true)]
#[case::after_package_clause("package p\n\n//go:build windows\n", true)]
#[case::release_tag("//go:build go1.21\n\npackage p\n", true)]
#[case::cgo_disabled("//go:build cgo\n\npackage p\n", false)]
#[case::unix("//go:build unix && !plan9\n\npackage p\n", true)]
#[case::inside_block_comment("/*\n//go:build windows\n*/\n\npackage p\n", true)]
#[case::no_constraint("// Package p does things.\npackage p\n", true)]
fn test_should_build(#[case] content: &str, #[case] expected: bool) {
    assert_eq!(should_build(content, &linux_amd64()).unwrap(), expected);
}

#[test]
fn test_multiple_go_build_lines() {
    let content = "//go:build linux\n//go:build amd64\n\npackage p\n";
    assert_eq!(
        should_build(content, &linux_amd64()),
        Err(ConstraintError::MultipleGoBuild)
    );
}

#[test]
fn test_scan_header_stops_at_package_clause() {
    let content = "// Copyright\n\n//go:build linux\n\npackage p\n\nvar x = 1\n";
    let header = constraint::scan_header(content).unwrap();
    assert_eq!(header.go_build, Some("//go:build linux"));
    assert_eq!(header.leading, "// Copyright\n\n//go:build linux\n\n");
}

// =============================================================================
// PackageLoader
// =============================================================================

fn package_dir(files: &[(&str, &str)]) -> TempDir {
    let dir = tempfile::tempdir().unwrap();
    for (name, content) in files {
        write(dir.path(), name, content);
    }
    dir
}

const MIXED_FILES: &[(&str, &str)] = &[
    ("a.go", "package p\n"),
    ("b_linux.go", "package p\n"),
    ("c_windows.go", "package p\n"),
    ("d.go", "//go:build ignore\n\npackage main\n"),
    ("e_test.go", "package p_test\n"),
    ("_f.go", "package p\n"),
    ("doc.go", "package documentation\n"),
    ("g.go", "package p\n\n// #include <stdio.h>\nimport \"C\"\n"),
    ("h.go", "// +build linux\n\npackage p\n"),
    ("notes.txt", "not go\n"),
];

#[test]
fn test_scan_inclusion_filter() {
    let dir = package_dir(MIXED_FILES);
    let search = SearchPath::new(dir.path());
    let context = linux_amd64();
    let loader = PackageLoader::new(&search, &context);

    let package = loader.import_dir("p", dir.path()).unwrap();
    assert_eq!(package.name, "p");
    assert_eq!(package.go_files, vec!["a.go", "b_linux.go", "h.go"]);
    assert!(package.cgo_files.is_empty());
    assert!(package.ignored_files.contains(&"g.go".to_string()));
    assert!(package.ignored_files.contains(&"doc.go".to_string()));
    assert!(package.ignored_files.contains(&"c_windows.go".to_string()));
    assert!(!package.ignored_files.contains(&"notes.txt".to_string()));
    assert!(package.go_files.iter().any(|f| f == "h.go"));
    assert!(!package.go_files.iter().any(|f| f == "d.go"));
}

#[test]
fn test_scan_with_cgo_enabled() {
    let dir = package_dir(MIXED_FILES);
    let search = SearchPath::new(dir.path());
    let context = linux_amd64().with_cgo(true);
    let package = PackageLoader::new(&search, &context)
        .import_dir("p", dir.path())
        .unwrap();
    assert_eq!(package.cgo_files, vec!["g.go"]);
    assert!(!package.go_files.iter().any(|f| f == "g.go"));
}

#[test]
fn test_scan_without_buildable_files() {
    let dir = package_dir(&[("x_test.go", "package x\n"), ("y_windows.go", "package x\n")]);
    let search = SearchPath::new(dir.path());
    let context = linux_amd64();
    let loader = PackageLoader::new(&search, &context);

    assert_eq!(loader.scan("x", dir.path()).unwrap(), None);
    let err = loader.import_dir("x", dir.path()).unwrap_err();
    assert!(
        err.to_string().contains("no buildable Go source files"),
        "{err}"
    );
}

#[test]
fn test_scan_package_name_mismatch() {
    let dir = package_dir(&[("a.go", "package a\n"), ("b.go", "package b\n")]);
    let search = SearchPath::new(dir.path());
    let context = linux_amd64();
    let err = PackageLoader::new(&search, &context)
        .scan("ab", dir.path())
        .unwrap_err();
    assert!(matches!(err, Error::Import { .. }));
    assert!(
        err.to_string().contains("found packages a (a.go) and b (b.go)"),
        "{err}"
    );
}

#[test]
fn test_scan_reports_bad_header() {
    let dir = package_dir(&[("a.go", "// no package clause\nfunc F() {}\n")]);
    let search = SearchPath::new(dir.path());
    let context = linux_amd64();
    let err = PackageLoader::new(&search, &context)
        .scan("a", dir.path())
        .unwrap_err();
    assert!(matches!(err, Error::Parse { line: 2, .. }), "{err:?}");
}

#[test]
fn test_scan_reports_bad_constraint() {
    let dir = package_dir(&[("a.go", "//go:build linux &&\n\npackage a\n")]);
    let search = SearchPath::new(dir.path());
    let context = linux_amd64();
    let err = PackageLoader::new(&search, &context)
        .scan("a", dir.path())
        .unwrap_err();
    assert!(matches!(err, Error::Import { .. }));
    assert!(err.to_string().contains("parsing //go:build line"), "{err}");
}

#[rstest]
#[case("", "invalid import path")]
#[case("./errors", "local import paths are not supported")]
#[case("/errors", "local import paths are not supported")]
#[case("nosuch", "is not in GOROOT")]
fn test_import_errors(#[case] path: &str, #[case] message: &str) {
    let root = fake_goroot();
    let search = SearchPath::new(root.path());
    let context = linux_amd64();
    let err = PackageLoader::new(&search, &context)
        .import(path)
        .unwrap_err();
    assert!(err.to_string().contains(message), "{path:?}: {err}");
}

#[test]
fn test_import_by_path() {
    let root = fake_goroot();
    let search = SearchPath::new(root.path());
    let context = linux_amd64();
    let package = PackageLoader::new(&search, &context)
        .import("container/list")
        .unwrap();
    assert_eq!(package.import_path, "container/list");
    assert_eq!(package.name, "list");
    assert_eq!(package.dir, root.path().join("src/container/list"));
    assert_eq!(package.go_files, vec!["list.go"]);
}

// =============================================================================
// PackageLister
// =============================================================================

#[rstest]
#[case("internal/abi", true)]
#[case("crypto/internal/fips140", true)]
#[case("internal", true)]
#[case("vendor/golang.org/x/net/dns", true)]
#[case("net/http", false)]
#[case("internals/x", false)]
#[case("cmd/vendor/x", false)]
fn test_is_skip_package(#[case] path: &str, #[case] expected: bool) {
    assert_eq!(is_skip_package(path), expected, "{path}");
}

#[rstest]
#[case("net/...", "net", true)]
#[case("net/...", "net/http", true)]
#[case("net/...", "network", false)]
#[case("net/.../http", "net/x/http", true)]
#[case("net/.../http", "net/http", false)]
#[case("...", "errors", true)]
#[case("...", "vendor/golang.org/x/net", false)]
#[case("x/vendor/...", "x/vendor", true)]
#[case("x/vendor/...", "x/vendor/y", true)]
#[case("errors", "errors", true)]
#[case("errors", "errors/x", false)]
fn test_match_pattern(#[case] pattern: &str, #[case] name: &str, #[case] expected: bool) {
    assert_eq!(match_pattern(pattern, name), expected, "{pattern} ~ {name}");
}

#[test]
fn test_list_std() {
    let root = fake_goroot();
    let search = SearchPath::new(root.path());
    let context = linux_amd64();
    let lister = PackageLister::new(&search, &context);

    let all = lister.list("std").unwrap();
    assert_eq!(
        paths(&all),
        vec![
            "cmp",
            "container/list",
            "errors",
            "internal/abi",
            "net/http",
            "vendor/golang.org/x/net/dns",
        ]
    );

    let public = lister.with_skip_internal(true).list("std").unwrap();
    assert_eq!(
        paths(&public),
        vec!["cmp", "container/list", "errors", "net/http"]
    );
}

#[test]
fn test_list_cmd() {
    let root = fake_goroot();
    let search = SearchPath::new(root.path());
    let context = linux_amd64();
    let listed = PackageLister::new(&search, &context).list("cmd").unwrap();
    assert_eq!(paths(&listed), vec!["cmd/go", "cmd/vet"]);
}

#[rstest]
#[case("container/...", vec!["container/list"])]
#[case("net/...", vec!["net/http"])]
#[case("errors", vec!["errors"])]
#[case("net/ht...", vec!["net/http"])]
#[case("unicode/...", vec![])]
fn test_list_patterns(#[case] pattern: &str, #[case] expected: Vec<&str>) {
    let root = fake_goroot();
    let search = SearchPath::new(root.path());
    let context = linux_amd64();
    let listed = PackageLister::new(&search, &context)
        .list(pattern)
        .unwrap();
    assert_eq!(paths(&listed), expected);
}

#[rstest]
#[case("")]
#[case("net http")]
#[case("net/*")]
#[case("./errors")]
#[case("nosuch")]
fn test_list_rejects(#[case] pattern: &str) {
    let root = fake_goroot();
    let search = SearchPath::new(root.path());
    let context = linux_amd64();
    let err = PackageLister::new(&search, &context)
        .list(pattern)
        .unwrap_err();
    assert!(matches!(err, Error::Load { .. }), "{pattern:?}: {err:?}");
}

#[test]
fn test_list_includes_packages_with_errors() {
    let root = fake_goroot();
    write(root.path(), "src/broken/a.go", "package a\n");
    write(root.path(), "src/broken/b.go", "package b\n");
    let search = SearchPath::new(root.path());
    let context = linux_amd64();
    let listed = PackageLister::new(&search, &context)
        .list("broken/...")
        .unwrap();
    assert_eq!(paths(&listed), vec!["broken"]);
}
