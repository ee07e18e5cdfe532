#![allow(clippy::unwrap_used)]

//! Package listing against a miniature Go root.

mod helpers;

use gostdsym::project::{PackageLister, SearchPath};
use gostdsym::{Config, Error, PackageRef, is_skip_package};
use helpers::*;
use rstest::rstest;

fn list(config: &Config, pattern: &str) -> Vec<String> {
    PackageLister::new(&config.search_path, &config.context)
        .with_skip_internal(config.skip_internal)
        .list(pattern)
        .unwrap()
        .iter()
        .map(PackageRef::to_string)
        .collect()
}

#[test]
fn test_std_without_internal_packages() {
    let root = fixture_goroot();
    let config = fixture_config(root.path());
    assert_eq!(list(&config, "std"), vec!["cmp", "container/list", "errors"]);
}

#[test]
fn test_std_with_internal_packages() {
    let root = fixture_goroot();
    let config = fixture_config(root.path()).with_skip_internal(false);
    let listed = list(&config, "std");
    assert_eq!(
        listed,
        vec![
            "cmp",
            "container/list",
            "crypto/internal/fips",
            "errors",
            "internal/abi",
            "vendor/golang.org/x/net/dns",
        ]
    );
    let skipped: Vec<&String> = listed.iter().filter(|p| is_skip_package(p)).collect();
    assert_eq!(skipped.len(), 3);
}

#[rstest]
#[case("cmd", vec!["cmd/go"])]
#[case("container/...", vec!["container/list"])]
#[case("crypto/...", vec![])]
#[case("errors", vec!["errors"])]
fn test_patterns(#[case] pattern: &str, #[case] expected: Vec<&str>) {
    let root = fixture_goroot();
    let config = fixture_config(root.path());
    assert_eq!(list(&config, pattern), expected);
}

#[test]
fn test_gopath_packages() {
    let goroot = fixture_goroot();
    let gopath = tempfile::tempdir().unwrap();
    write(gopath.path(), "src/example.com/hello/hello.go", "package hello\n\nfunc Hello() {}\n");

    let search = SearchPath::new(goroot.path()).with_gopath([gopath.path().to_path_buf()]);
    let config = Config::new(search, linux_context());
    assert_eq!(list(&config, "example.com/..."), vec!["example.com/hello"]);
    assert_eq!(
        gostdsym::symbols(&config, "example.com/hello").unwrap(),
        vec!["example.com/hello.Hello", "example.com/hello"]
    );
    // not part of the standard library
    assert!(!list(&config, "std").contains(&"example.com/hello".to_string()));
}

#[test]
fn test_missing_goroot_source() {
    let empty = tempfile::tempdir().unwrap();
    let config = fixture_config(empty.path());
    let err = PackageLister::new(&config.search_path, &config.context)
        .list("std")
        .unwrap_err();
    assert!(matches!(err, Error::Load { .. }), "{err:?}");
}

#[test]
fn test_discover_with_explicit_goroot() {
    let root = fixture_goroot();
    let config = Config::discover_in(Some(root.path().to_path_buf())).unwrap();
    assert_eq!(config.search_path.goroot(), root.path());
    assert!(config.context.match_tag("go1.22"));
    assert!(!config.context.match_tag("go1.23"));
    assert!(config.skip_internal);
}

#[test]
fn test_discover_rejects_non_goroot() {
    let dir = tempfile::tempdir().unwrap();
    let err = Config::discover_in(Some(dir.path().to_path_buf())).unwrap_err();
    assert!(matches!(err, Error::Config(_)), "{err:?}");
}
