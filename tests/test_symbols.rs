#![allow(clippy::unwrap_used)]

//! End-to-end symbol extraction against a miniature Go root.

mod helpers;

use gostdsym::base::Delimiter;
use gostdsym::project::PackageLoader;
use gostdsym::{Error, PackageRef, SymbolExtractor, for_each_package, symbols};
use helpers::*;
use rstest::rstest;

fn extract(config: &gostdsym::Config, path: &str, delimiter: Delimiter) -> Vec<String> {
    SymbolExtractor::new(PackageLoader::new(&config.search_path, &config.context))
        .extract(&PackageRef::from(path), delimiter)
        .unwrap()
}

#[rstest]
#[case("cmp", CMP_SYMBOLS)]
#[case("container/list", LIST_SYMBOLS)]
#[case("errors", ERRORS_SYMBOLS)]
fn test_package_symbols(#[case] path: &str, #[case] expected: &[&str]) {
    let root = fixture_goroot();
    let config = fixture_config(root.path());
    assert_eq!(extract(&config, path, Delimiter::Dot), expected);
}

#[test]
fn test_web_delimiter() {
    let root = fixture_goroot();
    let config = fixture_config(root.path());
    let symbols = extract(&config, "container/list", Delimiter::Hash);
    assert!(symbols.contains(&"container/list#List.Back".to_string()));
    assert!(symbols.contains(&"container/list#New".to_string()));
    assert_eq!(symbols.last().map(String::as_str), Some("container/list"));
}

#[rstest]
#[case("cmp")]
#[case("container/list")]
#[case("errors")]
fn test_delimiter_only_changes_the_separator(#[case] path: &str) {
    let root = fixture_goroot();
    let config = fixture_config(root.path());
    let dotted = extract(&config, path, Delimiter::Dot);
    let hashed = extract(&config, path, Delimiter::Hash);
    assert_eq!(dotted.len(), hashed.len());

    for (dot, hash) in dotted.iter().zip(&hashed) {
        match dot.strip_prefix(&format!("{path}.")) {
            Some(local) => assert_eq!(hash, &format!("{path}#{local}")),
            None => assert_eq!(hash, dot),
        }
    }
}

#[rstest]
#[case("cmp")]
#[case("container/list")]
#[case("errors")]
fn test_symbol_invariants(#[case] path: &str) {
    let root = fixture_goroot();
    let config = fixture_config(root.path());
    let symbols = extract(&config, path, Delimiter::Dot);

    // bare path exactly once, last
    assert_eq!(symbols.iter().filter(|s| *s == path).count(), 1);
    assert_eq!(symbols.last().map(String::as_str), Some(path));

    let prefix = format!("{path}.");
    for symbol in &symbols[..symbols.len() - 1] {
        let local = symbol.strip_prefix(&prefix).unwrap();
        for part in local.split('.') {
            assert_ne!(part, "_", "{symbol}");
            assert!(
                part.chars().next().is_some_and(char::is_uppercase),
                "unexported part in {symbol}"
            );
        }
    }

    // deterministic
    assert_eq!(extract(&config, path, Delimiter::Dot), symbols);
}

#[rstest]
#[case::cgo_disabled(false)]
#[case::cgo_enabled(true)]
fn test_excluded_files_never_contribute(#[case] cgo: bool) {
    let root = fixture_goroot();
    let mut config = fixture_config(root.path());
    config.context = linux_context().with_cgo(cgo);

    let symbols = extract(&config, "container/list", Delimiter::Dot);
    for excluded in [
        "WindowsOnly",
        "CgoOnly",
        "Generate",
        "Future",
        "Plan9Only",
        "Scratch",
        "Example",
        "Data",
    ] {
        assert!(
            !symbols.iter().any(|s| s.ends_with(excluded)),
            "{excluded} leaked into {symbols:?}"
        );
    }
    assert_eq!(symbols, LIST_SYMBOLS);
}

#[test]
fn test_context_selects_platform_files() {
    let root = fixture_goroot();
    let mut config = fixture_config(root.path());
    config.context = linux_context().with_goos("windows");
    let symbols = extract(&config, "container/list", Delimiter::Dot);
    assert!(symbols.contains(&"container/list.WindowsOnly".to_string()));

    config.context = linux_context().with_release(23);
    let symbols = extract(&config, "container/list", Delimiter::Dot);
    assert!(symbols.contains(&"container/list.Future".to_string()));
}

#[test]
fn test_std_listing_output() {
    let root = fixture_goroot();
    let config = fixture_config(root.path());
    let all = symbols(&config, "std").unwrap();

    let expected: Vec<&str> = CMP_SYMBOLS
        .iter()
        .chain(LIST_SYMBOLS)
        .chain(ERRORS_SYMBOLS)
        .copied()
        .collect();
    assert_eq!(all, expected);
}

#[test]
fn test_no_skip_includes_internal_packages() {
    let root = fixture_goroot();
    let config = fixture_config(root.path()).with_skip_internal(false);
    let all = symbols(&config, "std").unwrap();
    assert!(all.contains(&"internal/abi.FuncPCABI0".to_string()));
    assert!(all.contains(&"crypto/internal/fips.Enabled".to_string()));
    assert!(all.contains(&"vendor/golang.org/x/net/dns.Name".to_string()));
    assert!(!all.iter().any(|s| s.starts_with("cmd/")));
}

#[test]
fn test_first_error_stops_the_run() {
    let root = fixture_goroot();
    write(root.path(), "src/zbroken/broken.go", "package zbroken\n\nfunc F( {\n");
    let config = fixture_config(root.path());

    let mut emitted = Vec::new();
    let err = for_each_package(&config, "std", |pkg, _| {
        emitted.push(pkg.to_string());
        Ok(())
    })
    .unwrap_err();

    assert!(matches!(err, Error::Parse { line: 3, .. }), "{err:?}");
    assert!(err.to_string().contains("broken.go:3:"), "{err}");
    assert_eq!(emitted, vec!["cmp", "container/list", "errors"]);
}

#[rstest]
#[case::dangling_operator("func F() {\n\tx := 1 +\n}\n", 5)]
#[case::return_return("func F() {}\n\nfunc G() { return return }\n", 5)]
#[case::bad_initializer("var V = []int{1, 2,,}\n", 3)]
fn test_syntax_errors_inside_bodies(#[case] decls: &str, #[case] line: u32) {
    let root = fixture_goroot();
    write(
        root.path(),
        "src/badexpr/b.go",
        &format!("package badexpr\n\n{decls}"),
    );
    let config = fixture_config(root.path());
    let err = symbols(&config, "badexpr").unwrap_err();
    assert!(matches!(err, Error::Parse { line: l, .. } if l == line), "{err:?}");
    assert!(err.to_string().contains("expected expression"), "{err}");
}

#[rstest]
#[case::missing("nosuch", "is not in GOROOT")]
#[case::no_sources("container", "no buildable Go source files")]
fn test_import_errors(#[case] path: &str, #[case] message: &str) {
    let root = fixture_goroot();
    let config = fixture_config(root.path());
    let err = SymbolExtractor::new(PackageLoader::new(&config.search_path, &config.context))
        .extract(&PackageRef::from(path), Delimiter::Dot)
        .unwrap_err();
    assert!(matches!(err, Error::Import { .. }), "{err:?}");
    assert!(err.to_string().contains(message), "{err}");
}

#[test]
fn test_mixed_package_names() {
    let root = fixture_goroot();
    write(root.path(), "src/mixed/a.go", "package a\n");
    write(root.path(), "src/mixed/b.go", "package b\n");
    let config = fixture_config(root.path());
    let err = symbols(&config, "mixed").unwrap_err();
    assert!(
        err.to_string().contains("found packages a (a.go) and b (b.go)"),
        "{err}"
    );
}
