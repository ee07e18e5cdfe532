//! A miniature Go root written to a temporary directory.

use std::fs;
use std::path::Path;

use gostdsym::Config;
use gostdsym::project::{BuildContext, SearchPath};
use tempfile::TempDir;

pub const ERRORS_GO: &str = r#"// Copyright 2011 The Go Authors. All rights reserved.

// Package errors implements functions to manipulate errors.
package errors

import "internal/reflectlite"

// New returns an error that formats as the given text.
func New(text string) error {
	return &errorString{text}
}

type errorString struct {
	s string
}

func (e *errorString) Error() string {
	return e.s
}

// ErrUnsupported indicates that a requested operation cannot be performed.
var ErrUnsupported = New("unsupported operation")
"#;

pub const WRAP_GO: &str = r#"package errors

import "internal/reflectlite"

func Unwrap(err error) error {
	u, ok := err.(interface {
		Unwrap() error
	})
	if !ok {
		return nil
	}
	return u.Unwrap()
}

func Is(err, target error) bool {
	if err == nil || target == nil {
		return err == target
	}
	isComparable := reflectlite.TypeOf(target).Comparable()
	return is(err, target, isComparable)
}

func is(err, target error, targetComparable bool) bool {
	for {
		if targetComparable && err == target {
			return true
		}
		switch x := err.(type) {
		case interface{ Unwrap() error }:
			err = x.Unwrap()
			if err == nil {
				return false
			}
		default:
			return false
		}
	}
}

func As(err error, target any) bool {
	if err == nil {
		return false
	}
	if target == nil {
		panic("errors: target cannot be nil")
	}
	return as(err, target, reflectlite.ValueOf(target), reflectlite.TypeOf(target).Elem())
}

func as(err error, target any, targetVal reflectlite.Value, targetType reflectlite.Type) bool {
	return false
}

var errorType = reflectlite.TypeOf((*error)(nil)).Elem()
"#;

pub const JOIN_GO: &str = r#"package errors

import "unsafe"

func Join(errs ...error) error {
	n := 0
	for _, err := range errs {
		if err != nil {
			n++
		}
	}
	if n == 0 {
		return nil
	}
	e := &joinError{
		errs: make([]error, 0, n),
	}
	return e
}

type joinError struct {
	errs []error
}

func (e *joinError) Error() string {
	b := []byte{}
	return unsafe.String(&b[0], len(b))
}

func (e *joinError) Unwrap() []error {
	return e.errs
}
"#;

pub const ERRORS_TEST_GO: &str = r#"package errors_test

import "testing"

func TestNewEqual(t *testing.T) {}
"#;

pub const CMP_GO: &str = r#"// Package cmp provides types and functions related to comparing
// ordered values.
package cmp

// Ordered is a constraint that permits any ordered type.
type Ordered interface {
	~int | ~int8 | ~int16 | ~int32 | ~int64 |
		~uint | ~uint8 | ~uint16 | ~uint32 | ~uint64 | ~uintptr |
		~float32 | ~float64 |
		~string
}

func Less[T Ordered](x, y T) bool {
	return (isNaN(x) && !isNaN(y)) || x < y
}

func Compare[T Ordered](x, y T) int {
	xNaN := isNaN(x)
	yNaN := isNaN(y)
	if xNaN {
		if yNaN {
			return 0
		}
		return -1
	}
	if yNaN {
		return +1
	}
	if x < y {
		return -1
	}
	if x > y {
		return +1
	}
	return 0
}

func isNaN[T Ordered](x T) bool {
	return x != x
}

func Or[T comparable](vals ...T) T {
	var zero T
	for _, v := range vals {
		if v != zero {
			return v
		}
	}
	return zero
}
"#;

pub const LIST_GO: &str = r#"// Package list implements a doubly linked list.
package list

// Element is an element of a linked list.
type Element struct {
	next, prev *Element

	// The list to which this element belongs.
	list *List

	// The value stored with this element.
	Value any
}

// Next returns the next list element or nil.
func (e *Element) Next() *Element {
	if p := e.next; e.list != nil && p != &e.list.root {
		return p
	}
	return nil
}

// Prev returns the previous list element or nil.
func (e *Element) Prev() *Element {
	if p := e.prev; e.list != nil && p != &e.list.root {
		return p
	}
	return nil
}

// List represents a doubly linked list.
type List struct {
	root Element
	len  int
}

// Init initializes or clears list l.
func (l *List) Init() *List {
	l.root.next = &l.root
	l.root.prev = &l.root
	l.len = 0
	return l
}

// New returns an initialized list.
func New() *List { return new(List).Init() }

func (l *List) Len() int { return l.len }

func (l *List) Front() *Element {
	if l.len == 0 {
		return nil
	}
	return l.root.next
}

func (l *List) Back() *Element {
	if l.len == 0 {
		return nil
	}
	return l.root.prev
}

func (l *List) lazyInit() {
	if l.root.next == nil {
		l.Init()
	}
}

func (l *List) insert(e, at *Element) *Element {
	e.prev = at
	e.next = at.next
	e.prev.next = e
	e.next.prev = e
	e.list = l
	l.len++
	return e
}

func (l *List) PushBack(v any) *Element {
	l.lazyInit()
	return l.insert(&Element{Value: v}, l.root.prev)
}
"#;

/// Symbols of the fixture packages, `.` delimiter
pub const CMP_SYMBOLS: &[&str] = &["cmp.Ordered", "cmp.Compare", "cmp.Less", "cmp.Or", "cmp"];

pub const LIST_SYMBOLS: &[&str] = &[
    "container/list.Element",
    "container/list.Element.Next",
    "container/list.Element.Prev",
    "container/list.List",
    "container/list.New",
    "container/list.List.Back",
    "container/list.List.Front",
    "container/list.List.Init",
    "container/list.List.Len",
    "container/list.List.PushBack",
    "container/list",
];

pub const ERRORS_SYMBOLS: &[&str] = &[
    "errors.ErrUnsupported",
    "errors.As",
    "errors.Is",
    "errors.Join",
    "errors.New",
    "errors.Unwrap",
    "errors",
];

pub fn write(root: &Path, rel: &str, content: &str) {
    let path = root.join(rel);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
}

/// A Go 1.22 root with `cmp`, `container/list` and `errors`, plus files and
/// packages that must never contribute symbols.
pub fn fixture_goroot() -> TempDir {
    let root = tempfile::tempdir().unwrap();
    let r = root.path();
    write(r, "VERSION", "go1.22.1\ntime 2024-03-05T18:00:00Z\n");
    write(r, "src/go.mod", "module std\n\ngo 1.22\n");

    write(r, "src/cmp/cmp.go", CMP_GO);

    write(r, "src/errors/errors.go", ERRORS_GO);
    write(r, "src/errors/wrap.go", WRAP_GO);
    write(r, "src/errors/join.go", JOIN_GO);
    write(r, "src/errors/errors_test.go", ERRORS_TEST_GO);

    write(r, "src/container/list/list.go", LIST_GO);
    write(
        r,
        "src/container/list/list_windows.go",
        "package list\n\nfunc WindowsOnly() {}\n",
    );
    write(
        r,
        "src/container/list/list_cgo.go",
        "package list\n\n// #include <stdlib.h>\nimport \"C\"\n\nfunc CgoOnly() {}\n",
    );
    write(
        r,
        "src/container/list/gen.go",
        "//go:build ignore\n\npackage main\n\nfunc Generate() {}\n",
    );
    write(
        r,
        "src/container/list/future.go",
        "//go:build go1.23\n\npackage list\n\nfunc Future() {}\n",
    );
    write(
        r,
        "src/container/list/plan9.go",
        "// +build plan9\n\npackage list\n\nfunc Plan9Only() {}\n",
    );
    write(
        r,
        "src/container/list/_scratch.go",
        "package list\n\nfunc Scratch() {}\n",
    );
    write(
        r,
        "src/container/list/example_test.go",
        "package list_test\n\nfunc Example() {}\n",
    );
    write(
        r,
        "src/container/list/testdata/data.go",
        "package data\n\nfunc Data() {}\n",
    );

    write(
        r,
        "src/internal/abi/abi.go",
        "package abi\n\nfunc FuncPCABI0(f any) uintptr { return 0 }\n",
    );
    write(
        r,
        "src/crypto/internal/fips/fips.go",
        "package fips\n\nconst Enabled = false\n",
    );
    write(
        r,
        "src/vendor/golang.org/x/net/dns/dns.go",
        "package dns\n\ntype Name struct{}\n",
    );
    write(r, "src/cmd/go.mod", "module cmd\n");
    write(r, "src/cmd/go/main.go", "package main\n\nfunc Main() {}\n");
    root
}

/// linux/amd64 without cgo, release tags up to go1.22
pub fn linux_context() -> BuildContext {
    BuildContext::for_platform("linux", "amd64")
        .with_cgo(false)
        .with_release(22)
}

pub fn fixture_config(root: &Path) -> Config {
    Config::new(SearchPath::new(root), linux_context())
}
