//! Shared fixtures for integration tests.

#![allow(dead_code)]
#![allow(clippy::unwrap_used)]

pub mod goroot;

pub use goroot::*;
