//! Declaration parser for Go source files
//!
//! This module provides a fast, non-lossless parser using:
//! - **logos** for lexing, with Go's automatic semicolon insertion
//! - a recursive-descent parser that keeps only declaration structure
//!
//! ## Architecture
//!
//! ```text
//! Source Text
//!     ↓
//! Lexer (logos) → Tokens with SyntaxKind, inserted semicolons
//!     ↓
//! Parser → SourceFile (package, imports, declarations)
//!   ├─ stmt: function bodies
//!   └─ expr: initializers and expressions
//!     ↓
//! HIR → DeclarationSet
//! ```
//!
//! Function bodies and initializer expressions are parsed in full so syntax
//! errors anywhere in a file are reported, but only declarations are kept.
//! Comments stay in the token stream so the parser can tell whether a
//! declaration carries a doc comment.

#[allow(clippy::module_inception)]
mod parser;

mod ast;
pub mod errors;
mod expr;
mod lexer;
mod stmt;
mod syntax_kind;

pub use ast::{
    Decl, FileHeader, FuncDecl, ImportSpec, SourceFile, TypeDecl, TypeExpr, TypeSpec, ValueDecl,
    ValueKind, ValueSpec,
};
pub use errors::{ErrorCode, SyntaxError};
pub use lexer::{Lexer, Token, tokenize};
pub use parser::{parse_file, parse_header};
pub use syntax_kind::SyntaxKind;
