//! Error code definitions for parser diagnostics
//!
//! Error codes follow a naming convention: E{category}{number}
//! - E01xx: Lexical errors (invalid tokens)
//! - E02xx: Structural errors (brackets, semicolons)
//! - E03xx: Declaration errors (names, types, signatures)
//! - E05xx: Package clause and import errors
//! - E09xx: Generic/fallback errors

use std::fmt;

/// Error codes for parser diagnostics
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // =========================================================================
    // E01xx: Lexical errors (invalid tokens)
    // =========================================================================
    /// Invalid or unexpected character in source
    E0101,
    /// Unterminated string literal
    E0102,
    /// Unterminated block comment
    E0103,

    // =========================================================================
    // E02xx: Structural errors (brackets, semicolons)
    // =========================================================================
    /// Missing semicolon or newline between declarations
    E0201,
    /// Unclosed `(`, `[` or `{`
    E0202,
    /// Closing delimiter without a matching opener
    E0203,

    // =========================================================================
    // E03xx: Declaration errors
    // =========================================================================
    /// Missing identifier
    E0301,
    /// Missing or malformed type
    E0302,
    /// Statement outside a function body
    E0303,
    /// Mixed named and unnamed parameters
    E0304,
    /// Missing expression where expected
    E0305,

    // =========================================================================
    // E05xx: Package clause and import errors
    // =========================================================================
    /// Missing package clause
    E0501,
    /// Malformed import
    E0502,

    // =========================================================================
    // E09xx: Generic/fallback errors
    // =========================================================================
    /// Unexpected token
    E0901,
}

impl ErrorCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::E0101 => "E0101",
            Self::E0102 => "E0102",
            Self::E0103 => "E0103",
            Self::E0201 => "E0201",
            Self::E0202 => "E0202",
            Self::E0203 => "E0203",
            Self::E0301 => "E0301",
            Self::E0302 => "E0302",
            Self::E0303 => "E0303",
            Self::E0304 => "E0304",
            Self::E0305 => "E0305",
            Self::E0501 => "E0501",
            Self::E0502 => "E0502",
            Self::E0901 => "E0901",
        }
    }

    pub fn category_description(&self) -> &'static str {
        match self {
            Self::E0101 | Self::E0102 | Self::E0103 => "lexical error",
            Self::E0201 | Self::E0202 | Self::E0203 => "structural error",
            Self::E0301 | Self::E0302 | Self::E0303 | Self::E0304 | Self::E0305 => {
                "declaration error"
            }
            Self::E0501 | Self::E0502 => "package error",
            Self::E0901 => "syntax error",
        }
    }

    pub fn default_message(&self) -> &'static str {
        match self {
            Self::E0101 => "invalid character",
            Self::E0102 => "string literal not terminated",
            Self::E0103 => "comment not terminated",
            Self::E0201 => "missing semicolon or newline",
            Self::E0202 => "unclosed delimiter",
            Self::E0203 => "unexpected closing delimiter",
            Self::E0301 => "expected identifier",
            Self::E0302 => "expected type",
            Self::E0303 => "non-declaration statement outside function body",
            Self::E0304 => "mixed named and unnamed parameters",
            Self::E0305 => "expected expression",
            Self::E0501 => "expected package clause",
            Self::E0502 => "malformed import",
            Self::E0901 => "unexpected token",
        }
    }

    /// Code for a token the lexer rejected
    pub(crate) fn for_lexical(text: &str) -> Self {
        if text.starts_with("/*") {
            Self::E0103
        } else if text.starts_with('"') || text.starts_with('`') {
            Self::E0102
        } else {
            Self::E0101
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
