//! Tests for the errors module

use super::*;
use text_size::{TextRange, TextSize};

#[test]
fn test_error_with_hint_display() {
    let range = TextRange::empty(TextSize::new(12));
    let err = SyntaxError::new("expected ';', found 'x'", range, ErrorCode::E0201)
        .with_hint("declarations must be separated by a newline or ';'");
    assert_eq!(err.offset(), TextSize::new(12));
    assert_eq!(
        err.to_string(),
        "expected ';', found 'x' (declarations must be separated by a newline or ';')"
    );
}

#[test]
fn test_from_code_uses_default_message() {
    let err = SyntaxError::from_code(ErrorCode::E0303, TextRange::empty(TextSize::new(0)));
    assert_eq!(err.message, "non-declaration statement outside function body");
    assert_eq!(err.code.category_description(), "declaration error");
}

#[test]
fn test_lexical_codes() {
    assert_eq!(ErrorCode::for_lexical("/* open"), ErrorCode::E0103);
    assert_eq!(ErrorCode::for_lexical("\"open"), ErrorCode::E0102);
    assert_eq!(ErrorCode::for_lexical("`open"), ErrorCode::E0102);
    assert_eq!(ErrorCode::for_lexical("$"), ErrorCode::E0101);
    assert_eq!(ErrorCode::E0102.to_string(), "E0102");
}
