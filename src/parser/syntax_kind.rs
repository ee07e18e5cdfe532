//! Token kinds for Go source text
//!
//! The declaration parser only needs token-level structure, so there are no
//! node kinds here: every kind is a leaf produced by the lexer.

/// All token kinds produced by the Go lexer
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u16)]
#[allow(non_camel_case_types)]
pub enum SyntaxKind {
    // =========================================================================
    // TRIVIA (whitespace and comments - skipped by the parser)
    // =========================================================================
    WHITESPACE = 0,
    NEWLINE,
    LINE_COMMENT,
    BLOCK_COMMENT,

    // =========================================================================
    // LITERALS
    // =========================================================================
    IDENT,  // name
    NUMBER, // 42, 0x2A, 1.5e3, 2i
    CHAR,   // 'a'
    STRING, // "hello" or `raw`

    // =========================================================================
    // PUNCTUATION
    // =========================================================================
    L_PAREN,     // (
    R_PAREN,     // )
    L_BRACKET,   // [
    R_BRACKET,   // ]
    L_BRACE,     // {
    R_BRACE,     // }
    COMMA,       // ,
    DOT,         // .
    ELLIPSIS,    // ...
    SEMICOLON,   // ; (explicit or inserted at a line end)
    COLON,       // :
    STAR,        // *
    EQ,          // =
    TILDE,       // ~
    ARROW,       // <-
    PLUS_PLUS,   // ++
    MINUS_MINUS, // --
    OPERATOR,    // any other operator

    // =========================================================================
    // KEYWORDS
    // =========================================================================
    BREAK_KW,
    CASE_KW,
    CHAN_KW,
    CONST_KW,
    CONTINUE_KW,
    DEFAULT_KW,
    DEFER_KW,
    ELSE_KW,
    FALLTHROUGH_KW,
    FOR_KW,
    FUNC_KW,
    GO_KW,
    GOTO_KW,
    IF_KW,
    IMPORT_KW,
    INTERFACE_KW,
    MAP_KW,
    PACKAGE_KW,
    RANGE_KW,
    RETURN_KW,
    SELECT_KW,
    STRUCT_KW,
    SWITCH_KW,
    TYPE_KW,
    VAR_KW,

    // =========================================================================
    // SPECIAL
    // =========================================================================
    ERROR,
    EOF,
}

impl SyntaxKind {
    /// Check if this is a trivia token (whitespace, newline or comment)
    pub fn is_trivia(self) -> bool {
        matches!(
            self,
            Self::WHITESPACE | Self::NEWLINE | Self::LINE_COMMENT | Self::BLOCK_COMMENT
        )
    }

    /// Check if this is a comment
    pub fn is_comment(self) -> bool {
        matches!(self, Self::LINE_COMMENT | Self::BLOCK_COMMENT)
    }

    /// Check if this is a literal
    pub fn is_literal(self) -> bool {
        matches!(self, Self::NUMBER | Self::CHAR | Self::STRING)
    }

    /// Check if a line break after this token ends the statement.
    ///
    /// These are exactly the tokens after which Go inserts a semicolon.
    pub fn ends_statement(self) -> bool {
        self == Self::IDENT
            || self.is_literal()
            || matches!(
                self,
                Self::BREAK_KW
                    | Self::CONTINUE_KW
                    | Self::FALLTHROUGH_KW
                    | Self::RETURN_KW
                    | Self::PLUS_PLUS
                    | Self::MINUS_MINUS
                    | Self::R_PAREN
                    | Self::R_BRACKET
                    | Self::R_BRACE
            )
    }

    /// Check if this token can start a type expression
    pub fn starts_type(self) -> bool {
        matches!(
            self,
            Self::IDENT
                | Self::STAR
                | Self::L_BRACKET
                | Self::L_PAREN
                | Self::ARROW
                | Self::MAP_KW
                | Self::CHAN_KW
                | Self::FUNC_KW
                | Self::STRUCT_KW
                | Self::INTERFACE_KW
        )
    }
}
