//! Logos-based lexer for Go
//!
//! Fast tokenization using the logos crate, plus Go's automatic semicolon
//! insertion: a line break after an identifier, literal, one of the keywords
//! `break continue fallthrough return`, `++`, `--` or a closing bracket is
//! reported as a [`SyntaxKind::SEMICOLON`].

use super::syntax_kind::SyntaxKind;
use logos::Logos;
use text_size::{TextRange, TextSize};

/// A token with its kind, text, and position
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token<'a> {
    pub kind: SyntaxKind,
    pub text: &'a str,
    pub offset: TextSize,
}

impl Token<'_> {
    /// Range covered by this token
    pub fn range(&self) -> TextRange {
        TextRange::at(self.offset, TextSize::of(self.text))
    }

    /// True for semicolons the lexer inserted rather than read
    pub fn is_implicit_semicolon(&self) -> bool {
        self.kind == SyntaxKind::SEMICOLON && self.text != ";"
    }

    /// True for tokens that end a source line
    pub fn is_line_break(&self) -> bool {
        self.kind == SyntaxKind::NEWLINE
            || (self.kind == SyntaxKind::SEMICOLON && self.text == "\n")
    }
}

/// Lexer wrapping the logos-generated tokenizer
pub struct Lexer<'a> {
    inner: logos::Lexer<'a, LogosToken>,
    insert_semi: bool,
    pending: Option<Token<'a>>,
}

impl<'a> Lexer<'a> {
    pub fn new(input: &'a str) -> Self {
        Self {
            inner: LogosToken::lexer(input),
            insert_semi: false,
            pending: None,
        }
    }

    fn implicit_semicolon(text: &'a str, offset: TextSize) -> Token<'a> {
        Token {
            kind: SyntaxKind::SEMICOLON,
            text,
            offset,
        }
    }
}

impl<'a> Iterator for Lexer<'a> {
    type Item = Token<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        if let Some(token) = self.pending.take() {
            return Some(token);
        }

        let Some(logos_token) = self.inner.next() else {
            if self.insert_semi {
                self.insert_semi = false;
                let end = TextSize::of(self.inner.source());
                return Some(Self::implicit_semicolon("", end));
            }
            return None;
        };

        let text = self.inner.slice();
        let offset = TextSize::new(self.inner.span().start as u32);
        let kind = match logos_token {
            Ok(t) => t.into(),
            Err(()) => SyntaxKind::ERROR,
        };
        let token = Token { kind, text, offset };

        if self.insert_semi {
            match kind {
                SyntaxKind::NEWLINE => {
                    self.insert_semi = false;
                    return Some(Self::implicit_semicolon(text, offset));
                }
                SyntaxKind::LINE_COMMENT => {
                    self.insert_semi = false;
                    self.pending = Some(token);
                    return Some(Self::implicit_semicolon("", offset));
                }
                SyntaxKind::BLOCK_COMMENT if text.contains('\n') => {
                    self.insert_semi = false;
                    self.pending = Some(token);
                    return Some(Self::implicit_semicolon("", offset));
                }
                _ => {}
            }
        }

        if !kind.is_trivia() {
            self.insert_semi = kind.ends_statement();
        }
        Some(token)
    }
}

/// Tokenize an entire string into a Vec
pub fn tokenize(input: &str) -> Vec<Token<'_>> {
    Lexer::new(input).collect()
}

/// Logos token enum - maps to SyntaxKind
#[derive(Logos, Debug, Clone, Copy, PartialEq)]
pub enum LogosToken {
    // =========================================================================
    // TRIVIA
    // =========================================================================
    #[regex(r"[ \t\r\f\x{FEFF}]+")]
    Whitespace,

    #[token("\n")]
    Newline,

    #[regex(r"//[^\n]*")]
    LineComment,

    #[regex(r"/\*([^*]|\*+[^*/])*\*+/")]
    BlockComment,

    // =========================================================================
    // LITERALS
    // =========================================================================
    #[regex(r"[\p{L}_][\p{L}\p{Nd}_]*")]
    Ident,

    #[regex(r"[0-9][0-9_]*(\.[0-9_]*)?([eE][+-]?[0-9_]+)?i?")]
    #[regex(r"\.[0-9][0-9_]*([eE][+-]?[0-9_]+)?i?")]
    #[regex(r"0[xX][0-9a-fA-F_]*(\.[0-9a-fA-F_]*)?([pP][+-]?[0-9_]+)?i?")]
    #[regex(r"0[bBoO][0-9_]+i?")]
    Number,

    #[regex(r"'([^'\\\n]|\\.)+'")]
    Char,

    #[regex(r#""([^"\\\n]|\\.)*""#)]
    #[regex(r"`[^`]*`")]
    String,

    // =========================================================================
    // UNTERMINATED (reported as errors)
    // =========================================================================
    #[regex(r"/\*([^*]|\*+[^*/])*\**")]
    UnterminatedComment,

    #[regex(r#""([^"\\\n]|\\.)*"#)]
    #[regex(r"`[^`]*")]
    UnterminatedString,

    // =========================================================================
    // PUNCTUATION
    // =========================================================================
    #[token("(")]
    LParen,
    #[token(")")]
    RParen,
    #[token("[")]
    LBracket,
    #[token("]")]
    RBracket,
    #[token("{")]
    LBrace,
    #[token("}")]
    RBrace,
    #[token(",")]
    Comma,
    #[token(".")]
    Dot,
    #[token("...")]
    Ellipsis,
    #[token(";")]
    Semicolon,
    #[token(":")]
    Colon,
    #[token("*")]
    Star,
    #[token("=")]
    Eq,
    #[token("~")]
    Tilde,
    #[token("<-")]
    Arrow,
    #[token("++")]
    PlusPlus,
    #[token("--")]
    MinusMinus,

    #[token("+")]
    #[token("-")]
    #[token("/")]
    #[token("%")]
    #[token("&")]
    #[token("|")]
    #[token("^")]
    #[token("<<")]
    #[token(">>")]
    #[token("&^")]
    #[token("+=")]
    #[token("-=")]
    #[token("*=")]
    #[token("/=")]
    #[token("%=")]
    #[token("&=")]
    #[token("|=")]
    #[token("^=")]
    #[token("<<=")]
    #[token(">>=")]
    #[token("&^=")]
    #[token("&&")]
    #[token("||")]
    #[token("==")]
    #[token("!=")]
    #[token("<")]
    #[token("<=")]
    #[token(">")]
    #[token(">=")]
    #[token("!")]
    #[token(":=")]
    Operator,

    // =========================================================================
    // KEYWORDS
    // =========================================================================
    #[token("break")]
    BreakKw,
    #[token("case")]
    CaseKw,
    #[token("chan")]
    ChanKw,
    #[token("const")]
    ConstKw,
    #[token("continue")]
    ContinueKw,
    #[token("default")]
    DefaultKw,
    #[token("defer")]
    DeferKw,
    #[token("else")]
    ElseKw,
    #[token("fallthrough")]
    FallthroughKw,
    #[token("for")]
    ForKw,
    #[token("func")]
    FuncKw,
    #[token("go")]
    GoKw,
    #[token("goto")]
    GotoKw,
    #[token("if")]
    IfKw,
    #[token("import")]
    ImportKw,
    #[token("interface")]
    InterfaceKw,
    #[token("map")]
    MapKw,
    #[token("package")]
    PackageKw,
    #[token("range")]
    RangeKw,
    #[token("return")]
    ReturnKw,
    #[token("select")]
    SelectKw,
    #[token("struct")]
    StructKw,
    #[token("switch")]
    SwitchKw,
    #[token("type")]
    TypeKw,
    #[token("var")]
    VarKw,
}

impl From<LogosToken> for SyntaxKind {
    fn from(token: LogosToken) -> Self {
        use LogosToken::*;
        match token {
            // Trivia
            Whitespace => SyntaxKind::WHITESPACE,
            Newline => SyntaxKind::NEWLINE,
            LineComment => SyntaxKind::LINE_COMMENT,
            BlockComment => SyntaxKind::BLOCK_COMMENT,

            // Literals
            Ident => SyntaxKind::IDENT,
            Number => SyntaxKind::NUMBER,
            Char => SyntaxKind::CHAR,
            String => SyntaxKind::STRING,

            UnterminatedComment | UnterminatedString => SyntaxKind::ERROR,

            // Punctuation
            LParen => SyntaxKind::L_PAREN,
            RParen => SyntaxKind::R_PAREN,
            LBracket => SyntaxKind::L_BRACKET,
            RBracket => SyntaxKind::R_BRACKET,
            LBrace => SyntaxKind::L_BRACE,
            RBrace => SyntaxKind::R_BRACE,
            Comma => SyntaxKind::COMMA,
            Dot => SyntaxKind::DOT,
            Ellipsis => SyntaxKind::ELLIPSIS,
            Semicolon => SyntaxKind::SEMICOLON,
            Colon => SyntaxKind::COLON,
            Star => SyntaxKind::STAR,
            Eq => SyntaxKind::EQ,
            Tilde => SyntaxKind::TILDE,
            Arrow => SyntaxKind::ARROW,
            PlusPlus => SyntaxKind::PLUS_PLUS,
            MinusMinus => SyntaxKind::MINUS_MINUS,
            Operator => SyntaxKind::OPERATOR,

            // Keywords
            BreakKw => SyntaxKind::BREAK_KW,
            CaseKw => SyntaxKind::CASE_KW,
            ChanKw => SyntaxKind::CHAN_KW,
            ConstKw => SyntaxKind::CONST_KW,
            ContinueKw => SyntaxKind::CONTINUE_KW,
            DefaultKw => SyntaxKind::DEFAULT_KW,
            DeferKw => SyntaxKind::DEFER_KW,
            ElseKw => SyntaxKind::ELSE_KW,
            FallthroughKw => SyntaxKind::FALLTHROUGH_KW,
            ForKw => SyntaxKind::FOR_KW,
            FuncKw => SyntaxKind::FUNC_KW,
            GoKw => SyntaxKind::GO_KW,
            GotoKw => SyntaxKind::GOTO_KW,
            IfKw => SyntaxKind::IF_KW,
            ImportKw => SyntaxKind::IMPORT_KW,
            InterfaceKw => SyntaxKind::INTERFACE_KW,
            MapKw => SyntaxKind::MAP_KW,
            PackageKw => SyntaxKind::PACKAGE_KW,
            RangeKw => SyntaxKind::RANGE_KW,
            ReturnKw => SyntaxKind::RETURN_KW,
            SelectKw => SyntaxKind::SELECT_KW,
            StructKw => SyntaxKind::STRUCT_KW,
            SwitchKw => SyntaxKind::SWITCH_KW,
            TypeKw => SyntaxKind::TYPE_KW,
            VarKw => SyntaxKind::VAR_KW,
        }
    }
}
