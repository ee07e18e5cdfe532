//! Recursive descent parser for Go declarations
//!
//! Builds a [`SourceFile`] from tokens. Function bodies and initializer
//! expressions are fully checked (see the `stmt` and `expr` modules) but
//! only the declaration structure is kept. Parsing stops at the first error.

use smol_str::SmolStr;
use text_size::{TextRange, TextSize};

use super::ast::{
    Decl, FileHeader, FuncDecl, ImportSpec, SourceFile, TypeDecl, TypeExpr, TypeSpec, ValueDecl,
    ValueKind, ValueSpec,
};
use super::errors::{ErrorCode, SyntaxError};
use super::lexer::{Lexer, Token};
use super::syntax_kind::SyntaxKind;

pub(super) type ParseResult<T> = Result<T, SyntaxError>;

/// Parse a complete Go source file
pub fn parse_file(input: &str) -> Result<SourceFile, SyntaxError> {
    let tokens: Vec<_> = Lexer::new(input).collect();
    if let Some(bad) = tokens.iter().find(|t| t.kind == SyntaxKind::ERROR) {
        return Err(lexical_error(bad));
    }
    Parser::new(&tokens, input).parse_source_file()
}

/// Parse only the package clause and the import declarations.
///
/// Anything after the last import is ignored, including syntax errors.
pub fn parse_header(input: &str) -> Result<FileHeader, SyntaxError> {
    let tokens: Vec<_> = Lexer::new(input).collect();
    Parser::new(&tokens, input).parse_header()
}

fn lexical_error(token: &Token<'_>) -> SyntaxError {
    let code = ErrorCode::for_lexical(token.text);
    let message = match code {
        ErrorCode::E0101 => format!("invalid character {:?}", token.text),
        other => other.default_message().to_string(),
    };
    SyntaxError::new(message, token.range(), code)
}

/// One entry of a parameter list before names and types are paired up
enum Param {
    /// A lone identifier: a parameter name or a type name
    Bare(SmolStr),
    Named(TypeExpr),
    Type(TypeExpr),
}

/// The parser state
pub(super) struct Parser<'t, 'a> {
    tokens: &'t [Token<'a>],
    /// Indices of non-trivia tokens
    significant: Vec<usize>,
    pos: usize,
    eof: TextSize,
    /// Below zero inside an `if`, `for` or `switch` header, where `T {`
    /// opens the block rather than a composite literal
    expr_lev: i32,
}

impl<'t, 'a> Parser<'t, 'a> {
    fn new(tokens: &'t [Token<'a>], input: &str) -> Self {
        let significant = tokens
            .iter()
            .enumerate()
            .filter(|(_, t)| !t.kind.is_trivia())
            .map(|(i, _)| i)
            .collect();
        Self {
            tokens,
            significant,
            pos: 0,
            eof: TextSize::of(input),
            expr_lev: 0,
        }
    }

    // =========================================================================
    // Token inspection
    // =========================================================================

    fn current(&self) -> Option<&Token<'a>> {
        self.significant.get(self.pos).map(|&i| &self.tokens[i])
    }

    pub(super) fn current_kind(&self) -> SyntaxKind {
        self.nth(0)
    }

    pub(super) fn current_text(&self) -> &'a str {
        self.current().map(|t| t.text).unwrap_or("")
    }

    fn current_range(&self) -> TextRange {
        self.current()
            .map(Token::range)
            .unwrap_or_else(|| TextRange::empty(self.eof))
    }

    pub(super) fn at(&self, kind: SyntaxKind) -> bool {
        self.current_kind() == kind
    }

    pub(super) fn at_any(&self, kinds: &[SyntaxKind]) -> bool {
        kinds.contains(&self.current_kind())
    }

    fn at_eof(&self) -> bool {
        self.pos >= self.significant.len()
    }

    /// Look ahead over significant tokens; `nth(0)` is the current one
    pub(super) fn nth(&self, n: usize) -> SyntaxKind {
        self.significant
            .get(self.pos + n)
            .map(|&i| self.tokens[i].kind)
            .unwrap_or(SyntaxKind::EOF)
    }

    /// Kind of the token after the bracket group opening at `nth(n)`
    fn nth_after_brackets(&self, n: usize) -> SyntaxKind {
        let mut depth = 0usize;
        let mut i = n;
        loop {
            match self.nth(i) {
                SyntaxKind::L_BRACKET | SyntaxKind::L_PAREN | SyntaxKind::L_BRACE => depth += 1,
                SyntaxKind::R_BRACKET | SyntaxKind::R_PAREN | SyntaxKind::R_BRACE => {
                    depth = depth.saturating_sub(1);
                    if depth == 0 {
                        return self.nth(i + 1);
                    }
                }
                SyntaxKind::EOF => return SyntaxKind::EOF,
                _ => {}
            }
            i += 1;
        }
    }

    /// Whether the bracket group at the current token has a top-level comma
    fn brackets_contain_comma(&self) -> bool {
        let mut depth = 0usize;
        let mut i = 0;
        loop {
            match self.nth(i) {
                SyntaxKind::L_BRACKET | SyntaxKind::L_PAREN | SyntaxKind::L_BRACE => depth += 1,
                SyntaxKind::R_BRACKET | SyntaxKind::R_PAREN | SyntaxKind::R_BRACE => {
                    depth = depth.saturating_sub(1);
                    if depth == 0 {
                        return false;
                    }
                }
                SyntaxKind::COMMA if depth == 1 => return true,
                SyntaxKind::EOF => return false,
                _ => {}
            }
            i += 1;
        }
    }

    // =========================================================================
    // Token consumption
    // =========================================================================

    pub(super) fn bump(&mut self) {
        if !self.at_eof() {
            self.pos += 1;
        }
    }

    pub(super) fn eat(&mut self, kind: SyntaxKind) -> bool {
        if self.at(kind) {
            self.bump();
            true
        } else {
            false
        }
    }

    pub(super) fn expect(&mut self, kind: SyntaxKind) -> ParseResult<TextRange> {
        if self.at(kind) {
            let range = self.current_range();
            self.bump();
            Ok(range)
        } else {
            let code = match kind {
                SyntaxKind::R_PAREN | SyntaxKind::R_BRACKET | SyntaxKind::R_BRACE => {
                    ErrorCode::E0202
                }
                SyntaxKind::IDENT => ErrorCode::E0301,
                _ => ErrorCode::E0901,
            };
            Err(self.error_expected(spelling(kind), code))
        }
    }

    pub(super) fn expect_ident(&mut self) -> ParseResult<SmolStr> {
        if self.at(SyntaxKind::IDENT) {
            let name = SmolStr::new(self.current_text());
            self.bump();
            Ok(name)
        } else {
            Err(self.error_expected("identifier", ErrorCode::E0301))
        }
    }

    /// Consume the `;` ending a declaration or spec.
    ///
    /// The semicolon may be omitted before a closing `)` or `}` and at EOF.
    fn expect_semi(&mut self) -> ParseResult<()> {
        match self.current_kind() {
            SyntaxKind::SEMICOLON => {
                self.bump();
                Ok(())
            }
            SyntaxKind::R_PAREN | SyntaxKind::R_BRACE | SyntaxKind::EOF => Ok(()),
            _ => Err(self
                .error_expected("';'", ErrorCode::E0201)
                .with_hint("declarations must be separated by a newline or ';'")),
        }
    }

    // =========================================================================
    // Error handling
    // =========================================================================

    fn describe_current(&self) -> String {
        match self.current() {
            None => "EOF".to_string(),
            Some(t) if t.is_implicit_semicolon() => "newline".to_string(),
            Some(t) => format!("'{}'", t.text),
        }
    }

    pub(super) fn error(&self, message: impl Into<String>, code: ErrorCode) -> SyntaxError {
        if let Some(token) = self.current().filter(|t| t.kind == SyntaxKind::ERROR) {
            return lexical_error(token);
        }
        SyntaxError::new(message, self.current_range(), code)
    }

    pub(super) fn error_expected(&self, what: &str, code: ErrorCode) -> SyntaxError {
        self.error(format!("expected {what}, found {}", self.describe_current()), code)
    }

    // =========================================================================
    // Expression level
    // =========================================================================

    /// Run `f` inside a bracket pair, where composite literals are unambiguous
    pub(super) fn nested<T>(
        &mut self,
        f: impl FnOnce(&mut Self) -> ParseResult<T>,
    ) -> ParseResult<T> {
        self.expr_lev += 1;
        let result = f(self);
        self.expr_lev -= 1;
        result
    }

    /// Run `f` over the header of an `if`, `for` or `switch` statement
    pub(super) fn control_clause<T>(
        &mut self,
        f: impl FnOnce(&mut Self) -> ParseResult<T>,
    ) -> ParseResult<T> {
        let saved = self.expr_lev;
        self.expr_lev = -1;
        let result = f(self);
        self.expr_lev = saved;
        result
    }

    pub(super) fn composite_allowed(&self) -> bool {
        self.expr_lev >= 0
    }

    // =========================================================================
    // Skipping
    // =========================================================================

    /// Skip a bracket group starting at the current opener, through its closer
    fn skip_balanced(&mut self) -> ParseResult<()> {
        let mut stack: Vec<SyntaxKind> = Vec::new();
        loop {
            let kind = self.current_kind();
            match kind {
                SyntaxKind::L_PAREN | SyntaxKind::L_BRACKET | SyntaxKind::L_BRACE => {
                    stack.push(kind)
                }
                SyntaxKind::R_PAREN | SyntaxKind::R_BRACKET | SyntaxKind::R_BRACE => {
                    let open = stack.pop();
                    if open.map(closer_of) != Some(kind) {
                        let expected = open.map(closer_of).unwrap_or(kind);
                        return Err(self.error_expected(spelling(expected), ErrorCode::E0203));
                    }
                    if stack.is_empty() {
                        self.bump();
                        return Ok(());
                    }
                }
                SyntaxKind::EOF => {
                    let expected = stack.last().copied().map(closer_of).unwrap_or(kind);
                    return Err(self.error_expected(spelling(expected), ErrorCode::E0202));
                }
                _ => {}
            }
            if stack.is_empty() {
                // not positioned on an opener
                return Err(self.error_expected("'('", ErrorCode::E0901));
            }
            self.bump();
        }
    }

    /// Skip tokens up to (not including) a top-level token in `stop`.
    ///
    /// A closing bracket that does not belong to the skipped tokens also
    /// ends the run; the caller decides whether it is legal there.
    fn skip_until(&mut self, stop: &[SyntaxKind]) -> ParseResult<()> {
        let mut stack: Vec<SyntaxKind> = Vec::new();
        loop {
            let kind = self.current_kind();
            if stack.is_empty() && stop.contains(&kind) {
                return Ok(());
            }
            match kind {
                SyntaxKind::L_PAREN | SyntaxKind::L_BRACKET | SyntaxKind::L_BRACE => {
                    stack.push(kind)
                }
                SyntaxKind::R_PAREN | SyntaxKind::R_BRACKET | SyntaxKind::R_BRACE => {
                    match stack.pop() {
                        None => return Ok(()),
                        Some(open) if closer_of(open) == kind => {}
                        Some(open) => {
                            return Err(self
                                .error_expected(spelling(closer_of(open)), ErrorCode::E0203));
                        }
                    }
                }
                SyntaxKind::EOF => {
                    return match stack.last() {
                        Some(&open) => {
                            Err(self.error_expected(spelling(closer_of(open)), ErrorCode::E0202))
                        }
                        None => Ok(()),
                    };
                }
                _ => {}
            }
            self.bump();
        }
    }

    // =========================================================================
    // Source file
    // =========================================================================

    /// SourceFile = PackageClause ";" { ImportDecl ";" } { TopLevelDecl ";" }
    fn parse_source_file(&mut self) -> ParseResult<SourceFile> {
        let FileHeader { package, imports } = self.parse_header()?;
        let mut decls = Vec::new();

        while !self.at_eof() {
            let decl = match self.current_kind() {
                SyntaxKind::CONST_KW | SyntaxKind::VAR_KW => Decl::Value(self.parse_value_decl()?),
                SyntaxKind::TYPE_KW => Decl::Type(self.parse_type_decl()?),
                SyntaxKind::FUNC_KW => Decl::Func(self.parse_func_decl()?),
                SyntaxKind::IMPORT_KW => {
                    return Err(self.error(
                        "imports must appear before other declarations",
                        ErrorCode::E0502,
                    ));
                }
                _ => return Err(self.error_expected("declaration", ErrorCode::E0303)),
            };
            decls.push(decl);
            if !self.at_eof() {
                self.expect_semi()?;
            }
        }

        Ok(SourceFile {
            package,
            imports,
            decls,
        })
    }

    fn parse_header(&mut self) -> ParseResult<FileHeader> {
        if !self.at(SyntaxKind::PACKAGE_KW) {
            return Err(self.error_expected("'package'", ErrorCode::E0501));
        }
        self.bump();
        let package = self.expect_ident()?;
        if package == "_" {
            return Err(self.error("invalid package name _", ErrorCode::E0501));
        }
        self.expect_semi()?;

        let mut imports = Vec::new();
        while self.at(SyntaxKind::IMPORT_KW) {
            self.bump();
            let specs = self.parse_group(Self::parse_import_spec)?;
            imports.extend(specs);
            self.expect_semi()?;
        }

        Ok(FileHeader { package, imports })
    }

    /// A single spec, or a parenthesized `;`-separated list of them
    fn parse_group<T>(
        &mut self,
        mut spec: impl FnMut(&mut Self) -> ParseResult<T>,
    ) -> ParseResult<Vec<T>> {
        let mut items = Vec::new();
        if self.eat(SyntaxKind::L_PAREN) {
            while !self.at(SyntaxKind::R_PAREN) && !self.at_eof() {
                items.push(spec(self)?);
                self.expect_semi()?;
            }
            self.expect(SyntaxKind::R_PAREN)?;
        } else {
            items.push(spec(self)?);
        }
        Ok(items)
    }

    fn parse_import_spec(&mut self) -> ParseResult<ImportSpec> {
        let name = match self.current_kind() {
            SyntaxKind::IDENT => {
                let name = SmolStr::new(self.current_text());
                self.bump();
                Some(name)
            }
            SyntaxKind::DOT => {
                self.bump();
                Some(SmolStr::new_static("."))
            }
            _ => None,
        };
        if !self.at(SyntaxKind::STRING) {
            return Err(self.error_expected("import path", ErrorCode::E0502));
        }
        let path = unquote(self.current_text());
        if path.is_empty() {
            return Err(self.error("invalid import path: empty", ErrorCode::E0502));
        }
        self.bump();
        Ok(ImportSpec {
            name,
            path: SmolStr::new(path),
        })
    }

    // =========================================================================
    // Value declarations
    // =========================================================================

    pub(super) fn parse_value_decl(&mut self) -> ParseResult<ValueDecl> {
        let kind = if self.at(SyntaxKind::CONST_KW) {
            ValueKind::Const
        } else {
            ValueKind::Var
        };
        self.bump();
        let specs = self.parse_group(|p| p.parse_value_spec(kind))?;
        Ok(ValueDecl { kind, specs })
    }

    /// ValueSpec = IdentifierList [ Type ] [ "=" ExpressionList ]
    fn parse_value_spec(&mut self, kind: ValueKind) -> ParseResult<ValueSpec> {
        let names = self.parse_ident_list()?;
        let mut ty = None;
        let mut has_values = false;

        if self.eat(SyntaxKind::EQ) {
            self.parse_expr_list()?;
            has_values = true;
        } else if !self.at_any(&[SyntaxKind::SEMICOLON, SyntaxKind::R_PAREN, SyntaxKind::EOF]) {
            ty = Some(self.parse_type()?);
            if self.eat(SyntaxKind::EQ) {
                self.parse_expr_list()?;
                has_values = true;
            }
        }

        if kind == ValueKind::Var && ty.is_none() && !has_values {
            return Err(self.error("missing variable type or initialization", ErrorCode::E0302));
        }

        Ok(ValueSpec {
            names,
            ty,
            has_values,
        })
    }

    fn parse_ident_list(&mut self) -> ParseResult<Vec<SmolStr>> {
        let mut names = vec![self.expect_ident()?];
        while self.eat(SyntaxKind::COMMA) {
            names.push(self.expect_ident()?);
        }
        Ok(names)
    }

    // =========================================================================
    // Type declarations
    // =========================================================================

    pub(super) fn parse_type_decl(&mut self) -> ParseResult<TypeDecl> {
        self.bump(); // type
        let specs = self.parse_group(Self::parse_type_spec)?;
        Ok(TypeDecl { specs })
    }

    /// TypeSpec = identifier [ TypeParameters ] [ "=" ] Type
    fn parse_type_spec(&mut self) -> ParseResult<TypeSpec> {
        let name = self.expect_ident()?;
        let type_params = if self.at(SyntaxKind::L_BRACKET) && self.at_type_params() {
            self.parse_type_params()?
        } else {
            Vec::new()
        };
        self.eat(SyntaxKind::EQ); // alias
        let ty = self.parse_type()?;
        Ok(TypeSpec {
            name,
            type_params,
            ty,
        })
    }

    /// Decide whether `type T [` opens a type parameter list or an array type.
    ///
    /// `[N]`, `[N * 2]`, `[pkg.N]` and `[len(x)]` are array lengths; a name
    /// followed by anything else starts a parameter list. `[P *C]` is an
    /// array length unless a comma follows.
    fn at_type_params(&self) -> bool {
        if self.nth(1) != SyntaxKind::IDENT {
            return false;
        }
        match self.nth(2) {
            SyntaxKind::R_BRACKET
            | SyntaxKind::DOT
            | SyntaxKind::L_PAREN
            | SyntaxKind::OPERATOR => false,
            SyntaxKind::STAR => self.brackets_contain_comma(),
            _ => true,
        }
    }

    /// Names declared by a type parameter list; constraints are skipped
    fn parse_type_params(&mut self) -> ParseResult<Vec<SmolStr>> {
        self.expect(SyntaxKind::L_BRACKET)?;
        let mut names = Vec::new();
        let mut group_start = true;
        let mut depth = 0usize;
        loop {
            match self.current_kind() {
                SyntaxKind::IDENT if group_start && depth == 0 => {
                    names.push(SmolStr::new(self.current_text()));
                    group_start = false;
                }
                SyntaxKind::COMMA if depth == 0 => group_start = true,
                SyntaxKind::R_BRACKET if depth == 0 => {
                    self.bump();
                    break;
                }
                SyntaxKind::L_PAREN | SyntaxKind::L_BRACKET | SyntaxKind::L_BRACE => {
                    depth += 1;
                    group_start = false;
                }
                SyntaxKind::R_PAREN | SyntaxKind::R_BRACKET | SyntaxKind::R_BRACE => {
                    if depth == 0 {
                        return Err(self.error_expected("']'", ErrorCode::E0203));
                    }
                    depth -= 1;
                }
                SyntaxKind::EOF => return Err(self.error_expected("']'", ErrorCode::E0202)),
                SyntaxKind::SEMICOLON if depth == 0 => {
                    return Err(self.error_expected("']'", ErrorCode::E0202));
                }
                _ => group_start = false,
            }
            self.bump();
        }
        if names.is_empty() {
            return Err(self.error("empty type parameter list", ErrorCode::E0301));
        }
        Ok(names)
    }

    // =========================================================================
    // Function declarations
    // =========================================================================

    /// FunctionDecl = "func" [ Receiver ] identifier [ TypeParameters ] Signature [ Body ]
    fn parse_func_decl(&mut self) -> ParseResult<FuncDecl> {
        let has_doc = self.has_doc_comment();
        self.bump(); // func

        let recv = if self.at(SyntaxKind::L_PAREN) {
            Some(self.parse_receiver()?)
        } else {
            None
        };
        let name = self.expect_ident()?;
        let type_params = if self.at(SyntaxKind::L_BRACKET) {
            self.parse_type_params()?
        } else {
            Vec::new()
        };
        let results = self.parse_signature()?;
        if self.at(SyntaxKind::L_BRACE) {
            self.parse_block()?;
        }

        Ok(FuncDecl {
            name,
            recv,
            type_params,
            results,
            has_doc,
        })
    }

    fn parse_receiver(&mut self) -> ParseResult<TypeExpr> {
        let start = self.current_range();
        let mut fields = self.parse_parameters()?;
        match fields.len() {
            1 => Ok(fields.remove(0)),
            0 => Err(SyntaxError::new("method has no receiver", start, ErrorCode::E0302)),
            _ => Err(SyntaxError::new(
                "method has multiple receivers",
                start,
                ErrorCode::E0302,
            )),
        }
    }

    /// Whether a comment group ends on the line just above the current token
    fn has_doc_comment(&self) -> bool {
        let Some(&index) = self.significant.get(self.pos) else {
            return false;
        };
        let skip_whitespace = |mut i: usize| {
            while i > 0 && self.tokens[i - 1].kind == SyntaxKind::WHITESPACE {
                i -= 1;
            }
            i
        };

        let i = skip_whitespace(index);
        if i == 0 || !self.tokens[i - 1].is_line_break() {
            return false;
        }
        let i = skip_whitespace(i - 1);
        if i == 0 || !self.tokens[i - 1].kind.is_comment() {
            return false;
        }
        // the comment must not trail code on its own line
        let i = skip_whitespace(i - 1);
        i == 0 || self.tokens[i - 1].is_line_break() || self.tokens[i - 1].kind.is_comment()
    }

    /// Signature = Parameters [ Result ]; returns one type per result field
    pub(super) fn parse_signature(&mut self) -> ParseResult<Vec<TypeExpr>> {
        self.parse_parameters()?;
        if self.at(SyntaxKind::L_PAREN) {
            return self.parse_parameters();
        }
        if self.current_kind().starts_type() {
            return Ok(vec![self.parse_type()?]);
        }
        Ok(Vec::new())
    }

    /// Parameters = "(" [ ParameterList [ "," ] ] ")"; returns one type per field
    fn parse_parameters(&mut self) -> ParseResult<Vec<TypeExpr>> {
        let open = self.expect(SyntaxKind::L_PAREN)?;
        let mut params = Vec::new();
        while !self.at(SyntaxKind::R_PAREN) {
            params.push(self.parse_param()?);
            if !self.eat(SyntaxKind::COMMA) {
                break;
            }
        }
        self.expect(SyntaxKind::R_PAREN)?;
        group_params(params, open)
    }

    fn parse_param(&mut self) -> ParseResult<Param> {
        if self.at(SyntaxKind::IDENT) {
            match self.nth(1) {
                SyntaxKind::COMMA | SyntaxKind::R_PAREN => {
                    let name = SmolStr::new(self.current_text());
                    self.bump();
                    return Ok(Param::Bare(name));
                }
                SyntaxKind::DOT => return Ok(Param::Type(self.parse_type()?)),
                SyntaxKind::L_BRACKET
                    if matches!(
                        self.nth_after_brackets(1),
                        SyntaxKind::COMMA | SyntaxKind::R_PAREN
                    ) =>
                {
                    return Ok(Param::Type(self.parse_type()?));
                }
                _ => {}
            }
            self.bump(); // parameter name
            self.eat(SyntaxKind::ELLIPSIS);
            return Ok(Param::Named(self.parse_type()?));
        }
        self.eat(SyntaxKind::ELLIPSIS);
        Ok(Param::Type(self.parse_type()?))
    }

    // =========================================================================
    // Types
    // =========================================================================

    pub(super) fn parse_type(&mut self) -> ParseResult<TypeExpr> {
        match self.current_kind() {
            SyntaxKind::IDENT => self.parse_type_name(),
            SyntaxKind::STAR => {
                self.bump();
                Ok(TypeExpr::Pointer(Box::new(self.parse_type()?)))
            }
            SyntaxKind::L_BRACKET => {
                if self.nth(1) == SyntaxKind::R_BRACKET {
                    self.bump();
                    self.bump();
                } else {
                    // array length: `...` or a constant expression
                    self.skip_balanced()?;
                }
                Ok(TypeExpr::Array(Box::new(self.parse_type()?)))
            }
            SyntaxKind::L_PAREN => {
                self.bump();
                let inner = self.parse_type()?;
                self.expect(SyntaxKind::R_PAREN)?;
                Ok(TypeExpr::Paren(Box::new(inner)))
            }
            SyntaxKind::MAP_KW => {
                self.bump();
                self.expect(SyntaxKind::L_BRACKET)?;
                self.parse_type()?;
                self.expect(SyntaxKind::R_BRACKET)?;
                self.parse_type()?;
                Ok(TypeExpr::Other)
            }
            SyntaxKind::CHAN_KW => {
                self.bump();
                self.eat(SyntaxKind::ARROW);
                self.parse_type()?;
                Ok(TypeExpr::Other)
            }
            SyntaxKind::ARROW => {
                self.bump();
                self.expect(SyntaxKind::CHAN_KW)?;
                self.parse_type()?;
                Ok(TypeExpr::Other)
            }
            SyntaxKind::FUNC_KW => {
                self.bump();
                self.parse_signature()?;
                Ok(TypeExpr::Other)
            }
            SyntaxKind::STRUCT_KW => self.parse_struct_type(),
            SyntaxKind::INTERFACE_KW => self.parse_interface_type(),
            _ => Err(self.error_expected("type", ErrorCode::E0302)),
        }
    }

    /// TypeName [ TypeArgs ]
    fn parse_type_name(&mut self) -> ParseResult<TypeExpr> {
        let first = self.expect_ident()?;
        let base = if self.eat(SyntaxKind::DOT) {
            let name = self.expect_ident()?;
            TypeExpr::Qualified {
                package: first,
                name,
            }
        } else {
            TypeExpr::Name(first)
        };
        if self.at(SyntaxKind::L_BRACKET) {
            self.skip_balanced()?;
            return Ok(TypeExpr::Generic(Box::new(base)));
        }
        Ok(base)
    }

    fn parse_struct_type(&mut self) -> ParseResult<TypeExpr> {
        self.bump(); // struct
        self.expect(SyntaxKind::L_BRACE)?;
        let mut embedded = Vec::new();
        while !self.at(SyntaxKind::R_BRACE) && !self.at_eof() {
            if let Some(field) = self.parse_field_decl()? {
                embedded.push(field);
            }
            self.expect_semi()?;
        }
        self.expect(SyntaxKind::R_BRACE)?;
        Ok(TypeExpr::Struct { embedded })
    }

    /// FieldDecl = (IdentifierList Type | EmbeddedField) [ Tag ]
    ///
    /// Returns the type of an embedded field.
    fn parse_field_decl(&mut self) -> ParseResult<Option<TypeExpr>> {
        let embedded = match self.current_kind() {
            SyntaxKind::STAR => {
                self.bump();
                Some(TypeExpr::Pointer(Box::new(self.parse_type_name()?)))
            }
            SyntaxKind::IDENT => {
                let is_embedded = match self.nth(1) {
                    SyntaxKind::DOT
                    | SyntaxKind::SEMICOLON
                    | SyntaxKind::R_BRACE
                    | SyntaxKind::STRING => true,
                    SyntaxKind::L_BRACKET => matches!(
                        self.nth_after_brackets(1),
                        SyntaxKind::SEMICOLON | SyntaxKind::R_BRACE | SyntaxKind::STRING
                    ),
                    _ => false,
                };
                if is_embedded {
                    Some(self.parse_type_name()?)
                } else {
                    self.parse_ident_list()?;
                    self.parse_type()?;
                    None
                }
            }
            _ => {
                return Err(
                    self.error_expected("field name or embedded type", ErrorCode::E0301)
                );
            }
        };
        self.eat(SyntaxKind::STRING); // tag
        Ok(embedded)
    }

    fn parse_interface_type(&mut self) -> ParseResult<TypeExpr> {
        self.bump(); // interface
        self.expect(SyntaxKind::L_BRACE)?;
        let mut embedded = Vec::new();
        while !self.at(SyntaxKind::R_BRACE) && !self.at_eof() {
            if self.at(SyntaxKind::IDENT) && self.nth(1) == SyntaxKind::L_PAREN {
                self.bump(); // method name
                self.parse_signature()?;
            } else if self.at(SyntaxKind::IDENT) {
                let ty = self.parse_type_name()?;
                if self.at_any(&[SyntaxKind::SEMICOLON, SyntaxKind::R_BRACE]) {
                    embedded.push(ty);
                } else {
                    // rest of a union such as `int | string`
                    self.skip_until(&[SyntaxKind::SEMICOLON, SyntaxKind::R_BRACE])?;
                }
            } else {
                self.skip_until(&[SyntaxKind::SEMICOLON, SyntaxKind::R_BRACE])?;
            }
            self.expect_semi()?;
        }
        self.expect(SyntaxKind::R_BRACE)?;
        Ok(TypeExpr::Interface { embedded })
    }
}

/// Pair parameter names with types, one entry per field.
///
/// `(a, b int, c string)` has two fields; `(int, string)` has two unnamed
/// fields; `(a int, string)` is an error.
fn group_params(params: Vec<Param>, open: TextRange) -> ParseResult<Vec<TypeExpr>> {
    let named = params.iter().any(|p| matches!(p, Param::Named(_)));
    let mixed = || SyntaxError::from_code(ErrorCode::E0304, open);

    if !named {
        return Ok(params
            .into_iter()
            .map(|p| match p {
                Param::Bare(name) => TypeExpr::Name(name),
                Param::Named(ty) | Param::Type(ty) => ty,
            })
            .collect());
    }

    let mut fields = Vec::new();
    let mut pending_names = 0usize;
    for param in params {
        match param {
            Param::Bare(_) => pending_names += 1,
            Param::Named(ty) => {
                fields.push(ty);
                pending_names = 0;
            }
            Param::Type(_) => return Err(mixed()),
        }
    }
    if pending_names > 0 {
        return Err(mixed());
    }
    Ok(fields)
}

fn closer_of(open: SyntaxKind) -> SyntaxKind {
    match open {
        SyntaxKind::L_PAREN => SyntaxKind::R_PAREN,
        SyntaxKind::L_BRACKET => SyntaxKind::R_BRACKET,
        _ => SyntaxKind::R_BRACE,
    }
}

fn spelling(kind: SyntaxKind) -> &'static str {
    match kind {
        SyntaxKind::L_PAREN => "'('",
        SyntaxKind::R_PAREN => "')'",
        SyntaxKind::L_BRACKET => "'['",
        SyntaxKind::R_BRACKET => "']'",
        SyntaxKind::L_BRACE => "'{'",
        SyntaxKind::R_BRACE => "'}'",
        SyntaxKind::SEMICOLON => "';'",
        SyntaxKind::COLON => "':'",
        SyntaxKind::EQ => "'='",
        SyntaxKind::IDENT => "identifier",
        SyntaxKind::CHAN_KW => "'chan'",
        _ => "token",
    }
}

/// Strip the quotes of an interpreted or raw string literal
fn unquote(literal: &str) -> &str {
    literal
        .get(1..literal.len().saturating_sub(1))
        .unwrap_or_default()
}
