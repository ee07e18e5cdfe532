//! Statements in function bodies
//!
//! Bodies are checked statement by statement and discarded.

use super::errors::ErrorCode;
use super::expr::Shape;
use super::parser::{ParseResult, Parser};
use super::syntax_kind::SyntaxKind;

/// Where a simple statement appears
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SimpleContext {
    /// Statement position; `name:` is a label
    Statement,
    /// `for` header; `range` may follow the assignment
    ForHeader,
    /// `if`/`switch` header or `select` case
    Clause,
}

fn is_assign_op(text: &str) -> bool {
    text == ":="
        || (text.ends_with('=') && !matches!(text, "==" | "!=" | "<=" | ">="))
}

impl Parser<'_, '_> {
    /// Block = "{" StatementList "}"
    pub(super) fn parse_block(&mut self) -> ParseResult<()> {
        self.expect(SyntaxKind::L_BRACE)?;
        self.parse_stmt_list()?;
        self.expect(SyntaxKind::R_BRACE)?;
        Ok(())
    }

    /// Statements up to a `}` or the next case clause
    fn parse_stmt_list(&mut self) -> ParseResult<()> {
        while !self.at_any(&[
            SyntaxKind::R_BRACE,
            SyntaxKind::CASE_KW,
            SyntaxKind::DEFAULT_KW,
            SyntaxKind::EOF,
        ]) {
            self.parse_stmt()?;
            if !self.at_any(&[SyntaxKind::R_BRACE, SyntaxKind::EOF]) {
                self.expect_stmt_end()?;
            }
        }
        Ok(())
    }

    fn expect_stmt_end(&mut self) -> ParseResult<()> {
        if self.eat(SyntaxKind::SEMICOLON) {
            return Ok(());
        }
        Err(self
            .error_expected("';'", ErrorCode::E0201)
            .with_hint("statements must be separated by a newline or ';'"))
    }

    fn parse_stmt(&mut self) -> ParseResult<()> {
        match self.current_kind() {
            SyntaxKind::CONST_KW | SyntaxKind::VAR_KW => self.parse_value_decl().map(drop),
            SyntaxKind::TYPE_KW => self.parse_type_decl().map(drop),
            SyntaxKind::GO_KW | SyntaxKind::DEFER_KW => {
                self.bump();
                self.parse_expr().map(drop)
            }
            SyntaxKind::RETURN_KW => {
                self.bump();
                if !self.at_any(&[SyntaxKind::SEMICOLON, SyntaxKind::R_BRACE]) {
                    self.parse_expr_list()?;
                }
                Ok(())
            }
            SyntaxKind::BREAK_KW | SyntaxKind::CONTINUE_KW => {
                self.bump();
                self.eat(SyntaxKind::IDENT);
                Ok(())
            }
            SyntaxKind::GOTO_KW => {
                self.bump();
                self.expect_ident().map(drop)
            }
            SyntaxKind::FALLTHROUGH_KW => {
                self.bump();
                Ok(())
            }
            SyntaxKind::L_BRACE => self.parse_block(),
            SyntaxKind::IF_KW => self.parse_if_stmt(),
            SyntaxKind::SWITCH_KW => self.parse_switch_stmt(),
            SyntaxKind::SELECT_KW => self.parse_select_stmt(),
            SyntaxKind::FOR_KW => self.parse_for_stmt(),
            // empty statement
            SyntaxKind::SEMICOLON => Ok(()),
            SyntaxKind::R_PAREN | SyntaxKind::R_BRACKET => {
                Err(self.error_expected("statement", ErrorCode::E0203))
            }
            _ => self.parse_simple_stmt(SimpleContext::Statement).map(drop),
        }
    }

    /// Expression, send, inc/dec, assignment, short variable declaration or
    /// label. Returns whether it was a `range` clause.
    fn parse_simple_stmt(&mut self, context: SimpleContext) -> ParseResult<bool> {
        if context == SimpleContext::ForHeader && self.eat(SyntaxKind::RANGE_KW) {
            self.parse_expr()?;
            return Ok(true);
        }

        let first = self.parse_expr()?;
        let mut count = 1;
        while self.eat(SyntaxKind::COMMA) {
            self.parse_expr()?;
            count += 1;
        }

        match self.current_kind() {
            SyntaxKind::EQ => {}
            SyntaxKind::OPERATOR if is_assign_op(self.current_text()) => {}
            SyntaxKind::COLON
                if context == SimpleContext::Statement && count == 1 && first == Shape::Ident =>
            {
                self.bump();
                if self.at_any(&[SyntaxKind::SEMICOLON, SyntaxKind::R_BRACE]) {
                    return Ok(false);
                }
                self.parse_stmt()?;
                return Ok(false);
            }
            SyntaxKind::ARROW => {
                self.bump();
                self.parse_expr()?;
                return Ok(false);
            }
            SyntaxKind::PLUS_PLUS | SyntaxKind::MINUS_MINUS => {
                self.bump();
                return Ok(false);
            }
            _ => return Ok(false),
        }

        self.bump(); // assignment operator
        if context == SimpleContext::ForHeader && self.eat(SyntaxKind::RANGE_KW) {
            self.parse_expr()?;
            return Ok(true);
        }
        self.parse_expr_list()?;
        Ok(false)
    }

    /// IfStmt = "if" [ SimpleStmt ";" ] Expression Block [ "else" ( IfStmt | Block ) ]
    fn parse_if_stmt(&mut self) -> ParseResult<()> {
        self.bump(); // if
        self.control_clause(|p| {
            if p.at(SyntaxKind::L_BRACE) {
                return Err(p.error("missing condition in if statement", ErrorCode::E0305));
            }
            if !p.at(SyntaxKind::SEMICOLON) {
                p.parse_simple_stmt(SimpleContext::Clause)?;
            }
            if p.eat(SyntaxKind::SEMICOLON) {
                if p.at(SyntaxKind::L_BRACE) {
                    return Err(p.error("missing condition in if statement", ErrorCode::E0305));
                }
                p.parse_expr()?;
            }
            Ok(())
        })?;
        self.parse_block()?;

        if self.eat(SyntaxKind::ELSE_KW) {
            match self.current_kind() {
                SyntaxKind::IF_KW => self.parse_if_stmt()?,
                SyntaxKind::L_BRACE => self.parse_block()?,
                _ => {
                    return Err(self.error_expected("if statement or block", ErrorCode::E0901));
                }
            }
        }
        Ok(())
    }

    /// Expression and type switches
    fn parse_switch_stmt(&mut self) -> ParseResult<()> {
        self.bump(); // switch
        self.control_clause(|p| {
            if p.at(SyntaxKind::L_BRACE) {
                return Ok(());
            }
            if !p.at(SyntaxKind::SEMICOLON) {
                p.parse_simple_stmt(SimpleContext::Clause)?;
            }
            if p.eat(SyntaxKind::SEMICOLON) && !p.at(SyntaxKind::L_BRACE) {
                p.parse_simple_stmt(SimpleContext::Clause)?;
            }
            Ok(())
        })?;
        self.parse_case_clauses(Self::parse_expr_list)
    }

    fn parse_select_stmt(&mut self) -> ParseResult<()> {
        self.bump(); // select
        self.parse_case_clauses(|p| p.parse_simple_stmt(SimpleContext::Clause).map(drop))
    }

    /// "{" { ( "case" head | "default" ) ":" StatementList } "}"
    fn parse_case_clauses(
        &mut self,
        mut head: impl FnMut(&mut Self) -> ParseResult<()>,
    ) -> ParseResult<()> {
        self.expect(SyntaxKind::L_BRACE)?;
        while !self.at(SyntaxKind::R_BRACE) {
            match self.current_kind() {
                SyntaxKind::CASE_KW => {
                    self.bump();
                    head(self)?;
                }
                SyntaxKind::DEFAULT_KW => self.bump(),
                _ => return Err(self.error_expected("'case' or 'default'", ErrorCode::E0901)),
            }
            self.expect(SyntaxKind::COLON)?;
            self.parse_stmt_list()?;
        }
        self.expect(SyntaxKind::R_BRACE)?;
        Ok(())
    }

    /// ForStmt = "for" [ Condition | ForClause | RangeClause ] Block
    fn parse_for_stmt(&mut self) -> ParseResult<()> {
        self.bump(); // for
        self.control_clause(|p| {
            if p.at(SyntaxKind::L_BRACE) {
                return Ok(());
            }
            let mut is_range = false;
            if !p.at(SyntaxKind::SEMICOLON) {
                is_range = p.parse_simple_stmt(SimpleContext::ForHeader)?;
            }
            if !is_range && p.eat(SyntaxKind::SEMICOLON) {
                if !p.at(SyntaxKind::SEMICOLON) {
                    p.parse_expr()?;
                }
                p.expect(SyntaxKind::SEMICOLON)?;
                if !p.at(SyntaxKind::L_BRACE) {
                    p.parse_simple_stmt(SimpleContext::Clause)?;
                }
            }
            Ok(())
        })?;
        self.parse_block()
    }
}
