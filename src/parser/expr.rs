//! Expressions in function bodies and initializers
//!
//! Expressions are checked and discarded. Types can stand where an
//! expression is expected (conversions, composite literals, `make` and `new`
//! arguments), so an operand may also be a type literal.

use super::errors::ErrorCode;
use super::parser::{ParseResult, Parser};
use super::syntax_kind::SyntaxKind;

/// How a primary expression ends, as far as a following `{` is concerned
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum Shape {
    /// A lone identifier; may also be a label
    Ident,
    /// `pkg.Name` or a parenthesized name
    Selector,
    /// `Name[...]`, possibly an instantiated generic type
    Index,
    /// Array, slice, map or struct type
    LiteralType,
    Other,
}

/// Binary operator precedence; 0 when the token is not a binary operator
fn binary_precedence(kind: SyntaxKind, text: &str) -> u8 {
    match kind {
        SyntaxKind::STAR => 5,
        SyntaxKind::OPERATOR => match text {
            "||" => 1,
            "&&" => 2,
            "==" | "!=" | "<" | "<=" | ">" | ">=" => 3,
            "+" | "-" | "|" | "^" => 4,
            "/" | "%" | "<<" | ">>" | "&" | "&^" => 5,
            _ => 0,
        },
        _ => 0,
    }
}

fn is_unary_op(kind: SyntaxKind, text: &str) -> bool {
    match kind {
        SyntaxKind::STAR | SyntaxKind::ARROW => true,
        SyntaxKind::OPERATOR => matches!(text, "+" | "-" | "!" | "^" | "&"),
        _ => false,
    }
}

impl Parser<'_, '_> {
    /// ExpressionList = Expression { "," Expression }
    pub(super) fn parse_expr_list(&mut self) -> ParseResult<()> {
        self.parse_expr()?;
        while self.eat(SyntaxKind::COMMA) {
            self.parse_expr()?;
        }
        Ok(())
    }

    pub(super) fn parse_expr(&mut self) -> ParseResult<Shape> {
        self.parse_binary_expr(1)
    }

    fn parse_binary_expr(&mut self, min_prec: u8) -> ParseResult<Shape> {
        let mut shape = self.parse_unary_expr()?;
        loop {
            let prec = binary_precedence(self.current_kind(), self.current_text());
            if prec == 0 || prec < min_prec {
                return Ok(shape);
            }
            self.bump();
            self.parse_binary_expr(prec + 1)?;
            shape = Shape::Other;
        }
    }

    fn parse_unary_expr(&mut self) -> ParseResult<Shape> {
        if is_unary_op(self.current_kind(), self.current_text()) {
            self.bump();
            self.parse_unary_expr()?;
            return Ok(Shape::Other);
        }
        self.parse_primary_expr()
    }

    /// PrimaryExpr = Operand { Selector | Index | Slice | TypeAssertion | Arguments | LiteralValue }
    fn parse_primary_expr(&mut self) -> ParseResult<Shape> {
        let mut shape = self.parse_operand()?;
        loop {
            shape = match self.current_kind() {
                SyntaxKind::DOT => {
                    self.bump();
                    self.parse_selector_or_assertion()?
                }
                SyntaxKind::L_BRACKET => {
                    self.parse_index_or_slice()?;
                    Shape::Index
                }
                SyntaxKind::L_PAREN => {
                    self.parse_arguments()?;
                    Shape::Other
                }
                SyntaxKind::L_BRACE if self.opens_literal(shape) => {
                    self.parse_literal_value()?;
                    Shape::Other
                }
                _ => return Ok(shape),
            };
        }
    }

    fn opens_literal(&self, shape: Shape) -> bool {
        match shape {
            Shape::LiteralType => true,
            Shape::Ident | Shape::Selector | Shape::Index => self.composite_allowed(),
            Shape::Other => false,
        }
    }

    fn parse_operand(&mut self) -> ParseResult<Shape> {
        match self.current_kind() {
            SyntaxKind::IDENT => {
                self.bump();
                Ok(Shape::Ident)
            }
            SyntaxKind::NUMBER | SyntaxKind::CHAR | SyntaxKind::STRING => {
                self.bump();
                Ok(Shape::Other)
            }
            SyntaxKind::L_PAREN => {
                self.bump();
                let shape = self.nested(Self::parse_expr)?;
                self.expect(SyntaxKind::R_PAREN)?;
                Ok(match shape {
                    Shape::Ident => Shape::Selector,
                    other => other,
                })
            }
            SyntaxKind::FUNC_KW => {
                self.bump();
                self.parse_signature()?;
                if self.at(SyntaxKind::L_BRACE) {
                    self.nested(Self::parse_block)?;
                }
                Ok(Shape::Other)
            }
            SyntaxKind::L_BRACKET | SyntaxKind::MAP_KW | SyntaxKind::STRUCT_KW => {
                self.parse_type()?;
                Ok(Shape::LiteralType)
            }
            SyntaxKind::CHAN_KW | SyntaxKind::INTERFACE_KW => {
                self.parse_type()?;
                Ok(Shape::Other)
            }
            _ => Err(self.error_expected("expression", ErrorCode::E0305)),
        }
    }

    /// After `.`: a field or method name, `(T)` or `(type)`
    fn parse_selector_or_assertion(&mut self) -> ParseResult<Shape> {
        match self.current_kind() {
            SyntaxKind::IDENT => {
                self.bump();
                Ok(Shape::Selector)
            }
            SyntaxKind::L_PAREN => {
                self.bump();
                if !self.eat(SyntaxKind::TYPE_KW) {
                    self.parse_type()?;
                }
                self.expect(SyntaxKind::R_PAREN)?;
                Ok(Shape::Other)
            }
            _ => Err(self.error_expected("name or '('", ErrorCode::E0301)),
        }
    }

    /// `[i]`, `[lo:hi]`, `[lo:hi:max]` or type arguments `[A, B]`
    fn parse_index_or_slice(&mut self) -> ParseResult<()> {
        self.bump(); // [
        self.nested(|p| {
            if !p.at(SyntaxKind::COLON) {
                p.parse_expr()?;
            }
            if p.at(SyntaxKind::COLON) {
                for _ in 0..2 {
                    if !p.eat(SyntaxKind::COLON) {
                        break;
                    }
                    if !p.at_any(&[SyntaxKind::COLON, SyntaxKind::R_BRACKET]) {
                        p.parse_expr()?;
                    }
                }
            } else {
                while p.eat(SyntaxKind::COMMA) && !p.at(SyntaxKind::R_BRACKET) {
                    p.parse_expr()?;
                }
            }
            Ok(())
        })?;
        self.expect(SyntaxKind::R_BRACKET)?;
        Ok(())
    }

    /// Arguments = "(" [ ExpressionList [ "..." ] [ "," ] ] ")"
    fn parse_arguments(&mut self) -> ParseResult<()> {
        self.bump(); // (
        self.nested(|p| {
            while !p.at(SyntaxKind::R_PAREN) {
                p.parse_expr()?;
                p.eat(SyntaxKind::ELLIPSIS);
                if !p.eat(SyntaxKind::COMMA) {
                    break;
                }
            }
            Ok(())
        })?;
        self.expect(SyntaxKind::R_PAREN)?;
        Ok(())
    }

    /// LiteralValue = "{" [ ElementList [ "," ] ] "}"
    fn parse_literal_value(&mut self) -> ParseResult<()> {
        self.expect(SyntaxKind::L_BRACE)?;
        self.nested(|p| {
            while !p.at(SyntaxKind::R_BRACE) {
                p.parse_element()?;
                if p.eat(SyntaxKind::COLON) {
                    p.parse_element()?;
                }
                if !p.eat(SyntaxKind::COMMA) {
                    break;
                }
            }
            Ok(())
        })?;
        self.expect(SyntaxKind::R_BRACE)?;
        Ok(())
    }

    /// A key or element; `{...}` with the type elided is allowed
    fn parse_element(&mut self) -> ParseResult<()> {
        if self.at(SyntaxKind::L_BRACE) {
            self.parse_literal_value()
        } else {
            self.parse_expr().map(drop)
        }
    }
}
