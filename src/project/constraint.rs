//! Build constraints in file headers
//!
//! A file header is the run of comments and blank lines before the package
//! clause. It may hold one `//go:build` expression, which decides whether the
//! file is built. Without one, every legacy `// +build` line that is
//! followed by a blank line must be satisfied.

use smol_str::SmolStr;
use thiserror::Error;

use super::build_context::BuildContext;

const GO_BUILD_PREFIX: &str = "//go:build";
const PLUS_BUILD_PREFIX: &str = "+build";

/// Error in a `//go:build` line
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConstraintError {
    #[error("multiple //go:build comments")]
    MultipleGoBuild,
    #[error("parsing //go:build line: {message}")]
    Syntax { message: String, offset: usize },
}

impl ConstraintError {
    fn syntax(message: impl Into<String>, offset: usize) -> Self {
        Self::Syntax {
            message: message.into(),
            offset,
        }
    }
}

/// A boolean expression over build tags
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Constraint {
    Tag(SmolStr),
    Not(Box<Constraint>),
    And(Box<Constraint>, Box<Constraint>),
    Or(Box<Constraint>, Box<Constraint>),
}

impl Constraint {
    fn tag(name: &str) -> Self {
        Self::Tag(SmolStr::new(name))
    }

    fn not(x: Self) -> Self {
        Self::Not(Box::new(x))
    }

    fn and(x: Self, y: Self) -> Self {
        Self::And(Box::new(x), Box::new(y))
    }

    fn or(x: Self, y: Self) -> Self {
        Self::Or(Box::new(x), Box::new(y))
    }

    /// Evaluate with `ok` deciding each tag.
    pub fn eval(&self, ok: &impl Fn(&str) -> bool) -> bool {
        match self {
            Self::Tag(name) => ok(name),
            Self::Not(x) => !x.eval(ok),
            Self::And(x, y) => x.eval(ok) && y.eval(ok),
            Self::Or(x, y) => x.eval(ok) || y.eval(ok),
        }
    }

    /// Parse a `//go:build` line.
    pub fn parse_go_build(line: &str) -> Result<Self, ConstraintError> {
        let Some(expr) = split_go_build(line) else {
            return Err(ConstraintError::syntax("not a //go:build line", 0));
        };
        ExprParser::new(expr)?.parse()
    }

    /// Parse a `// +build` line; `None` when the line is not one.
    ///
    /// Space-separated options are OR-ed, comma-separated terms are AND-ed.
    /// Malformed terms become the never-satisfied tag `ignore`.
    pub fn parse_plus_build(line: &str) -> Option<Self> {
        let text = split_plus_build(line)?;
        let mut x: Option<Self> = None;
        for clause in text.split_whitespace() {
            let mut y: Option<Self> = None;
            for lit in clause.split(',') {
                let z = if lit.starts_with("!!") || lit == "!" {
                    Self::tag("ignore")
                } else {
                    let (negated, name) = match lit.strip_prefix('!') {
                        Some(name) => (true, name),
                        None => (false, lit),
                    };
                    let z = if is_valid_tag(name) {
                        Self::tag(name)
                    } else {
                        Self::tag("ignore")
                    };
                    if negated { Self::not(z) } else { z }
                };
                y = Some(match y {
                    Some(y) => Self::and(y, z),
                    None => z,
                });
            }
            if let Some(y) = y {
                x = Some(match x {
                    Some(x) => Self::or(x, y),
                    None => y,
                });
            }
        }
        Some(x.unwrap_or_else(|| Self::tag("ignore")))
    }
}

/// Comments of a file header
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Header<'a> {
    /// Header text up to its last blank line; `// +build` lines count only here
    pub leading: &'a str,
    /// The `//go:build` line, if any
    pub go_build: Option<&'a str>,
}

/// Split off the leading comments of a Go source file.
pub fn scan_header(content: &str) -> Result<Header<'_>, ConstraintError> {
    let mut end = 0;
    let mut ended = false;
    let mut in_block_comment = false;
    let mut go_build = None;
    let mut rest = content;

    'lines: while !rest.is_empty() {
        let raw = match rest.find('\n') {
            Some(i) => {
                let line = &rest[..i];
                rest = &rest[i + 1..];
                line
            }
            None => std::mem::take(&mut rest),
        };
        let mut line = raw.trim();

        if line.is_empty() && !ended {
            end = content.len() - rest.len();
            continue;
        }
        if !line.starts_with("//") {
            ended = true;
        }
        if !in_block_comment && is_go_build_comment(line) {
            if go_build.is_some() {
                return Err(ConstraintError::MultipleGoBuild);
            }
            go_build = Some(line);
        }

        while !line.is_empty() {
            if in_block_comment {
                match line.find("*/") {
                    Some(i) => {
                        in_block_comment = false;
                        line = line[i + 2..].trim();
                        continue;
                    }
                    None => continue 'lines,
                }
            }
            if line.starts_with("//") {
                continue 'lines;
            }
            if let Some(after) = line.strip_prefix("/*") {
                in_block_comment = true;
                line = after.trim();
                continue;
            }
            // package clause or other code
            break 'lines;
        }
    }

    Ok(Header {
        leading: &content[..end],
        go_build,
    })
}

/// Reports whether a file with this content is built in `context`.
pub fn should_build(content: &str, context: &BuildContext) -> Result<bool, ConstraintError> {
    let header = scan_header(content)?;
    let matches = |tag: &str| context.match_tag(tag);

    if let Some(line) = header.go_build {
        return Ok(Constraint::parse_go_build(line)?.eval(&matches));
    }

    let satisfied = header
        .leading
        .lines()
        .map(str::trim)
        .filter(|line| line.starts_with("//") && line.contains(PLUS_BUILD_PREFIX))
        .filter_map(Constraint::parse_plus_build)
        .all(|expr| expr.eval(&matches));
    Ok(satisfied)
}

fn is_go_build_comment(line: &str) -> bool {
    match line.strip_prefix(GO_BUILD_PREFIX) {
        Some(rest) => rest.is_empty() || rest.starts_with([' ', '\t']),
        None => false,
    }
}

fn split_go_build(line: &str) -> Option<&str> {
    let line = line.trim();
    let rest = line.strip_prefix(GO_BUILD_PREFIX)?;
    if !rest.is_empty() && !rest.starts_with([' ', '\t']) {
        return None;
    }
    Some(rest.trim())
}

fn split_plus_build(line: &str) -> Option<&str> {
    let line = line.trim().strip_prefix("//")?.trim_start();
    let rest = line.strip_prefix(PLUS_BUILD_PREFIX)?;
    if !rest.is_empty() && !rest.starts_with([' ', '\t']) {
        return None;
    }
    Some(rest.trim())
}

fn is_valid_tag(name: &str) -> bool {
    !name.is_empty() && name.chars().all(is_tag_char)
}

fn is_tag_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_' || c == '.'
}

// ============================================================================
// //go:build expression parser
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Token<'a> {
    LParen,
    RParen,
    Not,
    And,
    Or,
    Tag(&'a str),
}

impl Token<'_> {
    fn text(&self) -> &str {
        match self {
            Self::LParen => "(",
            Self::RParen => ")",
            Self::Not => "!",
            Self::And => "&&",
            Self::Or => "||",
            Self::Tag(name) => name,
        }
    }
}

/// Grammar:
///
/// ```text
/// or   = and { "||" and }
/// and  = not { "&&" not }
/// not  = "!" atom | atom
/// atom = "(" or ")" | tag
/// ```
struct ExprParser<'a> {
    tokens: Vec<(Token<'a>, usize)>,
    pos: usize,
    end: usize,
}

impl<'a> ExprParser<'a> {
    fn new(text: &'a str) -> Result<Self, ConstraintError> {
        let mut tokens = Vec::new();
        let mut chars = text.char_indices().peekable();
        while let Some((offset, c)) = chars.next() {
            let token = match c {
                ' ' | '\t' => continue,
                '(' => Token::LParen,
                ')' => Token::RParen,
                '!' => Token::Not,
                '&' | '|' => {
                    if chars.next_if(|&(_, next)| next == c).is_none() {
                        return Err(ConstraintError::syntax(
                            format!("invalid syntax at {c}"),
                            offset,
                        ));
                    }
                    if c == '&' { Token::And } else { Token::Or }
                }
                c if is_tag_char(c) => {
                    let mut end = offset + c.len_utf8();
                    while let Some((i, next)) = chars.next_if(|&(_, next)| is_tag_char(next)) {
                        end = i + next.len_utf8();
                    }
                    Token::Tag(&text[offset..end])
                }
                c => {
                    return Err(ConstraintError::syntax(
                        format!("invalid syntax at {c}"),
                        offset,
                    ));
                }
            };
            tokens.push((token, offset));
        }
        Ok(Self {
            tokens,
            pos: 0,
            end: text.len(),
        })
    }

    fn parse(mut self) -> Result<Constraint, ConstraintError> {
        let x = self.or()?;
        if let Some((token, offset)) = self.peek() {
            return Err(ConstraintError::syntax(
                format!("unexpected token {}", token.text()),
                offset,
            ));
        }
        Ok(x)
    }

    fn peek(&self) -> Option<(Token<'a>, usize)> {
        self.tokens.get(self.pos).copied()
    }

    fn offset(&self) -> usize {
        self.peek().map(|(_, offset)| offset).unwrap_or(self.end)
    }

    fn eat(&mut self, token: Token<'a>) -> bool {
        if self.peek().is_some_and(|(t, _)| t == token) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    fn or(&mut self) -> Result<Constraint, ConstraintError> {
        let mut x = self.and()?;
        while self.eat(Token::Or) {
            x = Constraint::or(x, self.and()?);
        }
        Ok(x)
    }

    fn and(&mut self) -> Result<Constraint, ConstraintError> {
        let mut x = self.not()?;
        while self.eat(Token::And) {
            x = Constraint::and(x, self.not()?);
        }
        Ok(x)
    }

    fn not(&mut self) -> Result<Constraint, ConstraintError> {
        if self.eat(Token::Not) {
            if self.peek().is_some_and(|(t, _)| t == Token::Not) {
                return Err(ConstraintError::syntax(
                    "double negation not allowed",
                    self.offset(),
                ));
            }
            return Ok(Constraint::not(self.atom()?));
        }
        self.atom()
    }

    fn atom(&mut self) -> Result<Constraint, ConstraintError> {
        let open = self.offset();
        match self.peek() {
            Some((Token::LParen, _)) => {
                self.pos += 1;
                let x = self.or().map_err(|e| match e {
                    ConstraintError::Syntax { message, offset }
                        if message == "unexpected end of expression" =>
                    {
                        ConstraintError::syntax("missing close paren", offset)
                    }
                    other => other,
                })?;
                if !self.eat(Token::RParen) {
                    return Err(ConstraintError::syntax("missing close paren", open));
                }
                Ok(x)
            }
            Some((Token::Tag(name), _)) => {
                self.pos += 1;
                Ok(Constraint::tag(name))
            }
            Some((token, offset)) => Err(ConstraintError::syntax(
                format!("unexpected token {}", token.text()),
                offset,
            )),
            None => Err(ConstraintError::syntax(
                "unexpected end of expression",
                self.end,
            )),
        }
    }
}
