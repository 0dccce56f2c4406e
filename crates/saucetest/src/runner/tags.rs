//! Tag expression filtering.
//!
//! Scenarios carry tags like `smoke` or `checkout`; a filter expression
//! selects which ones run. The grammar is `or` over `and` over `not`, with
//! parentheses, case-insensitive keywords, and an optional `@` prefix on
//! tag names: `smoke or (cart and not slow)`.

use crate::result::{SuiteError, SuiteResult};

#[derive(Debug, Clone, PartialEq, Eq)]
enum Token {
    Tag(String),
    And,
    Or,
    Not,
    Open,
    Close,
}

fn tokenize(input: &str) -> SuiteResult<Vec<Token>> {
    let mut tokens = Vec::new();
    let mut chars = input.chars().peekable();
    while let Some(&c) = chars.peek() {
        match c {
            '(' => {
                tokens.push(Token::Open);
                let _ = chars.next();
            }
            ')' => {
                tokens.push(Token::Close);
                let _ = chars.next();
            }
            c if c.is_whitespace() => {
                let _ = chars.next();
            }
            _ => {
                let mut word = String::new();
                while let Some(&c) = chars.peek() {
                    if c.is_whitespace() || c == '(' || c == ')' {
                        break;
                    }
                    word.push(c.to_ascii_lowercase());
                    let _ = chars.next();
                }
                tokens.push(match word.as_str() {
                    "and" => Token::And,
                    "or" => Token::Or,
                    "not" => Token::Not,
                    _ => {
                        let name = word.strip_prefix('@').unwrap_or(&word);
                        if name.is_empty() {
                            return Err(SuiteError::config(format!(
                                "empty tag name in filter '{input}'"
                            )));
                        }
                        Token::Tag(name.to_string())
                    }
                });
            }
        }
    }
    Ok(tokens)
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Expr {
    Tag(String),
    And(Box<Expr>, Box<Expr>),
    Or(Box<Expr>, Box<Expr>),
    Not(Box<Expr>),
}

impl Expr {
    fn evaluate(&self, tags: &[String]) -> bool {
        match self {
            Self::Tag(name) => tags.iter().any(|t| t == name),
            Self::And(a, b) => a.evaluate(tags) && b.evaluate(tags),
            Self::Or(a, b) => a.evaluate(tags) || b.evaluate(tags),
            Self::Not(inner) => !inner.evaluate(tags),
        }
    }
}

struct Parser<'a> {
    tokens: &'a [Token],
    pos: usize,
    input: &'a str,
}

impl<'a> Parser<'a> {
    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.pos)
    }

    fn advance(&mut self) -> Option<&Token> {
        let token = self.tokens.get(self.pos);
        self.pos += 1;
        token
    }

    fn error(&self, message: &str) -> SuiteError {
        SuiteError::config(format!("bad tag filter '{}': {message}", self.input))
    }

    // expr := term ('or' term)*
    fn expr(&mut self) -> SuiteResult<Expr> {
        let mut left = self.term()?;
        while self.peek() == Some(&Token::Or) {
            let _ = self.advance();
            let right = self.term()?;
            left = Expr::Or(Box::new(left), Box::new(right));
        }
        Ok(left)
    }

    // term := factor ('and' factor)*
    fn term(&mut self) -> SuiteResult<Expr> {
        let mut left = self.factor()?;
        while self.peek() == Some(&Token::And) {
            let _ = self.advance();
            let right = self.factor()?;
            left = Expr::And(Box::new(left), Box::new(right));
        }
        Ok(left)
    }

    // factor := 'not' factor | '(' expr ')' | tag
    fn factor(&mut self) -> SuiteResult<Expr> {
        match self.advance().cloned() {
            Some(Token::Not) => Ok(Expr::Not(Box::new(self.factor()?))),
            Some(Token::Open) => {
                let inner = self.expr()?;
                if self.advance() == Some(&Token::Close) {
                    Ok(inner)
                } else {
                    Err(self.error("missing ')'"))
                }
            }
            Some(Token::Tag(name)) => Ok(Expr::Tag(name)),
            Some(_) => Err(self.error("operator where a tag was expected")),
            None => Err(self.error("unexpected end of expression")),
        }
    }
}

/// A parsed tag filter expression
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagFilter {
    expr: Option<Expr>,
}

impl TagFilter {
    /// A filter that matches every scenario
    #[must_use]
    pub const fn all() -> Self {
        Self { expr: None }
    }

    /// Parse a filter expression; blank input matches everything.
    ///
    /// # Errors
    ///
    /// [`SuiteError::Config`] describing the syntax problem.
    pub fn parse(input: &str) -> SuiteResult<Self> {
        let tokens = tokenize(input)?;
        if tokens.is_empty() {
            return Ok(Self::all());
        }
        let mut parser = Parser {
            tokens: &tokens,
            pos: 0,
            input,
        };
        let expr = parser.expr()?;
        if parser.pos != tokens.len() {
            return Err(parser.error("trailing input after expression"));
        }
        Ok(Self { expr: Some(expr) })
    }

    /// Whether a scenario with these tags should run
    #[must_use]
    pub fn matches(&self, tags: &[&str]) -> bool {
        match &self.expr {
            None => true,
            Some(expr) => {
                let normalized: Vec<String> = tags
                    .iter()
                    .map(|t| t.trim_start_matches('@').to_ascii_lowercase())
                    .collect();
                expr.evaluate(&normalized)
            }
        }
    }
}
