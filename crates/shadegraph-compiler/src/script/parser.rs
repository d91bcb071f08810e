//! Recursive-descent parser for construction scripts.
//!
//! ```text
//! script    = statement*
//! statement = "let" IDENT "=" IDENT "(" STRING ")" ";"
//!           | IDENT "." IDENT "=" value ";"
//!           | IDENT "." IDENT "->" IDENT "." IDENT ";"
//! value     = STRING | NUMBER | "true" | "false" | "null" | "[" (value ("," value)*)? "]"
//! ```
//!
//! A malformed statement is reported and skipped up to the next `;`.

use std::ops::Range;

use serde_json::Value;

use super::ScriptError;
use super::lexer::{Token, TokenKind, lex, token_text};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Spanned<T> {
    pub value: T,
    pub span: Range<usize>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Statement {
    /// `let ident = Class("display name");`
    Declare {
        ident: Spanned<String>,
        class: Spanned<String>,
        name: String,
        span: Range<usize>,
    },
    /// `ident.key = value;`
    Property {
        ident: Spanned<String>,
        key: Spanned<String>,
        value: Value,
        span: Range<usize>,
    },
    /// `from.output -> to.input;`
    Connect {
        from: Spanned<String>,
        output: Spanned<String>,
        to: Spanned<String>,
        input: Spanned<String>,
        span: Range<usize>,
    },
}

impl Statement {
    pub fn span(&self) -> &Range<usize> {
        match self {
            Self::Declare { span, .. } | Self::Property { span, .. } | Self::Connect { span, .. } => {
                span
            }
        }
    }
}

/// Parse a whole script, returning every well-formed statement and every error.
pub fn parse(source: &str) -> (Vec<Statement>, Vec<ScriptError>) {
    let mut parser = Parser::new(source);
    let mut statements = Vec::new();
    while !parser.at_end() {
        match parser.statement() {
            Some(statement) => statements.push(statement),
            None => parser.recover(),
        }
    }
    (statements, parser.errors)
}

struct Parser<'s> {
    source: &'s str,
    tokens: Vec<Token>,
    pos: usize,
    errors: Vec<ScriptError>,
}

impl<'s> Parser<'s> {
    fn new(source: &'s str) -> Self {
        let tokens = lex(source)
            .into_iter()
            .filter(|t| !t.kind.is_trivia())
            .collect();
        Self {
            source,
            tokens,
            pos: 0,
            errors: Vec::new(),
        }
    }

    fn at_end(&self) -> bool {
        self.pos >= self.tokens.len()
    }

    fn peek_kind(&self) -> Option<TokenKind> {
        self.tokens.get(self.pos).map(|t| t.kind)
    }

    fn current_span(&self) -> Range<usize> {
        match self.tokens.get(self.pos) {
            Some(token) => token.span.clone(),
            None => self.source.len()..self.source.len(),
        }
    }

    fn bump(&mut self) -> Option<Token> {
        let token = self.tokens.get(self.pos).cloned();
        if token.is_some() {
            self.pos += 1;
        }
        token
    }

    fn error(&mut self, message: impl Into<String>, span: Range<usize>) {
        self.errors.push(ScriptError::new(message, span));
    }

    fn expect(&mut self, kind: TokenKind) -> Option<Token> {
        if self.peek_kind() == Some(kind) {
            return self.bump();
        }
        let found = self
            .peek_kind()
            .map_or("end of input", TokenKind::describe);
        let span = self.current_span();
        self.error(format!("expected {}, found {found}", kind.describe()), span);
        None
    }

    fn ident(&mut self) -> Option<Spanned<String>> {
        let token = self.expect(TokenKind::Ident)?;
        Some(Spanned {
            value: token_text(self.source, &token).to_string(),
            span: token.span,
        })
    }

    /// Skip past the next `;`, or to the end of input.
    fn recover(&mut self) {
        while let Some(token) = self.bump() {
            if token.kind == TokenKind::Semicolon {
                break;
            }
        }
    }

    fn statement(&mut self) -> Option<Statement> {
        let start = self.current_span().start;
        match self.peek_kind() {
            Some(TokenKind::Let) => self.declaration(start),
            Some(TokenKind::Ident) => self.member_statement(start),
            found => {
                let found = found.map_or("end of input", TokenKind::describe);
                let span = self.current_span();
                self.error(format!("expected `let` or identifier, found {found}"), span);
                None
            }
        }
    }

    fn declaration(&mut self, start: usize) -> Option<Statement> {
        self.expect(TokenKind::Let)?;
        let ident = self.ident()?;
        self.expect(TokenKind::Equals)?;
        let class = self.ident()?;
        self.expect(TokenKind::ParenOpen)?;
        let name_token = self.expect(TokenKind::String)?;
        let name = self.string(&name_token)?;
        self.expect(TokenKind::ParenClose)?;
        let end = self.expect(TokenKind::Semicolon)?.span.end;
        Some(Statement::Declare {
            ident,
            class,
            name,
            span: start..end,
        })
    }

    fn member_statement(&mut self, start: usize) -> Option<Statement> {
        let ident = self.ident()?;
        self.expect(TokenKind::Dot)?;
        let member = self.ident()?;

        match self.peek_kind() {
            Some(TokenKind::Equals) => {
                self.bump();
                let value = self.value()?;
                let end = self.expect(TokenKind::Semicolon)?.span.end;
                Some(Statement::Property {
                    ident,
                    key: member,
                    value,
                    span: start..end,
                })
            }
            Some(TokenKind::Arrow) => {
                self.bump();
                let to = self.ident()?;
                self.expect(TokenKind::Dot)?;
                let input = self.ident()?;
                let end = self.expect(TokenKind::Semicolon)?.span.end;
                Some(Statement::Connect {
                    from: ident,
                    output: member,
                    to,
                    input,
                    span: start..end,
                })
            }
            found => {
                let found = found.map_or("end of input", TokenKind::describe);
                let span = self.current_span();
                self.error(format!("expected `=` or `->`, found {found}"), span);
                None
            }
        }
    }

    fn value(&mut self) -> Option<Value> {
        let span = self.current_span();
        let Some(token) = self.bump() else {
            self.error("expected value, found end of input", span);
            return None;
        };
        match token.kind {
            TokenKind::String => self.string(&token).map(Value::String),
            TokenKind::Number => match serde_json::from_str::<Value>(token_text(self.source, &token)) {
                Ok(number) => Some(number),
                Err(_) => {
                    self.error("number out of range", token.span);
                    None
                }
            },
            TokenKind::True => Some(Value::Bool(true)),
            TokenKind::False => Some(Value::Bool(false)),
            TokenKind::Null => Some(Value::Null),
            TokenKind::BracketOpen => self.array(),
            other => {
                self.error(format!("expected value, found {}", other.describe()), token.span);
                None
            }
        }
    }

    /// Elements after an opening `[`, through the closing `]`.
    fn array(&mut self) -> Option<Value> {
        let mut items = Vec::new();
        if self.peek_kind() == Some(TokenKind::BracketClose) {
            self.bump();
            return Some(Value::Array(items));
        }
        loop {
            items.push(self.value()?);
            match self.peek_kind() {
                Some(TokenKind::Comma) => {
                    self.bump();
                }
                Some(TokenKind::BracketClose) => {
                    self.bump();
                    return Some(Value::Array(items));
                }
                found => {
                    let found = found.map_or("end of input", TokenKind::describe);
                    let span = self.current_span();
                    self.error(format!("expected `,` or `]`, found {found}"), span);
                    return None;
                }
            }
        }
    }

    fn string(&mut self, token: &Token) -> Option<String> {
        match serde_json::from_str::<String>(token_text(self.source, token)) {
            Ok(text) => Some(text),
            Err(_) => {
                self.error("invalid escape in string", token.span.clone());
                None
            }
        }
    }
}
