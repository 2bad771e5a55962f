//! Parser for para
//!
//! Recursive descent with one token of lookahead. There is no backtracking:
//! every production commits on its leading token and the first token that
//! does not fit is reported.
//!
//! ```text
//! program     := statement*
//! statement   := for_loop | range | print
//! for_loop    := FOR IDENTIFIER IN (RANGE range_args | expression) COLON statement
//! range_args  := operand (COMMA expression)?
//! operand     := LPAREN expression (COMMA expression)? RPAREN | expression
//! range       := RANGE expression COLON expression
//! print       := PRINT expression
//! expression  := LPAREN expression RPAREN | INTEGER | STRING | IDENTIFIER | range | print
//! ```

use log::debug;

use crate::frontend::ast::*;
use crate::frontend::token::{Token, TokenKind};
use crate::utils::{Error, Result, Span};

/// The parser
pub struct Parser {
    tokens: Vec<Token>,
    pos: usize,
}

impl Parser {
    /// Create a parser from pre-tokenized input
    pub fn from_tokens(tokens: Vec<Token>) -> Self {
        Self { tokens, pos: 0 }
    }

    // ==================== Helper Methods ====================

    fn current(&self) -> Option<&Token> {
        self.tokens.get(self.pos)
    }

    fn current_kind(&self) -> Option<TokenKind> {
        self.current().map(|t| t.kind)
    }

    fn check(&self, kind: TokenKind) -> bool {
        self.current_kind() == Some(kind)
    }

    fn is_at_end(&self) -> bool {
        self.pos >= self.tokens.len()
    }

    fn advance(&mut self) -> Option<Token> {
        let token = self.tokens.get(self.pos).cloned();
        if token.is_some() {
            self.pos += 1;
        }
        token
    }

    /// Advance past the current token if it is `expected`, otherwise fail on it.
    fn expect(&mut self, expected: TokenKind) -> Result<Token> {
        if self.check(expected) {
            self.advance()
                .ok_or_else(|| self.unexpected(expected.name()))
        } else {
            Err(self.unexpected(expected.name()))
        }
    }

    fn consume(&mut self, kind: TokenKind) -> bool {
        if self.check(kind) {
            self.advance();
            true
        } else {
            false
        }
    }

    fn unexpected(&self, expected: &str) -> Error {
        match self.current() {
            Some(token) => Error::UnexpectedToken {
                expected: expected.to_string(),
                got: format!("{} '{}'", token.kind, token.text),
                span: token.span,
            },
            None => Error::UnexpectedToken {
                expected: expected.to_string(),
                got: "end of input".to_string(),
                span: self.eof_span(),
            },
        }
    }

    fn eof_span(&self) -> Span {
        self.tokens.last().map(|t| t.span.after(&t.text)).unwrap_or_default()
    }

    // ==================== Parsing Methods ====================

    /// Parse a complete program. Zero statements is a valid program.
    pub fn parse_program(&mut self) -> Result<Program> {
        let mut statements = Vec::new();

        while !self.is_at_end() {
            statements.push(self.parse_stmt()?);
        }

        debug!("parsed {} statements", statements.len());
        Ok(Program { statements })
    }

    fn parse_stmt(&mut self) -> Result<Stmt> {
        match self.current_kind() {
            Some(TokenKind::For) => Ok(Stmt::ForLoop(self.parse_for_loop()?)),
            Some(TokenKind::Range) => Ok(Stmt::Range(self.parse_range()?)),
            Some(TokenKind::Print) => Ok(Stmt::Print(self.parse_print()?)),
            _ => Err(self.unexpected("statement (FOR, RANGE, PRINT)")),
        }
    }

    fn parse_for_loop(&mut self) -> Result<ForLoop> {
        let start = self.expect(TokenKind::For)?.span;

        let var = self.expect(TokenKind::Identifier)?;
        let variable = Ident::new(var.text, var.span);

        self.expect(TokenKind::In)?;

        let iterable = if self.check(TokenKind::Range) {
            let keyword = self.expect(TokenKind::Range)?.span;
            Expr::Range(self.parse_range_args(keyword)?)
        } else {
            self.parse_expr()?
        };

        self.expect(TokenKind::Colon)?;
        let body = self.parse_stmt()?;

        Ok(ForLoop {
            span: start.merge(&body.span()),
            variable,
            iterable,
            body: Box::new(body),
        })
    }

    /// Arguments after RANGE in a loop header.
    ///
    /// One argument is the exclusive end and the start is `0`. Two arguments
    /// are written either bare (`1, 10`) or parenthesized (`(1, 10)`).
    fn parse_range_args(&mut self, keyword: Span) -> Result<Range> {
        let (start, end) = match self.parse_operand()? {
            Operand::Pair(start, end) => (start, end),
            Operand::Single(first) => {
                if self.consume(TokenKind::Comma) {
                    let second = self.parse_expr()?;
                    (first, second)
                } else {
                    (Expr::zero(first.span().point()), first)
                }
            }
        };

        Ok(Range {
            span: keyword.merge(&end.span()),
            start: Box::new(start),
            end: Box::new(end),
        })
    }

    /// Parenthesized production that may hold a pair
    fn parse_operand(&mut self) -> Result<Operand> {
        if !self.consume(TokenKind::LParen) {
            return Ok(Operand::Single(self.parse_expr()?));
        }

        let first = self.parse_expr()?;
        let operand = if self.consume(TokenKind::Comma) {
            Operand::Pair(first, self.parse_expr()?)
        } else {
            Operand::Single(first)
        };
        self.expect(TokenKind::RParen)?;
        Ok(operand)
    }

    /// `RANGE expression COLON expression`
    fn parse_range(&mut self) -> Result<Range> {
        let keyword = self.expect(TokenKind::Range)?.span;
        let start = self.parse_expr()?;
        self.expect(TokenKind::Colon)?;
        let end = self.parse_expr()?;

        Ok(Range {
            span: keyword.merge(&end.span()),
            start: Box::new(start),
            end: Box::new(end),
        })
    }

    fn parse_print(&mut self) -> Result<Print> {
        let keyword = self.expect(TokenKind::Print)?.span;
        let expression = self.parse_expr()?;

        Ok(Print {
            span: keyword.merge(&expression.span()),
            expression: Box::new(expression),
        })
    }

    // ==================== Expressions ====================

    fn parse_expr(&mut self) -> Result<Expr> {
        match self.current_kind() {
            Some(TokenKind::LParen) => {
                self.advance();
                let expr = self.parse_expr()?;
                self.expect(TokenKind::RParen)?;
                Ok(expr)
            }
            Some(TokenKind::Integer) => {
                let t = self.expect(TokenKind::Integer)?;
                Ok(Expr::Integer(Literal::new(t.text, t.span)))
            }
            Some(TokenKind::String) => {
                let t = self.expect(TokenKind::String)?;
                Ok(Expr::String(Literal::new(t.text, t.span)))
            }
            Some(TokenKind::Identifier) => {
                let t = self.expect(TokenKind::Identifier)?;
                Ok(Expr::Identifier(Ident::new(t.text, t.span)))
            }
            Some(TokenKind::Range) => Ok(Expr::Range(self.parse_range()?)),
            Some(TokenKind::Print) => Ok(Expr::Print(self.parse_print()?)),
            _ => Err(self.unexpected("expression")),
        }
    }
}

/// Parse a token sequence into a program.
pub fn parse(tokens: Vec<Token>) -> Result<Program> {
    Parser::from_tokens(tokens).parse_program()
}
