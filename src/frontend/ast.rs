//! Abstract Syntax Tree definitions for para

use serde::{Deserialize, Serialize};

use crate::utils::Span;

/// A complete program (one source text)
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Program {
    pub statements: Vec<Stmt>,
}

/// Statements
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "node", rename_all = "snake_case")]
pub enum Stmt {
    ForLoop(ForLoop),
    Print(Print),
    /// `intervalo a : b` written as a statement of its own
    Range(Range),
}

/// `para <variable> no <iterable> : <body>`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForLoop {
    pub variable: Ident,
    pub iterable: Expr,
    pub body: Box<Stmt>,
    #[serde(default)]
    pub span: Span,
}

/// `escreva <expression>`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Print {
    pub expression: Box<Expr>,
    #[serde(default)]
    pub span: Span,
}

/// Half-open range `start..end`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Range {
    pub start: Box<Expr>,
    pub end: Box<Expr>,
    #[serde(default)]
    pub span: Span,
}

/// Identifier
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ident {
    pub name: String,
    #[serde(default)]
    pub span: Span,
}

/// Integer or string literal, kept as its source text
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Literal {
    pub text: String,
    #[serde(default)]
    pub span: Span,
}

/// Expressions
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "node", rename_all = "snake_case")]
pub enum Expr {
    Identifier(Ident),
    Integer(Literal),
    String(Literal),
    Range(Range),
    Print(Print),
}

/// Result of the parenthesized production: `(a)` or `(a, b)`
#[derive(Debug, Clone, PartialEq)]
pub enum Operand {
    Single(Expr),
    Pair(Expr, Expr),
}

impl Ident {
    pub fn new(name: impl Into<String>, span: Span) -> Self {
        Self { name: name.into(), span }
    }
}

impl Literal {
    pub fn new(text: impl Into<String>, span: Span) -> Self {
        Self { text: text.into(), span }
    }
}

impl Stmt {
    pub fn span(&self) -> Span {
        match self {
            Stmt::ForLoop(f) => f.span,
            Stmt::Print(p) => p.span,
            Stmt::Range(r) => r.span,
        }
    }

    /// Node tag used in diagnostics and tree dumps
    pub fn kind_name(&self) -> &'static str {
        match self {
            Stmt::ForLoop(_) => "FOR_LOOP",
            Stmt::Print(_) => "PRINT",
            Stmt::Range(_) => "RANGE",
        }
    }
}

impl Expr {
    /// Literal `0`, the implicit start of a one-argument range
    pub fn zero(span: Span) -> Self {
        Expr::Integer(Literal::new("0", span))
    }

    pub fn span(&self) -> Span {
        match self {
            Expr::Identifier(i) => i.span,
            Expr::Integer(l) | Expr::String(l) => l.span,
            Expr::Range(r) => r.span,
            Expr::Print(p) => p.span,
        }
    }

    /// Node tag used in diagnostics and tree dumps
    pub fn kind_name(&self) -> &'static str {
        match self {
            Expr::Identifier(_) => "IDENTIFIER",
            Expr::Integer(_) => "INTEGER",
            Expr::String(_) => "STRING",
            Expr::Range(_) => "RANGE",
            Expr::Print(_) => "PRINT",
        }
    }

    /// Source text of a leaf node; `None` for composite nodes
    pub fn literal_text(&self) -> Option<&str> {
        match self {
            Expr::Identifier(i) => Some(&i.name),
            Expr::Integer(l) | Expr::String(l) => Some(&l.text),
            Expr::Range(_) | Expr::Print(_) => None,
        }
    }
}
