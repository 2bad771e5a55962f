//! Error handling for the para pipeline

use crate::utils::Span;
use thiserror::Error;

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;

/// Pipeline error. Every stage fails on the first violation it sees.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    // ==================== Lexer Errors ====================

    #[error("Unrecognized character '{character}' at {span}")]
    Lexical { character: String, span: Span },

    // ==================== Parser Errors ====================

    #[error("Unexpected token at {span}: expected {expected}, got {got}")]
    UnexpectedToken {
        expected: String,
        got: String,
        span: Span,
    },

    // ==================== Semantic Errors ====================

    #[error("Variable '{name}' used before declaration at {span}")]
    UndeclaredVariable { name: String, span: Span },

    #[error("Unsupported statement: {kind}")]
    UnsupportedStatement { kind: String, span: Option<Span> },

    // ==================== Generation Errors ====================

    #[error("Unsupported expression: {kind}")]
    UnsupportedExpression { kind: String, span: Option<Span> },

    #[error("Unsupported entry: {kind}")]
    UnsupportedEntry { kind: String },

    // ==================== Driver Errors ====================

    #[error("Source '{0}' is empty")]
    EmptySource(String),

    #[error("IO error: {0}")]
    Io(String),

    #[error("Execution backend error: {0}")]
    Backend(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl Error {
    /// Get the span associated with this error
    pub fn span(&self) -> Option<Span> {
        match self {
            Self::Lexical { span, .. } => Some(*span),
            Self::UnexpectedToken { span, .. } => Some(*span),
            Self::UndeclaredVariable { span, .. } => Some(*span),
            Self::UnsupportedStatement { span, .. } => *span,
            Self::UnsupportedExpression { span, .. } => *span,
            Self::UnsupportedEntry { .. }
            | Self::EmptySource(_)
            | Self::Io(_)
            | Self::Backend(_)
            | Self::Internal(_) => None,
        }
    }

    /// Pipeline stage that raised this error
    pub fn stage(&self) -> &'static str {
        match self {
            Self::Lexical { .. } => "lexical",
            Self::UnexpectedToken { .. } => "syntax",
            Self::UndeclaredVariable { .. } | Self::UnsupportedStatement { .. } => "semantic",
            Self::UnsupportedExpression { .. } | Self::UnsupportedEntry { .. } => "codegen",
            Self::EmptySource(_) | Self::Io(_) => "input",
            Self::Backend(_) => "backend",
            Self::Internal(_) => "internal",
        }
    }
}
