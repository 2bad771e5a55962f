//! Token definitions and the ordered token catalog

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::utils::{Error, Result, Span};

/// A token produced by the lexer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Token {
    pub kind: TokenKind,
    /// Literal source text of the token
    pub text: String,
    pub span: Span,
}

impl Token {
    pub fn new(kind: TokenKind, text: impl Into<String>, span: Span) -> Self {
        Self { kind, text: text.into(), span }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Token(type={}, value='{}')", self.kind, self.text)
    }
}

/// Token kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TokenKind {
    // ============ Keywords ============
    /// para
    For,
    /// no
    In,
    /// intervalo
    Range,
    /// escreva
    Print,

    // ============ Identifiers and Literals ============
    Identifier,
    Integer,
    /// Single- or double-quoted, quotes included in the text
    String,

    // ============ Punctuation ============
    /// Reserved, no pattern produces it
    Plus,
    /// Reserved, no pattern produces it
    Assign,
    LParen,
    RParen,
    Colon,
    Comma,
}

impl TokenKind {
    /// Upper-case role name used in diagnostics
    pub fn name(&self) -> &'static str {
        match self {
            TokenKind::For => "FOR",
            TokenKind::In => "IN",
            TokenKind::Range => "RANGE",
            TokenKind::Print => "PRINT",
            TokenKind::Identifier => "IDENTIFIER",
            TokenKind::Integer => "INTEGER",
            TokenKind::String => "STRING",
            TokenKind::Plus => "PLUS",
            TokenKind::Assign => "ASSIGN",
            TokenKind::LParen => "LPAREN",
            TokenKind::RParen => "RPAREN",
            TokenKind::Colon => "COLON",
            TokenKind::Comma => "COMMA",
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// What a catalog pattern produces when it wins at a scan position
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PatternKind {
    Token(TokenKind),
    /// Catch-all for characters no other pattern accepts
    Unknown,
}

/// Ordered set of lexical patterns.
///
/// Order is significant: keywords come before the identifier pattern so that
/// reserved words never lex as identifiers, and the unknown-character pattern
/// comes last.
pub struct TokenCatalog;

const PATTERNS: &[(&str, PatternKind)] = &[
    (r"(?i:\bpara\b)", PatternKind::Token(TokenKind::For)),
    (r"(?i:\bno\b)", PatternKind::Token(TokenKind::In)),
    (r"(?i:\bintervalo\b)", PatternKind::Token(TokenKind::Range)),
    (r"(?i:\bescreva\b)", PatternKind::Token(TokenKind::Print)),
    (r"\b[a-zA-Z_][a-zA-Z0-9_]*\b", PatternKind::Token(TokenKind::Identifier)),
    (r"\d+", PatternKind::Token(TokenKind::Integer)),
    (r",", PatternKind::Token(TokenKind::Comma)),
    (r"'[^']*'", PatternKind::Token(TokenKind::String)),
    (r#""[^"]*""#, PatternKind::Token(TokenKind::String)),
    (r"\(", PatternKind::Token(TokenKind::LParen)),
    (r"\)", PatternKind::Token(TokenKind::RParen)),
    (r":", PatternKind::Token(TokenKind::Colon)),
    (r"[^a-zA-Z0-9_\s,]", PatternKind::Unknown),
];

impl TokenCatalog {
    /// The patterns in registration order
    pub fn patterns() -> &'static [(&'static str, PatternKind)] {
        PATTERNS
    }

    /// Build the combined leftmost-first matcher.
    ///
    /// Pattern `i` of the catalog is capture group `i + 1` of the result.
    pub fn compile() -> Result<Regex> {
        let combined = PATTERNS
            .iter()
            .map(|(pattern, _)| format!("({})", pattern))
            .collect::<Vec<_>>()
            .join("|");
        Regex::new(&combined).map_err(|e| Error::Internal(format!("token catalog: {}", e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keywords_precede_identifier() {
        let patterns = TokenCatalog::patterns();
        let ident = patterns
            .iter()
            .position(|(_, k)| *k == PatternKind::Token(TokenKind::Identifier))
            .unwrap();
        for keyword in [TokenKind::For, TokenKind::In, TokenKind::Range, TokenKind::Print] {
            let pos = patterns.iter().position(|(_, k)| *k == PatternKind::Token(keyword)).unwrap();
            assert!(pos < ident, "{} must be registered before IDENTIFIER", keyword);
        }
        assert_eq!(patterns.last().map(|(_, k)| *k), Some(PatternKind::Unknown));
    }

    #[test]
    fn test_reserved_kinds_have_no_pattern() {
        for (_, kind) in TokenCatalog::patterns() {
            assert_ne!(*kind, PatternKind::Token(TokenKind::Plus));
            assert_ne!(*kind, PatternKind::Token(TokenKind::Assign));
        }
    }

    #[test]
    fn test_catalog_compiles_one_group_per_pattern() {
        let regex = TokenCatalog::compile().unwrap();
        assert_eq!(regex.captures_len(), TokenCatalog::patterns().len() + 1);
    }

    #[test]
    fn test_token_display() {
        let token = Token::new(TokenKind::For, "para", Span::dummy());
        assert_eq!(token.to_string(), "Token(type=FOR, value='para')");
    }
}
