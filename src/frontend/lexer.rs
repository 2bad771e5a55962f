//! Lexer for para
//!
//! Converts source text into a token sequence by running the token catalog
//! across the whole input.

use log::{debug, trace};
use regex::{Captures, Regex};

use crate::frontend::token::{PatternKind, Token, TokenCatalog, TokenKind};
use crate::utils::{Error, Result, Span};

/// The lexer state. Build one per input; nothing is shared between runs.
pub struct Lexer<'a> {
    /// Source text
    source: &'a str,
    /// Combined catalog matcher
    matcher: Regex,
}

impl<'a> Lexer<'a> {
    /// Create a new lexer for the given source code
    pub fn new(source: &'a str) -> Result<Self> {
        Ok(Self {
            source,
            matcher: TokenCatalog::compile()?,
        })
    }

    /// Scan the whole source, failing on the first unrecognized character.
    ///
    /// Only the catch-all pattern raises an error. Recognized characters that
    /// no pattern claims at their position, such as the `x` in `1x`, are
    /// passed over.
    pub fn scan(&self) -> Result<Vec<Token>> {
        let mut tokens = Vec::new();

        for caps in self.matcher.captures_iter(self.source) {
            let (index, m) = match Self::winning_pattern(&caps) {
                Some(found) => found,
                None => continue,
            };

            let span = Span::locate(self.source, m.start(), m.end());
            match TokenCatalog::patterns()[index].1 {
                PatternKind::Token(kind) => {
                    trace!("{:?} {:?} at {}", kind, m.as_str(), span);
                    tokens.push(Token::new(kind, m.as_str(), span));
                }
                PatternKind::Unknown => {
                    return Err(Error::Lexical {
                        character: m.as_str().to_string(),
                        span,
                    });
                }
            }
        }

        debug!("scanned {} tokens", tokens.len());
        Ok(tokens)
    }

    /// First catalog pattern that participated in the match
    fn winning_pattern<'c>(caps: &Captures<'c>) -> Option<(usize, regex::Match<'c>)> {
        (0..TokenCatalog::patterns().len())
            .find_map(|i| caps.get(i + 1).map(|m| (i, m)))
    }
}

/// Scan `text` into tokens.
pub fn scan(text: &str) -> Result<Vec<Token>> {
    Lexer::new(text)?.scan()
}

/// Kinds only, handy for assertions and `--emit tokens`
pub fn kinds(tokens: &[Token]) -> Vec<TokenKind> {
    tokens.iter().map(|t| t.kind).collect()
}
