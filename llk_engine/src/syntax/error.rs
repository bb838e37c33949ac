//! Parse-time errors
//!
//! Parsing never backtracks, so the first error ends the parse. Errors carry
//! the pattern being parsed, the token types that would have been accepted
//! and the offending position.

use crate::config::constants::compile_time::parsing::MAX_EXPECTED_TOKENS_REPORTED;
use crate::grammar::PatternId;
use crate::logging::{codes, Code};
use crate::tokens::{Token, TokenNames, TokenType};
use crate::utils::Position;
use std::fmt;

pub type ParseResult<T> = Result<T, ParseError>;

/// Token types accepted at the failure point, with display names resolved
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExpectedTokens {
    token_types: Vec<TokenType>,
    names: Vec<String>,
    truncated: bool,
}

impl ExpectedTokens {
    pub fn new<I>(token_types: I, names: &TokenNames) -> Self
    where
        I: IntoIterator<Item = TokenType>,
    {
        let mut token_types: Vec<TokenType> = token_types.into_iter().collect();
        token_types.sort();
        token_types.dedup();
        let truncated = token_types.len() > MAX_EXPECTED_TOKENS_REPORTED;
        token_types.truncate(MAX_EXPECTED_TOKENS_REPORTED);
        let names = token_types.iter().map(|t| names.name(*t)).collect();
        Self {
            token_types,
            names,
            truncated,
        }
    }

    pub fn token_types(&self) -> &[TokenType] {
        &self.token_types
    }

    pub fn contains(&self, token_type: TokenType) -> bool {
        self.token_types.contains(&token_type)
    }

    pub fn is_empty(&self) -> bool {
        self.token_types.is_empty()
    }
}

impl fmt::Display for ExpectedTokens {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let quoted: Vec<String> = self.names.iter().map(|n| format!("'{}'", n)).collect();
        match quoted.as_slice() {
            [] => write!(f, "nothing")?,
            [single] => write!(f, "{}", single)?,
            [init @ .., last] => write!(f, "{} or {}", init.join(", "), last)?,
        }
        if self.truncated {
            write!(f, " (and more)")?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    #[error("Unexpected token {found} in '{pattern}' at {position}: expected {expected}")]
    UnexpectedToken {
        pattern: String,
        expected: ExpectedTokens,
        found: Token,
        position: Position,
    },

    #[error("Unexpected end of input in '{pattern}' at {position}: expected {expected}")]
    UnexpectedEndOfInput {
        pattern: String,
        expected: ExpectedTokens,
        position: Position,
    },

    #[error("Unknown pattern {id}")]
    UnknownPattern { id: PatternId },

    #[error("Maximum parse depth {depth} exceeded in '{pattern}' at {position}")]
    RecursionLimit {
        pattern: String,
        depth: usize,
        position: Position,
    },
}

/// Discriminant of [`ParseError`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParseErrorKind {
    UnexpectedToken,
    UnexpectedEndOfInput,
    UnknownPattern,
    RecursionLimit,
}

impl ParseError {
    /// Error for `found` when one of `expected` was required
    ///
    /// An end-of-input token yields `UnexpectedEndOfInput`.
    pub fn unexpected(pattern: &str, expected: ExpectedTokens, found: Token) -> Self {
        let position = found.position;
        if found.is_eof() {
            Self::UnexpectedEndOfInput {
                pattern: pattern.to_string(),
                expected,
                position,
            }
        } else {
            Self::UnexpectedToken {
                pattern: pattern.to_string(),
                expected,
                found,
                position,
            }
        }
    }

    pub fn unknown_pattern(id: PatternId) -> Self {
        Self::UnknownPattern { id }
    }

    pub fn recursion_limit(pattern: &str, depth: usize, position: Position) -> Self {
        Self::RecursionLimit {
            pattern: pattern.to_string(),
            depth,
            position,
        }
    }

    pub fn kind(&self) -> ParseErrorKind {
        match self {
            Self::UnexpectedToken { .. } => ParseErrorKind::UnexpectedToken,
            Self::UnexpectedEndOfInput { .. } => ParseErrorKind::UnexpectedEndOfInput,
            Self::UnknownPattern { .. } => ParseErrorKind::UnknownPattern,
            Self::RecursionLimit { .. } => ParseErrorKind::RecursionLimit,
        }
    }

    /// Get error code for logging
    pub fn code(&self) -> Code {
        match self.kind() {
            ParseErrorKind::UnexpectedToken => codes::parse::UNEXPECTED_TOKEN,
            ParseErrorKind::UnexpectedEndOfInput => codes::parse::UNEXPECTED_END_OF_INPUT,
            ParseErrorKind::UnknownPattern => codes::parse::UNKNOWN_PATTERN,
            ParseErrorKind::RecursionLimit => codes::parse::RECURSION_LIMIT,
        }
    }

    /// Get position if available
    pub fn position(&self) -> Option<Position> {
        match self {
            Self::UnexpectedToken { position, .. }
            | Self::UnexpectedEndOfInput { position, .. }
            | Self::RecursionLimit { position, .. } => Some(*position),
            Self::UnknownPattern { .. } => None,
        }
    }

    pub fn expected(&self) -> Option<&ExpectedTokens> {
        match self {
            Self::UnexpectedToken { expected, .. } | Self::UnexpectedEndOfInput { expected, .. } => {
                Some(expected)
            }
            Self::UnknownPattern { .. } | Self::RecursionLimit { .. } => None,
        }
    }
}
