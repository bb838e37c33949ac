//! Token types and tokens

use crate::utils::Position;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Opaque token type identifier assigned by the tokenizer
///
/// `TokenType::EOF` (zero) is reserved for end of input. Grammar tokens use
/// non-zero values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TokenType(u32);

impl TokenType {
    /// End of input
    pub const EOF: TokenType = TokenType(0);

    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    pub const fn id(self) -> u32 {
        self.0
    }

    pub const fn is_eof(self) -> bool {
        self.0 == 0
    }
}

impl fmt::Display for TokenType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_eof() {
            write!(f, "EOF")
        } else {
            write!(f, "#{}", self.0)
        }
    }
}

/// A token produced by the tokenizer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Token {
    pub token_type: TokenType,
    /// Matched source text
    pub image: String,
    pub position: Position,
}

impl Token {
    pub fn new(token_type: TokenType, image: impl Into<String>, position: Position) -> Self {
        Self {
            token_type,
            image: image.into(),
            position,
        }
    }

    /// End-of-input token at the given position
    pub fn eof(position: Position) -> Self {
        Self::new(TokenType::EOF, "", position)
    }

    pub fn is_eof(&self) -> bool {
        self.token_type.is_eof()
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_eof() {
            write!(f, "end of input")
        } else {
            write!(f, "\"{}\"", self.image)
        }
    }
}

/// Human-readable names for token types, used in messages and tree dumps
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenNames {
    names: BTreeMap<TokenType, String>,
}

impl TokenNames {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, token_type: TokenType, name: impl Into<String>) {
        self.names.insert(token_type, name.into());
    }

    pub fn with(mut self, token_type: TokenType, name: impl Into<String>) -> Self {
        self.insert(token_type, name);
        self
    }

    pub fn get(&self, token_type: TokenType) -> Option<&str> {
        self.names.get(&token_type).map(String::as_str)
    }

    /// Registered name, or the numeric form when none is registered
    pub fn name(&self, token_type: TokenType) -> String {
        match self.get(token_type) {
            Some(name) => name.to_string(),
            None => token_type.to_string(),
        }
    }

    /// Format a sequence of token types as space separated names
    pub fn format_sequence(&self, sequence: &[TokenType]) -> String {
        sequence
            .iter()
            .map(|t| self.name(*t))
            .collect::<Vec<_>>()
            .join(" ")
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_eof_is_reserved_zero() {
        assert!(TokenType::EOF.is_eof());
        assert!(!TokenType::new(3).is_eof());
        assert_eq!(TokenType::EOF.to_string(), "EOF");
        assert_eq!(TokenType::new(3).to_string(), "#3");
    }

    #[test]
    fn test_token_names_fall_back_to_numeric() {
        let names = TokenNames::new()
            .with(TokenType::new(1), "NUMBER")
            .with(TokenType::EOF, "<eof>");

        assert_eq!(names.name(TokenType::new(1)), "NUMBER");
        assert_eq!(names.name(TokenType::new(2)), "#2");
        assert_eq!(
            names.format_sequence(&[TokenType::new(1), TokenType::EOF]),
            "NUMBER <eof>"
        );
    }

    #[test]
    fn test_token_display() {
        let token = Token::new(TokenType::new(1), "42", Position::start());
        assert_eq!(token.to_string(), "\"42\"");
        assert_eq!(Token::eof(Position::start()).to_string(), "end of input");
    }
}
