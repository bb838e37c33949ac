//! Token stream with bounded look-ahead
//!
//! Tokens are pulled lazily from the tokenizer and buffered only as far as the
//! parser peeks. Once the tokenizer is exhausted (or yields an end-of-input
//! token itself) every further peek or read returns an EOF token positioned
//! after the last real token.

use super::token::Token;
use crate::utils::Position;
use std::collections::VecDeque;
use std::fmt;

pub struct TokenStream {
    source: Box<dyn Iterator<Item = Token>>,
    buffer: VecDeque<Token>,
    eof: Token,
    exhausted: bool,
    consumed: usize,
}

impl TokenStream {
    /// Stream over an already tokenized input
    pub fn new(tokens: Vec<Token>) -> Self {
        Self::from_source(tokens.into_iter())
    }

    /// Stream over a lazy tokenizer
    pub fn from_source<I>(source: I) -> Self
    where
        I: Iterator<Item = Token> + 'static,
    {
        Self {
            source: Box::new(source),
            buffer: VecDeque::new(),
            eof: Token::eof(Position::start()),
            exhausted: false,
            consumed: 0,
        }
    }

    /// Buffer tokens until index `n` is available or input ends
    fn fill(&mut self, n: usize) {
        while !self.exhausted && self.buffer.len() <= n {
            match self.source.next() {
                Some(token) if token.is_eof() => {
                    self.eof = token;
                    self.exhausted = true;
                }
                Some(token) => {
                    self.eof.position = token.position.advance_str(&token.image);
                    self.buffer.push_back(token);
                }
                None => self.exhausted = true,
            }
        }
    }

    /// Look at the token `n` positions ahead without consuming it
    pub fn peek(&mut self, n: usize) -> &Token {
        self.fill(n);
        self.buffer.get(n).unwrap_or(&self.eof)
    }

    /// Consume the next token
    pub fn next_token(&mut self) -> Token {
        self.fill(0);
        match self.buffer.pop_front() {
            Some(token) => {
                self.consumed += 1;
                token
            }
            None => self.eof.clone(),
        }
    }

    /// Number of real tokens consumed so far
    pub fn consumed(&self) -> usize {
        self.consumed
    }

    /// Position of the next token
    pub fn position(&mut self) -> Position {
        self.peek(0).position
    }

    pub fn is_at_end(&mut self) -> bool {
        self.peek(0).is_eof()
    }
}

impl fmt::Debug for TokenStream {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenStream")
            .field("buffered", &self.buffer.len())
            .field("consumed", &self.consumed)
            .field("exhausted", &self.exhausted)
            .finish_non_exhaustive()
    }
}

impl From<Vec<Token>> for TokenStream {
    fn from(tokens: Vec<Token>) -> Self {
        Self::new(tokens)
    }
}

impl FromIterator<Token> for TokenStream {
    fn from_iter<I: IntoIterator<Item = Token>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tokens::TokenType;
    use std::cell::Cell;
    use std::rc::Rc;

    fn token(id: u32, image: &str, offset: usize) -> Token {
        Token::new(
            TokenType::new(id),
            image,
            Position::new(offset, 1, offset as u32 + 1),
        )
    }

    #[test]
    fn test_peek_does_not_consume() {
        let mut stream = TokenStream::new(vec![token(1, "a", 0), token(2, "b", 2)]);

        assert_eq!(stream.peek(1).token_type, TokenType::new(2));
        assert_eq!(stream.peek(0).token_type, TokenType::new(1));
        assert_eq!(stream.consumed(), 0);

        assert_eq!(stream.next_token().image, "a");
        assert_eq!(stream.peek(0).image, "b");
        assert_eq!(stream.consumed(), 1);
    }

    #[test]
    fn test_eof_after_exhaustion() {
        let mut stream = TokenStream::new(vec![token(1, "ab", 0)]);
        stream.next_token();

        assert!(stream.is_at_end());
        assert!(stream.peek(5).is_eof());
        let eof = stream.next_token();
        assert!(eof.is_eof());
        assert_eq!(eof.position.offset, 2);
        assert_eq!(stream.consumed(), 1);
    }

    #[test]
    fn test_explicit_eof_ends_input() {
        let mut stream = TokenStream::new(vec![
            token(1, "a", 0),
            Token::eof(Position::new(7, 2, 1)),
            token(1, "ignored", 8),
        ]);

        assert!(stream.peek(1).is_eof());
        assert_eq!(stream.peek(2).position, Position::new(7, 2, 1));
    }

    #[test]
    fn test_tokens_are_pulled_lazily() {
        let pulled = Rc::new(Cell::new(0));
        let counter = pulled.clone();
        let source = (1..=10).map(move |i| {
            counter.set(counter.get() + 1);
            token(i, "x", i as usize)
        });

        let mut stream = TokenStream::from_source(source);
        stream.peek(1);
        assert_eq!(pulled.get(), 2);
        stream.next_token();
        stream.peek(0);
        assert_eq!(pulled.get(), 2);
    }

    #[test]
    fn test_collect_into_stream() {
        let mut stream: TokenStream = vec![token(4, "x", 0)].into_iter().collect();
        assert_eq!(stream.peek(0).token_type, TokenType::new(4));
    }
}
