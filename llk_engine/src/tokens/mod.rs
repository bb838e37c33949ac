//! Token model consumed by the parser
//!
//! The engine does not tokenize. An external tokenizer produces [`Token`]s
//! carrying an opaque [`TokenType`]; the parser reads them through a
//! [`TokenStream`] that supports bounded peeking and yields an end-of-input
//! token once the underlying iterator is exhausted.

pub mod token;
pub mod token_stream;

pub use token::{Token, TokenNames, TokenType};
pub use token_stream::TokenStream;

pub use crate::utils::Position;
