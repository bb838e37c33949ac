//! Parsing token streams against an analyzed grammar
//!
//! [`Parser`] walks an [`AnalyzedGrammar`](crate::analysis::AnalyzedGrammar)
//! top-down and produces a [`ParseTree`], or the first [`ParseError`] it
//! meets.

pub mod error;
pub mod listener;
pub mod parser;
pub mod tree;

pub use error::{ExpectedTokens, ParseError, ParseErrorKind, ParseResult};
pub use listener::{NoopListener, ParseListener};
pub use parser::Parser;
pub use tree::{Node, ParseTree, ProductionNode, TokenNode};
