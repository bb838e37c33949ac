//! Parse event hooks

use super::tree::Node;
use crate::grammar::ProductionPattern;
use crate::tokens::Token;

/// Callbacks invoked while a parse runs
///
/// Hooks fire for synthetic patterns too, even though their nodes are
/// spliced away in the finished tree.
pub trait ParseListener {
    /// A pattern was entered, before its alternative is chosen
    fn enter(&mut self, _pattern: &ProductionPattern) {}

    /// A pattern finished with the given children
    fn exit(&mut self, _pattern: &ProductionPattern, _children: &[Node]) {}

    /// A token was consumed
    fn token(&mut self, _token: &Token) {}
}

/// Listener that ignores every event
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopListener;

impl ParseListener for NoopListener {}
