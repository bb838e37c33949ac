//! Production elements: a terminal or non-terminal reference with bounds

use super::error::GrammarError;
use super::pattern::PatternId;
use crate::tokens::TokenType;
use serde::{Deserialize, Serialize};
use std::fmt;

/// What an element refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(tag = "kind", content = "id", rename_all = "snake_case")]
pub enum ElementKind {
    Token(TokenType),
    Production(PatternId),
}

impl From<TokenType> for ElementKind {
    fn from(token_type: TokenType) -> Self {
        ElementKind::Token(token_type)
    }
}

impl From<PatternId> for ElementKind {
    fn from(pattern: PatternId) -> Self {
        ElementKind::Production(pattern)
    }
}

/// An element of an alternative with its occurrence bounds
///
/// `max == None` means unbounded. Bounds are validated on construction and
/// the element is immutable afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ProductionElement {
    kind: ElementKind,
    min: usize,
    max: Option<usize>,
}

impl ProductionElement {
    /// Exactly one occurrence
    pub fn once(kind: impl Into<ElementKind>) -> Self {
        Self::unchecked(kind.into(), 1, Some(1))
    }

    /// Zero or one occurrence
    pub fn optional(kind: impl Into<ElementKind>) -> Self {
        Self::unchecked(kind.into(), 0, Some(1))
    }

    /// Zero or more occurrences
    pub fn repeated(kind: impl Into<ElementKind>) -> Self {
        Self::unchecked(kind.into(), 0, None)
    }

    /// One or more occurrences
    pub fn one_or_more(kind: impl Into<ElementKind>) -> Self {
        Self::unchecked(kind.into(), 1, None)
    }

    /// Arbitrary bounds; `max` must be non-zero and not below `min`
    pub fn bounded(
        kind: impl Into<ElementKind>,
        min: usize,
        max: Option<usize>,
    ) -> Result<Self, GrammarError> {
        match max {
            Some(max) if max == 0 || max < min => Err(GrammarError::invalid_bounds(min, Some(max))),
            _ => Ok(Self::unchecked(kind.into(), min, max)),
        }
    }

    fn unchecked(kind: ElementKind, min: usize, max: Option<usize>) -> Self {
        Self { kind, min, max }
    }

    pub fn kind(&self) -> ElementKind {
        self.kind
    }

    pub fn min(&self) -> usize {
        self.min
    }

    pub fn max(&self) -> Option<usize> {
        self.max
    }

    pub fn is_token(&self) -> bool {
        matches!(self.kind, ElementKind::Token(_))
    }

    pub fn is_production(&self) -> bool {
        matches!(self.kind, ElementKind::Production(_))
    }

    pub fn token_type(&self) -> Option<TokenType> {
        match self.kind {
            ElementKind::Token(token_type) => Some(token_type),
            ElementKind::Production(_) => None,
        }
    }

    pub fn pattern_id(&self) -> Option<PatternId> {
        match self.kind {
            ElementKind::Production(id) => Some(id),
            ElementKind::Token(_) => None,
        }
    }

    /// Whether the element may be skipped entirely by its bounds
    pub fn is_optional(&self) -> bool {
        self.min == 0
    }

    /// Whether the number of occurrences can vary
    pub fn is_variable(&self) -> bool {
        self.max != Some(self.min)
    }

    /// Whether another occurrence is allowed after `count`
    pub fn allows_more(&self, count: usize) -> bool {
        self.max.map_or(true, |max| count < max)
    }
}

impl fmt::Display for ProductionElement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            ElementKind::Token(token_type) => write!(f, "{}", token_type)?,
            ElementKind::Production(id) => write!(f, "{}", id)?,
        }
        match (self.min, self.max) {
            (1, Some(1)) => Ok(()),
            (0, Some(1)) => write!(f, "?"),
            (0, None) => write!(f, "*"),
            (1, None) => write!(f, "+"),
            (min, None) => write!(f, "{{{},}}", min),
            (min, Some(max)) => write!(f, "{{{},{}}}", min, max),
        }
    }
}
