//! Alternatives: one right-hand side of a production pattern

use super::element::ProductionElement;
use super::pattern::PatternId;
use crate::lookahead::LookAheadSet;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Stable identifier of an alternative within its pattern
///
/// Ids are assigned in insertion order and never reused, so they stay valid
/// independently of the alternative's position in the list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AlternativeId(u32);

impl AlternativeId {
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    pub const fn id(self) -> u32 {
        self.0
    }
}

impl fmt::Display for AlternativeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Properties derived by the analyzer
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct AlternativeAnalysis {
    pub lookahead: LookAheadSet,
    pub element_lookaheads: Vec<LookAheadSet>,
    pub left_recursive: bool,
    pub right_recursive: bool,
    pub matches_empty: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductionPatternAlternative {
    id: AlternativeId,
    pattern: PatternId,
    elements: Vec<ProductionElement>,
    analysis: AlternativeAnalysis,
}

impl ProductionPatternAlternative {
    pub(crate) fn new(
        id: AlternativeId,
        pattern: PatternId,
        elements: Vec<ProductionElement>,
    ) -> Self {
        Self {
            id,
            pattern,
            elements,
            analysis: AlternativeAnalysis::default(),
        }
    }

    pub fn id(&self) -> AlternativeId {
        self.id
    }

    /// The owning pattern
    pub fn pattern(&self) -> PatternId {
        self.pattern
    }

    pub fn elements(&self) -> &[ProductionElement] {
        &self.elements
    }

    pub fn element(&self, index: usize) -> Option<&ProductionElement> {
        self.elements.get(index)
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Same element sequence
    pub fn is_structurally_equal(&self, elements: &[ProductionElement]) -> bool {
        self.elements == elements
    }

    /// Look-ahead set that selects this alternative
    pub fn lookahead(&self) -> &LookAheadSet {
        &self.analysis.lookahead
    }

    /// Look-ahead set that continues repeating the element at `index`
    pub fn element_lookahead(&self, index: usize) -> Option<&LookAheadSet> {
        self.analysis.element_lookaheads.get(index)
    }

    pub fn is_left_recursive(&self) -> bool {
        self.analysis.left_recursive
    }

    pub fn is_right_recursive(&self) -> bool {
        self.analysis.right_recursive
    }

    /// Whether the alternative can match without consuming tokens
    pub fn matches_empty(&self) -> bool {
        self.analysis.matches_empty
    }

    pub(crate) fn analysis_mut(&mut self) -> &mut AlternativeAnalysis {
        &mut self.analysis
    }
}

impl fmt::Display for ProductionPatternAlternative {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.elements.is_empty() {
            return write!(f, "ε");
        }
        let parts: Vec<String> = self.elements.iter().map(|e| e.to_string()).collect();
        write!(f, "{}", parts.join(" "))
    }
}
