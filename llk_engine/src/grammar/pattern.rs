//! Production patterns: named grammar rules with ordered alternatives

use super::alternative::{AlternativeId, ProductionPatternAlternative};
use super::element::ProductionElement;
use super::error::GrammarError;
use crate::lookahead::LookAheadSet;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Unique identifier of a production pattern
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PatternId(u32);

impl PatternId {
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    pub const fn id(self) -> u32 {
        self.0
    }
}

impl fmt::Display for PatternId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "@{}", self.0)
    }
}

/// A grammar rule
///
/// Alternatives keep their insertion order, which is the tie-break priority
/// when look-ahead cannot decide. A synthetic pattern never produces a node
/// of its own: its children are spliced into the parent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductionPattern {
    id: PatternId,
    name: String,
    synthetic: bool,
    alternatives: Vec<ProductionPatternAlternative>,
    default_alternative: Option<AlternativeId>,
    next_alternative: u32,
    lookahead: LookAheadSet,
}

impl ProductionPattern {
    pub fn new(id: PatternId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            synthetic: false,
            alternatives: Vec::new(),
            default_alternative: None,
            next_alternative: 0,
            lookahead: LookAheadSet::new(),
        }
    }

    /// Pattern introduced mechanically, eg. when desugaring repetition groups
    pub fn synthetic(id: PatternId, name: impl Into<String>) -> Self {
        Self {
            synthetic: true,
            ..Self::new(id, name)
        }
    }

    pub fn id(&self) -> PatternId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn is_synthetic(&self) -> bool {
        self.synthetic
    }

    pub fn set_synthetic(&mut self, synthetic: bool) {
        self.synthetic = synthetic;
    }

    /// Append an alternative built from `elements`
    ///
    /// Fails when an alternative with the same element sequence exists.
    pub fn add_alternative<I>(&mut self, elements: I) -> Result<AlternativeId, GrammarError>
    where
        I: IntoIterator<Item = ProductionElement>,
    {
        let elements: Vec<ProductionElement> = elements.into_iter().collect();

        if let Some(existing) = self
            .alternatives
            .iter()
            .position(|alternative| alternative.is_structurally_equal(&elements))
        {
            return Err(GrammarError::duplicate_alternative(&self.name, existing));
        }

        let id = AlternativeId::new(self.next_alternative);
        self.next_alternative += 1;
        self.alternatives
            .push(ProductionPatternAlternative::new(id, self.id, elements));
        Ok(id)
    }

    /// Builder form of `add_alternative`
    pub fn with_alternative<I>(mut self, elements: I) -> Result<Self, GrammarError>
    where
        I: IntoIterator<Item = ProductionElement>,
    {
        self.add_alternative(elements)?;
        Ok(self)
    }

    /// Designate the fallback alternative used when look-ahead cannot decide
    pub fn set_default_alternative(&mut self, id: AlternativeId) -> Result<(), GrammarError> {
        if self.alternative(id).is_none() {
            return Err(GrammarError::invalid_default(&self.name, id));
        }
        self.default_alternative = Some(id);
        Ok(())
    }

    pub fn clear_default_alternative(&mut self) {
        self.default_alternative = None;
    }

    pub fn default_alternative_id(&self) -> Option<AlternativeId> {
        self.default_alternative
    }

    pub fn default_alternative(&self) -> Option<&ProductionPatternAlternative> {
        self.default_alternative.and_then(|id| self.alternative(id))
    }

    pub fn alternative(&self, id: AlternativeId) -> Option<&ProductionPatternAlternative> {
        self.alternatives.iter().find(|alternative| alternative.id() == id)
    }

    /// Declaration index of an alternative
    pub fn position_of(&self, id: AlternativeId) -> Option<usize> {
        self.alternatives
            .iter()
            .position(|alternative| alternative.id() == id)
    }

    pub fn alternatives(&self) -> &[ProductionPatternAlternative] {
        &self.alternatives
    }

    pub fn alternative_count(&self) -> usize {
        self.alternatives.len()
    }

    /// Union of the alternatives' look-ahead sets
    pub fn lookahead(&self) -> &LookAheadSet {
        &self.lookahead
    }

    pub fn is_left_recursive(&self) -> bool {
        self.alternatives.iter().any(|a| a.is_left_recursive())
    }

    pub fn is_right_recursive(&self) -> bool {
        self.alternatives.iter().any(|a| a.is_right_recursive())
    }

    pub fn matches_empty(&self) -> bool {
        self.alternatives.iter().any(|a| a.matches_empty())
    }

    pub(crate) fn alternatives_mut(&mut self) -> &mut [ProductionPatternAlternative] {
        &mut self.alternatives
    }

    pub(crate) fn set_lookahead(&mut self, lookahead: LookAheadSet) {
        self.lookahead = lookahead;
    }
}

impl fmt::Display for ProductionPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let alternatives: Vec<String> = self
            .alternatives
            .iter()
            .map(|alternative| {
                if Some(alternative.id()) == self.default_alternative {
                    format!("{} (default)", alternative)
                } else {
                    alternative.to_string()
                }
            })
            .collect();
        write!(f, "{} = {} ;", self.name, alternatives.join(" | "))
    }
}
