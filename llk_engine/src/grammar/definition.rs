//! Grammar container

use super::error::GrammarError;
use super::pattern::{PatternId, ProductionPattern};
use crate::tokens::TokenNames;
use std::collections::BTreeMap;
use std::fmt;

/// Patterns keyed by id, with a unique name per id
///
/// Ordered maps keep every traversal, and therefore analysis, deterministic.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Grammar {
    patterns: BTreeMap<PatternId, ProductionPattern>,
    names: BTreeMap<String, PatternId>,
    token_names: TokenNames,
}

impl Grammar {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_token_names(mut self, token_names: TokenNames) -> Self {
        self.token_names = token_names;
        self
    }

    pub fn set_token_names(&mut self, token_names: TokenNames) {
        self.token_names = token_names;
    }

    pub fn token_names(&self) -> &TokenNames {
        &self.token_names
    }

    /// Register a pattern; ids and names must both be unique
    pub fn add_pattern(&mut self, pattern: ProductionPattern) -> Result<(), GrammarError> {
        if self.patterns.contains_key(&pattern.id()) {
            return Err(GrammarError::duplicate_pattern(
                pattern.id(),
                pattern.name(),
                "id already defined",
            ));
        }
        if self.names.contains_key(pattern.name()) {
            return Err(GrammarError::duplicate_pattern(
                pattern.id(),
                pattern.name(),
                "name already defined",
            ));
        }

        self.names.insert(pattern.name().to_string(), pattern.id());
        self.patterns.insert(pattern.id(), pattern);
        Ok(())
    }

    pub fn pattern(&self, id: PatternId) -> Option<&ProductionPattern> {
        self.patterns.get(&id)
    }

    /// Mutable access for loaders that add alternatives after registration
    pub fn pattern_mut(&mut self, id: PatternId) -> Option<&mut ProductionPattern> {
        self.patterns.get_mut(&id)
    }

    pub fn pattern_by_name(&self, name: &str) -> Option<&ProductionPattern> {
        self.names.get(name).and_then(|id| self.patterns.get(id))
    }

    /// Patterns in id order
    pub fn patterns(&self) -> impl Iterator<Item = &ProductionPattern> {
        self.patterns.values()
    }

    pub(crate) fn patterns_mut(&mut self) -> impl Iterator<Item = &mut ProductionPattern> {
        self.patterns.values_mut()
    }

    pub fn pattern_ids(&self) -> impl Iterator<Item = PatternId> + '_ {
        self.patterns.keys().copied()
    }

    pub fn contains(&self, id: PatternId) -> bool {
        self.patterns.contains_key(&id)
    }

    /// Display name of a pattern, falling back to its id
    pub fn pattern_name(&self, id: PatternId) -> String {
        match self.patterns.get(&id) {
            Some(pattern) => pattern.name().to_string(),
            None => id.to_string(),
        }
    }

    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }
}

impl fmt::Display for Grammar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for pattern in self.patterns.values() {
            writeln!(f, "{}", pattern)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grammar::{GrammarErrorKind, ProductionElement};
    use crate::tokens::TokenType;

    #[test]
    fn test_duplicate_id_and_name_rejected() {
        let mut grammar = Grammar::new();
        grammar
            .add_pattern(ProductionPattern::new(PatternId::new(1), "Expr"))
            .unwrap();

        let same_id = grammar.add_pattern(ProductionPattern::new(PatternId::new(1), "Term"));
        assert_eq!(same_id.unwrap_err().kind(), GrammarErrorKind::DuplicatePattern);

        let same_name = grammar.add_pattern(ProductionPattern::new(PatternId::new(2), "Expr"));
        assert_eq!(same_name.unwrap_err().kind(), GrammarErrorKind::DuplicatePattern);

        assert_eq!(grammar.len(), 1);
    }

    #[test]
    fn test_lookup_and_mutation() {
        let mut grammar = Grammar::new();
        grammar
            .add_pattern(ProductionPattern::new(PatternId::new(2), "Term"))
            .unwrap();
        grammar
            .add_pattern(ProductionPattern::new(PatternId::new(1), "Expr"))
            .unwrap();

        grammar
            .pattern_mut(PatternId::new(2))
            .unwrap()
            .add_alternative([ProductionElement::once(TokenType::new(1))])
            .unwrap();

        assert_eq!(grammar.pattern_by_name("Term").map(|p| p.alternative_count()), Some(1));
        assert_eq!(
            grammar.pattern_ids().collect::<Vec<_>>(),
            vec![PatternId::new(1), PatternId::new(2)]
        );
        assert_eq!(grammar.pattern_name(PatternId::new(9)), "@9");
        assert_eq!(grammar.to_string(), "Expr =  ;\nTerm = #1 ;\n");
    }
}
