//! Grammar construction and analysis errors
//!
//! Every variant is fatal to building the grammar. Callers branch on
//! [`GrammarErrorKind`] rather than on message text.

use super::alternative::AlternativeId;
use super::pattern::PatternId;
use crate::logging::{codes, Code};
use crate::lookahead::LookAheadSet;

pub type GrammarResult<T> = Result<T, GrammarError>;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GrammarError {
    #[error("Duplicate alternative in pattern '{pattern}': identical to alternative {existing}")]
    DuplicateAlternative { pattern: String, existing: usize },

    #[error("Duplicate pattern '{name}' ({id}): {reason}")]
    DuplicatePattern {
        id: PatternId,
        name: String,
        reason: String,
    },

    #[error("Pattern '{pattern}' has no alternatives")]
    EmptyPattern { pattern: String },

    #[error("Pattern '{pattern}' references undefined pattern {reference}")]
    UndefinedPattern { pattern: String, reference: PatternId },

    #[error("Alternative {alternative} is not part of pattern '{pattern}'")]
    InvalidDefault {
        pattern: String,
        alternative: AlternativeId,
    },

    #[error("Invalid occurrence bounds: min {min}, max {max:?}")]
    InvalidBounds { min: usize, max: Option<usize> },

    #[error("Look-ahead depth {depth} is outside 1..={max}")]
    InvalidLookaheadDepth { depth: usize, max: usize },

    #[error("Grammar has no patterns")]
    EmptyGrammar,

    #[error("Left recursion in pattern '{pattern}' alternative {alternative}: {}", .cycle.join(" -> "))]
    LeftRecursion {
        pattern: String,
        alternative: usize,
        cycle: Vec<String>,
    },

    #[error(
        "Ambiguous pattern '{pattern}': alternatives {} and {} overlap on {overlap}",
        .alternatives.0,
        .alternatives.1
    )]
    Ambiguity {
        pattern: String,
        alternatives: (usize, usize),
        overlap: LookAheadSet,
    },
}

/// Discriminant of [`GrammarError`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GrammarErrorKind {
    DuplicateAlternative,
    DuplicatePattern,
    EmptyPattern,
    UndefinedPattern,
    InvalidDefault,
    InvalidBounds,
    InvalidLookaheadDepth,
    EmptyGrammar,
    LeftRecursion,
    Ambiguity,
}

impl GrammarError {
    pub fn duplicate_alternative(pattern: &str, existing: usize) -> Self {
        Self::DuplicateAlternative {
            pattern: pattern.to_string(),
            existing,
        }
    }

    pub fn duplicate_pattern(id: PatternId, name: &str, reason: &str) -> Self {
        Self::DuplicatePattern {
            id,
            name: name.to_string(),
            reason: reason.to_string(),
        }
    }

    pub fn empty_pattern(pattern: &str) -> Self {
        Self::EmptyPattern {
            pattern: pattern.to_string(),
        }
    }

    pub fn undefined_pattern(pattern: &str, reference: PatternId) -> Self {
        Self::UndefinedPattern {
            pattern: pattern.to_string(),
            reference,
        }
    }

    pub fn invalid_default(pattern: &str, alternative: AlternativeId) -> Self {
        Self::InvalidDefault {
            pattern: pattern.to_string(),
            alternative,
        }
    }

    pub fn invalid_bounds(min: usize, max: Option<usize>) -> Self {
        Self::InvalidBounds { min, max }
    }

    pub fn left_recursion(pattern: &str, alternative: usize, cycle: Vec<String>) -> Self {
        Self::LeftRecursion {
            pattern: pattern.to_string(),
            alternative,
            cycle,
        }
    }

    pub fn ambiguity(pattern: &str, alternatives: (usize, usize), overlap: LookAheadSet) -> Self {
        Self::Ambiguity {
            pattern: pattern.to_string(),
            alternatives,
            overlap,
        }
    }

    pub fn kind(&self) -> GrammarErrorKind {
        match self {
            Self::DuplicateAlternative { .. } => GrammarErrorKind::DuplicateAlternative,
            Self::DuplicatePattern { .. } => GrammarErrorKind::DuplicatePattern,
            Self::EmptyPattern { .. } => GrammarErrorKind::EmptyPattern,
            Self::UndefinedPattern { .. } => GrammarErrorKind::UndefinedPattern,
            Self::InvalidDefault { .. } => GrammarErrorKind::InvalidDefault,
            Self::InvalidBounds { .. } => GrammarErrorKind::InvalidBounds,
            Self::InvalidLookaheadDepth { .. } => GrammarErrorKind::InvalidLookaheadDepth,
            Self::EmptyGrammar => GrammarErrorKind::EmptyGrammar,
            Self::LeftRecursion { .. } => GrammarErrorKind::LeftRecursion,
            Self::Ambiguity { .. } => GrammarErrorKind::Ambiguity,
        }
    }

    /// Get error code for logging
    pub fn code(&self) -> Code {
        match self.kind() {
            GrammarErrorKind::DuplicateAlternative => codes::grammar::DUPLICATE_ALTERNATIVE,
            GrammarErrorKind::DuplicatePattern => codes::grammar::DUPLICATE_PATTERN,
            GrammarErrorKind::EmptyPattern => codes::grammar::EMPTY_PATTERN,
            GrammarErrorKind::UndefinedPattern => codes::grammar::UNDEFINED_PATTERN,
            GrammarErrorKind::InvalidDefault => codes::grammar::INVALID_DEFAULT,
            GrammarErrorKind::InvalidBounds => codes::grammar::INVALID_BOUNDS,
            GrammarErrorKind::InvalidLookaheadDepth => codes::grammar::INVALID_LOOKAHEAD_DEPTH,
            GrammarErrorKind::EmptyGrammar => codes::grammar::EMPTY_GRAMMAR,
            GrammarErrorKind::LeftRecursion => codes::analysis::LEFT_RECURSION,
            GrammarErrorKind::Ambiguity => codes::analysis::AMBIGUITY,
        }
    }

    /// Name of the pattern the error is about, when there is one
    pub fn pattern_name(&self) -> Option<&str> {
        match self {
            Self::DuplicateAlternative { pattern, .. }
            | Self::EmptyPattern { pattern }
            | Self::UndefinedPattern { pattern, .. }
            | Self::InvalidDefault { pattern, .. }
            | Self::LeftRecursion { pattern, .. }
            | Self::Ambiguity { pattern, .. } => Some(pattern),
            Self::DuplicatePattern { name, .. } => Some(name),
            Self::InvalidBounds { .. } | Self::InvalidLookaheadDepth { .. } | Self::EmptyGrammar => {
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tokens::TokenType;

    #[test]
    fn test_kind_and_code_mapping() {
        let error = GrammarError::left_recursion("E", 0, vec!["E".into(), "E".into()]);
        assert_eq!(error.kind(), GrammarErrorKind::LeftRecursion);
        assert_eq!(error.code().as_str(), "A001");
        assert_eq!(error.pattern_name(), Some("E"));
        assert_eq!(
            error.to_string(),
            "Left recursion in pattern 'E' alternative 0: E -> E"
        );
    }

    #[test]
    fn test_ambiguity_message() {
        let overlap = LookAheadSet::single(TokenType::new(5));
        let error = GrammarError::ambiguity("E", (0, 1), overlap);

        assert_eq!(error.kind(), GrammarErrorKind::Ambiguity);
        assert_eq!(
            error.to_string(),
            "Ambiguous pattern 'E': alternatives 0 and 1 overlap on {#5}"
        );
    }

    #[test]
    fn test_construction_codes() {
        assert_eq!(GrammarError::EmptyGrammar.code(), codes::grammar::EMPTY_GRAMMAR);
        assert_eq!(
            GrammarError::invalid_bounds(2, Some(1)).to_string(),
            "Invalid occurrence bounds: min 2, max Some(1)"
        );
        assert_eq!(GrammarError::EmptyGrammar.pattern_name(), None);
    }
}
