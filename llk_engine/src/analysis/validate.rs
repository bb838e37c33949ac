//! Structural validation run before any look-ahead computation

use crate::config::constants::compile_time::analysis::MAX_LOOKAHEAD_DEPTH;
use crate::grammar::{Grammar, GrammarError};
use crate::logging::LoggingService;
use crate::log_debug;

/// Check the look-ahead depth and that every pattern is usable
///
/// Reports the first problem found in pattern id order.
pub fn validate_structure(
    grammar: &Grammar,
    lookahead_depth: usize,
    logger: &LoggingService,
) -> Result<(), GrammarError> {
    if lookahead_depth == 0 || lookahead_depth > MAX_LOOKAHEAD_DEPTH {
        return Err(GrammarError::InvalidLookaheadDepth {
            depth: lookahead_depth,
            max: MAX_LOOKAHEAD_DEPTH,
        });
    }

    if grammar.is_empty() {
        return Err(GrammarError::EmptyGrammar);
    }

    for pattern in grammar.patterns() {
        if pattern.alternative_count() == 0 {
            return Err(GrammarError::empty_pattern(pattern.name()));
        }

        if let Some(id) = pattern.default_alternative_id() {
            if pattern.alternative(id).is_none() {
                return Err(GrammarError::invalid_default(pattern.name(), id));
            }
        }

        for alternative in pattern.alternatives() {
            for element in alternative.elements() {
                if let Some(reference) = element.pattern_id() {
                    if !grammar.contains(reference) {
                        return Err(GrammarError::undefined_pattern(pattern.name(), reference));
                    }
                }
            }
        }
    }

    log_debug!(logger, "Grammar structure validated",
        "patterns" => grammar.len(),
        "lookahead_depth" => lookahead_depth);

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grammar::{GrammarErrorKind, PatternId, ProductionElement, ProductionPattern};
    use crate::tokens::TokenType;

    fn grammar_with(pattern: ProductionPattern) -> Grammar {
        let mut grammar = Grammar::new();
        grammar.add_pattern(pattern).unwrap();
        grammar
    }

    #[test]
    fn test_rejects_empty_grammar_and_depth() {
        let logger = LoggingService::silent();
        let error = validate_structure(&Grammar::new(), 1, &logger).unwrap_err();
        assert_eq!(error.kind(), GrammarErrorKind::EmptyGrammar);

        let error = validate_structure(&Grammar::new(), 0, &logger).unwrap_err();
        assert_eq!(error.kind(), GrammarErrorKind::InvalidLookaheadDepth);
    }

    #[test]
    fn test_rejects_pattern_without_alternatives() {
        let grammar = grammar_with(ProductionPattern::new(PatternId::new(1), "S"));
        let error = validate_structure(&grammar, 1, &LoggingService::silent()).unwrap_err();
        assert_eq!(error.kind(), GrammarErrorKind::EmptyPattern);
        assert_eq!(error.pattern_name(), Some("S"));
    }

    #[test]
    fn test_rejects_undefined_reference() {
        let pattern = ProductionPattern::new(PatternId::new(1), "S")
            .with_alternative([
                ProductionElement::once(TokenType::new(1)),
                ProductionElement::once(PatternId::new(42)),
            ])
            .unwrap();
        let grammar = grammar_with(pattern);

        let error = validate_structure(&grammar, 1, &LoggingService::silent()).unwrap_err();
        assert_eq!(
            error,
            GrammarError::undefined_pattern("S", PatternId::new(42))
        );
    }
}
