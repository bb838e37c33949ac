//! Alternative overlap detection

use crate::grammar::{Grammar, GrammarError, PatternId};
use crate::logging::{codes, LoggingService};
use crate::lookahead::LookAheadSet;
use crate::{log_error, log_warning};

/// Two alternatives of one pattern whose look-ahead sets intersect
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Conflict {
    pub pattern: PatternId,
    /// Declaration indices, lower first
    pub alternatives: (usize, usize),
    pub overlap: LookAheadSet,
}

/// Check every pair of alternatives in every pattern
///
/// Overlap is fatal unless one of the two alternatives is the pattern's
/// default, in which case it is returned and logged.
pub fn check_conflicts(grammar: &Grammar, logger: &LoggingService) -> Result<Vec<Conflict>, GrammarError> {
    let mut tolerated = Vec::new();

    for pattern in grammar.patterns() {
        let alternatives = pattern.alternatives();
        for (i, left) in alternatives.iter().enumerate() {
            for (j, right) in alternatives.iter().enumerate().skip(i + 1) {
                let overlap = left.lookahead().intersect(right.lookahead());
                if overlap.is_empty() {
                    continue;
                }

                let rendered = overlap.format_with(grammar.token_names());
                let resolved = pattern
                    .default_alternative_id()
                    .is_some_and(|default| default == left.id() || default == right.id());
                if !resolved {
                    log_error!(logger, codes::analysis::AMBIGUITY, "Ambiguous alternatives",
                        "pattern" => pattern.name(),
                        "alternatives" => format!("{}, {}", i, j),
                        "overlap" => rendered);
                    return Err(GrammarError::ambiguity(pattern.name(), (i, j), overlap));
                }

                log_warning!(logger, codes::analysis::DEFAULTED_CONFLICT,
                    "Overlapping alternatives resolved by default",
                    "pattern" => pattern.name(),
                    "alternatives" => format!("{}, {}", i, j),
                    "overlap" => rendered);
                tolerated.push(Conflict {
                    pattern: pattern.id(),
                    alternatives: (i, j),
                    overlap,
                });
            }
        }
    }

    Ok(tolerated)
}
