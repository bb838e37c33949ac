//! Grammar analysis
//!
//! [`Analyzer::analyze`] consumes a [`Grammar`], validates it, rejects left
//! recursion, computes depth-k look-ahead for every alternative and checks
//! alternatives for overlap. The result is an [`AnalyzedGrammar`] that the
//! parser reads but never modifies.

pub mod analyzed;
pub mod conflicts;
pub mod first_follow;
pub mod recursion;
pub mod validate;

#[cfg(test)]
pub(crate) mod fixtures;

pub use analyzed::{AnalysisReport, AnalyzedGrammar};
pub use conflicts::Conflict;
pub use first_follow::{LookAheadTables, RepetitionOverlap};
pub use recursion::RecursionReport;

use crate::config::AnalyzerConfig;
use crate::grammar::{Grammar, GrammarError};
use crate::logging::{self, codes, SharedLogger};
use crate::{log_error, log_success};

/// Validates grammars and computes their look-ahead
#[derive(Debug, Clone)]
pub struct Analyzer {
    config: AnalyzerConfig,
    logger: SharedLogger,
}

impl Analyzer {
    pub fn new(config: AnalyzerConfig) -> Self {
        Self {
            config,
            logger: logging::silent(),
        }
    }

    /// Analyzer with default settings and the given look-ahead depth
    pub fn with_lookahead(lookahead_depth: usize) -> Self {
        Self::new(AnalyzerConfig::with_lookahead(lookahead_depth))
    }

    pub fn with_logger(mut self, logger: SharedLogger) -> Self {
        self.logger = logger;
        self
    }

    pub fn config(&self) -> &AnalyzerConfig {
        &self.config
    }

    /// Analyze and freeze a grammar
    pub fn analyze(&self, grammar: Grammar) -> Result<AnalyzedGrammar, GrammarError> {
        let result = self.run(grammar);
        if let Err(error) = &result {
            log_error!(self.logger, error.code(), &error.to_string(),
                "pattern" => error.pattern_name().unwrap_or("-"));
        }
        result
    }

    fn run(&self, mut grammar: Grammar) -> Result<AnalyzedGrammar, GrammarError> {
        let k = self.config.lookahead_depth;
        let logger = self.logger.as_ref();

        if let Err(error) = self.config.validate() {
            log_error!(logger, error.code(), &error.to_string());
        }
        validate::validate_structure(&grammar, k, logger)?;
        log_success!(logger, codes::success::GRAMMAR_VALIDATED, "Grammar structure is valid",
            "patterns" => grammar.len());

        let recursion =
            recursion::analyze_recursion(&mut grammar, self.config.report_right_recursion, logger)?;

        let bound = self
            .config
            .max_iterations
            .unwrap_or_else(|| first_follow::default_iteration_bound(grammar.len(), k))
            .max(1);
        let tables = first_follow::compute_tables(&grammar, k, bound, logger);
        let repetition_overlaps = first_follow::assign_lookahead(&mut grammar, &tables, k, logger);
        log_success!(logger, codes::success::LOOKAHEAD_COMPUTED, "Look-ahead computed",
            "iterations" => tables.iterations,
            "lookahead_depth" => k);

        let defaulted_conflicts = conflicts::check_conflicts(&grammar, logger)?;

        let report = AnalysisReport {
            iterations: tables.iterations,
            iteration_bound: bound,
            saturated_patterns: tables.saturated.iter().copied().collect(),
            right_recursive: recursion.right_recursive,
            defaulted_conflicts,
            repetition_overlaps,
        };

        log_success!(logger, codes::success::ANALYSIS_COMPLETE, "Grammar analysis complete",
            "patterns" => grammar.len(),
            "right_recursive" => report.right_recursive.len(),
            "defaulted_conflicts" => report.defaulted_conflicts.len());

        Ok(AnalyzedGrammar::new(grammar, k, tables, report))
    }
}

impl Default for Analyzer {
    fn default() -> Self {
        Self::new(AnalyzerConfig::default())
    }
}
