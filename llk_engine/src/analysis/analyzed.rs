//! Frozen, analyzed grammars

use super::conflicts::Conflict;
use super::first_follow::{LookAheadTables, RepetitionOverlap};
use crate::grammar::{AlternativeId, Grammar, PatternId, ProductionPattern};
use crate::lookahead::LookAheadSet;
use crate::tokens::TokenNames;

/// Findings of a successful analysis
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AnalysisReport {
    pub iterations: usize,
    pub iteration_bound: usize,
    pub saturated_patterns: Vec<PatternId>,
    pub right_recursive: Vec<(PatternId, AlternativeId)>,
    pub defaulted_conflicts: Vec<Conflict>,
    pub repetition_overlaps: Vec<RepetitionOverlap>,
}

/// A validated grammar with look-ahead assigned everywhere
///
/// Immutable once built; share it behind an `Arc` for concurrent parses.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalyzedGrammar {
    grammar: Grammar,
    lookahead_depth: usize,
    tables: LookAheadTables,
    report: AnalysisReport,
}

impl AnalyzedGrammar {
    pub(crate) fn new(
        grammar: Grammar,
        lookahead_depth: usize,
        tables: LookAheadTables,
        report: AnalysisReport,
    ) -> Self {
        Self {
            grammar,
            lookahead_depth,
            tables,
            report,
        }
    }

    pub fn grammar(&self) -> &Grammar {
        &self.grammar
    }

    /// k
    pub fn lookahead_depth(&self) -> usize {
        self.lookahead_depth
    }

    pub fn report(&self) -> &AnalysisReport {
        &self.report
    }

    pub fn pattern(&self, id: PatternId) -> Option<&ProductionPattern> {
        self.grammar.pattern(id)
    }

    pub fn pattern_by_name(&self, name: &str) -> Option<&ProductionPattern> {
        self.grammar.pattern_by_name(name)
    }

    pub fn token_names(&self) -> &TokenNames {
        self.grammar.token_names()
    }

    pub fn first_set(&self, id: PatternId) -> Option<&LookAheadSet> {
        self.tables.first.get(&id)
    }

    pub fn follow_set(&self, id: PatternId) -> Option<&LookAheadSet> {
        self.tables.follow.get(&id)
    }
}
