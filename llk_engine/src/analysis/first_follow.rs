//! Depth-k FIRST and FOLLOW sets
//!
//! Both tables are computed by in-place fixed-point iteration in pattern id
//! order. Sets only grow, so iteration stops once a sweep changes nothing or
//! the iteration bound is reached. Sets still changing at the bound, and
//! every set derived from them, are saturated.
//!
//! Every pattern's FOLLOW set starts as `{EOF}`: any pattern may be used as
//! the start of a parse.

use crate::config::constants::compile_time::analysis::MAX_SEQUENCES_PER_SET;
use crate::grammar::{AlternativeId, ElementKind, Grammar, PatternId, ProductionElement};
use crate::logging::{codes, LoggingService};
use crate::lookahead::LookAheadSet;
use crate::tokens::TokenType;
use crate::{log_debug, log_warning};
use std::collections::{BTreeMap, BTreeSet, VecDeque};

pub type SetTable = BTreeMap<PatternId, LookAheadSet>;

/// FIRST_k and FOLLOW_k for every pattern
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LookAheadTables {
    pub first: SetTable,
    pub follow: SetTable,
    /// Sweeps used by both fixed points together
    pub iterations: usize,
    pub saturated: BTreeSet<PatternId>,
}

/// A repetition whose continue set overlaps what may follow it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepetitionOverlap {
    pub pattern: PatternId,
    pub alternative: AlternativeId,
    pub element: usize,
    pub overlap: LookAheadSet,
}

/// Iteration bound used when none is configured
pub fn default_iteration_bound(patterns: usize, lookahead_depth: usize) -> usize {
    (patterns + 1) * (lookahead_depth + 1)
}

fn item_first(kind: ElementKind, first: &SetTable) -> LookAheadSet {
    match kind {
        ElementKind::Token(token_type) => LookAheadSet::single(token_type),
        ElementKind::Production(id) => first.get(&id).cloned().unwrap_or_default(),
    }
}

fn element_first(element: &ProductionElement, first: &SetTable, k: usize) -> LookAheadSet {
    item_first(element.kind(), first).repeat(element.min(), element.max(), k)
}

/// FIRST_k of an element sequence under the current table
pub fn sequence_first(elements: &[ProductionElement], first: &SetTable, k: usize) -> LookAheadSet {
    elements
        .iter()
        .fold(LookAheadSet::epsilon(), |result, element| {
            result.concat(&element_first(element, first, k), k)
        })
}

/// Merge `contribution` into `table[id]`; returns true when it grew
fn merge(table: &mut SetTable, id: PatternId, contribution: &LookAheadSet) -> bool {
    let set = table.entry(id).or_default();
    let changed = set.add_all(contribution);
    set.cap(MAX_SEQUENCES_PER_SET);
    changed
}

struct FixedPoint {
    iterations: usize,
    unstable: BTreeSet<PatternId>,
}

/// Run `sweep` until it reports no change or `bound` sweeps have run
///
/// `sweep` returns the patterns whose set grew.
fn iterate<F>(bound: usize, mut sweep: F) -> FixedPoint
where
    F: FnMut() -> BTreeSet<PatternId>,
{
    let mut iterations = 0;
    loop {
        iterations += 1;
        let changed = sweep();
        if changed.is_empty() {
            return FixedPoint {
                iterations,
                unstable: BTreeSet::new(),
            };
        }
        if iterations >= bound {
            return FixedPoint {
                iterations,
                unstable: changed,
            };
        }
    }
}

/// Closure of `seeds` over `edges` (pattern -> patterns depending on it)
fn dependents(seeds: &BTreeSet<PatternId>, edges: &BTreeMap<PatternId, BTreeSet<PatternId>>) -> BTreeSet<PatternId> {
    let mut reached = seeds.clone();
    let mut queue: VecDeque<PatternId> = seeds.iter().copied().collect();
    while let Some(current) = queue.pop_front() {
        for next in edges.get(&current).into_iter().flatten() {
            if reached.insert(*next) {
                queue.push_back(*next);
            }
        }
    }
    reached
}

/// Edges `referenced -> referencing` and `referencing -> referenced`
fn reference_edges(
    grammar: &Grammar,
) -> (
    BTreeMap<PatternId, BTreeSet<PatternId>>,
    BTreeMap<PatternId, BTreeSet<PatternId>>,
) {
    let mut used_by: BTreeMap<PatternId, BTreeSet<PatternId>> = BTreeMap::new();
    let mut uses: BTreeMap<PatternId, BTreeSet<PatternId>> = BTreeMap::new();
    for pattern in grammar.patterns() {
        for alternative in pattern.alternatives() {
            for reference in alternative.elements().iter().filter_map(|e| e.pattern_id()) {
                used_by.entry(reference).or_default().insert(pattern.id());
                uses.entry(pattern.id()).or_default().insert(reference);
            }
        }
    }
    (used_by, uses)
}

fn compute_first(grammar: &Grammar, k: usize, bound: usize) -> (SetTable, FixedPoint) {
    let mut first: SetTable = grammar
        .pattern_ids()
        .map(|id| (id, LookAheadSet::new()))
        .collect();

    let outcome = iterate(bound, || {
        let mut changed = BTreeSet::new();
        for pattern in grammar.patterns() {
            let mut computed = LookAheadSet::new();
            for alternative in pattern.alternatives() {
                computed.add_all(&sequence_first(alternative.elements(), &first, k));
            }
            if merge(&mut first, pattern.id(), &computed) {
                changed.insert(pattern.id());
            }
        }
        changed
    });

    (first, outcome)
}

fn compute_follow(grammar: &Grammar, first: &SetTable, k: usize, bound: usize) -> (SetTable, FixedPoint) {
    let end = LookAheadSet::single(TokenType::EOF);
    let mut follow: SetTable = grammar.pattern_ids().map(|id| (id, end.clone())).collect();

    let outcome = iterate(bound, || {
        let mut changed = BTreeSet::new();
        for pattern in grammar.patterns() {
            for alternative in pattern.alternatives() {
                let elements = alternative.elements();
                for (index, element) in elements.iter().enumerate() {
                    let ElementKind::Production(target) = element.kind() else {
                        continue;
                    };
                    let outer = follow.get(&pattern.id()).cloned().unwrap_or_default();
                    let more = item_first(element.kind(), first).repeat(
                        element.min().saturating_sub(1),
                        element.max().map(|max| max.saturating_sub(1)),
                        k,
                    );
                    let contribution = more
                        .concat(&sequence_first(&elements[index + 1..], first, k), k)
                        .concat(&outer, k);
                    if merge(&mut follow, target, &contribution) {
                        changed.insert(target);
                    }
                }
            }
        }
        changed
    });

    (follow, outcome)
}

/// Compute FIRST_k and FOLLOW_k for every pattern
pub fn compute_tables(
    grammar: &Grammar,
    k: usize,
    bound: usize,
    logger: &LoggingService,
) -> LookAheadTables {
    let (used_by, uses) = reference_edges(grammar);
    let mut saturated = BTreeSet::new();

    let (mut first, first_outcome) = compute_first(grammar, k, bound);
    for id in dependents(&first_outcome.unstable, &used_by) {
        if let Some(set) = first.get_mut(&id) {
            set.saturate();
        }
        saturated.insert(id);
    }

    let (mut follow, follow_outcome) = compute_follow(grammar, &first, k, bound);
    for id in dependents(&follow_outcome.unstable, &uses) {
        if let Some(set) = follow.get_mut(&id) {
            set.saturate();
        }
        saturated.insert(id);
    }

    saturated.extend(
        first
            .iter()
            .chain(follow.iter())
            .filter(|(_, set)| set.is_saturated())
            .map(|(id, _)| *id),
    );

    if !saturated.is_empty() {
        let names: Vec<String> = saturated.iter().map(|id| grammar.pattern_name(*id)).collect();
        log_warning!(logger, codes::analysis::LOOKAHEAD_SATURATED, "Look-ahead did not converge",
            "patterns" => names.join(", "),
            "iteration_bound" => bound);
    }

    log_debug!(logger, "Look-ahead tables computed",
        "first_iterations" => first_outcome.iterations,
        "follow_iterations" => follow_outcome.iterations,
        "lookahead_depth" => k);

    LookAheadTables {
        first,
        follow,
        iterations: first_outcome.iterations + follow_outcome.iterations,
        saturated,
    }
}

/// Store alternative, element and pattern look-ahead sets on the grammar
///
/// An alternative is selected by FIRST_k(alternative) . FOLLOW_k(pattern).
/// A variable element keeps repeating while the upcoming tokens match one
/// more occurrence followed by the rest of the alternative.
pub fn assign_lookahead(
    grammar: &mut Grammar,
    tables: &LookAheadTables,
    k: usize,
    logger: &LoggingService,
) -> Vec<RepetitionOverlap> {
    let mut overlaps = Vec::new();

    for pattern in grammar.patterns_mut() {
        let follow = tables.follow.get(&pattern.id()).cloned().unwrap_or_default();
        let mut pattern_lookahead = LookAheadSet::new();

        for alternative in pattern.alternatives_mut() {
            let elements = alternative.elements().to_vec();
            let lookahead = sequence_first(&elements, &tables.first, k).concat(&follow, k);

            let mut element_lookaheads = Vec::with_capacity(elements.len());
            for (index, element) in elements.iter().enumerate() {
                let item = item_first(element.kind(), &tables.first);
                let rest = sequence_first(&elements[index + 1..], &tables.first, k).concat(&follow, k);
                let remaining = item.repeat(0, element.max().map(|max| max.saturating_sub(1)), k);
                let continue_set = item.without_empty().concat(&remaining, k).concat(&rest, k);

                if element.is_variable() {
                    let overlap = continue_set.intersect(&rest);
                    if !overlap.is_empty() {
                        overlaps.push(RepetitionOverlap {
                            pattern: alternative.pattern(),
                            alternative: alternative.id(),
                            element: index,
                            overlap,
                        });
                    }
                }
                element_lookaheads.push(continue_set);
            }

            pattern_lookahead.add_all(&lookahead);
            let analysis = alternative.analysis_mut();
            analysis.lookahead = lookahead;
            analysis.element_lookaheads = element_lookaheads;
        }

        pattern.set_lookahead(pattern_lookahead);
    }

    for overlap in &overlaps {
        log_warning!(logger, codes::analysis::GREEDY_REPETITION_OVERLAP,
            "Repetition overlaps what follows it; repetition wins",
            "pattern" => grammar.pattern_name(overlap.pattern),
            "alternative" => overlap.alternative,
            "element" => overlap.element,
            "overlap" => overlap.overlap.format_with(grammar.token_names()));
    }

    overlaps
}
