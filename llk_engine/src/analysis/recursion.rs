//! Nullability and left/right recursion detection
//!
//! Recursion is a reachability question over pattern references and does not
//! depend on look-ahead. An alternative is left-recursive when one of its
//! leading references (the first element, or a later one reached by skipping
//! elements that can match empty) leads back to its own pattern through other
//! leading references. Right recursion is the mirror image over trailing
//! references.

use crate::config::constants::compile_time::analysis::MAX_REPORTED_CYCLE_LENGTH;
use crate::grammar::{AlternativeId, ElementKind, Grammar, GrammarError, PatternId, ProductionElement};
use crate::logging::{codes, LoggingService};
use crate::{log_debug, log_error, log_warning};
use std::collections::{BTreeMap, BTreeSet, VecDeque};

type ReferenceGraph = BTreeMap<PatternId, BTreeSet<PatternId>>;

/// Outcome of recursion analysis for a grammar without left recursion
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecursionReport {
    pub nullable: BTreeSet<PatternId>,
    pub right_recursive: Vec<(PatternId, AlternativeId)>,
}

/// Patterns that can match without consuming tokens (fixed point)
pub fn nullable_patterns(grammar: &Grammar) -> BTreeSet<PatternId> {
    let mut nullable = BTreeSet::new();
    loop {
        let mut changed = false;
        for pattern in grammar.patterns() {
            if nullable.contains(&pattern.id()) {
                continue;
            }
            let empty = pattern.alternatives().iter().any(|alternative| {
                alternative
                    .elements()
                    .iter()
                    .all(|element| element_nullable(element, &nullable))
            });
            if empty {
                nullable.insert(pattern.id());
                changed = true;
            }
        }
        if !changed {
            return nullable;
        }
    }
}

pub(crate) fn element_nullable(element: &ProductionElement, nullable: &BTreeSet<PatternId>) -> bool {
    match element.kind() {
        _ if element.is_optional() => true,
        ElementKind::Token(_) => false,
        ElementKind::Production(id) => nullable.contains(&id),
    }
}

/// References reachable before the first element that must consume input
fn edge_references<'a, I>(elements: I, nullable: &BTreeSet<PatternId>) -> Vec<PatternId>
where
    I: Iterator<Item = &'a ProductionElement>,
{
    let mut references = Vec::new();
    for element in elements {
        if let Some(id) = element.pattern_id() {
            references.push(id);
        }
        if !element_nullable(element, nullable) {
            break;
        }
    }
    references
}

fn leading_references(elements: &[ProductionElement], nullable: &BTreeSet<PatternId>) -> Vec<PatternId> {
    edge_references(elements.iter(), nullable)
}

fn trailing_references(elements: &[ProductionElement], nullable: &BTreeSet<PatternId>) -> Vec<PatternId> {
    edge_references(elements.iter().rev(), nullable)
}

fn build_graph<F>(grammar: &Grammar, references: F) -> ReferenceGraph
where
    F: Fn(&[ProductionElement]) -> Vec<PatternId>,
{
    grammar
        .patterns()
        .map(|pattern| {
            let targets = pattern
                .alternatives()
                .iter()
                .flat_map(|alternative| references(alternative.elements()))
                .collect();
            (pattern.id(), targets)
        })
        .collect()
}

/// Shortest path `from -> ... -> to` in the graph, both ends included
fn find_path(graph: &ReferenceGraph, from: PatternId, to: PatternId) -> Option<Vec<PatternId>> {
    let mut parents: BTreeMap<PatternId, PatternId> = BTreeMap::new();
    let mut visited = BTreeSet::from([from]);
    let mut queue = VecDeque::from([from]);

    while let Some(current) = queue.pop_front() {
        if current == to {
            let mut path = vec![current];
            let mut node = current;
            while let Some(parent) = parents.get(&node) {
                path.push(*parent);
                node = *parent;
            }
            path.reverse();
            return Some(path);
        }
        for next in graph.get(&current).into_iter().flatten() {
            if visited.insert(*next) {
                parents.insert(*next, current);
                queue.push_back(*next);
            }
        }
    }
    None
}

/// Cycle through `pattern` starting with one of `references`, if any
fn find_cycle(
    graph: &ReferenceGraph,
    pattern: PatternId,
    references: &[PatternId],
) -> Option<Vec<PatternId>> {
    references.iter().find_map(|reference| {
        find_path(graph, *reference, pattern).map(|path| {
            let mut cycle = vec![pattern];
            cycle.extend(path);
            cycle
        })
    })
}

fn cycle_names(grammar: &Grammar, cycle: &[PatternId]) -> Vec<String> {
    let mut names: Vec<String> = cycle
        .iter()
        .take(MAX_REPORTED_CYCLE_LENGTH)
        .map(|id| grammar.pattern_name(*id))
        .collect();
    if cycle.len() > MAX_REPORTED_CYCLE_LENGTH {
        names.push("...".to_string());
    }
    names
}

struct AlternativeFlags {
    pattern: PatternId,
    index: usize,
    left: Option<Vec<PatternId>>,
    right: bool,
    matches_empty: bool,
}

/// Flag recursive and empty-matching alternatives
///
/// Fails on the first left-recursive alternative in pattern id order.
pub fn analyze_recursion(
    grammar: &mut Grammar,
    report_right_recursion: bool,
    logger: &LoggingService,
) -> Result<RecursionReport, GrammarError> {
    let nullable = nullable_patterns(grammar);
    let leading = build_graph(grammar, |elements| leading_references(elements, &nullable));
    let trailing = build_graph(grammar, |elements| trailing_references(elements, &nullable));

    let mut flags = Vec::new();
    for pattern in grammar.patterns() {
        for (index, alternative) in pattern.alternatives().iter().enumerate() {
            let elements = alternative.elements();
            flags.push(AlternativeFlags {
                pattern: pattern.id(),
                index,
                left: find_cycle(&leading, pattern.id(), &leading_references(elements, &nullable)),
                right: find_cycle(&trailing, pattern.id(), &trailing_references(elements, &nullable))
                    .is_some(),
                matches_empty: elements.iter().all(|e| element_nullable(e, &nullable)),
            });
        }
    }

    if let Some(flag) = flags.iter().find(|flag| flag.left.is_some()) {
        let name = grammar.pattern_name(flag.pattern);
        let cycle = cycle_names(grammar, flag.left.as_deref().unwrap_or_default());
        log_error!(logger, codes::analysis::LEFT_RECURSION, "Left-recursive alternative",
            "pattern" => name,
            "alternative" => flag.index,
            "cycle" => cycle.join(" -> "));
        return Err(GrammarError::left_recursion(&name, flag.index, cycle));
    }

    let mut report = RecursionReport {
        nullable,
        right_recursive: Vec::new(),
    };

    for flag in &flags {
        let Some(pattern) = grammar.pattern_mut(flag.pattern) else {
            continue;
        };
        let name = pattern.name().to_string();
        let Some(alternative) = pattern.alternatives_mut().get_mut(flag.index) else {
            continue;
        };
        let analysis = alternative.analysis_mut();
        analysis.left_recursive = false;
        analysis.right_recursive = flag.right;
        analysis.matches_empty = flag.matches_empty;

        if flag.right {
            report.right_recursive.push((flag.pattern, alternative.id()));
            if report_right_recursion {
                log_warning!(logger, codes::analysis::RIGHT_RECURSION, "Right-recursive alternative",
                    "pattern" => name,
                    "alternative" => flag.index);
            }
        }
    }

    log_debug!(logger, "Recursion analysis completed",
        "nullable_patterns" => report.nullable.len(),
        "right_recursive_alternatives" => report.right_recursive.len());

    Ok(report)
}
