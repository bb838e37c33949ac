//! Bounded look-ahead sets
//!
//! A set holds token-type sequences of length `0..=k`. A sequence of length k
//! stands for every input that starts with it, and a sequence ending in EOF
//! is complete. The `saturated` marker records that analysis gave up before
//! the set converged; a saturated set matches any input.

use crate::tokens::{TokenNames, TokenStream, TokenType};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LookAheadSet {
    sequences: BTreeSet<Vec<TokenType>>,
    saturated: bool,
}

impl LookAheadSet {
    /// The empty set (no continuation is possible)
    pub fn new() -> Self {
        Self::default()
    }

    /// The set holding only the empty sequence
    pub fn epsilon() -> Self {
        Self::from_sequences([Vec::new()])
    }

    /// Singleton set for a terminal
    pub fn single(token_type: TokenType) -> Self {
        Self::from_sequences([vec![token_type]])
    }

    pub fn from_sequences<I>(sequences: I) -> Self
    where
        I: IntoIterator<Item = Vec<TokenType>>,
    {
        Self {
            sequences: sequences.into_iter().collect(),
            saturated: false,
        }
    }

    /// Mark the set as overlapping every possible continuation
    pub fn with_saturation(mut self) -> Self {
        self.saturated = true;
        self
    }

    pub fn saturate(&mut self) {
        self.saturated = true;
    }

    pub fn is_saturated(&self) -> bool {
        self.saturated
    }

    /// Add a sequence; returns true when it was not present
    pub fn insert(&mut self, sequence: Vec<TokenType>) -> bool {
        self.sequences.insert(sequence)
    }

    /// Merge another set into this one; returns true when anything changed
    pub fn add_all(&mut self, other: &LookAheadSet) -> bool {
        let before = self.sequences.len();
        self.sequences.extend(other.sequences.iter().cloned());
        let saturated_now = other.saturated && !self.saturated;
        self.saturated |= other.saturated;
        saturated_now || self.sequences.len() != before
    }

    pub fn union(&self, other: &LookAheadSet) -> LookAheadSet {
        let mut result = self.clone();
        result.add_all(other);
        result
    }

    /// Sequences of both sets that can describe the same input
    ///
    /// Two sequences overlap when one is a prefix of the other; the longer is
    /// kept. A saturated operand overlaps everything in the other operand.
    pub fn intersect(&self, other: &LookAheadSet) -> LookAheadSet {
        match (self.saturated, other.saturated) {
            (true, true) => return self.union(other),
            (true, false) => return other.clone(),
            (false, true) => return self.clone(),
            (false, false) => {}
        }

        let mut result = LookAheadSet::new();
        for a in &self.sequences {
            for b in &other.sequences {
                if b.starts_with(a) {
                    result.insert(b.clone());
                } else if a.starts_with(b) {
                    result.insert(a.clone());
                }
            }
        }
        result
    }

    pub fn overlaps(&self, other: &LookAheadSet) -> bool {
        !self.intersect(other).is_empty()
    }

    /// No sequence can match; saturated sets are never empty
    pub fn is_empty(&self) -> bool {
        !self.saturated && self.sequences.is_empty()
    }

    pub fn len(&self) -> usize {
        self.sequences.len()
    }

    /// Exact membership of a sequence
    pub fn contains(&self, sequence: &[TokenType]) -> bool {
        self.sequences.contains(sequence)
    }

    pub fn contains_empty(&self) -> bool {
        self.sequences.contains(&[] as &[TokenType])
    }

    /// Copy of the set with the empty sequence removed
    pub fn without_empty(&self) -> LookAheadSet {
        let mut result = self.clone();
        result.sequences.remove(&[] as &[TokenType]);
        result
    }

    pub fn sequences(&self) -> impl Iterator<Item = &[TokenType]> {
        self.sequences.iter().map(Vec::as_slice)
    }

    pub fn max_length(&self) -> usize {
        self.sequences.iter().map(Vec::len).max().unwrap_or(0)
    }

    pub fn min_length(&self) -> usize {
        self.sequences.iter().map(Vec::len).min().unwrap_or(0)
    }

    /// Distinct token types that can appear first
    pub fn first_tokens(&self) -> BTreeSet<TokenType> {
        self.sequences
            .iter()
            .filter_map(|sequence| sequence.first().copied())
            .collect()
    }

    /// Every `a + b` truncated to `k`
    ///
    /// A sequence of `self` that already has length `k`, or ends in EOF, is
    /// kept unchanged. The result is saturated when `self` is, or when some
    /// sequence had to be extended by a saturated `other`.
    pub fn concat(&self, other: &LookAheadSet, k: usize) -> LookAheadSet {
        let mut result = LookAheadSet::new();
        result.saturated = self.saturated;

        for a in &self.sequences {
            if is_complete(a, k) {
                result.insert(a[..a.len().min(k)].to_vec());
                continue;
            }
            if other.saturated {
                result.saturated = true;
            }
            for b in &other.sequences {
                let take = (k - a.len()).min(b.len());
                let mut sequence = Vec::with_capacity(a.len() + take);
                sequence.extend_from_slice(a);
                sequence.extend_from_slice(&b[..take]);
                result.insert(sequence);
            }
        }
        result
    }

    /// Union of `self^n` for `n` in `min..=max`, truncated to `k`
    ///
    /// An unbounded `max` stops at `min + k` since longer repetitions cannot
    /// contribute new prefixes of length `k`.
    pub fn repeat(&self, min: usize, max: Option<usize>, k: usize) -> LookAheadSet {
        let mut power = LookAheadSet::epsilon();
        for _ in 0..min {
            let next = power.concat(self, k);
            if next == power {
                break;
            }
            power = next;
        }

        let upper = max.unwrap_or(min + k).max(min);
        let mut result = LookAheadSet::new();
        let mut count = min;
        loop {
            result.add_all(&power);
            if count >= upper {
                break;
            }
            let next = power.concat(self, k);
            if next == power {
                break;
            }
            power = next;
            count += 1;
        }
        result
    }

    /// Drop sequences past `limit`, saturating the set when any were dropped
    pub fn cap(&mut self, limit: usize) -> bool {
        if self.sequences.len() <= limit {
            return false;
        }
        let kept: BTreeSet<Vec<TokenType>> = self.sequences.iter().take(limit).cloned().collect();
        self.sequences = kept;
        self.saturated = true;
        true
    }

    /// Whether some sequence is a prefix of the given upcoming tokens
    ///
    /// Only the first `max_length` tokens of each sequence are compared.
    pub fn matches_tokens(&self, upcoming: &[TokenType], max_length: usize) -> bool {
        if self.saturated {
            return true;
        }
        self.sequences.iter().any(|sequence| {
            let length = sequence.len().min(max_length);
            upcoming.len() >= length && sequence[..length] == upcoming[..length]
        })
    }

    /// Whether some sequence is a prefix of the upcoming tokens
    ///
    /// Peeks at most `max_length` tokens and never consumes any.
    pub fn matches_start(&self, stream: &mut TokenStream, max_length: usize) -> bool {
        if self.saturated {
            return true;
        }
        let depth = self.max_length().min(max_length);
        let mut upcoming = Vec::with_capacity(depth);
        for index in 0..depth {
            let token_type = stream.peek(index).token_type;
            upcoming.push(token_type);
            if token_type.is_eof() {
                break;
            }
        }
        while upcoming.len() < depth {
            upcoming.push(TokenType::EOF);
        }
        self.matches_tokens(&upcoming, max_length)
    }

    /// Render with registered token names
    pub fn format_with(&self, names: &TokenNames) -> String {
        let mut parts: Vec<String> = self
            .sequences
            .iter()
            .map(|sequence| {
                if sequence.is_empty() {
                    "ε".to_string()
                } else {
                    names.format_sequence(sequence)
                }
            })
            .collect();
        if self.saturated {
            parts.push("*".to_string());
        }
        format!("{{{}}}", parts.join(", "))
    }
}

fn is_complete(sequence: &[TokenType], k: usize) -> bool {
    sequence.len() >= k || sequence.last().is_some_and(|t| t.is_eof())
}

impl fmt::Display for LookAheadSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format_with(&TokenNames::new()))
    }
}

impl FromIterator<Vec<TokenType>> for LookAheadSet {
    fn from_iter<I: IntoIterator<Item = Vec<TokenType>>>(iter: I) -> Self {
        Self::from_sequences(iter)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tokens::{Token, TokenStream};
    use crate::utils::Position;

    const A: TokenType = TokenType::new(1);
    const B: TokenType = TokenType::new(2);
    const C: TokenType = TokenType::new(3);
    const EOF: TokenType = TokenType::EOF;

    fn set(sequences: &[&[TokenType]]) -> LookAheadSet {
        sequences.iter().map(|s| s.to_vec()).collect()
    }

    fn stream(types: &[TokenType]) -> TokenStream {
        types
            .iter()
            .enumerate()
            .map(|(i, t)| Token::new(*t, "x", Position::new(i, 1, i as u32 + 1)))
            .collect()
    }

    #[test]
    fn test_union_is_non_mutating() {
        let left = set(&[&[A]]);
        let right = set(&[&[B], &[A]]);
        let union = left.union(&right);

        assert_eq!(union.len(), 2);
        assert_eq!(left.len(), 1);
        assert!(union.contains(&[B]));
    }

    #[test]
    fn test_intersect_uses_prefixes() {
        let short = set(&[&[A]]);
        let long = set(&[&[A, B], &[C, A]]);

        let overlap = short.intersect(&long);
        assert_eq!(overlap, set(&[&[A, B]]));
        assert!(set(&[&[A, B]]).intersect(&set(&[&[A, C]])).is_empty());
    }

    #[test]
    fn test_saturated_intersects_anything_non_empty() {
        let saturated = LookAheadSet::new().with_saturation();
        let other = set(&[&[C]]);

        assert!(!saturated.is_empty());
        assert_eq!(saturated.intersect(&other), other);
        assert!(saturated.intersect(&LookAheadSet::new()).is_empty());
        assert!(saturated.overlaps(&saturated.clone()));
    }

    #[test]
    fn test_concat_truncates_to_k() {
        let left = set(&[&[A], &[A, B]]);
        let right = set(&[&[C, C], &[B]]);

        let result = left.concat(&right, 2);
        assert_eq!(result, set(&[&[A, C], &[A, B]]));
    }

    #[test]
    fn test_concat_does_not_extend_past_eof() {
        let left = set(&[&[A, EOF], &[]]);
        let right = set(&[&[B]]);

        let result = left.concat(&right, 3);
        assert_eq!(result, set(&[&[A, EOF], &[B]]));
    }

    #[test]
    fn test_concat_with_empty_other_drops_incomplete() {
        let left = set(&[&[A], &[A, B]]);
        let result = left.concat(&LookAheadSet::new(), 2);
        assert_eq!(result, set(&[&[A, B]]));
    }

    #[test]
    fn test_concat_propagates_saturation() {
        let left = set(&[&[A]]);
        let right = LookAheadSet::single(B).with_saturation();

        assert!(left.concat(&right, 2).is_saturated());
        assert!(!left.concat(&right, 1).is_saturated());
    }

    #[test]
    fn test_repeat_bounded_and_unbounded() {
        let item = LookAheadSet::single(A);

        let optional = item.repeat(0, Some(1), 3);
        assert_eq!(optional, set(&[&[], &[A]]));

        let star = item.repeat(0, None, 2);
        assert_eq!(star, set(&[&[], &[A], &[A, A]]));

        let plus = item.repeat(1, None, 2);
        assert_eq!(plus, set(&[&[A], &[A, A]]));
    }

    #[test]
    fn test_first_tokens_and_lengths() {
        let s = set(&[&[A, B], &[C], &[]]);
        assert_eq!(s.first_tokens().into_iter().collect::<Vec<_>>(), vec![A, C]);
        assert_eq!(s.max_length(), 2);
        assert_eq!(s.min_length(), 0);
        assert!(s.contains_empty());
        assert!(!s.without_empty().contains_empty());
    }

    #[test]
    fn test_matches_start_peeks_without_consuming() {
        let mut tokens = stream(&[A, B, C]);
        let s = set(&[&[A, C], &[A, B]]);

        assert!(s.matches_start(&mut tokens, 2));
        assert!(!set(&[&[A, C]]).matches_start(&mut tokens, 2));
        assert!(set(&[&[A, C]]).matches_start(&mut tokens, 1));
        assert_eq!(tokens.consumed(), 0);
    }

    #[test]
    fn test_matches_start_at_end_of_input() {
        let mut tokens = stream(&[A]);
        assert!(set(&[&[A, EOF]]).matches_start(&mut tokens, 2));
        assert!(!set(&[&[A, B]]).matches_start(&mut tokens, 2));
        assert!(LookAheadSet::epsilon().matches_start(&mut tokens, 2));
    }

    #[test]
    fn test_cap_saturates() {
        let mut s = set(&[&[A], &[B], &[C]]);
        assert!(s.cap(2));
        assert_eq!(s.len(), 2);
        assert!(s.is_saturated());
        assert!(!s.cap(2));
    }

    #[test]
    fn test_display() {
        let names = TokenNames::new().with(A, "a").with(B, "b");
        let s = set(&[&[A, B], &[], &[EOF]]);
        assert_eq!(s.format_with(&names), "{ε, EOF, a b}");
        assert_eq!(LookAheadSet::single(A).with_saturation().to_string(), "{#1, *}");
    }
}
