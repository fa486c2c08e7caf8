use std::collections::HashMap;
use std::fmt::{Display, Formatter, Result as FmtResult};
use std::ops::Deref;

use serde::{Deserialize, Serialize};

/// A key identifying one entry of a variant table.
///
/// Keys are positional tuples of dimension values joined with dots
/// (`acc.few` is case `acc`, number `few`). A `_` segment leaves its dimension
/// unspecified, and omitted trailing dimensions are unspecified too, so
/// `acc`, `acc._` and `acc._._` are the same key. The empty key (written `_`)
/// matches every request.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct VariantKey(String);

impl VariantKey {
    /// Segment that leaves a dimension unspecified.
    pub const WILDCARD: &'static str = "_";

    /// Create a variant key, dropping trailing wildcard segments.
    pub fn new(s: impl Into<String>) -> Self {
        let s = s.into();
        let mut segments: Vec<&str> = s.split('.').collect();
        while segments
            .last()
            .is_some_and(|segment| *segment == Self::WILDCARD || segment.is_empty())
        {
            segments.pop();
        }
        Self(segments.join("."))
    }

    /// Build a key from individual dimension values.
    pub fn from_segments<I, S>(segments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let parts: Vec<String> = segments
            .into_iter()
            .map(|segment| segment.as_ref().to_string())
            .collect();
        Self::new(parts.join("."))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Dimension values in order, wildcards included.
    pub fn segments(&self) -> Vec<&str> {
        if self.0.is_empty() {
            Vec::new()
        } else {
            self.0.split('.').collect()
        }
    }

    /// Number of dimensions this key pins down.
    pub fn specificity(&self) -> usize {
        self.segments()
            .iter()
            .filter(|segment| **segment != Self::WILDCARD)
            .count()
    }

    /// Whether this table key applies to a requested key: every dimension it
    /// specifies is present in the request with the same value.
    pub fn matches(&self, requested: &VariantKey) -> bool {
        let own = self.segments();
        let wanted = requested.segments();
        own.len() <= wanted.len()
            && own
                .iter()
                .zip(&wanted)
                .all(|(segment, value)| *segment == Self::WILDCARD || segment == value)
    }

    /// Whether some request could match both keys.
    pub fn overlaps(&self, other: &VariantKey) -> bool {
        let left = self.segments();
        let right = other.segments();
        left.iter().zip(&right).all(|(a, b)| {
            *a == Self::WILDCARD || *b == Self::WILDCARD || a == b
        })
    }

    /// The least specific key covering the overlap of two overlapping keys.
    pub fn join(&self, other: &VariantKey) -> VariantKey {
        let left = self.segments();
        let right = other.segments();
        let len = left.len().max(right.len());
        let segments = (0..len).map(|i| {
            match (left.get(i).copied(), right.get(i).copied()) {
                (Some(a), _) if a != Self::WILDCARD => a,
                (_, Some(b)) => b,
                _ => Self::WILDCARD,
            }
        });
        Self::from_segments(segments)
    }
}

/// Outcome of resolving a requested key against a variant table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VariantLookup<'a, V> {
    /// The most specific applicable entry.
    Found(&'a VariantKey, &'a V),
    /// No entry applies to the request.
    Missing,
    /// Two equally specific entries apply and disagree.
    Ambiguous(&'a VariantKey, &'a VariantKey),
}

/// Resolve `requested` against `table` by maximal specificity.
///
/// Among entries whose specified dimensions agree with the request, the one
/// pinning down the most dimensions wins. Equally specific candidates with
/// identical values are not a conflict; the lexicographically first key is
/// reported so the outcome never depends on hash order.
pub fn resolve_variant<'a, V: PartialEq>(
    table: &'a HashMap<VariantKey, V>,
    requested: &VariantKey,
) -> VariantLookup<'a, V> {
    let mut candidates: Vec<(&'a VariantKey, &'a V)> = table
        .iter()
        .filter(|(key, _)| key.matches(requested))
        .collect();
    let Some(best) = candidates.iter().map(|(key, _)| key.specificity()).max() else {
        return VariantLookup::Missing;
    };
    candidates.retain(|(key, _)| key.specificity() == best);
    candidates.sort_by(|a, b| a.0.cmp(b.0));

    let (first_key, first_value) = candidates[0];
    match candidates.iter().find(|(_, value)| *value != first_value) {
        Some(&(other_key, _)) => VariantLookup::Ambiguous(first_key, other_key),
        None => VariantLookup::Found(first_key, first_value),
    }
}

impl Deref for VariantKey {
    type Target = str;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl From<&str> for VariantKey {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for VariantKey {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

impl Display for VariantKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        if self.0.is_empty() {
            f.write_str(Self::WILDCARD)
        } else {
            f.write_str(&self.0)
        }
    }
}
