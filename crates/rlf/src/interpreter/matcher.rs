//! Branch selection for `:match` blocks.
//!
//! Every matched parameter is resolved to one declared value of its
//! dimension by trying [`MatchStrategy::ORDER`] in sequence; the first
//! strategy that yields a value wins for that dimension.

use std::cmp::Reverse;
use std::collections::HashMap;

use crate::interpreter::context::EvalContext;
use crate::interpreter::error::EvalError;
use crate::interpreter::plural::plural_category;
use crate::parser::ast::{MatchBlock, Template};
use crate::types::Value;

/// One rule for picking a dimension value, in priority order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchStrategy {
    /// A number equal to a numeric key, or text equal to a key.
    Literal,
    /// The first declared key naming a tag the phrase carries.
    Tag,
    /// The CLDR plural category of a number.
    PluralCategory,
    /// The dimension's `*` value.
    Default,
}

impl MatchStrategy {
    pub const ORDER: [MatchStrategy; 4] = [
        MatchStrategy::Literal,
        MatchStrategy::Tag,
        MatchStrategy::PluralCategory,
        MatchStrategy::Default,
    ];

    /// Pick a value from `dimension` for `value`, if this strategy applies.
    pub fn pick<'k>(self, dimension: &Dimension<'k>, value: &Value, lang: &str) -> Option<&'k str> {
        match self {
            MatchStrategy::Literal => match value {
                Value::Number(n) => dimension
                    .values
                    .iter()
                    .copied()
                    .find(|candidate| candidate.parse::<i64>() == Ok(*n)),
                Value::String(s) => dimension
                    .values
                    .iter()
                    .copied()
                    .find(|candidate| *candidate == s.as_str()),
                Value::Phrase(_) => None,
            },
            MatchStrategy::Tag => {
                let phrase = value.as_phrase()?;
                dimension
                    .values
                    .iter()
                    .copied()
                    .find(|candidate| phrase.has_tag(candidate))
            }
            MatchStrategy::PluralCategory => {
                let n = match value {
                    Value::Number(n) => *n,
                    Value::String(s) => s.parse().ok()?,
                    Value::Phrase(_) => return None,
                };
                let category = plural_category(lang, n);
                dimension
                    .values
                    .iter()
                    .copied()
                    .find(|candidate| *candidate == category)
            }
            MatchStrategy::Default => Some(dimension.default),
        }
    }
}

/// The values declared for one matched parameter, in declaration order.
#[derive(Debug, Clone)]
pub struct Dimension<'k> {
    pub values: Vec<&'k str>,
    pub default: &'k str,
}

/// Choose the branch template of `block` for the bound parameters.
pub(crate) fn select<'b>(
    name: &str,
    block: &'b MatchBlock,
    ctx: &EvalContext<'_>,
) -> Result<&'b Template, EvalError> {
    let dimensions = dimensions(block);
    let branches: HashMap<Vec<&str>, &Template> = block
        .branches
        .iter()
        .flat_map(|branch| {
            branch.keys.iter().map(move |key| {
                let values = key
                    .components
                    .iter()
                    .map(|component| component.value.as_str())
                    .collect();
                (values, &branch.template)
            })
        })
        .collect();

    let mut resolved = Vec::with_capacity(dimensions.len());
    for (parameter, dimension) in block.parameters.iter().zip(&dimensions) {
        let value = ctx.param(parameter)?;
        let picked = MatchStrategy::ORDER
            .into_iter()
            .find_map(|strategy| strategy.pick(dimension, value, ctx.language()))
            .unwrap_or(dimension.default);
        resolved.push(picked);
    }

    for keep in fallback_order(resolved.len()) {
        let key: Vec<&str> = keep
            .iter()
            .zip(resolved.iter().zip(&dimensions))
            .map(|(kept, (value, dimension))| if *kept { *value } else { dimension.default })
            .collect();
        if let Some(&template) = branches.get(&key) {
            return Ok(template);
        }
    }

    Err(EvalError::NoMatchingBranch {
        phrase: name.to_string(),
        key: resolved.join("."),
    })
}

fn dimensions(block: &MatchBlock) -> Vec<Dimension<'_>> {
    (0..block.parameters.len())
        .map(|i| {
            let mut values: Vec<&str> = Vec::new();
            let mut default = "";
            for key in block.branches.iter().flat_map(|branch| &branch.keys) {
                let Some(component) = key.components.get(i) else {
                    continue;
                };
                if component.is_default {
                    default = component.value.as_str();
                }
                if !values.contains(&component.value.as_str()) {
                    values.push(component.value.as_str());
                }
            }
            Dimension { values, default }
        })
        .collect()
}

/// Masks of which resolved components to keep, most kept first, then
/// preferring to keep the leftmost ones. Ends with the all-defaults mask.
fn fallback_order(len: usize) -> Vec<Vec<bool>> {
    let mut masks: Vec<Vec<bool>> = (0..1usize << len)
        .map(|bits| (0..len).map(|i| bits & (1 << i) != 0).collect())
        .collect();
    masks.sort_by_key(|mask| {
        (
            Reverse(mask.iter().filter(|kept| **kept).count()),
            mask.iter().map(|kept| !kept).collect::<Vec<_>>(),
        )
    });
    masks
}
