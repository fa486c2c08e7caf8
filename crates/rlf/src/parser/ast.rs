//! Public AST types for RLF definitions and templates.
//!
//! These types are public so that tooling can build or inspect definitions
//! without going through source text.

use crate::types::{Tag, VariantKey};

/// A parsed template string.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Template {
    pub segments: Vec<Segment>,
}

impl Template {
    /// A template with a single literal segment.
    pub fn literal(text: impl Into<String>) -> Self {
        Self {
            segments: vec![Segment::Literal(text.into())],
        }
    }

    /// Interpolations in source order.
    pub fn interpolations(&self) -> impl Iterator<Item = (&[Transform], &Reference, &[Selector])> {
        self.segments.iter().filter_map(|segment| match segment {
            Segment::Literal(_) => None,
            Segment::Interpolation {
                transforms,
                reference,
                selectors,
            } => Some((transforms.as_slice(), reference, selectors.as_slice())),
        })
    }
}

/// A segment within a template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    /// Literal text, escapes already resolved.
    Literal(String),
    /// `{transforms reference selectors}`
    Interpolation {
        transforms: Vec<Transform>,
        reference: Reference,
        selectors: Vec<Selector>,
    },
}

/// A transform applied to an interpolated value (`@cap`, `@der:acc`, `@count:$n`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transform {
    /// Transform name without `@`.
    pub name: String,
    pub context: Option<TransformContext>,
}

/// The part written after `:` in a transform.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransformContext {
    /// A literal selector such as `acc` or `acc.other`.
    Static(String),
    /// A parameter whose value is handed to the transform (`@count:$n`).
    Parameter(String),
}

/// What an interpolation refers to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reference {
    /// `{$name}`
    Parameter(String),
    /// `{name}`: a term in the same locale.
    Identifier(String),
    /// `{name(args)}`: a phrase call.
    PhraseCall { name: String, args: Vec<Argument> },
}

/// An argument in a phrase call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Argument {
    Parameter(String),
    Identifier(String),
    Number(i64),
}

/// A variant selector written after the reference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selector {
    /// `:acc`
    Literal(String),
    /// `:$n`, resolved from the parameter's value.
    Parameter(String),
}

/// Whether a definition takes arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DefinitionKind {
    /// Zero parameters, invoked without parentheses.
    Term,
    /// Declared parameter names (without `$`), never empty.
    Phrase(Vec<String>),
}

/// One named definition in a locale.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Definition {
    pub name: String,
    pub kind: DefinitionKind,
    pub tags: Vec<Tag>,
    /// Parameter named by `:from($p)`.
    pub from_param: Option<String>,
    pub body: DefinitionBody,
    /// Byte offset of the definition in its source text.
    pub offset: usize,
}

impl Definition {
    /// Declared parameter names; empty for a term.
    pub fn parameters(&self) -> &[String] {
        match &self.kind {
            DefinitionKind::Term => &[],
            DefinitionKind::Phrase(parameters) => parameters,
        }
    }

    pub fn arity(&self) -> usize {
        self.parameters().len()
    }

    pub fn is_term(&self) -> bool {
        matches!(self.kind, DefinitionKind::Term)
    }

    /// Every template in the body, in source order.
    pub fn templates(&self) -> Vec<&Template> {
        match &self.body {
            DefinitionBody::Simple(template) => vec![template],
            DefinitionBody::Variants(entries) => entries.iter().map(|e| &e.template).collect(),
            DefinitionBody::Match(block) => block.branches.iter().map(|b| &b.template).collect(),
        }
    }
}

/// The right-hand side of a definition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DefinitionBody {
    Simple(Template),
    Variants(Vec<VariantEntry>),
    Match(MatchBlock),
}

/// `key1, key2: "template"` inside a variant table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VariantEntry {
    pub keys: Vec<VariantKey>,
    /// Marked with `*`: supplies the phrase's default text.
    pub is_default: bool,
    pub template: Template,
}

/// `:match($a, $b) { ... }`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchBlock {
    pub parameters: Vec<String>,
    pub branches: Vec<MatchBranch>,
}

/// One or more alternative keys sharing a template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchBranch {
    pub keys: Vec<MatchKey>,
    pub template: Template,
}

/// One component per matched parameter (`1.*fem`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchKey {
    pub components: Vec<MatchComponent>,
}

/// A single dimension value in a match key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchComponent {
    /// An integer literal, tag, CLDR category, or literal string value.
    pub value: String,
    /// Marked with `*`: the default for this dimension.
    pub is_default: bool,
}

impl MatchComponent {
    /// The integer this component denotes, if it is a numeric literal.
    pub fn as_number(&self) -> Option<i64> {
        self.value.parse().ok()
    }
}
