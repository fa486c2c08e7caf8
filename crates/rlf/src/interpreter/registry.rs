//! Phrase registry for storing and looking up definitions.

use std::collections::HashMap;

use tracing::debug;

use crate::interpreter::context::EvalContext;
use crate::interpreter::error::{DefinitionError, EvalError};
use crate::interpreter::evaluator::{eval_template, invoke};
use crate::interpreter::transforms::TransformRegistry;
use crate::interpreter::validate::validate;
use crate::parser::ast::Definition;
use crate::parser::{parse_file, parse_template};
use crate::types::{Phrase, PhraseId, Value};

/// The validated definitions of one locale.
///
/// A registry is built in one step from a complete set of definitions and
/// never changes afterwards, so it can be shared between threads freely.
/// Building it runs every static check: a registry that exists is known to
/// have no undefined references, arity mismatches, malformed `:match` blocks,
/// ambiguous variant tables, or reference cycles.
///
/// Definitions live in an arena in source order; names and [`PhraseId`]s
/// index into it.
///
/// # Example
///
/// ```
/// use rlf::{PhraseRegistry, Value};
///
/// let registry = PhraseRegistry::parse(r#"
///     card = { one: "card", *other: "cards" };
///     draw($n) = :match($n) { 1: "Draw a card.", *other: "Draw {$n} {card:other}." };
/// "#).unwrap();
///
/// let phrase = registry.call_phrase("en", "draw", &[Value::from(3)]).unwrap();
/// assert_eq!(phrase.to_string(), "Draw 3 cards.");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PhraseRegistry {
    definitions: Vec<Definition>,
    by_name: HashMap<String, usize>,
    by_id: HashMap<u64, usize>,
}

impl PhraseRegistry {
    /// Validate `definitions` and build a registry from them.
    pub fn new(definitions: Vec<Definition>) -> Result<Self, DefinitionError> {
        let mut by_name: HashMap<String, usize> = HashMap::with_capacity(definitions.len());
        let mut by_id: HashMap<u64, usize> = HashMap::with_capacity(definitions.len());

        for (i, def) in definitions.iter().enumerate() {
            if by_name.insert(def.name.clone(), i).is_some() {
                return Err(DefinitionError::DuplicateDefinition {
                    name: def.name.clone(),
                });
            }
            let id = PhraseId::from_name(&def.name).as_u64();
            if let Some(&existing) = by_id.get(&id) {
                return Err(DefinitionError::IdCollision {
                    first: definitions[existing].name.clone(),
                    second: def.name.clone(),
                });
            }
            by_id.insert(id, i);
        }

        validate(&definitions, &by_name)?;
        debug!(definitions = definitions.len(), "built phrase registry");

        Ok(Self {
            definitions,
            by_name,
            by_id,
        })
    }

    /// Parse and validate definition source text.
    pub fn parse(source: &str) -> Result<Self, DefinitionError> {
        Self::new(parse_file(source)?)
    }

    /// Get a definition by name.
    pub fn get(&self, name: &str) -> Option<&Definition> {
        self.by_name.get(name).map(|&i| &self.definitions[i])
    }

    /// Get a definition by [`PhraseId`].
    pub fn get_by_id(&self, id: PhraseId) -> Option<&Definition> {
        self.by_id.get(&id.as_u64()).map(|&i| &self.definitions[i])
    }

    /// All definitions in source order.
    pub fn definitions(&self) -> &[Definition] {
        &self.definitions
    }

    /// Definition names in source order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.definitions.iter().map(|def| def.name.as_str())
    }

    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }

    /// Evaluate a term with the built-in transforms for `lang`.
    pub fn get_phrase(&self, lang: &str, name: &str) -> Result<Phrase, EvalError> {
        self.call_phrase(lang, name, &[])
    }

    /// Evaluate a definition with arguments and the built-in transforms for `lang`.
    pub fn call_phrase(&self, lang: &str, name: &str, args: &[Value]) -> Result<Phrase, EvalError> {
        let transforms = TransformRegistry::new();
        let ctx = EvalContext::builder()
            .registry(self)
            .transforms(&transforms)
            .language(lang)
            .build();
        invoke(&ctx, name, args.to_vec())
    }

    /// Evaluate an ad-hoc template against this registry.
    pub fn eval_str(
        &self,
        lang: &str,
        template: &str,
        params: HashMap<String, Value>,
    ) -> Result<Phrase, EvalError> {
        let template = parse_template(template)?;
        let transforms = TransformRegistry::new();
        let ctx = EvalContext::builder()
            .registry(self)
            .transforms(&transforms)
            .language(lang)
            .params(&params)
            .build();
        let text = eval_template(&template, &ctx)?;
        Ok(Phrase::builder().text(text).build())
    }
}
