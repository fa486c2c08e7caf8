//! Evaluation context carried through recursive evaluation.

use std::collections::HashMap;

use bon::Builder;

use crate::interpreter::error::EvalError;
use crate::interpreter::registry::PhraseRegistry;
use crate::interpreter::transforms::TransformRegistry;
use crate::types::Value;

/// Everything one invocation reads.
///
/// The context is immutable. A phrase call evaluates its body in a child
/// context that shares the registries, language, and string context but
/// binds only the callee's own parameters; nothing leaks from the caller's
/// scope.
#[derive(Builder, Clone, Copy)]
pub struct EvalContext<'a> {
    registry: &'a PhraseRegistry,
    transforms: &'a TransformRegistry,
    language: &'a str,

    /// Variant key preferred as the default text of variant tables, such as
    /// `card_text` for `{ interface: "X", card_text: "<b>X</b>" }`.
    string_context: Option<&'a str>,

    params: Option<&'a HashMap<String, Value>>,
}

impl<'a> EvalContext<'a> {
    pub fn registry(&self) -> &'a PhraseRegistry {
        self.registry
    }

    pub fn transforms(&self) -> &'a TransformRegistry {
        self.transforms
    }

    pub fn language(&self) -> &'a str {
        self.language
    }

    pub fn string_context(&self) -> Option<&'a str> {
        self.string_context
    }

    /// Get a parameter value.
    pub fn get_param(&self, name: &str) -> Option<&'a Value> {
        self.params.and_then(|params| params.get(name))
    }

    /// Get a parameter value, failing if it is unbound.
    pub fn param(&self, name: &str) -> Result<&'a Value, EvalError> {
        self.get_param(name)
            .ok_or_else(|| EvalError::UnboundParameter {
                name: name.to_string(),
            })
    }

    /// A context for a callee's body, binding only `params`.
    pub fn with_params<'b>(&self, params: &'b HashMap<String, Value>) -> EvalContext<'b>
    where
        'a: 'b,
    {
        EvalContext {
            registry: self.registry,
            transforms: self.transforms,
            language: self.language,
            string_context: self.string_context,
            params: Some(params),
        }
    }
}
