//! RLF interpreter for evaluating phrases.
//!
//! This module provides the evaluation engine that takes validated
//! definitions and produces phrases. It resolves phrase calls, selects
//! variants and `:match` branches from arguments, and applies transforms.

mod context;
mod error;
mod evaluator;
mod language_meta;
mod locale;
mod matcher;
mod plural;
mod registry;
mod transforms;
mod validate;

pub use context::EvalContext;
pub use error::{DefinitionError, EvalError, LoadError, LoadWarning, compute_suggestions};
pub use evaluator::eval_template;
pub use language_meta::valid_tags;
pub use locale::Locale;
pub use matcher::{Dimension, MatchStrategy};
pub use plural::{PluralCategory, category, plural_category};
pub use registry::PhraseRegistry;
pub use rlf_semantics::TransformId;
pub use transforms::{TransformFn, TransformKind, TransformRegistry};
