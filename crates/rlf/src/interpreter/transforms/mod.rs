//! Transform registry and built-in transforms.
//!
//! Transforms decorate an interpolated value (`{@cap @a card}`), reading
//! grammatical tags from their operand phrase. Built-ins are resolved through
//! the canonical tables in `rlf_semantics`; applications can register their
//! own transforms per language or for every language.

mod articles;
mod case;
mod cjk;
mod markup;
mod turkish;

use std::collections::{BTreeSet, HashMap};
use std::fmt::{Debug, Formatter, Result as FmtResult};
use std::sync::Arc;

use rlf_semantics::{TransformId, accepted_transform_names, base_language, resolve_transform};

use crate::interpreter::error::EvalError;
use crate::interpreter::plural::plural_category;
use crate::types::{Phrase, Value};

/// A custom transform.
///
/// Takes:
/// - `value`: the operand, a phrase when the template interpolated one
/// - `context`: the value after `:` (`acc` in `@der:acc`, the bound value in
///   `@count:$n`)
/// - `lang`: language code of the evaluation
pub type TransformFn =
    Arc<dyn Fn(&Value, Option<&Value>, &str) -> Result<String, EvalError> + Send + Sync>;

/// A resolved transform, ready to execute.
#[derive(Clone)]
pub enum TransformKind {
    Builtin(TransformId),
    Custom(TransformFn),
}

impl TransformKind {
    /// Run the transform on `value`.
    ///
    /// Tag-reading built-ins reject operands that are not phrases. A phrase
    /// missing the expected tag gets the transform's default form.
    pub fn execute(
        &self,
        value: &Value,
        context: Option<&Value>,
        lang: &str,
    ) -> Result<String, EvalError> {
        match self {
            TransformKind::Builtin(id) => execute_builtin(*id, value, context, lang),
            TransformKind::Custom(f) => f(value, context, lang),
        }
    }
}

impl PartialEq for TransformKind {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (TransformKind::Builtin(a), TransformKind::Builtin(b)) => a == b,
            (TransformKind::Custom(a), TransformKind::Custom(b)) => Arc::ptr_eq(a, b),
            (TransformKind::Builtin(_), TransformKind::Custom(_))
            | (TransformKind::Custom(_), TransformKind::Builtin(_)) => false,
        }
    }
}

impl Debug for TransformKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            TransformKind::Builtin(id) => f.debug_tuple("Builtin").field(id).finish(),
            TransformKind::Custom(_) => f.write_str("Custom(..)"),
        }
    }
}

/// Registry for transform functions.
///
/// Lookup order for a name in a language:
/// 1. custom transforms registered for the exact language tag, then for its
///    base language (`pt-BR` falls back to `pt`)
/// 2. custom universal transforms
/// 3. built-ins accepted by the language, including aliases such as `@an`
#[derive(Clone, Default)]
pub struct TransformRegistry {
    universal: HashMap<String, TransformFn>,
    language_specific: HashMap<String, HashMap<String, TransformFn>>,
}

impl TransformRegistry {
    /// Create a registry holding only the built-ins.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a transform for one language, shadowing any built-in of the
    /// same name there.
    pub fn register<F>(&mut self, lang: impl Into<String>, name: impl Into<String>, f: F)
    where
        F: Fn(&Value, Option<&Value>, &str) -> Result<String, EvalError> + Send + Sync + 'static,
    {
        self.language_specific
            .entry(lang.into())
            .or_default()
            .insert(name.into(), Arc::new(f));
    }

    /// Register a transform for every language.
    pub fn register_universal<F>(&mut self, name: impl Into<String>, f: F)
    where
        F: Fn(&Value, Option<&Value>, &str) -> Result<String, EvalError> + Send + Sync + 'static,
    {
        self.universal.insert(name.into(), Arc::new(f));
    }

    /// Get a transform by name for a language.
    pub fn get(&self, name: &str, lang: &str) -> Option<TransformKind> {
        let base = base_language(lang);
        [lang, base]
            .into_iter()
            .filter_map(|code| self.language_specific.get(code))
            .find_map(|transforms| transforms.get(name))
            .or_else(|| self.universal.get(name))
            .map(|f| TransformKind::Custom(Arc::clone(f)))
            .or_else(|| resolve_transform(name, lang).map(TransformKind::Builtin))
    }

    /// Check if a transform exists for a language.
    pub fn has_transform(&self, name: &str, lang: &str) -> bool {
        self.get(name, lang).is_some()
    }

    /// Every transform name usable in `lang`, sorted.
    pub fn names(&self, lang: &str) -> Vec<String> {
        let mut names: BTreeSet<String> = accepted_transform_names(lang)
            .iter()
            .map(|name| (*name).to_string())
            .collect();
        names.extend(self.universal.keys().cloned());
        for code in [lang, base_language(lang)] {
            if let Some(transforms) = self.language_specific.get(code) {
                names.extend(transforms.keys().cloned());
            }
        }
        names.into_iter().collect()
    }
}

impl Debug for TransformRegistry {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        let universal: BTreeSet<&String> = self.universal.keys().collect();
        let languages: BTreeSet<&String> = self.language_specific.keys().collect();
        f.debug_struct("TransformRegistry")
            .field("universal", &universal)
            .field("languages", &languages)
            .finish()
    }
}

fn execute_builtin(
    id: TransformId,
    value: &Value,
    context: Option<&Value>,
    lang: &str,
) -> Result<String, EvalError> {
    let key = context_key(context, lang);
    let key = key.as_deref();

    if !id.reads_tags() {
        return match id {
            TransformId::Cap => Ok(case::cap(&value.to_string(), lang)),
            TransformId::Upper => Ok(case::upper(&value.to_string(), lang)),
            TransformId::Lower => Ok(case::lower(&value.to_string(), lang)),
            TransformId::EnglishThe => Ok(format!("the {}", form(value, key))),
            TransformId::EnglishPlural => {
                let plural = key.map_or_else(|| "other".to_string(), |k| format!("{k}.other"));
                Ok(form(value, Some(&plural)))
            }
            TransformId::KoreanParticle => cjk::korean_particle(&value.to_string(), key),
            TransformId::TurkishInflect => turkish::inflect(value, key),
            _ => Err(not_a_phrase(id, value)),
        };
    }

    let phrase = value.as_phrase().ok_or_else(|| not_a_phrase(id, value))?;
    match id {
        TransformId::EnglishA => Ok(articles::english_a(phrase, key)),
        TransformId::GermanDer => Ok(articles::german_der(phrase, key)),
        TransformId::GermanEin => Ok(articles::german_ein(phrase, key)),
        TransformId::SpanishEl => Ok(articles::spanish_el(phrase, key)),
        TransformId::SpanishUn => Ok(articles::spanish_un(phrase, key)),
        TransformId::PortugueseO => Ok(articles::portuguese_o(phrase, key)),
        TransformId::PortugueseUm => Ok(articles::portuguese_um(phrase, key)),
        TransformId::FrenchLe => Ok(articles::french_le(phrase, key)),
        TransformId::FrenchUn => Ok(articles::french_un(phrase, key)),
        TransformId::ItalianIl => Ok(articles::italian_il(phrase, key)),
        TransformId::ItalianUn => Ok(articles::italian_un(phrase, key)),
        TransformId::ChineseCount => Ok(cjk::chinese_count(phrase, count(id, context)?)),
        TransformId::JapaneseCount => Ok(cjk::japanese_count(phrase, count(id, context)?)),
        TransformId::KoreanCount => Ok(cjk::korean_count(phrase, count(id, context)?)),
        _ => Err(not_a_phrase(id, value)),
    }
}

fn not_a_phrase(id: TransformId, value: &Value) -> EvalError {
    EvalError::NotAPhrase {
        operation: format!("@{}", id.name()),
        kind: value.kind(),
    }
}

/// The variant key named by a transform context: text verbatim, a number's
/// plural category, a phrase's first tag.
fn context_key(context: Option<&Value>, lang: &str) -> Option<String> {
    match context? {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(plural_category(lang, *n).to_string()),
        Value::Phrase(phrase) => phrase.first_tag().map(ToString::to_string),
    }
}

/// The form of the operand selected by `key`, falling back to its text.
fn form(value: &Value, key: Option<&str>) -> String {
    match (value, key) {
        (Value::Phrase(phrase), Some(key)) => phrase_form(phrase, key),
        _ => value.to_string(),
    }
}

fn phrase_form(phrase: &Phrase, key: &str) -> String {
    phrase.variant(key).unwrap_or(phrase.text.as_str()).to_string()
}

/// Whether a context key asks for a plural form.
fn is_plural(key: Option<&str>) -> bool {
    key.is_some_and(|key| {
        key.split('.')
            .any(|segment| matches!(segment, "other" | "few" | "many" | "two" | "zero"))
    })
}

/// The quantity handed to a counting transform.
fn count(id: TransformId, context: Option<&Value>) -> Result<i64, EvalError> {
    let n = match context {
        Some(Value::Number(n)) => Some(*n),
        Some(Value::String(s)) => s.parse().ok(),
        Some(Value::Phrase(_)) | None => None,
    };
    n.ok_or_else(|| EvalError::InvalidTransformContext {
        transform: id.name().to_string(),
        context: context.map(ToString::to_string).unwrap_or_default(),
        reason: "expected a number".to_string(),
    })
}
