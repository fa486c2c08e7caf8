//! Template evaluation engine for RLF phrases.
//!
//! Evaluation walks a definition's body against bound parameters and
//! produces a [`Phrase`]. Registries are validated before they can be
//! evaluated, so references always resolve and calls never recurse
//! unboundedly; the errors returned here depend on call-time arguments.

use std::collections::HashMap;

use tracing::trace;

use crate::interpreter::context::EvalContext;
use crate::interpreter::error::{EvalError, compute_suggestions};
use crate::interpreter::matcher;
use crate::interpreter::plural::plural_category;
use crate::parser::ast::{
    Argument, Definition, DefinitionBody, Reference, Segment, Selector, Template, Transform,
    TransformContext, VariantEntry,
};
use crate::types::{Phrase, Value, VariantKey, VariantLookup};

/// Evaluate the definition `name` with positional `args`.
pub(crate) fn invoke(
    ctx: &EvalContext<'_>,
    name: &str,
    args: Vec<Value>,
) -> Result<Phrase, EvalError> {
    let registry = ctx.registry();
    let def = registry.get(name).ok_or_else(|| {
        let names: Vec<&str> = registry.names().collect();
        EvalError::PhraseNotFound {
            name: name.to_string(),
            suggestions: compute_suggestions(name, &names),
        }
    })?;
    call_definition(ctx, def, args)
}

/// Evaluate an already resolved definition with positional `args`.
pub(crate) fn call_definition(
    ctx: &EvalContext<'_>,
    def: &Definition,
    args: Vec<Value>,
) -> Result<Phrase, EvalError> {
    if def.arity() != args.len() {
        return Err(EvalError::ArgumentCount {
            phrase: def.name.clone(),
            expected: def.arity(),
            got: args.len(),
        });
    }
    trace!(phrase = %def.name, language = ctx.language(), "evaluating");

    let params: HashMap<String, Value> = def.parameters().iter().cloned().zip(args).collect();
    eval_definition(def, &ctx.with_params(&params))
}

/// Evaluate a definition whose parameters are bound in `ctx`.
///
/// Tags come from the definition, or verbatim from the `:from` source.
fn eval_definition(def: &Definition, ctx: &EvalContext<'_>) -> Result<Phrase, EvalError> {
    let Some(from) = &def.from_param else {
        let (text, variants) = eval_body(def, ctx)?;
        return Ok(Phrase::builder()
            .text(text)
            .variants(variants)
            .tags(def.tags.clone())
            .build());
    };

    let bound = ctx.param(from)?;
    let source = bound.as_phrase().ok_or_else(|| EvalError::NotAPhrase {
        operation: format!(":from(${from}) in '{}'", def.name),
        kind: bound.kind(),
    })?;

    let (text, _) = eval_body(def, ctx)?;
    let mut variants = HashMap::with_capacity(source.variants.len());
    for key in source.variant_keys() {
        let mut params: HashMap<String, Value> = def
            .parameters()
            .iter()
            .map(|p| Ok((p.clone(), ctx.param(p)?.clone())))
            .collect::<Result<_, EvalError>>()?;
        params.insert(
            from.clone(),
            Value::Phrase(source.narrowed(source.variants[key].as_str())),
        );
        let (variant_text, _) = eval_body(def, &ctx.with_params(&params))?;
        variants.insert(key.clone(), variant_text);
    }

    Ok(Phrase::builder()
        .text(text)
        .variants(variants)
        .tags(source.tags.clone())
        .build())
}

fn eval_body(
    def: &Definition,
    ctx: &EvalContext<'_>,
) -> Result<(String, HashMap<VariantKey, String>), EvalError> {
    match &def.body {
        DefinitionBody::Simple(template) => Ok((eval_template(template, ctx)?, HashMap::new())),
        DefinitionBody::Variants(entries) => build_variants(entries, ctx),
        DefinitionBody::Match(block) => {
            let template = matcher::select(&def.name, block, ctx)?;
            Ok((eval_template(template, ctx)?, HashMap::new()))
        }
    }
}

/// Evaluate every entry of a variant table.
///
/// The default text is the entry matching the string context if there is
/// one, else the `*` entry, else the first entry.
fn build_variants(
    entries: &[VariantEntry],
    ctx: &EvalContext<'_>,
) -> Result<(String, HashMap<VariantKey, String>), EvalError> {
    let mut variants = HashMap::new();
    let mut texts = Vec::with_capacity(entries.len());
    for entry in entries {
        let text = eval_template(&entry.template, ctx)?;
        for key in &entry.keys {
            variants.insert(key.clone(), text.clone());
        }
        texts.push(text);
    }

    let context_key = ctx.string_context().map(VariantKey::new);
    let chosen = context_key
        .and_then(|wanted| entries.iter().position(|e| e.keys.contains(&wanted)))
        .or_else(|| entries.iter().position(|e| e.is_default))
        .unwrap_or(0);
    let text = texts.into_iter().nth(chosen).unwrap_or_default();
    Ok((text, variants))
}

/// Evaluate a template, producing a formatted string.
///
/// Each interpolation resolves its reference, applies selectors, then
/// applies transforms right-to-left.
pub fn eval_template(template: &Template, ctx: &EvalContext<'_>) -> Result<String, EvalError> {
    let mut output = String::new();
    for segment in &template.segments {
        match segment {
            Segment::Literal(s) => output.push_str(s),
            Segment::Interpolation {
                transforms,
                reference,
                selectors,
            } => {
                let value = resolve_reference(reference, ctx)?;
                let selected = apply_selectors(value, selectors, ctx)?;
                output.push_str(&apply_transforms(selected, transforms, ctx)?);
            }
        }
    }
    Ok(output)
}

fn resolve_reference(reference: &Reference, ctx: &EvalContext<'_>) -> Result<Value, EvalError> {
    match reference {
        Reference::Parameter(name) => ctx.param(name).cloned(),
        Reference::Identifier(name) => Ok(Value::Phrase(invoke(ctx, name, Vec::new())?)),
        Reference::PhraseCall { name, args } => {
            let args = args
                .iter()
                .map(|arg| resolve_argument(arg, ctx))
                .collect::<Result<Vec<_>, _>>()?;
            Ok(Value::Phrase(invoke(ctx, name, args)?))
        }
    }
}

fn resolve_argument(arg: &Argument, ctx: &EvalContext<'_>) -> Result<Value, EvalError> {
    match arg {
        Argument::Parameter(name) => ctx.param(name).cloned(),
        Argument::Identifier(name) => Ok(Value::Phrase(invoke(ctx, name, Vec::new())?)),
        Argument::Number(n) => Ok(Value::Number(*n)),
    }
}

/// Select a variant with the compound key built from `selectors`.
///
/// The selected text keeps the operand's tags so later transforms can read
/// them; the variant table is consumed by the selection.
fn apply_selectors(
    value: Value,
    selectors: &[Selector],
    ctx: &EvalContext<'_>,
) -> Result<Value, EvalError> {
    if selectors.is_empty() {
        return Ok(value);
    }

    let segments = selectors
        .iter()
        .map(|selector| resolve_selector(selector, ctx))
        .collect::<Result<Vec<_>, _>>()?;
    let key = VariantKey::from_segments(&segments);

    let Value::Phrase(phrase) = value else {
        return Err(EvalError::NotAPhrase {
            operation: format!("selector ':{key}'"),
            kind: value.kind(),
        });
    };
    let text = variant_text(&phrase, &key)?;
    Ok(Value::Phrase(Phrase::builder().text(text).tags(phrase.tags).build()))
}

/// Resolve a selector to one key segment.
///
/// A parameter bound to a number selects its plural category, a phrase its
/// first tag, and text is used verbatim unless it is numeric.
fn resolve_selector(selector: &Selector, ctx: &EvalContext<'_>) -> Result<String, EvalError> {
    match selector {
        Selector::Literal(key) => Ok(key.clone()),
        Selector::Parameter(name) => match ctx.param(name)? {
            Value::Number(n) => Ok(plural_category(ctx.language(), *n).to_string()),
            Value::Phrase(phrase) => phrase
                .first_tag()
                .map(ToString::to_string)
                .ok_or_else(|| EvalError::UntaggedSelector {
                    parameter: name.clone(),
                }),
            Value::String(s) => Ok(match s.parse::<i64>() {
                Ok(n) => plural_category(ctx.language(), n).to_string(),
                Err(_) => s.clone(),
            }),
        },
    }
}

/// Look up `key` in a phrase by maximal specificity.
///
/// A phrase without a variant table answers every key with its text.
pub(crate) fn variant_text(phrase: &Phrase, key: &VariantKey) -> Result<String, EvalError> {
    if phrase.variants.is_empty() {
        return Ok(phrase.text.clone());
    }
    match phrase.lookup(key) {
        VariantLookup::Found(_, text) => Ok(text.clone()),
        VariantLookup::Ambiguous(first, second) => Err(EvalError::AmbiguousVariant {
            phrase: phrase.text.clone(),
            key: key.to_string(),
            first: first.to_string(),
            second: second.to_string(),
        }),
        VariantLookup::Missing => {
            let available: Vec<String> =
                phrase.variant_keys().into_iter().map(ToString::to_string).collect();
            Err(EvalError::MissingVariant {
                phrase: phrase.text.clone(),
                key: key.to_string(),
                suggestions: compute_suggestions(key.as_str(), &available),
                available,
            })
        }
    }
}

/// Apply transforms right-to-left: `{@cap @a card}` runs `@a` first.
///
/// A phrase operand stays a phrase with its tags after each step, so
/// every transform in the chain can read them.
fn apply_transforms(
    value: Value,
    transforms: &[Transform],
    ctx: &EvalContext<'_>,
) -> Result<String, EvalError> {
    let lang = ctx.language();
    let mut current = value;
    for transform in transforms.iter().rev() {
        let kind = ctx.transforms().get(&transform.name, lang).ok_or_else(|| {
            EvalError::UnknownTransform {
                name: transform.name.clone(),
                language: lang.to_string(),
                suggestions: compute_suggestions(&transform.name, &ctx.transforms().names(lang)),
            }
        })?;
        let context = match &transform.context {
            Some(TransformContext::Static(s)) => Some(Value::String(s.clone())),
            Some(TransformContext::Parameter(name)) => Some(ctx.param(name)?.clone()),
            None => None,
        };

        let text = kind.execute(&current, context.as_ref(), lang)?;
        current = match current {
            Value::Phrase(phrase) => {
                Value::Phrase(Phrase::builder().text(text).tags(phrase.tags).build())
            }
            Value::Number(_) | Value::String(_) => Value::String(text),
        };
    }
    Ok(current.to_string())
}
