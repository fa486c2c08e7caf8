//! Error types for the RLF interpreter.

use std::fmt::{Display, Formatter, Result as FmtResult};
use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::parser::ParseError;

/// A problem that prevents a locale's definitions from being used.
///
/// Raised while a registry is built; any one of these fails the whole locale.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DefinitionError {
    /// Malformed source text.
    #[error(transparent)]
    Syntax(#[from] ParseError),

    #[error("'{name}' is defined more than once")]
    DuplicateDefinition { name: String },

    /// Two names hash to the same `PhraseId`.
    #[error("'{first}' and '{second}' have the same phrase id")]
    IdCollision { first: String, second: String },

    #[error("'{name}' refers to undefined '{reference}'{}", format_suggestions(.suggestions))]
    UndefinedReference {
        name: String,
        reference: String,
        suggestions: Vec<String>,
    },

    #[error("'{name}' calls term '{reference}' with arguments; terms take none")]
    TermCalledWithArguments { name: String, reference: String },

    #[error("'{name}' uses phrase '{reference}' without arguments; it takes {expected}")]
    PhraseWithoutArguments {
        name: String,
        reference: String,
        expected: usize,
    },

    #[error("'{name}' calls '{reference}' with {got} arguments, expected {expected}")]
    ArityMismatch {
        name: String,
        reference: String,
        expected: usize,
        got: usize,
    },

    #[error("'{name}' uses undeclared parameter '${parameter}'")]
    UndefinedParameter { name: String, parameter: String },

    #[error("'{name}' names undeclared parameter '${parameter}' in :{modifier}")]
    UnknownModifierParameter {
        name: String,
        modifier: &'static str,
        parameter: String,
    },

    #[error("'{name}' combines :from with a variant table")]
    FromWithVariantTable { name: String },

    #[error("'{name}' marks more than one variant entry as the default")]
    DuplicateVariantDefault { name: String },

    #[error("'{name}' declares variant key '{key}' more than once")]
    DuplicateVariantKey { name: String, key: String },

    /// Equally specific keys overlap with different templates and nothing
    /// more specific settles the overlap.
    #[error(
        "'{name}' variants '{first}' and '{second}' are equally specific and disagree; add an entry for '{missing}'"
    )]
    AmbiguousVariants {
        name: String,
        first: String,
        second: String,
        missing: String,
    },

    #[error("'{name}' :match key '{key}' has the wrong number of components, expected {expected}")]
    MatchKeyArity {
        name: String,
        key: String,
        expected: usize,
    },

    #[error("'{name}' :match has no `*` default for '${parameter}'")]
    MissingMatchDefault { name: String, parameter: String },

    #[error("'{name}' :match has more than one `*` default for '${parameter}'")]
    DuplicateMatchDefault { name: String, parameter: String },

    #[error("'{name}' :match has no branch for the default combination '{key}'")]
    MissingDefaultBranch { name: String, key: String },

    #[error("'{name}' :match declares key '{key}' more than once")]
    DuplicateMatchKey { name: String, key: String },

    #[error("cyclic reference: {}", .chain.join(" -> "))]
    Cycle { chain: Vec<String> },
}

/// An error that occurred during phrase evaluation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EvalError {
    #[error("no translations registered for language '{language}'")]
    UnknownLocale { language: String },

    /// The process-wide locale was used before it was installed.
    #[error("no global locale installed")]
    LocaleNotInstalled,

    /// A lazily registered locale failed to build.
    #[error("language '{language}' failed to load: {reason}")]
    LocaleUnavailable { language: String, reason: String },

    #[error("phrase not found: '{name}'{}", format_suggestions(.suggestions))]
    PhraseNotFound {
        name: String,
        suggestions: Vec<String>,
    },

    #[error("phrase not found for id: {id}")]
    PhraseNotFoundById { id: u64 },

    #[error("phrase '{phrase}' expects {expected} arguments, got {got}")]
    ArgumentCount {
        phrase: String,
        expected: usize,
        got: usize,
    },

    /// A template referenced `$name` with nothing bound to it.
    #[error("unbound parameter '${name}'")]
    UnboundParameter { name: String },

    #[error(
        "unknown transform '@{name}' for language '{language}'{}",
        format_suggestions(.suggestions)
    )]
    UnknownTransform {
        name: String,
        language: String,
        suggestions: Vec<String>,
    },

    #[error(
        "missing variant '{key}' in phrase '{phrase}', available: {}{}",
        .available.join(", "),
        format_suggestions(.suggestions)
    )]
    MissingVariant {
        phrase: String,
        key: String,
        available: Vec<String>,
        suggestions: Vec<String>,
    },

    #[error("variant '{key}' of phrase '{phrase}' is ambiguous between '{first}' and '{second}'")]
    AmbiguousVariant {
        phrase: String,
        key: String,
        first: String,
        second: String,
    },

    #[error("no :match branch of '{phrase}' applies to '{key}'")]
    NoMatchingBranch { phrase: String, key: String },

    /// A tag-dependent operation was applied to a number or plain text.
    #[error("{operation} needs a phrase, got a {kind}")]
    NotAPhrase {
        operation: String,
        kind: &'static str,
    },

    /// A dynamic selector was bound to a phrase without tags.
    #[error("selector '${parameter}' is bound to a phrase with no tags")]
    UntaggedSelector { parameter: String },

    #[error("transform '@{transform}' cannot use context '{context}': {reason}")]
    InvalidTransformContext {
        transform: String,
        context: String,
        reason: String,
    },

    #[error("invalid template: {0}")]
    InvalidTemplate(#[from] ParseError),
}

/// Errors that occur while registering translations.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to read '{}': {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("invalid definitions for '{language}': {source}")]
    Definition {
        language: String,
        #[source]
        source: DefinitionError,
    },

    /// The language already has different definitions registered.
    #[error("language '{language}' is already registered")]
    AlreadyRegistered { language: String },
}

/// A non-fatal finding from comparing a translation against its source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadWarning {
    /// The translation defines a name the source language does not.
    UnknownPhrase { name: String, language: String },

    /// The translation declares a different parameter count.
    ParameterCountMismatch {
        name: String,
        language: String,
        source_count: usize,
        translation_count: usize,
    },

    /// A tag that the language's grammar does not use.
    UnrecognizedTag {
        name: String,
        language: String,
        tag: String,
        valid_tags: Vec<String>,
    },

    /// The source defines a name the translation lacks.
    MissingTranslation { name: String, language: String },
}

impl Display for LoadWarning {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            LoadWarning::UnknownPhrase { name, language } => {
                write!(f, "'{name}' in '{language}' does not exist in the source language")
            }
            LoadWarning::ParameterCountMismatch {
                name,
                language,
                source_count,
                translation_count,
            } => write!(
                f,
                "'{name}' in '{language}' takes {translation_count} parameters, the source takes {source_count}"
            ),
            LoadWarning::UnrecognizedTag {
                name,
                language,
                tag,
                valid_tags,
            } => write!(
                f,
                "'{name}' in '{language}' has unrecognized tag ':{tag}' (expected one of: {})",
                valid_tags.join(", ")
            ),
            LoadWarning::MissingTranslation { name, language } => {
                write!(f, "'{name}' has no translation in '{language}'")
            }
        }
    }
}

/// Up to three candidates close to `target` by edit distance, closest first.
pub fn compute_suggestions<S: AsRef<str>>(target: &str, candidates: &[S]) -> Vec<String> {
    let max_distance = if target.chars().count() > 6 { 3 } else { 2 };
    let mut scored: Vec<(usize, &str)> = candidates
        .iter()
        .map(AsRef::as_ref)
        .filter(|candidate| *candidate != target)
        .map(|candidate| (strsim::levenshtein(target, candidate), candidate))
        .filter(|(distance, _)| *distance <= max_distance)
        .collect();
    scored.sort_unstable();
    scored.dedup();
    scored
        .into_iter()
        .take(3)
        .map(|(_, candidate)| candidate.to_string())
        .collect()
}

fn format_suggestions(suggestions: &[String]) -> String {
    if suggestions.is_empty() {
        String::new()
    } else {
        format!("; did you mean: {}?", suggestions.join(", "))
    }
}
