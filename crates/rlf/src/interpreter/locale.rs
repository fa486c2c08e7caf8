//! Locale management for RLF translations.
//!
//! The Locale struct provides the user-facing API for registering each
//! language's definitions, selecting the current language, and evaluating
//! phrases.

use std::collections::HashMap;
use std::fs;
use std::path::Path;
use std::sync::OnceLock;

use bon::Builder;
use tracing::{debug, warn};

use crate::interpreter::context::EvalContext;
use crate::interpreter::error::{DefinitionError, EvalError, LoadError, LoadWarning};
use crate::interpreter::evaluator::{call_definition, eval_template, invoke};
use crate::interpreter::language_meta::valid_tags;
use crate::interpreter::registry::PhraseRegistry;
use crate::interpreter::transforms::TransformRegistry;
use crate::parser::ast::Definition;
use crate::parser::{parse_file, parse_template};
use crate::types::{Phrase, PhraseId, Value};

/// One language's registry, built at registration or on first use.
#[derive(Debug, Clone)]
struct LocaleSlot {
    /// Source text of a lazily registered language.
    source: Option<String>,
    registry: OnceLock<Result<PhraseRegistry, DefinitionError>>,
}

impl LocaleSlot {
    fn eager(registry: PhraseRegistry) -> Self {
        Self {
            source: None,
            registry: OnceLock::from(Ok(registry)),
        }
    }

    fn lazy(source: String) -> Self {
        Self {
            source: Some(source),
            registry: OnceLock::new(),
        }
    }

    /// The registry, parsing and validating a lazy source exactly once even
    /// when several threads ask at the same time.
    fn get(&self, language: &str) -> Result<&PhraseRegistry, EvalError> {
        let built = self.registry.get_or_init(|| {
            let source = self.source.as_deref().unwrap_or_default();
            let result = PhraseRegistry::parse(source);
            match &result {
                Ok(registry) => debug!(language, definitions = registry.len(), "built lazy locale"),
                Err(error) => warn!(language, %error, "lazy locale failed to load"),
            }
            result
        });
        built.as_ref().map_err(|error| EvalError::LocaleUnavailable {
            language: language.to_string(),
            reason: error.to_string(),
        })
    }
}

/// User-facing locale management for RLF translations.
///
/// A Locale owns one immutable [`PhraseRegistry`] per language, a transform
/// registry shared by all languages, the current language, and an optional
/// string context. Languages are independent: the same name may carry
/// different tags and bodies in each, and nothing leaks between them.
///
/// Missing translations are errors, never silently replaced by another
/// language's text. [`Locale::render_or_placeholder`] is the one place an
/// error becomes visible text, for display code that must not fail.
///
/// Registration takes `&mut self` and happens before the locale is shared;
/// [`Locale::register_lazy`] defers parsing to the first evaluation, which
/// may come from any thread.
///
/// # Example
///
/// ```
/// use rlf::{Locale, Value};
///
/// let mut locale = Locale::builder()
///     .language("en")
///     .build();
///
/// locale.load_translations_str("en", r#"
///     card = :a { one: "card", other: "cards" };
///     draw($n) = :match($n) { 1: "Draw {@a card}.", *other: "Draw {$n} {card:other}." };
/// "#).unwrap();
///
/// assert_eq!(locale.call_phrase("draw", &[Value::from(1)]).unwrap().to_string(), "Draw a card.");
/// assert_eq!(locale.call_phrase("draw", &[Value::from(4)]).unwrap().to_string(), "Draw 4 cards.");
/// ```
#[derive(Debug, Clone, Builder)]
#[builder(on(String, into))]
pub struct Locale {
    /// Current language code (e.g., "en", "ru", "de").
    #[builder(default = "en".to_string())]
    language: String,

    /// Optional string context for format variant selection.
    ///
    /// When set, variant phrases prefer the variant matching this context
    /// as their default text. For example, with `string_context = "card_text"`,
    /// a phrase `{ interface: "X", card_text: "<b>X</b>" }` produces
    /// `"<b>X</b>"` as its default text.
    string_context: Option<String>,

    #[builder(skip)]
    slots: HashMap<String, LocaleSlot>,

    /// Transforms shared by all languages.
    #[builder(default)]
    transforms: TransformRegistry,
}

impl Default for Locale {
    fn default() -> Self {
        Locale::builder().build()
    }
}

impl Locale {
    /// Create a new Locale with default settings (English).
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a new Locale with the specified language.
    pub fn with_language(language: impl Into<String>) -> Self {
        Locale::builder().language(language.into()).build()
    }

    // =========================================================================
    // Language Management
    // =========================================================================

    /// Get the current language code.
    pub fn language(&self) -> &str {
        &self.language
    }

    /// Change the current language.
    ///
    /// The new language must already be registered before phrases are
    /// evaluated in it.
    pub fn set_language(&mut self, language: impl Into<String>) {
        self.language = language.into();
    }

    /// Get the current string context, if any.
    pub fn string_context(&self) -> Option<&str> {
        self.string_context.as_deref()
    }

    /// Set the string context for format variant selection.
    ///
    /// Pass `None` to clear the context.
    ///
    /// # Example
    ///
    /// ```
    /// use rlf::Locale;
    ///
    /// let mut locale = Locale::new();
    /// locale.load_translations_str("en", r#"
    ///     energy = { interface: "E", card_text: "<b>E</b>" };
    /// "#).unwrap();
    ///
    /// // Without context: default text is the first variant
    /// assert_eq!(locale.get_phrase("energy").unwrap().to_string(), "E");
    ///
    /// locale.set_string_context(Some("card_text"));
    /// assert_eq!(locale.get_phrase("energy").unwrap().to_string(), "<b>E</b>");
    /// ```
    pub fn set_string_context(&mut self, context: Option<impl Into<String>>) {
        self.string_context = context.map(Into::into);
    }

    /// Registered language codes, sorted.
    pub fn languages(&self) -> Vec<&str> {
        let mut languages: Vec<&str> = self.slots.keys().map(String::as_str).collect();
        languages.sort_unstable();
        languages
    }

    /// Get the registry for a language, building it first if it was
    /// registered lazily.
    pub fn registry_for(&self, language: &str) -> Result<&PhraseRegistry, EvalError> {
        self.slots
            .get(language)
            .ok_or_else(|| EvalError::UnknownLocale {
                language: language.to_string(),
            })?
            .get(language)
    }

    /// Get the registry for the current language.
    pub fn registry(&self) -> Result<&PhraseRegistry, EvalError> {
        self.registry_for(&self.language)
    }

    /// Get the shared transform registry (read-only).
    pub fn transforms(&self) -> &TransformRegistry {
        &self.transforms
    }

    /// Get the shared transform registry (mutable) for registering custom transforms.
    pub fn transforms_mut(&mut self) -> &mut TransformRegistry {
        &mut self.transforms
    }

    // =========================================================================
    // Registration
    // =========================================================================

    /// Validate `definitions` and register them as `language`.
    ///
    /// A language is registered once. Registering the same definitions again
    /// is a no-op; different definitions fail with
    /// [`LoadError::AlreadyRegistered`]. Any definition error rejects the
    /// whole language.
    pub fn register(
        &mut self,
        language: &str,
        definitions: Vec<Definition>,
    ) -> Result<usize, LoadError> {
        if let Some(slot) = self.slots.get(language) {
            return match slot.get(language) {
                Ok(existing) if existing.definitions() == definitions.as_slice() => {
                    Ok(existing.len())
                }
                Ok(_) | Err(_) => Err(LoadError::AlreadyRegistered {
                    language: language.to_string(),
                }),
            };
        }

        let registry = PhraseRegistry::new(definitions).map_err(|source| LoadError::Definition {
            language: language.to_string(),
            source,
        })?;
        let count = registry.len();
        debug!(language, definitions = count, "registered locale");
        self.slots
            .insert(language.to_string(), LocaleSlot::eager(registry));
        Ok(count)
    }

    /// Parse, validate, and register source text as `language`.
    ///
    /// # Example
    ///
    /// ```
    /// use rlf::Locale;
    ///
    /// let mut locale = Locale::new();
    /// let count = locale.load_translations_str("en", r#"
    ///     hello = "Hello!";
    ///     card = { one: "card", other: "cards" };
    /// "#).unwrap();
    /// assert_eq!(count, 2);
    /// ```
    pub fn load_translations_str(
        &mut self,
        language: &str,
        content: &str,
    ) -> Result<usize, LoadError> {
        let definitions = parse_file(content).map_err(|error| LoadError::Definition {
            language: language.to_string(),
            source: error.into(),
        })?;
        self.register(language, definitions)
    }

    /// Read a translation file and register it as `language`.
    pub fn load_translations(
        &mut self,
        language: &str,
        path: impl AsRef<Path>,
    ) -> Result<usize, LoadError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| LoadError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        self.load_translations_str(language, &content)
    }

    /// Register source text to be parsed and validated on first use.
    ///
    /// The first evaluation in `language`, from whichever thread gets there
    /// first, builds the registry exactly once; concurrent callers wait for
    /// it and then share the result. If the source is invalid, every
    /// evaluation in the language fails with [`EvalError::LocaleUnavailable`].
    pub fn register_lazy(
        &mut self,
        language: &str,
        source: impl Into<String>,
    ) -> Result<(), LoadError> {
        let source = source.into();
        match self.slots.get(language) {
            Some(slot) if slot.source.as_ref() == Some(&source) => Ok(()),
            Some(_) => Err(LoadError::AlreadyRegistered {
                language: language.to_string(),
            }),
            None => {
                self.slots
                    .insert(language.to_string(), LocaleSlot::lazy(source));
                Ok(())
            }
        }
    }

    /// Compare a translation against its source language.
    ///
    /// Reports, sorted by name:
    /// - definitions the source language does not have
    /// - definitions whose parameter count differs from the source
    /// - tags the target language's grammar does not use
    /// - source definitions the translation is missing
    ///
    /// Returns an empty vector if either language is not available.
    ///
    /// # Example
    ///
    /// ```
    /// use rlf::{Locale, LoadWarning};
    ///
    /// let mut locale = Locale::new();
    /// locale.load_translations_str("en", r#"hello = "Hello!";"#).unwrap();
    /// locale.load_translations_str("ru", r#"
    ///     hello = "Привет!";
    ///     extra = "Лишнее";
    /// "#).unwrap();
    ///
    /// let warnings = locale.validate_translations("en", "ru");
    /// assert_eq!(warnings, vec![LoadWarning::UnknownPhrase {
    ///     name: "extra".to_string(),
    ///     language: "ru".to_string(),
    /// }]);
    /// ```
    pub fn validate_translations(
        &self,
        source_language: &str,
        target_language: &str,
    ) -> Vec<LoadWarning> {
        let (Ok(source), Ok(target)) = (
            self.registry_for(source_language),
            self.registry_for(target_language),
        ) else {
            return Vec::new();
        };

        let mut warnings = Vec::new();
        let mut target_defs: Vec<&Definition> = target.definitions().iter().collect();
        target_defs.sort_by(|a, b| a.name.cmp(&b.name));
        for def in target_defs {
            match source.get(&def.name) {
                Some(source_def) if source_def.arity() != def.arity() => {
                    warnings.push(LoadWarning::ParameterCountMismatch {
                        name: def.name.clone(),
                        language: target_language.to_string(),
                        source_count: source_def.arity(),
                        translation_count: def.arity(),
                    });
                }
                Some(_) => {}
                None => warnings.push(LoadWarning::UnknownPhrase {
                    name: def.name.clone(),
                    language: target_language.to_string(),
                }),
            }
            if let Some(valid) = valid_tags(target_language) {
                warnings.extend(
                    def.tags
                        .iter()
                        .filter(|tag| !valid.contains(&tag.as_str()))
                        .map(|tag| LoadWarning::UnrecognizedTag {
                            name: def.name.clone(),
                            language: target_language.to_string(),
                            tag: tag.to_string(),
                            valid_tags: valid.iter().map(|t| (*t).to_string()).collect(),
                        }),
                );
            }
        }

        let mut missing: Vec<&str> = source
            .names()
            .filter(|name| target.get(name).is_none())
            .collect();
        missing.sort_unstable();
        warnings.extend(missing.into_iter().map(|name| LoadWarning::MissingTranslation {
            name: name.to_string(),
            language: target_language.to_string(),
        }));
        warnings
    }

    // =========================================================================
    // Phrase Evaluation
    // =========================================================================

    fn context<'a>(&'a self, language: &'a str, registry: &'a PhraseRegistry) -> EvalContext<'a> {
        EvalContext::builder()
            .registry(registry)
            .transforms(&self.transforms)
            .language(language)
            .maybe_string_context(self.string_context.as_deref())
            .build()
    }

    /// Evaluate `name` in `language` with positional arguments.
    pub fn evaluate(
        &self,
        language: &str,
        name: &str,
        args: &[Value],
    ) -> Result<Phrase, EvalError> {
        let registry = self.registry_for(language)?;
        invoke(&self.context(language, registry), name, args.to_vec())
    }

    /// Evaluate a definition by [`PhraseId`] in `language`.
    pub fn evaluate_by_id(
        &self,
        language: &str,
        id: PhraseId,
        args: &[Value],
    ) -> Result<Phrase, EvalError> {
        let registry = self.registry_for(language)?;
        let def = registry
            .get_by_id(id)
            .ok_or(EvalError::PhraseNotFoundById { id: id.as_u64() })?;
        call_definition(&self.context(language, registry), def, args.to_vec())
    }

    /// Get a term in the current language.
    pub fn get_phrase(&self, name: &str) -> Result<Phrase, EvalError> {
        self.evaluate(&self.language, name, &[])
    }

    /// Call a phrase with arguments in the current language.
    pub fn call_phrase(&self, name: &str, args: &[Value]) -> Result<Phrase, EvalError> {
        self.evaluate(&self.language, name, args)
    }

    /// Get a term by [`PhraseId`] in the current language.
    pub fn get_phrase_by_id(&self, id: PhraseId) -> Result<Phrase, EvalError> {
        self.evaluate_by_id(&self.language, id, &[])
    }

    /// Call a phrase by [`PhraseId`] in the current language.
    pub fn call_phrase_by_id(&self, id: PhraseId, args: &[Value]) -> Result<Phrase, EvalError> {
        self.evaluate_by_id(&self.language, id, args)
    }

    /// The name registered for `id` in the current language.
    pub fn name_for_id(&self, id: PhraseId) -> Option<&str> {
        self.registry()
            .ok()?
            .get_by_id(id)
            .map(|def| def.name.as_str())
    }

    /// Evaluate an ad-hoc template in the current language.
    ///
    /// ```
    /// use rlf::{Locale, params};
    ///
    /// let mut locale = Locale::new();
    /// locale.load_translations_str("en", r#"card = { one: "card", *other: "cards" };"#).unwrap();
    /// let phrase = locale.eval_str("{$n} {card:$n}", params! { "n" => 2 }).unwrap();
    /// assert_eq!(phrase.to_string(), "2 cards");
    /// ```
    pub fn eval_str(
        &self,
        template: &str,
        params: HashMap<String, Value>,
    ) -> Result<Phrase, EvalError> {
        self.eval_str_in(&self.language, template, params)
    }

    /// Evaluate an ad-hoc template in `language`.
    pub fn eval_str_in(
        &self,
        language: &str,
        template: &str,
        params: HashMap<String, Value>,
    ) -> Result<Phrase, EvalError> {
        let registry = self.registry_for(language)?;
        let template = parse_template(template)?;
        let ctx = self.context(language, registry);
        let text = eval_template(&template, &ctx.with_params(&params))?;
        Ok(Phrase::builder().text(text).build())
    }

    /// Render `name`, or `[name]` if evaluation fails.
    ///
    /// For display code, where a missing or broken translation must be
    /// visible but must not take the screen down. The error is logged.
    pub fn render_or_placeholder(&self, language: &str, name: &str, args: &[Value]) -> String {
        match self.evaluate(language, name, args) {
            Ok(phrase) => phrase.render(),
            Err(error) => {
                warn!(language, phrase = name, %error, "rendering placeholder");
                format!("[{name}]")
            }
        }
    }
}
