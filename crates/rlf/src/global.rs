//! Process-wide locale.
//!
//! The application builds a [`Locale`], registers its languages, and installs
//! it once at startup. Afterwards any thread reads it without locking. The
//! translations are fixed once installed; only the current language can be
//! switched, with [`set_language`] or a scoped [`LanguageGuard`].

use std::collections::HashMap;
use std::mem;
use std::sync::{OnceLock, PoisonError, RwLock};

use tracing::debug;

use crate::{EvalError, Locale, Phrase, Value};

static GLOBAL_LOCALE: OnceLock<Locale> = OnceLock::new();

static CURRENT_LANGUAGE: RwLock<String> = RwLock::new(String::new());

/// Install the global locale.
///
/// Only the first call succeeds; later calls hand their locale back. The
/// locale's language becomes the current global language.
pub fn install(locale: Locale) -> Result<(), Locale> {
    let language = locale.language().to_owned();
    // Readers wait for the language rather than seeing an empty one.
    let mut slot = CURRENT_LANGUAGE
        .write()
        .unwrap_or_else(PoisonError::into_inner);
    GLOBAL_LOCALE.set(locale)?;
    debug!(%language, "installed global locale");
    *slot = language;
    Ok(())
}

/// Whether a global locale has been installed.
pub fn is_installed() -> bool {
    GLOBAL_LOCALE.get().is_some()
}

/// Run `f` with the global locale, if one is installed.
///
/// The locale's own [`Locale::language`] stays at its install-time value;
/// use [`language`] for the current global language.
pub fn with_locale<T>(f: impl FnOnce(&Locale) -> T) -> Option<T> {
    GLOBAL_LOCALE.get().map(f)
}

fn installed() -> Result<&'static Locale, EvalError> {
    GLOBAL_LOCALE.get().ok_or(EvalError::LocaleNotInstalled)
}

fn swap_language(language: String) -> String {
    let mut slot = CURRENT_LANGUAGE
        .write()
        .unwrap_or_else(PoisonError::into_inner);
    mem::replace(&mut *slot, language)
}

fn current() -> String {
    CURRENT_LANGUAGE
        .read()
        .unwrap_or_else(PoisonError::into_inner)
        .clone()
}

/// Returns the current language of the global locale.
pub fn language() -> Option<String> {
    is_installed().then(current)
}

/// Switch the current global language, returning the previous one.
///
/// The language should already be registered with the installed locale;
/// evaluation in an unregistered language fails with
/// [`EvalError::UnknownLocale`].
pub fn set_language(language: impl Into<String>) -> Result<String, EvalError> {
    installed()?;
    let language = language.into();
    debug!(%language, "switching global language");
    Ok(swap_language(language))
}

/// Switches the global language and restores the previous one on drop.
#[derive(Debug)]
#[must_use = "the previous language is restored when the guard drops"]
pub struct LanguageGuard {
    previous: String,
}

impl LanguageGuard {
    /// Switch to `language` until the guard is dropped.
    pub fn new(language: impl Into<String>) -> Result<Self, EvalError> {
        Ok(Self {
            previous: set_language(language)?,
        })
    }
}

impl Drop for LanguageGuard {
    fn drop(&mut self) {
        swap_language(mem::take(&mut self.previous));
    }
}

/// Evaluate `name` in `language` with the global locale.
pub fn evaluate(language: &str, name: &str, args: &[Value]) -> Result<Phrase, EvalError> {
    installed()?.evaluate(language, name, args)
}

/// Get a term in the current global language.
pub fn get_phrase(name: &str) -> Result<Phrase, EvalError> {
    call_phrase(name, &[])
}

/// Call a phrase in the current global language.
pub fn call_phrase(name: &str, args: &[Value]) -> Result<Phrase, EvalError> {
    let locale = installed()?;
    locale.evaluate(&current(), name, args)
}

/// Evaluate an ad-hoc template in the current global language.
pub fn eval_str(template: &str, params: HashMap<String, Value>) -> Result<Phrase, EvalError> {
    let locale = installed()?;
    locale.eval_str_in(&current(), template, params)
}
