//! Locale-sensitive case transforms: `@cap`, `@upper`, `@lower`.

use icu_casemap::CaseMapper;
use icu_locale_core::{LanguageIdentifier, langid};
use unicode_segmentation::UnicodeSegmentation;

use super::markup::leading_len;

fn language_id(lang: &str) -> LanguageIdentifier {
    LanguageIdentifier::try_from_str(&lang.replace('_', "-")).unwrap_or(langid!("und"))
}

pub(super) fn upper(text: &str, lang: &str) -> String {
    CaseMapper::new()
        .uppercase_to_string(text, &language_id(lang))
        .to_string()
}

pub(super) fn lower(text: &str, lang: &str) -> String {
    CaseMapper::new()
        .lowercase_to_string(text, &language_id(lang))
        .to_string()
}

/// Uppercase the first grapheme, skipping leading markup such as `<b>`.
///
/// Turkish and Azerbaijani map `i` to `İ`.
pub(super) fn cap(text: &str, lang: &str) -> String {
    let (markup, rest) = text.split_at(leading_len(text));
    let Some(first) = rest.graphemes(true).next() else {
        return text.to_string();
    };
    format!("{markup}{}{}", upper(first, lang), &rest[first.len()..])
}
