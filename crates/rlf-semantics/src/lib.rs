//! Canonical RLF transform tables.
//!
//! Maps the transform names written in templates (`@a`, `@la`, `@count`) to a
//! canonical [`TransformId`] for a given language. The runtime transform
//! registry dispatches on these ids, and diagnostics use the accepted-name
//! lists for typo suggestions, so both always agree on what a locale accepts.

/// Canonical transform identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TransformId {
    Cap,
    Upper,
    Lower,
    EnglishA,
    EnglishThe,
    EnglishPlural,
    GermanDer,
    GermanEin,
    SpanishEl,
    SpanishUn,
    PortugueseO,
    PortugueseUm,
    FrenchLe,
    FrenchUn,
    ItalianIl,
    ItalianUn,
    ChineseCount,
    JapaneseCount,
    KoreanCount,
    KoreanParticle,
    TurkishInflect,
}

impl TransformId {
    /// Whether this transform reads grammatical tags from its operand.
    ///
    /// Tag-reading transforms require a phrase operand: plain text and numbers
    /// carry no tags. Missing tags on a phrase still fall back to the
    /// transform's default form.
    pub fn reads_tags(self) -> bool {
        !matches!(
            self,
            TransformId::Cap
                | TransformId::Upper
                | TransformId::Lower
                | TransformId::EnglishThe
                | TransformId::EnglishPlural
                | TransformId::KoreanParticle
                | TransformId::TurkishInflect
        )
    }

    /// Canonical template name, without `@`.
    pub fn name(self) -> &'static str {
        match self {
            TransformId::Cap => "cap",
            TransformId::Upper => "upper",
            TransformId::Lower => "lower",
            TransformId::EnglishA => "a",
            TransformId::EnglishThe => "the",
            TransformId::EnglishPlural => "plural",
            TransformId::GermanDer => "der",
            TransformId::GermanEin => "ein",
            TransformId::SpanishEl => "el",
            TransformId::SpanishUn | TransformId::FrenchUn | TransformId::ItalianUn => "un",
            TransformId::PortugueseO => "o",
            TransformId::PortugueseUm => "um",
            TransformId::FrenchLe => "le",
            TransformId::ItalianIl => "il",
            TransformId::ChineseCount | TransformId::JapaneseCount | TransformId::KoreanCount => {
                "count"
            }
            TransformId::KoreanParticle => "particle",
            TransformId::TurkishInflect => "inflect",
        }
    }
}

/// Resolve a transform name for a language to a canonical transform id.
///
/// Resolution order:
/// 1. Alias canonicalization (language-aware where needed)
/// 2. Universal transforms
/// 3. Language-specific transforms
pub fn resolve_transform(name: &str, lang: &str) -> Option<TransformId> {
    let canonical = canonicalize_alias(name, lang);

    match canonical {
        "cap" => return Some(TransformId::Cap),
        "upper" => return Some(TransformId::Upper),
        "lower" => return Some(TransformId::Lower),
        _ => {}
    }

    match (base_language(lang), canonical) {
        ("en", "a") => Some(TransformId::EnglishA),
        ("en", "the") => Some(TransformId::EnglishThe),
        ("en", "plural") => Some(TransformId::EnglishPlural),
        ("de", "der") => Some(TransformId::GermanDer),
        ("de", "ein") => Some(TransformId::GermanEin),
        ("es", "el") => Some(TransformId::SpanishEl),
        ("es", "un") => Some(TransformId::SpanishUn),
        ("pt", "o") => Some(TransformId::PortugueseO),
        ("pt", "um") => Some(TransformId::PortugueseUm),
        ("fr", "le") => Some(TransformId::FrenchLe),
        ("fr", "un") => Some(TransformId::FrenchUn),
        ("it", "il") => Some(TransformId::ItalianIl),
        ("it", "un") => Some(TransformId::ItalianUn),
        ("zh", "count") => Some(TransformId::ChineseCount),
        ("ja", "count") => Some(TransformId::JapaneseCount),
        ("ko", "count") => Some(TransformId::KoreanCount),
        ("ko", "particle") => Some(TransformId::KoreanParticle),
        ("tr", "inflect") => Some(TransformId::TurkishInflect),
        _ => None,
    }
}

/// Accepted transform names for the given language, including aliases.
///
/// Used for diagnostics and typo suggestions.
pub fn accepted_transform_names(lang: &str) -> &'static [&'static str] {
    match base_language(lang) {
        "en" => EN_NAMES,
        "de" => DE_NAMES,
        "es" => ES_NAMES,
        "pt" => PT_NAMES,
        "fr" => FR_NAMES,
        "it" => IT_NAMES,
        "zh" => ZH_NAMES,
        "ja" => JA_NAMES,
        "ko" => KO_NAMES,
        "tr" => TR_NAMES,
        _ => UNIVERSAL_NAMES,
    }
}

/// Strip a region or script subtag: `pt-BR` and `zh_Hant` map to `pt` and `zh`.
pub fn base_language(lang: &str) -> &str {
    lang.split(['-', '_']).next().unwrap_or(lang)
}

fn canonicalize_alias<'a>(name: &'a str, lang: &str) -> &'a str {
    match (name, base_language(lang)) {
        ("an", "en") => "a",
        ("die" | "das", "de") => "der",
        ("eine", "de") => "ein",
        ("la", "es") => "el",
        ("una", "es") => "un",
        ("a", "pt") => "o",
        ("uma", "pt") => "um",
        ("la", "fr") => "le",
        ("une", "fr") => "un",
        ("lo" | "la", "it") => "il",
        ("uno" | "una", "it") => "un",
        (other, _) => other,
    }
}

const UNIVERSAL_NAMES: &[&str] = &["cap", "upper", "lower"];
const EN_NAMES: &[&str] = &["cap", "upper", "lower", "a", "an", "the", "plural"];
const DE_NAMES: &[&str] = &["cap", "upper", "lower", "der", "die", "das", "ein", "eine"];
const ES_NAMES: &[&str] = &["cap", "upper", "lower", "el", "la", "un", "una"];
const PT_NAMES: &[&str] = &["cap", "upper", "lower", "o", "a", "um", "uma"];
const FR_NAMES: &[&str] = &["cap", "upper", "lower", "le", "la", "un", "une"];
const IT_NAMES: &[&str] = &["cap", "upper", "lower", "il", "lo", "la", "un", "uno", "una"];
const ZH_NAMES: &[&str] = &["cap", "upper", "lower", "count"];
const JA_NAMES: &[&str] = &["cap", "upper", "lower", "count"];
const KO_NAMES: &[&str] = &["cap", "upper", "lower", "count", "particle"];
const TR_NAMES: &[&str] = &["cap", "upper", "lower", "inflect"];
