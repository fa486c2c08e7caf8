//! Grammatical tags each language's translations are expected to use.
//!
//! Consumed by `Locale::validate_translations` to flag tags the built-in
//! transforms and conventional `:match` branches of a language never read,
//! which are usually typos (`:mas` for `:masc`).

use rlf_semantics::base_language;

/// Recognized tags for a language, or `None` when any tag is accepted.
pub fn valid_tags(lang: &str) -> Option<&'static [&'static str]> {
    match base_language(lang) {
        "pl" | "cs" => Some(&["masc_anim", "masc_inan", "fem", "neut"]),
        "ru" | "uk" => Some(&["masc", "fem", "neut", "anim", "inan"]),
        "de" | "el" | "ro" => Some(&["masc", "fem", "neut"]),
        "es" | "pt" | "hi" => Some(&["masc", "fem"]),
        "fr" => Some(&["masc", "fem", "vowel"]),
        "it" => Some(&["masc", "fem", "vowel", "s_imp"]),
        "en" => Some(&["a", "an"]),
        "ar" => Some(&["masc", "fem", "sun", "moon"]),
        "tr" => Some(&["front", "back", "hard"]),
        "zh" => Some(&["zhang", "ge", "ming", "wei", "tiao", "ben", "zhi"]),
        "ja" => Some(&["mai", "nin", "hiki", "hon", "ko", "satsu"]),
        "ko" => Some(&["jang", "myeong", "mari", "gae", "gwon"]),
        _ => None,
    }
}
