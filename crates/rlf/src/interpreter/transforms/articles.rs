//! Article transforms for English and the Germanic and Romance languages.
//!
//! The article agrees with tags on the noun phrase; the context names the
//! grammatical case and number (`@der:acc.other`), and also selects the
//! matching form of the noun when it has one.

use super::markup::Wrapped;
use super::{is_plural, phrase_form};
use crate::types::Phrase;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Gender {
    Masc,
    Fem,
    Neut,
}

impl Gender {
    /// The first gender tag on the phrase, masculine when there is none.
    fn of(phrase: &Phrase) -> Gender {
        phrase
            .tags
            .iter()
            .find_map(|tag| match tag.as_str() {
                "masc" => Some(Gender::Masc),
                "fem" => Some(Gender::Fem),
                "neut" => Some(Gender::Neut),
                _ => None,
            })
            .unwrap_or(Gender::Masc)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Case {
    Nom,
    Acc,
    Dat,
    Gen,
}

impl Case {
    fn of(key: Option<&str>) -> Case {
        key.into_iter()
            .flat_map(|key| key.split('.'))
            .find_map(|segment| match segment {
                "nom" => Some(Case::Nom),
                "acc" => Some(Case::Acc),
                "dat" => Some(Case::Dat),
                "gen" => Some(Case::Gen),
                _ => None,
            })
            .unwrap_or(Case::Nom)
    }

    fn index(self) -> usize {
        match self {
            Case::Nom => 0,
            Case::Acc => 1,
            Case::Dat => 2,
            Case::Gen => 3,
        }
    }
}

fn noun(phrase: &Phrase, key: Option<&str>) -> String {
    match key {
        Some(key) => phrase_form(phrase, key),
        None => phrase.text.clone(),
    }
}

fn spaced(article: &str, noun: &str) -> String {
    format!("{article} {noun}")
}

/// `a card`, `an event`. Without an `a` or `an` tag the article follows the
/// first visible letter of the noun, past any leading markup.
pub(super) fn english_a(phrase: &Phrase, key: Option<&str>) -> String {
    let noun = noun(phrase, key);
    let an = if phrase.has_tag("an") {
        true
    } else if phrase.has_tag("a") {
        false
    } else {
        Wrapped::split(&noun)
            .visible
            .chars()
            .next()
            .is_some_and(|c| matches!(c.to_ascii_lowercase(), 'a' | 'e' | 'i' | 'o' | 'u'))
    };
    spaced(if an { "an" } else { "a" }, &noun)
}

const DER: [[&str; 4]; 4] = [
    ["der", "den", "dem", "des"],
    ["die", "die", "der", "der"],
    ["das", "das", "dem", "des"],
    ["die", "die", "den", "der"],
];

const EIN: [[&str; 4]; 3] = [
    ["ein", "einen", "einem", "eines"],
    ["eine", "eine", "einer", "einer"],
    ["ein", "ein", "einem", "eines"],
];

fn german_row(phrase: &Phrase) -> usize {
    match Gender::of(phrase) {
        Gender::Masc => 0,
        Gender::Fem => 1,
        Gender::Neut => 2,
    }
}

/// Definite article by gender and case; plural contexts take the plural row.
pub(super) fn german_der(phrase: &Phrase, key: Option<&str>) -> String {
    let row = if is_plural(key) { 3 } else { german_row(phrase) };
    spaced(DER[row][Case::of(key).index()], &noun(phrase, key))
}

/// Indefinite article by gender and case. The plural has no article.
pub(super) fn german_ein(phrase: &Phrase, key: Option<&str>) -> String {
    let noun = noun(phrase, key);
    if is_plural(key) {
        return noun;
    }
    spaced(EIN[german_row(phrase)][Case::of(key).index()], &noun)
}

/// Article pair for languages with masculine and feminine, singular and plural.
struct Articles {
    masc: &'static str,
    fem: &'static str,
    masc_plural: &'static str,
    fem_plural: &'static str,
}

impl Articles {
    fn apply(&self, phrase: &Phrase, key: Option<&str>) -> String {
        let fem = Gender::of(phrase) == Gender::Fem;
        let article = match (is_plural(key), fem) {
            (false, false) => self.masc,
            (false, true) => self.fem,
            (true, false) => self.masc_plural,
            (true, true) => self.fem_plural,
        };
        spaced(article, &noun(phrase, key))
    }
}

pub(super) fn spanish_el(phrase: &Phrase, key: Option<&str>) -> String {
    Articles {
        masc: "el",
        fem: "la",
        masc_plural: "los",
        fem_plural: "las",
    }
    .apply(phrase, key)
}

pub(super) fn spanish_un(phrase: &Phrase, key: Option<&str>) -> String {
    Articles {
        masc: "un",
        fem: "una",
        masc_plural: "unos",
        fem_plural: "unas",
    }
    .apply(phrase, key)
}

pub(super) fn portuguese_o(phrase: &Phrase, key: Option<&str>) -> String {
    Articles {
        masc: "o",
        fem: "a",
        masc_plural: "os",
        fem_plural: "as",
    }
    .apply(phrase, key)
}

pub(super) fn portuguese_um(phrase: &Phrase, key: Option<&str>) -> String {
    Articles {
        masc: "um",
        fem: "uma",
        masc_plural: "uns",
        fem_plural: "umas",
    }
    .apply(phrase, key)
}

/// `le`, `la`, `les`, elided to `l'` before a `vowel`-tagged noun.
pub(super) fn french_le(phrase: &Phrase, key: Option<&str>) -> String {
    let noun = noun(phrase, key);
    if is_plural(key) {
        spaced("les", &noun)
    } else if phrase.has_tag("vowel") {
        format!("l'{noun}")
    } else if Gender::of(phrase) == Gender::Fem {
        spaced("la", &noun)
    } else {
        spaced("le", &noun)
    }
}

pub(super) fn french_un(phrase: &Phrase, key: Option<&str>) -> String {
    Articles {
        masc: "un",
        fem: "une",
        masc_plural: "des",
        fem_plural: "des",
    }
    .apply(phrase, key)
}

/// Italian definite article. `s_imp` marks nouns starting with s+consonant,
/// z, gn and similar clusters; `vowel` marks a leading vowel.
pub(super) fn italian_il(phrase: &Phrase, key: Option<&str>) -> String {
    let noun = noun(phrase, key);
    let vowel = phrase.has_tag("vowel");
    let s_imp = phrase.has_tag("s_imp");
    let fem = Gender::of(phrase) == Gender::Fem;
    let article = match (is_plural(key), fem) {
        (true, true) => "le",
        (true, false) if vowel || s_imp => "gli",
        (true, false) => "i",
        (false, _) if vowel => return format!("l'{noun}"),
        (false, true) => "la",
        (false, false) if s_imp => "lo",
        (false, false) => "il",
    };
    spaced(article, &noun)
}

/// Italian indefinite article, with the partitive (`dei`, `degli`, `delle`)
/// standing in for the plural.
pub(super) fn italian_un(phrase: &Phrase, key: Option<&str>) -> String {
    let noun = noun(phrase, key);
    let vowel = phrase.has_tag("vowel");
    let s_imp = phrase.has_tag("s_imp");
    let fem = Gender::of(phrase) == Gender::Fem;
    let article = match (is_plural(key), fem) {
        (true, true) => "delle",
        (true, false) if vowel || s_imp => "degli",
        (true, false) => "dei",
        (false, true) if vowel => return format!("un'{noun}"),
        (false, true) => "una",
        (false, false) if s_imp => "uno",
        (false, false) => "un",
    };
    spaced(article, &noun)
}
