//! Turkish `@inflect`: agglutinative suffix chains with vowel harmony.
//!
//! The context lists suffixes in order (`@inflect:pl.abl`). Each suffix
//! harmonizes with the last vowel of everything before it, so a chain is
//! built one suffix at a time.
//!
//! A final `p`, `ç`, `t` or `k` on a word of more than one syllable softens
//! before a vowel (`kitap` + `acc` is `kitabı`). Words that keep the hard
//! consonant, such as `saat`, carry a `hard` tag.

use super::markup::Wrapped;
use crate::interpreter::error::EvalError;
use crate::types::Value;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Suffix {
    Plural,
    Accusative,
    Dative,
    Locative,
    Ablative,
    Genitive,
}

impl Suffix {
    fn parse(name: &str) -> Option<Suffix> {
        match name {
            "pl" => Some(Suffix::Plural),
            "acc" => Some(Suffix::Accusative),
            "dat" => Some(Suffix::Dative),
            "loc" => Some(Suffix::Locative),
            "abl" => Some(Suffix::Ablative),
            "gen" => Some(Suffix::Genitive),
            _ => None,
        }
    }
}

/// Harmony forced by a `front` or `back` tag, for loanwords such as `saat`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Harmony {
    Natural,
    Front,
    Back,
}

fn is_vowel(c: char) -> bool {
    matches!(c, 'a' | 'e' | 'ı' | 'i' | 'o' | 'ö' | 'u' | 'ü')
}

fn fold(c: char) -> char {
    match c {
        'I' => 'ı',
        'İ' => 'i',
        _ => c.to_lowercase().next().unwrap_or(c),
    }
}

/// Last vowel of `word`, moved to the forced front or back row.
fn last_vowel(word: &str, harmony: Harmony) -> char {
    let vowel = word.chars().rev().map(fold).find(|c| is_vowel(*c));
    match (vowel, harmony) {
        (Some(v), Harmony::Natural) => v,
        (Some('a'), Harmony::Front) => 'e',
        (Some('ı'), Harmony::Front) => 'i',
        (Some('o'), Harmony::Front) => 'ö',
        (Some('u'), Harmony::Front) => 'ü',
        (Some('e'), Harmony::Back) => 'a',
        (Some('i'), Harmony::Back) => 'ı',
        (Some('ö'), Harmony::Back) => 'o',
        (Some('ü'), Harmony::Back) => 'u',
        (Some(v), _) => v,
        (None, Harmony::Back) => 'a',
        (None, Harmony::Natural | Harmony::Front) => 'e',
    }
}

/// Two-way harmony: `a` after back vowels, `e` after front vowels.
fn two_way(vowel: char) -> char {
    if matches!(vowel, 'a' | 'ı' | 'o' | 'u') {
        'a'
    } else {
        'e'
    }
}

/// Four-way harmony by backness and rounding.
fn four_way(vowel: char) -> char {
    match vowel {
        'a' | 'ı' => 'ı',
        'o' | 'u' => 'u',
        'ö' | 'ü' => 'ü',
        _ => 'i',
    }
}

fn ends_with_vowel(word: &str) -> bool {
    word.chars().last().map(fold).is_some_and(is_vowel)
}

fn ends_voiceless(word: &str) -> bool {
    word.chars()
        .last()
        .map(fold)
        .is_some_and(|c| matches!(c, 'f' | 's' | 't' | 'k' | 'ç' | 'ş' | 'h' | 'p'))
}

/// Soften the final stop of `word` before a vowel-initial suffix. A `k`
/// after `n` becomes `g` (`ahenk`, `ahengi`); elsewhere it becomes `ğ`.
fn soften(word: &mut String) {
    if word.chars().map(fold).filter(|c| is_vowel(*c)).count() < 2 {
        return;
    }
    let mut chars = word.chars().rev();
    let (Some(last), before) = (chars.next(), chars.next()) else {
        return;
    };
    let after_n = before.map(fold) == Some('n');
    let soft = match last {
        'p' => 'b',
        'P' => 'B',
        'ç' => 'c',
        'Ç' => 'C',
        't' => 'd',
        'T' => 'D',
        'k' if after_n => 'g',
        'K' if after_n => 'G',
        'k' => 'ğ',
        'K' => 'Ğ',
        _ => return,
    };
    word.pop();
    word.push(soft);
}

fn suffix_text(word: &str, suffix: Suffix, harmony: Harmony) -> String {
    let vowel = last_vowel(word, harmony);
    let a = two_way(vowel);
    let i = four_way(vowel);
    let d = if ends_voiceless(word) { 't' } else { 'd' };
    let after_vowel = ends_with_vowel(word);
    match suffix {
        Suffix::Plural => format!("l{a}r"),
        Suffix::Accusative if after_vowel => format!("y{i}"),
        Suffix::Accusative => i.to_string(),
        Suffix::Dative if after_vowel => format!("y{a}"),
        Suffix::Dative => a.to_string(),
        Suffix::Locative => format!("{d}{a}"),
        Suffix::Ablative => format!("{d}{a}n"),
        Suffix::Genitive if after_vowel => format!("n{i}n"),
        Suffix::Genitive => format!("{i}n"),
    }
}

/// Append the suffix chain named by `key` to the operand's visible text,
/// inside any trailing closing tags.
pub(super) fn inflect(value: &Value, key: Option<&str>) -> Result<String, EvalError> {
    let invalid = |reason: String| EvalError::InvalidTransformContext {
        transform: "inflect".to_string(),
        context: key.unwrap_or_default().to_string(),
        reason,
    };
    let key = key
        .filter(|key| !key.is_empty())
        .ok_or_else(|| invalid("expected a suffix chain such as pl.acc".to_string()))?;

    let harmony = if value.has_tag("front") {
        Harmony::Front
    } else if value.has_tag("back") {
        Harmony::Back
    } else {
        Harmony::Natural
    };

    let hard = value.has_tag("hard");

    let rendered = value.to_string();
    let wrapped = Wrapped::split(&rendered);
    let mut word = wrapped.visible.to_string();
    for name in key.split('.') {
        let suffix =
            Suffix::parse(name).ok_or_else(|| invalid(format!("unknown suffix '{name}'")))?;
        let text = suffix_text(&word, suffix, harmony);
        if !hard && text.starts_with(is_vowel) {
            soften(&mut word);
        }
        word.push_str(&text);
    }
    Ok(wrapped.rewrap(&word))
}
