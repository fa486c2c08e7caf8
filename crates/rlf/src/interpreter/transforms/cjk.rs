//! Classifier and particle transforms for Chinese, Japanese, and Korean.

use super::markup::Wrapped;
use crate::interpreter::error::EvalError;
use crate::types::Phrase;

const CHINESE_CLASSIFIERS: &[(&str, &str)] = &[
    ("zhang", "张"),
    ("ge", "个"),
    ("ming", "名"),
    ("wei", "位"),
    ("tiao", "条"),
    ("ben", "本"),
    ("zhi", "只"),
];

const JAPANESE_COUNTERS: &[(&str, &str)] = &[
    ("mai", "枚"),
    ("nin", "人"),
    ("hiki", "匹"),
    ("hon", "本"),
    ("ko", "個"),
    ("satsu", "冊"),
];

const KOREAN_COUNTERS: &[(&str, &str)] = &[
    ("jang", "장"),
    ("myeong", "명"),
    ("mari", "마리"),
    ("gae", "개"),
    ("gwon", "권"),
];

/// The counter named by the phrase's first classifier tag.
fn classifier(
    phrase: &Phrase,
    table: &[(&str, &'static str)],
    default: &'static str,
) -> &'static str {
    phrase
        .tags
        .iter()
        .find_map(|tag| {
            table
                .iter()
                .find(|(name, _)| *name == tag.as_str())
                .map(|(_, counter)| *counter)
        })
        .unwrap_or(default)
}

/// `3张牌`
pub(super) fn chinese_count(phrase: &Phrase, n: i64) -> String {
    let counter = classifier(phrase, CHINESE_CLASSIFIERS, "个");
    format!("{n}{counter}{}", phrase.text)
}

/// `カード3枚`
pub(super) fn japanese_count(phrase: &Phrase, n: i64) -> String {
    let counter = classifier(phrase, JAPANESE_COUNTERS, "個");
    format!("{}{n}{counter}", phrase.text)
}

/// `카드 3장`
pub(super) fn korean_count(phrase: &Phrase, n: i64) -> String {
    let counter = classifier(phrase, KOREAN_COUNTERS, "개");
    format!("{} {n}{counter}", phrase.text)
}

/// Attach a Korean particle, picking its form by whether the last visible
/// syllable has a final consonant (batchim). The particle goes inside any
/// trailing closing tags.
pub(super) fn korean_particle(text: &str, key: Option<&str>) -> Result<String, EvalError> {
    let (after_consonant, after_vowel) = match key {
        Some("subj") => ("이", "가"),
        Some("obj") => ("을", "를"),
        Some("topic") => ("은", "는"),
        Some("and") => ("과", "와"),
        other => {
            return Err(EvalError::InvalidTransformContext {
                transform: "particle".to_string(),
                context: other.unwrap_or_default().to_string(),
                reason: "expected subj, obj, topic, or and".to_string(),
            });
        }
    };
    let word = Wrapped::split(text);
    let batchim = hangeul::ends_with_jongseong(word.visible).unwrap_or(false);
    let particle = if batchim { after_consonant } else { after_vowel };
    Ok(word.rewrap(&format!("{}{particle}", word.visible)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Tag;

    fn tagged(text: &str, tag: &str) -> Phrase {
        Phrase::builder()
            .text(text.to_string())
            .tags(vec![Tag::new(tag)])
            .build()
    }

    #[test]
    fn counters_follow_word_order() {
        assert_eq!(chinese_count(&tagged("牌", "zhang"), 3), "3张牌");
        assert_eq!(japanese_count(&tagged("カード", "mai"), 2), "カード2枚");
        assert_eq!(korean_count(&tagged("카드", "jang"), 5), "카드 5장");
    }

    #[test]
    fn missing_classifier_uses_generic_counter() {
        let phrase = Phrase::builder().text("东西".to_string()).build();
        assert_eq!(chinese_count(&phrase, 1), "1个东西");
    }

    #[test]
    fn particle_follows_batchim() {
        assert_eq!(korean_particle("카드", Some("obj")).unwrap(), "카드를");
        assert_eq!(korean_particle("책", Some("obj")).unwrap(), "책을");
        assert_eq!(korean_particle("책", Some("topic")).unwrap(), "책은");
        assert!(korean_particle("책", Some("dat")).is_err());
    }

    #[test]
    fn particle_goes_inside_closing_tags() {
        assert_eq!(
            korean_particle("<b>책</b>", Some("obj")).unwrap(),
            "<b>책을</b>"
        );
        assert_eq!(
            korean_particle("<b>카드</b>", Some("subj")).unwrap(),
            "<b>카드가</b>"
        );
    }
}
