//! End-to-end scenarios for a card game's localized text.

use std::collections::HashMap;

use rlf::{DefinitionError, EvalError, LoadError, Locale, Phrase, Tag, Value, VariantKey};

#[test]
fn counted_cards_pick_literal_or_default_branch() {
    let mut locale = Locale::new();
    locale
        .load_translations_str(
            "en",
            r#"
        ally = { one: "ally", other: "allies" };
        cards($n) = :match($n) { 1: "a card", *other: "{$n} cards" };
    "#,
        )
        .unwrap();

    assert_eq!(
        locale.call_phrase("cards", &[Value::from(1)]).unwrap().to_string(),
        "a card"
    );
    assert_eq!(
        locale.call_phrase("cards", &[Value::from(3)]).unwrap().to_string(),
        "3 cards"
    );
    assert_eq!(
        locale.eval_str("{ally:other}", HashMap::new()).unwrap().to_string(),
        "allies"
    );
}

#[test]
fn subtype_wrapper_inherits_tags() {
    let mut locale = Locale::with_language("es");
    locale
        .load_translations_str("es", r#"subtype($s) = :from($s) "<b>{$s}</b>";"#)
        .unwrap();
    let ancient = Phrase::builder()
        .text("Ancient".to_string())
        .tags(vec![Tag::new("masc")])
        .build();

    let result = locale.call_phrase("subtype", &[Value::from(ancient)]).unwrap();
    assert_eq!(result.to_string(), "<b>Ancient</b>");
    assert_eq!(result.tags, vec![Tag::new("masc")]);
}

#[test]
fn case_selector_without_number_uses_case_entry() {
    let mut locale = Locale::with_language("ru");
    locale
        .load_translations_str(
            "ru",
            r#"
        card = :fem {
            nom: "карта",
            nom.one: "карта",
            nom.other: "карты",
            acc.one: "карту",
            acc.other: "карты",
        };
        nominative = "{card:nom}";
        accusative_many = "{card:acc:other}";
    "#,
        )
        .unwrap();

    assert_eq!(
        locale.get_phrase("nominative").unwrap().to_string(),
        "карта"
    );
    assert_eq!(
        locale.get_phrase("accusative_many").unwrap().to_string(),
        "карты"
    );

    let card = locale.get_phrase("card").unwrap();
    assert_eq!(card.variant("nom"), Some("карта"));
    assert_eq!(card.variant("nom.few"), Some("карта"));
    assert_eq!(
        card.variants.get(&VariantKey::new("acc.one")).map(String::as_str),
        Some("карту")
    );
}

#[test]
fn term_invoked_with_arguments_fails() {
    let mut locale = Locale::new();
    locale
        .load_translations_str("en", r#"ally = "ally";"#)
        .unwrap();
    assert!(matches!(
        locale.call_phrase("ally", &[Value::from(2)]),
        Err(EvalError::ArgumentCount {
            expected: 0,
            got: 1,
            ..
        })
    ));

    let err = locale
        .load_translations_str("de", r#"ally = "Verbündeter"; line = "{ally(2)}";"#)
        .unwrap_err();
    assert!(matches!(
        err,
        LoadError::Definition {
            source: DefinitionError::TermCalledWithArguments { .. },
            ..
        }
    ));
}

#[test]
fn match_without_default_rejected_before_evaluation() {
    let mut locale = Locale::new();
    let err = locale
        .load_translations_str(
            "en",
            r#"cards($n) = :match($n) { 1: "a card", other: "cards" };"#,
        )
        .unwrap_err();
    assert!(matches!(
        err,
        LoadError::Definition {
            source: DefinitionError::MissingMatchDefault { .. },
            ..
        }
    ));
    assert!(matches!(
        locale.call_phrase("cards", &[Value::from(1)]),
        Err(EvalError::UnknownLocale { .. })
    ));
}

#[test]
fn locales_do_not_share_tags() {
    let mut locale = Locale::new();
    locale
        .load_translations_str(
            "de",
            r#"
        card = :fem "Karte";
        destroyed($c) = :match($c) { fem: "zerstörte {$c}", *masc: "zerstörter {$c}" };
    "#,
        )
        .unwrap();
    locale
        .load_translations_str(
            "fr",
            r#"
        card = :fem :cons "carte";
        destroyed($c) = :match($c) { fem: "{$c} détruite", *masc: "{$c} détruit" };
    "#,
        )
        .unwrap();
    locale
        .load_translations_str("ru", r#"card = :fem :inan "карта";"#)
        .unwrap();

    assert_eq!(
        locale.evaluate("de", "card", &[]).unwrap().tags,
        vec![Tag::new("fem")]
    );
    assert_eq!(
        locale.evaluate("fr", "card", &[]).unwrap().tags,
        vec![Tag::new("fem"), Tag::new("cons")]
    );
    assert_eq!(
        locale.evaluate("ru", "card", &[]).unwrap().tags,
        vec![Tag::new("fem"), Tag::new("inan")]
    );

    let german_card = locale.evaluate("de", "card", &[]).unwrap();
    assert_eq!(
        locale
            .evaluate("fr", "destroyed", &[Value::from(german_card)])
            .unwrap()
            .to_string(),
        "Karte détruite"
    );
}
