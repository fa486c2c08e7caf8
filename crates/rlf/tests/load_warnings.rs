//! Integration tests for comparing a translation against its source language.

use rlf::{LoadWarning, Locale};

fn locale(source: &str, lang: &str, translation: &str) -> Locale {
    let mut locale = Locale::new();
    locale.load_translations_str("en", source).unwrap();
    locale.load_translations_str(lang, translation).unwrap();
    locale
}

#[test]
fn complete_translation_has_no_warnings() {
    let locale = locale(
        r#"card = :a "card"; draw($n) = "Draw {$n}";"#,
        "de",
        r#"card = :fem "Karte"; draw($n) = "Ziehe {$n}";"#,
    );
    assert!(locale.validate_translations("en", "de").is_empty());
}

#[test]
fn missing_and_unknown_definitions() {
    let locale = locale(
        r#"hello = "Hello"; bye = "Bye"; again = "Again";"#,
        "de",
        r#"hello = "Hallo"; extra = "Extra";"#,
    );
    assert_eq!(
        locale.validate_translations("en", "de"),
        vec![
            LoadWarning::UnknownPhrase {
                name: "extra".to_string(),
                language: "de".to_string(),
            },
            LoadWarning::MissingTranslation {
                name: "again".to_string(),
                language: "de".to_string(),
            },
            LoadWarning::MissingTranslation {
                name: "bye".to_string(),
                language: "de".to_string(),
            },
        ]
    );
}

#[test]
fn parameter_count_mismatch() {
    let locale = locale(
        r#"deal($n, $p) = "Deal {$n} to {$p}";"#,
        "es",
        r#"deal($n) = "Reparte {$n}";"#,
    );
    assert_eq!(
        locale.validate_translations("en", "es"),
        vec![LoadWarning::ParameterCountMismatch {
            name: "deal".to_string(),
            language: "es".to_string(),
            source_count: 2,
            translation_count: 1,
        }]
    );
}

#[test]
fn unrecognized_tag_lists_valid_tags() {
    let locale = locale(r#"card = "card";"#, "ru", r#"card = :fen "карта";"#);
    let warnings = locale.validate_translations("en", "ru");
    assert_eq!(warnings.len(), 1);
    let LoadWarning::UnrecognizedTag { tag, valid_tags, .. } = &warnings[0] else {
        panic!("expected UnrecognizedTag, got {warnings:?}");
    };
    assert_eq!(tag, "fen");
    assert!(valid_tags.contains(&"fem".to_string()));
    assert_eq!(
        warnings[0].to_string(),
        "'card' in 'ru' has unrecognized tag ':fen' (expected one of: masc, fem, neut, anim, inan)"
    );
}

#[test]
fn languages_without_a_tag_table_accept_any_tag() {
    let locale = locale(r#"card = "card";"#, "nl", r#"card = :de "kaart";"#);
    assert!(locale.validate_translations("en", "nl").is_empty());
}

#[test]
fn regional_language_uses_base_tag_table() {
    let locale = locale(r#"card = "card";"#, "pt-BR", r#"card = :neut "carta";"#);
    let warnings = locale.validate_translations("en", "pt-BR");
    assert!(matches!(
        warnings.as_slice(),
        [LoadWarning::UnrecognizedTag { tag, .. }] if tag == "neut"
    ));
}

#[test]
fn warnings_are_sorted_by_name() {
    let locale = locale(
        r#"alpha = "a"; beta($x) = "{$x}"; zeta = "z";"#,
        "de",
        r#"beta = "b"; gamma = :mas "g"; zeta = "z";"#,
    );
    let names: Vec<String> = locale
        .validate_translations("en", "de")
        .into_iter()
        .map(|warning| match warning {
            LoadWarning::UnknownPhrase { name, .. }
            | LoadWarning::ParameterCountMismatch { name, .. }
            | LoadWarning::UnrecognizedTag { name, .. }
            | LoadWarning::MissingTranslation { name, .. } => name,
        })
        .collect();
    // beta: arity; gamma: unknown, then its tag; alpha: missing.
    assert_eq!(names, ["beta", "gamma", "gamma", "alpha"]);
}

#[test]
fn unknown_language_yields_no_warnings() {
    let locale = locale(r#"hello = "Hello";"#, "de", r#"hello = "Hallo";"#);
    assert!(locale.validate_translations("en", "fr").is_empty());
    assert!(locale.validate_translations("xx", "de").is_empty());
}

#[test]
fn warning_messages() {
    let warning = LoadWarning::MissingTranslation {
        name: "bye".to_string(),
        language: "de".to_string(),
    };
    assert_eq!(warning.to_string(), "'bye' has no translation in 'de'");
}
