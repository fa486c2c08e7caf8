//! Integration tests for built-in and custom transforms.

use std::collections::HashMap;

use rlf::interpreter::{TransformId, TransformKind, TransformRegistry};
use rlf::{EvalError, Locale, Phrase, PhraseRegistry, Tag, Value, params};

fn locale(lang: &str, source: &str) -> Locale {
    let mut locale = Locale::with_language(lang);
    locale.load_translations_str(lang, source).unwrap();
    locale
}

fn eval(locale: &Locale, template: &str, args: HashMap<String, Value>) -> String {
    locale.eval_str(template, args).unwrap().to_string()
}

fn render(locale: &Locale, name: &str, args: &[Value]) -> String {
    locale.call_phrase(name, args).unwrap().to_string()
}

// =============================================================================
// Universal case transforms
// =============================================================================

#[test]
fn cap_upper_lower() {
    let locale = locale("en", r#"card = "card"; shout = "LOUD";"#);
    assert_eq!(eval(&locale, "{@cap card}", params! {}), "Card");
    assert_eq!(eval(&locale, "{@upper card}", params! {}), "CARD");
    assert_eq!(eval(&locale, "{@lower shout}", params! {}), "loud");
}

#[test]
fn cap_on_parameter_text() {
    let locale = locale("en", r#"title($s) = "{@cap $s}";"#);
    assert_eq!(render(&locale, "title", &[Value::from("hello")]), "Hello");
    assert_eq!(render(&locale, "title", &[Value::from("")]), "");
    assert_eq!(
        render(&locale, "title", &[Value::from("  hello")]),
        "  hello"
    );
}

#[test]
fn cap_skips_leading_markup() {
    let locale = locale(
        "en",
        r#"styled = "<b>ancient</b>"; line = "{@cap styled}";"#,
    );
    assert_eq!(render(&locale, "line", &[]), "<b>Ancient</b>");
}

#[test]
fn uppercase_reference_is_cap_shorthand() {
    let locale = locale(
        "en",
        r#"fire_elemental = "fire elemental"; line = "{Fire_Elemental}!";"#,
    );
    assert_eq!(render(&locale, "line", &[]), "Fire elemental!");
}

#[test]
fn cap_is_locale_sensitive() {
    let locale = locale("tr", r#"city = "izmir"; line = "{@cap city}";"#);
    assert_eq!(render(&locale, "line", &[]), "\u{0130}zmir");
}

#[test]
fn cap_applies_to_numbers() {
    let locale = locale("en", r#"n($n) = "{@upper $n}";"#);
    assert_eq!(render(&locale, "n", &[Value::from(42)]), "42");
}

// =============================================================================
// English
// =============================================================================

const ENGLISH: &str = r#"
    card = :a { one: "card", other: "cards" };
    event = :an "event";
    hour = :an "hour";
    uniform = :a "uniform";
    ally = "ally";
"#;

#[test]
fn english_indefinite_article_from_tags() {
    let locale = locale("en", ENGLISH);
    assert_eq!(eval(&locale, "{@a card}", params! {}), "a card");
    assert_eq!(eval(&locale, "{@a event}", params! {}), "an event");
    assert_eq!(eval(&locale, "{@an hour}", params! {}), "an hour");
    assert_eq!(eval(&locale, "{@a uniform}", params! {}), "a uniform");
}

#[test]
fn english_article_without_tag_follows_spelling() {
    let locale = locale("en", ENGLISH);
    assert_eq!(eval(&locale, "{@a ally}", params! {}), "an ally");
}

#[test]
fn english_article_reads_first_visible_letter() {
    let locale = locale(
        "en",
        r#"
        subtype($s) = :from($s) "<b>{$s}</b>";
        dissolve($s) = "Dissolve {@a subtype($s)}.";
    "#,
    );
    assert_eq!(
        render(&locale, "dissolve", &[Value::from("Ancient")]),
        "Dissolve an <b>Ancient</b>."
    );
    assert_eq!(
        render(&locale, "dissolve", &[Value::from("Warrior")]),
        "Dissolve a <b>Warrior</b>."
    );
}

#[test]
fn transforms_apply_right_to_left() {
    let locale = locale("en", ENGLISH);
    assert_eq!(eval(&locale, "{@cap @a event}", params! {}), "An event");
    assert_eq!(eval(&locale, "{@upper @a card}", params! {}), "A CARD");
}

#[test]
fn english_the_and_plural() {
    let locale = locale("en", ENGLISH);
    assert_eq!(eval(&locale, "{@the card}", params! {}), "the card");
    assert_eq!(eval(&locale, "{@plural card}", params! {}), "cards");
    assert_eq!(eval(&locale, "{@cap @the event}", params! {}), "The event");
}

#[test]
fn english_article_on_phrase_parameter() {
    let locale = locale("en", &format!("{ENGLISH} play($c) = \"Play {{@a $c}}.\";"));
    let event = locale.get_phrase("event").unwrap();
    assert_eq!(
        render(&locale, "play", &[Value::Phrase(event)]),
        "Play an event."
    );
}

#[test]
fn tag_reading_transform_rejects_plain_text() {
    let locale = locale("en", r#"play($c) = "Play {@a $c}.";"#);
    let err = locale.call_phrase("play", &[Value::from("card")]).unwrap_err();
    assert!(matches!(err, EvalError::NotAPhrase { kind: "string", .. }));
}

// =============================================================================
// German
// =============================================================================

const GERMAN: &str = r#"
    karte = :fem {
        nom, acc: "Karte",
        dat, gen: "Karte",
        nom.other, acc.other, gen.other: "Karten",
        dat.other: "Karten",
    };
    stein = :masc { nom, acc, dat: "Stein", gen: "Steins", nom.other, acc.other, gen.other: "Steine", dat.other: "Steinen" };
    schwert = :neut "Schwert";
"#;

#[test]
fn german_definite_article_by_gender_and_case() {
    let locale = locale("de", GERMAN);
    assert_eq!(eval(&locale, "{@der karte}", params! {}), "die Karte");
    assert_eq!(eval(&locale, "{@der:acc stein}", params! {}), "den Stein");
    assert_eq!(eval(&locale, "{@der:dat stein}", params! {}), "dem Stein");
    assert_eq!(eval(&locale, "{@der:gen stein}", params! {}), "des Steins");
    assert_eq!(eval(&locale, "{@das schwert}", params! {}), "das Schwert");
    assert_eq!(eval(&locale, "{@die:dat karte}", params! {}), "der Karte");
}

#[test]
fn german_plural_context_selects_noun_form() {
    let locale = locale("de", GERMAN);
    assert_eq!(
        eval(&locale, "{@der:dat.other stein}", params! {}),
        "den Steinen"
    );
    assert_eq!(
        eval(&locale, "{@der:nom.other karte}", params! {}),
        "die Karten"
    );
}

#[test]
fn german_indefinite_article() {
    let locale = locale("de", GERMAN);
    assert_eq!(eval(&locale, "{@ein:acc stein}", params! {}), "einen Stein");
    assert_eq!(
        eval(&locale, "{@eine:dat karte}", params! {}),
        "einer Karte"
    );
    assert_eq!(eval(&locale, "{@ein schwert}", params! {}), "ein Schwert");
    assert_eq!(
        eval(&locale, "{@ein:acc.other stein}", params! {}),
        "Steine"
    );
}

#[test]
fn german_transform_context_from_parameter() {
    let locale = locale(
        "de",
        &format!("{GERMAN} mit($case) = \"mit {{@der:$case stein}}\";"),
    );
    assert_eq!(
        render(&locale, "mit", &[Value::from("dat")]),
        "mit dem Stein"
    );
    assert_eq!(
        render(&locale, "mit", &[Value::from("gen")]),
        "mit des Steins"
    );
}

#[test]
fn selection_before_transform_keeps_tags() {
    let locale = locale("de", GERMAN);
    assert_eq!(
        eval(&locale, "{@der:acc karte:acc:other}", params! {}),
        "die Karten"
    );
}

// =============================================================================
// Romance languages
// =============================================================================

#[test]
fn spanish_articles() {
    let locale = locale(
        "es",
        r#"
        carta = :fem { one: "carta", other: "cartas" };
        enemigo = :masc { one: "enemigo", other: "enemigos" };
    "#,
    );
    assert_eq!(eval(&locale, "{@el carta}", params! {}), "la carta");
    assert_eq!(eval(&locale, "{@la enemigo}", params! {}), "el enemigo");
    assert_eq!(eval(&locale, "{@el:other carta}", params! {}), "las cartas");
    assert_eq!(eval(&locale, "{@un carta}", params! {}), "una carta");
    assert_eq!(
        eval(&locale, "{@una:other enemigo}", params! {}),
        "unos enemigos"
    );
}

#[test]
fn spanish_article_with_count_context() {
    let locale = locale(
        "es",
        r#"
        carta = :fem { one: "carta", other: "cartas" };
        robar($n) = "Roba {@el:$n carta}.";
    "#,
    );
    assert_eq!(
        render(&locale, "robar", &[Value::from(1)]),
        "Roba la carta."
    );
    assert_eq!(
        render(&locale, "robar", &[Value::from(3)]),
        "Roba las cartas."
    );
}

#[test]
fn portuguese_articles() {
    let locale = locale(
        "pt-BR",
        r#"
        carta = :fem { one: "carta", other: "cartas" };
        aliado = :masc "aliado";
    "#,
    );
    assert_eq!(eval(&locale, "{@o carta}", params! {}), "a carta");
    assert_eq!(eval(&locale, "{@a aliado}", params! {}), "o aliado");
    assert_eq!(eval(&locale, "{@um carta}", params! {}), "uma carta");
    assert_eq!(eval(&locale, "{@o:other carta}", params! {}), "as cartas");
}

#[test]
fn french_articles_with_elision() {
    let locale = locale(
        "fr",
        r#"
        carte = :fem { one: "carte", other: "cartes" };
        sort = :masc "sort";
        allie = :masc :vowel "allié";
    "#,
    );
    assert_eq!(eval(&locale, "{@le carte}", params! {}), "la carte");
    assert_eq!(eval(&locale, "{@le sort}", params! {}), "le sort");
    assert_eq!(eval(&locale, "{@le allie}", params! {}), "l'allié");
    assert_eq!(eval(&locale, "{@le:other carte}", params! {}), "les cartes");
    assert_eq!(eval(&locale, "{@un carte}", params! {}), "une carte");
    assert_eq!(
        eval(&locale, "{@une:other carte}", params! {}),
        "des cartes"
    );
}

#[test]
fn italian_articles() {
    let locale = locale(
        "it",
        r#"
        carta = :fem "carta";
        spada = :masc :s_imp "spada";
        amico = :masc :vowel { one: "amico", other: "amici" };
        libro = :masc "libro";
        amica = :fem :vowel "amica";
    "#,
    );
    assert_eq!(eval(&locale, "{@il carta}", params! {}), "la carta");
    assert_eq!(eval(&locale, "{@il spada}", params! {}), "lo spada");
    assert_eq!(eval(&locale, "{@il amico}", params! {}), "l'amico");
    assert_eq!(eval(&locale, "{@il:other amico}", params! {}), "gli amici");
    assert_eq!(eval(&locale, "{@il libro}", params! {}), "il libro");
    assert_eq!(eval(&locale, "{@un spada}", params! {}), "uno spada");
    assert_eq!(eval(&locale, "{@un amica}", params! {}), "un'amica");
}

// =============================================================================
// CJK
// =============================================================================

#[test]
fn chinese_classifier_count() {
    let locale = locale(
        "zh",
        r#"
        pai = :zhang "牌";
        draw($n) = "抽{@count:$n pai}";
    "#,
    );
    assert_eq!(render(&locale, "draw", &[Value::from(3)]), "抽3张牌");
}

#[test]
fn japanese_counter_follows_noun() {
    let locale = locale(
        "ja",
        r#"
        card = :mai "カード";
        draw($n) = "{@count:$n card}を引く";
    "#,
    );
    assert_eq!(render(&locale, "draw", &[Value::from(2)]), "カード2枚を引く");
}

#[test]
fn korean_count_and_particles() {
    let locale = locale(
        "ko",
        r#"
        card = :jang "카드";
        book = "책";
        draw($n) = "{@count:$n card} 뽑기";
        take = "{@particle:obj card} 가져가고 {@particle:topic book} 둔다";
    "#,
    );
    assert_eq!(render(&locale, "draw", &[Value::from(5)]), "카드 5장 뽑기");
    assert_eq!(render(&locale, "take", &[]), "카드를 가져가고 책은 둔다");
}

#[test]
fn korean_particle_attaches_inside_markup() {
    let locale = locale(
        "ko",
        r#"
        book = "<b>책</b>";
        card = "<b>카드</b>";
        take = "{@particle:obj book}, {@particle:obj card}";
    "#,
    );
    assert_eq!(render(&locale, "take", &[]), "<b>책을</b>, <b>카드를</b>");
}

#[test]
fn count_requires_numeric_context() {
    let locale = locale(
        "zh",
        r#"
        pai = :zhang "牌";
        bad($s) = "{@count:$s pai}";
    "#,
    );
    let err = locale.call_phrase("bad", &[Value::from("many")]).unwrap_err();
    assert!(matches!(err, EvalError::InvalidTransformContext { .. }));
}

// =============================================================================
// Turkish
// =============================================================================

#[test]
fn turkish_suffix_chains() {
    let locale = locale(
        "tr",
        r#"
        kitap = "kitap";
        ev = "ev";
        saat = :front "saat";
        line = "{@inflect:pl.abl kitap}, {@inflect:dat ev}, {@inflect:loc saat}";
    "#,
    );
    assert_eq!(render(&locale, "line", &[]), "kitaplardan, eve, saatte");
}

#[test]
fn turkish_suffix_attaches_inside_markup() {
    let locale = locale(
        "tr",
        r#"
        kitap = "<b>kitap</b>";
        line = "{@inflect:loc kitap} / {@inflect:acc kitap}";
    "#,
    );
    assert_eq!(
        render(&locale, "line", &[]),
        "<b>kitapta</b> / <b>kitabı</b>"
    );
}

#[test]
fn turkish_softening_respects_hard_tag() {
    let locale = locale(
        "tr",
        r#"
        kitap = "kitap";
        ahenk = "ahenk";
        saat = :front :hard "saat";
        line = "{@inflect:acc kitap}, {@inflect:acc ahenk}, {@inflect:acc saat}";
    "#,
    );
    assert_eq!(render(&locale, "line", &[]), "kitabı, ahengi, saati");
}

// =============================================================================
// Language scoping and errors
// =============================================================================

#[test]
fn language_specific_transform_is_unknown_elsewhere() {
    let locale = locale("en", r#"karte = :fem "Karte"; line = "{@der karte}";"#);
    let err = locale.call_phrase("line", &[]).unwrap_err();
    let EvalError::UnknownTransform {
        name, language, ..
    } = err
    else {
        panic!("expected UnknownTransform, got {err:?}");
    };
    assert_eq!(name, "der");
    assert_eq!(language, "en");
}

#[test]
fn unknown_transform_suggests_close_names() {
    let locale = locale("en", r#"card = "card"; line = "{@uper card}";"#);
    let err = locale.call_phrase("line", &[]).unwrap_err();
    let EvalError::UnknownTransform { suggestions, .. } = err else {
        panic!("expected UnknownTransform, got {err:?}");
    };
    assert!(suggestions.contains(&"upper".to_string()));
}

#[test]
fn regional_language_uses_base_transforms() {
    let locale = locale(
        "de-AT",
        r#"karte = :fem "Karte"; line = "{@der:acc karte}";"#,
    );
    assert_eq!(render(&locale, "line", &[]), "die Karte");
}

// =============================================================================
// Custom transforms
// =============================================================================

#[test]
fn custom_universal_transform() {
    let mut locale = locale("en", r#"card = "card"; line = "{@shout card}";"#);
    locale
        .transforms_mut()
        .register_universal("shout", |value: &Value, _: Option<&Value>, _: &str| {
            Ok(format!("{}!", value.to_string().to_uppercase()))
        });
    assert_eq!(render(&locale, "line", &[]), "CARD!");
}

#[test]
fn custom_transform_receives_context_and_tags() {
    let mut locale = locale(
        "en",
        r#"
        card = :rare "card";
        line($n) = "{@mark:$n card}";
    "#,
    );
    locale.transforms_mut().register(
        "en",
        "mark",
        |value: &Value, context: Option<&Value>, lang: &str| {
            let rare = if value.has_tag("rare") { "*" } else { "" };
            let n = context.and_then(Value::as_number).unwrap_or_default();
            Ok(format!("{rare}{value}x{n}@{lang}"))
        },
    );
    assert_eq!(render(&locale, "line", &[Value::from(3)]), "*cardx3@en");
}

#[test]
fn custom_language_transform_shadows_builtin() {
    let mut locale = locale("en", r#"card = :a "card"; line = "{@a card}";"#);
    locale
        .transforms_mut()
        .register("en", "a", |value: &Value, _: Option<&Value>, _: &str| {
            Ok(format!("one {value}"))
        });
    assert_eq!(render(&locale, "line", &[]), "one card");
}

#[test]
fn registry_call_uses_builtins_only() {
    let registry = PhraseRegistry::parse(r#"card = :a "card"; line = "{@cap @a card}";"#).unwrap();
    assert_eq!(
        registry.get_phrase("en", "line").unwrap().to_string(),
        "A card"
    );
}

// =============================================================================
// Direct execution
// =============================================================================

#[test]
fn builtin_resolution_and_execution() {
    let transforms = TransformRegistry::new();
    let der = transforms.get("die", "de").unwrap();
    assert_eq!(der, TransformKind::Builtin(TransformId::GermanDer));

    let karte = Phrase::builder()
        .text("Karte".to_string())
        .tags(vec![Tag::new("fem")])
        .build();
    let text = der
        .execute(&Value::Phrase(karte), Some(&Value::from("dat")), "de")
        .unwrap();
    assert_eq!(text, "der Karte");
}

#[test]
fn names_for_language_include_aliases() {
    let transforms = TransformRegistry::new();
    let names = transforms.names("es");
    for expected in ["cap", "el", "la", "un", "una"] {
        assert!(names.contains(&expected.to_string()), "missing {expected}");
    }
    assert!(!transforms.has_transform("der", "es"));
}
