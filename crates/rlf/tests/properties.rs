//! Property tests for evaluation invariants that must hold for every input.

use proptest::prelude::*;
use proptest::sample::select;
use rlf::{EvalError, Phrase, PhraseRegistry, Tag, Value, VariantKey, params};

const LANGUAGES: [&str; 8] = ["en", "ru", "pl", "fr", "ar", "ja", "de", "pt-BR"];

const CARDS: &str = r#"
    card = {
        zero: "cards (zero)",
        one: "card",
        two: "cards (two)",
        few: "cards (few)",
        many: "cards (many)",
        *other: "cards",
    };
    cards($n) = :match($n) {
        0: "no cards",
        1: "a card",
        *other: "{$n} {card:$n}",
    };
"#;

const PICK: &str = r#"
    pick($x) = :match($x) {
        0: "zero",
        1: "one",
        fast: "fast",
        fem: "fem",
        *other: "other",
    };
"#;

fn tagged(text: &str, tags: &[String], with_variants: bool) -> Phrase {
    let variants = if with_variants {
        [
            (VariantKey::new("one"), format!("{text} (one)")),
            (VariantKey::new("other"), format!("{text} (other)")),
        ]
        .into_iter()
        .collect()
    } else {
        Default::default()
    };
    Phrase::builder()
        .text(text.to_string())
        .variants(variants)
        .tags(tags.iter().map(Tag::new).collect())
        .build()
}

fn escape(text: &str) -> String {
    text.replace('{', "{{").replace('}', "}}")
}

proptest! {
    #[test]
    fn evaluation_is_deterministic(
        lang in select(LANGUAGES.to_vec()),
        n in -1_000_000_i64..1_000_000,
    ) {
        let registry = PhraseRegistry::parse(CARDS).unwrap();
        let first = registry.call_phrase(lang, "cards", &[Value::from(n)]).unwrap();
        let second = registry.call_phrase(lang, "cards", &[Value::from(n)]).unwrap();
        prop_assert_eq!(&first, &second);
        prop_assert_eq!(first.render(), first.render());
    }

    #[test]
    fn doubled_braces_render_as_single_braces(text in "[a-zA-Z0-9 .,!?$:@{}<>/-]{0,40}") {
        let registry = PhraseRegistry::parse("").unwrap();
        let rendered = registry.eval_str("en", &escape(&text), params! {}).unwrap();
        prop_assert_eq!(rendered.to_string(), text);
    }

    #[test]
    fn unmatched_numbers_fall_to_default(
        lang in select(LANGUAGES.to_vec()),
        n in -1_000_000_i64..1_000_000,
    ) {
        let registry = PhraseRegistry::parse(PICK).unwrap();
        let result = registry.call_phrase(lang, "pick", &[Value::from(n)]).unwrap();
        if n != 0 && n != 1 {
            prop_assert_eq!(result.to_string(), "other");
        }
    }

    #[test]
    fn any_text_resolves_a_branch(lang in select(LANGUAGES.to_vec()), text in "\\PC{0,12}") {
        let registry = PhraseRegistry::parse(PICK).unwrap();
        prop_assert!(registry.call_phrase(lang, "pick", &[Value::from(text)]).is_ok());
    }

    #[test]
    fn any_tag_set_resolves_a_branch(tags in prop::collection::vec("[a-z]{1,6}", 0..4)) {
        let registry = PhraseRegistry::parse(PICK).unwrap();
        let result = registry
            .call_phrase("fr", "pick", &[Value::from(tagged("x", &tags, false))])
            .unwrap();
        // The first declared tag branch wins.
        let expected = ["fast", "fem"]
            .into_iter()
            .find(|branch| tags.iter().any(|tag| tag == branch))
            .unwrap_or("other");
        prop_assert_eq!(result.to_string(), expected);
    }

    #[test]
    fn from_copies_tags_exactly(
        tags in prop::collection::vec("[a-z]{1,8}", 0..5),
        with_variants in any::<bool>(),
    ) {
        let registry = PhraseRegistry::parse(r#"wrap($s) = :from($s) "<{$s}>";"#).unwrap();
        let source = tagged("word", &tags, with_variants);
        let result = registry
            .call_phrase("en", "wrap", &[Value::from(source.clone())])
            .unwrap();
        prop_assert_eq!(&result.tags, &source.tags);
        prop_assert_eq!(result.variants.len(), source.variants.len());
    }

    #[test]
    fn wrong_argument_count_is_rejected(arity in 0_usize..4, given in 0_usize..6) {
        prop_assume!(arity != given);
        let source = if arity == 0 {
            r#"p = "x";"#.to_string()
        } else {
            let params: Vec<String> = (0..arity).map(|i| format!("$a{i}")).collect();
            format!(r#"p({}) = "x";"#, params.join(", "))
        };
        let registry = PhraseRegistry::parse(&source).unwrap();
        let args: Vec<Value> = (0..given).map(Value::from).collect();
        prop_assert_eq!(
            registry.call_phrase("en", "p", &args).unwrap_err(),
            EvalError::ArgumentCount {
                phrase: "p".to_string(),
                expected: arity,
                got: given,
            }
        );
    }
}
