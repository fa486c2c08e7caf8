use rlf::{Phrase, PhraseRegistry, Tag, Value, params};

#[test]
fn empty_params() {
    assert!(params! {}.is_empty());
}

#[test]
fn mixed_value_kinds() {
    let p = params! {
        "count" => 3,
        "name" => "Bob",
        "owned" => String::from("Charlie"),
        "negative" => -7,
    };
    assert_eq!(p.len(), 4);
    assert_eq!(p["count"].as_number(), Some(3));
    assert_eq!(p["name"].as_string(), Some("Bob"));
    assert_eq!(p["owned"].as_string(), Some("Charlie"));
    assert_eq!(p["negative"].as_number(), Some(-7));
}

#[test]
fn integer_widths_become_numbers() {
    let p = params! {
        "i32" => 10_i32,
        "i64" => 20_i64,
        "u32" => 30_u32,
        "u64" => 40_u64,
        "usize" => 50_usize,
        "big" => u64::MAX
    };
    let numbers: Vec<Option<i64>> = ["i32", "i64", "u32", "u64", "usize", "big"]
        .iter()
        .map(|key| p[*key].as_number())
        .collect();
    assert_eq!(
        numbers,
        [Some(10), Some(20), Some(30), Some(40), Some(50), Some(i64::MAX)]
    );
}

#[test]
fn phrases_keep_their_tags() {
    let sword = Phrase::builder()
        .text("espada".to_string())
        .tags(vec![Tag::new("fem")])
        .build();
    let p = params! { "weapon" => sword, "raw" => Value::Number(99) };
    assert!(p["weapon"].has_tag("fem"));
    assert_eq!(p["weapon"].to_string(), "espada");
    assert_eq!(p["raw"], Value::Number(99));
}

#[test]
fn keys_and_values_may_be_expressions() {
    let key = "dynamic_key";
    let p = params! { key => 2 + 5, format!("slot_{}", 1) => "x" };
    assert_eq!(p["dynamic_key"].as_number(), Some(7));
    assert_eq!(p["slot_1"].as_string(), Some("x"));
}

#[test]
fn params_feed_ad_hoc_templates() {
    let registry = PhraseRegistry::parse(r#"card = { one: "card", *other: "cards" };"#).unwrap();
    let phrase = registry
        .eval_str("en", "{$who} drew {$n} {card:$n}", params! { "who" => "Ana", "n" => 2 })
        .unwrap();
    assert_eq!(phrase.to_string(), "Ana drew 2 cards");
}
