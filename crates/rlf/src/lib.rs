//! RLF: named, parameterized phrases evaluated per language into text that
//! carries its grammatical tags and variant forms.
//!
//! Calling code asks for the same phrase with the same arguments in every
//! language; articles, case, plural forms, classifiers, and suffixes are
//! decided by each language's definitions.
//!
//! ```
//! use rlf::{Locale, Value};
//!
//! let mut locale = Locale::with_language("de");
//! locale.load_translations_str("de", r#"
//!     karte = :fem { nom, acc: "Karte", nom.other, acc.other: "Karten" };
//!     ziehen($n) = :match($n) {
//!         1: "Ziehe {@ein:acc karte}.",
//!         *other: "Ziehe {$n} {karte:acc:other}.",
//!     };
//! "#).unwrap();
//!
//! let one = locale.call_phrase("ziehen", &[Value::from(1)]).unwrap();
//! assert_eq!(one.to_string(), "Ziehe eine Karte.");
//! let three = locale.call_phrase("ziehen", &[Value::from(3)]).unwrap();
//! assert_eq!(three.to_string(), "Ziehe 3 Karten.");
//! ```

pub mod global;
pub mod interpreter;
pub mod parser;
pub mod types;

pub use interpreter::{
    DefinitionError, EvalContext, EvalError, LoadError, LoadWarning, Locale, PhraseRegistry,
    TransformRegistry, compute_suggestions,
};
pub use parser::ParseError;
pub use types::{Phrase, PhraseId, Tag, Value, VariantKey};

/// Creates a `HashMap<String, Value>` from key-value pairs.
///
/// Values are automatically converted via `Into<Value>`, so you can pass
/// integers, strings, or `Phrase` values directly.
///
/// # Example
///
/// ```
/// use rlf::{params, Value};
///
/// let p = params! { "count" => 3, "name" => "Alice" };
/// assert_eq!(p.len(), 2);
/// assert_eq!(p["count"].as_number(), Some(3));
/// assert_eq!(p["name"].as_string(), Some("Alice"));
/// ```
#[macro_export]
macro_rules! params {
    {} => {
        ::std::collections::HashMap::<String, $crate::Value>::new()
    };
    { $($key:expr => $value:expr),+ $(,)? } => {
        {
            let mut map = ::std::collections::HashMap::<String, $crate::Value>::new();
            $(
                map.insert($key.to_string(), ::std::convert::Into::<$crate::Value>::into($value));
            )+
            map
        }
    };
}
