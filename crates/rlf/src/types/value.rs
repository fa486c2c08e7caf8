use std::fmt::{Display, Formatter, Result as FmtResult};

use super::Phrase;

/// An argument bound to a phrase parameter.
///
/// Only phrases carry tags and variant tables. Anything grammar may need to
/// agree with (a counted noun, a referent) must be passed as a `Phrase`, never
/// as pre-rendered text.
///
/// # Example
///
/// ```
/// use rlf::{Value, Phrase};
///
/// let count: Value = 42.into();
/// let name: Value = "Alice".into();
/// let phrase: Value = Phrase::builder().text("card".to_string()).build().into();
///
/// assert_eq!(count.as_number(), Some(42));
/// assert_eq!(name.as_string(), Some("Alice"));
/// assert!(phrase.as_phrase().is_some());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Value {
    /// An integer (drives literal and plural-category selection).
    Number(i64),

    /// Plain text, carrying no tags.
    String(String),

    /// A phrase with its tags and variants.
    Phrase(Phrase),
}

impl Value {
    pub fn as_number(&self) -> Option<i64> {
        match self {
            Value::Number(n) => Some(*n),
            Value::String(_) | Value::Phrase(_) => None,
        }
    }

    pub fn as_string(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            Value::Number(_) | Value::Phrase(_) => None,
        }
    }

    pub fn as_phrase(&self) -> Option<&Phrase> {
        match self {
            Value::Phrase(p) => Some(p),
            Value::Number(_) | Value::String(_) => None,
        }
    }

    /// Check if this value (as a phrase) has a specific tag.
    pub fn has_tag(&self, tag: &str) -> bool {
        self.as_phrase().is_some_and(|p| p.has_tag(tag))
    }

    /// Short name of the value's kind, for error messages.
    pub fn kind(&self) -> &'static str {
        match self {
            Value::Number(_) => "number",
            Value::String(_) => "string",
            Value::Phrase(_) => "phrase",
        }
    }
}

impl Display for Value {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            Value::Number(n) => write!(f, "{n}"),
            Value::String(s) => f.write_str(s),
            Value::Phrase(p) => write!(f, "{p}"),
        }
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Value::Number(i64::from(n))
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Number(n)
    }
}

impl From<u32> for Value {
    fn from(n: u32) -> Self {
        Value::Number(i64::from(n))
    }
}

impl From<u64> for Value {
    fn from(n: u64) -> Self {
        Value::Number(i64::try_from(n).unwrap_or(i64::MAX))
    }
}

impl From<usize> for Value {
    fn from(n: usize) -> Self {
        Value::Number(i64::try_from(n).unwrap_or(i64::MAX))
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<Phrase> for Value {
    fn from(p: Phrase) -> Self {
        Value::Phrase(p)
    }
}
