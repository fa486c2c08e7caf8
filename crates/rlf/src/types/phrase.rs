use std::collections::{BTreeSet, HashMap};
use std::fmt::{Display, Formatter, Result as FmtResult};

use bon::Builder;

use super::{Tag, VariantKey, VariantLookup, resolve_variant};

/// The value produced by evaluating a definition.
///
/// A phrase is immutable once built. It carries:
/// - the default rendered text
/// - an open variant table, so a consumer can still pick a grammatical form
///   (`{$card:acc:few}`) after the phrase was passed along as an argument
/// - the tag set of the definition it came from (or, for `:from`, of the
///   phrase it inherited from)
///
/// # Example
///
/// ```
/// use rlf::{Phrase, VariantKey, Tag};
/// use std::collections::HashMap;
///
/// let card = Phrase::builder()
///     .text("card".to_string())
///     .variants(HashMap::from([
///         (VariantKey::new("one"), "card".to_string()),
///         (VariantKey::new("other"), "cards".to_string()),
///     ]))
///     .tags(vec![Tag::new("a")])
///     .build();
///
/// assert_eq!(card.render(), "card");
/// assert_eq!(card.variant("other"), Some("cards"));
/// assert!(card.has_tag("a"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Builder)]
pub struct Phrase {
    /// Default text when the phrase is displayed.
    #[builder(default)]
    pub text: String,

    /// Materialized variant table, keyed by dot-separated dimension values.
    #[builder(default)]
    pub variants: HashMap<VariantKey, String>,

    /// Tags in declaration order.
    #[builder(default)]
    pub tags: Vec<Tag>,
}

impl Phrase {
    /// Returns an empty phrase with no text, variants, or tags.
    pub fn empty() -> Phrase {
        Phrase::default()
    }

    /// Final text for display.
    pub fn render(&self) -> String {
        self.text.clone()
    }

    /// Transforms this phrase's text using `f`, preserving tags and variants.
    pub fn map_text(self, f: impl FnOnce(String) -> String) -> Phrase {
        Phrase::builder()
            .text(f(self.text))
            .variants(self.variants)
            .tags(self.tags)
            .build()
    }

    /// A copy whose default text is `text`, keeping tags and the variant table.
    pub fn narrowed(&self, text: impl Into<String>) -> Phrase {
        Phrase::builder()
            .text(text.into())
            .variants(self.variants.clone())
            .tags(self.tags.clone())
            .build()
    }

    /// Resolve a variant by maximal specificity.
    ///
    /// Returns `None` when no entry applies or when equally specific entries
    /// disagree. Use [`Phrase::lookup`] to tell those cases apart.
    ///
    /// ```
    /// use rlf::{Phrase, VariantKey};
    /// use std::collections::HashMap;
    ///
    /// let card = Phrase::builder()
    ///     .text("card".to_string())
    ///     .variants(HashMap::from([
    ///         (VariantKey::new("nom"), "card".to_string()),
    ///         (VariantKey::new("nom.other"), "cards".to_string()),
    ///     ]))
    ///     .build();
    ///
    /// assert_eq!(card.variant("nom.other"), Some("cards"));
    /// // `nom` covers every number not listed more specifically
    /// assert_eq!(card.variant("nom.one"), Some("card"));
    /// assert_eq!(card.variant("acc.one"), None);
    /// ```
    pub fn variant(&self, key: &str) -> Option<&str> {
        match self.lookup(&VariantKey::new(key)) {
            VariantLookup::Found(_, text) => Some(text),
            VariantLookup::Missing | VariantLookup::Ambiguous(..) => None,
        }
    }

    /// Resolve a variant, reporting why resolution failed.
    pub fn lookup(&self, key: &VariantKey) -> VariantLookup<'_, String> {
        resolve_variant(&self.variants, key)
    }

    /// Check if this phrase has a specific tag.
    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t.as_str() == tag)
    }

    /// Get the first tag, if any.
    pub fn first_tag(&self) -> Option<&Tag> {
        self.tags.first()
    }

    /// Variant keys in sorted order.
    pub fn variant_keys(&self) -> Vec<&VariantKey> {
        let mut keys: Vec<&VariantKey> = self.variants.keys().collect();
        keys.sort();
        keys
    }

    /// Joins multiple phrases with a separator string.
    ///
    /// Default texts are joined with `separator`. A variant key survives only
    /// if every input phrase has it, in which case those variant texts are
    /// joined too. Tags are not preserved: a list has no single gender.
    pub fn join(phrases: &[Phrase], separator: &str) -> Phrase {
        let Some((first, rest)) = phrases.split_first() else {
            return Phrase::empty();
        };

        let text = phrases
            .iter()
            .map(|p| p.text.as_str())
            .collect::<Vec<_>>()
            .join(separator);

        let shared_keys: BTreeSet<&VariantKey> = first
            .variants
            .keys()
            .filter(|k| rest.iter().all(|q| q.variants.contains_key(*k)))
            .collect();

        let variants = shared_keys
            .into_iter()
            .map(|key| {
                let joined = phrases
                    .iter()
                    .map(|p| p.variants[key].as_str())
                    .collect::<Vec<_>>()
                    .join(separator);
                (key.clone(), joined)
            })
            .collect();

        Phrase::builder().text(text).variants(variants).build()
    }
}

impl Display for Phrase {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(&self.text)
    }
}

impl From<Phrase> for String {
    fn from(phrase: Phrase) -> Self {
        phrase.text
    }
}
