//! CLDR plural category resolution.
//!
//! English has "one" and "other", Russian "one", "few", "many" and "other",
//! and Arabic uses all six categories. Rules are cached per thread per
//! language tag, built lazily on first use within each thread.

use std::cell::RefCell;
use std::fmt::{Display, Formatter, Result as FmtResult};

use icu_locale_core::{Locale as IcuLocale, locale};
use icu_plurals::{PluralCategory as IcuCategory, PluralRuleType, PluralRules};

/// A CLDR plural category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum PluralCategory {
    Zero,
    One,
    Two,
    Few,
    Many,
    Other,
}

impl PluralCategory {
    pub const ALL: [PluralCategory; 6] = [
        PluralCategory::Zero,
        PluralCategory::One,
        PluralCategory::Two,
        PluralCategory::Few,
        PluralCategory::Many,
        PluralCategory::Other,
    ];

    /// The category name used in variant keys and `:match` branches.
    pub fn as_str(self) -> &'static str {
        match self {
            PluralCategory::Zero => "zero",
            PluralCategory::One => "one",
            PluralCategory::Two => "two",
            PluralCategory::Few => "few",
            PluralCategory::Many => "many",
            PluralCategory::Other => "other",
        }
    }

    /// Parse a category name.
    pub fn from_name(name: &str) -> Option<PluralCategory> {
        PluralCategory::ALL
            .into_iter()
            .find(|category| category.as_str() == name)
    }
}

impl Display for PluralCategory {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(self.as_str())
    }
}

impl From<IcuCategory> for PluralCategory {
    fn from(category: IcuCategory) -> Self {
        match category {
            IcuCategory::Zero => PluralCategory::Zero,
            IcuCategory::One => PluralCategory::One,
            IcuCategory::Two => PluralCategory::Two,
            IcuCategory::Few => PluralCategory::Few,
            IcuCategory::Many => PluralCategory::Many,
            IcuCategory::Other => PluralCategory::Other,
        }
    }
}

thread_local! {
    /// Per-thread rules keyed by language tag. `None` records a tag that has
    /// no usable rules so it is not retried.
    static PLURAL_RULES_CACHE: RefCell<Vec<(String, Option<PluralRules>)>> =
        const { RefCell::new(Vec::new()) };
}

fn build_rules(lang: &str) -> Option<PluralRules> {
    let normalized = lang.replace('_', "-");
    let loc = IcuLocale::try_from_str(&normalized).unwrap_or(locale!("en"));
    PluralRules::try_new(loc.into(), PluralRuleType::Cardinal.into()).ok()
}

/// Rule used when no CLDR data is available for a language.
fn fallback_category(n: i64) -> PluralCategory {
    if n == 1 {
        PluralCategory::One
    } else {
        PluralCategory::Other
    }
}

/// CLDR plural category of `n` in `lang`.
///
/// Unparseable language tags use English rules.
///
/// ```
/// use rlf::interpreter::{PluralCategory, category};
///
/// assert_eq!(category("en", 1), PluralCategory::One);
/// assert_eq!(category("ru", 3), PluralCategory::Few);
/// assert_eq!(category("ru", 11), PluralCategory::Many);
/// ```
pub fn category(lang: &str, n: i64) -> PluralCategory {
    PLURAL_RULES_CACHE.with_borrow_mut(|cache| {
        let index = match cache.iter().position(|(code, _)| code == lang) {
            Some(index) => index,
            None => {
                cache.push((lang.to_string(), build_rules(lang)));
                cache.len() - 1
            }
        };
        match &cache[index].1 {
            Some(rules) => rules.category_for(n).into(),
            None => fallback_category(n),
        }
    })
}

/// Name of the CLDR plural category of `n` in `lang`.
///
/// ```
/// use rlf::interpreter::plural_category;
///
/// assert_eq!(plural_category("en", 1), "one");
/// assert_eq!(plural_category("en", 2), "other");
/// assert_eq!(plural_category("ru", 2), "few");
/// assert_eq!(plural_category("ru", 5), "many");
/// ```
pub fn plural_category(lang: &str, n: i64) -> &'static str {
    category(lang, n).as_str()
}
