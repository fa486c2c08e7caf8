use std::fmt::{Display, Formatter, Result as FmtResult};

use const_fnv1a_hash::fnv1a_hash_str_64;
use serde::{Deserialize, Serialize};

/// A compact, serializable handle for a definition name.
///
/// Wraps the 64-bit FNV-1a hash of the name, so the same name yields the same
/// id in every locale and every build. Game data can store ids instead of
/// strings and evaluate them later with `Locale::evaluate_by_id`.
///
/// ```
/// use rlf::PhraseId;
///
/// const CARD_ID: PhraseId = PhraseId::from_name("card");
/// assert_eq!(CARD_ID, PhraseId::from_name("card"));
/// assert_ne!(CARD_ID, PhraseId::from_name("cards"));
/// ```
#[derive(Copy, Clone, Debug, Hash, Eq, PartialEq, Serialize, Deserialize)]
pub struct PhraseId(u64);

impl PhraseId {
    /// Hash a definition name. Usable in `const` items.
    pub const fn from_name(name: &str) -> Self {
        Self(fnv1a_hash_str_64(name))
    }

    pub const fn from_u64(raw: u64) -> Self {
        Self(raw)
    }

    pub fn as_u64(&self) -> u64 {
        self.0
    }
}

impl Display for PhraseId {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "PhraseId({:016x})", self.0)
    }
}
