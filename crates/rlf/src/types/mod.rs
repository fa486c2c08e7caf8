mod phrase;
mod phrase_id;
mod tag;
mod value;
mod variant_key;

pub use phrase::Phrase;
pub use phrase_id::PhraseId;
pub use tag::Tag;
pub use value::Value;
pub use variant_key::{VariantKey, VariantLookup, resolve_variant};
