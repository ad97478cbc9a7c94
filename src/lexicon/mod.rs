//! Static lexical resources
//!
//! Frequency tiers for rarity ranking and the idiom table used for exact
//! phrase matching. Both are read-only after construction.

pub mod idioms;
pub mod tiers;

pub use idioms::IdiomLexicon;
pub use tiers::{classify, is_phrase_distinctive, is_pattern_head_common, LexicalTier};
