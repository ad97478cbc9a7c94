//! Idiom lexicon
//!
//! Idioms are stored as normalized-form keys, the same shape the n-gram
//! generator emits: lemmas, `SB`/`NUM` placeholders, and no determiners or
//! auxiliaries (those never reach the token stream). Lookup is exact.

use rustc_hash::FxHashSet;

/// Built-in idioms, in normalized form
pub const BUILTIN_IDIOMS: &[&str] = &[
    "double down",
    "bite bullet",
    "break ice",
    "piece of cake",
    "under weather",
    "spill bean",
    "cost arm and leg",
    "hit nail on head",
    "hit sack",
    "call SB out",
    "pull SB leg",
    "let cat out of bag",
    "once in blue moon",
    "beat around bush",
    "cut corner",
    "get out of hand",
    "hang in there",
    "miss boat",
    "on ball",
    "on same page",
    "back to drawing board",
    "bottom line",
    "at end of day",
    "in long run",
    "by and large",
    "for SB worth",
    "last straw",
    "move goalpost",
    "jump ship",
    "jump gun",
    "kick can down road",
    "throw SB under bus",
    "elephant in room",
    "low hanging fruit",
    "game changer",
    "big picture",
    "silver lining",
    "tip of iceberg",
    "wake up call",
    "dead end",
    "turn blind eye",
    "keep eye on ball",
    "go extra mile",
    "push envelope",
    "think outside box",
    "step up to plate",
    "level playing field",
    "take with grain of salt",
    "let SB clear",
    "truth of matter",
    "heart of matter",
    "frankly speak",
    "mark SB word",
    "from get go",
    "across board",
    "run gamut",
    "sit tight",
    "play SB card",
    "rock boat",
    "skin in game",
    "ballpark figure",
    "red tape",
    "fly off handle",
    "at drop of hat",
    "under fire",
    "up in air",
    "in hot water",
    "on thin ice",
    "so to speak",
    "believe SB or not",
    "long story short",
    "by way",
    "by same token",
    "as matter of fact",
    "at least",
    "in nutshell",
    "hand down",
    "hit ground running",
    "touch base",
    "circle back",
    "drop ball",
    "hold SB horse",
    "water under bridge",
];

/// A set of known idioms, membership-tested exactly on normalized keys
#[derive(Debug, Clone)]
pub struct IdiomLexicon {
    phrases: FxHashSet<String>,
}

impl Default for IdiomLexicon {
    fn default() -> Self {
        Self::builtin()
    }
}

impl IdiomLexicon {
    /// The built-in English idiom table
    pub fn builtin() -> Self {
        Self::from_phrases(BUILTIN_IDIOMS.iter().copied())
    }

    /// A lexicon from custom phrases
    ///
    /// Whitespace is collapsed; placeholder casing (`SB`, `NUM`) is kept and
    /// every other word is lowercased.
    pub fn from_phrases<I, S>(phrases: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let phrases = phrases
            .into_iter()
            .map(|p| canonical_key(p.as_ref()))
            .filter(|p| !p.is_empty())
            .collect();
        Self { phrases }
    }

    pub fn empty() -> Self {
        Self {
            phrases: FxHashSet::default(),
        }
    }

    pub fn insert(&mut self, phrase: &str) {
        let key = canonical_key(phrase);
        if !key.is_empty() {
            self.phrases.insert(key);
        }
    }

    /// Exact lookup of an n-gram key
    pub fn contains(&self, key: &str) -> bool {
        self.phrases.contains(key)
    }

    pub fn len(&self) -> usize {
        self.phrases.len()
    }

    pub fn is_empty(&self) -> bool {
        self.phrases.is_empty()
    }

    /// Longest idiom length in words
    pub fn max_words(&self) -> usize {
        self.phrases
            .iter()
            .map(|p| p.split(' ').count())
            .max()
            .unwrap_or(0)
    }
}

fn canonical_key(phrase: &str) -> String {
    phrase
        .split_whitespace()
        .map(|w| match w {
            "SB" | "NUM" => w.to_string(),
            _ => w.to_lowercase(),
        })
        .collect::<Vec<_>>()
        .join(" ")
}
