//! Lexical tier classification
//!
//! Two static tiers of high-frequency English lemmas, drawn from the top
//! content words of general-English frequency lists. Anything outside both
//! tiers is rare, and rare words are what make a speaker sound like themselves.

use std::sync::OnceLock;

use rustc_hash::FxHashSet;
use serde::{Serialize, Serializer};

/// Commonness of a lemma in general English
///
/// Serialized as its integer value (0, 1, 2).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum LexicalTier {
    Common = 0,
    Moderate = 1,
    Rare = 2,
}

impl LexicalTier {
    pub fn as_u8(self) -> u8 {
        self as u8
    }
}

impl Serialize for LexicalTier {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u8(self.as_u8())
    }
}

/// Very frequent lemmas: generic verbs, nouns, adjectives, adverbs, and the
/// particles that make generic phrasal verbs ("go on", "try to").
pub const COMMON_LEMMAS: &[&str] = &[
    "go", "get", "think", "know", "say", "make", "take", "want", "see", "come", "use", "find",
    "give", "tell", "work", "call", "try", "ask", "need", "feel", "become", "leave", "put",
    "mean", "keep", "let", "begin", "seem", "help", "show", "hear", "play", "run", "move",
    "live", "believe", "bring", "happen", "write", "sit", "stand", "lose", "pay", "meet",
    "include", "continue", "set", "learn", "change", "lead", "understand", "watch", "follow",
    "stop", "create", "speak", "read", "allow", "add", "spend", "grow", "open", "walk", "win",
    "offer", "remember", "love", "consider", "appear", "buy", "wait", "serve", "die", "send",
    "expect", "build", "stay", "fall", "cut", "reach", "kill", "remain", "suggest", "raise",
    "pass", "sell", "require", "report", "decide", "pull", "break", "support", "hold", "turn",
    "start", "might", "must", "people", "thing", "time", "way", "year", "man", "day", "world",
    "life", "hand", "part", "child", "eye", "woman", "place", "week", "case", "point",
    "government", "company", "number", "group", "problem", "fact", "area", "water", "room",
    "money", "story", "lot", "program", "system", "car", "night", "school", "state", "family",
    "president", "country", "body", "house", "service", "party", "head", "level", "office",
    "door", "health", "person", "art", "war", "history", "result", "morning", "reason",
    "research", "girl", "guy", "book", "end", "member", "law", "face", "street", "community",
    "name", "team", "minute", "idea", "kid", "back", "parent", "rest", "power", "side",
    "moment", "table", "teacher", "father", "center", "ground", "policy", "force", "music",
    "role", "kitchen", "sport", "board", "action", "interest", "effect", "class", "industry",
    "rate", "type", "process", "job", "society", "food", "director", "bill", "model", "project",
    "court", "account", "sort", "issue", "line", "form", "term", "right", "development",
    "value", "market", "experience", "voice", "order", "bank", "tax", "education", "management",
    "care", "activity", "couple", "amount", "staff", "condition", "question", "difference",
    "kind", "others", "good", "new", "first", "last", "long", "great", "little", "own", "other",
    "old", "big", "high", "different", "small", "large", "next", "early", "young", "important",
    "few", "public", "bad", "same", "able", "real", "sure", "clear", "possible", "whole",
    "certain", "likely", "social", "political", "national", "economic", "general", "local",
    "international", "special", "hard", "fine", "simple", "single", "free", "full", "best",
    "true", "easy", "strong", "available", "recent", "particular", "common", "personal",
    "major", "natural", "significant", "serious", "ready", "necessary", "main", "basic",
    "central", "current", "total", "private", "wrong", "happy", "successful", "effective",
    "traditional", "medical", "final", "positive", "physical", "financial", "environmental",
    "popular", "nice", "pretty", "really", "quite", "actually", "probably", "maybe", "already",
    "always", "often", "sometimes", "usually", "almost", "especially", "rather", "exactly",
    "certainly", "obviously", "basically", "literally", "on", "in", "out", "up", "down", "off",
    "over", "about", "around", "through", "away", "to", "for", "with", "at", "by", "from", "of",
    "as",];

/// Fairly common lemmas, ranked below rare ones. Disjoint from [`COMMON_LEMMAS`].
pub const MODERATE_LEMMAS: &[&str] = &[
    "agree", "answer", "apply", "argue", "arrive", "assume", "avoid", "base", "beat", "benefit",
    "claim", "close", "compare", "concern", "contact", "contain", "cover", "deal", "demand",
    "depend", "describe", "design", "determine", "develop", "discuss", "draw", "drive", "eat",
    "encourage", "enjoy", "enter", "exist", "express", "fail", "fill", "fit", "focus", "forget",
    "gain", "guess", "handle", "hang", "hope", "identify", "imagine", "improve", "increase",
    "indicate", "involve", "join", "judge", "lack", "limit", "list", "manage", "mark", "matter",
    "mind", "note", "notice", "obtain", "occur", "perform", "pick", "plan", "prepare",
    "present", "prevent", "produce", "prove", "provide", "publish", "push", "realize",
    "receive", "recognize", "reduce", "refer", "reflect", "refuse", "regard", "relate",
    "release", "remove", "replace", "represent", "request", "respond", "return", "reveal",
    "review", "rule", "share", "sign", "solve", "sound", "spread", "stick", "study", "succeed",
    "suffer", "supply", "suppose", "train", "treat", "trust", "visit", "vote", "wish", "accept",
    "address", "affect", "afford", "aim", "announce", "apologize", "approve", "attend",
    "attract", "average", "award", "balance", "band", "basis", "battle", "behavior", "belief",
    "birth", "bit", "block", "border", "brain", "branch", "budget", "burn", "bus", "cabinet",
    "camp", "campaign", "capital", "capture", "cell", "chain", "challenge", "channel",
    "chapter", "charge", "choice", "client", "club", "column", "comment", "commission",
    "competition", "complaint", "complex", "concept", "conclusion", "confidence", "connection",
    "consequence", "construction", "context", "contract", "contrast", "contribution",
    "conversation", "cookie", "copy", "cost", "count", "course", "culture", "curve", "data",
    "date", "debate", "decision", "definition", "desire", "detail", "difficulty", "discussion",
    "distance", "district", "document", "dream", "duty", "economy", "editor", "effort",
    "element", "emotion", "emphasis", "employee", "employer", "energy", "engine", "entry",
    "environment", "episode", "event", "evidence", "example", "exchange", "exercise",
    "expansion", "expert", "expression", "extent", "factor", "failure", "feature", "field",
    "figure", "film", "finger", "flight", "frame", "freedom", "friend", "front", "function",
    "fund", "future", "game", "gap", "generation", "glass", "goal", "god", "growth", "guide",
    "habit", "half", "impact", "importance", "impression", "improvement", "incident", "income",
    "influence", "information", "injury", "instance", "instruction", "insurance",
    "intelligence", "intention", "interview", "introduction", "item", "key", "knowledge", "lab",
    "land", "language", "layer", "leader", "length", "link", "loss", "machine", "magazine",
    "majority", "manner", "map", "mass", "material", "meaning", "measure", "media", "medium",
    "method", "middle", "minority", "mix", "mode", "month", "mouth", "movement", "nature",
    "network", "news", "noise", "object", "opportunity", "option", "organization", "output",
    "owner", "page", "pain", "painting", "pair", "panel", "paper", "participant", "partner",
    "path", "patient", "pattern", "payment", "peace", "period", "piece", "plane", "plant",
    "plate", "player", "pleasure", "position", "practice", "pressure", "price", "priority",
    "prize", "procedure", "product", "profit", "progress", "promise", "proof", "property",
    "proposal", "protection", "purpose", "quality", "quantity", "quarter", "range", "ratio",
    "record", "region", "relation", "relationship", "reply", "response", "responsibility",
    "risk", "safety", "sample", "scale", "scene", "schedule", "scheme", "scope", "score",
    "screen", "section", "sector", "sense", "series", "session", "setting", "shift", "shock",
    "signal", "skill", "solution", "source", "space", "stage", "standard", "statement", "step",
    "stock", "store", "strategy", "stress", "structure", "style", "subject", "success",
    "survey", "target", "task", "taste", "technology", "temperature", "theme", "thought", "tip",
    "title", "tool", "topic", "town", "trade", "tradition", "transfer", "transition", "truth",
    "unit", "user", "version", "video", "view", "village", "weight", "wife", "wind", "wing",
    "winner", "witness", "worker", "works", "writer",];

fn common_set() -> &'static FxHashSet<&'static str> {
    static SET: OnceLock<FxHashSet<&'static str>> = OnceLock::new();
    SET.get_or_init(|| COMMON_LEMMAS.iter().copied().collect())
}

fn moderate_set() -> &'static FxHashSet<&'static str> {
    static SET: OnceLock<FxHashSet<&'static str>> = OnceLock::new();
    SET.get_or_init(|| MODERATE_LEMMAS.iter().copied().collect())
}

/// Classify a lemma or single word. Blank input is common.
pub fn classify(lemma: &str) -> LexicalTier {
    let word = lemma.trim().to_lowercase();
    if word.is_empty() || common_set().contains(word.as_str()) {
        LexicalTier::Common
    } else if moderate_set().contains(word.as_str()) {
        LexicalTier::Moderate
    } else {
        LexicalTier::Rare
    }
}

/// Whether a lemma is in the common tier (blank counts as common)
pub fn is_common(lemma: &str) -> bool {
    classify(lemma) == LexicalTier::Common
}

/// True iff at least one whitespace-separated word is outside the common tier
pub fn is_phrase_distinctive(phrase: &str) -> bool {
    phrase
        .split_whitespace()
        .any(|w| !common_set().contains(w.to_lowercase().as_str()))
}

/// True iff the first word of a pattern key is common ("think SB")
///
/// Blank patterns count as common so they never surface.
pub fn is_pattern_head_common(pattern: &str) -> bool {
    match pattern.split_whitespace().next() {
        Some(head) => common_set().contains(head.to_lowercase().as_str()),
        None => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tiers_are_disjoint() {
        for word in MODERATE_LEMMAS {
            assert!(!common_set().contains(word), "{word} is in both tiers");
        }
    }

    #[test]
    fn test_classify_every_listed_lemma() {
        for word in COMMON_LEMMAS {
            assert_eq!(classify(word), LexicalTier::Common);
        }
        for word in MODERATE_LEMMAS {
            assert_eq!(classify(word), LexicalTier::Moderate);
        }
    }

    #[test]
    fn test_classify_rare_and_blank() {
        assert_eq!(classify("reckon"), LexicalTier::Rare);
        assert_eq!(classify("bizarre"), LexicalTier::Rare);
        assert_eq!(classify(""), LexicalTier::Common);
        assert_eq!(classify("   "), LexicalTier::Common);
        assert_eq!(classify(" Think "), LexicalTier::Common);
    }

    #[test]
    fn test_phrase_distinctive() {
        assert!(is_phrase_distinctive("folk reckon"));
        assert!(is_phrase_distinctive("go bizarre"));
        assert!(!is_phrase_distinctive("go on"));
        assert!(!is_phrase_distinctive(""));
        assert!(!is_phrase_distinctive("  "));
    }

    #[test]
    fn test_pattern_head_common() {
        assert!(is_pattern_head_common("think SB"));
        assert!(is_pattern_head_common(""));
        assert!(!is_pattern_head_common("reckon SB"));
        assert!(!is_pattern_head_common("double down"));
    }

    #[test]
    fn test_tier_serializes_as_integer() {
        assert_eq!(serde_json::to_string(&LexicalTier::Rare).unwrap(), "2");
        assert!(LexicalTier::Rare > LexicalTier::Moderate);
    }
}
