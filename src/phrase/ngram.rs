//! N-gram generation
//!
//! Slides a window of `n` tokens over one document's annotated stream. Windows
//! dominated by stop words, or with no content word at all, are skipped. Keys
//! join normalized forms so phrases generalize across referents; surfaces join
//! the raw text for display.

use crate::types::AnnotatedToken;

/// Default upper bound on the share of stop words in a window
pub const DEFAULT_MAX_STOP_RATIO: f64 = 0.6;

/// One emitted n-gram
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NGram {
    /// Space-joined normalized forms
    pub key: String,
    /// Space-joined surface text
    pub surface: String,
}

/// Iterator over the qualifying n-grams of a token slice
///
/// Single pass; build a new one for each `n`.
#[derive(Debug, Clone)]
pub struct NGrams<'a> {
    tokens: &'a [AnnotatedToken],
    n: usize,
    start: usize,
    max_stop_ratio: f64,
}

impl<'a> NGrams<'a> {
    pub fn new(tokens: &'a [AnnotatedToken], n: usize) -> Self {
        Self {
            tokens,
            n,
            start: 0,
            max_stop_ratio: DEFAULT_MAX_STOP_RATIO,
        }
    }

    pub fn with_max_stop_ratio(mut self, ratio: f64) -> Self {
        self.max_stop_ratio = ratio;
        self
    }

    fn accepts(&self, window: &[AnnotatedToken]) -> bool {
        let stops = window.iter().filter(|t| t.is_stop).count();
        if stops as f64 / self.n as f64 > self.max_stop_ratio {
            return false;
        }
        window.iter().any(|t| t.pos.is_content())
    }
}

impl Iterator for NGrams<'_> {
    type Item = NGram;

    fn next(&mut self) -> Option<NGram> {
        if self.n == 0 {
            return None;
        }
        while self.start + self.n <= self.tokens.len() {
            let window = &self.tokens[self.start..self.start + self.n];
            self.start += 1;
            if self.accepts(window) {
                return Some(NGram {
                    key: join(window, |t| t.norm.as_str()),
                    surface: join(window, |t| t.text.as_str()),
                });
            }
        }
        None
    }
}

fn join<'t>(window: &'t [AnnotatedToken], field: impl Fn(&'t AnnotatedToken) -> &'t str) -> String {
    window.iter().map(field).collect::<Vec<_>>().join(" ")
}

/// Convenience wrapper: all qualifying n-grams of length `n`
pub fn generate(tokens: &[AnnotatedToken], n: usize) -> NGrams<'_> {
    NGrams::new(tokens, n)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{DepRel, PosTag};

    fn tok(text: &str, lemma: &str, pos: PosTag, is_stop: bool) -> AnnotatedToken {
        AnnotatedToken::new(text, lemma, pos, DepRel::Other, is_stop)
    }

    fn sample() -> Vec<AnnotatedToken> {
        // "folks reckon it bizarre"
        vec![
            tok("folks", "folk", PosTag::Noun, false),
            tok("reckon", "reckon", PosTag::Verb, false),
            tok("it", "it", PosTag::Pronoun, true),
            tok("bizarre", "bizarre", PosTag::Adjective, false),
        ]
    }

    #[test]
    fn test_bigrams() {
        let tokens = sample();
        let keys: Vec<_> = generate(&tokens, 2).map(|g| g.key).collect();
        assert_eq!(keys, vec!["folk reckon", "reckon SB", "SB bizarre"]);
    }

    #[test]
    fn test_surface_keeps_raw_text() {
        let tokens = sample();
        let first = generate(&tokens, 2).next().unwrap();
        assert_eq!(first.surface, "folks reckon");
    }

    #[test]
    fn test_stop_heavy_windows_dropped() {
        let tokens = vec![
            tok("so", "so", PosTag::Adverb, true),
            tok("it", "it", PosTag::Pronoun, true),
            tok("was", "be", PosTag::Verb, true),
            tok("weird", "weird", PosTag::Adjective, false),
        ];
        // 3 of 3 stops, then 2 of 3 (0.67 > 0.6)
        assert_eq!(generate(&tokens, 3).count(), 0);
        // "was weird": 1 of 2 stops (0.5)
        let keys: Vec<_> = generate(&tokens, 2).map(|g| g.key).collect();
        assert_eq!(keys, vec!["be weird"]);
    }

    #[test]
    fn test_requires_content_word() {
        let tokens = vec![
            tok("she", "she", PosTag::Pronoun, false),
            tok("and", "and", PosTag::Conjunction, false),
            tok("5", "5", PosTag::Numeral, false),
        ];
        assert_eq!(generate(&tokens, 2).count(), 0);
    }

    #[test]
    fn test_window_longer_than_stream() {
        let tokens = sample();
        assert_eq!(generate(&tokens, 5).count(), 0);
        assert_eq!(generate(&tokens, 0).count(), 0);
        assert_eq!(generate(&[], 2).count(), 0);
    }

    #[test]
    fn test_custom_stop_ratio() {
        let tokens = sample();
        // "reckon it": 1 of 2 stops, rejected at ratio 0.4
        let keys: Vec<_> = generate(&tokens, 2)
            .with_max_stop_ratio(0.4)
            .map(|g| g.key)
            .collect();
        assert_eq!(keys, vec!["folk reckon"]);
    }
}
