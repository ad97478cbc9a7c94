//! Dependency pattern extraction
//!
//! Walks every verb and noun node of a [`DependencyGraph`] and emits the
//! fixed-shape patterns below. Keys are built from lowercased lemmas, except
//! the object of a verb-preposition-object pattern, which uses its normalized
//! form so referents collapse to `SB`/`NUM`.
//!
//! | kind      | shape                              | key                    |
//! |-----------|------------------------------------|------------------------|
//! | `VPO`     | verb → prep → pobj                 | `verb prep object`     |
//! | `phrasal` | verb → prt                         | `verb particle`        |
//! | `VO`      | verb → dobj                        | `verb object`          |
//! | `adjn`    | noun → amod (ADJ)                  | `adjective noun`       |
//! | `nn`      | noun → compound (NOUN)             | `modifier noun`        |

use serde::Serialize;

use crate::syntax::graph::DependencyGraph;
use crate::types::{DepRel, PosTag};

/// Closed set of pattern shapes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum PatternKind {
    /// verb + preposition + object of the preposition
    #[serde(rename = "VPO")]
    VerbPrepObject,
    #[serde(rename = "phrasal")]
    Phrasal,
    /// verb + direct object
    #[serde(rename = "VO")]
    VerbObject,
    #[serde(rename = "adjn")]
    AdjectiveNoun,
    #[serde(rename = "nn")]
    NounCompound,
}

impl PatternKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            PatternKind::VerbPrepObject => "VPO",
            PatternKind::Phrasal => "phrasal",
            PatternKind::VerbObject => "VO",
            PatternKind::AdjectiveNoun => "adjn",
            PatternKind::NounCompound => "nn",
        }
    }
}

impl std::fmt::Display for PatternKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One pattern occurrence within a document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PatternMatch {
    pub key: String,
    pub kind: PatternKind,
    /// Source text spanning every token involved, in-between words included
    pub surface: String,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct PatternExtractor;

impl PatternExtractor {
    pub fn new() -> Self {
        Self
    }

    /// Every pattern occurrence in the graph, in token order of the head
    pub fn extract(&self, graph: &DependencyGraph) -> Vec<PatternMatch> {
        let mut matches = Vec::new();
        for (index, node) in graph.nodes() {
            match node.pos {
                PosTag::Verb => verb_patterns(graph, index, &mut matches),
                PosTag::Noun => noun_patterns(graph, index, &mut matches),
                _ => {}
            }
        }
        matches
    }
}

fn lemma(graph: &DependencyGraph, index: u32) -> String {
    graph.node(index).lemma.to_lowercase()
}

fn verb_patterns(graph: &DependencyGraph, verb: u32, out: &mut Vec<PatternMatch>) {
    let verb_lemma = lemma(graph, verb);
    for child in graph.children(verb) {
        match graph.node(child).dep {
            DepRel::Prep => {
                for object in graph.children(child) {
                    if graph.node(object).dep != DepRel::Pobj {
                        continue;
                    }
                    out.push(PatternMatch {
                        key: format!(
                            "{} {} {}",
                            verb_lemma,
                            lemma(graph, child),
                            graph.node(object).norm()
                        ),
                        kind: PatternKind::VerbPrepObject,
                        surface: graph.span_text(&[verb, child, object]),
                    });
                }
            }
            DepRel::Prt => out.push(PatternMatch {
                key: format!("{} {}", verb_lemma, lemma(graph, child)),
                kind: PatternKind::Phrasal,
                surface: graph.span_text(&[verb, child]),
            }),
            DepRel::Dobj => out.push(PatternMatch {
                key: format!("{} {}", verb_lemma, lemma(graph, child)),
                kind: PatternKind::VerbObject,
                surface: graph.span_text(&[verb, child]),
            }),
            _ => {}
        }
    }
}

fn noun_patterns(graph: &DependencyGraph, noun: u32, out: &mut Vec<PatternMatch>) {
    let noun_lemma = lemma(graph, noun);
    for child in graph.children(noun) {
        let modifier = graph.node(child);
        let kind = match (modifier.dep, modifier.pos) {
            (DepRel::Amod, PosTag::Adjective) => PatternKind::AdjectiveNoun,
            (DepRel::Compound, PosTag::Noun) => PatternKind::NounCompound,
            _ => continue,
        };
        out.push(PatternMatch {
            key: format!("{} {}", lemma(graph, child), noun_lemma),
            kind,
            surface: graph.span_text(&[noun, child]),
        });
    }
}
