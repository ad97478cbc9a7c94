//! Core data types
//!
//! Tokens arrive already annotated by an external tagger/parser. This module
//! holds the typed records the extractors consume: part-of-speech and
//! dependency labels, the per-token annotation, documents and the corpus.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::error::AnalyzeError;
use crate::nlp::normalize::{looks_numeric, normalized_form};
use crate::syntax::graph::DependencyGraph;

/// Universal part-of-speech tags as emitted by the annotator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PosTag {
    #[serde(rename = "NOUN")]
    Noun,
    #[serde(rename = "PROPN")]
    ProperNoun,
    #[serde(rename = "VERB")]
    Verb,
    #[serde(rename = "ADJ")]
    Adjective,
    #[serde(rename = "ADV")]
    Adverb,
    #[serde(rename = "PRON")]
    Pronoun,
    #[serde(rename = "NUM")]
    Numeral,
    #[serde(rename = "ADP")]
    Adposition,
    #[serde(rename = "PART")]
    Particle,
    #[serde(rename = "CCONJ")]
    Conjunction,
    #[serde(rename = "DET")]
    Determiner,
    #[serde(rename = "AUX")]
    Auxiliary,
    #[serde(rename = "PUNCT")]
    Punctuation,
    #[serde(rename = "SPACE")]
    Space,
    #[serde(other)]
    Other,
}

impl PosTag {
    /// Parse a universal tag string; unknown tags map to [`PosTag::Other`]
    pub fn from_universal(tag: &str) -> Self {
        match tag.to_ascii_uppercase().as_str() {
            "NOUN" => PosTag::Noun,
            "PROPN" => PosTag::ProperNoun,
            "VERB" => PosTag::Verb,
            "ADJ" => PosTag::Adjective,
            "ADV" => PosTag::Adverb,
            "PRON" => PosTag::Pronoun,
            "NUM" => PosTag::Numeral,
            "ADP" => PosTag::Adposition,
            "PART" => PosTag::Particle,
            "CCONJ" | "SCONJ" => PosTag::Conjunction,
            "DET" => PosTag::Determiner,
            "AUX" => PosTag::Auxiliary,
            "PUNCT" => PosTag::Punctuation,
            "SPACE" => PosTag::Space,
            _ => PosTag::Other,
        }
    }

    /// Content-bearing tags: noun, verb, adjective, adverb
    pub fn is_content(&self) -> bool {
        matches!(
            self,
            PosTag::Noun | PosTag::Verb | PosTag::Adjective | PosTag::Adverb
        )
    }

    /// Tags dropped before a token enters the annotated stream
    pub fn is_ignorable(&self) -> bool {
        matches!(
            self,
            PosTag::Punctuation | PosTag::Space | PosTag::Determiner | PosTag::Auxiliary
        )
    }
}

/// Dependency relation labels used by the pattern rules
///
/// Only the relations the extractor inspects get their own variant.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DepRel {
    /// Prepositional modifier
    Prep,
    /// Object of a preposition
    Pobj,
    /// Verb particle
    Prt,
    /// Direct object
    Dobj,
    /// Adjectival modifier
    Amod,
    /// Noun compound modifier
    Compound,
    #[default]
    #[serde(other)]
    Other,
}

impl DepRel {
    pub fn from_label(label: &str) -> Self {
        match label.to_ascii_lowercase().as_str() {
            "prep" => DepRel::Prep,
            "pobj" => DepRel::Pobj,
            "prt" => DepRel::Prt,
            "dobj" => DepRel::Dobj,
            "amod" => DepRel::Amod,
            "compound" => DepRel::Compound,
            _ => DepRel::Other,
        }
    }
}

/// One token as delivered by the annotator, after ignorable tags are removed
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnnotatedToken {
    /// Surface text as spoken
    pub text: String,
    /// Lowercased lemma
    pub lemma: String,
    /// Phrase-matching key: `SB`, `NUM`, or the lemma
    pub norm: String,
    pub pos: PosTag,
    #[serde(default)]
    pub dep: DepRel,
    #[serde(default)]
    pub is_stop: bool,
}

impl AnnotatedToken {
    /// Build a token, deriving the lowercased lemma and normalized form
    pub fn new(
        text: impl Into<String>,
        lemma: &str,
        pos: PosTag,
        dep: DepRel,
        is_stop: bool,
    ) -> Self {
        let text = text.into();
        let like_num = looks_numeric(&text);
        Self {
            lemma: lemma.to_lowercase(),
            norm: normalized_form(lemma, pos, like_num),
            text,
            pos,
            dep,
            is_stop,
        }
    }

    /// Whether this token counts towards vocabulary (content, not a stop word)
    pub fn is_vocabulary_candidate(&self) -> bool {
        self.pos.is_content() && !self.is_stop
    }
}

/// A fully parsed token, including its syntactic head
///
/// This is the richer record a parser produces; a [`Document`] derives both
/// its token stream and its dependency graph from a sequence of these.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParsedToken {
    pub text: String,
    pub lemma: String,
    pub pos: PosTag,
    #[serde(default)]
    pub dep: DepRel,
    /// Index of the syntactic head; `None` (or the token's own index) marks a root
    #[serde(default)]
    pub head: Option<usize>,
    #[serde(default)]
    pub is_stop: bool,
    #[serde(default)]
    pub like_num: bool,
    /// Whether the token is followed by whitespace in the source text
    #[serde(default = "default_whitespace")]
    pub whitespace: bool,
}

fn default_whitespace() -> bool {
    true
}

impl ParsedToken {
    pub fn new(text: &str, lemma: &str, pos: PosTag, dep: DepRel, head: Option<usize>) -> Self {
        Self {
            text: text.to_string(),
            lemma: lemma.to_lowercase(),
            pos,
            dep,
            head,
            is_stop: false,
            like_num: looks_numeric(text),
            whitespace: true,
        }
    }

    pub fn with_stop(mut self, is_stop: bool) -> Self {
        self.is_stop = is_stop;
        self
    }

    pub fn with_whitespace(mut self, whitespace: bool) -> Self {
        self.whitespace = whitespace;
        self
    }

    pub fn norm(&self) -> String {
        normalized_form(&self.lemma, self.pos, self.like_num)
    }

    fn to_annotated(&self) -> AnnotatedToken {
        AnnotatedToken {
            text: self.text.clone(),
            lemma: self.lemma.to_lowercase(),
            norm: self.norm(),
            pos: self.pos,
            dep: self.dep,
            is_stop: self.is_stop,
        }
    }
}

/// One transcript: its annotated token stream and optional dependency graph
#[derive(Debug, Clone)]
pub struct Document {
    pub id: String,
    pub tokens: Vec<AnnotatedToken>,
    pub graph: Option<DependencyGraph>,
}

impl Document {
    /// A document with tokens only (no pattern extraction)
    pub fn new(id: impl Into<String>, tokens: Vec<AnnotatedToken>) -> Self {
        Self {
            id: id.into(),
            tokens,
            graph: None,
        }
    }

    pub fn with_graph(mut self, graph: DependencyGraph) -> Self {
        self.graph = Some(graph);
        self
    }

    /// Build a document from a full parse
    ///
    /// Ignorable tags are dropped from the token stream but kept in the graph
    /// so pattern surface spans keep their in-between words.
    pub fn from_parsed(id: impl Into<String>, parsed: Vec<ParsedToken>) -> Result<Self, AnalyzeError> {
        let id = id.into();
        let tokens = parsed
            .iter()
            .filter(|t| !t.pos.is_ignorable())
            .map(ParsedToken::to_annotated)
            .collect();
        let graph = DependencyGraph::from_parsed(parsed)
            .map_err(|e| e.in_document(&id))?;
        Ok(Self {
            id,
            tokens,
            graph: Some(graph),
        })
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }
}

#[derive(Deserialize)]
struct DocumentRecord {
    id: String,
    tokens: Vec<AnnotatedToken>,
}

/// Documents keyed by id, in insertion order
///
/// Order matters: every aggregate is computed by folding documents in this
/// order, so identical input order gives identical output.
#[derive(Debug, Clone, Default)]
pub struct Corpus {
    documents: Vec<Document>,
    id_to_idx: FxHashMap<String, usize>,
}

impl Corpus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a document, replacing any earlier document with the same id in place
    pub fn insert(&mut self, doc: Document) {
        if let Some(&idx) = self.id_to_idx.get(&doc.id) {
            self.documents[idx] = doc;
            return;
        }
        self.id_to_idx.insert(doc.id.clone(), self.documents.len());
        self.documents.push(doc);
    }

    /// Load `[{"id": ..., "tokens": [...]}, ...]`
    pub fn from_json(json: &str) -> Result<Self, AnalyzeError> {
        let records: Vec<DocumentRecord> = serde_json::from_str(json)?;
        Ok(records
            .into_iter()
            .map(|r| Document::new(r.id, r.tokens))
            .collect())
    }

    pub fn get(&self, id: &str) -> Option<&Document> {
        self.id_to_idx.get(id).map(|&i| &self.documents[i])
    }

    pub fn documents(&self) -> &[Document] {
        &self.documents
    }

    pub fn documents_mut(&mut self) -> &mut [Document] {
        &mut self.documents
    }

    /// Number of documents actually supplied
    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    /// Total annotated tokens across all documents
    pub fn token_count(&self) -> usize {
        self.documents.iter().map(Document::len).sum()
    }

    /// All tokens, document by document
    pub fn tokens(&self) -> impl Iterator<Item = &AnnotatedToken> {
        self.documents.iter().flat_map(|d| d.tokens.iter())
    }
}

impl FromIterator<Document> for Corpus {
    fn from_iter<I: IntoIterator<Item = Document>>(iter: I) -> Self {
        let mut corpus = Corpus::new();
        for doc in iter {
            corpus.insert(doc);
        }
        corpus
    }
}
