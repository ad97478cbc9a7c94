//! Dependency graph in Compressed Sparse Row form
//!
//! A parser hands over one head index per token. Pattern rules only ever walk
//! downwards (node → children → grandchildren), so the graph stores child
//! lists contiguously: node i's children are `children[row_ptr[i]..row_ptr[i+1]]`,
//! in token order.

use crate::error::AnalyzeError;
use crate::types::ParsedToken;

#[derive(Debug, Clone, Default)]
pub struct DependencyGraph {
    nodes: Vec<ParsedToken>,
    /// Row pointers into `children`, one per node plus a sentinel
    row_ptr: Vec<usize>,
    children: Vec<u32>,
}

impl DependencyGraph {
    /// Build from parsed tokens, validating every head index
    ///
    /// A token whose head is `None` or itself is a root.
    pub fn from_parsed(nodes: Vec<ParsedToken>) -> Result<Self, AnalyzeError> {
        let len = nodes.len();
        let mut child_counts = vec![0usize; len];

        for (index, node) in nodes.iter().enumerate() {
            match node.head {
                Some(head) if head >= len => {
                    return Err(AnalyzeError::InvalidGraph {
                        document: String::new(),
                        index,
                        head,
                        len,
                    });
                }
                Some(head) if head != index => child_counts[head] += 1,
                _ => {}
            }
        }

        let mut row_ptr = Vec::with_capacity(len + 1);
        row_ptr.push(0);
        for count in &child_counts {
            let last = row_ptr[row_ptr.len() - 1];
            row_ptr.push(last + count);
        }

        let mut children = vec![0u32; row_ptr[len]];
        let mut fill = row_ptr[..len].to_vec();
        for (index, node) in nodes.iter().enumerate() {
            if let Some(head) = node.head.filter(|&h| h != index) {
                children[fill[head]] = index as u32;
                fill[head] += 1;
            }
        }

        Ok(Self {
            nodes,
            row_ptr,
            children,
        })
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn node(&self, index: u32) -> &ParsedToken {
        &self.nodes[index as usize]
    }

    pub fn nodes(&self) -> impl Iterator<Item = (u32, &ParsedToken)> {
        self.nodes.iter().enumerate().map(|(i, n)| (i as u32, n))
    }

    /// Direct syntactic children, in token order
    pub fn children(&self, index: u32) -> impl Iterator<Item = u32> + '_ {
        let start = self.row_ptr[index as usize];
        let end = self.row_ptr[index as usize + 1];
        self.children[start..end].iter().copied()
    }

    pub fn roots(&self) -> impl Iterator<Item = u32> + '_ {
        self.nodes
            .iter()
            .enumerate()
            .filter(|(i, n)| n.head.map_or(true, |h| h == *i))
            .map(|(i, _)| i as u32)
    }

    /// Source text covering the given token indices, from the smallest to
    /// the largest inclusive, with the original spacing
    pub fn span_text(&self, indices: &[u32]) -> String {
        let (Some(&lo), Some(&hi)) = (indices.iter().min(), indices.iter().max()) else {
            return String::new();
        };
        let mut text = String::new();
        for index in lo..=hi {
            let node = &self.nodes[index as usize];
            text.push_str(&node.text);
            if index < hi && node.whitespace {
                text.push(' ');
            }
        }
        text
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{DepRel, PosTag};

    fn node(text: &str, pos: PosTag, head: Option<usize>) -> ParsedToken {
        ParsedToken::new(text, text, pos, DepRel::Other, head)
    }

    /// "She looked up the word"
    fn sample() -> Vec<ParsedToken> {
        vec![
            node("She", PosTag::Pronoun, Some(1)),
            node("looked", PosTag::Verb, None),
            node("up", PosTag::Particle, Some(1)),
            node("the", PosTag::Determiner, Some(4)),
            node("word", PosTag::Noun, Some(1)),
        ]
    }

    #[test]
    fn test_children_in_token_order() {
        let graph = DependencyGraph::from_parsed(sample()).unwrap();
        assert_eq!(graph.children(1).collect::<Vec<_>>(), vec![0, 2, 4]);
        assert_eq!(graph.children(4).collect::<Vec<_>>(), vec![3]);
        assert_eq!(graph.children(0).count(), 0);
        assert_eq!(graph.roots().collect::<Vec<_>>(), vec![1]);
    }

    #[test]
    fn test_self_head_is_root() {
        let graph = DependencyGraph::from_parsed(vec![node("Hi", PosTag::Other, Some(0))]).unwrap();
        assert_eq!(graph.roots().collect::<Vec<_>>(), vec![0]);
        assert_eq!(graph.children(0).count(), 0);
    }

    #[test]
    fn test_out_of_range_head_rejected() {
        let err = DependencyGraph::from_parsed(vec![node("x", PosTag::Noun, Some(3))]).unwrap_err();
        assert!(matches!(
            err,
            AnalyzeError::InvalidGraph { index: 0, head: 3, len: 1, .. }
        ));
    }

    #[test]
    fn test_span_text_keeps_in_between_words() {
        let graph = DependencyGraph::from_parsed(sample()).unwrap();
        assert_eq!(graph.span_text(&[4, 1]), "looked up the word");
        assert_eq!(graph.span_text(&[2]), "up");
        assert_eq!(graph.span_text(&[]), "");
    }

    #[test]
    fn test_span_text_respects_whitespace() {
        // "can't stop"
        let parsed = vec![
            node("ca", PosTag::Auxiliary, Some(2)).with_whitespace(false),
            node("n't", PosTag::Particle, Some(2)),
            node("stop", PosTag::Verb, None),
        ];
        let graph = DependencyGraph::from_parsed(parsed).unwrap();
        assert_eq!(graph.span_text(&[0, 2]), "can't stop");
    }

    #[test]
    fn test_empty_graph() {
        let graph = DependencyGraph::from_parsed(vec![]).unwrap();
        assert!(graph.is_empty());
        assert_eq!(graph.roots().count(), 0);
    }
}
