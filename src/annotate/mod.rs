//! Annotator boundary: parsed-document model and the capability trait
//! implemented by external dependency parsers.

mod remote;

pub use remote::RemoteAnnotator;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::Result;

/// A single token of a parsed document.
///
/// Child lists hold indices into the owning [`Document`]'s token arena:
/// `lefts` are subordinate tokens preceding this one in surface order,
/// `rights` are subordinate tokens following it. Tokens are immutable once
/// the document is built.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Token {
    pub text: String,
    /// Dependency-relation label, e.g. "ROOT", "nsubj", "dobj"
    pub dep: String,
    #[serde(default)]
    lefts: Vec<usize>,
    #[serde(default)]
    rights: Vec<usize>,
}

/// A parsed document: an ordered token arena with dependency structure.
#[derive(Debug, Clone, Default)]
pub struct Document {
    tokens: Vec<Token>,
}

impl Document {
    /// Tokens in document order.
    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Left children of the token at `idx`, in the order recorded by the parser.
    /// Indices that fall outside the arena are skipped.
    pub fn lefts(&self, idx: usize) -> impl Iterator<Item = &Token> {
        self.tokens[idx]
            .lefts
            .iter()
            .filter_map(move |&i| self.tokens.get(i))
    }

    /// Right children of the token at `idx`, in parser order.
    pub fn rights(&self, idx: usize) -> impl Iterator<Item = &Token> {
        self.tokens[idx]
            .rights
            .iter()
            .filter_map(move |&i| self.tokens.get(i))
    }
}

/// Incremental constructor for [`Document`], used by annotator
/// implementations and tests.
#[derive(Debug, Default)]
pub struct DocumentBuilder {
    tokens: Vec<Token>,
}

impl DocumentBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a token and return its index.
    pub fn push(&mut self, text: impl Into<String>, dep: impl Into<String>) -> usize {
        self.tokens.push(Token {
            text: text.into(),
            dep: dep.into(),
            lefts: Vec::new(),
            rights: Vec::new(),
        });
        self.tokens.len() - 1
    }

    /// Record `child` as a left child of `head`.
    pub fn attach_left(&mut self, head: usize, child: usize) {
        self.tokens[head].lefts.push(child);
    }

    /// Record `child` as a right child of `head`.
    pub fn attach_right(&mut self, head: usize, child: usize) {
        self.tokens[head].rights.push(child);
    }

    pub fn build(self) -> Document {
        Document {
            tokens: self.tokens,
        }
    }
}

/// A named entity recognized by the external parser.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NamedEntity {
    pub text: String,
    /// Entity type label, e.g. "PERSON", "ORG", "GPE"
    pub label: String,
}

/// Capability interface for the external syntactic parser.
///
/// The extraction core never embeds a parsing model; any conforming
/// implementation (remote service, in-process binding) can be substituted
/// without touching extraction logic.
#[async_trait]
pub trait Annotator: Send + Sync {
    /// Parse text into a dependency-annotated token sequence.
    async fn parse(&self, text: &str) -> Result<Document>;

    /// Recognize named entities, in document order.
    async fn entities(&self, text: &str) -> Result<Vec<NamedEntity>>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_indices_and_children() {
        let mut b = DocumentBuilder::new();
        let alice = b.push("Alice", "nsubj");
        let bought = b.push("bought", "ROOT");
        let car = b.push("car", "dobj");
        b.attach_left(bought, alice);
        b.attach_right(bought, car);
        let doc = b.build();

        assert_eq!(doc.len(), 3);
        let lefts: Vec<_> = doc.lefts(bought).map(|t| t.text.as_str()).collect();
        let rights: Vec<_> = doc.rights(bought).map(|t| t.text.as_str()).collect();
        assert_eq!(lefts, vec!["Alice"]);
        assert_eq!(rights, vec!["car"]);
        assert_eq!(doc.lefts(alice).count(), 0);
    }

    #[test]
    fn test_out_of_range_child_skipped() {
        let mut b = DocumentBuilder::new();
        let root = b.push("runs", "ROOT");
        b.attach_left(root, 42);
        let doc = b.build();
        assert_eq!(doc.lefts(root).count(), 0);
    }

    #[test]
    fn test_empty_document() {
        let doc = DocumentBuilder::new().build();
        assert!(doc.is_empty());
        assert_eq!(doc.tokens().len(), 0);
    }
}
