//! Corpus data model: tokens, labeled spans, documents, corpora.
//!
//! These are plain immutable value types. Any loader can populate them —
//! CoNLL columns, JSONL, an in-process tokenizer — as long as span offsets
//! are token indices into the owning document and pass validation at
//! construction time. Once built, a [`Corpus`] is read-only.

use serde::Serialize;

use crate::error::{Error, Result};

/// Normalize a token's surface form into its vocabulary key.
///
/// Lowercases and maps the Penn-Treebank quote digraphs (`` `` `` and `''`)
/// back to a plain double quote, so corpora exported with PTB escaping and
/// plain-text corpora share a vocabulary.
#[must_use]
pub fn normalize_token(text: &str) -> String {
    text.to_lowercase().replace("``", "\"").replace("''", "\"")
}

/// An ordered unit of text in a document.
///
/// Tokens are addressed by their zero-based position within the document;
/// the struct itself carries only the surface form and its normalized key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Token {
    text: String,
    norm: String,
}

impl Token {
    /// Create a token from its surface form; the normalized form is derived.
    #[must_use]
    pub fn new(text: impl Into<String>) -> Self {
        let text = text.into();
        let norm = normalize_token(&text);
        Self { text, norm }
    }

    /// Raw surface form.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Normalized form used as the vocabulary key.
    #[must_use]
    pub fn norm(&self) -> &str {
        &self.norm
    }
}

/// A label plus a half-open token range `[start, end)` within one document.
///
/// Spans are only constructible through [`Span::new`] (or
/// [`Document::add_span`]), which enforces `start < end <= doc_len`.
/// Overlapping spans and multiple labels over the same tokens are allowed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Span {
    label: String,
    start: usize,
    end: usize,
}

impl Span {
    /// Create a validated span against a document of `doc_len` tokens.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidSpan`] if `start >= end` or `end > doc_len`.
    pub fn new(label: impl Into<String>, start: usize, end: usize, doc_len: usize) -> Result<Self> {
        let label = label.into();
        if start >= end || end > doc_len {
            return Err(Error::invalid_span(label, start, end, doc_len));
        }
        Ok(Self { label, start, end })
    }

    /// The span's label.
    #[must_use]
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Start token index (inclusive).
    #[must_use]
    pub fn start(&self) -> usize {
        self.start
    }

    /// End token index (exclusive).
    #[must_use]
    pub fn end(&self) -> usize {
        self.end
    }

    /// Span width in tokens.
    #[must_use]
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    /// Always false: zero-width spans are rejected at construction.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        false
    }
}

/// An ordered sequence of tokens plus the spans anchored to it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Document {
    id: String,
    tokens: Vec<Token>,
    spans: Vec<Span>,
}

impl Document {
    /// Create a document with no spans. Zero tokens is valid.
    #[must_use]
    pub fn new(id: impl Into<String>, tokens: Vec<Token>) -> Self {
        Self {
            id: id.into(),
            tokens,
            spans: Vec::new(),
        }
    }

    /// Create a document from surface strings.
    #[must_use]
    pub fn from_words<S: Into<String>>(id: impl Into<String>, words: Vec<S>) -> Self {
        Self::new(id, words.into_iter().map(Token::new).collect())
    }

    /// Attach a labeled span, validating it against this document's tokens.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidSpan`] if the offsets do not fit.
    pub fn add_span(&mut self, label: impl Into<String>, start: usize, end: usize) -> Result<()> {
        let span = Span::new(label, start, end, self.tokens.len())?;
        self.spans.push(span);
        Ok(())
    }

    /// Document identifier.
    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    /// The document's tokens, in order.
    #[must_use]
    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    /// The spans anchored to this document.
    #[must_use]
    pub fn spans(&self) -> &[Span] {
        &self.spans
    }

    /// Number of tokens.
    #[must_use]
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    /// True if the document has no tokens.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }
}

/// An ordered, read-only collection of documents.
///
/// The label set is implicit: the union of all span labels seen. An empty
/// corpus is valid and yields an empty report downstream.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Corpus {
    documents: Vec<Document>,
}

impl Corpus {
    /// Create a new empty corpus.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a corpus from a document list.
    #[must_use]
    pub fn from_documents(documents: Vec<Document>) -> Self {
        Self { documents }
    }

    /// Append a document.
    pub fn add_document(&mut self, doc: Document) {
        self.documents.push(doc);
    }

    /// All documents, in corpus order.
    #[must_use]
    pub fn documents(&self) -> &[Document] {
        &self.documents
    }

    /// Number of documents.
    #[must_use]
    pub fn len(&self) -> usize {
        self.documents.len()
    }

    /// True if the corpus has no documents.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    /// Total number of spans across all documents.
    #[must_use]
    pub fn total_spans(&self) -> usize {
        self.documents.iter().map(|d| d.spans().len()).sum()
    }

    /// Total number of tokens across all documents.
    #[must_use]
    pub fn total_tokens(&self) -> usize {
        self.documents.iter().map(Document::len).sum()
    }
}
