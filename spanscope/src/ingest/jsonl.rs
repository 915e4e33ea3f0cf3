//! Line-delimited JSON corpus ingestion.
//!
//! One record per line:
//!
//! ```json
//! {"id": "doc-42", "tokens": ["The", "cat"], "spans": [{"label": "NP", "start": 0, "end": 2}]}
//! ```
//!
//! `id` and `spans` are optional; span offsets are token indices and are
//! validated against the token count while the document is built.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use spanscope_core::{Corpus, Document, Error, Result};

/// One span as written in a JSONL record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawSpan {
    /// Span label.
    pub label: String,
    /// Start token index (inclusive).
    pub start: usize,
    /// End token index (exclusive).
    pub end: usize,
}

/// One document as written in a JSONL record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawRecord {
    /// Document identifier; generated from the line number when absent.
    #[serde(default)]
    pub id: Option<String>,
    /// Pre-split tokens in document order.
    pub tokens: Vec<String>,
    /// Labeled spans over the tokens.
    #[serde(default)]
    pub spans: Vec<RawSpan>,
}

/// Parse line-delimited JSON into a corpus. Blank lines are skipped.
///
/// # Errors
///
/// Fails on JSON that does not match the record shape or on span offsets
/// that do not fit their document.
pub fn parse_jsonl(input: &str) -> Result<Corpus> {
    let mut corpus = Corpus::new();
    for (idx, line) in input.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        let record: RawRecord = serde_json::from_str(line)
            .map_err(|e| Error::parse(format!("line {}: {e}", idx + 1)))?;
        let id = record
            .id
            .unwrap_or_else(|| format!("doc{}", corpus.len()));
        let mut doc = Document::from_words(id, record.tokens);
        for span in record.spans {
            doc.add_span(span.label, span.start, span.end)?;
        }
        corpus.add_document(doc);
    }
    log::debug!(
        "parsed JSONL input: {} documents, {} spans",
        corpus.len(),
        corpus.total_spans()
    );
    Ok(corpus)
}

/// Read and parse a JSONL corpus file.
///
/// # Errors
///
/// Fails on IO errors or malformed content.
pub fn load_jsonl(path: &Path) -> Result<Corpus> {
    let input = fs::read_to_string(path)?;
    parse_jsonl(&input)
}
