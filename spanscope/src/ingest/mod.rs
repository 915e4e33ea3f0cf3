//! Corpus ingestion: format-specific loaders producing the abstract
//! [`Corpus`] model.
//!
//! # Supported formats
//!
//! | Format | Extension | Notes |
//! |--------|-----------|-------|
//! | CoNLL/IOB columns | `.conll`, `.iob`, `.iob2` | token column + IOB tag column(s), nested levels supported |
//! | JSONL | `.jsonl`, `.json` | one `{"tokens": [...], "spans": [...]}` record per line |
//!
//! Loaders never tokenize raw text: tokens arrive pre-split and span
//! offsets are token indices, validated against document bounds while the
//! corpus is built.

pub mod conll;
pub mod jsonl;

use std::path::Path;

use spanscope_core::{Corpus, Error, Result};

pub use conll::{load_conll, load_conll_with, parse_conll, ConllConfig, TagColumns};
pub use jsonl::{load_jsonl, parse_jsonl};

/// On-disk corpus formats understood by [`load_corpus`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CorpusFormat {
    /// Whitespace-separated CoNLL columns with IOB tags.
    Conll,
    /// Line-delimited JSON records.
    Jsonl,
}

impl CorpusFormat {
    /// Guess the format from a file extension.
    #[must_use]
    pub fn from_path(path: &Path) -> Option<Self> {
        match path.extension()?.to_str()? {
            "conll" | "iob" | "iob2" => Some(Self::Conll),
            "jsonl" | "json" => Some(Self::Jsonl),
            _ => None,
        }
    }
}

/// Load a corpus file, dispatching on an explicit format or the file
/// extension.
///
/// # Errors
///
/// Fails if the format is neither given nor recognizable from the path,
/// if the file cannot be read, or if its contents do not parse.
pub fn load_corpus(path: &Path, format: Option<CorpusFormat>) -> Result<Corpus> {
    let format = format.or_else(|| CorpusFormat::from_path(path)).ok_or_else(|| {
        Error::invalid_input(format!(
            "cannot infer corpus format from {}; pass one explicitly",
            path.display()
        ))
    })?;
    match format {
        CorpusFormat::Conll => load_conll(path),
        CorpusFormat::Jsonl => load_jsonl(path),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_from_extension() {
        assert_eq!(
            CorpusFormat::from_path(Path::new("data/train.conll")),
            Some(CorpusFormat::Conll)
        );
        assert_eq!(
            CorpusFormat::from_path(Path::new("data/genia.iob2")),
            Some(CorpusFormat::Conll)
        );
        assert_eq!(
            CorpusFormat::from_path(Path::new("corpus.jsonl")),
            Some(CorpusFormat::Jsonl)
        );
        assert_eq!(CorpusFormat::from_path(Path::new("corpus.xyz")), None);
        assert_eq!(CorpusFormat::from_path(Path::new("no_extension")), None);
    }

    #[test]
    fn test_load_corpus_rejects_unknown_format() {
        let err = load_corpus(Path::new("corpus.xyz"), None).unwrap_err();
        assert!(matches!(err, Error::InvalidInput(_)));
    }
}
