//! CoNLL-style column ingestion with IOB span decoding.
//!
//! Accepts the classic shared-task layouts: one token per line, columns
//! separated by whitespace, blank lines separating sentences, and an
//! optional `-DOCSTART-` row between source documents (skipped). The token
//! is the first column; IOB tags live in either the last column
//! (CoNLL-2000 chunks, CoNLL-2003 NER) or in every column after the token
//! (GENIA's nested IOB2 export, where each extra column is one nesting
//! level).
//!
//! Both IOB2 (`B-` always opens) and IOB1 (`I-` may open) are accepted: an
//! `I-X` with no open `X` span starts one.

use std::fs;
use std::path::Path;

use spanscope_core::{Corpus, Document, Error, Result};

/// Which columns of a row carry IOB tags.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TagColumns {
    /// Only the last column (CoNLL-2000/2003 convention).
    #[default]
    Last,
    /// Every column after the token, one nesting level each (GENIA).
    AllAfterToken,
}

/// Parser configuration.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConllConfig {
    /// Column selection for IOB tags.
    pub tag_columns: TagColumns,
}

/// One IOB tag, decoded.
enum Tag {
    Outside,
    Begin(String),
    Inside(String),
}

fn decode_tag(tag: &str, line_no: usize) -> Result<Tag> {
    if tag == "O" {
        return Ok(Tag::Outside);
    }
    if let Some(label) = tag.strip_prefix("B-") {
        return Ok(Tag::Begin(label.to_string()));
    }
    if let Some(label) = tag.strip_prefix("I-") {
        return Ok(Tag::Inside(label.to_string()));
    }
    Err(Error::parse(format!(
        "line {line_no}: unrecognized IOB tag {tag:?}"
    )))
}

/// Per-column decoder state: the currently open span, if any.
#[derive(Default)]
struct OpenSpan(Option<(String, usize)>);

impl OpenSpan {
    /// Feed the tag for the token at `pos`; a closed span is pushed onto
    /// `spans`.
    fn feed(&mut self, tag: Tag, pos: usize, spans: &mut Vec<(String, usize, usize)>) {
        match tag {
            Tag::Outside => self.close(pos, spans),
            Tag::Begin(label) => {
                self.close(pos, spans);
                self.0 = Some((label, pos));
            }
            Tag::Inside(label) => match &self.0 {
                Some((open, _)) if *open == label => {}
                // IOB1: I- opens when nothing (or another label) is open
                _ => {
                    self.close(pos, spans);
                    self.0 = Some((label, pos));
                }
            },
        }
    }

    fn close(&mut self, end: usize, spans: &mut Vec<(String, usize, usize)>) {
        if let Some((label, start)) = self.0.take() {
            spans.push((label, start, end));
        }
    }
}

/// Parse CoNLL column text into a corpus, one document per sentence.
///
/// # Errors
///
/// Fails on rows with fewer than two columns, rows whose column count
/// changes mid-sentence, or unrecognized IOB tags.
pub fn parse_conll(input: &str, config: &ConllConfig) -> Result<Corpus> {
    let mut corpus = Corpus::new();
    let mut tokens: Vec<String> = Vec::new();
    let mut spans: Vec<(String, usize, usize)> = Vec::new();
    let mut open: Vec<OpenSpan> = Vec::new();

    let flush = |tokens: &mut Vec<String>,
                     spans: &mut Vec<(String, usize, usize)>,
                     open: &mut Vec<OpenSpan>,
                     corpus: &mut Corpus|
     -> Result<()> {
        for state in open.iter_mut() {
            state.close(tokens.len(), spans);
        }
        open.clear();
        if tokens.is_empty() {
            return Ok(());
        }
        let mut doc = Document::from_words(format!("doc{}", corpus.len()), std::mem::take(tokens));
        for (label, start, end) in spans.drain(..) {
            doc.add_span(label, start, end)?;
        }
        corpus.add_document(doc);
        Ok(())
    };

    for (idx, line) in input.lines().enumerate() {
        let line_no = idx + 1;
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with("-DOCSTART-") {
            flush(&mut tokens, &mut spans, &mut open, &mut corpus)?;
            continue;
        }

        let fields: Vec<&str> = trimmed.split_whitespace().collect();
        if fields.len() < 2 {
            return Err(Error::parse(format!(
                "line {line_no}: expected a token and at least one tag column, got {trimmed:?}"
            )));
        }

        let tags: &[&str] = match config.tag_columns {
            TagColumns::Last => &fields[fields.len() - 1..],
            TagColumns::AllAfterToken => &fields[1..],
        };

        if open.is_empty() {
            open.resize_with(tags.len(), OpenSpan::default);
        } else if open.len() != tags.len() {
            return Err(Error::parse(format!(
                "line {line_no}: tag column count changed mid-sentence ({} -> {})",
                open.len(),
                tags.len()
            )));
        }

        let pos = tokens.len();
        for (state, tag) in open.iter_mut().zip(tags) {
            state.feed(decode_tag(tag, line_no)?, pos, &mut spans);
        }
        tokens.push(fields[0].to_string());
    }
    flush(&mut tokens, &mut spans, &mut open, &mut corpus)?;

    log::debug!(
        "parsed CoNLL input: {} documents, {} spans",
        corpus.len(),
        corpus.total_spans()
    );
    Ok(corpus)
}

/// Read and parse a CoNLL file with the default configuration.
///
/// # Errors
///
/// Fails on IO errors or malformed content.
pub fn load_conll(path: &Path) -> Result<Corpus> {
    load_conll_with(path, &ConllConfig::default())
}

/// Read and parse a CoNLL file.
///
/// # Errors
///
/// Fails on IO errors or malformed content.
pub fn load_conll_with(path: &Path, config: &ConllConfig) -> Result<Corpus> {
    let input = fs::read_to_string(path)?;
    parse_conll(&input, config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_iob2_sentence() {
        let input = "\
West B-NP
Germany I-NP
beat O
England B-NP
";
        let corpus = parse_conll(input, &ConllConfig::default()).unwrap();
        assert_eq!(corpus.len(), 1);
        let doc = &corpus.documents()[0];
        assert_eq!(doc.len(), 4);
        let spans: Vec<_> = doc
            .spans()
            .iter()
            .map(|s| (s.label().to_string(), s.start(), s.end()))
            .collect();
        assert_eq!(
            spans,
            vec![("NP".to_string(), 0, 2), ("NP".to_string(), 3, 4)]
        );
    }

    #[test]
    fn test_span_open_at_sentence_end_is_closed() {
        let input = "in O\nthe B-NP\nend I-NP\n";
        let corpus = parse_conll(input, &ConllConfig::default()).unwrap();
        let doc = &corpus.documents()[0];
        assert_eq!(doc.spans().len(), 1);
        assert_eq!(doc.spans()[0].end(), 3);
    }

    #[test]
    fn test_last_column_wins_for_multi_column_rows() {
        // CoNLL-2003 layout: token POS chunk NER
        let input = "\
U.N. NNP I-NP B-ORG
official NN I-NP O
Ekeus NNP I-NP B-PER
";
        let corpus = parse_conll(input, &ConllConfig::default()).unwrap();
        let doc = &corpus.documents()[0];
        let labels: Vec<_> = doc.spans().iter().map(|s| s.label().to_string()).collect();
        assert_eq!(labels, vec!["ORG", "PER"]);
    }

    #[test]
    fn test_iob1_inside_opens_a_span() {
        let input = "Ekeus I-PER\nheads O\n";
        let corpus = parse_conll(input, &ConllConfig::default()).unwrap();
        let doc = &corpus.documents()[0];
        assert_eq!(doc.spans().len(), 1);
        assert_eq!(doc.spans()[0].label(), "PER");
    }

    #[test]
    fn test_adjacent_spans_split_by_begin() {
        let input = "Paris B-LOC\nBerlin B-LOC\n";
        let corpus = parse_conll(input, &ConllConfig::default()).unwrap();
        assert_eq!(corpus.documents()[0].spans().len(), 2);
    }

    #[test]
    fn test_nested_columns_decode_each_level() {
        let input = "\
IL-2 B-DNA B-protein
gene I-DNA O
expression O O
";
        let config = ConllConfig {
            tag_columns: TagColumns::AllAfterToken,
        };
        let corpus = parse_conll(input, &config).unwrap();
        let doc = &corpus.documents()[0];
        let mut spans: Vec<_> = doc
            .spans()
            .iter()
            .map(|s| (s.label().to_string(), s.start(), s.end()))
            .collect();
        spans.sort();
        assert_eq!(
            spans,
            vec![
                ("DNA".to_string(), 0, 2),
                ("protein".to_string(), 0, 1)
            ]
        );
    }

    #[test]
    fn test_blank_lines_and_docstart_split_documents() {
        let input = "\
-DOCSTART- -X- O O
Paris B-LOC

London B-LOC
";
        let corpus = parse_conll(input, &ConllConfig::default()).unwrap();
        assert_eq!(corpus.len(), 2);
        assert_eq!(corpus.total_spans(), 2);
    }

    #[test]
    fn test_rejects_single_column_row() {
        let err = parse_conll("orphan\n", &ConllConfig::default()).unwrap_err();
        assert!(matches!(err, Error::Parse(_)));
    }

    #[test]
    fn test_rejects_unrecognized_tag() {
        let err = parse_conll("token NN\n", &ConllConfig::default()).unwrap_err();
        assert!(err.to_string().contains("NN"));
    }

    #[test]
    fn test_rejects_column_count_change() {
        let input = "a B-X B-Y\nb I-X\n";
        let config = ConllConfig {
            tag_columns: TagColumns::AllAfterToken,
        };
        assert!(parse_conll(input, &config).is_err());
    }

    #[test]
    fn test_empty_input_is_empty_corpus() {
        let corpus = parse_conll("", &ConllConfig::default()).unwrap();
        assert!(corpus.is_empty());
    }
}
