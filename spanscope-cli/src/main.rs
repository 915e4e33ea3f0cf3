//! spanscope - Span dataset profiling CLI
//!
//! Characterizes the labeled spans of an annotated corpus before any model
//! is trained on it: per-label frequency, span length statistics, and the
//! two distributional distinctiveness scores (interior and boundary KL
//! divergence against the corpus background).
//!
//! # Usage
//!
//! ```bash
//! # Profile a JSONL corpus
//! spanscope corpus.jsonl
//!
//! # Profile CoNLL-2003 NER columns
//! spanscope train.conll
//!
//! # GENIA-style nested IOB columns, divergences in bits
//! spanscope genia.iob2 --nested --log-base base2
//!
//! # Machine-readable output with a custom smoothing constant
//! spanscope corpus.jsonl --json --epsilon 1e-4
//! ```

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, ValueEnum};
use log::LevelFilter;

use spanscope::ingest::{load_conll_with, load_jsonl, ConllConfig, CorpusFormat, TagColumns};
use spanscope::{analyze, Corpus, LogBase, MetricReport, SmoothingConfig, DEFAULT_EPSILON};

mod output;

use output::{divider, log_info, print_note, print_table};

// ============================================================================
// CLI Structure
// ============================================================================

/// Profile the labeled spans of an annotated corpus.
#[derive(Parser, Debug)]
#[command(name = "spanscope", version, about, arg_required_else_help(true))]
struct Cli {
    /// Path to the corpus file (.jsonl, .conll, .iob, .iob2)
    input: PathBuf,

    /// Corpus format (inferred from the file extension when omitted)
    #[arg(long, value_enum)]
    format: Option<FormatArg>,

    /// Treat every column after the token as a nested IOB level
    /// (GENIA-style exports); CoNLL input only
    #[arg(long)]
    nested: bool,

    /// Additive smoothing constant for the distinctiveness metrics
    #[arg(long, default_value_t = DEFAULT_EPSILON)]
    epsilon: f64,

    /// Logarithm base for the distinctiveness metrics
    #[arg(long, value_enum, default_value = "natural")]
    log_base: LogBaseArg,

    /// Emit the report as JSON instead of tables
    #[arg(long)]
    json: bool,

    /// Print the interpretation notes for each span property
    #[arg(long)]
    verbose: bool,

    /// Suppress informational messages
    #[arg(short, long)]
    quiet: bool,

    /// Log verbosity (-v info, -vv debug)
    #[arg(short = 'v', action = clap::ArgAction::Count)]
    verbosity: u8,
}

/// Corpus format selection.
#[derive(Debug, Clone, Copy, ValueEnum)]
enum FormatArg {
    /// Whitespace-separated CoNLL columns with IOB tags
    Conll,
    /// Line-delimited JSON records
    Jsonl,
}

impl From<FormatArg> for CorpusFormat {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Conll => CorpusFormat::Conll,
            FormatArg::Jsonl => CorpusFormat::Jsonl,
        }
    }
}

/// Logarithm base selection.
#[derive(Debug, Clone, Copy, ValueEnum)]
enum LogBaseArg {
    /// Natural logarithm (divergence in nats)
    Natural,
    /// Base-2 logarithm (divergence in bits)
    Base2,
}

impl From<LogBaseArg> for LogBase {
    fn from(arg: LogBaseArg) -> Self {
        match arg {
            LogBaseArg::Natural => LogBase::Natural,
            LogBaseArg::Base2 => LogBase::Base2,
        }
    }
}

// ============================================================================
// Interpretation notes (shown with --verbose)
// ============================================================================

const FREQUENCY_NOTE: &str = "\
Number of spans per type in the corpus. Frequency tends to be
positively correlated with model performance, though transfer
learning shrinks the amount of data a model needs.";

const LENGTH_NOTE: &str = "\
Span length statistics in tokens. Models with strict Markov
assumptions (CRFs) degrade on long spans; LSTMs and Transformers
tolerate them better.";

const SPAN_DISTINCT_NOTE: &str = "\
KL divergence between the unigram distribution of tokens inside the
spans and the corpus distribution. High values mean span-internal
vocabulary differs from the rest of the text, so local features
carry most of the signal; low values call for sequence context.";

const BOUNDARY_DISTINCT_NOTE: &str = "\
KL divergence between the unigram distribution of span boundary
tokens (first, last, and the immediately adjacent tokens) and the
corpus distribution. High values mean span starts and ends are easy
to spot; low values indicate smooth transitions.";

// ============================================================================
// Entry point
// ============================================================================

fn main() -> ExitCode {
    let cli = Cli::parse();

    let filter = match cli.verbosity {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        _ => LevelFilter::Debug,
    };
    env_logger::Builder::from_default_env()
        .filter_level(filter)
        .init();

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(msg) => {
            log::error!("{}", msg);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<(), String> {
    let corpus = load(cli)?;
    log_info(
        &format!(
            "Loaded {} documents ({} spans) from {}",
            corpus.len(),
            corpus.total_spans(),
            cli.input.display()
        ),
        cli.quiet,
    );

    let config = SmoothingConfig {
        epsilon: cli.epsilon,
        log_base: cli.log_base.into(),
    };
    let report = analyze(&corpus, config);

    if cli.json {
        let json = serde_json::to_string_pretty(&report)
            .map_err(|e| format!("Failed to serialize report: {e}"))?;
        println!("{}", json);
    } else {
        render(&report, cli.verbose);
    }
    Ok(())
}

fn load(cli: &Cli) -> Result<Corpus, String> {
    let format = cli
        .format
        .map(CorpusFormat::from)
        .or_else(|| CorpusFormat::from_path(&cli.input))
        .ok_or_else(|| {
            format!(
                "Cannot infer corpus format from {}; pass --format",
                cli.input.display()
            )
        })?;

    if cli.nested && format != CorpusFormat::Conll {
        return Err("--nested only applies to CoNLL input".to_string());
    }

    let result = match format {
        CorpusFormat::Conll => {
            let tag_columns = if cli.nested {
                TagColumns::AllAfterToken
            } else {
                TagColumns::Last
            };
            load_conll_with(&cli.input, &ConllConfig { tag_columns })
        }
        CorpusFormat::Jsonl => load_jsonl(&cli.input),
    };
    result.map_err(|e| format!("Failed to load {}: {e}", cli.input.display()))
}

// ============================================================================
// Report rendering
// ============================================================================

fn render(report: &MetricReport, verbose: bool) {
    divider("Span Type Frequency");
    if verbose {
        print_note(FREQUENCY_NOTE);
    }
    let rows: Vec<Vec<String>> = report
        .labels
        .iter()
        .map(|(label, r)| vec![label.clone(), r.frequency.to_string()])
        .collect();
    print_table(&["Span Type", "Frequency"], &rows);
    println!("Total spans: {}", report.total_spans);

    divider("Span Length");
    if verbose {
        print_note(LENGTH_NOTE);
    }
    let rows: Vec<Vec<String>> = report
        .labels
        .iter()
        .map(|(label, r)| match &r.length {
            Some(l) => vec![
                label.clone(),
                format!("{:.2}", l.mean),
                format!("{:.2}", l.stddev),
                l.min.to_string(),
                l.max.to_string(),
                format!("{:.2}", l.geometric_mean),
            ],
            None => vec![label.clone(), "-".into(), "-".into(), "-".into(), "-".into(), "-".into()],
        })
        .collect();
    print_table(
        &["Span Type", "Mean", "Std Dev", "Min", "Max", "Geo Mean"],
        &rows,
    );

    divider("Span Distinctiveness");
    if verbose {
        print_note(SPAN_DISTINCT_NOTE);
    }
    print_divergence_table(report, |r| r.span_distinctiveness);

    divider("Span Boundary Distinctiveness");
    if verbose {
        print_note(BOUNDARY_DISTINCT_NOTE);
    }
    print_divergence_table(report, |r| r.boundary_distinctiveness);
}

fn print_divergence_table(
    report: &MetricReport,
    metric: impl Fn(&spanscope::LabelReport) -> Option<f64>,
) {
    let rows: Vec<Vec<String>> = report
        .labels
        .iter()
        .map(|(label, r)| {
            let value = metric(r).map_or_else(|| "-".to_string(), |d| format!("{:.4}", d));
            vec![label.clone(), value]
        })
        .collect();
    print_table(&["Span Type", "Distinctiveness"], &rows);
}
