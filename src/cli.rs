//! Command-line surface (spec §6).
//!
//! Two input modes: a single plain-text corpus (tokenized and indexed on
//! the fly), or three pre-built binary files (vocabulary, corpus, suffix
//! array) produced by an earlier pipeline stage. Exactly one mode's
//! arguments must be supplied.

use std::fs::File;
use std::io::{BufWriter, Read as _};
use std::path::PathBuf;

use clap::Parser;

use crate::collocation::CollocationEnumerator;
use crate::config::EngineConfig;
use crate::corpus::InMemoryCorpus;
use crate::error::Error;
use crate::extractor::extract_frequent_phrases;
use crate::frequent_phrases::RankMap;
use crate::lcp::LcpTable;
use crate::sink::{BincodeCollocationWriter, BincodePhraseTableWriter, CollocationSink, PhraseTableSink};
use crate::suffix_array::{construct::build_suffix_array, construct::tokenize_lines, InMemorySuffixArray};
use crate::vocab::Vocabulary;

/// Frequent phrase discovery and collocation enumeration over a corpus.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Plain-text corpus, one sentence per line. Mutually exclusive with
    /// `--vocab`/`--corpus`/`--sa`.
    pub corpus_path: Option<PathBuf>,

    /// Pre-built vocabulary file (bincode).
    #[arg(long, requires_all = ["corpus_bin", "sa"])]
    pub vocab: Option<PathBuf>,

    /// Pre-built corpus file (bincode), used with `--vocab`/`--sa`.
    #[arg(long = "corpus", requires_all = ["vocab", "sa"])]
    pub corpus_bin: Option<PathBuf>,

    /// Pre-built suffix array file (bincode), used with `--vocab`/`--corpus`.
    #[arg(long, requires_all = ["vocab", "corpus_bin"])]
    pub sa: Option<PathBuf>,

    /// Minimum occurrence count for a phrase to be retained (spec §6).
    #[arg(long, default_value_t = 0)]
    pub min_frequency: u64,

    /// Maximum number of frequent phrases to retain (spec §6, <= 32767).
    #[arg(long, default_value_t = 100)]
    pub max_phrases: u32,

    /// Maximum phrase length in tokens (spec §6, <= MAX_CMP).
    #[arg(long, default_value_t = 10)]
    pub max_phrase_length: usize,

    /// Collocation sliding-window radius in tokens (spec §6).
    #[arg(long, default_value_t = 10)]
    pub window_size: usize,

    /// Minimum nonterminal span, carried through to collocation records
    /// uninterpreted (spec §4.6).
    #[arg(long, default_value_t = 2)]
    pub min_nonterminal_span: usize,

    /// Output path for the phrase table (bincode).
    #[arg(long, default_value = "phrases.bin")]
    pub phrases_out: PathBuf,

    /// Output path for collocation records (bincode).
    #[arg(long, default_value = "collocations.bin")]
    pub collocations_out: PathBuf,
}

/// Exit codes (spec §6): `0` success, `1` fatal I/O or corrupt-input error,
/// `2` invalid arguments (a configuration error, detected before the sweep
/// starts).
pub const EXIT_OK: i32 = 0;
pub const EXIT_FAILURE: i32 = 1;
pub const EXIT_CONFIGURATION_ERROR: i32 = 2;

/// Run the CLI to completion, returning the process exit code.
pub fn run(args: Args) -> i32 {
    let config = match EngineConfig::new(
        args.min_frequency,
        args.max_phrases,
        args.max_phrase_length,
        args.window_size,
        args.min_nonterminal_span,
    ) {
        Ok(config) => config,
        Err(err) => {
            log::error!("{}", err);
            return EXIT_CONFIGURATION_ERROR;
        }
    };

    match run_inner(&args, &config) {
        Ok(()) => EXIT_OK,
        Err(err) => {
            log::error!("{}", err);
            EXIT_FAILURE
        }
    }
}

fn run_inner(args: &Args, config: &EngineConfig) -> Result<(), Error> {
    let (_vocab, corpus) = load_corpus(args)?;
    let sa = load_suffix_array(args, &corpus)?;

    let lcp = LcpTable::build(&corpus, &sa);
    let frequent_phrases = extract_frequent_phrases(&corpus, &sa, &lcp, config);
    log::info!("extracted {} frequent phrases", frequent_phrases.len());

    let mut phrase_sink = BincodePhraseTableWriter::new(BufWriter::new(File::create(&args.phrases_out)?));
    let ranks = RankMap::build(&frequent_phrases);
    for (phrase, frequency) in frequent_phrases.iter() {
        let rank = ranks.rank(phrase).expect("rank built from same phrase set");
        phrase_sink.write_phrase(rank, phrase, frequency)?;
    }
    phrase_sink.finish()?;

    let mut collocation_sink =
        BincodeCollocationWriter::new(BufWriter::new(File::create(&args.collocations_out)?));
    let enumerator = CollocationEnumerator::new(&corpus, &frequent_phrases, &ranks, config);
    let mut n_records = 0u64;
    for record in enumerator {
        collocation_sink.write_record(&record)?;
        n_records += 1;
    }
    collocation_sink.finish()?;
    log::info!("emitted {} collocation records", n_records);

    Ok(())
}

fn load_corpus(args: &Args) -> Result<(Vocabulary, InMemoryCorpus), Error> {
    if let Some(path) = &args.corpus_path {
        let mut text = String::new();
        File::open(path)?.read_to_string(&mut text)?;
        let (tokens, by_word) = tokenize_lines(&text);
        let vocab = Vocabulary::from_tokenized(by_word);
        let corpus = InMemoryCorpus::from_tokens(tokens)?;
        return Ok((vocab, corpus));
    }

    let vocab_path = args
        .vocab
        .as_ref()
        .ok_or_else(|| Error::Configuration("either a corpus path or --vocab/--corpus/--sa must be given".to_string()))?;
    let corpus_path = args.corpus_bin.as_ref().expect("clap requires_all enforces this");
    let vocab = Vocabulary::load(File::open(vocab_path)?)?;
    let corpus: InMemoryCorpus = bincode::deserialize_from(File::open(corpus_path)?)?;
    Ok((vocab, corpus))
}

fn load_suffix_array(args: &Args, corpus: &InMemoryCorpus) -> Result<InMemorySuffixArray, Error> {
    if let Some(sa_path) = &args.sa {
        let sa: Vec<usize> = bincode::deserialize_from(File::open(sa_path)?)?;
        return InMemorySuffixArray::new(sa);
    }
    Ok(InMemorySuffixArray::new_unchecked(build_suffix_array(corpus)))
}
