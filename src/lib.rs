#![allow(clippy::len_without_is_empty)]

pub mod cli;
pub mod collocation;
pub mod config;
pub mod corpus;
pub mod error;
pub mod extractor;
pub mod frequent_phrases;
pub mod lcp;
pub mod phrase;
pub mod sink;
pub mod suffix_array;
pub mod token;
pub mod vocab;

pub use collocation::{CollocationEnumerator, CollocationRecord};
pub use config::{EngineConfig, EngineConfigBuilder};
pub use corpus::{CorpusView, InMemoryCorpus};
pub use error::Error;
pub use extractor::extract_frequent_phrases;
pub use frequent_phrases::{FrequentPhrases, Rank, RankMap};
pub use lcp::LcpTable;
pub use phrase::{Phrase, PhraseKey};
pub use sink::{BincodeCollocationWriter, BincodePhraseTableWriter, CollocationSink, PhraseTableSink};
pub use suffix_array::{InMemorySuffixArray, SuffixArrayView, MAX_CMP};
pub use token::TokenId;
pub use vocab::Vocabulary;
