//! Output sinks for extraction results (spec §4.7 "Output").
//!
//! Spec §4.7 is explicit that the on-disk representation is non-normative:
//! any format that preserves rank order and record identity is acceptable.
//! `PhraseTableSink` and `CollocationSink` exist so a caller can plug in
//! whatever the surrounding pipeline expects (a line-oriented format, a
//! database load, a message queue) without the extractor or enumerator ever
//! depending on a concrete encoding. The bincode-backed writers here are one
//! such implementation, not the contract.

use std::io::Write;

use serde::{Deserialize, Serialize};

use crate::collocation::CollocationRecord;
use crate::error::Error;
use crate::frequent_phrases::Rank;
use crate::phrase::PhraseKey;
use crate::token::TokenId;

/// Receives frequent-phrase table entries in rank order (spec §4.5).
///
/// Implementations write each entry as it arrives rather than buffering the
/// whole table, so a sink backed by a bounded channel or a fixed-size
/// on-disk record stream stays correct.
pub trait PhraseTableSink {
    fn write_phrase(&mut self, rank: Rank, phrase: &PhraseKey, frequency: u64) -> Result<(), Error>;

    /// Flush and release any buffered writer state. Consumes `self` so a
    /// caller cannot write after finishing.
    fn finish(self) -> Result<(), Error>;
}

/// Receives collocation records as the enumerator produces them (spec §4.6).
pub trait CollocationSink {
    fn write_record(&mut self, record: &CollocationRecord) -> Result<(), Error>;

    fn finish(self) -> Result<(), Error>;
}

/// On-disk shape of one phrase-table record. Field widths are fixed so the
/// format is stable across runs with the same rank limit (spec §6
/// `maxPhrases <= 32767`).
#[derive(Debug, Serialize, Deserialize)]
struct PhraseTableRecord {
    rank: u16,
    tokens: Vec<u32>,
    frequency: u64,
}

/// On-disk shape of one collocation record.
#[derive(Debug, Serialize, Deserialize)]
struct CollocationWireRecord {
    rank1: u16,
    rank2: u16,
    pos1: u64,
    pos2: u64,
    min_nonterminal_span: u64,
}

/// A [`PhraseTableSink`] that bincode-encodes each record and appends it to
/// a writer, one record at a time.
pub struct BincodePhraseTableWriter<W: Write> {
    writer: W,
    count: u64,
}

impl<W: Write> BincodePhraseTableWriter<W> {
    pub fn new(writer: W) -> Self {
        BincodePhraseTableWriter { writer, count: 0 }
    }

    pub fn records_written(&self) -> u64 {
        self.count
    }
}

impl<W: Write> PhraseTableSink for BincodePhraseTableWriter<W> {
    fn write_phrase(&mut self, rank: Rank, phrase: &PhraseKey, frequency: u64) -> Result<(), Error> {
        let record = PhraseTableRecord {
            rank: rank.0,
            tokens: phrase.tokens.iter().map(|t| (*t).into()).collect(),
            frequency,
        };
        bincode::serialize_into(&mut self.writer, &record)?;
        self.count += 1;
        Ok(())
    }

    fn finish(mut self) -> Result<(), Error> {
        self.writer.flush()?;
        Ok(())
    }
}

/// A [`CollocationSink`] that bincode-encodes each record and appends it to
/// a writer, one record at a time.
pub struct BincodeCollocationWriter<W: Write> {
    writer: W,
    count: u64,
}

impl<W: Write> BincodeCollocationWriter<W> {
    pub fn new(writer: W) -> Self {
        BincodeCollocationWriter { writer, count: 0 }
    }

    pub fn records_written(&self) -> u64 {
        self.count
    }
}

impl<W: Write> CollocationSink for BincodeCollocationWriter<W> {
    fn write_record(&mut self, record: &CollocationRecord) -> Result<(), Error> {
        let wire = CollocationWireRecord {
            rank1: record.rank1.0,
            rank2: record.rank2.0,
            pos1: record.pos1 as u64,
            pos2: record.pos2 as u64,
            min_nonterminal_span: record.min_nonterminal_span as u64,
        };
        bincode::serialize_into(&mut self.writer, &wire)?;
        self.count += 1;
        Ok(())
    }

    fn finish(mut self) -> Result<(), Error> {
        self.writer.flush()?;
        Ok(())
    }
}
