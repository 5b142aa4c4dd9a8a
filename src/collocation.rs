//! The collocation enumerator: a single streaming pass producing every
//! sentence-bounded, window-bounded co-occurrence of two frequent phrases
//! (spec §3 "Collocation record", §4.6).

use std::collections::VecDeque;

use log::trace;

use crate::config::EngineConfig;
use crate::corpus::CorpusView;
use crate::frequent_phrases::{FrequentPhrases, Rank, RankMap};
use crate::phrase::PhraseKey;

/// One emitted collocation: `pos1 <= pos2`, both positions start in the
/// same sentence, `pos2 - pos1 <= windowSize`, and both phrases are
/// members of `FrequentPhrases` under the given ranks (spec §3, §8
/// invariant 4).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CollocationRecord {
    pub rank1: Rank,
    pub rank2: Rank,
    pub pos1: usize,
    pub pos2: usize,
    /// Carried alongside the record as a configuration tag (spec §4.6
    /// "minNonterminalSpan"); the enumerator does not filter on it.
    pub min_nonterminal_span: usize,
}

#[derive(Clone, Copy)]
struct WindowEntry {
    rank: Rank,
    start: usize,
}

/// A streaming, `Iterator`-based pass over the corpus producing
/// [`CollocationRecord`]s in the order spec §4.6 mandates (sentence-drain
/// and window-age-out, each iterating oldest-to-newest).
///
/// The enumerator never materializes the whole output: at most one
/// position's worth of records is buffered in `pending` at a time, so a
/// caller that stops consuming the iterator partway through halts
/// production, matching spec §5 "the producer must not have
/// pre-materialized all records".
pub struct CollocationEnumerator<'a, C: CorpusView> {
    corpus: &'a C,
    ranks: &'a RankMap,
    config: &'a EngineConfig,
    n: usize,
    p: usize,
    current_sentence: usize,
    /// Exclusive upper bound of the current sentence (spec §9 Open
    /// Question: resolved uniformly exclusive, `sentence_start(s + 1)`).
    end_of_sentence: usize,
    window: VecDeque<WindowEntry>,
    pending: VecDeque<CollocationRecord>,
}

impl<'a, C: CorpusView> CollocationEnumerator<'a, C> {
    pub fn new(
        corpus: &'a C,
        frequent_phrases: &'a FrequentPhrases,
        ranks: &'a RankMap,
        config: &'a EngineConfig,
    ) -> Self {
        debug_assert_eq!(frequent_phrases.len(), ranks.len());
        let n = corpus.length();
        let end_of_sentence = if corpus.num_sentences() > 0 {
            corpus.sentence_start(1)
        } else {
            0
        };
        CollocationEnumerator {
            corpus,
            ranks,
            config,
            n,
            p: 0,
            current_sentence: 0,
            end_of_sentence,
            window: VecDeque::new(),
            pending: VecDeque::new(),
        }
    }

    fn step(&mut self) {
        let p = self.p;

        // 1. Candidate generation: every frequent phrase starting at p.
        for m in 1..=self.config.max_phrase_length {
            if p + m > self.n || p + m > self.end_of_sentence {
                break;
            }
            let tokens = self.corpus.phrase_tokens(p, p + m);
            let key = PhraseKey {
                tokens: tokens.to_vec(),
            };
            if let Some(rank) = self.ranks.rank(&key) {
                self.window.push_back(WindowEntry { rank, start: p });
            }
        }

        // `end_of_sentence` is the exclusive bound (spec §9 resolution), so
        // the last token of the sentence is at `end_of_sentence - 1`.
        if p + 1 == self.end_of_sentence {
            self.drain_sentence();
            self.current_sentence += 1;
            self.end_of_sentence = if self.current_sentence < self.corpus.num_sentences() {
                self.corpus.sentence_start(self.current_sentence + 1)
            } else {
                self.n
            };
        } else {
            self.age_out(p);
        }

        self.p += 1;
    }

    fn drain_sentence(&mut self) {
        let entries: Vec<WindowEntry> = self.window.drain(..).collect();
        for a in 0..entries.len() {
            for b in (a + 1)..entries.len() {
                if entries[b].start - entries[a].start <= self.config.window_size {
                    self.pending.push_back(make_record(
                        entries[a],
                        entries[b],
                        self.config.min_nonterminal_span,
                    ));
                }
            }
        }
        trace!("drained {} window entries at sentence boundary", entries.len());
    }

    fn age_out(&mut self, p: usize) {
        while let Some(&front) = self.window.front() {
            if front.start + self.config.window_size < p {
                let aged = self.window.pop_front().unwrap();
                for &other in self.window.iter() {
                    if other.start - aged.start <= self.config.window_size {
                        self.pending.push_back(make_record(
                            aged,
                            other,
                            self.config.min_nonterminal_span,
                        ));
                    }
                }
            } else {
                break;
            }
        }
    }
}

fn make_record(a: WindowEntry, b: WindowEntry, min_nonterminal_span: usize) -> CollocationRecord {
    CollocationRecord {
        rank1: a.rank,
        rank2: b.rank,
        pos1: a.start,
        pos2: b.start,
        min_nonterminal_span,
    }
}

impl<'a, C: CorpusView> Iterator for CollocationEnumerator<'a, C> {
    type Item = CollocationRecord;

    fn next(&mut self) -> Option<CollocationRecord> {
        loop {
            if let Some(record) = self.pending.pop_front() {
                return Some(record);
            }
            if self.p >= self.n {
                return None;
            }
            self.step();
        }
    }
}
