//! Bidirectional token-string vocabulary (spec §6 "vocab file").
//!
//! The CLI's three-file mode takes a pre-built vocabulary, corpus, and
//! suffix array rather than plain text, so the pipeline upstream of this
//! crate can reuse a vocabulary across many corpora. The single-path mode
//! builds one on the fly via [`Vocabulary::from_tokenized`].

use std::io::{Read, Write};

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::error::Error;
use crate::token::TokenId;

/// Maps vocabulary entries to [`TokenId`]s and back. `TokenId::EOS` is
/// always present and always maps to the empty string, so a vocabulary
/// loaded from disk never needs a special case for it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Vocabulary {
    words: Vec<String>,
    by_word: FxHashMap<String, TokenId>,
}

impl Vocabulary {
    /// An empty vocabulary containing only the reserved EOS entry.
    pub fn new() -> Self {
        let words = vec![String::new()];
        let mut by_word = FxHashMap::default();
        by_word.insert(String::new(), TokenId::EOS);
        Vocabulary { words, by_word }
    }

    /// Build from a word-to-id map produced while tokenizing plain text
    /// (see [`crate::suffix_array::construct::tokenize_lines`]).
    pub fn from_tokenized(by_word: FxHashMap<String, TokenId>) -> Self {
        let mut vocab = Vocabulary::new();
        let mut entries: Vec<(String, TokenId)> = by_word.into_iter().collect();
        entries.sort_by_key(|(_, id)| id.0);
        for (word, id) in entries {
            vocab.words.resize(vocab.words.len().max(id.0 as usize + 1), String::new());
            vocab.words[id.0 as usize] = word.clone();
            vocab.by_word.insert(word, id);
        }
        vocab
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.len() <= 1
    }

    pub fn id_of(&self, word: &str) -> Option<TokenId> {
        self.by_word.get(word).copied()
    }

    pub fn word_of(&self, id: TokenId) -> Result<&str, Error> {
        self.words
            .get(id.0 as usize)
            .map(String::as_str)
            .ok_or_else(|| Error::Vocabulary(format!("token id {} out of range", id.0)))
    }

    pub fn save<W: Write>(&self, writer: W) -> Result<(), Error> {
        bincode::serialize_into(writer, self)?;
        Ok(())
    }

    pub fn load<R: Read>(reader: R) -> Result<Self, Error> {
        let vocab: Vocabulary = bincode::deserialize_from(reader)?;
        Ok(vocab)
    }
}

impl Default for Vocabulary {
    fn default() -> Self {
        Vocabulary::new()
    }
}
