//! Phrase identity (spec §3 "Phrase", §9 Design Note "Phrase identity").
//!
//! A phrase is conceptually a token-id sequence. It is cheaper to pass
//! around as a `(start, end)` view into the corpus, but equality and
//! hashing must be defined over the token sequence itself, not over the
//! positions — two phrases starting at different positions can be equal.
//! A copy is materialized only when a phrase is inserted into the top-N
//! heap or the `FrequentPhrases` mapping, so heap entries stay valid after
//! the source corpus position is revisited by the sweep.

use serde::{Deserialize, Serialize};
use std::hash::{Hash, Hasher};

use crate::token::TokenId;

/// A borrowed view of a phrase: a token-id slice plus the corpus position
/// it was read from (kept for diagnostics; not part of equality/identity).
#[derive(Debug, Clone, Copy)]
pub struct Phrase<'a> {
    pub tokens: &'a [TokenId],
    pub start: usize,
}

impl<'a> Phrase<'a> {
    pub fn new(tokens: &'a [TokenId], start: usize) -> Self {
        Phrase { tokens, start }
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    pub fn to_key(&self) -> PhraseKey {
        PhraseKey {
            tokens: self.tokens.to_vec(),
        }
    }
}

impl PartialEq for Phrase<'_> {
    fn eq(&self, other: &Self) -> bool {
        self.tokens == other.tokens
    }
}
impl Eq for Phrase<'_> {}

impl Hash for Phrase<'_> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.tokens.hash(state);
    }
}

/// An owned, hashable phrase identity: the materialized token-id sequence.
///
/// Two `PhraseKey`s are equal iff their token sequences are equal (spec §3
/// "Phrase... two phrases are equal iff their token-ID sequences are
/// equal"), independent of where either occurrence was read from.
#[derive(Debug, Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct PhraseKey {
    pub tokens: Vec<TokenId>,
}

impl PhraseKey {
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }
}

impl<'a> From<Phrase<'a>> for PhraseKey {
    fn from(phrase: Phrase<'a>) -> Self {
        phrase.to_key()
    }
}
