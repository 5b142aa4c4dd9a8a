//! Token identifiers.

use serde::{Deserialize, Serialize};

/// A vocabulary entry id.
///
/// `TokenId(0)` is reserved as the end-of-sentence sentinel, mirroring the
/// teacher crate's convention of reserving `0` as a separator between
/// concatenated texts (see `TextBuilder`).
#[derive(Clone, Copy, Debug, Eq, PartialEq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct TokenId(pub u32);

impl TokenId {
    /// The end-of-sentence sentinel id.
    pub const EOS: TokenId = TokenId(0);

    pub fn is_eos(self) -> bool {
        self == TokenId::EOS
    }
}

impl From<u32> for TokenId {
    fn from(value: u32) -> Self {
        TokenId(value)
    }
}

impl From<TokenId> for u32 {
    fn from(value: TokenId) -> Self {
        value.0
    }
}
