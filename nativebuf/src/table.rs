//! The process-wide base64 decode table.

use std::sync::LazyLock;

/// Standard base64 alphabet (RFC 4648).
pub const ALPHABET: &[u8; 64] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789+/";

/// The padding symbol.
pub const PAD: u8 = b'=';

/// Built on first use, immutable afterwards.
static DECODE_TABLE: LazyLock<DecodeTable> = LazyLock::new(DecodeTable::build);

/// Maps every byte value to its 6-bit symbol value, or [`DecodeTable::INVALID`].
#[derive(Clone, PartialEq, Eq)]
pub struct DecodeTable([u8; 256]);

impl DecodeTable {
    /// Sentinel for bytes that are not base64 symbols.
    pub const INVALID: u8 = 0xFF;

    /// Builds a fresh table for [`ALPHABET`].
    ///
    /// This has no side effects besides a trace event, so building it more
    /// than once always yields equal tables.
    pub fn build() -> Self {
        let mut table = [Self::INVALID; 256];
        for (i, &c) in ALPHABET.iter().enumerate() {
            table[c as usize] = i as u8;
        }
        tracing::trace!("built base64 decode table");
        Self(table)
    }

    /// Returns the 6-bit value of `byte`, if it is a base64 symbol.
    #[inline]
    pub fn value(&self, byte: u8) -> Option<u8> {
        match self.0[byte as usize] {
            Self::INVALID => None,
            v => Some(v),
        }
    }

    /// Like [`value`](Self::value) but for any `char`; everything outside
    /// the single-byte range is invalid.
    #[inline]
    pub fn char_value(&self, ch: char) -> Option<u8> {
        u8::try_from(ch).ok().and_then(|b| self.value(b))
    }

    /// Number of entries that map to a symbol value.
    pub fn symbol_count(&self) -> usize {
        self.0.iter().filter(|&&v| v != Self::INVALID).count()
    }
}

impl std::fmt::Debug for DecodeTable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DecodeTable")
            .field("symbols", &self.symbol_count())
            .finish()
    }
}

/// Returns the shared decode table, building it if this is the first use.
#[inline]
pub fn decode_table() -> &'static DecodeTable {
    &DECODE_TABLE
}
