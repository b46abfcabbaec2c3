//! Base64 text to bytes.
//!
//! Decoding runs in two passes over the input. The first validates every
//! symbol and computes the exact output size, so the output buffer is
//! requested only for well-formed input and is never resized. The second
//! pass fills it quartet by quartet. Whitespace is skipped in both passes
//! wherever it appears and never counts toward a quartet position.

use crate::allocator::{Allocator, AllocatorKind};
use crate::buffer::NativeBuffer;
use crate::error::FormatError;
use crate::table::{decode_table, DecodeTable, PAD};

const PAD_CHAR: char = PAD as char;

/// Shape of a validated input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Layout {
    /// Significant symbols, padding included.
    symbols: usize,
    /// Trailing padding symbols, at most two.
    padding: usize,
}

impl Layout {
    fn output_len(&self) -> usize {
        self.symbols / 4 * 3 - self.padding
    }
}

fn scan(input: &str, table: &DecodeTable) -> Result<Layout, FormatError> {
    let mut symbols = 0usize;
    let mut padding = 0usize;

    for (offset, ch) in input.char_indices() {
        if ch.is_whitespace() {
            continue;
        }

        if ch == PAD_CHAR {
            if padding == 2 {
                return Err(FormatError::ExcessPadding);
            }
            if symbols % 4 < 2 {
                return Err(FormatError::MisplacedPadding { offset });
            }
            padding += 1;
        } else {
            if padding > 0 {
                return Err(FormatError::DataAfterPadding { ch, offset });
            }
            if table.char_value(ch).is_none() {
                return Err(FormatError::InvalidCharacter { ch, offset });
            }
        }

        symbols += 1;
    }

    if symbols % 4 != 0 {
        return Err(FormatError::InvalidLength(symbols));
    }

    Ok(Layout { symbols, padding })
}

/// Validates `input` and returns the exact number of bytes it decodes to.
///
/// # Example
///
/// ```
/// use nativebuf::decoded_len;
///
/// assert_eq!(decoded_len("Zm9v").unwrap(), 3);
/// assert_eq!(decoded_len("Zm8=").unwrap(), 2);
/// assert_eq!(decoded_len(" Zg==\n").unwrap(), 1);
/// assert!(decoded_len("Zm9").is_err());
/// ```
pub fn decoded_len(input: &str) -> Result<usize, FormatError> {
    scan(input, decode_table()).map(|layout| layout.output_len())
}

/// Decodes a base64 string into a buffer requested from `allocator`.
///
/// Whitespace anywhere in the input is ignored. The input must otherwise
/// consist of whole quartets, with at most two `=` at the very end.
///
/// # Example
///
/// ```
/// use nativebuf::{decode, AllocatorKind};
///
/// let decoded = decode("SGVs bG8=\n", &AllocatorKind::Temp).unwrap();
/// assert_eq!(decoded.as_slice(), b"Hello");
/// ```
pub fn decode<A>(input: &str, allocator: &A) -> Result<NativeBuffer, FormatError>
where
    A: Allocator + ?Sized,
{
    let table = decode_table();
    let layout = scan(input, table).inspect_err(|err| {
        tracing::debug!(%err, input_len = input.len(), "rejected base64 input");
    })?;

    let expected = layout.output_len();
    let mut output = allocator.allocate(expected);
    if expected == 0 {
        return Ok(output);
    }

    let written = fill(input, table, &mut output)?;
    if written != expected {
        return Err(FormatError::LengthMismatch {
            expected,
            actual: written,
        });
    }

    Ok(output)
}

/// Decodes into a plain `Vec`, using temporary allocation.
pub fn decode_to_vec(input: &str) -> Result<Vec<u8>, FormatError> {
    decode(input, &AllocatorKind::Temp).map(NativeBuffer::into_vec)
}

/// Second pass. Returns the number of bytes written.
fn fill(input: &str, table: &DecodeTable, output: &mut [u8]) -> Result<usize, FormatError> {
    let mut quartet = [0u32; 4];
    let mut index = 0;
    let mut padding = 0;
    let mut written = 0;
    let capacity = output.len();

    for (offset, ch) in input.char_indices() {
        if ch.is_whitespace() {
            continue;
        }

        quartet[index] = if ch == PAD_CHAR {
            padding += 1;
            0
        } else {
            table
                .char_value(ch)
                .ok_or(FormatError::InvalidCharacter { ch, offset })? as u32
        };
        index += 1;

        if index < 4 {
            continue;
        }

        let block = (quartet[0] << 18) | (quartet[1] << 12) | (quartet[2] << 6) | quartet[3];
        let bytes = [(block >> 16) as u8, (block >> 8) as u8, block as u8];
        let count = match padding {
            0 => 3,
            1 => 2,
            2 => 1,
            _ => return Err(FormatError::ExcessPadding),
        };

        let end = written + count;
        let dst = output
            .get_mut(written..end)
            .ok_or(FormatError::LengthMismatch {
                expected: capacity,
                actual: end,
            })?;
        dst.copy_from_slice(&bytes[..count]);

        written = end;
        index = 0;
        padding = 0;
    }

    if index != 0 {
        return Err(FormatError::IncompleteQuartet);
    }

    Ok(written)
}
