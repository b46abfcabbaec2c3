//! Bytes to base64 text.

use crate::table::{ALPHABET, PAD};

/// Calculates the encoded length for a given input length.
///
/// # Example
///
/// ```
/// use nativebuf::encoded_len;
///
/// assert_eq!(encoded_len(0), 0);
/// assert_eq!(encoded_len(1), 4);
/// assert_eq!(encoded_len(3), 4);
/// assert_eq!(encoded_len(4), 8);
/// ```
pub fn encoded_len(len: usize) -> usize {
    len.div_ceil(3) * 4
}

#[inline]
fn symbol(n: u32, shift: u32) -> char {
    ALPHABET[((n >> shift) & 0x3F) as usize] as char
}

/// Encodes binary data to a padded base64 string.
///
/// Never fails: every byte sequence has an encoding.
///
/// # Example
///
/// ```
/// use nativebuf::encode;
///
/// assert_eq!(encode(b"Hello"), "SGVsbG8=");
/// ```
pub fn encode(data: &[u8]) -> String {
    if data.is_empty() {
        return String::new();
    }

    let mut result = String::with_capacity(encoded_len(data.len()));

    let chunks = data.chunks_exact(3);
    let remainder = chunks.remainder();

    for chunk in chunks {
        let n = ((chunk[0] as u32) << 16) | ((chunk[1] as u32) << 8) | (chunk[2] as u32);

        result.push(symbol(n, 18));
        result.push(symbol(n, 12));
        result.push(symbol(n, 6));
        result.push(symbol(n, 0));
    }

    match *remainder {
        [b0] => {
            let n = (b0 as u32) << 16;
            result.push(symbol(n, 18));
            result.push(symbol(n, 12));
            result.push(PAD as char);
            result.push(PAD as char);
        }
        [b0, b1] => {
            let n = ((b0 as u32) << 16) | ((b1 as u32) << 8);
            result.push(symbol(n, 18));
            result.push(symbol(n, 12));
            result.push(symbol(n, 6));
            result.push(PAD as char);
        }
        _ => {}
    }

    debug_assert_eq!(result.len(), encoded_len(data.len()));
    result
}
