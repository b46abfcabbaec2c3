//! Base64 encoding and decoding over allocator-backed byte buffers.
//!
//! Only the standard RFC 4648 alphabet with `=` padding is supported.
//! Decoding asks an [`Allocator`] for a buffer of the exact output size,
//! and the buffer helpers copy between stores and buffers with every
//! bound checked before a byte is written.
//!
//! ```
//! use nativebuf::{decode, encode, Arena, AllocatorKind};
//!
//! let arena = Arena::new(AllocatorKind::Temp);
//! let encoded = encode(b"foobar");
//! assert_eq!(encoded, "Zm9vYmFy");
//!
//! let decoded = decode(&encoded, &arena).unwrap();
//! assert_eq!(decoded.as_slice(), b"foobar");
//! assert_eq!(arena.live_buffers(), 1);
//! ```

mod allocator;
mod buffer;
mod config;
mod decode;
mod encode;
mod error;
mod table;


pub use allocator::{Allocator, AllocatorKind, Arena, UnknownAllocatorKind};
pub use buffer::{copy_into, slice_from, NativeBuffer, MAX_BUFFER_LEN};
pub use config::Config;
pub use decode::{decode, decode_to_vec, decoded_len};
pub use encode::{encode, encoded_len};
pub use error::{Error, FormatError, RangeError, Result};
pub use table::{decode_table, DecodeTable, ALPHABET, PAD};
