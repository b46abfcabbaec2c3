//! Owned byte buffers and the bounds-checked operations over them.

use std::fmt;
use std::ops::{Deref, DerefMut};

use crate::allocator::{Allocator, AllocatorKind, Lease};
use crate::error::RangeError;

/// Largest buffer a slice may request.
pub const MAX_BUFFER_LEN: usize = isize::MAX as usize;

/// A fixed-length byte buffer produced by an [`Allocator`].
///
/// The buffer is never resized. It is released when dropped, or explicitly
/// with [`dispose`](Self::dispose).
pub struct NativeBuffer {
    data: Box<[u8]>,
    kind: AllocatorKind,
    lease: Option<Lease>,
}

impl NativeBuffer {
    /// A zero-filled buffer of `len` bytes. Meant for [`Allocator`] impls.
    pub fn zeroed(len: usize, kind: AllocatorKind) -> Self {
        Self {
            data: vec![0u8; len].into_boxed_slice(),
            kind,
            lease: None,
        }
    }

    /// Wraps existing bytes without copying.
    pub fn from_vec(data: Vec<u8>, kind: AllocatorKind) -> Self {
        Self {
            data: data.into_boxed_slice(),
            kind,
            lease: None,
        }
    }

    pub(crate) fn with_lease(mut self, lease: Lease) -> Self {
        self.lease = Some(lease);
        self
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// The allocator kind this buffer was requested with.
    pub fn kind(&self) -> AllocatorKind {
        self.kind
    }

    /// Read-only view of the contents.
    #[inline]
    pub fn as_slice(&self) -> &[u8] {
        &self.data
    }

    #[inline]
    pub fn as_mut_slice(&mut self) -> &mut [u8] {
        &mut self.data
    }

    /// Moves the contents out, releasing the buffer.
    pub fn into_vec(mut self) -> Vec<u8> {
        std::mem::take(&mut self.data).into_vec()
    }

    /// Releases the buffer.
    pub fn dispose(self) {}

    /// Copies `length` bytes of `source` starting at `start` into the front
    /// of this buffer. See [`copy_into`].
    pub fn copy_from(
        &mut self,
        source: &[u8],
        start: usize,
        length: usize,
    ) -> Result<&mut Self, RangeError> {
        copy_into(&mut self.data, source, start, length)?;
        Ok(self)
    }
}

impl Deref for NativeBuffer {
    type Target = [u8];

    fn deref(&self) -> &[u8] {
        &self.data
    }
}

impl DerefMut for NativeBuffer {
    fn deref_mut(&mut self) -> &mut [u8] {
        &mut self.data
    }
}

impl AsRef<[u8]> for NativeBuffer {
    fn as_ref(&self) -> &[u8] {
        &self.data
    }
}

impl AsMut<[u8]> for NativeBuffer {
    fn as_mut(&mut self) -> &mut [u8] {
        &mut self.data
    }
}

impl PartialEq for NativeBuffer {
    fn eq(&self, other: &Self) -> bool {
        self.data == other.data
    }
}

impl Eq for NativeBuffer {}

impl PartialEq<[u8]> for NativeBuffer {
    fn eq(&self, other: &[u8]) -> bool {
        *self.data == *other
    }
}

impl PartialEq<Vec<u8>> for NativeBuffer {
    fn eq(&self, other: &Vec<u8>) -> bool {
        *self.data == **other
    }
}

impl fmt::Debug for NativeBuffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NativeBuffer")
            .field("kind", &self.kind)
            .field("len", &self.data.len())
            .field("arena", &self.lease.is_some())
            .finish()
    }
}

/// Copies a sub-range of `store` into a new buffer.
///
/// `length` defaults to the rest of the store after `start`. A zero length
/// gives an empty buffer wherever `start` lies. The new buffer shares no
/// storage with `store`.
///
/// # Example
///
/// ```
/// use nativebuf::{slice_from, AllocatorKind};
///
/// let store: Vec<u8> = (0..10).collect();
/// let slice = slice_from(&store, 5, Some(3), &AllocatorKind::Temp).unwrap();
/// assert_eq!(slice.as_slice(), &[5u8, 6, 7]);
/// assert!(slice_from(&store, 8, Some(5), &AllocatorKind::Temp).is_err());
/// ```
pub fn slice_from<S, A>(
    store: &S,
    start: usize,
    length: Option<usize>,
    allocator: &A,
) -> Result<NativeBuffer, RangeError>
where
    S: AsRef<[u8]> + ?Sized,
    A: Allocator + ?Sized,
{
    slice_from_with_limit(store.as_ref(), start, length, MAX_BUFFER_LEN, allocator)
}

pub(crate) fn slice_from_with_limit<A>(
    store: &[u8],
    start: usize,
    length: Option<usize>,
    max_len: usize,
    allocator: &A,
) -> Result<NativeBuffer, RangeError>
where
    A: Allocator + ?Sized,
{
    let available = store.len();
    let range = check_slice(available, start, length, max_len).inspect_err(|err| {
        tracing::debug!(start, ?length, available, %err, "rejected slice");
    })?;

    let mut buffer = allocator.allocate(range.len());
    buffer.copy_from_slice(&store[range]);
    Ok(buffer)
}

fn check_slice(
    available: usize,
    start: usize,
    length: Option<usize>,
    max_len: usize,
) -> Result<std::ops::Range<usize>, RangeError> {
    let length = match length {
        Some(length) => length,
        None => available
            .checked_sub(start)
            .ok_or(RangeError::StartOutOfBounds {
                start,
                len: available,
            })?,
    };

    if length > max_len {
        return Err(RangeError::LengthTooLarge {
            length,
            max: max_len,
        });
    }

    if length == 0 {
        return Ok(0..0);
    }

    match start.checked_add(length) {
        Some(end) if end <= available => Ok(start..end),
        _ => Err(RangeError::RangeExceedsStore {
            start,
            length,
            available,
        }),
    }
}

/// Copies `length` elements of `source` starting at `start` into the front
/// of `destination`.
///
/// All bounds are checked before anything is written. On error the
/// destination is left untouched; on success bytes past `length` are left
/// untouched.
///
/// # Example
///
/// ```
/// use nativebuf::copy_into;
///
/// let mut dest = [0u8; 4];
/// copy_into(&mut dest, b"abcdef", 2, 3).unwrap();
/// assert_eq!(&dest, b"cde\0");
/// ```
pub fn copy_into<T: Copy>(
    destination: &mut [T],
    source: &[T],
    start: usize,
    length: usize,
) -> Result<(), RangeError> {
    let end = match start.checked_add(length) {
        Some(end) if end <= source.len() => end,
        _ => {
            let err = RangeError::RangeExceedsSource {
                start,
                length,
                available: source.len(),
            };
            tracing::debug!(%err, "rejected copy");
            return Err(err);
        }
    };

    if length > destination.len() {
        let err = RangeError::DestinationTooSmall {
            length,
            capacity: destination.len(),
        };
        tracing::debug!(%err, "rejected copy");
        return Err(err);
    }

    destination[..length].copy_from_slice(&source[start..end]);
    Ok(())
}
