//! Buffer configuration

use serde::{Deserialize, Serialize};

use crate::allocator::{AllocatorKind, Arena};
use crate::buffer::{slice_from_with_limit, NativeBuffer, MAX_BUFFER_LEN};
use crate::decode::{decode, decoded_len};
use crate::error::RangeError;

/// Settings for the buffers a caller requests
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Allocator kind for new arenas (default: temp)
    pub allocator: AllocatorKind,

    /// Largest slice that may be requested (default: isize::MAX)
    pub max_buffer_len: usize,

    /// Report buffers still alive when an arena is dropped (default: true)
    pub leak_warnings: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            allocator: AllocatorKind::Temp,
            max_buffer_len: MAX_BUFFER_LEN,
            leak_warnings: true,
        }
    }
}

impl Config {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the allocator kind
    pub fn allocator(mut self, allocator: AllocatorKind) -> Self {
        self.allocator = allocator;
        self
    }

    /// Set the maximum slice length
    pub fn max_buffer_len(mut self, max_buffer_len: usize) -> Self {
        self.max_buffer_len = max_buffer_len.min(MAX_BUFFER_LEN);
        self
    }

    /// Enable or disable leak reports
    pub fn leak_warnings(mut self, enabled: bool) -> Self {
        self.leak_warnings = enabled;
        self
    }

    /// Create an arena with these settings
    pub fn arena(&self) -> Arena {
        Arena::new(self.allocator).leak_warnings(self.leak_warnings)
    }

    /// [`decode`](crate::decode) into a buffer of the configured kind,
    /// refusing output larger than `max_buffer_len`.
    ///
    /// ```
    /// use nativebuf::{AllocatorKind, Config, Error};
    ///
    /// let config = Config::new().allocator(AllocatorKind::Persistent).max_buffer_len(3);
    /// assert_eq!(config.decode("Zm9v").unwrap().as_slice(), b"foo");
    /// assert!(matches!(config.decode("Zm9vYg=="), Err(Error::Range(_))));
    /// assert!(matches!(config.decode("Zm9"), Err(Error::Format(_))));
    /// ```
    pub fn decode(&self, input: &str) -> crate::Result<NativeBuffer> {
        let max = self.max_buffer_len.min(MAX_BUFFER_LEN);
        let length = decoded_len(input)?;
        if length > max {
            tracing::debug!(length, max, "rejected oversized decode");
            return Err(RangeError::LengthTooLarge { length, max }.into());
        }
        Ok(decode(input, &self.allocator)?)
    }

    /// [`slice_from`](crate::slice_from) bounded by `max_buffer_len`,
    /// allocating with the configured kind.
    pub fn slice_from<S>(
        &self,
        store: &S,
        start: usize,
        length: Option<usize>,
    ) -> Result<NativeBuffer, RangeError>
    where
        S: AsRef<[u8]> + ?Sized,
    {
        slice_from_with_limit(
            store.as_ref(),
            start,
            length,
            self.max_buffer_len.min(MAX_BUFFER_LEN),
            &self.allocator,
        )
    }
}
