//! Allocator handles for native buffers.

use std::fmt;
use std::str::FromStr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::buffer::NativeBuffer;

/// Lifetime class of a buffer request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AllocatorKind {
    /// Scratch memory for the current unit of work.
    #[default]
    Temp,
    /// Short-lived memory handed to a background job.
    TempJob,
    /// Memory that lives until explicitly released.
    Persistent,
}

impl AllocatorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            AllocatorKind::Temp => "temp",
            AllocatorKind::TempJob => "tempjob",
            AllocatorKind::Persistent => "persistent",
        }
    }
}

impl fmt::Display for AllocatorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown allocator kind: {0}")]
pub struct UnknownAllocatorKind(pub String);

impl FromStr for AllocatorKind {
    type Err = UnknownAllocatorKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "temp" => Ok(AllocatorKind::Temp),
            "tempjob" | "temp_job" => Ok(AllocatorKind::TempJob),
            "persistent" => Ok(AllocatorKind::Persistent),
            _ => Err(UnknownAllocatorKind(s.to_string())),
        }
    }
}

/// Source of new buffers.
///
/// The codec never looks past this trait: it asks for a buffer of an exact
/// length and fills it.
pub trait Allocator {
    /// Returns a zeroed buffer of exactly `len` bytes.
    fn allocate(&self, len: usize) -> NativeBuffer;
}

/// Plain heap buffers tagged with the kind.
impl Allocator for AllocatorKind {
    fn allocate(&self, len: usize) -> NativeBuffer {
        tracing::trace!(kind = %self, len, "allocating buffer");
        NativeBuffer::zeroed(len, *self)
    }
}

#[derive(Debug, Default)]
pub(crate) struct ArenaStats {
    live_buffers: AtomicUsize,
    live_bytes: AtomicUsize,
    total_allocated: AtomicUsize,
}

/// Ties a buffer back to the arena that produced it.
#[derive(Debug)]
pub(crate) struct Lease {
    stats: Arc<ArenaStats>,
    bytes: usize,
}

impl Drop for Lease {
    fn drop(&mut self) {
        self.stats.live_buffers.fetch_sub(1, Ordering::AcqRel);
        self.stats.live_bytes.fetch_sub(self.bytes, Ordering::AcqRel);
    }
}

/// An allocator with an explicit lifetime.
///
/// Every buffer it hands out is counted until dropped. Dropping the arena
/// while buffers are still alive reports them as leaked.
#[derive(Debug)]
pub struct Arena {
    kind: AllocatorKind,
    leak_warnings: bool,
    stats: Arc<ArenaStats>,
}

impl Arena {
    pub fn new(kind: AllocatorKind) -> Self {
        Self {
            kind,
            leak_warnings: true,
            stats: Arc::new(ArenaStats::default()),
        }
    }

    /// Enable or disable the leak report on drop
    pub fn leak_warnings(mut self, enabled: bool) -> Self {
        self.leak_warnings = enabled;
        self
    }

    pub fn kind(&self) -> AllocatorKind {
        self.kind
    }

    /// Buffers allocated here and not yet released.
    pub fn live_buffers(&self) -> usize {
        self.stats.live_buffers.load(Ordering::Acquire)
    }

    /// Bytes held by buffers allocated here and not yet released.
    pub fn live_bytes(&self) -> usize {
        self.stats.live_bytes.load(Ordering::Acquire)
    }

    /// Bytes handed out over the arena's whole lifetime.
    pub fn total_allocated(&self) -> usize {
        self.stats.total_allocated.load(Ordering::Acquire)
    }
}

impl Allocator for Arena {
    fn allocate(&self, len: usize) -> NativeBuffer {
        self.stats.live_buffers.fetch_add(1, Ordering::AcqRel);
        self.stats.live_bytes.fetch_add(len, Ordering::AcqRel);
        self.stats.total_allocated.fetch_add(len, Ordering::AcqRel);
        tracing::trace!(kind = %self.kind, len, "allocating arena buffer");

        let lease = Lease {
            stats: Arc::clone(&self.stats),
            bytes: len,
        };
        NativeBuffer::zeroed(len, self.kind).with_lease(lease)
    }
}

impl Drop for Arena {
    fn drop(&mut self) {
        let live = self.live_buffers();
        if self.leak_warnings && live > 0 {
            tracing::warn!(
                kind = %self.kind,
                live_buffers = live,
                live_bytes = self.live_bytes(),
                "arena dropped with buffers still alive"
            );
        }
    }
}
