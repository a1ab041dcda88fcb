//! Node identity within a [`Scene`](crate::Scene).
//!
//! Ids are handed out monotonically and never reused, so an id that outlives
//! its node simply stops resolving instead of aliasing a newer node.

use std::fmt;

// =============================================================================
// NodeId
// =============================================================================

/// Identifier of a node in a scene arena.
///
/// # Memory Layout
///
/// - 8 bytes (u64)
/// - Copy, no heap allocation
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[must_use]
pub struct NodeId(pub(crate) u64);

impl NodeId {
    /// Create a NodeId from a raw u64 value.
    #[inline]
    pub const fn from_raw(raw: u64) -> Self {
        Self(raw)
    }

    /// Get the raw u64 representation
    #[inline]
    pub const fn as_raw(&self) -> u64 {
        self.0
    }
}

impl fmt::Debug for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "NodeId({})", self.0)
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

// =============================================================================
// IdAllocator
// =============================================================================

/// Monotonic id source owned by a scene.
#[derive(Debug, Default)]
pub(crate) struct IdAllocator {
    next: u64,
}

impl IdAllocator {
    pub(crate) fn next_id(&mut self) -> NodeId {
        let id = NodeId(self.next);
        self.next += 1;
        id
    }
}
