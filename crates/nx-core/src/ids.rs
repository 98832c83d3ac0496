use core::fmt;
use core::num::NonZeroU32;

use crate::error::{NxError, NxResult};

/// Compact, stable identifier used across the topology graph.
///
/// - `u32` keeps memory small
/// - `NonZero` enables `Option<Id>` to be pointer-optimized
///
/// Ordering follows the 0-based index, which is the canonical iteration
/// order for every phase of the extraction.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Id(NonZeroU32);

impl Id {
    /// Create an Id from a 0-based index by storing index+1.
    ///
    /// `None` for `u32::MAX`, which has no index+1 representation.
    pub fn from_index(index: u32) -> Option<Self> {
        index.checked_add(1).and_then(NonZeroU32::new).map(Self)
    }

    /// Create an Id for a `usize` slot, failing when it leaves the id range.
    pub fn try_from_slot(slot: usize) -> NxResult<Self> {
        u32::try_from(slot)
            .ok()
            .and_then(Self::from_index)
            .ok_or(NxError::IdOverflow { index: slot })
    }

    /// Recover the 0-based index.
    pub fn index(self) -> u32 {
        self.0.get() - 1
    }

    /// Index as `usize`, for slot lookups.
    pub fn slot(self) -> usize {
        self.index() as usize
    }
}

impl fmt::Debug for Id {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Id({})", self.index())
    }
}

impl fmt::Display for Id {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.index())
    }
}

/// Domain-specific ID aliases for clarity (no runtime cost).
pub type NodeId = Id;

/// Identifier of one labeling pass.
///
/// Passes are numbered from 1 and only ever move forward. The extractor
/// threads a `PassId` through its phases instead of keeping a global counter.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PassId(NonZeroU32);

impl PassId {
    pub const FIRST: PassId = PassId(NonZeroU32::MIN);

    pub fn new(n: u32) -> Option<Self> {
        NonZeroU32::new(n).map(Self)
    }

    pub fn get(self) -> u32 {
        self.0.get()
    }

    /// The following pass.
    pub fn next(self) -> Self {
        Self(self.0.saturating_add(1))
    }
}

impl Default for PassId {
    fn default() -> Self {
        Self::FIRST
    }
}

impl fmt::Debug for PassId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PassId({})", self.get())
    }
}

impl fmt::Display for PassId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "P{}", self.get())
    }
}
