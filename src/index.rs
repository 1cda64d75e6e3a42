//! Zero-based segment positioning within a transfer.
//!
//! Provides [`SegmentIndex`], a type-safe wrapper around the wire format's
//! eight-bit index field with overflow-safe increment operations.

use std::num::TryFromIntError;

use bincode::{Decode, Encode};
use derive_more::{Display, From};

/// Largest number of segments a single transfer can carry.
///
/// The on-wire `total` field is a `u8`, so no transfer may be split into more
/// than this many segments. Payloads requiring more are rejected outright by
/// the fragmenter rather than truncated.
pub const MAX_SEGMENTS_PER_TRANSFER: usize = u8::MAX as usize;

/// Zero-based ordinal describing a segment's position within its transfer.
///
/// # Examples
///
/// ```
/// use chunkwire::SegmentIndex;
/// let index = SegmentIndex::new(3);
/// assert_eq!(index.get(), 3);
/// assert!(index.checked_increment().is_some());
/// ```
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Encode, Decode, Display, From,
)]
#[display("{_0}")]
pub struct SegmentIndex(u8);

impl SegmentIndex {
    /// Construct an index from a `u8` value.
    #[must_use]
    pub const fn new(value: u8) -> Self { Self(value) }

    /// Return the first valid segment index.
    #[must_use]
    pub const fn zero() -> Self { Self(0) }

    /// Return the underlying numeric value.
    #[must_use]
    pub const fn get(self) -> u8 { self.0 }

    /// Increment the index, returning `None` on overflow.
    #[must_use]
    pub fn checked_increment(self) -> Option<Self> { self.0.checked_add(1).map(Self) }
}

impl TryFrom<usize> for SegmentIndex {
    type Error = TryFromIntError;

    fn try_from(value: usize) -> Result<Self, Self::Error> { u8::try_from(value).map(Self) }
}

impl From<SegmentIndex> for usize {
    fn from(value: SegmentIndex) -> Self { Self::from(value.0) }
}
