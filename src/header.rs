use bincode::{Decode, Encode};

use crate::{SegmentIndex, SendTimestamp, SenderId, TransferId};

/// Header describing a single segment.
///
/// `SegmentHeader` is agnostic of the carrying transport. It captures just
/// enough information for a receiver to stitch segments back together and to
/// apply staleness filtering, while remaining small enough to copy by value.
///
/// # Examples
///
/// ```
/// use chunkwire::{SegmentHeader, SegmentIndex, SendTimestamp, SenderId, TransferId};
/// let header = SegmentHeader::new(
///     TransferId::new(7),
///     SegmentIndex::zero(),
///     3,
///     SenderId::new(1),
///     SendTimestamp::from_ticks(0),
/// );
/// assert_eq!(header.transfer_id().get(), 7);
/// assert_eq!(header.total(), 3);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Encode, Decode)]
pub struct SegmentHeader {
    transfer_id: TransferId,
    index: SegmentIndex,
    total: u8,
    sender_id: SenderId,
    sent_at: SendTimestamp,
}

impl SegmentHeader {
    /// Create a new segment header.
    #[must_use]
    pub const fn new(
        transfer_id: TransferId,
        index: SegmentIndex,
        total: u8,
        sender_id: SenderId,
        sent_at: SendTimestamp,
    ) -> Self {
        Self {
            transfer_id,
            index,
            total,
            sender_id,
            sent_at,
        }
    }

    /// Return the transfer this segment belongs to.
    #[must_use]
    pub const fn transfer_id(&self) -> TransferId { self.transfer_id }

    /// Return the segment position within the transfer.
    #[must_use]
    pub const fn index(&self) -> SegmentIndex { self.index }

    /// Return the number of segments making up the transfer.
    #[must_use]
    pub const fn total(&self) -> u8 { self.total }

    /// Return the originating peer.
    #[must_use]
    pub const fn sender_id(&self) -> SenderId { self.sender_id }

    /// Return the wall-clock capture taken when the transfer was split.
    #[must_use]
    pub const fn sent_at(&self) -> SendTimestamp { self.sent_at }
}
