//! Outbound helper that splits logical payloads into transport segments.
//!
//! [`Fragmenter`] exposes a small API for chunking a byte payload into
//! fixed-size segments, tagging each with a [`SegmentHeader`]. The struct
//! tracks the wrapping [`TransferId`] counter internally so callers can
//! request splitting without worrying about identifier bookkeeping. One
//! fragmenter serves one logical stream: transfers never pipeline, so the
//! counter advances exactly once per payload.

use std::num::NonZeroUsize;

use crate::{
    FragmentationError,
    Segment,
    SegmentHeader,
    SegmentIndex,
    SendTimestamp,
    SenderId,
    TransferId,
    index::MAX_SEGMENTS_PER_TRANSFER,
};

/// Splits logical payloads into segment-sized frames.
#[derive(Debug)]
pub struct Fragmenter {
    max_segment_size: NonZeroUsize,
    sender_id: SenderId,
    next_transfer_id: TransferId,
}

impl Fragmenter {
    /// Create a new fragmenter that caps segment payloads at
    /// `max_segment_size` bytes and stamps segments with `sender_id`.
    #[must_use]
    pub const fn new(sender_id: SenderId, max_segment_size: NonZeroUsize) -> Self {
        Self::with_starting_id(sender_id, max_segment_size, TransferId::new(0))
    }

    /// Create a new fragmenter starting from a specific [`TransferId`].
    #[must_use]
    pub const fn with_starting_id(
        sender_id: SenderId,
        max_segment_size: NonZeroUsize,
        start_at: TransferId,
    ) -> Self {
        Self {
            max_segment_size,
            sender_id,
            next_transfer_id: start_at,
        }
    }

    /// Return the maximum segment payload size in bytes.
    #[must_use]
    pub const fn max_segment_size(&self) -> NonZeroUsize { self.max_segment_size }

    /// Return the identifier the next transfer will be tagged with.
    #[must_use]
    pub const fn next_transfer_id(&self) -> TransferId { self.next_transfer_id }

    /// Split `payload` into segments stamped with the current wall-clock time.
    ///
    /// A zero-length payload produces an empty batch (`total = 0`); this is
    /// the defined behavior for degenerate inputs, not an error. Either way
    /// the transfer id counter advances, matching the one-id-per-send
    /// contract the receiving side resynchronizes against.
    ///
    /// # Errors
    ///
    /// Returns [`FragmentationError::TransferTooLarge`] when the payload
    /// would need more segments than the eight-bit count field can carry.
    /// A rejected split does not consume a transfer id.
    pub fn split(&mut self, payload: &[u8]) -> Result<SegmentBatch, FragmentationError> {
        self.split_at(payload, SendTimestamp::now())
    }

    /// Split `payload` using an explicit clock reading.
    ///
    /// Accepting an explicit `sent_at` keeps staleness tests deterministic;
    /// all segments of the transfer share this single capture.
    ///
    /// # Errors
    ///
    /// Returns [`FragmentationError::TransferTooLarge`] when the payload
    /// would need more segments than the eight-bit count field can carry.
    ///
    /// # Panics
    ///
    /// Panics if the segment index overruns its eight-bit range, which the
    /// up-front total check makes unreachable.
    pub fn split_at(
        &mut self,
        payload: &[u8],
        sent_at: SendTimestamp,
    ) -> Result<SegmentBatch, FragmentationError> {
        let max = self.max_segment_size.get();
        let required = payload.len().div_ceil(max);
        let Ok(total) = u8::try_from(required) else {
            return Err(FragmentationError::TransferTooLarge {
                payload_len: payload.len(),
                required,
                max_segment_size: max,
            });
        };
        debug_assert!(usize::from(total) <= MAX_SEGMENTS_PER_TRANSFER);

        let transfer_id = self.next_transfer_id;
        self.next_transfer_id = transfer_id.next();

        let mut segments = Vec::with_capacity(required);
        let mut index = SegmentIndex::zero();
        let mut cursor = 0usize;

        while cursor < payload.len() {
            let end = (cursor + max).min(payload.len());
            let header =
                SegmentHeader::new(transfer_id, index, total, self.sender_id, sent_at);
            segments.push(Segment::new(header, payload[cursor..end].to_vec()));

            cursor = end;
            if cursor < payload.len() {
                // `required` already fits in the u8 total, so the index
                // cannot legitimately run out; failing loudly beats emitting
                // a segment with a reused index.
                index = index
                    .checked_increment()
                    .unwrap_or_else(|| panic!("segment index overflow past {index}"));
            }
        }

        Ok(SegmentBatch::new(transfer_id, segments))
    }
}

/// Collection of segments produced for a single logical payload.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SegmentBatch {
    transfer_id: TransferId,
    segments: Vec<Segment>,
}

impl SegmentBatch {
    fn new(transfer_id: TransferId, segments: Vec<Segment>) -> Self {
        Self {
            transfer_id,
            segments,
        }
    }

    /// Return the [`TransferId`] shared by all segments.
    #[must_use]
    pub const fn transfer_id(&self) -> TransferId { self.transfer_id }

    /// Return the segments as a slice.
    #[must_use]
    pub fn segments(&self) -> &[Segment] { self.segments.as_slice() }

    /// Number of segments in the batch.
    #[must_use]
    pub fn len(&self) -> usize { self.segments.len() }

    /// Whether the batch carries no segments (a zero-length payload).
    #[must_use]
    pub fn is_empty(&self) -> bool { self.segments.is_empty() }

    /// Consume the batch, returning all segments.
    #[must_use]
    pub fn into_segments(self) -> Vec<Segment> { self.segments }
}

impl IntoIterator for SegmentBatch {
    type Item = Segment;
    type IntoIter = std::vec::IntoIter<Segment>;

    fn into_iter(self) -> Self::IntoIter { self.segments.into_iter() }
}
