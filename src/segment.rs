use crate::SegmentHeader;

/// Header and payload for a single segment in flight.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Segment {
    header: SegmentHeader,
    payload: Vec<u8>,
}

impl Segment {
    /// Construct a new segment.
    #[must_use]
    pub fn new(header: SegmentHeader, payload: Vec<u8>) -> Self { Self { header, payload } }

    /// Return the segment header.
    #[must_use]
    pub const fn header(&self) -> &SegmentHeader { &self.header }

    /// Return the segment payload bytes.
    #[must_use]
    pub fn payload(&self) -> &[u8] { self.payload.as_slice() }

    /// Consume the segment, returning its components.
    #[must_use]
    pub fn into_parts(self) -> (SegmentHeader, Vec<u8>) { (self.header, self.payload) }
}
