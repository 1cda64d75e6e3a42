//! Public API for the `chunkwire` library.
//!
//! This crate provides a payload-agnostic packet fragmentation and reassembly
//! layer for transports with a bounded per-command message size. An outbound
//! [`Fragmenter`] splits a byte payload into at most 255 fixed-size segments
//! tagged with a wrapping [`TransferId`]; an inbound [`Reassembler`] rebuilds
//! transfers whose segments arrive strictly in order, queueing completed
//! payloads per sender, and resynchronizes by discarding partial data when a
//! segment arrives out of order. A [`StalenessFilter`] guards the unreliable
//! path, and [`TransferLink`] glues all three onto a host-supplied
//! [`SegmentTransport`].
//!
//! The whole layer is synchronous and single-threaded: segment arrival and
//! payload consumption are expected to happen on the host's one update cycle.

pub mod adapter;
pub mod config;
pub mod error;
pub mod fragmenter;
pub mod header;
pub mod index;
pub mod reassembler;
pub mod segment;
pub mod sender;
pub mod staleness;
pub mod timestamp;
pub mod transfer;
pub mod wire;

pub use adapter::{Reliability, SegmentTransport, TransferLink};
pub use config::LinkConfig;
pub use error::FragmentationError;
pub use fragmenter::{Fragmenter, SegmentBatch};
pub use header::SegmentHeader;
pub use index::{MAX_SEGMENTS_PER_TRANSFER, SegmentIndex};
pub use reassembler::{Reassembler, ResyncReason, SegmentOutcome};
pub use segment::Segment;
pub use sender::SenderId;
pub use staleness::{DEFAULT_STALE_AFTER, StalenessFilter};
pub use timestamp::SendTimestamp;
pub use transfer::TransferId;
pub use wire::{SEGMENT_MAGIC, decode_segment, encode_segment, segment_overhead};

#[cfg(test)]
mod tests;
