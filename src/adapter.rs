//! Transport shim binding the fragmenter, staleness filter, and re-assembler.
//!
//! [`SegmentTransport`] captures the minimal outbound surface this layer
//! needs from the surrounding network stack: one ordered/guaranteed-delivery
//! primitive and one best-effort primitive. Channel selection, per-peer
//! routing, and delivery faults are the transport's concern; segments either
//! arrive intact at [`TransferLink::on_segment_received`] or not at all.
//!
//! [`TransferLink`] is the per-stream glue object a host embeds: it owns one
//! [`Fragmenter`], one [`StalenessFilter`], one [`Reassembler`], and the
//! transport handle. The host's event loop calls
//! [`drain`](TransferLink::drain) (or [`try_next`](TransferLink::try_next))
//! at a cadence it controls; this layer has no opinion on timing.

use crate::{
    FragmentationError,
    Fragmenter,
    LinkConfig,
    Reassembler,
    Segment,
    SegmentOutcome,
    SendTimestamp,
    SenderId,
    StalenessFilter,
};

/// Delivery guarantee requested for one transfer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Reliability {
    /// Ordered, guaranteed delivery; bypasses the staleness filter.
    Reliable,
    /// Best-effort delivery; stale segments are dropped on arrival.
    Unreliable,
}

/// Outbound surface required from the surrounding transport.
pub trait SegmentTransport {
    /// Dispatch one segment over the ordered, guaranteed-delivery primitive.
    fn send_ordered(&mut self, segment: &Segment);

    /// Dispatch one segment over the best-effort primitive.
    fn send_best_effort(&mut self, segment: &Segment);
}

/// Fragmentation endpoint for one logical stream over one transport.
#[derive(Debug)]
pub struct TransferLink<T> {
    transport: T,
    fragmenter: Fragmenter,
    filter: StalenessFilter,
    reassembler: Reassembler,
}

impl<T: SegmentTransport> TransferLink<T> {
    /// Create a link that stamps outbound segments with `sender_id`.
    #[must_use]
    pub fn new(config: LinkConfig, sender_id: SenderId, transport: T) -> Self {
        Self {
            transport,
            fragmenter: Fragmenter::new(sender_id, config.max_segment_size),
            filter: StalenessFilter::new(config.stale_after),
            reassembler: Reassembler::new(),
        }
    }

    /// Split `payload` and dispatch its segments in index order.
    ///
    /// # Errors
    ///
    /// Returns [`FragmentationError::TransferTooLarge`] when the payload
    /// exceeds the segment-count capacity; nothing is dispatched in that case.
    pub fn send(
        &mut self,
        payload: &[u8],
        reliability: Reliability,
    ) -> Result<(), FragmentationError> {
        let batch = self.fragmenter.split(payload)?;
        for segment in batch.segments() {
            match reliability {
                Reliability::Reliable => self.transport.send_ordered(segment),
                Reliability::Unreliable => self.transport.send_best_effort(segment),
            }
        }
        Ok(())
    }

    /// Feed one inbound segment, applying staleness filtering on the
    /// unreliable path.
    ///
    /// Returns `None` when the segment was dropped as stale, otherwise the
    /// re-assembler's outcome for it.
    pub fn on_segment_received(
        &mut self,
        segment: Segment,
        reliability: Reliability,
    ) -> Option<SegmentOutcome> {
        self.on_segment_received_at(segment, reliability, SendTimestamp::now())
    }

    /// Feed one inbound segment using an explicit clock reading.
    pub fn on_segment_received_at(
        &mut self,
        segment: Segment,
        reliability: Reliability,
        now: SendTimestamp,
    ) -> Option<SegmentOutcome> {
        if reliability == Reliability::Unreliable
            && !self.filter.admits(segment.header().sent_at(), now)
        {
            return None;
        }
        Some(self.reassembler.push(segment))
    }

    /// Dequeue the oldest completed payload received from `sender`.
    pub fn try_next(&mut self, sender: SenderId) -> Option<Vec<u8>> {
        self.reassembler.try_next(sender)
    }

    /// Drain every sender's completed payloads, oldest first.
    pub fn drain(&mut self, on_payload: impl FnMut(SenderId, Vec<u8>)) {
        self.reassembler.drain(on_payload);
    }

    /// Discard all reassembly state for a disconnected sender.
    pub fn forget_sender(&mut self, sender: SenderId) -> bool {
        self.reassembler.forget_sender(sender)
    }

    /// Borrow the underlying transport handle.
    pub fn transport(&self) -> &T { &self.transport }

    /// Mutably borrow the underlying transport handle.
    pub fn transport_mut(&mut self) -> &mut T { &mut self.transport }
}
