//! Inbound helper that stitches segments back into complete payloads.
//!
//! [`Reassembler`] mirrors the outbound [`Fragmenter`](crate::Fragmenter) by
//! accumulating segment payloads per [`SenderId`](crate::SenderId). Exactly
//! one transfer is tracked per sender at a time: a segment carrying an
//! unexpected transfer id or index means earlier segments were lost, so the
//! partial accumulation is discarded and tracking resynchronizes on the
//! offending segment's transfer id. The triggering segment itself is dropped
//! during a resync, so that transfer can only complete if its index-0 segment
//! arrives after the reset; this conservative behavior is deliberate and
//! pinned by test.
//!
//! Completed payloads land on a per-sender FIFO queue drained by
//! [`Reassembler::try_next`] or [`Reassembler::drain`]. A stalled transfer
//! simply stays pending until the next resync replaces it or the sender is
//! forgotten on disconnect; no timeout is applied to partial accumulations.

use std::collections::{HashMap, VecDeque};

use tracing::warn;

use crate::{Segment, SegmentIndex, SenderId, TransferId};

/// Result of feeding one segment into the [`Reassembler`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SegmentOutcome {
    /// The segment was appended; the transfer still expects more.
    Accumulated,
    /// The segment completed its transfer; a payload was queued.
    Completed,
    /// The segment desynchronized the sender's state. Partial data was
    /// discarded, tracking reset to the segment's transfer id, and the
    /// segment itself dropped.
    Resynced(ResyncReason),
}

/// Why a sender's accumulation state was reset.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ResyncReason {
    /// The segment belongs to a different transfer than the one in progress.
    TransferMismatch {
        expected: TransferId,
        found: TransferId,
    },
    /// The segment index does not continue the accumulated run.
    IndexMismatch {
        expected: usize,
        found: SegmentIndex,
    },
}

#[derive(Debug, Default)]
struct SenderState {
    // Unset until the first segment after creation or completion; the next
    // segment to arrive seeds it, mirroring the reference queue nulling its
    // pending list once a transfer completes.
    current_transfer: Option<TransferId>,
    chunks: Vec<Vec<u8>>,
    completed: VecDeque<Vec<u8>>,
}

impl SenderState {
    fn reseed(&mut self, transfer_id: TransferId) {
        self.current_transfer = Some(transfer_id);
        self.chunks.clear();
    }

    fn finish_transfer(&mut self) {
        let mut payload = Vec::with_capacity(self.chunks.iter().map(Vec::len).sum());
        for chunk in self.chunks.drain(..) {
            payload.extend_from_slice(&chunk);
        }
        self.completed.push_back(payload);
        self.current_transfer = None;
    }
}

/// Stateful segment re-assembler with per-sender completed-payload queues.
///
/// All state lives on the host's single update cycle: segment arrival and
/// queue draining must never interleave for the same sender, which the
/// `&mut self` receivers enforce at compile time for a single instance.
#[derive(Debug, Default)]
pub struct Reassembler {
    senders: HashMap<SenderId, SenderState>,
}

impl Reassembler {
    /// Create an empty re-assembler.
    #[must_use]
    pub fn new() -> Self { Self::default() }

    /// Feed one segment into the sender's state machine.
    ///
    /// Never fails: ordering violations are recovered locally by discarding
    /// partial state and resynchronizing, reported via
    /// [`SegmentOutcome::Resynced`] and a warning log.
    pub fn push(&mut self, segment: Segment) -> SegmentOutcome {
        let (header, payload) = segment.into_parts();
        let state = self.senders.entry(header.sender_id()).or_default();

        let transfer_id = header.transfer_id();
        match state.current_transfer {
            None => state.reseed(transfer_id),
            Some(current) if current != transfer_id => {
                warn!(
                    "transfer id mismatch from sender {}: expected {current}, found \
                     {transfer_id}; discarding partial transfer",
                    header.sender_id(),
                );
                state.reseed(transfer_id);
                return SegmentOutcome::Resynced(ResyncReason::TransferMismatch {
                    expected: current,
                    found: transfer_id,
                });
            }
            Some(_) => {}
        }

        let expected = state.chunks.len();
        if usize::from(header.index()) != expected {
            warn!(
                "segment index mismatch from sender {}: expected {expected}, found {}; \
                 discarding partial transfer",
                header.sender_id(),
                header.index(),
            );
            state.reseed(transfer_id);
            return SegmentOutcome::Resynced(ResyncReason::IndexMismatch {
                expected,
                found: header.index(),
            });
        }

        state.chunks.push(payload);
        if state.chunks.len() == usize::from(header.total()) {
            state.finish_transfer();
            SegmentOutcome::Completed
        } else {
            SegmentOutcome::Accumulated
        }
    }

    /// Dequeue the oldest completed payload for `sender`, if any.
    ///
    /// Callable in a loop until it returns `None`; the consumption contract
    /// is drain-to-exhaustion per polling cycle.
    pub fn try_next(&mut self, sender: SenderId) -> Option<Vec<u8>> {
        self.senders.get_mut(&sender)?.completed.pop_front()
    }

    /// Drain every sender's completed queue, oldest payloads first.
    pub fn drain(&mut self, mut on_payload: impl FnMut(SenderId, Vec<u8>)) {
        for (sender, state) in &mut self.senders {
            while let Some(payload) = state.completed.pop_front() {
                on_payload(*sender, payload);
            }
        }
    }

    /// Discard all state for a disconnected sender.
    ///
    /// Returns `true` when the sender had a state record.
    pub fn forget_sender(&mut self, sender: SenderId) -> bool {
        self.senders.remove(&sender).is_some()
    }

    /// Number of senders with a state record.
    #[must_use]
    pub fn sender_count(&self) -> usize { self.senders.len() }

    /// Number of segments accumulated towards `sender`'s current transfer.
    #[must_use]
    pub fn pending_segments(&self, sender: SenderId) -> usize {
        self.senders.get(&sender).map_or(0, |state| state.chunks.len())
    }

    /// Number of completed payloads awaiting consumption for `sender`.
    #[must_use]
    pub fn queued_payloads(&self, sender: SenderId) -> usize {
        self.senders
            .get(&sender)
            .map_or(0, |state| state.completed.len())
    }
}
