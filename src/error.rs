//! Error types emitted by the fragmentation layer.

use thiserror::Error;

use crate::index::MAX_SEGMENTS_PER_TRANSFER;

/// Errors produced while splitting outbound payloads.
#[derive(Clone, Copy, Debug, Error, PartialEq, Eq)]
pub enum FragmentationError {
    /// The payload would require more segments than the wire format's
    /// eight-bit count field can describe.
    #[error(
        "payload of {payload_len} bytes needs {required} segments of at most \
         {max_segment_size} bytes, exceeding the {MAX_SEGMENTS_PER_TRANSFER} segment cap"
    )]
    TransferTooLarge {
        payload_len: usize,
        required: usize,
        max_segment_size: usize,
    },
}
