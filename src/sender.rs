use bincode::{Decode, Encode};
use derive_more::{Display, From, Into};

/// Identifier for the peer that originated a transfer.
///
/// Assigned by the surrounding session layer (for example a connection id);
/// this crate only requires it to be stable for the lifetime of the sender's
/// connection. Reassembly state is keyed by this value, so two peers sharing
/// an identifier would corrupt each other's transfers.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Encode, Decode, Display, From, Into)]
#[display("{_0}")]
pub struct SenderId(u32);

impl SenderId {
    /// Create a new sender identifier.
    #[must_use]
    pub const fn new(value: u32) -> Self { Self(value) }

    /// Return the inner numeric identifier.
    #[must_use]
    pub const fn get(self) -> u32 { self.0 }
}
