//! Monotonic transfer identifiers with modular wraparound.

use bincode::{Decode, Encode};
use derive_more::{Display, From, Into};

/// Identifier for one logical payload undergoing fragmentation.
///
/// Successive identifiers are produced by [`TransferId::next`], which wraps
/// modulo [`TransferId::MODULUS`]. The value `u32::MAX` is therefore never
/// produced by the counter, and identifier reuse after roughly four billion
/// transfers is acceptable by design.
///
/// # Examples
///
/// ```
/// use chunkwire::TransferId;
/// let id = TransferId::new(41);
/// assert_eq!(id.next(), TransferId::new(42));
/// assert_eq!(TransferId::new(u32::MAX - 1).next(), TransferId::new(0));
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Encode, Decode, Display, From, Into)]
#[display("{_0}")]
pub struct TransferId(u32);

impl TransferId {
    /// Modulus applied when advancing the identifier counter.
    pub const MODULUS: u32 = u32::MAX;

    /// Create a new identifier.
    #[must_use]
    pub const fn new(value: u32) -> Self { Self(value) }

    /// Return the inner numeric identifier.
    #[must_use]
    pub const fn get(self) -> u32 { self.0 }

    /// Return the successor identifier, wrapping modulo [`Self::MODULUS`].
    #[must_use]
    pub const fn next(self) -> Self { Self(self.0.wrapping_add(1) % Self::MODULUS) }
}
