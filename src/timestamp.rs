//! Wall-clock capture stamped onto outbound segments.
//!
//! [`SendTimestamp`] is a signed 64-bit UTC tick count (one tick is 100
//! nanoseconds, counted from the Unix epoch). The timestamp is captured once
//! per transfer and travels on every segment of that transfer; the receiving
//! side uses it only for staleness filtering on the unreliable path, so the
//! two clocks involved need only agree to within the staleness threshold.

use std::time::{Duration, SystemTime, UNIX_EPOCH};

use bincode::{Decode, Encode};
use derive_more::{Display, From, Into};

/// UTC wall-clock instant expressed as a signed 64-bit tick count.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Encode, Decode, Display, From, Into,
)]
#[display("{_0}")]
pub struct SendTimestamp(i64);

impl SendTimestamp {
    /// Capture the current wall-clock time.
    ///
    /// A system clock set before the Unix epoch reads as tick zero; such a
    /// clock cannot meaningfully participate in staleness filtering anyway.
    #[must_use]
    pub fn now() -> Self {
        let since_epoch = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default();
        let ticks = i64::try_from(since_epoch.as_nanos() / 100).unwrap_or(i64::MAX);
        Self(ticks)
    }

    /// Construct a timestamp from a raw tick count.
    #[must_use]
    pub const fn from_ticks(ticks: i64) -> Self { Self(ticks) }

    /// Return the raw tick count.
    #[must_use]
    pub const fn ticks(self) -> i64 { self.0 }

    /// Age of this timestamp as observed at `now`.
    ///
    /// Saturates to zero when `now` reads earlier than this timestamp, so a
    /// skewed receiver clock never misclassifies a fresh segment as stale.
    #[must_use]
    pub fn age(self, now: Self) -> Duration {
        let ticks = now.0.saturating_sub(self.0).max(0);
        Duration::from_nanos(ticks.unsigned_abs().saturating_mul(100))
    }

    /// Return this timestamp shifted backwards by `duration`.
    #[must_use]
    pub fn earlier_by(self, duration: Duration) -> Self {
        let ticks = i64::try_from(duration.as_nanos() / 100).unwrap_or(i64::MAX);
        Self(self.0.saturating_sub(ticks))
    }

    /// Return this timestamp shifted forwards by `duration`.
    #[must_use]
    pub fn later_by(self, duration: Duration) -> Self {
        let ticks = i64::try_from(duration.as_nanos() / 100).unwrap_or(i64::MAX);
        Self(self.0.saturating_add(ticks))
    }
}
