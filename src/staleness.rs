//! Timestamp-based admission policy for unreliable segments.
//!
//! Best-effort delivery can hold segments back long enough that playing the
//! payload (voice audio, in the original deployment) is worse than dropping
//! it. [`StalenessFilter`] sits in front of the re-assembler on the
//! unreliable path and silently discards segments whose age strictly exceeds
//! the configured threshold. Reliable segments never pass through the filter;
//! their transport already guarantees ordered delivery.

use std::time::Duration;

use crate::SendTimestamp;

/// Default maximum segment age before an unreliable segment is dropped.
pub const DEFAULT_STALE_AFTER: Duration = Duration::from_secs(3);

/// Admission check comparing a segment's send time against a maximum age.
#[derive(Clone, Copy, Debug)]
pub struct StalenessFilter {
    max_age: Duration,
}

impl StalenessFilter {
    /// Create a filter with the given maximum age.
    #[must_use]
    pub const fn new(max_age: Duration) -> Self { Self { max_age } }

    /// Return the configured maximum age.
    #[must_use]
    pub const fn max_age(&self) -> Duration { self.max_age }

    /// Whether a segment sent at `sent_at` is still admissible at `now`.
    ///
    /// The comparison is non-strict: a segment aged exactly `max_age` is
    /// kept, one older by any margin is dropped (the drop condition is a
    /// strict greater-than).
    #[must_use]
    pub fn admits(&self, sent_at: SendTimestamp, now: SendTimestamp) -> bool {
        sent_at.age(now) <= self.max_age
    }
}

impl Default for StalenessFilter {
    fn default() -> Self { Self::new(DEFAULT_STALE_AFTER) }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MS: Duration = Duration::from_millis(1);

    #[test]
    fn segment_exactly_at_threshold_is_kept() {
        let filter = StalenessFilter::default();
        let now = SendTimestamp::from_ticks(i64::from(u32::MAX));
        let sent = now.earlier_by(DEFAULT_STALE_AFTER);
        assert!(filter.admits(sent, now));
    }

    #[test]
    fn segment_one_millisecond_past_threshold_is_dropped() {
        let filter = StalenessFilter::default();
        let now = SendTimestamp::from_ticks(i64::from(u32::MAX));
        let sent = now.earlier_by(DEFAULT_STALE_AFTER + MS);
        assert!(!filter.admits(sent, now));
    }

    #[test]
    fn segment_one_millisecond_inside_threshold_is_kept() {
        let filter = StalenessFilter::default();
        let now = SendTimestamp::from_ticks(i64::from(u32::MAX));
        let sent = now.earlier_by(DEFAULT_STALE_AFTER - MS);
        assert!(filter.admits(sent, now));
    }

    #[test]
    fn future_send_times_are_admitted() {
        let filter = StalenessFilter::default();
        let sent = SendTimestamp::from_ticks(10_000_000);
        let now = SendTimestamp::from_ticks(0);
        assert!(filter.admits(sent, now));
    }
}
