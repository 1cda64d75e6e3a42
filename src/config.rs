//! Configuration used by the fragmentation and reassembly layer.

use std::{num::NonZeroUsize, time::Duration};

use crate::{staleness::DEFAULT_STALE_AFTER, wire::segment_overhead};

/// Settings that bound segment sizes and unreliable-path admission.
///
/// Both values are supplied by the host, not negotiated: the segment size cap
/// must respect the transport's single-command byte limit, and the staleness
/// threshold reflects how late the consumed payloads are still useful.
#[derive(Clone, Copy, Debug)]
pub struct LinkConfig {
    /// Maximum number of payload bytes carried by a single segment. The
    /// encoded segment additionally includes marker and header overhead;
    /// [`LinkConfig::for_command_budget`] accounts for it.
    pub max_segment_size: NonZeroUsize,
    /// Maximum age of an unreliable segment before it is silently dropped.
    pub stale_after: Duration,
}

impl LinkConfig {
    /// Create a configuration with the default staleness threshold.
    #[must_use]
    pub const fn new(max_segment_size: NonZeroUsize) -> Self {
        Self {
            max_segment_size,
            stale_after: DEFAULT_STALE_AFTER,
        }
    }

    /// Replace the staleness threshold.
    #[must_use]
    pub const fn with_stale_after(mut self, stale_after: Duration) -> Self {
        self.stale_after = stale_after;
        self
    }

    /// Derive a configuration from the transport's single-command byte limit.
    ///
    /// `command_budget` should reflect the largest payload the transport will
    /// accept for one command. The returned configuration sizes segments so
    /// the worst-case encoded form still fits within that budget.
    ///
    /// Returns `None` when the budget cannot accommodate the fixed overhead.
    #[must_use]
    pub fn for_command_budget(command_budget: usize, stale_after: Duration) -> Option<Self> {
        let available = command_budget.saturating_sub(segment_overhead().get());
        Some(Self {
            max_segment_size: NonZeroUsize::new(available)?,
            stale_after,
        })
    }

    /// Worst-case encoded size of a full segment under this configuration.
    #[must_use]
    pub fn encoded_segment_ceiling(&self) -> usize {
        self.max_segment_size.get() + segment_overhead().get()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn command_budget_accounts_for_overhead() {
        let config = LinkConfig::for_command_budget(512, DEFAULT_STALE_AFTER)
            .expect("budget fits overhead");
        assert_eq!(
            config.max_segment_size.get(),
            512 - segment_overhead().get(),
        );
        assert!(config.encoded_segment_ceiling() <= 512);
    }

    #[test]
    fn command_budget_below_overhead_is_rejected() {
        assert!(LinkConfig::for_command_budget(4, DEFAULT_STALE_AFTER).is_none());
    }
}
