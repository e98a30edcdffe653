// Aggregate counters and per-interval rate samples

use super::Counter;

/// Counters wrap at 2^32.
pub const COUNTER_MODULUS: u64 = 1 << 32;

/// Bytes elapsed between two readings of a wrapping counter.
///
/// A reading lower than the previous one means the counter wrapped; the result is
/// `(2^32 - previous) + current` in that case. More than one wrap per interval
/// cannot be told apart from a single one.
pub fn counter_delta(current: Counter, previous: Counter) -> Counter {
    current.wrapping_sub(previous)
}

/// Sum of cumulative counters over the contributing interfaces at one instant.
/// Only the difference between two consecutive values means anything.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AggregateCounters {
    pub down: Counter,
    pub up: Counter,
}

impl AggregateCounters {
    pub fn new(down: Counter, up: Counter) -> Self {
        Self { down, up }
    }

    /// Adds one interface's counters, wrapping like the counters themselves do.
    pub fn accumulate(&mut self, received: Counter, sent: Counter) {
        self.down = self.down.wrapping_add(received);
        self.up = self.up.wrapping_add(sent);
    }

    pub fn delta_since(&self, previous: &AggregateCounters) -> RateSample {
        RateSample {
            down: counter_delta(self.down, previous.down),
            up: counter_delta(self.up, previous.up),
        }
    }
}

/// Bytes observed during one sampling interval, per direction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RateSample {
    pub down: Counter,
    pub up: Counter,
}
