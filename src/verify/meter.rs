//! Cycle metering.

use std::time::Instant;

/// A monotonic cycle counter.
///
/// On a metered VM this would read the machine's consumed-cycle register;
/// off-VM builds substitute wall-clock time. The driver only ever looks
/// at differences between two readings, so the zero point is irrelevant.
pub trait CycleMeter {
    /// Cycles consumed so far.
    fn current_cycles(&self) -> u64;
}

/// Wall-clock stand-in for a cycle counter: one "cycle" per nanosecond
/// since construction.
#[derive(Debug)]
pub struct WallClockMeter {
    origin: Instant,
}

impl WallClockMeter {
    /// Start counting from now.
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for WallClockMeter {
    fn default() -> Self {
        Self::new()
    }
}

impl CycleMeter for WallClockMeter {
    fn current_cycles(&self) -> u64 {
        self.origin.elapsed().as_nanos() as u64
    }
}
