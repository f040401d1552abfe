// Copyright 2026 easel contributors
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! The tick stopwatch measuring the gap between two update calls.
//!
//! All values are whole milliseconds relative to the application epoch. If
//! you use second-based formulas for movement or rotation, use
//! [`Time::delta_secs_f32`] or multiply the millisecond delta by `0.001`.

use std::time::Instant;

/// Measures the time gap between consecutive update cycles.
///
/// `begin()` and `end()` bracket each cycle: `begin()` captures the current
/// timestamp and derives the gap since the previous cycle, `end()` commits
/// the just-finished cycle's timestamp as the baseline for the next gap.
/// Consumers only ever read the accessors.
#[derive(Debug, Clone)]
pub struct Time {
    epoch: Instant,
    current_ms: u64,
    last_ms: Option<u64>,
    delta_ms: u64,
}

impl Time {
    /// Creates a new stopwatch anchored to the current instant.
    #[must_use]
    pub fn new() -> Self {
        Self::with_epoch(Instant::now())
    }

    /// Creates a stopwatch anchored to a caller-provided epoch, so several
    /// components (e.g. the timer dispatcher) can share one timebase.
    #[must_use]
    pub fn with_epoch(epoch: Instant) -> Self {
        Self {
            epoch,
            current_ms: 0,
            last_ms: None,
            delta_ms: 0,
        }
    }

    /// Milliseconds elapsed since the epoch, right now.
    #[must_use]
    pub fn now_ms(&self) -> u64 {
        self.epoch.elapsed().as_millis() as u64
    }

    /// Begins measuring a cycle: captures the current timestamp and computes
    /// the gap since the previous cycle. The very first call reports a gap
    /// of zero, since there is no prior cycle to measure against.
    pub fn begin(&mut self) {
        self.current_ms = self.now_ms();
        self.delta_ms = self
            .current_ms
            .saturating_sub(self.last_ms.unwrap_or(self.current_ms));
    }

    /// Ends the measurement, committing this cycle's timestamp as the
    /// baseline for the next gap computation.
    pub fn end(&mut self) {
        self.last_ms = Some(self.current_ms);
    }

    /// The gap between the previous cycle and the current one, in
    /// milliseconds.
    #[must_use]
    pub fn delta_ms(&self) -> u64 {
        self.delta_ms
    }

    /// The gap in seconds, convenient for per-second movement formulas.
    #[must_use]
    pub fn delta_secs_f32(&self) -> f32 {
        self.delta_ms as f32 * 0.001
    }

    /// Timestamp captured by the most recent `begin()`, in milliseconds
    /// since the epoch.
    #[must_use]
    pub fn current_ms(&self) -> u64 {
        self.current_ms
    }

    /// Timestamp committed by the most recent `end()`, or zero before the
    /// first completed cycle.
    #[must_use]
    pub fn last_ms(&self) -> u64 {
        self.last_ms.unwrap_or(0)
    }
}

impl Default for Time {
    fn default() -> Self {
        Self::new()
    }
}
