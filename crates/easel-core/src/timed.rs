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

//! The contract for listeners that receive periodic timed callbacks,
//! independent of the main update loop.

use std::sync::{Arc, Mutex};

/// Carried to a timed listener when its period elapses.
///
/// Holds the firing timestamp in milliseconds since the application epoch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimedEvent {
    execution_time_ms: u64,
}

impl TimedEvent {
    /// Creates an event stamped with the given firing time.
    #[must_use]
    pub fn new(execution_time_ms: u64) -> Self {
        Self { execution_time_ms }
    }

    /// Milliseconds since the application epoch at which the event fired.
    #[must_use]
    pub fn execution_time_ms(&self) -> u64 {
        self.execution_time_ms
    }
}

/// An entity receiving callbacks every [`period_ms`](TimedListener::period_ms)
/// milliseconds from the timer dispatcher.
///
/// The dispatcher ticks once per millisecond; a listener fires on every tick
/// where its internal counter is divisible by the period, starting with the
/// admission tick. Screen work is expensive, so periods below 10 ms are
/// rarely useful. A period of zero is rejected at registration.
pub trait TimedListener: Send {
    /// The listener's firing period in milliseconds, read once when the
    /// listener is registered.
    fn period_ms(&self) -> u64;

    /// Called when the listener's period elapses. An `Err` is logged by the
    /// dispatcher and does not affect other listeners in the same cycle.
    fn on_timed_event(&mut self, event: &TimedEvent) -> anyhow::Result<()>;
}

/// The shared handle under which timed listeners are registered.
pub type SharedTimedListener = Arc<Mutex<dyn TimedListener>>;
