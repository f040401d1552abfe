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

//! The fixed-tick update loop thread.
//!
//! Each iteration invokes the tick closure, then waits one tick interval on
//! a shutdown channel — the timed receive doubles as an interruptible sleep,
//! so cancellation both breaks the wait and ends the loop. There is no
//! catch-up for overrun ticks: a slow tick simply delays the next one.

use crossbeam_channel::{RecvTimeoutError, Sender};
use std::thread::{self, JoinHandle, ThreadId};
use std::time::Duration;

/// A single run of the update loop.
///
/// A `TickLoop` instance is never reused: pausing stops and discards it, and
/// resuming spawns a fresh one with the next generation number.
pub(crate) struct TickLoop {
    shutdown: Sender<()>,
    handle: Option<JoinHandle<()>>,
    thread_id: ThreadId,
    generation: u64,
}

impl TickLoop {
    /// Spawns the loop thread. `tick` runs once per iteration and returns
    /// whether the loop should continue.
    pub(crate) fn spawn<F>(generation: u64, interval: Duration, mut tick: F) -> Self
    where
        F: FnMut() -> bool + Send + 'static,
    {
        let (shutdown, cancelled) = crossbeam_channel::bounded::<()>(1);
        let handle = thread::spawn(move || {
            log::info!("update loop (generation {generation}) started");
            loop {
                if !tick() {
                    break;
                }
                match cancelled.recv_timeout(interval) {
                    Err(RecvTimeoutError::Timeout) => {}
                    Ok(()) | Err(RecvTimeoutError::Disconnected) => break,
                }
            }
            log::info!("update loop (generation {generation}) stopped");
        });
        let thread_id = handle.thread().id();
        Self {
            shutdown,
            handle: Some(handle),
            thread_id,
            generation,
        }
    }

    /// Signals the loop to stop and waits for it, unless called from the
    /// loop thread itself, in which case only the signal is sent and the
    /// thread winds down on its own.
    pub(crate) fn stop(mut self) {
        let _ = self.shutdown.try_send(());
        if let Some(handle) = self.handle.take() {
            if handle.thread().id() != thread::current().id() {
                let _ = handle.join();
            }
        }
    }

    #[cfg(test)]
    pub(crate) fn generation(&self) -> u64 {
        self.generation
    }

    pub(crate) fn thread_id(&self) -> ThreadId {
        self.thread_id
    }
}
