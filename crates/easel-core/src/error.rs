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

//! Error types surfaced by the registration and worker APIs.
//!
//! Lifecycle operations called in an invalid state are deliberately not
//! errors: they are logged no-ops, which keeps the surface forgiving for
//! beginner code. Only genuinely invalid registrations and failed thread
//! spawns are reported to the caller.

use thiserror::Error;

/// A listener or target could not be registered.
#[derive(Debug, Error)]
pub enum RegistrationError {
    /// The timed listener declared a period of zero milliseconds; it would
    /// fire on every dispatcher cycle or never, neither of which is useful.
    #[error("timed listener declared a zero-millisecond period")]
    ZeroPeriod,

    /// The listener's lock is poisoned, so its period cannot be read.
    #[error("timed listener is unavailable (poisoned lock)")]
    ListenerUnavailable,
}

/// A background worker could not be started.
#[derive(Debug, Error)]
pub enum SpawnError {
    /// The operating system refused to create the worker thread.
    #[error("failed to spawn worker thread '{name}'")]
    Thread {
        /// The worker's registered name.
        name: String,
        /// The underlying OS error.
        #[source]
        source: std::io::Error,
    },
}
