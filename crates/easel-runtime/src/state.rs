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

//! The application lifecycle states.

/// The lifecycle state of an [`Application`](crate::Application).
///
/// Operations are guarded by state: `initialize()` requires `Created`,
/// `start()` requires `Initializing`, `resume()` requires `Paused`, and so
/// on. An operation called from any other state logs a diagnostic and does
/// nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ApplicationState {
    /// Constructed but not yet bound to a surface.
    #[default]
    Created,
    /// `initialize()` has bound a surface; `start()` has not run yet.
    Initializing,
    /// The update loop is ticking.
    Running,
    /// The update loop is stopped; call `resume()` to continue.
    Paused,
    /// `resume()` was called; cleared to `Running` by the first tick.
    Resuming,
    /// `terminate()` was called; the application is inert.
    Exiting,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_state_is_created() {
        assert_eq!(ApplicationState::default(), ApplicationState::Created);
    }
}
