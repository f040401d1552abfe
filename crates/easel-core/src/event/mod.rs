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

//! Host lifecycle events and the channel that carries them.

mod bus;

pub use bus::EventBus;

/// A lifecycle event emitted by the host windowing layer.
///
/// The runtime maps these onto its own lifecycle: minimizing or losing focus
/// pauses the application, restoring it resumes, and a close request
/// terminates a running application.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SurfaceEvent {
    /// The surface became visible for the first time.
    Opened,
    /// The surface was minimized.
    Iconified,
    /// The surface was restored from a minimized state.
    Deiconified,
    /// The surface gained input focus.
    Activated,
    /// The surface lost input focus.
    Deactivated,
    /// The user asked to close the surface.
    CloseRequested,
    /// The surface is gone; consumers should stop listening.
    Closed,
}
