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

//! # Easel Core
//!
//! Foundational crate containing the trait contracts and leaf types shared by
//! the easel animation framework: the tick stopwatch, the update and
//! timed-listener contracts, the narrow rendering-surface interface, and the
//! event bus that carries host lifecycle events into the runtime.

#![warn(missing_docs)]

pub mod error;
pub mod event;
pub mod surface;
pub mod time;
pub mod timed;
pub mod update;

pub use error::{RegistrationError, SpawnError};
pub use event::{EventBus, SurfaceEvent};
pub use surface::{RenderSurface, SharedSurface, SurfaceMode};
pub use time::Time;
pub use timed::{SharedTimedListener, TimedEvent, TimedListener};
pub use update::{SharedUpdateable, Updateable, WeakUpdateable};
