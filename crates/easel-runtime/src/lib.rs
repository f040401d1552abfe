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

//! # Easel Runtime
//!
//! The lifecycle and timing core of the easel animation framework: an
//! explicitly constructed [`Application`] owns a fixed-tick update loop, a
//! millisecond timer dispatcher and a registry of one-shot background
//! workers, and reacts to host surface events by pausing, resuming or
//! terminating itself.
//!
//! A typical host constructs an [`AppConfig`], binds a rendering surface via
//! [`Application::initialize`], registers its update targets and timed
//! listeners, and calls [`Application::start`]. From then on every tick
//! updates all registered targets with the current time snapshot and redraws
//! the surface, while the dispatcher fires timed callbacks independently.

#![warn(missing_docs)]

mod application;
mod config;
mod dispatcher;
mod state;
mod ticker;
mod worker;

pub use application::Application;
pub use config::AppConfig;
pub use state::ApplicationState;
pub use worker::CancelToken;

pub use easel_core::{RegistrationError, SpawnError};
