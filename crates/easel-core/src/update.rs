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

//! The contract for objects that receive a per-tick update callback.

use crate::time::Time;
use std::sync::{Arc, Mutex, Weak};

/// An entity updated once per application tick.
///
/// Drawable/animated objects implement this and register themselves with the
/// application, which calls [`update`](Updateable::update) with the current
/// [`Time`] snapshot on every tick, in registration order. Returning an
/// `Err` is logged at the call site and does not disturb other targets.
pub trait Updateable: Send {
    /// Advances this object by one tick.
    fn update(&mut self, time: &Time) -> anyhow::Result<()>;
}

/// The shared handle under which update targets are registered.
pub type SharedUpdateable = Arc<Mutex<dyn Updateable>>;

/// The weak reference the application actually stores: registration never
/// extends a target's lifetime.
pub type WeakUpdateable = Weak<Mutex<dyn Updateable>>;
