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

//! The narrow interface through which the runtime drives a rendering
//! surface.
//!
//! Any presentation backend (a windowed frame, an embedded host panel, a
//! test double) implements [`RenderSurface`] to be usable by the
//! application. The runtime only ever asks the surface to redraw, to change
//! its dimensions/visibility/title, and to release itself — drawing
//! primitives and pixel correctness live entirely behind this boundary.

use std::sync::{
    atomic::{AtomicUsize, Ordering},
    Arc, Mutex,
};

/// How the application is hosted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SurfaceMode {
    /// A standalone window owned by the application.
    #[default]
    Standalone,
    /// Embedded in a host surface that outlives the application; the host
    /// process is never exited on terminate.
    Embedded,
}

/// A presentation backend driven by the application.
///
/// All operations are synchronous and side-effect-only. The runtime
/// serializes access through a mutex, so implementations need no internal
/// locking against the update loop.
pub trait RenderSurface: Send {
    /// Repaints all registered drawables.
    fn redraw(&mut self);

    /// Releases the surface; no further calls will be made after this.
    fn terminate(&mut self);

    /// Resizes the drawable area.
    fn set_dimensions(&mut self, width: u32, height: u32);

    /// Current drawable area size as `(width, height)`.
    fn dimensions(&self) -> (u32, u32);

    /// Shows or hides the surface.
    fn set_visible(&mut self, visible: bool);

    /// Sets the host window title, where one exists.
    fn set_title(&mut self, title: &str);
}

/// The shared handle under which a surface is bound to the application.
pub type SharedSurface = Arc<Mutex<dyn RenderSurface>>;

/// A surface that renders nothing and counts what it is asked to do.
///
/// Handy for tests and headless demos: the redraw counter is shared, so an
/// observer can watch ticks happen without holding the surface lock.
#[derive(Debug, Default)]
pub struct HeadlessSurface {
    redraws: Arc<AtomicUsize>,
    dimensions: (u32, u32),
    title: String,
    visible: bool,
    terminated: bool,
}

impl HeadlessSurface {
    /// Creates an invisible, zero-sized headless surface.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Shared counter incremented on every `redraw()`.
    #[must_use]
    pub fn redraw_counter(&self) -> Arc<AtomicUsize> {
        Arc::clone(&self.redraws)
    }

    /// Whether `terminate()` has been called.
    #[must_use]
    pub fn is_terminated(&self) -> bool {
        self.terminated
    }

    /// Whether the surface is currently visible.
    #[must_use]
    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// The last title set on the surface.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }
}

impl RenderSurface for HeadlessSurface {
    fn redraw(&mut self) {
        self.redraws.fetch_add(1, Ordering::Relaxed);
    }

    fn terminate(&mut self) {
        self.terminated = true;
        self.visible = false;
    }

    fn set_dimensions(&mut self, width: u32, height: u32) {
        self.dimensions = (width, height);
    }

    fn dimensions(&self) -> (u32, u32) {
        self.dimensions
    }

    fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }

    fn set_title(&mut self, title: &str) {
        self.title = title.to_owned();
    }
}
