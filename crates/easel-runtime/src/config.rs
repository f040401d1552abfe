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

//! Runtime configuration for the application.

use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Configuration for an [`Application`](crate::Application).
///
/// Every field has a sensible default, and the JSON loaders accept partial
/// documents, so a host can override only what it cares about.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Title applied to the bound surface at initialization.
    pub title: String,
    /// Initial width of the drawable area in pixels.
    pub width: u32,
    /// Initial height of the drawable area in pixels.
    pub height: u32,
    /// Target gap between two update-loop ticks, in milliseconds.
    /// Roughly 60 ticks per second at the default of 15.
    pub tick_interval_ms: u64,
    /// Base period of the timer dispatcher, in milliseconds. Listener
    /// periods are counted in multiples of this.
    pub dispatcher_period_ms: u64,
    /// Whether pausing the application also suspends the timer dispatcher.
    /// When `false`, timed listeners keep firing while paused, matching the
    /// behavior of hosts that run background effects during pause.
    pub pause_suspends_timers: bool,
    /// Whether `terminate()` exits the process. Never honored when the
    /// application runs embedded in a host surface.
    pub exit_on_terminate: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            title: "easel".to_owned(),
            width: 800,
            height: 600,
            tick_interval_ms: 15,
            dispatcher_period_ms: 1,
            pause_suspends_timers: true,
            exit_on_terminate: false,
        }
    }
}

impl AppConfig {
    /// Parses a configuration from a JSON document. Missing fields fall
    /// back to their defaults.
    pub fn from_json_str(json: &str) -> anyhow::Result<Self> {
        serde_json::from_str(json).context("failed to parse application config")
    }

    /// Reads and parses a JSON configuration file.
    pub fn from_json_file(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file '{}'", path.display()))?;
        Self::from_json_str(&contents)
    }
}
