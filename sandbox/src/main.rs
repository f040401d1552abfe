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

// Easel Sandbox
// Drives a headless application through its lifecycle for manual testing.

use std::sync::{Arc, Mutex};
use std::thread;
use std::time::Duration;

use anyhow::Result;
use easel_core::surface::HeadlessSurface;
use easel_core::{
    SharedTimedListener, SharedUpdateable, SurfaceMode, Time, TimedEvent, TimedListener,
    Updateable,
};
use easel_runtime::{AppConfig, Application};

/// A dot sliding right at a fixed speed, wrapping at the surface edge.
struct Dot {
    x: f32,
    speed: f32,
    width: f32,
}

impl Updateable for Dot {
    fn update(&mut self, time: &Time) -> Result<()> {
        self.x += self.speed * time.delta_secs_f32();
        if self.x > self.width {
            self.x -= self.width;
        }
        Ok(())
    }
}

/// Logs a heartbeat every 250ms of dispatcher time.
struct Blinker {
    beats: u32,
}

impl TimedListener for Blinker {
    fn period_ms(&self) -> u64 {
        250
    }

    fn on_timed_event(&mut self, event: &TimedEvent) -> Result<()> {
        self.beats += 1;
        log::info!(
            "blink #{} at t={}ms",
            self.beats,
            event.execution_time_ms()
        );
        Ok(())
    }
}

fn main() -> Result<()> {
    use env_logger::{Builder, Env};

    Builder::from_env(Env::default().default_filter_or("info")).init();

    let config = AppConfig {
        title: "easel sandbox".to_owned(),
        width: 640,
        height: 480,
        ..AppConfig::default()
    };
    let width = config.width as f32;

    let app = Application::new(config);
    app.initialize(
        Arc::new(Mutex::new(HeadlessSurface::new())),
        SurfaceMode::Standalone,
    );

    let dot: SharedUpdateable = Arc::new(Mutex::new(Dot {
        x: 0.0,
        speed: 120.0,
        width,
    }));
    app.add_update_object(&dot);

    let blinker: SharedTimedListener = Arc::new(Mutex::new(Blinker { beats: 0 }));
    app.add_timed_object(&blinker)?;

    app.set_loader(|_token| {
        log::info!("loader: pretending to load assets");
        thread::sleep(Duration::from_millis(100));
        log::info!("loader: done");
        Ok(())
    });

    app.start();
    thread::sleep(Duration::from_secs(1));

    app.pause();
    log::info!("paused for half a second");
    thread::sleep(Duration::from_millis(500));
    app.resume();
    thread::sleep(Duration::from_secs(1));

    app.terminate();
    Ok(())
}
