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

//! The application lifecycle state machine.
//!
//! An [`Application`] owns the update loop, the timer dispatcher and the
//! worker registry, and drives the per-tick update-then-redraw sequence over
//! all registered update targets. It is an explicitly constructed handle —
//! create one per process and pass clones to whoever needs to talk to it.
//!
//! Lifecycle operations are state-guarded: calling one in the wrong state
//! logs a diagnostic and does nothing, which keeps the surface forgiving
//! for beginner code driving shapes around a canvas.

use crate::config::AppConfig;
use crate::dispatcher::TimerDispatcher;
use crate::state::ApplicationState;
use crate::ticker::TickLoop;
use crate::worker::{CancelToken, WorkerRegistry};
use easel_core::{
    EventBus, RegistrationError, RenderSurface, SharedSurface, SharedTimedListener,
    SharedUpdateable, SpawnError, SurfaceEvent, SurfaceMode, Time, WeakUpdateable,
};
use std::sync::{
    atomic::{AtomicBool, AtomicU64, Ordering},
    Arc, Mutex,
};
use std::thread::{self, ThreadId};
use std::time::{Duration, Instant};

type LoaderFn = Box<dyn FnOnce(&CancelToken) -> anyhow::Result<()> + Send>;

struct AppInner {
    config: AppConfig,
    state: Mutex<ApplicationState>,
    running: AtomicBool,
    time: Mutex<Time>,
    update_objects: Mutex<Vec<WeakUpdateable>>,
    surface: Mutex<Option<SharedSurface>>,
    mode: Mutex<SurfaceMode>,
    dispatcher: TimerDispatcher,
    ticker: Mutex<Option<TickLoop>>,
    generation: AtomicU64,
    workers: WorkerRegistry,
    loader: Mutex<Option<LoaderFn>>,
    events: EventBus<SurfaceEvent>,
}

/// The application: window/canvas lifecycle, fixed-tick update loop, timer
/// dispatch and background workers behind one handle.
///
/// The handle is cheap to clone; all clones refer to the same application.
/// Construct one, bind a surface with [`initialize`](Application::initialize),
/// then drive it with [`start`](Application::start),
/// [`pause`](Application::pause), [`resume`](Application::resume) and
/// [`terminate`](Application::terminate). One application per process is the
/// intended (caller-enforced) invariant.
#[derive(Clone)]
pub struct Application {
    inner: Arc<AppInner>,
}

impl Application {
    /// Creates an application in the `Created` state.
    #[must_use]
    pub fn new(config: AppConfig) -> Self {
        let epoch = Instant::now();
        let inner = AppInner {
            dispatcher: TimerDispatcher::new(config.dispatcher_period_ms, epoch),
            time: Mutex::new(Time::with_epoch(epoch)),
            config,
            state: Mutex::new(ApplicationState::Created),
            running: AtomicBool::new(false),
            update_objects: Mutex::new(Vec::new()),
            surface: Mutex::new(None),
            mode: Mutex::new(SurfaceMode::Standalone),
            ticker: Mutex::new(None),
            generation: AtomicU64::new(0),
            workers: WorkerRegistry::new(),
            loader: Mutex::new(None),
            events: EventBus::new(),
        };
        log::info!("application created; call initialize() and start() to begin the loop");
        Self {
            inner: Arc::new(inner),
        }
    }

    /// Binds the application to its rendering surface and starts the pump
    /// that translates host surface events into lifecycle operations.
    ///
    /// Valid only from `Created`; ignored (with a diagnostic) elsewhere.
    pub fn initialize(&self, surface: SharedSurface, mode: SurfaceMode) {
        {
            let mut state = self.inner.state.lock().unwrap();
            if *state != ApplicationState::Created {
                log::warn!("initialize() ignored in state {:?}", *state);
                return;
            }
            *state = ApplicationState::Initializing;
        }

        if let Ok(mut guard) = surface.lock() {
            guard.set_title(&self.inner.config.title);
            guard.set_dimensions(self.inner.config.width, self.inner.config.height);
        }
        *self.inner.surface.lock().unwrap() = Some(surface);
        *self.inner.mode.lock().unwrap() = mode;

        self.spawn_event_pump();
        log::info!("application initialized ({mode:?}); call start() to begin the loop");
    }

    /// Starts the application: runs the registered loader (if any) on a
    /// background worker, launches the timer dispatcher and the update loop,
    /// and makes the surface visible.
    ///
    /// Valid only from `Initializing`; ignored (with a diagnostic)
    /// elsewhere — in particular a second `start()` spawns nothing.
    pub fn start(&self) {
        {
            let mut state = self.inner.state.lock().unwrap();
            if *state != ApplicationState::Initializing {
                log::warn!("start() ignored in state {:?}", *state);
                return;
            }
            *state = ApplicationState::Running;
        }
        self.inner.running.store(true, Ordering::SeqCst);

        if let Some(loader) = self.inner.loader.lock().unwrap().take() {
            if let Err(err) = self.inner.workers.spawn("loader", move |token| loader(token)) {
                log::warn!("failed to start loader worker: {err}");
            }
        }

        self.inner.dispatcher.start();
        self.spawn_tick_loop();
        self.with_surface(|surface| surface.set_visible(true));
        log::info!("application started");
    }

    /// Pauses the update loop (and, by default, the timer dispatcher). The
    /// loop thread is stopped and discarded; `resume()` spawns a fresh one.
    ///
    /// Ignored when already `Paused`, still `Created`, or `Exiting` — a
    /// terminated handle must stay inert, and letting it reach `Paused`
    /// would open resume() back up.
    pub fn pause(&self) {
        {
            let mut state = self.inner.state.lock().unwrap();
            if matches!(
                *state,
                ApplicationState::Paused | ApplicationState::Created | ApplicationState::Exiting
            ) {
                log::trace!("pause() ignored in state {:?}", *state);
                return;
            }
            *state = ApplicationState::Paused;
        }
        self.inner.running.store(false, Ordering::SeqCst);

        if let Some(tick_loop) = self.inner.ticker.lock().unwrap().take() {
            tick_loop.stop();
        }
        if self.inner.config.pause_suspends_timers {
            self.inner.dispatcher.suspend();
        }
        log::info!("application paused");
    }

    /// Resumes a paused application with a fresh update loop. The state
    /// passes through `Resuming` and settles on `Running` at the first tick.
    ///
    /// Valid only from `Paused`.
    pub fn resume(&self) {
        {
            let mut state = self.inner.state.lock().unwrap();
            if *state != ApplicationState::Paused {
                log::trace!("resume() ignored in state {:?}", *state);
                return;
            }
            *state = ApplicationState::Resuming;
        }
        self.inner.running.store(true, Ordering::SeqCst);

        if self.inner.config.pause_suspends_timers {
            self.inner.dispatcher.unsuspend();
        }
        self.spawn_tick_loop();
        self.with_surface(|surface| surface.set_visible(true));
        log::info!("application resumed");
    }

    /// Terminates the application: stops the update loop, releases the
    /// surface, cancels the timer dispatcher and every outstanding worker.
    ///
    /// Valid from any state and idempotent. The handle is inert afterwards;
    /// construct a fresh `Application` to run again. Exits the process only
    /// when [`AppConfig::exit_on_terminate`] is set and the application runs
    /// standalone.
    pub fn terminate(&self) {
        {
            let mut state = self.inner.state.lock().unwrap();
            if *state == ApplicationState::Exiting {
                log::trace!("terminate() called again; already exiting");
            }
            *state = ApplicationState::Exiting;
        }
        self.inner.running.store(false, Ordering::SeqCst);

        if let Some(tick_loop) = self.inner.ticker.lock().unwrap().take() {
            tick_loop.stop();
        }
        if let Some(surface) = self.inner.surface.lock().unwrap().take() {
            match surface.lock() {
                Ok(mut guard) => guard.terminate(),
                Err(_) => log::warn!("surface lock poisoned during terminate"),
            }
        }
        self.inner.dispatcher.stop();
        self.inner.workers.cancel_all();
        // Ends the surface-event pump.
        self.inner.events.publish(SurfaceEvent::Closed);
        log::info!("application terminating");

        let standalone = *self.inner.mode.lock().unwrap() == SurfaceMode::Standalone;
        if self.inner.config.exit_on_terminate && standalone {
            std::process::exit(0);
        }
    }

    /// Registers an update target. The application keeps only a weak
    /// reference: dropping the target's last strong handle deregisters it.
    /// Duplicate registration is allowed — a target registered twice is
    /// updated twice per tick.
    pub fn add_update_object(&self, target: &SharedUpdateable) {
        let mut objects = self.inner.update_objects.lock().unwrap();
        objects.retain(|weak| weak.strong_count() > 0);
        objects.push(Arc::downgrade(target));
    }

    /// Removes one occurrence of an update target. Removing a target that
    /// is not registered is a no-op.
    pub fn remove_update_object(&self, target: &SharedUpdateable) {
        let mut objects = self.inner.update_objects.lock().unwrap();
        if let Some(position) = objects
            .iter()
            .position(|weak| weak.upgrade().is_some_and(|live| Arc::ptr_eq(&live, target)))
        {
            objects.remove(position);
        }
    }

    /// Registers a timed listener with the dispatcher. The listener's
    /// period is read once, here; a zero period is rejected.
    pub fn add_timed_object(
        &self,
        listener: &SharedTimedListener,
    ) -> Result<(), RegistrationError> {
        let period = listener
            .lock()
            .map_err(|_| RegistrationError::ListenerUnavailable)?
            .period_ms();
        self.inner.dispatcher.add(listener, period)
    }

    /// Deregisters a timed listener at the end of the dispatcher's next
    /// cycle. Errors (unknown listener, dispatcher already gone) are
    /// swallowed.
    pub fn remove_timed_object(&self, listener: &SharedTimedListener) {
        self.inner.dispatcher.remove(listener);
    }

    /// Registers the one-shot loader run on a background worker when the
    /// application starts. Replaces any previously registered loader.
    pub fn set_loader<F>(&self, loader: F)
    where
        F: FnOnce(&CancelToken) -> anyhow::Result<()> + Send + 'static,
    {
        *self.inner.loader.lock().unwrap() = Some(Box::new(loader));
    }

    /// Spawns a named one-shot background worker. The worker registers
    /// itself for lifecycle cleanup and deregisters when its job returns.
    pub fn spawn_worker<F>(&self, name: &str, job: F) -> Result<(), SpawnError>
    where
        F: FnOnce(&CancelToken) -> anyhow::Result<()> + Send + 'static,
    {
        self.inner.workers.spawn(name, job)
    }

    /// Applies a host surface event to the lifecycle: minimizing or losing
    /// focus pauses, restoring resumes, and a close request terminates a
    /// running application.
    pub fn handle_surface_event(&self, event: SurfaceEvent) {
        log::trace!("surface event: {event:?}");
        match event {
            SurfaceEvent::Iconified | SurfaceEvent::Deactivated => self.pause(),
            SurfaceEvent::Deiconified | SurfaceEvent::Activated => self.resume(),
            SurfaceEvent::CloseRequested => {
                if self.is_running() {
                    self.terminate();
                }
            }
            SurfaceEvent::Opened | SurfaceEvent::Closed => {}
        }
    }

    /// A sender on which host glue publishes surface events; they are
    /// applied by the application's event pump.
    #[must_use]
    pub fn surface_events(&self) -> flume::Sender<SurfaceEvent> {
        self.inner.events.sender()
    }

    /// Sets the host window title.
    pub fn set_title(&self, title: &str) {
        self.with_surface(|surface| surface.set_title(title));
    }

    /// Resizes the drawable area.
    pub fn set_dimensions(&self, width: u32, height: u32) {
        self.with_surface(|surface| surface.set_dimensions(width, height));
    }

    /// Shows or hides the surface.
    pub fn set_visible(&self, visible: bool) {
        self.with_surface(|surface| surface.set_visible(visible));
    }

    /// Current drawable area size, or `None` before a surface is bound
    /// (and after terminate).
    #[must_use]
    pub fn dimensions(&self) -> Option<(u32, u32)> {
        let guard = self.inner.surface.lock().unwrap();
        let surface = guard.as_ref()?;
        surface.lock().ok().map(|surface| surface.dimensions())
    }

    /// The current lifecycle state.
    #[must_use]
    pub fn state(&self) -> ApplicationState {
        *self.inner.state.lock().unwrap()
    }

    /// Whether the update loop is (or is about to be) ticking.
    #[must_use]
    pub fn is_running(&self) -> bool {
        self.inner.running.load(Ordering::SeqCst)
    }

    /// How many update loops have been spawned over this application's
    /// lifetime. Increments on `start()` and on every `resume()`, since a
    /// stopped loop is never reused.
    #[must_use]
    pub fn update_loop_generation(&self) -> u64 {
        self.inner.generation.load(Ordering::SeqCst)
    }

    /// Thread id of the live update loop, or `None` while paused or
    /// terminated.
    #[must_use]
    pub fn update_loop_thread_id(&self) -> Option<ThreadId> {
        self.inner
            .ticker
            .lock()
            .unwrap()
            .as_ref()
            .map(TickLoop::thread_id)
    }

    /// Number of currently registered background workers.
    #[must_use]
    pub fn worker_count(&self) -> usize {
        self.inner.workers.len()
    }

    /// One tick of the application: clear `Resuming`, bracket the cycle
    /// with the time stopwatch, update a snapshot of the registered targets
    /// in insertion order (dead entries skipped), then redraw the surface
    /// under its lock.
    fn application_tick(&self) {
        {
            let mut state = self.inner.state.lock().unwrap();
            if matches!(
                *state,
                ApplicationState::Running | ApplicationState::Resuming
            ) {
                *state = ApplicationState::Running;
            }
        }

        let mut time = self.inner.time.lock().unwrap();
        time.begin();

        // Snapshot so targets may register/deregister mid-tick without
        // corrupting the iteration.
        let snapshot: Vec<WeakUpdateable> = self.inner.update_objects.lock().unwrap().clone();
        for weak in &snapshot {
            let Some(target) = weak.upgrade() else {
                continue;
            };
            let Ok(mut target) = target.lock() else {
                log::warn!("skipping update target with poisoned lock");
                continue;
            };
            if let Err(err) = target.update(&time) {
                log::warn!("update target failed: {err:#}");
            }
        }
        if let Some(surface) = self.inner.surface.lock().unwrap().as_ref() {
            if let Ok(mut surface) = surface.lock() {
                surface.redraw();
            }
        }
        time.end();
    }

    fn spawn_tick_loop(&self) {
        let generation = self.inner.generation.fetch_add(1, Ordering::SeqCst) + 1;
        let interval = Duration::from_millis(self.inner.config.tick_interval_ms);
        let app = self.clone();
        let tick_loop = TickLoop::spawn(generation, interval, move || {
            if !app.inner.running.load(Ordering::SeqCst) {
                return false;
            }
            app.application_tick();
            true
        });
        *self.inner.ticker.lock().unwrap() = Some(tick_loop);
    }

    fn spawn_event_pump(&self) {
        let app = self.clone();
        let receiver = self.inner.events.receiver();
        let spawned = thread::Builder::new()
            .name("easel-events".to_owned())
            .spawn(move || {
                for event in receiver.iter() {
                    if event == SurfaceEvent::Closed {
                        break;
                    }
                    app.handle_surface_event(event);
                }
                log::trace!("surface event pump stopped");
            });
        if let Err(err) = spawned {
            log::warn!("failed to spawn surface event pump: {err}");
        }
    }

    fn with_surface(&self, operation: impl FnOnce(&mut dyn RenderSurface)) {
        if let Some(surface) = self.inner.surface.lock().unwrap().as_ref() {
            if let Ok(mut guard) = surface.lock() {
                operation(&mut *guard);
            }
        }
    }
}
