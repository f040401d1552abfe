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

//! The millisecond timer dispatcher.
//!
//! One background thread ticks at a fixed base period (1 ms by default) over
//! all registered timed listeners. Registration and removal are never
//! applied to the live table mid-cycle: they travel through a command
//! channel drained at the start of each cycle, with additions admitted
//! before firing and removals applied after — a change requested from inside
//! a firing callback therefore takes effect at the next cycle at the
//! earliest.

use crossbeam_channel::{Receiver, Sender};
use easel_core::{RegistrationError, SharedTimedListener, TimedEvent};
use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc, Mutex,
};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

enum Command {
    Add {
        listener: SharedTimedListener,
        period: u64,
    },
    Remove {
        listener: SharedTimedListener,
    },
}

struct Entry {
    listener: SharedTimedListener,
    period: u64,
    /// Dispatcher cycles elapsed since admission.
    counter: u64,
}

/// The live listener table plus its pending-command queue.
///
/// Kept separate from the thread so the per-cycle protocol can be exercised
/// deterministically in tests.
struct DispatchTable {
    entries: Vec<Entry>,
    commands: Receiver<Command>,
}

impl DispatchTable {
    fn new(commands: Receiver<Command>) -> Self {
        Self {
            entries: Vec::new(),
            commands,
        }
    }

    /// Runs one dispatch cycle: drain pending commands (admitting additions
    /// with a zeroed counter), fire every due listener, increment every
    /// counter, then apply the drained removals.
    fn tick(&mut self, event: &TimedEvent) {
        let mut removals = Vec::new();
        while let Ok(command) = self.commands.try_recv() {
            match command {
                Command::Add { listener, period } => self.entries.push(Entry {
                    listener,
                    period,
                    counter: 0,
                }),
                Command::Remove { listener } => removals.push(listener),
            }
        }

        for entry in &mut self.entries {
            if entry.counter % entry.period == 0 {
                match entry.listener.lock() {
                    Ok(mut listener) => {
                        if let Err(err) = listener.on_timed_event(event) {
                            log::warn!("timed listener failed: {err:#}");
                        }
                    }
                    Err(_) => log::warn!("skipping timed listener with poisoned lock"),
                }
            }
            entry.counter += 1;
        }

        for target in removals {
            if let Some(position) = self
                .entries
                .iter()
                .position(|entry| Arc::ptr_eq(&entry.listener, &target))
            {
                self.entries.remove(position);
            }
        }
    }

    fn len(&self) -> usize {
        self.entries.len()
    }
}

/// Drives timed listeners from a dedicated thread.
///
/// The dispatcher is started once, may be suspended and resumed any number
/// of times (suspension freezes counters, it does not forget listeners), and
/// is stopped exactly once at terminate. `stop()` is idempotent and safe to
/// call from a listener callback.
pub(crate) struct TimerDispatcher {
    commands: Sender<Command>,
    pending: Mutex<Option<Receiver<Command>>>,
    running: Arc<AtomicBool>,
    suspended: Arc<AtomicBool>,
    handle: Mutex<Option<JoinHandle<()>>>,
    period: Duration,
    epoch: Instant,
}

impl TimerDispatcher {
    pub(crate) fn new(period_ms: u64, epoch: Instant) -> Self {
        let (commands, receiver) = crossbeam_channel::unbounded();
        Self {
            commands,
            pending: Mutex::new(Some(receiver)),
            running: Arc::new(AtomicBool::new(false)),
            suspended: Arc::new(AtomicBool::new(false)),
            handle: Mutex::new(None),
            period: Duration::from_millis(period_ms.max(1)),
            epoch,
        }
    }

    /// Launches the dispatcher thread. A second call, or a call after
    /// `stop()`, is a logged no-op.
    pub(crate) fn start(&self) {
        let Some(receiver) = self.pending.lock().unwrap().take() else {
            log::warn!("timer dispatcher already started; ignoring");
            return;
        };
        self.running.store(true, Ordering::SeqCst);

        let running = Arc::clone(&self.running);
        let suspended = Arc::clone(&self.suspended);
        let period = self.period;
        let epoch = self.epoch;

        let handle = thread::spawn(move || {
            log::info!("timer dispatcher thread started");
            let mut table = DispatchTable::new(receiver);
            while running.load(Ordering::Relaxed) {
                let cycle_start = Instant::now();
                if !suspended.load(Ordering::Relaxed) {
                    let event = TimedEvent::new(epoch.elapsed().as_millis() as u64);
                    table.tick(&event);
                }
                let elapsed = cycle_start.elapsed();
                if elapsed < period {
                    thread::sleep(period - elapsed);
                }
            }
            log::info!("timer dispatcher thread stopped");
        });
        *self.handle.lock().unwrap() = Some(handle);
    }

    /// Buffers a listener for admission at the start of the next cycle.
    pub(crate) fn add(
        &self,
        listener: &SharedTimedListener,
        period: u64,
    ) -> Result<(), RegistrationError> {
        if period == 0 {
            return Err(RegistrationError::ZeroPeriod);
        }
        let command = Command::Add {
            listener: Arc::clone(listener),
            period,
        };
        if self.commands.send(command).is_err() {
            log::debug!("timed listener registered after dispatcher shutdown; ignoring");
        }
        Ok(())
    }

    /// Buffers a listener for removal at the end of the next cycle.
    /// Removing an unknown listener is a no-op.
    pub(crate) fn remove(&self, listener: &SharedTimedListener) {
        let command = Command::Remove {
            listener: Arc::clone(listener),
        };
        if self.commands.send(command).is_err() {
            log::debug!("timed listener removed after dispatcher shutdown; ignoring");
        }
    }

    /// Freezes dispatch; counters hold their values until `unsuspend()`.
    pub(crate) fn suspend(&self) {
        self.suspended.store(true, Ordering::SeqCst);
        log::trace!("timer dispatcher suspended");
    }

    /// Resumes dispatch after a `suspend()`.
    pub(crate) fn unsuspend(&self) {
        self.suspended.store(false, Ordering::SeqCst);
        log::trace!("timer dispatcher resumed");
    }

    /// Stops the dispatcher thread. Safe to call multiple times and from
    /// the dispatcher thread itself (the join is skipped there; the thread
    /// winds down once it observes the cleared running flag).
    pub(crate) fn stop(&self) {
        self.running.store(false, Ordering::SeqCst);
        if let Some(handle) = self.handle.lock().unwrap().take() {
            if handle.thread().id() != thread::current().id() {
                let _ = handle.join();
            }
        }
    }

    #[cfg(test)]
    pub(crate) fn is_running(&self) -> bool {
        self.running.load(Ordering::SeqCst)
    }
}

impl Drop for TimerDispatcher {
    fn drop(&mut self) {
        self.stop();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::AtomicUsize;

    /// Counts its own firings through a shared counter.
    struct Recorder {
        period: u64,
        fired: Arc<AtomicUsize>,
    }

    impl Recorder {
        fn new(period: u64) -> (SharedTimedListener, Arc<AtomicUsize>) {
            let fired = Arc::new(AtomicUsize::new(0));
            let listener: SharedTimedListener = Arc::new(Mutex::new(Self {
                period,
                fired: Arc::clone(&fired),
            }));
            (listener, fired)
        }
    }

    impl easel_core::TimedListener for Recorder {
        fn period_ms(&self) -> u64 {
            self.period
        }
        fn on_timed_event(&mut self, _event: &TimedEvent) -> anyhow::Result<()> {
            self.fired.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }
    }

    fn table() -> (DispatchTable, Sender<Command>) {
        let (sender, receiver) = crossbeam_channel::unbounded();
        (DispatchTable::new(receiver), sender)
    }

    fn add(sender: &Sender<Command>, listener: &SharedTimedListener, period: u64) {
        sender
            .send(Command::Add {
                listener: Arc::clone(listener),
                period,
            })
            .unwrap();
    }

    fn run_cycles(table: &mut DispatchTable, cycles: u64) {
        for cycle in 0..cycles {
            table.tick(&TimedEvent::new(cycle));
        }
    }

    #[test]
    fn fires_on_admission_cycle_and_every_period_after() {
        let (mut table, sender) = table();
        let (listener, fired) = Recorder::new(10);
        add(&sender, &listener, 10);

        run_cycles(&mut table, 25);

        // Counter values 0, 10 and 20 are divisible by 10.
        assert_eq!(fired.load(Ordering::SeqCst), 3);
    }

    #[test]
    fn firing_count_over_n_cycles() {
        let (mut table, sender) = table();
        let (listener, fired) = Recorder::new(7);
        add(&sender, &listener, 7);

        run_cycles(&mut table, 40);

        // Counters 0, 7, 14, 21, 28, 35 fire within 40 cycles.
        assert_eq!(fired.load(Ordering::SeqCst), 6);
    }

    #[test]
    fn period_one_fires_every_cycle() {
        let (mut table, sender) = table();
        let (listener, fired) = Recorder::new(1);
        add(&sender, &listener, 1);

        run_cycles(&mut table, 12);
        assert_eq!(fired.load(Ordering::SeqCst), 12);
    }

    #[test]
    fn addition_from_callback_waits_for_next_cycle() {
        struct AddsAnother {
            sender: Sender<Command>,
            other: SharedTimedListener,
            done: bool,
        }
        impl easel_core::TimedListener for AddsAnother {
            fn period_ms(&self) -> u64 {
                1
            }
            fn on_timed_event(&mut self, _event: &TimedEvent) -> anyhow::Result<()> {
                if !self.done {
                    self.done = true;
                    self.sender
                        .send(Command::Add {
                            listener: Arc::clone(&self.other),
                            period: 1,
                        })
                        .unwrap();
                }
                Ok(())
            }
        }

        let (mut table, sender) = table();
        let (other, other_fired) = Recorder::new(1);
        let adder: SharedTimedListener = Arc::new(Mutex::new(AddsAnother {
            sender: sender.clone(),
            other,
            done: false,
        }));
        add(&sender, &adder, 1);

        table.tick(&TimedEvent::new(0));
        assert_eq!(
            other_fired.load(Ordering::SeqCst),
            0,
            "listener added mid-cycle must not fire in that cycle"
        );
        assert_eq!(table.len(), 1);

        table.tick(&TimedEvent::new(1));
        assert_eq!(other_fired.load(Ordering::SeqCst), 1);
        assert_eq!(table.len(), 2);
    }

    #[test]
    fn removal_from_own_callback_takes_effect_next_cycle() {
        struct RemovesItself {
            sender: Sender<Command>,
            me: Option<SharedTimedListener>,
            fired: Arc<AtomicUsize>,
        }
        impl easel_core::TimedListener for RemovesItself {
            fn period_ms(&self) -> u64 {
                1
            }
            fn on_timed_event(&mut self, _event: &TimedEvent) -> anyhow::Result<()> {
                self.fired.fetch_add(1, Ordering::SeqCst);
                if let Some(me) = self.me.take() {
                    self.sender.send(Command::Remove { listener: me }).unwrap();
                }
                Ok(())
            }
        }

        let (mut table, sender) = table();
        let fired = Arc::new(AtomicUsize::new(0));
        let concrete = Arc::new(Mutex::new(RemovesItself {
            sender: sender.clone(),
            me: None,
            fired: Arc::clone(&fired),
        }));
        let listener: SharedTimedListener = concrete.clone();
        // Give the listener a handle to itself for the removal command.
        concrete.lock().unwrap().me = Some(Arc::clone(&listener));
        let (bystander, bystander_fired) = Recorder::new(1);
        add(&sender, &listener, 1);
        add(&sender, &bystander, 1);

        table.tick(&TimedEvent::new(0));
        assert_eq!(fired.load(Ordering::SeqCst), 1);
        assert_eq!(
            bystander_fired.load(Ordering::SeqCst),
            1,
            "removal must not disturb other listeners in the same cycle"
        );
        assert_eq!(table.len(), 1, "removal applies at the end of the cycle");

        table.tick(&TimedEvent::new(1));
        assert_eq!(fired.load(Ordering::SeqCst), 1, "removed listener stays quiet");
        assert_eq!(bystander_fired.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn failing_listener_does_not_abort_the_cycle() {
        struct AlwaysFails;
        impl easel_core::TimedListener for AlwaysFails {
            fn period_ms(&self) -> u64 {
                1
            }
            fn on_timed_event(&mut self, _event: &TimedEvent) -> anyhow::Result<()> {
                anyhow::bail!("listener blew up")
            }
        }

        let (mut table, sender) = table();
        let failing: SharedTimedListener = Arc::new(Mutex::new(AlwaysFails));
        let (healthy, healthy_fired) = Recorder::new(1);
        add(&sender, &failing, 1);
        add(&sender, &healthy, 1);

        run_cycles(&mut table, 3);
        assert_eq!(
            healthy_fired.load(Ordering::SeqCst),
            3,
            "a failing listener must not starve the others"
        );
        assert_eq!(table.len(), 2, "failures do not evict the listener either");
    }

    #[test]
    fn zero_period_is_rejected() {
        let dispatcher = TimerDispatcher::new(1, Instant::now());
        let (listener, _) = Recorder::new(0);
        assert!(matches!(
            dispatcher.add(&listener, 0),
            Err(RegistrationError::ZeroPeriod)
        ));
    }

    #[test]
    fn thread_lifecycle_fires_and_stops() {
        let dispatcher = TimerDispatcher::new(1, Instant::now());
        let (listener, fired) = Recorder::new(1);
        dispatcher.add(&listener, 1).unwrap();
        dispatcher.start();
        assert!(dispatcher.is_running());

        thread::sleep(Duration::from_millis(50));
        dispatcher.stop();
        assert!(!dispatcher.is_running());
        assert!(
            fired.load(Ordering::SeqCst) > 5,
            "dispatcher should have fired repeatedly while running"
        );

        // Idempotent.
        dispatcher.stop();
    }

    #[test]
    fn suspension_freezes_dispatch() {
        let dispatcher = TimerDispatcher::new(1, Instant::now());
        let (listener, fired) = Recorder::new(1);
        dispatcher.add(&listener, 1).unwrap();
        dispatcher.suspend();
        dispatcher.start();

        thread::sleep(Duration::from_millis(30));
        assert_eq!(fired.load(Ordering::SeqCst), 0, "suspended dispatcher stays quiet");

        dispatcher.unsuspend();
        thread::sleep(Duration::from_millis(30));
        assert!(fired.load(Ordering::SeqCst) > 0, "dispatch resumes after unsuspend");
        dispatcher.stop();
    }
}
