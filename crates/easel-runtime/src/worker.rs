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

//! One-shot background workers.
//!
//! A worker runs a single typed closure on its own detached thread. It
//! registers itself before running and deregisters on the way out, so the
//! application can cancel every outstanding worker at terminate. A failing
//! job is logged and ends only that worker.

use easel_core::SpawnError;
use std::collections::HashMap;
use std::sync::{
    atomic::{AtomicBool, AtomicU64, Ordering},
    Arc, Mutex,
};
use std::thread;

/// Cooperative cancellation flag handed to a worker's job.
///
/// Long-running jobs should poll [`is_cancelled`](CancelToken::is_cancelled)
/// at convenient points and bail out when it turns true; `terminate()`
/// cancels every outstanding worker's token.
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    /// Creates a fresh, uncancelled token.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Requests cancellation.
    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    /// Whether cancellation has been requested.
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

struct WorkerEntry {
    name: String,
    token: CancelToken,
}

/// Tracks every live one-shot worker so terminate can cancel them all.
#[derive(Default)]
pub(crate) struct WorkerRegistry {
    entries: Arc<Mutex<HashMap<u64, WorkerEntry>>>,
    next_id: AtomicU64,
}

impl WorkerRegistry {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Spawns a named, detached worker running `job` exactly once.
    ///
    /// The worker is registered before its thread starts and removes itself
    /// when the job returns, whether it succeeded or failed.
    pub(crate) fn spawn<F>(&self, name: &str, job: F) -> Result<(), SpawnError>
    where
        F: FnOnce(&CancelToken) -> anyhow::Result<()> + Send + 'static,
    {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let token = CancelToken::new();
        self.entries.lock().unwrap().insert(
            id,
            WorkerEntry {
                name: name.to_owned(),
                token: token.clone(),
            },
        );

        let entries = Arc::clone(&self.entries);
        let worker_name = name.to_owned();
        let spawned = thread::Builder::new()
            .name(format!("easel-worker-{name}"))
            .spawn(move || {
                log::info!("worker '{worker_name}' executing");
                if let Err(err) = job(&token) {
                    log::warn!("worker '{worker_name}' failed: {err:#}");
                }
                entries.lock().unwrap().remove(&id);
                log::info!("worker '{worker_name}' finished");
            });

        match spawned {
            // Detached on purpose: workers are daemon-style and must not
            // block shutdown.
            Ok(_handle) => Ok(()),
            Err(source) => {
                self.entries.lock().unwrap().remove(&id);
                Err(SpawnError::Thread {
                    name: name.to_owned(),
                    source,
                })
            }
        }
    }

    /// Cancels every outstanding worker and clears the registry.
    pub(crate) fn cancel_all(&self) {
        let drained: Vec<WorkerEntry> = {
            let mut entries = self.entries.lock().unwrap();
            entries.drain().map(|(_, entry)| entry).collect()
        };
        for entry in drained {
            log::info!("cancelling worker '{}'", entry.name);
            entry.token.cancel();
        }
    }

    /// Number of workers currently registered.
    pub(crate) fn len(&self) -> usize {
        self.entries.lock().unwrap().len()
    }
}
