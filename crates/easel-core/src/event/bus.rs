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

/// A generic, thread-safe event channel.
///
/// The bus is generic over the event type `T` so this crate stays decoupled
/// from the concrete events higher layers define. The bus keeps both channel
/// ends alive, so publishing never fails while the bus exists; hand out
/// [`sender`](EventBus::sender) clones to producers and a
/// [`receiver`](EventBus::receiver) clone to whichever thread drains it.
#[derive(Debug)]
pub struct EventBus<T: Send + 'static> {
    sender: flume::Sender<T>,
    receiver: flume::Receiver<T>,
}

impl<T: Send + 'static> EventBus<T> {
    /// Creates a new bus backed by an unbounded channel.
    #[must_use]
    pub fn new() -> Self {
        let (sender, receiver) = flume::unbounded();
        Self { sender, receiver }
    }

    /// Sends an event, logging if the channel is somehow disconnected.
    pub fn publish(&self, event: T) {
        if let Err(err) = self.sender.send(event) {
            log::error!("failed to publish event: {err}");
        }
    }

    /// A clone of the sender end, for producers on other threads.
    #[must_use]
    pub fn sender(&self) -> flume::Sender<T> {
        self.sender.clone()
    }

    /// A clone of the receiver end, for the thread draining the bus.
    #[must_use]
    pub fn receiver(&self) -> flume::Receiver<T> {
        self.receiver.clone()
    }
}

impl<T: Send + 'static> Default for EventBus<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::SurfaceEvent;
    use std::thread;
    use std::time::Duration;

    #[test]
    fn publish_then_receive_in_order() {
        let bus = EventBus::new();
        bus.publish(SurfaceEvent::Opened);
        bus.publish(SurfaceEvent::Iconified);

        let receiver = bus.receiver();
        assert_eq!(receiver.try_recv(), Ok(SurfaceEvent::Opened));
        assert_eq!(receiver.try_recv(), Ok(SurfaceEvent::Iconified));
        assert!(receiver.try_recv().is_err(), "bus should now be empty");
    }

    #[test]
    fn sender_works_across_threads() {
        let bus = EventBus::new();
        let sender = bus.sender();
        let handle = thread::spawn(move || {
            sender.send(SurfaceEvent::CloseRequested).unwrap();
        });
        let event = bus
            .receiver()
            .recv_timeout(Duration::from_secs(1))
            .expect("event should arrive");
        assert_eq!(event, SurfaceEvent::CloseRequested);
        handle.join().unwrap();
    }

    #[test]
    fn publish_never_fails_while_bus_lives() {
        let bus = EventBus::new();
        // Even with an extra receiver dropped, the bus keeps its own end.
        drop(bus.receiver());
        bus.publish(SurfaceEvent::Closed);
        assert_eq!(bus.receiver().try_recv(), Ok(SurfaceEvent::Closed));
    }
}
