// Copyright 2025 eraflo
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

use log;

/// Manages a generic, thread-safe event channel.
///
/// The bus is the observer-registration point of the fetch boundary: the
/// owner keeps the receiver and drains it on its tick, while any number of
/// producers (fetch lanes, the facade) hold cloned senders. Events therefore
/// cross from worker tasks back onto the cooperative tick thread without any
/// shared locking.
#[derive(Debug)]
pub struct EventBus<T: Clone + Send + Sync + 'static> {
    sender: flume::Sender<T>,
    receiver: flume::Receiver<T>,
}

impl<T: Clone + Send + Sync + 'static> EventBus<T> {
    /// Creates a new EventBus with an unbounded channel for a specific event type.
    pub fn new() -> Self {
        let (sender, receiver) = flume::unbounded();
        Self { sender, receiver }
    }

    /// Attempts to send an event, logging an error if the receiver is disconnected.
    pub fn publish(&self, event: T) {
        if let Err(e) = self.sender.send(event) {
            log::error!("Failed to send event: {e}. Receiver likely disconnected.");
        }
    }

    /// Returns a clone of the sender end of the channel.
    ///
    /// Handing this to a collaborator registers it as an event producer; the
    /// returned sender is the registration handle and stays valid until
    /// dropped.
    pub fn sender(&self) -> flume::Sender<T> {
        self.sender.clone()
    }

    /// Returns a reference to the receiver end of the channel.
    /// Intended for the owner of the bus to drain events each tick.
    pub fn receiver(&self) -> &flume::Receiver<T> {
        &self.receiver
    }
}

impl<T: Clone + Send + Sync + 'static> Default for EventBus<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use flume::TryRecvError;
    use std::{thread, time::Duration};

    #[derive(Debug, Clone, PartialEq)]
    enum TestEvent {
        Started { key: String },
        Finished,
    }

    #[test]
    fn drains_in_publish_order() {
        let bus = EventBus::<TestEvent>::new();
        bus.publish(TestEvent::Started {
            key: "a".to_string(),
        });
        bus.publish(TestEvent::Finished);

        let drained: Vec<_> = bus.receiver().try_iter().collect();
        assert_eq!(
            drained,
            vec![
                TestEvent::Started {
                    key: "a".to_string()
                },
                TestEvent::Finished
            ]
        );
        assert_eq!(bus.receiver().try_recv(), Err(TryRecvError::Empty));
    }

    #[test]
    fn senders_work_across_threads() {
        let bus = EventBus::<TestEvent>::new();
        let sender = bus.sender();

        let handle = thread::spawn(move || {
            sender.send(TestEvent::Finished).expect("send should succeed");
        });
        handle.join().expect("thread join failed");

        match bus.receiver().recv_timeout(Duration::from_secs(1)) {
            Ok(event) => assert_eq!(event, TestEvent::Finished),
            Err(e) => panic!("Failed to receive event: {e:?}"),
        }
    }

    #[test]
    fn publish_after_receiver_drop_does_not_panic() {
        let bus = EventBus::<TestEvent>::new();
        let sender = bus.sender();
        drop(bus);
        assert!(sender.send(TestEvent::Finished).is_err());
    }
}
