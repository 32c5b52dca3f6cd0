//! Notification hub - fans inbound events out to connected observers.
//!
//! One actor task owns the observer set. Registration, removal and
//! broadcasts are queued to it over a single channel, so the set is only
//! ever touched from that task. Observers get a bounded queue each; an
//! observer whose queue is closed or full is dropped on the next broadcast.

use std::collections::HashMap;

use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;

use crate::domain::entities::NotificationEvent;
use crate::domain::traits::EventSink;

pub type ObserverId = u64;

enum HubCommand {
    Register {
        tx: mpsc::Sender<NotificationEvent>,
        reply: oneshot::Sender<ObserverId>,
    },
    Unregister(ObserverId),
    Broadcast(NotificationEvent),
    Count(oneshot::Sender<usize>),
}

/// A registered observer's end of the hub
#[derive(Debug)]
pub struct Observer {
    pub id: ObserverId,
    pub events: mpsc::Receiver<NotificationEvent>,
}

/// Cheap, cloneable handle to the hub actor
#[derive(Clone)]
pub struct HubHandle {
    commands: mpsc::UnboundedSender<HubCommand>,
    buffer: usize,
}

pub struct NotificationHub {
    observers: HashMap<ObserverId, mpsc::Sender<NotificationEvent>>,
    next_id: ObserverId,
}

impl NotificationHub {
    /// Start the actor on the current runtime
    pub fn spawn(buffer: usize) -> (HubHandle, JoinHandle<()>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let hub = Self {
            observers: HashMap::new(),
            next_id: 1,
        };
        let task = tokio::spawn(hub.run(rx));
        (
            HubHandle {
                commands: tx,
                buffer: buffer.max(1),
            },
            task,
        )
    }

    async fn run(mut self, mut commands: mpsc::UnboundedReceiver<HubCommand>) {
        while let Some(command) = commands.recv().await {
            match command {
                HubCommand::Register { tx, reply } => {
                    let id = self.next_id;
                    self.next_id += 1;
                    self.observers.insert(id, tx);
                    tracing::debug!("Observer {} registered ({} total)", id, self.observers.len());
                    let _ = reply.send(id);
                }
                HubCommand::Unregister(id) => {
                    if self.observers.remove(&id).is_some() {
                        tracing::debug!("Observer {} unregistered", id);
                    }
                }
                HubCommand::Broadcast(event) => self.broadcast(event),
                HubCommand::Count(reply) => {
                    let _ = reply.send(self.observers.len());
                }
            }
        }
        tracing::debug!("Notification hub stopped");
    }

    fn broadcast(&mut self, event: NotificationEvent) {
        self.observers.retain(|id, tx| match tx.try_send(event.clone()) {
            Ok(()) => true,
            Err(e) => {
                // dropping the sender ends the observer's stream
                tracing::warn!("Dropping observer {}: {}", id, e);
                false
            }
        });
    }
}

impl HubHandle {
    /// Attach a new observer
    pub async fn register(&self) -> Option<Observer> {
        let (tx, events) = mpsc::channel(self.buffer);
        let (reply, id) = oneshot::channel();
        self.commands.send(HubCommand::Register { tx, reply }).ok()?;
        let id = id.await.ok()?;
        Some(Observer { id, events })
    }

    pub fn unregister(&self, id: ObserverId) {
        let _ = self.commands.send(HubCommand::Unregister(id));
    }

    /// Queue an event for every observer. Never waits.
    pub fn broadcast(&self, event: NotificationEvent) {
        if self.commands.send(HubCommand::Broadcast(event)).is_err() {
            tracing::warn!("Notification hub is gone, event dropped");
        }
    }

    /// Observer count after every previously queued command has been applied
    pub async fn observer_count(&self) -> usize {
        let (reply, count) = oneshot::channel();
        if self.commands.send(HubCommand::Count(reply)).is_err() {
            return 0;
        }
        count.await.unwrap_or(0)
    }
}

impl EventSink for HubHandle {
    fn publish(&self, event: NotificationEvent) {
        self.broadcast(event);
    }
}
