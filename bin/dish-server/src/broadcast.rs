//! Fan-out registry for push subscribers.
//!
//! [`Broadcaster`] is the set of currently connected viewers. Transports
//! (`/ws`, `/events`) register a subscriber per connection and forward what
//! they receive; the mutation path calls [`Broadcaster::publish`].
//!
//! Delivery is at-most-once with no replay: a subscriber only sees events
//! published while it is registered. Every subscriber has its own unbounded
//! queue, so publishing never blocks and never drops for slow readers, and
//! each subscriber observes events in publish order.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use dish_types::DishEvent;
use futures::Stream;
use tokio::sync::mpsc;
use tracing::{debug, trace};

pub type SubscriberId = u64;

#[derive(Default)]
struct Registry {
    next_id: AtomicU64,
    subscribers: Mutex<HashMap<SubscriberId, mpsc::UnboundedSender<DishEvent>>>,
}

/// Cheaply cloneable handle to a shared subscriber registry.
#[derive(Clone, Default)]
pub struct Broadcaster {
    registry: Arc<Registry>,
}

impl std::fmt::Debug for Broadcaster {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Broadcaster({} subscribers)", self.subscriber_count())
    }
}

impl Broadcaster {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a new subscriber. It is removed again when the returned
    /// [`Subscription`] is dropped.
    pub fn subscribe(&self) -> Subscription {
        let id = self.registry.next_id.fetch_add(1, Ordering::Relaxed);
        let (tx, rx) = mpsc::unbounded_channel();
        self.registry.subscribers().insert(id, tx);
        debug!(subscriber = id, "subscriber added");
        Subscription {
            id,
            rx,
            registry: Arc::clone(&self.registry),
        }
    }

    /// Remove a subscriber. Returns `true` if it was still registered.
    pub fn unsubscribe(&self, id: SubscriberId) -> bool {
        self.registry.remove(id)
    }

    /// Enqueue `event` for every registered subscriber.
    ///
    /// Returns how many subscribers the event reached. Subscribers whose
    /// receiving half is gone are pruned on the way.
    pub fn publish(&self, event: DishEvent) -> usize {
        let mut delivered = 0;
        self.registry.subscribers().retain(|id, tx| match tx.send(event.clone()) {
            Ok(()) => {
                delivered += 1;
                true
            }
            Err(_) => {
                trace!(subscriber = *id, "pruning closed subscriber");
                false
            }
        });
        debug!(event = event.name(), delivered, "event published");
        delivered
    }

    pub fn subscriber_count(&self) -> usize {
        self.registry.subscribers().len()
    }
}

impl Registry {
    /// Every mutation is a single map call, so a poisoned map is still
    /// consistent and is used as is.
    fn subscribers(&self) -> MutexGuard<'_, HashMap<SubscriberId, mpsc::UnboundedSender<DishEvent>>> {
        self.subscribers.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn remove(&self, id: SubscriberId) -> bool {
        let removed = self.subscribers().remove(&id).is_some();
        if removed {
            debug!(subscriber = id, "subscriber removed");
        }
        removed
    }
}

/// One registered subscriber. Dropping it unregisters the subscriber.
pub struct Subscription {
    id: SubscriberId,
    rx: mpsc::UnboundedReceiver<DishEvent>,
    registry: Arc<Registry>,
}

impl Subscription {
    pub fn id(&self) -> SubscriberId {
        self.id
    }

    /// Wait for the next event. Returns `None` once the subscriber has been
    /// removed from the registry and its queue is drained.
    pub async fn recv(&mut self) -> Option<DishEvent> {
        self.rx.recv().await
    }

    /// Non-blocking receive, for callers that poll.
    pub fn try_recv(&mut self) -> Option<DishEvent> {
        self.rx.try_recv().ok()
    }

    /// Convert into a [`Stream`] that keeps the subscription registered for
    /// as long as the stream is alive.
    pub fn into_stream(self) -> impl Stream<Item = DishEvent> + Send + 'static {
        futures::stream::unfold(self, |mut sub| async move {
            sub.recv().await.map(|event| (event, sub))
        })
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.registry.remove(self.id);
    }
}
