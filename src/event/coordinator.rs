//! In-process publish/subscribe for event-path results.

use std::panic::{AssertUnwindSafe, catch_unwind};
use std::sync::{Arc, OnceLock};

use parking_lot::RwLock;
use tokio::sync::mpsc;

use super::EventEnvelope;

const BUS_THREAD_NAME: &str = "restfan-event-bus";

/// Receives events published on an [`EventCoordinator`].
///
/// Subscribers see every event; filter with [`EventEnvelope::is_for`] or
/// [`EventCoordinator::matches`].
///
/// Closures taking `&EventEnvelope` implement this trait directly.
pub trait EventSubscriber: Send + Sync {
    /// Called once per published event, on the bus dispatch thread.
    fn on_event(&self, event: &EventEnvelope);
}

impl<F> EventSubscriber for F
where
    F: Fn(&EventEnvelope) + Send + Sync,
{
    fn on_event(&self, event: &EventEnvelope) {
        self(event);
    }
}

type Subscribers = Arc<RwLock<Vec<Arc<dyn EventSubscriber>>>>;

/// Owns the event bus and its subscriber list.
///
/// The bus (a dispatch thread fed by an unbounded channel) is created on
/// first use. Events are delivered asynchronously relative to
/// [`publish`](Self::publish), in publish order, to a snapshot of the
/// subscribers registered at delivery time. A panicking subscriber is
/// logged and does not stop delivery to the others.
///
/// Use [`global`](Self::global) for the process-wide instance, or
/// [`new`](Self::new) for an isolated one.
pub struct EventCoordinator {
    subscribers: Subscribers,
    bus: OnceLock<Option<mpsc::UnboundedSender<EventEnvelope>>>,
}

impl EventCoordinator {
    /// Creates an isolated coordinator. The bus starts on first use.
    #[must_use]
    pub fn new() -> Self {
        Self {
            subscribers: Arc::new(RwLock::new(Vec::new())),
            bus: OnceLock::new(),
        }
    }

    /// The process-wide coordinator, created on first access.
    #[must_use]
    pub fn global() -> Arc<Self> {
        static GLOBAL: OnceLock<Arc<EventCoordinator>> = OnceLock::new();
        Arc::clone(GLOBAL.get_or_init(|| Arc::new(Self::new())))
    }

    /// Registers `subscriber`.
    ///
    /// Returns `false` if the same subscriber instance is already registered.
    pub fn subscribe(&self, subscriber: Arc<dyn EventSubscriber>) -> bool {
        self.bus();
        let mut subscribers = self.subscribers.write();
        if subscribers.iter().any(|s| same_subscriber(s, &subscriber)) {
            tracing::debug!("Subscriber already registered");
            return false;
        }
        subscribers.push(subscriber);
        tracing::debug!(count = subscribers.len(), "Subscriber registered");
        true
    }

    /// Registers every subscriber in `subscribers`.
    ///
    /// Returns how many were newly registered.
    pub fn subscribe_all<I>(&self, subscribers: I) -> usize
    where
        I: IntoIterator<Item = Arc<dyn EventSubscriber>>,
    {
        subscribers
            .into_iter()
            .filter(|s| self.subscribe(Arc::clone(s)))
            .count()
    }

    /// Removes `subscriber`, matched by instance.
    ///
    /// Returns `false` if it was not registered.
    pub fn unsubscribe(&self, subscriber: &Arc<dyn EventSubscriber>) -> bool {
        self.bus();
        let mut subscribers = self.subscribers.write();
        let before = subscribers.len();
        subscribers.retain(|s| !same_subscriber(s, subscriber));

        if subscribers.len() == before {
            tracing::warn!("Unsubscribe of an unknown subscriber ignored");
            return false;
        }
        tracing::debug!(count = subscribers.len(), "Subscriber removed");
        true
    }

    /// Removes every subscriber in `subscribers`.
    ///
    /// Returns how many were actually removed.
    pub fn unsubscribe_all<'a, I>(&self, subscribers: I) -> usize
    where
        I: IntoIterator<Item = &'a Arc<dyn EventSubscriber>>,
    {
        subscribers
            .into_iter()
            .filter(|s| self.unsubscribe(s))
            .count()
    }

    /// Hands `event` to the bus and returns without waiting for delivery.
    pub fn publish(&self, event: EventEnvelope) {
        let Some(sender) = self.bus() else {
            tracing::error!(identifier = event.identifier(), "Event bus unavailable, event dropped");
            return;
        };

        tracing::debug!(identifier = event.identifier(), "Publishing event");
        if let Err(e) = sender.send(event) {
            tracing::error!(identifier = e.0.identifier(), "Event bus closed, event dropped");
        }
    }

    /// True iff `event` carries `expected` as identifier, ignoring case.
    #[must_use]
    pub fn matches(event: &EventEnvelope, expected: &str) -> bool {
        event.is_for(expected)
    }

    /// Number of registered subscribers.
    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.subscribers.read().len()
    }

    fn bus(&self) -> Option<&mpsc::UnboundedSender<EventEnvelope>> {
        self.bus
            .get_or_init(|| start_bus(Arc::clone(&self.subscribers)))
            .as_ref()
    }
}

impl Default for EventCoordinator {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for EventCoordinator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventCoordinator")
            .field("subscribers", &self.subscriber_count())
            .field("bus_started", &self.bus.get().is_some())
            .finish()
    }
}

fn start_bus(subscribers: Subscribers) -> Option<mpsc::UnboundedSender<EventEnvelope>> {
    let (sender, mut receiver) = mpsc::unbounded_channel::<EventEnvelope>();

    let spawned = std::thread::Builder::new()
        .name(BUS_THREAD_NAME.to_string())
        .spawn(move || {
            while let Some(event) = receiver.blocking_recv() {
                deliver(&subscribers, &event);
            }
            tracing::debug!("Event bus stopped");
        });

    match spawned {
        Ok(_) => {
            tracing::debug!("Event bus started");
            Some(sender)
        }
        Err(e) => {
            tracing::error!(error = %e, "Failed to start event bus thread");
            None
        }
    }
}

fn deliver(subscribers: &RwLock<Vec<Arc<dyn EventSubscriber>>>, event: &EventEnvelope) {
    let snapshot = subscribers.read().clone();

    for subscriber in snapshot {
        let delivered = catch_unwind(AssertUnwindSafe(|| subscriber.on_event(event)));
        if delivered.is_err() {
            tracing::error!(identifier = event.identifier(), "Event subscriber panicked");
        }
    }
}

fn same_subscriber(a: &Arc<dyn EventSubscriber>, b: &Arc<dyn EventSubscriber>) -> bool {
    std::ptr::addr_eq(Arc::as_ptr(a), Arc::as_ptr(b))
}
