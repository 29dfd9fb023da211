//! Breakpoint change notifications.
//!
//! The tracker publishes through a [`NotificationChannel`]. [`EventBus`] is
//! the in-process channel: a topic-keyed publish/subscribe registry scoped to
//! whatever owns it (one per document or window).

use std::{cell::RefCell, fmt, rc::Rc};

use rustc_hash::FxHashMap;
use slotmap::SlotMap;
use smallvec::SmallVec;

use crate::breakpoint::BreakpointDefinition;

/// Payload of the breakpoint changed notification.
#[derive(Clone, Debug, PartialEq)]
pub struct BreakpointChanged {
    /// The breakpoint that just became current.
    pub breakpoint: Rc<BreakpointDefinition>,
    /// The breakpoint it replaced, `None` on the first transition.
    pub previous: Option<Rc<BreakpointDefinition>>,
}

impl BreakpointChanged {
    pub fn id(&self) -> &str {
        &self.breakpoint.id
    }
}

/// Where the tracker sends change notifications. The tracker only publishes.
pub trait NotificationChannel {
    fn trigger(&self, event_name: &str, event: &BreakpointChanged);
}

impl<F> NotificationChannel for F
where
    F: Fn(&str, &BreakpointChanged),
{
    fn trigger(&self, event_name: &str, event: &BreakpointChanged) {
        self(event_name, event)
    }
}

slotmap::new_key_type! {
    /// Handle returned by [`EventBus::subscribe`].
    pub struct SubscriptionId;
}

type Handler<E> = Rc<dyn Fn(&E)>;

struct Subscription<E> {
    topic: String,
    handler: Handler<E>,
}

struct BusState<E> {
    subscriptions: SlotMap<SubscriptionId, Subscription<E>>,
    topics: FxHashMap<String, SmallVec<[SubscriptionId; 4]>>,
}

/// Topic-keyed publish/subscribe registry. Clones share subscribers.
pub struct EventBus<E> {
    state: Rc<RefCell<BusState<E>>>,
}

impl<E> Clone for EventBus<E> {
    fn clone(&self) -> Self {
        Self {
            state: self.state.clone(),
        }
    }
}

impl<E> Default for EventBus<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E> fmt::Debug for EventBus<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.state.borrow();
        f.debug_struct("EventBus")
            .field("topics", &state.topics.keys().collect::<Vec<_>>())
            .field("subscriptions", &state.subscriptions.len())
            .finish()
    }
}

impl<E> EventBus<E> {
    pub fn new() -> Self {
        Self {
            state: Rc::new(RefCell::new(BusState {
                subscriptions: SlotMap::with_key(),
                topics: FxHashMap::default(),
            })),
        }
    }

    pub fn subscribe(&self, topic: &str, handler: impl Fn(&E) + 'static) -> SubscriptionId {
        let mut state = self.state.borrow_mut();
        let id = state.subscriptions.insert(Subscription {
            topic: topic.to_string(),
            handler: Rc::new(handler),
        });
        state.topics.entry(topic.to_string()).or_default().push(id);
        id
    }

    /// Returns `false` when `id` was not subscribed.
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        let mut state = self.state.borrow_mut();
        let Some(subscription) = state.subscriptions.remove(id) else {
            return false;
        };
        if let Some(ids) = state.topics.get_mut(&subscription.topic) {
            ids.retain(|other| *other != id);
            if ids.is_empty() {
                state.topics.remove(&subscription.topic);
            }
        }
        true
    }

    /// Delivers `event` to every handler subscribed to `topic`, in subscription
    /// order, and returns how many were called.
    ///
    /// Handlers may subscribe or unsubscribe while the event is delivered; the
    /// change takes effect from the next publish.
    pub fn publish(&self, topic: &str, event: &E) -> usize {
        let handlers: SmallVec<[Handler<E>; 4]> = {
            let state = self.state.borrow();
            let Some(ids) = state.topics.get(topic) else {
                return 0;
            };
            ids.iter()
                .filter_map(|id| state.subscriptions.get(*id))
                .map(|subscription| subscription.handler.clone())
                .collect()
        };

        for handler in &handlers {
            handler(event);
        }
        handlers.len()
    }

    pub fn subscriber_count(&self, topic: &str) -> usize {
        self.state
            .borrow()
            .topics
            .get(topic)
            .map_or(0, |ids| ids.len())
    }
}

impl NotificationChannel for EventBus<BreakpointChanged> {
    fn trigger(&self, event_name: &str, event: &BreakpointChanged) {
        let delivered = self.publish(event_name, event);
        tracing::trace!(event_name, breakpoint = %event.id(), delivered, "published");
    }
}
