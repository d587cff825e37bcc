//! Observer registry with re-entrant, ordered delivery
//!
//! Observers are called in registration order. While an event is being
//! delivered the observer list is lent out of the bus, so a handler may
//! subscribe, unsubscribe, or issue world commands that emit further events.
//! Those events are queued and delivered after the current one, before the
//! outermost emit returns.

use std::collections::VecDeque;

use super::GameEvent;
use crate::world::World;

/// Handle returned by [`EventBus::subscribe`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SubscriptionId(u64);

/// What an observer wants after handling an event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Keep,
    Unsubscribe,
}

/// Receives every event emitted by the world
pub trait Observer {
    fn on_event(&mut self, world: &mut World, event: &GameEvent) -> Flow;
}

impl<F> Observer for F
where
    F: FnMut(&mut World, &GameEvent) -> Flow,
{
    fn on_event(&mut self, world: &mut World, event: &GameEvent) -> Flow {
        self(world, event)
    }
}

type Slot = (SubscriptionId, Box<dyn Observer>);

/// Subscriber list and pending event queue owned by the world
#[derive(Default)]
pub struct EventBus {
    next_id: u64,
    observers: Vec<Slot>,
    queue: VecDeque<GameEvent>,
    dispatching: bool,
    /// Ids of the observers currently lent out for delivery
    lent: Vec<SubscriptionId>,
    /// Unsubscribed while lent out
    cancelled: Vec<SubscriptionId>,
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an observer. Every call creates a distinct subscription.
    pub fn subscribe(&mut self, observer: Box<dyn Observer>) -> SubscriptionId {
        self.next_id += 1;
        let id = SubscriptionId(self.next_id);
        self.observers.push((id, observer));
        id
    }

    /// Remove an observer. Returns whether it was registered.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        if let Some(pos) = self.observers.iter().position(|(sid, _)| *sid == id) {
            self.observers.remove(pos);
            return true;
        }
        if self.lent.contains(&id) && !self.cancelled.contains(&id) {
            self.cancelled.push(id);
            return true;
        }
        false
    }

    /// Number of registered observers, including any lent out for delivery
    pub fn len(&self) -> usize {
        self.observers.len() + self.lent.len() - self.cancelled.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Queue an event. Returns true when the caller must start delivery,
    /// false when an outer delivery loop will pick it up.
    pub(crate) fn enqueue(&mut self, event: GameEvent) -> bool {
        self.queue.push_back(event);
        if self.dispatching {
            return false;
        }
        self.dispatching = true;
        true
    }

    pub(crate) fn next_event(&mut self) -> Option<GameEvent> {
        let event = self.queue.pop_front();
        if event.is_none() {
            self.dispatching = false;
        }
        event
    }

    /// Lend out the observer list for one delivery
    pub(crate) fn lend(&mut self) -> Vec<Slot> {
        let lent = std::mem::take(&mut self.observers);
        self.lent = lent.iter().map(|(id, _)| *id).collect();
        lent
    }

    pub(crate) fn is_cancelled(&self, id: SubscriptionId) -> bool {
        self.cancelled.contains(&id)
    }

    /// Take back a lent list. Observers subscribed during delivery go after
    /// the existing ones; cancelled ones are dropped.
    pub(crate) fn restore(&mut self, mut lent: Vec<Slot>, finished: &[SubscriptionId]) {
        lent.retain(|(id, _)| !finished.contains(id) && !self.cancelled.contains(id));
        let added = std::mem::take(&mut self.observers);
        lent.extend(added);
        self.observers = lent;
        self.lent.clear();
        self.cancelled.clear();
    }
}

impl std::fmt::Debug for EventBus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventBus")
            .field("observers", &self.observers.len())
            .field("queued", &self.queue.len())
            .field("dispatching", &self.dispatching)
            .finish()
    }
}
