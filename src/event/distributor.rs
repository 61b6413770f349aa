//! Ordered synchronous fan-out of cell events
//!
//! Handlers are keyed by [`EventKind`] and run in registration order. Each
//! handler gets mutable access to a caller-supplied context `C` (the advection
//! engine, in the assembled simulation) instead of reaching for shared state.

use std::collections::HashMap;

use super::{CellEvent, EventKind};
use crate::error::HandlerError;

/// Event callback with access to the dispatch context
pub type Handler<C> = Box<dyn FnMut(&mut C, &CellEvent) -> Result<(), HandlerError>>;

/// Handle returned by [`EventDistributor::subscribe`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

/// Outcome of one [`EventDistributor::publish`]
#[derive(Debug, Default)]
pub struct Delivery {
    /// Handlers that returned `Ok`
    pub delivered: usize,
    /// Errors from handlers that failed, in invocation order
    pub failures: Vec<HandlerError>,
}

impl Delivery {
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Publish/subscribe registry keyed by event kind
pub struct EventDistributor<C> {
    handlers: HashMap<EventKind, Vec<(SubscriptionId, Handler<C>)>>,
    next_id: u64,
}

impl<C> Default for EventDistributor<C> {
    fn default() -> Self {
        Self {
            handlers: HashMap::new(),
            next_id: 0,
        }
    }
}

impl<C> EventDistributor<C> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `handler` for `kind`. Handlers for the same kind run in the
    /// order they were subscribed.
    pub fn subscribe<F>(&mut self, kind: EventKind, handler: F) -> SubscriptionId
    where
        F: FnMut(&mut C, &CellEvent) -> Result<(), HandlerError> + 'static,
    {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.handlers
            .entry(kind)
            .or_default()
            .push((id, Box::new(handler)));
        id
    }

    /// Remove one subscription. Returns `false` if the id is unknown.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        for handlers in self.handlers.values_mut() {
            if let Some(pos) = handlers.iter().position(|(existing, _)| *existing == id) {
                handlers.remove(pos);
                return true;
            }
        }
        false
    }

    pub fn handler_count(&self, kind: EventKind) -> usize {
        self.handlers.get(&kind).map_or(0, Vec::len)
    }

    /// Deliver `event` to every handler registered for its kind.
    ///
    /// A failing handler is logged and recorded; the rest still run.
    pub fn publish(&mut self, ctx: &mut C, event: &CellEvent) -> Delivery {
        let mut delivery = Delivery::default();
        let Some(handlers) = self.handlers.get_mut(&event.kind()) else {
            return delivery;
        };

        log::trace!("Publishing {:?} to {} handler(s)", event, handlers.len());
        for (id, handler) in handlers.iter_mut() {
            match handler(ctx, event) {
                Ok(()) => delivery.delivered += 1,
                Err(e) => {
                    log::warn!("Handler {:?} failed on {:?}: {}", id, event, e);
                    delivery.failures.push(e);
                }
            }
        }
        delivery
    }
}
