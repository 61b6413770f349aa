//! Pointer-derived cell events
//!
//! Raw pointer moves are turned into discrete [`CellEvent`]s by the
//! [`PointerMapper`] and fanned out to subscribers by the
//! [`EventDistributor`].

pub mod distributor;
pub mod pointer;

use serde::{Deserialize, Serialize};

pub use distributor::{Delivery, EventDistributor, Handler, SubscriptionId};
pub use pointer::{CellTransition, PointerAxes, PointerMapper, cell_at};

/// Event kinds handlers subscribe to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EventKind {
    CellEnter,
    CellLeave,
}

/// The pointer entered or left a grid cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CellEvent {
    Enter { x: i32, y: i32 },
    Leave { x: i32, y: i32 },
}

impl CellEvent {
    pub fn kind(&self) -> EventKind {
        match self {
            CellEvent::Enter { .. } => EventKind::CellEnter,
            CellEvent::Leave { .. } => EventKind::CellLeave,
        }
    }

    /// Cell coordinates carried by the event
    pub fn cell(&self) -> (i32, i32) {
        match *self {
            CellEvent::Enter { x, y } | CellEvent::Leave { x, y } => (x, y),
        }
    }
}
