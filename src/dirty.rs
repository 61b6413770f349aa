//! Dirty-cell aggregation
//!
//! Listens on every tracked cell and remembers which coordinates changed
//! since the last [`DirtyCells::flush`]. Lets a renderer redraw once per
//! frame no matter how many simulation writes happened in between.

use std::cell::RefCell;
use std::collections::{BTreeSet, HashSet};
use std::rc::Rc;

use crate::grid::Grid;
use crate::tracked::{Observable, Tracked};

/// Shared pending set of changed coordinates, keyed `(y, x)` so iteration
/// is row-major.
///
/// Clones share the same set, which is how the per-cell listeners feed it.
#[derive(Debug, Clone)]
pub struct DirtyCells<F> {
    pending: Rc<RefCell<BTreeSet<(i32, i32)>>>,
    triggers: Option<Rc<HashSet<F>>>,
}

impl<F> Default for DirtyCells<F> {
    fn default() -> Self {
        Self {
            pending: Rc::default(),
            triggers: None,
        }
    }
}

impl<F: Copy + Eq + std::hash::Hash + 'static> DirtyCells<F> {
    /// Aggregator reacting to changes of any field
    pub fn new() -> Self {
        Self::default()
    }

    /// Aggregator reacting only to changes of the given fields
    pub fn with_triggers(fields: impl IntoIterator<Item = F>) -> Self {
        Self {
            pending: Rc::default(),
            triggers: Some(Rc::new(fields.into_iter().collect())),
        }
    }

    /// Whether a change of `field` marks the cell dirty
    pub fn triggers_on(&self, field: F) -> bool {
        self.triggers.as_ref().is_none_or(|set| set.contains(&field))
    }

    /// Subscribe to every cell of `grid`.
    pub fn attach<D>(&self, grid: &mut Grid<Tracked<D>>)
    where
        D: Observable<Field = F> + 'static,
    {
        grid.for_each_cell_mut(|x, y, cell| {
            let sink = self.clone();
            cell.subscribe(move |_: &D, field| {
                if sink.triggers_on(field) {
                    sink.mark(x, y);
                }
            });
        });
    }

    /// Record `(x, y)` as changed
    pub fn mark(&self, x: i32, y: i32) {
        self.pending.borrow_mut().insert((y, x));
    }

    /// Take the changed coordinates (row-major) and start a fresh set
    pub fn flush(&self) -> Vec<(i32, i32)> {
        let taken = std::mem::take(&mut *self.pending.borrow_mut());
        taken.into_iter().map(|(y, x)| (x, y)).collect()
    }

    pub fn len(&self) -> usize {
        self.pending.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.borrow().is_empty()
    }
}
