//! Assembled simulation
//!
//! Wires the pointer mapper, the event distributor, the advection engine and
//! the dirty-cell aggregator together. The host drives it through two entry
//! points, [`Simulation::pointer_moved`] and [`Simulation::tick`], and a
//! renderer pulls changes with [`Simulation::render_dirty`] or
//! [`Simulation::flush_dirty`].

use glam::Vec2;

use crate::dirty::DirtyCells;
use crate::error::{GridError, HandlerError};
use crate::event::{CellEvent, EventDistributor, EventKind, PointerMapper, SubscriptionId};
use crate::render::CellRenderer;
use crate::settings::SimSettings;
use crate::sim::{AdvectionEngine, CellField, CellState, TickReport, tick};

/// Engine, input mapping, event fan-out and dirty tracking for one run
pub struct Simulation {
    settings: SimSettings,
    engine: AdvectionEngine,
    events: EventDistributor<AdvectionEngine>,
    pointer: PointerMapper,
    dirty: DirtyCells<CellField>,
}

impl Simulation {
    pub fn new(settings: SimSettings) -> Result<Self, GridError> {
        let mut engine = AdvectionEngine::new(&settings)?;
        let dirty = DirtyCells::new();
        dirty.attach(engine.grid_mut());

        let mut events = EventDistributor::new();
        events.subscribe(EventKind::CellEnter, |engine: &mut AdvectionEngine, event| {
            let (x, y) = event.cell();
            engine.on_cell_enter(x, y);
            Ok(())
        });

        Ok(Self {
            pointer: PointerMapper::new(settings.pointer_axes),
            settings,
            engine,
            events,
            dirty,
        })
    }

    pub fn settings(&self) -> &SimSettings {
        &self.settings
    }

    /// Read-only engine access
    pub fn engine(&self) -> &AdvectionEngine {
        &self.engine
    }

    pub fn dimensions(&self) -> (usize, usize) {
        self.engine.dimensions()
    }

    /// Current state of `(x, y)`, `None` when out of range
    pub fn cell(&self, x: i32, y: i32) -> Option<CellState> {
        self.engine.cell(x, y).copied()
    }

    /// Register an extra event handler; it runs after the engine's own.
    pub fn subscribe<F>(&mut self, kind: EventKind, handler: F) -> SubscriptionId
    where
        F: FnMut(&mut AdvectionEngine, &CellEvent) -> Result<(), HandlerError> + 'static,
    {
        self.events.subscribe(kind, handler)
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.events.unsubscribe(id)
    }

    /// Feed one raw pointer move in canvas pixels. `canvas` is the canvas
    /// size at the time of the move. Returns the number of events published.
    pub fn pointer_moved(&mut self, offset: Vec2, canvas: Vec2) -> usize {
        let transition = self.pointer.handle_move(offset, canvas, self.engine.dimensions());
        let mut published = 0;
        for event in transition.events() {
            let delivery = self.events.publish(&mut self.engine, &event);
            if !delivery.is_clean() {
                log::warn!("{} handler(s) failed on {:?}", delivery.failures.len(), event);
            }
            published += 1;
        }
        published
    }

    /// Stop reacting to pointer input
    pub fn detach_pointer(&mut self) {
        self.pointer.detach();
    }

    pub fn pointer_attached(&self) -> bool {
        self.pointer.is_attached()
    }

    /// Advance the simulation by `dt` (caller's time unit)
    pub fn tick(&mut self, dt: f32) -> TickReport {
        tick(&mut self.engine, dt)
    }

    /// Coordinates changed since the last flush, row-major
    pub fn flush_dirty(&mut self) -> Vec<(i32, i32)> {
        self.dirty.flush()
    }

    /// Draw every cell (first frame). Pending dirty cells are discarded.
    pub fn render_all<R: CellRenderer>(&mut self, renderer: &mut R) {
        self.dirty.flush();
        for ((x, y), cell) in self.engine.grid().iter() {
            renderer.render_cell(x, y, cell.value());
        }
    }

    /// Draw only the cells changed since the last flush. Returns how many.
    pub fn render_dirty<R: CellRenderer>(&mut self, renderer: &mut R) -> usize {
        let dirty = self.dirty.flush();
        for &(x, y) in &dirty {
            if let Some(cell) = self.engine.cell(x, y) {
                renderer.render_cell(x, y, cell);
            }
        }
        dirty.len()
    }

    /// Reseed the field and forget all pointer history. Changed cells are
    /// reported as dirty; subscriptions and pointer attachment are kept.
    pub fn reset(&mut self) {
        self.engine.reset();
        self.pointer.reset();
    }
}
