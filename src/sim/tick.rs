//! Per-frame level-set advection
//!
//! One tick reads the whole field into a scratch snapshot, computes every new
//! value from that snapshot, then writes the results back through the tracked
//! cells. Neighbour reads never see values advected earlier in the same tick.

use glam::Vec2;

use super::sdf::{fallback_gradient, level_set_gradient};
use super::state::{AdvectionEngine, CellState};

/// What a call to [`tick`] did
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TickReport {
    /// No pointer cell has been reported yet
    NoPointer,
    /// First pointer cell observed; recorded as the velocity reference
    Primed { cell: (i32, i32) },
    /// Pointer stayed in the same cell since the previous tick
    Stationary,
    /// `dt` was not a positive finite number; nothing changed
    InvalidStep { dt: f32 },
    /// Field advected
    Advected {
        displacement: Vec2,
        velocity: Vec2,
        /// Cells whose level set actually changed
        cells_written: usize,
    },
}

/// Advance the level set by one tick of length `dt`.
///
/// `dt` uses whatever unit the caller drives the simulation with; velocity
/// is reported in cells per that unit.
pub fn tick(engine: &mut AdvectionEngine, dt: f32) -> TickReport {
    let Some(current) = engine.last_enter else {
        return TickReport::NoPointer;
    };
    let Some(sample) = engine.tick_sample else {
        engine.tick_sample = Some(current);
        return TickReport::Primed { cell: current };
    };
    if sample == current {
        return TickReport::Stationary;
    }
    if !dt.is_finite() || dt <= 0.0 {
        log::warn!("Skipping advection tick with invalid dt {}", dt);
        return TickReport::InvalidStep { dt };
    }

    let displacement = Vec2::new((current.0 - sample.0) as f32, (current.1 - sample.1) as f32);
    let velocity = displacement / dt;

    let snapshot = engine.grid.map(|_, _, cell| *cell.value());
    let mut updates = Vec::with_capacity(snapshot.width() * snapshot.height());
    snapshot.for_each_cell(|x, y, cell| {
        let Some(mut gradient) = level_set_gradient(&snapshot, x, y) else {
            return;
        };
        if gradient == Vec2::ZERO {
            gradient = fallback_gradient(displacement);
        }
        updates.push((x, y, cell.level_set - gradient.dot(displacement)));
    });

    let mut cells_written = 0;
    for (x, y, level_set) in updates {
        if let Some(cell) = engine.grid.cell_mut(x, y) {
            if cell.set(CellState::LEVEL_SET, level_set) {
                cells_written += 1;
            }
        }
    }

    engine.tick_sample = Some(current);
    engine.advected_ticks += 1;
    log::debug!(
        "Tick {}: displacement {:?}, velocity {:?}, {} cell(s) written",
        engine.advected_ticks,
        displacement,
        velocity,
        cells_written
    );

    TickReport::Advected {
        displacement,
        velocity,
        cells_written,
    }
}
