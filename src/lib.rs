//! Liquid Grid - pointer-driven liquid mask over an advected level set
//!
//! Core modules:
//! - `grid`: Fixed-size bounds-checked 2-D storage
//! - `tracked`: Observable cell values with per-field change listeners
//! - `event`: Pointer-to-cell mapping and event distribution
//! - `sim`: Liquid mask and level-set advection
//! - `dirty`: Changed-cell aggregation for renderers
//! - `render`: Renderer-facing contract
//! - `platform`: Input backends (scripted native input, web bindings)

pub mod dirty;
pub mod error;
pub mod event;
pub mod grid;
pub mod platform;
pub mod render;
pub mod settings;
pub mod sim;
pub mod simulation;
pub mod tracked;

pub use dirty::DirtyCells;
pub use error::{GridError, HandlerError, SettingsError};
pub use event::{CellEvent, EventDistributor, EventKind, PointerAxes, PointerMapper};
pub use grid::Grid;
pub use render::{CellRenderer, TextRenderer};
pub use settings::SimSettings;
pub use sim::{AdvectionEngine, CellField, CellState, TickReport};
pub use simulation::Simulation;
pub use tracked::{Lens, ListenerId, Observable, Tracked};

use glam::Vec2;

/// Simulation configuration constants
pub mod consts {
    use glam::Vec2;

    /// Fixed simulation timestep in seconds (60 Hz)
    pub const SIM_DT: f32 = 1.0 / 60.0;

    /// Default grid is square
    pub const DEFAULT_GRID_SIZE: usize = 21;
    /// Liquid disk radius in cells
    pub const DEFAULT_BRUSH_RADIUS: i32 = 5;
    /// Seed circle for the initial level set, centred on the default grid
    pub const DEFAULT_SEED_ORIGIN: Vec2 = Vec2::new(10.0, 10.0);
    pub const DEFAULT_SEED_RADIUS: f32 = 5.0;
}

/// Centre of cell `(x, y)` in canvas pixels for a given cell size
#[inline]
pub fn cell_centre(x: i32, y: i32, cell_size: Vec2) -> Vec2 {
    Vec2::new((x as f32 + 0.5) * cell_size.x, (y as f32 + 0.5) * cell_size.y)
}
