//! Level-set simulation
//!
//! Everything here is deterministic and synchronous:
//! - The engine owns the live grid; nothing else mutates it
//! - Advection reads a frozen snapshot and writes back afterwards
//! - No rendering or platform dependencies

pub mod sdf;
pub mod state;
pub mod tick;

pub use sdf::{axis_derivative, fallback_gradient, level_set_gradient, sd_circle};
pub use state::{AdvectionEngine, CellField, CellGrid, CellState, disk_cells};
pub use tick::{TickReport, tick};
