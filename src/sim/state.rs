//! Cell state and the advection engine that owns the live grid
//!
//! All mutable simulation state lives on [`AdvectionEngine`]; nothing is
//! global, so independent engines never interfere.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::sdf::sd_circle;
use crate::error::GridError;
use crate::grid::Grid;
use crate::settings::SimSettings;
use crate::tracked::{Lens, Observable, Tracked};

/// Per-cell simulation data
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct CellState {
    /// Signed-distance-like field, negative inside by convention
    pub level_set: f32,
    /// Liquid mask, independent of the level-set sign
    pub is_liquid: bool,
}

/// Fields of [`CellState`] that can change
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum CellField {
    LevelSet,
    IsLiquid,
}

impl CellField {
    pub fn as_str(&self) -> &'static str {
        match self {
            CellField::LevelSet => "level_set",
            CellField::IsLiquid => "is_liquid",
        }
    }
}

impl Observable for CellState {
    type Field = CellField;
}

fn level_set_mut(cell: &mut CellState) -> &mut f32 {
    &mut cell.level_set
}

fn is_liquid_mut(cell: &mut CellState) -> &mut bool {
    &mut cell.is_liquid
}

impl CellState {
    pub const LEVEL_SET: Lens<CellState, f32> = Lens::new(CellField::LevelSet, level_set_mut);
    pub const IS_LIQUID: Lens<CellState, bool> = Lens::new(CellField::IsLiquid, is_liquid_mut);

    /// Initial state: signed distance to the seed circle, no liquid
    pub fn seeded(x: i32, y: i32, origin: Vec2, radius: f32) -> Self {
        Self {
            level_set: sd_circle(Vec2::new(x as f32, y as f32), origin, radius),
            is_liquid: false,
        }
    }
}

/// The live grid type the engine owns
pub type CellGrid = Grid<Tracked<CellState>>;

/// Cells of the disk `dx² + dy² < r²` around `center` (strict: boundary
/// excluded), clipped to a `width x height` grid.
///
/// Only the bounding box intersected with the grid is scanned, so the cost
/// never exceeds the grid size however large the radius.
pub fn disk_cells(
    center: (i32, i32),
    radius: i32,
    bounds: (usize, usize),
) -> impl Iterator<Item = (i32, i32)> {
    let (cx, cy) = (i64::from(center.0), i64::from(center.1));
    let r = i64::from(radius.max(0));
    let r2 = r * r;
    let max_x = i64::try_from(bounds.0).unwrap_or(i64::MAX) - 1;
    let max_y = i64::try_from(bounds.1).unwrap_or(i64::MAX) - 1;
    let (x0, x1) = ((cx - r).max(0), (cx + r).min(max_x));
    let (y0, y1) = ((cy - r).max(0), (cy + r).min(max_y));

    (y0..=y1).flat_map(move |y| {
        (x0..=x1).filter_map(move |x| {
            let (dx, dy) = (x - cx, y - cy);
            // Clipped coordinates lie inside the grid, which fits in i32.
            (dx * dx + dy * dy < r2).then(|| (x as i32, y as i32))
        })
    })
}

/// Owns the live grid plus the pointer trackers used for mask movement and velocity
#[derive(Debug)]
pub struct AdvectionEngine {
    pub(crate) grid: CellGrid,
    brush_radius: i32,
    seed_origin: Vec2,
    seed_radius: f32,
    /// Cell of the most recent enter event (mask centre)
    pub(crate) last_enter: Option<(i32, i32)>,
    /// Pointer cell observed at the previous tick (velocity reference)
    pub(crate) tick_sample: Option<(i32, i32)>,
    /// Ticks that advected the field
    pub(crate) advected_ticks: u64,
}

impl AdvectionEngine {
    /// Build the grid seeded with the signed distance to the configured circle
    pub fn new(settings: &SimSettings) -> Result<Self, GridError> {
        let (origin, radius) = (settings.seed_origin, settings.seed_radius);
        let grid = Grid::new(settings.width, settings.height, |x, y| {
            Tracked::new(CellState::seeded(x, y, origin, radius))
        })?;

        log::info!(
            "Advection engine ready: {}x{} grid, brush radius {}",
            settings.width,
            settings.height,
            settings.brush_radius
        );

        Ok(Self {
            grid,
            brush_radius: settings.brush_radius,
            seed_origin: origin,
            seed_radius: radius,
            last_enter: None,
            tick_sample: None,
            advected_ticks: 0,
        })
    }

    pub fn grid(&self) -> &CellGrid {
        &self.grid
    }

    /// Mutable grid access, for attaching listeners
    pub fn grid_mut(&mut self) -> &mut CellGrid {
        &mut self.grid
    }

    pub fn dimensions(&self) -> (usize, usize) {
        (self.grid.width(), self.grid.height())
    }

    pub fn brush_radius(&self) -> i32 {
        self.brush_radius
    }

    /// Current state of `(x, y)`, `None` when out of range
    pub fn cell(&self, x: i32, y: i32) -> Option<&CellState> {
        self.grid.cell(x, y).map(Tracked::value)
    }

    pub fn last_enter(&self) -> Option<(i32, i32)> {
        self.last_enter
    }

    pub fn tick_sample(&self) -> Option<(i32, i32)> {
        self.tick_sample
    }

    pub fn advected_ticks(&self) -> u64 {
        self.advected_ticks
    }

    fn paint_disk(&mut self, center: (i32, i32), liquid: bool) {
        for (x, y) in disk_cells(center, self.brush_radius, self.dimensions()) {
            if let Some(cell) = self.grid.cell_mut(x, y) {
                cell.set(CellState::IS_LIQUID, liquid);
            }
        }
    }

    /// Move the liquid disk to `(x, y)`.
    ///
    /// The old disk is cleared before the new one is painted, so cells in the
    /// overlap end up liquid. Enters outside the grid are ignored.
    pub fn on_cell_enter(&mut self, x: i32, y: i32) {
        if !self.grid.contains(x, y) {
            log::debug!("Ignoring enter outside grid at ({}, {})", x, y);
            return;
        }
        if let Some(previous) = self.last_enter {
            self.paint_disk(previous, false);
        }
        self.paint_disk((x, y), true);
        self.last_enter = Some((x, y));
    }

    /// Reseed the field, clear the mask and forget pointer history.
    ///
    /// Writes go through the tracked cells, so listeners see the reset.
    pub fn reset(&mut self) {
        let (origin, radius) = (self.seed_origin, self.seed_radius);
        self.grid.for_each_cell_mut(|x, y, cell| {
            let seeded = CellState::seeded(x, y, origin, radius);
            cell.set(CellState::LEVEL_SET, seeded.level_set);
            cell.set(CellState::IS_LIQUID, seeded.is_liquid);
        });
        self.last_enter = None;
        self.tick_sample = None;
        self.advected_ticks = 0;
        log::info!("Advection engine reset");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn engine(width: usize, height: usize, brush_radius: i32) -> AdvectionEngine {
        let settings = SimSettings {
            width,
            height,
            brush_radius,
            ..SimSettings::default()
        };
        AdvectionEngine::new(&settings).unwrap()
    }

    fn in_disk(center: (i32, i32), r: i32, x: i32, y: i32) -> bool {
        let (dx, dy) = (x - center.0, y - center.1);
        dx * dx + dy * dy < r * r
    }

    fn liquid_cells(engine: &AdvectionEngine) -> Vec<(i32, i32)> {
        engine
            .grid()
            .iter()
            .filter(|(_, cell)| cell.value().is_liquid)
            .map(|(pos, _)| pos)
            .collect()
    }

    #[test]
    fn test_seeded_level_set_is_circle_distance() {
        let engine = engine(21, 21, 5);
        assert_eq!(engine.cell(10, 10).unwrap().level_set, -5.0);
        assert_eq!(engine.cell(15, 10).unwrap().level_set, 0.0);
        assert_eq!(engine.cell(0, 10).unwrap().level_set, 5.0);
        assert!(liquid_cells(&engine).is_empty());
    }

    #[test]
    fn test_field_names() {
        assert_eq!(CellField::LevelSet.as_str(), "level_set");
        assert_eq!(CellField::IsLiquid.as_str(), "is_liquid");
    }

    #[test]
    fn test_disk_boundary_is_exclusive() {
        let cells: Vec<_> = disk_cells((5, 5), 2, (11, 11)).collect();
        assert!(cells.contains(&(6, 6)));
        assert!(!cells.contains(&(7, 5)));
        assert!(!cells.contains(&(5, 3)));
        assert_eq!(cells.len(), 9);
        assert_eq!(disk_cells((3, 3), 0, (11, 11)).count(), 0);
    }

    #[test]
    fn test_disk_cells_clipped_to_bounds() {
        let cells: Vec<_> = disk_cells((0, 0), 2, (11, 11)).collect();
        assert_eq!(cells, vec![(0, 0), (1, 0), (0, 1), (1, 1)]);
        assert_eq!(disk_cells((3, 3), i32::MAX, (4, 2)).count(), 8);
    }

    #[test]
    fn test_huge_brush_radius_floods_grid() {
        let mut wide = engine(21, 21, 40_000);
        assert_eq!(wide.brush_radius(), 40_000);
        wide.on_cell_enter(10, 10);
        assert_eq!(liquid_cells(&wide).len(), 21 * 21);

        let mut widest = engine(21, 21, i32::MAX);
        widest.on_cell_enter(0, 0);
        widest.on_cell_enter(20, 20);
        assert_eq!(liquid_cells(&widest).len(), 21 * 21);
    }

    #[test]
    fn test_first_enter_marks_exactly_the_disk() {
        let mut engine = engine(21, 21, 5);
        engine.on_cell_enter(10, 10);

        for ((x, y), cell) in engine.grid().iter() {
            assert_eq!(cell.value().is_liquid, in_disk((10, 10), 5, x, y), "cell ({x}, {y})");
        }
        assert_eq!(engine.last_enter(), Some((10, 10)));
    }

    #[test]
    fn test_disk_clipped_at_grid_edge() {
        let mut engine = engine(8, 8, 3);
        engine.on_cell_enter(0, 0);
        let expected: Vec<_> = engine
            .grid()
            .coords()
            .filter(|&(x, y)| in_disk((0, 0), 3, x, y))
            .collect();
        assert_eq!(liquid_cells(&engine), expected);
    }

    #[test]
    fn test_disjoint_move_clears_old_disk() {
        let mut engine = engine(30, 30, 3);
        engine.on_cell_enter(5, 5);
        engine.on_cell_enter(20, 20);

        for ((x, y), cell) in engine.grid().iter() {
            assert_eq!(cell.value().is_liquid, in_disk((20, 20), 3, x, y));
        }
    }

    #[test]
    fn test_overlapping_move_keeps_intersection_liquid() {
        let mut engine = engine(21, 21, 4);
        engine.on_cell_enter(8, 10);
        engine.on_cell_enter(10, 10);

        for ((x, y), cell) in engine.grid().iter() {
            let (old, new) = (in_disk((8, 10), 4, x, y), in_disk((10, 10), 4, x, y));
            if new {
                assert!(cell.value().is_liquid, "({x}, {y}) should be liquid");
            } else if old {
                assert!(!cell.value().is_liquid, "({x}, {y}) should be cleared");
            }
        }
        assert!(engine.cell(9, 10).unwrap().is_liquid);
    }

    #[test]
    fn test_enter_outside_grid_is_ignored() {
        let mut engine = engine(5, 5, 2);
        engine.on_cell_enter(7, -1);
        assert!(liquid_cells(&engine).is_empty());
        assert_eq!(engine.last_enter(), None);
    }

    #[test]
    fn test_reset_restores_seed_and_forgets_pointer() {
        let mut engine = engine(21, 21, 5);
        engine.on_cell_enter(3, 3);
        engine.grid_mut().cell_mut(10, 10).unwrap().set(CellState::LEVEL_SET, 42.0);
        engine.tick_sample = Some((3, 3));

        engine.reset();

        assert!(liquid_cells(&engine).is_empty());
        assert_eq!(engine.cell(10, 10).unwrap().level_set, -5.0);
        assert_eq!(engine.last_enter(), None);
        assert_eq!(engine.tick_sample(), None);
    }
}
