//! Pointer position to grid cell mapping
//!
//! Converts canvas-space pointer coordinates into cell coordinates and emits
//! enter/leave transitions only when the discrete cell changes, so sub-cell
//! jitter produces no events at all.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::CellEvent;

/// How canvas axes are divided into cell sizes.
///
/// `Crossed` divides the canvas height by the row count to get the horizontal
/// cell size (and the width by the column count for the vertical one). This
/// is the established behavior and stays the default until the axis pairing
/// is confirmed; on square canvases with square grids both modes agree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum PointerAxes {
    #[default]
    Crossed,
    Aligned,
}

/// Map a pointer position to the cell under it.
///
/// Positions outside the canvas clamp to the nearest edge cell. Returns
/// `None` for degenerate canvas or grid sizes.
pub fn cell_at(pos: Vec2, canvas: Vec2, grid: (usize, usize), axes: PointerAxes) -> Option<(i32, i32)> {
    let (cols, rows) = grid;
    if cols == 0 || rows == 0 || !canvas.is_finite() || canvas.x <= 0.0 || canvas.y <= 0.0 {
        return None;
    }

    let cell_size = match axes {
        PointerAxes::Crossed => Vec2::new(canvas.y / rows as f32, canvas.x / cols as f32),
        PointerAxes::Aligned => Vec2::new(canvas.x / cols as f32, canvas.y / rows as f32),
    };

    // Float-to-int casts saturate (NaN -> 0), so the clamp always lands in range.
    let max_x = i32::try_from(cols - 1).unwrap_or(i32::MAX);
    let max_y = i32::try_from(rows - 1).unwrap_or(i32::MAX);
    let x = ((pos.x / cell_size.x).floor() as i32).clamp(0, max_x);
    let y = ((pos.y / cell_size.y).floor() as i32).clamp(0, max_y);
    Some((x, y))
}

/// Events produced by a single pointer move
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellTransition {
    /// Still inside the same cell (or mapper detached)
    None,
    /// First cell ever entered
    Entered(CellEvent),
    /// Moved from one cell to another: enter first, then leave
    Moved { enter: CellEvent, leave: CellEvent },
}

impl CellTransition {
    /// Events in publish order
    pub fn events(self) -> impl Iterator<Item = CellEvent> {
        let pair = match self {
            CellTransition::None => [None, None],
            CellTransition::Entered(enter) => [Some(enter), None],
            CellTransition::Moved { enter, leave } => [Some(enter), Some(leave)],
        };
        pair.into_iter().flatten()
    }
}

/// Stateful pointer-to-cell converter with deduplication
#[derive(Debug, Clone)]
pub struct PointerMapper {
    axes: PointerAxes,
    last_cell: Option<(i32, i32)>,
    attached: bool,
}

impl PointerMapper {
    pub fn new(axes: PointerAxes) -> Self {
        Self {
            axes,
            last_cell: None,
            attached: true,
        }
    }

    /// Last cell the pointer was reported in
    pub fn last_cell(&self) -> Option<(i32, i32)> {
        self.last_cell
    }

    pub fn is_attached(&self) -> bool {
        self.attached
    }

    /// Stop reacting to pointer input. Irreversible for this mapper.
    pub fn detach(&mut self) {
        if self.attached {
            log::debug!("Pointer mapper detached");
        }
        self.attached = false;
    }

    /// Forget the last cell; the next move emits a lone enter.
    pub fn reset(&mut self) {
        self.last_cell = None;
    }

    /// Process one raw pointer move.
    ///
    /// `canvas` is the current canvas size, re-read by the caller on every
    /// move so resizes are picked up.
    pub fn handle_move(&mut self, pos: Vec2, canvas: Vec2, grid: (usize, usize)) -> CellTransition {
        if !self.attached {
            return CellTransition::None;
        }
        let Some((x, y)) = cell_at(pos, canvas, grid, self.axes) else {
            log::warn!("Ignoring pointer move on degenerate canvas {:?}", canvas);
            return CellTransition::None;
        };

        let previous = self.last_cell;
        if previous == Some((x, y)) {
            return CellTransition::None;
        }
        self.last_cell = Some((x, y));

        let enter = CellEvent::Enter { x, y };
        match previous {
            None => CellTransition::Entered(enter),
            Some((px, py)) => CellTransition::Moved {
                enter,
                leave: CellEvent::Leave { x: px, y: py },
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const CANVAS: Vec2 = Vec2::new(100.0, 100.0);
    const GRID: (usize, usize) = (10, 10);

    /// Pointer position at the centre of cell `(x, y)` on the 100x100 canvas
    fn centre(x: i32, y: i32) -> Vec2 {
        Vec2::new(x as f32 * 10.0 + 5.0, y as f32 * 10.0 + 5.0)
    }

    fn run(mapper: &mut PointerMapper, positions: &[Vec2]) -> Vec<CellEvent> {
        positions
            .iter()
            .flat_map(|&p| mapper.handle_move(p, CANVAS, GRID).events())
            .collect()
    }

    #[test]
    fn test_enter_leave_sequence_with_repeats() {
        let mut mapper = PointerMapper::new(PointerAxes::Crossed);
        let positions = [
            centre(2, 2),
            centre(2, 2) + Vec2::new(1.5, -2.0),
            centre(3, 2),
            centre(3, 2) + Vec2::new(-3.0, 3.0),
            centre(3, 3),
        ];

        assert_eq!(
            run(&mut mapper, &positions),
            vec![
                CellEvent::Enter { x: 2, y: 2 },
                CellEvent::Enter { x: 3, y: 2 },
                CellEvent::Leave { x: 2, y: 2 },
                CellEvent::Enter { x: 3, y: 3 },
                CellEvent::Leave { x: 3, y: 2 },
            ]
        );
    }

    #[test]
    fn test_positions_clamp_to_edge_cells() {
        assert_eq!(cell_at(Vec2::new(-40.0, -1.0), CANVAS, GRID, PointerAxes::Crossed), Some((0, 0)));
        assert_eq!(cell_at(Vec2::new(100.0, 999.0), CANVAS, GRID, PointerAxes::Crossed), Some((9, 9)));
        assert_eq!(cell_at(Vec2::new(f32::NAN, 55.0), CANVAS, GRID, PointerAxes::Crossed), Some((0, 5)));
    }

    #[test]
    fn test_crossed_axes_use_opposite_canvas_dimension() {
        // 200x100 canvas over a 10x10 grid: crossed sizing gives 10px columns
        // and 20px rows, aligned sizing gives 20px columns and 10px rows.
        let canvas = Vec2::new(200.0, 100.0);
        let pos = Vec2::new(45.0, 45.0);
        assert_eq!(cell_at(pos, canvas, GRID, PointerAxes::Crossed), Some((4, 2)));
        assert_eq!(cell_at(pos, canvas, GRID, PointerAxes::Aligned), Some((2, 4)));
    }

    #[test]
    fn test_degenerate_canvas_emits_nothing() {
        let mut mapper = PointerMapper::new(PointerAxes::Aligned);
        assert_eq!(mapper.handle_move(centre(1, 1), Vec2::new(0.0, 100.0), GRID), CellTransition::None);
        assert_eq!(mapper.handle_move(centre(1, 1), Vec2::new(f32::INFINITY, 100.0), GRID), CellTransition::None);
        assert_eq!(mapper.last_cell(), None);
    }

    #[test]
    fn test_detach_stops_events() {
        let mut mapper = PointerMapper::new(PointerAxes::Crossed);
        assert_eq!(run(&mut mapper, &[centre(0, 0)]).len(), 1);

        mapper.detach();
        assert!(!mapper.is_attached());
        assert!(run(&mut mapper, &[centre(5, 5), centre(6, 6)]).is_empty());
    }

    #[test]
    fn test_reset_forgets_last_cell() {
        let mut mapper = PointerMapper::new(PointerAxes::Crossed);
        run(&mut mapper, &[centre(4, 4)]);
        mapper.reset();
        assert_eq!(run(&mut mapper, &[centre(4, 4)]), vec![CellEvent::Enter { x: 4, y: 4 }]);
    }

    proptest! {
        #[test]
        fn prop_one_transition_per_cell_change(
            points in prop::collection::vec((0.0f32..100.0, 0.0f32..100.0), 1..64)
        ) {
            let mut mapper = PointerMapper::new(PointerAxes::Crossed);
            let mut last: Option<(i32, i32)> = None;

            for (px, py) in points {
                let pos = Vec2::new(px, py);
                let cell = cell_at(pos, CANVAS, GRID, PointerAxes::Crossed).unwrap();
                let events: Vec<_> = mapper.handle_move(pos, CANVAS, GRID).events().collect();

                match last {
                    Some(prev) if prev == cell => prop_assert!(events.is_empty()),
                    Some(prev) => prop_assert_eq!(
                        events,
                        vec![
                            CellEvent::Enter { x: cell.0, y: cell.1 },
                            CellEvent::Leave { x: prev.0, y: prev.1 },
                        ]
                    ),
                    None => prop_assert_eq!(events, vec![CellEvent::Enter { x: cell.0, y: cell.1 }]),
                }
                last = Some(cell);
            }
        }
    }
}
