//! Deterministic pointer input
//!
//! Stands in for a mouse: wanders between random cells of the grid with a
//! little per-move jitter, all driven by a seeded PCG so runs are repeatable.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use crate::cell_centre;

/// Pixels travelled per move
const STEP_PX: f32 = 3.0;
/// Maximum jitter per move, as a fraction of a cell
const JITTER: f32 = 0.2;

/// Seeded pointer path over a canvas
#[derive(Debug, Clone)]
pub struct PointerScript {
    rng: Pcg32,
    canvas: Vec2,
    grid: (usize, usize),
    position: Vec2,
    target: Vec2,
}

impl PointerScript {
    pub fn new(seed: u64, canvas: Vec2, grid: (usize, usize)) -> Self {
        let mut script = Self {
            rng: Pcg32::seed_from_u64(seed),
            canvas,
            grid: (grid.0.max(1), grid.1.max(1)),
            position: canvas * 0.5,
            target: canvas * 0.5,
        };
        script.target = script.pick_target();
        script
    }

    pub fn canvas(&self) -> Vec2 {
        self.canvas
    }

    fn cell_size(&self) -> Vec2 {
        Vec2::new(self.canvas.x / self.grid.0 as f32, self.canvas.y / self.grid.1 as f32)
    }

    fn pick_target(&mut self) -> Vec2 {
        let x = self.rng.random_range(0..self.grid.0) as i32;
        let y = self.rng.random_range(0..self.grid.1) as i32;
        cell_centre(x, y, self.cell_size())
    }

    /// Advance the pointer and return its new canvas position
    pub fn next_position(&mut self) -> Vec2 {
        let to_target = self.target - self.position;
        if to_target.length() <= STEP_PX {
            self.position = self.target;
            self.target = self.pick_target();
        } else {
            self.position += to_target.normalize() * STEP_PX;
        }

        let reach = self.cell_size() * JITTER;
        let jitter = Vec2::new(
            self.rng.random_range(-reach.x..=reach.x),
            self.rng.random_range(-reach.y..=reach.y),
        );
        (self.position + jitter).clamp(Vec2::ZERO, self.canvas)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_same_seed_same_path() {
        let canvas = Vec2::new(210.0, 210.0);
        let mut a = PointerScript::new(7, canvas, (21, 21));
        let mut b = PointerScript::new(7, canvas, (21, 21));
        for _ in 0..200 {
            assert_eq!(a.next_position(), b.next_position());
        }
    }

    #[test]
    fn test_positions_stay_on_canvas() {
        let canvas = Vec2::new(120.0, 80.0);
        let mut script = PointerScript::new(42, canvas, (12, 8));
        for _ in 0..500 {
            let p = script.next_position();
            assert!(p.x >= 0.0 && p.x <= canvas.x, "{p:?}");
            assert!(p.y >= 0.0 && p.y <= canvas.y, "{p:?}");
        }
    }
}
