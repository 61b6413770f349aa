//! Signed-distance helpers and the discrete level-set gradient

use glam::Vec2;

use super::state::CellState;
use crate::grid::Grid;

/// Signed distance to a circle
#[inline]
pub fn sd_circle(p: Vec2, center: Vec2, radius: f32) -> f32 {
    (p - center).length() - radius
}

/// Finite-difference derivative along one axis.
///
/// Central difference when both neighbours exist, one-sided when only one
/// does, `None` when the axis is a single cell wide.
#[inline]
pub fn axis_derivative(prev: Option<f32>, center: f32, next: Option<f32>) -> Option<f32> {
    match (prev, next) {
        (Some(p), Some(n)) => Some((n - p) * 0.5),
        (None, Some(n)) => Some(n - center),
        (Some(p), None) => Some(center - p),
        (None, None) => None,
    }
}

/// Gradient of the level set at `(x, y)`, read from a value snapshot.
///
/// `None` if the cell is out of range or either axis has no neighbours.
pub fn level_set_gradient(grid: &Grid<CellState>, x: i32, y: i32) -> Option<Vec2> {
    let phi = |x: i32, y: i32| grid.cell(x, y).map(|c| c.level_set);
    let center = phi(x, y)?;
    let dx = axis_derivative(phi(x - 1, y), center, phi(x + 1, y))?;
    let dy = axis_derivative(phi(x, y - 1), center, phi(x, y + 1))?;
    Some(Vec2::new(dx, dy))
}

/// Direction used when the gradient vanishes: unit vector against the pointer displacement
#[inline]
pub fn fallback_gradient(displacement: Vec2) -> Vec2 {
    -displacement.normalize_or_zero()
}
