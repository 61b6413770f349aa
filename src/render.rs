//! Renderer-facing contract
//!
//! The crate does no drawing. A renderer implements [`CellRenderer`] and is
//! handed cell states: every cell once for the first frame, then only the
//! cells that changed. [`TextRenderer`] is a minimal consumer used by the
//! native demo and tests.

use std::fmt;

use crate::sim::CellState;

/// Consumer of per-cell state
pub trait CellRenderer {
    fn render_cell(&mut self, x: i32, y: i32, cell: &CellState);
}

/// Character-grid renderer
///
/// `~` liquid, `#` inside the level set (negative), `.` outside.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextRenderer {
    width: usize,
    height: usize,
    glyphs: Vec<char>,
    cells_drawn: usize,
}

impl TextRenderer {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            glyphs: vec![' '; width * height],
            cells_drawn: 0,
        }
    }

    pub fn glyph_for(cell: &CellState) -> char {
        if cell.is_liquid {
            '~'
        } else if cell.level_set < 0.0 {
            '#'
        } else {
            '.'
        }
    }

    pub fn glyph(&self, x: i32, y: i32) -> Option<char> {
        let x = usize::try_from(x).ok().filter(|&x| x < self.width)?;
        let y = usize::try_from(y).ok().filter(|&y| y < self.height)?;
        Some(self.glyphs[y * self.width + x])
    }

    /// Total `render_cell` calls so far
    pub fn cells_drawn(&self) -> usize {
        self.cells_drawn
    }
}

impl CellRenderer for TextRenderer {
    fn render_cell(&mut self, x: i32, y: i32, cell: &CellState) {
        let (Ok(ux), Ok(uy)) = (usize::try_from(x), usize::try_from(y)) else {
            return;
        };
        if ux >= self.width || uy >= self.height {
            return;
        }
        self.glyphs[uy * self.width + ux] = Self::glyph_for(cell);
        self.cells_drawn += 1;
    }
}

impl fmt::Display for TextRenderer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.glyphs.chunks(self.width.max(1)) {
            let line: String = row.iter().collect();
            writeln!(f, "{}", line)?;
        }
        Ok(())
    }
}
