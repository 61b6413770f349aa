//! Fixed-size 2-D cell storage
//!
//! Cells are stored row-major in a single `Vec`. Lookups take signed
//! coordinates so neighbourhood scans can step past the edges freely:
//! anything outside `[0, width) x [0, height)` is simply `None`.

use std::fmt::Display;

use crate::error::GridError;

/// Bounds-checked rectangular grid of `D`
#[derive(Debug, Clone, PartialEq)]
pub struct Grid<D> {
    width: usize,
    height: usize,
    cells: Vec<D>,
}

impl<D> Grid<D> {
    /// Build a grid, calling `init(x, y)` exactly once per cell in row-major order.
    pub fn new<F>(width: usize, height: usize, mut init: F) -> Result<Self, GridError>
    where
        F: FnMut(i32, i32) -> D,
    {
        Self::try_new(width, height, |x, y| {
            Ok::<_, std::convert::Infallible>(init(x, y))
        })
    }

    /// Build a grid from a fallible initializer.
    ///
    /// The first failing cell aborts construction; cells built so far are
    /// dropped and no partial grid escapes.
    pub fn try_new<F, E>(width: usize, height: usize, mut init: F) -> Result<Self, GridError>
    where
        F: FnMut(i32, i32) -> Result<D, E>,
        E: Display,
    {
        if width == 0 || height == 0 {
            return Err(GridError::EmptyDimensions { width, height });
        }
        let len = width
            .checked_mul(height)
            .filter(|_| i32::try_from(width).is_ok() && i32::try_from(height).is_ok())
            .ok_or(GridError::Oversized { width, height })?;

        let mut cells = Vec::with_capacity(len);
        for y in 0..height as i32 {
            for x in 0..width as i32 {
                let cell = init(x, y).map_err(|e| GridError::CellInit {
                    x,
                    y,
                    reason: e.to_string(),
                })?;
                cells.push(cell);
            }
        }

        Ok(Self {
            width,
            height,
            cells,
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Whether `(x, y)` addresses a cell
    #[inline]
    pub fn contains(&self, x: i32, y: i32) -> bool {
        self.index(x, y).is_some()
    }

    #[inline]
    fn index(&self, x: i32, y: i32) -> Option<usize> {
        let x = usize::try_from(x).ok().filter(|&x| x < self.width)?;
        let y = usize::try_from(y).ok().filter(|&y| y < self.height)?;
        Some(y * self.width + x)
    }

    /// Cell at `(x, y)`, or `None` when out of range
    #[inline]
    pub fn cell(&self, x: i32, y: i32) -> Option<&D> {
        self.index(x, y).map(|i| &self.cells[i])
    }

    #[inline]
    pub fn cell_mut(&mut self, x: i32, y: i32) -> Option<&mut D> {
        self.index(x, y).map(move |i| &mut self.cells[i])
    }

    /// All coordinates in row-major order
    pub fn coords(&self) -> impl Iterator<Item = (i32, i32)> + use<D> {
        let (w, h) = (self.width as i32, self.height as i32);
        (0..h).flat_map(move |y| (0..w).map(move |x| (x, y)))
    }

    /// Coordinates paired with cell values, row-major
    pub fn iter(&self) -> impl Iterator<Item = ((i32, i32), &D)> {
        self.coords().zip(self.cells.iter())
    }

    /// Visit every cell once, row-major
    pub fn for_each_cell<F>(&self, mut f: F)
    where
        F: FnMut(i32, i32, &D),
    {
        for ((x, y), cell) in self.iter() {
            f(x, y, cell);
        }
    }

    pub fn for_each_cell_mut<F>(&mut self, mut f: F)
    where
        F: FnMut(i32, i32, &mut D),
    {
        let coords = self.coords();
        for ((x, y), cell) in coords.zip(self.cells.iter_mut()) {
            f(x, y, cell);
        }
    }

    /// Per-cell copy into a new grid of the same shape.
    ///
    /// The result owns its values; later mutation of `self` does not reach it.
    pub fn map<U, F>(&self, mut f: F) -> Grid<U>
    where
        F: FnMut(i32, i32, &D) -> U,
    {
        Grid {
            width: self.width,
            height: self.height,
            cells: self.iter().map(|((x, y), cell)| f(x, y, cell)).collect(),
        }
    }
}
