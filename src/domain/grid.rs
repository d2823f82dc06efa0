use std::ops::Range;
use std::sync::Arc;

use rand::Rng;

use super::error::GridError;
use super::{Cell, EvolutionRules, Neighborhood};

/// Grid owns the two generation buffers of a toroidal automaton.
/// `current` is read during a step, `next` is written, then they swap.
pub struct Grid {
    width: usize,
    height: usize,
    current: Vec<Cell>,
    next: Vec<Cell>,
    rules: Arc<EvolutionRules>,
}

impl Grid {
    /// Create a grid with all cells dead.
    /// Every neighborhood must fit inside the grid so one wrap step is enough.
    pub fn new(width: usize, height: usize, rules: Arc<EvolutionRules>) -> Result<Self, GridError> {
        let reach = rules.reach();
        if width == 0 || height == 0 || width <= reach as usize || height <= reach as usize {
            return Err(GridError::TooSmall { width, height, reach });
        }
        Ok(Self {
            width,
            height,
            current: vec![Cell::DEAD; width * height],
            next: vec![Cell::DEAD; width * height],
            rules,
        })
    }

    /// Create a grid from a row-major cell buffer
    pub fn from_cells(
        width: usize,
        height: usize,
        cells: Vec<Cell>,
        rules: Arc<EvolutionRules>,
    ) -> Result<Self, GridError> {
        let mut grid = Self::new(width, height, rules)?;
        if cells.len() != width * height {
            return Err(GridError::CellCount { expected: width * height, got: cells.len() });
        }
        grid.current = cells;
        Ok(grid)
    }

    /// Get grid dimensions
    pub const fn dimensions(&self) -> (usize, usize) {
        (self.width, self.height)
    }

    pub fn rules(&self) -> &EvolutionRules {
        &self.rules
    }

    /// Convert 2D coordinates to 1D index
    const fn get_index(&self, x: usize, y: usize) -> usize {
        y * self.width + x
    }

    /// Get cell at position (with bounds checking)
    pub fn get(&self, x: usize, y: usize) -> Option<Cell> {
        (x < self.width && y < self.height).then(|| self.current[self.get_index(x, y)])
    }

    /// Set cell at position in the current generation
    pub fn set(&mut self, x: usize, y: usize, cell: Cell) {
        if x < self.width && y < self.height {
            let idx = self.get_index(x, y);
            self.current[idx] = cell;
        }
    }

    /// Read-only row-major view of the current generation
    pub fn cells(&self) -> &[Cell] {
        &self.current
    }

    /// Count alive cells
    pub fn population(&self) -> usize {
        self.current.iter().filter(|c| c.is_alive()).count()
    }

    /// Count alive members of neighborhood `index` around (x, y)
    pub fn count_alive_neighbors(&self, x: usize, y: usize, index: usize) -> u32 {
        count_alive(
            &self.current,
            self.width,
            self.height,
            x,
            y,
            &self.rules.neighborhoods()[index],
        )
    }

    /// Reseed the current generation: each cell is alive with `probability`
    pub fn randomize<R: Rng + ?Sized>(&mut self, rng: &mut R, probability: f64) {
        self.current
            .iter_mut()
            .for_each(|cell| *cell = Cell::seeded(rng.random_bool(probability)));
    }

    /// Kill every cell
    pub fn clear(&mut self) {
        self.current.iter_mut().for_each(|cell| *cell = Cell::DEAD);
    }

    /// Single-threaded generation step over every row, then swap
    pub fn step_sequential(&mut self) {
        let (width, height) = (self.width, self.height);
        let (current, next, rules) = self.split_buffers();
        evolve_rows(current, width, height, rules, 0..height, next);
        self.swap_buffers();
    }

    /// Borrow the read buffer, the write buffer and the rules at once
    pub(crate) fn split_buffers(&mut self) -> (&[Cell], &mut [Cell], &EvolutionRules) {
        (&self.current[..], &mut self.next[..], self.rules.as_ref())
    }

    /// Promote `next` to `current` without copying
    pub(crate) fn swap_buffers(&mut self) {
        std::mem::swap(&mut self.current, &mut self.next);
    }
}

/// Count alive members of `neighborhood` around (x, y), wrapping each axis once
#[inline]
pub fn count_alive(
    cells: &[Cell],
    width: usize,
    height: usize,
    x: usize,
    y: usize,
    neighborhood: &Neighborhood,
) -> u32 {
    let w = width as isize;
    let h = height as isize;

    neighborhood
        .members()
        .iter()
        .map(|c| {
            let nx = wrap_once(x as isize + c.dx as isize, w);
            let ny = wrap_once(y as isize + c.dy as isize, h);
            cells[ny * width + nx]
        })
        .filter(|cell| cell.is_alive())
        .count() as u32
}

#[inline]
fn wrap_once(v: isize, len: isize) -> usize {
    if v < 0 {
        (v + len) as usize
    } else if v >= len {
        (v - len) as usize
    } else {
        v as usize
    }
}

/// Evolve rows `rows` of `current` into `out`, which holds exactly those rows.
/// Reads only `current`; never touches any other part of the next buffer.
pub fn evolve_rows(
    current: &[Cell],
    width: usize,
    height: usize,
    rules: &EvolutionRules,
    rows: Range<usize>,
    out: &mut [Cell],
) {
    debug_assert_eq!(out.len(), rows.len() * width);
    let neighborhoods = rules.neighborhoods();
    let mut counts = vec![0u32; neighborhoods.len()];

    for (row_out, y) in out.chunks_mut(width).zip(rows) {
        for (x, slot) in row_out.iter_mut().enumerate() {
            for (count, nb) in counts.iter_mut().zip(neighborhoods) {
                *count = count_alive(current, width, height, x, y, nb);
            }
            let cell = current[y * width + x];
            *slot = cell.advance(rules.next_state(cell.alive, &counts));
        }
    }
}
