//! Fork-join generation step.
//!
//! Rows are split into contiguous ranges and each range is evolved by its own
//! rayon task. Tasks read the shared current buffer and write only their own
//! slice of the next buffer, so no locking is involved. The scope joins every
//! task before the buffers swap.

use std::ops::Range;

use super::Grid;
use super::grid::evolve_rows;

/// Splits one generation across concurrent row-range tasks
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Scheduler {
    chunks: usize,
}

impl Scheduler {
    /// Scheduler targeting `chunks` row ranges per generation (at least one)
    pub fn new(chunks: usize) -> Self {
        Self { chunks: chunks.max(1) }
    }

    /// One chunk per thread in rayon's pool
    pub fn with_host_parallelism() -> Self {
        Self::new(rayon::current_num_threads())
    }

    pub fn chunks(&self) -> usize {
        self.chunks
    }

    /// Contiguous, non-overlapping row ranges covering `0..height`.
    /// The last range absorbs the remainder rows.
    pub fn partition(&self, height: usize) -> Vec<Range<usize>> {
        let chunks = self.chunks.min(height).max(1);
        let rows = height / chunks;

        (0..chunks)
            .map(|i| {
                let start = i * rows;
                let end = if i + 1 == chunks { height } else { start + rows };
                start..end
            })
            .collect()
    }

    /// Advance `grid` by exactly one generation.
    /// Produces the same buffer as `Grid::step_sequential` for any chunk count.
    pub fn step(&self, grid: &mut Grid) {
        let (width, height) = grid.dimensions();
        let ranges = self.partition(height);
        let (current, next, rules) = grid.split_buffers();

        rayon::scope(|scope| {
            let mut rest = next;
            for rows in ranges {
                let (slice, tail) = std::mem::take(&mut rest).split_at_mut(rows.len() * width);
                rest = tail;
                scope.spawn(move |_| evolve_rows(current, width, height, rules, rows, slice));
            }
        });

        grid.swap_buffers();
    }
}

impl Default for Scheduler {
    fn default() -> Self {
        Self::with_host_parallelism()
    }
}
