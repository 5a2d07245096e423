//! Grid state and transition operator for the Lights Out puzzle.
//!
//! This module defines the puzzle's fundamental components:
//! - `GridState`: an immutable N×N matrix of binary cells with structural equality and hashing.
//! - `Coord`: a `(row, column)` pair naming the cell a transition toggles.
//! - `TransitionSet`: the N² in-bounds coordinates, generated once per search run.
use crate::error::{SearchError, SearchResult};
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use std::fmt;

/// A `(row, column)` pair, both 0-based.
pub type Coord = (usize, usize);

/// Row and column deltas of the cell itself and its four orthogonal neighbours.
const TOGGLE_PATTERN: [(isize, isize); 5] = [(0, 0), (-1, 0), (1, 0), (0, -1), (0, 1)];

/// Represents one puzzle state as a square grid of binary cells.
///
/// Cells are stored row-major. A `GridState` is never modified in place by the
/// search engine: every transition produces a new value. Equality and hashing are
/// derived, so two states are identical iff every cell matches.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct GridState {
    size: usize,
    cells: Vec<bool>,
}

impl GridState {
    /// Creates the `size`×`size` all-zeros grid.
    ///
    /// # Examples
    /// ```
    /// use lights_out_solver::engine::GridState;
    /// let grid = GridState::new_zeros(3);
    /// assert_eq!(grid.count_ones(), 0);
    /// ```
    pub fn new_zeros(size: usize) -> Self {
        GridState {
            size,
            cells: vec![false; size * size],
        }
    }

    /// Creates the `size`×`size` all-ones grid, the default goal.
    pub fn new_ones(size: usize) -> Self {
        GridState {
            size,
            cells: vec![true; size * size],
        }
    }

    /// Builds a grid from explicit rows.
    ///
    /// # Returns
    /// * `Ok(GridState)` if `rows` is square (every row as long as there are rows).
    /// * `Err(SearchError::InvalidGrid)` otherwise.
    pub fn from_rows(rows: &[Vec<bool>]) -> SearchResult<Self> {
        let size = rows.len();
        if let Some((r, row)) = rows.iter().enumerate().find(|(_, row)| row.len() != size) {
            return Err(SearchError::InvalidGrid {
                reason: format!(
                    "row {} has {} cells, expected {} for a square grid",
                    r,
                    row.len(),
                    size
                ),
            });
        }
        Ok(GridState {
            size,
            cells: rows.iter().flatten().copied().collect(),
        })
    }

    /// Creates a goal state that is guaranteed to be reachable from the all-zeros grid.
    ///
    /// Starting from all zeros, `presses` transitions are applied at coordinates drawn
    /// from a `SmallRng` seeded with `seed`, so the same arguments always produce the
    /// same grid. Not every N×N grid is reachable for every N (4×4 and 5×5 are not
    /// fully solvable), which is why random cell values are not used directly.
    pub fn new_random_reachable(size: usize, presses: usize, seed: u64) -> Self {
        let mut grid = GridState::new_zeros(size);
        if size == 0 {
            return grid;
        }
        let mut rng = SmallRng::seed_from_u64(seed);
        for _ in 0..presses {
            let coord = (rng.gen_range(0..size), rng.gen_range(0..size));
            grid.toggle_in_place(coord);
        }
        grid
    }

    /// Returns the side length N.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Returns the value of the cell at `(r, c)`.
    ///
    /// # Panics
    /// Panics if `r` or `c` is outside the grid.
    pub fn get(&self, r: usize, c: usize) -> bool {
        assert!(r < self.size && c < self.size, "cell ({}, {}) out of range", r, c);
        self.cells[r * self.size + c]
    }

    /// Returns the cell at `(r, c)` as `0` or `1`.
    pub fn value(&self, r: usize, c: usize) -> u32 {
        u32::from(self.get(r, c))
    }

    /// Iterates over the rows of the grid.
    pub fn rows(&self) -> impl Iterator<Item = &[bool]> {
        // chunks(0) panics, and an empty grid has no rows anyway.
        self.cells.chunks(self.size.max(1))
    }

    /// Returns `true` if every cell is 1. Vacuously true for the 0×0 grid.
    pub fn is_all_ones(&self) -> bool {
        self.cells.iter().all(|&cell| cell)
    }

    /// Counts the cells set to 1.
    pub fn count_ones(&self) -> usize {
        self.cells.iter().filter(|&&cell| cell).count()
    }

    /// Iterates over the in-bounds orthogonal neighbours of `(r, c)`.
    pub fn neighbours(&self, r: usize, c: usize) -> impl Iterator<Item = Coord> + '_ {
        TOGGLE_PATTERN[1..]
            .iter()
            .filter_map(move |&(dr, dc)| self.offset((r, c), dr, dc))
    }

    /// Applies the transition operator at `coord`, returning the resulting state.
    ///
    /// The cell at `coord` and each of its in-bounds orthogonal neighbours are flipped.
    /// `self` is left untouched.
    ///
    /// # Returns
    /// * `Ok(GridState)` with the toggled cells.
    /// * `Err(SearchError::InvalidCoordinate)` if `coord` lies outside the grid.
    ///
    /// # Examples
    /// ```
    /// use lights_out_solver::engine::GridState;
    /// let grid = GridState::new_zeros(3);
    /// let next = grid.transition((1, 1)).unwrap();
    /// assert_eq!(next.count_ones(), 5);
    /// assert!(grid.transition((3, 0)).is_err());
    /// ```
    pub fn transition(&self, coord: Coord) -> SearchResult<GridState> {
        self.check_coord(coord)?;
        Ok(self.toggled(coord))
    }

    /// Validates that `coord` addresses a cell of this grid.
    pub fn check_coord(&self, (row, col): Coord) -> SearchResult<()> {
        if row >= self.size || col >= self.size {
            return Err(SearchError::InvalidCoordinate {
                row,
                col,
                size: self.size,
            });
        }
        Ok(())
    }

    /// Transition for coordinates already known to be in bounds, e.g. from a `TransitionSet`.
    pub(crate) fn toggled(&self, coord: Coord) -> GridState {
        let mut next = self.clone();
        next.toggle_in_place(coord);
        next
    }

    fn toggle_in_place(&mut self, coord: Coord) {
        for &(dr, dc) in TOGGLE_PATTERN.iter() {
            if let Some((r, c)) = self.offset(coord, dr, dc) {
                let idx = r * self.size + c;
                self.cells[idx] = !self.cells[idx];
            }
        }
    }

    fn offset(&self, (r, c): Coord, dr: isize, dc: isize) -> Option<Coord> {
        let nr = r.checked_add_signed(dr)?;
        let nc = c.checked_add_signed(dc)?;
        (nr < self.size && nc < self.size).then_some((nr, nc))
    }
}

impl fmt::Display for GridState {
    /// Prints one row per line, cells as `0`/`1` separated by single spaces.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (r, row) in self.rows().enumerate() {
            if r > 0 {
                writeln!(f)?;
            }
            let line: Vec<&str> = row.iter().map(|&cell| if cell { "1" } else { "0" }).collect();
            write!(f, "{}", line.join(" "))?;
        }
        Ok(())
    }
}

/// The full set of transitions for an N×N grid, in row-major order.
///
/// Built once per run and handed to each strategy, so different grid sizes can be
/// searched side by side in one process.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TransitionSet {
    size: usize,
    coords: Vec<Coord>,
}

impl TransitionSet {
    /// Generates all N² coordinates for a `size`×`size` grid.
    ///
    /// # Examples
    /// ```
    /// use lights_out_solver::engine::TransitionSet;
    /// let transitions = TransitionSet::new(2);
    /// assert_eq!(transitions.coords(), &[(0, 0), (0, 1), (1, 0), (1, 1)]);
    /// ```
    pub fn new(size: usize) -> Self {
        let coords = (0..size)
            .flat_map(|r| (0..size).map(move |c| (r, c)))
            .collect();
        TransitionSet { size, coords }
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn len(&self) -> usize {
        self.coords.len()
    }

    pub fn is_empty(&self) -> bool {
        self.coords.is_empty()
    }

    pub fn coords(&self) -> &[Coord] {
        &self.coords
    }

    pub fn iter(&self) -> impl Iterator<Item = Coord> + '_ {
        self.coords.iter().copied()
    }

    /// Fails with `TransitionSetMismatch` unless this set was built for `state`'s size.
    pub fn check_compatible(&self, state: &GridState) -> SearchResult<()> {
        if self.size != state.size() {
            return Err(SearchError::TransitionSetMismatch {
                expected: state.size(),
                found: self.size,
            });
        }
        Ok(())
    }
}
