//! World state - the toroidal grid of cells, the day/night clock and snapshots.

mod clock;
mod snapshot;
mod stats;

pub use clock::*;
pub use snapshot::*;
pub use stats::*;

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::entities::{Cell, CellType};
use crate::error::{CityError, Result};
use crate::mechanics::Neighborhood;

/// Offsets of the eight Moore neighbours.
static NEIGHBOR_OFFSETS: [(isize, isize); 8] = [
    (-1, -1),
    (0, -1),
    (1, -1),
    (-1, 0),
    (1, 0),
    (-1, 1),
    (0, 1),
    (1, 1),
];

/// Share of cells given to each type by [`Grid::random_populate`].
///
/// Ratios are expected to be non-negative and sum to at most 1. They are not
/// clamped: larger sums simply make later bands unreachable.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PopulationRatios {
    pub human: f64,
    pub vampire: f64,
    pub forest: f64,
    pub bunker: f64,
}

impl Default for PopulationRatios {
    fn default() -> Self {
        Self {
            human: 0.1,
            vampire: 0.05,
            forest: 0.03,
            bunker: 0.01,
        }
    }
}

impl PopulationRatios {
    /// Type selected by a uniform draw `r` in `[0, 1)`.
    ///
    /// Bands are checked cumulatively in the order human, vampire, forest, bunker.
    pub fn pick(&self, r: f64) -> CellType {
        let mut upper = self.human;
        if r < upper {
            return CellType::Human;
        }
        upper += self.vampire;
        if r < upper {
            return CellType::Vampire;
        }
        upper += self.forest;
        if r < upper {
            return CellType::Forest;
        }
        upper += self.bunker;
        if r < upper {
            return CellType::Bunker;
        }
        CellType::Empty
    }
}

/// Fixed-size toroidal grid of cells.
///
/// Every coordinate is wrapped, so lookups never fail. Cells are stored
/// row-major; snapshots use the column-major `[x][y]` layout.
#[derive(Debug, Clone, PartialEq)]
pub struct Grid {
    width: usize,
    height: usize,
    cells: Vec<Cell>,
}

impl Grid {
    /// Create an all-empty grid.
    ///
    /// # Errors
    ///
    /// Returns [`CityError::InvalidDimensions`] if either dimension is zero.
    pub fn new(width: usize, height: usize) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(CityError::InvalidDimensions { width, height });
        }
        Ok(Self {
            width,
            height,
            cells: vec![Cell::default(); width * height],
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Total number of cells.
    pub fn cell_count(&self) -> usize {
        self.cells.len()
    }

    /// Normalize any coordinate pair onto the torus.
    pub fn wrap(&self, x: isize, y: isize) -> (usize, usize) {
        (
            x.rem_euclid(self.width as isize) as usize,
            y.rem_euclid(self.height as isize) as usize,
        )
    }

    fn index(&self, x: isize, y: isize) -> usize {
        let (x, y) = self.wrap(x, y);
        y * self.width + x
    }

    fn position(&self, index: usize) -> (usize, usize) {
        (index % self.width, index / self.width)
    }

    pub fn get_cell(&self, x: isize, y: isize) -> &Cell {
        &self.cells[self.index(x, y)]
    }

    /// Mutable access for editors. Simulation bookkeeping does not observe edits.
    pub fn get_cell_mut(&mut self, x: isize, y: isize) -> &mut Cell {
        let index = self.index(x, y);
        &mut self.cells[index]
    }

    /// Write a type immediately into both the current and staged slot.
    pub fn set_cell(&mut self, x: isize, y: isize, cell_type: CellType) {
        self.get_cell_mut(x, y).overwrite(cell_type);
    }

    /// Iterate over all cells with their coordinates, row by row.
    pub fn iter(&self) -> impl Iterator<Item = ((usize, usize), &Cell)> {
        self.cells
            .iter()
            .enumerate()
            .map(|(index, cell)| (self.position(index), cell))
    }

    pub(crate) fn cells_mut(&mut self) -> &mut [Cell] {
        &mut self.cells
    }

    /// Set every cell to empty with zero age and hunger.
    pub fn reset(&mut self) {
        self.cells.fill(Cell::default());
    }

    /// Reset, then draw one uniform value per cell and pick its type.
    pub fn random_populate<R: Rng>(&mut self, ratios: &PopulationRatios, rng: &mut R) {
        self.reset();
        for cell in &mut self.cells {
            let r: f64 = rng.gen();
            *cell = Cell::new(ratios.pick(r));
        }
    }

    /// Offsets are applied after wrapping, so any coordinate is safe.
    fn neighbor_indices(&self, x: isize, y: isize) -> impl Iterator<Item = usize> + '_ {
        let (x, y) = self.wrap(x, y);
        NEIGHBOR_OFFSETS.iter().map(move |&(dx, dy)| {
            let nx = (x + self.width - 1 + (dx + 1) as usize) % self.width;
            let ny = (y + self.height - 1 + (dy + 1) as usize) % self.height;
            ny * self.width + nx
        })
    }

    /// Number of the eight neighbours whose current type is `cell_type`.
    pub fn count_neighbors(&self, x: isize, y: isize, cell_type: CellType) -> u32 {
        self.neighbor_indices(x, y)
            .filter(|&index| self.cells[index].cell_type == cell_type)
            .count() as u32
    }

    /// Human and vampire neighbour counts in a single pass.
    pub fn neighborhood(&self, x: isize, y: isize) -> Neighborhood {
        let mut neighbors = Neighborhood::default();
        for index in self.neighbor_indices(x, y) {
            match self.cells[index].cell_type {
                CellType::Human => neighbors.humans += 1,
                CellType::Vampire => neighbors.vampires += 1,
                _ => {}
            }
        }
        neighbors
    }

    /// Neighbouring cells with their wrapped coordinates, optionally filtered by type.
    pub fn neighbor_cells(
        &self,
        x: isize,
        y: isize,
        filter: Option<CellType>,
    ) -> Vec<((usize, usize), &Cell)> {
        self.neighbor_indices(x, y)
            .map(|index| (self.position(index), &self.cells[index]))
            .filter(|(_, cell)| filter.map_or(true, |t| cell.cell_type == t))
            .collect()
    }

    pub fn count_type(&self, cell_type: CellType) -> usize {
        self.cells
            .iter()
            .filter(|cell| cell.cell_type == cell_type)
            .count()
    }

    /// Coordinates of every cell of the given type, in row-major order.
    pub fn cells_of_type(&self, cell_type: CellType) -> Vec<(usize, usize)> {
        self.iter()
            .filter(|(_, cell)| cell.cell_type == cell_type)
            .map(|(position, _)| position)
            .collect()
    }

    /// Counts of each type plus age statistics for humans and vampires.
    pub fn population_stats(&self) -> PopulationStats {
        PopulationStats::from_cells(self.cells.iter())
    }

    /// Column-major matrix of current types, indexed `[x][y]`.
    pub fn serialize(&self) -> Vec<Vec<CellType>> {
        (0..self.width)
            .map(|x| {
                (0..self.height)
                    .map(|y| self.cells[y * self.width + x].cell_type)
                    .collect()
            })
            .collect()
    }

    /// Load types from a column-major matrix.
    ///
    /// Only the region overlapping both the matrix and the grid is written;
    /// cells outside it keep their state. Every written cell gets zero age
    /// and zero hunger.
    pub fn load_from_serialized(&mut self, state: &[Vec<CellType>]) {
        for (x, column) in state.iter().take(self.width).enumerate() {
            for (y, &cell_type) in column.iter().take(self.height).enumerate() {
                let cell = &mut self.cells[y * self.width + x];
                cell.overwrite(cell_type);
                cell.age = 0;
            }
        }
    }

    /// Stamp a row-major pattern with its top-left corner at the offset.
    ///
    /// Every entry is written, empty ones included, with wrapping at the
    /// edges. Ages are left untouched.
    pub fn add_pattern<R: AsRef<[CellType]>>(
        &mut self,
        pattern: &[R],
        x_offset: isize,
        y_offset: isize,
    ) {
        for (py, row) in pattern.iter().enumerate() {
            for (px, &cell_type) in row.as_ref().iter().enumerate() {
                self.set_cell(px as isize + x_offset, py as isize + y_offset, cell_type);
            }
        }
    }
}
