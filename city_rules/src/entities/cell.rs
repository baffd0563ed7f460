//! Grid cell definition.

use serde::{Deserialize, Serialize};

use super::CellType;

/// A single grid slot.
///
/// The position is implicit in the slot's index inside the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Cell {
    pub cell_type: CellType,

    /// Type staged by the current generation, applied on commit.
    pub next_type: CellType,

    /// Consecutive generations the current occupant has persisted.
    pub age: u32,

    /// Consecutive generations without feeding. Only meaningful for vampires.
    pub hunger: u32,
}

impl Cell {
    /// Create a cell already holding the given type.
    pub fn new(cell_type: CellType) -> Self {
        Self {
            cell_type,
            next_type: cell_type,
            age: 0,
            hunger: 0,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.cell_type == CellType::Empty
    }

    pub fn is_human(&self) -> bool {
        self.cell_type == CellType::Human
    }

    pub fn is_vampire(&self) -> bool {
        self.cell_type == CellType::Vampire
    }

    /// Write a type immediately, bypassing the stage/commit cycle.
    ///
    /// Hunger belongs to the previous occupant and is cleared; age is left alone.
    pub fn overwrite(&mut self, cell_type: CellType) {
        self.cell_type = cell_type;
        self.next_type = cell_type;
        self.hunger = 0;
    }

    /// Stage the type this cell takes on the next commit.
    pub fn stage(&mut self, next_type: CellType) {
        self.next_type = next_type;
    }

    /// Apply the staged type and update age and hunger.
    ///
    /// `fed` is whether the cell had at least one human neighbour during the
    /// generation that staged the type.
    pub fn commit(&mut self, fed: bool) {
        let previous = self.cell_type;
        self.cell_type = self.next_type;

        if self.cell_type == CellType::Empty || self.cell_type != previous {
            self.age = 0;
        } else {
            self.age = self.age.saturating_add(1);
        }

        let persisting_vampire =
            self.cell_type == CellType::Vampire && previous == CellType::Vampire;
        self.hunger = if persisting_vampire && !fed {
            self.hunger.saturating_add(1)
        } else {
            0
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_persisting_occupant_ages() {
        let mut cell = Cell::new(CellType::Human);
        cell.stage(CellType::Human);
        cell.commit(false);
        cell.commit(false);
        assert_eq!(cell.age, 2);
    }

    #[test]
    fn test_type_change_resets_age() {
        let mut cell = Cell::new(CellType::Human);
        cell.age = 7;
        cell.stage(CellType::Vampire);
        cell.commit(true);
        assert_eq!(cell.cell_type, CellType::Vampire);
        assert_eq!(cell.age, 0);
        assert_eq!(cell.hunger, 0);
    }

    #[test]
    fn test_empty_keeps_zero_age() {
        let mut cell = Cell::default();
        cell.commit(false);
        assert!(cell.is_empty());
        assert_eq!(cell.age, 0);
    }

    #[test]
    fn test_vampire_hunger() {
        let mut cell = Cell::new(CellType::Vampire);
        cell.commit(false);
        cell.commit(false);
        assert_eq!(cell.hunger, 2);

        cell.commit(true);
        assert_eq!(cell.hunger, 0);

        cell.commit(false);
        cell.stage(CellType::Empty);
        cell.commit(false);
        assert_eq!(cell.hunger, 0);
    }

    #[test]
    fn test_overwrite_clears_hunger_keeps_age() {
        let mut cell = Cell::new(CellType::Vampire);
        cell.age = 4;
        cell.hunger = 3;
        cell.overwrite(CellType::Human);
        assert_eq!(cell.next_type, CellType::Human);
        assert_eq!(cell.age, 4);
        assert_eq!(cell.hunger, 0);
    }
}
