//! Entity definitions for the grid.

mod cell;

pub use cell::*;

use serde::{Deserialize, Serialize};

/// Occupant of a single grid slot.
///
/// Serialized as its integer code so snapshots stay compatible with the
/// legacy save layout (`0=Empty, 1=Human, 2=Vampire, 3=Forest, 4=Bunker`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum CellType {
    #[default]
    Empty,
    Human,
    Vampire,
    /// Static terrain.
    Forest,
    /// Static terrain.
    Bunker,
}

impl CellType {
    /// All cell types in code order.
    pub const ALL: [CellType; 5] = [
        CellType::Empty,
        CellType::Human,
        CellType::Vampire,
        CellType::Forest,
        CellType::Bunker,
    ];

    /// Integer code used in snapshots.
    pub fn code(self) -> u8 {
        match self {
            CellType::Empty => 0,
            CellType::Human => 1,
            CellType::Vampire => 2,
            CellType::Forest => 3,
            CellType::Bunker => 4,
        }
    }

    /// Look up a cell type by its integer code.
    pub fn from_code(code: u8) -> Option<Self> {
        Self::ALL.get(code as usize).copied()
    }

    /// Humans and vampires are the only types the rules ever move.
    pub fn is_living(self) -> bool {
        matches!(self, CellType::Human | CellType::Vampire)
    }

    /// Forests and bunkers never change through simulation rules.
    pub fn is_terrain(self) -> bool {
        matches!(self, CellType::Forest | CellType::Bunker)
    }
}

/// A snapshot carried an integer that is not a known cell type code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("unknown cell type code {0}")]
pub struct UnknownCellType(pub u8);

impl TryFrom<u8> for CellType {
    type Error = UnknownCellType;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        Self::from_code(code).ok_or(UnknownCellType(code))
    }
}

impl From<CellType> for u8 {
    fn from(cell_type: CellType) -> Self {
        cell_type.code()
    }
}

impl std::fmt::Display for CellType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            CellType::Empty => "empty",
            CellType::Human => "human",
            CellType::Vampire => "vampire",
            CellType::Forest => "forest",
            CellType::Bunker => "bunker",
        };
        f.write_str(name)
    }
}
