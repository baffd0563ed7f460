//! Population statistics.

use serde::{Deserialize, Serialize};

use crate::entities::{Cell, CellType};

/// Count and age distribution for one living species.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SpeciesStats {
    pub ages: Vec<u32>,
    /// 0.0 when the species is absent.
    pub average_age: f32,
    pub max_age: u32,
}

impl SpeciesStats {
    pub fn from_ages(ages: Vec<u32>) -> Self {
        let max_age = ages.iter().copied().max().unwrap_or(0);
        let average_age = if ages.is_empty() {
            0.0
        } else {
            ages.iter().map(|&age| age as f64).sum::<f64>() as f32 / ages.len() as f32
        };
        Self {
            ages,
            average_age,
            max_age,
        }
    }

    pub fn count(&self) -> usize {
        self.ages.len()
    }
}

/// Snapshot of the grid's population.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PopulationStats {
    pub empty_count: usize,
    pub forest_count: usize,
    pub bunker_count: usize,
    pub humans: SpeciesStats,
    pub vampires: SpeciesStats,
}

impl PopulationStats {
    pub fn from_cells<'a>(cells: impl IntoIterator<Item = &'a Cell>) -> Self {
        let mut stats = Self::default();
        let mut human_ages = Vec::new();
        let mut vampire_ages = Vec::new();

        for cell in cells {
            match cell.cell_type {
                CellType::Empty => stats.empty_count += 1,
                CellType::Human => human_ages.push(cell.age),
                CellType::Vampire => vampire_ages.push(cell.age),
                CellType::Forest => stats.forest_count += 1,
                CellType::Bunker => stats.bunker_count += 1,
            }
        }

        stats.humans = SpeciesStats::from_ages(human_ages);
        stats.vampires = SpeciesStats::from_ages(vampire_ages);
        stats
    }

    pub fn human_count(&self) -> usize {
        self.humans.count()
    }

    pub fn vampire_count(&self) -> usize {
        self.vampires.count()
    }

    /// Number of cells of the given type.
    pub fn count(&self, cell_type: CellType) -> usize {
        match cell_type {
            CellType::Empty => self.empty_count,
            CellType::Human => self.human_count(),
            CellType::Vampire => self.vampire_count(),
            CellType::Forest => self.forest_count,
            CellType::Bunker => self.bunker_count,
        }
    }

    /// Counts only, without the age lists.
    pub fn summary(&self) -> PopulationSummary {
        PopulationSummary {
            human_count: self.human_count(),
            vampire_count: self.vampire_count(),
            forest_count: self.forest_count,
            bunker_count: self.bunker_count,
            empty_count: self.empty_count,
        }
    }
}

/// Per-type counts stored alongside snapshots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PopulationSummary {
    pub human_count: usize,
    pub vampire_count: usize,
    pub forest_count: usize,
    pub bunker_count: usize,
    pub empty_count: usize,
}
