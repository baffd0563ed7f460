//! Per-cell transition function.

use crate::entities::{Cell, CellType};

use super::{HumanRules, PhaseRules, VampireRules};

/// Counts of the living neighbours around one cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Neighborhood {
    pub humans: u32,
    pub vampires: u32,
}

impl Neighborhood {
    pub fn new(humans: u32, vampires: u32) -> Self {
        Self { humans, vampires }
    }

    /// Any adjacent human counts as a meal for a vampire.
    pub fn has_prey(&self) -> bool {
        self.humans > 0
    }
}

impl PhaseRules {
    /// Decide the type `cell` takes in the next generation.
    ///
    /// Pure: reads only the pre-step cell and its neighbour counts.
    pub fn next_type(&self, cell: &Cell, neighbors: Neighborhood, is_day: bool) -> CellType {
        match cell.cell_type {
            CellType::Empty => self.empty_next(neighbors),
            CellType::Human => self.human.next_type(cell.age, neighbors),
            CellType::Vampire => self.vampire.next_type(cell.age, cell.hunger, neighbors, is_day),
            terrain @ (CellType::Forest | CellType::Bunker) => terrain,
        }
    }

    fn empty_next(&self, neighbors: Neighborhood) -> CellType {
        if neighbors.humans == self.human.reproduce
            && neighbors.vampires <= self.human.fear_threshold
        {
            CellType::Human
        } else if neighbors.vampires == self.vampire.reproduce {
            CellType::Vampire
        } else {
            CellType::Empty
        }
    }
}

impl HumanRules {
    /// Vulnerability of a human of the given age, after wisdom and group modifiers.
    pub fn vulnerability(&self, age: u32, humans: u32) -> f32 {
        let mut vulnerability = self.base_vulnerability;
        if age > self.wisdom_age {
            vulnerability *= self.wisdom_resistance;
        }
        if humans >= self.defense_threshold {
            vulnerability *= self.group_resistance;
        }
        vulnerability
    }

    /// Deterministic conversion score compared against `convert_threshold`.
    pub fn conversion_chance(&self, age: u32, neighbors: Neighborhood) -> f32 {
        self.vulnerability(age, neighbors.humans) * neighbors.vampires as f32
    }

    fn next_type(&self, age: u32, neighbors: Neighborhood) -> CellType {
        if self.conversion_chance(age, neighbors) >= self.convert_threshold {
            CellType::Vampire
        } else if neighbors.humans < self.survive_min || neighbors.humans > self.survive_max {
            CellType::Empty
        } else {
            CellType::Human
        }
    }
}

impl VampireRules {
    /// Sunlight death chance for a vampire of the given age.
    ///
    /// Resistance grows linearly with age and caps at 1. A zero
    /// `age_resistance` makes every vampire fully resistant.
    pub fn sunlight_death_chance(&self, age: u32) -> f32 {
        // f32::min drops the NaN of 0/0, so zero age_resistance yields 1.
        let resistance = (age as f32 / self.age_resistance).min(1.0);
        self.sunlight_mortality * (1.0 - resistance)
    }

    fn next_type(&self, age: u32, hunger: u32, neighbors: Neighborhood, is_day: bool) -> CellType {
        let fed = neighbors.has_prey();

        if is_day && self.die_in_sunlight && !fed && self.sunlight_death_chance(age) > 0.5 {
            return CellType::Empty;
        }

        if hunger >= self.hunger_threshold && !fed {
            return CellType::Empty;
        }

        if neighbors.vampires < self.survive_min || neighbors.vampires > self.survive_max {
            CellType::Empty
        } else {
            CellType::Vampire
        }
    }
}
