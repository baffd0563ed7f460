//! Simulation - owns the grid, rules, clock and random source, and runs
//! generations.
//!
//! A generation runs in two passes:
//! 1. **Stage**: every cell's next type is decided from the untouched
//!    current grid, so no decision sees another cell's new type
//! 2. **Commit**: staged types are applied and age and hunger updated
//!
//! The simulation does no pacing. The host calls [`Simulation::advance`]
//! and [`Simulation::step`] at whatever cadence it likes.

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::config::CityConfig;
use crate::entities::CellType;
use crate::error::Result;
use crate::mechanics::{Phase, RuleSet};
use crate::world_state::{
    DayNightClock, Grid, PopulationRatios, PopulationStats, Snapshot, SnapshotId, SnapshotMetadata,
};

/// Aggregate numbers for display.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationStats {
    pub generation: u64,
    pub phase: Phase,
    pub population: PopulationStats,
    /// Mean hunger over living vampires, 0.0 when there are none.
    pub average_hunger: f32,
}

/// A single simulation session.
#[derive(Debug, Clone)]
pub struct Simulation {
    grid: Grid,
    rules: RuleSet,
    clock: DayNightClock,
    rng: ChaCha8Rng,
    generation: u64,
}

impl Simulation {
    /// Create a simulation from explicit parts.
    pub fn new(grid: Grid, rules: RuleSet, clock: DayNightClock, seed: u64) -> Self {
        Self {
            grid,
            rules,
            clock,
            rng: ChaCha8Rng::seed_from_u64(seed),
            generation: 0,
        }
    }

    /// Build a randomly populated simulation from configuration.
    ///
    /// # Errors
    ///
    /// Returns [`crate::CityError::InvalidConfig`] if the configuration
    /// fails validation.
    pub fn from_config(config: &CityConfig) -> Result<Self> {
        config.validate()?;
        let grid = Grid::new(config.grid.width, config.grid.height)?;
        let clock = DayNightClock::new(config.clock.day_duration);
        let mut simulation = Self::new(grid, config.rules.clone(), clock, config.simulation.seed);
        simulation.randomize(&config.population);
        info!(
            width = config.grid.width,
            height = config.grid.height,
            seed = config.simulation.seed,
            "simulation created"
        );
        Ok(simulation)
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Mutable grid access for editing between steps.
    pub fn grid_mut(&mut self) -> &mut Grid {
        &mut self.grid
    }

    pub fn rules(&self) -> &RuleSet {
        &self.rules
    }

    /// Replace the rule set. Applies from the next step.
    pub fn set_rules(&mut self, rules: RuleSet) {
        self.rules = rules;
    }

    pub fn clock(&self) -> &DayNightClock {
        &self.clock
    }

    pub fn clock_mut(&mut self) -> &mut DayNightClock {
        &mut self.clock
    }

    pub fn is_day(&self) -> bool {
        self.clock.is_day()
    }

    pub fn phase(&self) -> Phase {
        self.clock.phase()
    }

    /// Generations stepped so far.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Grid and random source together, for helpers that need both.
    pub fn grid_and_rng_mut(&mut self) -> (&mut Grid, &mut ChaCha8Rng) {
        (&mut self.grid, &mut self.rng)
    }

    /// Advance the day/night clock; returns true when the phase flipped.
    pub fn advance(&mut self, dt: f32) -> bool {
        let flipped = self.clock.advance(dt);
        if flipped {
            info!(phase = %self.clock.phase(), generation = self.generation, "phase changed");
        }
        flipped
    }

    /// Hunger of the cell at the (wrapped) position.
    pub fn hunger(&self, x: isize, y: isize) -> u32 {
        self.grid.get_cell(x, y).hunger
    }

    /// Empty the grid and restart the generation count.
    pub fn reset(&mut self) {
        self.grid.reset();
        self.generation = 0;
    }

    /// Reset and randomly populate the grid from the simulation's RNG.
    pub fn randomize(&mut self, ratios: &PopulationRatios) {
        self.grid.random_populate(ratios, &mut self.rng);
        self.generation = 0;
        debug!(
            humans = self.grid.count_type(CellType::Human),
            vampires = self.grid.count_type(CellType::Vampire),
            "grid randomized"
        );
    }

    /// Run one full generation.
    pub fn step(&mut self) {
        let is_day = self.clock.is_day();
        let rules = self.rules.for_phase(self.clock.phase());

        let mut staged = Vec::with_capacity(self.grid.cell_count());
        // Whether each cell had a human neighbour before the step.
        let mut fed = Vec::with_capacity(self.grid.cell_count());
        for ((x, y), cell) in self.grid.iter() {
            let neighbors = self.grid.neighborhood(x as isize, y as isize);
            staged.push(rules.next_type(cell, neighbors, is_day));
            fed.push(neighbors.has_prey());
        }

        let cells = self.grid.cells_mut();
        for (cell, next_type) in cells.iter_mut().zip(staged) {
            cell.stage(next_type);
        }
        for (cell, fed) in cells.iter_mut().zip(fed) {
            cell.commit(fed);
        }

        self.generation += 1;
        debug!(
            generation = self.generation,
            phase = %Phase::from_is_day(is_day),
            humans = self.grid.count_type(CellType::Human),
            vampires = self.grid.count_type(CellType::Vampire),
            "generation stepped"
        );
    }

    /// Population plus generation, phase and hunger figures.
    pub fn statistics(&self) -> SimulationStats {
        let population = self.grid.population_stats();
        let hungers: Vec<u32> = self
            .grid
            .iter()
            .filter(|(_, cell)| cell.is_vampire())
            .map(|(_, cell)| cell.hunger)
            .collect();
        let average_hunger = if hungers.is_empty() {
            0.0
        } else {
            hungers.iter().map(|&h| h as f64).sum::<f64>() as f32 / hungers.len() as f32
        };

        SimulationStats {
            generation: self.generation,
            phase: self.phase(),
            population,
            average_hunger,
        }
    }

    /// Capture grid, clock and hunger state.
    pub fn snapshot(&self) -> Snapshot {
        let vampire_hunger = (0..self.grid.width())
            .map(|x| {
                (0..self.grid.height())
                    .map(|y| self.grid.get_cell(x as isize, y as isize).hunger)
                    .collect()
            })
            .collect();

        Snapshot {
            grid_state: self.grid.serialize(),
            is_day: self.clock.is_day(),
            day_time: self.clock.elapsed(),
            vampire_hunger: Some(vampire_hunger),
            metadata: Some(SnapshotMetadata {
                id: Some(SnapshotId::new()),
                generation: self.generation,
                statistics: self.grid.population_stats().summary(),
            }),
        }
    }

    /// Restore state from a snapshot.
    ///
    /// The grid is loaded over the overlapping region only, with ages reset.
    /// Vampires get their stored hunger (0 when the snapshot has none); every
    /// other cell gets 0. The clock keeps its current day duration; a stored
    /// phase time outside it restarts the stored phase.
    pub fn restore(&mut self, snapshot: &Snapshot) {
        if snapshot.width() != self.grid.width() || snapshot.height() != self.grid.height() {
            warn!(
                stored_width = snapshot.width(),
                stored_height = snapshot.height(),
                width = self.grid.width(),
                height = self.grid.height(),
                "snapshot size differs from grid, loading overlap only"
            );
        }

        self.grid.load_from_serialized(&snapshot.grid_state);

        let width = self.grid.width();
        for (index, cell) in self.grid.cells_mut().iter_mut().enumerate() {
            let (x, y) = (index % width, index / width);
            cell.hunger = if cell.is_vampire() {
                snapshot.hunger_at(x, y)
            } else {
                0
            };
        }

        self.clock = DayNightClock::from_parts(
            snapshot.day_time,
            snapshot.is_day,
            self.clock.day_duration(),
        );
        self.generation = snapshot.metadata.as_ref().map_or(0, |m| m.generation);

        info!(
            is_day = snapshot.is_day,
            generation = self.generation,
            hunger_restored = snapshot.vampire_hunger.is_some(),
            "snapshot restored"
        );
    }
}
