//! Events a host may fire between steps to keep a run interesting.
//!
//! None of these are called by the simulation itself. They edit the grid in
//! place using the caller's random source, so a seeded source replays them.

use std::fmt;

use city_rules::{CellType, Grid, PopulationStats};
use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

/// Share of cells that must match the previous state for a run to count as stagnant.
pub const DEFAULT_STAGNATION_THRESHOLD: f32 = 0.98;

/// Build a row-major cluster with random width and height in
/// `min_size..=max_size`, denser towards the centre.
///
/// Each slot holds `cell_type` with probability `0.9 - 0.8 * d`, where `d`
/// is the distance to the centre over the half-diagonal.
pub fn random_cluster<R: Rng>(
    rng: &mut R,
    cell_type: CellType,
    min_size: usize,
    max_size: usize,
) -> Vec<Vec<CellType>> {
    let max_size = max_size.max(min_size);
    let width = rng.gen_range(min_size..=max_size);
    let height = rng.gen_range(min_size..=max_size);

    let (center_x, center_y) = ((width / 2) as f32, (height / 2) as f32);
    let max_distance = center_x.hypot(center_y);

    (0..height)
        .map(|y| {
            (0..width)
                .map(|x| {
                    let distance = if max_distance > 0.0 {
                        (x as f32 - center_x).hypot(y as f32 - center_y) / max_distance
                    } else {
                        0.0
                    };
                    if rng.gen::<f32>() < 0.9 - 0.8 * distance {
                        cell_type
                    } else {
                        CellType::Empty
                    }
                })
                .collect()
        })
        .collect()
}

/// Humans over humans plus vampires; 0.5 when neither exists.
pub fn population_balance(stats: &PopulationStats) -> f32 {
    let humans = stats.human_count();
    let total = humans + stats.vampire_count();
    if total == 0 {
        return 0.5;
    }
    humans as f32 / total as f32
}

/// The species holding more than 70% of the living population, if any.
pub fn dominant_species(stats: &PopulationStats) -> Option<CellType> {
    let balance = population_balance(stats);
    if balance > 0.7 {
        Some(CellType::Human)
    } else if balance < 0.3 {
        Some(CellType::Vampire)
    } else {
        None
    }
}

/// Stamp a cluster at a random offset that keeps it inside the grid when it fits.
fn place_cluster<R: Rng>(
    grid: &mut Grid,
    cluster: &[Vec<CellType>],
    rng: &mut R,
) -> (isize, isize) {
    let cluster_width = cluster.first().map_or(0, Vec::len);
    let x = rng.gen_range(0..=grid.width().saturating_sub(cluster_width)) as isize;
    let y = rng.gen_range(0..=grid.height().saturating_sub(cluster.len())) as isize;
    grid.add_pattern(cluster, x, y);
    (x, y)
}

/// Stamp clusters of the weaker species when one side dominates.
///
/// Returns whether anything was stamped.
pub fn balancing_event<R: Rng>(grid: &mut Grid, rng: &mut R) -> bool {
    let (cell_type, clusters, min_size, max_size) =
        match dominant_species(&grid.population_stats()) {
            Some(CellType::Human) => (CellType::Vampire, rng.gen_range(1..=3), 2, 5),
            Some(CellType::Vampire) => (CellType::Human, rng.gen_range(1..=2), 4, 8),
            _ => return false,
        };

    for _ in 0..clusters {
        let cluster = random_cluster(rng, cell_type, min_size, max_size);
        place_cluster(grid, &cluster, rng);
    }
    info!(species = %cell_type, clusters, "balancing event");
    true
}

pub fn is_extinct(grid: &Grid, cell_type: CellType) -> bool {
    grid.count_type(cell_type) == 0
}

/// Whether at least `threshold` of the grid matches a previous column-major state.
///
/// Positions outside `previous` count as changed. Without a previous state
/// nothing is stagnant.
pub fn is_stagnant(grid: &Grid, previous: Option<&[Vec<CellType>]>, threshold: f32) -> bool {
    let Some(previous) = previous else {
        return false;
    };

    let unchanged = grid
        .iter()
        .filter(|((x, y), cell)| {
            previous
                .get(*x)
                .and_then(|column| column.get(*y))
                .is_some_and(|&cell_type| cell_type == cell.cell_type)
        })
        .count();

    unchanged as f32 / grid.cell_count() as f32 >= threshold
}

/// The kind of change [`introduce_mutation`] made.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MutationKind {
    /// A cluster of seasoned vampires.
    VampireCluster,
    /// A cluster of wise humans.
    HumanSanctuary,
    /// Some existing vampires age.
    VampireEvolution,
    /// Some existing humans age.
    HumanAdaptation,
}

impl MutationKind {
    pub const ALL: [MutationKind; 4] = [
        MutationKind::VampireCluster,
        MutationKind::HumanSanctuary,
        MutationKind::VampireEvolution,
        MutationKind::HumanAdaptation,
    ];
}

impl fmt::Display for MutationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            MutationKind::VampireCluster => "vampire_cluster",
            MutationKind::HumanSanctuary => "human_sanctuary",
            MutationKind::VampireEvolution => "vampire_evolution",
            MutationKind::HumanAdaptation => "human_adaptation",
        };
        f.write_str(name)
    }
}

/// Apply one mutation chosen uniformly at random and return which.
pub fn introduce_mutation<R: Rng>(grid: &mut Grid, rng: &mut R) -> MutationKind {
    let kind = MutationKind::ALL[rng.gen_range(0..MutationKind::ALL.len())];

    match kind {
        MutationKind::VampireCluster => {
            stamp_aged_cluster(grid, rng, CellType::Vampire, (2, 4), (15, 25))
        }
        MutationKind::HumanSanctuary => {
            stamp_aged_cluster(grid, rng, CellType::Human, (3, 6), (8, 15))
        }
        MutationKind::VampireEvolution => age_subset(grid, rng, CellType::Vampire, 10, (5, 10)),
        MutationKind::HumanAdaptation => age_subset(grid, rng, CellType::Human, 15, (3, 8)),
    }

    debug!(mutation = %kind, "mutation introduced");
    kind
}

fn stamp_aged_cluster<R: Rng>(
    grid: &mut Grid,
    rng: &mut R,
    cell_type: CellType,
    (min_size, max_size): (usize, usize),
    (min_age, max_age): (u32, u32),
) {
    let cluster = random_cluster(rng, cell_type, min_size, max_size);
    let (x, y) = place_cluster(grid, &cluster, rng);

    for (dy, row) in cluster.iter().enumerate() {
        for (dx, &slot) in row.iter().enumerate() {
            if slot == cell_type {
                grid.get_cell_mut(x + dx as isize, y + dy as isize).age =
                    rng.gen_range(min_age..=max_age);
            }
        }
    }
}

/// Age a random quarter of the given species, capped at `cap` cells.
fn age_subset<R: Rng>(
    grid: &mut Grid,
    rng: &mut R,
    cell_type: CellType,
    cap: usize,
    (min_age, max_age): (u32, u32),
) {
    let cells = grid.cells_of_type(cell_type);
    let amount = (cells.len() / 4).min(cap);
    let chosen: Vec<(usize, usize)> = cells.choose_multiple(rng, amount).copied().collect();

    for (x, y) in chosen {
        let cell = grid.get_cell_mut(x as isize, y as isize);
        cell.age = cell.age.saturating_add(rng.gen_range(min_age..=max_age));
    }
}
