//! Scenario Library - composite starting layouts built from the pattern catalogs.
//!
//! Applying a scenario:
//! 1. **Lookup**: find the scenario by name; unknown names leave the grid alone
//! 2. **Reset**: clear the whole grid
//! 3. **Stamp**: write each placement in list order, so later ones win on overlap

use city_rules::{CellType, Grid};
use tracing::{info, warn};

use crate::error::{Result, ScenarioError};
use crate::patterns::{
    Pattern, BEEHIVE, BLOCK, BUNKER_MEDIUM, BUNKER_SMALL, FOREST_MEDIUM, GLIDER, HUMAN_VILLAGE,
    PAIR, SINGLE, TRIANGLE, VAMPIRE_COVEN,
};

const E: CellType = CellType::Empty;
const H: CellType = CellType::Human;
const V: CellType = CellType::Vampire;

const HUMAN_SQUARE: Pattern = &[
    &[H, H, H, H, H],
    &[H, H, H, H, H],
    &[H, H, H, H, H],
    &[H, H, H, H, H],
    &[H, H, H, H, H],
];

const VAMPIRE_HORDE: Pattern = &[
    &[V, E, V, E, V, E, V],
    &[E, V, E, V, E, V, E],
    &[V, E, V, E, V, E, V],
    &[E, V, E, V, E, V, E],
];

/// A pattern stamped with its top-left corner at `(x, y)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Placement {
    pub pattern: Pattern,
    pub x: isize,
    pub y: isize,
}

const fn at(pattern: Pattern, x: isize, y: isize) -> Placement {
    Placement { pattern, x, y }
}

/// A named starting layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Scenario {
    pub name: &'static str,
    pub description: &'static str,
    pub placements: &'static [Placement],
}

impl Scenario {
    /// Clear the grid and stamp every placement.
    pub fn apply(&self, grid: &mut Grid) {
        grid.reset();
        for placement in self.placements {
            grid.add_pattern(placement.pattern, placement.x, placement.y);
        }
    }
}

/// Built-in scenarios, in catalog order.
pub const SCENARIOS: &[Scenario] = &[
    Scenario {
        name: "village_raid",
        description: "A vampire raid on a human village",
        placements: &[at(HUMAN_VILLAGE, 10, 10), at(PAIR, 10, 5), at(PAIR, 15, 5)],
    },
    Scenario {
        name: "forest_encounter",
        description: "Humans near a vampire spawning forest",
        placements: &[
            at(FOREST_MEDIUM, 10, 10),
            at(BLOCK, 15, 15),
            at(BUNKER_SMALL, 20, 20),
        ],
    },
    Scenario {
        name: "bunker_defense",
        description: "Humans defending a bunker from vampires",
        placements: &[
            at(BUNKER_MEDIUM, 15, 15),
            at(BLOCK, 15, 14),
            at(BLOCK, 16, 16),
            at(TRIANGLE, 12, 12),
            at(TRIANGLE, 18, 12),
        ],
    },
    Scenario {
        name: "surrounded",
        description: "A group of humans surrounded by vampires",
        placements: &[
            at(BLOCK, 10, 10),
            at(SINGLE, 8, 8),
            at(SINGLE, 12, 8),
            at(SINGLE, 8, 12),
            at(SINGLE, 12, 12),
        ],
    },
    Scenario {
        name: "vampire_attack",
        description: "Two vampire covens attacking human gliders",
        placements: &[
            at(GLIDER, 5, 5),
            at(GLIDER, 15, 5),
            at(GLIDER, 25, 5),
            at(VAMPIRE_COVEN, 10, 15),
            at(VAMPIRE_COVEN, 20, 15),
        ],
    },
    Scenario {
        name: "sanctuary",
        description: "Humans in a protective formation against vampires",
        placements: &[
            at(HUMAN_SQUARE, 10, 10),
            at(TRIANGLE, 8, 8),
            at(TRIANGLE, 16, 8),
            at(TRIANGLE, 8, 16),
            at(TRIANGLE, 16, 16),
        ],
    },
    Scenario {
        name: "apocalypse",
        description: "Vampires everywhere with small pockets of human resistance",
        placements: &[
            at(BEEHIVE, 10, 10),
            at(BEEHIVE, 20, 20),
            at(BEEHIVE, 30, 15),
            at(VAMPIRE_HORDE, 5, 5),
            at(VAMPIRE_COVEN, 25, 5),
            at(VAMPIRE_COVEN, 15, 25),
            at(VAMPIRE_COVEN, 35, 25),
        ],
    },
];

/// Looks up scenarios by name and stamps them onto grids.
#[derive(Debug, Clone)]
pub struct ScenarioLibrary {
    scenarios: Vec<Scenario>,
}

impl ScenarioLibrary {
    /// Create a library over the given scenarios.
    pub fn new(scenarios: Vec<Scenario>) -> Self {
        Self { scenarios }
    }

    /// Create a library holding the built-in scenarios.
    pub fn with_defaults() -> Self {
        Self::new(SCENARIOS.to_vec())
    }

    pub fn get(&self, name: &str) -> Option<&Scenario> {
        self.scenarios.iter().find(|scenario| scenario.name == name)
    }

    /// Scenario names in catalog order.
    pub fn scenario_names(&self) -> Vec<&'static str> {
        self.scenarios.iter().map(|scenario| scenario.name).collect()
    }

    pub fn scenario_description(&self, name: &str) -> Option<&'static str> {
        self.get(name).map(|scenario| scenario.description)
    }

    /// Reset the grid and stamp the named scenario onto it.
    ///
    /// # Errors
    ///
    /// Returns [`ScenarioError::UnknownScenario`] if no scenario has this
    /// name; the grid is not touched in that case.
    pub fn apply_scenario(&self, grid: &mut Grid, name: &str) -> Result<()> {
        let Some(scenario) = self.get(name) else {
            warn!(scenario = name, "unknown scenario");
            return Err(ScenarioError::UnknownScenario(name.to_string()));
        };

        scenario.apply(grid);
        info!(
            scenario = name,
            humans = grid.count_type(CellType::Human),
            vampires = grid.count_type(CellType::Vampire),
            "scenario applied"
        );
        Ok(())
    }
}

impl Default for ScenarioLibrary {
    fn default() -> Self {
        Self::with_defaults()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_order() {
        let library = ScenarioLibrary::with_defaults();
        assert_eq!(
            library.scenario_names(),
            vec![
                "village_raid",
                "forest_encounter",
                "bunker_defense",
                "surrounded",
                "vampire_attack",
                "sanctuary",
                "apocalypse",
            ]
        );
        assert_eq!(
            library.scenario_description("surrounded"),
            Some("A group of humans surrounded by vampires")
        );
        assert_eq!(library.scenario_description("nowhere"), None);
    }

    #[test]
    fn test_surrounded_layout() {
        let mut grid = Grid::new(30, 30).unwrap();
        grid.set_cell(0, 0, CellType::Forest);

        ScenarioLibrary::with_defaults()
            .apply_scenario(&mut grid, "surrounded")
            .unwrap();

        assert_eq!(grid.get_cell(0, 0).cell_type, CellType::Empty);
        assert_eq!(grid.count_type(CellType::Human), 4);
        assert_eq!(grid.count_type(CellType::Vampire), 4);
        for (x, y) in [(10, 10), (11, 10), (10, 11), (11, 11)] {
            assert_eq!(grid.get_cell(x, y).cell_type, CellType::Human);
        }
        for (x, y) in [(8, 8), (12, 8), (8, 12), (12, 12)] {
            assert_eq!(grid.get_cell(x, y).cell_type, CellType::Vampire);
        }
    }

    #[test]
    fn test_later_placements_overwrite() {
        // The blocks cover three of the four bunker cells.
        let mut grid = Grid::new(40, 40).unwrap();
        ScenarioLibrary::with_defaults()
            .apply_scenario(&mut grid, "bunker_defense")
            .unwrap();

        assert_eq!(grid.get_cell(16, 16).cell_type, CellType::Human);
        assert_eq!(grid.get_cell(15, 14).cell_type, CellType::Human);
        assert_eq!(grid.get_cell(15, 15).cell_type, CellType::Human);
        assert_eq!(grid.get_cell(16, 15).cell_type, CellType::Human);
        assert_eq!(grid.get_cell(15, 16).cell_type, CellType::Bunker);
        assert_eq!(grid.count_type(CellType::Bunker), 1);
    }

    #[test]
    fn test_unknown_scenario_leaves_grid() {
        let mut grid = Grid::new(10, 10).unwrap();
        grid.set_cell(3, 4, CellType::Human);
        let before = grid.serialize();

        let result = ScenarioLibrary::with_defaults().apply_scenario(&mut grid, "nowhere");

        assert_eq!(result, Err(ScenarioError::UnknownScenario("nowhere".into())));
        assert_eq!(grid.serialize(), before);
    }

    #[test]
    fn test_custom_library() {
        let library = ScenarioLibrary::new(vec![Scenario {
            name: "lone",
            description: "One vampire",
            placements: &[Placement {
                pattern: SINGLE,
                x: -1,
                y: -1,
            }],
        }]);
        let mut grid = Grid::new(5, 5).unwrap();
        library.apply_scenario(&mut grid, "lone").unwrap();

        assert_eq!(grid.get_cell(4, 4).cell_type, CellType::Vampire);
        assert!(library.apply_scenario(&mut grid, "village_raid").is_err());
    }
}
