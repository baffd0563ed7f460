//! Scenarios applied to grids and run through a simulation.

use city_rules::{CellType, DayNightClock, Grid, RuleSet, Simulation};
use city_scenarios::{
    introduce_mutation, is_extinct, is_stagnant, ScenarioError, ScenarioLibrary,
    DEFAULT_STAGNATION_THRESHOLD,
};

#[test]
fn every_scenario_is_idempotent() {
    let library = ScenarioLibrary::with_defaults();

    for name in library.scenario_names() {
        let mut grid = Grid::new(50, 40).unwrap();
        library.apply_scenario(&mut grid, name).unwrap();
        let first = grid.serialize();

        library.apply_scenario(&mut grid, name).unwrap();
        assert_eq!(grid.serialize(), first, "{name} changed on reapply");
        assert!(grid.count_type(CellType::Human) > 0, "{name} has no humans");
    }
}

#[test]
fn unknown_scenario_is_reported_without_mutation() {
    let library = ScenarioLibrary::with_defaults();
    let mut grid = Grid::new(20, 20).unwrap();
    library.apply_scenario(&mut grid, "surrounded").unwrap();
    let before = grid.serialize();

    let err = library.apply_scenario(&mut grid, "midnight_feast").unwrap_err();

    assert_eq!(err, ScenarioError::UnknownScenario("midnight_feast".into()));
    assert_eq!(err.to_string(), "unknown scenario: midnight_feast");
    assert_eq!(grid.serialize(), before);
}

#[test]
fn scenarios_wrap_on_small_grids() {
    // Apocalypse reaches x = 37; on a 20-wide grid it wraps instead of failing.
    let mut grid = Grid::new(20, 20).unwrap();
    ScenarioLibrary::with_defaults()
        .apply_scenario(&mut grid, "apocalypse")
        .unwrap();

    assert!(grid.count_type(CellType::Vampire) > 0);
}

#[test]
fn village_raid_runs_reproducibly() {
    let run = || {
        let mut grid = Grid::new(40, 30).unwrap();
        ScenarioLibrary::with_defaults()
            .apply_scenario(&mut grid, "village_raid")
            .unwrap();
        let mut simulation = Simulation::new(grid, RuleSet::default(), DayNightClock::new(2.0), 5);

        let mut previous: Option<Vec<Vec<CellType>>> = None;
        for _ in 0..30 {
            simulation.advance(0.5);
            simulation.step();
            if simulation.generation() % 10 == 0 {
                let (grid, rng) = simulation.grid_and_rng_mut();
                introduce_mutation(grid, rng);
            }
            let stagnant = is_stagnant(
                simulation.grid(),
                previous.as_deref(),
                DEFAULT_STAGNATION_THRESHOLD,
            );
            if stagnant && is_extinct(simulation.grid(), CellType::Vampire) {
                break;
            }
            previous = Some(simulation.grid().serialize());
        }
        (simulation.generation(), simulation.grid().serialize())
    };

    assert_eq!(run(), run());
}
