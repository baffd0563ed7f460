//! Static pattern catalogs.
//!
//! Patterns are row-major: `pattern[y][x]`. Human patterns are the classic
//! Life still lifes, oscillators and gliders; the rest are small shapes
//! used by the scenarios.

use city_rules::CellType;
use serde::{Deserialize, Serialize};

/// A rectangular, row-major matrix of cell types.
pub type Pattern = &'static [&'static [CellType]];

const E: CellType = CellType::Empty;
const H: CellType = CellType::Human;
const V: CellType = CellType::Vampire;
const F: CellType = CellType::Forest;
const B: CellType = CellType::Bunker;

// Humans
pub const BLOCK: Pattern = &[&[H, H], &[H, H]];
pub const BEEHIVE: Pattern = &[&[E, H, H, E], &[H, E, E, H], &[E, H, H, E]];
pub const BLINKER: Pattern = &[&[H, H, H]];
pub const TOAD: Pattern = &[&[E, H, H, H], &[H, H, H, E]];
pub const GLIDER: Pattern = &[&[E, H, E], &[E, E, H], &[H, H, H]];
pub const HUMAN_VILLAGE: Pattern = &[
    &[E, H, H, E, E, H, H, E],
    &[H, E, E, H, H, E, E, H],
    &[E, H, H, E, E, H, H, E],
    &[E, E, E, E, E, E, E, E],
    &[H, H, E, E, E, E, H, H],
    &[H, H, E, E, E, E, H, H],
];

// Vampires
pub const SINGLE: Pattern = &[&[V]];
pub const PAIR: Pattern = &[&[V, V]];
pub const TRIANGLE: Pattern = &[&[V, E], &[V, V]];
pub const VAMPIRE_COVEN: Pattern = &[&[V, E, V], &[E, V, E], &[V, E, V]];

// Terrain
pub const FOREST_SMALL: Pattern = &[&[F, F], &[F, F]];
pub const FOREST_MEDIUM: Pattern = &[&[E, F, E], &[F, F, F], &[E, F, E]];
pub const FOREST_LARGE: Pattern = &[&[F, F, F], &[F, E, F], &[F, F, F]];
pub const BUNKER_SMALL: Pattern = &[&[B]];
pub const BUNKER_MEDIUM: Pattern = &[&[B, B], &[B, B]];
pub const BUNKER_LARGE: Pattern = &[&[E, B, E], &[B, B, B], &[E, B, E]];

/// A pattern with its catalog name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NamedPattern {
    pub name: &'static str,
    pub cells: Pattern,
}

const fn named(name: &'static str, cells: Pattern) -> NamedPattern {
    NamedPattern { name, cells }
}

pub const HUMAN_PATTERNS: &[NamedPattern] = &[
    named("block", BLOCK),
    named("beehive", BEEHIVE),
    named("blinker", BLINKER),
    named("toad", TOAD),
    named("glider", GLIDER),
    named("human_village", HUMAN_VILLAGE),
];

pub const VAMPIRE_PATTERNS: &[NamedPattern] = &[
    named("single", SINGLE),
    named("pair", PAIR),
    named("triangle", TRIANGLE),
    named("vampire_coven", VAMPIRE_COVEN),
];

pub const FOREST_PATTERNS: &[NamedPattern] = &[
    named("small", FOREST_SMALL),
    named("medium", FOREST_MEDIUM),
    named("large", FOREST_LARGE),
];

pub const BUNKER_PATTERNS: &[NamedPattern] = &[
    named("small", BUNKER_SMALL),
    named("medium", BUNKER_MEDIUM),
    named("large", BUNKER_LARGE),
];

/// The four pattern catalogs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PatternFamily {
    Human,
    Vampire,
    Forest,
    Bunker,
}

impl PatternFamily {
    pub fn patterns(self) -> &'static [NamedPattern] {
        match self {
            PatternFamily::Human => HUMAN_PATTERNS,
            PatternFamily::Vampire => VAMPIRE_PATTERNS,
            PatternFamily::Forest => FOREST_PATTERNS,
            PatternFamily::Bunker => BUNKER_PATTERNS,
        }
    }

    /// Look up a pattern by name within this family.
    pub fn find(self, name: &str) -> Option<Pattern> {
        self.patterns()
            .iter()
            .find(|pattern| pattern.name == name)
            .map(|pattern| pattern.cells)
    }
}

pub fn human_pattern(name: &str) -> Option<Pattern> {
    PatternFamily::Human.find(name)
}

pub fn vampire_pattern(name: &str) -> Option<Pattern> {
    PatternFamily::Vampire.find(name)
}

pub fn forest_pattern(name: &str) -> Option<Pattern> {
    PatternFamily::Forest.find(name)
}

pub fn bunker_pattern(name: &str) -> Option<Pattern> {
    PatternFamily::Bunker.find(name)
}

/// Width and height of a pattern; the width is that of the widest row.
pub fn pattern_size(pattern: &[&[CellType]]) -> (usize, usize) {
    let width = pattern.iter().map(|row| row.len()).max().unwrap_or(0);
    (width, pattern.len())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_by_family() {
        assert_eq!(human_pattern("glider"), Some(GLIDER));
        assert_eq!(vampire_pattern("pair"), Some(PAIR));
        assert_eq!(forest_pattern("large"), Some(FOREST_LARGE));
        assert_eq!(bunker_pattern("small"), Some(BUNKER_SMALL));
        assert_eq!(human_pattern("pair"), None);
    }

    #[test]
    fn test_patterns_are_rectangular() {
        for family in [
            PatternFamily::Human,
            PatternFamily::Vampire,
            PatternFamily::Forest,
            PatternFamily::Bunker,
        ] {
            for pattern in family.patterns() {
                let (width, _) = pattern_size(pattern.cells);
                assert!(
                    pattern.cells.iter().all(|row| row.len() == width),
                    "{} is ragged",
                    pattern.name
                );
            }
        }
    }

    #[test]
    fn test_families_hold_their_type() {
        let holds_only = |family: PatternFamily, cell_type: CellType| {
            family.patterns().iter().all(|pattern| {
                pattern
                    .cells
                    .iter()
                    .flat_map(|row| row.iter())
                    .all(|&cell| cell == cell_type || cell == CellType::Empty)
            })
        };
        assert!(holds_only(PatternFamily::Human, CellType::Human));
        assert!(holds_only(PatternFamily::Vampire, CellType::Vampire));
        assert!(holds_only(PatternFamily::Forest, CellType::Forest));
        assert!(holds_only(PatternFamily::Bunker, CellType::Bunker));
    }

    #[test]
    fn test_village_size() {
        assert_eq!(pattern_size(HUMAN_VILLAGE), (8, 6));
    }
}
