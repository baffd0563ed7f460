//! Simulation mechanics: phases, rule sets and cell transitions.

mod rules;
mod transition;

pub use rules::*;
pub use transition::*;

use serde::{Deserialize, Serialize};

/// Day/night phase selecting the active rule bundle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Phase {
    #[default]
    Day,
    Night,
}

impl Phase {
    pub fn from_is_day(is_day: bool) -> Self {
        if is_day {
            Phase::Day
        } else {
            Phase::Night
        }
    }

    pub fn is_day(self) -> bool {
        self == Phase::Day
    }

    /// The other phase.
    pub fn flipped(self) -> Self {
        match self {
            Phase::Day => Phase::Night,
            Phase::Night => Phase::Day,
        }
    }
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Phase::Day => f.write_str("day"),
            Phase::Night => f.write_str("night"),
        }
    }
}
