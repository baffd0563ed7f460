//! # City Scenarios
//!
//! Named patterns and composite scenarios for seeding a `city_rules` grid,
//! plus the balancing and mutation events a host may fire between steps.
//!
//! ## Core Components
//!
//! - **patterns**: Static catalogs of human, vampire, forest and bunker patterns
//! - **scenarios**: Composite scenarios and the library that stamps them
//! - **events**: Population balance checks, random clusters and mutations
//!
//! Everything here edits the grid directly and never steps the simulation.

pub mod error;
pub mod events;
pub mod patterns;
pub mod scenarios;

pub use error::*;
pub use events::*;
pub use patterns::*;
pub use scenarios::*;
