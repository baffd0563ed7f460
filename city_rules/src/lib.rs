//! # City Rules
//!
//! The rules engine of Vampire City - cell definitions, the toroidal grid,
//! day/night rule sets and the generation step. This crate is the single
//! source of truth for simulation state and contains no rendering, input or
//! storage code.
//!
//! ## Core Components
//!
//! - **entities**: Cell types and per-slot metadata (age, hunger)
//! - **mechanics**: Phase-dependent rule sets and the per-cell transition function
//! - **world_state**: The toroidal grid, the day/night clock and snapshots
//! - **simulation**: Two-phase (stage then commit) generation step
//! - **config**: Typed configuration parsed from TOML text

pub mod config;
pub mod entities;
pub mod error;
pub mod mechanics;
pub mod simulation;
pub mod world_state;

pub use config::*;
pub use entities::*;
pub use error::*;
pub use mechanics::*;
pub use simulation::*;
pub use world_state::*;
