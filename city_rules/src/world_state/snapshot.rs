//! Serializable simulation snapshots.
//!
//! The layout follows the legacy save files: `grid_state` and
//! `vampire_hunger` are column-major matrices indexed `[x][y]`, and the
//! hunger matrix is absent in older saves.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::PopulationSummary;
use crate::entities::CellType;
use crate::error::Result;

/// Unique identifier for snapshots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SnapshotId(pub Uuid);

impl SnapshotId {
    /// Create a new random snapshot ID.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for SnapshotId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for SnapshotId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Descriptive data stored next to the state. Not needed to restore.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SnapshotMetadata {
    pub id: Option<SnapshotId>,
    /// Generations stepped before the snapshot was taken.
    pub generation: u64,
    pub statistics: PopulationSummary,
}

/// Everything needed to resume a simulation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub grid_state: Vec<Vec<CellType>>,
    pub is_day: bool,
    /// Seconds elapsed in the current phase.
    pub day_time: f32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vampire_hunger: Option<Vec<Vec<u32>>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<SnapshotMetadata>,
}

impl Snapshot {
    /// Width of the stored grid (number of columns).
    pub fn width(&self) -> usize {
        self.grid_state.len()
    }

    /// Height of the stored grid, taken from the first column.
    pub fn height(&self) -> usize {
        self.grid_state.first().map_or(0, Vec::len)
    }

    /// Stored hunger at a column-major position; 0 when absent or out of range.
    pub fn hunger_at(&self, x: usize, y: usize) -> u32 {
        self.vampire_hunger
            .as_ref()
            .and_then(|columns| columns.get(x))
            .and_then(|column| column.get(y))
            .copied()
            .unwrap_or(0)
    }

    /// Encode as JSON.
    ///
    /// # Errors
    ///
    /// Returns [`crate::CityError::Snapshot`] if encoding fails.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Decode from JSON. Unknown fields are ignored.
    ///
    /// # Errors
    ///
    /// Returns [`crate::CityError::Snapshot`] for malformed JSON or unknown
    /// cell type codes.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}
