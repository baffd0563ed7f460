//! Error types for the `city_scenarios` crate.

/// Errors that can occur when applying scenarios.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ScenarioError {
    /// No scenario with this name exists in the library.
    #[error("unknown scenario: {0}")]
    UnknownScenario(String),
}

/// Result alias for fallible operations in this crate.
pub type Result<T> = std::result::Result<T, ScenarioError>;
