//! Error types for the `city_rules` crate.

/// Errors that can occur while building or restoring simulation state.
#[derive(Debug, thiserror::Error)]
pub enum CityError {
    /// A grid must have at least one row and one column.
    #[error("invalid grid dimensions {width}x{height}")]
    InvalidDimensions {
        /// Requested width.
        width: usize,
        /// Requested height.
        height: usize,
    },

    /// Failed to parse configuration TOML.
    #[error("failed to parse config TOML: {source}")]
    ConfigParse {
        /// The underlying TOML error.
        #[from]
        source: toml::de::Error,
    },

    /// Configuration parsed but holds values the engine cannot run with.
    #[error("invalid configuration: {reason}")]
    InvalidConfig {
        /// Explanation of what is wrong with the configuration.
        reason: String,
    },

    /// Failed to encode or decode a snapshot.
    #[error("snapshot serialization failed: {source}")]
    Snapshot {
        /// The underlying JSON error.
        #[from]
        source: serde_json::Error,
    },
}

/// Result alias for fallible operations in this crate.
pub type Result<T> = std::result::Result<T, CityError>;
