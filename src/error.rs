//! Error types for hex planet construction

use std::fmt;

/// Errors that can occur during planet construction or queries
#[derive(Debug, Clone)]
pub enum HexPlanetError {
    /// Configuration validation failed
    InvalidConfig(String),
    /// Construction failed due to geometry issues
    ConstructionFailed(String),
}

impl fmt::Display for HexPlanetError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HexPlanetError::InvalidConfig(msg) => write!(f, "invalid configuration: {}", msg),
            HexPlanetError::ConstructionFailed(msg) => write!(f, "construction failed: {}", msg),
        }
    }
}

impl std::error::Error for HexPlanetError {}

/// Result type alias for hexplanet operations
pub type Result<T> = std::result::Result<T, HexPlanetError>;
