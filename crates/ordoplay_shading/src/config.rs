// SPDX-License-Identifier: MIT OR Apache-2.0
//! Resolver configuration.
//!
//! Settings load from RON, for example:
//!
//! ```ron
//! (
//!     max_connection_depth: 64,
//!     fallback_to_all_purpose: false,
//! )
//! ```
//!
//! Missing fields take their defaults.

use serde::{Deserialize, Serialize};

/// Default bound on connection hops
pub const DEFAULT_MAX_CONNECTION_DEPTH: usize = 256;

/// Settings shared by the shading resolvers
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShadingConfig {
    /// Maximum number of connections followed before giving up
    pub max_connection_depth: usize,
    /// Whether a purpose-specific binding query falls back to the
    /// all-purpose channel when nothing is bound for that purpose
    pub fallback_to_all_purpose: bool,
}

impl Default for ShadingConfig {
    fn default() -> Self {
        Self {
            max_connection_depth: DEFAULT_MAX_CONNECTION_DEPTH,
            fallback_to_all_purpose: true,
        }
    }
}

impl ShadingConfig {
    /// Set the connection hop limit
    pub fn with_max_connection_depth(mut self, depth: usize) -> Self {
        self.max_connection_depth = depth;
        self
    }

    /// Load settings from RON text
    pub fn from_ron(text: &str) -> Result<Self, ConfigError> {
        let config: Self = ron::from_str(text).map_err(|e| ConfigError::Parse(e.to_string()))?;
        if config.max_connection_depth == 0 {
            return Err(ConfigError::ZeroDepth);
        }
        Ok(config)
    }

    /// Serialize settings to RON
    pub fn to_ron(&self) -> Result<String, ConfigError> {
        ron::ser::to_string_pretty(self, ron::ser::PrettyConfig::default())
            .map_err(|e| ConfigError::Serialize(e.to_string()))
    }
}

/// Error when loading or saving configuration
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    /// RON parse failure
    #[error("Failed to parse shading config: {0}")]
    Parse(String),

    /// RON serialization failure
    #[error("Failed to serialize shading config: {0}")]
    Serialize(String),

    /// A zero hop limit would reject every connection
    #[error("max_connection_depth must be at least 1")]
    ZeroDepth,
}
