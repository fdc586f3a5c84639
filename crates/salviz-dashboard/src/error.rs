//! Error types for configuration and pipeline assembly

use salviz_flow::FlowError;
use salviz_model::LoadError;
use std::path::PathBuf;

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The configuration file could not be read
    #[error("failed to read config {path}: {source}")]
    Read {
        /// Path that was opened
        path: PathBuf,
        /// Underlying I/O error
        source: std::io::Error,
    },

    /// The configuration is not valid TOML for this schema
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    /// Parsed but unusable settings
    #[error("invalid config: {0}")]
    Invalid(#[from] FlowError),
}

/// Dashboard pipeline errors
#[derive(Debug, thiserror::Error)]
pub enum DashboardError {
    /// Input could not be loaded
    #[error(transparent)]
    Load(#[from] LoadError),

    /// Configuration problem
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Flow graph or layout failure
    #[error(transparent)]
    Flow(#[from] FlowError),

    /// Renderer contract could not be serialized
    #[error("failed to serialize dashboard: {0}")]
    Export(#[from] serde_json::Error),
}
