//! Error types for catalog lookup, seed loading and configuration.

use std::path::PathBuf;

/// Errors from catalog queries.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CatalogError {
    /// A named collection other than [`ALL_GROUPS`](crate::ALL_GROUPS) was requested.
    #[error("only 'AllGroups' is supported as a collection of groups, got '{name}'")]
    UnknownCollection { name: String },
}

/// Errors from reading seed content.
#[derive(Debug, thiserror::Error)]
pub enum SeedError {
    #[error("failed to read seed file {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid TOML seed: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("invalid JSON seed: {0}")]
    Json(#[from] serde_json::Error),
    /// The file extension is neither `.toml` nor `.json`.
    #[error("unsupported seed format for {} (expected .toml or .json)", path.display())]
    UnsupportedFormat { path: PathBuf },
}

/// Errors from loading [`CanopyConfig`](crate::CanopyConfig).
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid config: {0}")]
    Toml(#[from] toml::de::Error),
}
