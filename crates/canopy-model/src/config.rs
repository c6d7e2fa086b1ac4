//! Configuration loaded from TOML.
//!
//! ```toml
//! image_base = "https://cdn.example.org/forest/"
//! seed = "content/forest.json"
//! log_filter = "canopy=debug"
//! ```
//!
//! Every key is optional. A relative `seed` path is resolved against the
//! directory of the config file it came from.

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::{ConfigError, SeedError};
use crate::image::{DEFAULT_IMAGE_BASE, UriImageResolver};
use crate::seed::Seed;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CanopyConfig {
    /// Base URI image paths are resolved against.
    pub image_base: String,
    /// Seed file (`.toml` or `.json`); the bundled seed when unset.
    pub seed: Option<PathBuf>,
    /// `tracing` filter directive used when `CANOPY_LOG` is not set.
    pub log_filter: Option<String>,
}

impl Default for CanopyConfig {
    fn default() -> Self {
        Self {
            image_base: DEFAULT_IMAGE_BASE.to_owned(),
            seed: None,
            log_filter: None,
        }
    }
}

impl CanopyConfig {
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(text)?)
    }

    /// Read `path` and anchor a relative seed path to its directory.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let mut config = Self::from_toml_str(&text)?;
        if let (Some(seed), Some(dir)) = (config.seed.as_mut(), path.parent()) {
            if seed.is_relative() {
                *seed = dir.join(&*seed);
            }
        }
        tracing::debug!(target: "canopy::config", path = %path.display(), "config loaded");
        Ok(config)
    }

    /// Image resolver for [`image_base`](Self::image_base).
    #[must_use]
    pub fn resolver(&self) -> UriImageResolver {
        UriImageResolver::new(self.image_base.clone())
    }

    /// The configured seed, or the bundled one.
    pub fn load_seed(&self) -> Result<Seed, SeedError> {
        match &self.seed {
            Some(path) => Seed::load(path),
            None => Seed::builtin(),
        }
    }
}
