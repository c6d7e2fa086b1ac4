//! Seed content: the group and item descriptors a catalog is built from.
//!
//! Seeds are plain data, read from TOML or JSON:
//!
//! ```toml
//! [[groups]]
//! id = "Group-1"
//! title = "Introduction"
//! image_path = "Assets/10.png"
//!
//! [[groups.items]]
//! id = "Group-1-Item-1"
//! title = "Forest"
//! image_path = "Assets/11.png"
//! description = "A forest is an area with a high density of trees."
//! content = "..."
//! ```
//!
//! Identifiers are expected to be unique but this is not checked here;
//! duplicate ids simply make catalog lookups for them return nothing.

use std::path::Path;

use serde::Deserialize;

use crate::entity::EntityFields;
use crate::error::SeedError;

const BUILTIN_SEED: &str = include_str!("../assets/forest.toml");

/// Ordered list of group descriptors.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Seed {
    #[serde(default)]
    pub groups: Vec<SeedGroup>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SeedGroup {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub subtitle: String,
    #[serde(default)]
    pub image_path: Option<String>,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub items: Vec<SeedItem>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SeedItem {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub subtitle: String,
    #[serde(default)]
    pub image_path: Option<String>,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub content: String,
}

impl SeedGroup {
    #[must_use]
    pub fn fields(&self) -> EntityFields {
        EntityFields {
            unique_id: self.id.clone(),
            title: self.title.clone(),
            subtitle: self.subtitle.clone(),
            image_path: self.image_path.clone(),
            description: self.description.clone(),
        }
    }
}

impl SeedItem {
    #[must_use]
    pub fn fields(&self) -> EntityFields {
        EntityFields {
            unique_id: self.id.clone(),
            title: self.title.clone(),
            subtitle: self.subtitle.clone(),
            image_path: self.image_path.clone(),
            description: self.description.clone(),
        }
    }
}

impl Seed {
    /// The bundled forest-nature content.
    pub fn builtin() -> Result<Self, SeedError> {
        Self::from_toml_str(BUILTIN_SEED)
    }

    pub fn from_toml_str(text: &str) -> Result<Self, SeedError> {
        Ok(toml::from_str(text)?)
    }

    pub fn from_json_str(text: &str) -> Result<Self, SeedError> {
        Ok(serde_json::from_str(text)?)
    }

    /// Read a seed file, choosing the format from its extension.
    pub fn load(path: &Path) -> Result<Self, SeedError> {
        let format = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase);
        let parse: fn(&str) -> Result<Self, SeedError> = match format.as_deref() {
            Some("toml") => Self::from_toml_str,
            Some("json") => Self::from_json_str,
            _ => {
                return Err(SeedError::UnsupportedFormat {
                    path: path.to_path_buf(),
                });
            }
        };
        let text = std::fs::read_to_string(path).map_err(|source| SeedError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let seed = parse(&text)?;
        tracing::debug!(
            target: "canopy::seed",
            path = %path.display(),
            groups = seed.groups.len(),
            "seed loaded"
        );
        Ok(seed)
    }

    /// Total number of item descriptors.
    #[must_use]
    pub fn item_count(&self) -> usize {
        self.groups.iter().map(|g| g.items.len()).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn builtin_seed_has_three_groups() {
        let seed = Seed::builtin().expect("bundled seed parses");
        let summary: Vec<(&str, &str, usize)> = seed
            .groups
            .iter()
            .map(|g| (g.id.as_str(), g.title.as_str(), g.items.len()))
            .collect();
        assert_eq!(
            summary,
            vec![
                ("Group-1", "Introduction", 5),
                ("Group-2", "Impact", 3),
                ("Group-3", "Directions", 7),
            ]
        );
        assert_eq!(seed.item_count(), 15);
    }

    #[test]
    fn builtin_seed_items_carry_image_paths() {
        let seed = Seed::builtin().expect("bundled seed parses");
        let first = &seed.groups[0].items[0];
        assert_eq!(first.id, "Group-1-Item-1");
        assert_eq!(first.title, "Forest");
        assert_eq!(first.image_path.as_deref(), Some("Assets/11.png"));
        assert!(!first.content.is_empty());
    }

    #[test]
    fn toml_defaults_optional_fields() {
        let seed = Seed::from_toml_str(
            r#"
            [[groups]]
            id = "G"
            title = "Only"
            "#,
        )
        .expect("valid");
        let group = &seed.groups[0];
        assert!(group.items.is_empty());
        assert_eq!(group.image_path, None);
        assert_eq!(group.fields().unique_id, "G");
    }

    #[test]
    fn json_seed_parses() {
        let seed = Seed::from_json_str(
            r#"{"groups":[{"id":"G","title":"T","items":[{"id":"I","title":"It","content":"c"}]}]}"#,
        )
        .expect("valid");
        assert_eq!(seed.groups[0].items[0].content, "c");
    }

    #[test]
    fn unknown_field_is_rejected() {
        let err = Seed::from_toml_str("[[groups]]\nid = \"G\"\ntitle = \"T\"\ncolour = \"red\"\n")
            .expect_err("unknown field");
        assert!(matches!(err, SeedError::Toml(_)));
    }

    #[test]
    fn load_picks_format_from_extension() {
        let mut file = tempfile::Builder::new()
            .suffix(".json")
            .tempfile()
            .expect("tempfile");
        write!(file, r#"{{"groups":[{{"id":"G","title":"T"}}]}}"#).expect("write");
        let seed = Seed::load(file.path()).expect("loads");
        assert_eq!(seed.groups.len(), 1);
    }

    #[test]
    fn load_rejects_unknown_extension() {
        let err = Seed::load(Path::new("seed.yaml")).expect_err("unsupported");
        assert!(matches!(err, SeedError::UnsupportedFormat { .. }));
    }

    #[test]
    fn load_reports_missing_file() {
        let dir = tempfile::tempdir().expect("tempdir");
        let err = Seed::load(&dir.path().join("absent.toml")).expect_err("missing");
        assert!(matches!(err, SeedError::Io { .. }));
    }
}
