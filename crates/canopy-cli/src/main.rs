#![forbid(unsafe_code)]

//! `canopy`: load a catalog from config + seed and browse it.

mod cli;
mod render;

use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;
use std::rc::Rc;

use canopy_model::{
    CanopyConfig, Catalog, CatalogError, ConfigError, Seed, SeedError, UriImageResolver,
};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use crate::cli::{Cli, Command};

const LOG_ENV: &str = "CANOPY_LOG";
const DEFAULT_LOG_FILTER: &str = "warn";

#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Seed(#[from] SeedError),
    #[error(transparent)]
    Catalog(#[from] CatalogError),
    #[error("no unique {kind} with id '{id}'")]
    NotFound { kind: &'static str, id: String },
    #[error("failed to write output: {0}")]
    Output(#[from] io::Error),
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("canopy: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<(), CliError> {
    let config = resolve_config(cli.config.as_deref(), cli.seed, cli.image_base)?;
    init_tracing(config.log_filter.as_deref());

    let seed = config.load_seed()?;
    let catalog = build_catalog(&config, &seed);

    let stdout = io::stdout();
    let mut out = stdout.lock();
    execute(&catalog, &cli.command, &mut out)?;
    out.flush()?;
    Ok(())
}

/// Config file values, overridden by command-line flags.
fn resolve_config(
    path: Option<&std::path::Path>,
    seed: Option<PathBuf>,
    image_base: Option<String>,
) -> Result<CanopyConfig, ConfigError> {
    let mut config = match path {
        Some(path) => CanopyConfig::load(path)?,
        None => CanopyConfig::default(),
    };
    if seed.is_some() {
        config.seed = seed;
    }
    if let Some(base) = image_base {
        config.image_base = base;
    }
    Ok(config)
}

fn init_tracing(config_filter: Option<&str>) {
    let filter = EnvFilter::try_from_env(LOG_ENV)
        .unwrap_or_else(|_| EnvFilter::new(config_filter.unwrap_or(DEFAULT_LOG_FILTER)));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(true)
        .init();
}

fn build_catalog(config: &CanopyConfig, seed: &Seed) -> Catalog {
    let resolver: Rc<UriImageResolver> = Rc::new(config.resolver());
    Catalog::from_seed(seed, resolver)
}

fn execute(catalog: &Catalog, command: &Command, out: &mut impl Write) -> Result<(), CliError> {
    match command {
        Command::Groups => render::group_summaries(out, &catalog.all_groups().to_vec())?,
        Command::Group { id } => {
            let group = catalog.group(id).ok_or_else(|| CliError::NotFound {
                kind: "group",
                id: id.clone(),
            })?;
            render::group_detail(out, &group)?;
        }
        Command::Item { id } => {
            let item = catalog.item(id).ok_or_else(|| CliError::NotFound {
                kind: "item",
                id: id.clone(),
            })?;
            render::item_detail(out, &item)?;
        }
        Command::Collection { name } => {
            let groups = catalog.groups_by_collection(name)?;
            render::group_summaries(out, &groups.to_vec())?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog() -> Catalog {
        let seed = Seed::builtin().expect("bundled seed parses");
        build_catalog(&CanopyConfig::default(), &seed)
    }

    fn run_command(command: Command) -> Result<String, CliError> {
        let mut out = Vec::new();
        execute(&catalog(), &command, &mut out)?;
        Ok(String::from_utf8(out).expect("utf8 output"))
    }

    #[test]
    fn groups_lists_every_seeded_group() {
        let text = run_command(Command::Groups).expect("runs");
        assert!(text.contains("Group-1"));
        assert!(text.contains("Group-2"));
        assert!(text.contains("Group-3"));
    }

    #[test]
    fn missing_group_is_not_found() {
        let err = run_command(Command::Group {
            id: "Group-9".into(),
        })
        .expect_err("missing");
        assert_eq!(err.to_string(), "no unique group with id 'Group-9'");
    }

    #[test]
    fn group_lists_all_of_its_items() {
        let text = run_command(Command::Group {
            id: "Group-1".into(),
        })
        .expect("runs");
        assert!(text.starts_with("Group-1 Introduction
"));
        assert!(text.contains("items: 5 (top 5)
"));
        assert!(text.contains("  Group-1-Item-1 Forest
"));
        assert!(text.ends_with("  Group-1-Item-5 Araucariaceae
"));
    }

    #[test]
    fn item_shows_group_and_image() {
        let text = run_command(Command::Item {
            id: "Group-2-Item-1".into(),
        })
        .expect("runs");
        assert!(text.contains("Temperate needleleaf"));
        assert!(text.contains("Impact"));
        assert!(text.contains("ms-appx:///Assets/21.png"));
    }

    #[test]
    fn all_groups_collection_lists_top_items() {
        let text = run_command(Command::Collection {
            name: "AllGroups".into(),
        })
        .expect("runs");
        let summaries: Vec<&str> = text.lines().filter(|l| !l.starts_with(' ')).collect();
        assert_eq!(
            summaries,
            vec![
                "Group-1 Introduction (5 items)",
                "Group-2 Impact (3 items)",
                "Group-3 Directions (7 items)",
            ]
        );
        assert!(text.contains("  Group-2-Item-3 Tropical moist
"));
        assert!(text.contains("  Group-3-Item-7 Urban forestry
"));
        assert_eq!(text, run_command(Command::Groups).expect("runs"));
    }

    #[test]
    fn unknown_collection_fails() {
        let err = run_command(Command::Collection {
            name: "Favorites".into(),
        })
        .expect_err("unknown");
        assert!(matches!(err, CliError::Catalog(_)));
    }

    #[test]
    fn flags_override_config_file() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("canopy.toml");
        std::fs::write(&path, "image_base = \"mem://\"\nlog_filter = \"debug\"\n")
            .expect("write");

        let config = resolve_config(Some(path.as_path()), None, Some("https://cdn/".into()))
            .expect("loads");
        assert_eq!(config.image_base, "https://cdn/");
        assert_eq!(config.log_filter.as_deref(), Some("debug"));
        assert_eq!(config.seed, None);
    }
}
