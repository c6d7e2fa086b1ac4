use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(name = "canopy", version, about = "Browse a grouped item catalog")]
pub struct Cli {
    /// TOML config file (image base, seed path, log filter).
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Seed file to load instead of the bundled catalog (.toml or .json).
    #[arg(long, global = true, value_name = "PATH")]
    pub seed: Option<PathBuf>,

    /// Base URI that relative image paths resolve against.
    #[arg(long, global = true, value_name = "URI")]
    pub image_base: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// List every group with its top items.
    Groups,
    /// Show one group and all of its items.
    Group { id: String },
    /// Show one item, its owning group, and its resolved image.
    Item { id: String },
    /// List the groups of a named collection (only `AllGroups` exists).
    Collection { name: String },
}
