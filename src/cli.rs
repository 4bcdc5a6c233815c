use std::path::PathBuf;

use clap::Parser;

use crate::tree::{BuildMode, TeardownMode, TreeMode};

/// Animated Christmas tree with twinkling lights.
///
/// Options left out fall back to the config file, then to the built-in defaults.
#[derive(Parser, Debug, Default)]
#[command(author, version, about)]
pub struct Cli {
    /// How long the tree stays up, in seconds
    #[arg(long, value_name = "SECONDS")]
    pub duration: Option<u64>,

    /// Tree shape: single | double
    #[arg(long)]
    pub mode: Option<TreeMode>,

    /// Share of needles that carry a light, between 0 and 1
    #[arg(long)]
    pub density: Option<f64>,

    /// Seconds between twinkle frames
    #[arg(long, value_name = "SECONDS")]
    pub speed: Option<f64>,

    /// Columns the tree is centered in
    #[arg(long, value_name = "COLUMNS")]
    pub width: Option<u16>,

    /// Reveal the tree cell by cell before it twinkles
    #[arg(long)]
    pub build: bool,

    /// Seconds between build frames
    #[arg(long, value_name = "SECONDS")]
    pub build_speed: Option<f64>,

    /// Keep twinkling after the build phase
    #[arg(long)]
    pub auto_twinkle: bool,

    /// Blank rows between the two tiers (accepted, currently not applied)
    #[arg(long)]
    pub gap: Option<u16>,

    /// Remove the tree cell by cell at the end
    #[arg(long)]
    pub teardown: bool,

    /// Seconds between teardown frames
    #[arg(long, value_name = "SECONDS")]
    pub teardown_speed: Option<f64>,

    /// Teardown order: random | reverse
    #[arg(long)]
    pub teardown_mode: Option<TeardownMode>,

    /// Build order: sequential | random
    #[arg(long)]
    pub build_mode: Option<BuildMode>,

    /// Seed that makes the lights and the build/teardown orders reproducible
    #[arg(long)]
    pub seed: Option<u64>,

    /// Audio file to play while the tree is up
    #[arg(long, value_name = "FILE")]
    pub music: Option<PathBuf>,

    /// Clear and reprint the screen for every frame instead of updating in place
    #[arg(long)]
    pub plain: bool,

    /// Config file to use instead of the one in the config directory
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,
}
