use std::path::PathBuf;

/// Merge adjacent zone outlines (argument schema only)
#[derive(clap::Parser, Debug)]
#[command(name = "zonemerge", version, about, propagate_version = true)]
pub struct Cli {
    /// Increase output verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(clap::Subcommand, Debug)]
pub enum Commands {
    /// Merge every adjacent pair of zones in a directory, in place
    Merge(MergeArgs),

    /// List the zones in a directory in merge order
    List(ListArgs),
}

#[derive(clap::Args, Debug)]
pub struct MergeArgs {
    /// Directory of <id>.geojson zone files
    #[arg(value_hint = clap::ValueHint::DirPath)]
    pub dir: PathBuf,

    /// JSON file with merge settings
    #[arg(short, long, value_hint = clap::ValueHint::FilePath)]
    pub config: Option<PathBuf>,

    /// Overrides `expansion_factor` from the config
    #[arg(long)]
    pub expansion_factor: Option<f64>,

    /// Overrides `min_invalid_points` from the config
    #[arg(long)]
    pub min_invalid_points: Option<usize>,

    /// Write the JSON merge report here
    #[arg(short, long, value_hint = clap::ValueHint::FilePath)]
    pub report: Option<PathBuf>,
}

#[derive(clap::Args, Debug)]
pub struct ListArgs {
    /// Directory of <id>.geojson zone files
    #[arg(value_hint = clap::ValueHint::DirPath)]
    pub dir: PathBuf,
}
