use anyhow::Result;
use zonemerge::{DiskZones, MergeConfig, MergeSession};

use crate::cli::{Cli, MergeArgs};

pub fn run(cli: &Cli, args: &MergeArgs) -> Result<()> {
    let mut config = match &args.config {
        Some(path) => MergeConfig::from_json_file(path)?,
        None => MergeConfig::default(),
    };
    if let Some(factor) = args.expansion_factor { config.expansion_factor = factor; }
    if let Some(min) = args.min_invalid_points { config.min_invalid_points = min; }
    config.validate()?;

    if cli.verbose > 0 {
        eprintln!(
            "[merge] dir={} expansion_factor={} min_invalid_points={}",
            args.dir.display(), config.expansion_factor, config.min_invalid_points,
        );
    }

    let zones = DiskZones::open(&args.dir)?;
    let report = MergeSession::new(zones, config).run()?;

    if let Some(path) = &args.report {
        report.write_json(path)?;
        log::info!("[merge] report written to {}", path.display());
    }

    println!("{report}");
    Ok(())
}
