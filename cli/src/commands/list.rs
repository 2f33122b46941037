use anyhow::Result;
use zonemerge::{load_candidates, DiskZones};

use crate::cli::{Cli, ListArgs};

pub fn run(cli: &Cli, args: &ListArgs) -> Result<()> {
    let zones = DiskZones::open(&args.dir)?;
    let candidates = load_candidates(&zones)?;

    if cli.verbose > 0 {
        eprintln!("[list] {} zones in {}", candidates.len(), args.dir.display());
    }

    let width = candidates.iter().map(|c| c.id.as_str().len()).max().unwrap_or(0);
    for c in &candidates {
        println!("{:<width$}  {:>6} vertices  area {:.6}", c.id.as_str(), c.ring.len(), c.area);
    }
    Ok(())
}
