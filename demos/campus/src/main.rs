//! campus — smallest end-to-end example for the streetnet toolkit.
//!
//! Builds a nine-intersection campus grid from embedded map text, then runs
//! every query the library offers: reachability, the minimum-hop path, the
//! minimum-traffic path, and path statistics.  Run with `RUST_LOG=info` to
//! see the loader's summary line.

use std::io::Cursor;

use anyhow::{Context, Result};

use sn_core::{Coordinate, GaussianTraffic, IntersectionId};
use sn_graph::{Network, PathFinder, load_map_reader};

// ── Constants ─────────────────────────────────────────────────────────────────

const SEED: u64 = 42;

/// A 3×3 grid of intersections: three avenues east-west, three streets
/// north-south, two blocks each.  The second block of College Ave bends
/// through a midpoint, so its length exceeds the straight-line distance.
const CAMPUS_MAP: &str = "\
9 6
College Ave
2
1 2 24.0
0 0
40 0
2 3 24.0
40 0
60 10
80 0
Hamilton St
2
1 2 18.0
0 30
40 30
2 2 18.0
40 30
80 30
Seminary Pl
2
1 2 12.0
0 60
40 60
2 2 12.0
40 60
80 60
George St
2
1 2 30.0
0 0
0 30
2 2 30.0
0 30
0 60
Easton Ave
2
1 2 30.0
40 0
40 30
2 2 30.0
40 30
40 60
Bartlett St
2
1 2 16.0
80 0
80 30
2 2 16.0
80 30
80 60
";

fn main() -> Result<()> {
    env_logger::init();

    let mut traffic = GaussianTraffic::new(SEED);
    let network = load_map_reader(Cursor::new(CAMPUS_MAP), &mut traffic)?;
    println!(
        "campus grid: {} intersections, {} directed blocks",
        network.intersection_count(),
        network.block_count()
    );

    let start = network
        .find_intersection(Coordinate::new(0, 0))
        .context("start corner missing from map")?;
    let end = network
        .find_intersection(Coordinate::new(80, 60))
        .context("end corner missing from map")?;

    let finder = PathFinder::new(&network);

    let reached = finder.reachable(start);
    println!(
        "reachable from {}: {} of {} intersections",
        network.intersection(start),
        reached.len(),
        network.intersection_count()
    );

    let hops = finder.minimize_intersections(start, end);
    println!("fewest intersections: {}", format_path(&network, &hops));

    let fastest = finder.fastest_path(start, end);
    let info = finder.path_information(&fastest)?;
    println!("least traffic:        {}", format_path(&network, &fastest));
    println!(
        "  length {:.1}, average factor {:.2}, traffic {:.1}",
        info.total_length, info.average_traffic_factor, info.total_traffic
    );

    Ok(())
}

/// Render a path as its intersection coordinates.
fn format_path(network: &Network, path: &[IntersectionId]) -> String {
    if path.is_empty() {
        return "(no path)".to_owned();
    }
    path.iter()
        .map(|&id| network.intersection(id).to_string())
        .collect::<Vec<_>>()
        .join(" -> ")
}
