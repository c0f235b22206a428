//! Map text ingestion.
//!
//! # Format
//!
//! A map file is a whitespace-token stream with street names on their own
//! lines:
//!
//! ```text
//! <intersection count> <street count>
//! <street name>
//! <block count>
//! <block number> <point count> <road size>
//! <x> <y>
//! <x> <y>
//! ...
//! ```
//!
//! Numbers may share lines or not; names always occupy one full line.
//! Parsing is strict: a missing or malformed token aborts with the
//! offending line number, and no partially built network escapes.

use std::collections::VecDeque;
use std::io::Read;
use std::path::Path;

use log::info;

use sn_core::{Coordinate, TrafficModel};

use crate::builder::{BlockSpec, MapBuilder, StreetSpec};
use crate::error::{GraphError, GraphResult};
use crate::network::Network;

// ── Parsed file ───────────────────────────────────────────────────────────────

/// A fully parsed map file, before graph construction.
#[derive(Clone, Debug)]
pub struct MapFile {
    /// Intersection count declared in the header.  The builder deduplicates
    /// by coordinate, so this is a capacity hint rather than a constraint.
    pub intersections: usize,
    pub streets: Vec<StreetSpec>,
}

// ── Public API ────────────────────────────────────────────────────────────────

/// Parse and build a map from a file on disk.
pub fn load_map_path(path: &Path, traffic: &mut dyn TrafficModel) -> GraphResult<Network> {
    let file = std::fs::File::open(path)?;
    load_map_reader(file, traffic)
}

/// Parse and build a map from any `Read` source.
///
/// Useful for testing (pass a `std::io::Cursor`) or for embedded map text.
pub fn load_map_reader<R: Read>(reader: R, traffic: &mut dyn TrafficModel) -> GraphResult<Network> {
    let file = parse_streets_reader(reader)?;

    let mut builder = MapBuilder::with_capacity(file.intersections);
    for street in &file.streets {
        builder.add_street(street)?;
    }
    let network = builder.finish(traffic);

    info!(
        "loaded {} streets: {} intersections, {} directed blocks",
        file.streets.len(),
        network.intersection_count(),
        network.block_count()
    );
    Ok(network)
}

/// Parse the token stream without building a graph.
pub fn parse_streets_reader<R: Read>(mut reader: R) -> GraphResult<MapFile> {
    let mut text = String::new();
    reader.read_to_string(&mut text)?;

    let mut scanner = Scanner::new(&text);
    let intersections: usize = scanner.number("intersection count")?;
    let street_count: usize = scanner.number("street count")?;

    let mut streets = Vec::with_capacity(street_count);
    for _ in 0..street_count {
        let name = scanner.name_line()?.to_owned();
        let block_count: usize = scanner.number("block count")?;

        let mut blocks = Vec::with_capacity(block_count);
        for _ in 0..block_count {
            let number = scanner.number("block number")?;
            let point_count: usize = scanner.number("point count")?;
            let road_size: f64 = scanner.number("road size")?;

            let mut points = Vec::with_capacity(point_count);
            for _ in 0..point_count {
                let x = scanner.number("x coordinate")?;
                let y = scanner.number("y coordinate")?;
                points.push(Coordinate::new(x, y));
            }
            blocks.push(BlockSpec { number, road_size, points });
        }
        streets.push(StreetSpec { name, blocks });
    }

    Ok(MapFile { intersections, streets })
}

// ── Scanner ───────────────────────────────────────────────────────────────────

/// Line-aware token scanner.  Numeric reads consume whitespace tokens across
/// line boundaries; [`name_line`](Self::name_line) consumes one whole line.
struct Scanner<'a> {
    lines: std::str::Lines<'a>,
    tokens: VecDeque<&'a str>,
    line_no: usize,
}

impl<'a> Scanner<'a> {
    fn new(text: &'a str) -> Self {
        Scanner {
            lines: text.lines(),
            tokens: VecDeque::new(),
            line_no: 0,
        }
    }

    fn next_line(&mut self) -> Option<&'a str> {
        let line = self.lines.next()?;
        self.line_no += 1;
        Some(line)
    }

    /// The next non-blank line, taken verbatim as a street name.
    fn name_line(&mut self) -> GraphResult<&'a str> {
        if let Some(stray) = self.tokens.pop_front() {
            return Err(GraphError::Parse {
                line: self.line_no,
                message: format!("expected street name on its own line, found {stray:?}"),
            });
        }
        while let Some(line) = self.next_line() {
            let line = line.trim();
            if !line.is_empty() {
                return Ok(line);
            }
        }
        Err(self.eof("street name"))
    }

    fn next_token(&mut self) -> Option<&'a str> {
        loop {
            if let Some(tok) = self.tokens.pop_front() {
                return Some(tok);
            }
            let line = self.next_line()?;
            self.tokens.extend(line.split_whitespace());
        }
    }

    /// Parse the next token as `T`, labelling failures with `what` and the
    /// current line.
    fn number<T: std::str::FromStr>(&mut self, what: &str) -> GraphResult<T> {
        let Some(tok) = self.next_token() else {
            return Err(self.eof(what));
        };
        tok.parse().map_err(|_| GraphError::Parse {
            line: self.line_no,
            message: format!("expected {what}, got {tok:?}"),
        })
    }

    fn eof(&self, what: &str) -> GraphError {
        GraphError::Parse {
            line: self.line_no,
            message: format!("unexpected end of input while reading {what}"),
        }
    }
}
