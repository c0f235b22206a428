//! Map construction from parsed street descriptions.
//!
//! # Construction protocol
//!
//! Every street block is an undirected segment in the input and becomes
//! **two** directed [`Block`]s in the network, one per direction, sharing
//! geometry but with swapped endpoints.  Endpoint intersections are
//! deduplicated by coordinate as segments arrive.
//!
//! Derived block fields are not computed during insertion: once all
//! segments are in, [`MapBuilder::finish`] walks every adjacency chain
//! once, assigning each directed block its length, a fresh traffic-factor
//! draw, and the resulting traffic value.  Forward and reverse therefore
//! carry independent traffic.

use log::debug;

use sn_core::{BlockId, Coordinate, IntersectionId, TrafficModel};

use crate::error::GraphResult;
use crate::network::{Block, Network};

// ── Traffic-factor distribution ───────────────────────────────────────────────

/// Mean of the traffic-factor distribution; 1.0 is "normal conditions".
pub const TRAFFIC_FACTOR_MEAN: f64 = 1.0;
/// Standard deviation of the traffic-factor distribution.
pub const TRAFFIC_FACTOR_STD_DEV: f64 = 0.2;
/// Factors are clamped to this inclusive range to rule out extreme draws.
pub const TRAFFIC_FACTOR_RANGE: (f64, f64) = (0.5, 1.5);

// ── Parsed description types ──────────────────────────────────────────────────

/// One parsed street: its name and its blocks, in input order.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StreetSpec {
    pub name: String,
    pub blocks: Vec<BlockSpec>,
}

/// One parsed street block: sequential number, road size, and polyline.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BlockSpec {
    pub number: u32,
    pub road_size: f64,
    pub points: Vec<Coordinate>,
}

// ── MapObserver ───────────────────────────────────────────────────────────────

/// Callbacks invoked as the map is built.
///
/// All methods have default no-op implementations, so implementors only
/// override what they care about.  This replaces any hard display coupling:
/// a UI installs an observer to mirror construction, and everything else
/// builds without one.
pub trait MapObserver {
    /// Called once for each newly created intersection.
    fn on_intersection(&mut self, _id: IntersectionId, _coord: Coordinate) {}

    /// Called once for each directed block inserted into an adjacency chain.
    fn on_block(&mut self, _id: BlockId, _block: &Block) {}
}

/// A [`MapObserver`] that does nothing.
pub struct NoopObserver;

impl MapObserver for NoopObserver {}

// ── MapBuilder ────────────────────────────────────────────────────────────────

/// Construct a [`Network`] incrementally from street descriptions, then call
/// [`finish`](Self::finish).
///
/// # Example
///
/// ```
/// use sn_core::{Coordinate, FixedTraffic};
/// use sn_graph::MapBuilder;
///
/// let mut b = MapBuilder::new();
/// b.add_segment(
///     "Easton Ave",
///     1,
///     24.0,
///     &[Coordinate::new(0, 0), Coordinate::new(3, 4)],
/// )
/// .unwrap();
/// let net = b.finish(&mut FixedTraffic(1.0));
/// assert_eq!(net.intersection_count(), 2);
/// assert_eq!(net.block_count(), 2); // one block per direction
/// ```
pub struct MapBuilder {
    network: Network,
    observer: Option<Box<dyn MapObserver>>,
}

impl MapBuilder {
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    /// Pre-allocate for the expected number of intersections (e.g. the count
    /// declared in a map file header).
    pub fn with_capacity(intersections: usize) -> Self {
        MapBuilder {
            network: Network::with_capacity(intersections),
            observer: None,
        }
    }

    /// Install a construction observer.
    pub fn with_observer(mut self, observer: Box<dyn MapObserver>) -> Self {
        self.observer = Some(observer);
        self
    }

    /// Ingest one parsed street, block by block.
    pub fn add_street(&mut self, street: &StreetSpec) -> GraphResult<()> {
        for block in &street.blocks {
            self.add_segment(&street.name, block.number, block.road_size, &block.points)?;
        }
        Ok(())
    }

    /// Ingest one undirected street segment.
    ///
    /// Creates the endpoint intersections if they are new, then prepends a
    /// forward block at the start vertex and a reverse block at the end
    /// vertex.  A polyline of fewer than two points is rejected before any
    /// intersection is created.
    pub fn add_segment(
        &mut self,
        street: &str,
        number: u32,
        road_size: f64,
        points: &[Coordinate],
    ) -> GraphResult<()> {
        // Validate the polyline before touching the network, so a degenerate
        // segment leaves no stray intersections behind.
        let forward = Block::new(
            street,
            number,
            road_size,
            points.to_vec(),
            IntersectionId::INVALID,
            IntersectionId::INVALID,
        )?;

        let start = self.intern(points[0])?;
        let end = self.intern(points[points.len() - 1])?;

        let forward = Block { from: start, to: end, ..forward };
        let reverse = Block {
            from: end,
            to: start,
            ..forward.clone()
        };

        let forward_id = self.network.add_directed_edge(start, forward);
        if let Some(obs) = &mut self.observer {
            obs.on_block(forward_id, self.network.block(forward_id));
        }
        let reverse_id = self.network.add_directed_edge(end, reverse);
        if let Some(obs) = &mut self.observer {
            obs.on_block(reverse_id, self.network.block(reverse_id));
        }
        Ok(())
    }

    /// Find-or-create the intersection at `coord`.
    fn intern(&mut self, coord: Coordinate) -> GraphResult<IntersectionId> {
        if let Some(id) = self.network.find_intersection(coord) {
            return Ok(id);
        }
        let id = self.network.add_intersection(coord)?;
        if let Some(obs) = &mut self.observer {
            obs.on_intersection(id, coord);
        }
        Ok(id)
    }

    /// Finalize the map: compute every block's derived fields and release
    /// the network.
    ///
    /// Walks each adjacency chain once.  One traffic factor is drawn per
    /// directed block, clamped to [`TRAFFIC_FACTOR_RANGE`], so the two
    /// directions of a segment see different traffic.
    pub fn finish(mut self, traffic: &mut dyn TrafficModel) -> Network {
        let (lo, hi) = TRAFFIC_FACTOR_RANGE;
        for v in 0..self.network.intersection_count() {
            let mut cursor = self.network.chain_head(IntersectionId(v as u32));
            while let Some(id) = cursor {
                let length = self.network.block(id).polyline_length();
                let factor = traffic
                    .gaussian(TRAFFIC_FACTOR_MEAN, TRAFFIC_FACTOR_STD_DEV)
                    .clamp(lo, hi);
                let block = self.network.block_mut(id);
                block.length = length;
                block.traffic_factor = factor;
                block.traffic = length * factor;
                cursor = block.next;
            }
        }
        debug!(
            "finalized network: {} intersections, {} directed blocks",
            self.network.intersection_count(),
            self.network.block_count()
        );
        self.network
    }
}

impl Default for MapBuilder {
    fn default() -> Self {
        Self::new()
    }
}
