//! Street-network representation.
//!
//! # Data layout
//!
//! All directed blocks live in one arena (`Vec<Block>`), and a singly linked
//! list is threaded through it per source vertex:
//!
//! ```text
//! adjacency[v] ─► BlockId ─► Block { next: Some(..) } ─► ... ─► None
//! ```
//!
//! [`Network::add_directed_edge`] prepends, so a chain lists blocks
//! most-recent-first.  That order is part of the contract: every search
//! enumerates neighbors in chain order, which decides tie-breaking between
//! equally good paths.  Explicit `BlockId` links replace aliased mutable
//! pointers; nothing is ever deleted, so an id can never dangle.
//!
//! # Vertex identity
//!
//! Intersections are identified by coordinate.  `find_intersection` runs on
//! every edge of every search, so it is backed by an `FxHashMap` rather than
//! a scan of the vertex list.

use rustc_hash::FxHashMap;

use sn_core::{BlockId, Coordinate, IntersectionId};

use crate::error::{GraphError, GraphResult};

// ── Intersection ──────────────────────────────────────────────────────────────

/// A graph vertex: one map intersection, identified by its coordinate.
///
/// Two intersections are equal iff their coordinates are equal.  Never
/// mutates after creation.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Intersection {
    coord: Coordinate,
}

impl Intersection {
    pub(crate) fn new(coord: Coordinate) -> Self {
        Self { coord }
    }

    #[inline]
    pub fn coordinate(&self) -> Coordinate {
        self.coord
    }
}

impl std::fmt::Display for Intersection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.coord)
    }
}

// ── Block ─────────────────────────────────────────────────────────────────────

/// A directed street block between two intersections.
///
/// Geometry is a polyline of at least two coordinates.  The `from` endpoint
/// is the polyline's tail, `to` its head; an undirected street segment is
/// represented by two blocks with swapped endpoints sharing the same
/// geometry.  The derived fields (`length`, `traffic_factor`, `traffic`)
/// are zero until [`MapBuilder::finish`](crate::MapBuilder::finish) computes
/// them; afterwards the block never changes.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Block {
    pub(crate) points: Vec<Coordinate>,
    pub(crate) road_size: f64,
    pub(crate) street: String,
    pub(crate) number: u32,
    pub(crate) length: f64,
    pub(crate) traffic_factor: f64,
    pub(crate) traffic: f64,
    pub(crate) from: IntersectionId,
    pub(crate) to: IntersectionId,
    pub(crate) next: Option<BlockId>,
}

impl Block {
    /// Construct a block with zeroed derived fields.
    ///
    /// Rejects polylines of fewer than two points.
    pub fn new(
        street: &str,
        number: u32,
        road_size: f64,
        points: Vec<Coordinate>,
        from: IntersectionId,
        to: IntersectionId,
    ) -> GraphResult<Block> {
        if points.len() < 2 {
            return Err(GraphError::DegenerateBlock {
                street: street.to_owned(),
                number,
            });
        }
        Ok(Block {
            points,
            road_size,
            street: street.to_owned(),
            number,
            length: 0.0,
            traffic_factor: 0.0,
            traffic: 0.0,
            from,
            to,
            next: None,
        })
    }

    /// Polyline vertices, tail to head.
    #[inline]
    pub fn points(&self) -> &[Coordinate] {
        &self.points
    }

    #[inline]
    pub fn road_size(&self) -> f64 {
        self.road_size
    }

    /// Name of the street this block belongs to.
    #[inline]
    pub fn street(&self) -> &str {
        &self.street
    }

    /// Sequential block number within the street.
    #[inline]
    pub fn number(&self) -> u32 {
        self.number
    }

    /// Sum of Euclidean distances along the polyline.
    #[inline]
    pub fn length(&self) -> f64 {
        self.length
    }

    /// Randomized congestion multiplier, clamped to `[0.5, 1.5]`.
    #[inline]
    pub fn traffic_factor(&self) -> f64 {
        self.traffic_factor
    }

    /// `length × traffic_factor`; the edge weight of the traffic search.
    #[inline]
    pub fn traffic(&self) -> f64 {
        self.traffic
    }

    /// The intersection this block departs from.
    #[inline]
    pub fn from(&self) -> IntersectionId {
        self.from
    }

    /// The intersection this block arrives at.
    #[inline]
    pub fn to(&self) -> IntersectionId {
        self.to
    }

    pub(crate) fn polyline_length(&self) -> f64 {
        self.points.windows(2).map(|w| w[0].distance(w[1])).sum()
    }
}

// ── Network ───────────────────────────────────────────────────────────────────

/// The full street network: vertex list, block arena, and per-vertex
/// adjacency chains.
///
/// Built by [`MapBuilder`](crate::MapBuilder) (or by hand through
/// [`add_intersection`](Self::add_intersection) and
/// [`add_directed_edge`](Self::add_directed_edge)), read-only afterwards.
/// All query methods take `&self`.
#[derive(Debug)]
pub struct Network {
    intersections: Vec<Intersection>,
    /// Head of the outgoing-block chain per vertex.  Parallel to
    /// `intersections`.
    adjacency: Vec<Option<BlockId>>,
    blocks: Vec<Block>,
    coord_index: FxHashMap<Coordinate, IntersectionId>,
}

impl Network {
    /// An empty network with no intersections or blocks.
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    /// Pre-allocate for the expected number of intersections.
    pub fn with_capacity(intersections: usize) -> Self {
        Network {
            intersections: Vec::with_capacity(intersections),
            adjacency: Vec::with_capacity(intersections),
            blocks: Vec::new(),
            coord_index: FxHashMap::default(),
        }
    }

    // ── Construction ──────────────────────────────────────────────────────

    /// Append a new intersection and return its id (sequential from 0).
    ///
    /// Inserting a coordinate that is already present is rejected; callers
    /// are expected to check [`find_intersection`](Self::find_intersection)
    /// first.
    pub fn add_intersection(&mut self, coord: Coordinate) -> GraphResult<IntersectionId> {
        if self.coord_index.contains_key(&coord) {
            return Err(GraphError::DuplicateIntersection(coord));
        }
        let id = IntersectionId(self.intersections.len() as u32);
        self.intersections.push(Intersection::new(coord));
        self.adjacency.push(None);
        self.coord_index.insert(coord, id);
        Ok(id)
    }

    /// Prepend `block` to the outgoing chain at `from`.
    ///
    /// The block's `from` endpoint must be `from`; every block reachable
    /// from a vertex's chain departs from that vertex.
    pub fn add_directed_edge(&mut self, from: IntersectionId, mut block: Block) -> BlockId {
        debug_assert_eq!(block.from, from);
        let id = BlockId(self.blocks.len() as u32);
        block.next = self.adjacency[from.index()];
        self.blocks.push(block);
        self.adjacency[from.index()] = Some(id);
        id
    }

    // ── Lookup ────────────────────────────────────────────────────────────

    /// The id of the intersection at `coord`, if one exists.
    #[inline]
    pub fn find_intersection(&self, coord: Coordinate) -> Option<IntersectionId> {
        self.coord_index.get(&coord).copied()
    }

    /// `true` if `id` names an intersection in this network.
    #[inline]
    pub fn contains(&self, id: IntersectionId) -> bool {
        id.index() < self.intersections.len()
    }

    /// The intersection with the given id.
    ///
    /// # Panics
    /// Panics if `id` is out of range; use [`contains`](Self::contains) for
    /// ids of unknown provenance.
    #[inline]
    pub fn intersection(&self, id: IntersectionId) -> &Intersection {
        &self.intersections[id.index()]
    }

    /// The block with the given id.
    ///
    /// # Panics
    /// Panics if `id` is out of range.
    #[inline]
    pub fn block(&self, id: BlockId) -> &Block {
        &self.blocks[id.index()]
    }

    pub fn intersections(&self) -> &[Intersection] {
        &self.intersections
    }

    // ── Traversal ─────────────────────────────────────────────────────────

    /// Iterator over the outgoing blocks of `v`, in chain order
    /// (most-recently-inserted first).
    #[inline]
    pub fn out_blocks(&self, v: IntersectionId) -> impl Iterator<Item = BlockId> + '_ {
        std::iter::successors(self.adjacency.get(v.index()).copied().flatten(), move |&b| {
            self.blocks[b.index()].next
        })
    }

    // ── Dimensions ────────────────────────────────────────────────────────

    pub fn intersection_count(&self) -> usize {
        self.intersections.len()
    }

    pub fn block_count(&self) -> usize {
        self.blocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.intersections.is_empty()
    }

    // ── Crate-internal mutation (builder finalization) ────────────────────

    pub(crate) fn chain_head(&self, v: IntersectionId) -> Option<BlockId> {
        self.adjacency[v.index()]
    }

    pub(crate) fn block_mut(&mut self, id: BlockId) -> &mut Block {
        &mut self.blocks[id.index()]
    }
}

impl Default for Network {
    fn default() -> Self {
        Self::new()
    }
}
