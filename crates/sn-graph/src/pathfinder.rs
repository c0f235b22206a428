//! Path search over a built [`Network`].
//!
//! Three queries, one cost model each:
//!
//! | Query                                                  | Strategy      | Minimizes           |
//! |--------------------------------------------------------|---------------|---------------------|
//! | [`reachable`](PathFinder::reachable)                   | depth-first   | nothing (coverage)  |
//! | [`minimize_intersections`](PathFinder::minimize_intersections) | breadth-first | intersection hops |
//! | [`fastest_path`](PathFinder::fastest_path)             | Dijkstra      | accumulated traffic |
//!
//! All queries are `&self` reads; a finished network can serve them from any
//! number of threads.  Unknown endpoints yield empty results: at this layer
//! "no path", "unreachable", and "not in the network" are the same answer.
//! Neighbor enumeration always follows adjacency-chain order, so tie-breaking
//! between equally good paths is deterministic and matches insertion order.

use std::cmp::Ordering;
use std::collections::{BinaryHeap, VecDeque};

use sn_core::IntersectionId;

use crate::error::{GraphError, GraphResult};
use crate::network::Network;

// ── PathInfo ──────────────────────────────────────────────────────────────────

/// Aggregate statistics for a path produced by one of the searches.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PathInfo {
    /// Sum of block lengths along the path.
    pub total_length: f64,
    /// `total_traffic / total_length`, or 0 for a zero-length path.
    pub average_traffic_factor: f64,
    /// Sum of block traffic values along the path.
    pub total_traffic: f64,
}

// ── PathFinder ────────────────────────────────────────────────────────────────

/// Read-only path queries over a finished [`Network`].
pub struct PathFinder<'a> {
    network: &'a Network,
}

impl<'a> PathFinder<'a> {
    pub fn new(network: &'a Network) -> Self {
        Self { network }
    }

    // ── Reachability (DFS) ────────────────────────────────────────────────

    /// Every intersection reachable from `source`, in depth-first pre-order
    /// (source first, each vertex at most once).
    pub fn reachable(&self, source: IntersectionId) -> Vec<IntersectionId> {
        if !self.network.contains(source) {
            return Vec::new();
        }
        let mut visited = vec![false; self.network.intersection_count()];
        let mut order = Vec::new();
        self.visit(source, &mut visited, &mut order);
        order
    }

    fn visit(&self, v: IntersectionId, visited: &mut [bool], order: &mut Vec<IntersectionId>) {
        visited[v.index()] = true;
        order.push(v);
        for block in self.network.out_blocks(v) {
            let next = self.network.block(block).to();
            if !visited[next.index()] {
                self.visit(next, visited, order);
            }
        }
    }

    // ── Minimum-hop path (BFS) ────────────────────────────────────────────

    /// The path from `start` to `end` traversing the fewest intersections,
    /// or empty if `end` is unreachable.  `start == end` yields `[start]`.
    ///
    /// Fewest hops is not least traffic: see
    /// [`fastest_path`](Self::fastest_path) for the weighted query.
    pub fn minimize_intersections(
        &self,
        start: IntersectionId,
        end: IntersectionId,
    ) -> Vec<IntersectionId> {
        if !self.network.contains(start) || !self.network.contains(end) {
            return Vec::new();
        }
        let n = self.network.intersection_count();
        let mut visited = vec![false; n];
        let mut pred: Vec<Option<IntersectionId>> = vec![None; n];
        let mut queue = VecDeque::new();

        visited[start.index()] = true;
        queue.push_back(start);

        while let Some(current) = queue.pop_front() {
            if current == end {
                break;
            }
            for block in self.network.out_blocks(current) {
                let next = self.network.block(block).to();
                if !visited[next.index()] {
                    visited[next.index()] = true;
                    pred[next.index()] = Some(current);
                    queue.push_back(next);
                }
            }
        }

        if !visited[end.index()] {
            return Vec::new();
        }
        walk_predecessors(&pred, end)
    }

    // ── Minimum-traffic path (Dijkstra variant) ───────────────────────────

    /// The path from `start` to `end` with the least accumulated traffic,
    /// or empty if unreachable.  `start == end` yields `[start]`.
    ///
    /// Block traffic is non-negative, so the search stops as soon as `end`
    /// leaves the fringe.  A relaxation pushes a fresh fringe entry instead
    /// of updating in place; entries superseded by a later improvement are
    /// skipped when popped.
    pub fn fastest_path(
        &self,
        start: IntersectionId,
        end: IntersectionId,
    ) -> Vec<IntersectionId> {
        if !self.network.contains(start) || !self.network.contains(end) {
            return Vec::new();
        }
        let n = self.network.intersection_count();
        let mut dist = vec![f64::INFINITY; n];
        let mut pred: Vec<Option<IntersectionId>> = vec![None; n];
        let mut fringe = BinaryHeap::new();

        dist[start.index()] = 0.0;
        fringe.push(FringeEntry { traffic: 0.0, node: start });

        while let Some(FringeEntry { traffic, node }) = fringe.pop() {
            if node == end {
                break;
            }
            if traffic > dist[node.index()] {
                continue; // stale entry, superseded by a later improvement
            }
            for block in self.network.out_blocks(node) {
                let block = self.network.block(block);
                let next = block.to();
                let candidate = traffic + block.traffic();
                if candidate < dist[next.index()] {
                    dist[next.index()] = candidate;
                    pred[next.index()] = Some(node);
                    fringe.push(FringeEntry { traffic: candidate, node: next });
                }
            }
        }

        if dist[end.index()].is_infinite() {
            return Vec::new();
        }
        walk_predecessors(&pred, end)
    }

    // ── Path statistics ───────────────────────────────────────────────────

    /// Total length, average traffic factor, and total traffic along `path`.
    ///
    /// Paths of fewer than two intersections yield all-zero statistics.
    /// `path` must connect: consecutive entries without a connecting block
    /// mean it was not produced by a search over this network, reported as
    /// [`GraphError::BrokenPath`].
    pub fn path_information(&self, path: &[IntersectionId]) -> GraphResult<PathInfo> {
        let mut info = PathInfo::default();
        for pair in path.windows(2) {
            let (from, to) = (pair[0], pair[1]);
            if !self.network.contains(from) {
                return Err(GraphError::IntersectionNotFound(from));
            }
            if !self.network.contains(to) {
                return Err(GraphError::IntersectionNotFound(to));
            }
            let block = self
                .network
                .out_blocks(from)
                .map(|id| self.network.block(id))
                .find(|b| b.to() == to)
                .ok_or(GraphError::BrokenPath { from, to })?;
            info.total_length += block.length();
            info.total_traffic += block.traffic();
        }
        if info.total_length > 0.0 {
            info.average_traffic_factor = info.total_traffic / info.total_length;
        }
        Ok(info)
    }
}

// ── Fringe ordering ───────────────────────────────────────────────────────────

/// Fringe entry for the traffic search.  Ordered as a min-heap by traffic
/// (`BinaryHeap` is a max-heap, so the comparison is reversed), with the
/// intersection id as deterministic secondary key.
#[derive(Copy, Clone, PartialEq)]
struct FringeEntry {
    traffic: f64,
    node: IntersectionId,
}

// Traffic values are finite and non-negative, never NaN.
impl Eq for FringeEntry {}

impl Ord for FringeEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .traffic
            .total_cmp(&self.traffic)
            .then_with(|| other.node.cmp(&self.node))
    }
}

impl PartialOrd for FringeEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

// ── Reconstruction ────────────────────────────────────────────────────────────

/// Rebuild a path by walking predecessor links back from `end`.
fn walk_predecessors(pred: &[Option<IntersectionId>], end: IntersectionId) -> Vec<IntersectionId> {
    let mut path = vec![end];
    let mut current = end;
    while let Some(p) = pred[current.index()] {
        path.push(p);
        current = p;
    }
    path.reverse();
    path
}
