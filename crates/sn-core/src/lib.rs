//! `sn-core` — foundational types for the streetnet map toolkit.
//!
//! This crate is a dependency of every other `sn-*` crate.  It intentionally
//! has no sibling dependencies and minimal external ones (only `rand` and
//! `rand_distr`, plus optional `serde`).
//!
//! # What lives here
//!
//! | Module    | Contents                                              |
//! |-----------|-------------------------------------------------------|
//! | [`ids`]   | `IntersectionId`, `BlockId`                           |
//! | [`coord`] | `Coordinate`, Euclidean distance                      |
//! | [`rng`]   | `TrafficModel`, `GaussianTraffic`, `FixedTraffic`     |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                |
//! |---------|-------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public types.   |

pub mod coord;
pub mod ids;
pub mod rng;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use coord::Coordinate;
pub use ids::{BlockId, IntersectionId};
pub use rng::{FixedTraffic, GaussianTraffic, TrafficModel};
