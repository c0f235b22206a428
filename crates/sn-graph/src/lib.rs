//! `sn-graph` — street-network graph, map construction, and path search.
//!
//! # Crate layout
//!
//! | Module         | Contents                                              |
//! |----------------|-------------------------------------------------------|
//! | [`network`]    | `Intersection`, `Block`, `Network`                    |
//! | [`builder`]    | `StreetSpec`/`BlockSpec`, `MapBuilder`, `MapObserver` |
//! | [`loader`]     | map text parsing: `load_map_reader`, `load_map_path`  |
//! | [`pathfinder`] | `PathFinder`, `PathInfo`                              |
//! | [`error`]      | `GraphError`, `GraphResult<T>`                        |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                               |
//! |---------|------------------------------------------------------|
//! | `serde` | Derives `Serialize`/`Deserialize` on public types.   |

pub mod builder;
pub mod error;
pub mod loader;
pub mod network;
pub mod pathfinder;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use builder::{BlockSpec, MapBuilder, MapObserver, NoopObserver, StreetSpec};
pub use error::{GraphError, GraphResult};
pub use loader::{MapFile, load_map_path, load_map_reader, parse_streets_reader};
pub use network::{Block, Intersection, Network};
pub use pathfinder::{PathFinder, PathInfo};
