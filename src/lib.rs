pub mod config;
pub mod errors;
pub mod map;
pub mod pathfinding;
pub mod roads;
pub mod terrain;
pub mod terrain_generation;

// Selective re-exports for external consumers

pub use config::RoadConfig;
pub use errors::{RoadError, RoadResult};
pub use map::WorldMap;
pub use pathfinding::{GridPathfinder, PathfindingConfig, nudge_to_passable};
pub use roads::{
    Road, RoadGenerator, RoadNetwork, RoadQuality, Settlement, StructureAnchor, StructureId,
};
pub use terrain::{Direction, GridPos, TerrainGrid, TerrainKind, TerrainOracle};
