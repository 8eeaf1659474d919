//! Road generation between settlements.
//!
//! A road is built in four stages: an entry point is picked on each
//! settlement's footprint, a bend waypoint is planned between them, the grid
//! pathfinder connects the points in order, and the segments are stitched into
//! one polyline. All failures degrade into a shorter road, never an error.

use crate::errors::{RoadError, RoadResult};
use crate::terrain::GridPos;
use derive_more::{Display, From};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use validator::Validate;

pub mod assembler;
pub mod entry_point;
pub mod generator;
pub mod waypoints;

pub use assembler::assemble;
pub use entry_point::pick_entry_point;
pub use generator::{RoadGenerator, road_seed};
pub use waypoints::plan_waypoints;

/// Identifier of a settlement or other structure a road can attach to
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Display, From, Serialize, Deserialize,
)]
pub struct StructureId(pub u32);

/// Anything a road can start or end at: a centre cell and a square footprint.
pub trait StructureAnchor {
    fn id(&self) -> StructureId;
    fn name(&self) -> &str;
    fn position(&self) -> GridPos;
    /// Half the side length of the footprint, in cells
    fn half_size(&self) -> i32;
}

/// A settlement placed on the terrain grid
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct Settlement {
    pub id: StructureId,
    #[validate(length(min = 1, max = 64))]
    pub name: String,
    pub position: GridPos,
    #[validate(range(min = 0, max = 64))]
    pub half_size: i32,
}

impl Settlement {
    /// Create a new settlement with validation
    pub fn new(
        id: impl Into<StructureId>,
        name: impl Into<String>,
        position: GridPos,
        half_size: i32,
    ) -> RoadResult<Self> {
        let settlement = Self {
            id: id.into(),
            name: name.into(),
            position,
            half_size,
        };

        settlement
            .validate()
            .map_err(|e| RoadError::InvalidSettlement {
                reason: format!("{}: {e}", settlement.name),
            })?;

        Ok(settlement)
    }
}

impl StructureAnchor for Settlement {
    fn id(&self) -> StructureId {
        self.id
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn position(&self) -> GridPos {
        self.position
    }

    fn half_size(&self) -> i32 {
        self.half_size
    }
}

/// Road quality label, assigned by game logic after generation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RoadQuality {
    Trail,
    Dirt,
    Gravel,
    Paved,
}

/// A generated road: an ordered 4-connected path between two structures.
///
/// The path is fixed at construction. Only the quality label can change later.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Road {
    name: String,
    endpoints: (StructureId, StructureId),
    path: Vec<GridPos>,
    quality: Option<RoadQuality>,
}

impl Road {
    pub fn new(name: String, endpoints: (StructureId, StructureId), path: Vec<GridPos>) -> Self {
        Self {
            name,
            endpoints,
            path,
            quality: None,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn endpoints(&self) -> (StructureId, StructureId) {
        self.endpoints
    }

    pub fn path(&self) -> &[GridPos] {
        &self.path
    }

    /// Number of cells on the path
    pub fn len(&self) -> usize {
        self.path.len()
    }

    pub fn is_empty(&self) -> bool {
        self.path.is_empty()
    }

    pub fn quality(&self) -> Option<RoadQuality> {
        self.quality
    }

    pub fn set_quality(&mut self, quality: RoadQuality) {
        self.quality = Some(quality);
    }

    pub fn connects(&self, id: StructureId) -> bool {
        self.endpoints.0 == id || self.endpoints.1 == id
    }
}

/// The set of roads produced for a world
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RoadNetwork {
    pub roads: Vec<Road>,
}

impl RoadNetwork {
    pub fn new(roads: Vec<Road>) -> Self {
        Self { roads }
    }

    /// Total number of road cells, counting shared cells once per road
    pub fn total_length(&self) -> usize {
        self.roads.iter().map(Road::len).sum()
    }

    pub fn roads_for(&self, id: StructureId) -> impl Iterator<Item = &Road> {
        self.roads.iter().filter(move |road| road.connects(id))
    }

    /// Cells crossed by three or more roads, sorted by position
    pub fn junctions(&self) -> Vec<GridPos> {
        let mut counts: HashMap<GridPos, u32> = HashMap::new();

        for road in &self.roads {
            let mut seen = road.path().to_vec();
            seen.sort_unstable();
            seen.dedup();
            for cell in seen {
                *counts.entry(cell).or_insert(0) += 1;
            }
        }

        let mut junctions: Vec<GridPos> = counts
            .into_iter()
            .filter(|&(_, count)| count >= 3)
            .map(|(cell, _)| cell)
            .collect();
        junctions.sort_unstable();
        junctions
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn road(id: u32, from: u32, to: u32, cells: &[(i32, i32)]) -> Road {
        Road::new(
            format!("road {id}"),
            (StructureId(from), StructureId(to)),
            cells.iter().map(|&c| GridPos::from(c)).collect(),
        )
    }

    #[test]
    fn test_settlement_creation() {
        let town = Settlement::new(1, "Ashford", GridPos::new(4, 5), 2).unwrap();
        assert_eq!(town.id(), StructureId(1));
        assert_eq!(town.name(), "Ashford");
        assert_eq!(town.position(), GridPos::new(4, 5));
        assert_eq!(town.half_size(), 2);
    }

    #[test]
    fn test_settlement_validation() {
        assert!(Settlement::new(1, "", GridPos::new(0, 0), 1).is_err());
        assert!(Settlement::new(1, "Bigtown", GridPos::new(0, 0), 100).is_err());
        assert!(Settlement::new(1, "Hut", GridPos::new(0, 0), -1).is_err());
    }

    #[test]
    fn test_road_accessors() {
        let mut road = road(1, 1, 2, &[(0, 0), (1, 0), (1, 1)]);
        assert_eq!(road.len(), 3);
        assert!(!road.is_empty());
        assert_eq!(road.endpoints(), (StructureId(1), StructureId(2)));
        assert!(road.connects(StructureId(2)));
        assert!(!road.connects(StructureId(3)));
        assert_eq!(road.quality(), None);

        road.set_quality(RoadQuality::Gravel);
        assert_eq!(road.quality(), Some(RoadQuality::Gravel));
    }

    #[test]
    fn test_network_junctions() {
        let network = RoadNetwork::new(vec![
            road(1, 1, 2, &[(0, 1), (1, 1), (2, 1)]),
            road(2, 3, 4, &[(1, 0), (1, 1), (1, 2)]),
            road(3, 1, 4, &[(1, 1), (1, 2), (2, 2)]),
        ]);

        assert_eq!(network.junctions(), vec![GridPos::new(1, 1)]);
        assert_eq!(network.total_length(), 9);
        assert_eq!(network.roads_for(StructureId(1)).count(), 2);
        assert_eq!(network.roads_for(StructureId(4)).count(), 2);
    }

    #[test]
    fn test_structure_id_display() {
        assert_eq!(StructureId(7).to_string(), "7");
        assert_eq!(StructureId::from(3), StructureId(3));
    }
}
