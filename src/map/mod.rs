use crate::errors::{RoadError, RoadResult};
use crate::roads::{RoadNetwork, Settlement};
use crate::terrain::{TerrainGrid, TerrainOracle};
use serde::{Deserialize, Serialize};
use std::path::Path;
use validator::Validate;

/// A generated world: terrain, the settlements on it and the roads between them
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct WorldMap {
    #[validate(length(min = 1, max = 128))]
    pub name: String,
    pub terrain: TerrainGrid,
    pub settlements: Vec<Settlement>,
    pub roads: RoadNetwork,
}

impl WorldMap {
    /// Create a new world map with validation
    pub fn new(
        name: String,
        terrain: TerrainGrid,
        settlements: Vec<Settlement>,
        roads: RoadNetwork,
    ) -> RoadResult<Self> {
        let map = Self {
            name,
            terrain,
            settlements,
            roads,
        };
        map.check()?;
        Ok(map)
    }

    /// Validate the map, its terrain and every settlement
    pub fn check(&self) -> RoadResult<()> {
        self.validate().map_err(|e| RoadError::CorruptedMapFile {
            reason: format!("Map validation failed: {e}"),
        })?;
        self.terrain.check_integrity()?;

        for settlement in &self.settlements {
            settlement
                .validate()
                .map_err(|e| RoadError::InvalidSettlement {
                    reason: format!("{}: {e}", settlement.name),
                })?;
            if !self.terrain.in_bounds(settlement.position) {
                return Err(RoadError::InvalidSettlement {
                    reason: format!(
                        "{} at {} lies outside the {}x{} grid",
                        settlement.name,
                        settlement.position,
                        self.terrain.width(),
                        self.terrain.height()
                    ),
                });
            }
        }
        Ok(())
    }

    /// Load a map previously written by [`save_to_file`](Self::save_to_file)
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> RoadResult<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(RoadError::MapFileNotFound {
                path: path.to_path_buf(),
            });
        }

        let data = std::fs::read(path)?;
        let (map, _): (WorldMap, usize) =
            bincode::serde::decode_from_slice(&data, bincode::config::standard()).map_err(|e| {
                RoadError::CorruptedMapFile {
                    reason: format!("Failed to deserialize map data: {e}"),
                }
            })?;

        map.check()?;
        Ok(map)
    }

    /// Save the map in binary form, creating parent directories as needed
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> RoadResult<()> {
        self.check()?;

        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let data =
            bincode::serde::encode_to_vec(self, bincode::config::standard()).map_err(|e| {
                RoadError::CorruptedMapFile {
                    reason: format!("Failed to serialize map: {e}"),
                }
            })?;
        std::fs::write(path, data)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RoadConfig;
    use crate::roads::RoadGenerator;
    use crate::terrain::{GridPos, TerrainKind};

    fn sample_map() -> WorldMap {
        let terrain = TerrainGrid::filled(24, 24, TerrainKind::Plains).unwrap();
        let settlements = vec![
            Settlement::new(1, "Ashford", GridPos::new(4, 4), 1).unwrap(),
            Settlement::new(2, "Brook", GridPos::new(18, 16), 2).unwrap(),
        ];
        let generator = RoadGenerator::new(&terrain, RoadConfig::default());
        let road = generator.generate_seeded(&settlements[0], &settlements[1], 11);

        WorldMap::new(
            "test world".to_string(),
            terrain.clone(),
            settlements,
            RoadNetwork::new(vec![road]),
        )
        .unwrap()
    }

    #[test]
    fn test_map_creation() {
        let map = sample_map();
        assert_eq!(map.name, "test world");
        assert_eq!(map.settlements.len(), 2);
        assert_eq!(map.roads.roads.len(), 1);
    }

    #[test]
    fn test_settlement_outside_grid_rejected() {
        let terrain = TerrainGrid::filled(8, 8, TerrainKind::Plains).unwrap();
        let far = Settlement::new(1, "Far", GridPos::new(20, 2), 1).unwrap();

        let result = WorldMap::new("bad".to_string(), terrain, vec![far], RoadNetwork::default());
        assert!(result.is_err());
    }

    #[test]
    fn test_save_and_load() {
        let map = sample_map();
        let path = std::env::temp_dir()
            .join(format!("roadgen-map-{}", std::process::id()))
            .join("world.bin");

        map.save_to_file(&path).unwrap();
        let loaded = WorldMap::load_from_file(&path).unwrap();
        assert_eq!(loaded, map);

        if let Some(dir) = path.parent() {
            let _ = std::fs::remove_dir_all(dir);
        }
    }

    #[test]
    fn test_missing_and_corrupted_files() {
        let dir = std::env::temp_dir().join(format!("roadgen-corrupt-{}", std::process::id()));
        let missing = dir.join("missing.bin");
        assert!(matches!(
            WorldMap::load_from_file(&missing),
            Err(RoadError::MapFileNotFound { .. })
        ));

        std::fs::create_dir_all(&dir).unwrap();
        let garbage = dir.join("garbage.bin");
        std::fs::write(&garbage, [0xFF, 0x00, 0x13]).unwrap();
        assert!(WorldMap::load_from_file(&garbage).is_err());

        let _ = std::fs::remove_dir_all(dir);
    }
}
