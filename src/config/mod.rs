use crate::errors::{RoadError, RoadResult};
use crate::pathfinding::PathfindingConfig;
use crate::terrain::constants::{ANCHOR_MARGIN, BASE_STEP_COST, TURN_PENALTY};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};
use validator::Validate;

pub mod range_types;

pub use range_types::{BendDivisor, BendOffset, TerrainCostScale};

/// Tunables for road generation.
///
/// Every field has a default, so a partial TOML file only overrides what it
/// names.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(default)]
// NOTE: When adding new fields, update config.example.toml in the project root
pub struct RoadConfig {
    // Search costs
    #[validate(range(min = 1, max = 1000))]
    pub base_step_cost: u32,
    #[validate(range(max = 1000))]
    pub turn_penalty: u32,
    pub terrain_cost_scale: TerrainCostScale,

    // Bend placement
    pub min_primary_bend: BendOffset,
    pub primary_bend_divisor: BendDivisor,
    pub min_secondary_bend: BendOffset,
    pub secondary_bend_divisor: BendDivisor,

    // Anchors
    #[validate(range(min = 0, max = 16))]
    pub anchor_margin: i32,

    // Safety bounds
    pub max_expansions: Option<usize>,
    pub max_nudge_radius: Option<u32>,
}

impl Default for RoadConfig {
    fn default() -> Self {
        Self {
            base_step_cost: BASE_STEP_COST,
            turn_penalty: TURN_PENALTY,
            terrain_cost_scale: TerrainCostScale::default(),
            min_primary_bend: BendOffset::primary(),
            primary_bend_divisor: BendDivisor::primary(),
            min_secondary_bend: BendOffset::secondary(),
            secondary_bend_divisor: BendDivisor::secondary(),
            anchor_margin: ANCHOR_MARGIN,
            max_expansions: None,
            max_nudge_radius: None,
        }
    }
}

impl RoadConfig {
    /// Search parameters for the grid pathfinder
    pub fn pathfinding(&self) -> PathfindingConfig {
        PathfindingConfig {
            base_step_cost: self.base_step_cost,
            turn_penalty: self.turn_penalty,
            terrain_cost_scale: self.terrain_cost_scale.get(),
            max_expansions: self.max_expansions,
        }
    }

    /// Parse and validate a config from TOML text
    pub fn from_toml_str(contents: &str) -> RoadResult<Self> {
        let config: RoadConfig = toml::from_str(contents)?;
        config.validate().map_err(|e| RoadError::InvalidConfig {
            reason: e.to_string(),
        })?;
        Ok(config)
    }

    /// Load a config file, failing on any read, parse or validation error
    pub fn load_from_path<P: AsRef<Path>>(path: P) -> RoadResult<Self> {
        let contents = fs::read_to_string(path.as_ref())?;
        Self::from_toml_str(&contents)
    }

    pub fn save_to_path<P: AsRef<Path>>(&self, path: P) -> RoadResult<()> {
        let contents = toml::to_string_pretty(self)?;
        if let Some(parent) = path.as_ref().parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, contents)?;
        Ok(())
    }
}

pub fn get_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|mut path| {
        path.push("roadgen");
        path.push("config.toml");
        path
    })
}

/// Load the user config, falling back to defaults when it is missing or invalid
pub fn load_config() -> RoadConfig {
    let Some(config_path) = get_config_path() else {
        return RoadConfig::default();
    };

    if !config_path.exists() {
        debug!("No config at {}, using defaults", config_path.display());
        return RoadConfig::default();
    }

    match RoadConfig::load_from_path(&config_path) {
        Ok(config) => config,
        Err(e) => {
            warn!(
                "Ignoring config at {}: {}",
                config_path.display(),
                e
            );
            RoadConfig::default()
        }
    }
}

pub fn save_config(config: &RoadConfig) -> RoadResult<()> {
    let config_path = get_config_path().ok_or(RoadError::ConfigDirNotFound)?;
    config.save_to_path(config_path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = RoadConfig::default();
        assert!(config.validate().is_ok());

        let search = config.pathfinding();
        assert_eq!(search.base_step_cost, 10);
        assert_eq!(search.turn_penalty, 3);
        assert_eq!(search.terrain_cost_scale, 4.0);
        assert_eq!(search.max_expansions, None);
    }

    #[test]
    fn test_partial_toml_overrides() {
        let config = RoadConfig::from_toml_str(
            r#"
            turn_penalty = 7
            max_expansions = 5000
            min_secondary_bend = 3
            "#,
        )
        .unwrap();

        assert_eq!(config.turn_penalty, 7);
        assert_eq!(config.max_expansions, Some(5000));
        assert_eq!(config.min_secondary_bend.get(), 3);
        assert_eq!(config.base_step_cost, 10);
        assert_eq!(config.primary_bend_divisor.get(), 3);
    }

    #[test]
    fn test_invalid_toml_rejected() {
        assert!(RoadConfig::from_toml_str("base_step_cost = 0").is_err());
        assert!(RoadConfig::from_toml_str("anchor_margin = 40").is_err());
        assert!(RoadConfig::from_toml_str("turn_penalty = \"sharp\"").is_err());
    }

    #[test]
    fn test_out_of_range_values_clamped_on_load() {
        let config = RoadConfig::from_toml_str(
            r#"
            min_primary_bend = -5
            min_secondary_bend = 0
            primary_bend_divisor = 0
            terrain_cost_scale = -3.0
            "#,
        )
        .unwrap();

        assert_eq!(config.min_primary_bend.get(), 1);
        assert_eq!(config.min_secondary_bend.get(), 1);
        assert_eq!(config.primary_bend_divisor.get(), 1);
        assert_eq!(config.terrain_cost_scale.get(), 0.0);
    }

    #[test]
    fn test_save_and_load_round_trip() {
        let dir = std::env::temp_dir().join(format!("roadgen-config-{}", std::process::id()));
        let path = dir.join("config.toml");

        let config = RoadConfig {
            turn_penalty: 5,
            max_nudge_radius: Some(12),
            ..RoadConfig::default()
        };
        config.save_to_path(&path).unwrap();
        let loaded = RoadConfig::load_from_path(&path).unwrap();
        assert_eq!(loaded, config);

        let _ = fs::remove_dir_all(dir);
    }
}
