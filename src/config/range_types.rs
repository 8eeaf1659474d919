use derive_more::Display;
use serde::{Deserialize, Serialize};

use crate::terrain::constants::{
    MIN_PRIMARY_BEND, MIN_SECONDARY_BEND, PRIMARY_BEND_DIVISOR, SECONDARY_BEND_DIVISOR,
    TERRAIN_COST_SCALE,
};

/// Terrain cost multiplier constrained to [0.0, 64.0]
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Display, Serialize, Deserialize)]
#[serde(from = "f32")]
pub struct TerrainCostScale(f32);

impl TerrainCostScale {
    const MIN: f32 = 0.0;
    const MAX: f32 = 64.0;

    pub fn new(value: f32) -> Self {
        Self(value.clamp(Self::MIN, Self::MAX))
    }

    pub fn get(self) -> f32 {
        self.0
    }
}

impl From<f32> for TerrainCostScale {
    fn from(value: f32) -> Self {
        Self::new(value)
    }
}

impl Default for TerrainCostScale {
    fn default() -> Self {
        Self::new(TERRAIN_COST_SCALE)
    }
}

/// A minimum bend offset in cells, constrained to [1, 256] so a bend never
/// collapses onto the straight line
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Display, Serialize, Deserialize)]
#[serde(from = "i32")]
pub struct BendOffset(i32);

impl BendOffset {
    const MIN: i32 = 1;
    const MAX: i32 = 256;

    pub fn new(value: i32) -> Self {
        Self(value.clamp(Self::MIN, Self::MAX))
    }

    pub fn get(self) -> i32 {
        self.0
    }

    pub fn primary() -> Self {
        Self::new(MIN_PRIMARY_BEND)
    }

    pub fn secondary() -> Self {
        Self::new(MIN_SECONDARY_BEND)
    }
}

impl From<i32> for BendOffset {
    fn from(value: i32) -> Self {
        Self::new(value)
    }
}

/// Divisor applied to a displacement when sizing a bend, constrained to [1, 64]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Display, Serialize, Deserialize)]
#[serde(from = "i32")]
pub struct BendDivisor(i32);

impl BendDivisor {
    const MIN: i32 = 1;
    const MAX: i32 = 64;

    pub fn new(value: i32) -> Self {
        Self(value.clamp(Self::MIN, Self::MAX))
    }

    pub fn get(self) -> i32 {
        self.0
    }

    pub fn primary() -> Self {
        Self::new(PRIMARY_BEND_DIVISOR)
    }

    pub fn secondary() -> Self {
        Self::new(SECONDARY_BEND_DIVISOR)
    }
}

impl From<i32> for BendDivisor {
    fn from(value: i32) -> Self {
        Self::new(value)
    }
}
