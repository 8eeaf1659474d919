/// Constants for the terrain and road generation system
/// Grid limits
pub const MAX_GRID_DIMENSION: u32 = 4096;

/// Pathfinding constants
pub const BASE_STEP_COST: u32 = 10;
pub const TURN_PENALTY: u32 = 3;
pub const TERRAIN_COST_SCALE: f32 = 4.0;

/// Bend waypoint placement
pub const MIN_PRIMARY_BEND: i32 = 4;
pub const PRIMARY_BEND_DIVISOR: i32 = 3;
pub const MIN_SECONDARY_BEND: i32 = 2;
pub const SECONDARY_BEND_DIVISOR: i32 = 5;

/// Cells kept free between an anchor and the grid edge
pub const ANCHOR_MARGIN: i32 = 1;

/// Terrain classification thresholds (normalized elevation and moisture)
pub const WATER_LEVEL: f32 = 0.30;
pub const SHORE_LEVEL: f32 = 0.36;
pub const HILL_LEVEL: f32 = 0.68;
pub const MOUNTAIN_LEVEL: f32 = 0.80;
pub const CLIFF_LEVEL: f32 = 0.93;
pub const DRY_MOISTURE: f32 = 0.30;
pub const WET_MOISTURE: f32 = 0.72;
