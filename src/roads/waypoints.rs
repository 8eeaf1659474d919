use crate::config::RoadConfig;
use crate::pathfinding::nudge_to_passable;
use crate::roads::entry_point::sign_or_positive;
use crate::terrain::{GridPos, TerrainOracle};

/// Plan the targets a road visits after leaving `start`: one bend, then `end`.
///
/// The bend is pushed from `start` toward `end` by
/// `max(min_primary_bend, |primary| / primary_bend_divisor)` along the
/// dominant axis and sideways by
/// `max(min_secondary_bend, |secondary| / secondary_bend_divisor)`, so even
/// perfectly aligned anchors get a kink.
pub fn plan_waypoints<T>(terrain: &T, start: GridPos, end: GridPos, config: &RoadConfig) -> Vec<GridPos>
where
    T: TerrainOracle + ?Sized,
{
    let dx = end.x - start.x;
    let dy = end.y - start.y;
    let horizontal = dx.abs() >= dy.abs();
    let (primary, secondary) = if horizontal { (dx, dy) } else { (dy, dx) };

    let primary_step = sign_or_positive(primary)
        * config
            .min_primary_bend
            .get()
            .max(primary.abs() / config.primary_bend_divisor.get());
    let secondary_step = sign_or_positive(secondary)
        * config
            .min_secondary_bend
            .get()
            .max(secondary.abs() / config.secondary_bend_divisor.get());

    let candidate = if horizontal {
        GridPos::new(start.x + primary_step, start.y + secondary_step)
    } else {
        GridPos::new(start.x + secondary_step, start.y + primary_step)
    };

    let bend = nudge_to_passable(
        terrain,
        candidate.clamp_to_grid(terrain.width(), terrain.height(), config.anchor_margin),
        config.max_nudge_radius,
    );

    vec![bend, end]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::terrain::{TerrainGrid, TerrainKind};

    fn open_grid(size: u32) -> TerrainGrid {
        TerrainGrid::filled(size, size, TerrainKind::Plains).unwrap()
    }

    #[test]
    fn test_minimum_offsets_on_short_roads() {
        let grid = open_grid(20);
        let waypoints = plan_waypoints(
            &grid,
            GridPos::new(3, 2),
            GridPos::new(14, 15),
            &RoadConfig::default(),
        );

        // dy dominates: 4 down (13 / 3), 2 across (11 / 5)
        assert_eq!(waypoints, vec![GridPos::new(5, 6), GridPos::new(14, 15)]);
    }

    #[test]
    fn test_offsets_scale_with_distance() {
        let grid = open_grid(100);
        let waypoints = plan_waypoints(
            &grid,
            GridPos::new(80, 50),
            GridPos::new(20, 30),
            &RoadConfig::default(),
        );

        assert_eq!(waypoints[0], GridPos::new(60, 46));
        assert_eq!(waypoints[1], GridPos::new(20, 30));
    }

    #[test]
    fn test_aligned_anchors_still_bend() {
        let grid = open_grid(30);
        let start = GridPos::new(4, 10);
        let end = GridPos::new(16, 10);
        let waypoints = plan_waypoints(&grid, start, end, &RoadConfig::default());

        let bend = waypoints[0];
        assert_eq!(bend, GridPos::new(8, 12));
        assert!((bend.y - start.y).abs() >= 2);
    }

    #[test]
    fn test_zero_delta_treated_as_positive() {
        let grid = open_grid(30);
        let start = GridPos::new(10, 10);
        let waypoints = plan_waypoints(&grid, start, start, &RoadConfig::default());

        assert_eq!(waypoints, vec![GridPos::new(14, 12), start]);
    }

    #[test]
    fn test_bend_clamped_and_nudged() {
        let mut grid = open_grid(12);
        grid.set(GridPos::new(10, 3), TerrainKind::Water);
        let waypoints = plan_waypoints(
            &grid,
            GridPos::new(8, 1),
            GridPos::new(10, 9),
            &RoadConfig::default(),
        );

        // Candidate (10, 5) is fine; closer to the edge the margin applies
        assert_eq!(waypoints[0], GridPos::new(10, 5));

        let waypoints = plan_waypoints(
            &grid,
            GridPos::new(9, 1),
            GridPos::new(9, 4),
            &RoadConfig::default(),
        );
        // Candidate (11, 5) is clamped to x = 10
        assert_eq!(waypoints[0], GridPos::new(10, 5));

        grid.set(GridPos::new(10, 4), TerrainKind::Water);
        let waypoints = plan_waypoints(
            &grid,
            GridPos::new(8, 0),
            GridPos::new(10, 4),
            &RoadConfig::default(),
        );
        // Candidate (10, 4) is water, north of it too
        assert_eq!(waypoints[0], GridPos::new(10, 5));
    }
}
