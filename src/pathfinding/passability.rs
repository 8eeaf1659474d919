use crate::terrain::{GridPos, TerrainOracle};
use pathfinding::prelude::bfs_reach;
use tracing::{debug, warn};

/// Snap `point` to the nearest in-bounds passable cell.
///
/// Points that are already usable come back unchanged. An off-grid point is
/// first projected onto the nearest grid cell, then a breadth-first search
/// over in-bounds 4-neighbours runs outward (expansion order N, S, W, E) and
/// the first passable cell wins, so the result has minimum hop count.
///
/// The search is bounded by `max_radius` (Manhattan distance from `point`,
/// including the hops needed to reach the grid), defaulting to a radius that
/// covers the whole grid. When nothing passable is found the original point
/// is returned as-is.
pub fn nudge_to_passable<T>(terrain: &T, point: GridPos, max_radius: Option<u32>) -> GridPos
where
    T: TerrainOracle + ?Sized,
{
    if terrain.in_bounds(point) && terrain.is_passable(point) {
        return point;
    }
    if terrain.width() == 0 || terrain.height() == 0 {
        warn!("Cannot nudge {} onto an empty grid", point);
        return point;
    }

    let entry = point.clamp_to_grid(terrain.width(), terrain.height(), 0);
    let outside = point.x.abs_diff(entry.x).saturating_add(point.y.abs_diff(entry.y));
    let radius = match max_radius {
        Some(limit) if limit < outside => {
            warn!(
                "{} lies {} steps off the grid, beyond the nudge radius {}; keeping original point",
                point, outside, limit
            );
            return point;
        }
        Some(limit) => limit - outside,
        None => terrain.width().saturating_add(terrain.height()),
    };

    let found = bfs_reach(entry, |&cell: &GridPos| {
        cell.neighbors()
            .into_iter()
            .map(|(_, next)| next)
            .filter(|&next| terrain.in_bounds(next) && next.manhattan_distance(entry) <= radius)
            .collect::<Vec<_>>()
    })
    .find(|&cell| terrain.is_passable(cell));

    match found {
        Some(cell) => {
            debug!("Nudged {} to passable cell {}", point, cell);
            cell
        }
        None => {
            warn!(
                "No passable cell within {} steps of {}; keeping original point",
                radius, point
            );
            point
        }
    }
}
