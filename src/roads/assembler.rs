use crate::pathfinding::GridPathfinder;
use crate::terrain::{GridPos, TerrainOracle};
use tracing::debug;

/// Connect `entry_start` to each waypoint in turn and stitch the segments.
///
/// Joint cells appear once. If a segment cannot be routed, assembly stops and
/// the road built so far is returned; the result always contains at least
/// `entry_start`.
pub fn assemble<T>(
    pathfinder: &GridPathfinder<'_, T>,
    entry_start: GridPos,
    waypoints: &[GridPos],
) -> Vec<GridPos>
where
    T: TerrainOracle + ?Sized,
{
    let mut path = vec![entry_start];
    let mut current = entry_start;

    for (index, &waypoint) in waypoints.iter().enumerate() {
        let segment = pathfinder.find_path(current, waypoint);
        if segment.is_empty() {
            debug!(
                "Segment {} ({} -> {}) unreachable, truncating road at {} cells",
                index,
                current,
                waypoint,
                path.len()
            );
            break;
        }

        path.extend(segment.into_iter().skip(1));
        current = waypoint;
    }

    path
}
