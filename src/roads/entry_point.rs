use crate::config::RoadConfig;
use crate::pathfinding::nudge_to_passable;
use crate::roads::StructureAnchor;
use crate::terrain::{GridPos, TerrainOracle};
use rand::Rng;

/// Pick the cell where a road leaves `from` on its way to `to`.
///
/// The point sits on the edge of `from`'s footprint facing `to` along the
/// dominant axis of displacement (horizontal when `|dx| >= |dy|`), shifted
/// along the other axis by a jitter in `[-(half_size-1), half_size-1]` drawn
/// from `rng`. Exactly one value is drawn per call. The result keeps
/// `config.anchor_margin` cells from the grid edge and is nudged onto a
/// passable cell.
pub fn pick_entry_point<T, A, B, R>(
    terrain: &T,
    from: &A,
    to: &B,
    rng: &mut R,
    config: &RoadConfig,
) -> GridPos
where
    T: TerrainOracle + ?Sized,
    A: StructureAnchor + ?Sized,
    B: StructureAnchor + ?Sized,
    R: Rng + ?Sized,
{
    let origin = from.position();
    let target = to.position();
    let dx = target.x - origin.x;
    let dy = target.y - origin.y;

    let half_size = from.half_size().max(0);
    let spread = (half_size - 1).max(0);
    let jitter = rng.gen_range(-spread..=spread);

    let candidate = if dx.abs() >= dy.abs() {
        GridPos::new(origin.x + sign_or_positive(dx) * half_size, origin.y + jitter)
    } else {
        GridPos::new(origin.x + jitter, origin.y + sign_or_positive(dy) * half_size)
    };

    let clamped = candidate.clamp_to_grid(terrain.width(), terrain.height(), config.anchor_margin);
    nudge_to_passable(terrain, clamped, config.max_nudge_radius)
}

/// `signum`, except that zero counts as positive
pub(crate) fn sign_or_positive(value: i32) -> i32 {
    if value < 0 { -1 } else { 1 }
}
