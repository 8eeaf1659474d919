use derive_more::{Add, Display, Sub};
use serde::{Deserialize, Serialize};

/// Integer cell coordinate on the terrain grid.
///
/// Signed so that callers may hand in points that lie off the grid; the
/// addressable domain is `[0, width) x [0, height)`.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Add, Sub, Display, Serialize,
    Deserialize,
)]
#[display("({x}, {y})")]
pub struct GridPos {
    pub x: i32,
    pub y: i32,
}

impl GridPos {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// The neighbouring cell one step in `direction`, saturating at the `i32` range
    pub fn step(self, direction: Direction) -> Self {
        let (dx, dy) = direction.offset();
        Self::new(self.x.saturating_add(dx), self.y.saturating_add(dy))
    }

    /// The four cardinal neighbours in search order (N, S, W, E)
    pub fn neighbors(self) -> [(Direction, GridPos); 4] {
        Direction::ALL.map(|direction| (direction, self.step(direction)))
    }

    pub fn manhattan_distance(self, other: GridPos) -> u32 {
        self.x.abs_diff(other.x).saturating_add(self.y.abs_diff(other.y))
    }

    /// Clamp into `[margin, width-1-margin] x [margin, height-1-margin]`.
    ///
    /// Grids too small to keep the margin collapse onto their centre line
    /// instead of producing an inverted range.
    pub fn clamp_to_grid(self, width: u32, height: u32, margin: i32) -> Self {
        Self::new(
            clamp_axis(self.x, width, margin),
            clamp_axis(self.y, height, margin),
        )
    }
}

fn clamp_axis(value: i32, extent: u32, margin: i32) -> i32 {
    let extent = extent as i32;
    let lo = margin;
    let hi = extent - 1 - margin;
    if lo > hi {
        return ((extent - 1) / 2).max(0);
    }
    value.clamp(lo, hi)
}

impl From<(i32, i32)> for GridPos {
    fn from((x, y): (i32, i32)) -> Self {
        Self::new(x, y)
    }
}

/// Cardinal movement direction on the grid. `y` grows southwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    North,
    South,
    West,
    East,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::North,
        Direction::South,
        Direction::West,
        Direction::East,
    ];

    pub fn offset(self) -> (i32, i32) {
        match self {
            Direction::North => (0, -1),
            Direction::South => (0, 1),
            Direction::West => (-1, 0),
            Direction::East => (1, 0),
        }
    }

    /// Direction of a single 4-connected step, if `from` and `to` are neighbours
    pub fn between(from: GridPos, to: GridPos) -> Option<Direction> {
        match (to.x - from.x, to.y - from.y) {
            (0, -1) => Some(Direction::North),
            (0, 1) => Some(Direction::South),
            (-1, 0) => Some(Direction::West),
            (1, 0) => Some(Direction::East),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_neighbors_order() {
        let pos = GridPos::new(1, 1);
        let neighbors = pos.neighbors();

        assert_eq!(neighbors[0], (Direction::North, GridPos::new(1, 0)));
        assert_eq!(neighbors[1], (Direction::South, GridPos::new(1, 2)));
        assert_eq!(neighbors[2], (Direction::West, GridPos::new(0, 1)));
        assert_eq!(neighbors[3], (Direction::East, GridPos::new(2, 1)));
    }

    #[test]
    fn test_manhattan_distance() {
        let a = GridPos::new(0, 0);
        let b = GridPos::new(3, -4);

        assert_eq!(a.manhattan_distance(b), 7);
        assert_eq!(b.manhattan_distance(a), 7);

        let far = GridPos::new(i32::MIN, i32::MIN);
        assert_eq!(far.manhattan_distance(GridPos::new(i32::MAX, i32::MAX)), u32::MAX);
        assert_eq!(
            GridPos::new(i32::MAX, 0).step(Direction::East),
            GridPos::new(i32::MAX, 0)
        );
    }

    #[test]
    fn test_clamp_to_grid() {
        assert_eq!(GridPos::new(-5, 30).clamp_to_grid(20, 20, 1), GridPos::new(1, 18));
        assert_eq!(GridPos::new(7, 7).clamp_to_grid(20, 20, 1), GridPos::new(7, 7));
        // Too narrow for the margin: collapse to the middle
        assert_eq!(GridPos::new(0, 5).clamp_to_grid(2, 20, 1), GridPos::new(0, 5));
    }

    #[test]
    fn test_direction_between() {
        let origin = GridPos::new(4, 4);
        for direction in Direction::ALL {
            assert_eq!(Direction::between(origin, origin.step(direction)), Some(direction));
        }
        assert_eq!(Direction::between(origin, GridPos::new(5, 5)), None);
        assert_eq!(Direction::between(origin, origin), None);
    }

    #[test]
    fn test_display_and_arithmetic() {
        let pos = GridPos::new(2, 3) + GridPos::new(1, -1);
        assert_eq!(pos, GridPos::new(3, 2));
        assert_eq!(pos.to_string(), "(3, 2)");
        assert_eq!(GridPos::new(3, 2) - GridPos::new(3, 2), GridPos::default());
    }
}
