use crate::errors::{RoadError, RoadResult};
use serde::{Deserialize, Serialize};
use validator::Validate;

pub mod constants;
pub mod coordinates;

pub use coordinates::{Direction, GridPos};

use constants::MAX_GRID_DIMENSION;

/// Read-only view of the terrain consumed by the road generator.
///
/// Implementations must be cheap to query; the pathfinder calls
/// `is_passable` and `movement_cost` once per explored edge.
pub trait TerrainOracle {
    fn width(&self) -> u32;
    fn height(&self) -> u32;

    /// Whether a road may run through this cell. Out-of-bounds cells are never passable.
    fn is_passable(&self, pos: GridPos) -> bool;

    /// Movement-cost multiplier, `>= 0`. Higher is more expensive.
    fn movement_cost(&self, pos: GridPos) -> f32;

    fn in_bounds(&self, pos: GridPos) -> bool {
        pos.x >= 0 && pos.y >= 0 && (pos.x as u32) < self.width() && (pos.y as u32) < self.height()
    }
}

/// Terrain classification of a single grid cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum TerrainKind {
    #[default]
    Plains,
    Grassland,
    Forest,
    Hills,
    Desert,
    Swamp,
    Tundra,
    Mountains,
    Water,
    Cliff,
}

impl TerrainKind {
    pub fn is_passable(self) -> bool {
        !matches!(self, TerrainKind::Water | TerrainKind::Cliff)
    }

    pub fn movement_cost(self) -> f32 {
        match self {
            TerrainKind::Plains | TerrainKind::Grassland => 1.0,
            TerrainKind::Desert => 1.5,
            TerrainKind::Forest | TerrainKind::Tundra => 2.0,
            TerrainKind::Hills => 2.5,
            TerrainKind::Swamp => 3.0,
            TerrainKind::Mountains => 5.0,
            TerrainKind::Water | TerrainKind::Cliff => f32::INFINITY,
        }
    }

    /// Single-character glyph used by the text grid format
    pub fn glyph(self) -> char {
        match self {
            TerrainKind::Plains => '.',
            TerrainKind::Grassland => ',',
            TerrainKind::Forest => 'f',
            TerrainKind::Hills => 'h',
            TerrainKind::Desert => 'd',
            TerrainKind::Swamp => 's',
            TerrainKind::Tundra => 't',
            TerrainKind::Mountains => 'm',
            TerrainKind::Water => '~',
            TerrainKind::Cliff => '#',
        }
    }

    pub fn from_glyph(glyph: char) -> Option<Self> {
        let kind = match glyph {
            '.' => TerrainKind::Plains,
            ',' => TerrainKind::Grassland,
            'f' => TerrainKind::Forest,
            'h' => TerrainKind::Hills,
            'd' => TerrainKind::Desert,
            's' => TerrainKind::Swamp,
            't' => TerrainKind::Tundra,
            'm' => TerrainKind::Mountains,
            '~' => TerrainKind::Water,
            '#' => TerrainKind::Cliff,
            _ => return None,
        };
        Some(kind)
    }
}

/// Finished terrain grid, stored row-major
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct TerrainGrid {
    #[validate(range(min = 1, max = 4096))]
    width: u32,
    #[validate(range(min = 1, max = 4096))]
    height: u32,
    cells: Vec<TerrainKind>,
}

impl TerrainGrid {
    /// Create a new grid with validation
    pub fn new(width: u32, height: u32, cells: Vec<TerrainKind>) -> RoadResult<Self> {
        if width == 0 || height == 0 || width > MAX_GRID_DIMENSION || height > MAX_GRID_DIMENSION {
            return Err(RoadError::InvalidTerrain {
                reason: format!(
                    "Grid dimensions {width}x{height} must be within 1..={MAX_GRID_DIMENSION}"
                ),
            });
        }

        let grid = Self {
            width,
            height,
            cells,
        };
        grid.check_integrity()?;
        Ok(grid)
    }

    /// Grid where every cell has the same kind
    pub fn filled(width: u32, height: u32, kind: TerrainKind) -> RoadResult<Self> {
        Self::new(width, height, vec![kind; (width as usize) * (height as usize)])
    }

    /// Parse a grid from rows of glyphs (see [`TerrainKind::glyph`])
    pub fn from_rows<S: AsRef<str>>(rows: &[S]) -> RoadResult<Self> {
        let height = rows.len() as u32;
        let width = rows.first().map(|r| r.as_ref().chars().count()).unwrap_or(0) as u32;
        let mut cells = Vec::with_capacity((width * height) as usize);

        for (y, row) in rows.iter().enumerate() {
            let row = row.as_ref();
            if row.chars().count() as u32 != width {
                return Err(RoadError::InvalidTerrain {
                    reason: format!("Row {y} has {} cells, expected {width}", row.chars().count()),
                });
            }
            for (x, glyph) in row.chars().enumerate() {
                let kind = TerrainKind::from_glyph(glyph).ok_or_else(|| RoadError::InvalidTerrain {
                    reason: format!("Unknown terrain glyph '{glyph}' at ({x}, {y})"),
                })?;
                cells.push(kind);
            }
        }

        Self::new(width, height, cells)
    }

    /// Check dimensions and cell count, e.g. after deserialization
    pub fn check_integrity(&self) -> RoadResult<()> {
        self.validate().map_err(|e| RoadError::InvalidTerrain {
            reason: format!("Terrain validation failed: {e}"),
        })?;

        let expected = (self.width as usize) * (self.height as usize);
        if self.cells.len() != expected {
            return Err(RoadError::InvalidTerrain {
                reason: format!(
                    "Cell array size {} does not match grid dimensions {}x{} (expected {})",
                    self.cells.len(),
                    self.width,
                    self.height,
                    expected
                ),
            });
        }
        Ok(())
    }

    pub fn get(&self, pos: GridPos) -> Option<TerrainKind> {
        self.index(pos).map(|i| self.cells[i])
    }

    /// Overwrite a cell; returns false when `pos` is off the grid
    pub fn set(&mut self, pos: GridPos, kind: TerrainKind) -> bool {
        match self.index(pos) {
            Some(i) => {
                self.cells[i] = kind;
                true
            }
            None => false,
        }
    }

    pub fn cells(&self) -> &[TerrainKind] {
        &self.cells
    }

    pub fn passable_count(&self) -> usize {
        self.cells.iter().filter(|k| k.is_passable()).count()
    }

    /// Render the grid back into glyph rows
    pub fn to_rows(&self) -> Vec<String> {
        self.cells
            .chunks(self.width as usize)
            .map(|row| row.iter().map(|k| k.glyph()).collect())
            .collect()
    }

    fn index(&self, pos: GridPos) -> Option<usize> {
        if self.in_bounds(pos) {
            Some(pos.y as usize * self.width as usize + pos.x as usize)
        } else {
            None
        }
    }
}

impl TerrainOracle for TerrainGrid {
    fn width(&self) -> u32 {
        self.width
    }

    fn height(&self) -> u32 {
        self.height
    }

    fn is_passable(&self, pos: GridPos) -> bool {
        self.get(pos).is_some_and(TerrainKind::is_passable)
    }

    fn movement_cost(&self, pos: GridPos) -> f32 {
        self.get(pos).map_or(f32::INFINITY, TerrainKind::movement_cost)
    }
}
