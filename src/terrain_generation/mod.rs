use crate::errors::RoadResult;
use crate::terrain::constants::*;
use crate::terrain::{TerrainGrid, TerrainKind};
use noise::{MultiFractal, NoiseFn, Perlin, RidgedMulti};

/// Terrain generation algorithms
#[derive(Debug, Clone, PartialEq)]
pub enum TerrainAlgorithm {
    Flat {
        kind: TerrainKind,
    },
    Perlin {
        frequency: f64,
        octaves: u32,
    },
    Ridged {
        frequency: f64,
        octaves: u32,
    },
    /// Perlin elevation pulled down toward the edges of the map
    Islands {
        frequency: f64,
        octaves: u32,
        falloff: f64,
    },
}

/// Seeded generator for terrain grids
#[derive(Debug, Clone)]
pub struct TerrainGenerator {
    pub seed: u32,
    pub algorithm: TerrainAlgorithm,
}

impl TerrainGenerator {
    /// Create a new terrain generator
    pub fn new(seed: u32, algorithm: TerrainAlgorithm) -> Self {
        Self { seed, algorithm }
    }

    /// Generate a grid using the configured algorithm
    pub fn generate(&self, width: u32, height: u32) -> RoadResult<TerrainGrid> {
        let total_cells = (width as usize) * (height as usize);
        let mut cells = Vec::with_capacity(total_cells);

        if let TerrainAlgorithm::Flat { kind } = self.algorithm {
            cells.resize(total_cells, kind);
            return TerrainGrid::new(width, height, cells);
        }

        // Moisture uses its own noise field so it does not mirror elevation
        let moisture = Perlin::new(self.seed.wrapping_add(1));

        for y in 0..height {
            for x in 0..width {
                let elevation = self.elevation(x, y, width, height);
                let wetness = normalize(moisture.get([x as f64 * 0.05, y as f64 * 0.05]));
                cells.push(classify(elevation as f32, wetness as f32));
            }
        }

        TerrainGrid::new(width, height, cells)
    }

    /// Normalized elevation in `[0, 1]` at a cell
    fn elevation(&self, x: u32, y: u32, width: u32, height: u32) -> f64 {
        match &self.algorithm {
            TerrainAlgorithm::Flat { .. } => 0.5,
            TerrainAlgorithm::Perlin { frequency, octaves } => {
                normalize(fractal_perlin(self.seed, *frequency, *octaves, x, y))
            }
            TerrainAlgorithm::Ridged { frequency, octaves } => {
                let ridged = RidgedMulti::<Perlin>::new(self.seed)
                    .set_octaves(*octaves as usize)
                    .set_frequency(*frequency);
                normalize(ridged.get([x as f64, y as f64]))
            }
            TerrainAlgorithm::Islands {
                frequency,
                octaves,
                falloff,
            } => {
                let base = normalize(fractal_perlin(self.seed, *frequency, *octaves, x, y));
                let nx = centered(x, width);
                let ny = centered(y, height);
                (base - falloff * (nx * nx + ny * ny)).clamp(0.0, 1.0)
            }
        }
    }
}

/// Sum of Perlin octaves, scaled back into roughly `[-1, 1]`
fn fractal_perlin(seed: u32, frequency: f64, octaves: u32, x: u32, y: u32) -> f64 {
    let perlin = Perlin::new(seed);
    let mut noise_value = 0.0;
    let mut amplitude = 1.0;
    let mut total_amplitude = 0.0;
    let mut current_frequency = frequency;

    for _ in 0..octaves.max(1) {
        noise_value +=
            perlin.get([x as f64 * current_frequency, y as f64 * current_frequency]) * amplitude;
        total_amplitude += amplitude;
        amplitude *= 0.5; // Persistence
        current_frequency *= 2.0; // Lacunarity
    }

    noise_value / total_amplitude
}

fn normalize(value: f64) -> f64 {
    ((value + 1.0) * 0.5).clamp(0.0, 1.0)
}

/// Position along an axis mapped to `[-1, 1]`
fn centered(value: u32, extent: u32) -> f64 {
    if extent <= 1 {
        return 0.0;
    }
    value as f64 / (extent - 1) as f64 * 2.0 - 1.0
}

/// Map normalized elevation and moisture to a terrain kind
pub fn classify(elevation: f32, moisture: f32) -> TerrainKind {
    if elevation < WATER_LEVEL {
        TerrainKind::Water
    } else if elevation >= CLIFF_LEVEL {
        TerrainKind::Cliff
    } else if elevation >= MOUNTAIN_LEVEL {
        TerrainKind::Mountains
    } else if elevation >= HILL_LEVEL {
        if moisture < DRY_MOISTURE {
            TerrainKind::Tundra
        } else {
            TerrainKind::Hills
        }
    } else if elevation < SHORE_LEVEL {
        if moisture >= WET_MOISTURE {
            TerrainKind::Swamp
        } else {
            TerrainKind::Plains
        }
    } else if moisture < DRY_MOISTURE {
        TerrainKind::Desert
    } else if moisture >= WET_MOISTURE {
        TerrainKind::Forest
    } else if moisture >= 0.5 {
        TerrainKind::Grassland
    } else {
        TerrainKind::Plains
    }
}

/// Get a predefined terrain preset
pub fn get_terrain_preset(name: &str, seed: Option<u32>) -> Option<TerrainGenerator> {
    let seed = seed.unwrap_or_else(rand::random);

    match name {
        "flat" => Some(TerrainGenerator::new(
            seed,
            TerrainAlgorithm::Flat {
                kind: TerrainKind::Plains,
            },
        )),
        "hills" => Some(TerrainGenerator::new(
            seed,
            TerrainAlgorithm::Perlin {
                frequency: 0.04,
                octaves: 4,
            },
        )),
        "mountains" => Some(TerrainGenerator::new(
            seed,
            TerrainAlgorithm::Ridged {
                frequency: 0.02,
                octaves: 5,
            },
        )),
        "islands" => Some(TerrainGenerator::new(
            seed,
            TerrainAlgorithm::Islands {
                frequency: 0.05,
                octaves: 4,
                falloff: 0.6,
            },
        )),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::terrain::{GridPos, TerrainOracle};

    #[test]
    fn test_flat_terrain_generation() {
        let generator = TerrainGenerator::new(
            12345,
            TerrainAlgorithm::Flat {
                kind: TerrainKind::Grassland,
            },
        );

        let grid = generator
            .generate(10, 10)
            .expect("Terrain generation should succeed with valid parameters");

        assert_eq!(grid.width(), 10);
        assert_eq!(grid.height(), 10);
        assert!(grid.cells().iter().all(|&k| k == TerrainKind::Grassland));
    }

    #[test]
    fn test_perlin_terrain_varies() {
        let generator = TerrainGenerator::new(
            12345,
            TerrainAlgorithm::Perlin {
                frequency: 0.15,
                octaves: 3,
            },
        );

        let grid = generator.generate(48, 48).unwrap();
        let first = grid.cells()[0];
        assert!(
            grid.cells().iter().any(|&k| k != first),
            "Perlin noise should create terrain variation"
        );
    }

    #[test]
    fn test_same_seed_same_terrain() {
        let a = get_terrain_preset("mountains", Some(77)).unwrap();
        let b = get_terrain_preset("mountains", Some(77)).unwrap();
        assert_eq!(a.generate(32, 24).unwrap(), b.generate(32, 24).unwrap());
    }

    #[test]
    fn test_islands_have_water_corners() {
        let generator = get_terrain_preset("islands", Some(9)).unwrap();
        let grid = generator.generate(40, 40).unwrap();

        for corner in [
            GridPos::new(0, 0),
            GridPos::new(39, 0),
            GridPos::new(0, 39),
            GridPos::new(39, 39),
        ] {
            assert_eq!(grid.get(corner), Some(TerrainKind::Water));
        }
    }

    #[test]
    fn test_terrain_presets() {
        for name in ["flat", "hills", "mountains", "islands"] {
            let generator = get_terrain_preset(name, Some(123))
                .unwrap_or_else(|| panic!("{name} preset should exist"));
            assert_eq!(generator.seed, 123);
        }
        assert!(get_terrain_preset("invalid", Some(123)).is_none());
    }

    #[test]
    fn test_classification() {
        assert_eq!(classify(0.1, 0.5), TerrainKind::Water);
        assert_eq!(classify(0.95, 0.5), TerrainKind::Cliff);
        assert_eq!(classify(0.85, 0.5), TerrainKind::Mountains);
        assert_eq!(classify(0.7, 0.5), TerrainKind::Hills);
        assert_eq!(classify(0.7, 0.1), TerrainKind::Tundra);
        assert_eq!(classify(0.33, 0.9), TerrainKind::Swamp);
        assert_eq!(classify(0.5, 0.1), TerrainKind::Desert);
        assert_eq!(classify(0.5, 0.9), TerrainKind::Forest);
        assert_eq!(classify(0.5, 0.6), TerrainKind::Grassland);
        assert_eq!(classify(0.5, 0.4), TerrainKind::Plains);
    }
}
