use clap::Parser;
use roadgen::config::{RoadConfig, load_config};
use roadgen::errors::{RoadError, RoadResult};
use roadgen::map::WorldMap;
use roadgen::roads::{RoadGenerator, StructureAnchor};
use roadgen::terrain::TerrainOracle;
use roadgen::terrain_generation::get_terrain_preset;
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

mod roadgen_cli {
    pub mod cli_utils;
}

use roadgen_cli::cli_utils::*;

#[derive(Parser, Clone)]
#[command(name = "roadgen")]
#[command(about = "Generate terrain and the roads connecting a set of settlements")]
struct Args {
    /// World name
    #[arg(long, default_value = "generated_world")]
    name: String,

    /// Terrain size in grid cells (format: WIDTHxHEIGHT)
    #[arg(long, default_value = "64x64")]
    size: String,

    /// Terrain preset (flat, hills, mountains, islands)
    #[arg(long, default_value = "hills")]
    terrain_type: String,

    /// World seed; drives both terrain and road jitter
    #[arg(long, default_value = "1")]
    seed: u64,

    /// Settlement as NAME@X,Y[:SIZE]; repeat for each settlement
    #[arg(long = "settlement", required = true, num_args = 1)]
    settlements: Vec<String>,

    /// Connect every pair of settlements instead of consecutive ones
    #[arg(long)]
    all_pairs: bool,

    /// Road config file (TOML); defaults to the user config directory
    #[arg(long)]
    config: Option<PathBuf>,

    /// Write the generated world to this file
    #[arg(long)]
    output: Option<PathBuf>,
}

fn main() -> RoadResult<()> {
    tracing_subscriber::fmt()
        .with_env_filter(log_filter(std::env::var(EnvFilter::DEFAULT_ENV).ok().as_deref()))
        .init();

    let args = Args::parse();
    let config = match &args.config {
        Some(path) => RoadConfig::load_from_path(path)?,
        None => load_config(),
    };

    let world = build_world(&args, config)?;
    print_world_summary(&world);

    if let Some(output) = &args.output {
        world.save_to_file(output)?;
        println!("World saved to: {}", output.display());
    }

    Ok(())
}

/// `RUST_LOG` directives when present and parseable, otherwise `info`
fn log_filter(directives: Option<&str>) -> EnvFilter {
    directives
        .and_then(|directives| EnvFilter::try_new(directives).ok())
        .unwrap_or_else(|| EnvFilter::new("info"))
}

fn build_world(args: &Args, config: RoadConfig) -> RoadResult<WorldMap> {
    let (width, height) = parse_size(&args.size)?;
    let settlements = args
        .settlements
        .iter()
        .enumerate()
        .map(|(i, spec)| parse_settlement(i as u32 + 1, spec))
        .collect::<RoadResult<Vec<_>>>()?;

    // Terrain noise is seeded with 32 bits; fold the world seed down
    let terrain_seed = (args.seed ^ (args.seed >> 32)) as u32;
    let generator = get_terrain_preset(&args.terrain_type, Some(terrain_seed)).ok_or_else(|| {
        RoadError::InvalidArgument {
            reason: format!(
                "Unknown terrain type: '{}'. Available presets: flat, hills, mountains, islands",
                args.terrain_type
            ),
        }
    })?;
    let terrain = generator.generate(width, height)?;
    info!(
        "Generated {}x{} '{}' terrain ({} passable cells)",
        terrain.width(),
        terrain.height(),
        args.terrain_type,
        terrain.passable_count()
    );

    let roads = {
        let requests: Vec<_> = connection_pairs(settlements.len(), args.all_pairs)
            .into_iter()
            .map(|(a, b)| (&settlements[a], &settlements[b]))
            .collect();
        RoadGenerator::new(&terrain, config).generate_roads(&requests, args.seed)
    };

    WorldMap::new(args.name.clone(), terrain, settlements, roads)
}

fn print_world_summary(world: &WorldMap) {
    println!("World summary:");
    println!("  Name: {}", world.name);
    println!(
        "  Terrain: {}x{} ({} passable cells)",
        world.terrain.width(),
        world.terrain.height(),
        world.terrain.passable_count()
    );
    println!("  Settlements: {}", world.settlements.len());
    for settlement in &world.settlements {
        println!(
            "    {} at {} (half size {})",
            settlement.name(),
            settlement.position(),
            settlement.half_size()
        );
    }

    println!(
        "  Roads: {} covering {} cells",
        world.roads.roads.len(),
        world.roads.total_length()
    );
    for road in &world.roads.roads {
        let ends = match (road.path().first(), road.path().last()) {
            (Some(first), Some(last)) => format!("{first} -> {last}"),
            _ => "empty".to_string(),
        };
        println!("    {}: {} cells, {}", road.name(), road.len(), ends);
    }

    let junctions = world.roads.junctions();
    if !junctions.is_empty() {
        println!("  Junctions: {}", junctions.len());
    }
}
