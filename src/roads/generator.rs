use crate::config::RoadConfig;
use crate::pathfinding::GridPathfinder;
use crate::roads::{Road, RoadNetwork, StructureAnchor, assemble, pick_entry_point, plan_waypoints};
use crate::terrain::{GridPos, TerrainOracle};
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg64;
use rayon::prelude::*;
use tracing::{debug, info};

/// Builds roads between structures on a fixed terrain.
///
/// The generator only reads the terrain. Every road gets fresh search state,
/// so independent roads can be generated concurrently.
pub struct RoadGenerator<'a, T: TerrainOracle + ?Sized> {
    terrain: &'a T,
    config: RoadConfig,
}

impl<'a, T: TerrainOracle + ?Sized> RoadGenerator<'a, T> {
    pub fn new(terrain: &'a T, config: RoadConfig) -> Self {
        Self { terrain, config }
    }

    pub fn config(&self) -> &RoadConfig {
        &self.config
    }

    pub fn pathfinder(&self) -> GridPathfinder<'a, T> {
        GridPathfinder::new(self.terrain, self.config.pathfinding())
    }

    /// Generate the road from `from` to `to`, drawing jitter from `rng`.
    ///
    /// Two values are drawn: the start anchor's jitter, then the end anchor's.
    /// The returned road is never empty but may stop short of `to` when the
    /// terrain does not allow a full connection.
    pub fn generate_road<A, B, R>(&self, from: &A, to: &B, rng: &mut R) -> Road
    where
        A: StructureAnchor + ?Sized,
        B: StructureAnchor + ?Sized,
        R: Rng + ?Sized,
    {
        let start = pick_entry_point(self.terrain, from, to, rng, &self.config);
        let end = pick_entry_point(self.terrain, to, from, rng, &self.config);
        let waypoints = plan_waypoints(self.terrain, start, end, &self.config);

        let pathfinder = self.pathfinder();
        let path = assemble(&pathfinder, start, &waypoints);

        let reached = path.last() == Some(&end);
        debug!(
            "Road {} -> {}: {} cells via {:?}{}",
            from.name(),
            to.name(),
            path.len(),
            waypoints,
            if reached { "" } else { " (truncated)" }
        );

        Road::new(
            format!("Road from {} to {}", from.name(), to.name()),
            (from.id(), to.id()),
            path,
        )
    }

    /// Generate a road with a jitter source derived from `world_seed` and the
    /// two structure positions.
    pub fn generate_seeded<A, B>(&self, from: &A, to: &B, world_seed: u64) -> Road
    where
        A: StructureAnchor + ?Sized,
        B: StructureAnchor + ?Sized,
    {
        let mut rng = Pcg64::seed_from_u64(road_seed(world_seed, from.position(), to.position()));
        self.generate_road(from, to, &mut rng)
    }

    /// Generate one road per `(from, to)` request, in parallel.
    ///
    /// Output order matches request order, and each road is identical to
    /// what [`generate_seeded`](Self::generate_seeded) returns for the pair.
    pub fn generate_roads<S>(&self, requests: &[(&S, &S)], world_seed: u64) -> RoadNetwork
    where
        T: Sync,
        S: StructureAnchor + Sync + ?Sized,
    {
        let roads: Vec<Road> = requests
            .par_iter()
            .map(|&(from, to)| self.generate_seeded(from, to, world_seed))
            .collect();

        let network = RoadNetwork::new(roads);
        info!(
            "Generated {} roads covering {} cells",
            network.roads.len(),
            network.total_length()
        );
        network
    }
}

/// Deterministic seed for the road between two positions.
///
/// Pure function of its inputs; swapping `from` and `to` gives a different seed.
pub fn road_seed(world_seed: u64, from: GridPos, to: GridPos) -> u64 {
    [from.x, from.y, to.x, to.y]
        .into_iter()
        .fold(splitmix64(world_seed), |hash, value| {
            splitmix64(hash ^ u64::from(value as u32))
        })
}

fn splitmix64(value: u64) -> u64 {
    let mut z = value.wrapping_add(0x9E37_79B9_7F4A_7C15);
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    z ^ (z >> 31)
}
