use crate::terrain::constants::{BASE_STEP_COST, TERRAIN_COST_SCALE, TURN_PENALTY};
use crate::terrain::{Direction, GridPos, TerrainOracle};
use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashMap, HashSet};
use tracing::debug;

pub mod passability;

pub use passability::nudge_to_passable;

/// Edge weights and safety bounds for the grid search
#[derive(Debug, Clone, PartialEq)]
pub struct PathfindingConfig {
    /// Cost of any single step, also the heuristic scale
    pub base_step_cost: u32,
    /// Extra cost when a step changes direction
    pub turn_penalty: u32,
    /// Movement-cost multiplier; `floor(movement_cost * scale)` is added per step
    pub terrain_cost_scale: f32,
    /// Give up after this many node expansions (`None` = search until exhausted)
    pub max_expansions: Option<usize>,
}

impl Default for PathfindingConfig {
    fn default() -> Self {
        Self {
            base_step_cost: BASE_STEP_COST,
            turn_penalty: TURN_PENALTY,
            terrain_cost_scale: TERRAIN_COST_SCALE,
            max_expansions: None,
        }
    }
}

/// Search bookkeeping for a visited cell
#[derive(Debug, Clone, Copy)]
struct NodeRecord {
    g: u32,
    direction: Option<Direction>,
    parent: Option<GridPos>,
}

/// Open-set entry. Ordered so `BinaryHeap` pops the lowest `f` first and, among
/// equal `f`, the earliest inserted. `pos` is the last key so the ordering
/// agrees with `Eq`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct OpenEntry {
    f: u32,
    seq: u64,
    pos: GridPos,
}

impl Ord for OpenEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .f
            .cmp(&self.f)
            .then_with(|| other.seq.cmp(&self.seq))
            .then_with(|| other.pos.cmp(&self.pos))
    }
}

impl PartialOrd for OpenEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// A* over the 4-connected terrain grid with turn and terrain weighting.
///
/// Each call owns its open set and visited map, so a pathfinder can be shared
/// across threads as long as the terrain can.
pub struct GridPathfinder<'a, T: TerrainOracle + ?Sized> {
    terrain: &'a T,
    config: PathfindingConfig,
}

impl<'a, T: TerrainOracle + ?Sized> GridPathfinder<'a, T> {
    pub fn new(terrain: &'a T, config: PathfindingConfig) -> Self {
        Self { terrain, config }
    }

    pub fn terrain(&self) -> &'a T {
        self.terrain
    }

    pub fn config(&self) -> &PathfindingConfig {
        &self.config
    }

    /// Minimum-cost route from `start` to `goal`, inclusive of both ends.
    /// Empty when the goal cannot be reached.
    pub fn find_path(&self, start: GridPos, goal: GridPos) -> Vec<GridPos> {
        self.find_path_with_cost(start, goal)
            .map(|(path, _)| path)
            .unwrap_or_default()
    }

    /// Like [`find_path`](Self::find_path) but also returns the accumulated cost
    /// of the goal node.
    pub fn find_path_with_cost(&self, start: GridPos, goal: GridPos) -> Option<(Vec<GridPos>, u32)> {
        if !self.terrain.in_bounds(start) || !self.terrain.in_bounds(goal) {
            debug!("Path request {} -> {} leaves the grid", start, goal);
            return None;
        }

        let mut records: HashMap<GridPos, NodeRecord> = HashMap::new();
        let mut closed: HashSet<GridPos> = HashSet::new();
        let mut open = BinaryHeap::new();
        let mut seq: u64 = 0;
        let mut expansions: usize = 0;

        records.insert(
            start,
            NodeRecord {
                g: 0,
                direction: None,
                parent: None,
            },
        );
        open.push(OpenEntry {
            f: self.heuristic(start, goal),
            seq,
            pos: start,
        });

        while let Some(OpenEntry { pos: current, .. }) = open.pop() {
            if !closed.insert(current) {
                continue; // stale entry superseded by a cheaper one
            }

            let record = records[&current];
            if current == goal {
                return Some((reconstruct_path(&records, goal), record.g));
            }

            expansions += 1;
            if self.config.max_expansions.is_some_and(|cap| expansions > cap) {
                debug!(
                    "Search {} -> {} hit the expansion cap after {} nodes",
                    start, goal, expansions
                );
                return None;
            }

            for (direction, neighbor) in current.neighbors() {
                if !self.terrain.in_bounds(neighbor)
                    || !self.terrain.is_passable(neighbor)
                    || closed.contains(&neighbor)
                {
                    continue;
                }

                let tentative_g = record
                    .g
                    .saturating_add(self.step_cost(record.direction, direction, neighbor));

                let improved = records
                    .get(&neighbor)
                    .is_none_or(|existing| tentative_g < existing.g);
                if !improved {
                    continue;
                }

                records.insert(
                    neighbor,
                    NodeRecord {
                        g: tentative_g,
                        direction: Some(direction),
                        parent: Some(current),
                    },
                );
                seq += 1;
                open.push(OpenEntry {
                    f: tentative_g.saturating_add(self.heuristic(neighbor, goal)),
                    seq,
                    pos: neighbor,
                });
            }
        }

        debug!(
            "No route from {} to {} after {} expansions",
            start, goal, expansions
        );
        None
    }

    /// Cost of stepping into `to` while moving in `direction`, having arrived
    /// at the current cell moving in `incoming`.
    pub fn step_cost(&self, incoming: Option<Direction>, direction: Direction, to: GridPos) -> u32 {
        let turn = match incoming {
            Some(previous) if previous != direction => self.config.turn_penalty,
            _ => 0,
        };
        let terrain = (self.terrain.movement_cost(to).max(0.0) * self.config.terrain_cost_scale)
            .floor() as u32;

        self.config
            .base_step_cost
            .saturating_add(turn)
            .saturating_add(terrain)
    }

    /// Manhattan distance scaled by the base step cost
    pub fn heuristic(&self, pos: GridPos, goal: GridPos) -> u32 {
        pos.manhattan_distance(goal)
            .saturating_mul(self.config.base_step_cost)
    }

    /// Sum of step costs along an existing 4-connected path
    pub fn path_cost(&self, path: &[GridPos]) -> Option<u32> {
        let mut incoming = None;
        let mut total: u32 = 0;
        for pair in path.windows(2) {
            let direction = Direction::between(pair[0], pair[1])?;
            total = total.saturating_add(self.step_cost(incoming, direction, pair[1]));
            incoming = Some(direction);
        }
        Some(total)
    }
}

fn reconstruct_path(records: &HashMap<GridPos, NodeRecord>, goal: GridPos) -> Vec<GridPos> {
    let mut path = vec![goal];
    let mut current = goal;
    while let Some(parent) = records.get(&current).and_then(|r| r.parent) {
        path.push(parent);
        current = parent;
    }
    path.reverse();
    path
}
