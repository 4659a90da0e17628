//! Breadth-first reachability over the static obstacle map
//!
//! Cars are never treated as blocking here: they move every tick, so only
//! the fixed obstacle layout can back a reachability guarantee.

use std::collections::{HashMap, HashSet, VecDeque};

use crate::common::Cell;
use crate::utils::ObstacleMap;

/// Number of 4-connected steps from `start` to `goal` through free cells
pub fn shortest_distance(map: &ObstacleMap, start: Cell, goal: Cell) -> Option<usize> {
    if !map.is_free(start) {
        return None;
    }

    let mut dist: HashMap<Cell, usize> = HashMap::new();
    let mut queue = VecDeque::new();
    dist.insert(start, 0);
    queue.push_back(start);

    while let Some(current) = queue.pop_front() {
        let d = dist[&current];
        if current == goal {
            return Some(d);
        }

        for next in current.neighbors() {
            if !map.is_free(next) || dist.contains_key(&next) {
                continue;
            }
            dist.insert(next, d + 1);
            queue.push_back(next);
        }
    }

    None
}

/// True iff a path of free cells joins `start` to `goal`
pub fn is_reachable(map: &ObstacleMap, start: Cell, goal: Cell) -> bool {
    shortest_distance(map, start, goal).is_some()
}

/// 4-connected regions of free cells, each listed in BFS order from its
/// first cell in row-major order
pub fn free_regions(map: &ObstacleMap) -> Vec<Vec<Cell>> {
    let mut seen: HashSet<Cell> = HashSet::new();
    let mut regions = Vec::new();

    for seed in map.free_cells() {
        if !seen.insert(seed) {
            continue;
        }

        let mut region = Vec::new();
        let mut queue = VecDeque::new();
        queue.push_back(seed);
        while let Some(current) = queue.pop_front() {
            region.push(current);
            for next in current.neighbors() {
                if map.is_free(next) && seen.insert(next) {
                    queue.push_back(next);
                }
            }
        }
        regions.push(region);
    }

    regions
}
