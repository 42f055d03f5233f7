use std::collections::{HashSet, VecDeque};

use crate::grid::{Arena, Position};

/// What the evaluator substitutes for a step count when the goal can't be reached at all
///
/// Large enough to dwarf any real path, small enough that multiplying it by a weight stays
/// finite
pub const UNREACHABLE_STEPS: u32 = i32::MAX as u32;

/// Breadth first search from `start` to `goal`, returning the number of steps on the shortest
/// 4-connected path
///
/// Only the arena blocks movement: obstacles and anything off the map. Units standing in the
/// way are ignored, they will have moved by the time we get there.
///
/// Returns `None` if the frontier runs dry before `goal` is reached, for example when it is
/// walled off by obstacles
pub fn bfs_distance(start: &Position, goal: &Position, arena: &Arena) -> Option<u32> {
    let mut visited: HashSet<Position> = HashSet::new();
    let mut frontier: VecDeque<Position> = VecDeque::new();

    visited.insert(*start);
    frontier.push_back(*start);

    let mut steps = 0;

    while !frontier.is_empty() {
        // Drain one full level at a time so `steps` is the level being dequeued
        for _ in 0..frontier.len() {
            let Some(current) = frontier.pop_front() else {
                break;
            };

            if current == *goal {
                return Some(steps);
            }

            for (_, neighbor) in current.neighbors() {
                if arena.is_open(&neighbor) && visited.insert(neighbor) {
                    frontier.push_back(neighbor);
                }
            }
        }

        steps += 1;
    }

    None
}
