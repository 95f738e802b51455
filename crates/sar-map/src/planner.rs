//! Route planning over a [`UnifiedMap`].
//!
//! # Pluggability
//!
//! Rescuers plan through the [`Router`] trait so a weighted planner (e.g.
//! one that uses measured cell difficulty) can replace the default
//! [`BfsRouter`] without touching the agents.
//!
//! # Graph
//!
//! Nodes are the walkable cells (`visited \ obstacles`); edges join
//! 8-adjacent walkable cells with unit cost.  Neighbours are expanded in
//! `Direction::ALL` order, so the returned path is deterministic.

use std::collections::{BTreeMap, VecDeque};

use sar_core::Position;

use crate::unified::UnifiedMap;

// ── Router trait ──────────────────────────────────────────────────────────────

pub trait Router: Send + Sync {
    /// Cells from `from` to `to`, both inclusive.
    ///
    /// Returns `[from]` when `from == to` and the cell is walkable, and an
    /// empty vector when either endpoint is not walkable or no path exists.
    fn route(&self, map: &UnifiedMap, from: Position, to: Position) -> Vec<Position>;
}

// ── BfsRouter ─────────────────────────────────────────────────────────────────

/// Unweighted breadth-first search; returns a path with the fewest moves.
#[derive(Copy, Clone, Debug, Default)]
pub struct BfsRouter;

impl Router for BfsRouter {
    fn route(&self, map: &UnifiedMap, from: Position, to: Position) -> Vec<Position> {
        bfs(map, from, to)
    }
}

fn bfs(map: &UnifiedMap, from: Position, to: Position) -> Vec<Position> {
    if !map.is_walkable(from) || !map.is_walkable(to) {
        return Vec::new();
    }
    if from == to {
        return vec![from];
    }

    // parent[p] = predecessor on the shortest path; `from` maps to itself.
    let mut parent: BTreeMap<Position, Position> = BTreeMap::new();
    parent.insert(from, from);
    let mut queue = VecDeque::from([from]);

    while let Some(cur) = queue.pop_front() {
        for next in cur.neighbors8() {
            if parent.contains_key(&next) || !map.is_walkable(next) {
                continue;
            }
            parent.insert(next, cur);
            if next == to {
                return reconstruct(&parent, from, to);
            }
            queue.push_back(next);
        }
    }

    Vec::new()
}

fn reconstruct(parent: &BTreeMap<Position, Position>, from: Position, to: Position) -> Vec<Position> {
    let mut path = vec![to];
    let mut cur = to;
    while cur != from {
        match parent.get(&cur) {
            Some(&prev) => {
                path.push(prev);
                cur = prev;
            }
            None => return Vec::new(),
        }
    }
    path.reverse();
    path
}
