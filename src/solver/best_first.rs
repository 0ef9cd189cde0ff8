use crate::prelude::*;

use core::cmp::{Ordering, Reverse};
use std::collections::{BinaryHeap, HashSet};

/// Best-first search ordered by moves taken plus the heuristic estimate.
///
/// With an admissible heuristic the first path to reach the goal is a
/// shortest one. Ties pop in insertion order, so [`ZeroHeuristic`] gives
/// plain breadth-first order.
pub struct BestFirst<H: Heuristic> {
    moves: Vec<Move>,
    heuristic: H,
    goal: Goal,
    limits: SearchLimits,
}

/// When best-first search stops.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Goal {
    /// Exactly this arrangement.
    Exact(Cube),
    /// Any arrangement [`Cube::is_solved`] accepts.
    AnySolved,
}

impl Goal {
    /// Odd cubes keep their centres under face turns, so they pin down one
    /// exact goal; even cubes can finish in any orientation and palette.
    pub fn for_cube(cube: &Cube) -> Goal {
        match cube.center_goal() {
            Some(goal) => Goal::Exact(goal),
            None => Goal::AnySolved,
        }
    }

    fn is_met(&self, cube: &Cube) -> bool {
        match self {
            Goal::Exact(goal) => cube == goal,
            Goal::AnySolved => cube.is_solved(),
        }
    }
}

impl From<Cube> for Goal {
    fn from(cube: Cube) -> Goal {
        Goal::Exact(cube)
    }
}

impl<H: Heuristic> BestFirst<H> {
    pub fn new(moves: Vec<Move>, heuristic: H, goal: impl Into<Goal>) -> Self {
        BestFirst {
            moves,
            heuristic,
            goal: goal.into(),
            limits: SearchLimits::default(),
        }
    }

    pub fn with_limits(mut self, limits: SearchLimits) -> Self {
        self.limits = limits;
        self
    }
}

struct Node {
    cost: u32,
    order: u64,
    cube: Cube,
    path: MovePath,
}

impl Node {
    fn key(&self) -> (u32, u64) {
        (self.cost, self.order)
    }
}

impl PartialEq for Node {
    fn eq(&self, other: &Self) -> bool {
        self.key() == other.key()
    }
}

impl Eq for Node {}

impl PartialOrd for Node {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Node {
    fn cmp(&self, other: &Self) -> Ordering {
        self.key().cmp(&other.key())
    }
}

impl<H: Heuristic> Solver for BestFirst<H> {
    fn solve(&self, start: &Cube) -> Result<Outcome, Error> {
        let start = start.clone().validated()?;
        if let Goal::Exact(goal) = &self.goal {
            if start.size() != goal.size() {
                return Err(Error::Format(format!(
                    "cube of size {} cannot reach a goal of size {}",
                    start.size(),
                    goal.size()
                )));
            }
        }

        let table = TurnTable::for_size(start.size());
        let turns = table.turns(&self.moves)?;

        let begin = std::time::Instant::now();
        let mut frontier = BinaryHeap::new();
        let mut explored = HashSet::new();
        let mut generated = 0u64;

        frontier.push(Reverse(Node {
            cost: self.heuristic.estimate(&start),
            order: generated,
            cube: start,
            path: MovePath::new(),
        }));

        while let Some(Reverse(node)) = frontier.pop() {
            if self.goal.is_met(&node.cube) {
                log::info!(
                    "Found {} move path after exploring {} states, took {:?}",
                    node.path.len(),
                    explored.len(),
                    begin.elapsed()
                );
                return Ok(Outcome::Solved(node.path.into_vec()));
            }

            // Marked on pop, so duplicate queue entries are just skipped.
            if explored.contains(&node.cube) {
                continue;
            }
            explored.insert(node.cube.clone());

            for (move_, turn) in &turns {
                let next = turn.apply(&node.cube);
                if explored.contains(&next) {
                    continue;
                }

                generated += 1;
                if !self.limits.allows(generated) {
                    log::warn!("Gave up after generating {} states", generated);
                    return Ok(Outcome::Exhausted(Exhaustion::NodeBudget {
                        nodes: generated,
                    }));
                }

                let mut path = node.path.clone();
                path.push(*move_);
                frontier.push(Reverse(Node {
                    cost: path.len() as u32 + self.heuristic.estimate(&next),
                    order: generated,
                    cube: next,
                    path,
                }));
            }

            if explored.len() % 100_000 == 0 {
                log::debug!(
                    "{} states explored, {} queued",
                    explored.len(),
                    frontier.len()
                );
            }
        }

        log::info!("Frontier emptied after exploring {} states", explored.len());
        Ok(Outcome::Exhausted(Exhaustion::FrontierEmpty))
    }
}
