use crate::prelude::*;

use smallvec::SmallVec;

mod best_first;
pub use best_first::*;

mod ida_star;
pub use ida_star::*;

mod table;
pub use table::*;

pub type MovePath = SmallVec<[Move; 20]>;

pub trait Solver {
    /// Runs the whole search. `Err` is reserved for a start the search must
    /// not run on; running out of moves or budget is an [`Outcome`].
    fn solve(&self, start: &Cube) -> Result<Outcome, Error>;
}

/// Lower bound on the moves still needed to reach the goal.
pub trait Heuristic: Sync + Send {
    fn estimate(&self, cube: &Cube) -> u32;
}

/// Turns best-first search into uniform cost search.
#[derive(Clone, Copy, Debug, Default)]
pub struct ZeroHeuristic;

impl Heuristic for ZeroHeuristic {
    fn estimate(&self, _cube: &Cube) -> u32 {
        0
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Outcome {
    Solved(Vec<Move>),
    Exhausted(Exhaustion),
}

impl Outcome {
    pub fn solution(self) -> Option<Vec<Move>> {
        match self {
            Outcome::Solved(moves) => Some(moves),
            Outcome::Exhausted(_) => None,
        }
    }

    pub fn into_result(self) -> Result<Vec<Move>, Error> {
        match self {
            Outcome::Solved(moves) => Ok(moves),
            Outcome::Exhausted(why) => Err(Error::SearchExhausted(why)),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Exhaustion {
    /// Every reachable state was expanded without meeting the goal.
    FrontierEmpty,
    ThresholdExceeded { max: u32 },
    NodeBudget { nodes: u64 },
}

impl std::fmt::Display for Exhaustion {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Exhaustion::FrontierEmpty => write!(f, "every reachable state was explored"),
            Exhaustion::ThresholdExceeded { max } => {
                write!(f, "cost threshold grew past the maximum of {}", max)
            }
            Exhaustion::NodeBudget { nodes } => write!(f, "node budget of {} spent", nodes),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SearchLimits {
    /// Largest cost threshold iterative deepening may try.
    pub max_threshold: u32,
    /// Most states a search may generate before giving up.
    pub node_limit: Option<u64>,
}

impl Default for SearchLimits {
    fn default() -> Self {
        SearchLimits {
            max_threshold: 20,
            node_limit: None,
        }
    }
}

impl SearchLimits {
    fn allows(&self, nodes: u64) -> bool {
        self.node_limit.map_or(true, |limit| nodes <= limit)
    }
}
