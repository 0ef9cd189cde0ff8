use crate::prelude::*;

/// What iterative deepening assumes about a state missing from its table.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum UnknownEstimate {
    /// 0 when solved, otherwise 1. Never overestimates on its own, but mixed
    /// with table entries measured against one particular solved colouring
    /// the combined estimate is not admissible in general.
    #[default]
    SolvedFlag,
    /// A fixed guess for every unsolved state; large values skip unknown
    /// territory until the threshold catches up.
    Fixed(u32),
}

/// Iterative deepening A* over a heuristic lookup table.
///
/// A branch is cut once `g + h` reaches the current threshold. When an
/// iteration ends without a solution the threshold moves just past the
/// smallest cut f-score and the search restarts from the root.
pub struct IdaStar {
    moves: Vec<Move>,
    table: HeuristicTable,
    unknown: UnknownEstimate,
    limits: SearchLimits,
}

enum Search {
    Found(MovePath),
    /// Smallest f-score that was cut, or `None` when nothing was.
    NotFound(Option<u32>),
    OutOfBudget,
}

impl IdaStar {
    pub fn new(moves: Vec<Move>, table: HeuristicTable) -> Self {
        IdaStar {
            moves,
            table,
            unknown: UnknownEstimate::default(),
            limits: SearchLimits::default(),
        }
    }

    pub fn with_limits(mut self, limits: SearchLimits) -> Self {
        self.limits = limits;
        self
    }

    pub fn with_unknown_estimate(mut self, unknown: UnknownEstimate) -> Self {
        self.unknown = unknown;
        self
    }

    /// Solves a cube given as its canonical encoding.
    pub fn solve_encoding(&self, encoding: &str) -> Result<Outcome, Error> {
        self.solve(&Cube::from_stream(encoding)?)
    }

    fn estimate(&self, cube: &Cube) -> u32 {
        if let Some(h) = self.table.get(&cube.encoding()) {
            return h;
        }
        match (self.unknown, cube.is_solved()) {
            (_, true) => 0,
            (UnknownEstimate::SolvedFlag, false) => 1,
            (UnknownEstimate::Fixed(h), false) => h,
        }
    }

    fn find_solution(
        &self,
        turns: &[(Move, &Turn)],
        cube: &Cube,
        move_stack: &mut MovePath,
        threshold: u32,
        nodes: &mut u64,
    ) -> Search {
        let g = move_stack.len() as u32 + 1;
        let last_move = move_stack.last().copied();

        let mut min_cut: Option<u32> = None;
        for &(move_, turn) in turns {
            if let Some(last) = last_move {
                if !move_.could_follow(&last) {
                    continue;
                }
            }

            *nodes += 1;
            if !self.limits.allows(*nodes) {
                return Search::OutOfBudget;
            }

            let child = turn.apply(cube);
            move_stack.push(move_);
            if child.is_solved() {
                return Search::Found(move_stack.clone());
            }

            let f = g.saturating_add(self.estimate(&child));
            let sub = if f >= threshold {
                Search::NotFound(Some(f))
            } else {
                self.find_solution(turns, &child, move_stack, threshold, nodes)
            };
            move_stack.pop();

            match sub {
                Search::NotFound(Some(f)) => min_cut = Some(min_cut.map_or(f, |m| m.min(f))),
                Search::NotFound(None) => {}
                found_or_budget => return found_or_budget,
            }
        }

        Search::NotFound(min_cut)
    }
}

impl Solver for IdaStar {
    fn solve(&self, start: &Cube) -> Result<Outcome, Error> {
        if start.is_solved() {
            return Ok(Outcome::Solved(Vec::new()));
        }

        let table = TurnTable::for_size(start.size());
        let turns = table.turns(&self.moves)?;

        let begin = std::time::Instant::now();
        let mut nodes = 0u64;
        let mut threshold = 1;
        loop {
            if threshold > self.limits.max_threshold {
                log::info!(
                    "Threshold {} is past the maximum of {}, giving up after {} nodes",
                    threshold,
                    self.limits.max_threshold,
                    nodes
                );
                return Ok(Outcome::Exhausted(Exhaustion::ThresholdExceeded {
                    max: self.limits.max_threshold,
                }));
            }

            log::info!("Searching below threshold {}", threshold);
            let mut move_stack = MovePath::new();
            match self.find_solution(&turns, start, &mut move_stack, threshold, &mut nodes) {
                Search::Found(moves) => {
                    log::info!(
                        "Found {} move path, {} nodes, took {:?}",
                        moves.len(),
                        nodes,
                        begin.elapsed()
                    );
                    return Ok(Outcome::Solved(moves.into_vec()));
                }
                Search::OutOfBudget => {
                    log::warn!("Gave up after generating {} nodes", nodes);
                    return Ok(Outcome::Exhausted(Exhaustion::NodeBudget { nodes }));
                }
                Search::NotFound(None) => {
                    return Ok(Outcome::Exhausted(Exhaustion::FrontierEmpty));
                }
                Search::NotFound(Some(min_cut)) => {
                    // A branch at exactly the threshold was cut, so step past it.
                    threshold = min_cut.saturating_add(1);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn layer_search(table: HeuristicTable) -> IdaStar {
        IdaStar::new(MoveSet::LayerTwists.moves(3), table)
    }

    fn solves(start: &Cube, moves: &[Move]) -> bool {
        start.clone().apply_all(moves.iter().copied()).unwrap().is_solved()
    }

    #[test]
    fn solved_start_needs_no_moves() {
        let outcome = layer_search(HeuristicTable::new())
            .solve(&Cube::solved(3))
            .unwrap();
        assert_eq!(outcome, Outcome::Solved(vec![]));
    }

    #[test]
    fn table_value_of_two_gives_two_moves() {
        let start = cube_with_moves("row0 col0");
        let table = [(start.encoding(), 2)].into_iter().collect();

        let path = layer_search(table)
            .solve_encoding(&start.encoding())
            .unwrap()
            .solution()
            .unwrap();
        assert_eq!(path.len(), 2);
        assert!(solves(&start, &path));
    }

    #[test]
    fn generated_table_solves_scramble() {
        let moves = MoveSet::LayerTwists.moves(3);
        let table = HeuristicTable::generate(&Cube::solved(3), &moves, 3).unwrap();
        let start = cube_with_moves("side1 row2' col0");

        let path = layer_search(table).solve(&start).unwrap().solution().unwrap();
        assert!(path.len() <= 3);
        assert!(solves(&start, &path));
    }

    #[test]
    fn face_turns_work_too() {
        let moves = MoveSet::FaceTurns.moves(3);
        let table = HeuristicTable::generate(&Cube::solved(3), &moves, 2).unwrap();
        let start = cube_with_moves("F R' D");

        let path = IdaStar::new(moves, table)
            .solve(&start)
            .unwrap()
            .solution()
            .unwrap();
        assert!(path.len() <= 3);
        assert!(solves(&start, &path));
    }

    #[test]
    fn low_max_threshold_is_exhaustion() {
        let search = layer_search(HeuristicTable::new()).with_limits(SearchLimits {
            max_threshold: 2,
            node_limit: None,
        });
        assert_eq!(
            search.solve(&cube_with_moves("row0 col0 side0")).unwrap(),
            Outcome::Exhausted(Exhaustion::ThresholdExceeded { max: 2 })
        );
    }

    #[test]
    fn node_budget_is_exhaustion() {
        let search = layer_search(HeuristicTable::new()).with_limits(SearchLimits {
            max_threshold: 20,
            node_limit: Some(100),
        });
        assert_eq!(
            search.solve(&cube_with_moves("row0 col0 side0 row1")).unwrap(),
            Outcome::Exhausted(Exhaustion::NodeBudget { nodes: 101 })
        );
    }

    #[test]
    fn fixed_unknown_estimate_still_finds_one_move() {
        let search =
            layer_search(HeuristicTable::new()).with_unknown_estimate(UnknownEstimate::Fixed(50));
        let path = search.solve(&cube_with_moves("col2")).unwrap().solution().unwrap();
        assert_eq!(path.len(), 1);
    }

    #[test]
    fn saturated_estimate_is_threshold_exhaustion() {
        let search = layer_search(HeuristicTable::new())
            .with_unknown_estimate(UnknownEstimate::Fixed(u32::MAX));
        assert_eq!(
            search.solve(&cube_with_moves("row0 col0")).unwrap(),
            Outcome::Exhausted(Exhaustion::ThresholdExceeded { max: 20 })
        );
    }

    #[test]
    fn is_deterministic() {
        let start = cube_with_moves("row1 side2'");
        let a = layer_search(HeuristicTable::new()).solve(&start).unwrap();
        let b = layer_search(HeuristicTable::new()).solve(&start).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn rejects_out_of_range_alphabet() {
        let search = IdaStar::new(
            vec![Move::new(Axis::Column, 7, Direction::Clockwise)],
            HeuristicTable::new(),
        );
        assert!(matches!(
            search.solve(&cube_with_moves("R")),
            Err(Error::LayerOutOfRange { layer: 7, size: 3 })
        ));
    }
}
