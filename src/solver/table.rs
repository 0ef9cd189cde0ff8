use crate::prelude::*;

use std::collections::HashMap;

/// Canonical encoding → lower bound on remaining moves.
#[derive(Clone, Debug, Default)]
pub struct HeuristicTable {
    map: HashMap<String, u32>,
    /// Every state this many moves or fewer from the goal has an entry.
    exhaustive_to: Option<u32>,
}

impl HeuristicTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Breadth-first expansion from `goal`, recording each state's distance.
    pub fn generate(goal: &Cube, moves: &[Move], depth: u32) -> Result<Self, Error> {
        let table = TurnTable::for_size(goal.size());
        let turns = table.turns(moves)?;

        let mut result = Self::new();
        result.insert(goal.encoding(), 0);

        let start = std::time::Instant::now();
        let mut layer = vec![goal.clone()];
        for d in 1..=depth {
            log::info!(
                "Expanding heuristic table to depth {}, {} items",
                d,
                result.len()
            );

            let mut next = Vec::new();
            for cube in &layer {
                for (_, turn) in &turns {
                    let child = turn.apply(cube);
                    let encoding = child.encoding();
                    if result.map.contains_key(&encoding) {
                        continue;
                    }
                    result.map.insert(encoding, d);
                    next.push(child);
                }
            }

            if next.is_empty() {
                break;
            }
            layer = next;
        }

        log::info!(
            "Finished heuristic table, {} items, took {:?}",
            result.len(),
            start.elapsed()
        );
        result.exhaustive_to = Some(depth);
        Ok(result)
    }

    pub fn insert(&mut self, encoding: impl Into<String>, estimate: u32) {
        self.map.insert(encoding.into(), estimate);
    }

    pub fn get(&self, encoding: &str) -> Option<u32> {
        self.map.get(encoding).copied()
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }
}

impl From<HashMap<String, u32>> for HeuristicTable {
    fn from(map: HashMap<String, u32>) -> Self {
        HeuristicTable {
            map,
            exhaustive_to: None,
        }
    }
}

impl FromIterator<(String, u32)> for HeuristicTable {
    fn from_iter<I: IntoIterator<Item = (String, u32)>>(iter: I) -> Self {
        HeuristicTable::from(iter.into_iter().collect::<HashMap<_, _>>())
    }
}

impl Heuristic for HeuristicTable {
    fn estimate(&self, cube: &Cube) -> u32 {
        if let Some(h) = self.get(&cube.encoding()) {
            return h;
        }
        match self.exhaustive_to {
            Some(depth) => depth + 1,
            None => u32::from(!cube.is_solved()),
        }
    }
}
