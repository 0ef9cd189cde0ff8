use crate::prelude::*;

use super::Cube;

use std::{
    collections::HashMap,
    sync::{Arc, PoisonError, RwLock},
};

lazy_static::lazy_static! {
    static ref TABLES: RwLock<HashMap<usize, Arc<TurnTable>>> = RwLock::new(HashMap::new());
}

/// One compiled move: the facelets it relocates, as `(destination, source)`
/// copies. Facelets not listed stay where they are.
///
/// A twist of an outer layer yields copies for the four neighbouring strips
/// plus every ring of the turned face; a middle slab only yields strips.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Turn {
    copies: Vec<(usize, usize)>,
}

impl Turn {
    pub fn apply(&self, cube: &Cube) -> Cube {
        let mut facelets = cube.facelets.clone();
        for &(to, from) in &self.copies {
            facelets[to] = cube.facelets[from];
        }
        Cube {
            size: cube.size,
            facelets,
        }
    }

    pub fn len(&self) -> usize {
        self.copies.len()
    }
}

/// Every twist of one cube size, indexed by [`Move::index`].
#[derive(Debug)]
pub struct TurnTable {
    size: usize,
    turns: Vec<Turn>,
}

impl TurnTable {
    /// The table for `size`, built on first use and shared afterwards.
    pub fn for_size(size: usize) -> Arc<TurnTable> {
        if let Some(table) = TABLES
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&size)
        {
            return Arc::clone(table);
        }

        let mut tables = TABLES.write().unwrap_or_else(PoisonError::into_inner);
        Arc::clone(
            tables
                .entry(size)
                .or_insert_with(|| Arc::new(TurnTable::build(size))),
        )
    }

    fn build(size: usize) -> TurnTable {
        let start = std::time::Instant::now();
        let mut turns = vec![Turn { copies: Vec::new() }; 6 * size];
        for m in Move::all(size) {
            turns[m.index(size)] = compile(size, m);
        }
        log::debug!(
            "Built turn table for size {}, took {:?}",
            size,
            start.elapsed()
        );
        TurnTable { size, turns }
    }

    pub fn turn(&self, move_: Move) -> Result<&Turn, Error> {
        if move_.layer >= self.size {
            return Err(Error::LayerOutOfRange {
                layer: move_.layer,
                size: self.size,
            });
        }
        Ok(&self.turns[move_.index(self.size)])
    }

    /// Resolves a whole alphabet up front so a search never has to handle
    /// a bad layer mid-expansion.
    pub fn turns<'t>(&'t self, moves: &[Move]) -> Result<Vec<(Move, &'t Turn)>, Error> {
        moves.iter().map(|&m| Ok((m, self.turn(m)?))).collect()
    }
}

/// Sticker position in doubled, centred coordinates: each axis runs over
/// `-(n-1), -(n-3), .., n-1`, so quarter turns stay integral. `normal` points
/// out of the face the sticker sits on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Sticker {
    position: [i32; 3],
    normal: [i32; 3],
}

const X: usize = 0;
const Y: usize = 1;
const Z: usize = 2;

fn sticker(size: usize, index: usize) -> Sticker {
    let area = size * size;
    let face = Face::ORDER[index / area];
    let (r, c) = ((index % area) / size, (index % area) % size);
    let m = size as i32 - 1;
    let (r, c) = (r as i32, c as i32);

    let (cell, normal) = match face {
        Face::Up => ([c, m, r], [0, 1, 0]),
        Face::Down => ([c, 0, m - r], [0, -1, 0]),
        Face::Front => ([c, m - r, m], [0, 0, 1]),
        Face::Back => ([m - c, m - r, 0], [0, 0, -1]),
        Face::Right => ([m, m - r, m - c], [1, 0, 0]),
        Face::Left => ([0, m - r, c], [-1, 0, 0]),
    };
    Sticker {
        position: cell.map(|v| 2 * v - m),
        normal,
    }
}

fn index_of(size: usize, sticker: Sticker) -> usize {
    let m = size as i32 - 1;
    let [x, y, z] = sticker.position.map(|v| (v + m) / 2);
    let (face, r, c) = match sticker.normal {
        [0, 1, 0] => (Face::Up, z, x),
        [0, -1, 0] => (Face::Down, m - z, x),
        [0, 0, 1] => (Face::Front, m - y, x),
        [0, 0, -1] => (Face::Back, m - y, m - x),
        [1, 0, 0] => (Face::Right, m - y, m - z),
        [-1, 0, 0] => (Face::Left, m - y, z),
        normal => unreachable!("not a face normal: {:?}", normal),
    };
    face as usize * size * size + r as usize * size + c as usize
}

/// Quarter turn clockwise as seen from the axis' near face.
fn quarter(axis: Axis, [x, y, z]: [i32; 3]) -> [i32; 3] {
    match axis {
        Axis::Row => [-z, y, x],
        Axis::Column => [x, -z, y],
        Axis::Side => [y, -x, z],
    }
}

fn rotate(axis: Axis, direction: Direction, v: [i32; 3]) -> [i32; 3] {
    match direction {
        Direction::Clockwise => quarter(axis, v),
        Direction::CounterClockwise => quarter(axis, quarter(axis, quarter(axis, v))),
    }
}

fn in_layer(size: usize, m: Move, s: &Sticker) -> bool {
    let top = size as i32 - 1;
    let near = 2 * m.layer as i32 - top;
    match m.axis {
        Axis::Row => s.position[Y] == -near,
        Axis::Column => s.position[X] == near,
        Axis::Side => s.position[Z] == -near,
    }
}

fn compile(size: usize, m: Move) -> Turn {
    let copies = (0..6 * size * size)
        .filter_map(|from| {
            let s = sticker(size, from);
            if !in_layer(size, m, &s) {
                return None;
            }
            let moved = Sticker {
                position: rotate(m.axis, m.direction, s.position),
                normal: rotate(m.axis, m.direction, s.normal),
            };
            let to = index_of(size, moved);
            (to != from).then_some((to, from))
        })
        .collect();
    Turn { copies }
}
