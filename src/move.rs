use crate::prelude::*;

use enum_iterator::Sequence;

/// A quarter twist of one slab of the cube.
///
/// `layer` counts slabs from the axis' near face: rows from Up, columns from
/// Left, sides from Front. `direction` is seen from that same near face, so
/// `Move { axis: Row, layer: 0, direction: Clockwise }` is the face turn `U`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Move {
    pub axis: Axis,
    pub layer: usize,
    pub direction: Direction,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Sequence)]
pub enum Axis {
    Row,
    Column,
    Side,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Sequence)]
pub enum Direction {
    Clockwise,
    CounterClockwise,
}

impl Direction {
    pub fn reverse(self) -> Direction {
        match self {
            Direction::Clockwise => Direction::CounterClockwise,
            Direction::CounterClockwise => Direction::Clockwise,
        }
    }
}

impl Axis {
    fn near(self) -> Face {
        match self {
            Axis::Row => Face::Up,
            Axis::Column => Face::Left,
            Axis::Side => Face::Front,
        }
    }

    fn name(self) -> &'static str {
        match self {
            Axis::Row => "row",
            Axis::Column => "col",
            Axis::Side => "side",
        }
    }
}

impl Move {
    pub fn new(axis: Axis, layer: usize, direction: Direction) -> Move {
        Move {
            axis,
            layer,
            direction,
        }
    }

    /// The 90° turn of a whole face, clockwise as seen looking at that face.
    pub fn face_turn(face: Face, prime: bool, size: usize) -> Move {
        let (axis, far) = match face {
            Face::Up => (Axis::Row, false),
            Face::Down => (Axis::Row, true),
            Face::Left => (Axis::Column, false),
            Face::Right => (Axis::Column, true),
            Face::Front => (Axis::Side, false),
            Face::Back => (Axis::Side, true),
        };
        let layer = if far { size - 1 } else { 0 };
        let direction = match far ^ prime {
            false => Direction::Clockwise,
            true => Direction::CounterClockwise,
        };
        Move::new(axis, layer, direction)
    }

    /// Every twist of a cube with edge length `size`, axis × direction × layer.
    pub fn all(size: usize) -> impl Iterator<Item = Move> {
        enum_iterator::all::<Axis>().flat_map(move |axis| {
            enum_iterator::all::<Direction>().flat_map(move |direction| {
                (0..size).map(move |layer| Move::new(axis, layer, direction))
            })
        })
    }

    pub fn inverse(self) -> Move {
        Move {
            direction: self.direction.reverse(),
            ..self
        }
    }

    pub fn inverse_seq(moves: &[Move]) -> Vec<Move> {
        moves.iter().rev().map(|m| m.inverse()).collect()
    }

    /// Whether following `previous` with this move can be part of a shortest path.
    pub fn could_follow(&self, previous: &Move) -> bool {
        *self != previous.inverse()
    }

    /// Position of this move in a `size` cube's turn table.
    pub fn index(&self, size: usize) -> usize {
        let axis = self.axis as usize;
        let direction = self.direction as usize;
        (axis * 2 + direction) * size + self.layer
    }

    /// The face-turn reading of this move, if it twists an outer layer.
    pub fn as_face_turn(&self, size: usize) -> Option<(Face, bool)> {
        let far = if self.layer == 0 {
            false
        } else if self.layer + 1 == size {
            true
        } else {
            return None;
        };
        let face = if far {
            self.axis.near().opposite()
        } else {
            self.axis.near()
        };
        let prime = far ^ (self.direction == Direction::CounterClockwise);
        Some((face, prime))
    }

    pub fn notation(self, size: usize) -> Notation {
        Notation { move_: self, size }
    }

    /// Parses `U`, `D'`, `row1`, `col0'` or `side2` for a cube of the given size.
    pub fn parse(s: &str, size: usize) -> Result<Move, Error> {
        let invalid = || Error::InvalidMove(s.to_string());

        let (body, prime) = match s.strip_suffix('\'') {
            Some(body) => (body, true),
            None => (s, false),
        };

        let mut chars = body.chars();
        if let (Some(c), None) = (chars.next(), chars.next()) {
            let face = Face::from_letter(c).ok_or_else(invalid)?;
            return Ok(Move::face_turn(face, prime, size));
        }

        let (axis, layer) = enum_iterator::all::<Axis>()
            .find_map(|axis| body.strip_prefix(axis.name()).map(|rest| (axis, rest)))
            .ok_or_else(invalid)?;
        let layer: usize = layer.parse().map_err(|_| invalid())?;
        if layer >= size {
            return Err(Error::LayerOutOfRange { layer, size });
        }

        let direction = match prime {
            false => Direction::Clockwise,
            true => Direction::CounterClockwise,
        };
        Ok(Move::new(axis, layer, direction))
    }

    pub fn parse_sequence(s: &str, size: usize) -> Result<Vec<Move>, Error> {
        s.split_whitespace().map(|m| Move::parse(m, size)).collect()
    }
}

/// Display adapter; face letters for outer layers, `row1'` style otherwise.
pub struct Notation {
    move_: Move,
    size: usize,
}

impl std::fmt::Display for Notation {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self.move_.as_face_turn(self.size) {
            Some((face, prime)) => {
                write!(f, "{}", face)?;
                if prime {
                    write!(f, "'")?;
                }
            }
            None => {
                write!(f, "{}{}", self.move_.axis.name(), self.move_.layer)?;
                if self.move_.direction == Direction::CounterClockwise {
                    write!(f, "'")?;
                }
            }
        }
        Ok(())
    }
}

pub fn format_path(moves: &[Move], size: usize) -> String {
    moves
        .iter()
        .map(|m| m.notation(size).to_string())
        .collect::<Vec<_>>()
        .join(" ")
}

/// The move alphabet a search expands with.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MoveSet {
    /// The twelve quarter turns of the outer faces.
    FaceTurns,
    /// Every row, column and side slab in both directions.
    LayerTwists,
}

impl MoveSet {
    pub fn moves(self, size: usize) -> Vec<Move> {
        match self {
            MoveSet::FaceTurns => [false, true]
                .into_iter()
                .flat_map(|prime| {
                    Face::ORDER
                        .into_iter()
                        .map(move |face| Move::face_turn(face, prime, size))
                })
                .collect(),
            MoveSet::LayerTwists => Move::all(size).collect(),
        }
    }
}
