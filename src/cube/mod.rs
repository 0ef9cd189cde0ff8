use crate::prelude::*;

use std::collections::HashMap;

mod turn;
pub use turn::*;

/// The six faces, in the order their facelets appear in an encoding.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Face {
    Up,
    Front,
    Left,
    Right,
    Down,
    Back,
}

impl Face {
    pub const ORDER: [Face; 6] = [
        Face::Up,
        Face::Front,
        Face::Left,
        Face::Right,
        Face::Down,
        Face::Back,
    ];

    pub fn letter(self) -> char {
        match self {
            Face::Up => 'U',
            Face::Front => 'F',
            Face::Left => 'L',
            Face::Right => 'R',
            Face::Down => 'D',
            Face::Back => 'B',
        }
    }

    pub fn from_letter(c: char) -> Option<Face> {
        Face::ORDER.into_iter().find(|f| f.letter() == c)
    }

    pub fn opposite(self) -> Face {
        match self {
            Face::Up => Face::Down,
            Face::Down => Face::Up,
            Face::Front => Face::Back,
            Face::Back => Face::Front,
            Face::Left => Face::Right,
            Face::Right => Face::Left,
        }
    }
}

impl std::fmt::Display for Face {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}", self.letter())
    }
}

/// One sticker colour. Any single character works as a colour symbol.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Color(pub char);

impl From<Face> for Color {
    fn from(face: Face) -> Color {
        Color(face.letter())
    }
}

impl std::fmt::Display for Color {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Facelet colours of an `size`×`size`×`size` cube.
///
/// Faces are stored in [`Face::ORDER`], each row-major as seen looking at the
/// face: Up with Back at its top edge, Down with Front at its top edge, and
/// the four side faces with Up at their top edge. Derived equality and
/// hashing walk the facelets in that same order as [`Cube::encoding`].
///
/// Moves consume the cube and hand back a new value; nothing mutates a cube
/// another owner can see.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Cube {
    size: usize,
    facelets: Box<[Color]>,
}

impl Cube {
    /// The canonical solved cube, each face coloured with its own letter.
    pub fn solved(size: usize) -> Cube {
        Cube::filled(size, Face::ORDER.map(Color::from))
    }

    /// A solved cube with the given colour on each face of [`Face::ORDER`].
    pub fn filled(size: usize, colors: [Color; 6]) -> Cube {
        let facelets = colors
            .iter()
            .flat_map(|&c| std::iter::repeat(c).take(size * size))
            .collect();
        Cube { size, facelets }
    }

    /// Builds a cube from six face rows of whitespace separated tokens.
    pub fn from_rows<S: AsRef<str>>(rows: &[S]) -> Result<Cube, Error> {
        if rows.len() != Face::ORDER.len() {
            return Err(Error::Format(format!(
                "Incorrect number of faces (expected 6, found {})",
                rows.len()
            )));
        }

        let mut size = None;
        let mut facelets = Vec::new();
        for (face, row) in Face::ORDER.into_iter().zip(rows) {
            let tokens = row.as_ref().split_whitespace().collect::<Vec<_>>();
            let n = *size.get_or_insert_with(|| edge_length(tokens.len()).unwrap_or(0));
            if n == 0 || tokens.len() != n * n {
                return Err(Error::Format(format!(
                    "Incorrect number of colors in face {}",
                    face
                )));
            }

            for token in tokens {
                let mut chars = token.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) => facelets.push(Color(c)),
                    _ => {
                        return Err(Error::Format(format!(
                            "Color {:?} in face {} is not a single symbol",
                            token, face
                        )))
                    }
                }
            }
        }

        Ok(Cube {
            size: size.unwrap_or(0),
            facelets: facelets.into_boxed_slice(),
        })
    }

    /// Builds a cube from one concatenated stream of `6n²` colour symbols
    /// in encoding order. Whitespace is ignored.
    pub fn from_stream(stream: &str) -> Result<Cube, Error> {
        let facelets = stream
            .chars()
            .filter(|c| !c.is_whitespace())
            .map(Color)
            .collect::<Vec<_>>();

        let per_face = match facelets.len() % 6 {
            0 => facelets.len() / 6,
            _ => 0,
        };
        let size = edge_length(per_face).ok_or_else(|| {
            Error::Format(format!(
                "{} facelets do not make six square faces",
                facelets.len()
            ))
        })?;

        Ok(Cube {
            size,
            facelets: facelets.into_boxed_slice(),
        })
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn face(&self, face: Face) -> &[Color] {
        let area = self.size * self.size;
        let start = face as usize * area;
        &self.facelets[start..start + area]
    }

    pub fn get(&self, face: Face, row: usize, col: usize) -> Color {
        self.face(face)[row * self.size + col]
    }

    /// The colour count invariant: six colours, each on exactly `n²` facelets.
    pub fn validate(&self) -> bool {
        let counts = self.color_counts();
        let area = self.size * self.size;
        counts.len() == 6 && counts.values().all(|&count| count == area)
    }

    pub fn validated(self) -> Result<Cube, Error> {
        if self.validate() {
            return Ok(self);
        }

        let mut counts = self.color_counts().into_iter().collect::<Vec<_>>();
        counts.sort();
        Err(Error::Validity {
            expected: self.size * self.size,
            counts,
        })
    }

    fn color_counts(&self) -> HashMap<Color, usize> {
        let mut counts = HashMap::new();
        for &c in self.facelets.iter() {
            *counts.entry(c).or_insert(0) += 1;
        }
        counts
    }

    /// Every face a single colour, and no two faces sharing one.
    pub fn is_solved(&self) -> bool {
        let mut seen = Vec::with_capacity(6);
        for face in Face::ORDER {
            let facelets = self.face(face);
            let first = match facelets.first() {
                Some(c) => *c,
                None => return false,
            };
            if facelets.iter().any(|&c| c != first) || seen.contains(&first) {
                return false;
            }
            seen.push(first);
        }
        true
    }

    /// The solved cube matching this cube's centre stickers.
    ///
    /// Only odd sizes have fixed centres, and face turns never move them, so
    /// this is the goal a face-turn search must reach.
    pub fn center_goal(&self) -> Option<Cube> {
        if self.size % 2 == 0 {
            return None;
        }

        let mid = self.size / 2;
        let colors = Face::ORDER.map(|face| self.get(face, mid, mid));
        let mut distinct = colors.to_vec();
        distinct.sort();
        distinct.dedup();
        match distinct.len() {
            6 => Some(Cube::filled(self.size, colors)),
            _ => None,
        }
    }

    /// A solved cube in this cube's own six colours, in the order they first
    /// appear in the encoding.
    pub fn palette_goal(&self) -> Option<Cube> {
        let mut colors = Vec::with_capacity(6);
        for &c in self.facelets.iter() {
            if !colors.contains(&c) {
                colors.push(c);
            }
        }
        let colors: [Color; 6] = colors.try_into().ok()?;
        Some(Cube::filled(self.size, colors))
    }

    pub fn encoding(&self) -> String {
        self.facelets.iter().map(|c| c.0).collect()
    }

    pub fn apply(self, move_: Move) -> Result<Self, Error> {
        let table = TurnTable::for_size(self.size);
        Ok(table.turn(move_)?.apply(&self))
    }

    pub fn apply_all(self, moves: impl IntoIterator<Item = Move>) -> Result<Self, Error> {
        moves.into_iter().try_fold(self, |cube, m| cube.apply(m))
    }
}

fn edge_length(area: usize) -> Option<usize> {
    (1..=area).take_while(|n| n * n <= area).find(|n| n * n == area)
}

impl std::fmt::Display for Cube {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        let n = self.size;
        let row = |face: Face, r: usize| -> String {
            (0..n).map(|c| self.get(face, r, c).0).collect()
        };
        let indent = " ".repeat(n + 1);

        for r in 0..n {
            writeln!(f, "{}{}", indent, row(Face::Up, r))?;
        }

        for r in 0..n {
            let middle = [Face::Left, Face::Front, Face::Right, Face::Back]
                .map(|face| row(face, r))
                .join(" ");
            writeln!(f, "{}", middle)?;
        }

        for r in 0..n {
            writeln!(f, "{}{}", indent, row(Face::Down, r))?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn solved_rows() -> Vec<String> {
        Face::ORDER
            .iter()
            .map(|face| vec![face.letter().to_string(); 9].join(" "))
            .collect()
    }

    #[test]
    fn solved_is_solved() {
        assert!(Cube::solved(3).is_solved());
        assert!(Cube::solved(4).is_solved());
    }

    #[test]
    fn single_move_is_not_solved() {
        for size in [2, 3, 4] {
            for m in Move::all(size) {
                let cube = Cube::solved(size).apply(m).unwrap();
                assert!(!cube.is_solved(), "{} solved after {:?}", size, m);
            }
        }
    }

    #[test]
    fn faces_with_a_repeated_color_are_not_solved() {
        let colors = [Color('W'), Color('W'), Color('R'), Color('O'), Color('G'), Color('B')];
        assert!(!Cube::filled(3, colors).is_solved());
    }

    #[test]
    fn solved_is_valid() {
        assert!(Cube::solved(3).validate());
    }

    #[test]
    fn perturbed_counts_are_invalid() {
        let mut rows = solved_rows();
        rows[0] = "U U U U U U U U F".to_string();
        let cube = Cube::from_rows(&rows).unwrap();
        assert!(!cube.validate());
        assert!(matches!(
            cube.validated(),
            Err(Error::Validity { expected: 9, .. })
        ));
    }

    #[test]
    fn scrambled_cube_stays_valid() {
        assert!(cube_with_moves("R U F' L2 D B").validate());
    }

    #[test]
    fn loads_rows() {
        let cube = Cube::from_rows(&solved_rows()).unwrap();
        assert_eq!(cube, Cube::solved(3));
    }

    #[test]
    fn five_rows_is_format_error() {
        let rows = &solved_rows()[..5];
        assert!(matches!(Cube::from_rows(rows), Err(Error::Format(_))));
    }

    #[test]
    fn short_face_is_format_error() {
        let mut rows = solved_rows();
        rows[2] = "L L L L L L L L".to_string();
        match Cube::from_rows(&rows) {
            Err(Error::Format(message)) => assert!(message.contains("face L"), "{}", message),
            other => panic!("expected a format error, got {:?}", other),
        }
    }

    #[test]
    fn loads_stream() {
        let stream = Cube::solved(3).encoding();
        let split = format!("{}\n{}", &stream[..20], &stream[20..]);
        assert_eq!(Cube::from_stream(&split).unwrap(), Cube::solved(3));
    }

    #[test]
    fn stream_of_wrong_length_is_format_error() {
        assert!(matches!(Cube::from_stream("UUUU"), Err(Error::Format(_))));
        assert!(matches!(
            Cube::from_stream(&"U".repeat(6 * 5)),
            Err(Error::Format(_))
        ));
    }

    #[test]
    fn encoding_follows_face_order() {
        let encoding = Cube::solved(2).encoding();
        assert_eq!(encoding, "UUUUFFFFLLLLRRRRDDDDBBBB");
    }

    #[test]
    fn center_goal_uses_centers() {
        let cube = cube_with_moves("R U' B");
        assert_eq!(cube.center_goal(), Some(Cube::solved(3)));
        assert_eq!(Cube::solved(2).center_goal(), None);
    }

    #[test]
    fn palette_goal_uses_the_cubes_own_colors() {
        let palette = ['W', 'G', 'O', 'R', 'Y', 'B'].map(Color);
        let cube = Cube::filled(2, palette)
            .apply(Move::parse("R", 2).unwrap())
            .unwrap();
        let goal = cube.palette_goal().unwrap();
        assert!(goal.is_solved());
        assert!(goal.facelets.iter().all(|c| palette.contains(c)));

        let mut rows = vec!["A A A A".to_string(); 6];
        rows[0] = "B B B B".to_string();
        assert_eq!(Cube::from_rows(&rows).unwrap().palette_goal(), None);
    }

    #[test]
    fn out_of_range_layer_is_rejected() {
        let m = Move::new(Axis::Side, 3, Direction::Clockwise);
        assert!(matches!(
            Cube::solved(3).apply(m),
            Err(Error::LayerOutOfRange { layer: 3, size: 3 })
        ));
    }

    #[test]
    fn display_draws_net() {
        let net = Cube::solved(2).to_string();
        assert_eq!(
            net,
            "   UU\n   UU\nLL FF RR BB\nLL FF RR BB\n   DD\n   DD\n"
        );
    }

    #[quickcheck]
    fn encoding_is_deterministic(moves: Vec<Move>) -> bool {
        let a = Cube::solved(3).apply_all(moves.clone()).unwrap();
        let b = Cube::solved(3).apply_all(moves).unwrap();
        a.encoding() == b.encoding() && a == b
    }

    #[quickcheck]
    fn encoding_round_trips_through_stream(moves: Vec<Move>) -> bool {
        let cube = Cube::solved(3).apply_all(moves).unwrap();
        Cube::from_stream(&cube.encoding()).unwrap() == cube
    }
}
