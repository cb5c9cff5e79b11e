use std::str::FromStr;

use rand::{Rng, distr::StandardUniform, prelude::Distribution};
use serde::{Deserialize, Serialize};

/// Side length of the square template every rotation state is drawn on.
pub const TEMPLATE_SIZE: usize = 5;

pub(crate) const PIECE_SPAWN_X: i32 = 3;
pub(crate) const PIECE_SPAWN_Y: i32 = 0;

/// A falling piece (tetromino): shape kind, rotation index and anchor position.
///
/// The anchor is the top-left corner of the piece's 5×5 template in board
/// coordinates. Absolute occupied cells are `anchor + template offset`, so two
/// pieces with the same kind and rotation always occupy the same relative cells.
///
/// Pieces are `Copy`; every clone is fully independent of the original.
///
/// # Coordinate System
///
/// - x increases rightward, y increases downward
/// - Row 0 is the topmost visible row; negative rows are above the board
/// - Coordinates are signed since a piece may hang off any edge while searching
///
/// # Example
///
/// ```
/// use autotris_engine::{Piece, PieceKind};
///
/// let mut piece = Piece::new(PieceKind::T);
/// piece.rotate();
/// piece.translate(1, 2);
/// assert_eq!(piece.rotation(), 1);
/// assert_eq!((piece.x(), piece.y()), (4, 2));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Piece {
    position: PiecePosition,
    rotation: u8,
    kind: PieceKind,
}

impl Serialize for Piece {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        // Format: "kind#rotation@x,y" (e.g., "S#1@4,-1")
        serializer.collect_str(&format_args!(
            "{}#{}@{},{}",
            self.kind.as_char(),
            self.rotation,
            self.position.x,
            self.position.y
        ))
    }
}

impl<'de> Deserialize<'de> for Piece {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// Error returned when parsing a piece from its `kind#rotation@x,y` form.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
#[display("invalid piece '{input}': {reason}")]
pub struct ParsePieceError {
    input: String,
    reason: &'static str,
}

impl FromStr for Piece {
    type Err = ParsePieceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = |reason| ParsePieceError {
            input: s.to_owned(),
            reason,
        };

        let (kind_str, rest) = s.split_once('#').ok_or_else(|| err("missing '#'"))?;
        let (rotation_str, position_str) =
            rest.split_once('@').ok_or_else(|| err("missing '@'"))?;
        let (x_str, y_str) = position_str
            .split_once(',')
            .ok_or_else(|| err("missing ','"))?;

        let kind: PieceKind = kind_str.parse().map_err(|_| err("invalid piece kind"))?;
        let rotation = rotation_str
            .parse::<usize>()
            .map_err(|_| err("invalid rotation"))?;
        if rotation >= kind.rotation_count() {
            return Err(err("rotation out of range for piece kind"));
        }
        let x = x_str.parse().map_err(|_| err("invalid x position"))?;
        let y = y_str.parse().map_err(|_| err("invalid y position"))?;

        Ok(Piece::new(kind).with_rotation(rotation).with_position(x, y))
    }
}

impl Piece {
    /// Creates a piece of the given kind at the spawn anchor in rotation 0.
    #[must_use]
    pub fn new(kind: PieceKind) -> Self {
        Self {
            position: PiecePosition::SPAWN_POSITION,
            rotation: 0,
            kind,
        }
    }

    #[must_use]
    pub fn position(&self) -> PiecePosition {
        self.position
    }

    #[must_use]
    pub fn x(&self) -> i32 {
        self.position.x
    }

    #[must_use]
    pub fn y(&self) -> i32 {
        self.position.y
    }

    /// Current rotation index, always in `0..kind.rotation_count()`.
    #[must_use]
    pub fn rotation(&self) -> usize {
        usize::from(self.rotation)
    }

    #[must_use]
    pub fn kind(&self) -> PieceKind {
        self.kind
    }

    #[must_use]
    pub fn rotation_count(&self) -> usize {
        self.kind.rotation_count()
    }

    /// Absolute board cells occupied by the piece in its current rotation.
    #[must_use]
    pub fn blocks(&self) -> [(i32, i32); 4] {
        self.kind.shape(self.rotation()).map(|(dx, dy)| {
            (
                self.position.x + i32::from(dx),
                self.position.y + i32::from(dy),
            )
        })
    }

    /// Advances the rotation index cyclically. Legality is not checked.
    pub fn rotate(&mut self) {
        *self = self.rotated();
    }

    /// Shifts the anchor. Bounds are not checked.
    pub fn translate(&mut self, dx: i32, dy: i32) {
        *self = self.moved(dx, dy);
    }

    #[must_use]
    pub fn rotated(self) -> Self {
        self.with_rotation(self.rotation() + 1)
    }

    #[must_use]
    pub fn moved(self, dx: i32, dy: i32) -> Self {
        Self {
            position: PiecePosition::new(self.position.x + dx, self.position.y + dy),
            ..self
        }
    }

    /// Returns the piece with the rotation index set to `rotation` modulo the
    /// number of rotation states of its kind.
    #[must_use]
    pub fn with_rotation(self, rotation: usize) -> Self {
        let rotation = rotation % self.kind.rotation_count();
        Self {
            // rotation_count() never exceeds 4
            rotation: u8::try_from(rotation).unwrap_or_default(),
            ..self
        }
    }

    #[must_use]
    pub fn with_position(self, x: i32, y: i32) -> Self {
        Self {
            position: PiecePosition::new(x, y),
            ..self
        }
    }
}

/// Anchor position of a piece: the top-left corner of its 5×5 template.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
pub struct PiecePosition {
    x: i32,
    y: i32,
}

impl PiecePosition {
    pub const SPAWN_POSITION: Self = Self::new(PIECE_SPAWN_X, PIECE_SPAWN_Y);

    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    #[must_use]
    pub const fn x(self) -> i32 {
        self.x
    }

    #[must_use]
    pub const fn y(self) -> i32 {
        self.y
    }
}

/// Enum representing the type of piece.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize, derive_more::Display)]
#[repr(u8)]
pub enum PieceKind {
    /// I-piece.
    I = 0,
    /// O-piece.
    O = 1,
    /// T-piece.
    T = 2,
    /// S-piece.
    S = 3,
    /// Z-piece.
    Z = 4,
    /// J-piece.
    J = 5,
    /// L-piece.
    L = 6,
}

impl Distribution<PieceKind> for StandardUniform {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> PieceKind {
        PieceKind::ALL[rng.random_range(0..PieceKind::LEN)]
    }
}

/// Error returned when a piece kind character is not one of `IOTSZJL`.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
#[display("invalid piece kind: '{_0}' (expected one of I, O, T, S, Z, J, L)")]
pub struct ParsePieceKindError(#[error(not(source))] String);

impl FromStr for PieceKind {
    type Err = ParsePieceKindError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => PieceKind::from_char(c.to_ascii_uppercase())
                .ok_or_else(|| ParsePieceKindError(s.to_owned())),
            _ => Err(ParsePieceKindError(s.to_owned())),
        }
    }
}

impl PieceKind {
    /// Number of piece types (7).
    pub const LEN: usize = 7;

    pub const ALL: [PieceKind; Self::LEN] = [
        PieceKind::I,
        PieceKind::O,
        PieceKind::T,
        PieceKind::S,
        PieceKind::Z,
        PieceKind::J,
        PieceKind::L,
    ];

    /// Number of distinct rotation states (1, 2 or 4).
    #[must_use]
    pub const fn rotation_count(self) -> usize {
        self.shapes().len()
    }

    /// Template offsets of the four occupied cells for a rotation index.
    ///
    /// The index is taken modulo [`rotation_count`](Self::rotation_count).
    #[must_use]
    pub fn shape(self, rotation: usize) -> PieceShape {
        let shapes = self.shapes();
        shapes[rotation % shapes.len()]
    }

    const fn shapes(self) -> &'static [PieceShape] {
        match self {
            PieceKind::I => &I_SHAPES,
            PieceKind::O => &O_SHAPES,
            PieceKind::T => &T_SHAPES,
            PieceKind::S => &S_SHAPES,
            PieceKind::Z => &Z_SHAPES,
            PieceKind::J => &J_SHAPES,
            PieceKind::L => &L_SHAPES,
        }
    }

    /// Display color as an RGB triple.
    #[must_use]
    pub const fn color(self) -> (u8, u8, u8) {
        match self {
            PieceKind::I => (0, 255, 255),
            PieceKind::O => (255, 255, 0),
            PieceKind::T => (128, 0, 128),
            PieceKind::S => (0, 255, 0),
            PieceKind::Z => (255, 0, 0),
            PieceKind::J => (0, 0, 255),
            PieceKind::L => (255, 165, 0),
        }
    }

    /// Returns the single character representation of this piece kind.
    ///
    /// # Examples
    ///
    /// ```
    /// use autotris_engine::PieceKind;
    ///
    /// assert_eq!(PieceKind::I.as_char(), 'I');
    /// assert_eq!(PieceKind::T.as_char(), 'T');
    /// ```
    #[must_use]
    pub const fn as_char(self) -> char {
        match self {
            PieceKind::I => 'I',
            PieceKind::O => 'O',
            PieceKind::T => 'T',
            PieceKind::S => 'S',
            PieceKind::Z => 'Z',
            PieceKind::J => 'J',
            PieceKind::L => 'L',
        }
    }

    /// Parses a piece kind from a single character.
    ///
    /// # Examples
    ///
    /// ```
    /// use autotris_engine::PieceKind;
    ///
    /// assert_eq!(PieceKind::from_char('I'), Some(PieceKind::I));
    /// assert_eq!(PieceKind::from_char('X'), None);
    /// ```
    #[must_use]
    pub const fn from_char(c: char) -> Option<Self> {
        match c {
            'I' => Some(PieceKind::I),
            'O' => Some(PieceKind::O),
            'T' => Some(PieceKind::T),
            'S' => Some(PieceKind::S),
            'Z' => Some(PieceKind::Z),
            'J' => Some(PieceKind::J),
            'L' => Some(PieceKind::L),
            _ => None,
        }
    }
}

/// Offsets `(dx, dy)` of the four occupied cells inside the 5×5 template.
pub type PieceShape = [(u8, u8); 4];

/// Builds a shape from a 5×5 template where `#` marks an occupied cell.
///
/// Evaluated at compile time; a template without exactly four cells fails the build.
#[expect(clippy::cast_possible_truncation)]
const fn shape(rows: [&str; TEMPLATE_SIZE]) -> PieceShape {
    let mut cells = [(0, 0); 4];
    let mut n = 0;
    let mut y = 0;
    while y < TEMPLATE_SIZE {
        let row = rows[y].as_bytes();
        assert!(row.len() == TEMPLATE_SIZE);
        let mut x = 0;
        while x < TEMPLATE_SIZE {
            if row[x] == b'#' {
                assert!(n < 4);
                cells[n] = (x as u8, y as u8);
                n += 1;
            }
            x += 1;
        }
        y += 1;
    }
    assert!(n == 4);
    cells
}

#[rustfmt::skip]
const I_SHAPES: [PieceShape; 2] = [
    shape([".....", "..#..", "..#..", "..#..", "..#.."]),
    shape([".....", ".....", "####.", ".....", "....."]),
];

#[rustfmt::skip]
const O_SHAPES: [PieceShape; 1] = [
    shape([".....", ".....", ".##..", ".##..", "....."]),
];

#[rustfmt::skip]
const T_SHAPES: [PieceShape; 4] = [
    shape([".....", ".....", ".#...", "###..", "....."]),
    shape([".....", ".....", ".#...", ".##..", ".#..."]),
    shape([".....", ".....", ".....", "###..", ".#..."]),
    shape([".....", ".....", ".#...", "##...", ".#..."]),
];

#[rustfmt::skip]
const S_SHAPES: [PieceShape; 2] = [
    shape([".....", ".....", ".##..", "##...", "....."]),
    shape([".....", ".#...", ".##..", "..#..", "....."]),
];

#[rustfmt::skip]
const Z_SHAPES: [PieceShape; 2] = [
    shape([".....", ".....", "##...", ".##..", "....."]),
    shape([".....", "..#..", ".##..", ".#...", "....."]),
];

#[rustfmt::skip]
const J_SHAPES: [PieceShape; 4] = [
    shape([".....", ".#...", ".#...", "##...", "....."]),
    shape([".....", ".....", "#....", "###..", "....."]),
    shape([".....", ".##..", ".#...", ".#...", "....."]),
    shape([".....", ".....", "###..", "..#..", "....."]),
];

#[rustfmt::skip]
const L_SHAPES: [PieceShape; 4] = [
    shape([".....", "..#..", "..#..", ".##..", "....."]),
    shape([".....", ".....", "###..", "#....", "....."]),
    shape([".....", "##...", ".#...", ".#...", "....."]),
    shape([".....", ".....", "..#..", "###..", "....."]),
];
