use serde::{Deserialize, Serialize};

/// Enum representing the type of piece.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[repr(u8)]
pub enum PieceKind {
    /// I-piece.
    I = 0,
    /// O-piece.
    O = 1,
    /// S-piece.
    S = 2,
    /// Z-piece.
    Z = 3,
    /// J-piece.
    J = 4,
    /// L-piece.
    L = 5,
    /// T-piece.
    T = 6,
}

impl PieceKind {
    /// Number of piece types (7).
    pub const LEN: usize = 7;

    /// All piece kinds, in declaration order.
    pub const ALL: [PieceKind; Self::LEN] = [
        PieceKind::I,
        PieceKind::O,
        PieceKind::S,
        PieceKind::Z,
        PieceKind::J,
        PieceKind::L,
        PieceKind::T,
    ];

    /// Hue offset in `[0, 1)`, consumed only by the renderer.
    #[must_use]
    pub const fn hue(self) -> f32 {
        match self {
            PieceKind::I => 0.50,
            PieceKind::O => 0.14,
            PieceKind::S => 0.33,
            PieceKind::Z => 0.00,
            PieceKind::J => 0.61,
            PieceKind::L => 0.08,
            PieceKind::T => 0.78,
        }
    }

    /// Returns the kind's base occupancy matrix at spawn orientation.
    ///
    /// The matrix is a tight bounding box; rotation states are computed from
    /// it with [`Shape::rotated`], never stored per kind.
    #[must_use]
    pub fn base_shape(self) -> Shape {
        let rows: &[&[u8]] = match self {
            PieceKind::I => &[&[1, 1, 1, 1]],
            PieceKind::O => &[&[1, 1], &[1, 1]],
            PieceKind::S => &[&[0, 1, 1], &[1, 1, 0]],
            PieceKind::Z => &[&[1, 1, 0], &[0, 1, 1]],
            PieceKind::J => &[&[1, 0, 0], &[1, 1, 1]],
            PieceKind::L => &[&[0, 0, 1], &[1, 1, 1]],
            PieceKind::T => &[&[0, 1, 0], &[1, 1, 1]],
        };
        Shape::from_rows(rows)
    }

    /// Returns the single character representation of this piece kind.
    #[must_use]
    pub const fn as_char(self) -> char {
        match self {
            PieceKind::I => 'I',
            PieceKind::O => 'O',
            PieceKind::S => 'S',
            PieceKind::Z => 'Z',
            PieceKind::J => 'J',
            PieceKind::L => 'L',
            PieceKind::T => 'T',
        }
    }

    /// Parses a piece kind from a single character.
    #[must_use]
    pub const fn from_char(c: char) -> Option<Self> {
        match c {
            'I' => Some(PieceKind::I),
            'O' => Some(PieceKind::O),
            'S' => Some(PieceKind::S),
            'Z' => Some(PieceKind::Z),
            'J' => Some(PieceKind::J),
            'L' => Some(PieceKind::L),
            'T' => Some(PieceKind::T),
            _ => None,
        }
    }
}

/// Rectangular 0/1 occupancy matrix of a piece.
///
/// A `Shape` carries no position and no collision logic; rotation is purely
/// geometric. Wall kicks do not exist anywhere in the engine: callers check
/// collisions separately and simply decline placements that do not fit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Shape {
    cells: Vec<Vec<bool>>,
}

impl Shape {
    fn from_rows(rows: &[&[u8]]) -> Self {
        let cells = rows
            .iter()
            .map(|row| row.iter().map(|&cell| cell != 0).collect())
            .collect();
        Self { cells }
    }

    /// Number of rows in the bounding box.
    #[must_use]
    pub fn height(&self) -> usize {
        self.cells.len()
    }

    /// Number of columns in the bounding box.
    #[must_use]
    pub fn width(&self) -> usize {
        self.cells[0].len()
    }

    /// Returns the matrix rotated 90 degrees clockwise
    /// (transpose-and-reverse). Applying it four times yields the original
    /// occupancy.
    #[must_use]
    pub fn rotated(&self) -> Self {
        let (height, width) = (self.height(), self.width());
        let cells = (0..width)
            .map(|row| (0..height).map(|col| self.cells[height - 1 - col][row]).collect())
            .collect();
        Self { cells }
    }

    /// Iterates the `(dx, dy)` offsets of occupied cells, row-major.
    pub fn occupied_offsets(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.cells.iter().enumerate().flat_map(|(dy, row)| {
            row.iter()
                .enumerate()
                .filter_map(move |(dx, &filled)| filled.then_some((dx, dy)))
        })
    }
}

/// The currently falling piece: kind, rotated occupancy matrix, and signed
/// top-left anchor.
///
/// Owned exclusively by the board and replaced wholesale on spawn and lock;
/// only the anchor and the matrix change while the executor walks the piece
/// toward its target. The anchor is signed because the search deliberately
/// evaluates columns slightly outside the nominal grid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActivePiece {
    kind: PieceKind,
    shape: Shape,
    pub(crate) x: i32,
    pub(crate) y: i32,
}

impl ActivePiece {
    pub(crate) fn new(kind: PieceKind, shape: Shape, x: i32, y: i32) -> Self {
        Self { kind, shape, x, y }
    }

    #[must_use]
    pub fn kind(&self) -> PieceKind {
        self.kind
    }

    #[must_use]
    pub fn shape(&self) -> &Shape {
        &self.shape
    }

    /// Anchor column of the shape's top-left corner.
    #[must_use]
    pub fn x(&self) -> i32 {
        self.x
    }

    /// Anchor row of the shape's top-left corner.
    #[must_use]
    pub fn y(&self) -> i32 {
        self.y
    }

    pub(crate) fn rotate(&mut self) {
        self.shape = self.shape.rotated();
    }

    pub(crate) fn shift(&mut self, dx: i32) {
        self.x += dx;
    }

    pub(crate) fn descend(&mut self) {
        self.y += 1;
    }
}
