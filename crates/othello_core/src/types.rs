use std::fmt;

pub const BOARD_SIZE: usize = 8;
pub const NUM_CELLS: usize = BOARD_SIZE * BOARD_SIZE;

/// Contents of a single cell. `Black` and `White` double as player colors.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum Stone {
    #[default]
    Empty,
    Black,
    White,
}

impl Stone {
    /// The opposing color. `Empty` maps to itself.
    pub fn opponent(self) -> Stone {
        match self {
            Stone::Black => Stone::White,
            Stone::White => Stone::Black,
            Stone::Empty => Stone::Empty,
        }
    }

    /// Index into per-color tables (Zobrist keys). `None` for `Empty`.
    pub fn idx(self) -> Option<usize> {
        match self {
            Stone::Black => Some(0),
            Stone::White => Some(1),
            Stone::Empty => None,
        }
    }

    pub fn is_color(self) -> bool {
        self != Stone::Empty
    }

    pub fn symbol(self) -> char {
        match self {
            Stone::Empty => '.',
            Stone::Black => 'B',
            Stone::White => 'W',
        }
    }
}

impl fmt::Display for Stone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Stone::Empty => "empty",
            Stone::Black => "black",
            Stone::White => "white",
        };
        f.write_str(name)
    }
}

/// A board coordinate. Construction does not validate; accessors treat
/// out-of-range positions as empty.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Pos {
    pub row: i8,
    pub col: i8,
}

impl Pos {
    pub const fn new(row: i8, col: i8) -> Self {
        Self { row, col }
    }

    /// Some(pos) only when both coordinates are on the board.
    pub fn try_new(row: i8, col: i8) -> Option<Self> {
        let p = Self { row, col };
        p.is_valid().then_some(p)
    }

    pub fn from_index(idx: usize) -> Self {
        Self {
            row: (idx / BOARD_SIZE) as i8,
            col: (idx % BOARD_SIZE) as i8,
        }
    }

    #[inline]
    pub fn is_valid(self) -> bool {
        (0..BOARD_SIZE as i8).contains(&self.row) && (0..BOARD_SIZE as i8).contains(&self.col)
    }

    /// Row-major cell index. Only meaningful for valid positions.
    #[inline]
    pub fn index(self) -> usize {
        self.row as usize * BOARD_SIZE + self.col as usize
    }

    #[inline]
    pub fn offset(self, dr: i8, dc: i8) -> Pos {
        Pos::new(self.row.wrapping_add(dr), self.col.wrapping_add(dc))
    }

    /// Parses algebraic coordinates: column letter a-h then row digit 1-8.
    pub fn parse(s: &str) -> Option<Pos> {
        let b = s.trim().as_bytes();
        if b.len() != 2 {
            return None;
        }
        let c = b[0].to_ascii_lowercase();
        let r = b[1];
        if !(b'a'..=b'h').contains(&c) || !(b'1'..=b'8').contains(&r) {
            return None;
        }
        Some(Pos::new((r - b'1') as i8, (c - b'a') as i8))
    }
}

impl fmt::Display for Pos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.is_valid() {
            return write!(f, "({},{})", self.row, self.col);
        }
        let c = (b'a' + self.col as u8) as char;
        let r = (b'1' + self.row as u8) as char;
        write!(f, "{c}{r}")
    }
}

/// A move chosen by a player or engine.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Move {
    Place(Pos),
    Pass,
}

impl Move {
    pub fn pos(self) -> Option<Pos> {
        match self {
            Move::Place(p) => Some(p),
            Move::Pass => None,
        }
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Move::Place(p) => write!(f, "{p}"),
            Move::Pass => f.write_str("pass"),
        }
    }
}

/// The eight ray directions as (row delta, col delta).
pub const DIRECTIONS: [(i8, i8); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];
