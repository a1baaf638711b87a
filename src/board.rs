use std::fmt;

use ansi_term::Colour::{Black, Fixed, White};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// The smallest board the rules (and the corner heuristics) make sense on.
pub const MIN_SIZE: usize = 4;

const DIRECTIONS: [(isize, isize); 8] =
    [(0, 1), (1, 1), (1, 0), (1, -1), (0, -1), (-1, -1), (-1, 0), (-1, 1)];

/// One of the two players. Dark moves first.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Color {
    Dark,
    Light,
}

impl Color {
    pub fn opponent(self) -> Color {
        match self {
            Color::Dark => Color::Light,
            Color::Light => Color::Dark,
        }
    }

    /// The number used for this color by the game manager.
    pub fn code(self) -> u8 {
        match self {
            Color::Dark => 1,
            Color::Light => 2,
        }
    }

    pub fn from_code(code: i64) -> Option<Color> {
        match code {
            1 => Some(Color::Dark),
            2 => Some(Color::Light),
            _ => None,
        }
    }
}

impl std::ops::Not for Color {
    type Output = Color;

    fn not(self) -> Color { self.opponent() }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Cell {
    Empty,
    Disc(Color),
}

impl Cell {
    pub fn code(self) -> u8 {
        match self {
            Cell::Empty => 0,
            Cell::Disc(color) => color.code(),
        }
    }

    pub fn from_code(code: i64) -> Option<Cell> {
        if code == 0 {
            Some(Cell::Empty)
        } else {
            Color::from_code(code).map(Cell::Disc)
        }
    }
}

/// A placement, addressed as (column, row) like the game manager does.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Move {
    pub column: usize,
    pub row: usize,
}

impl Move {
    pub fn new(column: usize, row: usize) -> Move { Move { column, row } }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.column, self.row)
    }
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum BoardError {
    #[error("board has {0} rows but at least {} are required", MIN_SIZE)]
    TooSmall(usize),
    #[error("row {row} has {len} cells but the board has {size} rows")]
    NotSquare { row: usize, len: usize, size: usize },
    #[error("invalid cell code {code} at column {column}, row {row}")]
    InvalidCell { code: i64, column: usize, row: usize },
}

/// An Othello position. Boards are never changed once built: applying a move
/// produces a new board, so they can be shared between sibling branches and
/// used directly as table keys.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Board {
    size: usize,
    /// Row-major, `cells[row * size + column]`
    cells: Box<[Cell]>,
}

impl Board {
    /// Builds a board from rows of game manager codes (0 empty, 1 dark,
    /// 2 light).
    pub fn new(rows: &[Vec<i64>]) -> Result<Board, BoardError> {
        let size = rows.len();
        if size < MIN_SIZE {
            return Err(BoardError::TooSmall(size));
        }
        let mut cells = Vec::with_capacity(size * size);
        for (row, values) in rows.iter().enumerate() {
            if values.len() != size {
                return Err(BoardError::NotSquare { row, len: values.len(), size });
            }
            for (column, &code) in values.iter().enumerate() {
                let cell = Cell::from_code(code)
                    .ok_or(BoardError::InvalidCell { code, column, row })?;
                cells.push(cell);
            }
        }
        Ok(Board { size, cells: cells.into_boxed_slice() })
    }

    /// The standard opening position: light on the main diagonal of the
    /// central square, dark on the other.
    pub fn starting(size: usize) -> Board {
        assert!(size >= MIN_SIZE && size % 2 == 0, "starting boards must be even and at least {}", MIN_SIZE);
        let mut cells = vec![Cell::Empty; size * size];
        let mid = size / 2;
        cells[(mid - 1) * size + mid - 1] = Cell::Disc(Color::Light);
        cells[mid * size + mid] = Cell::Disc(Color::Light);
        cells[(mid - 1) * size + mid] = Cell::Disc(Color::Dark);
        cells[mid * size + mid - 1] = Cell::Disc(Color::Dark);
        Board { size, cells: cells.into_boxed_slice() }
    }

    pub fn size(&self) -> usize { self.size }

    pub fn get(&self, column: usize, row: usize) -> Cell { self.cells[row * self.size + column] }

    pub fn rows(&self) -> Vec<Vec<u8>> {
        self.cells.chunks(self.size).map(|row| row.iter().map(|c| c.code()).collect()).collect()
    }

    /// Returns `(dark, light)` disc counts.
    pub fn disc_counts(&self) -> (i32, i32) {
        self.cells.iter().fold((0, 0), |(dark, light), cell| match cell {
            Cell::Disc(Color::Dark) => (dark + 1, light),
            Cell::Disc(Color::Light) => (dark, light + 1),
            Cell::Empty => (dark, light),
        })
    }

    pub fn empty_count(&self) -> usize {
        self.cells.iter().filter(|&&c| c == Cell::Empty).count()
    }

    /// All legal placements for `color`, columns outer and rows inner. The
    /// order is stable, and searches use it to break ties.
    pub fn legal_moves(&self, color: Color) -> Vec<Move> { self.moves(color).collect() }

    /// Lazily generates the same moves as `legal_moves`, in the same order.
    pub fn moves(&self, color: Color) -> impl Iterator<Item = Move> + '_ {
        let size = self.size;
        (0..size)
            .flat_map(move |column| (0..size).map(move |row| Move::new(column, row)))
            .filter(move |mv| self.is_legal(color, *mv))
    }

    pub fn has_moves(&self, color: Color) -> bool { self.moves(color).next().is_some() }

    pub fn is_legal(&self, color: Color, mv: Move) -> bool {
        mv.column < self.size
            && mv.row < self.size
            && self.get(mv.column, mv.row) == Cell::Empty
            && DIRECTIONS.iter().any(|&dir| self.flanked(mv.column, mv.row, dir, color) > 0)
    }

    pub fn is_game_over(&self) -> bool {
        !self.has_moves(Color::Dark) && !self.has_moves(Color::Light)
    }

    /// Places a disc for `color` and flips every flanked line.
    ///
    /// Panics if the move is not legal for `color`.
    pub fn apply_move(&self, color: Color, mv: Move) -> Board {
        assert!(
            mv.column < self.size && mv.row < self.size && self.get(mv.column, mv.row) == Cell::Empty,
            "move {} is not on an empty square", mv
        );
        let mut cells = self.cells.clone();
        let mut flipped = 0;
        for &(dx, dy) in DIRECTIONS.iter() {
            let count = self.flanked(mv.column, mv.row, (dx, dy), color);
            for step in 1..=count as isize {
                let column = (mv.column as isize + dx * step) as usize;
                let row = (mv.row as isize + dy * step) as usize;
                cells[row * self.size + column] = Cell::Disc(color);
            }
            flipped += count;
        }
        assert!(flipped > 0, "move {} does not flip anything", mv);
        cells[mv.row * self.size + mv.column] = Cell::Disc(color);
        Board { size: self.size, cells }
    }

    /// The number of opponent discs that a `color` disc placed at
    /// (column, row) would flip walking in direction `dir`.
    fn flanked(&self, column: usize, row: usize, (dx, dy): (isize, isize), color: Color) -> usize {
        let size = self.size as isize;
        let (mut x, mut y) = (column as isize + dx, row as isize + dy);
        let mut count = 0;
        while 0 <= x && x < size && 0 <= y && y < size {
            match self.get(x as usize, y as usize) {
                Cell::Empty => return 0,
                Cell::Disc(c) if c == color => return count,
                Cell::Disc(_) => count += 1,
            }
            x += dx;
            y += dy;
        }
        0
    }
}

impl Serialize for Board {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.rows().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Board {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let rows = Vec::<Vec<i64>>::deserialize(deserializer)?;
        Board::new(&rows).map_err(serde::de::Error::custom)
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let felt = Fixed(22);
        write!(f, "  ")?;
        for column in 0..self.size {
            write!(f, "{:>2}", column)?;
        }
        writeln!(f)?;
        for row in 0..self.size {
            write!(f, "{:>2}", row)?;
            for column in 0..self.size {
                let disc = match self.get(column, row) {
                    Cell::Empty => Fixed(28).on(felt).paint(" ."),
                    Cell::Disc(Color::Dark) => Black.on(felt).paint(" ●"),
                    Cell::Disc(Color::Light) => White.on(felt).paint(" ●"),
                };
                write!(f, "{}", disc)?;
            }
            writeln!(f)?;
        }
        let (dark, light) = self.disc_counts();
        write!(f, "dark {} light {}", dark, light)
    }
}

impl fmt::Debug for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Board{:?}", self.rows())
    }
}
