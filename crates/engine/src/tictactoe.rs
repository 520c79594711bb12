use crate::*;
use parlor_core::Arbitrary;
use parlor_core::Turns;

/// Coordinate on the 3×3 grid: rows A–C crossed with columns 1–3.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(try_from = "Coordinate")]
pub struct Cell {
    row: u8,
    col: u8,
}

/// Raw wire shape; bounds are enforced in the conversion.
#[derive(serde::Deserialize)]
struct Coordinate {
    row: u8,
    col: u8,
}

impl TryFrom<Coordinate> for Cell {
    type Error = &'static str;
    fn try_from(raw: Coordinate) -> Result<Self, Self::Error> {
        Self::new(raw.row, raw.col).ok_or("cell is off the grid")
    }
}

/// The eight winning triples: three rows, three columns, two diagonals.
const LINES: [[Cell; 3]; 8] = [
    // Rows
    [Cell { row: 0, col: 0 }, Cell { row: 0, col: 1 }, Cell { row: 0, col: 2 }],
    [Cell { row: 1, col: 0 }, Cell { row: 1, col: 1 }, Cell { row: 1, col: 2 }],
    [Cell { row: 2, col: 0 }, Cell { row: 2, col: 1 }, Cell { row: 2, col: 2 }],
    // Columns
    [Cell { row: 0, col: 0 }, Cell { row: 1, col: 0 }, Cell { row: 2, col: 0 }],
    [Cell { row: 0, col: 1 }, Cell { row: 1, col: 1 }, Cell { row: 2, col: 1 }],
    [Cell { row: 0, col: 2 }, Cell { row: 1, col: 2 }, Cell { row: 2, col: 2 }],
    // Diagonals
    [Cell { row: 0, col: 0 }, Cell { row: 1, col: 1 }, Cell { row: 2, col: 2 }],
    [Cell { row: 0, col: 2 }, Cell { row: 1, col: 1 }, Cell { row: 2, col: 0 }],
];

impl Cell {
    /// Builds a cell if the coordinate is on the grid.
    pub fn new(row: u8, col: u8) -> Option<Self> {
        (row < 3 && col < 3).then_some(Self { row, col })
    }
    pub fn row(&self) -> u8 {
        self.row
    }
    pub fn col(&self) -> u8 {
        self.col
    }
}

impl Arbitrary for Cell {
    fn random() -> Self {
        Self {
            row: rand::random_range(0..3),
            col: rand::random_range(0..3),
        }
    }
}

impl TryFrom<&str> for Cell {
    type Error = &'static str;
    fn try_from(s: &str) -> Result<Self, Self::Error> {
        let mut chars = s.chars();
        let row = match chars.next() {
            Some(c @ 'A'..='C') => c as u8 - b'A',
            _ => return Err("row must be A, B, or C"),
        };
        let col = match chars.next() {
            Some(c @ '1'..='3') => c as u8 - b'1',
            _ => return Err("column must be 1, 2, or 3"),
        };
        match chars.next() {
            None => Ok(Self { row, col }),
            Some(_) => Err("trailing characters after coordinate"),
        }
    }
}

impl std::fmt::Display for Cell {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}", (b'A' + self.row) as char, self.col + 1)
    }
}

/// Play state for a tic-tac-toe record.
///
/// Crosses belong to seat one, noughts to seat two. The board is derived
/// from the two placement lists; there is no hidden information.
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
pub struct TicTacToe {
    crosses: Vec<Cell>,
    noughts: Vec<Cell>,
}

impl TicTacToe {
    /// Placement list for a seat, in insertion order.
    pub fn placements(&self, seat: Seat) -> &[Cell] {
        match seat {
            Seat::One => &self.crosses,
            Seat::Two => &self.noughts,
        }
    }
    /// True if either mark occupies the cell.
    pub fn occupied(&self, cell: Cell) -> bool {
        self.crosses.contains(&cell) || self.noughts.contains(&cell)
    }
    /// Order-independent win check: the placements cover some winning triple.
    fn winning(placed: &[Cell]) -> bool {
        LINES
            .iter()
            .any(|line| line.iter().all(|cell| placed.contains(cell)))
    }
    /// Validates and folds one placement into the board.
    pub(crate) fn place(&mut self, seat: Seat, cell: Cell, turn: Turns) -> Result<Progress, GameError> {
        if seat != Seat::to_move(turn) {
            return Err(GameError::Conflict("not your turn"));
        }
        if self.occupied(cell) {
            return Err(GameError::Conflict("cannot place on an occupied tile"));
        }
        match seat {
            Seat::One => self.crosses.push(cell),
            Seat::Two => self.noughts.push(cell),
        }
        if Self::winning(self.placements(seat)) {
            Ok(Progress::Won(seat))
        } else if turn + 1 == 9 {
            Ok(Progress::Drawn)
        } else {
            Ok(Progress::Advanced)
        }
    }
}
