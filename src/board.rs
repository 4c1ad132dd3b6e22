use std::fmt;
use std::str::FromStr;

use anyhow::{bail, Result};

pub(crate) const CELLS: usize = 9;

/// The 8 lines that win the game: rows, columns, diagonals.
pub(crate) const WIN_LINES: [[usize; 3]; 8] = [
    [0, 1, 2],
    [3, 4, 5],
    [6, 7, 8],
    [0, 3, 6],
    [1, 4, 7],
    [2, 5, 8],
    [0, 4, 8],
    [2, 4, 6],
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) enum Symbol {
    X,
    O,
}

impl Symbol {
    pub fn opponent(self) -> Self {
        match self {
            Symbol::X => Symbol::O,
            Symbol::O => Symbol::X,
        }
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Symbol::X => write!(f, "X"),
            Symbol::O => write!(f, "O"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Cell {
    Empty,
    Filled(Symbol),
}

/// A 3x3 grid indexed 0..8 in row-major order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Board {
    cells: [Cell; CELLS],
}

impl Board {
    pub fn new() -> Self {
        Self {
            cells: [Cell::Empty; CELLS],
        }
    }

    /// Builds a board from raw cells, rejecting impossible X/O counts.
    /// X always moves first, so there are as many X as O, or one more.
    pub fn from_cells(cells: [Cell; CELLS]) -> Result<Self> {
        let count = |symbol| {
            cells
                .iter()
                .filter(|&&cell| cell == Cell::Filled(symbol))
                .count()
        };
        let (xs, os) = (count(Symbol::X), count(Symbol::O));
        if os > xs || xs > os + 1 {
            bail!("Impossible board: {} X and {} O", xs, os);
        }
        Ok(Self { cells })
    }

    pub fn is_valid_move(&self, index: usize) -> bool {
        index < CELLS && self.cells[index] == Cell::Empty
    }

    /// Places `symbol` at `index`. Callers check `is_valid_move` first;
    /// an occupied cell is overwritten.
    pub fn apply_move(&mut self, index: usize, symbol: Symbol) {
        assert!(index < CELLS, "move index {} is off the board", index);
        self.cells[index] = Cell::Filled(symbol);
    }

    pub fn undo_move(&mut self, index: usize) {
        assert!(index < CELLS, "move index {} is off the board", index);
        self.cells[index] = Cell::Empty;
    }

    pub fn check_win(&self) -> bool {
        self.winner().is_some()
    }

    pub fn winner(&self) -> Option<Symbol> {
        WIN_LINES.iter().find_map(|&[a, b, c]| match self.cells[a] {
            Cell::Filled(symbol) if self.cells[b] == self.cells[a] && self.cells[c] == self.cells[a] => {
                Some(symbol)
            }
            _ => None,
        })
    }

    pub fn is_full(&self) -> bool {
        !self.cells.contains(&Cell::Empty)
    }

    pub fn snapshot(&self) -> [Cell; CELLS] {
        self.cells
    }

    /// Empty cells in ascending index order.
    pub fn available_moves(&self) -> Vec<usize> {
        (0..CELLS).filter(|&i| self.is_valid_move(i)).collect()
    }

    pub fn first_available(&self) -> Option<usize> {
        (0..CELLS).find(|&i| self.is_valid_move(i))
    }

    pub fn cell(&self, index: usize) -> Cell {
        self.cells[index]
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

/// Parses a 9-character literal such as `"XX__O___O"`.
/// `_`, `.` and space mark empty cells.
impl FromStr for Board {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        let chars: Vec<char> = s.chars().collect();
        if chars.len() != CELLS {
            bail!("Board literal needs {} cells, got {}", CELLS, chars.len());
        }
        let mut cells = [Cell::Empty; CELLS];
        for (cell, ch) in cells.iter_mut().zip(chars) {
            *cell = match ch {
                'X' | 'x' => Cell::Filled(Symbol::X),
                'O' | 'o' => Cell::Filled(Symbol::O),
                '_' | '.' | ' ' => Cell::Empty,
                other => bail!("Unknown cell '{}' in board literal", other),
            };
        }
        Board::from_cells(cells)
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for (row, cells) in self.cells.chunks(3).enumerate() {
            let marks: Vec<String> = cells
                .iter()
                .map(|cell| match cell {
                    Cell::Empty => " ".to_string(),
                    Cell::Filled(symbol) => symbol.to_string(),
                })
                .collect();
            writeln!(f, " {} ", marks.join(" | "))?;
            if row < 2 {
                writeln!(f, "-----------")?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new() {
        let board = Board::new();
        assert_eq!(board.snapshot(), [Cell::Empty; CELLS]);
        assert!(!board.check_win());
        assert!(!board.is_full());
        assert_eq!(board.available_moves(), (0..9).collect::<Vec<_>>());
    }

    #[test]
    fn test_is_valid_move() {
        let mut board = Board::new();
        assert!(board.is_valid_move(0));
        assert!(board.is_valid_move(8));
        assert!(!board.is_valid_move(9));
        assert!(!board.is_valid_move(usize::MAX));

        board.apply_move(4, Symbol::X);
        assert!(!board.is_valid_move(4));
        assert_eq!(board.cell(4), Cell::Filled(Symbol::X));
    }

    #[test]
    fn test_apply_then_undo_restores_board() {
        let mut board: Board = "XO_X_O___".parse().unwrap();
        let before = board.snapshot();
        for index in board.available_moves() {
            board.apply_move(index, Symbol::X);
            board.undo_move(index);
            assert_eq!(board.snapshot(), before);
        }
    }

    #[test]
    #[should_panic]
    fn test_apply_off_board_panics() {
        Board::new().apply_move(9, Symbol::X);
    }

    #[test]
    fn test_check_win_every_line() {
        for line in WIN_LINES {
            for symbol in [Symbol::X, Symbol::O] {
                let mut board = Board::new();
                for index in line {
                    board.apply_move(index, symbol);
                }
                assert!(board.check_win(), "line {:?}", line);
                assert_eq!(board.winner(), Some(symbol));
            }
        }
    }

    #[test]
    fn test_check_win_requires_matching_marks() {
        let board: Board = "XOX______".parse().unwrap();
        assert!(!board.check_win());

        let board: Board = "XX_OO____".parse().unwrap();
        assert!(!board.check_win());
        assert_eq!(board.winner(), None);
    }

    #[test]
    fn test_check_win_and_is_full_on_every_board() {
        for code in 0..3usize.pow(CELLS as u32) {
            let mut cells = [Cell::Empty; CELLS];
            let mut rest = code;
            for cell in cells.iter_mut() {
                *cell = match rest % 3 {
                    0 => Cell::Empty,
                    1 => Cell::Filled(Symbol::X),
                    _ => Cell::Filled(Symbol::O),
                };
                rest /= 3;
            }
            let board = Board { cells };

            let has_line = WIN_LINES.iter().any(|&[a, b, c]| {
                cells[a] != Cell::Empty && cells[a] == cells[b] && cells[b] == cells[c]
            });
            let no_empty = cells.iter().all(|&cell| cell != Cell::Empty);
            assert_eq!(board.check_win(), has_line, "{:?}", cells);
            assert_eq!(board.is_full(), no_empty, "{:?}", cells);
        }
    }

    #[test]
    fn test_full_board_without_winner() {
        let board: Board = "XOXXOOOXX".parse().unwrap();
        assert!(board.is_full());
        assert!(!board.check_win());
        assert_eq!(board.first_available(), None);
    }

    #[test]
    fn test_full_board_with_winner() {
        let board: Board = "XXXOOXXOO".parse().unwrap();
        assert!(board.is_full());
        assert_eq!(board.winner(), Some(Symbol::X));
    }

    #[test]
    fn test_parse_rejects_bad_literals() {
        assert!("XX".parse::<Board>().is_err());
        assert!("XX_O_Z___".parse::<Board>().is_err());
        // O never outnumbers X, and X leads by at most one.
        assert!("OO_______".parse::<Board>().is_err());
        assert!("XXX______".parse::<Board>().is_err());
        assert!(" . _X_O__".parse::<Board>().is_ok());
    }

    #[test]
    fn test_display() {
        let board: Board = "X_O_X____".parse().unwrap();
        let expected = " X |   | O \n\
                        -----------\n   \
                        | X |   \n\
                        -----------\n   \
                        |   |   \n";
        assert_eq!(board.to_string(), expected);
    }
}
