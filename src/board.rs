use anyhow::{anyhow, Result};

use std::fmt;
use std::str::FromStr;

use crate::error::EngineError;
use crate::{HEIGHT, WIDTH};

/// The two sides of the game
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum Piece {
    Human,
    Computer,
}

impl Piece {
    pub fn opponent(self) -> Piece {
        match self {
            Piece::Human => Piece::Computer,
            Piece::Computer => Piece::Human,
        }
    }
}

#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum Cell {
    Empty,
    Human,
    Computer,
}

impl Cell {
    pub fn is_empty(&self) -> bool {
        matches!(self, Cell::Empty)
    }

    fn to_char(self) -> char {
        match self {
            Cell::Empty => '.',
            Cell::Human => 'X',
            Cell::Computer => 'O',
        }
    }
}

impl From<Piece> for Cell {
    fn from(piece: Piece) -> Self {
        match piece {
            Piece::Human => Cell::Human,
            Piece::Computer => Cell::Computer,
        }
    }
}

/// A 2x2 group of cells, ordered `(r, c), (r, c+1), (r+1, c), (r+1, c+1)`
pub type Window = [Cell; 4];

/// The game grid, row 0 is the bottom row
///
/// Pieces only ever enter the grid through the lowest open row of a column,
/// so the occupied cells of every column form a contiguous run from row 0.
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub struct Board {
    cells: [[Cell; WIDTH]; HEIGHT],
}

impl Board {
    pub fn new() -> Self {
        Self {
            cells: [[Cell::Empty; WIDTH]; HEIGHT],
        }
    }

    fn check_column(column: usize) -> Result<(), EngineError> {
        if column >= WIDTH {
            return Err(EngineError::ColumnOutOfRange {
                column,
                max: WIDTH - 1,
            });
        }
        Ok(())
    }

    pub fn get(&self, row: usize, column: usize) -> Result<Cell, EngineError> {
        Self::check_column(column)?;
        if row >= HEIGHT {
            return Err(EngineError::RowOutOfRange {
                row,
                max: HEIGHT - 1,
            });
        }
        Ok(self.cells[row][column])
    }

    /// A column is playable while its top cell is empty
    pub fn is_valid_column(&self, column: usize) -> Result<bool, EngineError> {
        Self::check_column(column)?;
        Ok(self.cells[HEIGHT - 1][column].is_empty())
    }

    /// Returns the lowest empty row of a column
    pub fn next_open_row(&self, column: usize) -> Result<usize, EngineError> {
        Self::check_column(column)?;
        (0..HEIGHT)
            .find(|&row| self.cells[row][column].is_empty())
            .ok_or(EngineError::ColumnFull { column })
    }

    /// Places a piece without any legality check, callers should find the
    /// row with [`Board::next_open_row`] first
    pub fn drop_piece(&mut self, row: usize, column: usize, piece: Piece) -> Result<(), EngineError> {
        Self::check_column(column)?;
        if row >= HEIGHT {
            return Err(EngineError::RowOutOfRange {
                row,
                max: HEIGHT - 1,
            });
        }
        self.cells[row][column] = piece.into();
        Ok(())
    }

    /// Drops a piece into the lowest open row of a column, returning that row
    pub fn play(&mut self, column: usize, piece: Piece) -> Result<usize, EngineError> {
        let row = self.next_open_row(column)?;
        self.drop_piece(row, column, piece)?;
        Ok(row)
    }

    /// All playable columns in ascending order
    pub fn valid_columns(&self) -> Vec<usize> {
        (0..WIDTH)
            .filter(|&column| self.cells[HEIGHT - 1][column].is_empty())
            .collect()
    }

    /// Every 2x2 block of the grid, bottom-left first
    pub fn windows(&self) -> impl Iterator<Item = Window> + '_ {
        (0..HEIGHT - 1).flat_map(move |row| {
            (0..WIDTH - 1).map(move |column| {
                [
                    self.cells[row][column],
                    self.cells[row][column + 1],
                    self.cells[row + 1][column],
                    self.cells[row + 1][column + 1],
                ]
            })
        })
    }

    /// A side wins by owning all four cells of any 2x2 block
    pub fn is_winning_position(&self, piece: Piece) -> bool {
        let cell = Cell::from(piece);
        self.windows()
            .any(|window| window.iter().all(|&c| c == cell))
    }

    pub fn is_full(&self) -> bool {
        self.cells[HEIGHT - 1].iter().all(|c| !c.is_empty())
    }

    pub fn is_terminal(&self) -> bool {
        self.is_winning_position(Piece::Human)
            || self.is_winning_position(Piece::Computer)
            || self.is_full()
    }

    pub fn num_pieces(&self) -> usize {
        self.cells
            .iter()
            .flat_map(|row| row.iter())
            .filter(|c| !c.is_empty())
            .count()
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

/// Prints the grid top row first, `.` for empty, `X` for human and `O` for computer
impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.cells.iter().rev() {
            let line: String = row.iter().map(|c| c.to_char()).collect();
            writeln!(f, "{}", line)?;
        }
        Ok(())
    }
}

impl FromStr for Board {
    type Err = anyhow::Error;

    /// Parses the format written by `Display`, blank lines and surrounding
    /// whitespace are ignored
    fn from_str(grid: &str) -> Result<Self> {
        let lines: Vec<&str> = grid
            .lines()
            .map(|line| line.trim())
            .filter(|line| !line.is_empty())
            .collect();
        if lines.len() != HEIGHT {
            return Err(anyhow!(
                "expected {} rows but found {}",
                HEIGHT,
                lines.len()
            ));
        }

        let mut board = Self::new();
        for (i, line) in lines.iter().enumerate() {
            let row = HEIGHT - 1 - i;
            let cells: Vec<char> = line.chars().collect();
            if cells.len() != WIDTH {
                return Err(anyhow!(
                    "row '{}' has {} columns, expected {}",
                    line,
                    cells.len(),
                    WIDTH
                ));
            }
            for (column, cell_char) in cells.into_iter().enumerate() {
                board.cells[row][column] = match cell_char {
                    '.' => Cell::Empty,
                    'X' | 'x' => Cell::Human,
                    'O' | 'o' => Cell::Computer,
                    _ => return Err(anyhow!("could not parse '{}' as a cell", cell_char)),
                };
            }
        }

        // reject pieces floating above an empty cell
        for column in 0..WIDTH {
            for row in 1..HEIGHT {
                if !board.cells[row][column].is_empty() && board.cells[row - 1][column].is_empty() {
                    return Err(anyhow!(
                        "invalid position, piece at row {} column {} has nothing below it",
                        row,
                        column
                    ));
                }
            }
        }
        Ok(board)
    }
}
