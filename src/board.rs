//! The game grid and the rules of dropping pieces into it

use anyhow::{anyhow, Result};

use std::fmt;
use std::str::FromStr;

use crate::{HEIGHT, WIDTH};

/// The forward step of each alignment axis as (row, column) offsets
///
/// Row 0 is the top of the board, so these walk down, right, down-left
/// and down-right. Negating a step walks the other half of the axis.
pub const DIRECTIONS: [(isize, isize); 4] = [(1, 0), (0, 1), (1, -1), (1, 1)];

#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum Player {
    PlayerOne,
    PlayerTwo,
}

impl Player {
    pub fn other(self) -> Self {
        match self {
            Player::PlayerOne => Player::PlayerTwo,
            Player::PlayerTwo => Player::PlayerOne,
        }
    }

    /// The numeric identifier of the player, 1 or 2
    pub fn id(self) -> u8 {
        match self {
            Player::PlayerOne => 1,
            Player::PlayerTwo => 2,
        }
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Player {}", self.id())
    }
}

#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum Cell {
    PlayerOne,
    PlayerTwo,
    Empty,
}

impl Cell {
    pub fn is_empty(&self) -> bool {
        match self {
            Cell::Empty => true,
            _ => false,
        }
    }

    fn from_id(id: u8) -> Option<Self> {
        match id {
            0 => Some(Cell::Empty),
            1 => Some(Cell::PlayerOne),
            2 => Some(Cell::PlayerTwo),
            _ => None,
        }
    }

    fn from_symbol(symbol: char) -> Option<Self> {
        match symbol {
            '.' => Some(Cell::Empty),
            'X' => Some(Cell::PlayerOne),
            'O' => Some(Cell::PlayerTwo),
            _ => None,
        }
    }

    fn symbol(self) -> char {
        match self {
            Cell::Empty => '.',
            Cell::PlayerOne => 'X',
            Cell::PlayerTwo => 'O',
        }
    }
}

impl From<Player> for Cell {
    fn from(player: Player) -> Self {
        match player {
            Player::PlayerOne => Cell::PlayerOne,
            Player::PlayerTwo => Cell::PlayerTwo,
        }
    }
}

/// The cell a piece lands in when dropped into a column
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub struct Move {
    pub row: usize,
    pub column: usize,
}

/// A rectangular Connect 4 board
///
/// Cells are stored row by row, top to bottom. Every non-empty cell rests
/// on another non-empty cell or on the bottom row.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct Board {
    rows: usize,
    columns: usize,
    cells: Vec<Cell>,
}

impl Board {
    /// Creates an empty board of the default size
    pub fn new() -> Self {
        Self {
            rows: HEIGHT,
            columns: WIDTH,
            cells: vec![Cell::Empty; WIDTH * HEIGHT],
        }
    }

    /// Creates an empty board with the given dimensions
    pub fn with_size(rows: usize, columns: usize) -> Result<Self> {
        if rows == 0 || columns == 0 {
            return Err(anyhow!(
                "Invalid board size {}x{}, both dimensions must be at least 1",
                rows,
                columns
            ));
        }
        Ok(Self {
            rows,
            columns,
            cells: vec![Cell::Empty; rows * columns],
        })
    }

    /// Creates a board from rows of numeric cells, top row first
    ///
    /// 0 is an empty cell, 1 and 2 are pieces of the first and second player.
    pub fn from_grid(grid: &[Vec<u8>]) -> Result<Self> {
        let cells = grid
            .iter()
            .enumerate()
            .map(|(row, values)| {
                values
                    .iter()
                    .enumerate()
                    .map(|(column, &value)| {
                        Cell::from_id(value).ok_or_else(|| {
                            anyhow!("could not parse '{}' as a cell at ({}, {})", value, row, column)
                        })
                    })
                    .collect::<Result<Vec<_>>>()
            })
            .collect::<Result<Vec<_>>>()?;

        Self::from_cells(cells)
    }

    /// Creates a board from a text diagram, top row first
    ///
    /// `.` is an empty cell, `X` and `O` are pieces of the first and second
    /// player. Blank lines and surrounding whitespace are ignored.
    pub fn from_diagram(diagram: &str) -> Result<Self> {
        let cells = diagram
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(|line| {
                line.chars()
                    .map(|symbol| {
                        Cell::from_symbol(symbol)
                            .ok_or_else(|| anyhow!("could not parse '{}' as a cell", symbol))
                    })
                    .collect::<Result<Vec<_>>>()
            })
            .collect::<Result<Vec<_>>>()?;

        Self::from_cells(cells)
    }

    fn from_cells(grid: Vec<Vec<Cell>>) -> Result<Self> {
        let columns = grid.first().map_or(0, Vec::len);
        let mut board = Self::with_size(grid.len(), columns)?;

        board.cells.clear();
        for (row, cells) in grid.into_iter().enumerate() {
            if cells.len() != columns {
                return Err(anyhow!(
                    "Invalid grid, row {} has {} cells but row 0 has {}",
                    row,
                    cells.len(),
                    columns
                ));
            }
            board.cells.extend(cells);
        }
        board.check_gravity()?;
        Ok(board)
    }

    /// Creates a default size board by playing a sequence of 1-indexed columns,
    /// starting with the first player
    pub fn from_moves<S: AsRef<str>>(moves: S) -> Result<Self> {
        let mut board = Self::new();
        let mut player = Player::PlayerOne;

        for column_char in moves.as_ref().chars() {
            match column_char.to_digit(10).map(|c| c as usize) {
                Some(column) if column >= 1 && column <= board.columns => {
                    if board.play(column - 1, player).is_none() {
                        return Err(anyhow!("Invalid move, column {} full", column));
                    }
                    player = player.other();
                }
                _ => return Err(anyhow!("could not parse '{}' as a valid move", column_char)),
            }
        }
        Ok(board)
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn columns(&self) -> usize {
        self.columns
    }

    pub fn get(&self, row: usize, column: usize) -> Cell {
        self.cells[self.index(row, column)]
    }

    fn index(&self, row: usize, column: usize) -> usize {
        row * self.columns + column
    }

    // bounds checked lookup for walking alignments off the edge of the board
    fn cell_at(&self, row: isize, column: isize) -> Option<Cell> {
        if row < 0 || column < 0 || row as usize >= self.rows || column as usize >= self.columns {
            None
        } else {
            Some(self.get(row as usize, column as usize))
        }
    }

    fn check_gravity(&self) -> Result<()> {
        for row in 0..self.rows - 1 {
            for column in 0..self.columns {
                if !self.get(row, column).is_empty() && self.get(row + 1, column).is_empty() {
                    return Err(anyhow!(
                        "Invalid position, piece at ({}, {}) is floating",
                        row,
                        column
                    ));
                }
            }
        }
        Ok(())
    }

    /// Returns whether a piece can still be dropped into a column
    pub fn playable(&self, column: usize) -> bool {
        column < self.columns && self.get(0, column).is_empty()
    }

    /// Returns the move made by dropping a piece into a column, if it isn't full
    pub fn landing(&self, column: usize) -> Option<Move> {
        if !self.playable(column) {
            return None;
        }
        (0..self.rows)
            .rev()
            .find(|&row| self.get(row, column).is_empty())
            .map(|row| Move { row, column })
    }

    /// Lists the legal moves from left to right, one per column that isn't full
    pub fn generate_moves(&self) -> Vec<Move> {
        (0..self.columns)
            .filter_map(|column| self.landing(column))
            .collect()
    }

    /// Returns whether every column is full
    ///
    /// Only the top row needs checking since pieces stack from the bottom.
    pub fn is_full(&self) -> bool {
        (0..self.columns).all(|column| !self.get(0, column).is_empty())
    }

    /// Counts the consecutive `player` pieces after (row, column) along a
    /// direction, stopping after `limit` cells
    pub fn run_length(
        &self,
        row: usize,
        column: usize,
        (d_row, d_column): (isize, isize),
        player: Player,
        limit: usize,
    ) -> usize {
        let cell = Cell::from(player);
        let (mut r, mut c) = (row as isize, column as isize);
        let mut run = 0;
        while run < limit {
            r += d_row;
            c += d_column;
            if self.cell_at(r, c) != Some(cell) {
                break;
            }
            run += 1;
        }
        run
    }

    /// Checks whether the piece at `last_move` completes an alignment of 4
    /// for `player`
    ///
    /// Only alignments through `last_move` are considered, which is enough
    /// when the move was the most recent one played.
    pub fn has_winner(&self, last_move: Move, player: Player) -> bool {
        if self.get(last_move.row, last_move.column) != Cell::from(player) {
            return false;
        }
        DIRECTIONS.iter().any(|&(d_row, d_column)| {
            let forward = self.run_length(last_move.row, last_move.column, (d_row, d_column), player, 3);
            let backward =
                self.run_length(last_move.row, last_move.column, (-d_row, -d_column), player, 3);
            1 + forward + backward >= 4
        })
    }

    /// Drops a piece for `player` into a column, returning where it landed
    pub fn play(&mut self, column: usize, player: Player) -> Option<Move> {
        let next_move = self.landing(column)?;
        self.place(next_move, player);
        Some(next_move)
    }

    /// Puts a piece for `player` on the cell of a move generated for this board
    pub fn place(&mut self, next_move: Move, player: Player) {
        let index = self.index(next_move.row, next_move.column);
        self.cells[index] = player.into();
    }

    /// Takes back a piece placed with [`place`](Board::place)
    pub fn undo(&mut self, last_move: Move) {
        let index = self.index(last_move.row, last_move.column);
        self.cells[index] = Cell::Empty;
    }

    /// Returns the board reflected left to right
    pub fn mirror(&self) -> Self {
        let mut mirrored = self.clone();
        for row in 0..self.rows {
            for column in 0..self.columns {
                let index = mirrored.index(row, self.columns - 1 - column);
                mirrored.cells[index] = self.get(row, column);
            }
        }
        mirrored
    }

    /// Returns the number of pieces on the board
    pub fn num_moves(&self) -> usize {
        self.cells.iter().filter(|cell| !cell.is_empty()).count()
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl FromStr for Board {
    type Err = anyhow::Error;

    fn from_str(diagram: &str) -> Result<Self> {
        Self::from_diagram(diagram)
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..self.rows {
            let line: String = (0..self.columns)
                .map(|column| self.get(row, column).symbol())
                .collect();
            writeln!(f, "{}", line)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn other_player() {
        assert_eq!(Player::PlayerOne.other(), Player::PlayerTwo);
        assert_eq!(Player::PlayerTwo.other(), Player::PlayerOne);
        assert_eq!(Player::PlayerOne.other().other(), Player::PlayerOne);
    }

    #[test]
    fn moves_land_on_lowest_empty_row() -> Result<()> {
        let board = Board::from_moves("1123")?;
        let moves = board.generate_moves();

        assert_eq!(
            moves,
            vec![
                Move { row: 3, column: 0 },
                Move { row: 4, column: 1 },
                Move { row: 4, column: 2 },
                Move { row: 5, column: 3 },
                Move { row: 5, column: 4 },
                Move { row: 5, column: 5 },
                Move { row: 5, column: 6 },
            ]
        );
        Ok(())
    }

    #[test]
    fn full_column_is_skipped() -> Result<()> {
        let board = Board::from_moves("111111")?;
        let columns: Vec<usize> = board.generate_moves().iter().map(|m| m.column).collect();

        assert_eq!(columns, vec![1, 2, 3, 4, 5, 6]);
        assert!(!board.playable(0));
        assert!(Board::from_moves("1111111").is_err());
        Ok(())
    }

    #[test]
    fn full_board_has_no_moves() -> Result<()> {
        let board = Board::from_moves("1234567".repeat(6))?;

        assert!(board.is_full());
        assert!(board.generate_moves().is_empty());
        Ok(())
    }

    #[test]
    fn one_open_column_is_not_full() -> Result<()> {
        let mut moves = "1234567".repeat(6);
        moves.pop();
        let board = Board::from_moves(moves)?;

        assert!(!board.is_full());
        assert_eq!(board.generate_moves(), vec![Move { row: 0, column: 6 }]);
        Ok(())
    }

    #[test]
    fn no_winner_on_empty_board() {
        let board = Board::new();
        for column in 0..board.columns() {
            let last_move = Move { row: 5, column };
            assert!(!board.has_winner(last_move, Player::PlayerOne));
            assert!(!board.has_winner(last_move, Player::PlayerTwo));
        }
    }

    #[test]
    fn horizontal_and_vertical_wins() -> Result<()> {
        let board = Board::from_moves("1122334")?;
        assert!(board.has_winner(Move { row: 5, column: 3 }, Player::PlayerOne));
        assert!(!board.has_winner(Move { row: 5, column: 3 }, Player::PlayerTwo));

        let board = Board::from_moves("1212121")?;
        assert!(board.has_winner(Move { row: 2, column: 0 }, Player::PlayerOne));

        let board = Board::from_moves("11223")?;
        assert!(!board.has_winner(Move { row: 5, column: 2 }, Player::PlayerOne));
        Ok(())
    }

    #[test]
    fn diagonal_wins() -> Result<()> {
        let board: Board = "
            .......
            .......
            ...X...
            ..XO...
            .XOO...
            XOOO...
        "
        .parse()?;

        assert!(board.has_winner(Move { row: 2, column: 3 }, Player::PlayerOne));
        // the middle of an alignment counts both ways
        assert!(board.has_winner(Move { row: 4, column: 1 }, Player::PlayerOne));
        assert!(!board.has_winner(Move { row: 3, column: 3 }, Player::PlayerTwo));

        let mirrored = board.mirror();
        assert!(mirrored.has_winner(Move { row: 2, column: 3 }, Player::PlayerOne));
        assert!(mirrored.has_winner(Move { row: 5, column: 6 }, Player::PlayerOne));
        Ok(())
    }

    #[test]
    fn diagram_round_trip() -> Result<()> {
        let board = Board::from_moves("4453")?;
        let diagram = board.to_string();

        assert_eq!(diagram.lines().last(), Some("..OXX.."));
        assert_eq!(diagram.parse::<Board>()?, board);
        Ok(())
    }

    #[test]
    fn malformed_grids_are_rejected() {
        assert!(Board::from_grid(&[vec![0, 0], vec![0]]).is_err());
        assert!(Board::from_grid(&[vec![0, 3]]).is_err());
        assert!(Board::from_grid(&[vec![1, 0], vec![0, 0]]).is_err());
        assert!(Board::from_grid(&[]).is_err());
        assert!(Board::with_size(0, 7).is_err());
        assert!(Board::from_diagram("..?").is_err());
    }

    #[test]
    fn grid_uses_player_ids() -> Result<()> {
        let board = Board::from_grid(&[vec![0, 0, 0], vec![1, 2, 0]])?;

        assert_eq!(board.rows(), 2);
        assert_eq!(board.columns(), 3);
        assert_eq!(board.get(1, 0), Cell::from(Player::PlayerOne));
        assert_eq!(board.get(1, 1), Cell::from(Player::PlayerTwo));
        assert_eq!(board.num_moves(), 2);
        Ok(())
    }

    #[test]
    fn place_and_undo_restore_the_board() -> Result<()> {
        let original = Board::from_moves("4455")?;
        let mut board = original.clone();
        for next_move in original.generate_moves() {
            board.place(next_move, Player::PlayerOne);
            assert_ne!(board, original);
            board.undo(next_move);
        }

        assert_eq!(board, original);
        Ok(())
    }
}
