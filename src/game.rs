use anyhow::{anyhow, Result};
use crossterm::{
    cursor::MoveTo,
    style::{style, Attribute, Color, PrintStyledContent},
    QueueableCommand,
};

use std::io::{stdout, Write};

use connect4_minimax::{Board, Cell, Move, Player};

#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum GameState {
    Playing,
    PlayerOneWin,
    PlayerTwoWin,
    Draw,
}

/// A game in progress, with turn taking and the record of moves played
#[derive(Clone)]
pub struct Game {
    board: Board,
    pub player: Player,
    pub history: String,
    pub state: GameState,
}

impl Game {
    pub fn new(rows: usize, columns: usize) -> Result<Self> {
        Ok(Self {
            board: Board::with_size(rows, columns)?,
            player: Player::PlayerOne,
            history: String::new(),
            state: GameState::Playing,
        })
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Clears the board and hands the first move back to player 1
    pub fn reset(&mut self) {
        for row in 0..self.board.rows() {
            for column in 0..self.board.columns() {
                self.board.undo(Move { row, column });
            }
        }
        self.player = Player::PlayerOne;
        self.history.clear();
        self.state = GameState::Playing;
    }

    pub fn play_checked(&mut self, column_one_indexed: usize) -> Result<GameState> {
        if self.state != GameState::Playing {
            return Err(anyhow!("Invalid move, the game is over"));
        }
        if column_one_indexed < 1 || column_one_indexed > self.board.columns() {
            return Err(anyhow!(
                "Invalid move, column {} out of range. Columns must be between 1 and {}",
                column_one_indexed,
                self.board.columns()
            ));
        }
        let last_move = self
            .board
            .play(column_one_indexed - 1, self.player)
            .ok_or_else(|| anyhow!("Invalid move, column {} full", column_one_indexed))?;

        self.state = if self.board.has_winner(last_move, self.player) {
            match self.player {
                Player::PlayerOne => GameState::PlayerOneWin,
                Player::PlayerTwo => GameState::PlayerTwoWin,
            }
        } else if self.board.is_full() {
            GameState::Draw
        } else {
            GameState::Playing
        };
        self.history.push_str(&column_one_indexed.to_string());
        self.player = self.player.other();

        Ok(self.state)
    }

    pub fn display(&self) -> Result<()> {
        let mut stdout = stdout();
        let (rows, columns) = (self.board.rows(), self.board.columns());

        let cols: String = (1..=columns).map(|x| x.to_string()).collect();
        stdout.queue(PrintStyledContent(style(cols + "\n")))?;
        for _ in 0..rows {
            stdout.queue(PrintStyledContent(style("\n")))?;
        }
        stdout.flush()?;

        let (origin_x, origin_y) = crossterm::cursor::position()?;

        for row in 0..rows {
            for column in 0..columns {
                // the bottom row sits on the cursor line
                let (pos_x, pos_y) = (
                    origin_x + column as u16,
                    origin_y - (rows - 1 - row) as u16,
                );

                stdout
                    .queue(MoveTo(pos_x, pos_y))?
                    .queue(PrintStyledContent(
                        style("O")
                            .attribute(Attribute::Bold)
                            .on(Color::DarkBlue)
                            .with(match self.board.get(row, column) {
                                Cell::PlayerOne => Color::Red,
                                Cell::PlayerTwo => Color::Yellow,
                                Cell::Empty => Color::DarkBlue,
                            }),
                    ))?;
            }
        }
        stdout
            .queue(MoveTo(origin_x + columns as u16, origin_y))?
            .queue(PrintStyledContent(style("\n")))?;
        stdout.flush()?;
        Ok(())
    }
}
