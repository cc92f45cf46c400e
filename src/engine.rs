//! An agent choosing Connect 4 moves with a fixed-depth minimax search

use tracing::{debug, trace};

use crate::{board::*, evaluation::evaluate};

/// An agent to choose moves in Connect 4 positions
///
/// # Notes
/// Every line of play is searched to the same depth without pruning, and
/// the resulting positions are scored with [`evaluate`]. The search runs
/// on a private copy of the caller's board, dropping and taking back
/// pieces as it goes.
///
/// # Search Depth
/// The depth counts the plies searched after the agent's own move. At
/// depth 0 each legal move is judged by the position it produces, at
/// depth 1 by the opponent's best reply to it, and so on. Lines ending in
/// a win or a full board are scored where they end.
#[derive(Clone, Debug)]
pub struct Engine {
    depth: usize,

    /// The number of positions searched by this `Engine` so far (for diagnostics only)
    pub node_count: usize,
}

impl Engine {
    /// Creates a new `Engine` searching to a fixed depth
    pub fn new(depth: usize) -> Self {
        Self {
            depth,
            node_count: 0,
        }
    }

    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Chooses the best column (0-indexed) for `player` to play
    ///
    /// Ties go to the leftmost column. Returns `None` if the board is full.
    pub fn choose_move(&mut self, board: &Board, player: Player) -> Option<usize> {
        self._choose_move(board, player, true)
    }

    /// Chooses the best column for `player`, logging the score of every
    /// candidate column to stdout
    pub fn choose_move_verbose(&mut self, board: &Board, player: Player) -> Option<usize> {
        self._choose_move(board, player, false)
    }

    fn _choose_move(&mut self, board: &Board, player: Player, silent: bool) -> Option<usize> {
        let start_count = self.node_count;
        let mut scratch = board.clone();

        let mut best: Option<(i32, usize)> = None;
        for next_move in board.generate_moves() {
            let score = self.score_move(&mut scratch, next_move, player, player, self.depth);
            debug!(column = next_move.column, score, "scored candidate move");

            if !silent {
                println!("Column {}: score {}", next_move.column + 1, score);
            }

            // a later move has to be strictly better to replace the first best one
            match best {
                Some((best_score, _)) if score <= best_score => {}
                _ => best = Some((score, next_move.column)),
            }
        }

        trace!(
            nodes = self.node_count - start_count,
            depth = self.depth,
            "search finished"
        );
        best.map(|(score, column)| {
            debug!(column, score, %player, "chose move");
            column
        })
    }

    /// Drops a piece for `player`, scores the resulting position for
    /// `reference` and takes the piece back
    fn score_move(
        &mut self,
        board: &mut Board,
        next_move: Move,
        reference: Player,
        player: Player,
        depth: usize,
    ) -> i32 {
        board.place(next_move, player);
        let score = self.minimax(board, Some(next_move), reference, player.other(), depth);
        board.undo(next_move);
        score
    }

    /// Scores a position for `reference` with `to_move` about to play
    ///
    /// `last_move` is the move that produced the position, if any; a win
    /// completed by it ends the search. The board is left as it was found.
    pub fn minimax(
        &mut self,
        board: &mut Board,
        last_move: Option<Move>,
        reference: Player,
        to_move: Player,
        depth: usize,
    ) -> i32 {
        self.node_count += 1;

        let won = last_move.map_or(false, |last_move| board.has_winner(last_move, to_move.other()));
        if depth == 0 || won || board.is_full() {
            return evaluate(board, reference);
        }

        let maximizing = to_move == reference;
        let mut result = if maximizing { i32::MIN } else { i32::MAX };
        for next_move in board.generate_moves() {
            let score = self.score_move(board, next_move, reference, to_move, depth - 1);
            result = if maximizing {
                result.max(score)
            } else {
                result.min(score)
            };
        }
        result
    }
}
