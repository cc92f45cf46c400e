//! Static evaluation of Connect 4 positions
//!
//! Every piece is scored by the runs starting at it along each forward
//! direction, so a run of 3 also scores as a run of 2 from its second
//! piece and a run of 1 from its third.

use crate::board::{Board, Cell, Player, DIRECTIONS};

/// The longest run scored from a single piece, including the piece itself
pub const MAX_RUN: usize = 4;

/// Maps the length of a run to its score
///
/// # Panics
/// Panics if `run` is not between 1 and [`MAX_RUN`]
pub fn alignment_score(run: usize) -> i32 {
    match run {
        1 => 1,
        2 => 5,
        3 => 50,
        4 => 1000,
        _ => unreachable!("run length {} outside of 1..={}", run, MAX_RUN),
    }
}

/// Sums the alignment scores of every run starting at one of `player`'s pieces
pub fn score_for(board: &Board, player: Player) -> i32 {
    let cell = Cell::from(player);
    let mut score = 0;

    for row in 0..board.rows() {
        for column in 0..board.columns() {
            if board.get(row, column) != cell {
                continue;
            }
            for &direction in DIRECTIONS.iter() {
                let run = 1 + board.run_length(row, column, direction, player, MAX_RUN - 1);
                score += alignment_score(run);
            }
        }
    }
    score
}

/// Scores a position from the point of view of `reference`
pub fn evaluate(board: &Board, reference: Player) -> i32 {
    score_for(board, reference) - score_for(board, reference.other())
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Result;

    #[test]
    fn empty_board_scores_zero() {
        let board = Board::new();
        assert_eq!(score_for(&board, Player::PlayerOne), 0);
        assert_eq!(evaluate(&board, Player::PlayerTwo), 0);
    }

    #[test]
    fn lone_piece_scores_once_per_direction() -> Result<()> {
        let board = Board::from_moves("1")?;

        assert_eq!(score_for(&board, Player::PlayerOne), 4);
        assert_eq!(evaluate(&board, Player::PlayerOne), 4);
        assert_eq!(evaluate(&board, Player::PlayerTwo), -4);
        Ok(())
    }

    #[test]
    fn overlapping_runs_are_counted_from_each_piece() -> Result<()> {
        let horizontal: Board = "
            .......
            .......
            .......
            .......
            .......
            XXX....
        "
        .parse()?;
        // 50 + 5 + 1 along the row, 1 for each other direction of each piece
        assert_eq!(score_for(&horizontal, Player::PlayerOne), 65);

        let vertical: Board = "
            .......
            .......
            .......
            X......
            X......
            X......
        "
        .parse()?;
        assert_eq!(score_for(&vertical, Player::PlayerOne), 65);
        Ok(())
    }

    #[test]
    fn runs_are_capped_at_four() -> Result<()> {
        let four: Board = "
            .......
            .......
            .......
            .......
            .......
            XXXX...
        "
        .parse()?;
        assert_eq!(score_for(&four, Player::PlayerOne), 1068);

        let five: Board = "
            .......
            .......
            .......
            .......
            .......
            XXXXX..
        "
        .parse()?;
        assert_eq!(score_for(&five, Player::PlayerOne), 2071);
        Ok(())
    }

    #[test]
    fn opponent_pieces_break_runs() -> Result<()> {
        let board: Board = "
            .......
            .......
            .......
            .......
            .......
            XXOX...
        "
        .parse()?;

        assert_eq!(score_for(&board, Player::PlayerOne), 8 + 4 + 4);
        assert_eq!(score_for(&board, Player::PlayerTwo), 4);
        assert_eq!(evaluate(&board, Player::PlayerOne), 12);
        Ok(())
    }

    #[test]
    fn alignment_scores() {
        let scores: Vec<i32> = (1..=MAX_RUN).map(alignment_score).collect();
        assert_eq!(scores, vec![1, 5, 50, 1000]);
    }

    #[test]
    #[should_panic]
    fn impossible_run_length_panics() {
        alignment_score(5);
    }
}
