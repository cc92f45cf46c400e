use anyhow::{anyhow, Result};
use clap::Parser;
use indicatif::ProgressBar;
use tracing_subscriber::EnvFilter;

use std::io::{stdin, stdout, Stdin, Write};

use connect4_minimax::*;

mod game;
use game::*;

/// Play Connect 4 against a minimax engine, or watch it play itself
#[derive(Parser, Debug)]
#[command(version)]
struct Args {
    /// Plies the engine searches after its own move
    #[arg(short, long, default_value_t = DEFAULT_DEPTH as u8, value_parser = clap::value_parser!(u8).range(0..=8))]
    depth: u8,

    /// Number of rows on the board
    #[arg(long, default_value_t = HEIGHT as u8, value_parser = clap::value_parser!(u8).range(1..=20))]
    rows: u8,

    /// Number of columns on the board
    #[arg(long, default_value_t = WIDTH as u8, value_parser = clap::value_parser!(u8).range(1..=9))]
    columns: u8,
}

// asks until a yes or no answer is given
fn ask(stdin: &Stdin, question: &str) -> Result<bool> {
    loop {
        let mut buffer = String::new();
        print!("{} y/n: ", question);
        stdout().flush()?;
        if stdin.read_line(&mut buffer)? == 0 {
            return Err(anyhow!("stdin closed"));
        }
        match buffer.to_lowercase().chars().next() {
            Some('y') => return Ok(true),
            Some('n') => return Ok(false),
            _ => println!("Unknown answer given"),
        }
    }
}

fn main() -> Result<()> {
    let args = Args::parse();

    // logs go to stderr so they stay out of the board drawing
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let mut game = Game::new(args.rows as usize, args.columns as usize)?;
    let mut engine = Engine::new(args.depth as usize);

    let stdin = stdin();

    println!("Welcome to Connect 4\n");

    let ai_players = (
        ask(&stdin, "Is player 1 AI controlled?")?,
        ask(&stdin, "Is player 2 AI controlled?")?,
    );

    // game loop
    loop {
        game.display()?;

        match game.state {
            GameState::Playing => {
                let ai_turn = match game.player {
                    Player::PlayerOne => ai_players.0,
                    Player::PlayerTwo => ai_players.1,
                };
                let next_move = if ai_turn {
                    // slow down play if both players are AI
                    if ai_players == (true, true) {
                        std::thread::sleep(std::time::Duration::new(1, 0));
                    }

                    let spinner = ProgressBar::new_spinner();
                    spinner.set_message("AI is thinking...");
                    spinner.enable_steady_tick(100);

                    let start_count = engine.node_count;
                    let best_move = engine.choose_move(game.board(), game.player);
                    spinner.finish_and_clear();

                    let column = best_move.ok_or_else(|| anyhow!("no playable column left"))?;
                    println!(
                        "Best move: {} ({} positions searched)",
                        column + 1,
                        engine.node_count - start_count
                    );
                    column + 1

                // human player
                } else {
                    print!("{} move input > ", game.player);
                    stdout().flush()?;
                    let mut input_str = String::new();
                    if stdin.read_line(&mut input_str)? == 0 {
                        return Err(anyhow!("stdin closed"));
                    }

                    match input_str.trim().parse::<usize>() {
                        Err(_) => {
                            println!("Invalid number: {}", input_str.trim());
                            continue;
                        }
                        Ok(column) => column,
                    }
                };

                if let Err(err) = game.play_checked(next_move) {
                    println!("{}", err);
                    // try the move again
                    continue;
                }
            }

            // end states
            end_state => {
                match end_state {
                    GameState::PlayerOneWin => println!("Player 1 wins!"),
                    GameState::PlayerTwoWin => println!("Player 2 wins!"),
                    _ => println!("Draw!"),
                }
                println!("Game record: {}", game.history);

                if !ask(&stdin, "Play again?")? {
                    break;
                }
                game.reset();
            }
        }
    }
    Ok(())
}
