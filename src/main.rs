use anyhow::Result;
use indicatif::{HumanDuration, ProgressBar, ProgressStyle};

use std::io::{stdin, stdout, Write};

use blockfour_ai::{
    board::Piece,
    error::EngineError,
    heuristic::greedy_move,
    search::MAX_DEPTH,
    session::{GameConfig, GameSession, GameState, GameStats},
    WIDTH,
};

mod display;
use display::*;

fn prompt(message: &str) -> Result<String> {
    print!("{}", message);
    stdout().flush()?;
    let mut buffer = String::new();
    stdin().read_line(&mut buffer)?;
    Ok(buffer.trim().to_string())
}

fn capitalize(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(|c| c.to_lowercase())).collect(),
        None => String::new(),
    }
}

fn display_game_stats(stats: &GameStats) {
    println!("Total time elapsed: {}", HumanDuration(stats.elapsed));
    println!("Total moves: {}", stats.moves);
}

fn main() -> Result<()> {
    println!("Welcome to Block Four\n");
    println!("Fill any 2x2 block with your pieces to win\n");

    let player_name = loop {
        let name = prompt("Enter the player name: ")?;
        if !name.is_empty() {
            break name;
        }
        println!("The name cannot be empty");
    };

    // choose who plays first
    let first = loop {
        let answer = prompt(&format!(
            "Who plays first? 1) {} 2) AI: ",
            player_name
        ))?;
        match answer.to_lowercase().chars().next() {
            Some('1') => break Piece::Human,
            Some('2') | Some('a') => break Piece::Computer,
            _ => println!("Unknown answer given"),
        }
    };

    // choose the search depth, validated by the config
    let config = loop {
        let answer = prompt(&format!(
            "Select the depth of the minimax search tree (1-{}): ",
            MAX_DEPTH
        ))?;
        match answer.parse::<u32>() {
            Err(_) => println!("Invalid number: {}", answer),
            Ok(depth) => match GameConfig::new(player_name.as_str(), first, depth) {
                Ok(config) => break config,
                Err(err) => println!("{}", err),
            },
        }
    };

    // choose the board colour
    for (i, color) in BOARD_COLORS.iter().enumerate() {
        println!("{:>2}) {}", i + 1, color.name);
    }
    let board_color = loop {
        let answer = prompt("Select board color (enter for Sepia): ")?;
        if answer.is_empty() {
            break BOARD_COLORS[0];
        }
        match answer.parse::<usize>() {
            Ok(i) if i >= 1 && i <= BOARD_COLORS.len() => break BOARD_COLORS[i - 1],
            _ => println!("Unknown answer given"),
        }
    };

    let mut session = GameSession::new(config);

    // game loop
    loop {
        display(session.board(), &board_color)?;

        match session.state() {
            GameState::Playing => match session.to_move() {
                // AI player
                Piece::Computer => {
                    let spinner = ProgressBar::new_spinner();
                    spinner.set_style(ProgressStyle::default_spinner().template("{spinner:.cyan} {msg}"));
                    spinner.set_message("AI is thinking...");
                    spinner.enable_steady_tick(100);

                    let computer_move = session.play_computer(true)?;
                    spinner.finish_and_clear();

                    println!(
                        "AI plays column {} (score: {}, positions searched: {})",
                        computer_move.column + 1,
                        computer_move.score,
                        computer_move.node_count
                    );
                }

                // human player
                Piece::Human => {
                    let input = prompt("Move input (h for a hint, q to quit) > ")?;
                    match input.to_lowercase().as_str() {
                        "q" => return Ok(()),
                        "h" => {
                            let column = greedy_move(session.board(), Piece::Human)?;
                            println!("Hint: column {}", column + 1);
                            continue;
                        }
                        _ => {}
                    }

                    let column = match input.parse::<usize>() {
                        Err(_) => {
                            println!("Invalid number: {}", input);
                            continue;
                        }
                        Ok(column) => column,
                    };
                    if column < 1 || column > WIDTH {
                        println!(
                            "Invalid move, column {} out of range. Columns must be between 1 and {}",
                            column, WIDTH
                        );
                        continue;
                    }

                    match session.play_human(column - 1) {
                        Ok(_) => {}
                        Err(EngineError::ColumnFull { .. }) => {
                            println!("Invalid move, column {} full", column);
                        }
                        Err(err) => return Err(err.into()),
                    }
                }
            },

            // end states
            GameState::HumanWin => {
                println!("{} wins!!", capitalize(&session.config().player_name));
                break;
            }
            GameState::ComputerWin => {
                println!("AI wins!!");
                break;
            }
            GameState::Draw => {
                println!("Match tie...");
                break;
            }
        }
    }

    display_game_stats(&session.stats());
    Ok(())
}
